use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

use super::js_error;
use crate::error::ScrubError;

/// A DOM event listener that is removed when dropped.
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Register `handler` for `kind` events on `target`.
    ///
    /// Non-passive listeners may call `preventDefault` (wheel, scroll).
    pub fn attach(
        target: &EventTarget,
        kind: &'static str,
        passive: bool,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, ScrubError> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                callback.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|e| {
                ScrubError::Dom(format!("failed to add {kind} listener: {}", js_error(&e)))
            })?;

        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }

    /// Event type this listener handles.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref())
        {
            log::warn!("failed to remove {} listener: {}", self.kind, js_error(&e));
        }
    }
}
