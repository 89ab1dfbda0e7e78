use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, HtmlImageElement, Window};

use super::js_error;
use crate::sequence::FrameId;
use crate::sink::{FrameAnnotator, FrameSink};

/// Shows frames as the `background-image` of a container element.
pub struct ElementSink {
    container: HtmlElement,
    loading: Option<HtmlElement>,
    /// Source currently set, to skip redundant style writes.
    shown: Option<String>,
}

impl ElementSink {
    /// Sink drawing into `container`, toggling the optional `loading`
    /// indicator during initialization.
    #[must_use]
    pub fn new(container: HtmlElement, loading: Option<HtmlElement>) -> Self {
        Self {
            container,
            loading,
            shown: None,
        }
    }

    /// The container element.
    #[must_use]
    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    fn set_style(element: &HtmlElement, property: &str, value: &str) {
        if let Err(e) = element.style().set_property(property, value) {
            log::warn!("failed to set {property}: {}", js_error(&e));
        }
    }
}

impl FrameSink<HtmlImageElement> for ElementSink {
    fn show_frame(
        &mut self,
        _index: usize,
        _id: &FrameId,
        image: Option<&HtmlImageElement>,
    ) {
        let src = image.map(HtmlImageElement::src);
        if src == self.shown {
            return;
        }
        let value = src
            .as_deref()
            .map_or_else(|| "none".to_owned(), |s| format!("url(\"{s}\")"));
        Self::set_style(&self.container, "background-image", &value);
        self.shown = src;
    }

    fn set_loading(&mut self, loading: bool) {
        if let Some(indicator) = &self.loading {
            Self::set_style(indicator, "display", if loading { "flex" } else { "none" });
        }
    }

    fn show_error(&mut self, message: &str) {
        let target = self.loading.as_ref().unwrap_or(&self.container);
        target.set_inner_text(message);
        Self::set_style(target, "display", "flex");
        Self::set_style(&self.container, "background-image", "none");
        self.shown = None;
    }
}

/// Calls the page's `window.showInfoAtFrame(index)` hook when defined.
///
/// The hook is looked up on every call so a page can install it after the
/// scrubber is mounted.
pub struct WindowAnnotator {
    window: Window,
}

impl WindowAnnotator {
    /// Annotator bound to `window`.
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameAnnotator for WindowAnnotator {
    fn annotate(&mut self, index: usize) {
        let Ok(hook) = js_sys::Reflect::get(&self.window, &JsValue::from_str("showInfoAtFrame"))
        else {
            return;
        };
        let Some(hook) = hook.dyn_ref::<js_sys::Function>() else {
            return;
        };
        if let Err(e) = hook.call1(&JsValue::NULL, &JsValue::from(index as u32)) {
            log::debug!("showInfoAtFrame({index}) threw: {}", js_error(&e));
        }
    }
}
