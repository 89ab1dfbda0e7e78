use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, HtmlElement, KeyboardEvent, MouseEvent, WheelEvent, Window};

use super::dom::{ElementSink, WindowAnnotator};
use super::js_error;
use super::listener::Listener;
use super::loader::WebImageLoader;
use super::WebSpawner;
use crate::error::ScrubError;
use crate::input::InputEvent;
use crate::options::Options;
use crate::sequence::{ScrubCommand, ScrubController};

type WebController = ScrubController<WebImageLoader, ElementSink, WindowAnnotator>;
type SharedController = Rc<RefCell<WebController>>;

/// Self-rescheduling `requestAnimationFrame` loop.
struct FrameLoop {
    window: Window,
    handle: Cell<Option<i32>>,
    stopped: Cell<bool>,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl FrameLoop {
    fn start(window: Window, mut tick: impl FnMut() + 'static) -> Rc<Self> {
        let frame_loop = Rc::new(Self {
            window,
            handle: Cell::new(None),
            stopped: Cell::new(false),
            callback: RefCell::new(None),
        });

        let weak = Rc::downgrade(&frame_loop);
        let callback = Closure::<dyn FnMut()>::new(move || {
            let Some(frame_loop) = weak.upgrade() else {
                return;
            };
            frame_loop.handle.set(None);
            if frame_loop.stopped.get() {
                return;
            }
            tick();
            frame_loop.request();
        });
        *frame_loop.callback.borrow_mut() = Some(callback);
        frame_loop.request();
        frame_loop
    }

    fn request(&self) {
        if self.stopped.get() {
            return;
        }
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        match self.window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(handle) => self.handle.set(Some(handle)),
            Err(e) => log::error!("requestAnimationFrame failed: {}", js_error(&e)),
        }
    }

    fn cancel(&self) {
        self.stopped.set(true);
        if let Some(handle) = self.handle.take() {
            if let Err(e) = self.window.cancel_animation_frame(handle) {
                log::warn!("cancelAnimationFrame failed: {}", js_error(&e));
            }
        }
    }
}

/// A scrubber mounted on a page.
///
/// Owns its event listeners and animation-frame loop; [`detach`](Self::detach)
/// (or dropping the value) removes every listener and stops the loop.
#[wasm_bindgen]
pub struct WebScrubber {
    controller: SharedController,
    listeners: Vec<Listener>,
    frame_loop: Option<Rc<FrameLoop>>,
}

impl WebScrubber {
    /// Initialize a controller on `#container_id` and start ticking.
    ///
    /// `loading_id` names an optional loading indicator element. Fails when
    /// an element is missing, a listener cannot be added, or the frames
    /// cannot be found (the diagnostic is shown in the page first).
    pub async fn mount(
        options: Options,
        container_id: &str,
        loading_id: Option<&str>,
    ) -> Result<Self, ScrubError> {
        let window = web_sys::window().ok_or_else(|| ScrubError::Dom("no global window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| ScrubError::Dom("no document".into()))?;
        let container = element_by_id(&document, container_id)?;
        let loading = loading_id
            .map(|id| element_by_id(&document, id))
            .transpose()?;

        let controller = ScrubController::init(
            options,
            WebImageLoader,
            ElementSink::new(container.clone(), loading),
            WindowAnnotator::new(window.clone()),
            Rc::new(WebSpawner),
        )
        .await?;
        let controller = Rc::new(RefCell::new(controller));

        let listeners = attach_listeners(&window, &container, &controller)?;
        let frame_loop = {
            let controller = Rc::clone(&controller);
            FrameLoop::start(window, move || match controller.try_borrow_mut() {
                Ok(mut controller) => {
                    let _ = controller.tick();
                }
                Err(_) => log::debug!("skipping re-entrant tick"),
            })
        };

        log::info!("scrubber mounted on #{container_id}");
        Ok(Self {
            controller,
            listeners,
            frame_loop: Some(frame_loop),
        })
    }

    fn command(&self, cmd: ScrubCommand) {
        match self.controller.try_borrow_mut() {
            Ok(mut controller) => controller.execute(cmd),
            Err(_) => log::debug!("dropping re-entrant command {cmd:?}"),
        }
    }
}

#[wasm_bindgen]
impl WebScrubber {
    /// Remove every listener and stop the animation-frame loop.
    pub fn detach(&mut self) {
        if let Some(frame_loop) = self.frame_loop.take() {
            frame_loop.cancel();
        }
        let removed = self.listeners.len();
        self.listeners.clear();
        if removed > 0 {
            log::info!("scrubber detached ({removed} listeners removed)");
        }
    }

    /// Frame currently displayed.
    #[wasm_bindgen(getter, js_name = currentFrame)]
    #[must_use]
    pub fn current_frame(&self) -> usize {
        self.controller
            .try_borrow()
            .map_or(0, |c| c.playhead().current_frame())
    }

    /// Add velocity in frames per tick (negative scrubs backward).
    pub fn impulse(&self, velocity: f64) {
        self.command(ScrubCommand::Impulse { velocity });
    }

    /// Flip autoplay.
    #[wasm_bindgen(js_name = togglePlayback)]
    pub fn toggle_playback(&self) {
        self.command(ScrubCommand::TogglePlayback);
    }
}

impl Drop for WebScrubber {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Mount a scrubber from JavaScript.
///
/// `options_toml` overrides the defaults (frame count, base paths, naming
/// template, gains).
#[wasm_bindgen(js_name = mountScrubview)]
pub async fn mount_scrubview(
    container_id: String,
    loading_id: Option<String>,
    options_toml: Option<String>,
) -> Result<WebScrubber, JsValue> {
    let options = match options_toml {
        Some(toml) => Options::from_toml(&toml)?,
        None => Options::default(),
    };
    Ok(WebScrubber::mount(options, &container_id, loading_id.as_deref()).await?)
}

fn element_by_id(document: &Document, id: &str) -> Result<HtmlElement, ScrubError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| ScrubError::Dom(format!("no element #{id}")))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| ScrubError::Dom(format!("#{id} is not an HTML element")))
}

/// Forward one translated DOM event to the controller, suppressing the
/// default action when the controller claims it.
fn forward(controller: &SharedController, event: &Event, input: &InputEvent) {
    match controller.try_borrow_mut() {
        Ok(mut controller) => {
            if controller.handle_event(input) {
                event.prevent_default();
            }
        }
        Err(_) => log::debug!("dropping re-entrant {input:?}"),
    }
}

fn listen(
    target: &EventTarget,
    kind: &'static str,
    passive: bool,
    controller: &SharedController,
    translate: impl Fn(&Event) -> Option<InputEvent> + 'static,
) -> Result<Listener, ScrubError> {
    let controller = Rc::clone(controller);
    Listener::attach(target, kind, passive, move |event: Event| {
        if let Some(input) = translate(&event) {
            forward(&controller, &event, &input);
        }
    })
}

fn attach_listeners(
    window: &Window,
    container: &HtmlElement,
    controller: &SharedController,
) -> Result<Vec<Listener>, ScrubError> {
    Ok(vec![
        listen(window, "wheel", false, controller, |e| {
            e.dyn_ref::<WheelEvent>().map(|e| InputEvent::Wheel {
                delta_y: e.delta_y(),
            })
        })?,
        listen(window, "keydown", true, controller, |e| {
            e.dyn_ref::<KeyboardEvent>()
                .map(|e| InputEvent::KeyDown { key: e.key() })
        })?,
        listen(container, "mousedown", true, controller, |e| {
            e.dyn_ref::<MouseEvent>().map(|e| InputEvent::PointerDown {
                x: f64::from(e.client_x()),
            })
        })?,
        listen(window, "mousemove", true, controller, |e| {
            e.dyn_ref::<MouseEvent>().map(|e| InputEvent::PointerMove {
                x: f64::from(e.client_x()),
            })
        })?,
        listen(window, "mouseup", true, controller, |_| {
            Some(InputEvent::PointerUp)
        })?,
        listen(window, "scroll", false, controller, |_| {
            Some(InputEvent::PageScroll)
        })?,
    ])
}
