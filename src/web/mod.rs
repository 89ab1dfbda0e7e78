//! Browser binding (feature `web`).
//!
//! Binds a [`ScrubController`](crate::ScrubController) to a DOM element:
//! frames load as `HtmlImageElement`s and are shown as the container's
//! background image, wheel/key/pointer listeners feed the input processor,
//! and a `requestAnimationFrame` loop drives ticks. Background preloads run
//! on `wasm_bindgen_futures::spawn_local`.

mod dom;
mod listener;
mod loader;
mod scrubber;

pub use dom::{ElementSink, WindowAnnotator};
pub use listener::Listener;
pub use loader::WebImageLoader;
pub use scrubber::{mount_scrubview, WebScrubber};
use wasm_bindgen::prelude::*;

use crate::error::ScrubError;
use crate::runtime::TaskSpawner;

/// Spawns background tasks on the browser microtask queue.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebSpawner;

impl TaskSpawner for WebSpawner {
    fn spawn(&self, task: futures::future::LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

/// Install the console logger and panic hook when the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // A logger was already installed by the embedding page
        log::debug!("console logger already set");
    }
}

fn js_error(e: &JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{e:?}"))
}

impl From<ScrubError> for JsValue {
    fn from(e: ScrubError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}
