use futures::FutureExt;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

use super::js_error;
use crate::loader::{FrameLoader, LoadFailure, LoadFuture};

/// Loads frames as decoded `HtmlImageElement`s.
///
/// The load settles on the element's `load` or `error` event; the returned
/// element keeps the decoded image alive in the browser's memory cache.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebImageLoader;

async fn load_image(url: String) -> Result<HtmlImageElement, LoadFailure> {
    let image = HtmlImageElement::new().map_err(|e| LoadFailure::new(&url, js_error(&e)))?;

    let settled = js_sys::Promise::new(&mut |resolve, reject| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    image.set_src(&url);

    let result = JsFuture::from(settled).await;
    image.set_onload(None);
    image.set_onerror(None);
    match result {
        Ok(_) => Ok(image),
        Err(_) => Err(LoadFailure::new(url, "image failed to load or decode")),
    }
}

impl FrameLoader for WebImageLoader {
    type Handle = HtmlImageElement;

    fn load(&self, url: &str) -> LoadFuture<HtmlImageElement> {
        load_image(url.to_owned()).boxed_local()
    }
}
