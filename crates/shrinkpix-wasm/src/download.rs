//! Browser download trigger for compressed payloads.

use shrinkpix_core::DownloadArtifact;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// An object URL that is revoked when dropped.
struct ObjectUrl(String);

impl ObjectUrl {
    fn for_blob(blob: &Blob) -> Result<Self, JsValue> {
        Url::create_object_url_with_blob(blob).map(Self)
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        let _ = Url::revoke_object_url(&self.0);
    }
}

fn missing(what: &str) -> JsValue {
    JsValue::from_str(&format!("Download unavailable: no {what}"))
}

/// Save `artifact` by clicking a temporary anchor pointing at a blob URL.
///
/// The anchor is attached to the document only for the click. The blob URL
/// is released on every return path, including errors.
pub(crate) fn trigger_download(artifact: &DownloadArtifact) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| missing("window"))?;
    let document = window.document().ok_or_else(|| missing("document"))?;
    let body = document.body().ok_or_else(|| missing("document body"))?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(artifact.bytes.as_slice()));
    let options = BlobPropertyBag::new();
    options.set_type(artifact.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

    let url = ObjectUrl::for_blob(&blob)?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into()
        .map_err(|_| JsValue::from_str("Failed to create download link"))?;
    anchor.set_href(url.as_str());
    anchor.set_download(&artifact.file_name);

    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;

    log::debug!("downloaded {} ({} bytes)", artifact.file_name, artifact.len());
    Ok(())
}
