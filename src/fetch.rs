//! Multipart upload to the prediction endpoint via `fetch`.

use leafcheck_core::{HttpReply, PredictError, PredictRequest};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, RequestInit, Response};

use crate::dom::describe_js_value;

/// POST the file as multipart form data and collect status and body text.
///
/// Any exception along the way (network failure, unreadable body) becomes a
/// transport error carrying the exception's text.
pub async fn post_file(request: &PredictRequest<File>) -> Result<HttpReply, PredictError> {
    send(request)
        .await
        .map_err(|e| PredictError::transport(describe_js_value(&e)))
}

async fn send(request: &PredictRequest<File>) -> Result<HttpReply, JsValue> {
    let form = FormData::new()?;
    form.append_with_blob_and_filename(&request.field_name, &request.file, &request.file_name)?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&form);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))?;
    let started = js_sys::Date::now();
    let pending = window.fetch_with_str_and_init(&request.endpoint, &init);
    let response: Response = JsFuture::from(pending).await?.dyn_into()?;
    let body = JsFuture::from(response.text()?)
        .await?
        .as_string()
        .unwrap_or_default();

    log::debug!(
        "📡 {} answered {} after {:.0}ms ({} bytes)",
        request.endpoint,
        response.status(),
        js_sys::Date::now() - started,
        body.len()
    );
    Ok(HttpReply::new(response.status(), body))
}
