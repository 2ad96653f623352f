//! `fetch`-based upload transport

use async_trait::async_trait;
use js_sys::{Array, Uint8Array};
use upload_core::{TransportError, UploadRequest, UploadResponse, UploadTransport};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, RequestInit, Response};

use crate::dom::js_message;

/// Posts the file as `multipart/form-data` with the browser's `fetch`
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl UploadTransport for FetchTransport {
    async fn send(&self, request: UploadRequest) -> Result<UploadResponse, TransportError> {
        let window = web_sys::window().ok_or_else(|| TransportError::new("No window"))?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&form_data(&request).map_err(transport_error)?);

        let pending = window.fetch_with_str_and_init(&request.endpoint, &init);
        let response: Response = JsFuture::from(pending)
            .await
            .map_err(transport_error)?
            .dyn_into()
            .map_err(transport_error)?;

        let buffer = JsFuture::from(response.array_buffer().map_err(transport_error)?)
            .await
            .map_err(transport_error)?;
        let body = Uint8Array::new(&buffer).to_vec();

        tracing::debug!(status = response.status(), size = body.len(), "Upload response");
        Ok(UploadResponse::new(response.status(), body))
    }
}

/// One part named after the request's field, carrying the file's bytes
fn form_data(request: &UploadRequest) -> Result<FormData, JsValue> {
    let file = &request.file;

    let parts = Array::of1(&Uint8Array::from(&file.data[..]));
    let options = BlobPropertyBag::new();
    if let Some(content_type) = &file.content_type {
        options.set_type(content_type);
    }
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

    let data = FormData::new()?;
    data.append_with_blob_and_filename(request.field_name, &blob, &file.file_name)?;
    Ok(data)
}

fn transport_error(value: JsValue) -> TransportError {
    TransportError::new(js_message(&value))
}
