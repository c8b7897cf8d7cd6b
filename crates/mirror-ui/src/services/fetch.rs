//! Browser `fetch` transport built on `gloo-net`.

use crate::services::http::{
    HttpMethod, HttpRequest, HttpResponse, MultipartPart, RequestBody, Transport, TransportError,
};
use async_trait::async_trait;
use gloo::file::Blob;
use gloo_net::http::Request;
use wasm_bindgen::JsValue;
use web_sys::FormData;

/// Transport that issues requests through the browser's `fetch`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => Request::get(&request.url),
            HttpMethod::Post => Request::post(&request.url),
            HttpMethod::Put => Request::put(&request.url),
            HttpMethod::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder
                .header("Content-Type", "application/json")
                .body(body),
            RequestBody::Form(pairs) => builder
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(RequestBody::encode_form(&pairs)),
            RequestBody::Multipart(parts) => builder.body(form_data(parts)?),
        };

        let response = builder
            .send()
            .await
            .map_err(|err| TransportError(err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| TransportError(err.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

fn form_data(parts: Vec<MultipartPart>) -> Result<FormData, TransportError> {
    let form = FormData::new().map_err(js_error("form-data failed"))?;
    for part in parts {
        match part {
            MultipartPart::Text { name, value } => form
                .append_with_str(&name, &value)
                .map_err(js_error("attach field"))?,
            MultipartPart::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                let blob = Blob::new_with_options(bytes.as_slice(), content_type.as_deref());
                form.append_with_blob_and_filename(&name, &web_sys::Blob::from(blob), &file_name)
                    .map_err(js_error("attach file"))?;
            }
        }
    }
    Ok(form)
}

fn js_error(context: &'static str) -> impl Fn(JsValue) -> TransportError {
    move |err| TransportError(format!("{context}: {err:?}"))
}
