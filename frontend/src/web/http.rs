//! 浏览器 HTTP 客户端
//!
//! 基于 `gloo-net` 实现核心库的 [`HttpClient`] 特性。所有请求都带上
//! `credentials: include`，会话 cookie 由浏览器管理。

use gloo_net::http::{Request, RequestBuilder};
use myndfull::{ClientError, ClientResult, HttpClient, HttpRequest, HttpResponse};
use myndfull::request::{FormPart, HttpMethod, PartValue, RequestBody};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData, RequestCredentials};

#[derive(Clone, Copy, Default)]
pub struct FetchClient;

fn build_error(e: JsValue) -> ClientError {
    ClientError::Build(format!("{:?}", e))
}

/// 把字节包装成带 MIME 类型的 Blob
fn to_blob(bytes: &[u8], mime: &str) -> ClientResult<Blob> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let bag = BlobPropertyBag::new();
    bag.set_type(mime);
    Blob::new_with_u8_array_sequence_and_options(&parts, &bag).map_err(build_error)
}

fn to_form_data(parts: &[FormPart]) -> ClientResult<FormData> {
    let form = FormData::new().map_err(build_error)?;
    for part in parts {
        match &part.value {
            PartValue::Text(text) => form.append_with_str(&part.name, text),
            PartValue::File(upload) => {
                let blob = to_blob(&upload.bytes, &upload.mime)?;
                form.append_with_blob_and_filename(&part.name, &blob, &upload.file_name)
            }
        }
        .map_err(build_error)?;
    }
    Ok(form)
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let mut builder: RequestBuilder = match req.method {
            HttpMethod::Get => Request::get(&req.url),
            HttpMethod::Post => Request::post(&req.url),
            HttpMethod::Patch => Request::patch(&req.url),
            HttpMethod::Delete => Request::delete(&req.url),
        }
        .credentials(RequestCredentials::Include);

        for (k, v) in &req.headers {
            builder = builder.header(k, v);
        }

        // multipart 的 Content-Type（含 boundary）由浏览器生成
        let request = match &req.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(json) => builder
                .header("Content-Type", "application/json")
                .body(json.as_str()),
            RequestBody::Multipart(parts) => builder.body(to_form_data(parts)?),
        }
        .map_err(|e| ClientError::Build(e.to_string()))?;

        let resp = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
