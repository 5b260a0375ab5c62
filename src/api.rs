use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use myndfull_shared::protocol::{ApiEnvelope, ApiRequest};
use serde::de::DeserializeOwned;

// =========================================================
// 业务逻辑: MyndfullApi
// =========================================================

/// 后端网关
///
/// 这里接受任何实现了 HttpClient 的客户端，从而解耦了具体的 HTTP 实现。
/// 所有请求都走同一套信封解析和错误分类。
pub struct MyndfullApi<C> {
    client: C,
    base_url: String,
}

impl<C: Clone> Clone for MyndfullApi<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

impl<C: HttpClient> MyndfullApi<C> {
    pub fn new(client: C, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.backend_url.clone(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // Request example
    // curl -X POST --cookie "accessToken=..." \
    //   -H "Accept: application/json" \
    //   http://localhost:8000/api/v1/community/<id>/like
    //
    // Response
    // { "statusCode": 200, "data": { ...post }, "message": "...", "success": true }
    pub async fn send<R: ApiRequest>(&self, req: R) -> ClientResult<R::Response> {
        let url = self.url(&req.path());
        tracing::debug!(method = R::METHOD.as_str(), %url, "api request");

        let http = HttpRequest::new(&url, R::METHOD)
            .with_header("Accept", "application/json")
            .with_body(req.body()?);

        let resp = self.client.send(http).await?;
        decode(resp)
    }
}

/// 解析响应外壳
fn decode<T: DeserializeOwned>(resp: HttpResponse) -> ClientResult<T> {
    let envelope = serde_json::from_str::<ApiEnvelope>(&resp.body).ok();
    let message = envelope.as_ref().and_then(|e| e.message.clone());

    if resp.status == 401 {
        return Err(ClientError::Unauthorized(message));
    }
    if !resp.is_success() {
        tracing::warn!(status = resp.status, ?message, "api call failed");
        return Err(ClientError::Server {
            status: resp.status,
            message,
        });
    }

    let envelope = match envelope {
        Some(envelope) => envelope,
        // 2xx 但不是 JSON 时按解析错误处理
        None => serde_json::from_str::<ApiEnvelope>(&resp.body)?,
    };
    if !envelope.success {
        return Err(ClientError::Server {
            status: resp.status,
            message: envelope.message,
        });
    }

    Ok(serde_json::from_value(envelope.data)?)
}
