use std::collections::HashMap;

use crate::error::{ClientError, ClientResult};
pub use myndfull_shared::protocol::{FormPart, HttpMethod, PartValue, RequestBody};

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 客户端特性 (Trait)
///
/// 所有实现都必须携带会话 cookie（credentialed request）。
/// (?Send) 是因为浏览器环境下的 fetch future 不是 Send 的。
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse>;
}

// =========================================================
// 实现层: reqwest 客户端 (Native)
// =========================================================

#[cfg(not(target_arch = "wasm32"))]
pub use native::ReqwestHttpClient;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::*;
    use reqwest::multipart::{Form, Part};

    /// 原生平台的客户端，cookie store 保存后端下发的会话 cookie
    #[derive(Clone)]
    pub struct ReqwestHttpClient {
        client: reqwest::Client,
    }

    impl ReqwestHttpClient {
        pub fn new() -> ClientResult<Self> {
            let client = reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .map_err(|e| ClientError::Build(e.to_string()))?;
            Ok(Self { client })
        }
    }

    fn multipart_form(parts: Vec<FormPart>) -> ClientResult<Form> {
        let mut form = Form::new();
        for part in parts {
            form = match part.value {
                PartValue::Text(text) => form.text(part.name, text),
                PartValue::File(upload) => {
                    let file = Part::bytes(upload.bytes)
                        .file_name(upload.file_name)
                        .mime_str(&upload.mime)
                        .map_err(|e| ClientError::Build(e.to_string()))?;
                    form.part(part.name, file)
                }
            };
        }
        Ok(form)
    }

    #[async_trait::async_trait(?Send)]
    impl HttpClient for ReqwestHttpClient {
        async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
            let method = match req.method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Post => reqwest::Method::POST,
                HttpMethod::Patch => reqwest::Method::PATCH,
                HttpMethod::Delete => reqwest::Method::DELETE,
            };

            let mut builder = self.client.request(method, &req.url);
            for (k, v) in &req.headers {
                builder = builder.header(k, v);
            }

            builder = match req.body {
                RequestBody::Empty => builder,
                RequestBody::Json(json) => builder
                    .header(reqwest::header::CONTENT_TYPE, "application/json")
                    .body(json),
                RequestBody::Multipart(parts) => builder.multipart(multipart_form(parts)?),
            };

            let resp = builder
                .send()
                .await
                .map_err(|e| ClientError::Network(e.to_string()))?;

            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .map_err(|e| ClientError::Network(e.to_string()))?;

            Ok(HttpResponse { status, body })
        }
    }
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub use mock::{MOCK_BASE, MockHttpClient};

#[cfg(test)]
mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    pub const MOCK_BASE: &str = "http://api.test";

    #[derive(Clone)]
    enum MockReply {
        Respond(HttpResponse),
        Fail(String),
        Hang,
    }

    struct Queued {
        reply: MockReply,
        served: bool,
    }

    #[derive(Default)]
    struct MockState {
        // (Method, URL) -> 依次返回的响应；只剩最后一个时重复返回，
        // 之后再注册的响应会取代它
        replies: RefCell<HashMap<(HttpMethod, String), VecDeque<Queued>>>,
        requests: RefCell<Vec<HttpRequest>>,
    }

    /// 记录请求并返回预设响应的客户端
    ///
    /// 内部使用 `Rc`，克隆后的实例共享同一份记录。
    #[derive(Clone, Default)]
    pub struct MockHttpClient {
        state: Rc<MockState>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        fn push(&self, method: HttpMethod, path: &str, reply: MockReply) {
            self.state
                .replies
                .borrow_mut()
                .entry((method, format!("{MOCK_BASE}{path}")))
                .or_default()
                .push_back(Queued {
                    reply,
                    served: false,
                });
        }

        pub fn mock_response(
            &self,
            method: HttpMethod,
            path: &str,
            status: u16,
            body: serde_json::Value,
        ) {
            let reply = MockReply::Respond(HttpResponse {
                status,
                body: body.to_string(),
            });
            self.push(method, path, reply);
        }

        /// 以后端的响应外壳包装 `data`
        pub fn mock_data(&self, method: HttpMethod, path: &str, data: serde_json::Value) {
            self.mock_response(
                method,
                path,
                200,
                serde_json::json!({ "statusCode": 200, "data": data, "success": true }),
            );
        }

        pub fn mock_network_error(&self, method: HttpMethod, path: &str) {
            self.push(method, path, MockReply::Fail("connection refused".into()));
        }

        /// 请求永远不返回，用于测试卸载时的取消
        pub fn mock_hang(&self, method: HttpMethod, path: &str) {
            self.push(method, path, MockReply::Hang);
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.state.requests.borrow().clone()
        }

        pub fn count(&self, method: HttpMethod, path: &str) -> usize {
            let url = format!("{MOCK_BASE}{path}");
            self.state
                .requests
                .borrow()
                .iter()
                .filter(|r| r.method == method && r.url == url)
                .count()
        }
    }

    #[async_trait::async_trait(?Send)]
    impl HttpClient for MockHttpClient {
        async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
            let key = (req.method, req.url.clone());
            self.state.requests.borrow_mut().push(req);

            let reply = {
                let mut replies = self.state.replies.borrow_mut();
                match replies.get_mut(&key) {
                    Some(queue) => {
                        while queue.len() > 1 && queue.front().is_some_and(|q| q.served) {
                            queue.pop_front();
                        }
                        if queue.len() > 1 {
                            queue.pop_front().map(|q| q.reply)
                        } else {
                            queue.front_mut().map(|q| {
                                q.served = true;
                                q.reply.clone()
                            })
                        }
                    }
                    None => None,
                }
            };

            match reply {
                Some(MockReply::Respond(resp)) => Ok(resp),
                Some(MockReply::Fail(msg)) => Err(ClientError::Network(msg)),
                Some(MockReply::Hang) => futures::future::pending().await,
                None => Ok(HttpResponse {
                    status: 404,
                    body: "Not Found".to_string(),
                }),
            }
        }
    }
}
