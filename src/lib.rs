//! MyndFull 客户端核心
//!
//! 与平台无关的部分：HTTP 抽象、后端网关、会话存储、需要登录的页面状态机、
//! 各页面控制器和呼吸练习计时。浏览器界面在 `frontend` crate 中。

pub mod api;
pub mod breathing;
pub mod config;
pub mod error;
pub mod mount;
pub mod pages;
pub mod request;
pub mod session;
pub mod view;

#[cfg(test)]
mod testing;

// =========================================================
// 常用类型再导出
// =========================================================

pub use api::MyndfullApi;
pub use breathing::{BreathStep, BreathingSession};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ErrorClass};
pub use mount::Mount;
pub use request::{HttpClient, HttpRequest, HttpResponse};
pub use session::{SessionState, SessionStore};
pub use view::{AuthorizedView, LOAD_FAILED, Phase, Submission, ViewSink, ViewState};

#[cfg(not(target_arch = "wasm32"))]
pub use request::ReqwestHttpClient;

pub use myndfull_shared as shared;
