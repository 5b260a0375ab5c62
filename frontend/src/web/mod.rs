//! 浏览器 API 封装模块
//!
//! 所有对 window、history、storage、fetch 的访问都集中在这里。

pub mod file;
mod http;
pub mod route;
pub mod router;
mod storage;
mod timer;

pub use http::FetchClient;
pub use storage::LocalStorage;
pub use timer::Interval;
