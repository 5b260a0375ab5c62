//! LocalStorage 封装模块
//!
//! 基于 `gloo-storage`，只保存字符串，失败时静默忽略。

use gloo_storage::{LocalStorage as Backend, Storage};

/// 提供静态方法访问浏览器 LocalStorage API。
pub struct LocalStorage;

impl LocalStorage {
    /// 键不存在或读取失败时返回 `None`
    pub fn get(key: &str) -> Option<String> {
        Backend::get::<String>(key).ok()
    }

    pub fn set(key: &str, value: &str) -> bool {
        match Backend::set(key, value) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(%key, error = %e, "failed to write local storage");
                false
            }
        }
    }

    pub fn delete(key: &str) {
        Backend::delete(key);
    }
}
