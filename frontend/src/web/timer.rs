//! 定时器封装模块
//!
//! 基于 `gloo-timers`。`Interval` 被 drop 时自动清除定时器。

use gloo_timers::callback::Interval as Backend;

/// 周期性定时器
pub struct Interval {
    _inner: Backend,
}

impl Interval {
    /// 每隔 `millis` 毫秒调用一次 `callback`
    pub fn new<F>(millis: u32, callback: F) -> Self
    where
        F: FnMut() + 'static,
    {
        Self {
            _inner: Backend::new(millis, callback),
        }
    }
}
