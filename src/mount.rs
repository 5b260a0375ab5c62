use std::future::Future;
use std::pin::pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use futures::channel::oneshot;
use futures::future::{Either, FutureExt, Shared, select};

/// 组件挂载标记
///
/// 页面卸载时调用 `unmount()`：所有经过 `guard` 的 future 被唤醒并丢弃，
/// 之后的状态写入也会被跳过。
#[derive(Clone)]
pub struct Mount {
    inner: Arc<Inner>,
}

struct Inner {
    mounted: AtomicBool,
    stop: Mutex<Option<oneshot::Sender<()>>>,
    stopped: Shared<oneshot::Receiver<()>>,
}

impl Default for Mount {
    fn default() -> Self {
        Self::new()
    }
}

impl Mount {
    pub fn new() -> Self {
        let (tx, rx) = oneshot::channel();
        Self {
            inner: Arc::new(Inner {
                mounted: AtomicBool::new(true),
                stop: Mutex::new(Some(tx)),
                stopped: rx.shared(),
            }),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.load(Ordering::Acquire)
    }

    pub fn unmount(&self) {
        self.inner.mounted.store(false, Ordering::Release);
        // 丢弃 sender 即可唤醒所有等待方
        self.inner
            .stop
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    /// 运行 `fut`，卸载后返回 `None`
    pub async fn guard<F: Future>(&self, fut: F) -> Option<F::Output> {
        if !self.is_mounted() {
            return None;
        }
        let fut = pin!(fut);
        let stopped = pin!(self.inner.stopped.clone());
        match select(fut, stopped).await {
            Either::Left((out, _)) if self.is_mounted() => Some(out),
            _ => None,
        }
    }
}
