//! 全局会话存储
//!
//! 整个应用只有一个 `SessionStore`，所有页面共享。它缓存 `current-user` 探测结果，
//! 在登录、登出以及任何 401 响应时被显式更新。
//! 同一时刻最多只有一个探测请求在途，其余调用方等待它的结果。

use std::sync::{Arc, PoisonError, RwLock};

use futures::channel::oneshot;

use crate::api::MyndfullApi;
use crate::error::ClientResult;
use crate::request::HttpClient;
use myndfull_shared::UserRef;
use myndfull_shared::protocol::CurrentUserRequest;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// 尚未探测
    #[default]
    Unknown,
    Anonymous,
    Authenticated(UserRef),
}

impl SessionState {
    pub fn user(&self) -> Option<&UserRef> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

type Observer = Box<dyn Fn(&SessionState) + Send + Sync>;
type ProbeResult = ClientResult<Option<UserRef>>;

#[derive(Default)]
struct Inner {
    state: SessionState,
    observers: Vec<Observer>,
    /// 有探测在途时为 `Some`，里面是等待同一结果的调用方
    waiters: Option<Vec<oneshot::Sender<ProbeResult>>>,
}

/// 轮到调用方做什么
enum Turn {
    Cached(Option<UserRef>),
    Lead,
    Wait(oneshot::Receiver<ProbeResult>),
}

/// 在途探测的发起方
///
/// 发起方被取消（drop）时丢弃所有 sender，等待方随之醒来并重新排队。
struct InFlight<'a> {
    store: &'a SessionStore,
}

impl InFlight<'_> {
    fn finish(self, result: &ProbeResult) {
        for waiter in self.store.take_waiters() {
            let _ = waiter.send(result.clone());
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.store.take_waiters();
    }
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Inner>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> SessionState {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .state
            .clone()
    }

    pub fn user(&self) -> Option<UserRef> {
        self.snapshot().user().cloned()
    }

    /// 已确认是匿名访客
    pub fn is_anonymous(&self) -> bool {
        self.snapshot() == SessionState::Anonymous
    }

    pub fn set_user(&self, user: UserRef) {
        self.replace(SessionState::Authenticated(user));
    }

    /// 登出或收到 401 后调用
    pub fn clear(&self) {
        self.replace(SessionState::Anonymous);
    }

    /// 丢弃缓存，下一次访问重新探测
    pub fn invalidate(&self) {
        self.replace(SessionState::Unknown);
    }

    /// 注册状态变化回调，回调在写锁释放后调用
    pub fn subscribe(&self, observer: impl Fn(&SessionState) + Send + Sync + 'static) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .observers
            .push(Box::new(observer));
    }

    fn replace(&self, state: SessionState) {
        {
            let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
            if inner.state == state {
                return;
            }
            inner.state = state.clone();
        }
        tracing::debug!(authenticated = state.user().is_some(), "session changed");
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        for observer in &inner.observers {
            observer(&state);
        }
    }

    fn take_waiters(&self) -> Vec<oneshot::Sender<ProbeResult>> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .waiters
            .take()
            .unwrap_or_default()
    }

    fn turn(&self) -> Turn {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match &inner.state {
            SessionState::Authenticated(user) => return Turn::Cached(Some(user.clone())),
            SessionState::Anonymous => return Turn::Cached(None),
            SessionState::Unknown => {}
        }
        if let Some(waiters) = inner.waiters.as_mut() {
            let (tx, rx) = oneshot::channel();
            waiters.push(tx);
            return Turn::Wait(rx);
        }
        inner.waiters = Some(Vec::new());
        Turn::Lead
    }

    /// 返回当前用户，必要时探测后端
    ///
    /// 401 与 `data: null` 都视为匿名并缓存；其它错误不缓存，直接返回给调用方。
    /// 并发调用共用同一个请求。
    pub async fn current_user<C: HttpClient>(&self, api: &MyndfullApi<C>) -> ProbeResult {
        loop {
            match self.turn() {
                Turn::Cached(user) => return Ok(user),
                Turn::Lead => return self.probe(api).await,
                Turn::Wait(rx) => {
                    // 发起方被取消时 rx 返回 Err，重新排队
                    if let Ok(result) = rx.await {
                        return result;
                    }
                }
            }
        }
    }

    async fn probe<C: HttpClient>(&self, api: &MyndfullApi<C>) -> ProbeResult {
        let in_flight = InFlight { store: self };
        let result = match api.send(CurrentUserRequest).await {
            Ok(Some(user)) => {
                self.set_user(user.clone());
                Ok(Some(user))
            }
            Ok(None) => {
                self.clear();
                Ok(None)
            }
            Err(e) if e.is_unauthorized() => {
                self.clear();
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(error = %e, "session probe failed");
                Err(e)
            }
        };
        in_flight.finish(&result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::ClientError;
    use crate::request::{HttpMethod, HttpRequest, HttpResponse, MOCK_BASE, MockHttpClient};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PROBE: &str = "/api/v1/users/current-user";

    fn api(mock: &MockHttpClient) -> MyndfullApi<MockHttpClient> {
        MyndfullApi::new(mock.clone(), &ClientConfig::new(MOCK_BASE))
    }

    /// 先让出一次执行权再应答，模拟真实网络
    #[derive(Clone)]
    struct Yielding(MockHttpClient);

    #[async_trait::async_trait(?Send)]
    impl HttpClient for Yielding {
        async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
            tokio::task::yield_now().await;
            self.0.send(req).await
        }
    }

    fn yielding_api(mock: &MockHttpClient) -> MyndfullApi<Yielding> {
        MyndfullApi::new(Yielding(mock.clone()), &ClientConfig::new(MOCK_BASE))
    }

    #[tokio::test]
    async fn probe_result_is_cached() {
        let mock = MockHttpClient::new();
        mock.mock_data(HttpMethod::Get, PROBE, json!({ "_id": "u1", "username": "ana" }));
        let store = SessionStore::new();

        let first = store.current_user(&api(&mock)).await.unwrap();
        let second = store.current_user(&api(&mock)).await.unwrap();
        assert_eq!(first.unwrap().id, "u1");
        assert_eq!(second.unwrap().username, "ana");
        assert_eq!(mock.count(HttpMethod::Get, PROBE), 1);
    }

    #[tokio::test]
    async fn unauthorized_probe_means_anonymous() {
        let mock = MockHttpClient::new();
        mock.mock_response(HttpMethod::Get, PROBE, 401, json!({ "message": "Unauthorized request" }));
        let store = SessionStore::new();

        assert_eq!(store.current_user(&api(&mock)).await.unwrap(), None);
        assert!(store.is_anonymous());
    }

    #[tokio::test]
    async fn server_errors_are_not_cached() {
        let mock = MockHttpClient::new();
        mock.mock_network_error(HttpMethod::Get, PROBE);
        let store = SessionStore::new();

        assert!(store.current_user(&api(&mock)).await.is_err());
        assert_eq!(store.snapshot(), SessionState::Unknown);
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_request() {
        let mock = MockHttpClient::new();
        mock.mock_data(HttpMethod::Get, PROBE, json!({ "_id": "u1", "username": "ana" }));
        let store = SessionStore::new();
        let api = yielding_api(&mock);

        let (a, b, c) = futures::join!(
            store.current_user(&api),
            store.current_user(&api),
            store.current_user(&api)
        );
        for user in [a, b, c] {
            assert_eq!(user.unwrap().unwrap().id, "u1");
        }
        assert_eq!(mock.count(HttpMethod::Get, PROBE), 1);
    }

    #[tokio::test]
    async fn concurrent_callers_share_a_failure() {
        let mock = MockHttpClient::new();
        mock.mock_network_error(HttpMethod::Get, PROBE);
        let store = SessionStore::new();
        let api = yielding_api(&mock);

        let (a, b) = futures::join!(store.current_user(&api), store.current_user(&api));
        assert!(matches!(a, Err(ClientError::Network(_))));
        assert!(matches!(b, Err(ClientError::Network(_))));
        assert_eq!(mock.count(HttpMethod::Get, PROBE), 1);
        assert_eq!(store.snapshot(), SessionState::Unknown);
    }

    #[tokio::test]
    async fn waiter_takes_over_when_first_caller_is_dropped() {
        let mock = MockHttpClient::new();
        mock.mock_hang(HttpMethod::Get, PROBE);
        mock.mock_data(HttpMethod::Get, PROBE, json!({ "_id": "u1", "username": "ana" }));
        let store = SessionStore::new();
        let api = api(&mock);

        let mut first = Box::pin(store.current_user(&api));
        assert!(futures::poll!(first.as_mut()).is_pending());
        let mut second = Box::pin(store.current_user(&api));
        assert!(futures::poll!(second.as_mut()).is_pending());
        drop(first);

        assert_eq!(second.await.unwrap().unwrap().id, "u1");
        assert_eq!(mock.count(HttpMethod::Get, PROBE), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_a_new_probe() {
        let mock = MockHttpClient::new();
        mock.mock_data(HttpMethod::Get, PROBE, json!(null));
        let store = SessionStore::new();

        store.current_user(&api(&mock)).await.unwrap();
        store.invalidate();
        store.current_user(&api(&mock)).await.unwrap();
        assert_eq!(mock.count(HttpMethod::Get, PROBE), 2);
    }

    #[test]
    fn observers_see_changes_once() {
        let store = SessionStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        store.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        store.clear();
        store.clear();
        store.set_user(UserRef {
            id: "u1".into(),
            username: "ana".into(),
            full_name: None,
            email: None,
            avatar: None,
        });
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.user().unwrap().id, "u1");
    }
}
