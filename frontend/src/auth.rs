//! 认证模块
//!
//! 包装核心库的 `SessionStore`，把会话变化同步到一个响应式信号上。
//! 路由服务通过注入的信号检查认证状态，与本模块解耦。

use crate::web::{FetchClient, LocalStorage};
use leptos::prelude::*;
use leptos::task::spawn_local;
use myndfull::pages::AccountFlow;
use myndfull::shared::UserRef;
use myndfull::{ClientConfig, MyndfullApi, SessionState, SessionStore};

/// 上次登录使用的邮箱（从不保存密码）
const STORAGE_EMAIL_KEY: &str = "myndfull_email";

pub type Api = MyndfullApi<FetchClient>;

/// 认证上下文
///
/// 通过 Context 在组件间共享。
#[derive(Clone)]
pub struct AuthContext {
    pub api: Api,
    pub session: SessionStore,
    state: RwSignal<SessionState>,
}

impl AuthContext {
    pub fn new(config: &ClientConfig) -> Self {
        let api = MyndfullApi::new(FetchClient, config);
        let session = SessionStore::new();
        let state = RwSignal::new(session.snapshot());

        session.subscribe(move |next| {
            // 上下文被释放后忽略
            let _ = state.try_set(next.clone());
        });

        Self {
            api,
            session,
            state,
        }
    }

    /// 已确认未登录（用于路由服务注入）
    pub fn is_anonymous_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| *s == SessionState::Anonymous))
    }

    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user().is_some()))
    }

    pub fn user_signal(&self) -> Signal<Option<UserRef>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user().cloned()))
    }

    /// 在后台探测会话（已有缓存时不发请求）
    pub fn probe(&self) {
        let api = self.api.clone();
        let session = self.session.clone();
        spawn_local(async move {
            if let Err(e) = session.current_user(&api).await {
                tracing::warn!(error = %e, "session probe failed");
            }
        });
    }

    pub fn account(&self) -> AccountFlow<FetchClient> {
        AccountFlow::new(self.api.clone(), self.session.clone())
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

pub fn remembered_email() -> String {
    LocalStorage::get(STORAGE_EMAIL_KEY).unwrap_or_default()
}

pub fn remember_email(email: &str) {
    LocalStorage::set(STORAGE_EMAIL_KEY, email);
}
