use crate::api::MyndfullApi;
use crate::error::{ClientError, ClientResult};
use crate::request::HttpClient;
use crate::session::SessionStore;
use myndfull_shared::protocol::LogoutRequest;
use myndfull_shared::{Credentials, Registration, UserRef};

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTER_FAILED: &str = "Registration failed";

/// 登录、注册与登出
///
/// 这些表单不需要登录，也不走 `AuthorizedView`；表单状态由界面层自己保存。
pub struct AccountFlow<C> {
    api: MyndfullApi<C>,
    session: SessionStore,
}

impl<C: Clone> Clone for AccountFlow<C> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            session: self.session.clone(),
        }
    }
}

impl<C: HttpClient> AccountFlow<C> {
    pub fn new(api: MyndfullApi<C>, session: SessionStore) -> Self {
        Self { api, session }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// 成功后更新会话；响应里没有用户时让下一次访问重新探测
    pub async fn login(&self, credentials: Credentials) -> ClientResult<Option<UserRef>> {
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(ClientError::validation("Email and password are required"));
        }

        let resp = self.api.send(credentials).await?;
        match &resp.user {
            Some(user) => self.session.set_user(user.clone()),
            None => self.session.invalidate(),
        }
        tracing::debug!("signed in");
        Ok(resp.user)
    }

    pub async fn register(&self, registration: Registration) -> ClientResult<()> {
        let required = [
            &registration.full_name,
            &registration.username,
            &registration.email,
            &registration.password,
        ];
        if required.iter().any(|v| v.trim().is_empty()) {
            return Err(ClientError::validation("All fields are required"));
        }

        self.api.send(registration).await?;
        Ok(())
    }

    /// 无论后端是否成功，本地会话都会被清空
    pub async fn logout(&self) -> ClientResult<()> {
        let result = self.api.send(LogoutRequest).await;
        self.session.clear();
        if let Err(e) = &result {
            tracing::warn!(error = %e, "logout request failed");
        }
        result.map(|_| ())
    }
}
