//! 需要登录的页面共用的状态机
//!
//! 每个页面只提供自己的列表请求与写请求，`AuthorizedView` 负责：
//! 先确认会话、再拉取列表；提交时的忙碌判断；401 时跳转并重置；
//! 其它错误写入可关闭的提示；卸载后不再写入任何状态。

use std::cell::RefCell;
use std::future::Future;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::api::MyndfullApi;
use crate::error::{ClientError, ClientResult};
use crate::mount::Mount;
use crate::request::HttpClient;
use crate::session::SessionStore;
use myndfull_shared::UserRef;

/// 加载失败时的通用提示
pub const LOAD_FAILED: &str = "Failed to load content";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Loading,
    Idle,
    Submitting,
    /// 未登录，界面层应跳转到 `/login`
    Redirecting,
    /// 加载失败，页面保留并显示提示
    Failed,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState<T> {
    pub phase: Phase,
    pub user: Option<UserRef>,
    pub page: T,
    pub error: Option<String>,
}

impl<T> ViewState<T> {
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn report(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Loading | Phase::Submitting)
    }

    /// 可以接受提交
    pub fn is_ready(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Failed)
    }
}

/// 页面状态的存放位置
///
/// 测试里是 `Rc<RefCell<_>>`，浏览器里是响应式 signal。
pub trait ViewSink<T> {
    fn update_state(&self, f: impl FnOnce(&mut ViewState<T>));
    /// 存放位置已被释放时返回 `None`
    fn with_state<R>(&self, f: impl FnOnce(&ViewState<T>) -> R) -> Option<R>;
}

impl<T> ViewSink<T> for Rc<RefCell<ViewState<T>>> {
    fn update_state(&self, f: impl FnOnce(&mut ViewState<T>)) {
        f(&mut self.borrow_mut());
    }

    fn with_state<R>(&self, f: impl FnOnce(&ViewState<T>) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }
}

/// 一次提交的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Accepted,
    /// 本地校验未通过，没有发出请求
    Rejected,
    /// 页面正在加载或提交，没有发出请求
    Busy,
    Failed,
    Redirected,
    /// 请求途中页面被卸载
    Cancelled,
}

pub struct AuthorizedView<C, S, T> {
    api: MyndfullApi<C>,
    session: SessionStore,
    sink: S,
    mount: Mount,
    _page: PhantomData<fn() -> T>,
}

impl<C: Clone, S: Clone, T> Clone for AuthorizedView<C, S, T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            session: self.session.clone(),
            sink: self.sink.clone(),
            mount: self.mount.clone(),
            _page: PhantomData,
        }
    }
}

impl<C, S, T> AuthorizedView<C, S, T>
where
    C: HttpClient,
    S: ViewSink<T>,
    T: Default,
{
    pub fn new(api: MyndfullApi<C>, session: SessionStore, sink: S) -> Self {
        Self {
            api,
            session,
            sink,
            mount: Mount::new(),
            _page: PhantomData,
        }
    }

    pub fn api(&self) -> &MyndfullApi<C> {
        &self.api
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    pub fn unmount(&self) {
        self.mount.unmount();
    }

    /// 卸载后的写入直接丢弃
    pub fn update(&self, f: impl FnOnce(&mut ViewState<T>)) {
        if self.mount.is_mounted() {
            self.sink.update_state(f);
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&ViewState<T>) -> R) -> Option<R> {
        self.sink.with_state(f)
    }

    pub fn user(&self) -> Option<UserRef> {
        self.read(|s| s.user.clone()).flatten()
    }

    /// 清空页面状态并进入 `Redirecting`
    pub fn redirect(&self) {
        tracing::debug!("not signed in, redirecting to login");
        self.update(|s| {
            *s = ViewState {
                phase: Phase::Redirecting,
                ..ViewState::default()
            };
        });
    }

    fn unauthorized(&self) {
        self.session.clear();
        self.redirect();
    }

    /// 挂载时调用：先确认会话，再拉取列表
    ///
    /// `fetch` 只有在确认登录后才会被 poll，未登录时直接丢弃，不会发出请求。
    /// 页面被卸载时返回 `None`。
    pub async fn open<D>(
        &self,
        fetch: impl Future<Output = ClientResult<D>>,
        apply: impl FnOnce(&mut T, D),
    ) -> Option<Phase> {
        self.update(|s| {
            s.phase = Phase::Loading;
            s.error = None;
        });

        let probe = self.mount.guard(self.session.current_user(&self.api)).await?;
        match probe {
            Ok(Some(user)) => self.update(|s| s.user = Some(user)),
            Ok(None) => {
                self.redirect();
                return Some(Phase::Redirecting);
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to check session");
                self.update(|s| {
                    s.phase = Phase::Failed;
                    s.report(LOAD_FAILED);
                });
                return Some(Phase::Failed);
            }
        }

        let phase = match self.mount.guard(fetch).await? {
            Ok(data) => {
                self.update(|s| {
                    apply(&mut s.page, data);
                    s.phase = Phase::Idle;
                });
                Phase::Idle
            }
            Err(e) if e.is_unauthorized() => {
                self.unauthorized();
                Phase::Redirecting
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load page data");
                self.update(|s| {
                    s.phase = Phase::Failed;
                    s.report(LOAD_FAILED);
                });
                Phase::Failed
            }
        };
        Some(phase)
    }

    /// 变更后重新拉取整个列表
    pub async fn refresh<D>(
        &self,
        fetch: impl Future<Output = ClientResult<D>>,
        apply: impl FnOnce(&mut T, D),
    ) -> Submission {
        let Some(result) = self.mount.guard(fetch).await else {
            return Submission::Cancelled;
        };
        match result {
            Ok(data) => {
                self.update(|s| {
                    apply(&mut s.page, data);
                    if s.phase == Phase::Failed {
                        s.phase = Phase::Idle;
                    }
                });
                Submission::Accepted
            }
            Err(e) if e.is_unauthorized() => {
                self.unauthorized();
                Submission::Redirected
            }
            Err(e) => {
                tracing::warn!(error = %e, "refresh failed");
                self.update(|s| s.report(LOAD_FAILED));
                Submission::Failed
            }
        }
    }

    /// 客户端校验失败，不发请求
    pub fn reject(&self, message: impl Into<String>) -> Submission {
        let message = message.into();
        self.update(|s| s.report(message));
        Submission::Rejected
    }

    /// 执行一次写请求
    ///
    /// 只在页面已就绪时发出请求；`write` 在此之前不会被 poll。
    pub async fn submit<D>(
        &self,
        write: impl Future<Output = ClientResult<D>>,
        on_success: impl FnOnce(&mut ViewState<T>, D),
        on_failure: impl FnOnce(&mut ViewState<T>, ClientError),
    ) -> Submission {
        let Some((phase, has_user)) = self.read(|s| (s.phase, s.user.is_some())) else {
            return Submission::Cancelled;
        };
        match phase {
            Phase::Loading | Phase::Submitting => return Submission::Busy,
            Phase::Redirecting => return Submission::Redirected,
            Phase::Idle | Phase::Failed => {}
        }
        self.update(|s| {
            s.phase = Phase::Submitting;
            s.error = None;
        });

        // 加载时会话探测失败，页面上还没有用户：重新探测一次
        if !has_user {
            let Some(probe) = self.mount.guard(self.session.current_user(&self.api)).await else {
                return Submission::Cancelled;
            };
            match probe {
                Ok(Some(user)) => self.update(|s| s.user = Some(user)),
                Ok(None) => {
                    self.redirect();
                    return Submission::Redirected;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to check session before submit");
                    self.update(|s| {
                        s.phase = phase;
                        s.report(LOAD_FAILED);
                    });
                    return Submission::Failed;
                }
            }
        }

        let Some(result) = self.mount.guard(write).await else {
            return Submission::Cancelled;
        };
        match result {
            Ok(data) => {
                self.update(|s| {
                    on_success(s, data);
                    s.phase = Phase::Idle;
                });
                Submission::Accepted
            }
            Err(e) if e.is_unauthorized() => {
                self.unauthorized();
                Submission::Redirected
            }
            Err(e) => {
                tracing::warn!(error = %e, "submit failed");
                self.update(|s| {
                    on_failure(s, e);
                    s.phase = Phase::Idle;
                });
                Submission::Failed
            }
        }
    }
}
