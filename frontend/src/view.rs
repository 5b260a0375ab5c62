//! 把核心库的页面状态机接到 Leptos 信号上

use crate::auth::use_auth;
use crate::web::FetchClient;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;
use myndfull::{AuthorizedView, Phase, ViewSink, ViewState};

/// 以 `RwSignal` 存放页面状态
///
/// 信号随组件销毁后，读写都变成空操作。
pub struct SignalSink<T: 'static>(pub RwSignal<ViewState<T>>);

impl<T> Clone for SignalSink<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SignalSink<T> {}

impl<T: Send + Sync + 'static> ViewSink<T> for SignalSink<T> {
    fn update_state(&self, f: impl FnOnce(&mut ViewState<T>)) {
        self.0.try_update(f);
    }

    fn with_state<R>(&self, f: impl FnOnce(&ViewState<T>) -> R) -> Option<R> {
        self.0.try_with_untracked(f)
    }
}

pub type PageView<T> = AuthorizedView<FetchClient, SignalSink<T>, T>;

/// 创建需要登录的页面状态
///
/// 组件销毁时取消所有进行中的请求；状态进入 `Redirecting` 时跳转到登录页。
pub fn use_authorized_view<T>() -> (PageView<T>, RwSignal<ViewState<T>>)
where
    T: Default + Send + Sync + 'static,
{
    let auth = use_auth();
    let router = use_router();
    let state = RwSignal::new(ViewState::<T>::default());
    let view = AuthorizedView::new(auth.api.clone(), auth.session.clone(), SignalSink(state));

    let mount = view.mount().clone();
    on_cleanup(move || mount.unmount());

    Effect::new(move |_| {
        if state.with(|s| s.phase == Phase::Redirecting) {
            router.redirect(AppRoute::auth_failure_redirect());
        }
    });

    (view, state)
}

/// 可关闭的错误提示
#[component]
pub fn ErrorBanner<T>(state: RwSignal<ViewState<T>>) -> impl IntoView
where
    T: Send + Sync + 'static,
{
    view! {
        <Show when=move || state.with(|s| s.error.is_some())>
            <div role="alert" class="alert alert-error text-sm py-2">
                <span>{move || state.with(|s| s.error.clone().unwrap_or_default())}</span>
                <button
                    class="btn btn-ghost btn-xs"
                    on:click=move |_| state.update(|s| s.dismiss_error())
                >
                    "✕"
                </button>
            </div>
        </Show>
    }
}

/// 加载中占位
#[component]
pub fn Spinner(#[prop(into)] label: String) -> impl IntoView {
    view! {
        <div class="min-h-[50vh] flex items-center justify-center">
            <div class="flex flex-col items-center gap-4">
                <span class="loading loading-spinner loading-lg text-primary"></span>
                <div class="text-lg text-base-content/70">{label}</div>
            </div>
        </div>
    }
}
