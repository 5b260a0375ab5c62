//! 路由服务模块
//!
//! 基于 History API 的客户端路由。每次导航先经过守卫，再写入历史记录，
//! 最后更新当前路由信号；浏览器的前进后退走同一个守卫。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 写入 History：`push` 为 false 时替换当前记录（用于重定向）
fn write_history(path: &str, push: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let result = if push {
        history.push_state_with_url(&JsValue::NULL, "", Some(path))
    } else {
        history.replace_state_with_url(&JsValue::NULL, "", Some(path))
    };
    if let Err(e) = result {
        tracing::warn!(error = ?e, %path, "history update failed");
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 认证状态由外部注入：`is_anonymous` 表示已确认未登录，
/// `is_authenticated` 表示已确认登录；两者都为 false 时尚未探测。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_anonymous: Signal<bool>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_anonymous: Signal<bool>, is_authenticated: Signal<bool>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            is_anonymous,
            is_authenticated,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), true);
    }

    /// 替换当前历史记录，用于登出和页面内跳转登录
    pub fn redirect(&self, route: AppRoute) {
        self.navigate_to_route(route, false);
    }

    /// 守卫：返回实际要进入的路由
    fn guard(&self, target: AppRoute) -> AppRoute {
        if target.requires_auth() && self.is_anonymous.get_untracked() {
            tracing::debug!(%target, "access denied, redirecting to login");
            return AppRoute::auth_failure_redirect();
        }
        if target.should_redirect_when_authenticated() && self.is_authenticated.get_untracked() {
            tracing::debug!(%target, "already signed in");
            return AppRoute::auth_success_redirect();
        }
        target
    }

    fn navigate_to_route(&self, target_route: AppRoute, push: bool) {
        let route = self.guard(target_route);
        write_history(route.to_path(), push);
        tracing::debug!(%route, "navigate");
        self.set_route.set(route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            let route = router.guard(target_route);
            if route != target_route {
                write_history(route.to_path(), false);
            }
            router.set_route.set(route);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 会话确认为匿名时离开受保护页面
    fn setup_auth_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            let anonymous = router.is_anonymous.get();
            let route = router.current_route.get_untracked();
            if anonymous && route.requires_auth() {
                tracing::debug!("signed out, redirecting to login");
                router.redirect(AppRoute::auth_failure_redirect());
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(is_anonymous: Signal<bool>, is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_anonymous, is_authenticated);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    expect_context::<RouterService>()
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(
    is_anonymous: Signal<bool>,
    is_authenticated: Signal<bool>,
    children: Children,
) -> impl IntoView {
    provide_router(is_anonymous, is_authenticated);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接，拦截点击改用 History API
#[component]
pub fn Link(
    to: AppRoute,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(to.to_path());
    };

    view! {
        <a href=to.to_path() class=class on:click=on_click>
            {children()}
        </a>
    }
}
