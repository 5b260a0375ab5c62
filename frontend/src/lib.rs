//! MyndFull 前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 会话状态与账户操作
//! - `view`: 需要登录的页面状态
//! - `components`: UI 组件层

mod auth;
mod view;
mod web;
mod components {
    pub mod about;
    pub mod community;
    pub mod home;
    pub mod layout;
    pub mod login;
    pub mod meditation;
    pub mod mood;
    pub mod profile;
    pub mod signup;
    pub mod sos;
    pub mod therapy;
}

use crate::auth::AuthContext;
use crate::components::about::AboutPage;
use crate::components::community::CommunityPage;
use crate::components::home::HomePage;
use crate::components::layout::Layout;
use crate::components::login::LoginPage;
use crate::components::meditation::MeditationPage;
use crate::components::mood::MoodPage;
use crate::components::profile::ProfilePage;
use crate::components::signup::SignupPage;
use crate::components::sos::SosPage;
use crate::components::therapy::TherapyPage;

use leptos::prelude::*;
use myndfull::ClientConfig;
use web::route::AppRoute;
use web::router::{Link, Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::About => view! { <AboutPage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Signup => view! { <SignupPage /> }.into_any(),
        AppRoute::MoodMeter => view! { <MoodPage /> }.into_any(),
        AppRoute::Meditation => view! { <MeditationPage /> }.into_any(),
        AppRoute::AiTherapy => view! { <TherapyPage /> }.into_any(),
        AppRoute::Sos => view! { <SosPage /> }.into_any(),
        AppRoute::Community => view! { <CommunityPage /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-[60vh]">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                    <Link to=AppRoute::Home class="btn btn-primary mt-6">"Back home"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文（后端地址在构建时确定）
    let auth_ctx = AuthContext::new(&ClientConfig::from_build_env());
    provide_context(auth_ctx.clone());

    // 2. 探测当前会话
    auth_ctx.probe();

    // 3. 认证状态信号注入路由服务
    let is_anonymous = auth_ctx.is_anonymous_signal();
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_anonymous=is_anonymous is_authenticated=is_authenticated>
            <Layout>
                <RouterOutlet matcher=route_matcher />
            </Layout>
        </Router>
    }
}
