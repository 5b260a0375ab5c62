//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其属性。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页 (`/` 与 `/home`)
    #[default]
    Home,
    About,
    Login,
    Signup,
    /// 心情日记 (需要认证)
    MoodMeter,
    Meditation,
    /// AI 对话 (需要认证)
    AiTherapy,
    /// 紧急求助 (需要认证)
    Sos,
    /// 社区 (需要认证)
    Community,
    /// 个人资料 (需要认证)
    Profile,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        match path {
            "/" | "/home" => Self::Home,
            "/aboutus" => Self::About,
            "/login" => Self::Login,
            "/signup" => Self::Signup,
            "/moodmeter" => Self::MoodMeter,
            "/meditation" => Self::Meditation,
            "/aitherapy" => Self::AiTherapy,
            "/sos" => Self::Sos,
            "/community" => Self::Community,
            "/profile" => Self::Profile,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::About => "/aboutus",
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::MoodMeter => "/moodmeter",
            Self::Meditation => "/meditation",
            Self::AiTherapy => "/aitherapy",
            Self::Sos => "/sos",
            Self::Community => "/community",
            Self::Profile => "/profile",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::MoodMeter | Self::AiTherapy | Self::Sos | Self::Community | Self::Profile
        )
    }

    /// 已登录用户访问登录/注册页时离开
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Signup)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标
    pub fn auth_success_redirect() -> Self {
        Self::Home
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_has_two_paths() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/home"), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/community/"), AppRoute::Community);
    }

    #[test]
    fn paths_round_trip() {
        for route in [
            AppRoute::About,
            AppRoute::Login,
            AppRoute::Signup,
            AppRoute::MoodMeter,
            AppRoute::Meditation,
            AppRoute::AiTherapy,
            AppRoute::Sos,
            AppRoute::Community,
            AppRoute::Profile,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn unknown_path_is_not_found() {
        assert_eq!(AppRoute::from_path("/dashboard"), AppRoute::NotFound);
    }

    #[test]
    fn only_member_pages_need_auth() {
        assert!(AppRoute::Sos.requires_auth());
        assert!(AppRoute::Profile.requires_auth());
        assert!(!AppRoute::Meditation.requires_auth());
        assert!(!AppRoute::Home.requires_auth());
    }
}
