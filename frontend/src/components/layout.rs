use crate::auth::use_auth;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 导航栏中的页面
const NAV_ITEMS: [(AppRoute, &str); 7] = [
    (AppRoute::MoodMeter, "Mood Meter"),
    (AppRoute::Meditation, "Meditation"),
    (AppRoute::AiTherapy, "AI Therapy"),
    (AppRoute::Community, "Community"),
    (AppRoute::Sos, "SOS"),
    (AppRoute::About, "About"),
    (AppRoute::Profile, "Profile"),
];

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen flex flex-col bg-base-200 font-sans">
            <Header />
            <main class="flex-1 w-full max-w-6xl mx-auto p-4 md:p-8">{children()}</main>
            <Footer />
        </div>
    }
}

#[component]
fn Header() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let user = auth.user_signal();
    let signed_in = auth.is_authenticated_signal();

    // 每次切换页面都确认一次会话（已有缓存时不发请求）
    Effect::new({
        let auth = auth.clone();
        move |_| {
            router.current_route().track();
            auth.probe();
        }
    });

    let (logging_out, set_logging_out) = signal(false);
    let account = auth.account();
    let on_logout = move |_: leptos::ev::MouseEvent| {
        set_logging_out.set(true);
        let account = account.clone();
        spawn_local(async move {
            // 失败时本地会话同样已清空
            if let Err(e) = account.logout().await {
                tracing::debug!(error = %e, "logout request failed, local session cleared");
            }
            set_logging_out.set(false);
            router.redirect(AppRoute::Login);
        });
    };

    let is_active = move |route: AppRoute| router.current_route().get() == route;

    view! {
        <div class="navbar bg-base-100 shadow-md sticky top-0 z-40">
            <div class="flex-1">
                <Link to=AppRoute::Home class="btn btn-ghost text-xl text-primary">
                    "MyndFull"
                </Link>
            </div>
            <div class="flex-none gap-2">
                <ul class="menu menu-horizontal px-1 hidden lg:flex">
                    {NAV_ITEMS
                        .into_iter()
                        .map(|(route, label)| {
                            view! {
                                <li>
                                    <a
                                        href=route.to_path()
                                        class=move || if is_active(route) { "active" } else { "" }
                                        on:click=move |ev| {
                                            ev.prevent_default();
                                            router.navigate(route.to_path());
                                        }
                                    >
                                        {label}
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
                <Show
                    when=move || signed_in.get()
                    fallback=|| {
                        view! {
                            <Link to=AppRoute::Login class="btn btn-ghost btn-sm">"Login"</Link>
                            <Link to=AppRoute::Signup class="btn btn-primary btn-sm">"Sign up"</Link>
                        }
                    }
                >
                    <span class="hidden md:inline text-sm text-base-content/70">
                        {move || user.with(|u| u.as_ref().map(|u| u.display_name().to_string()))}
                    </span>
                    <button
                        class="btn btn-outline btn-error btn-sm"
                        disabled=move || logging_out.get()
                        on:click=on_logout.clone()
                    >
                        "Logout"
                    </button>
                </Show>
            </div>
        </div>
    }
}

#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer class="footer footer-center p-6 bg-base-100 text-base-content/60 text-sm">
            <p>"MyndFull: take care of your mind, one day at a time."</p>
            <p>"If you are in danger, contact your local emergency services."</p>
        </footer>
    }
}

/// 页面通用卡片
#[component]
pub fn Card(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title">{title}</h2>
                {subtitle.map(|s| view! { <p class="text-base-content/70 text-sm">{s}</p> })}
                {children()}
            </div>
        </div>
    }
}
