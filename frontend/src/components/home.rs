use crate::auth::use_auth;
use crate::web::route::AppRoute;
use crate::web::router::Link;
use leptos::prelude::*;

/// 首页功能入口
const FEATURES: [(AppRoute, &str, &str); 5] = [
    (
        AppRoute::MoodMeter,
        "Mood Meter",
        "Track how you feel each day and look back on your journal.",
    ),
    (
        AppRoute::Meditation,
        "Meditation",
        "Follow a guided box-breathing session from one to fifteen minutes.",
    ),
    (
        AppRoute::AiTherapy,
        "AI Therapy",
        "Talk things through with Hermione, a supportive AI companion.",
    ),
    (
        AppRoute::Community,
        "Community",
        "Share your journey and encourage others, anonymously if you like.",
    ),
    (
        AppRoute::Sos,
        "SOS",
        "Alert your trusted contacts when you need help right away.",
    ),
];

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let user = auth.user_signal();

    let greeting = move || {
        user.with(|u| match u {
            Some(u) => format!("Welcome back, {}", u.display_name()),
            None => "Welcome to MyndFull".to_string(),
        })
    };

    view! {
        <div class="space-y-10">
            <div class="hero bg-base-100 rounded-box shadow-xl py-12">
                <div class="hero-content text-center">
                    <div class="max-w-xl">
                        <h1 class="text-4xl font-bold">{greeting}</h1>
                        <p class="py-6 text-base-content/70">
                            "A calm place to check in with yourself, breathe, and reach out."
                        </p>
                        <Show when=move || user.with(|u| u.is_none())>
                            <Link to=AppRoute::Signup class="btn btn-primary">"Get started"</Link>
                        </Show>
                    </div>
                </div>
            </div>

            <div class="grid gap-6 md:grid-cols-2 lg:grid-cols-3">
                {FEATURES
                    .into_iter()
                    .map(|(route, title, blurb)| {
                        view! {
                            <div class="card bg-base-100 shadow-md">
                                <div class="card-body">
                                    <h3 class="card-title">{title}</h3>
                                    <p class="text-base-content/70">{blurb}</p>
                                    <div class="card-actions justify-end">
                                        <Link to=route class="btn btn-ghost btn-sm">"Open"</Link>
                                    </div>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
