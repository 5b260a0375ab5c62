use crate::auth::use_auth;
use crate::web::file::{read_upload, selected_file};
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use myndfull::pages::account::REGISTER_FAILED;
use myndfull::shared::{Registration, Upload};

#[component]
pub fn SignupPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let (full_name, set_full_name) = signal(String::new());
    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (avatar, set_avatar) = signal(Option::<Upload>::None);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_avatar = move |ev: leptos::ev::Event| {
        let Some(file) = selected_file(&ev) else {
            set_avatar.set(None);
            return;
        };
        spawn_local(async move {
            set_avatar.set(read_upload(&file).await);
        });
    };

    let account = auth.account();
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let registration = Registration {
            full_name: full_name.get_untracked().trim().to_string(),
            username: username.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            avatar: avatar.get_untracked(),
        };
        let account = account.clone();
        spawn_local(async move {
            match account.register(registration).await {
                Ok(()) => router.navigate(AppRoute::Login.to_path()),
                Err(e) => set_error_msg.set(Some(e.user_message(REGISTER_FAILED))),
            }
            set_is_submitting.set(false);
        });
    };

    let text_field = move |id: &'static str,
                           label: &'static str,
                           kind: &'static str,
                           value: ReadSignal<String>,
                           set: WriteSignal<String>| {
        view! {
            <div class="form-control">
                <label class="label" for=id>
                    <span class="label-text">{label}</span>
                </label>
                <input
                    id=id
                    type=kind
                    on:input=move |ev| set.set(event_target_value(&ev))
                    prop:value=value
                    class="input input-bordered"
                    required
                />
            </div>
        }
    };

    view! {
        <div class="hero min-h-[70vh]">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Create your account"</h1>
                    <p class="text-base-content/70">"Start taking care of your mind"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        {text_field("fullName", "Full name", "text", full_name, set_full_name)}
                        {text_field("username", "Username", "text", username, set_username)}
                        {text_field("email", "Email", "email", email, set_email)}
                        {text_field("password", "Password", "password", password, set_password)}

                        <div class="form-control">
                            <label class="label" for="avatar">
                                <span class="label-text">"Avatar (optional)"</span>
                            </label>
                            <input
                                id="avatar"
                                type="file"
                                accept="image/*"
                                on:change=on_avatar
                                class="file-input file-input-bordered w-full"
                            />
                        </div>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating..." }.into_any()
                                } else {
                                    "Sign up".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            "Already have an account? "
                            <Link to=AppRoute::Login class="link link-primary">"Login"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
