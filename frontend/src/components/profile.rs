use crate::view::{ErrorBanner, Spinner, use_authorized_view};
use crate::web::file::{preview_url, read_upload, revoke_preview, selected_file};
use leptos::prelude::*;
use leptos::task::spawn_local;
use myndfull::Phase;
use myndfull::pages::profile::{ProfileEditor, ProfilePage as ProfileState};

#[component]
pub fn ProfilePage() -> impl IntoView {
    let (view, state) = use_authorized_view::<ProfileState>();
    let editor = StoredValue::new_local(ProfileEditor::new(view));

    // 本地选择的头像预览地址
    let (preview, set_preview) = signal(Option::<String>::None);
    let replace_preview = move |next: Option<String>| {
        if let Some(old) = preview.try_get_untracked().flatten() {
            revoke_preview(&old);
        }
        let _ = set_preview.try_set(next);
    };
    on_cleanup(move || {
        if let Some(old) = preview.try_get_untracked().flatten() {
            revoke_preview(&old);
        }
    });

    let loader = editor.get_value();
    spawn_local(async move {
        loader.load().await;
    });

    let on_avatar = move |ev: leptos::ev::Event| {
        let Some(file) = selected_file(&ev) else {
            return;
        };
        replace_preview(preview_url(&file));
        let editor = editor.get_value();
        spawn_local(async move {
            if let Some(upload) = read_upload(&file).await {
                editor.choose_avatar(upload);
            }
        });
    };

    let on_save = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let editor = editor.get_value();
        spawn_local(async move {
            editor.save().await;
            // 上传成功后改用服务端返回的头像
            let uploaded = state.try_with_untracked(|s| s.page.pending_avatar.is_none());
            if uploaded == Some(true) {
                replace_preview(None);
            }
        });
    };

    let avatar_src = move || {
        preview
            .get()
            .or_else(|| state.with(|s| s.page.avatar_url.clone()))
    };
    let saving = move || state.with(|s| s.phase == Phase::Submitting);

    view! {
        <Show
            when=move || state.with(|s| s.phase != Phase::Loading)
            fallback=|| view! { <Spinner label="Loading profile..." /> }
        >
            <div class="max-w-xl mx-auto card bg-base-100 shadow-xl">
                <form class="card-body gap-4" on:submit=on_save>
                    <h2 class="card-title">"Your profile"</h2>
                    <ErrorBanner state=state />
                    <Show when=move || state.with(|s| s.page.notice.is_some())>
                        <div role="status" class="alert alert-success text-sm py-2">
                            <span>{move || state.with(|s| s.page.notice.clone().unwrap_or_default())}</span>
                        </div>
                    </Show>

                    <div class="flex items-center gap-4">
                        <div class="avatar placeholder">
                            <div class="w-20 rounded-full bg-neutral text-neutral-content">
                                {move || match avatar_src() {
                                    Some(src) => view! { <img src=src alt="avatar" /> }.into_any(),
                                    None => view! {
                                        <span class="text-2xl">
                                            {state.with(|s| s.page.full_name.chars().next().unwrap_or('?').to_string())}
                                        </span>
                                    }
                                    .into_any(),
                                }}
                            </div>
                        </div>
                        <input
                            type="file"
                            accept="image/*"
                            class="file-input file-input-bordered file-input-sm w-full max-w-xs"
                            on:change=on_avatar
                        />
                    </div>

                    <div class="form-control">
                        <label class="label" for="fullName">
                            <span class="label-text">"Full name"</span>
                        </label>
                        <input
                            id="fullName"
                            type="text"
                            class="input input-bordered"
                            prop:value=move || state.with(|s| s.page.full_name.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                editor.with_value(|e| e.edit_full_name(&value));
                            }
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="email">
                            <span class="label-text">"Email"</span>
                        </label>
                        <input
                            id="email"
                            type="email"
                            class="input input-bordered"
                            prop:value=move || state.with(|s| s.page.email.clone())
                            readonly
                            disabled
                        />
                    </div>

                    <div class="card-actions justify-end">
                        <button class="btn btn-primary" disabled=move || state.with(|s| s.is_busy())>
                            {move || if saving() {
                                view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                            } else {
                                "Save changes".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
