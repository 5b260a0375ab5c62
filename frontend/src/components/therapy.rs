use crate::view::{ErrorBanner, Spinner, use_authorized_view};
use leptos::prelude::*;
use leptos::task::spawn_local;
use myndfull::Phase;
use myndfull::pages::therapy::{TherapyChat, TherapyPage as ChatState};
use myndfull::shared::ChatRole;

#[component]
pub fn TherapyPage() -> impl IntoView {
    let (view, state) = use_authorized_view::<ChatState>();
    let chat = StoredValue::new_local(TherapyChat::new(view));

    let loader = chat.get_value();
    spawn_local(async move {
        loader.load().await;
    });

    let on_send = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let chat = chat.get_value();
        spawn_local(async move {
            chat.send().await;
        });
    };

    let thinking = move || state.with(|s| s.phase == Phase::Submitting);

    view! {
        <Show
            when=move || state.with(|s| s.phase != Phase::Loading)
            fallback=|| view! { <Spinner label="Connecting to Hermione..." /> }
        >
            <div class="max-w-3xl mx-auto card bg-base-100 shadow-xl">
                <div class="card-body gap-4">
                    <div>
                        <h2 class="card-title">"AI Therapy"</h2>
                        <p class="text-xs text-base-content/60">
                            "Hermione is an AI companion, not a licensed therapist."
                        </p>
                    </div>
                    <ErrorBanner state=state />

                    <div class="h-[55vh] overflow-y-auto space-y-2 p-2 bg-base-200 rounded-box">
                        <For
                            each=move || state.with(|s| s.page.entries.clone())
                            key=|entry| entry.key
                            let:entry
                        >
                            {
                                let (side, bubble) = match entry.message.role {
                                    ChatRole::User => ("chat chat-end", "chat-bubble chat-bubble-primary whitespace-pre-wrap"),
                                    ChatRole::Assistant => ("chat chat-start", "chat-bubble whitespace-pre-wrap"),
                                };
                                view! {
                                    <div class=side>
                                        <div class=bubble>{entry.message.content}</div>
                                    </div>
                                }
                            }
                        </For>
                        <Show when=thinking>
                            <div class="chat chat-start">
                                <div class="chat-bubble">
                                    <span class="loading loading-dots loading-sm"></span>
                                </div>
                            </div>
                        </Show>
                    </div>

                    <form class="join w-full" on:submit=on_send>
                        <input
                            type="text"
                            class="input input-bordered join-item flex-1"
                            placeholder="Share what's on your mind..."
                            prop:value=move || state.with(|s| s.page.input.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                chat.with_value(|c| c.edit_input(&value));
                            }
                        />
                        <button
                            class="btn btn-primary join-item"
                            disabled=move || state.with(|s| !s.is_ready() || s.page.input.trim().is_empty())
                        >
                            "Send"
                        </button>
                    </form>
                </div>
            </div>
        </Show>
    }
}
