use crate::view::{ErrorBanner, Spinner, use_authorized_view};
use leptos::prelude::*;
use leptos::task::spawn_local;
use myndfull::Phase;
use myndfull::pages::mood::{MoodJournal, MoodPage as MoodState};
use myndfull::shared::date::format_day_opt;
use myndfull::shared::{GOALS_LIMIT, GRATITUDE_LIMIT, JOURNAL_LIMIT, Mood};

#[component]
pub fn MoodPage() -> impl IntoView {
    let (view, state) = use_authorized_view::<MoodState>();
    let journal = StoredValue::new_local(MoodJournal::new(view));

    // 初始加载
    let loader = journal.get_value();
    spawn_local(async move {
        loader.load().await;
    });

    let on_save = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let journal = journal.get_value();
        spawn_local(async move {
            journal.save().await;
        });
    };

    let on_delete = move |id: String| {
        let journal = journal.get_value();
        spawn_local(async move {
            journal.delete(&id).await;
        });
    };

    let busy = move || state.with(|s| s.is_busy());
    let selected = move || state.with(|s| s.page.draft.mood);

    view! {
        <Show
            when=move || state.with(|s| s.phase != Phase::Loading)
            fallback=|| view! { <Spinner label="Loading your journal..." /> }
        >
            <div class="grid gap-8 lg:grid-cols-2">
                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body gap-4" on:submit=on_save>
                        <h2 class="card-title">"How are you feeling today?"</h2>
                        <ErrorBanner state=state />

                        <div class="grid grid-cols-4 gap-2">
                            {Mood::ALL
                                .into_iter()
                                .map(|mood| {
                                    view! {
                                        <button
                                            type="button"
                                            class=move || {
                                                if selected() == Some(mood) {
                                                    "btn btn-primary flex-col h-auto py-2"
                                                } else {
                                                    "btn btn-ghost flex-col h-auto py-2"
                                                }
                                            }
                                            on:click=move |_| journal.with_value(|j| j.select_mood(mood))
                                        >
                                            <span class="text-2xl">{mood.emoji()}</span>
                                            <span class="text-xs">{mood.label()}</span>
                                        </button>
                                    }
                                })
                                .collect_view()}
                        </div>

                        <LimitedTextarea
                            label="Journal"
                            placeholder="What's on your mind?"
                            limit=JOURNAL_LIMIT
                            rows=5
                            value=Signal::derive(move || state.with(|s| s.page.draft.journal.clone()))
                            on_input=Callback::new(move |v: String| journal.with_value(|j| j.edit_journal(&v)))
                        />
                        <LimitedTextarea
                            label="Gratitude"
                            placeholder="Something you're grateful for"
                            limit=GRATITUDE_LIMIT
                            rows=2
                            value=Signal::derive(move || state.with(|s| s.page.draft.gratitude.clone()))
                            on_input=Callback::new(move |v: String| journal.with_value(|j| j.edit_gratitude(&v)))
                        />
                        <LimitedTextarea
                            label="Goals"
                            placeholder="A small goal for today"
                            limit=GOALS_LIMIT
                            rows=2
                            value=Signal::derive(move || state.with(|s| s.page.draft.goals.clone()))
                            on_input=Callback::new(move |v: String| journal.with_value(|j| j.edit_goals(&v)))
                        />

                        <div class="card-actions justify-end">
                            <button class="btn btn-primary" disabled=busy>
                                {move || if state.with(|s| s.phase == Phase::Submitting) {
                                    view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                                } else {
                                    "Save entry".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h2 class="card-title">"Mood history"</h2>
                        <Show when=move || state.with(|s| s.page.entries.is_empty())>
                            <p class="text-center py-8 text-base-content/50">"No entries yet."</p>
                        </Show>
                        <ul class="space-y-3">
                            <For
                                each=move || state.with(|s| s.page.entries.clone())
                                key=|entry| entry.id.clone()
                                let:entry
                            >
                                {
                                    let id = entry.id.clone();
                                    view! {
                                        <li class="p-4 rounded-box bg-base-200">
                                            <div class="flex items-center justify-between">
                                                <div class="flex items-center gap-2">
                                                    <span class="text-2xl">{entry.mood.emoji()}</span>
                                                    <span class="font-semibold">{entry.mood.label()}</span>
                                                </div>
                                                <div class="flex items-center gap-2">
                                                    <span class="text-xs text-base-content/60">
                                                        {format_day_opt(entry.created_at.as_ref())}
                                                    </span>
                                                    <button
                                                        class="btn btn-ghost btn-xs text-error"
                                                        disabled=busy
                                                        on:click=move |_| on_delete(id.clone())
                                                    >
                                                        "Delete"
                                                    </button>
                                                </div>
                                            </div>
                                            {entry.journal.filter(|t| !t.is_empty()).map(|t| view! { <p class="mt-2">{t}</p> })}
                                            {entry.gratitude.filter(|t| !t.is_empty()).map(|t| view! {
                                                <p class="mt-1 text-sm"><span class="font-semibold">"Grateful for: "</span>{t}</p>
                                            })}
                                            {entry.goals.filter(|t| !t.is_empty()).map(|t| view! {
                                                <p class="mt-1 text-sm"><span class="font-semibold">"Goal: "</span>{t}</p>
                                            })}
                                        </li>
                                    }
                                }
                            </For>
                        </ul>
                    </div>
                </div>
            </div>
        </Show>
    }
}

/// 带字数统计的文本框
#[component]
fn LimitedTextarea(
    label: &'static str,
    placeholder: &'static str,
    limit: usize,
    rows: u32,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
) -> impl IntoView {
    let count = move || value.with(|v| v.chars().count());

    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text">{label}</span>
                <span class="label-text-alt">{move || format!("{}/{}", count(), limit)}</span>
            </label>
            <textarea
                class="textarea textarea-bordered"
                placeholder=placeholder
                rows=rows.to_string()
                prop:value=value
                on:input=move |ev| on_input.run(event_target_value(&ev))
            ></textarea>
        </div>
    }
}
