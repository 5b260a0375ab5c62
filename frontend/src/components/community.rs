use crate::view::{ErrorBanner, Spinner, use_authorized_view};
use leptos::prelude::*;
use leptos::task::spawn_local;
use myndfull::Phase;
use myndfull::pages::community::{CommunityFeed, CommunityPage as FeedState};
use myndfull::shared::CommunityPost;
use myndfull::shared::date::format_day_opt;

#[component]
pub fn CommunityPage() -> impl IntoView {
    let (view, state) = use_authorized_view::<FeedState>();
    let feed = StoredValue::new_local(CommunityFeed::new(view));

    let loader = feed.get_value();
    spawn_local(async move {
        loader.load().await;
    });

    let on_create = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let feed = feed.get_value();
        spawn_local(async move {
            feed.create_post().await;
        });
    };

    let busy = move || state.with(|s| s.is_busy());

    view! {
        <Show
            when=move || state.with(|s| s.phase != Phase::Loading)
            fallback=|| view! { <Spinner label="Loading community..." /> }
        >
            <div class="max-w-3xl mx-auto space-y-6">
                <h1 class="text-3xl font-bold">"Community"</h1>
                <ErrorBanner state=state />

                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body gap-3" on:submit=on_create>
                        <textarea
                            class="textarea textarea-bordered"
                            rows="3"
                            placeholder="Share something with the community..."
                            prop:value=move || state.with(|s| s.page.composer.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                feed.with_value(|f| f.edit_post(&value));
                            }
                        ></textarea>
                        <div class="flex items-center justify-between">
                            <label class="label cursor-pointer gap-2">
                                <input
                                    type="checkbox"
                                    class="checkbox checkbox-sm"
                                    prop:checked=move || state.with(|s| s.page.anonymous)
                                    on:change=move |ev| {
                                        let checked = event_target_checked(&ev);
                                        feed.with_value(|f| f.set_anonymous(checked));
                                    }
                                />
                                <span class="label-text">"Post anonymously"</span>
                            </label>
                            <button class="btn btn-primary btn-sm" disabled=busy>"Share"</button>
                        </div>
                    </form>
                </div>

                <Show when=move || state.with(|s| s.page.posts.is_empty())>
                    <p class="text-center py-8 text-base-content/50">
                        "No posts yet. Be the first to share."
                    </p>
                </Show>

                <For
                    each=move || state.with(|s| s.page.posts.clone())
                    key=|post| (post.id.clone(), post.like_count(), post.comments.len())
                    let:post
                >
                    <PostCard post=post feed=feed state=state />
                </For>
            </div>
        </Show>
    }
}

type Feed = CommunityFeed<crate::web::FetchClient, crate::view::SignalSink<FeedState>>;

#[component]
fn PostCard(
    post: CommunityPost,
    feed: StoredValue<Feed, LocalStorage>,
    state: RwSignal<myndfull::ViewState<FeedState>>,
) -> impl IntoView {
    let post_id = StoredValue::new(post.id.clone());
    let (liked, owned) = state.with_untracked(|s| match &s.user {
        Some(user) => (post.is_liked_by(&user.id), post.is_authored_by(&user.id)),
        None => (false, false),
    });
    let author = post.author_label();
    let posted_on = format_day_opt(post.created_at.as_ref());
    let like_count = post.like_count();
    let comment_count = post.comments.len();
    let comments = post.comments;

    let on_like = move |_: leptos::ev::MouseEvent| {
        let feed = feed.get_value();
        let id = post_id.get_value();
        spawn_local(async move {
            feed.toggle_like(&id).await;
        });
    };
    let on_delete = move |_: leptos::ev::MouseEvent| {
        let feed = feed.get_value();
        let id = post_id.get_value();
        spawn_local(async move {
            feed.delete_post(&id).await;
        });
    };
    let on_comment = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let feed = feed.get_value();
        let id = post_id.get_value();
        spawn_local(async move {
            feed.add_comment(&id).await;
        });
    };

    let commenting = move || {
        post_id.with_value(|id| state.with(|s| s.page.commenting_on.as_ref() == Some(id)))
    };
    let busy = move || state.with(|s| s.is_busy());

    view! {
        <div class="card bg-base-100 shadow-md">
            <div class="card-body gap-3">
                <div class="flex items-center justify-between">
                    <span class="font-semibold">{author}</span>
                    <span class="text-xs text-base-content/60">{posted_on}</span>
                </div>
                <p class="whitespace-pre-wrap">{post.content}</p>

                <div class="flex items-center gap-2">
                    <button
                        class=if liked { "btn btn-sm btn-primary" } else { "btn btn-sm btn-ghost" }
                        disabled=busy
                        on:click=on_like
                    >
                        {if liked { "♥" } else { "♡" }}
                        " "
                        {like_count}
                    </button>
                    <button
                        class="btn btn-sm btn-ghost"
                        on:click=move |_| feed.with_value(|f| f.toggle_comments(&post_id.get_value()))
                    >
                        "💬 "
                        {comment_count}
                    </button>
                    {owned
                        .then(|| {
                            view! {
                                <button
                                    class="btn btn-sm btn-ghost text-error ml-auto"
                                    disabled=busy
                                    on:click=on_delete
                                >
                                    "Delete"
                                </button>
                            }
                        })}
                </div>

                <Show when=commenting>
                    <div class="space-y-2 border-t border-base-200 pt-3">
                        {comments
                            .iter()
                            .map(|c| {
                                let author = c
                                    .author
                                    .as_ref()
                                    .and_then(|a| a.user())
                                    .map(|u| u.display_name().to_string())
                                    .unwrap_or_else(|| "Member".to_string());
                                view! {
                                    <div class="text-sm">
                                        <span class="font-semibold">{author}": "</span>
                                        {c.content.clone()}
                                    </div>
                                }
                            })
                            .collect_view()}
                        <form class="join w-full" on:submit=on_comment>
                            <input
                                type="text"
                                class="input input-bordered input-sm join-item flex-1"
                                placeholder="Write a kind comment..."
                                prop:value=move || state.with(|s| s.page.comment.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    feed.with_value(|f| f.edit_comment(&value));
                                }
                            />
                            <button class="btn btn-primary btn-sm join-item" disabled=busy>"Reply"</button>
                        </form>
                    </div>
                </Show>
            </div>
        </div>
    }
}
