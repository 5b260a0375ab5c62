use crate::view::{ErrorBanner, Spinner, use_authorized_view};
use leptos::prelude::*;
use leptos::task::spawn_local;
use myndfull::Phase;
use myndfull::pages::sos::{SosAlert, SosPage as SosState, SosStage};

#[component]
pub fn SosPage() -> impl IntoView {
    let (view, state) = use_authorized_view::<SosState>();
    let alert = StoredValue::new_local(SosAlert::new(view));

    let loader = alert.get_value();
    spawn_local(async move {
        loader.load().await;
    });

    let on_confirm = move |_: leptos::ev::MouseEvent| {
        let alert = alert.get_value();
        spawn_local(async move {
            alert.confirm().await;
        });
    };

    let stage = move || state.with(|s| s.page.stage);
    let sending = move || state.with(|s| s.phase == Phase::Submitting);

    view! {
        <Show
            when=move || state.with(|s| s.phase != Phase::Loading)
            fallback=|| view! { <Spinner label="Loading..." /> }
        >
            <div class="max-w-xl mx-auto card bg-base-100 shadow-xl">
                <div class="card-body items-center text-center gap-6">
                    <h2 class="card-title text-2xl">"Emergency SOS"</h2>
                    <p class="text-base-content/70">
                        "Sends an alert to your trusted contacts so they know you need help."
                    </p>
                    <ErrorBanner state=state />

                    {move || match stage() {
                        SosStage::Ready => view! {
                            <button
                                class="btn btn-error btn-circle w-40 h-40 text-3xl shadow-lg"
                                on:click=move |_| alert.with_value(|a| a.request())
                            >
                                "SOS"
                            </button>
                        }
                        .into_any(),
                        SosStage::Confirming => view! {
                            <div role="alert" class="alert alert-warning flex-col">
                                <span class="font-semibold">"Send an SOS alert now?"</span>
                                <div class="flex gap-2">
                                    <button
                                        class="btn btn-ghost"
                                        disabled=sending
                                        on:click=move |_| alert.with_value(|a| a.cancel())
                                    >
                                        "Cancel"
                                    </button>
                                    <button class="btn btn-error" disabled=sending on:click=on_confirm>
                                        {move || if sending() {
                                            view! { <span class="loading loading-spinner"></span> "Sending..." }.into_any()
                                        } else {
                                            "Yes, send alert".into_any()
                                        }}
                                    </button>
                                </div>
                            </div>
                        }
                        .into_any(),
                        SosStage::Activated => view! {
                            <div role="alert" class="alert alert-success">
                                <span>"SOS alert sent. Help is on the way. Stay where you are if it is safe."</span>
                            </div>
                        }
                        .into_any(),
                    }}

                    <p class="text-sm text-base-content/60">
                        "If you are in immediate danger, call your local emergency number."
                    </p>
                </div>
            </div>
        </Show>
    }
}
