use crate::web::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;
use myndfull::breathing::{MAX_MINUTES, MIN_MINUTES, STEP_SECONDS, STEPS};
use myndfull::BreathingSession;

/// 倒计时和呼吸步骤各用一个定时器，互不同步
struct Timers {
    _countdown: Interval,
    _steps: Interval,
}

#[component]
pub fn MeditationPage() -> impl IntoView {
    let session = RwSignal::new(BreathingSession::new());
    let timers = StoredValue::new_local(Option::<Timers>::None);

    // 定时器在 drop 时清除
    let stop_timers = move || {
        timers.try_update_value(|t| *t = None);
    };

    let start = move |_: leptos::ev::MouseEvent| {
        session.update(|s| s.start());
        let countdown = Interval::new(1_000, move || {
            let mut finished = false;
            session.try_update(|s| finished = s.tick_second());
            if finished {
                tracing::debug!("breathing session complete");
                // 不能在定时器自己的回调里 drop 它
                spawn_local(async move { stop_timers() });
            }
        });
        let steps = Interval::new(STEP_SECONDS * 1_000, move || {
            session.try_update(|s| s.tick_step());
        });
        timers.set_value(Some(Timers {
            _countdown: countdown,
            _steps: steps,
        }));
    };

    let stop = move |_: leptos::ev::MouseEvent| {
        stop_timers();
        session.update(|s| s.stop());
    };

    on_cleanup(stop_timers);

    let running = move || session.with(|s| s.is_running());
    let step_index = move || session.with(|s| s.step_index());

    view! {
        <div class="max-w-2xl mx-auto space-y-8">
            <div class="text-center">
                <h1 class="text-3xl font-bold">"Box Breathing"</h1>
                <p class="text-base-content/70 mt-2">
                    "Breathe in, hold, breathe out, hold. Four seconds each."
                </p>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body items-center text-center gap-6">
                    <div class=move || {
                        if running() {
                            "radial-progress text-primary transition-all"
                        } else {
                            "radial-progress text-base-content/30"
                        }
                    }
                    style="--value:100; --size:12rem;"
                    >
                        <div class="flex flex-col">
                            <span class="text-2xl font-bold">
                                {move || session.with(|s| s.step().label())}
                            </span>
                            <span class="font-mono text-lg">{move || session.with(|s| s.clock())}</span>
                        </div>
                    </div>

                    <p class="text-lg min-h-[1.75rem]">
                        {move || if running() {
                            session.with(|s| s.step().instruction())
                        } else {
                            "Press start when you're ready."
                        }}
                    </p>

                    <ul class="steps">
                        {STEPS
                            .iter()
                            .enumerate()
                            .map(|(i, step)| {
                                view! {
                                    <li class=move || {
                                        if running() && step_index() == i { "step step-primary" } else { "step" }
                                    }>{step.label()}</li>
                                }
                            })
                            .collect_view()}
                    </ul>

                    <div class="form-control w-full max-w-xs">
                        <label class="label" for="minutes">
                            <span class="label-text">"Duration"</span>
                            <span class="label-text-alt">
                                {move || format!("{} min", session.with(|s| s.minutes()))}
                            </span>
                        </label>
                        <input
                            id="minutes"
                            type="range"
                            min=MIN_MINUTES.to_string()
                            max=MAX_MINUTES.to_string()
                            class="range range-primary"
                            prop:value=move || session.with(|s| s.minutes().to_string())
                            disabled=running
                            on:input=move |ev| {
                                if let Ok(minutes) = event_target_value(&ev).parse::<u32>() {
                                    session.update(|s| s.set_minutes(minutes));
                                }
                            }
                        />
                    </div>

                    <Show
                        when=running
                        fallback=move || view! { <button class="btn btn-primary btn-wide" on:click=start>"Start"</button> }
                    >
                        <button class="btn btn-outline btn-wide" on:click=stop>"Stop"</button>
                    </Show>
                </div>
            </div>
        </div>
    }
}
