use crate::components::layout::Card;
use leptos::prelude::*;

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <div class="max-w-3xl mx-auto space-y-6">
            <h1 class="text-3xl font-bold">"About MyndFull"</h1>
            <Card title="Our mission">
                <p>
                    "MyndFull brings everyday mental-wellness tools together: a mood journal, "
                    "guided breathing, an AI companion to talk to and a community that listens."
                </p>
            </Card>
            <Card title="Not a replacement for care" subtitle="Please read">
                <p>
                    "MyndFull does not provide medical advice. If you are in crisis, use the SOS "
                    "page or contact your local emergency services."
                </p>
            </Card>
        </div>
    }
}
