use std::future::ready;

use crate::error::ClientError;
use crate::request::HttpClient;
use crate::view::{AuthorizedView, Phase, Submission, ViewSink};
use myndfull_shared::protocol::TriggerSosRequest;

pub const SOS_FAILED: &str = "Failed to send SOS alert";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SosStage {
    #[default]
    Ready,
    /// 确认对话框已打开
    Confirming,
    Activated,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SosPage {
    pub stage: SosStage,
}

pub struct SosAlert<C, S> {
    view: AuthorizedView<C, S, SosPage>,
}

impl<C: Clone, S: Clone> Clone for SosAlert<C, S> {
    fn clone(&self) -> Self {
        Self {
            view: self.view.clone(),
        }
    }
}

impl<C, S> SosAlert<C, S>
where
    C: HttpClient,
    S: ViewSink<SosPage>,
{
    pub fn new(view: AuthorizedView<C, S, SosPage>) -> Self {
        Self { view }
    }

    pub fn view(&self) -> &AuthorizedView<C, S, SosPage> {
        &self.view
    }

    /// 只检查登录状态，没有列表要拉取
    pub async fn load(&self) -> Option<Phase> {
        self.view
            .open(ready(Ok::<(), ClientError>(())), |_, _| {})
            .await
    }

    pub fn request(&self) {
        self.view.update(|s| {
            if s.page.stage == SosStage::Ready {
                s.page.stage = SosStage::Confirming;
            }
        });
    }

    pub fn cancel(&self) {
        self.view.update(|s| {
            if s.page.stage == SosStage::Confirming {
                s.page.stage = SosStage::Ready;
            }
        });
    }

    pub async fn confirm(&self) -> Submission {
        let stage = self.view.read(|s| s.page.stage);
        if stage != Some(SosStage::Confirming) {
            return Submission::Rejected;
        }

        self.view
            .submit(
                self.view.api().send(TriggerSosRequest),
                |s, _| s.page.stage = SosStage::Activated,
                |s, e| {
                    s.report(e.user_message(SOS_FAILED));
                    s.page.stage = SosStage::Ready;
                },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HttpMethod;
    use crate::testing::{Harness, PROBE, sign_in};
    use serde_json::json;

    const TRIGGER: &str = "/api/v1/sos/trigger";

    #[tokio::test]
    async fn anonymous_visitor_is_redirected() {
        let h = Harness::<SosPage>::new();
        h.mock.mock_data(HttpMethod::Get, PROBE, json!(null));
        let sos = SosAlert::new(h.view.clone());

        assert_eq!(sos.load().await, Some(Phase::Redirecting));
        sos.request();
        assert_eq!(sos.confirm().await, Submission::Redirected);
        assert_eq!(h.mock.count(HttpMethod::Post, TRIGGER), 0);
    }

    #[tokio::test]
    async fn confirm_activates_after_server_ack() {
        let h = Harness::<SosPage>::new();
        sign_in(&h.mock);
        h.mock.mock_data(HttpMethod::Post, TRIGGER, json!({}));
        let sos = SosAlert::new(h.view.clone());
        sos.load().await;

        assert_eq!(sos.confirm().await, Submission::Rejected);
        sos.request();
        assert_eq!(h.state().page.stage, SosStage::Confirming);
        assert_eq!(sos.confirm().await, Submission::Accepted);
        assert_eq!(h.state().page.stage, SosStage::Activated);
        assert_eq!(h.mock.count(HttpMethod::Post, TRIGGER), 1);
    }

    #[tokio::test]
    async fn cancel_and_failure_return_to_ready() {
        let h = Harness::<SosPage>::new();
        sign_in(&h.mock);
        h.mock.mock_network_error(HttpMethod::Post, TRIGGER);
        let sos = SosAlert::new(h.view.clone());
        sos.load().await;

        sos.request();
        sos.cancel();
        assert_eq!(h.state().page.stage, SosStage::Ready);

        sos.request();
        assert_eq!(sos.confirm().await, Submission::Failed);
        let state = h.state();
        assert_eq!(state.page.stage, SosStage::Ready);
        assert_eq!(state.error.as_deref(), Some(SOS_FAILED));
    }
}
