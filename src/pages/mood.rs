use crate::request::HttpClient;
use crate::view::{AuthorizedView, Phase, Submission, ViewSink};
use myndfull_shared::protocol::{DeleteMoodRequest, MoodHistoryRequest};
use myndfull_shared::{
    GOALS_LIMIT, GRATITUDE_LIMIT, JOURNAL_LIMIT, Mood, MoodEntry, NewMoodEntry, truncate_chars,
};

pub const SAVE_FAILED: &str = "Failed to save mood entry";
pub const DELETE_FAILED: &str = "Failed to delete mood entry";
pub const MOOD_REQUIRED: &str = "Please select a mood";

/// 尚未提交的表单
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoodDraft {
    pub mood: Option<Mood>,
    pub journal: String,
    pub gratitude: String,
    pub goals: String,
}

impl MoodDraft {
    pub fn to_entry(&self) -> Option<NewMoodEntry> {
        Some(NewMoodEntry {
            mood: self.mood?,
            journal: self.journal.clone(),
            gratitude: self.gratitude.clone(),
            goals: self.goals.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoodPage {
    pub entries: Vec<MoodEntry>,
    pub draft: MoodDraft,
}

/// Mood journal: pick a mood, write a few lines, browse history.
pub struct MoodJournal<C, S> {
    view: AuthorizedView<C, S, MoodPage>,
}

impl<C: Clone, S: Clone> Clone for MoodJournal<C, S> {
    fn clone(&self) -> Self {
        Self {
            view: self.view.clone(),
        }
    }
}

impl<C, S> MoodJournal<C, S>
where
    C: HttpClient,
    S: ViewSink<MoodPage>,
{
    pub fn new(view: AuthorizedView<C, S, MoodPage>) -> Self {
        Self { view }
    }

    pub fn view(&self) -> &AuthorizedView<C, S, MoodPage> {
        &self.view
    }

    pub async fn load(&self) -> Option<Phase> {
        self.view
            .open(self.view.api().send(MoodHistoryRequest), |page, entries| {
                page.entries = entries;
            })
            .await
    }

    async fn reload(&self) -> Submission {
        self.view
            .refresh(self.view.api().send(MoodHistoryRequest), |page, entries| {
                page.entries = entries;
            })
            .await
    }

    pub fn select_mood(&self, mood: Mood) {
        self.view.update(|s| s.page.draft.mood = Some(mood));
    }

    pub fn edit_journal(&self, value: &str) {
        self.view
            .update(|s| s.page.draft.journal = truncate_chars(value, JOURNAL_LIMIT));
    }

    pub fn edit_gratitude(&self, value: &str) {
        self.view
            .update(|s| s.page.draft.gratitude = truncate_chars(value, GRATITUDE_LIMIT));
    }

    pub fn edit_goals(&self, value: &str) {
        self.view
            .update(|s| s.page.draft.goals = truncate_chars(value, GOALS_LIMIT));
    }

    /// 保存成功后清空表单并重新拉取历史
    pub async fn save(&self) -> Submission {
        let Some(entry) = self.view.read(|s| s.page.draft.to_entry()).flatten() else {
            return self.view.reject(MOOD_REQUIRED);
        };

        let outcome = self
            .view
            .submit(
                self.view.api().send(entry),
                |s, _| s.page.draft = MoodDraft::default(),
                |s, e| s.report(e.user_message(SAVE_FAILED)),
            )
            .await;

        if outcome == Submission::Accepted {
            self.reload().await;
        }
        outcome
    }

    pub async fn delete(&self, id: &str) -> Submission {
        let outcome = self
            .view
            .submit(
                self.view.api().send(DeleteMoodRequest { id: id.to_string() }),
                |_, _| {},
                |s, e| s.report(e.user_message(DELETE_FAILED)),
            )
            .await;

        if outcome == Submission::Accepted {
            self.reload().await;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{HttpMethod, MockHttpClient, RequestBody};
    use crate::testing::{Harness, PROBE, TestSink, sign_in};
    use serde_json::json;
    use std::time::Duration;

    const HISTORY: &str = "/api/v1/mood/history";

    async fn loaded() -> (Harness<MoodPage>, MoodJournal<MockHttpClient, TestSink<MoodPage>>) {
        let h = Harness::<MoodPage>::new();
        sign_in(&h.mock);
        h.mock.mock_data(
            HttpMethod::Get,
            HISTORY,
            json!([{ "_id": "m1", "mood": "Sad", "journal": "long week" }]),
        );
        let journal = MoodJournal::new(h.view.clone());
        assert_eq!(journal.load().await, Some(Phase::Idle));
        (h, journal)
    }

    #[tokio::test]
    async fn edits_are_truncated_while_typing() {
        let (h, journal) = loaded().await;

        journal.edit_journal(&"a".repeat(650));
        journal.edit_gratitude(&"é".repeat(250));
        journal.edit_goals(&"g".repeat(201));

        let draft = h.state().page.draft;
        assert_eq!(draft.journal.chars().count(), JOURNAL_LIMIT);
        assert_eq!(draft.gratitude.chars().count(), GRATITUDE_LIMIT);
        assert_eq!(draft.goals.chars().count(), GOALS_LIMIT);
    }

    #[tokio::test]
    async fn missing_mood_is_rejected_locally() {
        let (h, journal) = loaded().await;
        journal.edit_journal("no mood picked");
        let before = h.mock.requests().len();

        assert_eq!(journal.save().await, Submission::Rejected);
        assert_eq!(h.mock.requests().len(), before);
        let state = h.state();
        assert_eq!(state.error.as_deref(), Some(MOOD_REQUIRED));
        assert_eq!(state.page.draft.journal, "no mood picked");
    }

    #[tokio::test]
    async fn save_clears_draft_and_refetches_once() {
        let (h, journal) = loaded().await;
        h.mock.mock_data(
            HttpMethod::Post,
            "/api/v1/mood",
            json!({ "_id": "m2", "mood": "Happy", "journal": "better" }),
        );
        h.mock.mock_data(
            HttpMethod::Get,
            HISTORY,
            json!([
                { "_id": "m2", "mood": "Happy", "journal": "better" },
                { "_id": "m1", "mood": "Sad", "journal": "long week" }
            ]),
        );

        journal.select_mood(Mood::Happy);
        journal.edit_journal("better");
        assert_eq!(journal.save().await, Submission::Accepted);

        let state = h.state();
        assert_eq!(state.page.draft, MoodDraft::default());
        assert_eq!(state.page.entries.len(), 2);
        assert_eq!(state.phase, Phase::Idle);
        // 一次加载加一次重新拉取
        assert_eq!(h.mock.count(HttpMethod::Get, HISTORY), 2);

        let post = h
            .mock
            .requests()
            .into_iter()
            .find(|r| r.method == HttpMethod::Post)
            .unwrap();
        let RequestBody::Json(body) = post.body else {
            panic!("mood entry must be json");
        };
        assert!(body.contains(r#""mood":"Happy""#));
    }

    #[tokio::test]
    async fn flaky_session_check_never_loses_the_draft() {
        let h = Harness::<MoodPage>::new();
        h.mock.mock_network_error(HttpMethod::Get, PROBE);
        let journal = MoodJournal::new(h.view.clone());
        assert_eq!(journal.load().await, Some(Phase::Failed));

        journal.select_mood(Mood::Happy);
        journal.edit_journal("still here");
        assert_eq!(journal.save().await, Submission::Failed);
        let state = h.state();
        assert_eq!(state.phase, Phase::Failed);
        assert_eq!(state.page.draft.mood, Some(Mood::Happy));
        assert_eq!(state.page.draft.journal, "still here");
        assert_eq!(h.mock.count(HttpMethod::Post, "/api/v1/mood"), 0);

        sign_in(&h.mock);
        h.mock.mock_data(
            HttpMethod::Post,
            "/api/v1/mood",
            json!({ "_id": "m2", "mood": "Happy", "journal": "still here" }),
        );
        h.mock.mock_data(
            HttpMethod::Get,
            HISTORY,
            json!([{ "_id": "m2", "mood": "Happy", "journal": "still here" }]),
        );

        assert_eq!(journal.save().await, Submission::Accepted);
        let state = h.state();
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.page.entries.len(), 1);
        assert_eq!(h.mock.count(HttpMethod::Post, "/api/v1/mood"), 1);
        assert!(h.session.user().is_some());
    }

    #[tokio::test]
    async fn failed_save_keeps_draft() {
        let (h, journal) = loaded().await;
        h.mock.mock_network_error(HttpMethod::Post, "/api/v1/mood");

        journal.select_mood(Mood::Anxious);
        journal.edit_goals("breathe");
        assert_eq!(journal.save().await, Submission::Failed);

        let state = h.state();
        assert_eq!(state.error.as_deref(), Some(SAVE_FAILED));
        assert_eq!(state.page.draft.mood, Some(Mood::Anxious));
        assert_eq!(state.page.draft.goals, "breathe");
        assert_eq!(h.mock.count(HttpMethod::Get, HISTORY), 1);
    }

    #[tokio::test]
    async fn delete_sends_exactly_one_request() {
        let (h, journal) = loaded().await;
        h.mock.mock_data(HttpMethod::Delete, "/api/v1/mood/m1", json!({}));
        h.mock.mock_data(HttpMethod::Get, HISTORY, json!([]));

        assert_eq!(journal.delete("m1").await, Submission::Accepted);
        assert_eq!(h.mock.count(HttpMethod::Delete, "/api/v1/mood/m1"), 1);
        assert_eq!(
            h.mock
                .requests()
                .iter()
                .filter(|r| r.method == HttpMethod::Delete)
                .count(),
            1
        );
        assert!(h.state().page.entries.is_empty());
    }

    #[tokio::test]
    async fn unmount_during_save_leaves_state_alone() {
        let (h, journal) = loaded().await;
        h.mock.mock_hang(HttpMethod::Post, "/api/v1/mood");
        journal.select_mood(Mood::Tired);

        let local = tokio::task::LocalSet::new();
        let view = h.view.clone();
        let outcome = local
            .run_until(async move {
                let pending = tokio::task::spawn_local(async move { journal.save().await });
                tokio::time::sleep(Duration::from_millis(10)).await;
                view.unmount();
                pending.await.unwrap()
            })
            .await;

        assert_eq!(outcome, Submission::Cancelled);
        let state = h.state();
        // 卸载前已进入 Submitting，之后不再有任何写入
        assert_eq!(state.phase, Phase::Submitting);
        assert_eq!(state.page.draft.mood, Some(Mood::Tired));
        assert_eq!(state.page.entries.len(), 1);
    }
}
