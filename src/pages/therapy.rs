use uuid::Uuid;

use crate::request::HttpClient;
use crate::view::{AuthorizedView, Phase, Submission, ViewSink};
use myndfull_shared::protocol::ChatHistoryRequest;
use myndfull_shared::{ChatMessage, ChatRole};

/// 本地开场白，不保存到后端
pub const GREETING: &str = "Hello! I'm Hermione, your AI therapeutic companion. I'm here to listen and support you. How are you feeling today?";
pub const APOLOGY: &str = "I apologize, but I encountered an error. Please try again.";

/// 带本地 key 的消息，用于列表渲染
#[derive(Debug, Clone, PartialEq)]
pub struct ChatEntry {
    pub key: Uuid,
    pub message: ChatMessage,
}

impl ChatEntry {
    pub fn new(message: ChatMessage) -> Self {
        Self {
            key: Uuid::new_v4(),
            message,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TherapyPage {
    pub entries: Vec<ChatEntry>,
    pub input: String,
}

impl Default for TherapyPage {
    fn default() -> Self {
        Self {
            entries: vec![ChatEntry::new(ChatMessage::assistant(GREETING))],
            input: String::new(),
        }
    }
}

pub struct TherapyChat<C, S> {
    view: AuthorizedView<C, S, TherapyPage>,
}

impl<C: Clone, S: Clone> Clone for TherapyChat<C, S> {
    fn clone(&self) -> Self {
        Self {
            view: self.view.clone(),
        }
    }
}

impl<C, S> TherapyChat<C, S>
where
    C: HttpClient,
    S: ViewSink<TherapyPage>,
{
    pub fn new(view: AuthorizedView<C, S, TherapyPage>) -> Self {
        Self { view }
    }

    pub fn view(&self) -> &AuthorizedView<C, S, TherapyPage> {
        &self.view
    }

    /// 开场白之后回放历史记录
    pub async fn load(&self) -> Option<Phase> {
        self.view
            .open(self.view.api().send(ChatHistoryRequest), |page, history| {
                page.entries.truncate(1);
                page.entries.extend(history.into_iter().map(ChatEntry::new));
            })
            .await
    }

    pub fn edit_input(&self, value: &str) {
        self.view.update(|s| s.page.input = value.to_string());
    }

    /// 立即追加用户消息，随后追加一条回复或道歉
    pub async fn send(&self) -> Submission {
        let Some((ready, input)) = self.view.read(|s| (s.is_ready(), s.page.input.clone())) else {
            return Submission::Cancelled;
        };
        if input.trim().is_empty() {
            return Submission::Rejected;
        }
        if !ready {
            return Submission::Busy;
        }

        let message = ChatMessage::user(input);
        self.view.update(|s| {
            s.page.entries.push(ChatEntry::new(message.clone()));
            s.page.input.clear();
        });

        self.view
            .submit(
                self.view.api().send(message),
                |s, reply| {
                    if reply.role != ChatRole::Assistant {
                        tracing::warn!(role = ?reply.role, "reply without assistant role");
                    }
                    let reply = ChatMessage::assistant(reply.content);
                    s.page.entries.push(ChatEntry::new(reply));
                },
                |s, _| {
                    s.page
                        .entries
                        .push(ChatEntry::new(ChatMessage::assistant(APOLOGY)));
                },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{HttpMethod, MockHttpClient};
    use crate::testing::{Harness, TestSink, sign_in};
    use serde_json::json;

    const HISTORY: &str = "/api/v1/aitherapy/history";
    const MESSAGE: &str = "/api/v1/aitherapy/message";

    type Chat = TherapyChat<MockHttpClient, TestSink<TherapyPage>>;

    async fn loaded() -> (Harness<TherapyPage>, Chat) {
        let h = Harness::<TherapyPage>::new();
        sign_in(&h.mock);
        h.mock.mock_data(
            HttpMethod::Get,
            HISTORY,
            json!([
                { "role": "user", "content": "I can't sleep" },
                { "role": "assistant", "content": "That sounds exhausting." }
            ]),
        );
        let chat = TherapyChat::new(h.view.clone());
        assert_eq!(chat.load().await, Some(Phase::Idle));
        (h, chat)
    }

    fn contents(h: &Harness<TherapyPage>) -> Vec<String> {
        h.state()
            .page
            .entries
            .into_iter()
            .map(|e| e.message.content)
            .collect()
    }

    #[tokio::test]
    async fn history_follows_greeting() {
        let (h, _chat) = loaded().await;
        let contents = contents(&h);
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0], GREETING);
        assert_eq!(contents[1], "I can't sleep");
    }

    #[tokio::test]
    async fn reply_is_appended_once() {
        let (h, chat) = loaded().await;
        h.mock.mock_data(
            HttpMethod::Post,
            MESSAGE,
            json!({ "role": "assistant", "content": "Let's try a slow breath together." }),
        );

        chat.edit_input("still awake");
        assert_eq!(chat.send().await, Submission::Accepted);

        let entries = h.state().page.entries;
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[3].message, ChatMessage::user("still awake"));
        assert_eq!(entries[4].message.role, ChatRole::Assistant);
        assert_eq!(h.state().page.input, "");
        assert_eq!(h.mock.count(HttpMethod::Post, MESSAGE), 1);
    }

    #[tokio::test]
    async fn failure_appends_one_apology() {
        let (h, chat) = loaded().await;
        h.mock.mock_network_error(HttpMethod::Post, MESSAGE);

        chat.edit_input("hello?");
        assert_eq!(chat.send().await, Submission::Failed);

        let contents = contents(&h);
        assert_eq!(contents.len(), 5);
        assert_eq!(contents[3], "hello?");
        assert_eq!(contents[4], APOLOGY);
    }

    #[tokio::test]
    async fn blank_input_sends_nothing() {
        let (h, chat) = loaded().await;
        chat.edit_input("  \n");
        assert_eq!(chat.send().await, Submission::Rejected);
        assert_eq!(h.state().page.entries.len(), 3);
        assert_eq!(h.mock.count(HttpMethod::Post, MESSAGE), 0);
    }

    #[tokio::test]
    async fn expired_session_redirects_without_apology() {
        let (h, chat) = loaded().await;
        h.mock.mock_response(HttpMethod::Post, MESSAGE, 401, json!({}));

        chat.edit_input("are you there");
        assert_eq!(chat.send().await, Submission::Redirected);

        let state = h.state();
        assert_eq!(state.phase, Phase::Redirecting);
        // 重置后只剩开场白
        assert_eq!(state.page.entries.len(), 1);
        assert!(h.session.is_anonymous());
    }

    #[test]
    fn entries_get_distinct_keys() {
        let a = ChatEntry::new(ChatMessage::user("x"));
        let b = ChatEntry::new(ChatMessage::user("x"));
        assert_ne!(a.key, b.key);
    }
}
