use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod date;
pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const API_PREFIX: &str = "/api/v1";

/// 日记正文的字符上限
pub const JOURNAL_LIMIT: usize = 500;
/// 感恩记录的字符上限
pub const GRATITUDE_LIMIT: usize = 200;
/// 目标记录的字符上限
pub const GOALS_LIMIT: usize = 200;

/// 按字符（而非字节）截断字符串
///
/// 输入过程中调用，保证粘贴超长文本后仍不超过上限。
pub fn truncate_chars(value: &str, limit: usize) -> String {
    match value.char_indices().nth(limit) {
        Some((byte_idx, _)) => value[..byte_idx].to_string(),
        None => value.to_string(),
    }
}

// =========================================================
// 用户 (Users)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl UserRef {
    /// 优先显示全名，没有则回退到用户名
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.username,
        }
    }
}

/// 对用户的引用
///
/// 后端有时返回展开后的用户对象，有时只返回 id，两种形式都接受。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserLink {
    Id(String),
    User(UserRef),
}

impl UserLink {
    pub fn id(&self) -> &str {
        match self {
            UserLink::Id(id) => id,
            UserLink::User(user) => &user.id,
        }
    }

    pub fn user(&self) -> Option<&UserRef> {
        match self {
            UserLink::Id(_) => None,
            UserLink::User(user) => Some(user),
        }
    }
}

// =========================================================
// 心情日记 (Mood Journal)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Peaceful,
    Neutral,
    Sad,
    Angry,
    Anxious,
    Tired,
    Confused,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Happy,
        Mood::Peaceful,
        Mood::Neutral,
        Mood::Sad,
        Mood::Angry,
        Mood::Anxious,
        Mood::Tired,
        Mood::Confused,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Peaceful => "Peaceful",
            Mood::Neutral => "Neutral",
            Mood::Sad => "Sad",
            Mood::Angry => "Angry",
            Mood::Anxious => "Anxious",
            Mood::Tired => "Tired",
            Mood::Confused => "Confused",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Peaceful => "😌",
            Mood::Neutral => "😐",
            Mood::Sad => "😢",
            Mood::Angry => "😠",
            Mood::Anxious => "😰",
            Mood::Tired => "😴",
            Mood::Confused => "😕",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub mood: Mood,
    #[serde(default)]
    pub journal: Option<String>,
    #[serde(default)]
    pub gratitude: Option<String>,
    #[serde(default)]
    pub goals: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// 新建心情记录的请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMoodEntry {
    pub mood: Mood,
    pub journal: String,
    pub gratitude: String,
    pub goals: String,
}

// =========================================================
// 社区 (Community)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub author: Option<UserLink>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityPost {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub author: Option<UserLink>,
    pub content: String,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default)]
    pub likes: Vec<UserLink>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl CommunityPost {
    /// 点赞数完全来自服务端返回的列表
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|l| l.id() == user_id)
    }

    pub fn is_authored_by(&self, user_id: &str) -> bool {
        self.author.as_ref().is_some_and(|a| a.id() == user_id)
    }

    /// 匿名帖子不暴露作者
    pub fn author_label(&self) -> String {
        if self.is_anonymous {
            return "Anonymous".to_string();
        }
        self.author
            .as_ref()
            .and_then(UserLink::user)
            .map(|u| u.display_name().to_string())
            .unwrap_or_else(|| "Community member".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub content: String,
    pub is_anonymous: bool,
}

// =========================================================
// AI 对话 (Chat)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

// =========================================================
// 账户 (Account)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub user: Option<UserRef>,
}

/// 通过 multipart 上传的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub avatar: Option<Upload>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub avatar: Option<Upload>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truncate_counts_chars_not_bytes() {
        let s = "😊".repeat(10);
        assert_eq!(truncate_chars(&s, 4).chars().count(), 4);
        assert_eq!(truncate_chars("short", 200), "short");
        assert_eq!(truncate_chars(&"a".repeat(600), JOURNAL_LIMIT).len(), 500);
    }

    #[test]
    fn post_accepts_populated_and_bare_user_links() {
        let post: CommunityPost = serde_json::from_value(json!({
            "_id": "p1",
            "author": { "_id": "u1", "username": "ana", "fullName": "Ana K" },
            "content": "hello",
            "isAnonymous": false,
            "likes": ["u2", { "_id": "u3", "username": "bo" }],
            "comments": [{ "_id": "c1", "content": "hi", "author": "u2" }]
        }))
        .unwrap();

        assert_eq!(post.like_count(), 2);
        assert!(post.is_liked_by("u3"));
        assert!(post.is_authored_by("u1"));
        assert_eq!(post.author_label(), "Ana K");
        assert_eq!(post.comments[0].author.as_ref().unwrap().id(), "u2");
    }

    #[test]
    fn anonymous_post_hides_author() {
        let post: CommunityPost = serde_json::from_value(json!({
            "_id": "p1",
            "author": { "_id": "u1", "username": "ana" },
            "content": "quiet thoughts",
            "isAnonymous": true
        }))
        .unwrap();

        assert_eq!(post.author_label(), "Anonymous");
        assert!(post.likes.is_empty());
    }

    #[test]
    fn mood_entry_parses_backend_shape() {
        let entry: MoodEntry = serde_json::from_value(json!({
            "_id": "m1",
            "mood": "Peaceful",
            "journal": "calm day",
            "createdAt": "2024-03-01T10:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(entry.mood, Mood::Peaceful);
        assert_eq!(entry.gratitude, None);
        assert!(entry.created_at.is_some());
    }

    #[test]
    fn chat_role_is_lowercase_on_the_wire() {
        let value = serde_json::to_value(ChatMessage::assistant("hi")).unwrap();
        assert_eq!(value, json!({ "role": "assistant", "content": "hi" }));
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let user = UserRef {
            id: "u1".into(),
            username: "ana".into(),
            full_name: Some("  ".into()),
            email: None,
            avatar: None,
        };
        assert_eq!(user.display_name(), "ana");
    }
}
