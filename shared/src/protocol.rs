use crate::{
    API_PREFIX, ChatMessage, Comment, CommunityPost, Credentials, LoginResponse, MoodEntry,
    NewMoodEntry, NewPost, ProfileUpdate, Registration, Upload, UserRef,
};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

// =========================================================
// 请求体 (Request Bodies)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    Text(String),
    File(Upload),
}

/// multipart 表单中的一个字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub value: PartValue,
}

impl FormPart {
    pub fn text(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: PartValue::Text(value.into()),
        }
    }

    pub fn file(name: &str, upload: Upload) -> Self {
        Self {
            name: name.to_string(),
            value: PartValue::File(upload),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    Json(String),
    Multipart(Vec<FormPart>),
}

impl RequestBody {
    pub fn json<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_string(value).map(RequestBody::Json)
    }
}

/// 后端统一的响应外壳：`{ statusCode, data, message, success }`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "default_success")]
    pub success: bool,
}

fn default_success() -> bool {
    true
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The type carried in the envelope's `data` field.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path, including the API prefix.
    fn path(&self) -> String;
    /// The encoded body. Defaults to no body.
    fn body(&self) -> Result<RequestBody, serde_json::Error> {
        Ok(RequestBody::Empty)
    }
}

// =========================================================
// Users
// =========================================================

/// Session probe. `data` is null when nobody is logged in.
#[derive(Debug)]
pub struct CurrentUserRequest;

impl ApiRequest for CurrentUserRequest {
    type Response = Option<UserRef>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("{API_PREFIX}/users/current-user")
    }
}

impl ApiRequest for Credentials {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("{API_PREFIX}/users/login")
    }
    fn body(&self) -> Result<RequestBody, serde_json::Error> {
        RequestBody::json(self)
    }
}

#[derive(Debug)]
pub struct LogoutRequest;

impl ApiRequest for LogoutRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("{API_PREFIX}/users/logout")
    }
}

impl ApiRequest for Registration {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("{API_PREFIX}/users/register")
    }
    fn body(&self) -> Result<RequestBody, serde_json::Error> {
        let mut parts = vec![
            FormPart::text("fullName", &self.full_name),
            FormPart::text("username", &self.username),
            FormPart::text("email", &self.email),
            FormPart::text("password", &self.password),
        ];
        if let Some(avatar) = &self.avatar {
            parts.push(FormPart::file("avatar", avatar.clone()));
        }
        Ok(RequestBody::Multipart(parts))
    }
}

impl ApiRequest for ProfileUpdate {
    type Response = UserRef;
    const METHOD: HttpMethod = HttpMethod::Patch;
    fn path(&self) -> String {
        format!("{API_PREFIX}/users/profile")
    }
    fn body(&self) -> Result<RequestBody, serde_json::Error> {
        // 只有选择了新文件时才附带 avatar
        let mut parts = Vec::with_capacity(2);
        if let Some(avatar) = &self.avatar {
            parts.push(FormPart::file("avatar", avatar.clone()));
        }
        parts.push(FormPart::text("fullName", &self.full_name));
        Ok(RequestBody::Multipart(parts))
    }
}

// =========================================================
// Mood
// =========================================================

#[derive(Debug)]
pub struct MoodHistoryRequest;

impl ApiRequest for MoodHistoryRequest {
    type Response = Vec<MoodEntry>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("{API_PREFIX}/mood/history")
    }
}

impl ApiRequest for NewMoodEntry {
    type Response = MoodEntry;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("{API_PREFIX}/mood")
    }
    fn body(&self) -> Result<RequestBody, serde_json::Error> {
        RequestBody::json(self)
    }
}

#[derive(Debug)]
pub struct DeleteMoodRequest {
    pub id: String,
}

impl ApiRequest for DeleteMoodRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> String {
        format!("{API_PREFIX}/mood/{}", self.id)
    }
}

// =========================================================
// Community
// =========================================================

#[derive(Debug)]
pub struct ListPostsRequest;

impl ApiRequest for ListPostsRequest {
    type Response = Vec<CommunityPost>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("{API_PREFIX}/community")
    }
}

impl ApiRequest for NewPost {
    type Response = CommunityPost;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("{API_PREFIX}/community")
    }
    fn body(&self) -> Result<RequestBody, serde_json::Error> {
        RequestBody::json(self)
    }
}

/// Toggle like. Returns the whole updated post.
#[derive(Debug)]
pub struct LikePostRequest {
    pub post_id: String,
}

impl ApiRequest for LikePostRequest {
    type Response = CommunityPost;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("{API_PREFIX}/community/{}/like", self.post_id)
    }
}

#[derive(Debug, Serialize)]
pub struct NewComment {
    #[serde(skip)]
    pub post_id: String,
    pub content: String,
}

impl ApiRequest for NewComment {
    type Response = Comment;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("{API_PREFIX}/community/{}/comments", self.post_id)
    }
    fn body(&self) -> Result<RequestBody, serde_json::Error> {
        RequestBody::json(self)
    }
}

#[derive(Debug)]
pub struct DeletePostRequest {
    pub post_id: String,
}

impl ApiRequest for DeletePostRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> String {
        format!("{API_PREFIX}/community/{}", self.post_id)
    }
}

// =========================================================
// AI therapy
// =========================================================

#[derive(Debug)]
pub struct ChatHistoryRequest;

impl ApiRequest for ChatHistoryRequest {
    type Response = Vec<ChatMessage>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("{API_PREFIX}/aitherapy/history")
    }
}

/// Appends a user message; the backend stores it, runs the completion and
/// answers with the persisted assistant reply.
impl ApiRequest for ChatMessage {
    type Response = ChatMessage;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("{API_PREFIX}/aitherapy/message")
    }
    fn body(&self) -> Result<RequestBody, serde_json::Error> {
        RequestBody::json(self)
    }
}

// =========================================================
// SOS
// =========================================================

#[derive(Debug)]
pub struct TriggerSosRequest;

impl ApiRequest for TriggerSosRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("{API_PREFIX}/sos/trigger")
    }
}
