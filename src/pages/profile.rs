use std::future::ready;

use crate::error::ClientError;
use crate::request::HttpClient;
use crate::view::{AuthorizedView, Phase, Submission, ViewSink};
use myndfull_shared::{ProfileUpdate, Upload, UserRef};

pub const UPDATE_FAILED: &str = "Error updating profile";
pub const UPDATED: &str = "Profile updated successfully!";
pub const NAME_REQUIRED: &str = "Full name is required";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePage {
    pub full_name: String,
    /// 只读
    pub email: String,
    pub avatar_url: Option<String>,
    /// 新选择、尚未上传的头像
    pub pending_avatar: Option<Upload>,
    pub notice: Option<String>,
}

impl ProfilePage {
    fn fill_from(&mut self, user: &UserRef) {
        self.full_name = user.full_name.clone().unwrap_or_default();
        self.email = user.email.clone().unwrap_or_default();
        self.avatar_url = user.avatar.clone();
    }
}

pub struct ProfileEditor<C, S> {
    view: AuthorizedView<C, S, ProfilePage>,
}

impl<C: Clone, S: Clone> Clone for ProfileEditor<C, S> {
    fn clone(&self) -> Self {
        Self {
            view: self.view.clone(),
        }
    }
}

impl<C, S> ProfileEditor<C, S>
where
    C: HttpClient,
    S: ViewSink<ProfilePage>,
{
    pub fn new(view: AuthorizedView<C, S, ProfilePage>) -> Self {
        Self { view }
    }

    pub fn view(&self) -> &AuthorizedView<C, S, ProfilePage> {
        &self.view
    }

    /// 表单内容来自会话中的用户
    pub async fn load(&self) -> Option<Phase> {
        let phase = self
            .view
            .open(ready(Ok::<(), ClientError>(())), |_, _| {})
            .await?;
        self.view.update(|s| {
            if let Some(user) = &s.user {
                s.page.fill_from(user);
            }
        });
        Some(phase)
    }

    pub fn edit_full_name(&self, value: &str) {
        self.view.update(|s| {
            s.page.full_name = value.to_string();
            s.page.notice = None;
        });
    }

    pub fn choose_avatar(&self, upload: Upload) {
        self.view.update(|s| {
            s.page.pending_avatar = Some(upload);
            s.page.notice = None;
        });
    }

    /// 成功后用返回的用户替换会话中的用户
    pub async fn save(&self) -> Submission {
        let Some(update) = self.view.read(|s| ProfileUpdate {
            full_name: s.page.full_name.trim().to_string(),
            avatar: s.page.pending_avatar.clone(),
        }) else {
            return Submission::Cancelled;
        };
        if update.full_name.is_empty() {
            return self.view.reject(NAME_REQUIRED);
        }

        self.view.update(|s| s.page.notice = None);
        let outcome = self
            .view
            .submit(
                self.view.api().send(update),
                |s, user| {
                    s.page.fill_from(&user);
                    s.page.pending_avatar = None;
                    s.page.notice = Some(UPDATED.to_string());
                    s.user = Some(user);
                },
                |s, e| s.report(e.user_message(UPDATE_FAILED)),
            )
            .await;

        if outcome == Submission::Accepted {
            if let Some(user) = self.view.user() {
                self.view.session().set_user(user);
            }
        }
        outcome
    }
}
