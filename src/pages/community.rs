use crate::request::HttpClient;
use crate::view::{AuthorizedView, Phase, Submission, ViewSink};
use myndfull_shared::protocol::{
    DeletePostRequest, LikePostRequest, ListPostsRequest, NewComment,
};
use myndfull_shared::{CommunityPost, NewPost};

pub const CREATE_FAILED: &str = "Failed to create post";
pub const LIKE_FAILED: &str = "Failed to like post";
pub const COMMENT_FAILED: &str = "Failed to add comment";
pub const DELETE_FAILED: &str = "Failed to delete post";
pub const EMPTY_POST: &str = "Write something before sharing";
pub const NOT_AUTHOR: &str = "You can only delete your own posts";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommunityPage {
    pub posts: Vec<CommunityPost>,
    /// 发帖框
    pub composer: String,
    pub anonymous: bool,
    /// 展开评论框的帖子
    pub commenting_on: Option<String>,
    pub comment: String,
}

impl CommunityPage {
    fn post_mut(&mut self, id: &str) -> Option<&mut CommunityPost> {
        self.posts.iter_mut().find(|p| p.id == id)
    }

    /// 用服务端返回的帖子替换本地副本
    fn replace_post(&mut self, post: CommunityPost) {
        if let Some(slot) = self.post_mut(&post.id) {
            *slot = post;
        }
    }
}

pub struct CommunityFeed<C, S> {
    view: AuthorizedView<C, S, CommunityPage>,
}

impl<C: Clone, S: Clone> Clone for CommunityFeed<C, S> {
    fn clone(&self) -> Self {
        Self {
            view: self.view.clone(),
        }
    }
}

impl<C, S> CommunityFeed<C, S>
where
    C: HttpClient,
    S: ViewSink<CommunityPage>,
{
    pub fn new(view: AuthorizedView<C, S, CommunityPage>) -> Self {
        Self { view }
    }

    pub fn view(&self) -> &AuthorizedView<C, S, CommunityPage> {
        &self.view
    }

    pub async fn load(&self) -> Option<Phase> {
        self.view
            .open(self.view.api().send(ListPostsRequest), |page, posts| {
                page.posts = posts;
            })
            .await
    }

    pub fn edit_post(&self, value: &str) {
        self.view.update(|s| s.page.composer = value.to_string());
    }

    pub fn set_anonymous(&self, anonymous: bool) {
        self.view.update(|s| s.page.anonymous = anonymous);
    }

    /// 打开（或在再次点击时收起）某条帖子的评论框
    pub fn toggle_comments(&self, post_id: &str) {
        self.view.update(|s| {
            if s.page.commenting_on.as_deref() == Some(post_id) {
                s.page.commenting_on = None;
            } else {
                s.page.commenting_on = Some(post_id.to_string());
                s.page.comment.clear();
            }
        });
    }

    pub fn edit_comment(&self, value: &str) {
        self.view.update(|s| s.page.comment = value.to_string());
    }

    /// 新帖子插到列表最前面，并重置发帖框
    pub async fn create_post(&self) -> Submission {
        let Some(post) = self.view.read(|s| NewPost {
            content: s.page.composer.clone(),
            is_anonymous: s.page.anonymous,
        }) else {
            return Submission::Cancelled;
        };
        if post.content.trim().is_empty() {
            return self.view.reject(EMPTY_POST);
        }

        self.view
            .submit(
                self.view.api().send(post),
                |s, created| {
                    s.page.posts.insert(0, created);
                    s.page.composer.clear();
                    s.page.anonymous = false;
                },
                |s, _| s.report(CREATE_FAILED),
            )
            .await
    }

    /// 点赞开关，点赞数完全以服务端返回为准
    pub async fn toggle_like(&self, post_id: &str) -> Submission {
        self.view
            .submit(
                self.view.api().send(LikePostRequest {
                    post_id: post_id.to_string(),
                }),
                |s, post| s.page.replace_post(post),
                |s, _| s.report(LIKE_FAILED),
            )
            .await
    }

    /// 空白评论直接忽略
    pub async fn add_comment(&self, post_id: &str) -> Submission {
        let Some(content) = self.view.read(|s| s.page.comment.clone()) else {
            return Submission::Cancelled;
        };
        if content.trim().is_empty() {
            return Submission::Rejected;
        }

        let target = post_id.to_string();
        self.view
            .submit(
                self.view.api().send(NewComment {
                    post_id: post_id.to_string(),
                    content,
                }),
                move |s, comment| {
                    if let Some(post) = s.page.post_mut(&target) {
                        post.comments.push(comment);
                    }
                    s.page.comment.clear();
                    s.page.commenting_on = None;
                },
                |s, _| s.report(COMMENT_FAILED),
            )
            .await
    }

    /// 只有作者本人可以删除
    pub async fn delete_post(&self, post_id: &str) -> Submission {
        let Some(owned) = self.view.read(|s| {
            let user = s.user.as_ref()?;
            let post = s.page.posts.iter().find(|p| p.id == post_id)?;
            Some(post.is_authored_by(&user.id))
        }) else {
            return Submission::Cancelled;
        };
        if owned != Some(true) {
            return self.view.reject(NOT_AUTHOR);
        }

        let target = post_id.to_string();
        self.view
            .submit(
                self.view.api().send(DeletePostRequest {
                    post_id: post_id.to_string(),
                }),
                move |s, _| s.page.posts.retain(|p| p.id != target),
                |s, _| s.report(DELETE_FAILED),
            )
            .await
    }
}
