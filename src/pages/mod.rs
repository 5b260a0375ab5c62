//! 各页面的控制器
//!
//! 控制器只描述页面自己的请求和状态变化，登录检查、忙碌判断与取消都交给
//! [`AuthorizedView`](crate::view::AuthorizedView)。

pub mod account;
pub mod community;
pub mod mood;
pub mod profile;
pub mod sos;
pub mod therapy;

pub use account::AccountFlow;
pub use community::{CommunityFeed, CommunityPage};
pub use mood::{MoodDraft, MoodJournal, MoodPage};
pub use profile::{ProfileEditor, ProfilePage};
pub use sos::{SosAlert, SosPage, SosStage};
pub use therapy::{ChatEntry, TherapyChat, TherapyPage};
