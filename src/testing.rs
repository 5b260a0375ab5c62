//! 页面测试共用的装置

use std::cell::RefCell;
use std::rc::Rc;

use crate::api::MyndfullApi;
use crate::config::ClientConfig;
use crate::request::{HttpMethod, MOCK_BASE, MockHttpClient};
use crate::session::SessionStore;
use crate::view::{AuthorizedView, ViewState};
use serde_json::json;

pub const PROBE: &str = "/api/v1/users/current-user";

pub type TestSink<T> = Rc<RefCell<ViewState<T>>>;
pub type TestView<T> = AuthorizedView<MockHttpClient, TestSink<T>, T>;

pub struct Harness<T> {
    pub mock: MockHttpClient,
    pub session: SessionStore,
    pub sink: TestSink<T>,
    pub view: TestView<T>,
}

impl<T: Default + Clone> Harness<T> {
    pub fn new() -> Self {
        let mock = MockHttpClient::new();
        let session = SessionStore::new();
        let sink: TestSink<T> = Rc::new(RefCell::new(ViewState::default()));
        let view = AuthorizedView::new(api(&mock), session.clone(), sink.clone());
        Self {
            mock,
            session,
            sink,
            view,
        }
    }

    pub fn state(&self) -> ViewState<T> {
        self.sink.borrow().clone()
    }
}

pub fn api(mock: &MockHttpClient) -> MyndfullApi<MockHttpClient> {
    MyndfullApi::new(mock.clone(), &ClientConfig::new(MOCK_BASE))
}

/// 让会话探测返回用户 `u1`
pub fn sign_in(mock: &MockHttpClient) {
    mock.mock_data(
        HttpMethod::Get,
        PROBE,
        json!({ "_id": "u1", "username": "ana", "fullName": "Ana K", "email": "ana@example.com" }),
    );
}
