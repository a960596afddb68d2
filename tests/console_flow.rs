use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tokio::time::timeout;

use spacedeck::api::{ApiError, ResourceApi, SessionFilter};
use spacedeck::app::{
    process_action, refresh_sessions, refresh_spaces, Action, AppState, ConsoleTab, InputMode,
    NoticeLevel, ScopeFilter,
};
use spacedeck::models::{Session, Space};

fn space(id: &str) -> Space {
    Space {
        id: id.to_string(),
        created_at: Utc::now(),
        configs: json!({}),
    }
}

fn session(id: &str, space_id: Option<&str>, configs: Value) -> Session {
    Session {
        id: id.to_string(),
        created_at: Utc::now(),
        configs,
        space_id: space_id.map(str::to_string),
    }
}

/// In-memory backend double. Operations named in `fail` return a backend
/// error instead of touching the data.
#[derive(Default)]
struct MockApi {
    spaces: Mutex<Vec<Space>>,
    sessions: Mutex<Vec<Session>>,
    calls: Mutex<Vec<String>>,
    session_filters: Mutex<Vec<SessionFilter>>,
    fail: Mutex<HashSet<&'static str>>,
}

impl MockApi {
    fn with_spaces(self, spaces: Vec<Space>) -> Self {
        *self.spaces.lock().unwrap() = spaces;
        self
    }

    fn with_sessions(self, sessions: Vec<Session>) -> Self {
        *self.sessions.lock().unwrap() = sessions;
        self
    }

    fn failing(self, operation: &'static str) -> Self {
        self.fail.lock().unwrap().insert(operation);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn check(&self, operation: &'static str) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(operation.to_string());
        if self.fail.lock().unwrap().contains(operation) {
            return Err(ApiError::Backend {
                code: 1,
                message: format!("{operation} forced to fail"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ResourceApi for MockApi {
    async fn list_spaces(&self) -> Result<Vec<Space>, ApiError> {
        self.check("list_spaces")?;
        Ok(self.spaces.lock().unwrap().clone())
    }

    async fn list_sessions(&self, filter: SessionFilter) -> Result<Vec<Session>, ApiError> {
        self.check("list_sessions")?;
        self.session_filters.lock().unwrap().push(filter.clone());
        let sessions = self.sessions.lock().unwrap();
        let items = sessions
            .iter()
            .filter(|s| match (&filter.space_id, filter.not_connected) {
                (Some(space_id), _) => s.space_id.as_deref() == Some(space_id.as_str()),
                (None, Some(true)) => s.space_id.is_none(),
                _ => true,
            })
            .cloned()
            .collect();
        Ok(items)
    }

    async fn create_space(&self, configs: Value) -> Result<(), ApiError> {
        self.check("create_space")?;
        let mut spaces = self.spaces.lock().unwrap();
        let id = format!("space-{}", spaces.len() + 1);
        spaces.push(Space {
            id,
            created_at: Utc::now(),
            configs,
        });
        Ok(())
    }

    async fn create_session(
        &self,
        space_id: Option<String>,
        configs: Value,
    ) -> Result<(), ApiError> {
        self.check("create_session")?;
        self.calls
            .lock()
            .unwrap()
            .push(format!("create_session space={space_id:?}"));
        let mut sessions = self.sessions.lock().unwrap();
        let id = format!("sess-{}", sessions.len() + 1);
        sessions.push(Session {
            id,
            created_at: Utc::now(),
            configs,
            space_id,
        });
        Ok(())
    }

    async fn delete_space(&self, id: &str) -> Result<(), ApiError> {
        self.check("delete_space")?;
        self.spaces.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }

    async fn delete_session(&self, id: &str) -> Result<(), ApiError> {
        self.check("delete_session")?;
        self.sessions.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }

    async fn space_configs(&self, id: &str) -> Result<Value, ApiError> {
        self.check("space_configs")?;
        let spaces = self.spaces.lock().unwrap();
        spaces
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.configs.clone())
            .ok_or(ApiError::Backend {
                code: 404,
                message: "no such space".into(),
            })
    }

    async fn session_configs(&self, id: &str) -> Result<Value, ApiError> {
        self.check("session_configs")?;
        let sessions = self.sessions.lock().unwrap();
        sessions
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.configs.clone())
            .ok_or(ApiError::Backend {
                code: 404,
                message: "no such session".into(),
            })
    }

    async fn update_space_configs(&self, id: &str, configs: Value) -> Result<(), ApiError> {
        self.check("update_space_configs")?;
        let mut spaces = self.spaces.lock().unwrap();
        if let Some(space) = spaces.iter_mut().find(|s| s.id == id) {
            space.configs = configs;
        }
        Ok(())
    }

    async fn update_session_configs(&self, id: &str, configs: Value) -> Result<(), ApiError> {
        self.check("update_session_configs")?;
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(session) = sessions.iter_mut().find(|s| s.id == id) {
            session.configs = configs;
        }
        Ok(())
    }

    async fn connect_session(&self, session_id: &str, space_id: &str) -> Result<(), ApiError> {
        self.check("connect_session")?;
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(session) = sessions.iter_mut().find(|s| s.id == session_id) {
            session.space_id = Some(space_id.to_string());
        }
        Ok(())
    }
}

struct Harness {
    state: AppState,
    api: Arc<dyn ResourceApi>,
    mock: Arc<MockApi>,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Action>,
}

impl Harness {
    fn new(mock: MockApi) -> Self {
        let mock = Arc::new(mock);
        let api: Arc<dyn ResourceApi> = mock.clone();
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(),
            api,
            mock,
            tx,
            rx,
        }
    }

    fn dispatch(&mut self, action: Action) {
        process_action(&mut self.state, action, &self.api, &self.tx).unwrap();
    }

    /// Drains completion actions posted by spawned API tasks until the
    /// channel goes quiet.
    async fn settle(&mut self) {
        while let Ok(Some(action)) = timeout(Duration::from_millis(100), self.rx.recv()).await {
            process_action(&mut self.state, action, &self.api, &self.tx).unwrap();
        }
    }

    async fn mount(&mut self) {
        refresh_spaces(&mut self.state, &self.api, &self.tx);
        refresh_sessions(&mut self.state, &self.api, &self.tx);
        self.settle().await;
    }
}

#[tokio::test]
async fn mount_loads_both_stores() {
    let mut h = Harness::new(
        MockApi::default()
            .with_spaces(vec![space("space-a")])
            .with_sessions(vec![session("sess-1", Some("space-a"), json!({}))]),
    );
    h.mount().await;
    assert_eq!(h.state.spaces.items.len(), 1);
    assert_eq!(h.state.sessions.items.len(), 1);
    assert!(!h.state.spaces.loading);
    assert!(!h.state.sessions.loading);
}

#[tokio::test]
async fn scope_cycling_maps_to_mutually_exclusive_fetch_params() {
    let mut h = Harness::new(
        MockApi::default()
            .with_spaces(vec![space("space-a")])
            .with_sessions(vec![
                session("sess-1", Some("space-a"), json!({})),
                session("sess-2", None, json!({})),
            ]),
    );
    h.mount().await;
    h.state.tab = ConsoleTab::Sessions;

    h.dispatch(Action::NextScope);
    h.settle().await;
    assert_eq!(h.state.scope_filter, ScopeFilter::NotConnected);
    assert_eq!(h.state.sessions.items.len(), 1);
    assert_eq!(h.state.sessions.items[0].id, "sess-2");

    h.dispatch(Action::NextScope);
    h.settle().await;
    assert_eq!(h.state.scope_filter, ScopeFilter::Space("space-a".into()));
    assert_eq!(h.state.sessions.items.len(), 1);
    assert_eq!(h.state.sessions.items[0].id, "sess-1");

    let filters = h.mock.session_filters.lock().unwrap().clone();
    let last = &filters[filters.len() - 1];
    assert_eq!(last.space_id.as_deref(), Some("space-a"));
    assert_eq!(last.not_connected, None);
    let second_last = &filters[filters.len() - 2];
    assert_eq!(second_last.space_id, None);
    assert_eq!(second_last.not_connected, Some(true));
}

#[tokio::test]
async fn scope_change_always_reissues_fetch() {
    let mut h = Harness::new(MockApi::default());
    h.mount().await;
    h.state.tab = ConsoleTab::Sessions;
    let fetches_before = h.mock.session_filters.lock().unwrap().len();

    // Two options loaded (all, not-connected): stepping twice lands back on
    // the same scope each full cycle, but each step is still a change here.
    h.dispatch(Action::NextScope);
    h.settle().await;
    h.dispatch(Action::NextScope);
    h.settle().await;
    assert_eq!(h.state.scope_filter, ScopeFilter::All);
    let fetches_after = h.mock.session_filters.lock().unwrap().len();
    assert_eq!(fetches_after, fetches_before + 2);
}

#[tokio::test]
async fn invalid_json_never_reaches_the_backend() {
    let mut h = Harness::new(MockApi::default());
    h.mount().await;

    h.dispatch(Action::OpenCreate);
    h.state.space_create.buffer.reset("{not json");
    let calls_before = h.mock.calls().len();
    h.dispatch(Action::SubmitDialog);
    h.settle().await;

    assert!(h.state.space_create.open);
    assert!(!h.state.space_create.busy);
    assert_eq!(h.state.input_mode, InputMode::Create);
    assert_eq!(h.mock.calls().len(), calls_before);
    let notice = h.state.events.latest().unwrap();
    assert_eq!(notice.level, NoticeLevel::Warn);
}

#[tokio::test]
async fn create_session_defaults_to_not_connected() {
    let mut h = Harness::new(MockApi::default().with_spaces(vec![space("space-a")]));
    h.mount().await;
    h.state.tab = ConsoleTab::Sessions;

    h.dispatch(Action::OpenCreate);
    assert_eq!(h.state.session_create.buffer.text, "{}");
    h.dispatch(Action::SubmitDialog);
    h.settle().await;

    assert!(h
        .mock
        .calls()
        .iter()
        .any(|c| c == "create_session space=None"));
    assert!(!h.state.session_create.open);
    assert_eq!(h.state.input_mode, InputMode::Normal);
    // Refresh-before-close repopulated the list
    assert_eq!(h.state.sessions.items.len(), 1);
}

#[tokio::test]
async fn create_session_picker_targets_a_space() {
    let mut h = Harness::new(MockApi::default().with_spaces(vec![space("space-a")]));
    h.mount().await;
    h.state.tab = ConsoleTab::Sessions;

    h.dispatch(Action::OpenCreate);
    h.dispatch(Action::NextDialogSpace);
    h.dispatch(Action::SubmitDialog);
    h.settle().await;

    assert!(h
        .mock
        .calls()
        .iter()
        .any(|c| c == "create_session space=Some(\"space-a\")"));
    assert_eq!(h.state.sessions.items[0].space_id.as_deref(), Some("space-a"));
}

#[tokio::test]
async fn create_failure_keeps_dialog_open() {
    let mut h = Harness::new(MockApi::default().failing("create_space"));
    h.mount().await;

    h.dispatch(Action::OpenCreate);
    h.dispatch(Action::SubmitDialog);
    h.settle().await;

    assert!(h.state.space_create.open);
    assert!(!h.state.space_create.busy);
    assert_eq!(h.state.input_mode, InputMode::Create);
    let notice = h.state.events.latest().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.contains("create space"));
}

#[tokio::test]
async fn delete_success_clears_selection_and_refreshes() {
    let mut h = Harness::new(MockApi::default().with_spaces(vec![space("space-a"), space("space-b")]));
    h.mount().await;
    h.state.selected_space_id = Some("space-a".into());

    h.dispatch(Action::InitiateDelete);
    assert_eq!(h.state.space_delete.target.as_deref(), Some("space-a"));
    // Staging alone must not call the backend
    assert!(!h.mock.calls().iter().any(|c| c == "delete_space"));

    h.dispatch(Action::ConfirmDelete);
    h.settle().await;

    assert!(h.mock.calls().iter().any(|c| c == "delete_space"));
    assert_eq!(h.state.selected_space_id, None);
    assert!(!h.state.space_delete.open);
    assert_eq!(h.state.input_mode, InputMode::Normal);
    assert_eq!(h.state.spaces.items.len(), 1);
    assert_eq!(h.state.spaces.items[0].id, "space-b");
}

#[tokio::test]
async fn delete_failure_keeps_dialog_open_and_selection() {
    let mut h = Harness::new(
        MockApi::default()
            .with_sessions(vec![session("sess-1", None, json!({}))])
            .failing("delete_session"),
    );
    h.mount().await;
    h.state.tab = ConsoleTab::Sessions;
    h.state.selected_session_id = Some("sess-1".into());

    h.dispatch(Action::InitiateDelete);
    h.dispatch(Action::ConfirmDelete);
    h.settle().await;

    assert!(h.state.session_delete.open);
    assert!(!h.state.session_delete.busy);
    assert_eq!(h.state.selected_session_id.as_deref(), Some("sess-1"));
    assert_eq!(h.state.input_mode, InputMode::ConfirmDelete);
    let notice = h.state.events.latest().unwrap();
    assert!(notice.message.contains("delete session"));
}

#[tokio::test]
async fn config_editor_prefers_live_fetch_over_cache() {
    let mock = MockApi::default().with_sessions(vec![session(
        "sess-1",
        None,
        json!({"model": "small"}),
    )]);
    let mut h = Harness::new(mock);
    h.mount().await;
    h.state.tab = ConsoleTab::Sessions;
    h.state.selected_session_id = Some("sess-1".into());

    // Backend has moved on since the cached list row
    h.mock
        .sessions
        .lock()
        .unwrap()
        .iter_mut()
        .for_each(|s| s.configs = json!({"model": "large"}));

    h.dispatch(Action::OpenConfig);
    assert!(h.state.session_config.buffer.text.contains("small"));
    h.settle().await;
    assert!(h.state.session_config.buffer.text.contains("large"));
}

#[tokio::test]
async fn config_fetch_failure_falls_back_to_cache() {
    let mut h = Harness::new(
        MockApi::default()
            .with_sessions(vec![session("sess-1", None, json!({"model": "small"}))])
            .failing("session_configs"),
    );
    h.mount().await;
    h.state.tab = ConsoleTab::Sessions;
    h.state.selected_session_id = Some("sess-1".into());

    h.dispatch(Action::OpenConfig);
    h.settle().await;

    assert!(h.state.session_config.open);
    assert!(h.state.session_config.buffer.text.contains("small"));
    let notice = h.state.events.latest().unwrap();
    assert!(notice.message.contains("fetch configs"));
}

#[tokio::test]
async fn config_save_refreshes_then_closes() {
    let mut h = Harness::new(MockApi::default().with_spaces(vec![space("space-a")]));
    h.mount().await;
    h.state.selected_space_id = Some("space-a".into());

    h.dispatch(Action::OpenConfig);
    h.settle().await;
    h.state.space_config.buffer.reset("{\"tier\": 2}");
    h.dispatch(Action::SubmitDialog);
    h.settle().await;

    assert!(h.mock.calls().iter().any(|c| c == "update_space_configs"));
    assert!(!h.state.space_config.open);
    assert_eq!(h.state.input_mode, InputMode::Normal);
    assert_eq!(h.state.spaces.items[0].configs, json!({"tier": 2}));
}

#[tokio::test]
async fn config_save_failure_keeps_dialog_open() {
    let mut h = Harness::new(
        MockApi::default()
            .with_spaces(vec![space("space-a")])
            .failing("update_space_configs"),
    );
    h.mount().await;
    h.state.selected_space_id = Some("space-a".into());

    h.dispatch(Action::OpenConfig);
    h.settle().await;
    h.state.space_config.buffer.reset("{\"tier\": 2}");
    h.dispatch(Action::SubmitDialog);
    h.settle().await;

    assert!(h.state.space_config.open);
    assert!(!h.state.space_config.busy);
    assert_eq!(h.state.space_config.target.as_deref(), Some("space-a"));
    assert_eq!(h.state.input_mode, InputMode::EditConfig);
    // The edited buffer survives so the user can retry
    assert!(h.state.space_config.buffer.text.contains("tier"));
    let notice = h.state.events.latest().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.contains("update configs"));
}

#[tokio::test]
async fn connect_failure_keeps_dialog_open() {
    let mut h = Harness::new(
        MockApi::default()
            .with_spaces(vec![space("space-a")])
            .with_sessions(vec![session("sess-1", None, json!({}))])
            .failing("connect_session"),
    );
    h.mount().await;
    h.state.tab = ConsoleTab::Sessions;
    h.state.selected_session_id = Some("sess-1".into());

    h.dispatch(Action::OpenConnect);
    h.dispatch(Action::SubmitDialog);
    h.settle().await;

    assert!(h.mock.calls().iter().any(|c| c == "connect_session"));
    assert!(h.state.connect.open);
    assert!(!h.state.connect.busy);
    assert_eq!(h.state.connect.target.as_deref(), Some("sess-1"));
    assert_eq!(h.state.input_mode, InputMode::Connect);
    assert_eq!(h.state.sessions.items[0].space_id, None);
    let notice = h.state.events.latest().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.contains("connect session"));
}

#[tokio::test]
async fn connect_links_session_and_refreshes() {
    let mut h = Harness::new(
        MockApi::default()
            .with_spaces(vec![space("space-a"), space("space-b")])
            .with_sessions(vec![session("sess-1", None, json!({}))]),
    );
    h.mount().await;
    h.state.tab = ConsoleTab::Sessions;
    h.state.selected_session_id = Some("sess-1".into());

    h.dispatch(Action::OpenConnect);
    assert_eq!(h.state.input_mode, InputMode::Connect);
    h.dispatch(Action::NextDialogSpace);
    h.dispatch(Action::SubmitDialog);
    h.settle().await;

    assert!(h.mock.calls().iter().any(|c| c == "connect_session"));
    assert!(!h.state.connect.open);
    assert_eq!(h.state.sessions.items[0].space_id.as_deref(), Some("space-b"));
}

#[tokio::test]
async fn connect_with_no_spaces_is_inert() {
    let mut h = Harness::new(
        MockApi::default().with_sessions(vec![session("sess-1", None, json!({}))]),
    );
    h.mount().await;
    h.state.tab = ConsoleTab::Sessions;
    h.state.selected_session_id = Some("sess-1".into());

    h.dispatch(Action::OpenConnect);
    h.dispatch(Action::SubmitDialog);
    h.settle().await;

    assert!(!h.mock.calls().iter().any(|c| c == "connect_session"));
    assert!(h.state.connect.open);
    assert!(!h.state.connect.busy);
}

#[tokio::test]
async fn text_filter_narrows_view_without_touching_store() {
    let mut h = Harness::new(
        MockApi::default()
            .with_spaces(vec![space("space-a")])
            .with_sessions(vec![
                session("alpha-1", Some("space-a"), json!({})),
                session("alpha-2", Some("space-a"), json!({})),
                session("beta-1", None, json!({})),
            ]),
    );
    h.mount().await;
    h.state.tab = ConsoleTab::Sessions;

    h.dispatch(Action::EnterFilterMode);
    for c in "xyz".chars() {
        h.dispatch(Action::FilterChar(c));
    }
    h.dispatch(Action::ExitMode);

    let fetches = h.mock.session_filters.lock().unwrap().len();
    assert_eq!(h.state.sessions.items.len(), 3);
    assert!(h.state.visible_sessions().is_empty());

    // Matching is case-insensitive substring over ids
    h.state.session_filter_text = "ALPHA".into();
    assert_eq!(h.state.visible_sessions().len(), 2);
    // Typing in the filter never re-fetched
    assert_eq!(h.mock.session_filters.lock().unwrap().len(), fetches);
}

#[tokio::test]
async fn list_failure_keeps_stale_items_and_logs() {
    let mut h = Harness::new(MockApi::default().with_spaces(vec![space("space-a")]));
    h.mount().await;
    assert_eq!(h.state.spaces.items.len(), 1);

    h.mock.fail.lock().unwrap().insert("list_spaces");
    h.dispatch(Action::Refresh);
    h.settle().await;

    assert_eq!(h.state.spaces.items.len(), 1);
    assert!(!h.state.spaces.loading);
    let notice = h.state.events.latest().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.contains("list spaces"));
}

#[tokio::test]
async fn detail_open_publishes_navigation_only() {
    let mut h = Harness::new(MockApi::default().with_spaces(vec![space("space-a")]));
    h.mount().await;
    h.state.selected_space_id = Some("space-a".into());
    let calls_before = h.mock.calls().len();

    h.dispatch(Action::OpenDetail);
    h.settle().await;

    assert_eq!(h.mock.calls().len(), calls_before);
    assert_eq!(h.state.selected_space_id.as_deref(), Some("space-a"));
    let notice = h.state.events.latest().unwrap();
    assert_eq!(notice.level, NoticeLevel::Info);
    assert!(notice.message.contains("space-a"));
}
