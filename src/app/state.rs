use crate::api::SessionFilter;
use crate::models::{Record, Session, Space};

use super::notices::EventLog;
use super::store::CollectionStore;
use super::workflows::{ConfigWorkflow, ConnectWorkflow, CreateWorkflow, DeleteWorkflow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleTab {
    Spaces,
    Sessions,
}

impl ConsoleTab {
    pub fn toggle(&self) -> Self {
        match self {
            ConsoleTab::Spaces => ConsoleTab::Sessions,
            ConsoleTab::Sessions => ConsoleTab::Spaces,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ConsoleTab::Spaces => "Spaces",
            ConsoleTab::Sessions => "Sessions",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    FilterEntry,
    Create,
    EditConfig,
    Connect,
    ConfirmDelete,
    Help,
}

/// Server-side scope for the session list. Unlike the text filter this is a
/// fetch parameter: changing it always re-issues the list call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeFilter {
    All,
    NotConnected,
    Space(String),
}

impl ScopeFilter {
    pub fn params(&self) -> SessionFilter {
        match self {
            ScopeFilter::All => SessionFilter::all(),
            ScopeFilter::NotConnected => SessionFilter::unconnected(),
            ScopeFilter::Space(id) => SessionFilter::for_space(id.clone()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ScopeFilter::All => "all spaces",
            ScopeFilter::NotConnected => "not connected",
            ScopeFilter::Space(id) => id,
        }
    }
}

pub struct AppState {
    pub spaces: CollectionStore<Space>,
    pub sessions: CollectionStore<Session>,

    pub tab: ConsoleTab,
    pub input_mode: InputMode,

    // Client-side text filters, one per console
    pub space_filter_text: String,
    pub session_filter_text: String,

    // Server-side scope for the session console
    pub scope_filter: ScopeFilter,

    // Row selection, visual only
    pub selected_space_id: Option<String>,
    pub selected_session_id: Option<String>,

    // Modal workflows, one set per console
    pub space_create: CreateWorkflow,
    pub session_create: CreateWorkflow,
    pub space_delete: DeleteWorkflow,
    pub session_delete: DeleteWorkflow,
    pub space_config: ConfigWorkflow,
    pub session_config: ConfigWorkflow,
    pub connect: ConnectWorkflow,

    pub events: EventLog,

    pub animation_frame: usize,
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            spaces: CollectionStore::new(),
            sessions: CollectionStore::new(),
            tab: ConsoleTab::Spaces,
            input_mode: InputMode::Normal,
            space_filter_text: String::new(),
            session_filter_text: String::new(),
            scope_filter: ScopeFilter::All,
            selected_space_id: None,
            selected_session_id: None,
            space_create: CreateWorkflow::default(),
            session_create: CreateWorkflow::default(),
            space_delete: DeleteWorkflow::default(),
            session_delete: DeleteWorkflow::default(),
            space_config: ConfigWorkflow::default(),
            session_config: ConfigWorkflow::default(),
            connect: ConnectWorkflow::default(),
            events: EventLog::new(),
            animation_frame: 0,
            should_quit: false,
        }
    }

    pub fn filter_text(&self) -> &str {
        match self.tab {
            ConsoleTab::Spaces => &self.space_filter_text,
            ConsoleTab::Sessions => &self.session_filter_text,
        }
    }

    pub fn filter_text_mut(&mut self) -> &mut String {
        match self.tab {
            ConsoleTab::Spaces => &mut self.space_filter_text,
            ConsoleTab::Sessions => &mut self.session_filter_text,
        }
    }

    pub fn visible_spaces(&self) -> Vec<&Space> {
        self.spaces.visible(&self.space_filter_text)
    }

    pub fn visible_sessions(&self) -> Vec<&Session> {
        self.sessions.visible(&self.session_filter_text)
    }

    /// Visible row ids for the active console, in server order.
    pub fn visible_ids(&self) -> Vec<String> {
        match self.tab {
            ConsoleTab::Spaces => self
                .visible_spaces()
                .iter()
                .map(|s| s.id().to_string())
                .collect(),
            ConsoleTab::Sessions => self
                .visible_sessions()
                .iter()
                .map(|s| s.id().to_string())
                .collect(),
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        match self.tab {
            ConsoleTab::Spaces => self.selected_space_id.as_deref(),
            ConsoleTab::Sessions => self.selected_session_id.as_deref(),
        }
    }

    pub fn set_selected_id(&mut self, id: Option<String>) {
        match self.tab {
            ConsoleTab::Spaces => self.selected_space_id = id,
            ConsoleTab::Sessions => self.selected_session_id = id,
        }
    }

    pub fn selected_space(&self) -> Option<&Space> {
        self.selected_space_id
            .as_deref()
            .and_then(|id| self.spaces.get(id))
    }

    pub fn selected_session(&self) -> Option<&Session> {
        self.selected_session_id
            .as_deref()
            .and_then(|id| self.sessions.get(id))
    }

    pub fn select_next(&mut self) {
        let visible = self.visible_ids();
        if visible.is_empty() {
            return;
        }
        let next = match self.selected_id() {
            Some(current) => match visible.iter().position(|id| id == current) {
                Some(pos) if pos + 1 < visible.len() => visible[pos + 1].clone(),
                Some(pos) => visible[pos].clone(),
                None => visible[0].clone(),
            },
            None => visible[0].clone(),
        };
        self.set_selected_id(Some(next));
    }

    pub fn select_prev(&mut self) {
        let visible = self.visible_ids();
        if visible.is_empty() {
            return;
        }
        let prev = match self.selected_id() {
            Some(current) => match visible.iter().position(|id| id == current) {
                Some(pos) if pos > 0 => visible[pos - 1].clone(),
                Some(pos) => visible[pos].clone(),
                None => visible[0].clone(),
            },
            None => visible[0].clone(),
        };
        self.set_selected_id(Some(prev));
    }

    /// Scope options in picker order: all, not-connected, then one per
    /// currently loaded space.
    pub fn scope_options(&self) -> Vec<ScopeFilter> {
        let mut options = vec![ScopeFilter::All, ScopeFilter::NotConnected];
        options.extend(
            self.spaces
                .items
                .iter()
                .map(|space| ScopeFilter::Space(space.id.clone())),
        );
        options
    }

    /// Steps the scope filter forward; returns true when it changed.
    pub fn next_scope(&mut self) -> bool {
        self.step_scope(1)
    }

    pub fn prev_scope(&mut self) -> bool {
        self.step_scope(-1)
    }

    fn step_scope(&mut self, delta: isize) -> bool {
        let options = self.scope_options();
        let current = options
            .iter()
            .position(|option| *option == self.scope_filter)
            .unwrap_or(0);
        let len = options.len() as isize;
        let next = (current as isize + delta).rem_euclid(len) as usize;
        if options[next] == self.scope_filter {
            return false;
        }
        self.scope_filter = options[next].clone();
        true
    }

    pub fn create_wf(&self, tab: ConsoleTab) -> &CreateWorkflow {
        match tab {
            ConsoleTab::Spaces => &self.space_create,
            ConsoleTab::Sessions => &self.session_create,
        }
    }

    pub fn create_wf_mut(&mut self, tab: ConsoleTab) -> &mut CreateWorkflow {
        match tab {
            ConsoleTab::Spaces => &mut self.space_create,
            ConsoleTab::Sessions => &mut self.session_create,
        }
    }

    pub fn delete_wf(&self, tab: ConsoleTab) -> &DeleteWorkflow {
        match tab {
            ConsoleTab::Spaces => &self.space_delete,
            ConsoleTab::Sessions => &self.session_delete,
        }
    }

    pub fn delete_wf_mut(&mut self, tab: ConsoleTab) -> &mut DeleteWorkflow {
        match tab {
            ConsoleTab::Spaces => &mut self.space_delete,
            ConsoleTab::Sessions => &mut self.session_delete,
        }
    }

    pub fn config_wf(&self, tab: ConsoleTab) -> &ConfigWorkflow {
        match tab {
            ConsoleTab::Spaces => &self.space_config,
            ConsoleTab::Sessions => &self.session_config,
        }
    }

    pub fn config_wf_mut(&mut self, tab: ConsoleTab) -> &mut ConfigWorkflow {
        match tab {
            ConsoleTab::Spaces => &mut self.space_config,
            ConsoleTab::Sessions => &mut self.session_config,
        }
    }

    /// Whether the dialog belonging to the current input mode is busy. Used
    /// by the key handler to swallow input while a call is in flight.
    pub fn active_dialog_busy(&self) -> bool {
        match self.input_mode {
            InputMode::Create => self.create_wf(self.tab).busy,
            InputMode::EditConfig => self.config_wf(self.tab).busy,
            InputMode::Connect => self.connect.busy,
            InputMode::ConfirmDelete => match self.tab {
                ConsoleTab::Spaces => self.space_delete.busy,
                ConsoleTab::Sessions => self.session_delete.busy,
            },
            _ => false,
        }
    }

    /// Spinner character for loading indicators.
    pub fn spinner_char(&self) -> &'static str {
        const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
        SPINNER_FRAMES[self.animation_frame % SPINNER_FRAMES.len()]
    }

    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::Value;

    fn seed_spaces(state: &mut AppState, ids: &[&str]) {
        let token = state.spaces.begin_fetch();
        let items = ids
            .iter()
            .map(|id| Space {
                id: id.to_string(),
                created_at: Utc::now(),
                configs: Value::Null,
            })
            .collect();
        state.spaces.apply(token, Ok(items));
    }

    #[test]
    fn scope_options_track_loaded_spaces() {
        let mut state = AppState::new();
        assert_eq!(
            state.scope_options(),
            vec![ScopeFilter::All, ScopeFilter::NotConnected]
        );
        seed_spaces(&mut state, &["space-a", "space-b"]);
        let options = state.scope_options();
        assert_eq!(options.len(), 4);
        assert_eq!(options[2], ScopeFilter::Space("space-a".into()));
    }

    #[test]
    fn scope_cycles_and_reports_change() {
        let mut state = AppState::new();
        seed_spaces(&mut state, &["space-a"]);
        assert!(state.next_scope());
        assert_eq!(state.scope_filter, ScopeFilter::NotConnected);
        assert!(state.next_scope());
        assert_eq!(state.scope_filter, ScopeFilter::Space("space-a".into()));
        assert!(state.next_scope());
        assert_eq!(state.scope_filter, ScopeFilter::All);
        assert!(state.prev_scope());
        assert_eq!(state.scope_filter, ScopeFilter::Space("space-a".into()));
    }

    #[test]
    fn scope_params_are_mutually_exclusive() {
        assert_eq!(ScopeFilter::All.params(), SessionFilter::all());
        let unconnected = ScopeFilter::NotConnected.params();
        assert_eq!(unconnected.not_connected, Some(true));
        assert_eq!(unconnected.space_id, None);
        let scoped = ScopeFilter::Space("space-a".into()).params();
        assert_eq!(scoped.space_id.as_deref(), Some("space-a"));
        assert_eq!(scoped.not_connected, None);
    }

    #[test]
    fn selection_moves_over_visible_rows_only() {
        let mut state = AppState::new();
        seed_spaces(&mut state, &["alpha", "beta", "alpine"]);
        state.space_filter_text = "al".into();
        state.select_next();
        assert_eq!(state.selected_space_id.as_deref(), Some("alpha"));
        state.select_next();
        assert_eq!(state.selected_space_id.as_deref(), Some("alpine"));
        state.select_next();
        assert_eq!(state.selected_space_id.as_deref(), Some("alpine"));
        state.select_prev();
        assert_eq!(state.selected_space_id.as_deref(), Some("alpha"));
    }
}
