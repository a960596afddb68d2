mod action;
mod handler;
mod notices;
mod runtime;
mod state;
mod store;
mod workflows;

pub use action::Action;
pub use handler::{process_action, refresh_sessions, refresh_spaces};
pub use notices::{ConsoleEvent, EventLog, NavTarget, Notice, NoticeLevel};
pub use runtime::run_tui;
pub use state::{AppState, ConsoleTab, InputMode, ScopeFilter};
pub use store::{CollectionStore, FetchOutcome};
pub use workflows::{ConfigWorkflow, ConnectWorkflow, CreateWorkflow, DeleteWorkflow, JsonBuffer};
