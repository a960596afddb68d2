use serde_json::Value;

use crate::api::ApiError;
use crate::models::{Session, Space};

use super::state::ConsoleTab;

#[derive(Debug, Clone)]
pub enum Action {
    // App control
    Quit,
    Tick,

    // Navigation
    SwitchTab,
    MoveUp,
    MoveDown,

    // Collection store
    Refresh,
    SpacesLoaded {
        token: u64,
        result: Result<Vec<Space>, ApiError>,
    },
    SessionsLoaded {
        token: u64,
        result: Result<Vec<Session>, ApiError>,
    },

    // Client-side text filter
    EnterFilterMode,
    FilterChar(char),
    FilterBackspace,

    // Server-side scope (session console only)
    NextScope,
    PrevScope,

    // Workflow entry points
    OpenCreate,
    OpenConfig,
    OpenConnect,
    InitiateDelete,
    ConfirmDelete,
    SubmitDialog,
    ExitMode,
    EnterHelpMode,

    // Dialog buffer editing
    DialogChar(char),
    DialogBackspace,
    DialogNewline,
    DialogCursorLeft,
    DialogCursorRight,
    DialogCursorHome,
    DialogCursorEnd,
    NextDialogSpace,
    PrevDialogSpace,

    // Navigation triggers (handed to the presentation collaborator)
    OpenDetail,

    // Workflow completions
    CreateFinished {
        console: ConsoleTab,
        result: Result<(), ApiError>,
    },
    DeleteFinished {
        console: ConsoleTab,
        id: String,
        result: Result<(), ApiError>,
    },
    ConfigFetched {
        console: ConsoleTab,
        id: String,
        result: Result<Value, ApiError>,
    },
    ConfigSaved {
        console: ConsoleTab,
        result: Result<(), ApiError>,
    },
    ConnectFinished {
        result: Result<(), ApiError>,
    },
}
