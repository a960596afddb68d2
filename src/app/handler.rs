use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::api::ResourceApi;
use crate::app::notices::{ConsoleEvent, NavTarget};
use crate::app::store::FetchOutcome;
use crate::app::workflows::pretty;

use super::action::Action;
use super::state::{AppState, ConsoleTab, InputMode};

/// Applies one action to the state. All mutation happens here, on the main
/// task; remote calls are spawned and post their completion back through
/// `action_tx`.
pub fn process_action(
    state: &mut AppState,
    action: Action,
    api: &Arc<dyn ResourceApi>,
    action_tx: &mpsc::UnboundedSender<Action>,
) -> Result<()> {
    match action {
        Action::Quit => {
            state.should_quit = true;
        }
        Action::Tick => {
            state.tick_animation();
        }

        Action::SwitchTab => {
            state.tab = state.tab.toggle();
        }
        Action::MoveUp => {
            state.select_prev();
        }
        Action::MoveDown => {
            state.select_next();
        }

        Action::Refresh => match state.tab {
            ConsoleTab::Spaces => refresh_spaces(state, api, action_tx),
            ConsoleTab::Sessions => {
                // The session console also needs the space list for its
                // scope picker and dialogs.
                refresh_sessions(state, api, action_tx);
                refresh_spaces(state, api, action_tx);
            }
        },
        Action::SpacesLoaded { token, result } => {
            if let FetchOutcome::Failed(error) = state.spaces.apply(token, result) {
                state.events.publish(ConsoleEvent::ApiFailure {
                    operation: "list spaces",
                    error,
                });
            }
        }
        Action::SessionsLoaded { token, result } => {
            if let FetchOutcome::Failed(error) = state.sessions.apply(token, result) {
                state.events.publish(ConsoleEvent::ApiFailure {
                    operation: "list sessions",
                    error,
                });
            }
        }

        Action::EnterFilterMode => {
            state.input_mode = InputMode::FilterEntry;
        }
        Action::FilterChar(c) => {
            state.filter_text_mut().push(c);
        }
        Action::FilterBackspace => {
            state.filter_text_mut().pop();
        }

        Action::NextScope => {
            if state.tab == ConsoleTab::Sessions && state.next_scope() {
                refresh_sessions(state, api, action_tx);
            }
        }
        Action::PrevScope => {
            if state.tab == ConsoleTab::Sessions && state.prev_scope() {
                refresh_sessions(state, api, action_tx);
            }
        }

        Action::OpenCreate => {
            let tab = state.tab;
            state.create_wf_mut(tab).open();
            state.input_mode = InputMode::Create;
        }
        Action::OpenConfig => {
            open_config(state, api, action_tx);
        }
        Action::OpenConnect => {
            if state.tab == ConsoleTab::Sessions {
                if let Some(session) = state.selected_session() {
                    let id = session.id.clone();
                    state.connect.open(id);
                    state.input_mode = InputMode::Connect;
                }
            }
        }
        Action::InitiateDelete => {
            let tab = state.tab;
            if let Some(id) = state.selected_id().map(str::to_string) {
                state.delete_wf_mut(tab).stage(id);
                state.input_mode = InputMode::ConfirmDelete;
            }
        }
        Action::ConfirmDelete => {
            confirm_delete(state, api, action_tx);
        }
        Action::SubmitDialog => {
            submit_dialog(state, api, action_tx);
        }
        Action::ExitMode => {
            cancel_active_dialog(state);
            state.input_mode = InputMode::Normal;
        }
        Action::EnterHelpMode => {
            state.input_mode = InputMode::Help;
        }

        Action::DialogChar(c) => {
            if let Some(buffer) = active_buffer(state) {
                buffer.insert_char(c);
            }
        }
        Action::DialogBackspace => {
            if let Some(buffer) = active_buffer(state) {
                buffer.backspace();
            }
        }
        Action::DialogNewline => {
            if let Some(buffer) = active_buffer(state) {
                buffer.insert_char('\n');
            }
        }
        Action::DialogCursorLeft => {
            if let Some(buffer) = active_buffer(state) {
                buffer.cursor_left();
            }
        }
        Action::DialogCursorRight => {
            if let Some(buffer) = active_buffer(state) {
                buffer.cursor_right();
            }
        }
        Action::DialogCursorHome => {
            if let Some(buffer) = active_buffer(state) {
                buffer.cursor_home();
            }
        }
        Action::DialogCursorEnd => {
            if let Some(buffer) = active_buffer(state) {
                buffer.cursor_end();
            }
        }
        Action::NextDialogSpace => {
            cycle_dialog_space(state, 1);
        }
        Action::PrevDialogSpace => {
            cycle_dialog_space(state, -1);
        }

        Action::OpenDetail => match state.tab {
            ConsoleTab::Spaces => {
                if let Some(space) = state.selected_space() {
                    let id = space.id.clone();
                    state
                        .events
                        .publish(ConsoleEvent::Navigate(NavTarget::SpacePages(id)));
                }
            }
            ConsoleTab::Sessions => {
                if let Some(session) = state.selected_session() {
                    let id = session.id.clone();
                    state
                        .events
                        .publish(ConsoleEvent::Navigate(NavTarget::SessionMessages(id)));
                }
            }
        },

        Action::CreateFinished { console, result } => {
            if !state.create_wf(console).busy {
                return Ok(());
            }
            state.create_wf_mut(console).busy = false;
            match result {
                Ok(()) => {
                    refresh_console(state, console, api, action_tx);
                    state.create_wf_mut(console).close();
                    state.input_mode = InputMode::Normal;
                }
                Err(error) => {
                    let operation = match console {
                        ConsoleTab::Spaces => "create space",
                        ConsoleTab::Sessions => "create session",
                    };
                    state
                        .events
                        .publish(ConsoleEvent::ApiFailure { operation, error });
                }
            }
        }
        Action::DeleteFinished {
            console,
            id,
            result,
        } => {
            if !state.delete_wf_mut(console).busy {
                return Ok(());
            }
            state.delete_wf_mut(console).busy = false;
            match result {
                Ok(()) => {
                    let selected = match console {
                        ConsoleTab::Spaces => &mut state.selected_space_id,
                        ConsoleTab::Sessions => &mut state.selected_session_id,
                    };
                    if selected.as_deref() == Some(id.as_str()) {
                        *selected = None;
                    }
                    refresh_console(state, console, api, action_tx);
                    state.delete_wf_mut(console).close();
                    state.input_mode = InputMode::Normal;
                }
                Err(error) => {
                    let operation = match console {
                        ConsoleTab::Spaces => "delete space",
                        ConsoleTab::Sessions => "delete session",
                    };
                    state
                        .events
                        .publish(ConsoleEvent::ApiFailure { operation, error });
                }
            }
        }
        Action::ConfigFetched {
            console,
            id,
            result,
        } => {
            let wf = state.config_wf(console);
            // Drop fetches for a dialog that moved on; the cached seed stays
            // when the live fetch fails.
            if !wf.open || wf.busy || wf.target.as_deref() != Some(id.as_str()) {
                return Ok(());
            }
            match result {
                Ok(value) => {
                    state.config_wf_mut(console).buffer.reset(pretty(&value));
                }
                Err(error) => {
                    state.events.publish(ConsoleEvent::ApiFailure {
                        operation: "fetch configs",
                        error,
                    });
                }
            }
        }
        Action::ConfigSaved { console, result } => {
            if !state.config_wf(console).busy {
                return Ok(());
            }
            state.config_wf_mut(console).busy = false;
            match result {
                Ok(()) => {
                    refresh_console(state, console, api, action_tx);
                    state.config_wf_mut(console).close();
                    state.input_mode = InputMode::Normal;
                }
                Err(error) => {
                    state.events.publish(ConsoleEvent::ApiFailure {
                        operation: "update configs",
                        error,
                    });
                }
            }
        }
        Action::ConnectFinished { result } => {
            if !state.connect.busy {
                return Ok(());
            }
            state.connect.busy = false;
            match result {
                Ok(()) => {
                    refresh_sessions(state, api, action_tx);
                    state.connect.close();
                    state.input_mode = InputMode::Normal;
                }
                Err(error) => {
                    state.events.publish(ConsoleEvent::ApiFailure {
                        operation: "connect session",
                        error,
                    });
                }
            }
        }
    }

    Ok(())
}

pub fn refresh_spaces(
    state: &mut AppState,
    api: &Arc<dyn ResourceApi>,
    action_tx: &mpsc::UnboundedSender<Action>,
) {
    let token = state.spaces.begin_fetch();
    let api = Arc::clone(api);
    let tx = action_tx.clone();
    tokio::spawn(async move {
        let result = api.list_spaces().await;
        let _ = tx.send(Action::SpacesLoaded { token, result });
    });
}

pub fn refresh_sessions(
    state: &mut AppState,
    api: &Arc<dyn ResourceApi>,
    action_tx: &mpsc::UnboundedSender<Action>,
) {
    let filter = state.scope_filter.params();
    let token = state.sessions.begin_fetch();
    let api = Arc::clone(api);
    let tx = action_tx.clone();
    tokio::spawn(async move {
        let result = api.list_sessions(filter).await;
        let _ = tx.send(Action::SessionsLoaded { token, result });
    });
}

fn refresh_console(
    state: &mut AppState,
    console: ConsoleTab,
    api: &Arc<dyn ResourceApi>,
    action_tx: &mpsc::UnboundedSender<Action>,
) {
    match console {
        ConsoleTab::Spaces => refresh_spaces(state, api, action_tx),
        ConsoleTab::Sessions => refresh_sessions(state, api, action_tx),
    }
}

fn open_config(
    state: &mut AppState,
    api: &Arc<dyn ResourceApi>,
    action_tx: &mpsc::UnboundedSender<Action>,
) {
    let tab = state.tab;
    let target = match tab {
        ConsoleTab::Spaces => state
            .selected_space()
            .map(|s| (s.id.clone(), s.configs.clone())),
        ConsoleTab::Sessions => state
            .selected_session()
            .map(|s| (s.id.clone(), s.configs.clone())),
    };
    let Some((id, cached)) = target else {
        return;
    };

    // Seed from the cache first, then try for a fresher copy.
    state.config_wf_mut(tab).open(id.clone(), &cached);
    state.input_mode = InputMode::EditConfig;

    let api = Arc::clone(api);
    let tx = action_tx.clone();
    tokio::spawn(async move {
        let result = match tab {
            ConsoleTab::Spaces => api.space_configs(&id).await,
            ConsoleTab::Sessions => api.session_configs(&id).await,
        };
        let _ = tx.send(Action::ConfigFetched {
            console: tab,
            id,
            result,
        });
    });
}

fn confirm_delete(
    state: &mut AppState,
    api: &Arc<dyn ResourceApi>,
    action_tx: &mpsc::UnboundedSender<Action>,
) {
    let tab = state.tab;
    let wf = state.delete_wf_mut(tab);
    if !wf.open || wf.busy {
        return;
    }
    let Some(id) = wf.target.clone() else {
        return;
    };
    wf.busy = true;

    let api = Arc::clone(api);
    let tx = action_tx.clone();
    tokio::spawn(async move {
        let result = match tab {
            ConsoleTab::Spaces => api.delete_space(&id).await,
            ConsoleTab::Sessions => api.delete_session(&id).await,
        };
        let _ = tx.send(Action::DeleteFinished {
            console: tab,
            id,
            result,
        });
    });
}

fn submit_dialog(
    state: &mut AppState,
    api: &Arc<dyn ResourceApi>,
    action_tx: &mpsc::UnboundedSender<Action>,
) {
    let tab = state.tab;
    match state.input_mode {
        InputMode::Create => {
            let wf = state.create_wf(tab);
            if wf.busy {
                return;
            }
            let configs = match wf.buffer.parse() {
                Ok(value) => value,
                Err(_) => {
                    // Input error: no API call, the dialog stays open.
                    state
                        .events
                        .publish(ConsoleEvent::InvalidJson { workflow: "create" });
                    return;
                }
            };
            let space_id = match tab {
                ConsoleTab::Spaces => None,
                ConsoleTab::Sessions => {
                    let choice = wf.space_choice;
                    if choice == 0 {
                        None
                    } else {
                        state.spaces.items.get(choice - 1).map(|s| s.id.clone())
                    }
                }
            };
            state.create_wf_mut(tab).busy = true;

            let api = Arc::clone(api);
            let tx = action_tx.clone();
            tokio::spawn(async move {
                let result = match tab {
                    ConsoleTab::Spaces => api.create_space(configs).await,
                    ConsoleTab::Sessions => api.create_session(space_id, configs).await,
                };
                let _ = tx.send(Action::CreateFinished {
                    console: tab,
                    result,
                });
            });
        }
        InputMode::EditConfig => {
            let wf = state.config_wf(tab);
            if wf.busy {
                return;
            }
            let Some(id) = wf.target.clone() else {
                return;
            };
            let configs = match wf.buffer.parse() {
                Ok(value) => value,
                Err(_) => {
                    state
                        .events
                        .publish(ConsoleEvent::InvalidJson { workflow: "edit-config" });
                    return;
                }
            };
            state.config_wf_mut(tab).busy = true;

            let api = Arc::clone(api);
            let tx = action_tx.clone();
            tokio::spawn(async move {
                let result = match tab {
                    ConsoleTab::Spaces => api.update_space_configs(&id, configs).await,
                    ConsoleTab::Sessions => api.update_session_configs(&id, configs).await,
                };
                let _ = tx.send(Action::ConfigSaved {
                    console: tab,
                    result,
                });
            });
        }
        InputMode::Connect => {
            if state.connect.busy {
                return;
            }
            let Some(session_id) = state.connect.target.clone() else {
                return;
            };
            // Confirm is disabled while no spaces are loaded.
            let Some(space) = state.spaces.items.get(state.connect.space_choice) else {
                return;
            };
            let space_id = space.id.clone();
            state.connect.busy = true;

            let api = Arc::clone(api);
            let tx = action_tx.clone();
            tokio::spawn(async move {
                let result = api.connect_session(&session_id, &space_id).await;
                let _ = tx.send(Action::ConnectFinished { result });
            });
        }
        _ => {}
    }
}

fn cancel_active_dialog(state: &mut AppState) {
    let tab = state.tab;
    match state.input_mode {
        InputMode::Create => state.create_wf_mut(tab).close(),
        InputMode::EditConfig => state.config_wf_mut(tab).close(),
        InputMode::Connect => state.connect.close(),
        InputMode::ConfirmDelete => state.delete_wf_mut(tab).close(),
        _ => {}
    }
}

fn active_buffer(state: &mut AppState) -> Option<&mut crate::app::workflows::JsonBuffer> {
    let tab = state.tab;
    match state.input_mode {
        InputMode::Create => Some(&mut state.create_wf_mut(tab).buffer),
        InputMode::EditConfig => Some(&mut state.config_wf_mut(tab).buffer),
        _ => None,
    }
}

fn cycle_dialog_space(state: &mut AppState, delta: isize) {
    match state.input_mode {
        // Create picker: index 0 is the "not connected" sentinel.
        InputMode::Create if state.tab == ConsoleTab::Sessions => {
            let len = state.spaces.items.len() as isize + 1;
            let wf = state.create_wf_mut(ConsoleTab::Sessions);
            wf.space_choice = ((wf.space_choice as isize + delta).rem_euclid(len)) as usize;
        }
        InputMode::Connect => {
            let len = state.spaces.items.len() as isize;
            if len == 0 {
                return;
            }
            let choice = state.connect.space_choice as isize;
            state.connect.space_choice = (choice + delta).rem_euclid(len) as usize;
        }
        _ => {}
    }
}
