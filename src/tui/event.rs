use crate::app::{Action, AppState, ConsoleTab, InputMode};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

/// Internal event type for terminal events
enum TerminalEvent {
    Key(KeyEvent),
    Tick,
}

pub struct EventHandler {
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    terminal_rx: mpsc::UnboundedReceiver<TerminalEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (terminal_tx, terminal_rx) = mpsc::unbounded_channel();

        // Dedicated thread for blocking terminal reads
        std::thread::spawn(move || {
            let poll_timeout = Duration::from_millis(50);
            loop {
                let event = if event::poll(poll_timeout).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key)) => TerminalEvent::Key(key),
                        _ => TerminalEvent::Tick,
                    }
                } else {
                    TerminalEvent::Tick
                };

                if terminal_tx.send(event).is_err() {
                    break; // Channel closed, exit thread
                }
            }
        });

        Self {
            action_tx,
            action_rx,
            terminal_rx,
        }
    }

    pub fn action_sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    pub async fn next(&mut self, state: &AppState) -> Result<Action> {
        tokio::select! {
            Some(event) = self.terminal_rx.recv() => {
                match event {
                    TerminalEvent::Key(key) => Ok(self.handle_key_event(key, state)),
                    TerminalEvent::Tick => Ok(Action::Tick),
                }
            }
            // Completions posted by spawned API tasks
            Some(action) = self.action_rx.recv() => {
                Ok(action)
            }
            else => Ok(Action::Tick)
        }
    }

    fn handle_key_event(&self, key: KeyEvent, state: &AppState) -> Action {
        // While a call is in flight the dialog ignores everything, so a
        // double Enter cannot double-submit.
        if state.active_dialog_busy() {
            return Action::Tick;
        }

        match state.input_mode {
            InputMode::Help => match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter => {
                    Action::ExitMode
                }
                _ => Action::Tick,
            },
            InputMode::FilterEntry => match key.code {
                KeyCode::Esc | KeyCode::Enter => Action::ExitMode,
                KeyCode::Backspace => Action::FilterBackspace,
                KeyCode::Char(c) => Action::FilterChar(c),
                _ => Action::Tick,
            },
            InputMode::Create | InputMode::EditConfig => self.handle_editor_key(key, state),
            InputMode::Connect => match key.code {
                KeyCode::Esc => Action::ExitMode,
                KeyCode::Char('j') | KeyCode::Down => Action::NextDialogSpace,
                KeyCode::Char('k') | KeyCode::Up => Action::PrevDialogSpace,
                KeyCode::Enter => Action::SubmitDialog,
                _ => Action::Tick,
            },
            InputMode::ConfirmDelete => match key.code {
                KeyCode::Esc | KeyCode::Char('n') => Action::ExitMode,
                KeyCode::Enter | KeyCode::Char('y') => Action::ConfirmDelete,
                _ => Action::Tick,
            },
            InputMode::Normal => self.handle_normal_key(key, state),
        }
    }

    fn handle_editor_key(&self, key: KeyEvent, state: &AppState) -> Action {
        // Ctrl+S submits; Enter is a newline inside the JSON buffer.
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('s') => Action::SubmitDialog,
                KeyCode::Char('a') => Action::DialogCursorHome,
                KeyCode::Char('e') => Action::DialogCursorEnd,
                _ => Action::Tick,
            };
        }
        match key.code {
            KeyCode::Esc => Action::ExitMode,
            KeyCode::Enter => Action::DialogNewline,
            KeyCode::Backspace => Action::DialogBackspace,
            KeyCode::Left => Action::DialogCursorLeft,
            KeyCode::Right => Action::DialogCursorRight,
            KeyCode::Home => Action::DialogCursorHome,
            KeyCode::End => Action::DialogCursorEnd,
            // Space picker on the session create dialog
            KeyCode::Tab if state.input_mode == InputMode::Create => Action::NextDialogSpace,
            KeyCode::BackTab if state.input_mode == InputMode::Create => Action::PrevDialogSpace,
            KeyCode::Char(c) => Action::DialogChar(c),
            _ => Action::Tick,
        }
    }

    fn handle_normal_key(&self, key: KeyEvent, state: &AppState) -> Action {
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('?') => Action::EnterHelpMode,
            KeyCode::Tab => Action::SwitchTab,
            KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
            KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
            KeyCode::Char('/') => Action::EnterFilterMode,
            KeyCode::Char('r') => Action::Refresh,
            KeyCode::Char('n') => Action::OpenCreate,
            KeyCode::Char('d') => Action::InitiateDelete,
            KeyCode::Char('c') => Action::OpenConfig,
            KeyCode::Char('a') if state.tab == ConsoleTab::Sessions => Action::OpenConnect,
            KeyCode::Char('h') | KeyCode::Left => Action::PrevScope,
            KeyCode::Char('l') | KeyCode::Right => Action::NextScope,
            KeyCode::Enter => Action::OpenDetail,
            _ => Action::Tick,
        }
    }
}
