use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::api::ResourceApi;
use crate::tui;
use crate::tui::event::EventHandler;

use super::handler::{process_action, refresh_sessions, refresh_spaces};
use super::state::AppState;
use super::Action;

pub async fn run_tui(api: Arc<dyn ResourceApi>) -> Result<()> {
    let mut terminal = tui::init()?;

    let mut state = AppState::new();
    let mut events = EventHandler::new();
    let action_tx = events.action_sender();

    // Mount load: both stores, so the session console's scope picker has
    // spaces available from the start.
    refresh_spaces(&mut state, &api, &action_tx);
    refresh_sessions(&mut state, &api, &action_tx);

    let result = run_main_loop(&mut terminal, &mut state, &mut events, &api, action_tx).await;

    tui::restore()?;

    result
}

async fn run_main_loop(
    terminal: &mut tui::Terminal,
    state: &mut AppState,
    events: &mut EventHandler,
    api: &Arc<dyn ResourceApi>,
    action_tx: mpsc::UnboundedSender<Action>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| tui::ui::draw(frame, state))?;

        let action = events.next(state).await?;

        process_action(state, action, api, &action_tx)?;

        if state.should_quit {
            break;
        }
    }

    Ok(())
}
