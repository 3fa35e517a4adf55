//! Component trait - interface for the panel's UI pieces
//!
//! Components turn key events into Actions and render themselves. State that
//! belongs to the question store is never touched here; components receive a
//! snapshot when they need one.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// The flow is:
/// 1. `handle_key_event` - map a key to an Action
/// 2. `update` - react to an Action, optionally returning a follow-up
/// 3. `draw` - render into `area`
pub trait Component {
    /// Called once before the first frame
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Map a key event to an Action
    ///
    /// Purely local state (cursor, field focus) may change here; anything
    /// else goes through the returned Action.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    /// Process an Action, returning an optional follow-up
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Render the component. No state changes.
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
