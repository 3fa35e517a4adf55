//! Help dialog component
//!
//! Lists every keyboard shortcut of the question bank.

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Rounds",
        &[
            ("Tab / Shift-Tab", "Next / previous round"),
            ("1 2 3", "Jump to a round"),
        ],
    ),
    (
        "Tables",
        &[
            ("j / k / ↓ / ↑", "Move cursor"),
            ("g / G", "First / last question"),
            ("h / l / ← / →", "Switch between bank and active"),
            ("d / Delete", "Delete question"),
        ],
    ),
    (
        "Selection",
        &[
            ("Space", "Select / unselect question"),
            ("a", "Select all / none"),
            ("Enter / A", "Activate selected for the spin wheel"),
            ("Esc", "Clear selection"),
        ],
    ),
    (
        "Add Question",
        &[
            ("n / +", "Open add dialog"),
            ("Tab / Shift-Tab", "Next / previous field"),
            ("← / →", "Change target round"),
            ("Ctrl-s", "Add to bank"),
        ],
    ),
    (
        "General",
        &[
            ("R", "Reload data file"),
            ("L", "Notification history"),
            ("?", "This help"),
            ("q", "Quit"),
            ("Ctrl-c", "Quit immediately"),
        ],
    ),
];

#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);

        let margin = 4;
        let dialog_area = Rect::new(
            area.x + margin,
            area.y + margin / 2,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin),
        );

        let content = build_help_content();
        let total = content.len();
        let visible_height = dialog_area.height.saturating_sub(2) as usize;

        let max_scroll = total.saturating_sub(visible_height);
        self.scroll_offset = self.scroll_offset.min(max_scroll);

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Keyboard Shortcuts ")
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, dialog_area);

        if total > visible_height {
            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(self.scroll_offset);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                dialog_area.inner(ratatui::layout::Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

fn build_help_content() -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (title, keys) in SECTIONS {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        for (keys, description) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("    {:<18}", keys),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw(*description),
            ]));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_help_lists_every_section() {
        let lines = build_help_content();
        let expected: usize = SECTIONS.iter().map(|(_, keys)| keys.len() + 2).sum();
        assert_eq!(lines.len(), expected);
    }

    #[test]
    fn test_scroll_never_negative() {
        let mut dialog = HelpDialog::default();
        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(dialog.handle_key_event(up).unwrap(), None);
        assert_eq!(dialog.scroll_offset, 0);
    }
}
