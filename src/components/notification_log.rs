//! Notification history dialog

use crate::action::Action;
use crate::component::Component;
use crate::model::{NoticeLevel, NotificationLog};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

#[derive(Default)]
pub struct NotificationLogDialog {
    pub list_state: ListState,
}

impl NotificationLogDialog {
    pub fn reset(&mut self) {
        self.list_state.select(Some(0));
    }

    pub fn draw_with_log(&mut self, frame: &mut Frame, area: Rect, log: &NotificationLog) -> Result<()> {
        frame.render_widget(Clear, area);

        let margin = 4;
        let dialog_area = Rect::new(
            area.x + margin,
            area.y + margin / 2,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin),
        );

        let items: Vec<ListItem> = if log.is_empty() {
            vec![ListItem::new(Line::from(Span::styled(
                "  Nothing yet",
                Style::default().fg(Color::DarkGray),
            )))]
        } else {
            log.entries()
                .iter()
                .map(|entry| {
                    let color = match entry.notice.level {
                        NoticeLevel::Success => Color::Green,
                        NoticeLevel::Warning => Color::Yellow,
                        NoticeLevel::Error => Color::Red,
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            format!("{} ", entry.formatted_time()),
                            Style::default().fg(Color::DarkGray),
                        ),
                        Span::styled(
                            format!("{} ", entry.notice.level.icon()),
                            Style::default().fg(color).add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(entry.notice.message.clone()),
                    ]))
                })
                .collect()
        };

        if let Some(selected) = self.list_state.selected() {
            let last = log.len().saturating_sub(1);
            self.list_state.select(Some(selected.min(last)));
        }

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Magenta))
                    .title(format!(" Notifications ({}) ", log.len()))
                    .title_style(
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .highlight_style(Style::default().bg(Color::DarkGray));

        frame.render_stateful_widget(list, dialog_area, &mut self.list_state);
        Ok(())
    }
}

impl Component for NotificationLogDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('L') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => {
                let next = self.list_state.selected().map_or(0, |i| i + 1);
                self.list_state.select(Some(next));
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let prev = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
                self.list_state.select(Some(prev));
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the log; see draw_with_log
        Ok(())
    }
}
