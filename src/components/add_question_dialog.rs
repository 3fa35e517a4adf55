//! Add-question dialog component
//!
//! Round selector, question line, description box and a submit button. The
//! text itself lives in the bank state's form; this component only tracks
//! which field has focus.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::{AddField, AddQuestionForm, RoundNumber};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

#[derive(Default)]
pub struct AddQuestionDialog {
    pub focus: AddField,
}

impl AddQuestionDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Focus the question line when the dialog opens
    pub fn reset_focus(&mut self) {
        self.focus = AddField::Question;
    }

    pub fn draw_with_form(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        form: &AddQuestionForm,
    ) -> Result<()> {
        let popup_area = centered_popup(area, 72, 22);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" Add Question to Bank ")
            .title_style(
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            );
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Intro
                Constraint::Length(3), // Round
                Constraint::Length(3), // Question
                Constraint::Min(4),    // Description
                Constraint::Length(3), // Submit
                Constraint::Length(1), // Help
            ])
            .split(inner);

        let intro = Paragraph::new(Line::from(Span::styled(
            "Add a question to the bank for a specific round. You can activate it later.",
            Style::default().fg(Color::DarkGray),
        )))
        .wrap(Wrap { trim: true });
        frame.render_widget(intro, chunks[0]);

        // Round selector
        let round_line = Line::from(
            RoundNumber::all()
                .iter()
                .flat_map(|round| {
                    let style = if *round == form.round {
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    };
                    vec![
                        Span::styled(format!(" Round {} ", round.number()), style),
                        Span::raw(" "),
                    ]
                })
                .collect::<Vec<_>>(),
        );
        let round = Paragraph::new(vec![round_line]).block(self.field_block(
            AddField::Round,
            format!(" Select Round · {} ", form.round.label()),
        ));
        frame.render_widget(round, chunks[1]);

        // Question
        let question =
            Paragraph::new(self.input_line(AddField::Question, &form.question, "Enter the question..."))
                .block(self.field_block(AddField::Question, " Question ".to_string()));
        frame.render_widget(question, chunks[2]);

        // Description
        let mut description_lines: Vec<Line> = if form.description.is_empty() {
            vec![self.input_line(AddField::Description, "", "Enter detailed description...")]
        } else {
            form.description
                .split('\n')
                .map(|l| Line::from(l.to_string()))
                .collect()
        };
        if self.focus == AddField::Description && !form.description.is_empty() {
            if let Some(last) = description_lines.last_mut() {
                last.spans.push(Span::styled("_", Style::default().fg(Color::Cyan)));
            }
        }
        let description = Paragraph::new(description_lines)
            .wrap(Wrap { trim: false })
            .block(self.field_block(AddField::Description, " Description ".to_string()));
        frame.render_widget(description, chunks[3]);

        // Submit
        let submit_style = if self.focus == AddField::Submit {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        };
        let submit = Paragraph::new(Line::from(Span::styled(
            format!(" + Add to {} ", form.round.name()),
            submit_style,
        )))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(
            Style::default().fg(if self.focus == AddField::Submit {
                Color::Magenta
            } else {
                Color::DarkGray
            }),
        ));
        frame.render_widget(submit, chunks[4]);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Tab ", Style::default().fg(Color::Cyan)),
            Span::raw("Next field  "),
            Span::styled(" ←/→ ", Style::default().fg(Color::Cyan)),
            Span::raw("Round  "),
            Span::styled(" Ctrl-s ", Style::default().fg(Color::Green)),
            Span::raw("Add  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Close"),
        ]))
        .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(help, chunks[5]);

        Ok(())
    }

    fn field_block(&self, field: AddField, title: String) -> Block<'static> {
        let color = if self.focus == field {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(title)
            .title_style(Style::default().fg(color))
    }

    fn input_line(&self, field: AddField, text: &str, placeholder: &'static str) -> Line<'static> {
        let cursor = if self.focus == field { "_" } else { "" };
        if text.is_empty() {
            Line::from(vec![
                Span::styled(cursor, Style::default().fg(Color::Cyan)),
                Span::styled(placeholder, Style::default().fg(Color::DarkGray)),
            ])
        } else {
            Line::from(vec![
                Span::raw(text.to_string()),
                Span::styled(cursor, Style::default().fg(Color::Cyan)),
            ])
        }
    }
}

impl Component for AddQuestionDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            let action = match key.code {
                KeyCode::Char('s') => Some(Action::SubmitAddQuestion),
                KeyCode::Char('c') => Some(Action::ForceQuit),
                _ => None,
            };
            return Ok(action);
        }

        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Tab | KeyCode::Down if self.focus != AddField::Description => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                None
            }
            KeyCode::Up if self.focus != AddField::Description => {
                self.focus = self.focus.prev();
                None
            }
            KeyCode::Left if self.focus == AddField::Round => Some(Action::PrevAddRound),
            KeyCode::Right if self.focus == AddField::Round => Some(Action::NextAddRound),
            KeyCode::Char(c @ '1'..='3') if self.focus == AddField::Round => c
                .to_digit(10)
                .and_then(|d| RoundNumber::try_from(d as u8).ok())
                .map(Action::SetAddRound),
            KeyCode::Enter if self.focus == AddField::Description => {
                Some(Action::FormInput(AddField::Description, '\n'))
            }
            KeyCode::Enter => Some(Action::SubmitAddQuestion),
            KeyCode::Backspace if self.focus.is_text() => Some(Action::FormBackspace(self.focus)),
            KeyCode::Char(c) if self.focus.is_text() => Some(Action::FormInput(self.focus, c)),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the form; see draw_with_form
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut dialog = AddQuestionDialog::new();
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Char('W'))).unwrap(),
            Some(Action::FormInput(AddField::Question, 'W'))
        );

        dialog.handle_key_event(key(KeyCode::Tab)).unwrap();
        assert_eq!(dialog.focus, AddField::Description);
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Enter)).unwrap(),
            Some(Action::FormInput(AddField::Description, '\n'))
        );
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Backspace)).unwrap(),
            Some(Action::FormBackspace(AddField::Description))
        );
    }

    #[test]
    fn test_enter_submits_outside_description() {
        let mut dialog = AddQuestionDialog::new();
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Enter)).unwrap(),
            Some(Action::SubmitAddQuestion)
        );

        dialog.focus = AddField::Description;
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(
            dialog.handle_key_event(ctrl_s).unwrap(),
            Some(Action::SubmitAddQuestion)
        );
    }

    #[test]
    fn test_round_field_keys() {
        let mut dialog = AddQuestionDialog::new();
        dialog.handle_key_event(key(KeyCode::BackTab)).unwrap();
        assert_eq!(dialog.focus, AddField::Round);

        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Right)).unwrap(),
            Some(Action::NextAddRound)
        );
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Char('3'))).unwrap(),
            Some(Action::SetAddRound(RoundNumber::Three))
        );
        // Letters are ignored on the round selector
        assert_eq!(dialog.handle_key_event(key(KeyCode::Char('x'))).unwrap(), None);
    }

    #[test]
    fn test_esc_closes() {
        let mut dialog = AddQuestionDialog::new();
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::CloseModal)
        );
    }
}
