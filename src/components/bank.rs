//! Question bank component - the main screen
//!
//! Round tabs, statistics, selection controls, and the bank/active tables.
//! Owns cursor and focus state; the selection and add form live in
//! [`QuestionBankState`].

use crate::action::Action;
use crate::component::Component;
use crate::components::calculate_bank_layout;
use crate::model::{
    Notification, NoticeLevel, Question, QuestionBankState, Reaction, Round, RoundNumber,
    RoundView, Team, User,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};
use std::path::Path;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Which table has the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Bank,
    Active,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Question Bank Component
// ═══════════════════════════════════════════════════════════════════════════════

pub struct QuestionBankComponent {
    pub state: QuestionBankState,
    pub focus: Pane,
    pub bank_list: ListState,
    pub active_list: ListState,
}

impl QuestionBankComponent {
    pub fn new(current_round: RoundNumber) -> Self {
        Self {
            state: QuestionBankState::new(current_round),
            focus: Pane::Bank,
            bank_list: ListState::default(),
            active_list: ListState::default(),
        }
    }

    fn focused_list(&mut self) -> &mut ListState {
        match self.focus {
            Pane::Bank => &mut self.bank_list,
            Pane::Active => &mut self.active_list,
        }
    }

    fn focused_len(&self, questions: &[Question]) -> usize {
        let view = self.state.view(questions);
        match self.focus {
            Pane::Bank => view.bank.len(),
            Pane::Active => view.active.len(),
        }
    }

    /// Question under the cursor of the focused table
    pub fn focused_question<'a>(&self, questions: &'a [Question]) -> Option<&'a Question> {
        let view = self.state.view(questions);
        match self.focus {
            Pane::Bank => view.bank.get(self.bank_list.selected()?).copied(),
            Pane::Active => view.active.get(self.active_list.selected()?).copied(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    pub fn next(&mut self, questions: &[Question]) {
        let len = self.focused_len(questions);
        if len == 0 {
            return;
        }
        let list = self.focused_list();
        let next = list.selected().map_or(0, |i| (i + 1) % len);
        list.select(Some(next));
    }

    pub fn previous(&mut self, questions: &[Question]) {
        let len = self.focused_len(questions);
        if len == 0 {
            return;
        }
        let list = self.focused_list();
        let prev = match list.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        list.select(Some(prev));
    }

    pub fn select_first(&mut self, questions: &[Question]) {
        let len = self.focused_len(questions);
        self.focused_list().select(if len == 0 { None } else { Some(0) });
    }

    pub fn select_last(&mut self, questions: &[Question]) {
        let len = self.focused_len(questions);
        self.focused_list().select(len.checked_sub(1));
    }

    pub fn switch_pane(&mut self, questions: &[Question]) {
        self.focus = match self.focus {
            Pane::Bank => Pane::Active,
            Pane::Active => Pane::Bank,
        };
        self.clamp_cursors(questions);
    }

    /// Show another round; clears the selection and resets both cursors
    pub fn switch_round(&mut self, round: RoundNumber, questions: &[Question]) {
        self.state.set_viewing_round(round);
        self.bank_list.select(None);
        self.active_list.select(None);
        self.clamp_cursors(questions);
    }

    fn clamp_cursors(&mut self, questions: &[Question]) {
        let view = self.state.view(questions);
        clamp(&mut self.bank_list, view.bank.len());
        clamp(&mut self.active_list, view.active.len());
    }

    /// Bring local state in line with a fresh snapshot
    pub fn sync(&mut self, questions: &[Question]) {
        self.state.reconcile(questions);
        self.clamp_cursors(questions);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Requests
    // ─────────────────────────────────────────────────────────────────────────

    /// Toggle the question under the bank cursor
    pub fn toggle_focused(&mut self, questions: &[Question]) {
        if self.focus != Pane::Bank {
            return;
        }
        if let Some(id) = self.focused_question(questions).map(|q| q.id.clone()) {
            self.state.toggle(&id);
        }
    }

    /// Request deletion of the question under the cursor, from either table
    pub fn delete_focused(&mut self, questions: &[Question]) -> Reaction {
        match self.focused_question(questions).map(|q| q.id.clone()) {
            Some(id) => self.state.request_delete(&id),
            None => Reaction::none(),
        }
    }
}

fn clamp(list: &mut ListState, len: usize) {
    if len == 0 {
        list.select(None);
    } else {
        list.select(Some(list.selected().unwrap_or(0).min(len - 1)));
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for QuestionBankComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ForceQuit)
            }

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstItem),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),
            KeyCode::Char('h') | KeyCode::Char('l') | KeyCode::Left | KeyCode::Right => {
                Some(Action::SwitchPane)
            }

            // Rounds
            KeyCode::Tab => Some(Action::NextRound),
            KeyCode::BackTab => Some(Action::PrevRound),
            KeyCode::Char(c @ '1'..='3') => c
                .to_digit(10)
                .and_then(|d| RoundNumber::try_from(d as u8).ok())
                .map(Action::ViewRound),

            // Selection & activation
            KeyCode::Char(' ') => Some(Action::ToggleSelection),
            KeyCode::Char('a') => Some(Action::SelectAll),
            KeyCode::Enter | KeyCode::Char('A') => Some(Action::ActivateSelected),
            KeyCode::Esc if !self.state.selection().is_empty() => Some(Action::ClearSelection),
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::DeleteQuestion),

            // Modals
            KeyCode::Char('n') | KeyCode::Char('+') => Some(Action::OpenAddQuestion),
            KeyCode::Char('L') => Some(Action::OpenNotificationLog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),

            KeyCode::Char('R') => Some(Action::ReloadBank),

            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the store snapshot; see draw_bank_screen
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Snapshot and session info needed to draw the bank screen
pub struct BankRenderContext<'a> {
    pub questions: &'a [Question],
    pub current_round: RoundNumber,
    pub round_info: Option<&'a Round>,
    pub teams: &'a [Team],
    pub notification: Option<&'a Notification>,
    pub user: &'a User,
    pub data_file: Option<&'a Path>,
}

/// Draw the question bank screen
pub fn draw_bank_screen(
    frame: &mut Frame,
    area: Rect,
    bank: &mut QuestionBankComponent,
    ctx: &BankRenderContext,
) -> Result<()> {
    let viewing = bank.state.viewing_round();
    let view = RoundView::derive(ctx.questions, viewing);
    let layout = calculate_bank_layout(
        area,
        viewing == ctx.current_round,
        !view.bank.is_empty(),
    );

    render_header(frame, layout.header, ctx.round_info);
    render_tabs(frame, layout.tabs, viewing);
    if let Some(banner) = layout.banner {
        render_banner(frame, banner);
    }
    render_stats(frame, layout.stats, &view, bank.state.selection().len());
    if let Some(controls) = layout.controls {
        render_controls(frame, controls, bank, view.bank.len());
    }
    render_bank_table(frame, layout.bank_table, bank, &view, viewing);
    render_active_table(frame, layout.active_table, bank, &view, viewing, ctx.teams);
    render_status_bar(frame, layout.status, ctx);
    render_help_bar(frame, layout.help, bank);

    Ok(())
}

fn render_header(frame: &mut Frame, area: Rect, round_info: Option<&Round>) {
    let subtitle = match round_info {
        Some(info) => format!("{} · up to {} teams", info.description, info.max_teams),
        None => {
            "Add questions to your library for each round and activate them for the spin wheel"
                .to_string()
        }
    };

    let header = Paragraph::new(Line::from(Span::styled(
        subtitle,
        Style::default().fg(Color::DarkGray),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" Question Bank - Organize by Round ")
            .title_style(
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
    );
    frame.render_widget(header, area);
}

fn render_tabs(frame: &mut Frame, area: Rect, viewing: RoundNumber) {
    let titles: Vec<String> = RoundNumber::all()
        .iter()
        .map(|r| format!("Round {} · {}", r.number(), r.tab_name()))
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::BOTTOM))
        .select(viewing.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn render_banner(frame: &mut Frame, area: Rect) {
    let banner = Paragraph::new(Line::from(Span::styled(
        " ⚡ This is the current active round",
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(banner, area);
}

fn render_stats(frame: &mut Frame, area: Rect, view: &RoundView, selected: usize) {
    let boxes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let stats = [
        ("In Bank", view.bank.len(), Color::Blue),
        ("Active", view.active.len(), Color::Green),
        ("Selected", selected, Color::Magenta),
    ];

    for ((label, count, color), rect) in stats.into_iter().zip(boxes.iter()) {
        let paragraph = Paragraph::new(Line::from(vec![
            Span::styled(format!("{} ", label), Style::default().fg(Color::DarkGray)),
            Span::styled(
                count.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
        frame.render_widget(paragraph, *rect);
    }
}

fn render_controls(frame: &mut Frame, area: Rect, bank: &QuestionBankComponent, bank_len: usize) {
    let selection = bank.state.selection();
    let checkbox = if selection.covers(bank_len) { "[x]" } else { "[ ]" };
    let activate_style = if selection.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", checkbox),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "Select All ({} of {} selected)   ",
            selection.len(),
            bank_len
        )),
        Span::styled(
            format!(" ✓ Activate Selected ({}) ", selection.len()),
            activate_style,
        ),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}

/// Block for a table, highlighted when it has focus
fn table_block(title: String, focused: bool) -> Block<'static> {
    let color = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title)
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}

/// Split the inside of a table block into a header row and the rows
fn table_areas(frame: &mut Frame, area: Rect, block: Block) -> (Rect, Rect) {
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);
    (chunks[0], chunks[1])
}

fn highlight_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn render_empty(frame: &mut Frame, area: Rect, message: String) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        message,
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(ratatui::layout::Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_bank_table(
    frame: &mut Frame,
    area: Rect,
    bank: &mut QuestionBankComponent,
    view: &RoundView,
    viewing: RoundNumber,
) {
    let focused = bank.focus == Pane::Bank;
    let block = table_block(" Questions in Bank ".to_string(), focused);
    let (header_area, rows_area) = table_areas(frame, area, block);

    // "▶ " + "[x] " prefix, then question | description
    let text_width = (rows_area.width as usize).saturating_sub(6);
    let question_width = text_width * 2 / 5;
    let description_width = text_width.saturating_sub(question_width + 3);

    let header = Line::from(Span::styled(
        format!(
            "      {} │ {}",
            fit("Question", question_width),
            fit("Description", description_width)
        ),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(header), header_area);

    if view.bank.is_empty() {
        render_empty(
            frame,
            rows_area,
            format!(
                "No questions in bank for Round {}. Press n to add questions.",
                viewing.number()
            ),
        );
        return;
    }

    let items: Vec<ListItem> = view
        .bank
        .iter()
        .map(|question| {
            let is_selected = bank.state.selection().contains(&question.id);
            let (marker, marker_style) = if is_selected {
                ("[x] ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            } else {
                ("[ ] ", Style::default().fg(Color::DarkGray))
            };
            let text_style = if is_selected {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, marker_style),
                Span::styled(fit(&question.question, question_width), text_style),
                Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    fit(&question.description, description_width),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(highlight_style(focused))
        .highlight_symbol(if focused { "▶ " } else { "  " });

    frame.render_stateful_widget(list, rows_area, &mut bank.bank_list);
}

fn render_active_table(
    frame: &mut Frame,
    area: Rect,
    bank: &mut QuestionBankComponent,
    view: &RoundView,
    viewing: RoundNumber,
    teams: &[Team],
) {
    let focused = bank.focus == Pane::Active;
    let block = table_block(
        " ✓ Active Questions (Available in Spin Wheel) ".to_string(),
        focused,
    );
    let (header_area, rows_area) = table_areas(frame, area, block);

    let status_width = 22;
    let text_width = (rows_area.width as usize).saturating_sub(2 + status_width + 6);
    let question_width = text_width * 2 / 5;
    let description_width = text_width.saturating_sub(question_width);

    let header = Line::from(Span::styled(
        format!(
            "  {} │ {} │ {}",
            fit("Question", question_width),
            fit("Description", description_width),
            fit("Status", status_width)
        ),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(header), header_area);

    if view.active.is_empty() {
        render_empty(
            frame,
            rows_area,
            format!(
                "No active questions for Round {}. Select questions from the bank above and press Enter to activate.",
                viewing.number()
            ),
        );
        return;
    }

    let items: Vec<ListItem> = view
        .active
        .iter()
        .map(|question| {
            let status = match (&question.assigned_to_team_id, question.is_locked) {
                (Some(team_id), true) => {
                    let team = teams
                        .iter()
                        .find(|t| &t.id == team_id)
                        .map(|t| t.name.as_str())
                        .unwrap_or(team_id.as_str());
                    format!("{} → {}", question.status_label(), team)
                }
                _ => question.status_label().to_string(),
            };
            let status_color = if question.is_locked {
                Color::Yellow
            } else {
                Color::Green
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    fit(&question.question, question_width),
                    Style::default().fg(Color::White),
                ),
                Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    fit(&question.description, description_width),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    fit(&status, status_width),
                    Style::default()
                        .fg(status_color)
                        .add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(highlight_style(focused))
        .highlight_symbol(if focused { "▶ " } else { "  " });

    frame.render_stateful_widget(list, rows_area, &mut bank.active_list);
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &BankRenderContext) {
    let spans = if let Some(notification) = ctx.notification {
        let color = match notification.notice.level {
            NoticeLevel::Success => Color::Green,
            NoticeLevel::Warning => Color::Yellow,
            NoticeLevel::Error => Color::Red,
        };
        vec![Span::styled(
            format!(
                " {} {} ",
                notification.notice.level.icon(),
                notification.notice.message
            ),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )]
    } else {
        let mut spans = vec![
            Span::styled(
                format!(" {} ", ctx.user.display_name()),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                format!(
                    " current: Round {} · {} ",
                    ctx.current_round.number(),
                    ctx.current_round.name()
                ),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if let Some(path) = ctx.data_file {
            spans.push(Span::styled(
                format!(" {}", path.display()),
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans
    };

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, bank: &QuestionBankComponent) {
    let key = |k: &'static str, color: Color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };

    let spans = if !bank.state.selection().is_empty() {
        vec![
            key(" Space ", Color::Green),
            Span::raw("Toggle "),
            key(" a ", Color::Green),
            Span::raw("All/None "),
            key(" Enter ", Color::Green),
            Span::raw("Activate "),
            key(" Esc ", Color::Yellow),
            Span::raw("Clear "),
            Span::styled(
                format!("{} selected", bank.state.selection().len()),
                Style::default().fg(Color::Cyan),
            ),
        ]
    } else {
        vec![
            key(" q ", Color::Yellow),
            Span::raw("Quit "),
            key(" Tab/1-3 ", Color::Cyan),
            Span::raw("Round "),
            key(" h/l ", Color::Cyan),
            Span::raw("Table "),
            key(" Space ", Color::Green),
            Span::raw("Select "),
            key(" n ", Color::Green),
            Span::raw("Add "),
            key(" d ", Color::Red),
            Span::raw("Delete "),
            key(" L ", Color::Magenta),
            Span::raw("Log "),
            key(" ? ", Color::White),
            Span::raw("Help"),
        ]
    };

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Flatten whitespace and truncate/pad `text` to exactly `width` columns
pub fn fit(text: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let flat_width = flat.width();
    if flat_width <= width {
        return format!("{}{}", flat, " ".repeat(width - flat_width));
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in flat.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
