//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! App owns the question store: components hand back [`Reaction`]s and the
//! App applies their commands, persists the result and raises the notices.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_bank_screen, AddQuestionDialog, BankRenderContext, HelpDialog, NotificationLogDialog,
    QuestionBankComponent, QuitDialog,
};
use crate::config::Config;
use crate::model::modal::{Modal, ModalStack};
use crate::model::{Notice, NotificationLog, Reaction};
use crate::services::QuestionStore;
use anyhow::Result;
use chrono::Local;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Persistent questions, teams and the current round
    pub store: QuestionStore,

    pub config: Config,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Every notice raised this session, newest first
    pub notifications: NotificationLog,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub bank: QuestionBankComponent,
    pub add_dialog: AddQuestionDialog,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
    pub notification_log: NotificationLogDialog,
}

impl App {
    pub fn new(config: Config, store: QuestionStore) -> App {
        let mut bank = QuestionBankComponent::new(store.current_round());
        bank.sync(store.questions());

        App {
            store,
            config,
            modals: ModalStack::new(),
            notifications: NotificationLog::new(),
            should_quit: false,
            bank,
            add_dialog: AddQuestionDialog::new(),
            quit_dialog: QuitDialog::default(),
            help_dialog: HelpDialog::default(),
            notification_log: NotificationLogDialog::default(),
        }
    }

    /// Apply a reaction: run its command against the store, persist, notify
    fn dispatch(&mut self, reaction: Reaction) {
        if reaction.is_none() {
            return;
        }
        let saved = match &reaction.command {
            Some(command) => {
                self.store.apply(command);
                self.store.save()
            }
            None => Ok(()),
        };
        if let Some(notice) = reaction.notice {
            self.notifications.push(notice);
        }
        // Raised last so the status bar shows the failure
        if let Err(e) = saved {
            tracing::error!(error = ?e, "failed to save question bank");
            self.notifications
                .push(Notice::error(format!("Could not save changes: {}", e)));
        }
        self.bank.sync(self.store.questions());
    }

    fn reload(&mut self) {
        match self.store.reload() {
            Ok(()) => self
                .notifications
                .push(Notice::success("Question bank reloaded")),
            Err(e) => {
                tracing::error!(error = ?e, "failed to reload question bank");
                self.notifications
                    .push(Notice::error(format!("Reload failed: {}", e)));
            }
        }
        self.bank.sync(self.store.questions());
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.bank.init()?;
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.modals.top().copied() {
            Some(Modal::QuitConfirm) => self.quit_dialog.handle_key_event(key),
            Some(Modal::AddQuestion) => self.add_dialog.handle_key_event(key),
            Some(Modal::Help) => self.help_dialog.handle_key_event(key),
            Some(Modal::NotificationLog) => self.notification_log.handle_key_event(key),
            None => self.bank.handle_key_event(key),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let questions = self.store.questions();
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick | Action::Resize(_, _) => {}
            Action::ForceQuit => {
                tracing::info!("quitting");
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::NextItem => self.bank.next(questions),
            Action::PrevItem => self.bank.previous(questions),
            Action::FirstItem => self.bank.select_first(questions),
            Action::LastItem => self.bank.select_last(questions),
            Action::SwitchPane => self.bank.switch_pane(questions),
            Action::NextRound => {
                let round = self.bank.state.viewing_round().next();
                self.bank.switch_round(round, questions);
            }
            Action::PrevRound => {
                let round = self.bank.state.viewing_round().prev();
                self.bank.switch_round(round, questions);
            }
            Action::ViewRound(round) => self.bank.switch_round(round, questions),

            // ─────────────────────────────────────────────────────────────────
            // Selection & Activation
            // ─────────────────────────────────────────────────────────────────
            Action::ToggleSelection => self.bank.toggle_focused(questions),
            Action::SelectAll => self.bank.state.select_all(questions),
            Action::ClearSelection => self.bank.state.clear_selection(),
            Action::ActivateSelected => {
                let reaction = self.bank.state.activate_selected();
                self.dispatch(reaction);
            }
            Action::DeleteQuestion => {
                let reaction = self.bank.delete_focused(questions);
                self.dispatch(reaction);
            }

            // ─────────────────────────────────────────────────────────────────
            // Add Question
            // ─────────────────────────────────────────────────────────────────
            Action::OpenAddQuestion => {
                if self.modals.contains(Modal::AddQuestion) {
                    return Ok(None);
                }
                self.bank.state.open_add_dialog();
                self.add_dialog.reset_focus();
                self.modals.push(Modal::AddQuestion);
            }
            Action::FormInput(field, c) => self.bank.state.form.input(field, c),
            Action::FormBackspace(field) => self.bank.state.form.backspace(field),
            Action::NextAddRound => {
                self.bank.state.form.round = self.bank.state.form.round.next();
            }
            Action::PrevAddRound => {
                self.bank.state.form.round = self.bank.state.form.round.prev();
            }
            Action::SetAddRound(round) => self.bank.state.form.round = round,
            Action::SubmitAddQuestion => {
                let reaction = self.bank.state.submit_add();
                self.dispatch(reaction);
                if !self.bank.state.is_add_dialog_open() {
                    self.modals.remove(Modal::AddQuestion);
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Store
            // ─────────────────────────────────────────────────────────────────
            Action::ReloadBank => self.reload(),

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.quit_dialog.pending_selection = self.bank.state.selection().len();
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::OpenNotificationLog => {
                self.notification_log.reset();
                self.modals.push(Modal::NotificationLog);
            }
            Action::CloseModal => {
                if self.modals.top() == Some(&Modal::AddQuestion) {
                    self.bank.state.close_add_dialog();
                }
                self.modals.pop();
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let current_round = self.store.current_round();
        let ctx = BankRenderContext {
            questions: self.store.questions(),
            current_round,
            round_info: self.store.round_info(self.bank.state.viewing_round()),
            teams: self.store.teams(),
            notification: self
                .notifications
                .current(Local::now(), self.config.notification_ttl()),
            user: &self.config.user,
            data_file: self.store.path(),
        };

        draw_bank_screen(frame, area, &mut self.bank, &ctx)?;

        // Draw modal overlay if active
        if let Some(modal) = self.modals.top().copied() {
            self.draw_modal(frame, area, modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::AddQuestion => {
                self.add_dialog
                    .draw_with_form(frame, area, &self.bank.state.form)?;
            }
            Modal::Help => self.help_dialog.draw(frame, area)?,
            Modal::NotificationLog => {
                self.notification_log
                    .draw_with_log(frame, area, &self.notifications)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AddField, NoticeLevel, Question, RoundNumber};
    use crate::services::store::BankData;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn question(id: &str, round: u8, is_active: bool) -> Question {
        Question {
            id: id.to_string(),
            round,
            question: format!("Question {}", id),
            description: format!("Description {}", id),
            is_locked: false,
            assigned_to_team_id: None,
            is_active,
        }
    }

    fn app_with(questions: Vec<Question>) -> App {
        let store = QuestionStore::in_memory(BankData {
            current_round: RoundNumber::One,
            questions,
            ..BankData::default()
        });
        App::new(Config::default(), store)
    }

    fn press(app: &mut App, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        let mut action = app.handle_key_event(key).unwrap();
        while let Some(a) = action {
            action = app.update(a).unwrap();
        }
    }

    fn active_ids(app: &App) -> Vec<&str> {
        app.store
            .questions()
            .iter()
            .filter(|q| q.is_active)
            .map(|q| q.id.as_str())
            .collect()
    }

    fn render(app: &mut App) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                app.draw(frame, area).unwrap();
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_select_and_activate() {
        let mut app = app_with(vec![
            question("q1", 1, false),
            question("q2", 1, false),
            question("q3", 2, false),
        ]);

        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.bank.state.selection().len(), 2);

        press(&mut app, KeyCode::Enter);
        assert_eq!(active_ids(&app), vec!["q1", "q2"]);
        assert!(app.bank.state.selection().is_empty());
        assert_eq!(
            app.notifications.entries()[0].notice.message,
            "2 question(s) activated for the spin wheel!"
        );
    }

    #[test]
    fn test_activate_without_selection_warns() {
        let mut app = app_with(vec![question("q1", 1, false)]);
        press(&mut app, KeyCode::Enter);

        assert!(active_ids(&app).is_empty());
        let latest = &app.notifications.entries()[0].notice;
        assert_eq!(latest.level, NoticeLevel::Warning);
        assert_eq!(latest.message, "Please select at least one question to activate");
    }

    #[test]
    fn test_add_question_through_dialog() {
        let mut app = app_with(Vec::new());
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.modals.top(), Some(&Modal::AddQuestion));

        for c in "Why?".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Tab);
        for c in "Explain".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        app.update(Action::SubmitAddQuestion).unwrap();

        assert!(app.modals.top().is_none());
        let questions = app.store.questions();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "Why?");
        assert_eq!(questions[0].description, "Explain");
        assert!(!questions[0].is_active);
        assert_eq!(
            app.notifications.entries()[0].notice.message,
            "Question added to Style Battle bank successfully!"
        );
    }

    #[test]
    fn test_blank_submit_keeps_dialog_open() {
        let mut app = app_with(Vec::new());
        app.update(Action::OpenAddQuestion).unwrap();
        app.update(Action::FormInput(AddField::Question, ' ')).unwrap();
        app.update(Action::SubmitAddQuestion).unwrap();

        assert_eq!(app.modals.top(), Some(&Modal::AddQuestion));
        assert!(app.store.questions().is_empty());
        assert!(app.notifications.is_empty());
    }

    #[test]
    fn test_close_dialog_keeps_text() {
        let mut app = app_with(Vec::new());
        app.update(Action::OpenAddQuestion).unwrap();
        app.update(Action::FormInput(AddField::Question, 'Q')).unwrap();
        app.update(Action::CloseModal).unwrap();

        assert!(!app.bank.state.is_add_dialog_open());
        assert!(app.modals.top().is_none());
        assert_eq!(app.bank.state.form.question, "Q");
    }

    #[test]
    fn test_delete_drops_from_selection() {
        let mut app = app_with(vec![question("q1", 1, false), question("q2", 1, false)]);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.bank.state.selection().len(), 2);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.store.questions().len(), 1);
        assert_eq!(app.bank.state.selection().ids(), ["q2".to_string()]);
    }

    #[test]
    fn test_switching_round_clears_selection() {
        let mut app = app_with(vec![question("q1", 1, false), question("q3", 2, false)]);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Tab);

        assert_eq!(app.bank.state.viewing_round(), RoundNumber::Two);
        assert!(app.bank.state.selection().is_empty());
    }

    #[test]
    fn test_failed_save_keeps_change_and_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let store = QuestionStore::open(blocker.join("bank.json")).unwrap();
        let mut app = App::new(Config::default(), store);

        app.update(Action::OpenAddQuestion).unwrap();
        app.update(Action::FormInput(AddField::Question, 'Q')).unwrap();
        app.update(Action::FormInput(AddField::Description, 'D')).unwrap();
        app.update(Action::SubmitAddQuestion).unwrap();

        assert_eq!(app.store.questions().len(), 1);
        assert!(!app.should_quit);
        let latest = &app.notifications.entries()[0].notice;
        assert_eq!(latest.level, NoticeLevel::Error);
        assert!(latest.message.starts_with("Could not save changes"));
        assert_eq!(app.notifications.entries()[1].notice.level, NoticeLevel::Success);
    }

    #[test]
    fn test_quit_flow() {
        let mut app = app_with(Vec::new());
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.modals.top(), Some(&Modal::QuitConfirm));
        press(&mut app, KeyCode::Esc);
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_shows_tabs_and_empty_states() {
        let mut app = app_with(vec![question("q1", 2, false)]);
        let screen = render(&mut app);

        assert!(screen.contains("Style Battle"));
        assert!(screen.contains("Grand Showdown"));
        assert!(screen.contains("current active round"));
        assert!(screen.contains("No questions in bank for Round 1."));
    }

    #[test]
    fn test_render_dialog_overlay() {
        let mut app = app_with(Vec::new());
        app.update(Action::OpenAddQuestion).unwrap();
        let screen = render(&mut app);
        assert!(screen.contains("Add Question to Bank"));
    }
}
