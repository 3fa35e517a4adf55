//! Question bank state
//!
//! Round-scoped views over the question list, the batch selection set, and the
//! add/delete/activate requests. The question list is never mutated here: every
//! handler borrows the current snapshot and hands mutations back as
//! [`BankCommand`]s for the owner of the list to apply.

use super::notification::Notice;
use super::question::Question;
use super::round::RoundNumber;

// ═══════════════════════════════════════════════════════════════════════════════
// Round View
// ═══════════════════════════════════════════════════════════════════════════════

/// Bank/active split of one round, in list order
#[derive(Debug, Default)]
pub struct RoundView<'a> {
    pub bank: Vec<&'a Question>,
    pub active: Vec<&'a Question>,
}

impl<'a> RoundView<'a> {
    /// Split the questions of `round` by their active flag
    pub fn derive(questions: &'a [Question], round: RoundNumber) -> Self {
        let mut view = RoundView::default();
        for question in questions.iter().filter(|q| q.in_round(round)) {
            if question.is_active {
                view.active.push(question);
            } else {
                view.bank.push(question);
            }
        }
        view
    }

    pub fn bank_ids(&self) -> Vec<String> {
        self.bank.iter().map(|q| q.id.clone()).collect()
    }

    pub fn is_in_bank(&self, id: &str) -> bool {
        self.bank.iter().any(|q| q.id == id)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Selection
// ═══════════════════════════════════════════════════════════════════════════════

/// Ids marked for batch activation, in the order they were selected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it if present
    pub fn toggle(&mut self, id: &str) {
        if let Some(pos) = self.ids.iter().position(|s| s == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id.to_string());
        }
    }

    /// Switch between "every bank id" and "nothing"
    ///
    /// Clears when the selection is as large as the bank, otherwise replaces
    /// it with exactly `bank_ids`.
    pub fn select_all(&mut self, bank_ids: Vec<String>) {
        if self.ids.len() == bank_ids.len() {
            self.ids.clear();
        } else {
            self.ids = bank_ids;
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.ids.retain(|s| s != id);
    }

    /// Drop every id that is not in the given bank view
    pub fn retain_within(&mut self, view: &RoundView) {
        self.ids.retain(|id| view.is_in_bank(id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether the select-all checkbox shows as checked
    pub fn covers(&self, bank_len: usize) -> bool {
        bank_len > 0 && self.ids.len() == bank_len
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands & Reactions
// ═══════════════════════════════════════════════════════════════════════════════

/// A mutation requested from the owner of the question list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankCommand {
    /// Create a question in the bank of `round`
    Add {
        question: String,
        description: String,
        round: RoundNumber,
    },
    /// Remove the question with this id
    Delete(String),
    /// Mark every listed question active; unknown ids are ignored
    ActivateMany(Vec<String>),
}

/// What a handler produced: at most one command and one notice
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reaction {
    pub command: Option<BankCommand>,
    pub notice: Option<Notice>,
}

impl Reaction {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.command.is_none() && self.notice.is_none()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Add Form
// ═══════════════════════════════════════════════════════════════════════════════

/// Focusable fields of the add-question dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddField {
    Round,
    #[default]
    Question,
    Description,
    Submit,
}

impl AddField {
    pub fn next(self) -> AddField {
        match self {
            AddField::Round => AddField::Question,
            AddField::Question => AddField::Description,
            AddField::Description => AddField::Submit,
            AddField::Submit => AddField::Round,
        }
    }

    pub fn prev(self) -> AddField {
        match self {
            AddField::Round => AddField::Submit,
            AddField::Question => AddField::Round,
            AddField::Description => AddField::Question,
            AddField::Submit => AddField::Description,
        }
    }

    pub fn is_text(self) -> bool {
        matches!(self, AddField::Question | AddField::Description)
    }
}

/// Contents of the add-question dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddQuestionForm {
    pub question: String,
    pub description: String,
    /// Target round, chosen independently of the viewing round
    pub round: RoundNumber,
}

impl AddQuestionForm {
    pub fn new(round: RoundNumber) -> Self {
        Self {
            question: String::new(),
            description: String::new(),
            round,
        }
    }

    pub fn field_mut(&mut self, field: AddField) -> Option<&mut String> {
        match field {
            AddField::Question => Some(&mut self.question),
            AddField::Description => Some(&mut self.description),
            AddField::Round | AddField::Submit => None,
        }
    }

    pub fn input(&mut self, field: AddField, c: char) {
        // The question is a single line
        if c == '\n' && field == AddField::Question {
            return;
        }
        if let Some(text) = self.field_mut(field) {
            text.push(c);
        }
    }

    pub fn backspace(&mut self, field: AddField) {
        if let Some(text) = self.field_mut(field) {
            text.pop();
        }
    }

    /// Trimmed question and description, if both are non-empty
    pub fn trimmed(&self) -> Option<(String, String)> {
        let question = self.question.trim();
        let description = self.description.trim();
        if question.is_empty() || description.is_empty() {
            return None;
        }
        Some((question.to_string(), description.to_string()))
    }

    /// Clear both text fields, keeping the chosen round
    pub fn clear_text(&mut self) {
        self.question.clear();
        self.description.clear();
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Bank State
// ═══════════════════════════════════════════════════════════════════════════════

/// Local state of the question bank panel
#[derive(Debug, Clone)]
pub struct QuestionBankState {
    viewing_round: RoundNumber,
    selection: Selection,
    add_dialog_open: bool,
    pub form: AddQuestionForm,
}

impl QuestionBankState {
    /// Start on the global current round, which is also the default add target
    pub fn new(current_round: RoundNumber) -> Self {
        Self {
            viewing_round: current_round,
            selection: Selection::new(),
            add_dialog_open: false,
            form: AddQuestionForm::new(current_round),
        }
    }

    pub fn viewing_round(&self) -> RoundNumber {
        self.viewing_round
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn view<'a>(&self, questions: &'a [Question]) -> RoundView<'a> {
        RoundView::derive(questions, self.viewing_round)
    }

    /// Show another round. Always clears the selection.
    pub fn set_viewing_round(&mut self, round: RoundNumber) {
        self.viewing_round = round;
        self.selection.clear();
    }

    pub fn toggle(&mut self, id: &str) {
        self.selection.toggle(id);
    }

    pub fn select_all(&mut self, questions: &[Question]) {
        let bank_ids = self.view(questions).bank_ids();
        self.selection.select_all(bank_ids);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Intersect the selection with the bank of a fresh snapshot
    pub fn reconcile(&mut self, questions: &[Question]) {
        let view = RoundView::derive(questions, self.viewing_round);
        self.selection.retain_within(&view);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Add dialog
    // ─────────────────────────────────────────────────────────────────────────

    pub fn open_add_dialog(&mut self) {
        self.add_dialog_open = true;
    }

    /// Close without submitting. Typed text is kept.
    pub fn close_add_dialog(&mut self) {
        self.add_dialog_open = false;
    }

    pub fn is_add_dialog_open(&self) -> bool {
        self.add_dialog_open
    }

    /// Validate the form and request a new question
    ///
    /// Blank question or description is a silent no-op.
    pub fn submit_add(&mut self) -> Reaction {
        let Some((question, description)) = self.form.trimmed() else {
            return Reaction::none();
        };
        let round = self.form.round;

        self.form.clear_text();
        self.add_dialog_open = false;

        Reaction {
            command: Some(BankCommand::Add {
                question,
                description,
                round,
            }),
            notice: Some(Notice::success(format!(
                "Question added to {} bank successfully!",
                round.name()
            ))),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Delete / Activate
    // ─────────────────────────────────────────────────────────────────────────

    /// Request removal of a question from either table
    pub fn request_delete(&mut self, id: &str) -> Reaction {
        self.selection.remove(id);
        Reaction {
            command: Some(BankCommand::Delete(id.to_string())),
            notice: None,
        }
    }

    /// Promote every selected bank question in one batch
    pub fn activate_selected(&mut self) -> Reaction {
        if self.selection.is_empty() {
            return Reaction {
                command: None,
                notice: Some(Notice::warning(
                    "Please select at least one question to activate",
                )),
            };
        }

        let ids = self.selection.ids().to_vec();
        let count = ids.len();
        self.selection.clear();

        Reaction {
            command: Some(BankCommand::ActivateMany(ids)),
            notice: Some(Notice::success(format!(
                "{} question(s) activated for the spin wheel!",
                count
            ))),
        }
    }
}
