//! UI Components
//!
//! Each component maps keys to Actions and renders itself. Components never
//! touch the question store directly.

pub mod add_question_dialog;
pub mod bank;
pub mod help_dialog;
pub mod layout;
pub mod notification_log;
pub mod quit_dialog;

pub use add_question_dialog::AddQuestionDialog;
pub use bank::{draw_bank_screen, BankRenderContext, QuestionBankComponent};
pub use help_dialog::HelpDialog;
pub use layout::{calculate_bank_layout, centered_popup};
pub use notification_log::NotificationLogDialog;
pub use quit_dialog::QuitDialog;
