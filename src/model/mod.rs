//! Model layer - state with no terminal dependencies
//!
//! - `bank` - round views, selection set, add/delete/activate requests
//! - `question` / `round` - shared entity shapes
//! - `notification` - user-visible notices
//! - `modal` - overlay stack

pub mod bank;
pub mod modal;
pub mod notification;
pub mod question;
pub mod round;

pub use bank::{AddField, AddQuestionForm, BankCommand, QuestionBankState, Reaction, RoundView};
pub use notification::{Notice, NoticeLevel, Notification, NotificationLog};
pub use question::{Question, Round, Team, User};
pub use round::RoundNumber;
