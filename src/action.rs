//! Action enum - everything the panel can be asked to do
//!
//! Key events are mapped to Actions by the focused component; the App
//! processes them against the question store snapshot.

use crate::model::{AddField, RoundNumber};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick, expires notifications
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    NextItem,
    PrevItem,
    FirstItem,
    LastItem,
    /// Show the next round tab
    NextRound,
    /// Show the previous round tab
    PrevRound,
    /// Show a specific round tab
    ViewRound(RoundNumber),
    /// Move focus between the bank and active tables
    SwitchPane,

    // ─────────────────────────────────────────────────────────────────────────
    // Selection & Activation
    // ─────────────────────────────────────────────────────────────────────────
    /// Toggle the focused bank question
    ToggleSelection,
    /// Select every bank question, or none
    SelectAll,
    ClearSelection,
    /// Move every selected question onto the spin wheel
    ActivateSelected,
    /// Delete the focused question
    DeleteQuestion,

    // ─────────────────────────────────────────────────────────────────────────
    // Add Question
    // ─────────────────────────────────────────────────────────────────────────
    OpenAddQuestion,
    FormInput(AddField, char),
    FormBackspace(AddField),
    NextAddRound,
    PrevAddRound,
    SetAddRound(RoundNumber),
    SubmitAddQuestion,

    // ─────────────────────────────────────────────────────────────────────────
    // Store
    // ─────────────────────────────────────────────────────────────────────────
    /// Re-read the data file
    ReloadBank,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHelp,
    OpenNotificationLog,
    CloseModal,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::NextRound => write!(f, "NextRound"),
            Action::PrevRound => write!(f, "PrevRound"),
            Action::ViewRound(round) => write!(f, "ViewRound({})", round),
            Action::SwitchPane => write!(f, "SwitchPane"),
            Action::ToggleSelection => write!(f, "ToggleSelection"),
            Action::SelectAll => write!(f, "SelectAll"),
            Action::ClearSelection => write!(f, "ClearSelection"),
            Action::ActivateSelected => write!(f, "ActivateSelected"),
            Action::DeleteQuestion => write!(f, "DeleteQuestion"),
            Action::OpenAddQuestion => write!(f, "OpenAddQuestion"),
            Action::FormInput(field, c) => write!(f, "FormInput({:?}, {:?})", field, c),
            Action::FormBackspace(field) => write!(f, "FormBackspace({:?})", field),
            Action::NextAddRound => write!(f, "NextAddRound"),
            Action::PrevAddRound => write!(f, "PrevAddRound"),
            Action::SetAddRound(round) => write!(f, "SetAddRound({})", round),
            Action::SubmitAddQuestion => write!(f, "SubmitAddQuestion"),
            Action::ReloadBank => write!(f, "ReloadBank"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenNotificationLog => write!(f, "OpenNotificationLog"),
            Action::CloseModal => write!(f, "CloseModal"),
        }
    }
}
