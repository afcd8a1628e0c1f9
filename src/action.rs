//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use crate::model::{FormKind, NotificationKind, Section};
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for timers and polling
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Leave the application
    Quit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Open or close the navigation menu
    ToggleMenu,
    /// Jump to a section and close the menu
    NavigateTo(Section),
    /// Jump to the section after the active one
    NextSection,
    /// Jump to the section before the active one
    PrevSection,
    /// Focus the next card
    NextItem,
    /// Focus the previous card
    PrevItem,
    /// Focus the first card
    FirstItem,
    /// Focus the last card
    LastItem,

    // ─────────────────────────────────────────────────────────────────────────
    // Scrolling
    // ─────────────────────────────────────────────────────────────────────────
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Modal
    // ─────────────────────────────────────────────────────────────────────────
    /// Show a form in the shared dialog
    OpenForm(FormKind),
    /// Hide the dialog
    CloseModal,
    /// Submit the form currently shown
    SubmitForm(FormKind),

    // ─────────────────────────────────────────────────────────────────────────
    // Page Interactions
    // ─────────────────────────────────────────────────────────────────────────
    /// Primary action of the focused card (enroll, view profile, view replies)
    ActivateItem,
    /// Like or unlike the focused post
    LikePost,
    /// Load the next page of community posts
    NextPostsPage,
    /// Switch to the next community category
    CycleCategory,

    // ─────────────────────────────────────────────────────────────────────────
    // Notifications
    // ─────────────────────────────────────────────────────────────────────────
    /// Show a toast
    Notify(String, NotificationKind),
    /// Remove the newest toast immediately
    DismissLatestNotification,
    /// Remove every toast immediately
    DismissNotifications,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::Quit => write!(f, "Quit"),
            Action::ToggleMenu => write!(f, "ToggleMenu"),
            Action::NavigateTo(section) => write!(f, "NavigateTo({})", section.title()),
            Action::NextSection => write!(f, "NextSection"),
            Action::PrevSection => write!(f, "PrevSection"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::PageUp => write!(f, "PageUp"),
            Action::PageDown => write!(f, "PageDown"),
            Action::OpenForm(kind) => write!(f, "OpenForm({})", kind),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::SubmitForm(kind) => write!(f, "SubmitForm({})", kind),
            Action::ActivateItem => write!(f, "ActivateItem"),
            Action::LikePost => write!(f, "LikePost"),
            Action::NextPostsPage => write!(f, "NextPostsPage"),
            Action::CycleCategory => write!(f, "CycleCategory"),
            Action::Notify(message, kind) => write!(f, "Notify({:?}, {})", kind, message),
            Action::DismissLatestNotification => write!(f, "DismissLatestNotification"),
            Action::DismissNotifications => write!(f, "DismissNotifications"),
        }
    }
}

impl Action {
    /// Whether the action moves the page, which a showing form suppresses
    pub fn is_scroll(&self) -> bool {
        matches!(
            self,
            Action::ScrollUp
                | Action::ScrollDown
                | Action::PageUp
                | Action::PageDown
                | Action::NextItem
                | Action::PrevItem
                | Action::FirstItem
                | Action::LastItem
                | Action::NextSection
                | Action::PrevSection
                | Action::NavigateTo(_)
        )
    }
}
