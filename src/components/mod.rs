//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod form_dialog;
pub mod header;
pub mod layout;
pub mod modal;
pub mod notifications;
pub mod page;

pub use header::{draw_header, draw_help_bar, nav_link_at};
pub use layout::calculate_main_layout;
pub use modal::ModalController;
pub use notifications::NotificationPresenter;
pub use page::{PageComponent, PageItem};
