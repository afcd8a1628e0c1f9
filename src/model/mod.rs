//! Model layer - centralized state
//!
//! This module contains the state-related types:
//! - `DomainState` - Data received from the backend
//! - `ModalState` / `FormKind` - Which form the shared dialog shows
//! - `Notification` - Toast lifecycle and timing
//! - `Section` - Landing page sections and scroll highlighting
//! - `Catalog` - Courses, mentors, posts and quiz questions

pub mod catalog;
pub mod domain;
pub mod modal;
pub mod notification;
pub mod page;

pub use catalog::{Catalog, QuizQuestion};
pub use domain::DomainState;
pub use modal::{FormKind, ModalState};
pub use notification::{Notification, NotificationId, NotificationKind, NotificationTiming};
pub use page::Section;
