//! Backend collaborators
//!
//! This module contains the seam between the UI and whatever fulfils its
//! requests:
//! - The `Backend` trait with its request and outcome types
//! - The simulated, catalog-backed implementation
//! - The background runner that keeps requests off the UI thread

pub mod backend;
pub mod request_runner;
pub mod simulated;

pub use backend::{
    Backend, CourseFilters, FormValues, MentorQuery, Outcome, Request, UserFeedback,
};
pub use request_runner::{Completed, RequestRunner};
pub use simulated::SimulatedBackend;
