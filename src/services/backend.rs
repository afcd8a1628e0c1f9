//! Backend collaborator interface
//!
//! Every data-producing operation of the landing page is expressed as a
//! `Request` handed to a `Backend`. The UI never talks to a concrete service,
//! which keeps it testable against doubles and the simulated backend alike.

use crate::model::catalog::{CommunityPost, Course, CourseLevel, Mentor, Reply};
use crate::model::modal::FormKind;
use crate::model::notification::NotificationKind;
use chrono::{DateTime, Local};
use std::collections::BTreeMap;

/// Field values read from a submitted form, keyed by field id
pub type FormValues = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilters {
    pub category: Option<String>,
    pub level: Option<CourseLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentorQuery {
    pub search: String,
    pub expertise: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub cohort_year: String,
    pub password: String,
}

/// An operation the UI asks the backend to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Authenticate { email: String, password: String },
    Register(Registration),
    SubmitQuiz { responses: FormValues },
    EnrollInCourse { course_id: String },
    FetchMentorProfile { mentor_id: String },
    ToggleLike { post_id: String },
    FetchReplies { post_id: String },
    FetchDashboard,
    FetchCourses(CourseFilters),
    FetchMentors(MentorQuery),
    FetchCommunityPosts { category: String, page: usize },
}

impl Request {
    /// Build the request a submitted form stands for
    pub fn from_form(kind: FormKind, values: &FormValues) -> Request {
        let field = |key: &str| values.get(key).cloned().unwrap_or_default();
        match kind {
            FormKind::Login => Request::Authenticate {
                email: field("email"),
                password: field("password"),
            },
            FormKind::Register => Request::Register(Registration {
                name: field("name"),
                email: field("email"),
                cohort_year: field("year"),
                password: field("password"),
            }),
            FormKind::Quiz => Request::SubmitQuiz {
                responses: values.clone(),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Request::Authenticate { .. } => "authenticate",
            Request::Register(_) => "register",
            Request::SubmitQuiz { .. } => "submit_quiz",
            Request::EnrollInCourse { .. } => "enroll_in_course",
            Request::FetchMentorProfile { .. } => "fetch_mentor_profile",
            Request::ToggleLike { .. } => "toggle_like",
            Request::FetchReplies { .. } => "fetch_replies",
            Request::FetchDashboard => "fetch_dashboard",
            Request::FetchCourses(_) => "fetch_courses",
            Request::FetchMentors(_) => "fetch_mentors",
            Request::FetchCommunityPosts { .. } => "fetch_community_posts",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub email: String,
    pub display_name: String,
    pub token: String,
    pub issued_at: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub track: String,
    pub course_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub member: String,
    pub enrolled_courses: Vec<Course>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostPage {
    pub category: String,
    pub page: usize,
    pub total_pages: usize,
    pub posts: Vec<CommunityPost>,
}

/// A successful backend response
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    LoggedIn(Session),
    Registered { email: String },
    QuizResult(Recommendation),
    Enrolled { course_id: String, title: String },
    MentorProfile(Mentor),
    LikeToggled { post_id: String, likes: u32, liked: bool },
    Replies { post_id: String, replies: Vec<Reply> },
    Dashboard(Dashboard),
    Courses(Vec<Course>),
    Mentors(Vec<Mentor>),
    CommunityPosts(PostPage),
}

/// Why a request failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Please log in first")]
    Unauthorized,
    #[error("{what} not found: {id}")]
    NotFound { what: &'static str, id: String },
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// Message and style surfaced to the user for a finished request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFeedback {
    pub message: String,
    pub kind: NotificationKind,
}

impl UserFeedback {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn error(err: &BackendError) -> Self {
        Self {
            message: err.to_string(),
            kind: NotificationKind::Error,
        }
    }
}

impl Outcome {
    /// Toast to show when this outcome arrives, if any
    pub fn feedback(&self) -> Option<UserFeedback> {
        match self {
            Outcome::LoggedIn(_) => Some(UserFeedback::success("Login successful! Welcome back.")),
            Outcome::Registered { .. } => Some(UserFeedback::success(
                "Registration successful! Please check your email.",
            )),
            Outcome::QuizResult(_) => Some(UserFeedback::success(
                "Quiz completed! Generating your personalized roadmap...",
            )),
            _ => None,
        }
    }
}

/// Something that can fulfil landing page requests
///
/// Implementations are called from worker threads.
pub trait Backend: Send + Sync {
    fn submit(&self, request: Request) -> Result<Outcome, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_login_form_builds_authenticate() {
        let request = Request::from_form(
            FormKind::Login,
            &values(&[("email", "a@b.c"), ("password", "pw")]),
        );
        assert_eq!(
            request,
            Request::Authenticate {
                email: "a@b.c".to_string(),
                password: "pw".to_string()
            }
        );
    }

    #[test]
    fn test_register_form_missing_fields_are_empty() {
        let request = Request::from_form(FormKind::Register, &values(&[("name", "Ada")]));
        match request {
            Request::Register(r) => {
                assert_eq!(r.name, "Ada");
                assert_eq!(r.email, "");
                assert_eq!(r.cohort_year, "");
            }
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn test_quiz_form_passes_all_responses() {
        let responses = values(&[("interest", "Data Science"), ("experience", "Beginner")]);
        let request = Request::from_form(FormKind::Quiz, &responses);
        assert_eq!(request, Request::SubmitQuiz { responses });
    }

    #[test]
    fn test_feedback_for_submissions() {
        let feedback = Outcome::Registered {
            email: "a@b.c".to_string(),
        }
        .feedback()
        .unwrap();
        assert_eq!(feedback.kind, NotificationKind::Success);
        assert!(feedback.message.starts_with("Registration successful"));

        assert!(Outcome::Courses(Vec::new()).feedback().is_none());
    }

    #[test]
    fn test_error_feedback_uses_display_text() {
        let feedback = UserFeedback::error(&BackendError::NotFound {
            what: "course",
            id: "x-1".to_string(),
        });
        assert_eq!(feedback.kind, NotificationKind::Error);
        assert_eq!(feedback.message, "course not found: x-1");
    }
}
