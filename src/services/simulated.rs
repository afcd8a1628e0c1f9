//! In-process backend used until a real API exists
//!
//! Serves the bundled catalog and accepts every submission. Each request is
//! logged as the intent a real service would receive.

use super::backend::{
    Backend, BackendError, CourseFilters, Dashboard, FormValues, MentorQuery, Outcome, PostPage,
    Recommendation, Registration, Request, Session,
};
use crate::model::catalog::{Catalog, Course, CourseLevel, Mentor};
use chrono::Local;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Community posts per page
pub const POSTS_PER_PAGE: usize = 3;

#[derive(Debug, Default)]
struct SimulatedState {
    session: Option<Session>,
    enrolled: Vec<String>,
    liked: HashSet<String>,
}

pub struct SimulatedBackend {
    catalog: Catalog,
    latency: Duration,
    state: Mutex<SimulatedState>,
}

impl SimulatedBackend {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            latency: Duration::ZERO,
            state: Mutex::new(SimulatedState::default()),
        }
    }

    /// Delay every response to mimic a network round trip
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn state(&self) -> Result<MutexGuard<'_, SimulatedState>, BackendError> {
        self.state
            .lock()
            .map_err(|_| BackendError::Unavailable("simulated state is poisoned".to_string()))
    }

    fn authenticate(&self, email: String) -> Result<Outcome, BackendError> {
        info!(%email, "login attempt");
        let display_name = email
            .split('@')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("member")
            .to_string();
        let issued_at = Local::now();
        let session = Session {
            token: format!("sim-{}", issued_at.timestamp_millis()),
            email,
            display_name,
            issued_at,
        };
        self.state()?.session = Some(session.clone());
        Ok(Outcome::LoggedIn(session))
    }

    fn register(&self, registration: Registration) -> Result<Outcome, BackendError> {
        info!(
            name = %registration.name,
            email = %registration.email,
            cohort_year = %registration.cohort_year,
            "registration attempt"
        );
        Ok(Outcome::Registered {
            email: registration.email,
        })
    }

    fn submit_quiz(&self, responses: &FormValues) -> Result<Outcome, BackendError> {
        info!(?responses, "quiz submission");
        Ok(Outcome::QuizResult(recommend(&self.catalog.courses, responses)))
    }

    fn enroll(&self, course_id: String) -> Result<Outcome, BackendError> {
        let course = self
            .catalog
            .course(&course_id)
            .ok_or_else(|| BackendError::NotFound {
                what: "course",
                id: course_id.clone(),
            })?;
        info!(course = %course.title, "enrolling in course");

        let mut state = self.state()?;
        if !state.enrolled.contains(&course_id) {
            state.enrolled.push(course_id.clone());
        }
        Ok(Outcome::Enrolled {
            course_id,
            title: course.title.clone(),
        })
    }

    fn mentor_profile(&self, mentor_id: &str) -> Result<Outcome, BackendError> {
        info!(mentor_id, "viewing mentor profile");
        self.catalog
            .mentor(mentor_id)
            .cloned()
            .map(Outcome::MentorProfile)
            .ok_or_else(|| BackendError::NotFound {
                what: "mentor",
                id: mentor_id.to_string(),
            })
    }

    fn toggle_like(&self, post_id: String) -> Result<Outcome, BackendError> {
        let post = self.catalog.post(&post_id).ok_or_else(|| BackendError::NotFound {
            what: "post",
            id: post_id.clone(),
        })?;
        info!(post = %post.title, "community action: like");

        let mut state = self.state()?;
        let liked = if state.liked.remove(&post_id) {
            false
        } else {
            state.liked.insert(post_id.clone());
            true
        };
        let likes = post.likes + u32::from(liked);
        Ok(Outcome::LikeToggled {
            post_id,
            likes,
            liked,
        })
    }

    fn replies(&self, post_id: String) -> Result<Outcome, BackendError> {
        let post = self.catalog.post(&post_id).ok_or_else(|| BackendError::NotFound {
            what: "post",
            id: post_id.clone(),
        })?;
        info!(post = %post.title, "community action: view replies");
        Ok(Outcome::Replies {
            replies: post.replies.clone(),
            post_id,
        })
    }

    fn dashboard(&self) -> Result<Outcome, BackendError> {
        debug!("fetching dashboard data");
        let state = self.state()?;
        let session = state.session.as_ref().ok_or(BackendError::Unauthorized)?;
        let enrolled_courses = state
            .enrolled
            .iter()
            .filter_map(|id| self.catalog.course(id).cloned())
            .collect();
        Ok(Outcome::Dashboard(Dashboard {
            member: session.display_name.clone(),
            enrolled_courses,
        }))
    }

    fn courses(&self, filters: &CourseFilters) -> Result<Outcome, BackendError> {
        debug!(?filters, "fetching courses");
        Ok(Outcome::Courses(filter_courses(&self.catalog.courses, filters)))
    }

    fn mentors(&self, query: &MentorQuery) -> Result<Outcome, BackendError> {
        debug!(?query, "fetching mentors");
        Ok(Outcome::Mentors(filter_mentors(&self.catalog.mentors, query)))
    }

    fn community_posts(&self, category: String, page: usize) -> Result<Outcome, BackendError> {
        debug!(%category, page, "fetching community posts");
        let matching: Vec<_> = self
            .catalog
            .posts
            .iter()
            .filter(|p| category == "all" || p.category == category)
            .collect();

        let total_pages = matching.len().div_ceil(POSTS_PER_PAGE).max(1);
        let page = page.clamp(1, total_pages);
        let posts = matching
            .into_iter()
            .skip((page - 1) * POSTS_PER_PAGE)
            .take(POSTS_PER_PAGE)
            .cloned()
            .collect();

        Ok(Outcome::CommunityPosts(PostPage {
            category,
            page,
            total_pages,
            posts,
        }))
    }
}

impl Backend for SimulatedBackend {
    fn submit(&self, request: Request) -> Result<Outcome, BackendError> {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }

        match request {
            Request::Authenticate { email, .. } => self.authenticate(email),
            Request::Register(registration) => self.register(registration),
            Request::SubmitQuiz { responses } => self.submit_quiz(&responses),
            Request::EnrollInCourse { course_id } => self.enroll(course_id),
            Request::FetchMentorProfile { mentor_id } => self.mentor_profile(&mentor_id),
            Request::ToggleLike { post_id } => self.toggle_like(post_id),
            Request::FetchReplies { post_id } => self.replies(post_id),
            Request::FetchDashboard => self.dashboard(),
            Request::FetchCourses(filters) => self.courses(&filters),
            Request::FetchMentors(query) => self.mentors(&query),
            Request::FetchCommunityPosts { category, page } => self.community_posts(category, page),
        }
    }
}

fn filter_courses(courses: &[Course], filters: &CourseFilters) -> Vec<Course> {
    courses
        .iter()
        .filter(|c| {
            filters
                .category
                .as_ref()
                .map_or(true, |cat| c.category.eq_ignore_ascii_case(cat))
        })
        .filter(|c| filters.level.map_or(true, |level| c.level == level))
        .cloned()
        .collect()
}

fn filter_mentors(mentors: &[Mentor], query: &MentorQuery) -> Vec<Mentor> {
    let search = query.search.trim().to_lowercase();
    let expertise = query.expertise.trim().to_lowercase();
    mentors
        .iter()
        .filter(|m| {
            search.is_empty()
                || m.name.to_lowercase().contains(&search)
                || m.role.to_lowercase().contains(&search)
        })
        .filter(|m| {
            expertise.is_empty() || m.expertise.iter().any(|e| e.to_lowercase() == expertise)
        })
        .cloned()
        .collect()
}

/// Pick courses matching the quiz's interest, best level match first
///
/// Falls back to every course at the stated level when nothing matches the
/// interest.
fn recommend(courses: &[Course], responses: &FormValues) -> Recommendation {
    let interest = responses.get("interest").map(String::as_str).unwrap_or("");
    let level = responses
        .get("experience")
        .and_then(|e| CourseLevel::from_label(e));

    let mut picks: Vec<&Course> = courses
        .iter()
        .filter(|c| c.category.eq_ignore_ascii_case(interest))
        .collect();
    if picks.is_empty() {
        picks = courses.iter().filter(|c| Some(c.level) == level).collect();
    }
    picks.sort_by_key(|c| Some(c.level) != level);

    let track = if interest.is_empty() {
        "General".to_string()
    } else {
        interest.to_string()
    };
    Recommendation {
        track: format!("{} track", track),
        course_ids: picks.into_iter().map(|c| c.id.clone()).collect(),
    }
}
