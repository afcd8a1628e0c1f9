//! Domain state - data shown on the landing page, separate from UI concerns

use crate::model::catalog::{CommunityPost, Course, Mentor, Reply, POST_CATEGORIES};
use crate::services::backend::{Dashboard, Outcome, Session};

/// Everything the backend has told us so far
#[derive(Debug, Default)]
pub struct DomainState {
    pub courses: Vec<Course>,
    pub courses_loaded: bool,

    pub mentors: Vec<Mentor>,
    pub mentors_loaded: bool,
    /// Mentor whose full profile is expanded inline
    pub expanded_mentor: Option<Mentor>,

    pub posts: Vec<CommunityPost>,
    pub posts_loaded: bool,
    pub post_category: String,
    pub post_page: usize,
    pub post_total_pages: usize,
    /// Posts the member has liked
    pub liked_posts: Vec<String>,
    /// Post whose replies are expanded, with the replies
    pub open_replies: Option<(String, Vec<Reply>)>,

    pub session: Option<Session>,
    pub dashboard: Option<Dashboard>,
    /// Courses enrolled in during this run
    pub enrolled: Vec<String>,

    /// Track name and course ids suggested by the skill quiz
    pub roadmap: Option<String>,
    pub recommended: Vec<String>,
}

impl DomainState {
    pub fn new() -> Self {
        Self {
            post_category: POST_CATEGORIES[0].to_string(),
            post_page: 1,
            post_total_pages: 1,
            ..Self::default()
        }
    }

    /// Fold a backend outcome into the state
    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::LoggedIn(session) => {
                self.session = Some(session);
            }
            Outcome::Registered { .. } => {}
            Outcome::QuizResult(recommendation) => {
                self.roadmap = Some(recommendation.track);
                self.recommended = recommendation.course_ids;
            }
            Outcome::Enrolled { course_id, .. } => {
                if !self.enrolled.contains(&course_id) {
                    self.enrolled.push(course_id);
                }
            }
            Outcome::MentorProfile(mentor) => {
                self.expanded_mentor = Some(mentor);
            }
            Outcome::LikeToggled {
                post_id,
                likes,
                liked,
            } => {
                if let Some(post) = self.posts.iter_mut().find(|p| p.id == post_id) {
                    post.likes = likes;
                }
                self.liked_posts.retain(|id| *id != post_id);
                if liked {
                    self.liked_posts.push(post_id);
                }
            }
            Outcome::Replies { post_id, replies } => {
                self.open_replies = Some((post_id, replies));
            }
            Outcome::Dashboard(dashboard) => {
                self.dashboard = Some(dashboard);
            }
            Outcome::Courses(courses) => {
                self.courses = courses;
                self.courses_loaded = true;
            }
            Outcome::Mentors(mentors) => {
                self.mentors = mentors;
                self.mentors_loaded = true;
            }
            Outcome::CommunityPosts(page) => {
                self.posts = page.posts;
                self.post_category = page.category;
                self.post_page = page.page;
                self.post_total_pages = page.total_pages;
                self.posts_loaded = true;
                self.open_replies = None;
            }
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    /// Page to request after the current one, wrapping to the first
    pub fn next_post_page(&self) -> usize {
        if self.post_page >= self.post_total_pages {
            1
        } else {
            self.post_page + 1
        }
    }

    /// Category after the current one in the filter cycle
    pub fn next_post_category(&self) -> &'static str {
        let current = POST_CATEGORIES
            .iter()
            .position(|c| *c == self.post_category)
            .unwrap_or(0);
        POST_CATEGORIES[(current + 1) % POST_CATEGORIES.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::Catalog;
    use crate::services::backend::{PostPage, Recommendation};

    fn with_posts() -> DomainState {
        let catalog = Catalog::bundled().unwrap();
        let mut domain = DomainState::new();
        domain.apply(Outcome::CommunityPosts(PostPage {
            category: "all".to_string(),
            page: 1,
            total_pages: 3,
            posts: catalog.posts[..3].to_vec(),
        }));
        domain
    }

    #[test]
    fn test_new_domain_starts_on_first_page() {
        let domain = DomainState::new();
        assert_eq!(domain.post_category, "all");
        assert_eq!(domain.post_page, 1);
        assert!(!domain.is_signed_in());
    }

    #[test]
    fn test_like_updates_count_and_liked_set() {
        let mut domain = with_posts();
        domain.apply(Outcome::LikeToggled {
            post_id: "p-1".to_string(),
            likes: 25,
            liked: true,
        });
        assert_eq!(domain.posts[0].likes, 25);
        assert_eq!(domain.liked_posts, vec!["p-1".to_string()]);

        domain.apply(Outcome::LikeToggled {
            post_id: "p-1".to_string(),
            likes: 24,
            liked: false,
        });
        assert_eq!(domain.posts[0].likes, 24);
        assert!(domain.liked_posts.is_empty());
    }

    #[test]
    fn test_new_post_page_closes_replies() {
        let mut domain = with_posts();
        domain.apply(Outcome::Replies {
            post_id: "p-1".to_string(),
            replies: Vec::new(),
        });
        assert!(domain.open_replies.is_some());

        domain.apply(Outcome::CommunityPosts(PostPage {
            category: "career".to_string(),
            page: 1,
            total_pages: 1,
            posts: Vec::new(),
        }));
        assert!(domain.open_replies.is_none());
        assert_eq!(domain.post_category, "career");
    }

    #[test]
    fn test_next_post_page_wraps() {
        let mut domain = with_posts();
        assert_eq!(domain.next_post_page(), 2);
        domain.post_page = 3;
        assert_eq!(domain.next_post_page(), 1);
    }

    #[test]
    fn test_next_post_category_cycles() {
        let mut domain = DomainState::new();
        assert_eq!(domain.next_post_category(), "career");
        domain.post_category = "projects".to_string();
        assert_eq!(domain.next_post_category(), "all");
    }

    #[test]
    fn test_quiz_result_sets_recommendations() {
        let mut domain = DomainState::new();
        domain.apply(Outcome::QuizResult(Recommendation {
            track: "Data Science track".to_string(),
            course_ids: vec!["data-101".to_string()],
        }));
        assert_eq!(domain.roadmap.as_deref(), Some("Data Science track"));
        assert_eq!(domain.recommended, vec!["data-101".to_string()]);
    }

    #[test]
    fn test_enrolled_is_deduplicated() {
        let mut domain = DomainState::new();
        for _ in 0..2 {
            domain.apply(Outcome::Enrolled {
                course_id: "web-101".to_string(),
                title: "Full-Stack Web Foundations".to_string(),
            });
        }
        assert_eq!(domain.enrolled.len(), 1);
    }
}
