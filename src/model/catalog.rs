//! Catalog data - courses, mentors, community posts and quiz questions
//!
//! The bundled catalog is compiled into the binary and parsed with serde_yaml.
//! It is the data source of the simulated backend.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

const BUNDLED_CATALOG: &str = include_str!("../../assets/catalog.yaml");

/// Categories offered by the community filter, in cycling order
pub const POST_CATEGORIES: [&str; 4] = ["all", "career", "interviews", "projects"];

/// Difficulty level of a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    pub fn name(&self) -> &str {
        match self {
            CourseLevel::Beginner => "Beginner",
            CourseLevel::Intermediate => "Intermediate",
            CourseLevel::Advanced => "Advanced",
        }
    }

    /// Match a free-form answer such as a quiz option ("Beginner")
    pub fn from_label(label: &str) -> Option<CourseLevel> {
        [
            CourseLevel::Beginner,
            CourseLevel::Intermediate,
            CourseLevel::Advanced,
        ]
        .into_iter()
        .find(|level| level.name().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub category: String,
    pub level: CourseLevel,
    pub instructor: String,
    pub duration_weeks: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mentor {
    pub id: String,
    pub name: String,
    pub role: String,
    pub company: String,
    #[serde(default)]
    pub expertise: Vec<String>,
    pub rating: f32,
    pub sessions: u32,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub availability: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub author: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityPost {
    pub id: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub likes: u32,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
}

/// Everything the landing page can show
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub mentors: Vec<Mentor>,
    #[serde(default)]
    pub posts: Vec<CommunityPost>,
    #[serde(default)]
    pub quiz: Vec<QuizQuestion>,
}

impl Catalog {
    /// Load the catalog shipped with the binary
    pub fn bundled() -> Result<Catalog> {
        Self::from_yaml(BUNDLED_CATALOG).context("bundled catalog is malformed")
    }

    pub fn from_yaml(contents: &str) -> Result<Catalog> {
        let catalog: Catalog = serde_yaml::from_str(contents)?;
        Ok(catalog)
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn mentor(&self, id: &str) -> Option<&Mentor> {
        self.mentors.iter().find(|m| m.id == id)
    }

    pub fn post(&self, id: &str) -> Option<&CommunityPost> {
        self.posts.iter().find(|p| p.id == id)
    }
}
