//! Toast notification model
//!
//! A notification moves through its phases purely as a function of elapsed
//! time, so every query takes the current `Instant` explicitly.

use chrono::{DateTime, Local};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub type NotificationId = u64;

/// Visual category of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    #[default]
    Info,
}

impl NotificationKind {
    pub fn color(&self) -> Color {
        match self {
            NotificationKind::Success => Color::Rgb(0x4a, 0xde, 0x80),
            NotificationKind::Error => Color::Rgb(0xef, 0x44, 0x44),
            NotificationKind::Info => Color::Rgb(0x64, 0x78, 0xe6),
        }
    }

    pub fn icon(&self) -> &str {
        match self {
            NotificationKind::Success => "✓",
            NotificationKind::Error => "✗",
            NotificationKind::Info => "ℹ",
        }
    }
}

/// Durations that drive a toast's lifecycle
///
/// `enter` runs inside `dwell`; `exit` starts once `dwell` has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTiming {
    pub enter: Duration,
    pub dwell: Duration,
    pub exit: Duration,
}

impl Default for NotificationTiming {
    fn default() -> Self {
        Self {
            enter: Duration::from_millis(300),
            dwell: Duration::from_millis(3000),
            exit: Duration::from_millis(300),
        }
    }
}

impl NotificationTiming {
    /// Total time from creation until removal
    pub fn lifetime(&self) -> Duration {
        self.dwell + self.exit
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Visible,
    Exiting,
    Expired,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Local>,
    shown_at: Instant,
}

impl Notification {
    pub fn new(id: NotificationId, message: String, kind: NotificationKind, now: Instant) -> Self {
        Self {
            id,
            message,
            kind,
            created_at: Local::now(),
            shown_at: now,
        }
    }

    pub fn phase_at(&self, now: Instant, timing: &NotificationTiming) -> Phase {
        let elapsed = now.saturating_duration_since(self.shown_at);
        if elapsed >= timing.lifetime() {
            Phase::Expired
        } else if elapsed >= timing.dwell {
            Phase::Exiting
        } else if elapsed < timing.enter {
            Phase::Entering
        } else {
            Phase::Visible
        }
    }

    /// How much of the toast is slid on screen, from 0.0 (off) to 1.0 (fully in)
    pub fn presence_at(&self, now: Instant, timing: &NotificationTiming) -> f64 {
        let elapsed = now.saturating_duration_since(self.shown_at);
        match self.phase_at(now, timing) {
            Phase::Entering => fraction(elapsed, timing.enter),
            Phase::Visible => 1.0,
            Phase::Exiting => 1.0 - fraction(elapsed - timing.dwell, timing.exit),
            Phase::Expired => 0.0,
        }
    }
}

fn fraction(part: Duration, whole: Duration) -> f64 {
    if whole.is_zero() {
        return 1.0;
    }
    (part.as_secs_f64() / whole.as_secs_f64()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast(now: Instant) -> Notification {
        Notification::new(1, "Saved".to_string(), NotificationKind::Success, now)
    }

    #[test]
    fn test_phase_progression() {
        let start = Instant::now();
        let timing = NotificationTiming::default();
        let n = toast(start);

        assert_eq!(n.phase_at(start, &timing), Phase::Entering);
        assert_eq!(n.phase_at(start + Duration::from_millis(300), &timing), Phase::Visible);
        assert_eq!(n.phase_at(start + Duration::from_millis(2999), &timing), Phase::Visible);
        assert_eq!(n.phase_at(start + Duration::from_millis(3000), &timing), Phase::Exiting);
        assert_eq!(n.phase_at(start + Duration::from_millis(3299), &timing), Phase::Exiting);
        assert_eq!(n.phase_at(start + Duration::from_millis(3300), &timing), Phase::Expired);
    }

    #[test]
    fn test_presence_slides_in_and_out() {
        let start = Instant::now();
        let timing = NotificationTiming::default();
        let n = toast(start);

        assert_eq!(n.presence_at(start, &timing), 0.0);
        let half_in = n.presence_at(start + Duration::from_millis(150), &timing);
        assert!((half_in - 0.5).abs() < 1e-9);
        assert_eq!(n.presence_at(start + Duration::from_secs(1), &timing), 1.0);
        let half_out = n.presence_at(start + Duration::from_millis(3150), &timing);
        assert!((half_out - 0.5).abs() < 1e-9);
        assert_eq!(n.presence_at(start + Duration::from_secs(4), &timing), 0.0);
    }

    #[test]
    fn test_zero_enter_is_immediately_visible() {
        let start = Instant::now();
        let timing = NotificationTiming {
            enter: Duration::ZERO,
            ..NotificationTiming::default()
        };
        let n = toast(start);
        assert_eq!(n.phase_at(start, &timing), Phase::Visible);
        assert_eq!(n.presence_at(start, &timing), 1.0);
    }

    #[test]
    fn test_kind_defaults_to_info() {
        assert_eq!(NotificationKind::default(), NotificationKind::Info);
        assert_ne!(NotificationKind::Success.color(), NotificationKind::Error.color());
    }
}
