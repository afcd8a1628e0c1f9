//! Toast notification presenter
//!
//! Toasts stack in the top-right corner of the body area, newest nearest the
//! header. Each one slides in, dwells, slides out and is removed on the next
//! tick after its lifetime ends. Timers are independent per toast.

use crate::action::Action;
use crate::component::Component;
use crate::model::notification::Phase;
use crate::model::{Notification, NotificationId, NotificationKind, NotificationTiming};
use anyhow::Result;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Instant;
use tracing::debug;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TOAST_HEIGHT: u16 = 3;
const MAX_TOAST_WIDTH: u16 = 60;
const EDGE_MARGIN: u16 = 1;

pub struct NotificationPresenter {
    items: Vec<Notification>,
    timing: NotificationTiming,
    next_id: NotificationId,
}

impl Default for NotificationPresenter {
    fn default() -> Self {
        Self::new(NotificationTiming::default())
    }
}

impl NotificationPresenter {
    pub fn new(timing: NotificationTiming) -> Self {
        Self {
            items: Vec::new(),
            timing,
            next_id: 1,
        }
    }

    /// Show a toast now
    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind) -> NotificationId {
        self.show_at(message, kind, Instant::now())
    }

    pub fn show_at(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        now: Instant,
    ) -> NotificationId {
        let id = self.next_id;
        self.next_id += 1;
        let message = message.into();
        debug!(id, ?kind, %message, "notification shown");
        self.items.push(Notification::new(id, message, kind, now));
        id
    }

    /// Remove one toast before its timers run out
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        before != self.items.len()
    }

    /// Remove the most recently shown toast, if any
    pub fn dismiss_latest(&mut self) -> bool {
        match self.items.last().map(|n| n.id) {
            Some(id) => self.dismiss(id),
            None => false,
        }
    }

    pub fn dismiss_all(&mut self) {
        self.items.clear();
    }

    /// Drop every toast whose exit transition has finished; returns how many
    pub fn tick(&mut self, now: Instant) -> usize {
        let timing = self.timing;
        let before = self.items.len();
        self.items.retain(|n| {
            let expired = n.phase_at(now, &timing) == Phase::Expired;
            if expired {
                debug!(id = n.id, created_at = %n.created_at.format("%H:%M:%S"), "notification expired");
            }
            !expired
        });
        before - self.items.len()
    }

    /// Toasts currently on screen, oldest first
    pub fn active(&self) -> &[Notification] {
        &self.items
    }

    /// Render every toast into `area`, as seen at `now`
    pub fn draw_at(&self, frame: &mut Frame, area: Rect, now: Instant) {
        let right_edge = area.x.saturating_add(area.width).saturating_sub(EDGE_MARGIN);
        let max_width = area.width.saturating_sub(EDGE_MARGIN * 2).min(MAX_TOAST_WIDTH);
        if max_width < 5 {
            return;
        }

        for (row, toast) in self.items.iter().rev().enumerate() {
            let y = area.y + row as u16 * TOAST_HEIGHT;
            if y + TOAST_HEIGHT > area.y.saturating_add(area.height) {
                break;
            }

            let text = format!(
                " {} {} ",
                toast.kind.icon(),
                truncate_to_width(&toast.message, max_width.saturating_sub(6) as usize)
            );
            let width = (UnicodeWidthStr::width(text.as_str()) as u16 + 2).min(max_width);

            let presence = toast.presence_at(now, &self.timing);
            let shift = ((1.0 - presence) * f64::from(width + EDGE_MARGIN)).round() as u16;
            let x = right_edge.saturating_sub(width).saturating_add(shift);
            let visible = right_edge.saturating_sub(x).min(width);
            if visible < 3 {
                continue;
            }

            let toast_area = Rect::new(x, y, visible, TOAST_HEIGHT);
            let style = Style::default()
                .bg(toast.kind.color())
                .fg(Color::White)
                .add_modifier(Modifier::BOLD);

            frame.render_widget(Clear, toast_area);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(text, style)))
                    .style(style)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(toast.kind.color())),
                    ),
                toast_area,
            );
        }
    }
}

impl Component for NotificationPresenter {
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                self.tick(Instant::now());
            }
            Action::Notify(message, kind) => {
                self.show(message, kind);
            }
            Action::DismissLatestNotification => {
                self.dismiss_latest();
            }
            Action::DismissNotifications => self.dismiss_all(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.draw_at(frame, area, Instant::now());
        Ok(())
    }
}

/// Cut `text` to at most `max` columns, marking the cut with an ellipsis
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if UnicodeWidthStr::width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
