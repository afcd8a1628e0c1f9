//! Landing page component
//!
//! The page is one long scrollable document built from the domain state.
//! The component owns the presentation state: scroll offset, the focused
//! card and the navigation menu.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::contains;
use crate::model::page::{active_section, SectionSpan};
use crate::model::{DomainState, FormKind, Section};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// An interactive card on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageItem {
    Course(String),
    Mentor(String),
    Post(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpan {
    pub item: PageItem,
    pub top: usize,
    pub height: usize,
}

/// Rendered page with the positions of its sections and cards
#[derive(Debug, Default)]
pub struct Document {
    pub lines: Vec<Line<'static>>,
    pub sections: Vec<SectionSpan>,
    pub items: Vec<ItemSpan>,
}

impl Document {
    fn section_span(&self, section: Section) -> Option<&SectionSpan> {
        self.sections.iter().find(|s| s.section == section)
    }

    fn item_index(&self, item: &PageItem) -> Option<usize> {
        self.items.iter().position(|span| span.item == *item)
    }
}

#[derive(Default)]
struct DocumentBuilder {
    doc: Document,
    section: Option<(Section, usize)>,
    item: Option<(PageItem, usize)>,
}

impl DocumentBuilder {
    fn line(&mut self, line: Line<'static>) {
        self.doc.lines.push(line);
    }

    fn blank(&mut self) {
        self.line(Line::from(""));
    }

    fn begin_section(&mut self, section: Section, subtitle: Option<String>) {
        self.end_section();
        self.section = Some((section, self.doc.lines.len()));

        let mut spans = vec![Span::styled(
            format!("━━ {} ", section.title()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )];
        if let Some(subtitle) = subtitle {
            spans.push(Span::styled(subtitle, Style::default().fg(Color::DarkGray)));
        }
        self.line(Line::from(spans));
        self.blank();
    }

    fn end_section(&mut self) {
        if let Some((section, top)) = self.section.take() {
            self.doc.sections.push(SectionSpan {
                section,
                top,
                height: self.doc.lines.len() - top,
            });
        }
    }

    fn begin_item(&mut self, item: PageItem) {
        self.item = Some((item, self.doc.lines.len()));
    }

    fn end_item(&mut self) {
        if let Some((item, top)) = self.item.take() {
            self.doc.items.push(ItemSpan {
                item,
                top,
                height: self.doc.lines.len() - top,
            });
        }
    }

    fn finish(mut self) -> Document {
        self.end_item();
        self.end_section();
        self.doc
    }
}

fn marker(focused: bool) -> Span<'static> {
    if focused {
        Span::styled("▶ ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    } else {
        Span::raw("  ")
    }
}

fn hint(focused: bool, text: &str) -> Span<'static> {
    if focused {
        Span::styled(format!("  {}", text), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw("")
    }
}

fn detail(text: String) -> Line<'static> {
    Line::from(Span::styled(format!("    {}", text), Style::default().fg(Color::Gray)))
}

fn loading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {}", text),
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    ))
}

/// Lay out the whole landing page
pub fn build_document(domain: &DomainState, focused: Option<&PageItem>) -> Document {
    let mut b = DocumentBuilder::default();
    let is_focused = |item: &PageItem| focused == Some(item);

    // Home
    b.begin_section(Section::Home, None);
    b.line(Line::from(Span::styled(
        "  Learn from alumni who have been there.",
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )));
    b.line(Line::from(
        "  Courses, mentoring and a community built by graduates, for students.",
    ));
    if let Some(ref track) = domain.roadmap {
        b.line(Line::from(Span::styled(
            format!("  Your roadmap: {}", track),
            Style::default().fg(Color::Green),
        )));
    }
    b.blank();
    b.line(Line::from(vec![
        Span::styled("  [t] ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw("Take the skill quiz   "),
        Span::styled("[r] ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw("Join the hub   "),
        Span::styled("[i] ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw("Log in"),
    ]));
    b.blank();

    // Courses
    b.begin_section(Section::Courses, None);
    if !domain.courses_loaded {
        b.line(loading("Loading courses..."));
    } else if domain.courses.is_empty() {
        b.line(loading("No courses match your filters."));
    }
    for course in &domain.courses {
        let item = PageItem::Course(course.id.clone());
        let focused = is_focused(&item);
        b.begin_item(item);

        let mut title = vec![
            marker(focused),
            Span::styled(course.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ];
        if domain.recommended.contains(&course.id) {
            title.push(Span::styled(" ★ Recommended", Style::default().fg(Color::Yellow)));
        }
        if domain.enrolled.contains(&course.id) {
            title.push(Span::styled(" ✓ Enrolled", Style::default().fg(Color::Green)));
        }
        title.push(hint(focused, "[Enter] Enroll"));
        b.line(Line::from(title));
        b.line(detail(format!(
            "{} · {} · {} weeks · with {}",
            course.category, course.level, course.duration_weeks, course.instructor
        )));
        b.blank();
        b.end_item();
    }

    // Mentors
    b.begin_section(Section::Mentors, None);
    if !domain.mentors_loaded {
        b.line(loading("Loading mentors..."));
    }
    for mentor in &domain.mentors {
        let item = PageItem::Mentor(mentor.id.clone());
        let focused = is_focused(&item);
        b.begin_item(item);

        b.line(Line::from(vec![
            marker(focused),
            Span::styled(mentor.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!(" · {}, {}", mentor.role, mentor.company),
                Style::default().fg(Color::Gray),
            ),
            hint(focused, "[Enter] View profile"),
        ]));
        b.line(detail(format!(
            "{} · ★ {:.1} · {} sessions",
            mentor.expertise.join(", "),
            mentor.rating,
            mentor.sessions
        )));
        if let Some(profile) = domain.expanded_mentor.as_ref().filter(|m| m.id == mentor.id) {
            b.line(Line::from(Span::styled(
                format!("    {}", profile.bio),
                Style::default().fg(Color::White),
            )));
            b.line(detail(format!("Available: {}", profile.availability)));
        }
        b.blank();
        b.end_item();
    }

    // Community
    b.begin_section(
        Section::Community,
        Some(format!(
            "category: {} · page {}/{} · [c] category [n] next page",
            domain.post_category, domain.post_page, domain.post_total_pages
        )),
    );
    if !domain.posts_loaded {
        b.line(loading("Loading community posts..."));
    } else if domain.posts.is_empty() {
        b.line(loading("No posts in this category yet."));
    }
    for post in &domain.posts {
        let item = PageItem::Post(post.id.clone());
        let focused = is_focused(&item);
        b.begin_item(item);

        b.line(Line::from(vec![
            marker(focused),
            Span::styled(post.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
            hint(focused, "[Enter] Replies  [+] Like"),
        ]));
        let liked = if domain.liked_posts.contains(&post.id) {
            " (liked)"
        } else {
            ""
        };
        b.line(detail(format!(
            "by {} · {} · ▲ {} likes{} · {} replies",
            post.author,
            post.category,
            post.likes,
            liked,
            post.replies.len()
        )));
        if let Some((_, replies)) = domain.open_replies.as_ref().filter(|(id, _)| *id == post.id) {
            if replies.is_empty() {
                b.line(detail("↳ No replies yet".to_string()));
            }
            for reply in replies {
                b.line(Line::from(vec![
                    Span::styled(
                        format!("    ↳ {}: ", reply.author),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::raw(reply.body.clone()),
                ]));
            }
        }
        b.blank();
        b.end_item();
    }

    // Dashboard
    b.begin_section(Section::Dashboard, None);
    match (&domain.session, &domain.dashboard) {
        (None, _) => b.line(loading("Log in to see your courses and progress. Press [i].")),
        (Some(_), None) => b.line(loading("Loading your dashboard...")),
        (Some(_), Some(dashboard)) => {
            b.line(Line::from(Span::styled(
                format!("  Welcome back, {}!", dashboard.member),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )));
            if dashboard.enrolled_courses.is_empty() {
                b.line(detail("You are not enrolled in any course yet.".to_string()));
            } else {
                b.line(detail("Enrolled courses:".to_string()));
                for course in &dashboard.enrolled_courses {
                    b.line(detail(format!("  • {} ({})", course.title, course.level)));
                }
            }
        }
    }
    b.blank();

    b.finish()
}

fn menu_area(area: Rect) -> Rect {
    Rect::new(
        area.x + 1,
        area.y,
        22.min(area.width.saturating_sub(1)),
        (Section::all().len() as u16 + 2).min(area.height),
    )
}

/// Landing page component
pub struct PageComponent {
    doc: Document,
    scroll: usize,
    focused: Option<PageItem>,
    menu_open: bool,
    menu_index: usize,
    viewport_height: usize,
    /// Where the page was last drawn, for mouse hit testing
    area: Rect,
}

impl Default for PageComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl PageComponent {
    pub fn new() -> Self {
        Self {
            doc: Document::default(),
            scroll: 0,
            focused: None,
            menu_open: false,
            menu_index: 0,
            viewport_height: 20,
            area: Rect::default(),
        }
    }

    /// Re-layout after the domain state changed
    pub fn rebuild(&mut self, domain: &DomainState) {
        self.doc = build_document(domain, self.focused.as_ref());
        if let Some(ref item) = self.focused {
            if self.doc.item_index(item).is_none() {
                self.focused = None;
            }
        }
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    pub fn focused_item(&self) -> Option<&PageItem> {
        self.focused.as_ref()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn active_section(&self) -> Section {
        active_section(&self.doc.sections, self.scroll).unwrap_or(Section::Home)
    }

    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height.max(1);
    }

    fn max_scroll(&self) -> usize {
        self.doc.lines.len().saturating_sub(1)
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let target = self.scroll.saturating_add_signed(delta);
        self.scroll = target.min(self.max_scroll());
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
        if self.menu_open {
            self.menu_index = self.active_section().index();
        }
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Scroll a section to the top and focus its first card
    pub fn navigate(&mut self, section: Section) {
        self.menu_open = false;
        let Some(span) = self.doc.section_span(section).copied() else {
            return;
        };
        self.scroll = span.top.min(self.max_scroll());
        if let Some(first) = self.doc.items.iter().find(|i| span.contains(i.top)) {
            self.focused = Some(first.item.clone());
        }
    }

    fn focus_index(&mut self, index: usize) {
        if let Some(span) = self.doc.items.get(index) {
            self.focused = Some(span.item.clone());
            self.ensure_focus_visible();
        }
    }

    pub fn next_item(&mut self) {
        let next = match self.focused.as_ref().and_then(|f| self.doc.item_index(f)) {
            Some(i) => (i + 1).min(self.doc.items.len().saturating_sub(1)),
            None => 0,
        };
        self.focus_index(next);
    }

    pub fn prev_item(&mut self) {
        let prev = match self.focused.as_ref().and_then(|f| self.doc.item_index(f)) {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.focus_index(prev);
    }

    pub fn first_item(&mut self) {
        self.focus_index(0);
    }

    pub fn last_item(&mut self) {
        self.focus_index(self.doc.items.len().saturating_sub(1));
    }

    fn ensure_focus_visible(&mut self) {
        let Some(span) = self
            .focused
            .as_ref()
            .and_then(|f| self.doc.item_index(f))
            .and_then(|i| self.doc.items.get(i))
        else {
            return;
        };
        let (top, bottom) = (span.top, span.top + span.height);
        if top < self.scroll {
            self.scroll = top;
        } else if bottom > self.scroll + self.viewport_height {
            self.scroll = bottom.saturating_sub(self.viewport_height).min(top);
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> Option<Action> {
        let count = Section::all().len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.menu_index = (self.menu_index + 1) % count;
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.menu_index = (self.menu_index + count - 1) % count;
                None
            }
            KeyCode::Enter => Some(Action::NavigateTo(Section::all()[self.menu_index])),
            KeyCode::Esc | KeyCode::Char('m') => Some(Action::ToggleMenu),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }

    /// Card under a terminal cell of the page area
    pub fn item_at(&self, column: u16, row: u16) -> Option<PageItem> {
        if !contains(self.area, column, row) {
            return None;
        }
        let line = self.scroll + (row - self.area.y) as usize;
        self.doc
            .items
            .iter()
            .find(|span| line >= span.top && line < span.top + span.height)
            .map(|span| span.item.clone())
    }

    fn handle_menu_click(&self, column: u16, row: u16) -> Option<Action> {
        let menu = menu_area(self.area);
        if !contains(menu, column, row) {
            return Some(Action::ToggleMenu);
        }
        // Rows inside the border map to sections
        let index = row.checked_sub(menu.y + 1)? as usize;
        Section::all().get(index).map(|section| Action::NavigateTo(*section))
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect) {
        let menu_area = menu_area(area);
        frame.render_widget(Clear, menu_area);

        let items: Vec<ListItem> = Section::all()
            .iter()
            .enumerate()
            .map(|(i, s)| ListItem::new(format!(" {} {}", i + 1, s.title())))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Magenta))
                    .title(" Menu "),
            )
            .highlight_style(Style::default().bg(Color::Magenta).fg(Color::White));
        let mut state = ListState::default().with_selected(Some(self.menu_index));
        frame.render_stateful_widget(list, menu_area, &mut state);
    }
}

impl Component for PageComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.menu_open {
            return Ok(self.handle_menu_key(key));
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let action = match key.code {
            KeyCode::Char('e') if ctrl => Some(Action::ScrollDown),
            KeyCode::Char('y') if ctrl => Some(Action::ScrollUp),
            KeyCode::Char('d') if ctrl => Some(Action::PageDown),
            KeyCode::Char('u') if ctrl => Some(Action::PageUp),
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('m') => Some(Action::ToggleMenu),
            KeyCode::Char('i') => Some(Action::OpenForm(FormKind::Login)),
            KeyCode::Char('r') => Some(Action::OpenForm(FormKind::Register)),
            KeyCode::Char('t') => Some(Action::OpenForm(FormKind::Quiz)),
            KeyCode::Char('x') => Some(Action::DismissLatestNotification),
            KeyCode::Char('X') => Some(Action::DismissNotifications),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstItem),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::Tab => Some(Action::NextSection),
            KeyCode::BackTab => Some(Action::PrevSection),
            KeyCode::Enter => Some(Action::ActivateItem),
            KeyCode::Char('+') => Some(Action::LikePost),
            KeyCode::Char('n') => Some(Action::NextPostsPage),
            KeyCode::Char('c') => Some(Action::CycleCategory),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                Some(Action::NavigateTo(Section::all()[index]))
            }
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let action = match mouse.kind {
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::Down(MouseButton::Left) if self.menu_open => {
                self.handle_menu_click(mouse.column, mouse.row)
            }
            MouseEventKind::Down(MouseButton::Left) => {
                // Clicking a card focuses it and triggers its button
                let item = self.item_at(mouse.column, mouse.row);
                item.map(|item| {
                    self.focused = Some(item);
                    Action::ActivateItem
                })
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let half_page = (self.viewport_height / 2).max(1) as isize;
        match action {
            Action::ToggleMenu => self.toggle_menu(),
            Action::NavigateTo(section) => self.navigate(section),
            Action::NextSection => self.navigate(self.active_section().next()),
            Action::PrevSection => self.navigate(self.active_section().prev()),
            Action::NextItem => self.next_item(),
            Action::PrevItem => self.prev_item(),
            Action::FirstItem => self.first_item(),
            Action::LastItem => self.last_item(),
            Action::ScrollUp => self.scroll_by(-1),
            Action::ScrollDown => self.scroll_by(1),
            Action::PageUp => self.scroll_by(-half_page),
            Action::PageDown => self.scroll_by(half_page),
            Action::OpenForm(_) => self.close_menu(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.area = area;
        self.set_viewport_height(area.height as usize);

        let paragraph = Paragraph::new(self.doc.lines.clone())
            .scroll((self.scroll.min(u16::MAX as usize) as u16, 0));
        frame.render_widget(paragraph, area);

        if self.menu_open {
            self.draw_menu(frame, area);
        }
        Ok(())
    }
}
