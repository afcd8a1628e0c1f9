//! Landing page sections and scroll-driven highlighting

/// Lines of lead before a section counts as reached while scrolling
pub const ACTIVE_SECTION_LEAD: usize = 4;

/// Sections of the landing page, in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Home,
    Courses,
    Mentors,
    Community,
    Dashboard,
}

impl Section {
    pub fn all() -> [Section; 5] {
        [
            Section::Home,
            Section::Courses,
            Section::Mentors,
            Section::Community,
            Section::Dashboard,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Courses => "Courses",
            Section::Mentors => "Mentors",
            Section::Community => "Community",
            Section::Dashboard => "Dashboard",
        }
    }

    pub fn index(&self) -> usize {
        Section::all()
            .iter()
            .position(|s| s == self)
            .unwrap_or_default()
    }

    pub fn next(&self) -> Section {
        let all = Section::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn prev(&self) -> Section {
        let all = Section::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

/// Where a section starts and how many lines it occupies in the rendered page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    pub section: Section,
    pub top: usize,
    pub height: usize,
}

impl SectionSpan {
    pub fn contains(&self, line: usize) -> bool {
        line >= self.top && line < self.top + self.height
    }
}

/// The section the reader is currently in
///
/// The last section whose top lies within `ACTIVE_SECTION_LEAD` lines below
/// the scroll offset wins. `spans` must be in document order.
pub fn active_section(spans: &[SectionSpan], scroll_offset: usize) -> Option<Section> {
    spans
        .iter()
        .filter(|span| scroll_offset >= span.top.saturating_sub(ACTIVE_SECTION_LEAD))
        .last()
        .map(|span| span.section)
}
