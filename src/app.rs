//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! It also owns the request runner and folds backend outcomes into the
//! domain state.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_main_layout, draw_header, draw_help_bar, nav_link_at, ModalController,
    NotificationPresenter, PageComponent, PageItem,
};
use crate::config::Config;
use crate::model::{DomainState, FormKind, NotificationKind, QuizQuestion, Section};
use crate::services::{
    Backend, Completed, CourseFilters, MentorQuery, Outcome, Request, RequestRunner, UserFeedback,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{layout::Rect, Frame};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Delay between a quiz result and the scroll to the course list
const ROADMAP_SCROLL_DELAY: Duration = Duration::from_millis(500);

/// Main application state
pub struct App {
    pub should_quit: bool,
    pub domain: DomainState,

    // Components
    modal: ModalController,
    notifications: NotificationPresenter,
    page: PageComponent,

    // Background work
    requests: RequestRunner,
    pending_scroll: Option<(Section, Instant)>,

    /// Last drawn terminal area, for mouse hit testing
    screen: Rect,
}

impl App {
    pub fn new(config: &Config, backend: Arc<dyn Backend>, quiz: &[QuizQuestion]) -> Self {
        let notifications = NotificationPresenter::new(config.notification_timing());
        Self {
            should_quit: false,
            domain: DomainState::new(),
            modal: ModalController::new(quiz),
            notifications,
            page: PageComponent::new(),
            requests: RequestRunner::new(backend),
            pending_scroll: None,
            screen: Rect::default(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Forms
    // ─────────────────────────────────────────────────────────────────────────

    fn submit_form(&mut self, kind: FormKind) {
        if self.modal.state().form() != Some(kind) {
            debug!(form = %kind, "ignoring submit for a hidden form");
            return;
        }

        let values = self.modal.form(kind).values();
        let request = Request::from_form(kind, &values);
        info!(form = %kind, request = request.name(), "form submitted");
        self.requests.dispatch(request);

        self.modal.form_mut(kind).clear();
        self.modal.close();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Page Interactions
    // ─────────────────────────────────────────────────────────────────────────

    /// Press the button of the focused card; the toast goes out as a follow-up
    fn activate_focused(&mut self) -> Option<Action> {
        match self.page.focused_item().cloned()? {
            PageItem::Course(id) => {
                let course = self.domain.courses.iter().find(|c| c.id == id)?;
                let message = format!("Enrolling in \"{}\"...", course.title);
                info!(course = %id, "enrolling");
                self.requests.dispatch(Request::EnrollInCourse { course_id: id });
                Some(Action::Notify(message, NotificationKind::Success))
            }
            PageItem::Mentor(id) => {
                let mentor = self.domain.mentors.iter().find(|m| m.id == id)?;
                let message = format!("Loading {}'s profile...", mentor.name);
                self.requests.dispatch(Request::FetchMentorProfile { mentor_id: id });
                Some(Action::Notify(message, NotificationKind::Info))
            }
            PageItem::Post(id) => {
                self.requests.dispatch(Request::FetchReplies { post_id: id });
                Some(Action::Notify(
                    "Loading replies...".to_string(),
                    NotificationKind::Info,
                ))
            }
        }
    }

    fn like_focused(&mut self) {
        if let Some(PageItem::Post(id)) = self.page.focused_item().cloned() {
            self.requests.dispatch(Request::ToggleLike { post_id: id });
        }
    }

    fn fetch_posts(&mut self, category: String, page: usize) {
        self.requests
            .dispatch(Request::FetchCommunityPosts { category, page });
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Backend Results
    // ─────────────────────────────────────────────────────────────────────────

    fn apply_completed(&mut self, completed: Completed, now: Instant) {
        let outcome = match completed.result {
            Ok(outcome) => outcome,
            Err(err) => {
                let feedback = UserFeedback::error(&err);
                self.notifications.show_at(feedback.message, feedback.kind, now);
                return;
            }
        };

        if let Some(feedback) = outcome.feedback() {
            self.notifications.show_at(feedback.message, feedback.kind, now);
        }

        let follow_up = match outcome {
            Outcome::LoggedIn(ref session) => {
                info!(member = %session.display_name, "signed in");
                Some(Request::FetchDashboard)
            }
            Outcome::QuizResult(ref recommendation) => {
                info!(track = %recommendation.track, "roadmap ready");
                self.pending_scroll = Some((Section::Courses, now + ROADMAP_SCROLL_DELAY));
                None
            }
            Outcome::Enrolled { .. } if self.domain.is_signed_in() => {
                Some(Request::FetchDashboard)
            }
            _ => None,
        };

        self.domain.apply(outcome);
        if let Some(request) = follow_up {
            self.requests.dispatch(request);
        }
    }

    fn on_tick(&mut self, now: Instant) {
        self.notifications.tick(now);

        for completed in self.requests.poll() {
            self.apply_completed(completed, now);
        }
        self.page.rebuild(&self.domain);

        if let Some((section, due)) = self.pending_scroll {
            if now >= due {
                self.pending_scroll = None;
                self.page.navigate(section);
            }
        }
    }
}

impl Component for App {
    /// Kick off the initial page loads
    fn init(&mut self) -> Result<()> {
        info!("SkillShare Hub initialized");
        self.requests.dispatch(Request::FetchCourses(CourseFilters::default()));
        self.requests.dispatch(Request::FetchMentors(MentorQuery::default()));
        self.requests.dispatch(Request::FetchCommunityPosts {
            category: self.domain.post_category.clone(),
            page: 1,
        });
        self.page.rebuild(&self.domain);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::Quit));
        }

        if self.modal.is_open() {
            self.modal.handle_key_event(key)
        } else {
            self.page.handle_key_event(key)
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.modal.is_open() {
            return self.modal.handle_mouse_event(mouse);
        }

        if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
            let header = calculate_main_layout(self.screen).header;
            if let Some(section) = nav_link_at(header, mouse.column, mouse.row) {
                return Ok(Some(Action::NavigateTo(section)));
            }
        }
        self.page.handle_mouse_event(mouse)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action.is_scroll() && self.modal.scroll_locked() {
            debug!(%action, "scroll suppressed while a form is showing");
            return Ok(None);
        }

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => self.on_tick(Instant::now()),
            Action::Resize(w, h) => {
                self.screen = Rect::new(0, 0, w, h);
                self.modal.update(action)?;
            }
            Action::Quit => {
                info!("quitting");
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Modal
            // ─────────────────────────────────────────────────────────────────
            Action::OpenForm(_) => {
                self.page.update(action.clone())?;
                self.modal.update(action)?;
            }
            Action::CloseModal => self.modal.close(),
            Action::SubmitForm(kind) => self.submit_form(kind),

            // ─────────────────────────────────────────────────────────────────
            // Page Interactions
            // ─────────────────────────────────────────────────────────────────
            Action::ActivateItem => {
                let follow_up = self.activate_focused();
                self.page.rebuild(&self.domain);
                return Ok(follow_up);
            }
            Action::LikePost => self.like_focused(),
            Action::NextPostsPage => {
                let category = self.domain.post_category.clone();
                let page = self.domain.next_post_page();
                self.fetch_posts(category, page);
            }
            Action::CycleCategory => {
                let category = self.domain.next_post_category().to_string();
                self.fetch_posts(category, 1);
            }

            // ─────────────────────────────────────────────────────────────────
            // Notifications
            // ─────────────────────────────────────────────────────────────────
            Action::Notify(..)
            | Action::DismissLatestNotification
            | Action::DismissNotifications => {
                self.notifications.update(action)?;
            }

            // Navigation and scrolling
            _ => {
                self.page.update(action)?;
                self.page.rebuild(&self.domain);
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.screen = area;
        let layout = calculate_main_layout(area);

        let member = self
            .domain
            .session
            .as_ref()
            .map(|session| session.display_name.as_str());
        draw_header(
            frame,
            layout.header,
            self.page.active_section(),
            member,
            self.requests.in_flight(),
        );
        self.page.draw(frame, layout.body)?;
        draw_help_bar(frame, layout.help, self.modal.is_open(), self.page.is_menu_open());

        self.modal.draw(frame, area)?;
        // Toasts stay above the dialog
        self.notifications.draw(frame, layout.body)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Catalog;
    use crate::services::backend::BackendError;
    use crate::services::SimulatedBackend;
    use ratatui::{backend::TestBackend, Terminal};
    use std::thread;

    struct DownBackend;

    impl Backend for DownBackend {
        fn submit(&self, _request: Request) -> Result<Outcome, BackendError> {
            Err(BackendError::Unavailable("maintenance".to_string()))
        }
    }

    /// Accepts everything except logins
    struct RejectingBackend(SimulatedBackend);

    impl Backend for RejectingBackend {
        fn submit(&self, request: Request) -> Result<Outcome, BackendError> {
            match request {
                Request::Authenticate { .. } => Err(BackendError::InvalidCredentials),
                other => self.0.submit(other),
            }
        }
    }

    fn app_with(backend: Arc<dyn Backend>) -> App {
        let catalog = Catalog::bundled().unwrap();
        let mut app = App::new(&Config::default(), backend, &catalog.quiz);
        app.init().unwrap();
        settle(&mut app);
        app
    }

    fn app() -> App {
        let catalog = Catalog::bundled().unwrap();
        app_with(Arc::new(SimulatedBackend::new(catalog)))
    }

    /// Tick until every dispatched request has been applied
    fn settle(app: &mut App) {
        for _ in 0..400 {
            app.update(Action::Tick).unwrap();
            if app.requests.in_flight() == 0 {
                return;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("requests did not settle");
    }

    /// Apply an action and every follow-up it produces
    fn run(app: &mut App, action: Action) {
        let mut current = Some(action);
        while let Some(a) = current {
            current = app.update(a).unwrap();
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(app: &mut App, code: KeyCode) {
        let mut action = app.handle_key_event(key(code)).unwrap();
        while let Some(a) = action {
            action = app.update(a).unwrap();
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn messages(app: &App) -> Vec<String> {
        app.notifications
            .active()
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }

    #[test]
    fn test_startup_loads_page() {
        let app = app();
        assert!(app.domain.courses_loaded);
        assert!(app.domain.mentors_loaded);
        assert!(app.domain.posts_loaded);
        assert_eq!(app.domain.post_category, "all");
        assert_eq!(app.domain.post_page, 1);
    }

    #[test]
    fn test_login_flow() {
        let mut app = app();
        press(&mut app, KeyCode::Char('i'));
        assert!(app.modal.is_open());

        type_text(&mut app, "ada@example.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "anything");
        press(&mut app, KeyCode::Enter);
        assert!(!app.modal.is_open());
        assert!(app.modal.form(FormKind::Login).values()["email"].is_empty());

        settle(&mut app);
        assert!(messages(&app).contains(&"Login successful! Welcome back.".to_string()));
        let kinds: Vec<_> = app.notifications.active().iter().map(|n| n.kind).collect();
        assert!(kinds.iter().all(|k| *k == NotificationKind::Success));
        assert_eq!(
            app.domain.session.as_ref().map(|s| s.display_name.as_str()),
            Some("ada")
        );
        assert!(app.domain.dashboard.is_some());
    }

    #[test]
    fn test_register_flow() {
        let mut app = app();
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.modal.state().form(), Some(FormKind::Register));

        type_text(&mut app, "Ada Lovelace");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "ada@example.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "2019");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "secret");
        press(&mut app, KeyCode::Enter);
        assert!(!app.modal.is_open());

        settle(&mut app);
        assert_eq!(
            messages(&app),
            vec!["Registration successful! Please check your email.".to_string()]
        );
        assert_eq!(app.notifications.active()[0].kind, NotificationKind::Success);
        // Registering does not sign in
        assert!(app.domain.session.is_none());
    }

    #[test]
    fn test_quiz_flow_shows_roadmap_toast() {
        let mut app = app();
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.modal.state().form(), Some(FormKind::Quiz));

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert!(!app.modal.is_open());

        settle(&mut app);
        assert_eq!(
            messages(&app),
            vec!["Quiz completed! Generating your personalized roadmap...".to_string()]
        );
        assert_eq!(app.notifications.active()[0].kind, NotificationKind::Success);
    }

    #[test]
    fn test_rejected_login_shows_error_toast() {
        let catalog = Catalog::bundled().unwrap();
        let mut app = app_with(Arc::new(RejectingBackend(SimulatedBackend::new(catalog))));

        press(&mut app, KeyCode::Char('i'));
        type_text(&mut app, "ada@example.com");
        press(&mut app, KeyCode::Enter);
        assert!(!app.modal.is_open());

        settle(&mut app);
        assert_eq!(messages(&app), vec!["Invalid email or password".to_string()]);
        assert_eq!(app.notifications.active()[0].kind, NotificationKind::Error);
        assert!(app.domain.session.is_none());
        assert!(app.domain.dashboard.is_none());
    }

    #[test]
    fn test_card_toasts_go_through_notify() {
        let mut app = app();
        app.update(Action::NavigateTo(Section::Mentors)).unwrap();
        let name = app.domain.mentors[0].name.clone();

        let follow_up = app.update(Action::ActivateItem).unwrap();
        assert_eq!(
            follow_up,
            Some(Action::Notify(
                format!("Loading {}'s profile...", name),
                NotificationKind::Info
            ))
        );
        run(&mut app, follow_up.unwrap());
        settle(&mut app);
        assert_eq!(
            app.domain.expanded_mentor.as_ref().map(|m| m.name.clone()),
            Some(name)
        );
    }

    #[test]
    fn test_activate_without_focus_does_nothing() {
        let mut app = app();
        assert_eq!(app.update(Action::ActivateItem).unwrap(), None);
        assert_eq!(app.requests.in_flight(), 0);
    }

    #[test]
    fn test_dismiss_keys() {
        let mut app = app();
        run(&mut app, Action::Notify("first".to_string(), NotificationKind::Info));
        run(&mut app, Action::Notify("second".to_string(), NotificationKind::Info));
        run(&mut app, Action::Notify("third".to_string(), NotificationKind::Info));

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(messages(&app), vec!["first".to_string(), "second".to_string()]);

        press(&mut app, KeyCode::Char('X'));
        assert!(messages(&app).is_empty());
    }

    #[test]
    fn test_click_on_nav_link_navigates() {
        let mut app = app();
        app.update(Action::Resize(100, 30)).unwrap();

        // Links: " 1 Home " (1..=8), " 2 Courses " (10..=20), " 3 Mentors " (22..=32),
        // then " 4 Community " from column 34
        let action = app.handle_mouse_event(click(36, 1)).unwrap();
        assert_eq!(action, Some(Action::NavigateTo(Section::Community)));
        run(&mut app, action.unwrap());
        assert_eq!(app.page.active_section(), Section::Community);
    }

    #[test]
    fn test_nav_link_clicks_ignored_while_form_showing() {
        let mut app = app();
        app.update(Action::Resize(100, 30)).unwrap();
        app.update(Action::OpenForm(FormKind::Login)).unwrap();

        // The header is backdrop while the dialog shows
        assert_eq!(
            app.handle_mouse_event(click(36, 1)).unwrap(),
            Some(Action::CloseModal)
        );
        assert_eq!(app.page.active_section(), Section::Home);
    }

    #[test]
    fn test_scroll_suppressed_while_form_showing() {
        let mut app = app();
        app.update(Action::OpenForm(FormKind::Quiz)).unwrap();
        let before = app.page.scroll_offset();

        for action in [Action::ScrollDown, Action::PageDown, Action::NavigateTo(Section::Community)] {
            app.update(action).unwrap();
        }
        assert_eq!(app.page.scroll_offset(), before);

        let wheel = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 5,
            row: 5,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(app.handle_mouse_event(wheel).unwrap(), None);

        app.update(Action::CloseModal).unwrap();
        app.update(Action::ScrollDown).unwrap();
        assert_eq!(app.page.scroll_offset(), before + 1);
    }

    #[test]
    fn test_escape_while_closed_changes_nothing() {
        let mut app = app();
        press(&mut app, KeyCode::Esc);
        assert!(!app.modal.is_open());
        assert!(!app.page.is_menu_open());
    }

    #[test]
    fn test_quiz_result_scrolls_to_courses() {
        let mut app = app();
        app.update(Action::OpenForm(FormKind::Quiz)).unwrap();
        app.update(Action::SubmitForm(FormKind::Quiz)).unwrap();
        settle(&mut app);

        assert!(app.domain.roadmap.is_some());
        assert!(!app.domain.recommended.is_empty());
        let (section, due) = app.pending_scroll.unwrap();
        assert_eq!(section, Section::Courses);

        app.on_tick(due);
        assert!(app.pending_scroll.is_none());
        assert_eq!(app.page.active_section(), Section::Courses);
    }

    #[test]
    fn test_enroll_focused_course() {
        let mut app = app();
        app.update(Action::NextItem).unwrap();
        let title = app.domain.courses[0].title.clone();
        run(&mut app, Action::ActivateItem);
        assert!(messages(&app).contains(&format!("Enrolling in \"{}\"...", title)));

        settle(&mut app);
        assert_eq!(app.domain.enrolled, vec![app.domain.courses[0].id.clone()]);
        // Not signed in, so no dashboard refresh
        assert!(app.domain.dashboard.is_none());
    }

    #[test]
    fn test_like_and_replies_on_focused_post() {
        let mut app = app();
        app.update(Action::NavigateTo(Section::Community)).unwrap();
        let post = app.domain.posts[0].clone();

        app.update(Action::LikePost).unwrap();
        settle(&mut app);
        assert_eq!(app.domain.posts[0].likes, post.likes + 1);
        assert!(app.domain.liked_posts.contains(&post.id));

        run(&mut app, Action::ActivateItem);
        assert!(messages(&app).contains(&"Loading replies...".to_string()));
        settle(&mut app);
        assert_eq!(
            app.domain.open_replies.as_ref().map(|(id, _)| id.clone()),
            Some(post.id)
        );
    }

    #[test]
    fn test_cycle_category_reloads_posts() {
        let mut app = app();
        app.update(Action::CycleCategory).unwrap();
        settle(&mut app);
        assert_eq!(app.domain.post_category, "career");
        assert!(app.domain.posts.iter().all(|p| p.category == "career"));
    }

    #[test]
    fn test_backend_errors_become_error_toasts() {
        let app = app_with(Arc::new(DownBackend));
        assert_eq!(app.notifications.active().len(), 3);
        for toast in app.notifications.active() {
            assert_eq!(toast.kind, NotificationKind::Error);
            assert_eq!(toast.message, "Service unavailable: maintenance");
        }
    }

    #[test]
    fn test_ctrl_c_quits_even_with_form_open() {
        let mut app = app();
        app.update(Action::OpenForm(FormKind::Register)).unwrap();
        let action = app
            .handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(action, Some(Action::Quit));
        app.update(Action::Quit).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_draw_page_with_dialog() {
        let mut app = app();
        app.update(Action::OpenForm(FormKind::Login)).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| app.draw(frame, frame.area()).unwrap())
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("SkillShare Hub"));
        assert!(text.contains("Password"));
    }
}
