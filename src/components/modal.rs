//! Modal controller
//!
//! Owns the shared dialog: which form shows, the open/close lifecycle and the
//! dismissal triggers (backdrop click, Esc). While a form shows, the page
//! behind it does not scroll.

use crate::action::Action;
use crate::component::Component;
use crate::components::form_dialog::FormDialog;
use crate::components::layout::{centered_popup, contains};
use crate::model::{FormKind, ModalState, QuizQuestion};
use anyhow::Result;
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::Block,
    Frame,
};
use tracing::debug;

pub struct ModalController {
    state: ModalState,
    login: FormDialog,
    register: FormDialog,
    quiz: FormDialog,
    /// Last known terminal area, needed to place the dialog for hit testing
    screen: Rect,
}

impl ModalController {
    pub fn new(quiz_questions: &[QuizQuestion]) -> Self {
        Self {
            state: ModalState::Closed,
            login: FormDialog::login(),
            register: FormDialog::register(),
            quiz: FormDialog::quiz(quiz_questions),
            screen: Rect::default(),
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Background scrolling is suppressed while any form shows
    pub fn scroll_locked(&self) -> bool {
        self.is_open()
    }

    pub fn set_screen(&mut self, screen: Rect) {
        self.screen = screen;
    }

    /// Show `kind`, hiding whichever form was showing before
    pub fn open(&mut self, kind: FormKind) {
        debug!(form = %kind, "opening modal");
        self.state = ModalState::showing(kind);
    }

    /// Hide the dialog. Safe to call when already closed.
    pub fn close(&mut self) {
        if self.state.is_open() {
            debug!("closing modal");
        }
        self.state = ModalState::Closed;
    }

    pub fn form(&self, kind: FormKind) -> &FormDialog {
        match kind {
            FormKind::Login => &self.login,
            FormKind::Register => &self.register,
            FormKind::Quiz => &self.quiz,
        }
    }

    pub fn form_mut(&mut self, kind: FormKind) -> &mut FormDialog {
        match kind {
            FormKind::Login => &mut self.login,
            FormKind::Register => &mut self.register,
            FormKind::Quiz => &mut self.quiz,
        }
    }

    /// Forms currently visible; never more than one
    pub fn visible_forms(&self) -> Vec<FormKind> {
        FormKind::all()
            .into_iter()
            .filter(|kind| self.state.is_visible(*kind))
            .collect()
    }

    /// Where the dialog sits on screen, if open
    pub fn dialog_area(&self) -> Option<Rect> {
        let kind = self.state.form()?;
        let (width, height) = self.form(kind).size();
        Some(centered_popup(self.screen, width, height))
    }

    /// Whether a press at (column, row) lands on the backdrop rather than the dialog
    pub fn is_backdrop_hit(&self, column: u16, row: u16) -> bool {
        match self.dialog_area() {
            Some(dialog) => !contains(dialog, column, row),
            None => false,
        }
    }
}

impl Component for ModalController {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.state.form() {
            Some(kind) => self.form_mut(kind).handle_key_event(key),
            None => Ok(None),
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if mouse.kind == MouseEventKind::Down(MouseButton::Left)
            && self.is_backdrop_hit(mouse.column, mouse.row)
        {
            return Ok(Some(Action::CloseModal));
        }
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::OpenForm(kind) => self.open(kind),
            Action::CloseModal => self.close(),
            Action::Resize(w, h) => self.set_screen(Rect::new(0, 0, w, h)),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.screen = area;
        let (Some(dialog), visible) = (self.dialog_area(), self.visible_forms()) else {
            return Ok(());
        };

        // Dim the page behind the dialog
        frame.render_widget(
            Block::default().style(Style::default().add_modifier(Modifier::DIM)),
            area,
        );

        for kind in visible {
            self.form_mut(kind).draw(frame, dialog)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn controller() -> ModalController {
        let mut modal = ModalController::new(&[]);
        modal.set_screen(Rect::new(0, 0, 100, 40));
        modal
    }

    fn press(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_open_shows_exactly_one_form() {
        let mut modal = controller();
        for kind in FormKind::all() {
            modal.open(kind);
            assert_eq!(modal.visible_forms(), vec![kind]);
            assert!(modal.is_open());
            assert!(modal.scroll_locked());
        }
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut modal = controller();
        modal.open(FormKind::Login);
        modal.close();
        let once = modal.state();
        modal.close();
        assert_eq!(modal.state(), once);
        assert_eq!(modal.state(), ModalState::Closed);
        assert!(modal.visible_forms().is_empty());
        assert!(!modal.scroll_locked());
    }

    #[test]
    fn test_backdrop_click_closes() {
        let mut modal = controller();
        modal.open(FormKind::Login);
        assert_eq!(
            modal.handle_mouse_event(press(0, 0)).unwrap(),
            Some(Action::CloseModal)
        );
    }

    #[test]
    fn test_click_inside_dialog_keeps_it_open() {
        let mut modal = controller();
        modal.open(FormKind::Register);
        let dialog = modal.dialog_area().unwrap();
        let inside = press(dialog.x + 2, dialog.y + 1);
        assert_eq!(modal.handle_mouse_event(inside).unwrap(), None);

        let corner = press(dialog.x, dialog.y);
        assert_eq!(modal.handle_mouse_event(corner).unwrap(), None);
    }

    #[test]
    fn test_click_while_closed_does_nothing() {
        let mut modal = controller();
        assert_eq!(modal.handle_mouse_event(press(0, 0)).unwrap(), None);
    }

    #[test]
    fn test_right_click_on_backdrop_is_ignored() {
        let mut modal = controller();
        modal.open(FormKind::Quiz);
        let event = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            ..press(0, 0)
        };
        assert_eq!(modal.handle_mouse_event(event).unwrap(), None);
    }

    #[test]
    fn test_escape_only_acts_when_open() {
        let mut modal = controller();
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(modal.handle_key_event(esc).unwrap(), None);

        modal.open(FormKind::Quiz);
        assert_eq!(
            modal.handle_key_event(esc).unwrap(),
            Some(Action::CloseModal)
        );
    }

    #[test]
    fn test_resize_moves_dialog() {
        let mut modal = controller();
        modal.open(FormKind::Login);
        let before = modal.dialog_area().unwrap();
        modal.update(Action::Resize(200, 60)).unwrap();
        assert_ne!(modal.dialog_area().unwrap(), before);
    }
}
