//! Modal dialog state
//!
//! One shared dialog hosts the login, registration and quiz forms. The state
//! enum makes "at most one form visible" structural: there is no way to
//! represent two forms showing at once.

use std::fmt;
use std::str::FromStr;

/// The forms that can be shown inside the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Login,
    Register,
    Quiz,
}

impl FormKind {
    pub fn all() -> [FormKind; 3] {
        [FormKind::Login, FormKind::Register, FormKind::Quiz]
    }

    pub fn name(&self) -> &'static str {
        match self {
            FormKind::Login => "login",
            FormKind::Register => "register",
            FormKind::Quiz => "quiz",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            FormKind::Login => " Log In ",
            FormKind::Register => " Join SkillShare Hub ",
            FormKind::Quiz => " Skill Quiz ",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Text that does not name a form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form kind: {0:?}")]
pub struct UnknownFormKind(pub String);

impl FromStr for FormKind {
    type Err = UnknownFormKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(FormKind::Login),
            "register" => Ok(FormKind::Register),
            "quiz" => Ok(FormKind::Quiz),
            other => Err(UnknownFormKind(other.to_string())),
        }
    }
}

/// Which form, if any, the dialog currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    ShowingLogin,
    ShowingRegister,
    ShowingQuiz,
}

impl ModalState {
    pub fn showing(kind: FormKind) -> Self {
        match kind {
            FormKind::Login => ModalState::ShowingLogin,
            FormKind::Register => ModalState::ShowingRegister,
            FormKind::Quiz => ModalState::ShowingQuiz,
        }
    }

    /// The visible form, `None` when closed
    pub fn form(&self) -> Option<FormKind> {
        match self {
            ModalState::Closed => None,
            ModalState::ShowingLogin => Some(FormKind::Login),
            ModalState::ShowingRegister => Some(FormKind::Register),
            ModalState::ShowingQuiz => Some(FormKind::Quiz),
        }
    }

    pub fn is_open(&self) -> bool {
        *self != ModalState::Closed
    }

    pub fn is_visible(&self, kind: FormKind) -> bool {
        self.form() == Some(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_showing_maps_back_to_form() {
        for kind in FormKind::all() {
            let state = ModalState::showing(kind);
            assert!(state.is_open());
            assert_eq!(state.form(), Some(kind));
        }
    }

    #[test]
    fn test_exactly_one_form_visible() {
        for kind in FormKind::all() {
            let state = ModalState::showing(kind);
            let visible = FormKind::all()
                .into_iter()
                .filter(|k| state.is_visible(*k))
                .count();
            assert_eq!(visible, 1);
        }
    }

    #[test]
    fn test_closed_by_default() {
        let state = ModalState::default();
        assert!(!state.is_open());
        assert_eq!(state.form(), None);
    }

    #[test]
    fn test_form_kind_from_str() {
        assert_eq!("login".parse::<FormKind>(), Ok(FormKind::Login));
        assert_eq!("quiz".parse::<FormKind>(), Ok(FormKind::Quiz));
        assert_eq!(
            "signup".parse::<FormKind>(),
            Err(UnknownFormKind("signup".to_string()))
        );
    }
}
