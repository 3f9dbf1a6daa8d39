//! View composition. Which surface is shown is a pure function of the session:
//! no credential means the sign-in surface, a credential means the visitors
//! surface. There is no transition back; the session only ever gains a token.
//! Renderers receive already-computed state and return plain text.

mod alert;
mod sign_in;
mod visitors;

pub use alert::{alert, AlertKind};
pub use sign_in::{render_sign_in, SignInState};
pub use visitors::render_visitors;

use crate::features::auth::{Credential, SessionStore};

/// Surface selected for the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    SignIn,
    Visitors,
}

impl Screen {
    #[must_use]
    pub fn from_session(credential: Option<&Credential>) -> Self {
        if credential.is_some() {
            Screen::Visitors
        } else {
            Screen::SignIn
        }
    }

    #[must_use]
    pub fn compose(session: &SessionStore) -> Self {
        Self::from_session(session.get().as_ref())
    }

    #[must_use]
    pub fn is_authenticated(self) -> bool {
        self == Screen::Visitors
    }
}

#[cfg(test)]
mod tests {
    use super::Screen;
    use crate::features::auth::{Credential, SessionStore};

    #[test]
    fn absent_credential_selects_sign_in() {
        assert_eq!(Screen::from_session(None), Screen::SignIn);
        assert!(!Screen::SignIn.is_authenticated());
    }

    #[test]
    fn present_credential_selects_visitors() {
        let credential = Credential::new("tok-1".to_string());
        assert_eq!(Screen::from_session(Some(&credential)), Screen::Visitors);
    }

    #[test]
    fn compose_follows_the_store() {
        let session = SessionStore::new();
        assert_eq!(Screen::compose(&session), Screen::SignIn);

        session.set(Credential::new("tok-1".to_string()));
        assert_eq!(Screen::compose(&session), Screen::Visitors);
        assert!(Screen::compose(&session).is_authenticated());
    }
}
