//! # Session
//!
//! Who is at the terminal right now.
//!
//! ```text
//!                log_in(user)
//!   ┌───────────┐ ───────────► ┌─────────────────────┐
//!   │ Anonymous │              │ Authenticated(User) │
//!   └───────────┘ ◄─────────── └─────────────────────┘
//!                  log_out()
//! ```
//!
//! Handlers in the user menu receive the [`User`] out of an authenticated
//! session, so "am I logged in?" is answered by the type system rather than
//! by a nullable id.

use crate::types::User;

/// Current login state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    /// Nobody is logged in. The main menu is shown.
    #[default]
    Anonymous,
    /// A user is logged in. The user menu is shown.
    Authenticated(User),
}

impl Session {
    /// Starts a session for `user`, replacing any previous one.
    pub fn log_in(&mut self, user: User) {
        *self = Session::Authenticated(user);
    }

    /// Ends the session and returns the user who was logged in.
    pub fn log_out(&mut self) -> Option<User> {
        match std::mem::take(self) {
            Session::Authenticated(user) => Some(user),
            Session::Anonymous => None,
        }
    }

    /// The logged in user, if any.
    pub fn current(&self) -> Option<&User> {
        match self {
            Session::Authenticated(user) => Some(user),
            Session::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Point;
    use crate::types::UserRole;

    fn alice() -> User {
        User {
            id: 7,
            name: "alice".to_string(),
            location: Point::new(10.0, 10.0),
            role: UserRole::Customer,
        }
    }

    #[test]
    fn test_starts_anonymous() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert!(session.current().is_none());
    }

    #[test]
    fn test_log_in_then_out() {
        let mut session = Session::default();
        session.log_in(alice());

        assert!(session.is_authenticated());
        assert_eq!(session.current().map(|u| u.id), Some(7));

        let user = session.log_out();
        assert_eq!(user.map(|u| u.name), Some("alice".to_string()));
        assert_eq!(session, Session::Anonymous);
    }

    #[test]
    fn test_log_out_when_anonymous_is_noop() {
        let mut session = Session::Anonymous;
        assert!(session.log_out().is_none());
        assert!(!session.is_authenticated());
    }
}
