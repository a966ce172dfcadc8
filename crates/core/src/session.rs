//! Explicit login state for the page shell.
//!
//! The passphrase is compared in plaintext on the client. This only decides
//! which pages are shown; it protects nothing.

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Lifecycle of a visit: anonymous until a successful login, back to
/// anonymous on logout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated)
    }

    pub fn logout(&mut self) {
        *self = Session::Anonymous;
    }
}

/// Holds the expected passphrase and moves sessions through their lifecycle.
#[derive(Debug, Clone)]
pub struct Gate {
    passphrase: String,
}

impl Gate {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
        }
    }

    /// Authenticates `session` when `candidate` matches.
    ///
    /// On mismatch the session is left as it was and `Error::Rejected` is
    /// returned.
    pub fn login(&self, session: &mut Session, candidate: &str) -> Result<(), Error> {
        if candidate == self.passphrase {
            *session = Session::Authenticated;
            Ok(())
        } else {
            log::warn!("login rejected");
            Err(Error::Rejected)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sessions_start_anonymous() {
        assert!(!Session::default().is_authenticated());
    }

    #[test]
    fn correct_passphrase_authenticates() {
        let gate = Gate::new("open sesame");
        let mut s = Session::default();
        gate.login(&mut s, "open sesame").unwrap();
        assert!(s.is_authenticated());
    }

    #[test]
    fn wrong_passphrase_is_rejected_and_keeps_state() {
        let gate = Gate::new("open sesame");
        let mut s = Session::default();
        assert!(matches!(gate.login(&mut s, "open says me"), Err(Error::Rejected)));
        assert_eq!(s, Session::Anonymous);

        gate.login(&mut s, "open sesame").unwrap();
        assert!(gate.login(&mut s, "").is_err());
        assert_eq!(s, Session::Authenticated);
    }

    #[test]
    fn logout_clears_authentication() {
        let gate = Gate::new("x");
        let mut s = Session::default();
        gate.login(&mut s, "x").unwrap();
        s.logout();
        assert!(!s.is_authenticated());
    }

    #[test]
    fn session_serializes_as_variant_name() {
        let json = serde_json::to_string(&Session::Authenticated).unwrap();
        assert_eq!(json, "\"Authenticated\"");
    }
}
