//! Authentication seam
//!
//! The portal core never talks to an identity provider itself; it only asks
//! "is the user signed in right now" before a chat send, and lets callers
//! subscribe to sign-in state flips. The actual provider integration lives
//! outside the core behind this trait.

use log::debug;

/// External authentication collaborator.
pub trait AuthProvider {
    /// Whether a user is currently signed in.
    fn is_authenticated(&self) -> bool;

    /// Register a callback invoked with the new state on every sign-in or
    /// sign-out.
    fn on_auth_change(&mut self, callback: Box<dyn FnMut(bool)>);
}

/// In-memory provider for tests and demos.
///
/// Holds a boolean and notifies registered listeners when it is toggled.
pub struct StaticAuth {
    authenticated: bool,
    listeners: Vec<Box<dyn FnMut(bool)>>,
}

impl StaticAuth {
    pub fn signed_in() -> Self {
        StaticAuth {
            authenticated: true,
            listeners: Vec::new(),
        }
    }

    pub fn signed_out() -> Self {
        StaticAuth {
            authenticated: false,
            listeners: Vec::new(),
        }
    }

    /// Flip the sign-in state, notifying listeners on an actual change.
    pub fn set_authenticated(&mut self, authenticated: bool) {
        if self.authenticated == authenticated {
            return;
        }
        self.authenticated = authenticated;
        debug!("Auth state changed: authenticated={}", authenticated);
        for listener in &mut self.listeners {
            listener(authenticated);
        }
    }
}

impl AuthProvider for StaticAuth {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn on_auth_change(&mut self, callback: Box<dyn FnMut(bool)>) {
        self.listeners.push(callback);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
