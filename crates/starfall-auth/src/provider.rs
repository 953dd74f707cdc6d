use std::fmt;

// ── Identity ──────────────────────────────────────────────────────────────

/// A signed-in user as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub uid: String,
    pub email: String,
}

/// Third-party identity providers offered next to email/password.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FederatedProvider {
    Google,
}

impl FederatedProvider {
    pub fn display_name(self) -> &'static str {
        match self {
            FederatedProvider::Google => "Google",
        }
    }
}

// ── AuthError ─────────────────────────────────────────────────────────────

/// A rejected auth operation.
///
/// `code` is the machine-readable reason (`auth/wrong-password`, ...);
/// `message` is what the user is shown, verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthError {
    pub code: String,
    pub message: String,
}

impl AuthError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: code.into(), message: message.into() }
    }

    /// An error whose message is derived from its code.
    pub fn from_code(code: &str) -> Self {
        Self::new(code, format!("Error ({code})."))
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AuthError {}

// ── Subscription ──────────────────────────────────────────────────────────

/// Auth-state listener. Receives `None` when signed out.
pub type StateCallback = Box<dyn FnMut(Option<&Identity>)>;

/// Keeps an auth-state listener registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    /// Unsubscribes now rather than at drop.
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

// ── AuthProvider ──────────────────────────────────────────────────────────

/// The identity-provider seam.
///
/// Operations complete synchronously from the caller's point of view; a
/// provider backed by a remote service blocks or drives its own executor.
/// Methods take `&self`; providers keep their state behind interior
/// mutability so listeners can be notified while the caller holds a handle.
pub trait AuthProvider {
    /// Registers a new account and signs it in.
    fn create_account(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    fn sign_in_with_federated_provider(&self, provider: FederatedProvider) -> Result<Identity, AuthError>;

    fn sign_out(&self);

    fn current_identity(&self) -> Option<Identity>;

    /// Calls `callback` immediately with the current identity, then after
    /// every change until the returned [`Subscription`] is dropped.
    fn on_auth_state_change(&self, callback: StateCallback) -> Subscription;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn error_displays_its_message_verbatim() {
        let e = AuthError::new("auth/custom", "invalid-password");
        assert_eq!(e.to_string(), "invalid-password");
        assert_eq!(AuthError::from_code("auth/weak-password").to_string(), "Error (auth/weak-password).");
    }

    #[test]
    fn subscription_cancels_once() {
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let sub = Subscription::new(move || c.set(c.get() + 1));
        sub.unsubscribe();
        assert_eq!(calls.get(), 1);

        let c = calls.clone();
        drop(Subscription::new(move || c.set(c.get() + 1)));
        assert_eq!(calls.get(), 2);
    }
}
