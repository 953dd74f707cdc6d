//! Login/signup form state.
//!
//! The form never retries: a rejected submission stores the provider's
//! message verbatim and keeps both field values so the user can correct them.

use crate::provider::{AuthError, AuthProvider, FederatedProvider, Identity};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum FormField {
    #[default]
    Email,
    Password,
}

/// Result of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    SignedIn(Identity),
    Rejected,
    /// A required field was empty; nothing was sent to the provider.
    Incomplete,
}

#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    mode: AuthMode,
    focus: FormField,
    email: String,
    password: String,
    error: Option<String>,
}

impl AuthForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        if !self.email.is_empty() {
            self.focus = FormField::Password;
        }
        self
    }

    #[inline]
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    #[inline]
    pub fn focus(&self) -> FormField {
        self.focus
    }

    #[inline]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[inline]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// The password as displayed: one bullet per character.
    pub fn masked_password(&self) -> String {
        "•".repeat(self.password.chars().count())
    }

    #[inline]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Title and submit label for the current mode.
    pub fn heading(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "Login",
            AuthMode::Signup => "Signup",
        }
    }

    pub fn switch_prompt(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "Don't have an account? Signup",
            AuthMode::Signup => "Already have an account? Login",
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        };
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Email => FormField::Password,
            FormField::Password => FormField::Email,
        };
    }

    /// Appends typed text to the focused field. Control characters are dropped.
    pub fn insert_text(&mut self, text: &str) {
        let field = self.focused_mut();
        field.extend(text.chars().filter(|c| !c.is_control()));
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    /// Creates an account (signup) or signs in (login) with the field values.
    pub fn submit(&mut self, provider: &dyn AuthProvider) -> FormOutcome {
        if self.email.is_empty() {
            self.focus = FormField::Email;
            return FormOutcome::Incomplete;
        }
        if self.password.is_empty() {
            self.focus = FormField::Password;
            return FormOutcome::Incomplete;
        }

        let result = match self.mode {
            AuthMode::Login => provider.sign_in(&self.email, &self.password),
            AuthMode::Signup => provider.create_account(&self.email, &self.password),
        };
        self.settle(result)
    }

    pub fn continue_with(&mut self, provider: &dyn AuthProvider, federated: FederatedProvider) -> FormOutcome {
        let result = provider.sign_in_with_federated_provider(federated);
        self.settle(result)
    }

    fn settle(&mut self, result: Result<Identity, AuthError>) -> FormOutcome {
        match result {
            Ok(identity) => {
                self.error = None;
                FormOutcome::SignedIn(identity)
            }
            Err(err) => {
                log::debug!("auth form rejected: {}", err.code);
                self.error = Some(err.to_string());
                FormOutcome::Rejected
            }
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Email => &mut self.email,
            FormField::Password => &mut self.password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryAuthProvider;
    use crate::provider::{StateCallback, Subscription};
    use std::cell::RefCell;

    /// Rejects everything with a fixed message and records what it was asked.
    struct Rejecting {
        message: &'static str,
        calls: RefCell<Vec<String>>,
    }

    impl Rejecting {
        fn new(message: &'static str) -> Self {
            Self { message, calls: RefCell::new(Vec::new()) }
        }

        fn reject(&self, call: String) -> Result<Identity, AuthError> {
            self.calls.borrow_mut().push(call);
            Err(AuthError::new("auth/mock", self.message))
        }
    }

    impl AuthProvider for Rejecting {
        fn create_account(&self, email: &str, _: &str) -> Result<Identity, AuthError> {
            self.reject(format!("create {email}"))
        }
        fn sign_in(&self, email: &str, _: &str) -> Result<Identity, AuthError> {
            self.reject(format!("sign_in {email}"))
        }
        fn sign_in_with_federated_provider(&self, p: FederatedProvider) -> Result<Identity, AuthError> {
            self.reject(format!("federated {}", p.display_name()))
        }
        fn sign_out(&self) {}
        fn current_identity(&self) -> Option<Identity> {
            None
        }
        fn on_auth_state_change(&self, mut callback: StateCallback) -> Subscription {
            callback(None);
            Subscription::new(|| {})
        }
    }

    fn filled(email: &str, password: &str) -> AuthForm {
        let mut form = AuthForm::new();
        form.insert_text(email);
        form.toggle_focus();
        form.insert_text(password);
        form
    }

    #[test]
    fn rejected_submit_keeps_inputs_and_stores_message() {
        let provider = Rejecting::new("invalid-password");
        let mut form = filled("ada@example.com", "hunter22");

        assert_eq!(form.submit(&provider), FormOutcome::Rejected);
        assert_eq!(form.error(), Some("invalid-password"));
        assert_eq!(form.email(), "ada@example.com");
        assert_eq!(form.password(), "hunter22");
        assert_eq!(provider.calls.borrow().len(), 1);
    }

    #[test]
    fn mode_selects_provider_operation() {
        let provider = Rejecting::new("nope");
        let mut form = filled("ada@example.com", "hunter22");

        form.submit(&provider);
        form.toggle_mode();
        form.submit(&provider);
        form.continue_with(&provider, FederatedProvider::Google);

        assert_eq!(
            *provider.calls.borrow(),
            vec!["sign_in ada@example.com", "create ada@example.com", "federated Google"]
        );
    }

    #[test]
    fn success_clears_previous_error() {
        let provider = MemoryAuthProvider::new();
        let mut form = filled("ada@example.com", "hunter22");

        assert_eq!(form.submit(&provider), FormOutcome::Rejected);
        assert_eq!(form.error(), Some("Error (auth/user-not-found)."));

        form.toggle_mode();
        assert!(matches!(form.submit(&provider), FormOutcome::SignedIn(_)));
        assert_eq!(form.error(), None);
    }

    #[test]
    fn empty_fields_are_not_submitted() {
        let provider = Rejecting::new("nope");
        let mut form = AuthForm::new();
        form.toggle_focus();
        assert_eq!(form.submit(&provider), FormOutcome::Incomplete);
        assert_eq!(form.focus(), FormField::Email);

        form.insert_text("a@b");
        assert_eq!(form.submit(&provider), FormOutcome::Incomplete);
        assert_eq!(form.focus(), FormField::Password);
        assert!(provider.calls.borrow().is_empty());
        assert_eq!(form.error(), None);
    }

    #[test]
    fn labels_follow_mode() {
        let mut form = AuthForm::new();
        assert_eq!((form.heading(), form.switch_prompt()), ("Login", "Don't have an account? Signup"));
        form.toggle_mode();
        assert_eq!((form.heading(), form.switch_prompt()), ("Signup", "Already have an account? Login"));
    }

    #[test]
    fn editing_targets_focused_field() {
        let mut form = AuthForm::new().with_email("ada@example.com");
        assert_eq!(form.focus(), FormField::Password);

        form.insert_text("pw\r");
        form.backspace();
        assert_eq!(form.password(), "p");
        assert_eq!(form.masked_password(), "•");

        form.toggle_focus();
        form.backspace();
        assert_eq!(form.email(), "ada@example.co");
    }
}
