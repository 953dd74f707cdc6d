//! In-process identity provider.
//!
//! Accounts live in a map keyed by lower-cased email. Federated sign-in
//! succeeds only for providers that were linked ahead of time with
//! [`MemoryAuthProvider::link_federated`]; anything else behaves like a user
//! dismissing the provider's sign-in window.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::{Rc, Weak};

use crate::provider::{AuthError, AuthProvider, FederatedProvider, Identity, StateCallback, Subscription};

pub const MIN_PASSWORD_LEN: usize = 6;

pub const INVALID_EMAIL: &str = "auth/invalid-email";
pub const WEAK_PASSWORD: &str = "auth/weak-password";
pub const EMAIL_ALREADY_IN_USE: &str = "auth/email-already-in-use";
pub const USER_NOT_FOUND: &str = "auth/user-not-found";
pub const WRONG_PASSWORD: &str = "auth/wrong-password";
pub const POPUP_CLOSED_BY_USER: &str = "auth/popup-closed-by-user";

#[derive(Debug, Clone)]
struct Account {
    uid: String,
    email: String,
    /// `None` for accounts that only exist through a federated link.
    password: Option<String>,
}

#[derive(Default)]
struct State {
    accounts: HashMap<String, Account>,
    federated: HashMap<FederatedProvider, String>,
    current: Option<Identity>,
    next_uid: u64,
}

impl State {
    fn insert_account(&mut self, email: &str, password: Option<String>) -> Identity {
        self.next_uid += 1;
        let account = Account {
            uid: format!("local-{:04}", self.next_uid),
            email: email.to_string(),
            password,
        };
        let identity = identity_of(&account);
        self.accounts.insert(normalize(email), account);
        identity
    }
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, StateCallback)>,
    /// Nesting depth of `notify`; while non-zero the running entries are
    /// taken out of `entries`.
    notifying: u32,
    /// Ids unsubscribed while a notification was running.
    removed: HashSet<u64>,
}

impl Listeners {
    fn unsubscribe(&mut self, id: u64) {
        self.entries.retain(|(entry, _)| *entry != id);
        if self.notifying > 0 {
            self.removed.insert(id);
        }
    }
}

/// Cheap to clone; clones share accounts, session and listeners.
#[derive(Clone, Default)]
pub struct MemoryAuthProvider {
    state: Rc<RefCell<State>>,
    listeners: Rc<RefCell<Listeners>>,
}

impl MemoryAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an email/password account without signing it in.
    pub fn with_account(self, email: &str, password: &str) -> Result<Self, AuthError> {
        validate_email(email)?;
        validate_password(password)?;
        {
            let mut state = self.state.borrow_mut();
            if state.accounts.contains_key(&normalize(email)) {
                return Err(AuthError::from_code(EMAIL_ALREADY_IN_USE));
            }
            state.insert_account(email, Some(password.to_string()));
        }
        Ok(self)
    }

    /// Links `provider` to `email` so federated sign-in succeeds. Creates a
    /// password-less account when none exists.
    pub fn link_federated(self, provider: FederatedProvider, email: &str) -> Result<Self, AuthError> {
        validate_email(email)?;
        {
            let mut state = self.state.borrow_mut();
            let key = normalize(email);
            if !state.accounts.contains_key(&key) {
                state.insert_account(email, None);
            }
            state.federated.insert(provider, key);
        }
        Ok(self)
    }

    pub fn account_count(&self) -> usize {
        self.state.borrow().accounts.len()
    }

    fn set_current(&self, identity: Option<Identity>) {
        self.state.borrow_mut().current = identity.clone();
        self.notify(identity.as_ref());
    }

    /// Runs every listener. Listeners registered during notification are kept
    /// but not called for this change; listeners unsubscribed during it are
    /// skipped and dropped.
    fn notify(&self, identity: Option<&Identity>) {
        let mut running = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.notifying += 1;
            std::mem::take(&mut listeners.entries)
        };

        for (id, callback) in running.iter_mut() {
            if self.listeners.borrow().removed.contains(id) {
                continue;
            }
            callback(identity);
        }

        let mut listeners = self.listeners.borrow_mut();
        let added = std::mem::take(&mut listeners.entries);
        running.extend(added);
        running.retain(|(id, _)| !listeners.removed.contains(id));
        listeners.entries = running;

        listeners.notifying -= 1;
        if listeners.notifying == 0 {
            listeners.removed.clear();
        }
    }
}

impl AuthProvider for MemoryAuthProvider {
    fn create_account(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        validate_email(email)?;
        validate_password(password)?;

        let identity = {
            let mut state = self.state.borrow_mut();
            if state.accounts.contains_key(&normalize(email)) {
                log::warn!("account creation rejected: {email} already registered");
                return Err(AuthError::from_code(EMAIL_ALREADY_IN_USE));
            }
            state.insert_account(email, Some(password.to_string()))
        };

        log::info!("created account {} ({})", identity.email, identity.uid);
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        validate_email(email)?;

        let identity = {
            let state = self.state.borrow();
            let account = state
                .accounts
                .get(&normalize(email))
                .ok_or_else(|| AuthError::from_code(USER_NOT_FOUND))?;
            if account.password.as_deref() != Some(password) {
                log::warn!("sign-in rejected for {email}: wrong password");
                return Err(AuthError::from_code(WRONG_PASSWORD));
            }
            identity_of(account)
        };

        log::info!("signed in {}", identity.email);
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    fn sign_in_with_federated_provider(&self, provider: FederatedProvider) -> Result<Identity, AuthError> {
        let identity = {
            let state = self.state.borrow();
            state
                .federated
                .get(&provider)
                .and_then(|key| state.accounts.get(key))
                .map(identity_of)
        };

        let Some(identity) = identity else {
            log::warn!("{} sign-in closed without an account", provider.display_name());
            return Err(AuthError::from_code(POPUP_CLOSED_BY_USER));
        };

        log::info!("signed in {} via {}", identity.email, provider.display_name());
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    fn sign_out(&self) {
        let previous = self.state.borrow().current.clone();
        if let Some(identity) = previous {
            log::info!("signed out {}", identity.email);
            self.set_current(None);
        }
    }

    fn current_identity(&self) -> Option<Identity> {
        self.state.borrow().current.clone()
    }

    fn on_auth_state_change(&self, mut callback: StateCallback) -> Subscription {
        let current = self.current_identity();
        callback(current.as_ref());

        let id = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.next_id += 1;
            let id = listeners.next_id;
            listeners.entries.push((id, callback));
            id
        };

        let weak: Weak<RefCell<Listeners>> = Rc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(listeners) = weak.upgrade() {
                listeners.borrow_mut().unsubscribe(id);
            }
        })
    }
}

fn identity_of(account: &Account) -> Identity {
    Identity { uid: account.uid.clone(), email: account.email.clone() }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_email(email: &str) -> Result<(), AuthError> {
    match email.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(AuthError::from_code(INVALID_EMAIL)),
    }
}

fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::new(
            WEAK_PASSWORD,
            format!("Error ({WEAK_PASSWORD}): password should be at least {MIN_PASSWORD_LEN} characters."),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(provider: &MemoryAuthProvider) -> (Rc<RefCell<Vec<Option<String>>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let sub = provider.on_auth_state_change(Box::new(move |id: Option<&Identity>| {
            sink.borrow_mut().push(id.map(|i| i.email.clone()));
        }));
        (seen, sub)
    }

    #[test]
    fn create_account_signs_in() {
        let p = MemoryAuthProvider::new();
        let id = p.create_account("ada@example.com", "hunter22").unwrap();
        assert_eq!(p.current_identity(), Some(id.clone()));
        assert_eq!(id.email, "ada@example.com");
        assert_eq!(p.account_count(), 1);
    }

    #[test]
    fn rejection_codes() {
        let p = MemoryAuthProvider::new().with_account("ada@example.com", "hunter22").unwrap();

        let code = |r: Result<Identity, AuthError>| r.unwrap_err().code;
        assert_eq!(code(p.create_account("no-at-sign", "hunter22")), INVALID_EMAIL);
        assert_eq!(code(p.create_account("bob@example.com", "12345")), WEAK_PASSWORD);
        assert_eq!(code(p.create_account("ADA@example.com", "hunter22")), EMAIL_ALREADY_IN_USE);
        assert_eq!(code(p.sign_in("bob@example.com", "hunter22")), USER_NOT_FOUND);
        assert_eq!(code(p.sign_in("ada@example.com", "hunter2")), WRONG_PASSWORD);
        assert_eq!(code(p.sign_in_with_federated_provider(FederatedProvider::Google)), POPUP_CLOSED_BY_USER);
        assert_eq!(p.current_identity(), None);
    }

    #[test]
    fn sign_in_is_case_insensitive_on_email() {
        let p = MemoryAuthProvider::new().with_account("Ada@Example.com", "hunter22").unwrap();
        let id = p.sign_in("ada@example.com", "hunter22").unwrap();
        assert_eq!(id.email, "Ada@Example.com");
    }

    #[test]
    fn federated_link_signs_in_without_password() {
        let p = MemoryAuthProvider::new()
            .link_federated(FederatedProvider::Google, "g@example.com")
            .unwrap();
        let id = p.sign_in_with_federated_provider(FederatedProvider::Google).unwrap();
        assert_eq!(id.email, "g@example.com");

        p.sign_out();
        assert_eq!(p.sign_in("g@example.com", "anything").unwrap_err().code, WRONG_PASSWORD);
    }

    #[test]
    fn listener_fires_immediately_then_on_change() {
        let p = MemoryAuthProvider::new();
        let (seen, sub) = recorder(&p);
        assert_eq!(*seen.borrow(), vec![None]);

        p.create_account("ada@example.com", "hunter22").unwrap();
        p.sign_out();
        // Already signed out: no change, no callback.
        p.sign_out();

        assert_eq!(
            *seen.borrow(),
            vec![None, Some("ada@example.com".to_string()), None]
        );

        drop(sub);
        p.sign_in("ada@example.com", "hunter22").unwrap();
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn dropping_one_subscription_keeps_the_others() {
        let p = MemoryAuthProvider::new().with_account("ada@example.com", "hunter22").unwrap();
        let (a, sub_a) = recorder(&p);
        let (b, _sub_b) = recorder(&p);

        drop(sub_a);
        p.sign_in("ada@example.com", "hunter22").unwrap();
        assert_eq!(a.borrow().len(), 1);
        assert_eq!(b.borrow().len(), 2);
    }

    #[test]
    fn listener_may_call_back_into_provider() {
        let p = MemoryAuthProvider::new().with_account("ada@example.com", "hunter22").unwrap();
        let inner = p.clone();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = p.on_auth_state_change(Box::new(move |_| {
            sink.borrow_mut().push(inner.current_identity().map(|i| i.uid));
        }));

        p.sign_in("ada@example.com", "hunter22").unwrap();
        assert_eq!(seen.borrow().len(), 2);
        assert!(seen.borrow()[1].is_some());
    }

    #[test]
    fn unsubscribing_another_listener_mid_notification_sticks() {
        let p = MemoryAuthProvider::new().with_account("ada@example.com", "hunter22").unwrap();

        let (b_seen, sub_b) = recorder(&p);
        let held = Rc::new(RefCell::new(Some(sub_b)));
        let drop_b = held.clone();
        let _sub_a = p.on_auth_state_change(Box::new(move |id: Option<&Identity>| {
            if id.is_some() {
                drop_b.borrow_mut().take();
            }
        }));

        // A runs after B here, so B sees the sign-in itself.
        p.sign_in("ada@example.com", "hunter22").unwrap();
        assert!(held.borrow().is_none());
        assert_eq!(b_seen.borrow().len(), 2);

        p.sign_out();
        p.sign_in("ada@example.com", "hunter22").unwrap();
        assert_eq!(b_seen.borrow().len(), 2);
    }

    #[test]
    fn listener_dropped_before_its_turn_is_skipped() {
        let p = MemoryAuthProvider::new().with_account("ada@example.com", "hunter22").unwrap();

        let held: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let drop_b = held.clone();
        let _sub_a = p.on_auth_state_change(Box::new(move |id: Option<&Identity>| {
            if id.is_some() {
                drop_b.borrow_mut().take();
            }
        }));
        let (b_seen, sub_b) = recorder(&p);
        *held.borrow_mut() = Some(sub_b);

        p.sign_in("ada@example.com", "hunter22").unwrap();
        assert_eq!(*b_seen.borrow(), vec![None]);
    }

    #[test]
    fn subscription_outliving_provider_is_harmless() {
        let p = MemoryAuthProvider::new();
        let (_seen, sub) = recorder(&p);
        drop(p);
        drop(sub);
    }
}
