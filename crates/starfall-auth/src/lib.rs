//! Authentication collaborator for the starfall front end.
//!
//! - [`AuthProvider`]: the identity-provider seam (email/password, federated
//!   sign-in, sign-out, state-change subscriptions)
//! - [`MemoryAuthProvider`]: an in-process provider used by the binary and tests
//! - [`AuthForm`]: login/signup form state driven by keyboard input

pub mod form;
pub mod memory;
pub mod provider;

pub use form::{AuthForm, AuthMode, FormField, FormOutcome};
pub use memory::MemoryAuthProvider;
pub use provider::{AuthError, AuthProvider, FederatedProvider, Identity, StateCallback, Subscription};
