// Public modules
pub mod chat;
pub mod client;
pub mod controller;
pub mod drag;
pub mod error;
pub mod observability;
pub mod render;
pub mod session;
pub mod types;
pub mod view;

// Re-exports
pub use client::{ChatBackend, HttpBackend};
pub use controller::{ChatClient, ClientStatus, LoginOutcome, SendOutcome};
pub use error::{Error, Result};
pub use observability::register_biometrics;
pub use render::{PlainTextRenderer, Renderer};
pub use session::{AuthState, LoginAttempt, Session};
pub use types::*;
pub use view::{TranscriptEntry, TypingIndicator, ViewEvent, ViewModel, ViewObserver};
