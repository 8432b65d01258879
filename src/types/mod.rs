// Public modules
pub mod chat_request;
pub mod chat_response;
pub mod credentials;
pub mod login_request;
pub mod login_response;
pub mod sender;
pub mod session_token;

// Re-exports
pub use chat_request::ChatRequest;
pub use chat_response::ChatResponse;
pub use credentials::Credentials;
pub use login_request::LoginRequest;
pub use login_response::{LOGIN_SUCCESS_STATUS, LoginResponse};
pub use sender::Sender;
pub use session_token::SessionToken;
