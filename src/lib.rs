//! # QuizSense
//!
//! Client for the QuizSense quiz backend: a typed REST client, a persisted
//! session (bearer token + user profile) and the small formatting helpers
//! quiz screens need.
//!
//! ## Modules
//!
//! - [`api`]: REST client for the auth, quiz and report endpoints
//! - [`session`]: token/user persistence, page guard and client-side logout
//! - [`present`]: date/time formatting, accuracy tiers, placeholder markup
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quizsense::{ClientConfig, Difficulty, QuizClient, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = QuizClient::new(ClientConfig::default(), Session::in_memory())?;
//!
//!     // Stores the token and user in the session
//!     client.login("student@example.com", "securepassword123").await?;
//!
//!     let quiz = client
//!         .generate_quiz("Python Programming", "Functions", Difficulty::Medium, 5)
//!         .await?;
//!     println!("{} questions on {}", quiz.total_questions, quiz.topic);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod present;
pub mod session;

// Re-export top-level types for convenience
pub use api::{
    handle_response, ApiError, ApiRequest, ApiResult, AuthResponse, ClientConfig, Difficulty,
    HttpTransport, LogoutOutcome, Quiz, QuizAvailability, QuizClient, QuizResult, RawResponse,
    SingleAnswer, Transport, TransportError, User,
};

pub use session::{
    check_auth, is_authenticated, logout, AuthCheck, FileStore, MemoryNavigator, MemoryStore,
    Navigator, Session, SessionError, SessionStore,
};

pub use present::{
    display_name, format_date, format_time, performance_class, show_empty, show_error,
    show_loading, Document, MemoryDocument, PerformanceTier,
};

pub use config::{Config, ConfigError, LoggingConfig};
