//! QuizSense API Client
//!
//! Typed access to the QuizSense backend's auth, quiz and report endpoints.
//!
//! ## Architecture
//!
//! - **QuizClient**: one method per endpoint, owns the [`Session`](crate::session::Session)
//! - **Transport**: sends an [`ApiRequest`]; `HttpTransport` uses reqwest
//! - **handle_response**: turns status + body into a value or an [`ApiError`]
//!
//! ## Endpoints
//!
//! | Method | Path | Auth |
//! |---|---|---|
//! | POST | /auth/register, /auth/login | no |
//! | POST | /auth/logout | best-effort |
//! | GET | /auth/me | yes |
//! | POST | /quiz/generate, /quiz/auto, /quiz/submit | yes |
//! | GET | /quiz/history, /quiz/topics, /quiz/can-take-quiz | yes |
//! | GET | /reports/weekly, /reports/performance, /reports/dashboard | yes |
//! | GET | /reports/topics/weak, /reports/history | yes |

mod client;
mod dto;
mod error;
mod response;
mod transport;

pub use client::{
    ClientConfig, LogoutOutcome, QuizClient, DEFAULT_BASE_URL, DEFAULT_DAYS,
    DEFAULT_HISTORY_LIMIT, DEFAULT_REPORT_LIMIT,
};
pub use dto::{
    AuthResponse, Difficulty, QuestionResult, Quiz, QuizAvailability, QuizQuestion, QuizResult,
    SingleAnswer, User,
};
pub use error::{ApiError, ApiResult, TransportError};
pub use response::handle_response;
pub use transport::{ApiRequest, HttpTransport, Method, RawResponse, Transport};
