//! QuizSense REST API Client
//!
//! One method per backend endpoint. Each call builds a fresh [`ApiRequest`],
//! sends it through the configured [`Transport`] and normalizes the reply
//! with [`handle_response`]. No retries.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use super::dto::*;
use super::error::{ApiError, ApiResult};
use super::response::handle_response;
use super::transport::{ApiRequest, HttpTransport, Transport};
use crate::session::Session;

/// Backend the client talks to unless configured otherwise
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default `days` for quiz history and performance
pub const DEFAULT_DAYS: u32 = 7;

/// Default `limit` for quiz history
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Default `limit` for report history
pub const DEFAULT_REPORT_LIMIT: u32 = 4;

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend, e.g. "http://127.0.0.1:8000"
    pub base_url: String,
    /// Request timeout in seconds; `None` leaves requests unbounded
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Result of the best-effort server logout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// The backend accepted the logout
    Acknowledged,
    /// The backend answered with an error status
    Rejected { status: u16, message: String },
    /// The backend could not be reached
    Unreachable(String),
}

/// QuizSense API client
#[derive(Clone)]
pub struct QuizClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    session: Session,
}

impl QuizClient {
    /// Create a client using the reqwest transport
    pub fn new(config: ClientConfig, session: Session) -> ApiResult<Self> {
        let transport = HttpTransport::new(config.request_timeout_secs.map(Duration::from_secs))?;
        Ok(Self::with_transport(config, Arc::new(transport), session))
    }

    /// Create a client with a custom transport
    pub fn with_transport(
        mut config: ClientConfig,
        transport: Arc<dyn Transport>,
        session: Session,
    ) -> Self {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Self {
            config,
            transport,
            session,
        }
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Session this client reads the token from and writes logins to
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// JSON content type plus the bearer token when one is stored
    pub fn auth_headers(&self) -> Vec<(String, String)> {
        let mut headers = json_headers();

        match self.session.token() {
            Ok(Some(token)) => {
                headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Could not read session token"),
        }

        headers
    }

    /// Send a request and normalize the response
    pub async fn execute(&self, request: ApiRequest) -> ApiResult<Option<Value>> {
        let request_id = uuid::Uuid::new_v4();
        let method = request.method.as_str();
        let target = request.path_and_query();

        tracing::debug!(%request_id, method, path = %target, "Sending request");

        let response = self
            .transport
            .send(&self.config.base_url, request)
            .await
            .map_err(|e| {
                tracing::debug!(%request_id, error = %e, "Request did not complete");
                ApiError::Transport(e)
            })?;

        tracing::debug!(%request_id, status = response.status, "Response received");

        handle_response(response)
    }

    async fn execute_as<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<T> {
        let body = self
            .execute(request)
            .await?
            .ok_or_else(|| ApiError::Decode("response had no JSON body".to_string()))?;

        Ok(serde_json::from_value(body)?)
    }

    async fn execute_value(&self, request: ApiRequest) -> ApiResult<Value> {
        Ok(self.execute(request).await?.unwrap_or(Value::Null))
    }

    fn authed_get(&self, path: &str) -> ApiRequest {
        ApiRequest::get(path).headers(self.auth_headers())
    }

    fn authed_post<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<ApiRequest> {
        Ok(ApiRequest::post(path)
            .headers(self.auth_headers())
            .json(serde_json::to_value(body)?))
    }

    // ============ Auth ============

    /// Create an account and store the returned session
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ApiResult<AuthResponse> {
        let body = serde_json::to_value(RegisterRequest {
            name,
            email,
            password,
        })?;
        let request = ApiRequest::post("/auth/register")
            .headers(json_headers())
            .json(body);

        self.authenticate(request).await
    }

    /// Sign in and store the returned session
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        let body = serde_json::to_value(LoginRequest { email, password })?;
        let request = ApiRequest::post("/auth/login")
            .headers(json_headers())
            .json(body);

        self.authenticate(request).await
    }

    async fn authenticate(&self, request: ApiRequest) -> ApiResult<AuthResponse> {
        let auth: AuthResponse = self.execute_as(request).await?;
        self.session.persist(&auth.access_token, &auth.user)?;
        tracing::info!("Signed in");
        Ok(auth)
    }

    /// Tell the backend about a logout. Never fails; the local session is
    /// left untouched.
    pub async fn server_logout(&self) -> LogoutOutcome {
        let request = ApiRequest::post("/auth/logout").headers(self.auth_headers());

        match self.execute(request).await {
            Ok(_) => LogoutOutcome::Acknowledged,
            Err(ApiError::Request { status, message }) => {
                tracing::warn!(status, %message, "Server logout rejected (ignored)");
                LogoutOutcome::Rejected { status, message }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Server logout failed (ignored)");
                LogoutOutcome::Unreachable(e.to_string())
            }
        }
    }

    /// Profile of the signed-in user
    pub async fn me(&self) -> ApiResult<User> {
        self.execute_as(self.authed_get("/auth/me")).await
    }

    // ============ Quiz ============

    /// Generate a quiz for an explicit subject and topic
    pub async fn generate_quiz(
        &self,
        subject: &str,
        topic: &str,
        difficulty: Difficulty,
        num_questions: u32,
    ) -> ApiResult<Quiz> {
        let request = self.authed_post(
            "/quiz/generate",
            &GenerateQuizRequest {
                subject,
                topic,
                difficulty,
                num_questions,
            },
        )?;
        self.execute_as(request).await
    }

    /// Generate a quiz where the backend picks topics for the domain
    pub async fn generate_auto_quiz(&self, domain: &str, num_questions: u32) -> ApiResult<Quiz> {
        let request = self.authed_post(
            "/quiz/auto",
            &AutoQuizRequest {
                domain,
                num_questions,
            },
        )?;
        self.execute_as(request).await
    }

    /// Submit answers for grading
    pub async fn submit_quiz(
        &self,
        quiz_id: &str,
        answers: &[SingleAnswer],
        total_time_seconds: u32,
    ) -> ApiResult<QuizResult> {
        let request = self.authed_post(
            "/quiz/submit",
            &AnswerSubmission {
                quiz_id,
                answers,
                total_time_seconds,
            },
        )?;
        self.execute_as(request).await
    }

    /// Whether today's quiz is still available
    pub async fn can_take_quiz(&self) -> ApiResult<QuizAvailability> {
        self.execute_as(self.authed_get("/quiz/can-take-quiz")).await
    }

    pub async fn quiz_history(&self, days: u32, limit: u32) -> ApiResult<Value> {
        let request = self
            .authed_get("/quiz/history")
            .query("days", days)
            .query("limit", limit);
        self.execute_value(request).await
    }

    /// Topics for one subject, or every subject when `None`
    pub async fn topics(&self, subject: Option<&str>) -> ApiResult<Value> {
        let mut request = self.authed_get("/quiz/topics");
        if let Some(subject) = subject.filter(|s| !s.is_empty()) {
            request = request.query("subject", subject);
        }
        self.execute_value(request).await
    }

    // ============ Reports ============

    pub async fn weekly_report(&self) -> ApiResult<Value> {
        self.execute_value(self.authed_get("/reports/weekly")).await
    }

    pub async fn performance(&self, days: u32) -> ApiResult<Value> {
        let request = self.authed_get("/reports/performance").query("days", days);
        self.execute_value(request).await
    }

    pub async fn dashboard(&self) -> ApiResult<Value> {
        self.execute_value(self.authed_get("/reports/dashboard")).await
    }

    pub async fn weak_topics(&self) -> ApiResult<Value> {
        self.execute_value(self.authed_get("/reports/topics/weak")).await
    }

    pub async fn report_history(&self, limit: u32) -> ApiResult<Value> {
        let request = self.authed_get("/reports/history").query("limit", limit);
        self.execute_value(request).await
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("Content-Type".to_string(), "application/json".to_string())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::{Method, RawResponse};
    use crate::api::TransportError;
    use crate::session::{TOKEN_KEY, USER_KEY};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned responses and records every request
    #[derive(Default)]
    struct MockTransport {
        responses: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
        requests: Mutex<Vec<(String, ApiRequest)>>,
    }

    impl MockTransport {
        fn replying(status: u16, body: &str) -> Arc<Self> {
            let mock = Self::default();
            mock.responses
                .lock()
                .unwrap()
                .push_back(Ok(RawResponse::new(status, body)));
            Arc::new(mock)
        }

        fn failing(err: TransportError) -> Arc<Self> {
            let mock = Self::default();
            mock.responses.lock().unwrap().push_back(Err(err));
            Arc::new(mock)
        }

        fn last_request(&self) -> (String, ApiRequest) {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn send(
            &self,
            base_url: &str,
            request: ApiRequest,
        ) -> Result<RawResponse, TransportError> {
            self.requests
                .lock()
                .unwrap()
                .push((base_url.to_string(), request));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(RawResponse::new(200, "")))
        }
    }

    fn client_with(mock: Arc<MockTransport>) -> QuizClient {
        QuizClient::with_transport(ClientConfig::default(), mock, Session::in_memory())
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.request_timeout_secs, None);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = QuizClient::with_transport(
            ClientConfig::new("http://quiz.local:9000/"),
            MockTransport::replying(200, ""),
            Session::in_memory(),
        );
        assert_eq!(client.config().base_url, "http://quiz.local:9000");
    }

    #[test]
    fn test_auth_headers_without_token() {
        let client = client_with(MockTransport::replying(200, ""));
        assert_eq!(
            client.auth_headers(),
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn test_auth_headers_with_token() {
        let client = client_with(MockTransport::replying(200, ""));
        client.session().store().set(TOKEN_KEY, "abc").unwrap();

        let headers = client.auth_headers();
        assert!(headers.contains(&("Authorization".to_string(), "Bearer abc".to_string())));
    }

    #[tokio::test]
    async fn test_login_persists_session() {
        let mock = MockTransport::replying(
            200,
            r#"{"access_token":"T","user":{"id":1,"name":"A"}}"#,
        );
        let client = client_with(mock.clone());

        let auth = client.login("a@b.com", "pw").await.unwrap();

        assert_eq!(auth.access_token, "T");
        assert_eq!(auth.user, json!({"id": 1, "name": "A"}));
        assert_eq!(
            client.session().store().get(TOKEN_KEY).unwrap().as_deref(),
            Some("T")
        );
        assert_eq!(client.session().current_user(), Some(json!({"id": 1, "name": "A"})));

        let (base, request) = mock.last_request();
        assert_eq!(base, "http://127.0.0.1:8000");
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/auth/login");
        assert_eq!(request.body, Some(json!({"email": "a@b.com", "password": "pw"})));
        assert_eq!(request.header("Authorization"), None);
    }

    #[tokio::test]
    async fn test_login_returns_whole_body() {
        let mock = MockTransport::replying(
            200,
            r#"{"access_token":"T","token_type":"bearer","user":{"id":1},"expires_in":1800}"#,
        );
        let client = client_with(mock);

        let auth = client.login("a@b.com", "pw").await.unwrap();

        assert_eq!(auth.extra.get("expires_in"), Some(&json!(1800)));
        assert_eq!(
            serde_json::to_value(&auth).unwrap(),
            json!({"access_token": "T", "token_type": "bearer", "user": {"id": 1}, "expires_in": 1800})
        );
    }

    #[tokio::test]
    async fn test_login_does_not_send_stale_token() {
        let mock = MockTransport::replying(
            200,
            r#"{"access_token":"new","user":{"id":2}}"#,
        );
        let client = client_with(mock.clone());
        client.session().persist("stale", &json!({"id": 1})).unwrap();

        client.login("a@b.com", "pw").await.unwrap();

        assert_eq!(mock.last_request().1.header("Authorization"), None);
        assert_eq!(client.session().token().unwrap().as_deref(), Some("new"));
        assert_eq!(client.session().current_user(), Some(json!({"id": 2})));
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_session() {
        let mock = MockTransport::replying(401, r#"{"detail":"Invalid email or password"}"#);
        let client = client_with(mock);
        client.session().persist("old", &json!({"id": 1})).unwrap();

        let err = client.login("a@b.com", "bad").await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid email or password");
        assert_eq!(client.session().token().unwrap().as_deref(), Some("old"));
    }

    #[tokio::test]
    async fn test_register_body() {
        let mock = MockTransport::replying(
            201,
            r#"{"access_token":"R","token_type":"bearer","user":{"id":"user_1","name":"Ann","email":"ann@x.io"}}"#,
        );
        let client = client_with(mock.clone());

        let auth = client.register("Ann", "ann@x.io", "secret1").await.unwrap();

        assert_eq!(auth.token_type.as_deref(), Some("bearer"));
        assert_eq!(
            mock.last_request().1.body,
            Some(json!({"name": "Ann", "email": "ann@x.io", "password": "secret1"}))
        );
        assert_eq!(
            client.session().store().get(USER_KEY).unwrap().map(|u| {
                serde_json::from_str::<Value>(&u).unwrap()
            }),
            Some(json!({"id": "user_1", "name": "Ann", "email": "ann@x.io"}))
        );
    }

    #[tokio::test]
    async fn test_login_without_body_is_decode_error() {
        let client = client_with(MockTransport::replying(200, ""));
        let err = client.login("a@b.com", "pw").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
        assert!(!client.session().has_token());
    }

    #[tokio::test]
    async fn test_server_logout_swallows_transport_failure() {
        let client = client_with(MockTransport::failing(TransportError::Connect(
            "connection refused".into(),
        )));
        client.session().persist("T", &json!({"id": 1})).unwrap();

        let outcome = client.server_logout().await;

        assert!(matches!(outcome, LogoutOutcome::Unreachable(_)));
        assert!(client.session().has_token());
    }

    #[tokio::test]
    async fn test_server_logout_reports_rejection() {
        let mock = MockTransport::replying(401, r#"{"detail":"Could not validate credentials"}"#);
        let client = client_with(mock.clone());
        client.session().store().set(TOKEN_KEY, "T").unwrap();

        let outcome = client.server_logout().await;

        assert_eq!(
            outcome,
            LogoutOutcome::Rejected {
                status: 401,
                message: "Could not validate credentials".to_string()
            }
        );
        let (_, request) = mock.last_request();
        assert_eq!(request.path, "/auth/logout");
        assert_eq!(request.header("Authorization"), Some("Bearer T"));
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let client = client_with(MockTransport::failing(TransportError::Timeout));
        let err = client.dashboard().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(TransportError::Timeout)));
    }

    #[tokio::test]
    async fn test_generate_quiz_request() {
        let mock = MockTransport::replying(
            200,
            r#"{"quiz_id":"quiz_1","subject":"Algorithms","topic":"Sorting","difficulty":"hard","questions":[],"total_questions":0}"#,
        );
        let client = client_with(mock.clone());
        client.session().store().set(TOKEN_KEY, "T").unwrap();

        let quiz = client
            .generate_quiz("Algorithms", "Sorting", Difficulty::Hard, 5)
            .await
            .unwrap();

        assert_eq!(quiz.quiz_id, "quiz_1");
        let (_, request) = mock.last_request();
        assert_eq!(request.path, "/quiz/generate");
        assert_eq!(request.header("Authorization"), Some("Bearer T"));
        assert_eq!(
            request.body,
            Some(json!({
                "subject": "Algorithms",
                "topic": "Sorting",
                "difficulty": "hard",
                "num_questions": 5
            }))
        );
    }

    #[tokio::test]
    async fn test_auto_quiz_request() {
        let mock = MockTransport::replying(
            200,
            r#"{"quiz_id":"quiz_2","subject":"Web Development","topic":"Mixed","difficulty":"medium","questions":[],"total_questions":0}"#,
        );
        let client = client_with(mock.clone());

        client.generate_auto_quiz("Web Development", 8).await.unwrap();

        let (_, request) = mock.last_request();
        assert_eq!(request.path, "/quiz/auto");
        assert_eq!(
            request.body,
            Some(json!({"domain": "Web Development", "num_questions": 8}))
        );
    }

    #[tokio::test]
    async fn test_submit_quiz_request() {
        let mock = MockTransport::replying(
            200,
            r#"{"quiz_id":"quiz_1","user_id":"u1","score":1,"total":2,"percentage":50.0,"time_taken_seconds":90,"results":[],"topic_breakdown":{"Sorting":{"correct":1,"total":2}}}"#,
        );
        let client = client_with(mock.clone());
        let answers = vec![SingleAnswer::new("q1", "A"), SingleAnswer::new("q2", "C")];

        let result = client.submit_quiz("quiz_1", &answers, 90).await.unwrap();

        assert_eq!(result.percentage, 50.0);
        assert_eq!(result.topic_breakdown["Sorting"]["correct"], 1);
        let body = mock.last_request().1.body.unwrap();
        assert_eq!(body["quiz_id"], "quiz_1");
        assert_eq!(body["answers"][1]["selected_option"], "C");
        assert_eq!(body["total_time_seconds"], 90);
    }

    #[tokio::test]
    async fn test_history_query() {
        let mock = MockTransport::replying(200, r#"{"total_quizzes":0,"quizzes":[]}"#);
        let client = client_with(mock.clone());

        let history = client
            .quiz_history(DEFAULT_DAYS, DEFAULT_HISTORY_LIMIT)
            .await
            .unwrap();

        assert_eq!(history["total_quizzes"], 0);
        let (_, request) = mock.last_request();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.path_and_query(), "/quiz/history?days=7&limit=10");
    }

    #[tokio::test]
    async fn test_topics_subject_optional() {
        let mock = MockTransport::replying(200, r#"{"subjects":[]}"#);
        let client = client_with(mock.clone());
        client.topics(None).await.unwrap();
        assert_eq!(mock.last_request().1.path_and_query(), "/quiz/topics");

        let mock = MockTransport::replying(200, r#"{"topics":[]}"#);
        let client = client_with(mock.clone());
        client.topics(Some("Data Structures")).await.unwrap();
        assert_eq!(
            mock.last_request().1.path_and_query(),
            "/quiz/topics?subject=Data%20Structures"
        );
    }

    #[tokio::test]
    async fn test_report_paths() {
        let cases: Vec<(&str, u8)> = vec![
            ("/reports/weekly", 0),
            ("/reports/performance?days=14", 1),
            ("/reports/dashboard", 2),
            ("/reports/topics/weak", 3),
            ("/reports/history?limit=4", 4),
            ("/quiz/can-take-quiz", 5),
        ];

        for (expected, which) in cases {
            let mock = MockTransport::replying(200, r#"{"can_take_quiz":true}"#);
            let client = client_with(mock.clone());
            match which {
                0 => assert!(client.weekly_report().await.is_ok()),
                1 => assert!(client.performance(14).await.is_ok()),
                2 => assert!(client.dashboard().await.is_ok()),
                3 => assert!(client.weak_topics().await.is_ok()),
                4 => assert!(client.report_history(DEFAULT_REPORT_LIMIT).await.is_ok()),
                _ => assert!(client.can_take_quiz().await.is_ok()),
            }
            let (_, request) = mock.last_request();
            assert_eq!(request.method, Method::Get);
            assert_eq!(request.path_and_query(), expected);
        }
    }

    #[tokio::test]
    async fn test_empty_success_body_is_null() {
        let client = client_with(MockTransport::replying(200, ""));
        assert_eq!(client.weekly_report().await.unwrap(), Value::Null);
    }

    #[tokio::test]
    async fn test_me_error_detail() {
        let client = client_with(MockTransport::replying(404, r#"{"detail":"User not found"}"#));
        let err = client.me().await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "User not found");
    }
}
