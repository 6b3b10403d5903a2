//! Page guard and client-side logout

use std::sync::Mutex;

use super::{Session, SessionResult};

/// Sign-in page, the redirect target for unauthenticated access
pub const SIGNIN_PAGE: &str = "signin.html";

/// Sign-up page, reachable without a session
pub const SIGNUP_PAGE: &str = "signup.html";

/// Current location and navigation
pub trait Navigator: Send + Sync {
    /// Path of the current page, e.g. `/app/dashboard.html`
    fn current_path(&self) -> String;

    fn navigate(&self, href: &str);
}

/// Navigator that only records where it was sent
#[derive(Debug, Default)]
pub struct MemoryNavigator {
    path: Mutex<String>,
    last: Mutex<Option<String>>,
}

impl MemoryNavigator {
    pub fn at(path: impl Into<String>) -> Self {
        Self {
            path: Mutex::new(path.into()),
            last: Mutex::new(None),
        }
    }

    /// Last `navigate` target, if any
    pub fn last_navigation(&self) -> Option<String> {
        self.last.lock().ok().and_then(|l| l.clone())
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.path.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn navigate(&self, href: &str) {
        if let Ok(mut last) = self.last.lock() {
            *last = Some(href.to_string());
        }
        if let Ok(mut path) = self.path.lock() {
            *path = href.to_string();
        }
    }
}

/// Outcome of the page guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCheck {
    /// A token is stored
    Authenticated,
    /// No token, but the page is sign-in or sign-up
    OnAuthPage,
    /// No token; the page should send the user here
    RedirectTo(&'static str),
}

impl AuthCheck {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthCheck::Authenticated)
    }
}

/// Decide access for `path` without navigating
pub fn check_auth(session: &Session, path: &str) -> AuthCheck {
    if session.has_token() {
        return AuthCheck::Authenticated;
    }

    let path = path.to_lowercase();
    if path.ends_with(SIGNIN_PAGE) || path.ends_with(SIGNUP_PAGE) {
        AuthCheck::OnAuthPage
    } else {
        AuthCheck::RedirectTo(SIGNIN_PAGE)
    }
}

/// Guard a page: `false` without a token, redirecting to sign-in unless
/// already on an auth page.
pub fn is_authenticated(session: &Session, navigator: &dyn Navigator) -> bool {
    match check_auth(session, &navigator.current_path()) {
        AuthCheck::Authenticated => true,
        AuthCheck::OnAuthPage => false,
        AuthCheck::RedirectTo(href) => {
            tracing::debug!(target_page = href, "No session, redirecting");
            navigator.navigate(href);
            false
        }
    }
}

/// Drop the local session and go to sign-in. The server is not contacted.
pub fn logout(session: &Session, navigator: &dyn Navigator) -> SessionResult<()> {
    let cleared = session.clear();
    navigator.navigate(SIGNIN_PAGE);
    cleared
}
