//! Auth flows
//!
//! Login, signup and logout against the hosted auth collaborator, with
//! the console's notification and navigation side effects. Signup
//! failures are classified best-effort by substring matching on the
//! backend's error text.

use std::sync::Arc;

use oea_client::error::ClientError;
use oea_client::AuthApi;
use shared::auth::{AuthUser, Session};

use crate::core::navigation::{Navigator, Route};
use crate::core::notify::{Notifier, ToastKind};
use crate::core::query_cache::{QueryCache, QueryKey};

const MSG_LOGIN_OK: &str = "登入成功！";
const MSG_LOGIN_FAIL: &str = "登入失敗，請重試";
const MSG_SIGNUP_OK: &str = "註冊成功！";
const MSG_SIGNUP_FAIL: &str = "註冊失敗，請重試";
const MSG_SIGNUP_TAKEN: &str = "此電子郵件已被註冊";
const MSG_SIGNUP_BAD_EMAIL: &str = "電子郵件格式無效";
const MSG_SIGNUP_WEAK_PASSWORD: &str = "密碼格式不符合要求";
const MSG_LOGOUT_OK: &str = "已登出";
const MSG_LOGOUT_FAIL: &str = "登出失敗，請重試";

/// Console-level auth operations
pub struct AuthFlow {
    auth: Arc<dyn AuthApi>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    cache: Arc<QueryCache>,
}

impl AuthFlow {
    pub fn new(
        auth: Arc<dyn AuthApi>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            auth,
            notifier,
            navigator,
            cache,
        }
    }

    /// Sign in; on success lands on the product list
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        match self.auth.login(email, password).await {
            Ok(session) => {
                self.cache.invalidate(QueryKey::CurrentUser);
                self.notifier.notify(ToastKind::Success, MSG_LOGIN_OK);
                self.navigator.navigate_to(Route::Products { page: 0 });
                Ok(session)
            }
            Err(error) => {
                tracing::warn!(error = %error, "login failed");
                self.notifier
                    .notify(ToastKind::Error, &login_error_message(&error));
                Err(error)
            }
        }
    }

    /// Register; on success returns to the login screen
    pub async fn signup(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        match self.auth.signup(email, password).await {
            Ok(session) => {
                self.notifier.notify(ToastKind::Success, MSG_SIGNUP_OK);
                self.navigator.navigate_to(Route::Login);
                Ok(session)
            }
            Err(error) => {
                tracing::warn!(error = %error, "signup failed");
                let message = classify_signup_error(&auth_error_text(&error));
                self.notifier.notify(ToastKind::Error, message);
                Err(error)
            }
        }
    }

    /// Sign out; on success every cached view is dropped
    pub async fn logout(&self) -> Result<(), ClientError> {
        match self.auth.logout().await {
            Ok(()) => {
                self.cache.clear();
                self.notifier.notify(ToastKind::Success, MSG_LOGOUT_OK);
                self.navigator.navigate_to(Route::Login);
                Ok(())
            }
            Err(error) => {
                tracing::warn!(error = %error, "logout failed");
                self.notifier.notify(ToastKind::Error, MSG_LOGOUT_FAIL);
                Err(error)
            }
        }
    }

    /// Currently authenticated user. A backend error here means the
    /// session is unusable: best-effort sign-out, then `None`.
    pub async fn current_user(&self) -> Option<AuthUser> {
        match self.auth.current_user().await {
            Ok(user) => user,
            Err(error) => {
                tracing::warn!(error = %error, "current user lookup failed, clearing session");
                let _ = self.auth.logout().await;
                None
            }
        }
    }
}

fn auth_error_text(error: &ClientError) -> String {
    match error {
        ClientError::Auth(message) => message.clone(),
        other => other.to_string(),
    }
}

fn login_error_message(error: &ClientError) -> String {
    match error {
        ClientError::Auth(message) if !message.trim().is_empty() => message.clone(),
        _ => MSG_LOGIN_FAIL.to_string(),
    }
}

/// Map a backend signup error onto a friendlier message
fn classify_signup_error(message: &str) -> &'static str {
    if message.contains("already registered") {
        MSG_SIGNUP_TAKEN
    } else if message.contains("invalid") {
        MSG_SIGNUP_BAD_EMAIL
    } else if message.contains("password") {
        MSG_SIGNUP_WEAK_PASSWORD
    } else {
        MSG_SIGNUP_FAIL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::navigation::RecordingNavigator;
    use crate::core::notify::RecordingNotifier;
    use oea_backend_mock::MockAuthApi;

    struct Harness {
        auth_api: Arc<MockAuthApi>,
        notifier: Arc<RecordingNotifier>,
        navigator: Arc<RecordingNavigator>,
        cache: Arc<QueryCache>,
        flow: AuthFlow,
    }

    fn harness(auth_api: MockAuthApi) -> Harness {
        let auth_api = Arc::new(auth_api);
        let notifier = Arc::new(RecordingNotifier::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let cache = Arc::new(QueryCache::new());
        let flow = AuthFlow::new(
            auth_api.clone(),
            notifier.clone(),
            navigator.clone(),
            cache.clone(),
        );
        Harness {
            auth_api,
            notifier,
            navigator,
            cache,
            flow,
        }
    }

    #[test]
    fn test_classify_signup_error() {
        assert_eq!(
            classify_signup_error("User already registered"),
            MSG_SIGNUP_TAKEN
        );
        assert_eq!(
            classify_signup_error("Unable to validate email address: invalid format"),
            MSG_SIGNUP_BAD_EMAIL
        );
        assert_eq!(
            classify_signup_error("Weak password: too short"),
            MSG_SIGNUP_WEAK_PASSWORD
        );
        assert_eq!(classify_signup_error("something else"), MSG_SIGNUP_FAIL);
    }

    #[tokio::test]
    async fn test_login_success_lands_on_products() {
        let h = harness(MockAuthApi::new().with_user("a@b.c", "secret"));

        let session = h.flow.login("a@b.c", "secret").await.unwrap();
        assert_eq!(session.user.email, "a@b.c");
        assert_eq!(h.notifier.successes(), vec![MSG_LOGIN_OK.to_string()]);
        assert_eq!(h.navigator.last(), Some(Route::Products { page: 0 }));
        assert_eq!(h.cache.generation(&QueryKey::CurrentUser), 1);
    }

    #[tokio::test]
    async fn test_login_failure_surfaces_backend_message() {
        let h = harness(MockAuthApi::new());

        let result = h.flow.login("a@b.c", "wrong").await;
        assert!(result.is_err());
        assert_eq!(
            h.notifier.errors(),
            vec!["Invalid login credentials".to_string()]
        );
        assert!(h.navigator.routes().is_empty());
    }

    #[tokio::test]
    async fn test_signup_failure_is_classified() {
        let h = harness(MockAuthApi::new());
        h.auth_api.fail_signup_with("User already registered");

        let result = h.flow.signup("a@b.c", "secret").await;
        assert!(result.is_err());
        assert_eq!(h.notifier.errors(), vec![MSG_SIGNUP_TAKEN.to_string()]);
    }

    #[tokio::test]
    async fn test_signup_success_returns_to_login() {
        let h = harness(MockAuthApi::new());

        h.flow.signup("a@b.c", "secret").await.unwrap();
        assert_eq!(h.notifier.successes(), vec![MSG_SIGNUP_OK.to_string()]);
        assert_eq!(h.navigator.last(), Some(Route::Login));
    }

    #[tokio::test]
    async fn test_logout_clears_cached_views() {
        let h = harness(MockAuthApi::new());
        h.cache.invalidate(QueryKey::Products);

        h.flow.logout().await.unwrap();
        assert_eq!(h.cache.generation(&QueryKey::Products), 2);
        assert_eq!(h.notifier.successes(), vec![MSG_LOGOUT_OK.to_string()]);
        assert_eq!(h.navigator.last(), Some(Route::Login));
    }

    #[tokio::test]
    async fn test_current_user_error_signs_out() {
        let h = harness(MockAuthApi::new());
        h.auth_api.fail_current_user();

        let user = h.flow.current_user().await;
        assert!(user.is_none());
        assert_eq!(h.auth_api.logout_calls(), 1);
    }
}
