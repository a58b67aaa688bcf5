//! Mock auth service

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use oea_client::error::{ClientError, ClientResult};
use oea_client::AuthApi;
use shared::auth::{AuthUser, Session};

/// In-memory auth backend
#[derive(Default)]
pub struct MockAuthApi {
    users: Mutex<HashMap<String, String>>,
    current: Mutex<Option<AuthUser>>,
    signup_error: Mutex<Option<String>>,
    logout_error: Mutex<Option<String>>,
    user_error: Mutex<bool>,
    logout_calls: Mutex<u32>,
}

impl MockAuthApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account that can log in
    pub fn with_user(self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.users
            .lock()
            .unwrap()
            .insert(email.into(), password.into());
        self
    }

    /// Make the next signup fail with the given backend message
    pub fn fail_signup_with(&self, message: impl Into<String>) {
        *self.signup_error.lock().unwrap() = Some(message.into());
    }

    /// Make logout fail with the given backend message
    pub fn fail_logout_with(&self, message: impl Into<String>) {
        *self.logout_error.lock().unwrap() = Some(message.into());
    }

    /// Make `current_user` return an error (expired session)
    pub fn fail_current_user(&self) {
        *self.user_error.lock().unwrap() = true;
    }

    pub fn logout_calls(&self) -> u32 {
        *self.logout_calls.lock().unwrap()
    }

    fn session_for(email: &str) -> Session {
        let user = AuthUser {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            role: Some("authenticated".to_string()),
        };
        Session {
            access_token: format!("token-{}", email),
            refresh_token: None,
            expires_at: None,
            user,
        }
    }
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn login(&self, email: &str, password: &str) -> ClientResult<Session> {
        let users = self.users.lock().unwrap();
        match users.get(email) {
            Some(stored) if stored == password => {
                let session = Self::session_for(email);
                *self.current.lock().unwrap() = Some(session.user.clone());
                Ok(session)
            }
            _ => Err(ClientError::Auth("Invalid login credentials".to_string())),
        }
    }

    async fn signup(&self, email: &str, password: &str) -> ClientResult<Session> {
        if let Some(message) = self.signup_error.lock().unwrap().take() {
            return Err(ClientError::Auth(message));
        }

        self.users
            .lock()
            .unwrap()
            .insert(email.to_string(), password.to_string());
        Ok(Self::session_for(email))
    }

    async fn logout(&self) -> ClientResult<()> {
        *self.logout_calls.lock().unwrap() += 1;

        if let Some(message) = self.logout_error.lock().unwrap().take() {
            return Err(ClientError::Internal(message));
        }

        *self.current.lock().unwrap() = None;
        Ok(())
    }

    async fn current_user(&self) -> ClientResult<Option<AuthUser>> {
        if *self.user_error.lock().unwrap() {
            return Err(ClientError::Unauthorized);
        }
        Ok(self.current.lock().unwrap().clone())
    }
}
