use api_types::{SignInRequest, SignInResponse, UserProfile};
use async_trait::async_trait;
use secrecy::SecretString;
use thiserror::Error;

use crate::api::ApiError;

use super::SessionHandle;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("{0}")]
    LoginFailed(String),
    #[error("Invalid or expired session")]
    InvalidSession,
}

/// The two calls the session lifecycle needs from the server.
#[async_trait(?Send)]
pub trait AuthApi {
    async fn sign_in(&self, request: &SignInRequest) -> Result<SignInResponse, ApiError>;

    /// Fetches the profile of whoever owns the token currently in the
    /// session.
    async fn fetch_profile(&self) -> Result<UserProfile, ApiError>;
}

/// Exchanges credentials for a session. A failed attempt leaves the
/// current session as it was.
pub async fn login<A: AuthApi + ?Sized>(
    session: &SessionHandle,
    api: &A,
    email: &str,
    password: &str,
) -> Result<SignInResponse, AuthError> {
    let request = SignInRequest {
        email: email.trim().to_owned(),
        password: password.to_owned(),
    };
    match api.sign_in(&request).await {
        Ok(response) => {
            session.establish(
                response.user.clone(),
                SecretString::from(response.token.clone()),
            );
            log::info!(
                "User login successful, user_id={user_id}",
                user_id = &response.user.id
            );
            Ok(response)
        }
        Err(error) => {
            log::warn!("Login failed, error: {error}");
            Err(AuthError::LoginFailed(error.user_message("Login failed")))
        }
    }
}

/// Establishes a session from a token issued elsewhere. The previous session
/// is dropped before the token is tried, and any failure ends logged out.
pub async fn login_with_token<A: AuthApi + ?Sized>(
    session: &SessionHandle,
    api: &A,
    token: SecretString,
) -> Result<UserProfile, AuthError> {
    session.begin_handoff(token);
    match api.fetch_profile().await {
        Ok(user) => {
            log::info!("Token handoff accepted, user_id={}", user.id);
            session.complete_handoff(user.clone());
            Ok(user)
        }
        Err(error) => {
            log::warn!("Token handoff rejected, logging out. Error={error}");
            session.logout();
            Err(AuthError::InvalidSession)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use futures::executor::block_on;
    use secrecy::ExposeSecret;

    use super::*;
    use crate::session::{
        storage::{MemoryStorage, SessionStorage},
        tests::{handle_over, profile},
        Session, SessionStatus, TOKEN_KEY, USER_KEY,
    };

    /// Answers from a script and records what the session looked like when
    /// the profile was requested.
    struct ScriptedApi {
        session: SessionHandle,
        sign_in: Result<SignInResponse, ApiError>,
        profile: Result<UserProfile, ApiError>,
        seen_at_fetch: RefCell<Option<Session>>,
    }

    impl ScriptedApi {
        fn new(session: &SessionHandle) -> Self {
            ScriptedApi {
                session: session.clone(),
                sign_in: Err(ApiError::Network("unused".to_owned())),
                profile: Err(ApiError::Network("unused".to_owned())),
                seen_at_fetch: RefCell::new(None),
            }
        }
    }

    #[async_trait(?Send)]
    impl AuthApi for ScriptedApi {
        async fn sign_in(&self, _request: &SignInRequest) -> Result<SignInResponse, ApiError> {
            self.sign_in.clone()
        }

        async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
            *self.seen_at_fetch.borrow_mut() = Some(self.session.snapshot());
            if let Err(ApiError::Unauthorized { .. }) = &self.profile {
                // what the request pipeline does on a 401
                self.session.logout();
            }
            self.profile.clone()
        }
    }

    fn signed_in(id: &str, token: &str) -> SignInResponse {
        SignInResponse {
            user: profile(id, id),
            token: token.to_owned(),
            message: None,
        }
    }

    #[test]
    fn login_then_logout_ends_anonymous_with_empty_storage() {
        let storage = MemoryStorage::default();
        let session = handle_over(&storage);
        let mut api = ScriptedApi::new(&session);
        api.sign_in = Ok(signed_in("u1", "T"));

        let response = block_on(login(&session, &api, "user@example.com", "pw")).unwrap();
        assert_eq!(response.token, "T");
        assert_eq!(session.status(), SessionStatus::Authenticated);

        session.logout();
        assert_eq!(session.status(), SessionStatus::Anonymous);
        assert_eq!(storage.get(USER_KEY), None);
        assert_eq!(storage.get(TOKEN_KEY), None);
    }

    #[test]
    fn login_result_survives_reload_without_network() {
        let storage = MemoryStorage::default();
        let session = handle_over(&storage);
        let mut api = ScriptedApi::new(&session);
        api.sign_in = Ok(signed_in("u1", "T"));
        block_on(login(&session, &api, "user@example.com", "pw")).unwrap();

        let reloaded = handle_over(&storage);
        assert_eq!(reloaded.snapshot(), session.snapshot());
        assert_eq!(reloaded.token().unwrap().expose_secret(), "T");
        assert!(api.seen_at_fetch.borrow().is_none());
    }

    #[test]
    fn failed_login_keeps_previous_session_and_surfaces_server_message() {
        let storage = MemoryStorage::default();
        let session = handle_over(&storage);
        let mut api = ScriptedApi::new(&session);
        api.sign_in = Ok(signed_in("u1", "T1"));
        block_on(login(&session, &api, "a@example.com", "pw")).unwrap();
        let before = session.snapshot();

        api.sign_in = Err(ApiError::Unauthorized {
            message: Some("Invalid email or password".to_owned()),
        });
        let error = block_on(login(&session, &api, "a@example.com", "bad")).unwrap_err();
        assert_eq!(
            error,
            AuthError::LoginFailed("Invalid email or password".to_owned())
        );
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn failed_login_without_server_message_uses_fallback() {
        let storage = MemoryStorage::default();
        let session = handle_over(&storage);
        let mut api = ScriptedApi::new(&session);
        api.sign_in = Err(ApiError::Network("connection refused".to_owned()));

        let error = block_on(login(&session, &api, "a@example.com", "pw")).unwrap_err();
        assert_eq!(error.to_string(), "Login failed");
    }

    #[test]
    fn token_login_validates_with_new_token_only() {
        let storage = MemoryStorage::default();
        let session = handle_over(&storage);
        let mut api = ScriptedApi::new(&session);
        api.sign_in = Ok(signed_in("old", "OLD"));
        block_on(login(&session, &api, "old@example.com", "pw")).unwrap();

        api.profile = Ok(profile("new", "new"));
        let user = block_on(login_with_token(
            &session,
            &api,
            SecretString::from("NEW".to_owned()),
        ))
        .unwrap();
        assert_eq!(user.id, "new");

        let seen = api.seen_at_fetch.borrow().clone().unwrap();
        assert_eq!(seen.user, None);
        assert_eq!(seen.token.unwrap().expose_secret(), "NEW");

        let after = session.snapshot();
        assert_eq!(after.user.unwrap().id, "new");
        assert_eq!(after.token.unwrap().expose_secret(), "NEW");
    }

    #[test]
    fn expired_token_ends_anonymous_with_invalid_session() {
        let storage = MemoryStorage::default();
        let session = handle_over(&storage);
        let mut api = ScriptedApi::new(&session);
        api.sign_in = Ok(signed_in("old", "OLD"));
        block_on(login(&session, &api, "old@example.com", "pw")).unwrap();

        api.profile = Err(ApiError::Unauthorized { message: None });
        let error = block_on(login_with_token(
            &session,
            &api,
            SecretString::from("expired-token".to_owned()),
        ))
        .unwrap_err();

        assert_eq!(error, AuthError::InvalidSession);
        assert_eq!(error.to_string(), "Invalid or expired session");
        assert_eq!(session.status(), SessionStatus::Anonymous);
        assert_eq!(session.snapshot(), Session::default());
        assert!(storage.is_empty());
    }

    #[test]
    fn token_login_failure_on_network_error_also_logs_out() {
        let storage = MemoryStorage::default();
        let session = handle_over(&storage);
        let mut api = ScriptedApi::new(&session);
        api.profile = Err(ApiError::Network("offline".to_owned()));

        let error = block_on(login_with_token(
            &session,
            &api,
            SecretString::from("T".to_owned()),
        ))
        .unwrap_err();
        assert_eq!(error, AuthError::InvalidSession);
        assert!(storage.is_empty());
    }
}
