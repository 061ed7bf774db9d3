pub mod amc_api;
pub mod auth_api;
pub mod dashboard_api;
pub mod notifications_api;
pub mod orders_api;
pub mod rentals_api;
pub mod service_api;

use std::rc::Rc;

use api_types::ErrorBody;
use gloo_net::http::{Request, RequestBuilder};
use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use web_sys::{AbortController, AbortSignal};
use yew::prelude::*;

use crate::{
    config,
    session::{use_session, SessionHandle},
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unauthorized")]
    Unauthorized { message: Option<String> },
    #[error("request rejected, status={status}")]
    Rejected { status: u16, message: Option<String> },
    #[error("not found")]
    NotFound,
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("request aborted")]
    Aborted,
}

impl ApiError {
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message } | ApiError::Rejected { message, .. } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            _ => None,
        }
    }

    /// Text to show the user: what the server said, or `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_owned()
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(error: gloo_net::Error) -> Self {
        match error {
            gloo_net::Error::SerdeError(error) => ApiError::Decode(error.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

/// Aborts the requests issued under it when dropped. Pages create one per
/// effect and drop it in the effect's teardown.
pub struct RequestScope {
    controller: Option<AbortController>,
}

impl RequestScope {
    pub fn new() -> Self {
        let controller = match AbortController::new() {
            Ok(controller) => Some(controller),
            Err(error) => {
                log::warn!("AbortController unavailable, requests will not be cancelled: {error:?}");
                None
            }
        };
        RequestScope { controller }
    }

    fn signal(&self) -> Option<AbortSignal> {
        self.controller.as_ref().map(AbortController::signal)
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        if let Some(controller) = &self.controller {
            controller.abort();
        }
    }
}

/// The single request pipeline of the portal.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: Rc<str>,
    session: SessionHandle,
    signal: Option<AbortSignal>,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url && self.session == other.session
    }
}

impl ApiClient {
    pub fn new(base_url: &str, session: SessionHandle) -> Self {
        ApiClient {
            base_url: Rc::from(base_url.trim_end_matches('/')),
            session,
            signal: None,
        }
    }

    /// A copy of this client whose requests are aborted with `scope`.
    pub fn scoped(&self, scope: &RequestScope) -> Self {
        ApiClient {
            signal: scope.signal(),
            ..self.clone()
        }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(Request::get(&self.url(path)), path, None, true)
            .await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = encode_body(body)?;
        self.execute(Request::post(&self.url(path)), path, Some(body), true)
            .await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = encode_body(body)?;
        self.execute(Request::put(&self.url(path)), path, Some(body), true)
            .await
    }

    /// POST without the bearer token, for the credential exchange.
    pub async fn post_public<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = encode_body(body)?;
        self.execute(Request::post(&self.url(path)), path, Some(body), false)
            .await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        path: &str,
        body: Option<String>,
        authorize: bool,
    ) -> Result<T, ApiError> {
        let mut builder = builder
            .header("Accept", "application/json")
            .abort_signal(self.signal.as_ref());
        let token = if authorize { self.session.token() } else { None };
        if let Some(token) = &token {
            builder = builder.header(
                "Authorization",
                &format!("Bearer {}", token.expose_secret()),
            );
        }
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(body)?,
            None => builder.build()?,
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(error) => return Err(self.transport_failure(error)),
        };
        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(error) => return Err(self.transport_failure(error)),
        };
        log::debug!("Api {path}, status={status}");

        if (200..300).contains(&status) {
            decode_body(&text)
        } else {
            let error = classify_failure(&self.session, status, &text, token.is_some());
            log::warn!("Api {path} failed, error={error}");
            Err(error)
        }
    }

    fn transport_failure(&self, error: gloo_net::Error) -> ApiError {
        let aborted = self
            .signal
            .as_ref()
            .map(AbortSignal::aborted)
            .unwrap_or(false);
        if aborted {
            ApiError::Aborted
        } else {
            error.into()
        }
    }
}

fn encode_body<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|error| ApiError::Decode(error.to_string()))
}

/// Empty success bodies decode as `{}` so acknowledgement types with
/// defaulted fields accept them.
fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let text = if text.trim().is_empty() { "{}" } else { text };
    serde_json::from_str(text).map_err(|error| ApiError::Decode(error.to_string()))
}

/// Maps a non-2xx response into an [`ApiError`]. A 401 on a request that
/// carried the session token ends the session before the caller sees the
/// error.
fn classify_failure(
    session: &SessionHandle,
    status: u16,
    body: &str,
    authenticated: bool,
) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message);
    match status {
        401 => {
            if authenticated {
                log::warn!("Server rejected the session token, logging out");
                session.logout();
            }
            ApiError::Unauthorized { message }
        }
        404 => ApiError::NotFound,
        _ => ApiError::Rejected { status, message },
    }
}

#[hook]
pub fn use_api() -> ApiClient {
    let session = use_session();
    ApiClient::new(config::API_URL, session)
}

#[cfg(test)]
mod tests {
    use api_types::{MessageResponse, Notification};
    use secrecy::SecretString;

    use super::*;
    use crate::session::{
        storage::MemoryStorage,
        tests::{handle_over, profile},
        SessionStatus,
    };

    fn signed_in(storage: &MemoryStorage) -> SessionHandle {
        let session = handle_over(storage);
        session.establish(profile("u1", "asha"), SecretString::from("T".to_owned()));
        session
    }

    #[test]
    fn unauthorized_authenticated_request_forces_logout() {
        let storage = MemoryStorage::default();
        let session = signed_in(&storage);

        let error = classify_failure(&session, 401, r#"{"message":"jwt expired"}"#, true);
        assert_eq!(
            error,
            ApiError::Unauthorized {
                message: Some("jwt expired".to_owned())
            }
        );
        assert_eq!(session.status(), SessionStatus::Anonymous);
        assert!(storage.is_empty());
    }

    #[test]
    fn unauthorized_public_request_keeps_session() {
        let storage = MemoryStorage::default();
        let session = signed_in(&storage);

        let error = classify_failure(&session, 401, "", false);
        assert_eq!(error, ApiError::Unauthorized { message: None });
        assert_eq!(session.status(), SessionStatus::Authenticated);
    }

    #[test]
    fn other_failures_keep_session() {
        let storage = MemoryStorage::default();
        let session = signed_in(&storage);

        assert_eq!(
            classify_failure(&session, 404, "", true),
            ApiError::NotFound
        );
        let rejected = classify_failure(
            &session,
            400,
            r#"{"message":"No services remaining"}"#,
            true,
        );
        assert_eq!(rejected.user_message("fallback"), "No services remaining");
        assert_eq!(
            classify_failure(&session, 500, "<html>oops</html>", true).user_message("fallback"),
            "fallback"
        );
        assert_eq!(session.status(), SessionStatus::Authenticated);
    }

    #[test]
    fn empty_success_body_decodes_as_acknowledgement() {
        let ack: MessageResponse = decode_body("").unwrap();
        assert_eq!(ack.message, None);

        let list: Vec<Notification> = decode_body(r#"[{"_id":"1","title":"Hi"}]"#).unwrap();
        assert_eq!(list.len(), 1);

        let broken = decode_body::<Vec<Notification>>("{");
        assert!(matches!(broken, Err(ApiError::Decode(_))));
    }
}
