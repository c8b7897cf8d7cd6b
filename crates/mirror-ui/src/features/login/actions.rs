//! Token exchange for the login page.

use crate::features::admin::forms::FormError;
use crate::features::login::state::LoginForm;
use crate::services::api::{ApiClient, ApiError};
use crate::services::http::Transport;
use thiserror::Error;

/// Failure of a login attempt.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LoginError {
    /// Rejected locally; no request was sent.
    #[error(transparent)]
    Form(#[from] FormError),
    /// The token endpoint rejected the credentials.
    #[error("invalid username or password")]
    InvalidCredentials,
    /// Any other failure.
    #[error(transparent)]
    Api(ApiError),
}

impl From<ApiError> for LoginError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => Self::InvalidCredentials,
            other => Self::Api(other),
        }
    }
}

/// Exchange the form's credentials for a token and store it.
///
/// Returns the stored token.
///
/// # Errors
/// Returns [`LoginError`] when validation, the request or the token body
/// fails; nothing is stored in that case.
pub async fn submit_login<T: Transport>(
    client: &ApiClient<T>,
    form: &LoginForm,
) -> Result<String, LoginError> {
    let credentials = form.validate()?;
    let response = client
        .login(&credentials.username, &credentials.password)
        .await?;
    let token = response.token.trim().to_string();
    if token.is_empty() {
        return Err(LoginError::Api(ApiError::Decode(
            "token endpoint returned an empty token".to_string(),
        )));
    }
    client.tokens().store(&token);
    tracing::info!(username = %credentials.username, "signed in");
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::{MemoryTokenStore, TokenStore};
    use crate::test_support::{RecordingTransport, client};

    fn filled() -> LoginForm {
        LoginForm {
            username: "admin".into(),
            password: "admin".into(),
            submitting: false,
        }
    }

    #[tokio::test]
    async fn stores_token_from_either_shape() {
        let transport = RecordingTransport::default();
        transport.respond(200, r#"{"token": "plain"}"#);
        transport.respond(200, r#"{"access_token": "oauth", "token_type": "bearer"}"#);
        let tokens = MemoryTokenStore::default();
        let client = client(&transport, &tokens);

        assert_eq!(submit_login(&client, &filled()).await.as_deref(), Ok("plain"));
        assert_eq!(tokens.token().as_deref(), Some("plain"));
        assert_eq!(submit_login(&client, &filled()).await.as_deref(), Ok("oauth"));
        assert_eq!(tokens.token().as_deref(), Some("oauth"));
    }

    #[tokio::test]
    async fn bad_credentials_store_nothing() {
        let transport = RecordingTransport::default();
        transport.respond(401, r#"{"detail": "Incorrect username or password"}"#);
        let tokens = MemoryTokenStore::default();
        let client = client(&transport, &tokens);

        let err = submit_login(&client, &filled()).await.expect_err("401");
        assert_eq!(err, LoginError::InvalidCredentials);
        assert_eq!(tokens.token(), None);
    }

    #[tokio::test]
    async fn missing_password_sends_nothing() {
        let transport = RecordingTransport::default();
        let client = client(&transport, &MemoryTokenStore::default());
        let form = LoginForm {
            password: String::new(),
            ..filled()
        };

        let err = submit_login(&client, &form).await.expect_err("invalid");
        assert_eq!(err.to_string(), "password is required");
        assert!(transport.requests().is_empty());
    }
}
