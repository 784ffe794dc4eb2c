//! Prime API credentials and request signing.
//!
//! Every request is authenticated with four headers:
//!
//! | Header | Value |
//! |--------|-------|
//! | `X-CB-ACCESS-KEY` | access key |
//! | `X-CB-ACCESS-PASSPHRASE` | passphrase |
//! | `X-CB-ACCESS-TIMESTAMP` | unix seconds |
//! | `X-CB-ACCESS-SIGNATURE` | base64(HMAC-SHA256(signing key, timestamp + METHOD + path + body)) |
//!
//! The signed path includes the `/v1` prefix and excludes the query string.
//!
//! # Loading credentials
//!
//! ```rust,ignore
//! use prime_sdk::auth::Credentials;
//!
//! // PRIME_CREDENTIALS='{"accessKey":"...","passphrase":"...","signingKey":"...",
//! //                     "portfolioId":"...","entityId":"...","svcAccountId":"..."}'
//! let credentials = Credentials::from_env()?;
//! ```

use std::fmt;

use base64::prelude::*;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Environment variable holding the credentials JSON document.
pub const CREDENTIALS_ENV_VAR: &str = "PRIME_CREDENTIALS";

pub const ACCESS_KEY_HEADER: &str = "X-CB-ACCESS-KEY";
pub const PASSPHRASE_HEADER: &str = "X-CB-ACCESS-PASSPHRASE";
pub const TIMESTAMP_HEADER: &str = "X-CB-ACCESS-TIMESTAMP";
pub const SIGNATURE_HEADER: &str = "X-CB-ACCESS-SIGNATURE";

/// Credential loading and signing errors.
#[derive(Debug, Clone, Error)]
pub enum CredentialsError {
    /// The credentials environment variable is not set
    #[error("Environment variable {0} is not set")]
    MissingEnvVar(String),

    /// The credentials document is not valid JSON or lacks a required key
    #[error("Malformed credentials: {0}")]
    Malformed(String),

    /// A required credential is empty
    #[error("Missing credential field: {0}")]
    MissingField(&'static str),

    /// The signing key was rejected by the MAC
    #[error("Invalid signing key: {0}")]
    InvalidSigningKey(String),
}

/// Result type alias for credential operations.
pub type CredentialsResult<T> = Result<T, CredentialsError>;

/// Prime API key material plus the default portfolio/entity identifiers.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    access_key: String,
    passphrase: String,
    signing_key: String,
    #[serde(default)]
    portfolio_id: Option<String>,
    #[serde(default)]
    entity_id: Option<String>,
    #[serde(default)]
    svc_account_id: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("passphrase", &"<redacted>")
            .field("signing_key", &"<redacted>")
            .field("portfolio_id", &self.portfolio_id)
            .field("entity_id", &self.entity_id)
            .field("svc_account_id", &self.svc_account_id)
            .finish()
    }
}

/// Authentication headers for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub access_key: String,
    pub passphrase: String,
    pub timestamp: String,
    pub signature: String,
}

impl SignedHeaders {
    /// Header name/value pairs in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (ACCESS_KEY_HEADER, self.access_key.as_str()),
            (PASSPHRASE_HEADER, self.passphrase.as_str()),
            (TIMESTAMP_HEADER, self.timestamp.as_str()),
            (SIGNATURE_HEADER, self.signature.as_str()),
        ]
        .into_iter()
    }
}

impl Credentials {
    /// Create credentials from the three secrets.
    pub fn new(
        access_key: impl Into<String>,
        passphrase: impl Into<String>,
        signing_key: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            passphrase: passphrase.into(),
            signing_key: signing_key.into(),
            portfolio_id: None,
            entity_id: None,
            svc_account_id: None,
        }
    }

    /// Set the default portfolio id.
    pub fn with_portfolio_id(mut self, portfolio_id: impl Into<String>) -> Self {
        self.portfolio_id = Some(portfolio_id.into());
        self
    }

    /// Set the default entity id.
    pub fn with_entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Set the service account id.
    pub fn with_svc_account_id(mut self, svc_account_id: impl Into<String>) -> Self {
        self.svc_account_id = Some(svc_account_id.into());
        self
    }

    /// Load credentials from [`CREDENTIALS_ENV_VAR`].
    pub fn from_env() -> CredentialsResult<Self> {
        Self::from_env_var(CREDENTIALS_ENV_VAR)
    }

    /// Load credentials from the JSON document stored in `name`.
    pub fn from_env_var(name: &str) -> CredentialsResult<Self> {
        let json =
            std::env::var(name).map_err(|_| CredentialsError::MissingEnvVar(name.to_string()))?;
        Self::from_json(&json)
    }

    /// Parse a credentials JSON document.
    pub fn from_json(json: &str) -> CredentialsResult<Self> {
        let credentials: Self =
            serde_json::from_str(json).map_err(|e| CredentialsError::Malformed(e.to_string()))?;
        credentials.validate()?;
        Ok(credentials)
    }

    fn validate(&self) -> CredentialsResult<()> {
        if self.access_key.is_empty() {
            return Err(CredentialsError::MissingField("accessKey"));
        }
        if self.passphrase.is_empty() {
            return Err(CredentialsError::MissingField("passphrase"));
        }
        if self.signing_key.is_empty() {
            return Err(CredentialsError::MissingField("signingKey"));
        }
        Ok(())
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub fn portfolio_id(&self) -> Option<&str> {
        self.portfolio_id.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn svc_account_id(&self) -> Option<&str> {
        self.svc_account_id.as_deref()
    }

    /// Compute the request signature.
    ///
    /// `request_path` may carry a query string; it is not part of the signed message.
    pub fn sign(
        &self,
        timestamp: &str,
        method: &str,
        request_path: &str,
        body: &str,
    ) -> CredentialsResult<String> {
        let path = match request_path.find('?') {
            Some(index) => &request_path[..index],
            None => request_path,
        };

        let message = format!("{timestamp}{method}{path}{body}");
        tracing::trace!(timestamp, method, path, body_len = body.len(), "Signing request");

        let mut mac = HmacSha256::new_from_slice(self.signing_key.as_bytes())
            .map_err(|e| CredentialsError::InvalidSigningKey(e.to_string()))?;
        mac.update(message.as_bytes());
        Ok(BASE64_STANDARD.encode(mac.finalize().into_bytes()))
    }

    /// Build all four authentication headers for a request at `timestamp` (unix seconds).
    pub fn signed_headers(
        &self,
        timestamp: i64,
        method: &str,
        request_path: &str,
        body: &str,
    ) -> CredentialsResult<SignedHeaders> {
        let timestamp = timestamp.to_string();
        let signature = self.sign(&timestamp, method, request_path, body)?;
        Ok(SignedHeaders {
            access_key: self.access_key.clone(),
            passphrase: self.passphrase.clone(),
            timestamp,
            signature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREDENTIALS_JSON: &str = r#"{
        "accessKey": "test_access_key",
        "passphrase": "test_passphrase",
        "signingKey": "test_signing_key",
        "portfolioId": "test_portfolio_id",
        "entityId": "test_entity_id",
        "svcAccountId": "test_svc_account_id"
    }"#;

    fn credentials() -> Credentials {
        Credentials::new("test_access_key", "test_passphrase", "test_signing_key")
    }

    #[test]
    fn test_from_json() {
        let creds = Credentials::from_json(CREDENTIALS_JSON).unwrap();
        assert_eq!(creds.access_key(), "test_access_key");
        assert_eq!(creds.portfolio_id(), Some("test_portfolio_id"));
        assert_eq!(creds.entity_id(), Some("test_entity_id"));
        assert_eq!(creds.svc_account_id(), Some("test_svc_account_id"));
    }

    #[test]
    fn test_from_json_rejects_missing_and_empty_keys() {
        let missing = Credentials::from_json(r#"{"accessKey": "k", "passphrase": "p"}"#);
        assert!(matches!(missing, Err(CredentialsError::Malformed(_))));

        let empty =
            Credentials::from_json(r#"{"accessKey": "k", "passphrase": "", "signingKey": "s"}"#);
        assert!(matches!(empty, Err(CredentialsError::MissingField("passphrase"))));

        assert!(matches!(
            Credentials::from_json("not json"),
            Err(CredentialsError::Malformed(_))
        ));
    }

    #[test]
    fn test_from_env_var() {
        let name = "PRIME_SDK_TEST_CREDENTIALS_FROM_ENV";
        std::env::set_var(name, CREDENTIALS_JSON);
        let creds = Credentials::from_env_var(name).unwrap();
        assert_eq!(creds, Credentials::from_json(CREDENTIALS_JSON).unwrap());
        std::env::remove_var(name);

        assert!(matches!(
            Credentials::from_env_var(name),
            Err(CredentialsError::MissingEnvVar(_))
        ));
    }

    #[test]
    fn test_sign_get_without_body() {
        let signature = credentials()
            .sign("1700000000", "GET", "/v1/portfolios", "")
            .unwrap();
        assert_eq!(signature, "B3iQf9NyckQUAB8SYtpJ/mvhALPLWoH4X6EqYbJeUIk=");
    }

    #[test]
    fn test_sign_post_with_body() {
        let signature = credentials()
            .sign("1700000000", "POST", "/v1/portfolios/p-1/order", r#"{"side":"BUY"}"#)
            .unwrap();
        assert_eq!(signature, "7gMPebhlzLyTv5DNJo0CzyNtceVttGnVBLKCNtF++rw=");
    }

    #[test]
    fn test_sign_ignores_query_string() {
        let creds = credentials();
        let plain = creds.sign("1700000000", "GET", "/v1/portfolios", "").unwrap();
        let with_query = creds
            .sign("1700000000", "GET", "/v1/portfolios?limit=10", "")
            .unwrap();
        assert_eq!(plain, with_query);
    }

    #[test]
    fn test_signed_headers() {
        let headers = credentials()
            .signed_headers(1700000000, "GET", "/v1/portfolios", "")
            .unwrap();
        let pairs: Vec<_> = headers.iter().collect();
        assert_eq!(pairs[0], (ACCESS_KEY_HEADER, "test_access_key"));
        assert_eq!(pairs[1], (PASSPHRASE_HEADER, "test_passphrase"));
        assert_eq!(pairs[2], (TIMESTAMP_HEADER, "1700000000"));
        assert_eq!(
            pairs[3],
            (SIGNATURE_HEADER, "B3iQf9NyckQUAB8SYtpJ/mvhALPLWoH4X6EqYbJeUIk=")
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let dbg = format!("{:?}", credentials());
        assert!(dbg.contains("test_access_key"));
        assert!(!dbg.contains("test_passphrase"));
        assert!(!dbg.contains("test_signing_key"));
        assert!(dbg.contains("<redacted>"));
    }
}
