//! Credential issuance core: parameter validation, expiry resolution,
//! identity normalization and the per-operation pipelines behind the
//! `/api/rtc`, `/api/rtm` and `/api/rte` routes.

use std::time::{SystemTime, UNIX_EPOCH};

use actix_web::http::StatusCode;
use actix_web::ResponseError;
use signer::{CredentialSigner, MediaIdentity, Role, SignError};

#[derive(thiserror::Error)]
pub enum IssuanceError {
    #[error("Error parsing expiry")]
    InvalidExpiry,
    #[error("Error parsing identity")]
    InvalidIdentity,
    #[error("Unknown token type")]
    UnknownTokenKind(String),
    #[error("Error generating token")]
    SigningFailed(#[source] SignError),
}

impl std::fmt::Debug for IssuanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for IssuanceError {
    fn status_code(&self) -> StatusCode {
        match self {
            IssuanceError::InvalidExpiry => StatusCode::BAD_REQUEST,
            // The existing client contract reports validation and signing
            // faults alike as 500; only the expiry case is a 400.
            IssuanceError::InvalidIdentity
            | IssuanceError::UnknownTokenKind(_)
            | IssuanceError::SigningFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

/// Query parameters accepted by the media (`/api/rtc`) and combined
/// (`/api/rte`) routes. Everything except `expiry` falls back to the empty
/// string so that our own taxonomy, not the extractor, reports the failure.
#[derive(Debug, serde::Deserialize)]
pub struct MediaTokenRequest {
    #[serde(rename = "channelName", default)]
    pub channel_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub tokentype: String,
    #[serde(default)]
    pub uid: String,
    pub expiry: Option<String>,
}

/// Query parameters accepted by the messaging (`/api/rtm`) route.
#[derive(Debug, serde::Deserialize)]
pub struct MessagingTokenRequest {
    #[serde(default)]
    pub uid: String,
    pub expiry: Option<String>,
}

/// Resolves the relative `expiry` query parameter against the current
/// wall-clock, once per request.
pub fn resolve_expiry(raw: Option<&str>) -> Result<u32, IssuanceError> {
    resolve_expiry_at(raw, unix_now())
}

/// Expiry resolution against an explicit instant.
///
/// The input is narrowed to 32 bits and the sum wraps; both match the
/// timestamp width of the signing protocol and are kept for compatibility.
pub fn resolve_expiry_at(raw: Option<&str>, now: u32) -> Result<u32, IssuanceError> {
    let raw = raw.ok_or(IssuanceError::InvalidExpiry)?;
    let relative: u64 = raw.parse().map_err(|_| IssuanceError::InvalidExpiry)?;
    Ok(now.wrapping_add(relative as u32))
}

fn unix_now() -> u32 {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    since_epoch.as_secs() as u32
}

/// Interprets the `tokentype`/`uid` pair as a media subject identity.
pub fn normalize_media_identity(
    tokentype: &str,
    uid: &str,
) -> Result<MediaIdentity, IssuanceError> {
    match tokentype {
        "userAccount" => normalize_account(uid).map(|a| MediaIdentity::Account(a.to_string())),
        "uid" => uid
            .parse::<u32>()
            .map(MediaIdentity::Uid)
            .map_err(|_| IssuanceError::InvalidIdentity),
        other => Err(IssuanceError::UnknownTokenKind(other.to_string())),
    }
}

/// Messaging identities are always account-shaped, whatever `tokentype`
/// the rest of the request used.
pub fn normalize_account(account: &str) -> Result<&str, IssuanceError> {
    if account.is_empty() {
        return Err(IssuanceError::InvalidIdentity);
    }
    Ok(account)
}

/// `publisher` selects the publisher role; anything else is a subscriber.
pub fn role_from_param(role: &str) -> Role {
    if role == "publisher" {
        Role::Publisher
    } else {
        Role::Subscriber
    }
}

pub fn issue_media_token(
    signer: &dyn CredentialSigner,
    request: &MediaTokenRequest,
) -> Result<String, IssuanceError> {
    let expires_at = resolve_expiry(request.expiry.as_deref())?;
    sign_media(signer, request, expires_at)
}

pub fn issue_messaging_token(
    signer: &dyn CredentialSigner,
    request: &MessagingTokenRequest,
) -> Result<String, IssuanceError> {
    let expires_at = resolve_expiry(request.expiry.as_deref())?;
    let account = normalize_account(&request.uid)?;
    signer
        .sign_messaging(account, expires_at)
        .map_err(IssuanceError::SigningFailed)
}

/// Issues the media and messaging credentials of a combined request.
///
/// Both signing calls are attempted; the response is all-or-nothing, so a
/// failure on either side fails the whole request with no partial result.
pub fn issue_combined_tokens(
    signer: &dyn CredentialSigner,
    request: &MediaTokenRequest,
) -> Result<(String, String), IssuanceError> {
    let expires_at = resolve_expiry(request.expiry.as_deref())?;
    let media = sign_media(signer, request, expires_at);
    let messaging = normalize_account(&request.uid).and_then(|account| {
        signer
            .sign_messaging(account, expires_at)
            .map_err(IssuanceError::SigningFailed)
    });
    Ok((media?, messaging?))
}

fn sign_media(
    signer: &dyn CredentialSigner,
    request: &MediaTokenRequest,
    expires_at: u32,
) -> Result<String, IssuanceError> {
    let identity = normalize_media_identity(&request.tokentype, &request.uid)?;
    let role = role_from_param(&request.role);
    signer
        .sign_media(&request.channel_name, &identity, role, expires_at)
        .map_err(IssuanceError::SigningFailed)
}
