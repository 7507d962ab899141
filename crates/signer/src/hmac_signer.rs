use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use sha2::Sha256;

use crate::{CredentialSigner, MediaIdentity, Role, SignError};

/// Token format version, prefixed to every issued credential.
const TOKEN_VERSION: &str = "001";

type HmacSha256 = Hmac<Sha256>;

/// Production signer: JSON claims, HMAC-SHA256 over the payload bytes,
/// emitted as `001<base64url(payload)>.<base64url(signature)>`.
///
/// Holds the process-wide issuer pair; constructed once at startup and
/// shared read-only across requests.
pub struct HmacCredentialSigner {
    app_id: String,
    app_certificate: Secret<String>,
}

#[derive(Serialize)]
struct MediaClaims<'a> {
    service: &'static str,
    app_id: &'a str,
    channel_name: &'a str,
    identity: &'a MediaIdentity,
    role: u8,
    expires_at: u32,
}

#[derive(Serialize)]
struct MessagingClaims<'a> {
    service: &'static str,
    app_id: &'a str,
    account: &'a str,
    expires_at: u32,
}

impl HmacCredentialSigner {
    pub fn new(app_id: String, app_certificate: Secret<String>) -> Self {
        Self {
            app_id,
            app_certificate,
        }
    }

    fn sign_claims<T: Serialize>(&self, claims: &T) -> Result<String, SignError> {
        let payload = serde_json::to_vec(claims)?;
        let mut mac =
            HmacSha256::new_from_slice(self.app_certificate.expose_secret().as_bytes())
                .map_err(|_| SignError::InvalidKey)?;
        mac.update(&payload);
        let signature = mac.finalize().into_bytes();
        Ok(format!(
            "{TOKEN_VERSION}{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }
}

impl CredentialSigner for HmacCredentialSigner {
    fn sign_media(
        &self,
        channel_name: &str,
        identity: &MediaIdentity,
        role: Role,
        expires_at: u32,
    ) -> Result<String, SignError> {
        self.sign_claims(&MediaClaims {
            service: "rtc",
            app_id: &self.app_id,
            channel_name,
            identity,
            role: role.wire_value(),
            expires_at,
        })
    }

    fn sign_messaging(&self, account: &str, expires_at: u32) -> Result<String, SignError> {
        self.sign_claims(&MessagingClaims {
            service: "rtm",
            app_id: &self.app_id,
            account,
            expires_at,
        })
    }
}
