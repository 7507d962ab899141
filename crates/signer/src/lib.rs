//! Credential signing for the real-time token service.
//!
//! The service core only ever talks to the [`CredentialSigner`] trait; the
//! production implementation lives in [`hmac_signer`]. Tests substitute a
//! deterministic stub so issuance logic can be exercised without real keys.

mod hmac_signer;

pub use hmac_signer::HmacCredentialSigner;

use serde::Serialize;

/// Role requested for a media channel credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// May publish audio/video into the channel.
    Publisher,
    /// Receive-only participant.
    Subscriber,
}

impl Role {
    /// Numeric encoding carried inside the signed claims.
    pub fn wire_value(self) -> u8 {
        match self {
            Role::Publisher => 1,
            Role::Subscriber => 2,
        }
    }
}

/// Subject identity of a media credential.
///
/// The signing protocol accepts either a numeric uid or an opaque account
/// name; messaging credentials are always account-shaped and take a plain
/// string instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MediaIdentity {
    Uid(u32),
    Account(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SignError {
    #[error("failed to encode token claims")]
    EncodeClaims(#[from] serde_json::Error),
    #[error("signing key rejected by the MAC")]
    InvalidKey,
}

/// The two signing capabilities required from the gateway.
///
/// Implementations hold the issuer credentials themselves; callers supply
/// only the per-request fields. Any failure is opaque to the caller.
pub trait CredentialSigner: Send + Sync {
    fn sign_media(
        &self,
        channel_name: &str,
        identity: &MediaIdentity,
        role: Role,
        expires_at: u32,
    ) -> Result<String, SignError>;

    fn sign_messaging(&self, account: &str, expires_at: u32) -> Result<String, SignError>;
}
