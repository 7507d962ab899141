use actix_web::{get, web, HttpResponse};
use signer::CredentialSigner;

use crate::issuance::{issue_combined_tokens, IssuanceError, MediaTokenRequest};

#[derive(serde::Serialize)]
pub struct CombinedTokenResponse {
    #[serde(rename = "rtcToken")]
    pub rtc_token: String,
    #[serde(rename = "rtmToken")]
    pub rtm_token: String,
}

/// Combined issuance: one media and one messaging credential, sharing the
/// same identity string and expiry. All-or-nothing on failure.
#[get("/api/rte")]
#[tracing::instrument(
    name = "Issuing combined credentials",
    skip(query, signer),
    fields(channel_name = %query.channel_name, tokentype = %query.tokentype)
)]
pub async fn rte(
    query: web::Query<MediaTokenRequest>,
    signer: web::Data<dyn CredentialSigner>,
) -> Result<HttpResponse, IssuanceError> {
    let (rtc_token, rtm_token) = issue_combined_tokens(signer.get_ref(), &query)?;
    Ok(HttpResponse::Ok().json(CombinedTokenResponse {
        rtc_token,
        rtm_token,
    }))
}
