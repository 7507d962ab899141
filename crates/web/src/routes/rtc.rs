use actix_web::{get, web, HttpResponse};
use signer::CredentialSigner;

use crate::issuance::{issue_media_token, IssuanceError, MediaTokenRequest};

#[derive(serde::Serialize)]
pub struct MediaTokenResponse {
    #[serde(rename = "rtcToken")]
    pub rtc_token: String,
}

#[get("/api/rtc")]
#[tracing::instrument(
    name = "Issuing a media credential",
    skip(query, signer),
    fields(channel_name = %query.channel_name, tokentype = %query.tokentype)
)]
pub async fn rtc(
    query: web::Query<MediaTokenRequest>,
    signer: web::Data<dyn CredentialSigner>,
) -> Result<HttpResponse, IssuanceError> {
    let rtc_token = issue_media_token(signer.get_ref(), &query)?;
    Ok(HttpResponse::Ok().json(MediaTokenResponse { rtc_token }))
}
