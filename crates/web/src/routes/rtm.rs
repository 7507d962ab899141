use actix_web::{get, web, HttpResponse};
use signer::CredentialSigner;

use crate::issuance::{issue_messaging_token, IssuanceError, MessagingTokenRequest};

#[derive(serde::Serialize)]
pub struct MessagingTokenResponse {
    #[serde(rename = "rtmToken")]
    pub rtm_token: String,
}

#[get("/api/rtm")]
#[tracing::instrument(name = "Issuing a messaging credential", skip(query, signer))]
pub async fn rtm(
    query: web::Query<MessagingTokenRequest>,
    signer: web::Data<dyn CredentialSigner>,
) -> Result<HttpResponse, IssuanceError> {
    let rtm_token = issue_messaging_token(signer.get_ref(), &query)?;
    Ok(HttpResponse::Ok().json(MessagingTokenResponse { rtm_token }))
}
