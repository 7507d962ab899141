use actix_web::{get, HttpResponse};

#[get("/api/ping")]
pub async fn ping() -> Result<HttpResponse, actix_web::Error> {
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("pong"))
}
