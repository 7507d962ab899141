mod ping;
mod rtc;
mod rte;
mod rtm;

pub use ping::*;
pub use rtc::*;
pub use rte::*;
pub use rtm::*;

use actix_web::{http::Method, HttpRequest, HttpResponse};

/// Fallback for unrouted paths. Bare `OPTIONS` requests are answered with an
/// empty 200 so non-preflight CORS probes succeed on any path; everything
/// else is a 404.
pub async fn fallback(request: HttpRequest) -> HttpResponse {
    if request.method() == Method::OPTIONS {
        return HttpResponse::Ok().finish();
    }
    HttpResponse::NotFound().body("Not found")
}
