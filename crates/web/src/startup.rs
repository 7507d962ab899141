use actix_cors::Cors;
use actix_web::{dev::Server, http, web, web::Data, App, HttpServer};
use signer::{CredentialSigner, HmacCredentialSigner};
use std::sync::Arc;
use std::{io::Error, net::TcpListener};
use tracing_actix_web::TracingLogger;

use crate::{
    configuration::Settings,
    routes::{fallback, ping, rtc, rte, rtm},
};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        // Refuse to start without issuer credentials; this is a fatal
        // configuration error, not something to report per request.
        configuration.issuer.validate()?;

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address).expect(&format!(
            "Failed to bind port {}",
            configuration.application.port
        ));
        let port = listener.local_addr().unwrap().port();

        let signer = HmacCredentialSigner::new(
            configuration.issuer.app_id,
            configuration.issuer.app_certificate,
        );
        let server = run(listener, Arc::new(signer)).await?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), Error> {
        self.server.await
    }
}

async fn run(
    listener: TcpListener,
    signer: Arc<dyn CredentialSigner>,
) -> Result<Server, anyhow::Error> {
    let signer = Data::from(signer);
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .send_wildcard()
            .allowed_methods(vec!["GET", "OPTIONS"])
            .allowed_header(http::header::CONTENT_TYPE)
            .max_age(3600);
        App::new()
            // Logger middleware
            // Sent active-web log to log subscriber
            .wrap(TracingLogger::default())
            .wrap(cors)
            .service(ping)
            .service(rtc)
            .service(rtm)
            .service(rte)
            .default_service(web::route().to(fallback))
            .app_data(signer.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
