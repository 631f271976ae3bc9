use std::net::TcpListener;
use std::path::{Path, PathBuf};

use actix_files::Files;
use actix_web::dev::Server;
use actix_web::error::{JsonPayloadError, QueryPayloadError, UrlencodedError};
use actix_web::{App, HttpServer, guard, web};
use anyhow::Context;
use tera::Tera;
use tracing_actix_web::TracingLogger;

use crate::configuration::{Settings, SiteSettings};
use crate::domain::ContactEmail;
use crate::email_client::EmailClient;
use crate::routes::{extractor_error_handler, health_check, home, not_found, submit_contact};

/// Largest accepted JSON or url-encoded body.
pub const BODY_LIMIT: usize = 100 * 1024;

pub struct Application {
    port: u16,
    server: Server,
}

/// The operator inbox every submission is delivered to.
pub struct ContactRecipient(pub ContactEmail);

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let email_client = config.email_client.client()?;
        let recipient = config
            .email_client
            .recipient()
            .map_err(anyhow::Error::msg)
            .context("Invalid recipient email address.")?;
        let templates = load_templates(&config.site.templates_dir)?;

        let address = format!("{}:{}", config.application.host, config.application.port);
        let listener =
            TcpListener::bind(&address).with_context(|| format!("Failed to bind {address}."))?;
        let port = listener.local_addr()?.port();
        let server = run(
            listener,
            email_client,
            ContactRecipient(recipient),
            templates,
            config.site,
        )?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn load_templates(templates_dir: &Path) -> Result<Tera, anyhow::Error> {
    let glob = templates_dir.join("**").join("*");
    let glob = glob
        .to_str()
        .context("The templates directory is not valid UTF-8.")?;
    Tera::new(glob).context("Failed to initialize Tera templates.")
}

pub fn run(
    listener: TcpListener,
    email_client: EmailClient,
    recipient: ContactRecipient,
    templates: Tera,
    site: SiteSettings,
) -> Result<Server, anyhow::Error> {
    let email_client = web::Data::new(email_client);
    let recipient = web::Data::new(recipient);
    let templates = web::Data::new(templates);
    let static_dir: Option<PathBuf> = site.static_dir.is_dir().then(|| site.static_dir.clone());
    if static_dir.is_none() {
        tracing::warn!(
            static_dir = %site.static_dir.display(),
            "Static assets directory not found, static files are not served"
        );
    }
    let site = web::Data::new(site);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(
                web::FormConfig::default()
                    .limit(BODY_LIMIT)
                    .error_handler(extractor_error_handler::<UrlencodedError>),
            )
            .app_data(
                web::JsonConfig::default()
                    .limit(BODY_LIMIT)
                    .error_handler(extractor_error_handler::<JsonPayloadError>),
            )
            .app_data(
                web::QueryConfig::default()
                    .error_handler(extractor_error_handler::<QueryPayloadError>),
            )
            .service(
                web::resource("/")
                    .route(web::get().to(home))
                    .route(web::head().to(home))
                    .default_service(web::to(not_found)),
            )
            .service(
                web::resource("/contact")
                    .route(web::post().to(submit_contact))
                    .default_service(web::to(not_found)),
            )
            .service(
                web::resource("/health_check")
                    .route(web::get().to(health_check))
                    .default_service(web::to(not_found)),
            )
            .configure(|cfg| {
                if let Some(dir) = &static_dir {
                    cfg.service(
                        Files::new("/", dir)
                            .guard(guard::Any(guard::Get()).or(guard::Head()))
                            .default_handler(web::to(not_found)),
                    );
                }
            })
            .default_service(web::to(not_found))
            .app_data(email_client.clone())
            .app_data(recipient.clone())
            .app_data(templates.clone())
            .app_data(site.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
