use std::path::Path;

use contact_form::{
    configuration::{get_configuration, load_env_file},
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Deployments keep credentials in `config.env`; real environment variables win.
    load_env_file(Path::new("config.env"))?;

    let subscriber = get_subscriber("contact_form".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = get_configuration()?;
    let app = Application::build(config).await?;
    tracing::info!(port = app.port(), "Contact form server started");

    if let Err(e) = app.run_until_stopped().await {
        tracing::error!(
            error.cause_chain = ?e,
            error.message = %e,
            "API failed"
        );
        return Err(e.into());
    }

    tracing::info!("API has exited");
    Ok(())
}
