use anyhow::Result;
use clap::Parser;
use storyteller_backend::app::App;
use storyteller_backend::models::Config;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "storyteller-backend")]
#[command(about = "Serve story generation and image proxy endpoints")]
struct CliArgs {
    /// Interface to bind (overrides HOST).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides PORT).
    #[arg(long, short)]
    port: Option<u16>,
}

impl CliArgs {
    fn apply(self, mut config: Config) -> Config {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storyteller_backend=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting storyteller-backend");

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => args.apply(config),
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    match App::new(&config).await {
        Ok(app) => {
            app.run().await?;
            Ok(())
        }
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    }
}
