// src/main.rs
use anyhow::Result;
use deploy_verifier::{
    config::{self, VerifierConfig},
    report,
    verifier::DeployVerifier,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("deploy_verifier=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from: {}", path);
            config::load_config(&path).await?
        }
        None => VerifierConfig::default(),
    };

    let verifier = DeployVerifier::new(config)?;
    let outcome = verifier.check().await?;

    // Every classification, transport errors included, exits 0
    report::print_report(&outcome)?;

    Ok(())
}
