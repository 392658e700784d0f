use anyhow::Context;
use clap::Parser;
use domain_buyer::utils::{logger, validation::Validate};
use domain_buyer::{CliConfig, DomainBuyer, InwxClient, LocalDomainList};
use std::path::Path;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // .env is optional; real environment variables take precedence
    dotenvy::dotenv().ok();
    let config = CliConfig::parse();

    if let Err(e) = logger::init_cli_logger(config.verbose, Path::new(&config.log_file)) {
        logger::init_console_logger(config.verbose);
        tracing::error!("❌ Cannot open log file {}: {}", config.log_file, e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    tracing::info!("Starting domain-buyer against {}", config.endpoint());
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    let settings = config.run_settings()?;
    let client = InwxClient::with_timeout(config.endpoint(), config.lang.clone(), config.timeout())
        .context("building the registrar HTTP client")?;
    let source = LocalDomainList::new(&config.domains_file);
    let mut buyer = DomainBuyer::new(client, source, settings);

    match buyer.run().await {
        Ok(summary) => {
            println!(
                "✅ Done: {} checked, {} available, {} purchased, {} purchase failures",
                summary.checked, summary.available, summary.purchased, summary.purchase_failed
            );
            Ok(())
        }
        Err(e) => {
            // The error itself was logged by the run; only classify it here.
            tracing::info!(
                "Run aborted (Category: {:?}, Severity: {:?}, exit code {})",
                e.category(),
                e.severity(),
                e.exit_code()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}
