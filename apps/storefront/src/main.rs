use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use anyhow::{Context, Result};
use catalog::CatalogStore;
use clap::{Parser, Subcommand};
use client_core::{FlowOptions, GeminiImageClient, Storefront};
use shared::domain::ProductId;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod controller;
mod export;
mod ui;

use config::{load_settings, Settings, DEFAULT_CONFIG_PATH};
use controller::{
    events::UiErrorContext,
    orchestration::{
        apply_browse_command, failure_exit_status, finish_session, render_current, run_trigger,
        spawn_event_reporter, BrowseCommand, Trigger, TriggerOutcome, BROWSE_HELP,
    },
};

#[derive(Parser, Debug)]
#[command(name = "storefront", about = "YESERLI storefront with generated product visuals")]
struct Cli {
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Write generated visuals and a manifest here before exiting.
    #[arg(long)]
    export: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Landing page: hero banner and product grid.
    Home,
    /// Detail page for one product.
    Show { product_id: String },
    Generate {
        #[command(subcommand)]
        target: GenerateTarget,
    },
    /// Interactive session that keeps a current view.
    Browse,
}

#[derive(Subcommand, Debug)]
enum GenerateTarget {
    /// Hero first, then every product still showing a placeholder.
    All,
    Hero,
    Product { product_id: String },
}

impl GenerateTarget {
    fn trigger(&self) -> Trigger {
        match self {
            Self::All => Trigger::All,
            Self::Hero => Trigger::Hero,
            Self::Product { product_id } => Trigger::Product(ProductId::new(product_id.clone())),
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let settings = load_settings(&cli.config)?;
    let client = GeminiImageClient::new(settings.image_service_config()?)
        .context("failed to build image service client")?;
    info!(
        model = %settings.model,
        endpoint = %client.endpoint(),
        credential = settings.api_key.is_some(),
        "storefront ready"
    );

    let storefront = Storefront::new(
        CatalogStore::seeded(),
        Arc::new(client),
        FlowOptions {
            regenerate_hero: settings.regenerate_hero,
        },
    );

    let context = match &cli.command {
        Command::Generate { target } => target.trigger().context(),
        _ => UiErrorContext::General,
    };
    let reporter = spawn_event_reporter(&storefront, context);

    let result = match run_command(&storefront, cli.command).await {
        Ok(exit) => export_if_requested(&storefront, &settings, cli.export.as_deref())
            .await
            .map(|()| exit),
        Err(err) => Err(err),
    };
    finish_session(storefront, reporter, result).await
}

async fn export_if_requested(
    storefront: &Storefront,
    settings: &Settings,
    export: Option<&Path>,
) -> Result<()> {
    let Some(dir) = export.or(settings.output_dir.as_deref()) else {
        return Ok(());
    };
    let products = storefront.catalog().all_products().await;
    let hero = storefront.catalog().hero_image().await;
    let manifest = export::export_visuals(dir, &settings.model, hero.as_ref(), &products).await?;
    println!(
        "exported {} visual(s) to {}",
        manifest.entries.len(),
        dir.display()
    );
    Ok(())
}

async fn run_command(storefront: &Arc<Storefront>, command: Command) -> Result<ExitCode> {
    match command {
        Command::Home => {
            println!("{}", render_current(storefront).await);
        }
        Command::Show { product_id } => {
            storefront.navigate(&product_id).await;
            println!("{}", render_current(storefront).await);
        }
        Command::Generate { target } => {
            let trigger = target.trigger();
            if let Trigger::Product(id) = &trigger {
                storefront.navigate(id.as_str()).await;
            }
            let result = run_trigger(storefront, &trigger).await;
            println!("{}", render_current(storefront).await);
            match result {
                Ok(TriggerOutcome::Batch(report)) => {
                    println!(
                        "{} visual(s) generated, {} failed",
                        report.generated_count(),
                        report.failures().count()
                    );
                }
                Ok(TriggerOutcome::Item(_)) => {}
                Err(err) => {
                    tracing::debug!(
                        category = ?err.category(),
                        kind = ?err.kind(),
                        context = ?err.context(),
                        message = err.message(),
                        "generation trigger failed"
                    );
                    return Ok(ExitCode::from(failure_exit_status(&err)));
                }
            }
        }
        Command::Browse => browse(storefront).await?,
    }
    Ok(ExitCode::SUCCESS)
}

async fn browse(storefront: &Arc<Storefront>) -> Result<()> {
    println!("{}", render_current(storefront).await);
    println!("{BROWSE_HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let Some(command) = BrowseCommand::parse(&line) else {
            if !line.trim().is_empty() {
                println!("{BROWSE_HELP}");
            }
            continue;
        };
        let (keep_going, screen) = apply_browse_command(storefront, command).await;
        if let Some(screen) = screen {
            println!("{screen}");
        }
        if !keep_going {
            break;
        }
    }
    Ok(())
}
