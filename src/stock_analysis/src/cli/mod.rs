//! Command-line front end standing in for the interactive dashboard.

pub mod commands;
pub mod render;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::{
    config::AppConfig,
    dashboard::{Dashboard, DashboardView, Selection, SelectionUpdate},
    dashboard_from_config,
    errors::Error,
    providers::DataProvider,
};
use commands::{Cli, Commands, OutputFormat};
use render::{render_choices, render_text};

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    execute(cli).await.context("stock-analysis failed")?;
    info!("Script execution completed");
    Ok(())
}

async fn execute(cli: Cli) -> Result<(), Error> {
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Symbols => {
            print!("{}", render_choices(&config));
        }
        Commands::Show {
            symbol,
            period,
            threshold,
            format,
        } => {
            let defaults = config.default_selection();
            let selection = Selection::new(
                symbol.unwrap_or(defaults.symbol),
                period.unwrap_or(defaults.period),
                threshold.unwrap_or(defaults.threshold),
            );
            config.check_selection(&selection)?;
            info!(symbol = %selection.symbol, period = %selection.period, threshold = selection.threshold, "User selection");

            let dashboard = dashboard_from_config(&config)?;
            let view = dashboard.render(&selection).await;
            print!("{}", format_view(&view, format)?);
        }
        Commands::Interactive { format } => {
            let dashboard = dashboard_from_config(&config)?;
            interactive(&config, &dashboard, format).await?;
        }
    }
    Ok(())
}

fn format_view(view: &DashboardView, format: OutputFormat) -> Result<String, Error> {
    Ok(match format {
        OutputFormat::Text => render_text(view),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(view)?),
    })
}

/// Renders the default selection, then one full pass per accepted update line.
async fn interactive<P: DataProvider>(
    config: &AppConfig,
    dashboard: &Dashboard<P>,
    format: OutputFormat,
) -> Result<(), Error> {
    let mut selection = config.default_selection();
    print!("{}", format_view(&dashboard.render(&selection).await, format)?);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit" | "q") {
            break;
        }

        let candidate = match line.parse::<SelectionUpdate>() {
            Ok(update) => selection.apply(&update),
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };
        if let Err(err) = config.check_selection(&candidate) {
            eprintln!("{err}");
            continue;
        }

        selection = candidate;
        info!(symbol = %selection.symbol, period = %selection.period, threshold = selection.threshold, "User selection");
        print!("{}", format_view(&dashboard.render(&selection).await, format)?);
    }
    Ok(())
}
