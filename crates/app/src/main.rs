use std::io::Write;

use clap::Parser;
use engine::{Engine, Operation, OperationFilter, OperationService, Snapshot, Timed, Totals};
use serde::Serialize;

use crate::{
    error::Result,
    settings::{Command, OperationArgs},
};

mod error;
mod settings;

#[derive(Serialize)]
struct OperationListing {
    operations: Vec<Operation>,
    totals: Totals,
}

fn main() -> Result<()> {
    let cli = settings::Cli::parse();
    let settings = settings::load(&cli)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "tally={level},engine={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let service = Timed::new(Engine::builder().build());

    if let Some(path) = &settings.snapshot {
        tracing::info!(path = %path, "loading snapshot...");
        let snapshot: Snapshot = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        let report = service.inner().restore(&snapshot);
        if report.skipped_accounts + report.skipped_categories + report.skipped_operations > 0 {
            tracing::warn!(?report, "some snapshot entries were skipped");
        }
    }

    match cli.command {
        Command::Accounts => print_json(&service.inner().list_accounts()?),
        Command::Categories { kind } => print_json(&service.inner().list_categories(kind)?),
        Command::Operations(args) => {
            let operations = service.list_operations_with_filter(&filter_from(args))?;
            let totals = engine::net_totals(&operations)?;
            print_json(&OperationListing { operations, totals })
        }
        Command::Export { output } => {
            let snapshot = service.inner().snapshot()?;
            match output {
                Some(path) => {
                    let file = std::fs::File::create(&path)?;
                    serde_json::to_writer_pretty(file, &snapshot)?;
                    tracing::info!(path = %path.display(), "snapshot written");
                    Ok(())
                }
                None => print_json(&snapshot),
            }
        }
    }
}

fn filter_from(args: OperationArgs) -> OperationFilter {
    let mut filter = OperationFilter::new();
    if let Some(account) = args.account {
        filter = filter.for_account(account);
    }
    if let Some(category) = args.category {
        filter = filter.for_category(category);
    }
    if let Some(kind) = args.kind {
        filter = filter.of_type(kind);
    }
    if let Some(from) = args.from {
        filter = filter.from(from);
    }
    if let Some(to) = args.to {
        filter = filter.to(to);
    }
    filter
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
