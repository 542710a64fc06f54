//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `sheet_core` wiring: config, logging, store, progress.
//! - Keep output deterministic for quick local sanity checks.

use log::info;
use sheet_core::{init_from_config, Progress, SheetConfig, SheetStore};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("sheet_cli: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let config = SheetConfig::from_env().map_err(|err| err.to_string())?;
    let file_logging = init_from_config(&config).map_err(|err| err.to_string())?;

    println!("sheet_core ping={}", sheet_core::ping());
    println!("sheet_core version={}", sheet_core::core_version());

    let store = SheetStore::from_config(&config);
    for topic in store.topics() {
        println!(
            "topic {}",
            summary(&topic.title, topic.progress(), topic.sub_topics.len())
        );
    }
    println!(
        "overall {}",
        summary("sheet", store.progress(), store.topics().len())
    );

    info!(
        "event=cli_probe module=cli status=ok file_logging={} topics={}",
        file_logging,
        store.topics().len()
    );
    Ok(())
}

fn summary(label: &str, progress: Progress, children: usize) -> String {
    format!(
        "{label}: {}/{} solved ({}%) children={children}",
        progress.completed,
        progress.total,
        progress.percent()
    )
}
