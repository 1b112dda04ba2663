//! CLI command implementations.

use crate::script::{self, StepReport, StepResult};
use agora_graph::{NetworkConfig, SocialNetwork};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const CONFIG_DIR: &str = ".agora";
const CONFIG_FILE: &str = "config.json";

/// Initialize Agora in a directory with a default config.
pub fn init(path: &Path) -> Result<()> {
    let agora_dir = path.join(CONFIG_DIR);
    let config_path = agora_dir.join(CONFIG_FILE);

    if config_path.exists() {
        println!("{} Already initialized", "✓".green());
        return Ok(());
    }

    fs::create_dir_all(&agora_dir)?;
    NetworkConfig::default().save(&config_path)?;

    println!("{} Initialized Agora in {}", "✓".green(), path.display());
    println!("  Edit {} to change the password policy", config_path.display());

    Ok(())
}

/// Picks the config to use.
///
/// An explicit path must exist. Otherwise `./.agora/config.json`, then the
/// user config directory, then built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<NetworkConfig> {
    if let Some(path) = explicit {
        return Ok(NetworkConfig::load(path)?);
    }

    let candidates: Vec<PathBuf> = [
        Some(PathBuf::from(CONFIG_DIR).join(CONFIG_FILE)),
        dirs::config_dir().map(|dir| dir.join("agora").join(CONFIG_FILE)),
    ]
    .into_iter()
    .flatten()
    .collect();

    for candidate in candidates {
        if candidate.exists() {
            info!("Using config {}", candidate.display());
            return Ok(NetworkConfig::load(&candidate)?);
        }
    }

    debug!("No config file found, using defaults");
    Ok(NetworkConfig::default())
}

/// Replay a script and print each step's result.
pub fn run(script_path: &Path, config: NetworkConfig, json: bool) -> Result<()> {
    let steps = script::load(script_path)?;
    let mut network = SocialNetwork::new(config);
    let reports = script::replay(&mut network, &steps);

    if json {
        for report in &reports {
            println!("{}", serde_json::to_string(report)?);
        }
        return Ok(());
    }

    for report in &reports {
        print_report(report);
    }

    let failed = reports
        .iter()
        .filter(|r| matches!(r.result, StepResult::Err { .. }))
        .count();
    println!();
    println!(
        "{} Replayed {} steps ({} failed)",
        "✓".green(),
        reports.len().to_string().cyan(),
        failed
    );

    Ok(())
}

fn print_report(report: &StepReport) {
    let label = format!("[{}] {}", report.step, report.op).dimmed();
    match &report.result {
        StepResult::Ok(rendered) => {
            println!("{} {}", label, rendered.summary);
            for line in &rendered.lines {
                println!("    {}", line);
            }
        }
        StepResult::Err { error } => {
            println!("{} {} {}", label, "✗".red(), error.red());
        }
    }
}

/// Replay a script, then write the resulting network as JSON.
pub fn export(script_path: &Path, config: NetworkConfig, output: &Path) -> Result<()> {
    let steps = script::load(script_path)?;
    let mut network = SocialNetwork::new(config);
    let reports = script::replay(&mut network, &steps);

    let graph = network.graph();
    let export = serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "stats": graph.stats(),
        "users": network.all_users(),
        "edges": graph.export_edges(),
        "steps": reports,
    });

    fs::write(output, serde_json::to_string_pretty(&export)?)?;
    println!("{} Exported to {}", "✓".green(), output.display());

    Ok(())
}
