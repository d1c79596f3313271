use anyhow::{Context, Result, bail};
use notifications_permission_cli::fix_manifest_file;
use notifications_permission_config::Config;
use notifications_permission_engine::{
    FileHistory, PermissionStatus, PromptHistory, STATUS_SET_VERSION,
};
use std::path::PathBuf;
use std::{env, process};

const USAGE: &str = "Usage:
  notifications-permission-cli fix-manifest [MANIFEST_PATH]
  notifications-permission-cli statuses
  notifications-permission-cli history [--clear]";

fn fix_manifest(config: &Config, path: Option<&str>) -> Result<()> {
    let path = path.map(PathBuf::from).unwrap_or_else(|| config.manifest_path.clone());
    let patch = fix_manifest_file(&path, &config.permission)
        .with_context(|| format!("Failed to patch {}", path.display()))?;

    if patch.removed > 0 {
        println!(
            "Removed {} duplicate {} declaration(s) from {}",
            patch.removed,
            config.permission,
            path.display()
        );
    } else {
        println!("{} needs no changes", path.display());
    }
    Ok(())
}

fn print_statuses() {
    println!("# status set version {STATUS_SET_VERSION}");
    for status in PermissionStatus::ALL {
        println!("{status}");
    }
}

fn history(config: &Config, clear: bool) -> Result<()> {
    let Some(path) = config.history_path.as_ref() else {
        bail!(
            "No history_path set in {}",
            Config::config_path().display()
        );
    };

    if clear {
        if path.exists() {
            std::fs::remove_file(path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        println!("Cleared {}", path.display());
        return Ok(());
    }

    let history = FileHistory::open(path)?;
    println!("{}", history.path().display());
    println!("  denied before: {}", history.denied_before());
    println!(
        "  rationale needed before: {}",
        history.rationale_needed_before()
    );
    Ok(())
}

fn run(args: &[String]) -> Result<()> {
    let config = Config::load_or_default().context("Failed to load config")?;
    log::debug!("Using config: {config:?}");

    match args.first().map(String::as_str) {
        Some("fix-manifest") => fix_manifest(&config, args.get(1).map(String::as_str)),
        Some("statuses") => {
            print_statuses();
            Ok(())
        }
        Some("history") => history(&config, args.get(1).is_some_and(|a| a == "--clear")),
        _ => bail!("{USAGE}"),
    }
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
