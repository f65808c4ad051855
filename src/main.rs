//! CLI entry point for ataman
//!
//! Provides a command-line interface for checking, inspecting, opening and
//! watching the leader-key rc file.

use ataman::config::{
    global, open_config, reload_config, try_reload, ConfigStore, FileWatcher, LoadedConfig,
    RcFile, RC_TEMPLATE,
};
use ataman::core::{ConflictDetector, LeaderBinding, PlatformKeys};
use ataman::host::ConsoleHost;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "ataman")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the rc file and check for duplicate mnemonics
    Check {
        /// Path to the rc file (default: ~/.atamanrc.config)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the compiled binding tree
    Tree {
        /// Path to the rc file (default: ~/.atamanrc.config)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Emit JSON instead of a tree
        #[arg(long)]
        json: bool,
    },

    /// Show the binding reached by a mnemonic sequence, e.g. `qf`
    Resolve {
        /// Mnemonic characters, pressed in order
        keys: String,

        /// Path to the rc file (default: ~/.atamanrc.config)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Open the rc file, creating it from the template if missing
    Open {
        /// Path to the rc file (default: ~/.atamanrc.config)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Reload the rc file every time it changes
    Watch {
        /// Path to the rc file (default: ~/.atamanrc.config)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the default rc file template
    Template,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    ataman::logging::init(cli.verbose);

    match cli.command {
        Commands::Check { config } => check_config(&rc_file(config)?)?,
        Commands::Tree { config, json } => print_tree(&rc_file(config)?, json)?,
        Commands::Resolve { keys, config } => resolve_keys(&rc_file(config)?, &keys)?,
        Commands::Open { config } => open_config(&ConsoleHost, &rc_file(config)?),
        Commands::Watch { config } => watch_config(&rc_file(config)?)?,
        Commands::Template => print!("{}", RC_TEMPLATE),
    }

    Ok(())
}

/// Rc file from `--config` (tilde expanded) or the home directory
fn rc_file(config: Option<PathBuf>) -> anyhow::Result<RcFile> {
    let Some(config_path) = config else {
        return Ok(RcFile::in_home()?);
    };

    let expanded_path = shellexpand::tilde(
        config_path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid path encoding"))?,
    );

    Ok(RcFile::new(PathBuf::from(expanded_path.as_ref())))
}

/// Compile once into a private store
fn load(rc: &RcFile) -> anyhow::Result<Arc<LoadedConfig>> {
    let store = ConfigStore::new();
    Ok(try_reload(rc, &store, &PlatformKeys)?)
}

/// Compile the rc file and report duplicate sibling mnemonics
fn check_config(rc: &RcFile) -> anyhow::Result<()> {
    println!("{} Compiling config: {}", "→".cyan(), rc.path().display());

    let loaded = load(rc)?;
    let detector = ConflictDetector::from_tree(&loaded.config.bindings);

    println!(
        "{} Found {} bindings, {} levels deep\n",
        "✓".green(),
        detector.total_bindings(),
        loaded.config.depth()
    );

    let conflicts = detector.find_conflicts();

    if conflicts.is_empty() {
        println!("{} {}", "✓".green().bold(), "No duplicate mnemonics!".bold());
    } else {
        println!(
            "{} Found {} duplicate mnemonic{}:\n",
            "✗".red().bold(),
            conflicts.len(),
            if conflicts.len() == 1 { "" } else { "s" }
        );

        for (i, conflict) in conflicts.iter().enumerate() {
            println!(
                "{} {}",
                format!("Conflict {}", i + 1).yellow().bold(),
                format!("{}{}", conflict.parent, conflict.key).cyan()
            );

            for (idx, description) in conflict.descriptions.iter().enumerate() {
                println!("  {} {}", format!("{}.", idx + 1).dimmed(), description);
            }
            println!();
        }

        println!("{}", "⚠ Only the first binding of each key is reachable!".yellow());
        std::process::exit(1);
    }

    Ok(())
}

/// Print the compiled tree, or its JSON form
fn print_tree(rc: &RcFile, json: bool) -> anyhow::Result<()> {
    let loaded = load(rc)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&loaded.config)?);
        return Ok(());
    }

    println!("{}", loaded.config.title().bold());
    for binding in &loaded.config.bindings {
        print_binding(binding, 1);
    }

    Ok(())
}

fn print_binding(binding: &LeaderBinding, depth: usize) {
    let indent = "  ".repeat(depth);
    let key = binding.key().to_string().cyan().bold();
    let chord = format!("[{}]", binding.key_chord()).dimmed();

    match binding {
        LeaderBinding::Single(single) => {
            println!(
                "{}{} {} {} → {}",
                indent,
                key,
                chord,
                single.description,
                single.action_id.green()
            );
        }
        LeaderBinding::Group(group) => {
            println!("{}{} {} {}", indent, key, chord, group.description.magenta());
            for child in &group.children {
                print_binding(child, depth + 1);
            }
        }
    }
}

/// Walk a mnemonic path from the root
fn resolve_keys(rc: &RcFile, keys: &str) -> anyhow::Result<()> {
    let loaded = load(rc)?;
    let path: Vec<char> = keys.chars().collect();

    let binding = loaded
        .config
        .resolve(&path)
        .ok_or_else(|| anyhow::anyhow!("No binding for '{}'", keys))?;

    print_binding(binding, 0);
    Ok(())
}

/// Reload into the global store on every change until interrupted
fn watch_config(rc: &RcFile) -> anyhow::Result<()> {
    let path = rc.find_or_create()?;
    let watcher = FileWatcher::new(path)?;
    let store = global();

    reload_config(&ConsoleHost, rc, store);
    report(&store.current(), path);

    loop {
        if !watcher.wait_for_change(Duration::from_secs(1))? {
            continue;
        }

        let before = store.current();
        reload_config(&ConsoleHost, rc, store);
        let after = store.current();

        if Arc::ptr_eq(&before, &after) {
            println!("{} Keeping previous config", "⚠".yellow());
        } else {
            report(&after, path);
        }
    }
}

fn report(loaded: &LoadedConfig, path: &Path) {
    let time = loaded
        .loaded_at
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string());

    println!(
        "{} [{}] {}: {} root bindings ({})",
        "✓".green(),
        time,
        loaded.config.title().bold(),
        loaded.config.bindings.len(),
        path.display()
    );
}
