//! feedkeys command-line tool

use anyhow::{Context, Result};
use clap::Parser;

use feedkeys::cli::{CliArgs, CliCommand};
use feedkeys::commands::filter_commands;
use feedkeys::config::write_default_files;
use feedkeys::config_paths;
use feedkeys::keymap::{load_default_keymap, load_keymap_file, Keybinding, Keymap};
use feedkeys::replay::{self, Script};
use feedkeys::{command_entries, LayerConfig};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    feedkeys::tracing::init();

    let config = match &args.config {
        Some(path) => LayerConfig::load_from(path),
        None => LayerConfig::load(),
    };
    let bindings = match &args.keymap {
        Some(path) => load_keymap_file(path)
            .with_context(|| format!("Failed to load keymap {}", path.display()))?,
        None => load_default_keymap(),
    };

    match args.command {
        CliCommand::Commands { json, filter } => print_commands(
            &Keymap::with_bindings(bindings),
            filter.as_deref().unwrap_or(""),
            json,
        ),
        CliCommand::Keymap { file } => {
            let bindings = match file {
                Some(path) => load_keymap_file(&path)
                    .with_context(|| format!("Invalid keymap {}", path.display()))?,
                None => bindings,
            };
            print_bindings(&bindings);
            Ok(())
        }
        CliCommand::Replay { script } => {
            let parsed = Script::load(&script)
                .with_context(|| format!("Failed to load script {}", script.display()))?;
            let report = replay::run(&parsed, Keymap::with_bindings(bindings), &config)?;

            for (i, step) in report.steps.iter().enumerate() {
                let outcomes: Vec<String> = step.outcomes.iter().map(|o| o.to_string()).collect();
                let outcomes = if outcomes.is_empty() {
                    "-".to_string()
                } else {
                    outcomes.join(", ")
                };
                println!("{:>3}. {:<28} {}", i + 1, step.step.to_string(), outcomes);
            }
            println!();
            println!("focus:        {} ({:?})", report.focus_index, report.focus_phase);
            println!("url:          {}", report.final_url);
            println!("navigations:  {}", report.navigations.join(", "));
            let interactions: Vec<&str> = report.interactions.iter().map(|i| i.id()).collect();
            println!("interactions: {}", interactions.join(", "));
            Ok(())
        }
        CliCommand::Init { force } => {
            let config_path = match args.config {
                Some(path) => path,
                None => config_paths::config_file().context("No config directory available")?,
            };
            let keymap_path =
                config_paths::keymap_file().context("No config directory available")?;

            let written = write_default_files(&config_path, &keymap_path, force)
                .map_err(anyhow::Error::msg)?;
            if written.is_empty() {
                println!("Config files already exist (use --force to overwrite)");
            }
            for path in written {
                println!("wrote {}", path.display());
            }
            Ok(())
        }
    }
}

fn print_commands(keymap: &Keymap, query: &str, json: bool) -> Result<()> {
    let all = command_entries(keymap);
    let entries = filter_commands(&all, query);
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in entries {
        println!(
            "{:<18} {:<8} {:<22} {}",
            entry.id,
            entry.shortcut.as_deref().unwrap_or("-"),
            entry.label,
            entry.category.as_str()
        );
    }
    Ok(())
}

fn print_bindings(bindings: &[Keybinding]) {
    for binding in bindings {
        let when = match &binding.when {
            Some(conditions) => format!("{:?}", conditions),
            None => String::new(),
        };
        let modifiers = if binding.chord.forbid_modifiers() {
            "no modifiers"
        } else {
            "modifiers allowed"
        };
        println!(
            "{:<10} {:<16} {:<18} {}",
            binding.display_string(),
            format!("{:?}", binding.command),
            modifiers,
            when
        );
    }
    println!("{} bindings", bindings.len());
}
