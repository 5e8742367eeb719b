use anyhow::{Context, Result};
use semantic_screen_config::Config;
use semantic_screen_engine::editing::{Engine, render_current};
use semantic_screen_engine::io::{JsonDirStore, Persistence};
use std::io::Read;
use std::{env, path::PathBuf, process};

mod script;

fn read_script(source: &str) -> Result<String> {
    if source == "-" {
        let mut script = String::new();
        std::io::stdin()
            .read_to_string(&mut script)
            .context("Failed to read commands from stdin")?;
        return Ok(script);
    }
    std::fs::read_to_string(source).with_context(|| format!("Failed to read script '{source}'"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let (script_source, data_path_arg) = match args.len() {
        2 => (args[1].clone(), None),
        3 => (args[1].clone(), Some(PathBuf::from(&args[2]))),
        _ => {
            eprintln!("Usage: {} <commands.jsonl|-> [data-folder-path]", args[0]);
            process::exit(1);
        }
    };

    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => {
            log::info!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            Config::default()
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };
    let data_path = data_path_arg.unwrap_or(config.data_path);
    log::info!("Using message store at {}", data_path.display());

    let store = JsonDirStore::new(&data_path);
    let loaded = store
        .load_all()
        .with_context(|| format!("Failed to load messages from '{}'", data_path.display()))?;

    let mut engine = Engine::new();
    engine.dispatch(&loaded.into_command());

    let commands = script::parse_script(&read_script(&script_source)?)?;
    let summary = script::run(&mut engine, &store, &commands)?;
    log::info!(
        "Applied {} commands, ignored {}, saved {} messages",
        summary.applied,
        summary.ignored,
        summary.saved
    );

    match render_current(&engine.state()) {
        Some(outline) => print!("{outline}"),
        None => println!("(no message open)"),
    }
    Ok(())
}
