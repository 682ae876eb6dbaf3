mod debug_report;

use anyhow::{Context, Result};
use clap::Parser;
use ingredientiq::provider::{load_dictionary, load_options};
use ingredientiq::{Engine, Options};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Classify a cosmetic ingredient list against an INCI dictionary.
///
/// Exit codes: 0 success, 1 dictionary or config failure, 2 invalid arguments
/// or missing input.
#[derive(Debug, Parser)]
#[command(name = "ingredientiq", version)]
struct Cli {
    /// Dictionary JSON file.
    #[arg(long, env = "DICT_PATH", value_name = "PATH")]
    dict: PathBuf,

    /// Options TOML file (split rule, weights, policy, alias overrides).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the result as JSON instead of a report.
    #[arg(long)]
    json: bool,

    /// Include per-token traces and timings.
    #[arg(short, long)]
    verbose: bool,

    /// Search the dictionary instead of analyzing a list.
    #[arg(long, value_name = "QUERY")]
    search: Option<String>,

    /// Maximum number of search results (1-50).
    #[arg(long, default_value_t = 10)]
    limit: usize,

    /// Force ANSI color output.
    #[arg(long, overrides_with = "no_color")]
    color: bool,

    /// Disable ANSI color output.
    #[arg(long)]
    no_color: bool,

    /// Ingredient list. Read from stdin when omitted.
    #[arg(trailing_var_arg = true, value_name = "TEXT")]
    text: Vec<String>,
}

impl Cli {
    fn use_color(&self) -> bool {
        if self.no_color {
            false
        } else {
            self.color || io::stdout().is_terminal()
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let engine = match load_engine(&cli) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::from(1);
        }
    };

    if let Some(query) = &cli.search {
        let hits = engine.search(query, cli.limit);
        if cli.json {
            return print_json(&hits);
        }
        debug_report::print_search(query, &hits, cli.use_color());
        return ExitCode::SUCCESS;
    }

    let input = match read_input(&cli) {
        Ok(input) if !input.trim().is_empty() => input,
        Ok(_) => {
            eprintln!("error: no input provided (pass TEXT or pipe a list on stdin)");
            return ExitCode::from(2);
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::from(2);
        }
    };

    match (cli.json, cli.verbose) {
        (true, true) => print_json(&engine.analyze_verbose(&input)),
        (true, false) => print_json(&engine.analyze(&input)),
        (false, true) => {
            let run = engine.analyze_verbose(&input);
            debug_report::print_run(&input, &run.result, Some(&run.details), cli.use_color());
            ExitCode::SUCCESS
        }
        (false, false) => {
            let result = engine.analyze(&input);
            debug_report::print_run(&input, &result, None, cli.use_color());
            ExitCode::SUCCESS
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("INGREDIENTIQ_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn load_engine(cli: &Cli) -> Result<Engine> {
    let options = match &cli.config {
        Some(path) => load_options(path).with_context(|| format!("loading config {}", path.display()))?,
        None => Options::default(),
    };
    let dictionary =
        load_dictionary(&cli.dict).with_context(|| format!("loading dictionary {}", cli.dict.display()))?;
    Ok(Engine::new(&dictionary, options))
}

fn read_input(cli: &Cli) -> Result<String> {
    if !cli.text.is_empty() {
        return Ok(cli.text.join(" "));
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).context("failed to read stdin")?;
    Ok(buffer)
}

fn print_json<T: serde::Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: failed to encode JSON: {err}");
            ExitCode::from(1)
        }
    }
}
