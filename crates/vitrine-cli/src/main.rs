mod args;
mod render;

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use vitrine::{
    load_json, Activity, Config, Event, Listing, LoadState, Member, News, QueryEngine,
};

use args::{Cli, Command, ListArgs};
use render::Row;

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("vitrine=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vitrine=warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(size) = cli.command.list_args().page_size {
        let size = usize::try_from(size).context("page size is too large")?;
        let list = match cli.command {
            Command::Members(_) => &mut config.members,
            Command::Events(_) => &mut config.events,
            Command::News(_) => &mut config.news,
            Command::Activities(_) => &mut config.activities,
        };
        list.page_size = size;
    }
    Ok(config)
}

/// Builds the view for `args`, prints one page, and reports whether the
/// source collection loaded.
fn show<T>(kind: &str, args: &ListArgs, config: &Config, json: bool) -> Result<bool>
where
    T: Listing + Row + Serialize,
{
    let text = fs::read_to_string(&args.data)
        .with_context(|| format!("failed to read {}", args.data.display()))?;
    let source = LoadState::from_result(load_json::<T>(&text));
    let loaded = match source.error() {
        Some(err) => {
            eprintln!(
                "{} could not load {}: {err}",
                style("warning:").yellow().bold(),
                args.data.display()
            );
            false
        }
        None => true,
    };

    let mut view = QueryEngine::with_system_clock(source, config);
    for facet in &args.facets {
        view.set_facet(&facet.name, facet.values.as_slice())
            .with_context(|| format!("invalid --facet {}", facet.name))?;
    }
    if let Some(key) = args.sort {
        view.set_sort_key(key)
            .with_context(|| format!("invalid --sort for {kind}"))?;
    }
    if let Some(search) = &args.search {
        view.set_search_term(search.as_str());
        view.flush_search();
    }
    view.set_page(args.page);
    debug!(revision = view.revision(), "view ready");

    let snapshot = view.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", render::text(kind, &snapshot));
    }
    Ok(loaded)
}

fn run(cli: &Cli) -> Result<bool> {
    let config = load_config(cli)?;
    match &cli.command {
        Command::Members(args) => show::<Member>("members", args, &config, cli.json),
        Command::Events(args) => show::<Event>("events", args, &config, cli.json),
        Command::News(args) => show::<News>("news", args, &config, cli.json),
        Command::Activities(args) => show::<Activity>("activities", args, &config, cli.json),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("{} {err:#}", style("error:").red().bold());
            ExitCode::from(2)
        }
    }
}
