use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use vitrine::SortKey;

#[derive(Parser, Debug)]
#[command(name = "vitrine")]
#[command(about = "Search, filter and page through the association's data files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// YAML file with page sizes and the search debounce interval
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the page as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List members of the association
    #[command(alias = "m")]
    Members(ListArgs),

    /// List events
    #[command(alias = "e")]
    Events(ListArgs),

    /// List news
    #[command(alias = "n")]
    News(ListArgs),

    /// List club activities
    #[command(alias = "a")]
    Activities(ListArgs),
}

impl Command {
    pub fn list_args(&self) -> &ListArgs {
        match self {
            Command::Members(args)
            | Command::Events(args)
            | Command::News(args)
            | Command::Activities(args) => args,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// JSON file holding an array of records
    #[arg(short, long)]
    pub data: PathBuf,

    /// Free-text search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Facet selection as `name=value[,value...]`; repeat for several facets
    #[arg(short, long = "facet", value_parser = parse_facet)]
    pub facets: Vec<Facet>,

    /// Sort key (date-asc, date-desc, title-asc, title-desc, participants-desc)
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Page to show, starting at 1
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Records per page, overriding the config file
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facet {
    pub name: String,
    pub values: Vec<String>,
}

fn parse_facet(raw: &str) -> Result<Facet, String> {
    let (name, values) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected `name=value[,value...]`, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing facet name in `{raw}`"));
    }
    let values = values
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    Ok(Facet {
        name: name.to_string(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facet_syntax() {
        assert_eq!(
            parse_facet("cohort=M1, M2").unwrap(),
            Facet {
                name: "cohort".into(),
                values: vec!["M1".into(), "M2".into()]
            }
        );
        assert!(parse_facet("tag=").unwrap().values.is_empty());
        assert!(parse_facet("cohort").is_err());
        assert!(parse_facet("=M1").is_err());
    }

    #[test]
    fn parses_a_full_command_line() {
        let cli = Cli::try_parse_from([
            "vitrine", "events", "--data", "events.json", "--facet", "status=upcoming",
            "--sort", "participants-desc", "--page", "2", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        let args = cli.command.list_args();
        assert_eq!(args.sort, Some(SortKey::ParticipantsDesc));
        assert_eq!(args.page, 2);
        assert_eq!(args.facets.len(), 1);
    }

    #[test]
    fn rejects_zero_page_size_and_unknown_sort() {
        assert!(Cli::try_parse_from(["vitrine", "news", "-d", "n.json", "--page-size", "0"]).is_err());
        assert!(Cli::try_parse_from(["vitrine", "news", "-d", "n.json", "--sort", "newest"]).is_err());
    }
}
