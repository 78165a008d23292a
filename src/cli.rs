// src/cli.rs

use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::api::OffersClient;
use crate::config::Config;
use crate::format;
use crate::offer::{Kind, Level, SortKey};
use crate::store::{project, FilterCriteria};
use anyhow::Result;

/// bolsatui: course and scholarship offer browser
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional path to the bolsatui configuration file
    #[clap(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Offers endpoint URL, overriding the configured one
    #[clap(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Set log level, overriding the configuration file
    #[clap(long, value_name = "LEVEL", value_enum)]
    pub log_level: Option<LogLevelCli>,

    #[clap(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect the offers feed without launching the TUI
    #[clap(subcommand)]
    Offers(OffersCommands),
}

#[derive(Subcommand, Debug)]
pub enum OffersCommands {
    /// Fetch the feed once and print the filtered, sorted list
    List {
        /// Case-insensitive substring match on the course name
        #[clap(long, value_name = "TEXT")]
        search: Option<String>,

        /// Keep only this degree level (repeatable; none means all)
        #[clap(long, value_enum, value_name = "LEVEL")]
        level: Vec<LevelCli>,

        /// Keep only this delivery mode (repeatable; none means all)
        #[clap(long, value_enum, value_name = "KIND")]
        kind: Vec<KindCli>,

        /// Hide offers priced above this value
        #[clap(long, value_name = "PRICE")]
        max_price: Option<f64>,

        /// Sort order for the output
        #[clap(long, value_enum, default_value_t = SortCli::Name)]
        sort: SortCli,

        /// Emit the list as JSON instead of a table
        #[clap(long)]
        json: bool,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum LogLevelCli {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevelCli {
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevelCli::Trace => "trace",
            LogLevelCli::Debug => "debug",
            LogLevelCli::Info => "info",
            LogLevelCli::Warn => "warn",
            LogLevelCli::Error => "error",
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum LevelCli {
    Bacharelado,
    Licenciatura,
    Tecnologo,
}

impl From<LevelCli> for Level {
    fn from(value: LevelCli) -> Self {
        match value {
            LevelCli::Bacharelado => Level::Bacharelado,
            LevelCli::Licenciatura => Level::Licenciatura,
            LevelCli::Tecnologo => Level::Tecnologo,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum KindCli {
    Presencial,
    Ead,
}

impl From<KindCli> for Kind {
    fn from(value: KindCli) -> Self {
        match value {
            KindCli::Presencial => Kind::Presencial,
            KindCli::Ead => Kind::Ead,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum SortCli {
    Name,
    Price,
    Rating,
    Unsorted,
}

impl From<SortCli> for SortKey {
    fn from(value: SortCli) -> Self {
        match value {
            SortCli::Name => SortKey::Name,
            SortCli::Price => SortKey::Price,
            SortCli::Rating => SortKey::Rating,
            SortCli::Unsorted => SortKey::Unsorted,
        }
    }
}

pub async fn handle_command(
    command: Commands,
    config: &Config,
    endpoint_override: Option<&str>,
) -> Result<()> {
    match command {
        Commands::Offers(offers_cmd) => handle_offers_command(offers_cmd, config, endpoint_override).await,
    }
}

async fn handle_offers_command(
    command: OffersCommands,
    config: &Config,
    endpoint_override: Option<&str>,
) -> Result<()> {
    match command {
        OffersCommands::List {
            search,
            level,
            kind,
            max_price,
            sort,
            json,
        } => {
            let client = OffersClient::new(config, endpoint_override);
            let offers = client.fetch_offers().await?;
            let criteria = criteria_from_flags(search, &level, &kind, max_price, sort);
            let derived = project(&offers, &criteria);

            if json {
                println!("{}", serde_json::to_string_pretty(&derived)?);
            } else {
                print_offer_table(&derived, offers.len());
            }
            Ok(())
        }
    }
}

/// Builds projection criteria from the command-line flags. Unlike the TUI's
/// price control, an absent --max-price means "no price restriction" rather
/// than the configured ceiling.
fn criteria_from_flags(
    search: Option<String>,
    levels: &[LevelCli],
    kinds: &[KindCli],
    max_price: Option<f64>,
    sort: SortCli,
) -> FilterCriteria {
    let levels: HashSet<Level> = levels.iter().map(|l| Level::from(*l)).collect();
    let kinds: HashSet<Kind> = kinds.iter().map(|k| Kind::from(*k)).collect();
    FilterCriteria {
        levels,
        kinds,
        max_price: max_price.unwrap_or(f64::INFINITY),
        search_text: search.unwrap_or_default(),
        sort_key: sort.into(),
    }
}

fn print_offer_table(derived: &[crate::offer::Offer], total: usize) {
    println!(
        "{:<42} {:<13} {:<11} {:>12} {:<6} {}",
        "COURSE", "LEVEL", "KIND", "PRICE", "STARS", "IES"
    );
    for offer in derived {
        println!(
            "{:<42} {:<13} {:<11} {:>12} {:<6} {}",
            offer.course_name,
            offer.level.label(),
            offer.kind.card_label(),
            format::format_brl(offer.offered_price),
            format::stars(offer.rating),
            offer.ies_name,
        );
    }
    println!("\n{} of {} offers shown", derived.len(), total);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_offers_list_flags() {
        let cli = Cli::try_parse_from([
            "bolsatui",
            "offers",
            "list",
            "--search",
            "direito",
            "--level",
            "bacharelado",
            "--level",
            "licenciatura",
            "--kind",
            "ead",
            "--max-price",
            "450",
            "--sort",
            "price",
            "--json",
        ])
        .unwrap();

        let Some(Commands::Offers(OffersCommands::List {
            search,
            level,
            kind,
            max_price,
            sort,
            json,
        })) = cli.command
        else {
            panic!("expected the offers list subcommand");
        };
        assert_eq!(search.as_deref(), Some("direito"));
        assert_eq!(level.len(), 2);
        assert_eq!(kind.len(), 1);
        assert_eq!(max_price, Some(450.0));
        assert_eq!(sort, SortCli::Price);
        assert!(json);
    }

    #[test]
    fn bare_invocation_has_no_subcommand() {
        let cli = Cli::try_parse_from(["bolsatui"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
        assert!(cli.endpoint.is_none());
    }

    #[test]
    fn flagless_criteria_restrict_nothing() {
        let criteria = criteria_from_flags(None, &[], &[], None, SortCli::Name);
        assert!(criteria.levels.is_empty());
        assert!(criteria.kinds.is_empty());
        assert_eq!(criteria.max_price, f64::INFINITY);
        assert!(criteria.search_text.is_empty());
    }

    #[test]
    fn repeated_level_flags_collect_into_the_set() {
        let criteria = criteria_from_flags(
            None,
            &[LevelCli::Bacharelado, LevelCli::Bacharelado, LevelCli::Tecnologo],
            &[KindCli::Presencial],
            Some(300.0),
            SortCli::Rating,
        );
        assert_eq!(criteria.levels.len(), 2);
        assert_eq!(criteria.kinds.len(), 1);
        assert_eq!(criteria.max_price, 300.0);
        assert_eq!(criteria.sort_key, SortKey::Rating);
    }
}
