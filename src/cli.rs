//! Command-line interface definitions.
//!
//! The scraper takes a single optional flag. Everything else (corpus path,
//! throttle, headers) comes from the optional YAML file named by
//! `INVESTING_NEWS_CONFIG`; see [`crate::config`].

use clap::Parser;

/// Scrape the investing.com latest-news listing into a JSON corpus.
///
/// # Examples
///
/// ```sh
/// investing_news
/// investing_news --debug
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Log every extraction strategy decision
    #[arg(long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["investing_news"]);
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_debug_flag() {
        let cli = Cli::parse_from(["investing_news", "--debug"]);
        assert!(cli.debug);
    }

    #[test]
    fn test_cli_rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["investing_news", "--json-output-dir", "x"]).is_err());
    }
}
