//! Command-line arguments.

use std::time::Duration;

use artic_lib::config::BrowserConfig;
use artic_lib::config::DEFAULT_BASE_URL;
use artic_lib::config::DEFAULT_PAGE_SIZE;
use artic_lib::retry::RetryConfig;
use clap::Parser;
use clap::value_parser;
use log::LevelFilter;

/// Browse the Art Institute of Chicago collection, selecting rows across pages.
#[derive(Debug, Parser)]
#[command(name = "artic", version, about)]
pub struct Args {
    /// API base URL
    #[arg(long, env = "ARTIC_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Rows per page
    #[arg(
        long,
        env = "ARTIC_PAGE_SIZE",
        default_value_t = DEFAULT_PAGE_SIZE,
        value_parser = value_parser!(u32).range(1..=100)
    )]
    pub page_size: u32,

    /// Request timeout
    #[arg(
        long,
        env = "ARTIC_TIMEOUT",
        value_name = "SECONDS",
        default_value_t = 10,
        value_parser = value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Retries for transient failures (429, 5xx, network)
    #[arg(long, env = "ARTIC_RETRIES", default_value_t = 2)]
    pub retries: u32,

    /// Page to open first
    #[arg(
        long,
        env = "ARTIC_START_PAGE",
        default_value_t = 1,
        value_parser = value_parser!(u32).range(1..)
    )]
    pub start_page: u32,

    /// Log level written to the log file
    #[arg(long, env = "ARTIC_LOG_LEVEL", default_value = "debug")]
    pub log_level: LevelFilter,

    /// Request every field instead of only the displayed ones
    #[arg(long)]
    pub no_fields: bool,
}

impl Args {
    /// Builds the library configuration from the arguments.
    pub fn browser_config(&self) -> BrowserConfig {
        BrowserConfig::default()
            .with_base_url(&self.base_url)
            .with_page_size(self.page_size)
            .with_timeout(Duration::from_secs(self.timeout))
            .with_retry(RetryConfig::default().max_retries(self.retries))
            .with_restrict_fields(!self.no_fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["artic"]).unwrap();
        let config = args.browser_config();

        assert_eq!(args.start_page, 1);
        assert_eq!(config.page_size, 12);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.restrict_fields);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "artic",
            "--base-url",
            "http://localhost:8080/api/v1",
            "--page-size",
            "24",
            "--timeout",
            "3",
            "--retries",
            "0",
            "--log-level",
            "warn",
            "--no-fields",
        ])
        .unwrap();
        let config = args.browser_config();

        assert_eq!(config.base_url, "http://localhost:8080/api/v1");
        assert_eq!(config.page_size, 24);
        assert_eq!(config.retry.max_retries, 0);
        assert_eq!(args.log_level, LevelFilter::Warn);
        assert!(!config.restrict_fields);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert!(Args::try_parse_from(["artic", "--page-size", "0"]).is_err());
        assert!(Args::try_parse_from(["artic", "--start-page", "0"]).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(Args::try_parse_from(["artic", "--timeout", "0"]).is_err());
        let args = Args::try_parse_from(["artic", "--timeout", "1"]).unwrap();
        assert_eq!(args.browser_config().timeout, Duration::from_secs(1));
    }
}
