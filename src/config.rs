//! Configuration and CLI argument handling

use std::path::PathBuf;

use chrono::Locale;
use clap::Parser;

use crate::services::parse_locale;

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "chronodeck")]
#[command(about = "A clock, countdown timer and stopwatch served as an offline-capable web widget")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20553")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Directory holding the widget's static bundle
    #[arg(long, default_value = "web")]
    pub assets: PathBuf,

    /// Locale for the clock's time and date, e.g. id_ID or en_US
    #[arg(long, default_value = "id_ID")]
    pub locale: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Resolve the configured clock locale
    pub fn locale(&self) -> Result<Locale, String> {
        parse_locale(&self.locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["chronodeck"]).unwrap();
        assert_eq!(config.address(), "0.0.0.0:20553");
        assert_eq!(config.assets, PathBuf::from("web"));
        assert_eq!(config.log_level(), "info");
        assert!(config.locale().is_ok());
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "chronodeck", "-p", "8080", "--host", "127.0.0.1", "--locale", "en_US", "-v",
        ])
        .unwrap();
        assert_eq!(config.address(), "127.0.0.1:8080");
        assert_eq!(config.log_level(), "debug");
        assert!(config.locale().is_ok());
    }

    #[test]
    fn test_bad_locale() {
        let config = Config::try_parse_from(["chronodeck", "--locale", "klingon"]).unwrap();
        assert!(config.locale().is_err());
    }
}
