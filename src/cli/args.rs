use crate::strategy::AsyncConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Transform journal entry rows into ledger submissions
#[derive(Parser, Debug)]
#[command(name = "journal-target")]
#[command(about = "Transform journal entry rows into ledger submissions", long_about = None)]
pub struct CliArgs {
    /// JSON configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to the JSON configuration file"
    )]
    pub config: PathBuf,

    /// Processing strategy to use
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' for sequential or 'async' for concurrent assembly"
    )]
    pub strategy: StrategyType,

    /// Maximum number of groups assembled concurrently (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of journal entries assembled concurrently (default: CPU cores)"
    )]
    pub max_concurrent: Option<usize>,
}

/// Available processing strategies
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create an AsyncConfig from CLI arguments
    ///
    /// A missing value falls back to the default; zero is replaced by the
    /// default with a warning.
    pub fn to_async_config(&self) -> AsyncConfig {
        match self.max_concurrent {
            Some(max_concurrent) => AsyncConfig::new(max_concurrent),
            None => AsyncConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default_strategy(&["program", "--config", "config.json"], StrategyType::Sync)]
    #[case::explicit_sync(&["program", "--strategy", "sync", "-c", "config.json"], StrategyType::Sync)]
    #[case::explicit_async(&["program", "--strategy", "async", "-c", "config.json"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        match (&parsed.strategy, &expected) {
            (StrategyType::Sync, StrategyType::Sync) => (),
            (StrategyType::Async, StrategyType::Async) => (),
            _ => panic!("Expected {:?}, got {:?}", expected, parsed.strategy),
        }
        assert_eq!(parsed.config, PathBuf::from("config.json"));
    }

    #[rstest]
    #[case::max_concurrent(&["program", "-c", "c.json", "--max-concurrent", "8"], Some(8))]
    #[case::no_options(&["program", "-c", "c.json"], None)]
    fn test_config_options(#[case] args: &[&str], #[case] max_concurrent: Option<usize>) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.max_concurrent, max_concurrent);
    }

    #[rstest]
    #[case::default(&["program", "-c", "c.json"], num_cpus::get())]
    #[case::custom(&["program", "-c", "c.json", "--max-concurrent", "3"], 3)]
    #[case::zero(&["program", "-c", "c.json", "--max-concurrent", "0"], num_cpus::get())]
    fn test_async_config_conversion(#[case] args: &[&str], #[case] expected_max_concurrent: usize) {
        let config = CliArgs::try_parse_from(args).unwrap().to_async_config();

        assert_eq!(config.max_concurrent, expected_max_concurrent);
    }

    #[rstest]
    #[case::missing_config(&["program"])]
    #[case::invalid_strategy(&["program", "-c", "c.json", "--strategy", "parallel"])]
    #[case::removed_batch_size(&["program", "-c", "c.json", "--batch-size", "10"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
