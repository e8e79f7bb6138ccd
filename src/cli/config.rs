//! Configuration conversion utilities for CLI arguments

use crate::cli::main_impl::Cli;
use crate::config::ExportConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Dataset root used when `--source` is not given
pub(crate) const DEFAULT_SOURCE_PATH: &str = "test_datasets/lfw_sklearn/lfw_home/lfw_funneled";

/// Output directory used when `--output` is not given
pub(crate) const DEFAULT_OUTPUT_PATH: &str = "test_datasets/lfw_export";

/// Convert CLI arguments to an `ExportConfig`
pub(crate) struct CliConfigBuilder;

impl CliConfigBuilder {
    pub(crate) fn source_path(cli: &Cli) -> PathBuf {
        cli.source
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE_PATH))
    }

    pub(crate) fn output_path(cli: &Cli) -> PathBuf {
        cli.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH))
    }

    /// Build `ExportConfig` from CLI arguments
    pub(crate) fn from_cli(cli: &Cli) -> Result<ExportConfig> {
        let config = ExportConfig::builder(Self::source_path(cli), Self::output_path(cli))
            .min_images(cli.min_images)
            .limit(cli.limit)
            .skip_copy(cli.no_copy)
            .class_name(cli.class_name.as_str())
            .grade(cli.grade.as_str())
            .build()
            .context("Invalid configuration")?;

        Ok(config)
    }

    /// Validate CLI arguments for consistency
    pub(crate) fn validate_cli(cli: &Cli) -> Result<()> {
        let source = Self::source_path(cli);
        let output = Self::output_path(cli);
        if same_location(&source, &output) {
            anyhow::bail!(
                "Output directory must differ from the dataset root: {}",
                output.display()
            );
        }
        Ok(())
    }
}

fn same_location(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a.components().eq(b.components()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("roster-export").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_apply_at_cli_boundary() {
        let cli = parse(&[]);
        let config = CliConfigBuilder::from_cli(&cli).unwrap();

        assert_eq!(config.source_path, PathBuf::from(DEFAULT_SOURCE_PATH));
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert_eq!(config.min_images, 1);
        assert_eq!(config.limit, 0);
        assert!(!config.skip_copy);
        assert_eq!(config.cohort.class_name, "LFW Test Class");
        assert_eq!(config.cohort.grade, "Test");
    }

    #[test]
    fn test_cli_config_conversion() {
        let cli = parse(&[
            "--lfw-path",
            "data/lfw",
            "-o",
            "out",
            "--min-images",
            "3",
            "--limit",
            "10",
            "--no-copy",
            "--class-name",
            "Class B",
            "--grade",
            "Year 1",
        ]);
        let config = CliConfigBuilder::from_cli(&cli).unwrap();

        assert_eq!(config.source_path, PathBuf::from("data/lfw"));
        assert_eq!(config.output_path, PathBuf::from("out"));
        assert_eq!(config.min_images, 3);
        assert_eq!(config.limit, 10);
        assert!(config.skip_copy);
        assert_eq!(config.cohort.class_name, "Class B");
        assert_eq!(config.cohort.grade, "Year 1");
    }

    #[test]
    fn test_source_alias_matches_long_flag() {
        let alias = parse(&["--lfw-path", "x"]);
        let long = parse(&["--source", "x"]);
        assert_eq!(alias.source, long.source);
    }

    #[test]
    fn test_cli_validation() {
        assert!(CliConfigBuilder::validate_cli(&parse(&["--source", "a", "-o", "b"])).is_ok());
        assert!(CliConfigBuilder::validate_cli(&parse(&["--source", "a", "-o", "a"])).is_err());
        assert!(CliConfigBuilder::from_cli(&parse(&["--grade", ""])).is_err());
    }

    #[test]
    fn test_verbosity_and_mock_flags() {
        let cli = parse(&["-vv", "--generate-mock", "mock", "--mock-seed", "7"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.generate_mock, Some(PathBuf::from("mock")));
        assert_eq!(cli.mock_seed, 7);
    }

    #[test]
    fn test_negative_threshold_rejected_by_parser() {
        let args = ["roster-export", "--min-images", "-1"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
