//! Dashboard configuration.
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. a JSON file given with `--config <path>`
//! 3. the `AIRQ_DATA` environment variable (data file only)
//! 4. command-line flags ([`CliArgs`]): `--data <path>` (or a bare path), `--sensor <name>`, `--year <n>`

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

use crate::data::model::{Channel, Dataset, UnknownChannel};

/// Environment variable overriding the data file location.
pub const DATA_ENV: &str = "AIRQ_DATA";

pub const DEFAULT_DATA_PATH: &str = "AirQualityUCI.csv";
pub const DEFAULT_WINDOW_SIZE: [f32; 2] = [1400.0, 900.0];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", path.display())]
    ParseFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    UnknownSensor(#[from] UnknownChannel),
    #[error(transparent)]
    Cli(#[from] clap::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Semicolon-delimited air-quality file loaded at startup.
    pub data_path: PathBuf,
    /// Channel selected when the window opens.
    pub channel: Channel,
    /// Year selected when the window opens; `None` means the first year in the data.
    pub year: Option<i32>,
    pub window_size: [f32; 2],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            channel: Channel::CoGt,
            year: None,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

/// On-disk form of the configuration. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    data: Option<PathBuf>,
    sensor: Option<String>,
    year: Option<i32>,
    window_width: Option<f32>,
    window_height: Option<f32>,
}

impl FileConfig {
    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Command-line flags.
#[derive(Parser, Debug, Default, PartialEq)]
#[command(name = "airq-dashboard", version)]
#[command(about = "Air quality dashboard: four charts per sensor and year", long_about = None)]
pub struct CliArgs {
    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Semicolon-delimited air-quality file
    #[arg(long, value_name = "PATH", conflicts_with = "path")]
    data: Option<PathBuf>,

    /// Same as --data
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Sensor selected at startup, e.g. "NOx(GT)"
    #[arg(long)]
    sensor: Option<Channel>,

    /// Year selected at startup
    #[arg(long)]
    year: Option<i32>,
}

impl Config {
    /// Resolve the configuration from the process arguments and environment.
    ///
    /// `--help`, `--version` and malformed flags print and exit here.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_data = std::env::var_os(DATA_ENV).map(PathBuf::from);
        Self::resolve(CliArgs::parse(), env_data)
    }

    /// Parse `args` (program name first) and resolve them against the value
    /// of [`DATA_ENV`], if set.
    pub fn from_args<I, T>(args: I, env_data: Option<PathBuf>) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::resolve(CliArgs::try_parse_from(args)?, env_data)
    }

    pub fn resolve(cli: CliArgs, env_data: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(path) = &cli.config {
            log::info!("Reading configuration from {}", path.display());
            config.apply_file(FileConfig::read(path)?)?;
        }

        if let Some(path) = env_data {
            config.data_path = path;
        }

        if let Some(path) = cli.data.or(cli.path) {
            config.data_path = path;
        }
        if let Some(sensor) = cli.sensor {
            config.channel = sensor;
        }
        if cli.year.is_some() {
            config.year = cli.year;
        }

        Ok(config)
    }

    fn apply_file(&mut self, file: FileConfig) -> Result<(), ConfigError> {
        if let Some(path) = file.data {
            self.data_path = path;
        }
        if let Some(sensor) = file.sensor {
            self.channel = sensor.parse()?;
        }
        if file.year.is_some() {
            self.year = file.year;
        }
        if let Some(w) = file.window_width {
            self.window_size[0] = w;
        }
        if let Some(h) = file.window_height {
            self.window_size[1] = h;
        }
        Ok(())
    }

    /// Year to select at startup: the configured one when the data has it,
    /// otherwise the first year present.
    pub fn initial_year(&self, dataset: &Dataset) -> Option<i32> {
        let first = dataset.years().first().copied();
        match self.year {
            Some(year) if dataset.years().contains(&year) => Some(year),
            Some(year) => {
                log::warn!("no data for configured year {year}, showing {first:?} instead");
                first
            }
            None => first,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_reader;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    fn resolve(args: &[&str], env_data: Option<PathBuf>) -> Result<Config, ConfigError> {
        Config::from_args(std::iter::once("airq-dashboard").chain(args.iter().copied()), env_data)
    }

    fn cli_error_kind(result: Result<Config, ConfigError>) -> Option<ErrorKind> {
        match result {
            Err(ConfigError::Cli(e)) => Some(e.kind()),
            _ => None,
        }
    }

    #[test]
    fn test_defaults() {
        let config = resolve(&[], None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.data_path, PathBuf::from("AirQualityUCI.csv"));
        assert_eq!(config.channel, Channel::CoGt);
    }

    #[test]
    fn test_flags() {
        let config = resolve(
            &["--data", "air.csv", "--sensor", "NO2(GT)", "--year", "2005"],
            None,
        )
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("air.csv"));
        assert_eq!(config.channel, Channel::No2Gt);
        assert_eq!(config.year, Some(2005));
    }

    #[test]
    fn test_positional_path_and_env_precedence() {
        let from_env = resolve(&[], Some(PathBuf::from("env.csv"))).unwrap();
        assert_eq!(from_env.data_path, PathBuf::from("env.csv"));

        let from_cli = resolve(&["cli.csv"], Some(PathBuf::from("env.csv"))).unwrap();
        assert_eq!(from_cli.data_path, PathBuf::from("cli.csv"));
    }

    #[test]
    fn test_equals_form_and_cli_interface() {
        let config = resolve(&["--year=2005", "--sensor=AH"], None).unwrap();
        assert_eq!(config.year, Some(2005));
        assert_eq!(config.channel, Channel::Ah);

        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_data_flag_conflicts_with_positional_path() {
        assert_eq!(
            cli_error_kind(resolve(&["a.csv", "--data", "b.csv"], None)),
            Some(ErrorKind::ArgumentConflict)
        );
    }

    #[test]
    fn test_bad_arguments() {
        assert_eq!(
            cli_error_kind(resolve(&["--sensor", "O3"], None)),
            Some(ErrorKind::ValueValidation)
        );
        assert_eq!(
            cli_error_kind(resolve(&["--year", "twenty"], None)),
            Some(ErrorKind::ValueValidation)
        );
        assert_eq!(
            cli_error_kind(resolve(&["--year"], None)),
            Some(ErrorKind::InvalidValue)
        );
        assert_eq!(
            cli_error_kind(resolve(&["a.csv", "b.csv"], None)),
            Some(ErrorKind::UnknownArgument)
        );
        assert_eq!(
            cli_error_kind(resolve(&["--verbose"], None)),
            Some(ErrorKind::UnknownArgument)
        );
        assert_eq!(
            cli_error_kind(resolve(&["--help"], None)),
            Some(ErrorKind::DisplayHelp)
        );
        assert_eq!(
            cli_error_kind(resolve(&["--version"], None)),
            Some(ErrorKind::DisplayVersion)
        );
    }

    #[test]
    fn test_config_file_then_flags() {
        let path = std::env::temp_dir().join(format!("airq-config-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{ "data": "file.csv", "sensor": "RH", "year": 2004, "window_width": 800 }"#,
        )
        .unwrap();

        let path_arg = path.to_string_lossy().to_string();
        let from_file = resolve(&["--config", path_arg.as_str()], None);
        let overridden = resolve(&["--config", path_arg.as_str(), "--sensor", "AH"], None);
        std::fs::remove_file(&path).unwrap();

        let from_file = from_file.unwrap();
        assert_eq!(from_file.data_path, PathBuf::from("file.csv"));
        assert_eq!(from_file.channel, Channel::Rh);
        assert_eq!(from_file.year, Some(2004));
        assert_eq!(from_file.window_size, [800.0, DEFAULT_WINDOW_SIZE[1]]);

        assert_eq!(overridden.unwrap().channel, Channel::Ah);
    }

    #[test]
    fn test_config_file_rejects_unknown_keys() {
        let path = std::env::temp_dir().join(format!("airq-config-bad-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "colour": "red" }"#).unwrap();
        let path_arg = path.to_string_lossy().to_string();
        let result = resolve(&["--config", path_arg.as_str()], None);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::ParseFile { .. })));
    }

    #[test]
    fn test_initial_year() {
        let ds = load_reader("Date;T\n10/03/2004;1\n01/01/2005;2\n".as_bytes()).unwrap();
        let mut config = Config::default();
        assert_eq!(config.initial_year(&ds), Some(2004));
        config.year = Some(2005);
        assert_eq!(config.initial_year(&ds), Some(2005));
        config.year = Some(1999);
        assert_eq!(config.initial_year(&ds), Some(2004));
    }
}
