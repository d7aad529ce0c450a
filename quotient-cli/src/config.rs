//! Command line and environment configuration
//!
//! Environment variables give the defaults, flags override them.

use quotient::{AngleMode, Domain, EvaluationParameters};
use std::time::Duration;
use thiserror::Error;

pub const USAGE: &str = "\
usage: quotient [options] [expression ...]

Evaluates each expression, or one expression per line of stdin.
The result of the n-th expression is available as $n to later ones.

options:
  --decimals N        fractional digits of approximations   [QUOTIENT_DECIMALS]
  --degrees           trigonometric arguments in degrees     [QUOTIENT_ANGLE_MODE]
  --discrete          integer arithmetic with floor division
  --json              print one JSON object per expression
  --timeout-ms N      cancel an evaluation after N ms        [QUOTIENT_TIMEOUT_MS]
  --list [CATEGORY]   list functions, optionally of one category
  -h, --help          show this message

logging goes to stderr, level from QUOTIENT_LOG (default warn)";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing value for {0}")]
    MissingValue(&'static str),
    #[error("invalid value '{value}' for {option}")]
    InvalidValue { option: &'static str, value: String },
    #[error("unknown option '{0}'")]
    UnknownOption(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub parameters: EvaluationParameters,
    pub json: bool,
    pub timeout: Option<Duration>,
    /// `Some(None)` lists every function, `Some(Some(c))` one category
    pub list: Option<Option<String>>,
    pub help: bool,
    pub expressions: Vec<String>,
}

impl Config {
    /// Configuration from the process arguments and environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(std::env::args().skip(1), |name| std::env::var(name).ok())
    }

    pub fn load(
        args: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env(&env)?;

        let mut args = args.into_iter().peekable();
        while let Some(arg) = args.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
                _ => (arg.clone(), None),
            };
            match flag.as_str() {
                "--decimals" => {
                    let value = inline.or_else(|| args.next()).ok_or(ConfigError::MissingValue("--decimals"))?;
                    config.parameters.decimals = parse_number("--decimals", &value)?;
                }
                "--timeout-ms" => {
                    let value = inline.or_else(|| args.next()).ok_or(ConfigError::MissingValue("--timeout-ms"))?;
                    config.timeout = timeout("--timeout-ms", &value)?;
                }
                "--degrees" => config.parameters.angle_mode = AngleMode::Degrees,
                "--discrete" => config.parameters.domain = Domain::Discrete,
                "--json" => config.json = true,
                "--list" => {
                    let category = inline.or_else(|| args.next_if(|next| !next.starts_with('-')));
                    config.list = Some(category);
                }
                "-h" | "--help" => config.help = true,
                "--" => config.expressions.extend(args.by_ref()),
                option if option.starts_with("--") => return Err(ConfigError::UnknownOption(arg)),
                _ => config.expressions.push(arg),
            }
        }
        Ok(config)
    }

    fn apply_env(&mut self, env: &impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(value) = env("QUOTIENT_DECIMALS") {
            self.parameters.decimals = parse_number("QUOTIENT_DECIMALS", &value)?;
        }
        if let Some(value) = env("QUOTIENT_ANGLE_MODE") {
            self.parameters.angle_mode = value.parse().map_err(|_| ConfigError::InvalidValue {
                option: "QUOTIENT_ANGLE_MODE",
                value: value.clone(),
            })?;
        }
        if let Some(value) = env("QUOTIENT_TIMEOUT_MS") {
            self.timeout = timeout("QUOTIENT_TIMEOUT_MS", &value)?;
        }
        Ok(())
    }

    pub fn parameters(&self) -> &EvaluationParameters {
        &self.parameters
    }
}

fn parse_number(option: &'static str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue { option, value: value.to_string() })
}

/// Zero disables the timeout.
fn timeout(option: &'static str, value: &str) -> Result<Option<Duration>, ConfigError> {
    let millis = parse_number(option, value)?;
    Ok((millis > 0).then(|| Duration::from_millis(millis as u64)))
}
