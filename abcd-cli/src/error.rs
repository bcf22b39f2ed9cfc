//! Front-end error type, covering everything that can go wrong before or
//! after the core library runs.

use std::fmt;
use std::io;

use abcd_core::AbcdError;

/// Errors surfaced by the command-line front-end.
#[derive(Debug)]
pub enum CliError {
    /// Reading or writing a file failed.
    Io(io::Error),
    /// The configuration file is not valid TOML.
    TomlSyntax(toml::de::Error),
    /// The configuration is syntactically valid TOML but violates a
    /// front-end rule (e.g. both or neither of `mu`/`xi` given).
    InvalidConfig(String),
    /// A sampler could not produce a feasible sequence within its
    /// configured retry budget.
    SamplerExhausted(String),
    /// The core library rejected the parameters or reported a fatal error.
    Core(AbcdError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::TomlSyntax(err) => write!(f, "invalid configuration TOML: {err}"),
            CliError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            CliError::SamplerExhausted(msg) => write!(f, "sampler exhausted its retry budget: {msg}"),
            CliError::Core(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Io(err)
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::TomlSyntax(err)
    }
}

impl From<AbcdError> for CliError {
    fn from(err: AbcdError) -> Self {
        CliError::Core(err)
    }
}
