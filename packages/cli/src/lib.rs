//! The `livedocx` command line client.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;

use std::path::Path;

use livedocx::{Directories, Livedocx};
use livedocx_soap::HttpTransport;

use cli::{Cli, Command};
pub use error::{CliError, Result};

/// Run one subcommand and return what it prints.
///
/// Only the subcommands that talk to the service load the configuration
/// and log in.
pub fn run(cli: Cli) -> Result<String> {
    let config = cli.config.as_deref();
    match &cli.command {
        Command::Ping(args) => Ok(commands::ping(args)),
        Command::Formats { kind } => commands::formats(&connect(config)?, *kind),
        Command::Templates(action) => commands::templates(&connect(config)?, action),
        Command::Images(action) => commands::images(&connect(config)?, action),
        Command::Merge(args) => commands::merge(&connect(config)?, args),
    }
}

fn connect(config: Option<&Path>) -> Result<Livedocx<HttpTransport>> {
    let service = config::load(config)?;
    Ok(Livedocx::connect(&service)?.with_directories(Directories::from_env()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::path::PathBuf;

    use cli::{FormatKind, PingArgs};
    use livedocx_soap::SoapError;

    fn missing_config() -> Option<PathBuf> {
        Some(PathBuf::from("/nonexistent/livedocx/config.json"))
    }

    #[test]
    fn ping_never_loads_the_configuration() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let output = run(Cli {
            config: missing_config(),
            command: Command::Ping(PingArgs {
                host: "127.0.0.1".to_string(),
                port,
                attempts: 1,
                threshold_ms: 1000,
                timeout_ms: 3000,
            }),
        })
        .unwrap();

        assert!(output.contains("1 attempts, 0 lost"));
    }

    #[test]
    fn service_commands_fail_on_a_missing_configuration() {
        let err = run(Cli {
            config: missing_config(),
            command: Command::Formats {
                kind: FormatKind::Documents,
            },
        })
        .unwrap_err();

        assert!(matches!(err, CliError::Soap(SoapError::InvalidConfig { .. })));
    }
}
