//! `pdm` interactive entry point.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Start file logging, then hand stdin/stdout to the menu tree.

mod console;
mod menu;

use clap::Parser;
use log::info;
use pdm_core::{init_logging, AppConfig};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "pdm")]
#[command(about = "Personal data manager for notes, tasks, contacts and finances", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding the JSON collection files
    #[arg(long, env = "PDM_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, env = "PDM_LOG_LEVEL")]
    log_level: Option<String>,

    /// Directory for rolling log files [default: <data-dir>/logs]
    #[arg(long, env = "PDM_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Disable file logging
    #[arg(long)]
    no_log_file: bool,
}

impl Cli {
    /// Builds the application config with every path made absolute.
    fn into_config(self) -> io::Result<AppConfig> {
        let cwd = std::env::current_dir()?;
        let mut config = AppConfig::in_dir(cwd.join(&self.data_dir));

        if self.no_log_file {
            config.logging = None;
        } else if let Some(logging) = config.logging.as_mut() {
            if let Some(level) = self.log_level {
                logging.level = level;
            }
            if let Some(dir) = self.log_dir {
                logging.log_dir = cwd.join(dir);
            }
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    let config = match Cli::parse().into_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("pdm: cannot resolve the working directory: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(logging) = &config.logging {
        if let Err(err) = init_logging(logging) {
            eprintln!("pdm: file logging disabled: {err}");
        }
    }
    info!(
        "event=session_start module=cli status=ok data_dir={}",
        config.storage.data_dir.display()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    match menu::run_session(&config.storage, stdin.lock(), stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("pdm: console I/O failed: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn paths_are_absolute_and_logs_default_under_data_dir() {
        let cli = Cli::try_parse_from(["pdm", "--data-dir", "/srv/pdm"]).unwrap();
        let config = cli.into_config().unwrap();

        assert_eq!(config.storage.data_dir, Path::new("/srv/pdm"));
        let logging = config.logging.unwrap();
        assert_eq!(logging.log_dir, Path::new("/srv/pdm/logs"));
        assert_eq!(logging.level, pdm_core::default_log_level());
    }

    #[test]
    fn flags_override_logging_defaults() {
        let cli = Cli::try_parse_from([
            "pdm",
            "--data-dir",
            "/srv/pdm",
            "--log-level",
            "warn",
            "--log-dir",
            "/var/log/pdm",
        ])
        .unwrap();
        let logging = cli.into_config().unwrap().logging.unwrap();
        assert_eq!(logging.level, "warn");
        assert_eq!(logging.log_dir, Path::new("/var/log/pdm"));

        let cli = Cli::try_parse_from(["pdm", "--no-log-file"]).unwrap();
        let config = cli.into_config().unwrap();
        assert!(config.logging.is_none());
        assert!(config.storage.data_dir.is_absolute());
    }
}
