use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Command-driven task assistant", long_about = None)]
pub struct Cli {
    /// Override the task store location
    #[arg(long, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Write diagnostic logs to this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log level for diagnostic logs
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn defaults_leave_store_and_logging_unset() {
        let cli = Cli::try_parse_from(["taskchat"]).unwrap();
        assert!(cli.store.is_none());
        assert!(cli.log_dir.is_none());
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn store_override_is_accepted() {
        let cli = Cli::try_parse_from(["taskchat", "--store", "/tmp/tasks.json"]).unwrap();
        assert_eq!(
            cli.store.as_deref().and_then(|path| path.to_str()),
            Some("/tmp/tasks.json")
        );
    }
}
