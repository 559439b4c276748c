//! Tracing subscriber setup for the CLI.
//!
//! Logs go to stderr so `docsite config` can pipe clean JSON from stdout.

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Level for the given verbosity flags. `verbose` wins over `quiet`.
pub fn level_for(verbose: bool, quiet: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        Level::INFO
    }
}

/// Install the global subscriber.
pub fn init(verbose: bool, quiet: bool) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level_for(verbose, quiet))
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level_shows_offline_decision() {
        assert_eq!(level_for(false, false), Level::INFO);
    }

    #[test]
    fn verbose_overrides_quiet() {
        assert_eq!(level_for(true, true), Level::DEBUG);
        assert_eq!(level_for(false, true), Level::ERROR);
    }
}
