use clap::Parser;
use weather_core::Config;

use crate::app;

/// Top-level CLI struct. The panel needs no arguments.
#[derive(Debug, Parser)]
#[command(
    name = "localweather",
    version,
    about = "Current weather and the next hour's forecast for your IP-derived location",
    long_about = "Current weather and the next hour's forecast for your IP-derived location.\n\n\
                  Endpoints and timeouts can be overridden in the platform config directory \
                  (config.toml); set RUST_LOG=warn to see why a value fell back to N/A."
)]
pub struct Cli {}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load_or_default();
        tracing::debug!(?config, "loaded configuration");
        app::run(&config).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn takes_no_arguments() {
        assert!(Cli::try_parse_from(["localweather"]).is_ok());
        assert!(Cli::try_parse_from(["localweather", "Berlin"]).is_err());
    }
}
