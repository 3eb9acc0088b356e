//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::AppConfig;
use crate::error::Result;
use crate::query::Query;
use crate::service::{DatasetService, QueryParams};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.resolve_config()?;
        let source = config.source.build_source()?;
        let service = Arc::new(DatasetService::new(Arc::new(source)));

        match &self.cli.command {
            Commands::Serve { host, port } => {
                let mut settings = config.server.clone();
                if let Some(host) = host {
                    settings.host.clone_from(host);
                }
                if let Some(port) = port {
                    settings.port = *port;
                }
                crate::cli::serve(service, &settings).await
            }
            Commands::Schema => {
                let schema = service.schema().await?;
                self.output(&schema)
            }
            Commands::Query {
                filter,
                order_by,
                direction,
                limit,
                offset,
                count,
            } => {
                let params = QueryParams {
                    filter: filter.as_deref().map(Query::from_json).transpose()?,
                    limit: *limit,
                    offset: *offset,
                    order_by: order_by.clone(),
                    direction: *direction,
                };
                let rows = service.run(&params).await?;
                if *count {
                    self.output(&rows.len())
                } else {
                    self.output(&rows)
                }
            }
            Commands::Distinct { field } => {
                let values = service.distinct(field).await?;
                self.output(&values)
            }
        }
    }

    /// Merge the config file with command-line overrides
    fn resolve_config(&self) -> Result<AppConfig> {
        let mut config = match &self.cli.config {
            Some(path) => {
                debug!("Loading config from {}", path.display());
                AppConfig::from_file(path)?
            }
            None => AppConfig::default(),
        };

        if let Some(url) = &self.cli.data_url {
            config.source.url.clone_from(url);
        }
        if let Some(path) = &self.cli.records_path {
            config.source.records_path = Some(path.clone());
        }
        if let Some(timeout) = self.cli.timeout {
            config.source.timeout_secs = timeout;
        }

        config.validate()?;
        Ok(config)
    }

    /// Print a result in the selected format
    fn output<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{text}");
        Ok(())
    }
}
