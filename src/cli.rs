use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use crate::auth::Token;
use crate::config::{Config, OutputFormat};
use crate::dashboard::Dashboard;
use crate::output::{print_dashboard, render_dashboard, PhaseProgress};
use crate::providers::gitlab::{EnvironmentOrder, GitLabClient, ListingOptions};
use crate::providers::GitLabProvider;

#[derive(Parser)]
#[command(name = "deploydash")]
#[command(author, version, about = "GitLab Deployment Dashboard", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./deploydash.toml and friends)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Write the dashboard to a file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Pretty-print JSON output
    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the last deployment of every environment across GitLab projects
    Gitlab {
        #[arg(short, long, env = "GITLAB_TOKEN")]
        token: Option<String>,

        /// GitLab instance base URL
        #[arg(short, long)]
        url: Option<String>,

        /// Minimum access level of listed projects (10 = guest)
        #[arg(long)]
        min_access_level: Option<u32>,

        /// Number of projects to list
        #[arg(long)]
        per_page: Option<u32>,

        /// Environment names to show, highest priority first
        #[arg(short, long, value_delimiter = ',')]
        environments: Option<Vec<String>>,
    },
}

impl Cli {
    async fn execute_gitlab(
        &self,
        config: Config,
        token: Option<&str>,
        url: Option<&str>,
        min_access_level: Option<u32>,
        per_page: Option<u32>,
        environments: Option<&[String]>,
    ) -> Result<()> {
        let gitlab = config.gitlab;

        let base_url = url.unwrap_or(&gitlab.base_url);
        let token = token.or(gitlab.token.as_deref()).map(Token::from);
        let listing = ListingOptions {
            min_access_level: min_access_level.unwrap_or(gitlab.min_access_level),
            per_page: per_page.unwrap_or(gitlab.per_page),
        };
        let order = EnvironmentOrder::new(
            environments
                .map(<[String]>::to_vec)
                .unwrap_or(config.environments.order),
        );

        info!("Collecting GitLab deployments from: {base_url}");

        let client = GitLabClient::new(base_url, token, gitlab.max_concurrent_requests)?;
        let provider = GitLabProvider::new(client, listing, order);

        let mut progress = PhaseProgress::new();
        let dashboard = provider
            .collect_dashboard(|status| progress.advance(status))
            .await?;

        let format = self.format.unwrap_or(config.output.format);
        let pretty = self.pretty || config.output.pretty;
        self.write_dashboard(&dashboard, format, pretty)
    }

    fn write_dashboard(
        &self,
        dashboard: &Dashboard,
        format: OutputFormat,
        pretty: bool,
    ) -> Result<()> {
        match (format, &self.output) {
            (OutputFormat::Summary, None) => print_dashboard(dashboard),
            (OutputFormat::Summary, Some(path)) => {
                console::set_colors_enabled(false);
                std::fs::write(path, render_dashboard(dashboard, Utc::now()))
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("Dashboard written to: {}", path.display());
            }
            (OutputFormat::Json, output) => {
                let json_output = if pretty {
                    serde_json::to_string_pretty(dashboard)?
                } else {
                    serde_json::to_string(dashboard)?
                };

                if let Some(output_path) = output {
                    std::fs::write(output_path, json_output)
                        .with_context(|| format!("Failed to write {}", output_path.display()))?;
                    info!("Dashboard written to: {}", output_path.display());
                } else {
                    println!("{json_output}");
                }
            }
        }

        Ok(())
    }

    pub async fn execute(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;

        match &self.command {
            Commands::Gitlab {
                token,
                url,
                min_access_level,
                per_page,
                environments,
            } => {
                self.execute_gitlab(
                    config,
                    token.as_deref(),
                    url.as_deref(),
                    *min_access_level,
                    *per_page,
                    environments.as_deref(),
                )
                .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_gitlab_command() {
        let cli = Cli::try_parse_from([
            "deploydash",
            "--format",
            "json",
            "gitlab",
            "--url",
            "https://gitlab.example.com",
            "--environments",
            "production,qa",
            "--per-page",
            "200",
        ])
        .unwrap();

        assert_eq!(cli.format, Some(OutputFormat::Json));
        let Commands::Gitlab {
            url,
            environments,
            per_page,
            min_access_level,
            ..
        } = cli.command;
        assert_eq!(url.as_deref(), Some("https://gitlab.example.com"));
        assert_eq!(
            environments,
            Some(vec!["production".to_string(), "qa".to_string()])
        );
        assert_eq!(per_page, Some(200));
        assert_eq!(min_access_level, None);
    }
}
