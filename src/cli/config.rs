//! Configuration conversion utilities for CLI arguments

use crate::cli::main_impl::{Cli, CliOp};
use crate::config::EditorConfig;
use crate::ops::draw;
use anyhow::{Context, Result};

/// Convert CLI arguments to the editor configuration
pub(crate) struct CliConfigBuilder;

impl CliConfigBuilder {
    /// Build `EditorConfig` from CLI arguments
    pub(crate) fn from_cli(cli: &Cli) -> Result<EditorConfig> {
        let config = EditorConfig::builder()
            .container_size(cli.max_width, cli.max_height)
            .export_format(cli.format.to_export_format())
            .jpeg_quality(cli.jpeg_quality)
            .build()
            .context("Invalid configuration")?;

        Ok(config)
    }

    /// Validate CLI arguments for consistency
    pub(crate) fn validate_cli(cli: &Cli) -> Result<()> {
        if cli.jpeg_quality > 100 {
            anyhow::bail!("JPEG quality must be in 0-100, got {}", cli.jpeg_quality);
        }

        if cli.ops.contains(&CliOp::Zoom)
            && (!cli.zoom_factor.is_finite() || cli.zoom_factor <= 0.0)
        {
            anyhow::bail!(
                "--zoom-factor must be a positive number, got {}",
                cli.zoom_factor
            );
        }

        if cli.ops.contains(&CliOp::ChangeBackground) {
            let color = cli
                .bg_color
                .as_deref()
                .context("--bg-color is required for the change-background operation")?;
            draw::parse_hex_color(color).context("Invalid --bg-color value")?;
        }

        if cli.service_url.is_none() {
            if let Some(op) = cli.ops.iter().copied().find(|op| op.requires_service()) {
                anyhow::bail!("Operation {op:?} requires --service-url");
            }
        }

        Ok(())
    }
}
