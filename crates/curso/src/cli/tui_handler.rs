//! TUI launch handler.

use crate::CursoConfig;
use curso_core::ImageSize;
use std::sync::Arc;
use tracing::info;

/// Launch the interactive wizard.
///
/// `size` overrides the configured module image resolution.
#[tracing::instrument(skip(config))]
pub async fn launch_tui(config: &CursoConfig, size: Option<ImageSize>) -> anyhow::Result<()> {
    let requestor = Arc::new(config.requestor()?);
    let image_size = size.unwrap_or(*config.image_size());
    info!(image_size = %image_size, "Launching wizard");

    curso_tui::run(requestor, image_size).await?;
    Ok(())
}
