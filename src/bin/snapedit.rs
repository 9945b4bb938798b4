//! SnapEdit CLI Tool
//!
//! Command-line interface for applying snapedit photo-editing pipelines to
//! images on disk, with optional AI operations backed by a remote service.

#[cfg(feature = "cli")]
use snapedit::cli;

#[cfg(feature = "cli")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::main().await
}

#[cfg(not(feature = "cli"))]
fn main() {
    panic!("CLI feature not enabled. Please rebuild with --features cli");
}
