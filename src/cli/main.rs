//! SnapEdit CLI Tool
//!
//! Command-line interface for applying an ordered pipeline of editing
//! operations to one or more images.

use super::config::CliConfigBuilder;
use crate::{
    backend::{EmojiKind, HttpAiBackend},
    config::{EditorConfig, ExportFormat},
    editor::Editor,
    ops::Tone,
    services::ExportService,
    session::LoadSource,
    tracing_config::{events, spans},
};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info as trace_info, trace, Instrument};

#[cfg(feature = "webp-support")]
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];
#[cfg(not(feature = "webp-support"))]
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Suffix appended to generated output file names
const OUTPUT_SUFFIX: &str = "edited";

/// SnapEdit photo editing CLI tool
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "snapedit")]
pub struct Cli {
    /// Input image files or directories (use "-" for stdin)
    #[arg(value_name = "INPUT", required = true)]
    pub input: Vec<String>,

    /// Editing operation to apply; repeat to chain operations in order
    #[arg(long = "op", value_enum, value_name = "OP", action = clap::ArgAction::Append)]
    pub ops: Vec<CliOp>,

    /// Output file (single input) or directory (batch processing). Use "-" for stdout.
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = CliOutputFormat::Png)]
    pub format: CliOutputFormat,

    /// JPEG quality (0-100)
    #[arg(long, default_value_t = 92)]
    pub jpeg_quality: u8,

    /// Emoji overlaid on detected faces by the emoji-face operation
    #[arg(long, value_enum, default_value_t = CliEmoji::Smile)]
    pub emoji: CliEmoji,

    /// Replacement background color (#rrggbb) for change-background
    #[arg(long, value_name = "COLOR")]
    pub bg_color: Option<String>,

    /// Scale factor for the zoom operation
    #[arg(long, default_value_t = 1.0)]
    pub zoom_factor: f64,

    /// Base URL of the AI service; required by the face and background operations
    #[arg(long, value_name = "URL")]
    pub service_url: Option<String>,

    /// Maximum width images are fitted to on load
    #[arg(long, default_value_t = 960)]
    pub max_width: u32,

    /// Maximum height images are fitted to on load
    #[arg(long, default_value_t = 720)]
    pub max_height: u32,

    /// Process directories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Pattern for batch processing (e.g., "*.jpg")
    #[arg(long)]
    pub pattern: Option<String>,

    /// Enable verbose logging (-v: DEBUG, -vv: TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum CliOutputFormat {
    Png,
    Jpeg,
}

impl CliOutputFormat {
    pub(crate) fn to_export_format(self) -> ExportFormat {
        match self {
            Self::Png => ExportFormat::Png,
            Self::Jpeg => ExportFormat::Jpeg,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum CliEmoji {
    Smile,
    Heart,
    Star,
    Cool,
}

impl CliEmoji {
    fn to_emoji_kind(self) -> EmojiKind {
        match self {
            Self::Smile => EmojiKind::Smile,
            Self::Heart => EmojiKind::Heart,
            Self::Star => EmojiKind::Star,
            Self::Cool => EmojiKind::Cool,
        }
    }
}

/// A single operation in the editing pipeline
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum CliOp {
    /// Convert to grayscale
    Grayscale,
    /// Soften with a gaussian blur
    Blur,
    /// Brighten by a fixed step
    Brighten,
    /// Darken by a fixed step
    Darken,
    /// Raise contrast around mid-gray
    ContrastUp,
    /// Lower contrast around mid-gray
    ContrastDown,
    /// Rotate a quarter turn clockwise
    Rotate90,
    /// Mirror horizontally
    Flip,
    /// Crop to the centered 80% of each axis
    CropCenter,
    /// Rescale by --zoom-factor
    Zoom,
    /// Warm summer tone
    Summer,
    /// Green forest tone
    Forest,
    /// Warm high-contrast sunset tone
    Sunset,
    /// Blur detected faces (service)
    BlurFace,
    /// Overlay --emoji on detected faces (service)
    EmojiFace,
    /// Blur the background behind the subject (service)
    BlurBackground,
    /// Replace the background with --bg-color (service)
    ChangeBackground,
    /// Cut out the subject, leaving transparency (service)
    RemoveBackground,
}

impl CliOp {
    /// Whether the operation is forwarded to the AI service
    #[must_use]
    pub fn requires_service(self) -> bool {
        matches!(
            self,
            Self::BlurFace
                | Self::EmojiFace
                | Self::BlurBackground
                | Self::ChangeBackground
                | Self::RemoveBackground
        )
    }
}

pub async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose).context("Failed to initialize tracing")?;

    // Validate CLI arguments
    CliConfigBuilder::validate_cli(&cli).context("Invalid CLI arguments")?;

    // Convert CLI arguments to the editor configuration
    let config = CliConfigBuilder::from_cli(&cli).context("Failed to build configuration")?;

    info!("Starting SnapEdit CLI");
    info!("Input(s): {}", cli.input.join(", "));
    if cli.ops.is_empty() {
        warn!("No --op given; images will only be fitted and re-encoded");
    }
    if let Some(url) = &cli.service_url {
        info!("AI service: {url}");
    }

    // Process inputs
    let start_time = Instant::now();
    let processed_count = process_inputs(&cli, &config).await?;

    let total_time = start_time.elapsed();
    info!(
        "Processed {} image(s) in {:.2}s",
        processed_count,
        total_time.as_secs_f64()
    );

    Ok(())
}

/// Initialize tracing based on verbosity level
fn init_tracing(verbose_count: u8) -> Result<()> {
    use crate::tracing_config::{TracingConfig, TracingFormat};

    TracingConfig::new()
        .with_verbosity(verbose_count)
        .with_format(TracingFormat::Console)
        .init()
        .context("Failed to initialize tracing subscriber")?;

    if verbose_count > 0 {
        match verbose_count {
            1 => trace_info!("ℹ️  Debug level: Showing internal state and computations"),
            2 => debug!("🔧 Trace level: Showing extremely detailed traces"),
            _ => trace!("🔍 Trace level: Showing extremely detailed traces"),
        }
        let log_level = match verbose_count {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        debug!(log_level = %log_level, "Tracing initialized");
    }

    Ok(())
}

/// Create an editor for one input, attaching the AI service when configured
fn build_editor(cli: &Cli, config: &EditorConfig) -> Result<Editor> {
    let editor = if let Some(url) = &cli.service_url {
        let backend = HttpAiBackend::new(url.clone()).context("Failed to create service client")?;
        Editor::with_backend(config.clone(), Box::new(backend))
    } else {
        Editor::new(config.clone())
    };
    editor.context("Failed to create editor")
}

/// Apply the requested operations in order
async fn run_pipeline(editor: &mut Editor, cli: &Cli) -> Result<()> {
    for op in &cli.ops {
        apply_op(editor, *op, cli)
            .await
            .with_context(|| format!("Operation {op:?} failed"))?;
    }
    Ok(())
}

async fn apply_op(editor: &mut Editor, op: CliOp, cli: &Cli) -> Result<()> {
    match op {
        CliOp::Grayscale => editor.grayscale()?,
        CliOp::Blur => editor.blur()?,
        CliOp::Brighten => editor.brighten()?,
        CliOp::Darken => editor.darken()?,
        CliOp::ContrastUp => editor.increase_contrast()?,
        CliOp::ContrastDown => editor.decrease_contrast()?,
        CliOp::Rotate90 => editor.rotate90()?,
        CliOp::Flip => editor.flip_horizontal()?,
        CliOp::CropCenter => editor.crop_center()?,
        CliOp::Zoom => editor.zoom(cli.zoom_factor)?,
        CliOp::Summer => editor.apply_tone(Tone::Summer)?,
        CliOp::Forest => editor.apply_tone(Tone::Forest)?,
        CliOp::Sunset => editor.apply_tone(Tone::Sunset)?,
        CliOp::BlurFace => {
            if let Some(faces) = editor.blur_faces().await? {
                info!("Service found {faces} face(s) to blur");
            }
        },
        CliOp::EmojiFace => {
            if let Some(faces) = editor.emoji_faces(cli.emoji.to_emoji_kind()).await? {
                info!("Service found {faces} face(s) for the emoji overlay");
            }
        },
        CliOp::BlurBackground => {
            editor.blur_background().await?;
        },
        CliOp::ChangeBackground => {
            let color = cli
                .bg_color
                .as_deref()
                .context("--bg-color is required for change-background")?;
            editor.change_background(color).await?;
        },
        CliOp::RemoveBackground => {
            editor.remove_background().await?;
        },
    }
    Ok(())
}

/// Process multiple inputs with a fresh editing session per file
async fn process_inputs(cli: &Cli, config: &EditorConfig) -> Result<usize> {
    // Handle stdin specially (single input)
    if cli.input.len() == 1 && cli.input.first().is_some_and(|s| s == "-") {
        return process_stdin(cli, config).await;
    }

    // Collect all image files from inputs (files and directories)
    let mut all_files = Vec::new();

    for input in &cli.input {
        let path = PathBuf::from(input);

        if path.is_file() {
            if is_image_file(&path, IMAGE_EXTENSIONS) {
                all_files.push(path);
            } else {
                warn!("Skipping unsupported file: {}", path.display());
            }
        } else if path.is_dir() {
            let dir_files = find_image_files(&path, cli.recursive, cli.pattern.as_deref())?;
            all_files.extend(dir_files);
        } else {
            anyhow::bail!(
                "Input path does not exist or is not accessible: {}",
                path.display()
            );
        }
    }

    if all_files.is_empty() {
        warn!("No supported image files found in the provided inputs");
        return Ok(0);
    }

    // Sort files alphanumerically for consistent processing order
    all_files.sort();

    info!("Found {} image file(s) to process", all_files.len());

    let progress = if all_files.len() > 1 {
        let pb = ProgressBar::new(all_files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut processed_count = 0;
    let mut failed_count = 0;
    let file_count = all_files.len();
    let batch_start_time = Instant::now();

    // Validate and prepare output directory for batch processing
    let output_dir = if file_count > 1 {
        if let Some(ref output) = cli.output {
            if output == "-" {
                anyhow::bail!("Cannot use stdout (-) as output when processing multiple files");
            }
            let output_path = PathBuf::from(output);
            if !output_path.exists() {
                std::fs::create_dir_all(&output_path).with_context(|| {
                    format!(
                        "Failed to create output directory: {}",
                        output_path.display()
                    )
                })?;
            } else if output_path.is_file() {
                anyhow::bail!(
                    "Output path exists and is a file, not a directory: {}",
                    output_path.display()
                );
            }
            Some(output_path)
        } else {
            None
        }
    } else {
        None
    };

    let batch_span = spans::batch_processing(file_count);
    for input_file in &all_files {
        if let Some(ref pb) = progress {
            pb.set_message(format!("Editing {}", input_file.display()));
        }

        let output_target = if file_count == 1 {
            cli.output.clone()
        } else {
            output_dir.as_ref().map(|dir| {
                generate_output_path_with_dir(input_file, dir, cli.format.to_export_format())
            })
        };

        let outcome = process_single_file(cli, config, input_file, output_target.as_ref())
            .instrument(batch_span.clone())
            .await;
        match outcome {
            Ok(()) => {
                processed_count += 1;
                if cli.verbose > 1 {
                    log::debug!("✅ Edited: {}", input_file.display());
                }
            },
            Err(e) => {
                error!("❌ Failed to process {}: {}", input_file.display(), e);
                failed_count += 1;
            },
        }

        if let Some(ref pb) = progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_with_message(format!(
            "Completed! Processed: {processed_count}, Failed: {failed_count}"
        ));
    }

    if failed_count > 0 {
        warn!("Some files failed to process. Processed: {processed_count}, Failed: {failed_count}");
    }

    // For batch processing, show a summary
    let batch_total_time = batch_start_time.elapsed();
    if file_count > 1 {
        info!("📊 Batch summary:");
        info!("  ├─ Files processed: {processed_count}");
        info!("  ├─ Files failed: {failed_count}");
        info!("  ├─ Total time: {:.2}s", batch_total_time.as_secs_f64());
        info!(
            "  └─ Average per file: {:.2}s",
            if processed_count > 0 {
                batch_total_time.as_secs_f64() / (processed_count as f64)
            } else {
                0.0
            }
        );
    }

    Ok(processed_count)
}

/// Process an image from stdin
async fn process_stdin(cli: &Cli, config: &EditorConfig) -> Result<usize> {
    info!("Reading image from stdin");

    let image_data = read_stdin()?;
    let start_time = Instant::now();

    let mut editor = build_editor(cli, config)?;
    editor
        .load_from_bytes(&image_data, LoadSource::Upload)
        .context("Failed to decode image from stdin")?;

    run_pipeline(&mut editor, cli).await?;

    let snapshot = editor
        .current_snapshot()
        .context("No image loaded after the pipeline ran")?;

    match cli.output.as_deref() {
        Some(target) if target != "-" => {
            let output_path = PathBuf::from(target);
            ExportService::write_snapshot(
                snapshot,
                &output_path,
                editor.config().export_format,
                editor.config().jpeg_quality,
            )?;
            info!("Image saved to: {}", output_path.display());
        },
        _ => {
            // Default for stdin input is stdout
            let output_data =
                snapshot.to_bytes(editor.config().export_format, editor.config().jpeg_quality)?;
            write_stdout(&output_data)?;
            info!("Image written to stdout");
        },
    }

    info!(
        "Processed stdin image in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(1)
}

/// Load one file, run the pipeline, and write the result
async fn process_single_file(
    cli: &Cli,
    config: &EditorConfig,
    input_path: &Path,
    output_target: Option<&String>,
) -> Result<()> {
    let file_start = Instant::now();
    let mut editor = build_editor(cli, config)?;

    editor
        .load_from_path(input_path)
        .with_context(|| format!("Failed to load {}", input_path.display()))?;

    run_pipeline(&mut editor, cli)
        .instrument(spans::file_processing(input_path))
        .await?;

    let snapshot = editor
        .current_snapshot()
        .context("No image loaded after the pipeline ran")?;

    match output_target {
        Some(target) if target == "-" => {
            let output_data =
                snapshot.to_bytes(editor.config().export_format, editor.config().jpeg_quality)?;
            write_stdout(&output_data)?;
            info!("Image written to stdout");
        },
        Some(target) => {
            let output_path = PathBuf::from(target);
            ExportService::write_snapshot(
                snapshot,
                &output_path,
                editor.config().export_format,
                editor.config().jpeg_quality,
            )?;
            events::progress(
                &format!(
                    "Saved {} in {:.2}s",
                    output_path.display(),
                    file_start.elapsed().as_secs_f64()
                ),
                "💾",
            );
        },
        None => {
            let output_path = generate_output_path(input_path, cli.format.to_export_format());
            ExportService::write_snapshot(
                snapshot,
                &output_path,
                editor.config().export_format,
                editor.config().jpeg_quality,
            )?;
            events::progress(
                &format!(
                    "Saved {} in {:.2}s",
                    output_path.display(),
                    file_start.elapsed().as_secs_f64()
                ),
                "💾",
            );
        },
    }

    Ok(())
}

/// Read image data from stdin
fn read_stdin() -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read image data from stdin")?;

    if buffer.is_empty() {
        anyhow::bail!("No data received from stdin");
    }

    Ok(buffer)
}

/// Write image data to stdout
fn write_stdout(data: &[u8]) -> Result<()> {
    io::stdout()
        .write_all(data)
        .context("Failed to write image data to stdout")?;
    io::stdout().flush().context("Failed to flush stdout")?;
    Ok(())
}

/// Find image files in a directory
fn find_image_files(dir: &Path, recursive: bool, pattern: Option<&str>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if recursive {
        for entry in walkdir::WalkDir::new(dir) {
            let entry = entry?;
            if entry.file_type().is_file() {
                let path = entry.path();
                if is_image_file(path, IMAGE_EXTENSIONS) && matches_pattern(path, pattern) {
                    files.push(path.to_path_buf());
                }
            }
        }
    } else {
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                let path = entry.path();
                if is_image_file(&path, IMAGE_EXTENSIONS) && matches_pattern(&path, pattern) {
                    files.push(path);
                }
            }
        }
    }

    Ok(files)
}

/// Check if file is an image based on extension
fn is_image_file(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.contains(&ext.to_lowercase().as_str()))
}

/// Check if file matches the given pattern
fn matches_pattern(path: &Path, pattern: Option<&str>) -> bool {
    match pattern {
        Some(pat) => {
            if let Some(filename) = path.file_name().and_then(|n| n.to_str()) {
                glob::Pattern::new(pat)
                    .map(|p| p.matches(filename))
                    .unwrap_or(false)
            } else {
                false
            }
        },
        None => true,
    }
}

/// Generate output path next to the input with the edited suffix
fn generate_output_path(input_path: &Path, format: ExportFormat) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let dir = input_path.parent().unwrap_or(Path::new("."));

    dir.join(format!(
        "{}-{}.{}",
        stem.to_string_lossy(),
        OUTPUT_SUFFIX,
        format.extension()
    ))
}

/// Generate output path inside a chosen output directory
fn generate_output_path_with_dir(
    input_path: &Path,
    output_dir: &Path,
    format: ExportFormat,
) -> String {
    let stem = input_path.file_stem().unwrap_or_default();
    let output_filename = format!(
        "{}-{}.{}",
        stem.to_string_lossy(),
        OUTPUT_SUFFIX,
        format.extension()
    );

    output_dir
        .join(output_filename)
        .to_string_lossy()
        .to_string()
}
