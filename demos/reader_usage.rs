//! Stream-based API usage examples
//!
//! This example demonstrates the loader APIs that build editors from memory
//! buffers, file streams, and other async sources without requiring files.

use anyhow::Result;
use snapedit::{
    load_editor_from_bytes, load_editor_from_reader, EditorConfig, ExportFormat, Tone,
};
use std::io::Cursor;
use tokio::fs::File;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (optional)
    env_logger::init();

    println!("🌊 Stream-Based Editing Examples");
    println!("================================");

    // Example 1: In-memory bytes processing
    println!("\n📝 Example 1: In-memory bytes processing");
    if let Ok(sample_data) = create_sample_image() {
        match load_editor_from_bytes(&sample_data, EditorConfig::default()) {
            Ok(mut editor) => {
                editor.grayscale()?;
                if let Some(snapshot) = editor.current_snapshot() {
                    let png_bytes = snapshot.to_bytes(ExportFormat::Png, 100)?;
                    tokio::fs::write("stream_example_1.png", png_bytes).await?;
                    println!("✅ Edited in memory -> stream_example_1.png");
                }
            },
            Err(e) => println!("❌ Error: {e}"),
        }
    }

    // Example 2: Bytes processing with custom configuration
    println!("\n🎛️ Example 2: Bytes processing with custom format");
    if let Ok(sample_data) = create_sample_image() {
        let config = EditorConfig::builder()
            .container_size(640, 480)
            .export_format(ExportFormat::Jpeg)
            .jpeg_quality(85)
            .build()?;

        match load_editor_from_bytes(&sample_data, config) {
            Ok(mut editor) => {
                editor.apply_tone(Tone::Sunset)?;
                if let Some(snapshot) = editor.current_snapshot() {
                    let jpeg_bytes = snapshot.to_bytes(ExportFormat::Jpeg, 85)?;
                    tokio::fs::write("stream_example_2.jpg", jpeg_bytes).await?;
                    println!("✅ Edited with custom config -> stream_example_2.jpg");
                }
            },
            Err(e) => println!("❌ Error: {e}"),
        }
    }

    // Example 3: Stream processing from file reader
    println!("\n📁 Example 3: Stream processing from file reader");
    if std::path::Path::new("input.jpg").exists() {
        let file = File::open("input.jpg").await?;

        match load_editor_from_reader(file, EditorConfig::default()).await {
            Ok(mut editor) => {
                editor.increase_contrast()?;
                if let Some(path) = editor.export_to_dir(".")? {
                    println!("✅ Edited from file stream -> {}", path.display());
                }
            },
            Err(e) => println!("❌ Error: {e}"),
        }
    } else {
        println!("⚠️ Skipped: input.jpg not found");
    }

    // Example 4: Memory cursor processing
    println!("\n💾 Example 4: Memory cursor processing");
    if let Ok(sample_data) = create_sample_image() {
        let cursor = Cursor::new(sample_data);

        match load_editor_from_reader(cursor, EditorConfig::default()).await {
            Ok(mut editor) => {
                editor.flip_horizontal()?;
                editor.brighten()?;
                if let Some(snapshot) = editor.current_snapshot() {
                    println!(
                        "📊 Generated {} bytes of PNG data in memory",
                        snapshot.encoded_len()
                    );
                    println!(
                        "📈 Final dimensions: {}x{}",
                        snapshot.width(),
                        snapshot.height()
                    );
                }
            },
            Err(e) => println!("❌ Error: {e}"),
        }
    }

    println!("\n🎉 Stream processing examples completed!");
    println!("\nKey Benefits Demonstrated:");
    println!("  ✅ Memory-based editing (no temp files needed)");
    println!("  ✅ Stream input for network usage");
    println!("  ✅ Flexible format handling");
    println!("  ✅ Backwards compatibility with file-based APIs");

    Ok(())
}

/// Create a minimal sample image for testing
/// In real usage, you'd load actual image data from files, network, etc.
fn create_sample_image() -> Result<Vec<u8>> {
    use image::{ImageBuffer, Rgb};

    // Create a simple 64x64 test image
    let img = ImageBuffer::from_fn(64, 64, |x, y| {
        let r = (x * 4) as u8;
        let g = (y * 4) as u8;
        let b = ((x + y) * 2) as u8;
        Rgb([r, g, b])
    });

    // Encode to PNG bytes
    let mut buffer = Vec::new();
    let mut cursor = Cursor::new(&mut buffer);
    img.write_to(&mut cursor, image::ImageFormat::Png)?;

    Ok(buffer)
}
