//! Complete example demonstrating library usage without the CLI
//!
//! This example shows how to drive the editing engine directly: configuring
//! a session, loading an image, applying local edits with undo/redo, drawing
//! with the pencil tool, and exporting results to disk.

use anyhow::Result;
use snapedit::{Editor, EditorConfig, ExportFormat, MockAiBackend, Tone};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (optional)
    env_logger::init();

    println!("🚀 SnapEdit Library Example");
    println!("===========================");

    // 1. Configure the editing session
    println!("\n🎛️ Configuring editor...");
    let config = EditorConfig::builder()
        .container_size(960, 720)
        .export_format(ExportFormat::Png)
        .jpeg_quality(92)
        .build()?;

    let mut editor = Editor::new(config)?;

    // 2. Load an image (if input exists)
    let input_path = "input.jpg";
    if Path::new(input_path).exists() {
        println!("🖼️ Loading image: {input_path}");
        editor.load_from_path(input_path)?;

        if let Some((width, height)) = editor.display_size() {
            println!("  • Display size: {width}x{height}");
        }
        if let Some(scale) = editor.display_scale() {
            println!("  • Display scale: {scale:.3}");
        }

        // 3. Apply local edits with full undo/redo
        println!("\n✏️ Applying local edits...");
        editor.grayscale()?;
        println!("  • Grayscale applied");
        editor.apply_tone(Tone::Summer)?;
        println!("  • Summer tone applied");
        editor.rotate90()?;
        println!("  • Rotated 90 degrees");

        if editor.undo() {
            println!("  • Undid rotation (can_redo: {})", editor.can_redo());
        }
        if editor.redo() {
            println!("  • Redid rotation");
        }

        // 4. Draw with the pencil tool
        println!("\n🖊️ Drawing a pencil stroke...");
        if editor.enable_pencil() {
            editor.set_pencil_color([255, 0, 0]);
            editor.set_pencil_width(6.0)?;
            if editor.begin_stroke(10.0, 10.0)? {
                let _preview = editor.extend_stroke(60.0, 40.0);
                if let Some(preview) = editor.extend_stroke(120.0, 90.0) {
                    println!("  • Preview size: {}x{}", preview.width(), preview.height());
                }
                if editor.end_stroke()? {
                    println!("  • Stroke committed to history");
                }
            }
            editor.disable_pencil();
        }

        // 5. Run an AI operation against a mock service
        //
        // Swap `MockAiBackend` for `HttpAiBackend::new(service_url)?` to talk
        // to a real processing service.
        println!("\n🤖 Running face blur against a mock backend...");
        editor.set_backend(Box::new(MockAiBackend::new()));
        if let Some(faces) = editor.blur_faces().await? {
            println!("  • Blurred {faces} face(s)");
        }

        // 6. Export the result
        println!("\n💾 Exporting...");
        if let Some(path) = editor.export_to_dir("exports")? {
            println!("✅ Exported to: {}", path.display());
        }

        println!("\n📊 Session state:");
        println!("  • History can undo: {}", editor.can_undo());
        println!("  • Gallery entries: {}", editor.gallery().len());
    } else {
        println!("⚠️ Input image '{input_path}' not found. Create this file to test editing.");
        println!("   Example: cp /path/to/your/image.jpg {input_path}");
    }

    println!("\n🎉 Library example completed successfully!");
    println!("\nKey Benefits Demonstrated:");
    println!("  ✅ Full editing engine available to library users");
    println!("  ✅ Snapshot-based undo/redo for every edit");
    println!("  ✅ Interactive pencil drawing with stroke previews");
    println!("  ✅ Pluggable AI backends (mock or HTTP)");
    println!("  ✅ Timestamped export with gallery tracking");

    Ok(())
}
