//! Basic batch conversion example
//!
//! This example demonstrates the core functionality of html2md-batch:
//! - Plugging in a conversion engine
//! - Creating a processor instance
//! - Subscribing to events
//! - Registering files and running a processing pass
//! - Exporting the results as a ZIP archive

use std::sync::Arc;

use html2md_batch::{
    BatchConfig, BatchProcessor, ConvertError, ConvertOptions, Event, Exporter, FnConverter,
    FsFileSaver, NamingConvention, SourceFile,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Plug in a conversion engine. Any `html -> markdown` function works;
    // this one just strips tags to keep the example self-contained.
    let converter = Arc::new(FnConverter::new(|html: &str, _: &ConvertOptions| {
        let tags =
            regex::Regex::new(r"</?[^>]+>").map_err(|e| ConvertError::Other(e.to_string()))?;
        Ok(tags.replace_all(html, "").trim().to_string())
    }));

    // Build configuration
    let config = BatchConfig {
        max_concurrent: 2,
        auto_retry: false,
        stop_on_error: false,
        ..Default::default()
    };

    // Create processor instance
    let processor = BatchProcessor::new(config, converter);

    // Subscribe to events
    let mut events = processor.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                Event::FileAdded { id, name } => {
                    println!("✓ Registered file #{}: {}", id, name);
                }
                Event::FileProcessed { id, name } => {
                    println!("✓ Converted #{}: {}", id, name);
                }
                Event::FileFailed { id, name, error } => {
                    println!("✗ Failed #{} ({}): {}", id, name, error);
                }
                Event::ProgressUpdate { percent } => {
                    println!("  progress: {:.0}%", percent);
                }
                Event::ProcessingComplete => {
                    println!("✓ Batch complete");
                }
                other => println!("  event: {:?}", other),
            }
        }
    });

    // Register files (a .txt sneaks in and is silently dropped)
    let registered = processor
        .add_files(vec![
            SourceFile::new("welcome.html", "<h1>Welcome</h1><p>First page.</p>"),
            SourceFile::new("about.html", "<h1>About</h1><p>Second page.</p>"),
            SourceFile::new("readme.txt", "not html, will be skipped"),
        ])
        .await;
    println!("registered {} of 3 files", registered.len());

    // Run the batch
    processor.process_all().await?;

    let stats = processor.stats().await;
    println!(
        "done: {}/{} completed, {} failed",
        stats.completed, stats.total, stats.failed
    );

    // Export everything as a ZIP next to the working directory
    let exporter = Exporter::new(Arc::new(FsFileSaver::new("exports")));
    let records = processor.records().await;
    let archive = exporter
        .export_all(&records, NamingConvention::Original)
        .await?;
    tokio::fs::write("exports.zip", &archive).await?;
    println!("wrote exports.zip ({} bytes)", archive.len());

    Ok(())
}
