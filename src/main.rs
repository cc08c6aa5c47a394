use anyhow::Context;
use clap::Parser;
use jpeg_squeeze::cli::{Args, Commands};
use jpeg_squeeze::constants::{ESTIMATED_SIZE_PREFIX, ORIGINAL_SIZE_PREFIX, SUCCESS_PREFIX};
use jpeg_squeeze::logger::{self, OutputLevel};
use jpeg_squeeze::utils::{create_progress_spinner, print_compression_result};
use jpeg_squeeze::{info, verbose, CompressionParameters, InputImage, Session};
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(OutputLevel::from_flags(args.quiet, args.verbose));

    match args.command {
        Commands::Compress {
            input,
            output,
            quality,
            scale,
        } => {
            compress(&input, &output, quality, scale)
                .await
                .with_context(|| format!("failed to compress {:?}", input))?;
        }
        Commands::Estimate { input, quality } => {
            estimate(&input, quality)
                .await
                .with_context(|| format!("failed to estimate {:?}", input))?;
        }
    }

    Ok(())
}

async fn compress(
    input: &Path,
    output: &Path,
    quality: Option<u8>,
    scale: Option<u32>,
) -> anyhow::Result<PathBuf> {
    let params = CompressionParameters::new(quality, scale)?;

    info!("🗜️  Compressing image: {:?}", input);
    info!("📁 Output directory: {:?}", output);

    let mut session = Session::default();
    session.set_quality(params.quality)?;
    session.set_scale(params.scale)?;
    session.select(InputImage::load(input).await?);
    print_preview(&session);
    print_sizes(&session);

    let pb = create_progress_spinner("Compressing...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    let link = session.compress().await;
    pb.finish_and_clear();
    verbose!("orchestrator {}", session.orchestrator().state());
    let link = link?;
    verbose!(
        "{} downloadable for {:?}",
        link.file_name(),
        session.downloads().ttl()
    );

    let saved = link.save_to(output)?;
    let original_size = session.input().map(|i| i.len()).unwrap_or_default();
    if let Some(result) = link.resolve() {
        let (width, height) = result.dimensions();
        info!("📏 Dimensions: {}x{}", width, height);
        print_compression_result(original_size, result.len());
    }
    link.revoke();

    info!("{} Saved to {:?}", SUCCESS_PREFIX, saved);
    Ok(saved)
}

async fn estimate(input: &Path, quality: Option<u8>) -> anyhow::Result<()> {
    let params = CompressionParameters::new(quality, None)?;

    let mut session = Session::default();
    session.set_quality(params.quality)?;
    session.select(InputImage::load(input).await?);

    info!("📋 {}", input.display());
    print_preview(&session);
    print_sizes(&session);

    Ok(())
}

fn print_preview(session: &Session) {
    let Some(preview) = session.preview() else {
        return;
    };
    match preview.dimensions {
        Some((width, height)) => info!(
            "🖼️  Preview: {} {}x{} ({} chars data URL)",
            preview.mime_type,
            width,
            height,
            preview.data_url.len()
        ),
        None => info!("🖼️  Preview: {} (dimensions unknown)", preview.mime_type),
    }
    verbose!("preview URL: {:.64}...", preview.data_url);
}

fn print_sizes(session: &Session) {
    if let Some(original) = session.original_size_label() {
        info!("{} {}", ORIGINAL_SIZE_PREFIX, original);
    }
    if let Some(estimated) = session.estimated_size_label() {
        info!(
            "{} {} (at quality {}%, approximate)",
            ESTIMATED_SIZE_PREFIX,
            estimated,
            session.params().quality
        );
    }
}
