mod capture;
mod detection;
mod display;

use anyhow::{Context, Result};
use capture::{CaptureSource, WebcamCapture};
use clap::Parser;
use detection::HsvRange;
use display::{DisplaySink, HighGuiDisplay};
use std::time::{Duration, Instant};

const EXIT_KEY: char = 'q';
const STATS_INTERVAL: u64 = 30;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input webcam device index
    #[arg(short, long, default_value_t = 0)]
    input_device: u32,

    /// Milliseconds to wait for a key press after each frame
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(i32).range(1..))]
    poll_ms: i32,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

/// Fixed settings handed to the pipeline loop
#[derive(Debug, Clone, Copy)]
struct PipelineConfig {
    range: HsvRange,
    poll_ms: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum StopReason {
    ExitKey,
    CaptureFailed(String),
}

#[derive(Debug)]
struct RunSummary {
    frames: u64,
    stop: StopReason,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    tracing::info!("yellow-detect starting");

    let config = PipelineConfig {
        range: HsvRange::YELLOW,
        poll_ms: args.poll_ms,
    };
    tracing::info!(
        "HSV range: lower={:?} upper={:?}",
        config.range.lower,
        config.range.upper
    );

    // Both handles are released on drop, whichever way the loop ends
    let mut capture =
        WebcamCapture::open(args.input_device).context("Failed to initialize webcam capture")?;
    let mut display = HighGuiDisplay::new().context("Failed to create display windows")?;

    let summary = run_pipeline(&mut capture, &mut display, &config)?;

    match &summary.stop {
        StopReason::ExitKey => {
            tracing::info!("Exit key pressed after {} frames", summary.frames)
        }
        StopReason::CaptureFailed(reason) => {
            tracing::info!("Capture ended after {} frames: {}", summary.frames, reason)
        }
    }

    Ok(())
}

fn run_pipeline<C, D>(capture: &mut C, display: &mut D, config: &PipelineConfig) -> Result<RunSummary>
where
    C: CaptureSource,
    D: DisplaySink,
{
    let mut frame_count = 0u64;
    let mut total_capture_time = Duration::ZERO;
    let mut total_detect_time = Duration::ZERO;
    let mut total_display_time = Duration::ZERO;

    let (width, height) = capture.resolution();
    tracing::info!("Starting detection loop at {}x{}", width, height);
    tracing::info!("Press '{}' in a window to stop", EXIT_KEY);

    loop {
        // Capture frame
        let capture_start = Instant::now();
        let frame = match capture.capture_frame() {
            Ok(frame) => frame,
            Err(err) => {
                let reason = format!("{:#}", anyhow::Error::from(err));
                tracing::warn!("Capture failed: {}", reason);
                return Ok(RunSummary {
                    frames: frame_count,
                    stop: StopReason::CaptureFailed(reason),
                });
            }
        };
        total_capture_time += capture_start.elapsed();

        // Convert, threshold, composite
        let detect_start = Instant::now();
        let detection = detection::detect(&frame, &config.range);
        total_detect_time += detect_start.elapsed();

        // Display
        let display_start = Instant::now();
        display.show_color(display::LIVE_FEED, &frame)?;
        display.show_mask(display::MASK, &detection.mask)?;
        display.show_color(display::DETECTED, &detection.result)?;
        total_display_time += display_start.elapsed();

        frame_count += 1;

        if frame_count % STATS_INTERVAL == 0 {
            let avg_capture_ms = total_capture_time.as_secs_f64() * 1000.0 / frame_count as f64;
            let avg_detect_ms = total_detect_time.as_secs_f64() * 1000.0 / frame_count as f64;
            let avg_display_ms = total_display_time.as_secs_f64() * 1000.0 / frame_count as f64;
            let total_ms = avg_capture_ms + avg_detect_ms + avg_display_ms;
            let actual_fps = if total_ms > 0.0 { 1000.0 / total_ms } else { 0.0 };

            tracing::info!(
                "Frame {}: capture={:.1}ms, detect={:.1}ms, display={:.1}ms, total={:.1}ms, fps={:.1}, coverage={:.1}%",
                frame_count,
                avg_capture_ms,
                avg_detect_ms,
                avg_display_ms,
                total_ms,
                actual_fps,
                detection.coverage() * 100.0
            );
        }

        if display.poll_key(config.poll_ms)? == Some(EXIT_KEY) {
            return Ok(RunSummary {
                frames: frame_count,
                stop: StopReason::ExitKey,
            });
        }
    }
}
