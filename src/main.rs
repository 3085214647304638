use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pageflow::{parse_title, Outline, StreamCoordinator};

/// Replay a generation transcript through the streaming page pipeline
///
/// Feeds the transcript to the coordinator in fixed-size character chunks,
/// the way the SSE transport delivers it, and prints how pages appear and
/// freeze along the way.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Transcript file; reads stdin when omitted
    input: Option<PathBuf>,

    /// Characters per simulated chunk
    #[arg(long, default_value_t = 16)]
    chunk_chars: usize,

    /// Print the final outline as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let transcript = read_transcript(&args)?;
    let chunk_chars = args.chunk_chars.max(1);

    let mut coordinator = StreamCoordinator::new();
    let chars: Vec<char> = transcript.chars().collect();
    let mut accumulated = String::new();
    let mut seen_pages = 0;
    let mut ticks = 0;

    for chunk in chars.chunks(chunk_chars) {
        accumulated.extend(chunk.iter());
        coordinator.apply_update(&accumulated);
        ticks += 1;

        for page in &coordinator.pages()[seen_pages..] {
            println!("  page {} appeared [{:?}]", page.index, page.kind);
        }
        seen_pages = coordinator.pages().len();
    }

    coordinator.finalize();
    println!("✓ Replayed {} chunks, {} pages\n", ticks, seen_pages);

    if args.json {
        let outline = Outline::from_pages(coordinator.into_pages());
        println!("{}", serde_json::to_string_pretty(&outline)?);
        return Ok(());
    }

    for page in coordinator.pages() {
        let title = parse_title(&page.content, page.kind).unwrap_or_else(|| "(untitled)".to_string());
        println!(
            "  {} [{:?}] {} — {} chars",
            page.index,
            page.kind,
            title,
            page.content.chars().count()
        );
    }

    Ok(())
}

fn read_transcript(args: &Args) -> Result<String> {
    match &args.input {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}
