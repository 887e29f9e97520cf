//! Command-line tool for converting PowerPoint presentations to Reveal.js markup.
//!
//! Writes `slides.html` (the `<section>` elements, ready to drop into a
//! Reveal.js page) and an `images/` directory with the extracted pictures.
//!
//! # Usage
//!
//! Basic conversion:
//! ```sh
//! cargo run --example convert -- talk.pptx -o out/
//! ```
//!
//! Positioned layout, skipping slides that fail to parse:
//! ```sh
//! cargo run --example convert -- talk.pptx -o out/ --layout positioned --skip-bad-slides
//! ```
//!
//! Dump the extracted model instead of rendering:
//! ```sh
//! cargo run --example convert -- talk.pptx -o out/ --json
//! ```
//!
//! Logging follows `RUST_LOG`, e.g. `RUST_LOG=pptx_reveal=debug`.

use clap::{Parser, ValueEnum};
use pptx_reveal::html::{HtmlOptions, LayoutMode, render_deck};
use pptx_reveal::ooxml::pptx::DirImageStore;
use pptx_reveal::presentation::{ConvertOptions, Converter, SlideErrorPolicy};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Convert a .pptx presentation into Reveal.js slide markup
#[derive(Parser, Debug)]
#[command(name = "convert", version)]
struct Args {
    /// Presentation to convert
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output directory for slides.html and images/
    #[arg(short, long, value_name = "DIR", default_value = "static")]
    output: PathBuf,

    /// How shapes are placed on each slide
    #[arg(long, value_enum, default_value = "flow")]
    layout: LayoutArg,

    /// Reveal.js transition for every section
    #[arg(long, default_value = "fade")]
    transition: String,

    /// Show all content at once instead of as fragments
    #[arg(long)]
    no_fragments: bool,

    /// Replace slides that fail to parse with empty slides
    #[arg(long)]
    skip_bad_slides: bool,

    /// Process slides on a single thread
    #[arg(long)]
    sequential: bool,

    /// Write the extracted model as deck.json instead of rendering
    #[arg(long)]
    json: bool,
}

/// Layout options for CLI
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutArg {
    /// Text flows inside a fit-to-slide wrapper
    Flow,
    /// Every shape is absolutely positioned
    Positioned,
}

impl From<LayoutArg> for LayoutMode {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Flow => LayoutMode::Flow,
            LayoutArg::Positioned => LayoutMode::Positioned,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pptx_reveal=info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if !args.input.is_file() {
        eprintln!("Error: Input file does not exist: {}", args.input.display());
        std::process::exit(1);
    }

    let policy = if args.skip_bad_slides {
        SlideErrorPolicy::Skip
    } else {
        SlideErrorPolicy::Abort
    };
    let convert_options = ConvertOptions::new()
        .with_slide_error_policy(policy)
        .with_parallel(!args.sequential);

    fs::create_dir_all(&args.output)?;
    let store = DirImageStore::new(args.output.join("images"));
    let deck = Converter::new(convert_options).convert(&args.input, &store)?;

    for warning in deck.warnings() {
        eprintln!("warning: {}", serde_json::to_string(warning)?);
    }

    if args.json {
        let path = args.output.join("deck.json");
        fs::write(&path, serde_json::to_string_pretty(&deck)?)?;
        println!("✓ {} -> {}", args.input.display(), path.display());
        return Ok(());
    }

    let html_options = HtmlOptions::new()
        .with_layout(args.layout.into())
        .with_transition(args.transition)
        .with_fragments(!args.no_fragments)
        .with_parallel(!args.sequential);
    let rendered = render_deck(&deck, &html_options);

    let path = args.output.join("slides.html");
    fs::write(&path, rendered.html())?;
    println!(
        "✓ {} -> {} ({} slides)",
        args.input.display(),
        path.display(),
        rendered.len()
    );
    Ok(())
}
