//! Command-line tool that builds a strategy deck from generated output.
//!
//! Reads either a plain strategy text file or a saved provider response
//! (JSON with text and inline image parts), plus optional image files, and
//! writes a `.pptx` deck.
//!
//! # Usage
//!
//! From a text file and images:
//! ```sh
//! cargo run --example build_deck -- strategy.txt --client "Acme Motors" \
//!     --product "EV SUV" --image banner1.png --image banner2.jpg
//! ```
//!
//! From a saved response, exporting the decoded images next to the deck:
//! ```sh
//! cargo run --example build_deck -- response.json --client Acme --product Rover \
//!     --export-images -o out/
//! ```
//!
//! Print the prompt and request body for a brief:
//! ```sh
//! cargo run --example build_deck -- --print-request --client Acme --product Rover \
//!     --audience "Urban families"
//! ```
//!
//! Dump the default configuration:
//! ```sh
//! cargo run --example build_deck -- --dump-config > deck.yaml
//! ```
//!
//! Set `RUST_LOG=stratdeck=debug` to see planning and packaging details.

use clap::Parser;
use stratdeck::{
    DeckAssembler, DeckConfig, DeckOutline, DeckSpec, GenerationResponse, StrategyBrief,
    VisualAsset,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Build a PowerPoint strategy deck from generated text and visuals
#[derive(Parser, Debug)]
#[command(name = "build_deck", version)]
struct Args {
    /// Strategy text file, or a provider response (.json)
    #[arg(value_name = "INPUT", required_unless_present_any = ["dump_config", "print_request"])]
    input: Option<PathBuf>,

    /// Client name shown on the title slide
    #[arg(long, default_value = "")]
    client: String,

    /// Product name shown on the title slide
    #[arg(long, default_value = "")]
    product: String,

    /// Target audience (only used with --print-request)
    #[arg(long, default_value = "")]
    audience: String,

    /// Extra direction (only used with --print-request)
    #[arg(long, default_value = "")]
    notes: String,

    /// Image file to add as a visual slide (repeatable, kept in order)
    #[arg(long = "image", value_name = "FILE")]
    images: Vec<PathBuf>,

    /// Deck configuration (.yaml/.yml or .json)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output file or directory (directories get the suggested file name)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Also write each image as draft_<n>.<ext> next to the deck
    #[arg(long)]
    export_images: bool,

    /// Print the default configuration as YAML and exit
    #[arg(long)]
    dump_config: bool,

    /// Print the generation request body for the brief and exit
    #[arg(long)]
    print_request: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stratdeck=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    if args.dump_config {
        print!("{}", DeckConfig::default().to_yaml()?);
        return Ok(());
    }

    if args.print_request {
        let brief = StrategyBrief::new(&args.client, &args.product, &args.audience, &args.notes);
        println!("{}", brief.request().to_json()?);
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => DeckConfig::from_file(path)?,
        None => DeckConfig::default(),
    };

    let input = args.input.as_deref().ok_or("missing INPUT")?;
    let (strategy_text, mut images) = read_input(input)?;
    for path in &args.images {
        images.push(VisualAsset::from_file(path)?);
    }

    let spec = DeckSpec::new(&args.client, &args.product);
    let output = resolve_output(args.output.as_deref(), &spec);
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let bytes = DeckAssembler::with_config(config).assemble(
        &strategy_text,
        &images,
        &spec.client_name,
        &spec.product_name,
    )?;
    fs::write(&output, &bytes)?;

    let outline = DeckOutline::from_bytes(&bytes)?;
    info!(path = %output.display(), slides = outline.slide_count(), "wrote deck");
    for (index, slide) in outline.slides.iter().enumerate() {
        let heading = slide
            .title
            .as_deref()
            .or_else(|| slide.text_boxes.first().map(String::as_str))
            .unwrap_or("");
        println!("{:>3}  {}", index + 1, heading);
    }

    if args.export_images {
        let dir = output.parent().unwrap_or_else(|| Path::new("."));
        for (index, image) in images.iter().enumerate() {
            let path = dir.join(image.file_name(index));
            fs::write(&path, image.data())?;
            info!(path = %path.display(), "exported image");
        }
    }

    Ok(())
}

/// Read strategy text and images from a text file or a provider response.
fn read_input(path: &Path) -> Result<(String, Vec<VisualAsset>), Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let outputs = GenerationResponse::from_json(&content)?.into_outputs()?;
        Ok((outputs.strategy_text, outputs.images))
    } else {
        Ok((content, Vec::new()))
    }
}

fn resolve_output(output: Option<&Path>, spec: &DeckSpec) -> PathBuf {
    match output {
        Some(path) if path.is_dir() || path.to_string_lossy().ends_with('/') => {
            path.join(spec.suggested_file_name())
        },
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(spec.suggested_file_name()),
    }
}
