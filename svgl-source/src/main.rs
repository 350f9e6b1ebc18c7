//! svgl-source - print an icon's markup or its component source

use anyhow::{Context, Result};
use clap::Parser;
use libsvgl::convert::{markup_to_component_source, normalize_markup};
use libsvgl::logging::{LogFormat, LoggingConfig};
use libsvgl::{GalleryService, SvglError};

#[derive(Parser, Debug)]
#[command(name = "svgl-source")]
#[command(version, about = "Fetch an icon's markup from svgl.app")]
#[command(long_about = r#"Fetch an icon's markup from svgl.app.

The asset location is the URL printed by svgl-search; only its final path
segment (the filename) is sent to the catalog.

EXAMPLES:
    # Cleaned-up markup
    svgl-source https://svgl.app/library/github_light.svg

    # Ready to paste into a component
    svgl-source https://svgl.app/library/github_light.svg --format jsx

    # Straight from a search
    svgl-search github --format jsonl | head -1 | jq -r .asset_location | xargs svgl-source

OUTPUT FORMATS:
    svg - Markup without XML declaration, DOCTYPE or comments (default)
    jsx - Component form: {...props} on the root, className, camelCase attributes
    raw - Response body exactly as served

EXIT CODES:
    0 - Success
    1 - Error (markup not available, network failure)
    3 - No filename in the asset location
"#)]
struct Args {
    /// Asset URL or path ending in the icon's filename
    #[arg(value_name = "ASSET_LOCATION")]
    asset_location: String,

    /// Output format
    #[arg(short, long, default_value = "svg", value_name = "FORMAT")]
    #[arg(value_parser = ["svg", "jsx", "raw"])]
    format: String,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if args.verbose {
        let _ = LoggingConfig::new(LogFormat::Text, "debug".to_string(), true).init();
    } else {
        libsvgl::logging::init_default();
    }

    if let Err(e) = run(args).await {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<SvglError>()
            .map(SvglError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

async fn run(args: Args) -> Result<()> {
    let service = GalleryService::new().context("Failed to initialize catalog client")?;

    let raw = service
        .catalog()
        .fetch_markup(&args.asset_location)
        .await
        .map_err(SvglError::from)?;

    println!("{}", render(&raw, &args.format));
    Ok(())
}

fn render(raw: &str, format: &str) -> String {
    match format {
        "jsx" => markup_to_component_source(raw),
        "raw" => raw.trim_end().to_string(),
        _ => normalize_markup(raw),
    }
}
