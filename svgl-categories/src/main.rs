//! svgl-categories - list icon categories and their sizes

use anyhow::{Context, Result};
use clap::Parser;
use libsvgl::logging::{LogFormat, LoggingConfig};
use libsvgl::{CategoryRecord, GalleryService, SvglError};

#[derive(Parser, Debug)]
#[command(name = "svgl-categories")]
#[command(version, about = "List the categories of the svgl.app icon catalog")]
#[command(long_about = r#"List the categories of the svgl.app icon catalog with icon counts.

EXAMPLES:
    # Human-readable listing
    svgl-categories

    # Largest categories first
    svgl-categories --format csv | tail -n +2 | sort -t, -k2 -rn

    # Browse every category in turn
    svgl-categories --format json | jq -r '.[].name' | xargs -I{} svgl-search -c {}

OUTPUT FORMATS:
    text - "name (count)" per line (default)
    json - JSON array
    csv  - CSV with headers

EXIT CODES:
    0 - Success (including an empty listing)
    1 - Error
    2 - Rate limited by the catalog
"#)]
struct Args {
    /// Output format
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    #[arg(value_parser = ["text", "json", "csv"])]
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
    let categories = service.categories().await?;

    if categories.is_empty() {
        eprintln!("No categories available.");
    }

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&categories)?),
        "csv" => {
            println!("name,total_count");
            for category in &categories {
                println!("{}", csv_row(category));
            }
        }
        _ => {
            for category in &categories {
                println!("{}", text_line(category));
            }
        }
    }

    Ok(())
}

fn text_line(category: &CategoryRecord) -> String {
    format!("{} ({})", category.name, category.total_count)
}

fn csv_row(category: &CategoryRecord) -> String {
    if category.name.contains([',', '"']) {
        format!(
            "\"{}\",{}",
            category.name.replace('"', "\"\""),
            category.total_count
        )
    } else {
        format!("{},{}", category.name, category.total_count)
    }
}
