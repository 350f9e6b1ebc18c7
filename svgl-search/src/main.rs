//! svgl-search - query the svgl.app icon catalog

use anyhow::{Context, Result};
use clap::Parser;
use libsvgl::catalog::IconQuery;
use libsvgl::logging::{LogFormat, LoggingConfig};
use libsvgl::search::{empty_search_message, EMPTY_CATEGORY_MESSAGE};
use libsvgl::{CatalogError, GalleryService, IconRecord, SvglError};

#[derive(Parser, Debug)]
#[command(name = "svgl-search")]
#[command(version, about = "Search the svgl.app icon catalog")]
#[command(long_about = r#"Search the svgl.app icon catalog by name or browse it by category.

A search term always wins: when both a term and a category are given, the
category is ignored. With neither, the full catalog is listed.

EXAMPLES:
    # List every icon
    svgl-search

    # Search by name
    svgl-search github

    # Browse a category
    svgl-search --category Software

    # First five results as JSON
    svgl-search vercel --limit 5 --format json

    # Asset URLs only
    svgl-search --category AI --format jsonl | jq -r '.asset_location'

OUTPUT FORMATS:
    text  - One icon per line: id | name | category | asset (default)
    json  - JSON array
    jsonl - JSON lines, one object per line (streaming-friendly)
    csv   - CSV with headers

EXIT CODES:
    0 - Success (including empty results)
    1 - Error (network failure, unexpected status, bad config)
    2 - Rate limited by the catalog
    3 - Invalid input
"#)]
struct Args {
    /// Search term
    #[arg(value_name = "TERM")]
    term: Option<String>,

    /// Category to browse when no term is given
    #[arg(short, long, value_name = "CATEGORY")]
    category: Option<String>,

    /// Maximum number of icons to print
    #[arg(short, long, value_name = "N")]
    limit: Option<usize>,

    /// Output format
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    #[arg(value_parser = ["text", "json", "jsonl", "csv"])]
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

    tracing::debug!("svgl-search started with args: {:?}", args);

    if let Err(e) = run(args).await {
        eprintln!("Error: {:#}", e);
        if let Some(hint) = retry_hint(&e) {
            eprintln!("{}", hint);
        }
        std::process::exit(exit_code(&e));
    }
}

async fn run(args: Args) -> Result<()> {
    let service = GalleryService::new().context("Failed to initialize catalog client")?;

    let query = IconQuery::new(args.term.as_deref(), args.category.as_deref());
    tracing::debug!(%query, "Listing icons");

    let mut icons = service.icons(&query).await?;
    if let Some(limit) = args.limit {
        icons.truncate(limit);
    }

    if icons.is_empty() {
        // Empty is a valid outcome: explain on stderr, keep stdout clean
        let message = match query.search_term() {
            Some(term) => empty_search_message(term),
            None => EMPTY_CATEGORY_MESSAGE.to_string(),
        };
        eprintln!("{}", message);
        if args.format == "json" {
            println!("[]");
        }
        return Ok(());
    }

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&icons)?),
        "jsonl" => {
            for icon in &icons {
                println!("{}", serde_json::to_string(icon)?);
            }
        }
        "csv" => {
            println!("id,name,category,asset_location");
            for icon in &icons {
                println!("{}", csv_row(icon));
            }
        }
        _ => {
            for icon in &icons {
                println!(
                    "{} | {} | {} | {}",
                    icon.id, icon.name, icon.category, icon.asset_location
                );
            }
        }
    }

    Ok(())
}

fn csv_row(icon: &IconRecord) -> String {
    format!(
        "{},{},{},{}",
        icon.id,
        csv_field(&icon.name),
        csv_field(&icon.category),
        csv_field(&icon.asset_location)
    )
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn catalog_error(e: &anyhow::Error) -> Option<&CatalogError> {
    match e.downcast_ref::<SvglError>() {
        Some(SvglError::Catalog(err)) => Some(err),
        _ => e.downcast_ref::<CatalogError>(),
    }
}

fn retry_hint(e: &anyhow::Error) -> Option<&'static str> {
    catalog_error(e)
        .filter(|err| err.is_retryable())
        .map(|_| "Hint: this may be temporary, try again in a moment.")
}

fn exit_code(e: &anyhow::Error) -> i32 {
    e.downcast_ref::<SvglError>()
        .map(SvglError::exit_code)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("GitHub"), "GitHub");
        assert_eq!(csv_field("Hosting, Software"), "\"Hosting, Software\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_exit_code_from_library_error() {
        let err = anyhow::Error::new(SvglError::Catalog(CatalogError::RateLimited));
        assert_eq!(exit_code(&err), 2);
        assert!(retry_hint(&err).is_some());
    }

    #[test]
    fn test_exit_code_through_context() {
        let err = anyhow::Error::new(SvglError::InvalidInput("bad".to_string()))
            .context("Failed to initialize catalog client");
        assert_eq!(exit_code(&err), 3);
    }

    #[test]
    fn test_no_hint_for_decode_errors() {
        let err = anyhow::Error::new(SvglError::Catalog(CatalogError::Decode(
            "expected array".to_string(),
        )));
        assert_eq!(retry_hint(&err), None);
    }
}
