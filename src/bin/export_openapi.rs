//! Export the OpenAPI document as JSON
//!
//! Usage:
//!   cargo run --bin export_openapi > openapi.json
//!
//! Or with file output:
//!   cargo run --bin export_openapi -- --output docs/openapi.json

use anyhow::Context;
use loadtest::gateway::openapi::ApiDoc;
use utoipa::OpenApi;

fn main() -> anyhow::Result<()> {
    let doc = ApiDoc::openapi();

    let args: Vec<String> = std::env::args().collect();
    let output_path = if args.len() > 2 && args[1] == "--output" {
        Some(args[2].as_str())
    } else {
        None
    };

    let json = doc
        .to_pretty_json()
        .context("failed to serialize OpenAPI document")?;

    match output_path {
        Some(path) => {
            std::fs::write(path, &json).with_context(|| format!("failed to write {}", path))?;
            eprintln!("OpenAPI document exported to: {}", path);
        }
        None => {
            println!("{}", json);
        }
    }
    Ok(())
}
