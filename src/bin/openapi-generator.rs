//! Print the OpenAPI document of the daily top ten API as pretty JSON.

use anyhow::Context;
use daily_top_ten::services::documentation::ApiDoc;
use utoipa::OpenApi;

fn main() -> anyhow::Result<()> {
    let doc = ApiDoc::openapi();
    let json = doc.to_pretty_json().context("serializing OpenAPI document")?;
    println!("{json}");
    Ok(())
}
