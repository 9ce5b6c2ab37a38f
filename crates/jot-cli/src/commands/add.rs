use crate::commands::common::{build_client, resolve_note_content};
use crate::error::CliError;

pub async fn run_add(content_parts: &[String], api_url: Option<String>) -> Result<(), CliError> {
    let content = resolve_note_content(content_parts)?;

    let client = build_client(api_url)?;
    client.create(&content).await?;

    // The create response is discarded by design; report from the refreshed
    // snapshot instead.
    let state = client.state();
    println!("Added note ({} total)", state.notes.len());
    Ok(())
}
