use crate::commands::common::{build_client, normalize_note_identifier};
use crate::error::CliError;

pub async fn run_delete(id: &str, api_url: Option<String>) -> Result<(), CliError> {
    let normalized_id = normalize_note_identifier(id)?;

    let client = build_client(api_url)?;
    client.delete(&normalized_id).await?;

    println!("{normalized_id}");
    Ok(())
}
