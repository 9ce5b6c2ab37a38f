use crate::commands::common::{
    build_client, format_note_lines, note_to_list_item, NoteListItem, EMPTY_LIST_MESSAGE,
};
use crate::error::CliError;

pub async fn run_list(limit: usize, as_json: bool, api_url: Option<String>) -> Result<(), CliError> {
    let client = build_client(api_url)?;
    client.list().await?;

    let mut notes = client.state().display_notes();
    if limit > 0 {
        notes.truncate(limit);
    }

    if as_json {
        let json_items = notes
            .iter()
            .map(note_to_list_item)
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if notes.is_empty() {
        println!("{EMPTY_LIST_MESSAGE}");
    } else {
        for line in format_note_lines(&notes) {
            println!("{line}");
        }
    }

    Ok(())
}
