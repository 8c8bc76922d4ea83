use crate::commands::common::{
    conversation_to_item, format_conversation_lines, open_session, reported, ConnectionArgs,
    ConversationListItem,
};
use crate::error::CliError;
use crate::presenter::TerminalPresenter;

pub async fn run_list(connection: &ConnectionArgs, as_json: bool) -> Result<(), CliError> {
    let session = open_session(connection, TerminalPresenter::new().quiet())?;
    let conversations = reported(session.refresh().await)?;

    if as_json {
        let json_items = conversations
            .iter()
            .map(conversation_to_item)
            .collect::<Vec<ConversationListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if conversations.is_empty() {
        println!("No conversations yet");
    } else {
        for line in format_conversation_lines(&conversations, None) {
            println!("{line}");
        }
    }

    Ok(())
}
