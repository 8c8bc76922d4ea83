use crate::commands::common::{
    message_to_item, open_session, parse_conversation_id, reported, ConnectionArgs, MessageItem,
};
use crate::error::CliError;
use crate::presenter::TerminalPresenter;

pub async fn run_show(connection: &ConnectionArgs, id: &str, as_json: bool) -> Result<(), CliError> {
    let id = parse_conversation_id(id)?;
    let presenter = if as_json {
        TerminalPresenter::new().quiet()
    } else {
        TerminalPresenter::new()
    };
    let session = open_session(connection, presenter)?;

    // The listing supplies the title shown above the transcript.
    reported(session.refresh().await)?;
    let messages = reported(session.load(id).await)?;

    if as_json {
        let json_items = messages
            .iter()
            .map(message_to_item)
            .collect::<Vec<MessageItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    }

    Ok(())
}
