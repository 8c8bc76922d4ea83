use std::path::PathBuf;

use parley_core::session::SkipReason;
use parley_core::SendOutcome;

use crate::commands::common::{
    join_words, open_session, parse_conversation_id, read_attachment, reported, ConnectionArgs,
};
use crate::error::CliError;
use crate::presenter::TerminalPresenter;

pub async fn run_send(
    connection: &ConnectionArgs,
    conversation: Option<&str>,
    attach: &[PathBuf],
    message: &[String],
) -> Result<(), CliError> {
    let conversation = conversation.map(parse_conversation_id).transpose()?;
    let text = join_words(message);
    let files = attach
        .iter()
        .map(|path| read_attachment(path))
        .collect::<Result<Vec<_>, _>>()?;
    if text.is_empty() && files.is_empty() {
        return Err(CliError::EmptyMessage);
    }

    let session = open_session(connection, TerminalPresenter::new().quiet())?;

    let report = session.attach(files).await;
    if !report.rejected.is_empty() {
        return Err(CliError::Reported);
    }

    if let Some(id) = conversation {
        reported(session.refresh().await)?;
        reported(session.load(id).await)?;
    }

    match session.send(&text).await {
        SendOutcome::Delivered {
            conversation_id,
            reply,
        } => {
            tracing::info!("Reply received in conversation {conversation_id}");
            println!("{reply}");
            Ok(())
        }
        SendOutcome::Failed(_) => Err(CliError::Reported),
        SendOutcome::Skipped(SkipReason::Empty) => Err(CliError::EmptyMessage),
        SendOutcome::Skipped(SkipReason::Busy) => Err(CliError::Busy),
    }
}
