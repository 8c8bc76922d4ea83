use parley_core::session::DeleteOutcome;

use crate::commands::common::{open_session, parse_conversation_id, reported, ConnectionArgs};
use crate::error::CliError;
use crate::presenter::TerminalPresenter;

pub async fn run_delete(connection: &ConnectionArgs, id: &str, yes: bool) -> Result<(), CliError> {
    let id = parse_conversation_id(id)?;
    let presenter = TerminalPresenter::new().quiet().assume_yes(yes);
    let session = open_session(connection, presenter)?;

    reported(session.refresh().await)?;
    match reported(session.delete(id).await)? {
        DeleteOutcome::Deleted => println!("{id}"),
        DeleteOutcome::Cancelled => println!("Cancelled"),
    }
    Ok(())
}
