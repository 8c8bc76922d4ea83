use crate::commands::common::{open_session, reported, ConnectionArgs};
use crate::error::CliError;
use crate::presenter::TerminalPresenter;

pub async fn run_new(connection: &ConnectionArgs) -> Result<(), CliError> {
    let session = open_session(connection, TerminalPresenter::new().quiet())?;
    let conversation = reported(session.create().await)?;
    println!("{}\t{}", conversation.id, conversation.title);
    Ok(())
}
