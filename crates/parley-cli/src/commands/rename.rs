use parley_core::session::RenameOutcome;

use crate::commands::common::{
    join_words, open_session, parse_conversation_id, reported, ConnectionArgs,
};
use crate::error::CliError;
use crate::presenter::TerminalPresenter;

pub async fn run_rename(
    connection: &ConnectionArgs,
    id: &str,
    title: &[String],
) -> Result<(), CliError> {
    let id = parse_conversation_id(id)?;
    let title = join_words(title);
    let session = open_session(connection, TerminalPresenter::new().quiet())?;

    reported(session.refresh().await)?;
    match reported(session.rename(id, &title).await)? {
        RenameOutcome::Renamed => println!("{id}\t{title}"),
        RenameOutcome::Unchanged => println!("Title unchanged"),
    }
    Ok(())
}
