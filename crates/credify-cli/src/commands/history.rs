//! History command implementation.

use crate::cli::HistoryArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::view::HistoryScreen;
use credify_sdk::CredifyClient;
use tracing::{debug, info};

/// Mount a history screen and run its initial fetch.
pub async fn load_history(client: &CredifyClient, limit: usize, formatter: &Formatter) -> HistoryScreen {
    let (mut screen, ticket) = HistoryScreen::mount();

    if formatter.shows_progress() {
        match formatter.render_history(&screen) {
            Ok(progress) => eprintln!("{}", progress),
            Err(e) => debug!(error = %e, "Progress message not rendered"),
        }
    }

    info!(limit, "Loading history");
    let result = client.get_history(limit).await;
    screen.settle(ticket, result);
    screen
}

/// Execute the history command.
pub async fn execute_history(
    args: HistoryArgs,
    client: &CredifyClient,
    default_limit: usize,
    formatter: &Formatter,
) -> Result<HistoryScreen> {
    let limit = args.limit.unwrap_or(default_limit);
    if limit == 0 {
        return Err(CliError::InvalidInput("Limit must be at least 1".to_string()));
    }

    let screen = load_history(client, limit, formatter).await;
    println!("{}", formatter.render_history(&screen)?);

    Ok(screen)
}
