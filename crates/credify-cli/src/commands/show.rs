//! Show command implementation.

use crate::cli::ShowArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::view::{DetailScreen, RequestTicket};
use credify_sdk::CredifyClient;
use tracing::{debug, info};

/// Open a detail screen for `id` and fetch the record.
pub async fn open_detail(id: &str, client: &CredifyClient, formatter: &Formatter) -> DetailScreen {
    let (mut screen, ticket) = DetailScreen::open(id);
    if let Some(ticket) = ticket {
        fetch_detail(&mut screen, ticket, client, formatter).await;
    }
    screen
}

/// Point an existing detail screen at `id` and fetch the record.
pub async fn navigate_detail(screen: &mut DetailScreen, id: &str, client: &CredifyClient, formatter: &Formatter) {
    if let Some(ticket) = screen.navigate(id) {
        fetch_detail(screen, ticket, client, formatter).await;
    }
}

async fn fetch_detail(
    screen: &mut DetailScreen,
    ticket: RequestTicket,
    client: &CredifyClient,
    formatter: &Formatter,
) {
    if formatter.shows_progress() {
        match formatter.render_detail(screen) {
            Ok(progress) => eprintln!("{}", progress),
            Err(e) => debug!(error = %e, "Progress message not rendered"),
        }
    }

    info!(id = screen.id(), "Loading claim details");
    let result = client.get_history_detail(screen.id()).await;
    screen.settle(ticket, result);
}

/// Execute the show command.
pub async fn execute_show(args: ShowArgs, client: &CredifyClient, formatter: &Formatter) -> Result<DetailScreen> {
    let screen = open_detail(&args.id, client, formatter).await;
    println!("{}", formatter.render_detail(&screen)?);
    Ok(screen)
}
