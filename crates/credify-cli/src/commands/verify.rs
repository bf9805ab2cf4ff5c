//! Verify command implementation.

use crate::cli::VerifyArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::view::VerifyScreen;
use credify_sdk::CredifyClient;
use tracing::{debug, info};

/// Submit `input` on `screen` and wait for the answer.
///
/// Returns false when the input was blank and nothing was sent.
pub async fn submit_claim(
    screen: &mut VerifyScreen,
    input: &str,
    client: &CredifyClient,
    formatter: &Formatter,
) -> bool {
    let Some((ticket, claim)) = screen.submit(input) else {
        return false;
    };

    if formatter.shows_progress() {
        match formatter.render_verify(screen) {
            Ok(progress) => eprintln!("{}", progress),
            Err(e) => debug!(error = %e, "Progress message not rendered"),
        }
    }

    info!(chars = claim.chars().count(), "Verifying claim");
    let result = client.verify_claim(&claim).await;
    screen.settle(ticket, result);
    true
}

/// Execute the verify command.
pub async fn execute_verify(
    args: VerifyArgs,
    client: &CredifyClient,
    formatter: &Formatter,
) -> Result<VerifyScreen> {
    let mut screen = VerifyScreen::new();

    if !submit_claim(&mut screen, &args.text(), client, formatter).await {
        return Err(CliError::InvalidInput("Claim text must not be empty".to_string()));
    }

    println!("{}", formatter.render_verify(&screen)?);

    Ok(screen)
}
