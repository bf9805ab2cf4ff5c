//! Health command implementation.

use crate::error::Result;
use crate::output::Formatter;
use credify_sdk::CredifyClient;

/// Execute the health command.
pub async fn execute_health(client: &CredifyClient, formatter: &Formatter) -> Result<()> {
    let health = client.check_health().await?;
    println!("{}", formatter.health(client.base_url(), &health)?);
    Ok(())
}
