//! Collection commands.

use super::{CommandError, Context, print_json, require_data};

/// Print every listed collection.
///
/// # Errors
///
/// Returns an error if no collections could be fetched.
pub async fn list(ctx: &Context) -> Result<(), CommandError> {
    let collections = require_data(ctx.client.get_collections().await)?;
    tracing::info!(count = collections.len(), "Fetched collections");
    print_json(&collections)
}
