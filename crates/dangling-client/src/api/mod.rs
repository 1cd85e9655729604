//! API endpoint modules.

mod inventory;
mod zones;

pub use inventory::InventoryApi;
pub use zones::{RecordSetPage, ZonesApi};

use tracing::warn;

/// Cursor to send with the next page request, or `None` when listing is over.
///
/// An empty cursor, or the same cursor that was just sent, ends the listing.
fn next_cursor(sent: Option<&str>, next: Option<String>) -> Option<String> {
    match next {
        Some(next) if next.is_empty() => None,
        Some(next) if sent == Some(next.as_str()) => {
            warn!(cursor = %next, "gateway repeated a page cursor, ending listing");
            None
        }
        next => next,
    }
}
