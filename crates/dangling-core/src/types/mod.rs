mod finding;
mod inventory;
mod record;
mod summary;
mod zone;

pub use finding::*;
pub use inventory::*;
pub use record::*;
pub use summary::*;
pub use zone::*;

/// Normalize a DNS name for comparison: trimmed, lowercase, no root dot.
#[must_use]
pub fn normalize_dns_name(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}
