use tracing::{debug, error};

use crate::error::{RebuildError, Result};

/// Sanity check against truncated or reformatted upstream sources.
pub fn ensure_minimum(table: &str, count: usize, minimum: usize) -> Result<()> {
    if count < minimum {
        error!(table, count, minimum, "entry count below threshold");
        return Err(RebuildError::InsufficientEntries {
            table: table.to_string(),
            count,
            minimum,
        });
    }
    debug!(table, count, minimum, "entry count ok");
    Ok(())
}
