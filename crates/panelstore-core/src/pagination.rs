//! Page metadata for paginated scans
//!
//! Pages are 1-based. `page_number` and `limit` must both be at least 1;
//! [`page_offset`] is the single place that rejects anything else, so the
//! calculator itself never sees invalid input.

use serde::{Deserialize, Serialize};

use crate::errors::{PanelError, Result};

/// Navigation metadata for one page of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page_size: usize,
    pub current_page: usize,
    pub total_records: usize,
    pub next_page: Option<usize>,
    pub previous_page: Option<usize>,
}

impl PageInfo {
    /// Compute next/previous page links
    ///
    /// - `next_page` is `page_number + 1` iff `page_number * limit < total_records`
    /// - `previous_page` is `page_number - 1` iff `page_number > 1`
    pub fn compute(limit: usize, page_number: usize, total_records: usize) -> Self {
        let next_page = if page_number.saturating_mul(limit) < total_records {
            Some(page_number + 1)
        } else {
            None
        };
        let previous_page = if page_number > 1 {
            Some(page_number - 1)
        } else {
            None
        };

        Self {
            page_size: limit,
            current_page: page_number,
            total_records,
            next_page,
            previous_page,
        }
    }
}

/// One page of records together with its navigation metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    #[serde(flatten)]
    pub page: PageInfo,
    pub records: Vec<T>,
}

/// Validate a page request and return the row offset of its first record
///
/// # Errors
///
/// `InvalidArgument` when `limit` or `page_number` is zero, or when the
/// offset does not fit in `usize`. Values are never clamped.
pub fn page_offset(limit: usize, page_number: usize) -> Result<usize> {
    if limit == 0 {
        return Err(PanelError::InvalidArgument {
            reason: "limit must be at least 1".to_string(),
        });
    }
    if page_number == 0 {
        return Err(PanelError::InvalidArgument {
            reason: "page_number must be at least 1".to_string(),
        });
    }
    (page_number - 1)
        .checked_mul(limit)
        .ok_or_else(|| PanelError::InvalidArgument {
            reason: format!("page {} of size {} overflows the row offset", page_number, limit),
        })
}
