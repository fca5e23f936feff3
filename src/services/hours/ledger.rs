use anyhow::Result;
use async_trait::async_trait;

use crate::models::hours::{HoursEntry, HoursFilter, Page};

/// Remote ledger of hour credits.
///
/// `list` is offset-paginated; callers keep reading until a page comes back
/// shorter than the requested limit.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HoursLedger: Send + Sync {
    async fn list(&self, filter: &HoursFilter, page: Page) -> Result<Vec<HoursEntry>>;

    async fn create(&self, entry: HoursEntry) -> Result<HoursEntry>;

    async fn delete(&self, id: i64) -> Result<()>;
}
