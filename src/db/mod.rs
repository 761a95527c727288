pub mod connection;
pub mod properties;

use crate::domain::property::PropertyRecord;
use crate::errors::AppResult;
use crate::search::query::PropertyQuery;

pub use connection::{init_db, Database};

/// The narrow database surface a search session depends on.
///
/// Implementations must release every statement and cursor before
/// `for_each_property` returns, on success and on error alike.
pub trait PropertyStore {
    /// Round-trips to the database to prove the connection is usable.
    fn ping(&self) -> AppResult<()>;

    /// Runs `query` and hands each decoded record to `visit`, in row order.
    /// Returns how many records were visited.
    fn for_each_property(
        &self,
        query: &PropertyQuery,
        visit: &mut dyn FnMut(PropertyRecord) -> AppResult<()>,
    ) -> AppResult<usize>;
}
