//! Persistence layer: record store primitives and the fill-gap upsert
//!
//! The engine consumes, but does not define, a storage contract of three
//! primitives (`find_one`, `insert`, `update`). `UpsertService` applies the
//! same fill-gap merge used in memory against stored rows, column by
//! column. There is deliberately no transactional isolation and no
//! optimistic-concurrency token here; callers needing correctness under
//! concurrent invocations must add a uniqueness constraint on
//! (transaction_id, identity_key) or serialize the upsert phase externally.

pub mod memory;
#[cfg(feature = "database")]
pub mod postgres;
pub mod store;
pub mod upsert;

pub use memory::MemoryRecordStore;
#[cfg(feature = "database")]
pub use postgres::PgRecordStore;
pub use store::{RecordStore, StoredRow};
pub use upsert::{PersistSummary, UpsertOutcome, UpsertService};
