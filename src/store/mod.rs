pub mod error;
pub mod ids;
pub mod record_store;
pub mod repositories;
pub mod table;

pub use error::StoreError;
pub use record_store::RecordStore;
pub use table::Table;
