//! Record store: the owned, persisted list behind each panel.

mod record;
mod record_store;

pub use record::Record;
pub use record_store::{RecordStore, Subscription, decode_records};
