//! Official Knowledge Store: curated contacts, addresses, fees,
//! requirements and procedures.

mod records;
mod render;
mod store;

pub use records::{field_text, list_field, load_collection, Collection, Record, RecordCollection};
pub use render::render_records;
pub use store::{CollectionStats, OfficialStore, MAX_MATCHES};
