//! Domain models for the bankfeed pipeline.

mod product;
mod record;

pub use product::{ProductKind, UnknownProductError};
pub use record::{ArchivedEvent, RawRecord};
