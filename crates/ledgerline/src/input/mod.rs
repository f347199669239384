//! Row-record input: the raw-cell model and the CSV/JSON reader collaborator.

mod reader;
mod record;
mod source;

pub use reader::{ReaderConfig, RowReader, rows_from_json};
pub use record::{RawCell, RowRecord};
pub use source::SourceMetadata;
