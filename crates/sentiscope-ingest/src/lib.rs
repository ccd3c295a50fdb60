//! Input loading for sentiscope: typed text, `.txt` files and `.csv` files.

pub mod error;
pub mod input;
pub mod table;
pub mod text;

pub use error::IngestError;
pub use input::{load_input, preview_input, Corpus, InputKind, LoadedInput, Preview};
pub use table::{ColumnSelection, KeyedDocuments, TablePreview};
pub use text::{decode_text, documents_from_text, split_lines, DecodedText, TextEncoding};
