/// Log record parsing
///
/// Turns one raw FortiGate log line into an ordered [`FieldMap`].
///
/// # Architecture
///
/// - `tokenizer.rs`: key=value state machine anchored on the `date=` field
/// - `model.rs`: ordered field map with last-write-wins inserts
///
/// Lines that do not carry the anchor are not records; the tokenizer
/// reports them as `None` rather than as an error.

pub mod model;
pub mod tokenizer;

// Re-export commonly used types
pub use model::FieldMap;
pub use tokenizer::Tokenizer;

// Constants
pub const ANCHOR: &str = "date=";
pub const DEFAULT_DELIMITER: char = ' ';
pub const ASSIGNMENT: char = '=';
pub const QUOTE: char = '"';
