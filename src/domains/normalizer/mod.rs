//! Response normalization.
//!
//! Upstream APIs return loosely typed, sometimes nested JSON in which any
//! field may be missing, null, or of an unexpected type. This module is the
//! boundary between those payloads and the fixed records and summaries the
//! tools return:
//!
//! - `shape.rs` - declarative field-mapping tables (`RecordShape`, `Field`, `Source`)
//! - `display.rs` - turning JSON values into bounded, single-line display text
//! - `normalize.rs` - applying a shape to one payload or to a list of payloads
//!
//! Normalization is total: every declared field is always populated, absent
//! values degrade to the field's fallback, and no input can make it fail.

mod display;
mod normalize;
mod shape;

pub use display::{LINE_CHAR_LIMIT, NOT_AVAILABLE, display_value, is_truthy, truncate_line};
pub use normalize::{
    Normalized, NormalizedSet, Normalizer, Record, data_list, lookup, normalize_collection,
    normalize_single,
};
pub use shape::{Fallback, Field, RecordShape, Source};
