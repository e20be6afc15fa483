//! Record filters
//!
//! Typed construction of the `filters` query parameter of record
//! listings. Filters are evaluated by Knack; this module only builds and
//! serializes them.
//!
//! ```rust
//! use knack_client::filters::{FilterRule, FilterStatement, TextField, TextOperator, NumericField, NumberOperator};
//!
//! let filters = FilterStatement::all([
//!     FilterRule::text("field_1", TextField::Email, TextOperator::EndsWith).value("@example.com"),
//!     FilterRule::numeric("field_7", NumericField::Number, NumberOperator::HigherThan).value(10),
//! ]);
//! let encoded = filters.to_query_value().unwrap();
//! assert!(encoded.starts_with(r#"{"match":"and","rules":["#));
//! ```

mod operators;
mod types;

pub use operators::{
    AddressOperator, BlankOperator, BooleanOperator, ChoiceOperator, DateTimeOperator,
    NumberOperator, TextOperator,
};
pub use types::{
    AttachmentField, FieldKind, FieldType, FilterRule, FilterStatement, FilterValue, Match,
    NumericField, Predicate, RangeUnit, RangeValue, TextField,
};
