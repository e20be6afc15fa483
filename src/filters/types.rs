//! Filter rule and statement types
//!
//! A `FilterRule` pairs a field key with a `Predicate`. The predicate is a
//! sum type over field-type categories, each carrying its own operator
//! enum, so only operator/field-type combinations Knack accepts can be
//! built. Rules serialize to Knack's wire shape:
//!
//! ```json
//! {"field": "field_1", "field_name": "Short Text", "operator": "contains", "value": "Ada"}
//! ```
//!
//! `field_name` is always written; parsing requires it to recover the
//! operator set.

use super::operators::{
    AddressOperator, BlankOperator, BooleanOperator, ChoiceOperator, DateTimeOperator,
    NumberOperator, TextOperator,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Field Types
// ============================================================================

/// Concrete Knack field types that can be filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    ShortText,
    ParagraphText,
    YesNo,
    MultipleChoice,
    DateTime,
    Number,
    Image,
    File,
    Address,
    Name,
    Link,
    Email,
    Phone,
    RichText,
    Currency,
    AutoIncrement,
    Timer,
    Rating,
    TextFormula,
    Signature,
}

impl FieldType {
    pub const ALL: &'static [FieldType] = &[
        FieldType::ShortText,
        FieldType::ParagraphText,
        FieldType::YesNo,
        FieldType::MultipleChoice,
        FieldType::DateTime,
        FieldType::Number,
        FieldType::Image,
        FieldType::File,
        FieldType::Address,
        FieldType::Name,
        FieldType::Link,
        FieldType::Email,
        FieldType::Phone,
        FieldType::RichText,
        FieldType::Currency,
        FieldType::AutoIncrement,
        FieldType::Timer,
        FieldType::Rating,
        FieldType::TextFormula,
        FieldType::Signature,
    ];

    /// Display name, sent as the `field_name` hint
    pub fn name(self) -> &'static str {
        match self {
            FieldType::ShortText => "Short Text",
            FieldType::ParagraphText => "Paragraph Text",
            FieldType::YesNo => "Yes/No",
            FieldType::MultipleChoice => "Multiple Choice",
            FieldType::DateTime => "Date/Time",
            FieldType::Number => "Number",
            FieldType::Image => "Image",
            FieldType::File => "File",
            FieldType::Address => "Address",
            FieldType::Name => "Name",
            FieldType::Link => "Link",
            FieldType::Email => "Email",
            FieldType::Phone => "Phone",
            FieldType::RichText => "Rich Text",
            FieldType::Currency => "Currency",
            FieldType::AutoIncrement => "Auto Increment",
            FieldType::Timer => "Timer",
            FieldType::Rating => "Rating",
            FieldType::TextFormula => "Text Formula",
            FieldType::Signature => "Signature",
        }
    }

    /// The operator category this field type belongs to
    pub fn kind(self) -> FieldKind {
        match self {
            FieldType::ShortText => FieldKind::Text(TextField::ShortText),
            FieldType::ParagraphText => FieldKind::Text(TextField::ParagraphText),
            FieldType::Name => FieldKind::Text(TextField::Name),
            FieldType::Link => FieldKind::Text(TextField::Link),
            FieldType::Email => FieldKind::Text(TextField::Email),
            FieldType::Phone => FieldKind::Text(TextField::Phone),
            FieldType::RichText => FieldKind::Text(TextField::RichText),
            FieldType::Currency => FieldKind::Text(TextField::Currency),
            FieldType::AutoIncrement => FieldKind::Text(TextField::AutoIncrement),
            FieldType::TextFormula => FieldKind::Text(TextField::TextFormula),
            FieldType::YesNo => FieldKind::YesNo,
            FieldType::MultipleChoice => FieldKind::MultipleChoice,
            FieldType::DateTime => FieldKind::DateTime,
            FieldType::Number => FieldKind::Numeric(NumericField::Number),
            FieldType::Timer => FieldKind::Numeric(NumericField::Timer),
            FieldType::Rating => FieldKind::Numeric(NumericField::Rating),
            FieldType::Image => FieldKind::Attachment(AttachmentField::Image),
            FieldType::File => FieldKind::Attachment(AttachmentField::File),
            FieldType::Signature => FieldKind::Attachment(AttachmentField::Signature),
            FieldType::Address => FieldKind::Address,
        }
    }

    /// Operator strings accepted for this field type
    pub fn operators(self) -> Vec<&'static str> {
        match self.kind() {
            FieldKind::Text(_) => TextOperator::ALL.iter().map(|o| o.as_str()).collect(),
            FieldKind::YesNo => BooleanOperator::ALL.iter().map(|o| o.as_str()).collect(),
            FieldKind::MultipleChoice => ChoiceOperator::ALL.iter().map(|o| o.as_str()).collect(),
            FieldKind::DateTime => DateTimeOperator::ALL.iter().map(|o| o.as_str()).collect(),
            FieldKind::Numeric(_) => NumberOperator::ALL.iter().map(|o| o.as_str()).collect(),
            FieldKind::Attachment(_) => BlankOperator::ALL.iter().map(|o| o.as_str()).collect(),
            FieldKind::Address => AddressOperator::ALL.iter().map(|o| o.as_str()).collect(),
        }
    }
}

impl FromStr for FieldType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FieldType::ALL
            .iter()
            .copied()
            .find(|t| t.name() == s)
            .ok_or_else(|| Error::invalid_filter(format!("unknown field type '{s}'")))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operator category of a field type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text(TextField),
    YesNo,
    MultipleChoice,
    DateTime,
    Numeric(NumericField),
    Attachment(AttachmentField),
    Address,
}

/// Field types filtered with `TextOperator`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    ShortText,
    ParagraphText,
    Name,
    Link,
    Email,
    Phone,
    RichText,
    Currency,
    AutoIncrement,
    TextFormula,
}

impl From<TextField> for FieldType {
    fn from(field: TextField) -> Self {
        match field {
            TextField::ShortText => FieldType::ShortText,
            TextField::ParagraphText => FieldType::ParagraphText,
            TextField::Name => FieldType::Name,
            TextField::Link => FieldType::Link,
            TextField::Email => FieldType::Email,
            TextField::Phone => FieldType::Phone,
            TextField::RichText => FieldType::RichText,
            TextField::Currency => FieldType::Currency,
            TextField::AutoIncrement => FieldType::AutoIncrement,
            TextField::TextFormula => FieldType::TextFormula,
        }
    }
}

/// Field types filtered with `NumberOperator`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Number,
    Timer,
    Rating,
}

impl From<NumericField> for FieldType {
    fn from(field: NumericField) -> Self {
        match field {
            NumericField::Number => FieldType::Number,
            NumericField::Timer => FieldType::Timer,
            NumericField::Rating => FieldType::Rating,
        }
    }
}

/// Field types filtered with `BlankOperator`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentField {
    Image,
    File,
    Signature,
}

impl From<AttachmentField> for FieldType {
    fn from(field: AttachmentField) -> Self {
        match field {
            AttachmentField::Image => FieldType::Image,
            AttachmentField::File => FieldType::File,
            AttachmentField::Signature => FieldType::Signature,
        }
    }
}

// ============================================================================
// Values
// ============================================================================

/// Comparison value of a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl FilterValue {
    /// Build a numeric value; `None` for NaN or infinite input
    pub fn from_f64(value: f64) -> Option<Self> {
        serde_json::Number::from_f64(value).map(FilterValue::Number)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Number(value.into())
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        FilterValue::Number(value.into())
    }
}

impl From<u64> for FilterValue {
    fn from(value: u64) -> Self {
        FilterValue::Number(value.into())
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

/// Range of a relative date/time rule, e.g. the `3` in "is during the previous 3 weeks"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeValue {
    Number(serde_json::Number),
    Text(String),
}

impl From<i32> for RangeValue {
    fn from(value: i32) -> Self {
        RangeValue::Number(value.into())
    }
}

impl From<u32> for RangeValue {
    fn from(value: u32) -> Self {
        RangeValue::Number(value.into())
    }
}

impl From<i64> for RangeValue {
    fn from(value: i64) -> Self {
        RangeValue::Number(value.into())
    }
}

impl From<&str> for RangeValue {
    fn from(value: &str) -> Self {
        RangeValue::Text(value.to_string())
    }
}

impl From<String> for RangeValue {
    fn from(value: String) -> Self {
        RangeValue::Text(value)
    }
}

/// Unit of a relative date/time range, sent as `type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeUnit {
    Days,
    Weeks,
    Months,
    Years,
    #[serde(rename = "")]
    Unset,
}

// ============================================================================
// Predicates
// ============================================================================

/// Field-type category together with an operator legal for it
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Text {
        field_type: TextField,
        operator: TextOperator,
    },
    YesNo(BooleanOperator),
    MultipleChoice(ChoiceOperator),
    DateTime {
        operator: DateTimeOperator,
        range: Option<RangeValue>,
        unit: Option<RangeUnit>,
    },
    Numeric {
        field_type: NumericField,
        operator: NumberOperator,
    },
    Attachment {
        field_type: AttachmentField,
        operator: BlankOperator,
    },
    Address(AddressOperator),
}

impl Predicate {
    /// Parse an operator string against the operator set of `field_type`
    pub fn parse(field_type: FieldType, operator: &str) -> Result<Self> {
        let predicate = match field_type.kind() {
            FieldKind::Text(field_type) => Predicate::Text {
                field_type,
                operator: operator.parse()?,
            },
            FieldKind::YesNo => Predicate::YesNo(operator.parse()?),
            FieldKind::MultipleChoice => Predicate::MultipleChoice(operator.parse()?),
            FieldKind::DateTime => Predicate::DateTime {
                operator: operator.parse()?,
                range: None,
                unit: None,
            },
            FieldKind::Numeric(field_type) => Predicate::Numeric {
                field_type,
                operator: operator.parse()?,
            },
            FieldKind::Attachment(field_type) => Predicate::Attachment {
                field_type,
                operator: operator.parse()?,
            },
            FieldKind::Address => Predicate::Address(operator.parse()?),
        };
        Ok(predicate)
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            Predicate::Text { field_type, .. } => (*field_type).into(),
            Predicate::YesNo(_) => FieldType::YesNo,
            Predicate::MultipleChoice(_) => FieldType::MultipleChoice,
            Predicate::DateTime { .. } => FieldType::DateTime,
            Predicate::Numeric { field_type, .. } => (*field_type).into(),
            Predicate::Attachment { field_type, .. } => (*field_type).into(),
            Predicate::Address(_) => FieldType::Address,
        }
    }

    /// Wire string of the operator
    pub fn operator(&self) -> &'static str {
        match self {
            Predicate::Text { operator, .. } => operator.as_str(),
            Predicate::YesNo(operator) => operator.as_str(),
            Predicate::MultipleChoice(operator) => operator.as_str(),
            Predicate::DateTime { operator, .. } => operator.as_str(),
            Predicate::Numeric { operator, .. } => operator.as_str(),
            Predicate::Attachment { operator, .. } => operator.as_str(),
            Predicate::Address(operator) => operator.as_str(),
        }
    }
}

// ============================================================================
// Rules
// ============================================================================

/// One field-level condition of a filter statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireRule", into = "WireRule")]
pub struct FilterRule {
    /// Field key, e.g. `field_1`
    pub field: String,
    pub predicate: Predicate,
    pub value: Option<FilterValue>,
}

impl FilterRule {
    fn with(field: impl Into<String>, predicate: Predicate) -> Self {
        Self {
            field: field.into(),
            predicate,
            value: None,
        }
    }

    pub fn text(field: impl Into<String>, field_type: TextField, operator: TextOperator) -> Self {
        Self::with(field, Predicate::Text { field_type, operator })
    }

    pub fn yes_no(field: impl Into<String>, operator: BooleanOperator) -> Self {
        Self::with(field, Predicate::YesNo(operator))
    }

    pub fn multiple_choice(field: impl Into<String>, operator: ChoiceOperator) -> Self {
        Self::with(field, Predicate::MultipleChoice(operator))
    }

    pub fn date_time(field: impl Into<String>, operator: DateTimeOperator) -> Self {
        Self::with(
            field,
            Predicate::DateTime {
                operator,
                range: None,
                unit: None,
            },
        )
    }

    /// Relative date/time rule such as "is during the previous 3 weeks"
    ///
    /// Fails unless `operator` is one of the relative operators.
    pub fn relative_date(
        field: impl Into<String>,
        operator: DateTimeOperator,
        range: impl Into<RangeValue>,
        unit: RangeUnit,
    ) -> Result<Self> {
        if !operator.is_relative() {
            return Err(Error::invalid_filter(format!(
                "operator '{operator}' does not take a range"
            )));
        }
        Ok(Self::with(
            field,
            Predicate::DateTime {
                operator,
                range: Some(range.into()),
                unit: Some(unit),
            },
        ))
    }

    pub fn numeric(field: impl Into<String>, field_type: NumericField, operator: NumberOperator) -> Self {
        Self::with(field, Predicate::Numeric { field_type, operator })
    }

    pub fn attachment(
        field: impl Into<String>,
        field_type: AttachmentField,
        operator: BlankOperator,
    ) -> Self {
        Self::with(field, Predicate::Attachment { field_type, operator })
    }

    pub fn address(field: impl Into<String>, operator: AddressOperator) -> Self {
        Self::with(field, Predicate::Address(operator))
    }

    /// Build a rule from an operator string, checked against `field_type`
    pub fn parse(field: impl Into<String>, field_type: FieldType, operator: &str) -> Result<Self> {
        Ok(Self::with(field, Predicate::parse(field_type, operator)?))
    }

    /// Set the comparison value
    #[must_use]
    pub fn value(mut self, value: impl Into<FilterValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn field_type(&self) -> FieldType {
        self.predicate.field_type()
    }

    /// Check the field key is set and range data only rides on relative operators
    pub fn validate(&self) -> Result<()> {
        if self.field.trim().is_empty() {
            return Err(Error::invalid_filter("rule field key must not be empty"));
        }

        if let Predicate::DateTime {
            operator,
            range,
            unit,
        } = &self.predicate
        {
            if !operator.is_relative() && (range.is_some() || unit.is_some()) {
                return Err(Error::invalid_filter(format!(
                    "operator '{operator}' does not take a range"
                )));
            }
        }

        Ok(())
    }
}

/// Knack's JSON shape of a rule
#[derive(Debug, Serialize, Deserialize)]
struct WireRule {
    field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    field_name: Option<String>,
    operator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<FilterValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    range: Option<RangeValue>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    unit: Option<RangeUnit>,
}

impl TryFrom<WireRule> for FilterRule {
    type Error = Error;

    fn try_from(wire: WireRule) -> Result<Self> {
        let field_type: FieldType = wire
            .field_name
            .as_deref()
            .ok_or_else(|| {
                Error::invalid_filter(format!(
                    "rule on '{}' has no field_name to determine its operator set",
                    wire.field
                ))
            })?
            .parse()?;

        let mut predicate = Predicate::parse(field_type, &wire.operator)?;

        if wire.range.is_some() || wire.unit.is_some() {
            match &mut predicate {
                Predicate::DateTime { range, unit, .. } => {
                    *range = wire.range;
                    *unit = wire.unit;
                }
                _ => {
                    return Err(Error::invalid_filter(format!(
                        "range is only valid on Date/Time rules, not {field_type}"
                    )))
                }
            }
        }

        let rule = FilterRule {
            field: wire.field,
            predicate,
            value: wire.value,
        };
        rule.validate()?;
        Ok(rule)
    }
}

impl From<FilterRule> for WireRule {
    fn from(rule: FilterRule) -> Self {
        let field_name = Some(rule.field_type().name().to_string());
        let operator = rule.predicate.operator().to_string();
        let (range, unit) = match rule.predicate {
            Predicate::DateTime { range, unit, .. } => (range, unit),
            _ => (None, None),
        };

        WireRule {
            field: rule.field,
            field_name,
            operator,
            value: rule.value,
            range,
            unit,
        }
    }
}

// ============================================================================
// Statements
// ============================================================================

/// How the rules of a statement combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Match {
    /// Every rule must hold
    #[default]
    And,
    /// Any rule may hold
    Or,
}

/// A boolean combination of rules, sent as the `filters` query parameter
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterStatement {
    /// Combinator; `and` when omitted
    #[serde(rename = "match", default)]
    pub combinator: Match,
    pub rules: Vec<FilterRule>,
}

impl FilterStatement {
    pub fn new(combinator: Match) -> Self {
        Self {
            combinator,
            rules: Vec::new(),
        }
    }

    /// Statement matching records that satisfy every rule
    pub fn all(rules: impl IntoIterator<Item = FilterRule>) -> Self {
        Self {
            combinator: Match::And,
            rules: rules.into_iter().collect(),
        }
    }

    /// Statement matching records that satisfy any rule
    pub fn any(rules: impl IntoIterator<Item = FilterRule>) -> Self {
        Self {
            combinator: Match::Or,
            rules: rules.into_iter().collect(),
        }
    }

    /// Append a rule
    #[must_use]
    pub fn rule(mut self, rule: FilterRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn push(&mut self, rule: FilterRule) {
        self.rules.push(rule);
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        self.rules.iter().try_for_each(FilterRule::validate)
    }

    /// JSON-encode the statement for the `filters` query parameter
    pub fn to_query_value(&self) -> Result<String> {
        self.validate()?;
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a statement previously produced by `to_query_value`
    pub fn from_query_value(value: &str) -> Result<Self> {
        serde_json::from_str(value).map_err(|e| Error::invalid_filter(e.to_string()))
    }
}
