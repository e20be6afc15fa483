//! Filter operators
//!
//! One enum per field-type category. Each enum lists exactly the operator
//! strings Knack accepts for that category, so an operator that a field
//! type does not support cannot be constructed.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

macro_rules! operator_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every operator of this category, in Knack's documented order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire string expected by Knack
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(Error::invalid_filter(format!(
                        "operator '{}' is not valid for {}",
                        other,
                        stringify!($name)
                    ))),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

operator_enum! {
    /// Operators for text-like fields
    TextOperator {
        Contains => "contains",
        DoesNotContain => "does not contain",
        Is => "is",
        IsNot => "is not",
        StartsWith => "starts with",
        EndsWith => "ends with",
        IsBlank => "is blank",
        IsNotBlank => "is not blank",
    }
}

operator_enum! {
    /// Operators for Yes/No fields
    BooleanOperator {
        Is => "is",
        IsNot => "is not",
        IsBlank => "is blank",
        IsNotBlank => "is not blank",
    }
}

operator_enum! {
    /// Operators for Multiple Choice fields
    ChoiceOperator {
        Is => "is",
        IsNot => "is not",
        Contains => "contains",
        DoesNotContain => "does not contain",
        IsAny => "is any",
        IsBlank => "is blank",
        IsNotBlank => "is not blank",
    }
}

operator_enum! {
    /// Operators for Date/Time fields
    DateTimeOperator {
        Is => "is",
        IsNot => "is not",
        IsDuringTheCurrent => "is during the current",
        IsDuringThePrevious => "is during the previous",
        IsDuringTheNext => "is during the next",
        IsBeforeThePrevious => "is before the previous",
        IsAfterTheNext => "is after the next",
        IsBefore => "is before",
        IsAfter => "is after",
        IsToday => "is today",
        IsTodayOrBefore => "is today or before",
        IsTodayOrAfter => "is today or after",
        IsBeforeToday => "is before today",
        IsAfterToday => "is after today",
        IsBeforeCurrentTime => "is before current time",
        IsAfterCurrentTime => "is after current time",
        IsBlank => "is blank",
        IsNotBlank => "is not blank",
    }
}

impl DateTimeOperator {
    /// Relative operators take a `range` and a unit (`type`)
    pub fn is_relative(self) -> bool {
        matches!(
            self,
            DateTimeOperator::IsDuringTheCurrent
                | DateTimeOperator::IsDuringThePrevious
                | DateTimeOperator::IsDuringTheNext
                | DateTimeOperator::IsBeforeThePrevious
                | DateTimeOperator::IsAfterTheNext
        )
    }
}

operator_enum! {
    /// Operators for Number, Timer and Rating fields
    NumberOperator {
        Is => "is",
        IsNot => "is not",
        HigherThan => "higher than",
        LowerThan => "lower than",
        IsBlank => "is blank",
        IsNotBlank => "is not blank",
    }
}

operator_enum! {
    /// Operators for Image, File and Signature fields
    BlankOperator {
        IsBlank => "is blank",
        IsNotBlank => "is not blank",
    }
}

operator_enum! {
    /// Operators for Address fields
    AddressOperator {
        Contains => "contains",
        DoesNotContain => "does not contain",
        Is => "is",
        IsNot => "is not",
        StartsWith => "starts with",
        EndsWith => "ends with",
        IsBlank => "is blank",
        IsNotBlank => "is not blank",
        Near => "near",
    }
}
