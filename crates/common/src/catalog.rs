//! Closed enumerations stored alongside catalog rows
//!
//! Each enum is persisted and serialized as its upper-snake name, the same
//! text the CSV templates carry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Hardware category of a TMP model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModelCategory {
    Controller,
    Sensor,
    Actuator,
    Gateway,
    Display,
    Other,
}

impl ModelCategory {
    pub const ALL: [ModelCategory; 6] = [
        ModelCategory::Controller,
        ModelCategory::Sensor,
        ModelCategory::Actuator,
        ModelCategory::Gateway,
        ModelCategory::Display,
        ModelCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelCategory::Controller => "CONTROLLER",
            ModelCategory::Sensor => "SENSOR",
            ModelCategory::Actuator => "ACTUATOR",
            ModelCategory::Gateway => "GATEWAY",
            ModelCategory::Display => "DISPLAY",
            ModelCategory::Other => "OTHER",
        }
    }
}

/// Value type of a configurable parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParameterDataType {
    Number,
    String,
    Boolean,
    Enum,
}

impl ParameterDataType {
    pub const ALL: [ParameterDataType; 4] = [
        ParameterDataType::Number,
        ParameterDataType::String,
        ParameterDataType::Boolean,
        ParameterDataType::Enum,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterDataType::Number => "NUMBER",
            ParameterDataType::String => "STRING",
            ParameterDataType::Boolean => "BOOLEAN",
            ParameterDataType::Enum => "ENUM",
        }
    }
}

/// Where a catalog fact was sourced from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    OfficialDocs,
    Datasheet,
    Community,
    Manual,
}

impl SourceType {
    pub const ALL: [SourceType; 4] = [
        SourceType::OfficialDocs,
        SourceType::Datasheet,
        SourceType::Community,
        SourceType::Manual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::OfficialDocs => "OFFICIAL_DOCS",
            SourceType::Datasheet => "DATASHEET",
            SourceType::Community => "COMMUNITY",
            SourceType::Manual => "MANUAL",
        }
    }
}

macro_rules! text_enum {
    ($ty:ty, $column:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::ALL
                    .into_iter()
                    .find(|variant| variant.as_str() == s)
                    .ok_or_else(|| {
                        let expected: Vec<&str> = <$ty>::ALL.iter().map(|v| v.as_str()).collect();
                        Error::invalid_value($column, s, format!("expected one of {}", expected.join(", ")))
                    })
            }
        }
    };
}

text_enum!(ModelCategory, "category");
text_enum!(ParameterDataType, "dataType");
text_enum!(SourceType, "sourceType");
