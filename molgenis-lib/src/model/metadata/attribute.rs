//! Attribute metadata types

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use super::EntityType;
use super::LocalizedText;
use super::Tag;
use crate::model::Entity;

/// Metadata for one attribute (column) of an entity type.
///
/// Aggregate responses describe their axes with the same shape, usually
/// with far fewer fields filled in, so only `name` is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    #[serde(default)]
    pub id: Option<String>,

    pub name: String,

    /// The entity type this attribute belongs to.
    #[serde(default)]
    pub entity: Option<Box<EntityType>>,

    #[serde(default)]
    pub sequence_nr: Option<i32>,

    /// The data type; the v2 metadata endpoints call this `fieldType`.
    #[serde(default, rename = "type", alias = "fieldType")]
    pub attribute_type: Option<AttributeType>,

    #[serde(default)]
    pub is_id_attribute: Option<bool>,
    #[serde(default)]
    pub is_label_attribute: Option<bool>,
    #[serde(default)]
    pub lookup_attribute_index: Option<i32>,

    /// The compound attribute this attribute is nested in.
    #[serde(default)]
    pub parent: Option<Box<Attribute>>,
    /// Attributes nested in this compound attribute.
    #[serde(default)]
    pub children: Option<Vec<Attribute>>,

    /// Target entity type of reference attributes.
    #[serde(default)]
    pub ref_entity_type: Option<Box<EntityType>>,
    #[serde(default)]
    pub is_cascade_delete: Option<bool>,
    /// The owning side of a one-to-many relation.
    #[serde(default)]
    pub mapped_by: Option<Box<Attribute>>,
    #[serde(default)]
    pub order_by: Option<String>,

    #[serde(default)]
    pub expression: Option<String>,
    #[serde(default)]
    pub is_nullable: Option<bool>,
    #[serde(default)]
    pub is_auto: Option<bool>,
    #[serde(default)]
    pub is_visible: Option<bool>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_aggregatable: Option<bool>,
    /// Comma-separated options of `enum` attributes.
    #[serde(default)]
    pub enum_options: Option<String>,
    #[serde(default)]
    pub range_min: Option<i64>,
    #[serde(default)]
    pub range_max: Option<i64>,
    #[serde(default)]
    pub is_read_only: Option<bool>,
    #[serde(default)]
    pub is_unique: Option<bool>,
    #[serde(default)]
    pub tags: Option<Vec<Tag>>,
    #[serde(default)]
    pub nullable_expression: Option<String>,
    #[serde(default)]
    pub visible_expression: Option<String>,
    #[serde(default)]
    pub validation_expression: Option<String>,
    #[serde(default)]
    pub default_value: Option<String>,

    #[serde(flatten)]
    pub i18n: LocalizedText,
}

impl Attribute {
    /// Returns `true` for attributes that reference rows of another entity type.
    pub fn is_reference(&self) -> bool {
        self.attribute_type.is_some_and(AttributeType::is_reference)
    }

    /// Returns the options of an `enum` attribute.
    pub fn enum_values(&self) -> Vec<&str> {
        self.enum_options
            .as_deref()
            .map(|options| options.split(',').map(str::trim).collect())
            .unwrap_or_default()
    }
}

impl Entity for Attribute {
    const ENTITY_NAME: &'static str = "sys_md_Attribute";

    /// The attribute id, or its name when the row carries no id.
    fn id(&self) -> String {
        self.id.clone().unwrap_or_else(|| self.name.clone())
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

/// The data type of an attribute.
///
/// Decoding ignores case and underscores, so both the `sys_md_Attribute`
/// spelling (`categoricalmref`) and the v2 metadata spelling
/// (`CATEGORICAL_MREF`) are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Bool,
    Categorical,
    CategoricalMref,
    Compound,
    Date,
    DateTime,
    Decimal,
    Email,
    Enum,
    File,
    Html,
    Hyperlink,
    Int,
    Long,
    Mref,
    OneToMany,
    Script,
    String,
    Text,
    Xref,
}

impl AttributeType {
    /// The lowercase name used by `sys_md_Attribute`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::Bool => "bool",
            AttributeType::Categorical => "categorical",
            AttributeType::CategoricalMref => "categoricalmref",
            AttributeType::Compound => "compound",
            AttributeType::Date => "date",
            AttributeType::DateTime => "datetime",
            AttributeType::Decimal => "decimal",
            AttributeType::Email => "email",
            AttributeType::Enum => "enum",
            AttributeType::File => "file",
            AttributeType::Html => "html",
            AttributeType::Hyperlink => "hyperlink",
            AttributeType::Int => "int",
            AttributeType::Long => "long",
            AttributeType::Mref => "mref",
            AttributeType::OneToMany => "onetomany",
            AttributeType::Script => "script",
            AttributeType::String => "string",
            AttributeType::Text => "text",
            AttributeType::Xref => "xref",
        }
    }

    /// Returns `true` for types whose values are rows of another entity type.
    pub fn is_reference(self) -> bool {
        matches!(
            self,
            AttributeType::Categorical
                | AttributeType::CategoricalMref
                | AttributeType::File
                | AttributeType::Mref
                | AttributeType::OneToMany
                | AttributeType::Xref
        )
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let parsed = match normalized.as_str() {
            "bool" | "boolean" => AttributeType::Bool,
            "categorical" => AttributeType::Categorical,
            "categoricalmref" => AttributeType::CategoricalMref,
            "compound" => AttributeType::Compound,
            "date" => AttributeType::Date,
            "datetime" => AttributeType::DateTime,
            "decimal" => AttributeType::Decimal,
            "email" => AttributeType::Email,
            "enum" => AttributeType::Enum,
            "file" => AttributeType::File,
            "html" => AttributeType::Html,
            "hyperlink" => AttributeType::Hyperlink,
            "int" => AttributeType::Int,
            "long" => AttributeType::Long,
            "mref" => AttributeType::Mref,
            "onetomany" => AttributeType::OneToMany,
            "script" => AttributeType::Script,
            "string" => AttributeType::String,
            "text" => AttributeType::Text,
            "xref" => AttributeType::Xref,
            _ => return Err(format!("unknown attribute type '{s}'")),
        };
        Ok(parsed)
    }
}

impl Serialize for AttributeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AttributeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = std::string::String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
