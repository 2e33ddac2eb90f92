//! Entity type metadata

use serde::Deserialize;
use serde::Serialize;

use super::Attribute;
use super::LocalizedText;
use super::Package;
use super::Tag;
use crate::model::Entity;

/// Storage backend of an entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Backend {
    PostgreSQL,
    MySQL,
}

/// Metadata of an entity type (a table).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityType {
    /// Fully qualified id, e.g. `eu_bbmri_eric_biobanks`.
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub package: Option<Box<Package>>,
    #[serde(default)]
    pub attributes: Option<Vec<Attribute>>,
    #[serde(default)]
    pub is_abstract: bool,
    /// The abstract entity type this one inherits attributes from.
    #[serde(default)]
    pub extends: Option<Box<EntityType>>,
    #[serde(default)]
    pub tags: Option<Vec<Tag>>,
    #[serde(default)]
    pub backend: Option<Backend>,
    #[serde(default)]
    pub indexing_depth: Option<i32>,
    #[serde(flatten)]
    pub i18n: LocalizedText,
}

impl EntityType {
    /// Returns the id attribute, if the attributes were included.
    pub fn id_attribute(&self) -> Option<&Attribute> {
        self.attributes
            .as_ref()?
            .iter()
            .find(|a| a.is_id_attribute == Some(true))
    }

    /// Returns the label attribute, if the attributes were included.
    pub fn label_attribute(&self) -> Option<&Attribute> {
        self.attributes
            .as_ref()?
            .iter()
            .find(|a| a.is_label_attribute == Some(true))
    }

    /// Looks up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.as_ref()?.iter().find(|a| a.name == name)
    }
}

impl Entity for EntityType {
    const ENTITY_NAME: &'static str = "sys_md_EntityType";

    fn id(&self) -> String {
        self.id.clone()
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}
