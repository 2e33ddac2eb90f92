//! Package metadata

use serde::Deserialize;
use serde::Serialize;

use super::EntityType;
use super::Tag;
use crate::model::Entity;

/// A namespace grouping entity types, possibly nested in a parent package.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent: Option<Box<Package>>,
    #[serde(default)]
    pub children: Option<Vec<Package>>,
    #[serde(default)]
    pub entity_types: Option<Vec<EntityType>>,
    #[serde(default)]
    pub tags: Option<Vec<Tag>>,
}

impl Package {
    /// Returns `true` for top-level packages.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

impl Entity for Package {
    const ENTITY_NAME: &'static str = "sys_md_Package";

    fn id(&self) -> String {
        self.id.clone()
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}
