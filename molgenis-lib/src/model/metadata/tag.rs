//! Ontology tags

use serde::Deserialize;
use serde::Serialize;

use crate::model::Entity;

/// A semantic annotation on a package, entity type or attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    #[serde(rename = "objectIRI", default)]
    pub object_iri: Option<String>,
    pub label: String,
    #[serde(rename = "relationIRI")]
    pub relation_iri: String,
    pub relation_label: String,
    #[serde(default)]
    pub code_system: Option<String>,
}

impl Entity for Tag {
    const ENTITY_NAME: &'static str = "sys_md_Tag";

    fn id(&self) -> String {
        self.id.clone()
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}
