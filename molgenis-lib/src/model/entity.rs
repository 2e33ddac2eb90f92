//! The contract every fetchable type implements

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A type that can be fetched from a MOLGENIS entity type.
///
/// The serde impls are the wire codec: every entity is decoded from and
/// encoded to the JSON the v2 API uses, with dates going through
/// [`codec::iso8601`](crate::model::codec::iso8601).
///
/// # Example
///
/// ```
/// use molgenis_lib::model::Entity;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Serialize, Deserialize)]
/// struct Biobank {
///     id: String,
///     name: String,
/// }
///
/// impl Entity for Biobank {
///     const ENTITY_NAME: &'static str = "eu_bbmri_eric_biobanks";
///
///     fn id(&self) -> String {
///         self.id.clone()
///     }
///
///     fn label(&self) -> String {
///         self.name.clone()
///     }
/// }
///
/// assert_eq!(Biobank::ENTITY_NAME, "eu_bbmri_eric_biobanks");
/// ```
pub trait Entity: Serialize + DeserializeOwned + Send + 'static {
    /// The entity type id used in resource paths, e.g. `sys_md_Package`.
    const ENTITY_NAME: &'static str;

    /// The value of the id attribute.
    fn id(&self) -> String;

    /// The value of the label attribute.
    fn label(&self) -> String;
}
