//! Single row retrieval (`api/v2/<entity>/<id>`)

use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::MolgenisClient;
use crate::api::request::Resource;
use crate::error::Error;
use crate::model::Entity;

impl MolgenisClient {
    /// Retrieves one row of `T`'s entity type by id.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let package: Package = client.get::<Package>("sys_md").await?;
    /// ```
    pub async fn get<T: Entity>(&self, id: &str) -> Result<T, Error> {
        self.get_as(T::ENTITY_NAME, id).await
    }

    /// Retrieves one row of `entity` by id, decoded as `T`.
    pub async fn get_as<T: DeserializeOwned>(&self, entity: &str, id: &str) -> Result<T, Error> {
        let request = self.build_request(Method::GET, &Resource::item(entity, id), &[])?;
        self.send_json(request).await
    }
}
