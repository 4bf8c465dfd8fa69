use crate::connection::VimConnection;
use anyhow::{bail, Context};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use vim_client_schemas::vim_models::{
    ContainerViewRequest, ContainerViewResponse, ManagedObjectReference, PropertyRequest,
    PropertyResponse,
};

/// Name based lookup over the service's inventory tree. This trait is the seam for
/// unit testing, operations take an `impl InventoryQuery` so tests can substitute a
/// stub that serves a canned inventory instead of calling the service.
#[async_trait]
pub trait InventoryQuery {
    /// All objects of `type_name` reachable under `container`, keyed by display
    /// name. The folder traversal is performed server side, the client has no
    /// control over its cost or completeness.
    async fn resolve_by_type(
        &self,
        container: &ManagedObjectReference,
        type_name: &str,
    ) -> anyhow::Result<HashMap<String, ManagedObjectReference>>;

    /// Fetch the named properties of one object as raw JSON values.
    async fn get_properties(
        &self,
        obj: &ManagedObjectReference,
        path_set: &[&str],
    ) -> anyhow::Result<HashMap<String, Value>>;
}

#[async_trait]
impl InventoryQuery for VimConnection {
    async fn resolve_by_type(
        &self,
        container: &ManagedObjectReference,
        type_name: &str,
    ) -> anyhow::Result<HashMap<String, ManagedObjectReference>> {
        tracing::debug!("resolving {type_name} objects under {container}");
        let request = ContainerViewRequest {
            container: container.clone(),
            view_type: type_name.to_string(),
        };
        let resp = self.post("inventory/view").json(&request).send().await?;
        if !resp.status().is_success() {
            bail!("inventory view request failed: {:?}", resp.text().await?);
        }
        let view: ContainerViewResponse = resp
            .json()
            .await
            .context("deserialising inventory view response")?;
        tracing::trace!("resolved {} {type_name} objects", view.objects.len());
        Ok(view.objects)
    }

    async fn get_properties(
        &self,
        obj: &ManagedObjectReference,
        path_set: &[&str],
    ) -> anyhow::Result<HashMap<String, Value>> {
        tracing::debug!("fetching properties {:?} of {obj}", path_set);
        let request = PropertyRequest {
            obj: obj.clone(),
            path_set: path_set.iter().map(|p| p.to_string()).collect(),
        };
        let resp = self.post("property-collector").json(&request).send().await?;
        if !resp.status().is_success() {
            bail!("property request failed: {:?}", resp.text().await?);
        }
        let props: PropertyResponse = resp
            .json()
            .await
            .context("deserialising property response")?;
        Ok(props.props)
    }
}
