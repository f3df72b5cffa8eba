// Organization-scoped endpoints.

use crate::client::DashboardClient;
use crate::error::Error;
use crate::types::{
    AdaptivePolicyGroup, ConfigTemplate, Device, Network, Organization, ProductType,
};

impl DashboardClient {
    /// List every organization the API key can see (all pages).
    pub async fn list_organizations(&self) -> Result<Vec<Organization>, Error> {
        self.get_paged("organizations", &[]).await
    }

    /// Fetch one organization by id.
    pub async fn get_organization(&self, org_id: &str) -> Result<Organization, Error> {
        self.get(&format!("organizations/{org_id}")).await
    }

    /// List all networks in an organization (all pages).
    pub async fn list_organization_networks(&self, org_id: &str) -> Result<Vec<Network>, Error> {
        self.get_paged(&format!("organizations/{org_id}/networks"), &[])
            .await
    }

    /// List organization inventory devices, optionally filtered by product
    /// type (all pages).
    pub async fn list_organization_devices(
        &self,
        org_id: &str,
        product_types: &[ProductType],
    ) -> Result<Vec<Device>, Error> {
        let params: Vec<(&str, String)> = product_types
            .iter()
            .map(|p| ("productTypes[]", p.to_string()))
            .collect();
        self.get_paged(&format!("organizations/{org_id}/devices"), &params)
            .await
    }

    /// List configuration templates in an organization.
    pub async fn list_organization_config_templates(
        &self,
        org_id: &str,
    ) -> Result<Vec<ConfigTemplate>, Error> {
        self.get(&format!("organizations/{org_id}/configTemplates"))
            .await
    }

    /// List adaptive policy groups (SGT mappings) in an organization.
    pub async fn list_organization_adaptive_policy_groups(
        &self,
        org_id: &str,
    ) -> Result<Vec<AdaptivePolicyGroup>, Error> {
        self.get(&format!("organizations/{org_id}/adaptivePolicy/groups"))
            .await
    }
}
