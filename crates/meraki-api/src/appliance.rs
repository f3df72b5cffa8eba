// Appliance endpoints: content filtering and VLAN addressing.

use crate::client::DashboardClient;
use crate::error::Error;
use crate::types::{
    ApplianceVlan, ContentFiltering, ContentFilteringUpdate, VlanId, VlanUpdate,
};

impl DashboardClient {
    /// Fetch the content filtering configuration of a network.
    pub async fn get_content_filtering(
        &self,
        network_id: &str,
    ) -> Result<ContentFiltering, Error> {
        self.get(&format!("networks/{network_id}/appliance/contentFiltering"))
            .await
    }

    /// Replace the content filtering configuration of a network.
    pub async fn update_content_filtering(
        &self,
        network_id: &str,
        update: &ContentFilteringUpdate,
    ) -> Result<ContentFiltering, Error> {
        self.put(
            &format!("networks/{network_id}/appliance/contentFiltering"),
            update,
        )
        .await
    }

    /// List the VLANs of an appliance network or configuration template.
    pub async fn list_appliance_vlans(
        &self,
        network_id: &str,
    ) -> Result<Vec<ApplianceVlan>, Error> {
        self.get(&format!("networks/{network_id}/appliance/vlans"))
            .await
    }

    /// Update the addressing of one appliance VLAN.
    pub async fn update_appliance_vlan(
        &self,
        network_id: &str,
        vlan_id: &VlanId,
        update: &VlanUpdate,
    ) -> Result<ApplianceVlan, Error> {
        self.put(
            &format!("networks/{network_id}/appliance/vlans/{vlan_id}"),
            update,
        )
        .await
    }
}
