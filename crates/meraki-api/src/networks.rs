// Network-scoped endpoints.

use crate::client::DashboardClient;
use crate::error::Error;
use crate::types::{Device, HealthAlert, Network, NetworkClient};

impl DashboardClient {
    /// Fetch one network by id.
    pub async fn get_network(&self, network_id: &str) -> Result<Network, Error> {
        self.get(&format!("networks/{network_id}")).await
    }

    /// List devices bound to a network.
    pub async fn list_network_devices(&self, network_id: &str) -> Result<Vec<Device>, Error> {
        self.get(&format!("networks/{network_id}/devices")).await
    }

    /// List clients seen on a network (all pages), optionally filtered by
    /// a MAC substring (the Dashboard does fuzzy matching on this).
    pub async fn list_network_clients(
        &self,
        network_id: &str,
        mac: Option<&str>,
    ) -> Result<Vec<NetworkClient>, Error> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(mac) = mac {
            params.push(("mac", mac.to_owned()));
        }
        self.get_paged(&format!("networks/{network_id}/clients"), &params)
            .await
    }

    /// List active health alerts for a network.
    pub async fn get_network_health_alerts(
        &self,
        network_id: &str,
    ) -> Result<Vec<HealthAlert>, Error> {
        self.get(&format!("networks/{network_id}/health/alerts"))
            .await
    }
}
