// Wireless endpoints: connection statistics, radio status, SSID config.

use crate::client::DashboardClient;
use crate::error::Error;
use crate::types::{Ssid, WirelessClientStats, WirelessStatus};

impl DashboardClient {
    /// Per-client wireless connection statistics for a network, scoped to
    /// one band over a trailing timespan (seconds).
    pub async fn get_wireless_connection_stats(
        &self,
        network_id: &str,
        band: &str,
        timespan_secs: u64,
    ) -> Result<Vec<WirelessClientStats>, Error> {
        self.get_with_params(
            &format!("networks/{network_id}/wireless/clients/connectionStats"),
            &[
                ("band", band.to_owned()),
                ("timespan", timespan_secs.to_string()),
            ],
        )
        .await
    }

    /// Radio/BSSID status of one wireless device.
    pub async fn get_device_wireless_status(
        &self,
        serial: &str,
    ) -> Result<WirelessStatus, Error> {
        self.get(&format!("devices/{serial}/wireless/status")).await
    }

    /// List the SSID configurations of a network.
    pub async fn list_wireless_ssids(&self, network_id: &str) -> Result<Vec<Ssid>, Error> {
        self.get(&format!("networks/{network_id}/wireless/ssids"))
            .await
    }

    /// Replace one SSID's configuration.
    pub async fn update_wireless_ssid(
        &self,
        network_id: &str,
        number: i64,
        config: &Ssid,
    ) -> Result<Ssid, Error> {
        self.put(
            &format!("networks/{network_id}/wireless/ssids/{number}"),
            config,
        )
        .await
    }
}
