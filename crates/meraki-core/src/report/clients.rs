// Client inventory report: one row per client per network.

use std::collections::HashMap;

use meraki_api::types::NetworkClient;
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregatedReport;
use crate::dispatch::NetworkKey;

/// Fixed schema of the client report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRow {
    pub network: String,
    pub device_name: String,
    pub switch_port: String,
    pub client_mac: String,
    pub ip: String,
    pub status: String,
    pub last_seen: String,
}

/// Flatten successful per-network client lists into rows, sorted by
/// network display name then client MAC.
pub fn rows(
    report: &AggregatedReport<NetworkKey, Vec<NetworkClient>>,
    network_names: &HashMap<String, String>,
) -> Vec<ClientRow> {
    let mut rows = Vec::new();

    for (key, clients) in report.successes() {
        let network = network_names
            .get(&key.0)
            .cloned()
            .unwrap_or_else(|| key.0.clone());

        for client in clients {
            rows.push(ClientRow {
                network: network.clone(),
                device_name: client.recent_device_name.clone().unwrap_or_default(),
                switch_port: client.switchport.clone().unwrap_or_default(),
                client_mac: client.mac.clone(),
                ip: client.ip.clone().unwrap_or_default(),
                status: client.status.clone().unwrap_or_default(),
                last_seen: client.last_seen.clone().unwrap_or_default(),
            });
        }
    }

    rows.sort_by(|a, b| {
        a.network
            .cmp(&b.network)
            .then_with(|| a.client_mac.cmp(&b.client_mac))
    });
    rows
}
