// Health alert report: one row per device in each alert's scope.

use std::collections::HashMap;

use meraki_api::types::HealthAlert;
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregatedReport;
use crate::dispatch::NetworkKey;

/// Fixed schema of the health alert report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRow {
    pub network_name: String,
    pub network_id: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: String,
    pub product_type: String,
    pub device_name: String,
    pub mac: String,
    pub serial: String,
    pub url: String,
}

/// Flatten per-network alert lists into rows, one per scoped device,
/// sorted by network display name, category, type, then device serial.
pub fn rows(
    report: &AggregatedReport<NetworkKey, Vec<HealthAlert>>,
    network_names: &HashMap<String, String>,
) -> Vec<AlertRow> {
    let mut rows = Vec::new();

    for (key, alerts) in report.successes() {
        let network_name = network_names
            .get(&key.0)
            .cloned()
            .unwrap_or_else(|| key.0.clone());

        for alert in alerts {
            for device in &alert.scope.devices {
                rows.push(AlertRow {
                    network_name: network_name.clone(),
                    network_id: key.0.clone(),
                    category: alert.category.clone().unwrap_or_default(),
                    kind: alert.kind.clone().unwrap_or_default(),
                    severity: alert.severity.clone().unwrap_or_default(),
                    product_type: device.product_type.clone().unwrap_or_default(),
                    device_name: device.name.clone().unwrap_or_default(),
                    mac: device.mac.clone().unwrap_or_default(),
                    serial: device.serial.clone().unwrap_or_default(),
                    url: device.url.clone().unwrap_or_default(),
                });
            }
        }
    }

    rows.sort_by(|a, b| {
        a.network_name
            .cmp(&b.network_name)
            .then_with(|| a.category.cmp(&b.category))
            .then_with(|| a.kind.cmp(&b.kind))
            .then_with(|| a.serial.cmp(&b.serial))
    });
    rows
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::HashMap;

    use futures_util::stream;
    use meraki_api::types::{AlertDevice, AlertScope, HealthAlert};
    use tokio_util::sync::CancellationToken;

    use super::rows;
    use crate::collect;
    use crate::dispatch::{NetworkKey, ResourceResult};

    fn alert(kind: &str, serials: &[&str]) -> HealthAlert {
        HealthAlert {
            category: Some("connectivity".into()),
            kind: Some(kind.into()),
            severity: Some("critical".into()),
            scope: AlertScope {
                devices: serials
                    .iter()
                    .map(|&s| AlertDevice {
                        product_type: Some("switch".into()),
                        name: Some(format!("dev-{s}")),
                        mac: Some("aa:bb".into()),
                        serial: Some(s.into()),
                        url: Some("https://dash/x".into()),
                    })
                    .collect(),
            },
        }
    }

    #[tokio::test]
    async fn one_row_per_scoped_device() {
        let cancel = CancellationToken::new();
        let items = vec![
            (
                NetworkKey("N_1".into()),
                ResourceResult::Success(vec![alert("unreachable", &["Q2", "Q1"])]),
            ),
            // Present but alert-free network contributes no rows.
            (NetworkKey("N_2".into()), ResourceResult::Success(vec![])),
        ];
        let report = collect(stream::iter(items), &cancel).await.unwrap();
        let names: HashMap<String, String> = [("N_1".to_owned(), "HQ".to_owned())].into();

        let rows = rows(&report, &names);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].serial, "Q1");
        assert_eq!(rows[1].serial, "Q2");
        assert_eq!(rows[0].network_name, "HQ");
        assert_eq!(rows[0].network_id, "N_1");
    }
}
