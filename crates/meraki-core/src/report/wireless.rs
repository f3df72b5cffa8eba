// Wireless client count report: clients per (network, band).

use std::collections::HashMap;

use meraki_api::types::WirelessClientStats;
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregatedReport;
use crate::dispatch::BandKey;

/// Fixed schema of the wireless count report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandCountRow {
    pub network: String,
    pub band: String,
    pub clients: usize,
}

/// Count clients per successful (network, band) key, sorted by network
/// display name then band frequency.
pub fn rows(
    report: &AggregatedReport<BandKey, Vec<WirelessClientStats>>,
    network_names: &HashMap<String, String>,
) -> Vec<BandCountRow> {
    let mut counted: Vec<(&BandKey, usize)> = report
        .successes()
        .map(|(key, stats)| (key, stats.len()))
        .collect();
    counted.sort_by(|(a, _), (b, _)| {
        let a_name = network_names.get(&a.network_id).unwrap_or(&a.network_id);
        let b_name = network_names.get(&b.network_id).unwrap_or(&b.network_id);
        a_name.cmp(b_name).then_with(|| a.band.cmp(&b.band))
    });

    counted
        .into_iter()
        .map(|(key, clients)| BandCountRow {
            network: network_names
                .get(&key.network_id)
                .cloned()
                .unwrap_or_else(|| key.network_id.clone()),
            band: key.band.to_string(),
            clients,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::HashMap;

    use futures_util::stream;
    use meraki_api::types::WirelessClientStats;
    use tokio_util::sync::CancellationToken;

    use super::rows;
    use crate::collect;
    use crate::dispatch::{Band, BandKey, ResourceResult};

    fn stats(n: usize) -> Vec<WirelessClientStats> {
        (0..n)
            .map(|i| WirelessClientStats {
                mac: format!("aa:bb:{i:02x}"),
                connection_stats: serde_json::Value::Null,
            })
            .collect()
    }

    #[tokio::test]
    async fn counts_sorted_by_network_then_band() {
        let cancel = CancellationToken::new();
        let key = |net: &str, band| BandKey {
            network_id: net.into(),
            band,
        };
        let items = vec![
            (key("N_1", Band::Ghz6), ResourceResult::Success(stats(1))),
            (key("N_1", Band::Ghz2_4), ResourceResult::Success(stats(4))),
            (key("N_1", Band::Ghz5), ResourceResult::Success(stats(9))),
        ];
        let report = collect(stream::iter(items), &cancel).await.unwrap();
        let names: HashMap<String, String> = [("N_1".to_owned(), "HQ".to_owned())].into();

        let rows = rows(&report, &names);
        let summary: Vec<(&str, usize)> = rows
            .iter()
            .map(|r| (r.band.as_str(), r.clients))
            .collect();

        assert_eq!(summary, vec![("2.4", 4), ("5", 9), ("6", 1)]);
        assert!(rows.iter().all(|r| r.network == "HQ"));
    }
}
