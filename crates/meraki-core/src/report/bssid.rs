// BSSID inventory report: one row per broadcast BSS per wireless device.

use std::collections::HashMap;

use meraki_api::types::{Device, WirelessStatus};
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregatedReport;
use crate::dispatch::SerialKey;

/// SSID name the Dashboard assigns to slots that were never configured.
const UNCONFIGURED_SSID: &str = "Unconfigured SSID";

/// Fixed schema of the BSSID report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BssidRow {
    pub name: String,
    pub serial: String,
    pub mac: String,
    pub model: String,
    pub network_name: String,
    pub tags: String,
    pub lan_ip: String,
    pub enabled: bool,
    pub band: String,
    pub ssid: String,
    pub bssid: String,
    pub channel: Option<i64>,
    pub width: String,
    pub power: String,
    pub visible: bool,
    pub broadcasting: bool,
}

/// Join device inventory detail with per-serial radio status into rows,
/// sorted by network display name, device serial, band, then BSSID.
///
/// Unconfigured SSID slots are dropped unless `include_unconfigured`.
pub fn rows(
    report: &AggregatedReport<SerialKey, WirelessStatus>,
    devices: &HashMap<String, Device>,
    network_names: &HashMap<String, String>,
    include_unconfigured: bool,
) -> Vec<BssidRow> {
    let mut rows = Vec::new();

    for (key, status) in report.successes() {
        let Some(device) = devices.get(&key.0) else {
            continue;
        };
        let network_name = device
            .network_id
            .as_ref()
            .and_then(|id| network_names.get(id))
            .cloned()
            .unwrap_or_default();

        for bss in &status.basic_service_sets {
            if !include_unconfigured && bss.ssid_name.contains(UNCONFIGURED_SSID) {
                continue;
            }
            rows.push(BssidRow {
                name: device.name.clone().unwrap_or_default(),
                serial: device.serial.clone(),
                mac: device.mac.clone().unwrap_or_default(),
                model: device.model.clone().unwrap_or_default(),
                network_name: network_name.clone(),
                tags: device.tags.join(" "),
                lan_ip: device.lan_ip.clone().unwrap_or_default(),
                enabled: bss.enabled,
                band: bss.band.clone().unwrap_or_default(),
                ssid: bss.ssid_name.clone(),
                bssid: bss.bssid.clone().unwrap_or_default(),
                channel: bss.channel,
                width: bss.channel_width.clone().unwrap_or_default(),
                power: bss.power.clone().unwrap_or_default(),
                visible: bss.visible,
                broadcasting: bss.broadcasting,
            });
        }
    }

    rows.sort_by(|a, b| {
        a.network_name
            .cmp(&b.network_name)
            .then_with(|| a.serial.cmp(&b.serial))
            .then_with(|| a.band.cmp(&b.band))
            .then_with(|| a.bssid.cmp(&b.bssid))
    });
    rows
}
