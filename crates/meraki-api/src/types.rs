// API-shaped records for the Dashboard endpoints this crate covers.
//
// Field sets are limited to what callers consume; everything else on the
// wire is ignored, except for `Ssid`, which round-trips unknown fields so
// a fetched config can be pushed back with targeted edits.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Organizations ────────────────────────────────────────────────────

/// Top-level tenant boundary in the Dashboard.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub api: ApiAccess,
}

/// Whether API access is enabled for an organization.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiAccess {
    #[serde(default)]
    pub enabled: bool,
}

// ── Networks ─────────────────────────────────────────────────────────

/// A named site grouping devices and configuration under an organization.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub product_types: Vec<ProductType>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub config_template_id: Option<String>,
}

impl Network {
    /// Whether any of the given product types is present on this network.
    pub fn has_any_product(&self, products: &[ProductType]) -> bool {
        self.product_types.iter().any(|p| products.contains(p))
    }
}

/// Product families a network or device can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, strum::Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ProductType {
    Wireless,
    Appliance,
    Switch,
    SystemsManager,
    Camera,
    Sensor,
    CellularGateway,
    /// Product families introduced after this client was written.
    #[serde(other)]
    Unknown,
}

// ── Clients ──────────────────────────────────────────────────────────

/// A client seen on a network, as returned by the network clients list.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkClient {
    pub mac: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub last_seen: Option<String>,
    #[serde(default)]
    pub recent_device_name: Option<String>,
    #[serde(default)]
    pub switchport: Option<String>,
}

// ── Devices ──────────────────────────────────────────────────────────

/// A device in the organization inventory.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub serial: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub network_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub lan_ip: Option<String>,
    #[serde(default)]
    pub product_type: Option<ProductType>,
}

// ── Health alerts ────────────────────────────────────────────────────

/// One health alert raised against a network.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthAlert {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub scope: AlertScope,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertScope {
    #[serde(default)]
    pub devices: Vec<AlertDevice>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDevice {
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub serial: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

// ── Wireless ─────────────────────────────────────────────────────────

/// Radio status of a wireless device: one entry per SSID per radio.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WirelessStatus {
    #[serde(default)]
    pub basic_service_sets: Vec<BasicServiceSet>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicServiceSet {
    #[serde(default)]
    pub ssid_name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub band: Option<String>,
    #[serde(default)]
    pub bssid: Option<String>,
    #[serde(default)]
    pub channel: Option<i64>,
    #[serde(default)]
    pub channel_width: Option<String>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub broadcasting: bool,
}

/// Per-client wireless connection statistics. The stats payload is kept
/// opaque; the count report only needs the list length.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WirelessClientStats {
    pub mac: String,
    #[serde(default)]
    pub connection_stats: serde_json::Value,
}

/// Wireless SSID configuration.
///
/// Unknown fields are preserved in `rest` so the full config can be PUT
/// back after targeted edits, matching how the Dashboard expects updates.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ssid {
    pub number: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adaptive_policy_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wifi_personal_network_enabled: Option<bool>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

/// An adaptive policy group (SGT mapping).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptivePolicyGroup {
    pub group_id: String,
    #[serde(default)]
    pub name: String,
    pub sgt: i64,
}

// ── Appliance ────────────────────────────────────────────────────────

/// Content filtering configuration of an appliance network.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentFiltering {
    #[serde(default)]
    pub allowed_url_patterns: Vec<String>,
    #[serde(default)]
    pub blocked_url_patterns: Vec<String>,
    #[serde(default)]
    pub blocked_url_categories: Vec<UrlCategory>,
    #[serde(default)]
    pub url_category_list_size: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlCategory {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Content filtering update payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentFilteringUpdate {
    pub allowed_url_patterns: Vec<String>,
    pub blocked_url_patterns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked_url_categories: Option<Vec<String>>,
    /// Must be `topSites` or `fullList`; the Dashboard rejects null.
    pub url_category_list_size: String,
}

/// A VLAN configured on an appliance network or template.
///
/// Template VLANs additionally carry `cidr`/`mask` describing the allowed
/// addressing envelope for bound networks.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplianceVlan {
    pub id: VlanId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub appliance_ip: Option<String>,
    #[serde(default)]
    pub subnet: Option<String>,
    #[serde(default)]
    pub cidr: Option<String>,
    #[serde(default)]
    pub mask: Option<u8>,
}

/// VLAN identifiers arrive as numbers or strings depending on endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum VlanId {
    Num(i64),
    Str(String),
}

impl fmt::Display for VlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => n.fmt(f),
            Self::Str(s) => s.fmt(f),
        }
    }
}

/// VLAN addressing update payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VlanUpdate {
    pub appliance_ip: String,
    pub subnet: String,
}

// ── Config templates ─────────────────────────────────────────────────

/// An organization configuration template.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigTemplate {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub product_types: Vec<ProductType>,
}
