// ── Resource resolution ──
//
// Turns human-supplied selectors (name or id) into canonical identifiers
// for an organization and its networks. Enumeration is always exhaustive:
// every page is fetched before any filter runs, so an exact-name match is
// a filtering short circuit, never a pagination one. Resolution happens
// once per run; nothing here caches across invocations.

use meraki_api::DashboardClient;
use meraki_api::types::{Network, Organization, ProductType};

use crate::error::CoreError;

// ── Organization selection ───────────────────────────────────────────

/// How the caller identified the target organization.
#[derive(Debug, Clone)]
pub enum OrgSelector {
    ById(String),
    ByName(String),
}

impl OrgSelector {
    /// Build a selector from the usual pair of CLI flags. Supplying both
    /// or neither is a configuration conflict, fatal before any network
    /// call.
    pub fn from_flags(name: Option<String>, id: Option<String>) -> Result<Self, CoreError> {
        match (name, id) {
            (Some(_), Some(_)) => Err(CoreError::ValidationFailed {
                message: "specify an organization name or id, not both".into(),
            }),
            (Some(name), None) => Ok(Self::ByName(name)),
            (None, Some(id)) => Ok(Self::ById(id)),
            (None, None) => Err(CoreError::ValidationFailed {
                message: "an organization name or id is required".into(),
            }),
        }
    }
}

/// Resolve one organization from a selector.
///
/// By id: fetched directly. By name: enumerates all organizations and
/// returns the first exact name match whose API access is enabled.
pub async fn resolve_organization(
    api: &DashboardClient,
    selector: &OrgSelector,
) -> Result<Organization, CoreError> {
    match selector {
        OrgSelector::ById(id) => api.get_organization(id).await.map_err(|e| {
            if e.is_not_found() {
                CoreError::OrganizationNotFound {
                    selector: id.clone(),
                }
            } else {
                e.into()
            }
        }),
        OrgSelector::ByName(name) => {
            let orgs = api.list_organizations().await?;
            find_org_by_name(&orgs, name)
                .cloned()
                .ok_or_else(|| CoreError::OrganizationNotFound {
                    selector: name.clone(),
                })
        }
    }
}

/// Batch mode: every organization with API access enabled.
pub async fn resolve_organizations(
    api: &DashboardClient,
) -> Result<Vec<Organization>, CoreError> {
    let mut orgs = api.list_organizations().await?;
    orgs.retain(|o| o.api.enabled);
    Ok(orgs)
}

/// First exact name match with API access enabled.
pub fn find_org_by_name<'a>(orgs: &'a [Organization], name: &str) -> Option<&'a Organization> {
    orgs.iter().find(|o| o.name == name && o.api.enabled)
}

// ── Network selection ────────────────────────────────────────────────

/// Filters applied to a fully enumerated network list.
///
/// An exact `name` short-circuits everything else. Without a name, `tag`
/// membership and product-type exclusion are applied in that order.
#[derive(Debug, Clone, Default)]
pub struct NetworkSelector {
    pub name: Option<String>,
    pub tag: Option<String>,
    pub exclude_product_types: Vec<ProductType>,
}

impl NetworkSelector {
    /// The reporting default: skip management-only networks.
    pub fn excluding_systems_manager() -> Self {
        Self {
            exclude_product_types: vec![ProductType::SystemsManager],
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag;
        self
    }
}

/// Enumerate an organization's networks (all pages) and filter them.
pub async fn resolve_networks(
    api: &DashboardClient,
    org_id: &str,
    selector: &NetworkSelector,
) -> Result<Vec<Network>, CoreError> {
    let networks = api.list_organization_networks(org_id).await?;
    filter_networks(networks, selector)
}

/// Apply a [`NetworkSelector`] to an already-enumerated network list.
///
/// No match under a name selector is terminal, not retryable.
pub fn filter_networks(
    networks: Vec<Network>,
    selector: &NetworkSelector,
) -> Result<Vec<Network>, CoreError> {
    if let Some(name) = &selector.name {
        return match networks.into_iter().find(|n| &n.name == name) {
            Some(network) => Ok(vec![network]),
            None => Err(CoreError::NetworkNotFound {
                identifier: name.clone(),
            }),
        };
    }

    Ok(networks
        .into_iter()
        .filter(|n| selector.tag.as_ref().is_none_or(|tag| n.tags.contains(tag)))
        .filter(|n| {
            !n.product_types
                .iter()
                .any(|p| selector.exclude_product_types.contains(p))
        })
        .collect())
}

/// Split networks into (eligible, skipped) by product-type intersection.
///
/// The client report dispatches only to eligible networks but still tells
/// the user which networks were skipped and why.
pub fn partition_by_products<'a>(
    networks: &'a [Network],
    products: &[ProductType],
) -> (Vec<&'a Network>, Vec<&'a Network>) {
    networks.iter().partition(|n| n.has_any_product(products))
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use meraki_api::types::{ApiAccess, Network, Organization, ProductType};
    use pretty_assertions::assert_eq;

    use super::{
        NetworkSelector, OrgSelector, filter_networks, find_org_by_name, partition_by_products,
    };
    use crate::error::CoreError;

    fn org(id: &str, name: &str, enabled: bool) -> Organization {
        Organization {
            id: id.into(),
            name: name.into(),
            api: ApiAccess { enabled },
        }
    }

    fn network(id: &str, name: &str, products: &[ProductType], tags: &[&str]) -> Network {
        Network {
            id: id.into(),
            name: name.into(),
            product_types: products.to_vec(),
            tags: tags.iter().map(|&t| t.into()).collect(),
            config_template_id: None,
        }
    }

    #[test]
    fn selector_flags_are_mutually_exclusive() {
        assert!(matches!(
            OrgSelector::from_flags(Some("Acme".into()), Some("123".into())),
            Err(CoreError::ValidationFailed { .. })
        ));
        assert!(matches!(
            OrgSelector::from_flags(None, None),
            Err(CoreError::ValidationFailed { .. })
        ));
        assert!(matches!(
            OrgSelector::from_flags(Some("Acme".into()), None),
            Ok(OrgSelector::ByName(_))
        ));
    }

    #[test]
    fn org_lookup_requires_api_enabled() {
        let orgs = vec![
            org("1", "Acme", false),
            org("2", "Acme", true),
            org("3", "Other", true),
        ];

        let found = find_org_by_name(&orgs, "Acme").unwrap();
        assert_eq!(found.id, "2", "disabled org must be skipped");
        assert!(find_org_by_name(&orgs, "Missing").is_none());
    }

    #[test]
    fn org_lookup_is_idempotent() {
        let orgs = vec![org("1", "Acme", true), org("2", "Beta", true)];
        let first = find_org_by_name(&orgs, "Acme").unwrap().id.clone();
        let second = find_org_by_name(&orgs, "Acme").unwrap().id.clone();
        assert_eq!(first, second);
    }

    #[test]
    fn exact_name_match_short_circuits_other_filters() {
        // "B" lacks the tag that would otherwise exclude it.
        let networks = vec![
            network("N_a", "A", &[ProductType::Wireless], &["keep"]),
            network("N_b", "B", &[ProductType::SystemsManager], &[]),
            network("N_c", "C", &[ProductType::Switch], &["keep"]),
        ];
        let selector = NetworkSelector::excluding_systems_manager()
            .with_name(Some("B".into()))
            .with_tag(Some("keep".into()));

        let result = filter_networks(networks, &selector).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "N_b");
    }

    #[test]
    fn name_selector_with_no_match_is_terminal() {
        let networks = vec![network("N_a", "A", &[ProductType::Wireless], &[])];
        let selector = NetworkSelector::default().with_name(Some("Z".into()));

        assert!(matches!(
            filter_networks(networks, &selector),
            Err(CoreError::NetworkNotFound { identifier }) if identifier == "Z"
        ));
    }

    #[test]
    fn systems_manager_networks_are_excluded_by_default() {
        // Org "Acme": "HQ" (wireless, appliance) stays, "Lab"
        // (systemsManager only) is dropped.
        let networks = vec![
            network(
                "N_hq",
                "HQ",
                &[ProductType::Wireless, ProductType::Appliance],
                &[],
            ),
            network("N_lab", "Lab", &[ProductType::SystemsManager], &[]),
        ];

        let result =
            filter_networks(networks, &NetworkSelector::excluding_systems_manager()).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "HQ");
    }

    #[test]
    fn tag_filter_applies_without_name() {
        let networks = vec![
            network("N_1", "One", &[ProductType::Switch], &["branch"]),
            network("N_2", "Two", &[ProductType::Switch], &["campus"]),
        ];
        let selector = NetworkSelector::default().with_tag(Some("branch".into()));

        let result = filter_networks(networks, &selector).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "N_1");
    }

    #[test]
    fn product_partition_reports_skipped_networks() {
        let networks = vec![
            network("N_1", "Wired", &[ProductType::Switch], &[]),
            network("N_2", "WiFi", &[ProductType::Wireless], &[]),
        ];

        let (eligible, skipped) = partition_by_products(&networks, &[ProductType::Switch]);
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].id, "N_1");
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].id, "N_2");
    }
}
