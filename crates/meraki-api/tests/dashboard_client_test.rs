// Integration tests for `DashboardClient` using wiremock.
#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use meraki_api::types::{Network, Organization, ProductType};
use meraki_api::{DashboardClient, Error, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, DashboardClient) {
    let server = MockServer::start().await;
    let transport = TransportConfig::default()
        .with_base_url(&server.uri())
        .unwrap();
    let client = DashboardClient::from_reqwest(reqwest::Client::new(), &transport);
    (server, client)
}

fn org_json(id: &str, name: &str, enabled: bool) -> serde_json::Value {
    json!({ "id": id, "name": name, "api": { "enabled": enabled } })
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_get_organization() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/organizations/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(org_json("123", "Acme", true)))
        .mount(&server)
        .await;

    let org: Organization = client.get_organization("123").await.unwrap();

    assert_eq!(org.id, "123");
    assert_eq!(org.name, "Acme");
    assert!(org.api.enabled);
}

#[tokio::test]
async fn test_list_organizations_follows_link_header() {
    let (server, client) = setup().await;

    let next = format!(
        "{}/organizations?perPage=1000&startingAfter=1",
        server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .and(query_param("perPage", "1000"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([org_json("1", "First", true)]))
                .insert_header("Link", format!("<{next}>; rel=next").as_str()),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/organizations"))
        .and(query_param("startingAfter", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([org_json("2", "Second", false)])),
        )
        .mount(&server)
        .await;

    let orgs = client.list_organizations().await.unwrap();

    assert_eq!(orgs.len(), 2);
    assert_eq!(orgs[0].id, "1");
    assert_eq!(orgs[1].id, "2");
    assert!(!orgs[1].api.enabled);
}

#[tokio::test]
async fn test_list_networks_product_types() {
    let (server, client) = setup().await;

    let body = json!([
        {
            "id": "N_1",
            "name": "HQ",
            "productTypes": ["wireless", "appliance"],
            "tags": ["prod"]
        },
        {
            "id": "N_2",
            "name": "Lab",
            "productTypes": ["systemsManager"],
            "tags": []
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/organizations/123/networks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let nets: Vec<Network> = client.list_organization_networks("123").await.unwrap();

    assert_eq!(nets.len(), 2);
    assert!(nets[0].has_any_product(&[ProductType::Wireless]));
    assert!(!nets[1].has_any_product(&[ProductType::Wireless, ProductType::Switch]));
    assert_eq!(nets[1].product_types, vec![ProductType::SystemsManager]);
}

#[tokio::test]
async fn test_unknown_product_type_tolerated() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/networks/N_9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "N_9",
            "name": "Edge",
            "productTypes": ["hologram"]
        })))
        .mount(&server)
        .await;

    let net = client.get_network("N_9").await.unwrap();
    assert_eq!(net.product_types, vec![ProductType::Unknown]);
}

// ── Rate limiting ───────────────────────────────────────────────────

#[tokio::test]
async fn test_429_retried_until_success() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/organizations/123"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "0")
                .set_body_json(json!({ "errors": ["Too many requests"] })),
        )
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/organizations/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(org_json("123", "Acme", true)))
        .mount(&server)
        .await;

    let org = client.get_organization("123").await.unwrap();
    assert_eq!(org.name, "Acme");
}

#[tokio::test]
async fn test_429_budget_exhaustion() {
    let server = MockServer::start().await;
    let transport = TransportConfig {
        maximum_retries: 2,
        ..TransportConfig::default()
    }
    .with_base_url(&server.uri())
    .unwrap();
    let client = DashboardClient::from_reqwest(reqwest::Client::new(), &transport);

    Mock::given(method("GET"))
        .and(path("/organizations/123"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .mount(&server)
        .await;

    let result = client.get_organization("123").await;

    assert!(
        matches!(result, Err(Error::RateLimitExhausted { retries: 2 })),
        "expected RateLimitExhausted, got: {result:?}"
    );
}

// ── Error mapping ───────────────────────────────────────────────────

#[tokio::test]
async fn test_error_401_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.list_organizations().await;

    assert!(
        matches!(result, Err(Error::InvalidApiKey)),
        "expected InvalidApiKey, got: {result:?}"
    );
}

#[tokio::test]
async fn test_error_404_with_errors_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/networks/N_missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "errors": ["Network not found"] })),
        )
        .mount(&server)
        .await;

    let result = client.get_network("N_missing").await;

    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Network not found");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
    assert!(result.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_error_500_without_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.list_organizations().await;

    match result {
        Err(Error::Api { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected Api 500 error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_deserialization_error_carries_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/organizations/123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.get_organization("123").await;

    match result {
        Err(Error::Deserialization { ref body, .. }) => assert_eq!(body, "not json"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
