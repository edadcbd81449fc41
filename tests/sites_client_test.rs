// Integration tests for `SitesClient` against a wiremock server.

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use site_picker::api::{SiteSource, SitesClient};
use site_picker::config::Config;

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(token: &str) -> (MockServer, SitesClient) {
    let server = MockServer::start().await;
    let uri = server.uri();
    let config = Config::from_lookup(|key| match key {
        "SITE_PICKER_API_URL" => Some(format!("{uri}/")),
        _ => None,
    })
    .unwrap();
    let client = SitesClient::new(&config, token.to_string()).unwrap();
    (server, client)
}

const SITES_PATH: &str = "/rest/v1.1/me/sites";

// ── Listing ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_sites_sends_bearer_token() {
    let (server, client) = setup("abc123").await;

    Mock::given(method("GET"))
        .and(path(SITES_PATH))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sites": [
                {
                    "ID": 11,
                    "name": "Alpha",
                    "URL": "https://alpha.com",
                    "icon": { "img": "https://alpha.com/icon.png" }
                },
                { "ID": 12, "name": "", "URL": "https://beta.net" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sites = client.fetch_sites().await.unwrap();

    assert_eq!(sites.len(), 2);
    assert_eq!(sites[0].id, 11);
    assert_eq!(sites[0].icon_url(), Some("https://alpha.com/icon.png"));
    assert_eq!(sites[1].host().as_deref(), Some("beta.net"));
    assert_eq!(sites[1].display_label().as_deref(), Some("beta.net"));
}

#[tokio::test]
async fn test_fetch_sites_preserves_server_order() {
    let (server, client) = setup("t").await;

    Mock::given(method("GET"))
        .and(path(SITES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sites": [
                { "ID": 3, "name": "Zeta", "URL": "zeta.io" },
                { "ID": 1, "name": "Alpha", "URL": "alpha.com" },
                { "ID": 2, "name": "Mu", "URL": "mu.org" }
            ]
        })))
        .mount(&server)
        .await;

    let ids: Vec<i64> = client
        .fetch_sites()
        .await
        .unwrap()
        .iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec![3, 1, 2]);
}

#[tokio::test]
async fn test_fetch_sites_missing_list_is_empty() {
    let (server, client) = setup("t").await;

    Mock::given(method("GET"))
        .and(path(SITES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    assert!(client.fetch_sites().await.unwrap().is_empty());
}

// ── Failures ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_sites_unauthorized() {
    let (server, client) = setup("expired").await;

    Mock::given(method("GET"))
        .and(path(SITES_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("invalid_token"))
        .mount(&server)
        .await;

    let err = client.fetch_sites().await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("403"), "unexpected error: {message}");
    assert!(message.contains("invalid_token"), "unexpected error: {message}");
}

#[tokio::test]
async fn test_fetch_sites_malformed_body() {
    let (server, client) = setup("t").await;

    Mock::given(method("GET"))
        .and(path(SITES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.fetch_sites().await.unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse JSON"));
}
