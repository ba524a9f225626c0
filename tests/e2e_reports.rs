//! End-to-end scenarios across the client and its HTTP transport

use std::sync::Arc;

use rwapi_http::{HttpClient, HttpConfig};
use rwapi_client::{Client, ClientConfig, Direction, Facet, Filter, Operator, Query, Range};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Single-item lookups send nothing but their profile
#[test]
fn e2e_single_report_payload() {
    let query = Query::new("reports")
        .id(548925)
        .profile("minimal")
        .search("should not leak")
        .filter(Filter::new().condition("status", "published"));

    assert_eq!(
        serde_json::to_value(query.build()).unwrap(),
        json!({"profile": "minimal"})
    );
}

#[tokio::test]
async fn e2e_fetch_single_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/reports/548925"))
        .and(query_param("appname", "example.com"))
        .and(query_param("profile", "minimal"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalCount": 1,
            "count": 1,
            "data": [{"id": "548925", "fields": {"title": "Flash Update"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::default().with_url(format!("{}/v1", server.uri()));
    let client = Client::new(config)
        .unwrap()
        .appname("example.com")
        .hypermedia(true);

    let raw = client
        .reports()
        .id(548925)
        .profile("minimal")
        .execute_raw()
        .await
        .unwrap();

    assert_eq!(raw["data"][0]["fields"]["title"], "Flash Update");
}

#[tokio::test]
async fn e2e_search_with_facets() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/reports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalCount": 1532,
            "count": 2,
            "data": [
                {"id": "1", "fields": {"title": "Cholera outbreak"}},
                {"id": "2", "fields": {"title": "Flood response"}}
            ],
            "embedded": {
                "facets": {
                    "sources": {"data": [{"value": "OCHA", "count": 800}]},
                    "themes": {"data": [{"value": "Health", "count": 600}]}
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = Arc::new(HttpClient::new(HttpConfig::default()).unwrap());
    let config = ClientConfig::default().with_url(format!("{}/v1", server.uri()));
    let client = Client::with_transport(config, transport);

    let results = client
        .reports()
        .fields(&["title"], &["body"])
        .search("cholera OR flood")
        .filter(
            Filter::new()
                .condition("date.created", Range::at_least("2024-01-01"))
                .filter(
                    Filter::new()
                        .condition("country.iso3", "yem")
                        .condition("country.iso3", "som")
                        .operator(Operator::Or),
                ),
        )
        .facets(Facet::with("sources", "source.shortname", Some(5)))
        .facets(Facet::new().name("themes").field("theme.name").sort("count", Direction::Desc))
        .sort("date.created", Direction::Desc)
        .range(0, 2)
        .execute()
        .await;

    assert!(!results.error());
    assert_eq!(results.total(), 1532);
    assert_eq!(results.count(), 2);
    assert_eq!(results.items().len(), 2);
    assert_eq!(results.item()["id"], "1");
    assert_eq!(results.facets().len(), 2);
    assert_eq!(results.facet("sources")["data"][0]["value"], "OCHA");
    assert_eq!(results.facet("countries"), json!({}));

    let received = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(
        body,
        json!({
            "fields": {"include": ["title"], "exclude": ["body"]},
            "sort": ["date.created:desc"],
            "limit": 2,
            "offset": 0,
            "query": {"value": "cholera OR flood"},
            "filter": {
                "conditions": [
                    {"field": "date.created", "value": {"from": "2024-01-01"}},
                    {
                        "conditions": [
                            {"field": "country.iso3", "value": "yem"},
                            {"field": "country.iso3", "value": "som"}
                        ],
                        "operator": "OR"
                    }
                ],
                "operator": "AND"
            },
            "facets": [
                {"name": "sources", "field": "source.shortname", "limit": 5},
                {"name": "themes", "field": "theme.name", "sort": "count:desc"}
            ]
        })
    );
}

#[tokio::test]
async fn e2e_server_error_yields_error_results() {
    let server = MockServer::start().await;
    for verb in ["GET", "POST"] {
        Mock::given(method(verb))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({
                "totalCount": 1,
                "data": [{"id": "1"}]
            })))
            .mount(&server)
            .await;
    }

    let config = ClientConfig::default().with_url(server.uri());
    let client = Client::new(config).unwrap();

    for query in [client.reports(), client.reports().id(1)] {
        let results = query.execute().await;
        assert!(results.error());
        assert_eq!(results.total(), 0);
        assert!(results.items().is_empty());
        assert_eq!(results.item(), json!({}));
        assert!(results.facets().is_empty());
    }
}

#[tokio::test]
async fn e2e_unreachable_service_yields_error_results() {
    let config = ClientConfig::default().with_url("http://127.0.0.1:9/v1");
    let client = Client::new(config).unwrap();

    let results = client.countries().execute().await;
    assert!(results.error());
}
