//! Registry clients against mocked registries

use registry_clients::{
    Error, FinmaClient, RegistryConfig, SearchOptions, ShabClient, ShabQuery, ZefixClient,
};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn publication(id: &str) -> serde_json::Value {
    json!({
        "meta": {
            "id": id,
            "creationDate": "2024-03-01T08:15:00Z",
            "updateDate": "2024-03-01T08:15:00Z",
            "rubric": "HR",
            "subRubric": "HR01",
            "language": "de",
            "registrationOffice": {
                "id": "ro-1",
                "displayName": "Handelsregisteramt Bern",
                "street": "Poststrasse",
                "streetNumber": "25",
                "swissZipCode": "3071",
                "town": "Ostermundigen",
                "containsPostOfficeBox": false
            },
            "publicationNumber": "HR01-1005000001",
            "publicationState": "PUBLISHED",
            "publicationDate": "2024-03-04T00:00:00Z",
            "primaryTenantCode": "shab",
            "title": {"de": "Neueintragung Muster AG"}
        },
        "commented": false
    })
}

#[tokio::test]
async fn test_zefix_search_posts_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/firm/search.json"))
        .and(body_json(json!({
            "languageKey": "en",
            "maxEntries": 5,
            "offset": 0,
            "name": "Muster AG",
            "deletedFirms": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [{
                "name": "Muster AG",
                "ehraid": 42,
                "uid": "CHE111222333",
                "uidFormatted": "CHE-111.222.333",
                "legalSeatId": 351,
                "legalSeat": "Bern",
                "registerOfficeId": 36,
                "legalFormId": 3,
                "status": "EXISTIEREND",
                "rabId": 0,
                "shabDate": "2024-03-04"
            }],
            "offset": 0,
            "maxEntries": 5,
            "hasMoreResults": false,
            "maxOffset": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ZefixClient::from_config(&RegistryConfig::with_base_url(server.uri())).unwrap();
    let options = SearchOptions {
        max_entries: 5,
        include_deleted: false,
        ..SearchOptions::default()
    };
    let page = client.search("Muster AG", &options).await.unwrap();

    assert_eq!(page.list.len(), 1);
    assert_eq!(page.list[0].uid_formatted.as_deref(), Some("CHE-111.222.333"));
    assert!(!page.has_more_results);
}

#[tokio::test]
async fn test_zefix_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = ZefixClient::from_config(&RegistryConfig::with_base_url(server.uri())).unwrap();
    let err = client.search("Muster AG", &SearchOptions::default()).await.unwrap_err();
    assert!(matches!(err, Error::Status { api: "Zefix", status: 500 }));
}

#[tokio::test]
async fn test_finma_search_posts_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/en/api/search/getresult"))
        .and(body_string_contains("query=Muster"))
        .and(body_string_contains("Order=4"))
        .and(body_string_contains("ds=%7B33E1F240-35A3-46B2-ADC3-61F936C7E186%7D"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Items": [],
            "Count": 0,
            "Searchstring": "Muster",
            "Facets": [],
            "ResultsPerPage": 10,
            "Skip": 0,
            "MaxResultCount": 500,
            "Bankruptcy": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = FinmaClient::from_config(&RegistryConfig::with_base_url(server.uri())).unwrap();
    let page = client
        .search("Muster", registry_clients::finma::DEFAULT_ORDER, 0)
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.bankruptcy.finished_count, 0);
}

#[tokio::test]
async fn test_finma_unexpected_body_is_schema_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = FinmaClient::from_config(&RegistryConfig::with_base_url(server.uri())).unwrap();
    let err = client.search("Muster", 4, 0).await.unwrap_err();
    assert!(matches!(err, Error::Schema { api: "FINMA", .. }));
}

#[tokio::test]
async fn test_shab_search_sends_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/publications"))
        .and(query_param("keyword", "Muster AG"))
        .and(query_param("rubrics", "HR"))
        .and(query_param("publicationStates", "PUBLISHED"))
        .and(query_param("pageRequest.size", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [publication("p-1")],
            "total": 7,
            "pageRequest": {"sortOrders": [], "page": 0, "size": 5}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ShabClient::from_config(&RegistryConfig::with_base_url(server.uri())).unwrap();
    let query = ShabQuery {
        page_size: 5,
        publication_states: vec![registry_clients::PublicationState::Published],
        rubrics: vec!["HR".to_string()],
        ..ShabQuery::new("Muster AG")
    };
    let page = client.search(&query).await.unwrap();

    assert_eq!(page.total, 7);
    assert_eq!(page.content[0].meta.display_title(), Some("Neueintragung Muster AG"));
}

#[tokio::test]
async fn test_shab_get_publication() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/publications/p-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(publication("p-1")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/publications/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = ShabClient::from_config(&RegistryConfig::with_base_url(server.uri())).unwrap();

    let publication = client.get_publication("p-1").await.unwrap();
    assert_eq!(publication.meta.id, "p-1");

    let err = client.get_publication("missing").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "unexpected error: {}", err);
}
