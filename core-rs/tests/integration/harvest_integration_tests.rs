//! Integration tests for the harvesting pipeline over real HTTP
//!
//! A loopback server answers with canned HTTP/1.1 responses so that the
//! reqwest transport, the client and the aggregator run end to end:
//! - Query encoding and request headers
//! - Both result shapes
//! - Non-JSON bodies, error statuses and refused connections

use odissei_schema::config::DEFAULT_USER_AGENT;
use odissei_schema::schema::SchemaAggregator;
use odissei_schema::sparql::{HttpTransport, SparqlClient, SparqlQuery};
use odissei_schema::IngestError;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const PREDICATES: &str = r#"{"head":{"vars":["p"]},"results":{"bindings":[
    {"p":{"type":"uri","value":"https://portal.odissei.nl/schema/geospatial#hasLocation"}},
    {"p":{"type":"uri","value":"https://dataverse.org/schema/citation/author"}},
    {"p":{"type":"uri","value":"http://purl.org/dc/terms/title"}}
]}}"#;

const CLASSES: &str = r#"{"head":{"vars":["type"]},"results":{"bindings":[
    {"type":{"type":"uri","value":"http://xmlns.com/foaf/0.1/Person"}},
    {"type":{"type":"uri","value":"http://www.w3.org/2002/07/owl#Class"}}
]}}"#;

/// Canned reply: status, content type, body
type Reply = (u16, &'static str, String);

struct CannedServer {
    endpoint: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl CannedServer {
    /// Request heads received so far, lower-cased
    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn spawn_server<F>(respond: F) -> CannedServer
where
    F: Fn(&str) -> Reply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);

    tokio::spawn(async move {
        loop {
            let (mut stream, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };

            let mut head = Vec::new();
            let mut buf = [0u8; 4096];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => head.extend_from_slice(&buf[..n]),
                }
            }
            let head = String::from_utf8_lossy(&head).to_string();
            let request_line = head.lines().next().unwrap_or_default().to_string();
            seen.lock().unwrap().push(head.to_lowercase());

            let (status, content_type, body) = respond(&request_line);
            let response = format!(
                "HTTP/1.1 {} Canned\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                content_type,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    CannedServer {
        endpoint: format!("http://{}/sparql", addr),
        requests,
    }
}

/// Predicates or classes depending on the projection variable in the query
fn schema_endpoint(request_line: &str) -> Reply {
    if request_line.contains("%3Ftype") {
        (200, "application/sparql-results+json", CLASSES.to_string())
    } else {
        (200, "application/sparql-results+json", PREDICATES.to_string())
    }
}

fn client_for(endpoint: &str) -> SparqlClient {
    let http = reqwest::Client::builder()
        .no_proxy()
        .user_agent(DEFAULT_USER_AGENT)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    SparqlClient::with_transport(endpoint, Arc::new(HttpTransport::from_client(http))).unwrap()
}

#[tokio::test]
async fn test_full_harvest_over_http() {
    let server = spawn_server(schema_endpoint).await;
    let aggregator = SchemaAggregator::new(client_for(&server.endpoint));

    let doc = aggregator.build().await.unwrap();

    assert!(doc.is_consistent());
    assert_eq!(doc.metadata.endpoint, server.endpoint);
    assert_eq!(doc.metadata.total_predicates, 3);
    assert_eq!(doc.metadata.total_classes, 2);
    assert_eq!(doc.metadata.domain_specific_predicates, 2);
    assert_eq!(doc.metadata.domain_specific_classes, 1);
    assert_eq!(
        doc.namespaces.odissei_namespaces,
        vec!["https://portal.odissei.nl/schema/geospatial#"]
    );
    assert_eq!(
        doc.namespaces.dataverse_namespaces,
        vec!["https://dataverse.org/schema/citation/"]
    );
    assert_eq!(doc.namespaces.all_namespaces.len(), 5);
    assert!(doc.metadata.last_updated.is_none());

    // Predicates are fetched before classes
    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].contains("%3fp+where"));
    assert!(requests[1].contains("%3ftype"));
}

#[tokio::test]
async fn test_request_carries_encoded_query_and_headers() {
    let server = spawn_server(schema_endpoint).await;
    let client = client_for(&server.endpoint);

    client.execute(&SparqlQuery::distinct_predicates(7)).await.unwrap();

    let requests = server.requests();
    let head = &requests[0];
    assert!(head.starts_with("get /sparql?query=select+distinct+%3fp+where+%7b%3fs+%3fp+%3fo%7d+limit+7 http/1.1"));
    assert!(head.contains("accept: application/json"));
    assert!(head.contains("user-agent: odissei-schema-visualizer/1.0"));
}

#[tokio::test]
async fn test_query_limit_is_forwarded() {
    let server = spawn_server(schema_endpoint).await;
    let aggregator = SchemaAggregator::new(client_for(&server.endpoint)).with_limit(25);

    aggregator.build().await.unwrap();

    let requests = server.requests();
    assert!(requests.iter().all(|r| r.contains("limit+25")));
}

#[tokio::test]
async fn test_flat_list_responses() {
    let server = spawn_server(|request_line: &str| {
        let body = if request_line.contains("%3Ftype") {
            r#"[{"type":"http://xmlns.com/foaf/0.1/Person"}]"#
        } else {
            r#"[{"p":"https://portal.odissei.nl/schema/geospatial#hasLocation"}]"#
        };
        (200, "application/json", body.to_string())
    })
    .await;

    let doc = SchemaAggregator::new(client_for(&server.endpoint)).build().await.unwrap();

    assert_eq!(doc.predicates.all[0].local_name, "hasLocation");
    assert_eq!(doc.classes.all[0].local_name, "Person");
    assert_eq!(doc.metadata.domain_specific_classes, 1);
}

#[tokio::test]
async fn test_html_body_is_an_empty_result() {
    let server = spawn_server(|_: &str| {
        (200, "text/html", "<html><body>Service Unavailable</body></html>".to_string())
    })
    .await;
    let client = client_for(&server.endpoint);

    let terms = client.try_distinct_predicates(100).await.unwrap();
    assert!(terms.is_empty());

    // No classes at all is a failed ingestion, not an empty schema
    let err = SchemaAggregator::new(client).build().await.unwrap_err();
    assert_eq!(err.kind(), "empty_result");
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = spawn_server(|_: &str| (500, "text/plain", "Virtuoso 37000 Error".to_string())).await;
    let client = client_for(&server.endpoint);

    let err = client.execute(&SparqlQuery::distinct_classes(100)).await.unwrap_err();
    match err {
        IngestError::HttpStatus { code, query } => {
            assert_eq!(code, 500);
            assert!(query.starts_with("SELECT DISTINCT ?type"));
        }
        other => panic!("Expected HttpStatus, got {:?}", other),
    }

    // The lenient accessors swallow the failure
    assert!(client.get_distinct_classes(100).await.is_empty());
}

#[tokio::test]
async fn test_refused_connection_is_a_network_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{}/sparql", addr));
    let err = SchemaAggregator::new(client).build().await.unwrap_err();

    assert_eq!(err.kind(), "network");
}
