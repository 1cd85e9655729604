use dangling_client::{CloudClient, RateLimit, RetryConfig, WebhookSink};
use dangling_core::{AlertSink, DanglingError, InventoryDimension, InventorySource, RecordType, ZoneDirectory};
use futures_util::StreamExt;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, max_retries: u32) -> CloudClient {
    CloudClient::builder(server.uri())
        .api_token("test-token")
        .retry(
            RetryConfig::new()
                .max_retries(max_retries)
                .initial_backoff(Duration::from_millis(1))
                .max_backoff(Duration::from_millis(5)),
        )
        .rate_limit(RateLimit::per_second(1000))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_list_zones_follows_markers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hostedzones"))
        .and(query_param("marker", "m2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "HostedZones": [
                {"Id": "/hostedzone/Z2", "Name": "internal.example.com.", "Config": {"PrivateZone": true}}
            ],
            "IsTruncated": false
        })))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/hostedzones"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "HostedZones": [
                {"Id": "/hostedzone/Z1", "Name": "example.com.", "Config": {"PrivateZone": false}}
            ],
            "IsTruncated": true,
            "NextMarker": "m2"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    let zones = client.list_zones().await.unwrap();

    let ids: Vec<&str> = zones.iter().map(|z| z.id.as_str()).collect();
    assert_eq!(ids, vec!["Z1", "Z2"]);
    assert!(!zones[0].private_zone);
    assert!(zones[1].private_zone);
}

#[tokio::test]
async fn test_records_stream_pages_lazily() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hostedzones/Z1/rrset"))
        .and(query_param("next", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ResourceRecordSets": [
                {"Name": "app.example.com.", "Type": "A",
                 "AliasTarget": {"DNSName": "dualstack.lb1.us-east-1.elb.amazonaws.com.", "EvaluateTargetHealth": false}}
            ],
            "IsTruncated": false
        })))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/hostedzones/Z1/rrset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ResourceRecordSets": [
                {"Name": "www.example.com.", "Type": "A", "ResourceRecords": [{"Value": "10.0.0.5"}]},
                {"Name": "docs.example.com.", "Type": "CNAME", "ResourceRecords": [{"Value": "example.github.io"}]}
            ],
            "IsTruncated": true,
            "NextRecordToken": "page-2"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    let records: Vec<_> = client.list_records("/hostedzone/Z1").collect().await;

    assert_eq!(records.len(), 3);
    let records: Vec<_> = records.into_iter().map(Result::unwrap).collect();
    assert_eq!(records[0].record_type, RecordType::A);
    assert_eq!(records[1].record_type, RecordType::Cname);
    assert_eq!(records[2].record_type, RecordType::Alias);
    assert!(records.iter().all(|r| r.zone_id == "Z1"));
}

#[tokio::test]
async fn test_failed_page_surfaces_directory_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hostedzones/Z1/rrset"))
        .and(query_param("next", "page-2"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"message": "throttled upstream"})))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/hostedzones/Z1/rrset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ResourceRecordSets": [
                {"Name": "www.example.com.", "Type": "A", "ResourceRecords": [{"Value": "10.0.0.5"}]}
            ],
            "IsTruncated": true,
            "NextRecordToken": "page-2"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, 1);
    let items: Vec<_> = client.list_records("Z1").collect().await;

    assert_eq!(items.len(), 2);
    assert!(items[0].is_ok());
    match &items[1] {
        Err(DanglingError::DirectoryUnavailable { zone_id, message }) => {
            assert_eq!(zone_id, "Z1");
            assert!(message.contains("throttled upstream"));
        }
        other => panic!("expected DirectoryUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_transient_error_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hostedzones"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/hostedzones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "HostedZones": [{"Id": "/hostedzone/Z1", "Name": "example.com."}],
            "IsTruncated": false
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, 2);
    let zones = client.list_zones().await.unwrap();
    assert_eq!(zones.len(), 1);
}

#[tokio::test]
async fn test_unauthorized_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hostedzones"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 3);
    let err = client.list_zones().await.unwrap_err();
    assert!(matches!(err, DanglingError::Unauthorized));
}

#[tokio::test]
async fn test_inventory_snapshot() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/loadbalancers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "LoadBalancers": [{"DNSName": "lb1.us-east-1.elb.amazonaws.com", "LoadBalancerName": "lb1"}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/instances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Reservations": [{"Instances": [
                {"PrivateIpAddress": "10.0.0.5", "State": {"Name": "running"}},
                {"PrivateIpAddress": "10.0.0.9", "State": {"Name": "terminated"}}
            ]}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    let snapshot = client.fetch_inventory().await.unwrap();

    assert!(!snapshot.is_partial());
    assert!(snapshot.has_load_balancer("dualstack.lb1.us-east-1.elb.amazonaws.com."));
    assert!(snapshot.has_instance_ip("10.0.0.5"));
    assert!(!snapshot.has_instance_ip("10.0.0.9"));
}

#[tokio::test]
async fn test_inventory_stops_on_repeated_or_empty_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/loadbalancers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "LoadBalancers": [{"DNSName": "lb1.us-east-1.elb.amazonaws.com"}],
            "NextMarker": "m1"
        })))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/instances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Reservations": [{"Instances": [{"PrivateIpAddress": "10.0.0.5"}]}],
            "NextToken": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    let snapshot = tokio::time::timeout(Duration::from_secs(5), client.fetch_inventory())
        .await
        .expect("paging should terminate")
        .unwrap();

    assert!(!snapshot.is_partial());
    assert!(snapshot.has_load_balancer("lb1.us-east-1.elb.amazonaws.com"));
    assert!(snapshot.has_instance_ip("10.0.0.5"));
}

#[tokio::test]
async fn test_inventory_partial_when_one_dimension_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/loadbalancers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "LoadBalancers": [{"DNSName": "lb1.us-east-1.elb.amazonaws.com"}]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/instances"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    let snapshot = client.fetch_inventory().await.unwrap();

    assert!(snapshot.is_partial());
    assert!(snapshot.is_available(InventoryDimension::LoadBalancers));
    assert!(!snapshot.is_available(InventoryDimension::Instances));
}

#[tokio::test]
async fn test_inventory_fails_when_both_dimensions_fail() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server, 0);
    let err = client.fetch_inventory().await.unwrap_err();
    assert!(matches!(err, DanglingError::InventoryUnavailable { .. }));
}

#[tokio::test]
async fn test_webhook_posts_text_body() {
    let server = MockServer::start().await;
    let message = "Dangling A Record Detected: www.example.com. -> 10.0.0.5";

    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(body_json(json!({ "text": message })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let sink = WebhookSink::new(&format!("{}/hook", server.uri())).unwrap();
    sink.send(message).await.unwrap();
}

#[tokio::test]
async fn test_webhook_rejection_is_notification_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("invalid_payload"))
        .mount(&server)
        .await;

    let sink = WebhookSink::new(&format!("{}/hook", server.uri())).unwrap();
    let err = sink.send("hello").await.unwrap_err();
    match err {
        DanglingError::NotificationFailed(msg) => assert!(msg.contains("invalid_payload")),
        other => panic!("expected NotificationFailed, got {other:?}"),
    }
}
