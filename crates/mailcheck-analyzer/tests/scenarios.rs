//! End-to-end analyses against a mocked DNS-over-HTTPS resolver.

use std::time::Duration;

use mailcheck_analyzer::{Analyzer, AnalyzerConfig};
use mailcheck_client::DohClient;
use mailcheck_core::{CheckStatus, Mechanism};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn answer(server: &MockServer, name: &str, rtype: &str, code: u16, data: &str) {
    Mock::given(method("GET"))
        .and(path("/resolve"))
        .and(query_param("name", name))
        .and(query_param("type", rtype))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Status": 0,
            "Answer": [{ "name": format!("{name}."), "type": code, "TTL": 300, "data": data }]
        })))
        .mount(server)
        .await;
}

async fn empty_for_everything_else(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/resolve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Status": 0 })))
        .with_priority(10)
        .mount(server)
        .await;
}

fn analyzer_for(server: &MockServer) -> Analyzer<DohClient> {
    let client = DohClient::builder()
        .endpoint(format!("{}/resolve", server.uri()))
        .timeout(Duration::from_secs(2))
        .build();
    Analyzer::new(client)
}

#[tokio::test]
async fn well_configured_domain_scores_full_marks() {
    let server = MockServer::start().await;
    answer(
        &server,
        "good-example.com",
        "TXT",
        16,
        "\"v=spf1 include:_spf.google.com ~all\"",
    )
    .await;
    answer(
        &server,
        "_dmarc.good-example.com",
        "TXT",
        16,
        "\"v=DMARC1; p=reject; rua=mailto:d@good-example.com\"",
    )
    .await;
    answer(
        &server,
        "google._domainkey.good-example.com",
        "TXT",
        16,
        "\"v=DKIM1; k=rsa; \" \"p=MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEA\"",
    )
    .await;
    answer(&server, "good-example.com", "MX", 15, "1 aspmx.l.google.com.").await;
    empty_for_everything_else(&server).await;

    let report = analyzer_for(&server)
        .analyze("https://www.Good-Example.com/pricing")
        .await
        .unwrap();

    assert_eq!(report.domain().as_str(), "good-example.com");
    assert!(report.issues().is_empty());
    assert_eq!(report.score(), 100);
    let dkim = report.result(Mechanism::Dkim);
    assert_eq!(dkim.selector.as_deref(), Some("google"));
    assert_eq!(
        dkim.record.as_deref(),
        Some("v=DKIM1; k=rsa; p=MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEA")
    );

    // google is first in the default list, so no other selector is queried
    let queried_selectors = server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.query().is_some_and(|q| q.contains("_domainkey")))
        .count();
    assert_eq!(queried_selectors, 1);
}

#[tokio::test]
async fn bare_domain_fails_everything() {
    let server = MockServer::start().await;
    empty_for_everything_else(&server).await;

    let report = analyzer_for(&server).analyze("broken-example.com").await.unwrap();

    assert_eq!(report.results().count(), 4);
    assert!(report.results().all(|r| r.status == CheckStatus::Fail));
    assert_eq!(report.issues(), &Mechanism::ALL);
    assert_eq!(report.score(), 0);
}

#[tokio::test]
async fn resolver_outage_still_yields_a_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = AnalyzerConfig::new().selectors(["google", "selector1"]);
    let client = DohClient::builder()
        .endpoint(format!("{}/resolve", server.uri()))
        .build();
    let report = Analyzer::with_config(client, config)
        .analyze("outage-example.com")
        .await
        .unwrap();

    assert_eq!(report.results().count(), 4);
    assert_eq!(report.result(Mechanism::Spf).status, CheckStatus::Error);
    assert_eq!(report.result(Mechanism::Dmarc).status, CheckStatus::Error);
    assert_eq!(report.result(Mechanism::Mx).status, CheckStatus::Error);
    assert_eq!(report.result(Mechanism::Dkim).status, CheckStatus::Fail);
    assert!(report.result(Mechanism::Dkim).message.contains("2 lookup(s) failed"));
}

#[tokio::test]
async fn report_serializes_for_downstream_consumers() {
    let server = MockServer::start().await;
    answer(&server, "json-example.com", "TXT", 16, "\"v=spf1 -all\"").await;
    empty_for_everything_else(&server).await;

    let report = analyzer_for(&server).analyze("json-example.com").await.unwrap();
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["domain"], "json-example.com");
    assert_eq!(value["spf"]["status"], "pass");
    assert_eq!(value["issues"], json!(["dkim", "dmarc", "mx"]));
    assert_eq!(value["score"], 30);
}
