use chrono::Utc;
use licprobe::commands::probe::run_with_client;
use licprobe::core::Config;
use licprobe::ProbeError;

use super::common::{channels, sku, FailAt, FakeDirectory};

fn assert_error_document(document: &str, message: &str) {
    assert!(document.contains("<error>1</error>"), "{}", document);
    assert!(document.contains(&format!("<text>{}</text>", message)), "{}", document);
    assert!(channels(document).is_empty());
    assert!(!document.contains("<result>"));
}

#[test]
fn test_nothing_left_after_filter() {
    let client = FakeDirectory::with_skus(vec![sku("tenant:ENTERPRISEPACK", 10, 1)]);
    let config = Config {
        exclude_skus: vec!["tenant:ENTERPRISEPACK".into()],
        ..Default::default()
    };
    let output = run_with_client(&client, &config, Utc::now());

    assert!(output.is_error);
    assert_error_document(&output.document, "No Skus found");
}

#[test]
fn test_empty_tenant() {
    let client = FakeDirectory::with_skus(vec![]);
    let output = run_with_client(&client, &Config::default(), Utc::now());
    assert_error_document(&output.document, "No Skus found in tenant");
}

#[test]
fn test_authentication_failure() {
    let mut client = FakeDirectory::with_skus(vec![sku("tenant:ENTERPRISEPACK", 10, 1)]);
    client.fail_at = FailAt::Skus;
    client.failure = ProbeError::AuthenticationFailure;
    let output = run_with_client(&client, &Config::default(), Utc::now());
    assert_error_document(&output.document, "Authentication failed: Skus failed");
}

#[test]
fn test_company_info_failure() {
    let mut client = FakeDirectory::with_skus(vec![sku("tenant:ENTERPRISEPACK", 10, 1)]);
    client.fail_at = FailAt::CompanyInfo;
    let output = run_with_client(&client, &Config::default(), Utc::now());
    assert_error_document(
        &output.document,
        "Could not read company information: Upstream error: CompanyInfo failed",
    );
}

#[test]
fn test_provisioning_lookup_failure() {
    let mut client = FakeDirectory::with_skus(vec![sku("tenant:ENTERPRISEPACK", 10, 1)]);
    client.fail_at = FailAt::ProvisioningErrors;
    client.failure = ProbeError::UpstreamUnavailable;
    let output = run_with_client(&client, &Config::default(), Utc::now());
    assert_error_document(&output.document, "Upstream unavailable: ProvisioningErrors failed");
}

#[test]
fn test_strict_exit_only_affects_error_documents() {
    let client = FakeDirectory::with_skus(vec![]);
    let output = run_with_client(&client, &Config::default(), Utc::now());
    assert_eq!(output.exit_code(false), 0);
    assert_eq!(output.exit_code(true), 1);
}
