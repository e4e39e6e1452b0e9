use chrono::{DateTime, Duration, TimeZone, Utc};
use licprobe::commands::probe::run_with_client;
use licprobe::core::{CompanyInfo, Config, ProvisioningError, ReportProfile};

use super::common::{channels, sku, value_of, FakeDirectory};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

#[test]
fn test_e3_free_and_total() {
    let client = FakeDirectory::with_skus(vec![sku("tenant:ENTERPRISEPACK", 100, 95)]);
    let output = run_with_client(&client, &Config::default(), now());

    assert!(!output.is_error);
    assert_eq!(
        value_of(&output.document, "OFFICE 365 E3 - Free Licenses").as_deref(),
        Some("5")
    );
    assert_eq!(
        value_of(&output.document, "OFFICE 365 E3 - Total Licenses").as_deref(),
        Some("100")
    );
}

#[test]
fn test_exclude_drops_sku_channels() {
    let client = FakeDirectory::with_skus(vec![
        sku("tenant:ENTERPRISEPACK", 10, 1),
        sku("tenant:POWER_BI_STANDARD", 1000, 5),
    ]);
    let config = Config {
        exclude_skus: vec!["tenant:POWER_BI_STANDARD".into()],
        ..Default::default()
    };
    let output = run_with_client(&client, &config, now());

    assert_eq!(
        channels(&output.document),
        vec![
            "Provisioning Errors",
            "OFFICE 365 E3 - Free Licenses",
            "OFFICE 365 E3 - Total Licenses",
        ]
    );
}

#[test]
fn test_include_ignores_exclude() {
    let client = FakeDirectory::with_skus(vec![
        sku("tenant:ENTERPRISEPACK", 10, 1),
        sku("tenant:X", 4, 1),
    ]);
    let config = Config {
        include_skus: vec!["tenant:X".into()],
        exclude_skus: vec!["tenant:X".into(), "tenant:ENTERPRISEPACK".into()],
        ..Default::default()
    };
    let output = run_with_client(&client, &config, now());

    let names = channels(&output.document);
    assert_eq!(names, vec!["Provisioning Errors", "X - Free Licenses", "X - Total Licenses"]);
    assert_eq!(value_of(&output.document, "X - Free Licenses").as_deref(), Some("3"));
}

#[test]
fn test_sync_disabled_has_no_age_channels() {
    let mut client = FakeDirectory::with_skus(vec![sku("tenant:ENTERPRISEPACK", 10, 1)]);
    client.company = CompanyInfo {
        dir_sync_enabled: false,
        last_dir_sync_time: Some(now() - Duration::hours(1)),
        password_sync_enabled: false,
        last_password_sync_time: Some(now() - Duration::hours(1)),
    };
    let output = run_with_client(&client, &Config::default(), now());

    assert!(!output.document.contains("DirSync"));
    assert!(!output.document.contains("Password Sync"));
}

#[test]
fn test_sync_enabled_reports_hours_with_limit() {
    let mut client = FakeDirectory::with_skus(vec![sku("tenant:ENTERPRISEPACK", 10, 1)]);
    client.company = CompanyInfo {
        dir_sync_enabled: true,
        last_dir_sync_time: Some(now() - Duration::minutes(45)),
        password_sync_enabled: true,
        last_password_sync_time: Some(now() - Duration::hours(13)),
    };
    let output = run_with_client(&client, &Config::default(), now());

    assert_eq!(
        value_of(&output.document, "Last DirSync (hours)").as_deref(),
        Some("0.75")
    );
    assert_eq!(
        value_of(&output.document, "Last Password Sync (hours)").as_deref(),
        Some("13.00")
    );
    assert!(output.document.contains("<LimitMaxWarning>12</LimitMaxWarning>"));
    assert!(output.document.contains("<Unit>TimeHours</Unit>"));
}

#[test]
fn test_provisioning_errors_are_annotated_and_escaped() {
    let mut client = FakeDirectory::with_skus(vec![sku("tenant:ENTERPRISEPACK", 10, 1)]);
    client.errors = vec![
        ProvisioningError {
            display_name: "Smith & Sons <svc>".into(),
        },
        ProvisioningError {
            display_name: "Bob".into(),
        },
    ];
    let output = run_with_client(&client, &Config::default(), now());

    assert_eq!(value_of(&output.document, "Provisioning Errors").as_deref(), Some("2"));
    assert!(output.document.contains(
        "<LimitWarningMsg>Provisioning errors for: Smith &amp; Sons &lt;svc&gt;, Bob</LimitWarningMsg>"
    ));
}

#[test]
fn test_detailed_profile() {
    let client = FakeDirectory::with_skus(vec![sku("tenant:ENTERPRISEPACK", 100, 95)]);
    let config = Config {
        profile: ReportProfile::Detailed,
        ..Default::default()
    };
    let output = run_with_client(&client, &config, now());

    assert_eq!(
        value_of(&output.document, "OFFICE 365 E3 - Consumed Licenses").as_deref(),
        Some("95")
    );
    assert_eq!(
        value_of(&output.document, "OFFICE 365 E3 - Warning Licenses").as_deref(),
        Some("0")
    );
}

#[test]
fn test_custom_thresholds_flow_into_document() {
    let client = FakeDirectory::with_skus(vec![sku("tenant:ENTERPRISEPACK", 100, 95)]);
    let mut config = Config::default();
    config.thresholds.free_min_warning = 20.0;
    config.thresholds.free_min_error = 2.5;
    let output = run_with_client(&client, &config, now());

    assert!(output.document.contains("<LimitMinWarning>20</LimitMinWarning>"));
    assert!(output.document.contains("<LimitMinError>2.5</LimitMinError>"));
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let mut client = FakeDirectory::with_skus(vec![
        sku("tenant:ENTERPRISEPACK", 100, 95),
        sku("tenant:SPE_E5", 20, 25),
        sku("tenant:UNKNOWN_PLAN", 0, 0),
    ]);
    client.company.dir_sync_enabled = true;
    client.company.last_dir_sync_time = Some(now() - Duration::seconds(4321));

    let config = Config {
        profile: ReportProfile::Percent,
        ..Default::default()
    };
    let first = run_with_client(&client, &config, now());
    let second = run_with_client(&client, &config, now());
    assert_eq!(first, second);
    assert_eq!(
        value_of(&first.document, "UNKNOWN_PLAN - Available Licenses (%)").as_deref(),
        Some("0.00")
    );
}
