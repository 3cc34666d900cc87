//! Integration tests for the payslip engine.
//!
//! This test suite covers:
//! - Reference scenarios through the HTTP API
//! - Local tax steps and income tax brackets end to end
//! - Editing sessions with write-back, overrides, save and resume
//! - Loading the statutory schedule from YAML
//! - Error cases

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;

use payslip_engine::api::{AppState, create_router};
use payslip_engine::calculation::{compute_breakdown, compute_income_tax};
use payslip_engine::config::{ConfigLoader, StatutoryConfig};
use payslip_engine::models::{
    EmployeeProfile, FamilyQuotient, PayPeriod, PayPeriodInputs, PeriodKind, format_currency,
};
use payslip_engine::session::{
    InMemoryEmployeeDirectory, InMemoryPayslipStore, PayslipEditor, PayslipStore,
    ReconcileOutcome,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn post_compute(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/payslips/compute")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn create_request(employee_id: &str, parts: &str, remuneration: Value) -> Value {
    json!({
        "employee": {
            "id": employee_id,
            "family_quotient_parts": parts
        },
        "inputs": {
            "remuneration": remuneration
        }
    })
}

fn assert_amount(result: &Value, field: &str, expected: &str) {
    let actual = result["breakdown"][field].as_str().unwrap();
    assert_eq!(
        decimal(actual).normalize(),
        decimal(expected).normalize(),
        "Expected {} {}, got {}",
        field,
        expected,
        actual
    );
}

fn config() -> Arc<StatutoryConfig> {
    Arc::new(StatutoryConfig::default())
}

fn march_2026() -> PayPeriod {
    PayPeriod {
        kind: PeriodKind::Monthly,
        start_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
    }
}

fn employee(id: &str, base: &str, parts: &str) -> EmployeeProfile {
    let mut employee = EmployeeProfile::new(id);
    employee.family_quotient_parts = decimal(parts);
    employee.default_remuneration.set_base_salary(decimal(base));
    employee
}

// =============================================================================
// SECTION 1: Reference Scenarios
// =============================================================================

#[tokio::test]
async fn test_scenario_a_single_part_200000() {
    let router = create_router_for_test();
    let request = create_request("emp_a", "1", json!({ "base_salary": "200000" }));

    let (status, result) = post_compute(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(&result, "gross_social", "200000");
    assert_amount(&result, "gross_fiscal", "200000");
    assert_amount(&result, "income_tax", "21250");

    let steps = result["audit_trace"]["steps"].as_array().unwrap();
    let income_step = steps
        .iter()
        .find(|s| s["rule_id"] == "income_tax")
        .unwrap();
    assert_eq!(income_step["output"]["bracket_lower_bound"], "150000");
    assert_eq!(income_step["output"]["rate"], "0.25");
    assert_eq!(income_step["output"]["deduction"], "28750");
}

#[tokio::test]
async fn test_scenario_b_two_parts_200000() {
    let router = create_router_for_test();
    let request = create_request("emp_b", "2", json!({ "base_salary": "200000" }));

    let (status, result) = post_compute(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(&result, "income_tax", "8000");

    let steps = result["audit_trace"]["steps"].as_array().unwrap();
    let income_step = steps
        .iter()
        .find(|s| s["rule_id"] == "income_tax")
        .unwrap();
    assert_eq!(income_step["output"]["per_part_income"], "100000");
    assert_eq!(income_step["output"]["bracket_lower_bound"], "80000");
    assert_eq!(income_step["output"]["tax_per_part"], "4000");
}

#[tokio::test]
async fn test_scenario_c_fiscal_gross_50000() {
    let router = create_router_for_test();
    let request = create_request("emp_c", "1", json!({ "base_salary": 50000 }));

    let (status, result) = post_compute(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(&result, "income_tax", "0");
    assert_amount(&result, "local_tax", "300");
}

#[tokio::test]
async fn test_scenario_d_fiscal_gross_1500000() {
    let router = create_router_for_test();
    let request = create_request(
        "emp_d",
        "1",
        json!({ "base_salary": "1400000", "benefits_in_kind": "100000" }),
    );

    let (status, result) = post_compute(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(&result, "gross_social", "1400000");
    assert_amount(&result, "gross_fiscal", "1500000");
    assert_amount(&result, "local_tax", "1500");
}

// =============================================================================
// SECTION 2: Local Tax Steps and Income Tax Shape
// =============================================================================

#[tokio::test]
async fn test_local_tax_steps_through_api() {
    let cases = [
        ("85000", "300"),
        ("85001", "400"),
        ("133000", "400"),
        ("999999", "500"),
        ("1000000", "1500"),
    ];

    for (gross, expected) in cases {
        let router = create_router_for_test();
        let request = create_request("emp_local", "1", json!({ "base_salary": gross }));
        let (status, result) = post_compute(router, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_amount(&result, "local_tax", expected);
    }
}

#[test]
fn test_more_parts_lower_the_tax_on_200000() {
    let table = StatutoryConfig::default();
    let gross = decimal("200000");

    let taxes: Vec<Decimal> = ["1", "2", "3"]
        .iter()
        .map(|parts| {
            let quotient = FamilyQuotient::new(decimal(parts)).unwrap();
            compute_income_tax(gross, quotient, table.income_tax())
        })
        .collect();

    assert_eq!(taxes, vec![decimal("21250"), decimal("8000"), decimal("2000")]);
}

#[tokio::test]
async fn test_full_payslip_totals_through_api() {
    let router = create_router_for_test();
    let request = json!({
        "employee": { "id": "emp_full", "family_quotient_parts": 1 },
        "inputs": {
            "remuneration": {
                "base_salary": "180000",
                "above_scale_supplement": "20000",
                "benefits_in_kind": "30000"
            },
            "bonuses": { "transport": "25000", "meal": "10000" },
            "deductions": {
                "salary_advance_recovery": "15000",
                "mutual_insurance": "3000",
                "cash_advances": "2000"
            }
        }
    });

    let (status, result) = post_compute(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(&result, "gross_social", "200000");
    assert_amount(&result, "gross_fiscal", "230000");
    assert_amount(&result, "income_tax", "20250");
    assert_amount(&result, "total_non_statutory_deductions", "20000");
    assert_amount(&result, "net_before_bonuses", "180000");
    assert_amount(&result, "total_bonuses", "35000");
    assert_amount(&result, "net_pay", "215000");
    assert_amount(&result, "total_employer_contributions", "32300");
    assert_eq!(
        result["breakdown"]["contributions"]["mutual_insurance_total"],
        "6000"
    );
}

#[tokio::test]
async fn test_deductions_exceeding_gross_raise_warning() {
    let router = create_router_for_test();
    let request = json!({
        "employee": { "id": "emp_warn" },
        "inputs": {
            "remuneration": { "base_salary": "40000" },
            "deductions": { "cash_advances": "60000" }
        }
    });

    let (status, result) = post_compute(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(&result, "net_before_bonuses", "-20000");
    let warnings = result["audit_trace"]["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["code"], "DEDUCTIONS_EXCEED_GROSS");
}

// =============================================================================
// SECTION 3: Editing Sessions
// =============================================================================

#[test]
fn test_editor_session_end_to_end() {
    let directory: InMemoryEmployeeDirectory =
        [employee("emp_001", "200000", "1")].into_iter().collect();
    let mut store = InMemoryPayslipStore::new();

    let mut editor = PayslipEditor::open(&directory, "emp_001", config()).unwrap();
    assert_eq!(editor.inputs().statutory_overrides.income_tax, decimal("21250"));
    assert_eq!(editor.inputs().statutory_overrides.local_tax, decimal("500"));

    let outcome = editor.update(|inputs| {
        inputs.remuneration.set_benefits_in_kind(decimal("30000"));
        inputs.bonuses.set_transport(decimal("25000"));
    });
    assert_eq!(
        outcome,
        ReconcileOutcome::WroteBack {
            local_tax: decimal("500"),
            income_tax: decimal("20250"),
        }
    );
    assert_eq!(editor.update(|_| {}), ReconcileOutcome::Unchanged);

    let record = editor.save(&mut store, "acme", march_2026()).unwrap();
    assert_eq!(record.number, 1);
    assert_eq!(record.breakdown.net_pay, decimal("225000"));
    assert_eq!(
        format_currency(record.breakdown.net_pay, "FCFA"),
        "225 000 FCFA"
    );

    let second = PayslipEditor::open(&directory, "emp_001", config())
        .unwrap()
        .save(&mut store, "acme", march_2026())
        .unwrap();
    assert_eq!(second.number, 2);
    assert_eq!(store.list_for_employee("acme", "emp_001").len(), 2);
}

#[test]
fn test_resume_keeps_manual_override_until_breakdown_changes() {
    let mut store = InMemoryPayslipStore::new();
    let mut editor = PayslipEditor::new_payslip(employee("emp_002", "200000", "1"), config()).unwrap();
    editor.override_statutory(|o| o.set_income_tax(decimal("20000")));
    let record = editor.save(&mut store, "acme", march_2026()).unwrap();

    let stored = store.get("acme", PeriodKind::Monthly, record.number).unwrap();
    let mut resumed =
        PayslipEditor::resume(employee("emp_002", "200000", "1"), stored, config()).unwrap();

    assert_eq!(resumed.inputs().statutory_overrides.income_tax, decimal("20000"));
    assert_eq!(resumed.update(|_| {}), ReconcileOutcome::Unchanged);
    assert_eq!(resumed.inputs().statutory_overrides.income_tax, decimal("20000"));

    resumed.update(|inputs| inputs.remuneration.set_base_salary(decimal("210000")));
    // 210000 > 200000: 63000 - 48750
    assert_eq!(resumed.inputs().statutory_overrides.income_tax, decimal("14250"));

    let updated = resumed.save(&mut store, "acme", march_2026()).unwrap();
    assert_eq!(updated.number, record.number);
    assert_eq!(store.len(), 1);

    let mid_march = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
    let covering = store.list_covering("acme", mid_march);
    assert_eq!(covering.len(), 1);
    assert_eq!(covering[0].breakdown.gross_social, decimal("210000"));
}

#[test]
fn test_written_back_fields_do_not_change_the_breakdown() {
    let config = StatutoryConfig::default();
    let quotient = FamilyQuotient::new(decimal("1.5")).unwrap();
    let mut inputs = PayPeriodInputs::default();
    inputs.remuneration.set_base_salary(decimal("275000"));

    let before = compute_breakdown(&inputs, quotient, &config);
    inputs.statutory_overrides = before.statutory_overrides();
    let after = compute_breakdown(&inputs, quotient, &config);

    assert_eq!(before, after);
}

#[test]
fn test_open_unknown_employee_fails() {
    let directory = InMemoryEmployeeDirectory::new();
    assert!(PayslipEditor::open(&directory, "missing", config()).is_err());
}

// =============================================================================
// SECTION 4: Configuration
// =============================================================================

#[test]
fn test_yaml_schedule_matches_builtin() {
    let loaded = ConfigLoader::load("./config/default").unwrap().into_config();
    assert_eq!(loaded, StatutoryConfig::default());
}

#[test]
fn test_missing_config_directory() {
    assert!(ConfigLoader::load("./config/does_not_exist").is_err());
}

// =============================================================================
// SECTION 5: Error Cases
// =============================================================================

#[tokio::test]
async fn test_error_malformed_json() {
    let router = create_router_for_test();

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/payslips/compute")
                .header("Content-Type", "application/json")
                .body(Body::from("{\"employee\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_missing_employee_id() {
    let router = create_router_for_test();
    let request = json!({
        "employee": { "family_quotient_parts": "1" },
        "inputs": {}
    });

    let (status, result) = post_compute(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_error_quotient_below_one() {
    let router = create_router_for_test();
    let request = create_request("emp_bad", "0.5", json!({ "base_salary": "200000" }));

    let (status, result) = post_compute(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_QUOTIENT");
}

#[tokio::test]
async fn test_negative_and_text_amounts_are_zero() {
    let router = create_router_for_test();
    let request = create_request(
        "emp_lenient",
        "1",
        json!({ "base_salary": "-5000", "above_scale_supplement": "n/a" }),
    );

    let (status, result) = post_compute(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(&result, "gross_social", "0");
    assert_amount(&result, "net_pay", "0");
}
