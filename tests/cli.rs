//! E2E tests for the command-line front end

use std::process::{Command, Output};

fn lmnpc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lmnpc"))
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("valid JSON output")
}

/// Reference property: 200k, 80% building, enrolled 1 January
#[test]
fn depreciation_reference_property() {
    let output = lmnpc(&["depreciation", "-i", "tests/data/declaration.json", "--json"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let schedules = json(&output);
    let paris = &schedules[0];
    assert_eq!(paris["property_id"], "paris");
    assert_eq!(paris["building_annual"], "6400.00");
    assert_eq!(paris["notary_annual"], "1000.00");
    assert_eq!(paris["agency_annual"], "333.33");
    assert_eq!(paris["total_annual"], "7733.33");
    assert_eq!(paris["total_pro_rata"], "7733.33");
}

#[test]
fn depreciation_table() {
    let output = lmnpc(&["depreciation", "-i", "tests/data/declaration.json"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let stdout = stdout(&output);
    assert!(stdout.contains("DEPRECIATION (2024)"));
    assert!(stdout.contains("paris"));
    assert!(stdout.contains("lyon"));
    assert!(stdout.contains("full year"));
    assert!(stdout.contains("Total deducted: 15466.66 €"));
}

#[test]
fn summary_json_output() {
    let output = lmnpc(&["summary", "-i", "tests/data/declaration.json", "--json"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let summary = json(&output);
    assert_eq!(summary["year"], 2024);
    assert_eq!(summary["results"].as_array().map(Vec::len), Some(2));
    assert_eq!(summary["results"][0]["result_after_depreciation"], "2866.67");
    assert_eq!(summary["totals"]["total_income"], "42000.00");
    assert_eq!(summary["totals"]["result_after_depreciation"], "-266.66");
    assert_eq!(summary["regime"]["recommended"], "real");
    assert_eq!(summary["regime"]["micro_bic_eligible"], true);
    assert_eq!(summary["cfe_estimate"], "681.00");
    assert_eq!(summary["advice"][0], "micro_bic_eligible");
    assert_eq!(summary["advice"][1], "loss_carry_forward");
    assert!(summary["advice_messages"][1]
        .as_str()
        .is_some_and(|m| m.contains("carried forward")));
}

#[test]
fn summary_text_output() {
    let output = lmnpc(&["summary", "-i", "tests/data/declaration.json"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let stdout = stdout(&output);
    assert!(stdout.contains("LMNP SUMMARY (2024)"));
    assert!(stdout.contains("TOTALS"));
    assert!(stdout.contains("Properties: 2"));
    assert!(stdout.contains("REGIME"));
    assert!(stdout.contains("Recommended: real"));
    assert!(stdout.contains("CFE ESTIMATE: 681.00 €"));
    assert!(stdout.contains("ADVICE"));
}

#[test]
fn summary_from_csv_with_year() {
    let output = lmnpc(&[
        "summary",
        "-i",
        "tests/data/declaration.csv",
        "--year",
        "2024",
        "--json",
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let summary = json(&output);
    assert_eq!(summary["results"][0]["property_id"], "nantes");
    assert_eq!(summary["results"][0]["result_after_depreciation"], "13066.67");
    // nice: enrolled 1 March 2024, 306 days, split suggested from 06000
    assert_eq!(summary["results"][1]["depreciation_deducted"], "4387.39");
    assert_eq!(summary["results"][1]["total_loan_cost"], "2500.00");
    assert_eq!(summary["totals"]["result_after_depreciation"], "13979.28");
}

#[test]
fn csv_without_year_fails() {
    let output = lmnpc(&["summary", "-i", "tests/data/declaration.csv"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("year"));
}

#[test]
fn regime_prefers_micro_bic() {
    let output = lmnpc(&["regime", "--income", "24000", "--charges", "8000", "--json"]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let result = json(&output);
    let comparison = &result["comparison"];
    assert_eq!(comparison["recommended"], "micro_bic");
    assert_eq!(comparison["micro_bic_base"], "12000.00");
    assert_eq!(comparison["real_base"], "16000.00");
    assert_eq!(comparison["estimated_saving"], "4000.00");
}

#[test]
fn regime_with_custom_threshold() {
    let output = lmnpc(&[
        "regime",
        "--params",
        "tests/data/params.json",
        "--income",
        "24000",
        "--charges",
        "8000",
        "--json",
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let comparison = &json(&output)["comparison"];
    assert_eq!(comparison["micro_bic_eligible"], false);
    assert_eq!(comparison["recommended"], "real");
    assert_eq!(comparison["estimated_saving"], "0.00");
}

#[test]
fn regime_rejects_negative_charges() {
    let output = lmnpc(&["regime", "--income", "24000", "--charges", "-1"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("charges"));
}

#[test]
fn cfe_bands() {
    let low = lmnpc(&["cfe", "--receipts", "4000", "--json"]);
    assert!(low.status.success(), "Command failed: {:?}", low);
    assert_eq!(json(&low)["cfe_estimate"], "227.00");

    let high = lmnpc(&["cfe", "--receipts", "50000", "--json"]);
    assert_eq!(json(&high)["cfe_estimate"], "681.00");

    let negative = lmnpc(&["cfe", "--receipts", "-10"]);
    assert!(!negative.status.success());
}

#[test]
fn split_suggestion() {
    let output = lmnpc(&["split", "75011"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout(&output).contains("15% land, 85% building"));
}

#[test]
fn validate_reports_every_issue() {
    let output = lmnpc(&["validate", "-i", "tests/data/invalid.json", "--json"]);
    assert_eq!(output.status.code(), Some(1));

    let report = json(&output);
    assert_eq!(report["property_count"], 4);
    assert_eq!(report["issue_count"], 3);
    assert_eq!(report["issues"][0]["type"], "InvalidConfiguration");
    assert_eq!(report["issues"][0]["field"], "properties[0].building_years");
    assert_eq!(report["issues"][1]["field"], "properties[1].notary_fees");
    assert_eq!(report["issues"][2]["field"], "properties[2].enrollment_date");
}

#[test]
fn validate_reports_duplicate_ids() {
    let output = lmnpc(&["validate", "-i", "tests/data/duplicate.json", "--json"]);
    assert_eq!(output.status.code(), Some(1));

    let report = json(&output);
    assert_eq!(report["issue_count"], 1);
    assert_eq!(report["issues"][0]["field"], "properties[1].id");

    let summary = lmnpc(&["summary", "-i", "tests/data/duplicate.json"]);
    assert!(!summary.status.success());
}

#[test]
fn regime_rejects_out_of_range_amount() {
    let output = lmnpc(&[
        "regime",
        "--income",
        "0.01",
        "--charges",
        "1000000000000000000000000000",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("amount out of range"));
}

#[test]
fn validate_clean_declaration() {
    let output = lmnpc(&["validate", "-i", "tests/data/declaration.json"]);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout(&output).contains("No issues found"));
}

#[test]
fn schema_formats() {
    let header = lmnpc(&["schema", "csv-header"]);
    assert!(header.status.success());
    assert!(stdout(&header).starts_with("id,address,postal_code,enrollment_date,acquisition_price"));

    let fields = lmnpc(&["schema", "csv-fields"]);
    assert!(stdout(&fields).contains("gross_rent"));

    let schema = lmnpc(&["schema", "json-schema"]);
    let schema = json(&schema);
    assert!(schema["properties"]["properties"].is_object());

    let params = lmnpc(&["schema", "params"]);
    assert_eq!(json(&params)["micro_bic_threshold"], "77700");

    let params_schema = json(&lmnpc(&["schema", "params-schema"]));
    assert!(params_schema["properties"]["cfe_bands"].is_object());
    assert!(params_schema["properties"]["pro_rata_days"].is_object());
}
