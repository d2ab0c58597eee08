use super::*;

use std::{
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_root(tag: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    env::temp_dir().join(format!("seat_engine_{tag}_{suffix}"))
}

fn write_chart(root: &Path, train_no: &str, label: &str, body: &str) {
    let dir = root.join(train_no);
    fs::create_dir_all(&dir).expect("train dir");
    fs::write(dir.join(format!("{label}.json")), body).expect("chart file");
}

const CHART: &str = r#"{
    "coachName": "ignored",
    "bdd": [
        { "berthNo": 1, "berthCode": "LB", "bsd": [{ "from": "NDLS", "to": "CNB", "occupancy": false }] }
    ]
}"#;

#[tokio::test]
async fn loads_charts_in_label_order_and_names_them_by_file() {
    let root = temp_root("order");
    write_chart(&root, "12345", "B2", CHART);
    write_chart(&root, "12345", "A1", CHART);
    fs::write(root.join("12345").join("notes.txt"), "skip me").expect("notes");

    let source = CapturedChartSource::new(&root);
    let charts = source
        .coach_charts("12345", ClassPreference::All)
        .await
        .expect("charts");

    let names: Vec<_> = charts.iter().map(|c| c.display_name().to_string()).collect();
    assert_eq!(names, vec!["A1", "B2"]);

    fs::remove_dir_all(root).expect("cleanup");
}

#[tokio::test]
async fn coaches_follow_numeric_order_within_a_class() {
    let root = temp_root("natural");
    for label in ["S10", "S2", "B10", "S1", "B2"] {
        write_chart(&root, "12345", label, CHART);
    }

    let source = CapturedChartSource::new(&root);
    let charts = source
        .coach_charts("12345", ClassPreference::All)
        .await
        .expect("charts");

    let names: Vec<_> = charts.iter().map(|c| c.display_name().to_string()).collect();
    assert_eq!(names, vec!["B2", "B10", "S1", "S2", "S10"]);

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn coach_order_key_splits_prefix_and_number() {
    assert_eq!(coach_order_key("S10"), ("S", Some(10), "10"));
    assert_eq!(coach_order_key("GS1"), ("GS", Some(1), "1"));
    assert!(coach_order_key("S2") < coach_order_key("S10"));
    assert!(coach_order_key("A1") < coach_order_key("B1"));
}

#[tokio::test]
async fn class_filter_skips_other_coaches() {
    let root = temp_root("class");
    write_chart(&root, "12345", "S1", CHART);
    write_chart(&root, "12345", "B1", CHART);
    write_chart(&root, "12345", "M2", CHART);

    let source = CapturedChartSource::new(&root);
    let charts = source
        .coach_charts("12345", ClassPreference::ThirdAc)
        .await
        .expect("charts");

    let names: Vec<_> = charts.iter().map(|c| c.display_name().to_string()).collect();
    assert_eq!(names, vec!["B1", "M2"]);

    fs::remove_dir_all(root).expect("cleanup");
}

#[tokio::test]
async fn malformed_capture_is_skipped() {
    let root = temp_root("malformed");
    write_chart(&root, "12345", "S1", "{ not json");
    write_chart(&root, "12345", "S2", CHART);

    let source = CapturedChartSource::new(&root);
    let charts = source
        .coach_charts("12345", ClassPreference::All)
        .await
        .expect("charts");
    assert_eq!(charts.len(), 1);
    assert_eq!(charts[0].display_name(), "S2");

    fs::remove_dir_all(root).expect("cleanup");
}

#[tokio::test]
async fn unknown_train_has_no_charts() {
    let source = CapturedChartSource::new(temp_root("missing"));
    let charts = source
        .coach_charts("99999", ClassPreference::All)
        .await
        .expect("charts");
    assert!(charts.is_empty());
}

#[tokio::test]
async fn rejects_train_numbers_that_escape_the_root() {
    let source = CapturedChartSource::new(temp_root("escape"));
    for bad in ["../etc", "a/b", ""] {
        let err = source
            .coach_charts(bad, ClassPreference::All)
            .await
            .expect_err("should reject");
        assert!(matches!(err, ChartSourceError::InvalidTrainNumber(_)));
    }
}
