use serde::{Deserialize, Serialize};

pub const FIND_SEATS_ROUTE: &str = "/api/find_seats";
pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub train_no: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub station: String,
    #[serde(default)]
    pub dest_station: String,
    #[serde(default)]
    pub class_pref: String,
}

/// A contiguous vacant stretch on one berth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatRow {
    #[serde(rename = "Coach")]
    pub coach: String,
    #[serde(rename = "Seat")]
    pub seat: String,
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "To")]
    pub to: String,
    #[serde(rename = "Type")]
    pub seat_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_advice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<Vec<SeatRow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SearchResult {
    pub fn success(rows: Vec<SeatRow>, ai_advice: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            ai_advice: Some(ai_advice.into()),
            raw_data: Some(rows),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            ai_advice: None,
            raw_data: None,
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_rows_use_capitalised_keys() {
        let row = SeatRow {
            coach: "B3".into(),
            seat: "12".into(),
            from: "NDLS".into(),
            to: "CNB".into(),
            seat_type: "LB".into(),
        };
        assert_eq!(
            serde_json::to_value(&row).expect("json"),
            serde_json::json!({
                "Coach": "B3",
                "Seat": "12",
                "From": "NDLS",
                "To": "CNB",
                "Type": "LB"
            })
        );
    }

    #[test]
    fn error_result_omits_absent_fields() {
        let value = serde_json::to_value(SearchResult::error("No data found.")).expect("json");
        assert_eq!(
            value,
            serde_json::json!({ "status": "error", "message": "No data found." })
        );
    }

    #[test]
    fn result_without_optional_fields_parses() {
        let result: SearchResult =
            serde_json::from_str(r#"{"status":"success"}"#).expect("parse");
        assert!(result.is_success());
        assert!(result.raw_data.is_none());
        assert!(result.ai_advice.is_none());
    }
}
