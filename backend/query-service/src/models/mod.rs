/// Request, response and domain types for query-service
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One result row: column name → JSON cell, in projection order
pub type Row = Map<String, Value>;

/// Arbitrary JSON document attached to an approvable
pub type FeatureMap = Map<String, Value>;

/// Tabular query result
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RowSet {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl RowSet {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    /// Register a derived column so the column list keeps matching the rows
    pub fn push_column(&mut self, name: &str) {
        if !self.has_column(name) {
            self.columns.push(name.to_string());
        }
    }
}

/// Whether a statement is expected to produce rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryIntent {
    ReturnsRows,
    NoReturn,
}

/// Result of running a statement
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Rows(RowSet),
    Done { rows_affected: u64 },
}

/// Stored feature document for one approvable
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct FeatureRecord {
    pub approvable_id: i64,
    pub features: Value,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub success: bool,
    pub data: Vec<Row>,
    pub columns: Vec<String>,
}

impl From<RowSet> for QueryResponse {
    fn from(row_set: RowSet) -> Self {
        Self {
            success: true,
            data: row_set.rows,
            columns: row_set.columns,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FeatureUpdateRequest {
    pub approvable_id: i64,
    pub features: FeatureMap,
}

#[derive(Debug, Serialize)]
pub struct FeatureUpdateResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_push_column_is_idempotent() {
        let mut row_set = RowSet::new(vec!["id".to_string()], Vec::new());
        row_set.push_column("features");
        row_set.push_column("features");
        row_set.push_column("id");

        assert_eq!(row_set.columns, vec!["id", "features"]);
    }

    #[test]
    fn test_query_response_keeps_column_order() {
        let mut row = Row::new();
        row.insert("zeta".to_string(), json!(1));
        row.insert("alpha".to_string(), json!("a"));

        let response = QueryResponse::from(RowSet::new(
            vec!["zeta".to_string(), "alpha".to_string()],
            vec![row],
        ));

        let rendered = serde_json::to_string(&response).expect("serialize");
        assert_eq!(
            rendered,
            r#"{"success":true,"data":[{"zeta":1,"alpha":"a"}],"columns":["zeta","alpha"]}"#
        );
    }

    #[test]
    fn test_feature_update_request_requires_object() {
        let parsed: Result<FeatureUpdateRequest, _> =
            serde_json::from_value(json!({"approvable_id": 42, "features": ["risk"]}));
        assert!(parsed.is_err());

        let parsed: FeatureUpdateRequest =
            serde_json::from_value(json!({"approvable_id": 42, "features": {"risk": "low"}}))
                .expect("valid request");
        assert_eq!(parsed.approvable_id, 42);
        assert_eq!(parsed.features["risk"], "low");
    }
}
