use actix_web::error::ErrorBadRequest;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;
use sqlx::MySqlPool;

/// ===============================
/// SQL bindable value enum
/// ===============================
#[derive(Debug)]
pub enum SqlValue {
    String(String),
    I64(i64),
    F64(f64),
    Bool(bool),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Null,
}

/// ===============================
/// SQL update container
/// ===============================
#[derive(Debug)]
pub struct SqlUpdate {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

/// ===============================
/// Build dynamic UPDATE SQL
/// ===============================
/// Only keys in `allowed_columns` may appear in the payload: table and
/// column names are interpolated into the statement, so the allowlist is
/// what keeps arbitrary JSON keys out of the SQL text.
pub fn build_update_sql(
    table: &str,
    allowed_columns: &[&str],
    payload: &Value,
    id_column: &str,
    id_value: i64,
) -> Result<SqlUpdate, actix_web::Error> {
    let obj = payload
        .as_object()
        .ok_or_else(|| ErrorBadRequest("Payload must be a JSON object"))?;

    if obj.is_empty() {
        return Err(ErrorBadRequest("No fields provided for update"));
    }

    if let Some(unknown) = obj.keys().find(|k| !allowed_columns.contains(&k.as_str())) {
        return Err(ErrorBadRequest(format!(
            "Unknown column in update payload: {}",
            unknown
        )));
    }

    // Build SET clause
    let set_clause = obj
        .keys()
        .map(|k| format!("{} = ?", k))
        .collect::<Vec<_>>()
        .join(", ");

    let sql = format!("UPDATE {} SET {} WHERE {} = ?", table, set_clause, id_column);

    let mut values = Vec::with_capacity(obj.len() + 1);

    // Convert JSON values → SqlValue
    for value in obj.values() {
        match value {
            Value::String(s) => {
                if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                    values.push(SqlValue::Date(d));
                } else if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
                    values.push(SqlValue::DateTime(dt));
                } else if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M:%S") {
                    values.push(SqlValue::Time(t));
                } else if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M") {
                    // the attendance dialog posts bare HH:MM times
                    values.push(SqlValue::Time(t));
                } else {
                    values.push(SqlValue::String(s.clone()));
                }
            }
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    values.push(SqlValue::I64(i));
                } else if let Some(f) = n.as_f64() {
                    values.push(SqlValue::F64(f));
                }
            }
            Value::Bool(b) => values.push(SqlValue::Bool(*b)),
            Value::Null => values.push(SqlValue::Null),
            _ => return Err(ErrorBadRequest("Unsupported JSON value type")),
        }
    }

    // WHERE id = ?
    values.push(SqlValue::I64(id_value));

    Ok(SqlUpdate { sql, values })
}

/// ===============================
/// Execute the update
/// ===============================
pub async fn execute_update(pool: &MySqlPool, update: SqlUpdate) -> Result<u64, sqlx::Error> {
    let mut query = sqlx::query(&update.sql);

    for value in update.values {
        query = match value {
            SqlValue::String(v) => query.bind(v),
            SqlValue::I64(v) => query.bind(v),
            SqlValue::F64(v) => query.bind(v),
            SqlValue::Bool(v) => query.bind(v),
            SqlValue::Date(v) => query.bind(v),
            SqlValue::Time(v) => query.bind(v),
            SqlValue::DateTime(v) => query.bind(v),
            SqlValue::Null => query.bind(None::<String>),
        };
    }

    let result = query.execute(pool).await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ATTENDANCE_COLUMNS: &[&str] = &["employee_code", "date", "status", "time_in", "time_out"];

    #[test]
    fn builds_a_set_clause_per_payload_key() {
        let payload = json!({ "status": "late", "time_in": "09:20" });
        let update =
            build_update_sql("attendance", ATTENDANCE_COLUMNS, &payload, "id", 7).unwrap();

        assert!(update.sql.starts_with("UPDATE attendance SET "));
        assert!(update.sql.ends_with("WHERE id = ?"));
        assert!(update.sql.contains("status = ?"));
        assert!(update.sql.contains("time_in = ?"));
        // payload values plus the id bind
        assert_eq!(update.values.len(), 3);
        assert!(matches!(update.values.last(), Some(SqlValue::I64(7))));
    }

    #[test]
    fn recognizes_dates_and_clock_times_in_strings() {
        let payload = json!({
            "date": "2026-08-06",
            "time_in": "08:55",
            "time_out": "17:10:30",
            "status": "present"
        });
        let update =
            build_update_sql("attendance", ATTENDANCE_COLUMNS, &payload, "id", 1).unwrap();

        let date_hits = update
            .values
            .iter()
            .filter(|v| matches!(v, SqlValue::Date(_)))
            .count();
        let time_hits = update
            .values
            .iter()
            .filter(|v| matches!(v, SqlValue::Time(_)))
            .count();
        let string_hits = update
            .values
            .iter()
            .filter(|v| matches!(v, SqlValue::String(_)))
            .count();

        assert_eq!(date_hits, 1);
        assert_eq!(time_hits, 2);
        assert_eq!(string_hits, 1);
    }

    #[test]
    fn rejects_columns_outside_the_allowlist() {
        let payload = json!({ "status": "present", "password_hash": "x" });
        assert!(build_update_sql("attendance", ATTENDANCE_COLUMNS, &payload, "id", 1).is_err());
    }

    #[test]
    fn rejects_empty_and_non_object_payloads() {
        assert!(build_update_sql("attendance", ATTENDANCE_COLUMNS, &json!({}), "id", 1).is_err());
        assert!(build_update_sql("attendance", ATTENDANCE_COLUMNS, &json!([1]), "id", 1).is_err());
    }
}
