//! Decoding of arbitrary Postgres rows into JSON
//!
//! Result sets come from caller-supplied SQL, so column types are only known
//! at runtime. Cells are decoded by the column's Postgres type name.

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::{Number, Value};
use sqlx::postgres::PgRow;
use sqlx::{Column, Row as _, TypeInfo, ValueRef};
use tracing::warn;
use uuid::Uuid;

use crate::models::Row;

/// Largest integer a double-precision JSON consumer holds exactly
const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;
/// Significant decimal digits that always survive an f64 round trip
const F64_DIGITS: usize = 15;

/// Convert one row into an ordered column → value map
pub fn row_to_json(row: &PgRow) -> Row {
    let mut out = Row::with_capacity(row.len());

    for column in row.columns() {
        let type_name = column.type_info().name();
        let value = decode_cell(row, column.ordinal(), type_name).unwrap_or_else(|e| {
            warn!(
                column = column.name(),
                pg_type = type_name,
                error = %e,
                "Failed to decode column, returning null"
            );
            Value::Null
        });
        out.insert(column.name().to_string(), value);
    }

    out
}

fn decode_cell(row: &PgRow, index: usize, type_name: &str) -> Result<Value, sqlx::Error> {
    if row.try_get_raw(index)?.is_null() {
        return Ok(Value::Null);
    }

    let value = match type_name {
        "BOOL" => Value::Bool(row.try_get::<bool, _>(index)?),
        "INT2" => Value::from(row.try_get::<i16, _>(index)?),
        "INT4" => Value::from(row.try_get::<i32, _>(index)?),
        "INT8" => Value::from(row.try_get::<i64, _>(index)?),
        "FLOAT4" => Value::from(row.try_get::<f32, _>(index)?),
        "FLOAT8" => Value::from(row.try_get::<f64, _>(index)?),
        // NaN has no BigDecimal form and decodes to an error (null)
        "NUMERIC" => numeric_to_json(&row.try_get::<BigDecimal, _>(index)?),
        "JSON" | "JSONB" => row.try_get::<Value, _>(index)?,
        // sqlx reports BPCHAR (`CHAR(n)`) as "CHAR"
        "TEXT" | "VARCHAR" | "CHAR" | "NAME" | "UNKNOWN" => {
            Value::String(row.try_get::<String, _>(index)?)
        }
        // Single-byte internal "char"
        "\"CHAR\"" => Value::String(char::from(row.try_get::<i8, _>(index)? as u8).to_string()),
        "UUID" => Value::String(row.try_get::<Uuid, _>(index)?.to_string()),
        "TIMESTAMPTZ" => Value::String(row.try_get::<DateTime<Utc>, _>(index)?.to_rfc3339()),
        "TIMESTAMP" => Value::String(
            row.try_get::<NaiveDateTime, _>(index)?
                .format("%Y-%m-%dT%H:%M:%S%.f")
                .to_string(),
        ),
        "DATE" => Value::String(row.try_get::<NaiveDate, _>(index)?.to_string()),
        "TIME" => Value::String(row.try_get::<NaiveTime, _>(index)?.to_string()),
        "BYTEA" => Value::String(format!(
            "\\x{}",
            hex::encode(row.try_get::<Vec<u8>, _>(index)?)
        )),
        "TEXT[]" | "VARCHAR[]" | "CHAR[]" | "NAME[]" => {
            Value::from(row.try_get::<Vec<Option<String>>, _>(index)?)
        }
        "INT2[]" => Value::from(row.try_get::<Vec<Option<i16>>, _>(index)?),
        "INT4[]" => Value::from(row.try_get::<Vec<Option<i32>>, _>(index)?),
        "INT8[]" => Value::from(row.try_get::<Vec<Option<i64>>, _>(index)?),
        "BOOL[]" => Value::from(row.try_get::<Vec<Option<bool>>, _>(index)?),
        "FLOAT4[]" => Value::from(row.try_get::<Vec<Option<f32>>, _>(index)?),
        "FLOAT8[]" => Value::from(row.try_get::<Vec<Option<f64>>, _>(index)?),
        // Enums, citext and text domains arrive as UTF-8 in binary format too
        _ => Value::String(row.try_get_unchecked::<String, _>(index)?),
    };

    Ok(value)
}

/// NUMERIC becomes a JSON number when an f64 carries it exactly, otherwise
/// its plain decimal text
pub(crate) fn numeric_to_json(value: &BigDecimal) -> Value {
    let normalized = value.normalized();
    let (digits, exponent) = normalized.as_bigint_and_exponent();
    let significant = digits.to_string().trim_start_matches('-').len();

    // Negative exponent means an integral value; print it without E notation
    let text = if exponent < 0 {
        normalized.with_scale(0).to_string()
    } else {
        value.to_string()
    };

    if significant <= F64_DIGITS && value.abs() <= BigDecimal::from(MAX_SAFE_INTEGER) {
        if let Some(number) = text.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(number);
        }
    }

    Value::String(text)
}
