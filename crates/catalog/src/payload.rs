use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Filter values proposed by the assistant for one question.
///
/// The payload arrives as loosely shaped JSON from an external service, so
/// every field is optional and deserialized leniently: a field of the wrong
/// shape becomes `None` instead of failing the whole payload. `None` always
/// means "leave the current filter value alone".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssistantFilterPayload {
    #[serde(
        rename = "type",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub plan_type: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(deserialize_with = "lenient_bool", skip_serializing_if = "Option::is_none")]
    pub cashback_only: Option<bool>,
    /// Free text such as `"$100 - $300"`; parsed during the merge, not here.
    #[serde(deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(
        deserialize_with = "lenient_string_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub benefits: Option<Vec<String>>,
}

impl AssistantFilterPayload {
    /// Parse a payload out of an arbitrary JSON value.
    ///
    /// A value that is not a JSON object has no usable fields and comes
    /// back empty. This never fails.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    /// True when no field survived parsing.
    pub fn is_empty(&self) -> bool {
        self.plan_type.is_none()
            && self.region.is_none()
            && self.term.is_none()
            && self.min_rating.is_none()
            && self.cashback_only.is_none()
            && self.price_range.is_none()
            && self.benefits.is_none()
    }
}

// ── Lenient field adapters ────────────────────────────────────
// Each accepts its expected shape and maps everything else (null, wrong
// type, malformed) to None, so one bad field never poisons the payload.

fn lenient_string<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(de)?;
    Ok(match v {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Numbers and numeric strings both count as "convertible to a finite
/// number"; anything non-finite is rejected.
fn lenient_number<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(de)?;
    Ok(match v {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    })
}

fn lenient_bool<'de, D>(de: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(de)?;
    Ok(match v {
        Value::Bool(b) => Some(b),
        _ => None,
    })
}

/// An array qualifies only when every member is a string; a mixed array is
/// rejected wholesale rather than partially accepted.
fn lenient_string_list<'de, D>(de: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(de)?;
    Ok(match v {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect::<Option<Vec<String>>>(),
        _ => None,
    })
}
