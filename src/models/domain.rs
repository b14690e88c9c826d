use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// School record as stored upstream
///
/// The realtime database is populated by hand, so every field used for
/// scoring is optional and leniently typed: a missing or wrong-typed value
/// deserializes to `None` instead of failing the whole record. Fields we
/// don't score on are carried through `extra` untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchoolRecord {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "ClassList::is_empty")]
    pub classes: ClassList,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub school_type: Option<String>,
    /// Distance in km from the reference point. The upstream data spells
    /// the field "distence"; kept as-is on the wire.
    #[serde(rename = "distence", default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub fee: Option<f64>,
    #[serde(default, deserialize_with = "lenient_bool", skip_serializing_if = "Option::is_none")]
    pub midday: Option<bool>,
    #[serde(rename = "girlSupport", default, deserialize_with = "lenient_bool", skip_serializing_if = "Option::is_none")]
    pub girl_support: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Grade levels offered by a school
///
/// Upstream stores either a scalar (`"10"` or `10`) or an array of scalars;
/// values are normalized to strings on the way in so numeric and string
/// class labels compare equal.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassList(pub Vec<String>);

impl ClassList {
    pub fn contains_class(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for ClassList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let classes = match value {
            Value::Array(items) => items.iter().filter_map(stringify_scalar).collect(),
            other => stringify_scalar(&other).into_iter().collect(),
        };
        Ok(ClassList(classes))
    }
}

/// Student/family preference profile, supplied per request and discarded
/// after scoring. Same lenient treatment as `SchoolRecord`: submitting a
/// field of the wrong type is equivalent to omitting it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentProfile {
    #[serde(default, deserialize_with = "lenient_string")]
    pub class: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub school_type: Option<String>,
    #[serde(rename = "maxDistance", default, deserialize_with = "lenient_f64")]
    pub max_distance_km: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub fee: Option<String>,
    #[serde(rename = "middayMeal", default, deserialize_with = "truthy")]
    pub midday_meal: bool,
    #[serde(rename = "girlChild", default, deserialize_with = "truthy")]
    pub girl_child: bool,
}

impl StudentProfile {
    /// Fee preference parsed from the categorical field; `None` for absent
    /// or unrecognized values, which disables the fee criterion.
    pub fn fee_preference(&self) -> Option<FeePreference> {
        match self.fee.as_deref().map(str::to_lowercase).as_deref() {
            Some("free") => Some(FeePreference::Free),
            Some("low") => Some(FeePreference::Low),
            Some("medium") => Some(FeePreference::Medium),
            _ => None,
        }
    }
}

/// Categorical fee preference bands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeePreference {
    Free,
    Low,
    Medium,
}

/// A school paired with its suitability score for one profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredSchool {
    #[serde(flatten)]
    pub school: SchoolRecord,
    pub score: u32,
}

/// Per-criterion point weights
///
/// Tuned ad hoc upstream; kept configurable but the literal defaults are
/// load-bearing for parity with the deployed behavior.
#[derive(Debug, Clone, Copy)]
pub struct ScoreWeights {
    pub class: u32,
    pub location: u32,
    pub school_type: u32,
    pub distance: u32,
    pub fee: u32,
    pub midday_meal: u32,
    pub girl_child: u32,
}

impl ScoreWeights {
    /// Highest score any school can reach (120 with defaults).
    pub fn max_total(&self) -> u32 {
        self.class
            + self.location
            + self.school_type
            + self.distance
            + self.fee
            + self.midday_meal
            + self.girl_child
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            class: 30,
            location: 20,
            school_type: 20,
            distance: 20,
            fee: 20,
            midday_meal: 5,
            girl_child: 5,
        }
    }
}

/// Coerce a scalar JSON value to its string form, matching how the
/// upstream data mixes numeric and string class labels.
fn stringify_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Accept only JSON numbers; anything else (including numeric strings)
/// deserializes as absent.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_f64))
}

/// Accept only JSON booleans.
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_bool))
}

/// Accept strings and numbers (stringified); anything else is absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(stringify_scalar))
}

/// JS-style truthiness for preference flags: null, false, 0 and the empty
/// string are false, everything else is true.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    })
}
