//! Serving normalization
//!
//! `food.get` returns one record per serving ("1 cup", "100 g", "serving",
//! ...), each carrying nutrients for that serving and the metric quantity it
//! corresponds to. [`normalize_servings`] re-keys those records by
//! description and adds one synthetic record per metric unit holding the
//! nutrients of a single unit, so callers can convert arbitrary metric
//! amounts.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Label the API uses for its generic, unnamed serving
const GENERIC_SERVING: &str = "serving";

/// Numeric serving fields that are rescaled to a single metric unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NutrientField {
    /// `calories`
    Calories,
    /// `carbohydrate`
    Carbohydrate,
    /// `cholesterol`
    Cholesterol,
    /// `fat`
    Fat,
    /// `fiber`
    Fiber,
    /// `iron`
    Iron,
    /// `metric_serving_amount`
    MetricServingAmount,
    /// `number_of_units`
    NumberOfUnits,
    /// `protein`
    Protein,
    /// `saturated_fat`
    SaturatedFat,
    /// `sodium`
    Sodium,
    /// `sugar`
    Sugar,
    /// `vitamin_a`
    VitaminA,
    /// `vitamin_c`
    VitaminC,
}

impl NutrientField {
    /// Every rescaled field, in wire-name order
    pub const ALL: [Self; 14] = [
        Self::Calories,
        Self::Carbohydrate,
        Self::Cholesterol,
        Self::Fat,
        Self::Fiber,
        Self::Iron,
        Self::MetricServingAmount,
        Self::NumberOfUnits,
        Self::Protein,
        Self::SaturatedFat,
        Self::Sodium,
        Self::Sugar,
        Self::VitaminA,
        Self::VitaminC,
    ];

    /// Wire name of the field
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Calories => "calories",
            Self::Carbohydrate => "carbohydrate",
            Self::Cholesterol => "cholesterol",
            Self::Fat => "fat",
            Self::Fiber => "fiber",
            Self::Iron => "iron",
            Self::MetricServingAmount => "metric_serving_amount",
            Self::NumberOfUnits => "number_of_units",
            Self::Protein => "protein",
            Self::SaturatedFat => "saturated_fat",
            Self::Sodium => "sodium",
            Self::Sugar => "sugar",
            Self::VitaminA => "vitamin_a",
            Self::VitaminC => "vitamin_c",
        }
    }
}

/// One serving as returned by `food.get`.
///
/// The API sends numbers as strings (`"140"`, `"0.500"`); both strings and
/// JSON numbers are accepted. Unparseable numbers decode as `None`. Fields
/// this type does not model are kept in `extra`.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServingRecord {
    #[serde(default, with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(default, with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub carbohydrate: Option<f64>,
    #[serde(default, with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub cholesterol: Option<f64>,
    #[serde(default, with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(default, with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    #[serde(default, with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub iron: Option<f64>,
    #[serde(default, with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub metric_serving_amount: Option<f64>,
    #[serde(default, with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub number_of_units: Option<f64>,
    #[serde(default, with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(default, with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub saturated_fat: Option<f64>,
    #[serde(default, with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
    #[serde(default, with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub sugar: Option<f64>,
    #[serde(default, with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub vitamin_a: Option<f64>,
    #[serde(default, with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub vitamin_c: Option<f64>,

    #[serde(default, with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub measurement_description: Option<String>,
    #[serde(default, with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub metric_serving_unit: Option<String>,
    #[serde(default, with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub serving_description: Option<String>,
    #[serde(default, with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub serving_id: Option<String>,
    #[serde(default, with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub serving_url: Option<String>,

    /// Unmodelled fields (calcium, potassium, ...), passed through untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ServingRecord {
    /// Read a rescalable field
    #[must_use]
    pub fn nutrient(&self, field: NutrientField) -> Option<f64> {
        match field {
            NutrientField::Calories => self.calories,
            NutrientField::Carbohydrate => self.carbohydrate,
            NutrientField::Cholesterol => self.cholesterol,
            NutrientField::Fat => self.fat,
            NutrientField::Fiber => self.fiber,
            NutrientField::Iron => self.iron,
            NutrientField::MetricServingAmount => self.metric_serving_amount,
            NutrientField::NumberOfUnits => self.number_of_units,
            NutrientField::Protein => self.protein,
            NutrientField::SaturatedFat => self.saturated_fat,
            NutrientField::Sodium => self.sodium,
            NutrientField::Sugar => self.sugar,
            NutrientField::VitaminA => self.vitamin_a,
            NutrientField::VitaminC => self.vitamin_c,
        }
    }

    /// Write a rescalable field
    pub fn set_nutrient(&mut self, field: NutrientField, value: f64) {
        let slot = match field {
            NutrientField::Calories => &mut self.calories,
            NutrientField::Carbohydrate => &mut self.carbohydrate,
            NutrientField::Cholesterol => &mut self.cholesterol,
            NutrientField::Fat => &mut self.fat,
            NutrientField::Fiber => &mut self.fiber,
            NutrientField::Iron => &mut self.iron,
            NutrientField::MetricServingAmount => &mut self.metric_serving_amount,
            NutrientField::NumberOfUnits => &mut self.number_of_units,
            NutrientField::Protein => &mut self.protein,
            NutrientField::SaturatedFat => &mut self.saturated_fat,
            NutrientField::Sodium => &mut self.sodium,
            NutrientField::Sugar => &mut self.sugar,
            NutrientField::VitaminA => &mut self.vitamin_a,
            NutrientField::VitaminC => &mut self.vitamin_c,
        };
        *slot = Some(value);
    }

    /// Synthesize the record for one `unit` from a reference serving of
    /// `metric_serving_amount` units. Returns `None` when the amount is
    /// missing, zero or negative.
    #[must_use]
    pub fn per_metric_unit(&self, unit: &str) -> Option<Self> {
        let amount = self.metric_serving_amount.filter(|a| a.is_finite() && *a > 0.0)?;

        let mut record = Self::default();
        for field in NutrientField::ALL {
            // Absent nutrients count as zero
            let value = self.nutrient(field).unwrap_or(0.0);
            record.set_nutrient(field, round3(value / amount));
        }

        record.number_of_units = Some(1.0);
        record.measurement_description = Some(unit.to_string());
        record.metric_serving_unit = Some(unit.to_string());
        record.serving_description = Some(unit.to_string());
        Some(record)
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

mod lenient_number {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_f64(*v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Number(n)) => Some(n),
            Some(Raw::Text(s)) => s.trim().parse().ok(),
            None => None,
        })
    }
}

mod lenient_text {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(v),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Text(s)) => Some(s),
            Some(Raw::Number(n)) => Some(n.to_string()),
            None => None,
        })
    }
}

/// Insertion-ordered map from display key to serving.
///
/// Inserting an existing key replaces the record but keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServingTable {
    entries: Vec<(String, ServingRecord)>,
}

impl ServingTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace
    pub fn insert(&mut self, key: impl Into<String>, record: ServingRecord) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = record;
        } else {
            self.entries.push((key, record));
        }
    }

    /// Look up a serving by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ServingRecord> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, r)| r)
    }

    /// Whether `key` is present
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in table order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in table order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ServingRecord)> {
        self.entries.iter().map(|(k, r)| (k.as_str(), r))
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for ServingTable {
    type Item = (String, ServingRecord);
    type IntoIter = std::vec::IntoIter<(String, ServingRecord)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for ServingTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, record) in &self.entries {
            map.serialize_entry(key, record)?;
        }
        map.end()
    }
}

/// Pull the servings out of a decoded `food.get` response.
///
/// `food.servings.serving` is a single object when the food has one serving
/// and an array otherwise; both come back as a sequence. Entries that fail to
/// decode are skipped.
#[must_use]
pub fn extract_servings(response: &Value) -> Vec<ServingRecord> {
    let Some(node) = response.pointer("/food/servings/serving") else {
        return Vec::new();
    };

    let items: Vec<&Value> = match node {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![node],
        _ => Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| match ServingRecord::deserialize(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "Skipping undecodable serving");
                None
            }
        })
        .collect()
}

/// Build the per-unit serving table.
///
/// 1. Servings are keyed by `measurement_description` (a later duplicate
///    replaces an earlier one).
/// 2. Each distinct `metric_serving_unit` maps to the description of the
///    *last* serving using it.
/// 3. Every unit that is not already a key gets a synthetic record with
///    nutrients divided by the reference serving's `metric_serving_amount`
///    and rounded to three decimals. Units whose reference lacks a usable
///    amount are skipped.
/// 4. The generic `serving` key becomes `serving(<serving_description>)`
///    and purely numeric keys are dropped.
#[must_use]
pub fn normalize_servings(servings: Vec<ServingRecord>) -> ServingTable {
    let mut table = ServingTable::new();
    for serving in servings {
        match serving.measurement_description.clone() {
            Some(description) if !description.is_empty() => table.insert(description, serving),
            _ => debug!("Skipping serving without measurement_description"),
        }
    }

    // unit -> description of its reference serving, in first-seen order
    let mut unit_refs: Vec<(String, String)> = Vec::new();
    for (description, serving) in table.iter() {
        let Some(unit) = serving.metric_serving_unit.as_deref().filter(|u| !u.is_empty()) else {
            continue;
        };
        if let Some(slot) = unit_refs.iter_mut().find(|(u, _)| u == unit) {
            slot.1 = description.to_string();
        } else {
            unit_refs.push((unit.to_string(), description.to_string()));
        }
    }

    for (unit, description) in unit_refs {
        if table.contains_key(&unit) {
            continue;
        }
        let Some(reference) = table.get(&description) else {
            continue;
        };
        match reference.per_metric_unit(&unit) {
            Some(record) => table.insert(unit, record),
            None => debug!(
                unit = %unit,
                serving = %description,
                "Skipping metric unit without a usable metric_serving_amount"
            ),
        }
    }

    relabel(table)
}

fn relabel(table: ServingTable) -> ServingTable {
    let mut relabeled = ServingTable::new();
    for (key, record) in table {
        if key == GENERIC_SERVING {
            match record.serving_description.as_deref().filter(|d| !d.is_empty()) {
                Some(description) => {
                    let label = format!("{GENERIC_SERVING}({description})");
                    relabeled.insert(label, record);
                }
                None => relabeled.insert(key, record),
            }
        } else if is_numeric_key(&key) {
            continue;
        } else {
            relabeled.insert(key, record);
        }
    }
    relabeled
}

/// Whether a key reads as a plain number (`"0"`, `"12"`, `"1.5"`, `"2e3"`)
#[must_use]
pub fn is_numeric_key(key: &str) -> bool {
    key.trim().parse::<f64>().is_ok_and(f64::is_finite)
}
