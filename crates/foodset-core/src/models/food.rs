//! Food and recipe records

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::coerce;
use crate::id::RecordId;

/// How a food was prepared
///
/// Values outside the known set are kept as `Unlisted` so that imported
/// data survives a round trip untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PreparationMethod {
    Raw,
    Baked,
    Boiled,
    Grilled,
    Fried,
    Steamed,
    Roasted,
    Sauteed,
    Smoked,
    SlowCooked,
    PressureCooked,
    AirFried,
    Other,
    Unlisted(String),
}

impl PreparationMethod {
    pub const KNOWN: [PreparationMethod; 13] = [
        PreparationMethod::Raw,
        PreparationMethod::Baked,
        PreparationMethod::Boiled,
        PreparationMethod::Grilled,
        PreparationMethod::Fried,
        PreparationMethod::Steamed,
        PreparationMethod::Roasted,
        PreparationMethod::Sauteed,
        PreparationMethod::Smoked,
        PreparationMethod::SlowCooked,
        PreparationMethod::PressureCooked,
        PreparationMethod::AirFried,
        PreparationMethod::Other,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            PreparationMethod::Raw => "Raw",
            PreparationMethod::Baked => "Baked",
            PreparationMethod::Boiled => "Boiled",
            PreparationMethod::Grilled => "Grilled",
            PreparationMethod::Fried => "Fried",
            PreparationMethod::Steamed => "Steamed",
            PreparationMethod::Roasted => "Roasted",
            PreparationMethod::Sauteed => "Sautéed",
            PreparationMethod::Smoked => "Smoked",
            PreparationMethod::SlowCooked => "Slow Cooked",
            PreparationMethod::PressureCooked => "Pressure Cooked",
            PreparationMethod::AirFried => "Air Fried",
            PreparationMethod::Other => "Other",
            PreparationMethod::Unlisted(s) => s,
        }
    }
}

impl From<String> for PreparationMethod {
    fn from(s: String) -> Self {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("sauteed") {
            return PreparationMethod::Sauteed;
        }
        Self::KNOWN
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(wanted))
            .unwrap_or(PreparationMethod::Unlisted(s))
    }
}

impl From<&str> for PreparationMethod {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<PreparationMethod> for String {
    fn from(method: PreparationMethod) -> Self {
        match method {
            PreparationMethod::Unlisted(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PreparationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recipe difficulty
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Unlisted(String),
}

impl Difficulty {
    pub fn as_str(&self) -> &str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Unlisted(s) => s,
        }
    }
}

impl From<String> for Difficulty {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Unlisted(s),
        }
    }
}

impl From<&str> for Difficulty {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<Difficulty> for String {
    fn from(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Unlisted(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything about a food except its identity
///
/// This is what a caller hands to `FoodStore::add`. Field names serialize
/// in camelCase; fields the model does not know are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodFields {
    #[serde(default, deserialize_with = "coerce::string")]
    pub name: String,
    #[serde(default, deserialize_with = "coerce::string")]
    pub category: String,
    #[serde(default, deserialize_with = "coerce::string")]
    pub serving_size: String,

    // Macronutrients
    #[serde(
        default,
        deserialize_with = "coerce::amount",
        serialize_with = "coerce::serialize_amount"
    )]
    pub calories: f64,
    #[serde(
        default,
        deserialize_with = "coerce::amount",
        serialize_with = "coerce::serialize_amount"
    )]
    pub protein: f64,
    #[serde(
        default,
        deserialize_with = "coerce::amount",
        serialize_with = "coerce::serialize_amount"
    )]
    pub fat: f64,
    #[serde(
        default,
        deserialize_with = "coerce::amount",
        serialize_with = "coerce::serialize_amount"
    )]
    pub carbohydrates: f64,
    #[serde(
        default,
        deserialize_with = "coerce::amount",
        serialize_with = "coerce::serialize_amount"
    )]
    pub fiber: f64,
    #[serde(
        default,
        deserialize_with = "coerce::amount",
        serialize_with = "coerce::serialize_amount"
    )]
    pub sugar: f64,

    // Micronutrients
    #[serde(
        default,
        deserialize_with = "coerce::optional_amount",
        serialize_with = "coerce::serialize_optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub sodium: Option<f64>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_amount",
        serialize_with = "coerce::serialize_optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub potassium: Option<f64>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_amount",
        serialize_with = "coerce::serialize_optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub calcium: Option<f64>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_amount",
        serialize_with = "coerce::serialize_optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub iron: Option<f64>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_amount",
        serialize_with = "coerce::serialize_optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub vitamin_a: Option<f64>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_amount",
        serialize_with = "coerce::serialize_optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub vitamin_c: Option<f64>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_amount",
        serialize_with = "coerce::serialize_optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub vitamin_d: Option<f64>,

    // Description
    #[serde(
        default,
        deserialize_with = "coerce::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub brand: Option<String>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub ingredients: Option<String>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub allergens: Option<String>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub preparation_method: Option<PreparationMethod>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_amount",
        serialize_with = "coerce::serialize_optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub glycemic_index: Option<f64>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,

    // Recipe
    #[serde(
        default,
        deserialize_with = "coerce::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub cooking_time: Option<String>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub difficulty: Option<Difficulty>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub instructions: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_amount",
        serialize_with = "coerce::serialize_optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub servings: Option<f64>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub cuisine_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub dietary_info: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub prep_time: Option<String>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub cook_time: Option<String>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_time: Option<String>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub equipment: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub tips: Option<String>,
    #[serde(
        default,
        deserialize_with = "coerce::optional_amount",
        serialize_with = "coerce::serialize_optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub nutrition_score: Option<f64>,

    /// Fields this version does not model, carried through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FoodFields {
    /// Create fields with the required values set
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        serving_size: impl Into<String>,
        calories: f64,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            serving_size: serving_size.into(),
            calories,
            ..Self::default()
        }
    }

    pub fn with_macros(
        mut self,
        protein: f64,
        fat: f64,
        carbohydrates: f64,
        fiber: f64,
        sugar: f64,
    ) -> Self {
        self.protein = protein;
        self.fat = fat;
        self.carbohydrates = carbohydrates;
        self.fiber = fiber;
        self.sugar = sugar;
        self
    }

    pub fn with_minerals(mut self, sodium: f64, potassium: f64, calcium: f64, iron: f64) -> Self {
        self.sodium = Some(sodium);
        self.potassium = Some(potassium);
        self.calcium = Some(calcium);
        self.iron = Some(iron);
        self
    }

    pub fn with_vitamins(mut self, vitamin_a: f64, vitamin_c: f64, vitamin_d: f64) -> Self {
        self.vitamin_a = Some(vitamin_a);
        self.vitamin_c = Some(vitamin_c);
        self.vitamin_d = Some(vitamin_d);
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_preparation(mut self, method: PreparationMethod) -> Self {
        self.preparation_method = Some(method);
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_instructions(mut self, steps: Vec<String>) -> Self {
        self.instructions = Some(steps);
        self
    }

    /// Check the conventions the store itself does not enforce
    pub fn validate(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();

        if self.name.trim().is_empty() {
            issues.push(FieldIssue::BlankName);
        }

        let amounts = [
            ("calories", Some(self.calories)),
            ("protein", Some(self.protein)),
            ("fat", Some(self.fat)),
            ("carbohydrates", Some(self.carbohydrates)),
            ("fiber", Some(self.fiber)),
            ("sugar", Some(self.sugar)),
            ("sodium", self.sodium),
            ("potassium", self.potassium),
            ("calcium", self.calcium),
            ("iron", self.iron),
            ("vitaminA", self.vitamin_a),
            ("vitaminC", self.vitamin_c),
            ("vitaminD", self.vitamin_d),
            ("servings", self.servings),
        ];
        for (field, value) in amounts {
            if let Some(value) = value.filter(|v| *v < 0.0) {
                issues.push(FieldIssue::Negative { field, value });
            }
        }

        if let Some(gi) = self.glycemic_index {
            if !(0.0..=100.0).contains(&gi) {
                issues.push(FieldIssue::GlycemicIndexOutOfRange(gi));
            }
        }

        issues
    }
}

/// A convention a record breaks
#[derive(Debug, Clone, PartialEq)]
pub enum FieldIssue {
    BlankName,
    Negative { field: &'static str, value: f64 },
    GlycemicIndexOutOfRange(f64),
}

impl FieldIssue {
    /// Blocking issues stop a form submission; the rest are warnings
    pub fn is_blocking(&self) -> bool {
        matches!(self, FieldIssue::BlankName)
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldIssue::BlankName => write!(f, "name must not be blank"),
            FieldIssue::Negative { field, value } => {
                write!(f, "{} is negative ({})", field, value)
            }
            FieldIssue::GlycemicIndexOutOfRange(gi) => {
                write!(f, "glycemic index {} is outside 0-100", gi)
            }
        }
    }
}

/// A food or recipe in the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    /// Assigned once by the store, or carried in by an import
    #[serde(default)]
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: FoodFields,
}

impl FoodRecord {
    pub fn new(id: RecordId, fields: FoodFields) -> Self {
        Self { id, fields }
    }

    pub fn name(&self) -> &str {
        &self.fields.name
    }

    pub fn category(&self) -> &str {
        &self.fields.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_preparation_method_parsing() {
        assert_eq!(PreparationMethod::from("Grilled"), PreparationMethod::Grilled);
        assert_eq!(PreparationMethod::from("air fried"), PreparationMethod::AirFried);
        assert_eq!(PreparationMethod::from("Sauteed"), PreparationMethod::Sauteed);
        assert_eq!(PreparationMethod::Sauteed.as_str(), "Sautéed");
        assert_eq!(
            PreparationMethod::from("Sous Vide"),
            PreparationMethod::Unlisted("Sous Vide".to_string())
        );
        assert_eq!(String::from(PreparationMethod::SlowCooked), "Slow Cooked");
    }

    #[test]
    fn test_difficulty_parsing() {
        assert_eq!(Difficulty::from("easy"), Difficulty::Easy);
        assert_eq!(Difficulty::from("Hard").to_string(), "Hard");
        assert_eq!(
            Difficulty::from("Expert"),
            Difficulty::Unlisted("Expert".to_string())
        );
    }

    #[test]
    fn test_record_json_shape() {
        let record = FoodRecord::new(
            RecordId::new("1"),
            FoodFields::new("Apple", "Fruit", "1 medium (182g)", 95.0)
                .with_macros(0.5, 0.3, 25.0, 4.4, 19.0)
                .with_preparation(PreparationMethod::Raw),
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], json!("1"));
        assert_eq!(value["servingSize"], json!("1 medium (182g)"));
        assert_eq!(value["calories"], json!(95));
        assert_eq!(value["protein"], json!(0.5));
        assert_eq!(value["preparationMethod"], json!("Raw"));
        // Absent optional fields are not written
        assert!(value.get("sodium").is_none());
        assert!(value.get("brand").is_none());
    }

    #[test]
    fn test_whole_numbers_written_without_fraction() {
        let record = FoodRecord::new(
            RecordId::new("1"),
            FoodFields::new("Apple", "Fruit", "1", 95.0),
        );
        let text = serde_json::to_string(&record).unwrap();
        assert!(text.contains("\"calories\":95"));
        assert!(!text.contains("95.0"));
    }

    #[test]
    fn test_lenient_deserialization() {
        let value = json!({
            "id": 7,
            "name": "Oats",
            "calories": "389",
            "protein": "",
            "sodium": null,
            "iron": "4.7",
            "difficulty": "medium",
            "instructions": ["Boil water", 3, "Stir"],
            "dietaryInfo": "vegan"
        });

        let record: FoodRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.id, "7");
        assert_eq!(record.fields.calories, 389.0);
        assert_eq!(record.fields.protein, 0.0);
        assert_eq!(record.fields.sodium, None);
        assert_eq!(record.fields.iron, Some(4.7));
        assert_eq!(record.fields.difficulty, Some(Difficulty::Medium));
        assert_eq!(
            record.fields.instructions,
            Some(vec!["Boil water".to_string(), "Stir".to_string()])
        );
        assert_eq!(record.fields.dietary_info, Some(vec!["vegan".to_string()]));
        assert_eq!(record.fields.category, "");
    }

    #[test]
    fn test_unknown_fields_preserved() {
        let value = json!({
            "id": "a",
            "name": "Kimchi",
            "fermentedDays": 14,
            "origin": {"country": "KR"}
        });

        let record: FoodRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.fields.extra["fermentedDays"], json!(14));
        assert!(!record.fields.extra.contains_key("id"));
        assert!(!record.fields.extra.contains_key("name"));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["origin"]["country"], json!("KR"));
    }

    #[test]
    fn test_validate() {
        let fields = FoodFields::new("Apple", "Fruit", "1", 95.0);
        assert!(fields.validate().is_empty());

        let mut fields = FoodFields::new("  ", "Fruit", "1", -5.0);
        fields.glycemic_index = Some(120.0);
        let issues = fields.validate();
        assert!(issues.contains(&FieldIssue::BlankName));
        assert!(issues.contains(&FieldIssue::Negative {
            field: "calories",
            value: -5.0
        }));
        assert!(issues.contains(&FieldIssue::GlycemicIndexOutOfRange(120.0)));
        assert!(issues.iter().any(FieldIssue::is_blocking));
    }
}
