//! Query engine
//!
//! Derives the view shown to users from the collection: category list,
//! text/category filter and a stable sort. Nothing here touches the store.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::FoodRecord;

/// Category value that matches every record
pub const ALL_CATEGORIES: &str = "All";

/// `"All"` followed by each distinct category in first-appearance order
pub fn categories(records: &[FoodRecord]) -> Vec<String> {
    let mut out = vec![ALL_CATEGORIES.to_string()];
    for record in records {
        let category = record.category();
        if !out.iter().any(|c| c == category) {
            out.push(category.to_string());
        }
    }
    out
}

/// Records whose name contains `search` (ignoring case) and whose category
/// is `category`, or any category when it is `"All"`
pub fn filter<'a>(records: &'a [FoodRecord], search: &str, category: &str) -> Vec<&'a FoodRecord> {
    let needle = search.to_lowercase();
    records
        .iter()
        .filter(|r| r.name().to_lowercase().contains(&needle))
        .filter(|r| category == ALL_CATEGORIES || r.category() == category)
        .collect()
}

/// Sort records by `field`
///
/// The sort is stable in both directions. Records without a value for
/// `field` stay where they are; the rest are sorted among themselves in the
/// remaining positions.
pub fn sort<'a>(
    mut records: Vec<&'a FoodRecord>,
    field: SortField,
    direction: SortDirection,
) -> Vec<&'a FoodRecord> {
    let slots: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| field.value(r).is_some())
        .map(|(i, _)| i)
        .collect();

    let mut keyed: Vec<(FieldValue<'a>, &'a FoodRecord)> = slots
        .iter()
        .filter_map(|&i| field.value(records[i]).map(|v| (v, records[i])))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| direction.apply(a.compare(b)));

    for (slot, (_, record)) in slots.into_iter().zip(keyed) {
        records[slot] = record;
    }
    records
}

/// Compare text the way a locale-aware collator does for plain text
///
/// Letters are compared first, ignoring accents and case, so "Éclair" sorts
/// among the E's. Ties go to the unaccented form, then to lowercase.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| folded(a).cmp(&folded(b)))
        .then_with(|| b.nfd().cmp(a.nfd()))
}

/// Lowercase letters with combining marks removed
fn base_letters(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Lowercase, decomposed so accents follow their base letter
fn folded(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

/// A field value taken from a record for sorting
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl FieldValue<'_> {
    /// Text compares with text and numbers with numbers; mixed kinds are equal
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => compare_text(a, b),
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The other direction
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(format!("Unknown sort direction '{}' (use asc or desc)", s)),
        }
    }
}

/// A scalar record field the view can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Id,
    #[default]
    Name,
    Category,
    ServingSize,
    Calories,
    Protein,
    Fat,
    Carbohydrates,
    Fiber,
    Sugar,
    Sodium,
    Potassium,
    Calcium,
    Iron,
    VitaminA,
    VitaminC,
    VitaminD,
    Brand,
    Ingredients,
    Allergens,
    PreparationMethod,
    GlycemicIndex,
    ImageUrl,
    CookingTime,
    Difficulty,
    Servings,
    CuisineType,
    PrepTime,
    CookTime,
    TotalTime,
    Tips,
    NutritionScore,
}

impl SortField {
    pub const ALL: [SortField; 32] = [
        SortField::Id,
        SortField::Name,
        SortField::Category,
        SortField::ServingSize,
        SortField::Calories,
        SortField::Protein,
        SortField::Fat,
        SortField::Carbohydrates,
        SortField::Fiber,
        SortField::Sugar,
        SortField::Sodium,
        SortField::Potassium,
        SortField::Calcium,
        SortField::Iron,
        SortField::VitaminA,
        SortField::VitaminC,
        SortField::VitaminD,
        SortField::Brand,
        SortField::Ingredients,
        SortField::Allergens,
        SortField::PreparationMethod,
        SortField::GlycemicIndex,
        SortField::ImageUrl,
        SortField::CookingTime,
        SortField::Difficulty,
        SortField::Servings,
        SortField::CuisineType,
        SortField::PrepTime,
        SortField::CookTime,
        SortField::TotalTime,
        SortField::Tips,
        SortField::NutritionScore,
    ];

    /// JSON name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Category => "category",
            SortField::ServingSize => "servingSize",
            SortField::Calories => "calories",
            SortField::Protein => "protein",
            SortField::Fat => "fat",
            SortField::Carbohydrates => "carbohydrates",
            SortField::Fiber => "fiber",
            SortField::Sugar => "sugar",
            SortField::Sodium => "sodium",
            SortField::Potassium => "potassium",
            SortField::Calcium => "calcium",
            SortField::Iron => "iron",
            SortField::VitaminA => "vitaminA",
            SortField::VitaminC => "vitaminC",
            SortField::VitaminD => "vitaminD",
            SortField::Brand => "brand",
            SortField::Ingredients => "ingredients",
            SortField::Allergens => "allergens",
            SortField::PreparationMethod => "preparationMethod",
            SortField::GlycemicIndex => "glycemicIndex",
            SortField::ImageUrl => "imageUrl",
            SortField::CookingTime => "cookingTime",
            SortField::Difficulty => "difficulty",
            SortField::Servings => "servings",
            SortField::CuisineType => "cuisineType",
            SortField::PrepTime => "prepTime",
            SortField::CookTime => "cookTime",
            SortField::TotalTime => "totalTime",
            SortField::Tips => "tips",
            SortField::NutritionScore => "nutritionScore",
        }
    }

    /// The record's value for this field, if it has one
    pub fn value<'a>(&self, record: &'a FoodRecord) -> Option<FieldValue<'a>> {
        let f = &record.fields;
        let text = |s: &'a Option<String>| s.as_deref().map(FieldValue::Text);
        let number = |n: Option<f64>| n.map(FieldValue::Number);

        match self {
            SortField::Id => Some(FieldValue::Text(record.id.as_str())),
            SortField::Name => Some(FieldValue::Text(&f.name)),
            SortField::Category => Some(FieldValue::Text(&f.category)),
            SortField::ServingSize => Some(FieldValue::Text(&f.serving_size)),
            SortField::Calories => Some(FieldValue::Number(f.calories)),
            SortField::Protein => Some(FieldValue::Number(f.protein)),
            SortField::Fat => Some(FieldValue::Number(f.fat)),
            SortField::Carbohydrates => Some(FieldValue::Number(f.carbohydrates)),
            SortField::Fiber => Some(FieldValue::Number(f.fiber)),
            SortField::Sugar => Some(FieldValue::Number(f.sugar)),
            SortField::Sodium => number(f.sodium),
            SortField::Potassium => number(f.potassium),
            SortField::Calcium => number(f.calcium),
            SortField::Iron => number(f.iron),
            SortField::VitaminA => number(f.vitamin_a),
            SortField::VitaminC => number(f.vitamin_c),
            SortField::VitaminD => number(f.vitamin_d),
            SortField::Brand => text(&f.brand),
            SortField::Ingredients => text(&f.ingredients),
            SortField::Allergens => text(&f.allergens),
            SortField::PreparationMethod => {
                f.preparation_method.as_ref().map(|m| FieldValue::Text(m.as_str()))
            }
            SortField::GlycemicIndex => number(f.glycemic_index),
            SortField::ImageUrl => text(&f.image_url),
            SortField::CookingTime => text(&f.cooking_time),
            SortField::Difficulty => f.difficulty.as_ref().map(|d| FieldValue::Text(d.as_str())),
            SortField::Servings => number(f.servings),
            SortField::CuisineType => text(&f.cuisine_type),
            SortField::PrepTime => text(&f.prep_time),
            SortField::CookTime => text(&f.cook_time),
            SortField::TotalTime => text(&f.total_time),
            SortField::Tips => text(&f.tips),
            SortField::NutritionScore => number(f.nutrition_score),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    /// Accepts the JSON name in any case, with or without `_`/`-` separators
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_field_name(s);
        Self::ALL
            .iter()
            .copied()
            .find(|field| normalize_field_name(field.as_str()) == wanted)
            .ok_or_else(|| format!("Unknown sort field '{}'", s))
    }
}

fn normalize_field_name(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Everything that determines the displayed view
#[derive(Debug, Clone, PartialEq)]
pub struct ViewQuery {
    pub search: String,
    pub category: String,
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
            field: SortField::Name,
            direction: SortDirection::Asc,
        }
    }
}

impl ViewQuery {
    /// Filter then sort `records`
    pub fn apply<'a>(&self, records: &'a [FoodRecord]) -> Vec<&'a FoodRecord> {
        let filtered = filter(records, &self.search, &self.category);
        sort(filtered, self.field, self.direction)
    }

    /// Select `field`, flipping direction when it is already selected
    pub fn sort_by(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.toggle();
        } else {
            self.field = field;
            self.direction = SortDirection::Asc;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::RecordId;
    use crate::models::{sample_records, FoodFields};

    fn record(id: &str, name: &str, category: &str, calories: f64) -> FoodRecord {
        FoodRecord::new(
            RecordId::new(id),
            FoodFields::new(name, category, "1 serving", calories),
        )
    }

    fn names(records: &[&FoodRecord]) -> Vec<String> {
        records.iter().map(|r| r.name().to_string()).collect()
    }

    #[test]
    fn test_categories_first_appearance_order() {
        let records = vec![
            record("1", "Apple", "Fruit", 95.0),
            record("2", "Steak", "Meat", 300.0),
            record("3", "Pear", "Fruit", 100.0),
        ];
        assert_eq!(categories(&records), vec!["All", "Fruit", "Meat"]);
        assert_eq!(categories(&[]), vec!["All"]);
    }

    #[test]
    fn test_categories_sample_data() {
        assert_eq!(
            categories(&sample_records()),
            vec!["All", "Fruit", "Meat", "Dairy"]
        );
    }

    #[test]
    fn test_filter_and_sort_scenario() {
        let records = vec![
            record("1", "Apple", "Fruit", 95.0),
            record("2", "apple pie", "Dessert", 300.0),
        ];

        let found = filter(&records, "apple", "All");
        assert_eq!(names(&found), vec!["Apple", "apple pie"]);

        let sorted = sort(found, SortField::Calories, SortDirection::Desc);
        assert_eq!(names(&sorted), vec!["apple pie", "Apple"]);
    }

    #[test]
    fn test_empty_filter_keeps_everything_in_order() {
        let records = sample_records();
        let found = filter(&records, "", ALL_CATEGORIES);
        assert_eq!(names(&found), vec!["Apple", "Chicken Breast", "Whole Milk"]);
    }

    #[test]
    fn test_filter_by_category() {
        let records = vec![
            record("1", "Apple", "Fruit", 95.0),
            record("2", "apple pie", "Dessert", 300.0),
        ];
        assert_eq!(names(&filter(&records, "", "Dessert")), vec!["apple pie"]);
        assert!(filter(&records, "", "dessert").is_empty());
        assert!(filter(&records, "banana", "All").is_empty());
    }

    #[test]
    fn test_sort_reverses_distinct_names() {
        let records = vec![
            record("1", "banana", "Fruit", 1.0),
            record("2", "Cherry", "Fruit", 1.0),
            record("3", "apple", "Fruit", 1.0),
        ];
        let asc = sort(records.iter().collect(), SortField::Name, SortDirection::Asc);
        assert_eq!(names(&asc), vec!["apple", "banana", "Cherry"]);

        let desc = sort(asc, SortField::Name, SortDirection::Desc);
        assert_eq!(names(&desc), vec!["Cherry", "banana", "apple"]);
    }

    #[test]
    fn test_sort_is_stable_both_directions() {
        let records = vec![
            record("a", "First", "X", 10.0),
            record("b", "Second", "X", 5.0),
            record("c", "Third", "X", 10.0),
        ];

        let asc = sort(records.iter().collect(), SortField::Calories, SortDirection::Asc);
        assert_eq!(names(&asc), vec!["Second", "First", "Third"]);

        let desc = sort(records.iter().collect(), SortField::Calories, SortDirection::Desc);
        assert_eq!(names(&desc), vec!["First", "Third", "Second"]);
    }

    #[test]
    fn test_sort_keeps_records_without_value_in_place() {
        let mut with_sodium = record("1", "Salty", "X", 1.0);
        with_sodium.fields.sodium = Some(500.0);
        let plain = record("2", "Plain", "X", 1.0);
        let mut low = record("3", "Low", "X", 1.0);
        low.fields.sodium = Some(5.0);

        let records = vec![with_sodium, plain, low];
        let sorted = sort(records.iter().collect(), SortField::Sodium, SortDirection::Asc);
        assert_eq!(names(&sorted), vec!["Low", "Plain", "Salty"]);
    }

    #[test]
    fn test_compare_text() {
        assert_eq!(compare_text("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_text("a", "A"), Ordering::Less);
        assert_eq!(compare_text("Apple", "apple"), Ordering::Greater);
        assert_eq!(compare_text("same", "same"), Ordering::Equal);
        assert_eq!(compare_text("eclair", "éclair"), Ordering::Less);
        assert_eq!(compare_text("éclair", "Éclair"), Ordering::Less);
        assert_eq!(compare_text("Crème brûlée", "Custard"), Ordering::Less);
    }

    #[test]
    fn test_sort_places_accented_names_by_letter() {
        let records = vec![
            record("1", "Zucchini", "Vegetable", 1.0),
            record("2", "Éclair", "Dessert", 1.0),
            record("3", "Donut", "Dessert", 1.0),
            record("4", "Fig", "Fruit", 1.0),
        ];
        let asc = sort(records.iter().collect(), SortField::Name, SortDirection::Asc);
        assert_eq!(names(&asc), vec!["Donut", "Éclair", "Fig", "Zucchini"]);

        let desc = sort(asc, SortField::Name, SortDirection::Desc);
        assert_eq!(names(&desc), vec!["Zucchini", "Fig", "Éclair", "Donut"]);
    }

    #[test]
    fn test_sort_field_parsing() {
        assert_eq!("calories".parse::<SortField>().unwrap(), SortField::Calories);
        assert_eq!("servingSize".parse::<SortField>().unwrap(), SortField::ServingSize);
        assert_eq!("serving_size".parse::<SortField>().unwrap(), SortField::ServingSize);
        assert_eq!("Vitamin-A".parse::<SortField>().unwrap(), SortField::VitaminA);
        assert!("instructions".parse::<SortField>().is_err());

        for field in SortField::ALL {
            assert_eq!(field.as_str().parse::<SortField>().unwrap(), field);
        }
    }

    #[test]
    fn test_sort_direction() {
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert_eq!(SortDirection::Asc.toggle(), SortDirection::Desc);
        assert!("up".parse::<SortDirection>().is_err());
    }

    #[test]
    fn test_view_query() {
        let records = sample_records();
        let mut view = ViewQuery::default();
        assert_eq!(names(&view.apply(&records)), vec!["Apple", "Chicken Breast", "Whole Milk"]);

        view.sort_by(SortField::Name);
        assert_eq!(view.direction, SortDirection::Desc);
        assert_eq!(names(&view.apply(&records)), vec!["Whole Milk", "Chicken Breast", "Apple"]);

        view.sort_by(SortField::Calories);
        assert_eq!(view.direction, SortDirection::Asc);
        view.category = "Dairy".to_string();
        assert_eq!(names(&view.apply(&records)), vec!["Whole Milk"]);
    }
}
