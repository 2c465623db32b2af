//! Field flags shared by `add` and `edit`
//!
//! Values arrive as text and go through the same parse functions a form
//! would use. For optional fields an empty value or `none` clears the field.

use anyhow::{bail, Context, Result};
use clap::Args;

use foodset_core::models::{
    parse_amount, parse_list, parse_optional_amount, parse_optional_text, Difficulty, FoodFields,
    PreparationMethod,
};
use foodset_core::Config;

#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
    /// Rename the item
    #[arg(long = "name", value_name = "NAME")]
    pub rename: Option<String>,
    /// Category (e.g. "Main Course")
    #[arg(short, long)]
    pub category: Option<String>,
    /// Serving size (e.g. "1 cup (240ml)")
    #[arg(short, long)]
    pub serving_size: Option<String>,

    #[arg(long)]
    pub calories: Option<String>,
    /// Protein in grams
    #[arg(long)]
    pub protein: Option<String>,
    /// Fat in grams
    #[arg(long)]
    pub fat: Option<String>,
    /// Carbohydrates in grams
    #[arg(long, alias = "carbohydrates")]
    pub carbs: Option<String>,
    /// Fiber in grams
    #[arg(long)]
    pub fiber: Option<String>,
    /// Sugar in grams
    #[arg(long)]
    pub sugar: Option<String>,

    /// Sodium in mg
    #[arg(long)]
    pub sodium: Option<String>,
    /// Potassium in mg
    #[arg(long)]
    pub potassium: Option<String>,
    /// Calcium in mg
    #[arg(long)]
    pub calcium: Option<String>,
    /// Iron in mg
    #[arg(long)]
    pub iron: Option<String>,
    /// Vitamin A in IU
    #[arg(long)]
    pub vitamin_a: Option<String>,
    /// Vitamin C in mg
    #[arg(long)]
    pub vitamin_c: Option<String>,
    /// Vitamin D in IU
    #[arg(long)]
    pub vitamin_d: Option<String>,

    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub ingredients: Option<String>,
    #[arg(long)]
    pub allergens: Option<String>,
    /// Preparation method (Raw, Baked, Grilled, ...)
    #[arg(long)]
    pub preparation: Option<String>,
    /// Glycemic index (0-100)
    #[arg(long)]
    pub glycemic_index: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,

    #[arg(long)]
    pub cooking_time: Option<String>,
    /// Difficulty (Easy, Medium, Hard)
    #[arg(long)]
    pub difficulty: Option<String>,
    /// Instruction step; repeat for each step in order
    #[arg(long = "instruction", value_name = "STEP")]
    pub instructions: Vec<String>,
    #[arg(long)]
    pub servings: Option<String>,
    #[arg(long = "cuisine")]
    pub cuisine_type: Option<String>,
    /// Dietary labels, comma-separated
    #[arg(long = "dietary")]
    pub dietary_info: Option<String>,
    #[arg(long)]
    pub prep_time: Option<String>,
    #[arg(long)]
    pub cook_time: Option<String>,
    #[arg(long)]
    pub total_time: Option<String>,
    /// Equipment, comma-separated
    #[arg(long)]
    pub equipment: Option<String>,
    #[arg(long)]
    pub tips: Option<String>,
    #[arg(long)]
    pub nutrition_score: Option<String>,
}

impl FieldArgs {
    /// Apply the flags that were given to `fields`
    pub fn apply(&self, fields: &mut FoodFields) -> Result<()> {
        if let Some(ref name) = self.rename {
            fields.name = name.trim().to_string();
        }
        if let Some(ref category) = self.category {
            fields.category = category.trim().to_string();
        }
        if let Some(ref serving_size) = self.serving_size {
            fields.serving_size = serving_size.trim().to_string();
        }

        set_amount(&mut fields.calories, &self.calories, "calories")?;
        set_amount(&mut fields.protein, &self.protein, "protein")?;
        set_amount(&mut fields.fat, &self.fat, "fat")?;
        set_amount(&mut fields.carbohydrates, &self.carbs, "carbs")?;
        set_amount(&mut fields.fiber, &self.fiber, "fiber")?;
        set_amount(&mut fields.sugar, &self.sugar, "sugar")?;

        set_optional_amount(&mut fields.sodium, &self.sodium, "sodium")?;
        set_optional_amount(&mut fields.potassium, &self.potassium, "potassium")?;
        set_optional_amount(&mut fields.calcium, &self.calcium, "calcium")?;
        set_optional_amount(&mut fields.iron, &self.iron, "iron")?;
        set_optional_amount(&mut fields.vitamin_a, &self.vitamin_a, "vitamin-a")?;
        set_optional_amount(&mut fields.vitamin_c, &self.vitamin_c, "vitamin-c")?;
        set_optional_amount(&mut fields.vitamin_d, &self.vitamin_d, "vitamin-d")?;
        set_optional_amount(&mut fields.glycemic_index, &self.glycemic_index, "glycemic-index")?;
        set_optional_amount(&mut fields.servings, &self.servings, "servings")?;
        set_optional_amount(&mut fields.nutrition_score, &self.nutrition_score, "nutrition-score")?;

        set_text(&mut fields.brand, &self.brand);
        set_text(&mut fields.ingredients, &self.ingredients);
        set_text(&mut fields.allergens, &self.allergens);
        set_text(&mut fields.image_url, &self.image_url);
        set_text(&mut fields.cooking_time, &self.cooking_time);
        set_text(&mut fields.cuisine_type, &self.cuisine_type);
        set_text(&mut fields.prep_time, &self.prep_time);
        set_text(&mut fields.cook_time, &self.cook_time);
        set_text(&mut fields.total_time, &self.total_time);
        set_text(&mut fields.tips, &self.tips);

        if let Some(ref method) = self.preparation {
            fields.preparation_method = parse_optional_text(method).map(PreparationMethod::from);
        }
        if let Some(ref difficulty) = self.difficulty {
            fields.difficulty = parse_optional_text(difficulty).map(Difficulty::from);
        }

        if !self.instructions.is_empty() {
            let steps: Vec<String> = self
                .instructions
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            fields.instructions = if steps.is_empty() { None } else { Some(steps) };
        }
        set_list(&mut fields.dietary_info, &self.dietary_info);
        set_list(&mut fields.equipment, &self.equipment);

        Ok(())
    }
}

/// Check `fields` before saving
///
/// Blocking issues fail; the rest are returned as warnings, along with an
/// unknown category.
pub fn check(fields: &FoodFields, config: &Config) -> Result<Vec<String>> {
    let issues = fields.validate();
    if let Some(blocking) = issues.iter().find(|issue| issue.is_blocking()) {
        bail!("Invalid food item: {}", blocking);
    }

    let mut warnings: Vec<String> = issues.iter().map(|issue| issue.to_string()).collect();
    if !config.categories.is_empty() && !config.is_known_category(&fields.category) {
        warnings.push(format!(
            "category '{}' is not one of the configured categories",
            fields.category
        ));
    }
    if let Some(PreparationMethod::Unlisted(ref method)) = fields.preparation_method {
        warnings.push(format!("'{}' is not a known preparation method", method));
    }
    Ok(warnings)
}

fn set_amount(target: &mut f64, input: &Option<String>, flag: &str) -> Result<()> {
    if let Some(ref input) = input {
        *target = parse_amount(input).with_context(|| format!("Invalid --{}", flag))?;
    }
    Ok(())
}

fn set_optional_amount(target: &mut Option<f64>, input: &Option<String>, flag: &str) -> Result<()> {
    if let Some(ref input) = input {
        *target = parse_optional_amount(input).with_context(|| format!("Invalid --{}", flag))?;
    }
    Ok(())
}

fn set_text(target: &mut Option<String>, input: &Option<String>) {
    if let Some(ref input) = input {
        *target = parse_optional_text(input);
    }
}

fn set_list(target: &mut Option<Vec<String>>, input: &Option<String>) {
    if let Some(ref input) = input {
        let items = parse_list(input);
        *target = if items.is_empty() { None } else { Some(items) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> FoodFields {
        FoodFields::new("Pancakes", "Breakfast", "2 pieces", 350.0)
    }

    #[test]
    fn test_apply_only_given_flags() {
        let mut fields = base();
        let args = FieldArgs {
            protein: Some("8.5".to_string()),
            brand: Some("Homemade".to_string()),
            ..Default::default()
        };

        args.apply(&mut fields).unwrap();
        assert_eq!(fields.protein, 8.5);
        assert_eq!(fields.brand.as_deref(), Some("Homemade"));
        assert_eq!(fields.calories, 350.0);
        assert_eq!(fields.name, "Pancakes");
    }

    #[test]
    fn test_apply_clears_optional_fields() {
        let mut fields = base();
        fields.sodium = Some(400.0);
        fields.brand = Some("Old".to_string());

        let args = FieldArgs {
            sodium: Some("none".to_string()),
            brand: Some("".to_string()),
            ..Default::default()
        };
        args.apply(&mut fields).unwrap();

        assert!(fields.sodium.is_none());
        assert!(fields.brand.is_none());
    }

    #[test]
    fn test_apply_rejects_bad_amount() {
        let mut fields = base();
        let args = FieldArgs {
            calories: Some("lots".to_string()),
            ..Default::default()
        };
        let err = args.apply(&mut fields).unwrap_err();
        assert!(err.to_string().contains("--calories"));
    }

    #[test]
    fn test_apply_recipe_fields() {
        let mut fields = base();
        let args = FieldArgs {
            difficulty: Some("easy".to_string()),
            preparation: Some("sauteed".to_string()),
            instructions: vec!["Mix".to_string(), " ".to_string(), "Fry".to_string()],
            dietary_info: Some("Vegetarian, Nut-free".to_string()),
            ..Default::default()
        };
        args.apply(&mut fields).unwrap();

        assert_eq!(fields.difficulty, Some(Difficulty::Easy));
        assert_eq!(fields.preparation_method, Some(PreparationMethod::Sauteed));
        assert_eq!(
            fields.instructions,
            Some(vec!["Mix".to_string(), "Fry".to_string()])
        );
        assert_eq!(
            fields.dietary_info,
            Some(vec!["Vegetarian".to_string(), "Nut-free".to_string()])
        );
    }

    #[test]
    fn test_check_blocks_blank_name() {
        let config = Config::default();
        let mut fields = base();
        fields.name = "  ".to_string();
        assert!(check(&fields, &config).is_err());
    }

    #[test]
    fn test_check_warns_on_unknown_category() {
        let config = Config::default();
        let mut fields = base();
        assert!(check(&fields, &config).unwrap().is_empty());

        fields.category = "Fruit".to_string();
        let warnings = check(&fields, &config).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Fruit"));
    }
}
