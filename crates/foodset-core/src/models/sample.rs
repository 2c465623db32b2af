//! Bundled sample dataset

use super::food::{FoodFields, FoodRecord, PreparationMethod};
use crate::id::RecordId;

/// Records a fresh store starts with
pub fn sample_records() -> Vec<FoodRecord> {
    vec![
        FoodRecord::new(
            RecordId::new("1"),
            FoodFields::new("Apple", "Fruit", "1 medium (182g)", 95.0)
                .with_macros(0.5, 0.3, 25.0, 4.4, 19.0)
                .with_minerals(2.0, 195.0, 11.0, 0.2)
                .with_vitamins(98.0, 8.4, 0.0)
                .with_preparation(PreparationMethod::Raw)
                .with_image_url("https://images.unsplash.com/photo-1618160702438-9b02ab6515c9"),
        ),
        FoodRecord::new(
            RecordId::new("2"),
            FoodFields::new("Chicken Breast", "Meat", "100g", 165.0)
                .with_macros(31.0, 3.6, 0.0, 0.0, 0.0)
                .with_minerals(74.0, 256.0, 15.0, 1.1)
                .with_vitamins(20.0, 0.0, 5.0)
                .with_preparation(PreparationMethod::Grilled)
                .with_image_url("https://images.unsplash.com/photo-1493962853295-0fd70327578a"),
        ),
        FoodRecord::new(
            RecordId::new("3"),
            FoodFields::new("Whole Milk", "Dairy", "1 cup (240ml)", 146.0)
                .with_macros(7.7, 7.9, 11.7, 0.0, 11.7)
                .with_minerals(98.0, 349.0, 276.0, 0.1)
                .with_vitamins(112.0, 0.0, 124.0)
                .with_brand("Generic")
                .with_image_url("https://images.unsplash.com/photo-1582562124811-c09040d0a901"),
        ),
    ]
}
