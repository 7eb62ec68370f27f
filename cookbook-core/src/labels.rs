//! Display labels for stored codes. Unknown codes are shown as-is.

use crate::recipe::{Category, Difficulty};

pub const UNIT_LABELS: &[(&str, &str)] = &[
    ("g", "g"),
    ("kg", "kg"),
    ("ml", "ml"),
    ("cl", "cl"),
    ("l", "l"),
    ("pcs", "piece(s)"),
    ("tbsp", "tablespoon"),
    ("tsp", "teaspoon"),
    ("pinch", "pinch"),
    ("slice", "slice(s)"),
    ("clove", "clove(s)"),
];

pub const CATEGORY_LABELS: &[(&str, &str)] = &[
    ("appetizer", "Appetizer"),
    ("starter", "Starter"),
    ("main_course", "Main course"),
    ("side_dish", "Side dish"),
    ("dessert", "Dessert"),
    ("snack", "Snack"),
    ("beverage", "Beverage"),
    ("sauce", "Sauce"),
];

pub const DIFFICULTY_LABELS: &[(&str, &str)] = &[
    ("easy", "Easy"),
    ("medium", "Medium"),
    ("hard", "Hard"),
];

fn lookup<'a>(table: &[(&str, &'static str)], code: &'a str) -> &'a str {
    table
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .unwrap_or(code)
}

pub fn unit_label(code: &str) -> &str {
    lookup(UNIT_LABELS, code)
}

/// `None` when the recipe has no category.
pub fn category_label(code: Option<&str>) -> Option<&str> {
    code.map(|c| lookup(CATEGORY_LABELS, c))
}

pub fn difficulty_label(code: &str) -> &str {
    lookup(DIFFICULTY_LABELS, code)
}

impl Category {
    pub fn label(&self) -> &'static str {
        lookup(CATEGORY_LABELS, self.as_str())
    }
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        lookup(DIFFICULTY_LABELS, self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_units() {
        assert_eq!(unit_label("tbsp"), "tablespoon");
        assert_eq!(unit_label("pcs"), "piece(s)");
    }

    #[test]
    fn test_unknown_codes_pass_through() {
        assert_eq!(unit_label("pièces"), "pièces");
        assert_eq!(category_label(Some("brunch")), Some("brunch"));
        assert_eq!(difficulty_label("extreme"), "extreme");
        assert_eq!(unit_label(""), "");
    }

    #[test]
    fn test_missing_category() {
        assert_eq!(category_label(None), None);
        assert_eq!(category_label(Some("main_course")), Some("Main course"));
    }

    #[test]
    fn test_every_enum_value_has_a_label() {
        for category in Category::ALL {
            assert_ne!(category.label(), category.as_str());
        }
        for difficulty in Difficulty::ALL {
            assert_ne!(difficulty.label(), difficulty.as_str());
        }
    }
}
