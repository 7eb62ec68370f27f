//! Editable recipe form, as the client holds it while a user is authoring.
//!
//! Drafts carry client-only ids so rows can be edited and removed; those ids
//! never reach the wire (see [`crate::mapper`]).

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ValidationErrors;
use crate::mapper::to_create_contract;
use crate::recipe::{CreateRecipeContract, DurationUnit, TemperatureUnit};
use crate::schema::{self, RECIPE};

/// Unit preselected for a new ingredient row.
pub const DEFAULT_INGREDIENT_UNIT: &str = "g";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientDraft {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_quantity() -> f64 {
    1.0
}

fn default_unit() -> String {
    DEFAULT_INGREDIENT_UNIT.to_string()
}

impl IngredientDraft {
    /// A blank row: one gram of nothing.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            quantity: default_quantity(),
            unit: default_unit(),
        }
    }
}

impl Default for IngredientDraft {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDraft {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Ignored on submission; steps are numbered by position.
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub instruction: String,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub duration_unit: Option<DurationUnit>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub temperature_unit: Option<TemperatureUnit>,
    #[serde(default)]
    pub note: Option<String>,
}

impl StepDraft {
    pub fn new(order: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            order,
            instruction: String::new(),
            duration: None,
            duration_unit: None,
            temperature: None,
            temperature_unit: None,
            note: None,
        }
    }
}

/// The recipe form. Enum-valued fields are free text here because they come
/// straight from user input; an empty string means "not chosen".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: String,
    pub servings: Option<i64>,
    pub prep_time: Option<f64>,
    pub ingredients: Vec<IngredientDraft>,
    pub steps: Vec<StepDraft>,
}

impl RecipeForm {
    /// An empty form with one blank ingredient row and one blank step.
    pub fn new() -> Self {
        Self {
            ingredients: vec![IngredientDraft::new()],
            steps: vec![StepDraft::new(1)],
            ..Self::default()
        }
    }

    pub fn add_ingredient(&mut self) -> &mut IngredientDraft {
        self.ingredients.push(IngredientDraft::new());
        let last = self.ingredients.len() - 1;
        &mut self.ingredients[last]
    }

    pub fn remove_ingredient(&mut self, id: Uuid) {
        self.ingredients.retain(|i| i.id != id);
    }

    pub fn add_step(&mut self) -> &mut StepDraft {
        let order = self.steps.len() as u32 + 1;
        self.steps.push(StepDraft::new(order));
        let last = self.steps.len() - 1;
        &mut self.steps[last]
    }

    pub fn remove_step(&mut self, id: Uuid) {
        self.steps.retain(|s| s.id != id);
    }

    /// What the validator sees for this form.
    ///
    /// Same normalization as the mapper, except that explicitly entered
    /// numbers and enum codes are kept even when the mapper would drop them,
    /// so `servings: 0` or an unknown category is reported instead of
    /// silently vanishing.
    pub fn candidate(&self) -> Value {
        let contract = to_create_contract(self);
        let mut candidate = json!({
            "title": contract.title,
            "description": contract.description,
            "ingredients": contract.ingredients,
            "steps": contract.steps,
        });

        if let Some(servings) = self.servings {
            candidate["servings"] = json!(servings);
        }
        if let Some(prep_time) = self.prep_time {
            candidate["prepTime"] = json!(prep_time);
        }
        let difficulty = self.difficulty.trim();
        if !difficulty.is_empty() {
            candidate["difficulty"] = json!(difficulty);
        }
        let category = self.category.trim();
        if !category.is_empty() {
            candidate["category"] = json!(category);
        }

        candidate
    }

    /// Runs the shared recipe schema, reporting one message per field path.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        schema::validate(&RECIPE, &self.candidate()).map_err(ValidationErrors::first_per_path)
    }

    /// Validates, then maps to the wire contract. Nothing is sent on failure.
    pub fn submit(&self) -> Result<CreateRecipeContract, ValidationErrors> {
        self.validate()?;
        Ok(to_create_contract(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> RecipeForm {
        let mut form = RecipeForm::new();
        form.title = "Pancakes".to_string();
        form.description = "Fluffy".to_string();
        form.ingredients[0].name = "Flour".to_string();
        form.ingredients[0].quantity = 250.0;
        form.steps[0].instruction = "Whisk everything".to_string();
        form
    }

    #[test]
    fn test_ingredient_factory_defaults() {
        let a = IngredientDraft::new();
        let b = IngredientDraft::new();
        assert_eq!(a.quantity, 1.0);
        assert_eq!(a.unit, "g");
        assert!(a.name.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_step_factory_defaults() {
        let step = StepDraft::new(3);
        assert_eq!(step.order, 3);
        assert!(step.instruction.is_empty());
        assert!(step.duration.is_none());
        assert!(step.duration_unit.is_none());
        assert!(step.temperature.is_none());
        assert!(step.temperature_unit.is_none());
        assert!(step.note.is_none());
    }

    #[test]
    fn test_new_form_fails_validation() {
        let errors = RecipeForm::new().validate().unwrap_err();
        assert!(errors.for_path("title").is_some());
        assert!(errors.for_path("description").is_some());
        assert!(errors.for_path("ingredients[0].name").is_some());
        assert!(errors.for_path("steps[0].instruction").is_some());
    }

    #[test]
    fn test_filled_form_submits() {
        let contract = filled_form().submit().unwrap();
        assert_eq!(contract.title, "Pancakes");
        assert_eq!(contract.steps[0].order, 1);
    }

    #[test]
    fn test_zero_servings_blocks_submission() {
        let mut form = filled_form();
        form.servings = Some(0);
        let errors = form.submit().unwrap_err();
        assert!(errors.for_path("servings").is_some());

        form.servings = Some(101);
        assert!(form.submit().is_err());

        form.servings = Some(100);
        assert_eq!(form.submit().unwrap().servings, Some(100));
    }

    #[test]
    fn test_zero_prep_time_is_valid_but_omitted() {
        let mut form = filled_form();
        form.prep_time = Some(0.0);
        let contract = form.submit().unwrap();
        assert!(contract.prep_time.is_none());
    }

    #[test]
    fn test_enum_fields_checked() {
        let mut form = filled_form();
        form.category = "brunch".to_string();
        form.difficulty = "extreme".to_string();
        let errors = form.validate().unwrap_err();
        assert!(errors.for_path("category").is_some());
        assert!(errors.for_path("difficulty").is_some());
    }

    #[test]
    fn test_empty_lists_block_submission() {
        let mut form = filled_form();
        let ingredient_id = form.ingredients[0].id;
        let step_id = form.steps[0].id;
        form.remove_ingredient(ingredient_id);
        form.remove_step(step_id);
        let errors = form.validate().unwrap_err();
        assert!(errors.for_path("ingredients").is_some());
        assert!(errors.for_path("steps").is_some());
    }

    #[test]
    fn test_add_step_numbers_from_list_length() {
        let mut form = filled_form();
        let step = form.add_step();
        assert_eq!(step.order, 2);
        form.add_ingredient().name = "Milk".to_string();
        assert_eq!(form.ingredients.len(), 2);
    }

    #[test]
    fn test_form_deserializes_without_ids() {
        let form: RecipeForm = serde_json::from_str(
            r#"{
                "title": "Toast",
                "description": "Bread, but hot",
                "ingredients": [{ "name": "Bread", "unit": "slice" }],
                "steps": [{ "instruction": "Toast it", "duration": 3, "durationUnit": "min" }]
            }"#,
        )
        .unwrap();
        assert_eq!(form.ingredients[0].quantity, 1.0);
        assert_eq!(form.steps[0].duration_unit, Some(DurationUnit::Minute));
        assert!(form.validate().is_ok());
    }
}
