//! Form-to-contract mapping.
//!
//! Pure: trims text, numbers steps by position, drops client-only ids and
//! leaves optional keys out rather than sending empty values.

use crate::form::{IngredientDraft, RecipeForm, StepDraft};
use crate::recipe::{Category, CreateRecipeContract, Difficulty, Ingredient, Step};

/// Builds the body of `POST /recipes` from a form.
///
/// Assumes the form already passed [`RecipeForm::validate`]; enum codes that
/// do not parse are left out.
pub fn to_create_contract(form: &RecipeForm) -> CreateRecipeContract {
    CreateRecipeContract {
        title: form.title.trim().to_string(),
        description: form.description.trim().to_string(),
        ingredients: form.ingredients.iter().map(map_ingredient).collect(),
        steps: form
            .steps
            .iter()
            .enumerate()
            .map(|(index, step)| map_step(index, step))
            .collect(),
        servings: form
            .servings
            .filter(|s| *s != 0)
            .and_then(|s| u32::try_from(s).ok()),
        prep_time: form.prep_time.filter(|p| *p != 0.0),
        difficulty: Difficulty::from_code(form.difficulty.trim()),
        category: Category::from_code(form.category.trim()),
    }
}

fn map_ingredient(draft: &IngredientDraft) -> Ingredient {
    Ingredient {
        name: draft.name.trim().to_string(),
        quantity: draft.quantity,
        unit: draft.unit.clone(),
    }
}

fn map_step(index: usize, draft: &StepDraft) -> Step {
    Step {
        order: index as u32 + 1,
        instruction: draft.instruction.trim().to_string(),
        duration: draft.duration,
        duration_unit: draft.duration_unit.filter(|_| is_non_zero(draft.duration)),
        temperature: draft.temperature,
        temperature_unit: draft
            .temperature_unit
            .filter(|_| is_non_zero(draft.temperature)),
        note: draft
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string),
    }
}

fn is_non_zero(value: Option<f64>) -> bool {
    value.map(|v| v != 0.0).unwrap_or(false)
}
