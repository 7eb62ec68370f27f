pub mod derived;
pub mod error;
pub mod form;
pub mod labels;
pub mod mapper;
pub mod recipe;
pub mod schema;

pub use error::{FieldError, ValidationErrors};
pub use form::{IngredientDraft, RecipeForm, StepDraft};
pub use mapper::to_create_contract;
pub use recipe::{
    Category, CreateRecipeContract, Difficulty, DurationUnit, Ingredient, Recipe, Step,
    TemperatureUnit, UpdateRecipeContract, DEFAULT_SERVINGS, MAX_SERVINGS,
};
