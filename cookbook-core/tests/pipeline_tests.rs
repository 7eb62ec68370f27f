//! Form -> contract -> wire -> server-side validation, without a server.
//!
//! Whatever the client submits must pass the server's check of the same schema.

use cookbook_core::derived::cook_time;
use cookbook_core::schema::{self, RECIPE};
use cookbook_core::{
    CreateRecipeContract, DurationUnit, IngredientDraft, RecipeForm, StepDraft,
};

fn tarte_form() -> RecipeForm {
    RecipeForm {
        title: "Tarte aux pommes".to_string(),
        description: "Une tarte classique".to_string(),
        ingredients: vec![IngredientDraft {
            name: "Pommes".to_string(),
            quantity: 4.0,
            unit: "pièces".to_string(),
            ..IngredientDraft::new()
        }],
        steps: vec![StepDraft {
            instruction: "Éplucher les pommes".to_string(),
            ..StepDraft::new(7)
        }],
        ..RecipeForm::default()
    }
}

#[test]
fn submitted_form_passes_server_validation() {
    let contract = tarte_form().submit().expect("form should be valid");
    assert_eq!(contract.steps[0].order, 1);
    assert!(contract.servings.is_none());

    let body = serde_json::to_value(&contract).unwrap();
    schema::validate(&RECIPE, &body).expect("server should accept what the client sends");

    let received: CreateRecipeContract = serde_json::from_value(body).unwrap();
    assert_eq!(received, contract);
    assert_eq!(cook_time(&received.steps), 0.0);
}

#[test]
fn wire_body_has_no_nulls_or_client_ids() {
    let mut form = tarte_form();
    form.steps.push(StepDraft {
        instruction: "Cuire".to_string(),
        duration: Some(35.0),
        duration_unit: Some(DurationUnit::Minute),
        note: Some("   ".to_string()),
        ..StepDraft::new(1)
    });
    let body = serde_json::to_string(&form.submit().unwrap()).unwrap();
    assert!(!body.contains("null"));
    assert!(!body.contains("\"id\""));
    assert!(!body.contains("note"));
    assert!(body.contains("\"durationUnit\":\"min\""));
}

#[test]
fn client_and_server_reject_the_same_form() {
    let mut form = tarte_form();
    form.servings = Some(101);
    form.category = "brunch".to_string();
    let client_errors = form.validate().unwrap_err();

    let server_errors = schema::validate(&RECIPE, &form.candidate()).unwrap_err();
    assert_eq!(client_errors.errors(), server_errors.errors());
}
