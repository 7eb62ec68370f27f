//! Interactive recipe form.
//!
//! Every prompt starts from the current form values, so a form rejected by
//! validation can be walked through again with the user's input kept.

use anyhow::Result;
use cookbook_core::labels::{CATEGORY_LABELS, DIFFICULTY_LABELS, UNIT_LABELS};
use cookbook_core::{DurationUnit, RecipeForm, StepDraft, TemperatureUnit, ValidationErrors};
use dialoguer::{Confirm, Input, Select};

const NONE_CHOICE: &str = "(none)";

pub fn prompt_form(mut form: RecipeForm) -> Result<RecipeForm> {
    form.title = text("Title", &form.title)?;
    form.description = text("Description", &form.description)?;
    form.category = choose_code("Category", CATEGORY_LABELS, &form.category, true)?;
    form.difficulty = choose_code("Difficulty", DIFFICULTY_LABELS, &form.difficulty, true)?;
    form.servings = integer("Servings", form.servings)?;
    form.prep_time = number("Preparation time (min)", form.prep_time)?;

    prompt_ingredients(&mut form)?;
    prompt_steps(&mut form)?;
    Ok(form)
}

/// Prints each failing field with its message.
pub fn print_errors(errors: &ValidationErrors) {
    eprintln!("The recipe has errors:");
    for error in errors.errors() {
        eprintln!("  - {}: {}", error.path, error.message);
    }
}

fn prompt_ingredients(form: &mut RecipeForm) -> Result<()> {
    println!("Ingredients (leave a name empty to remove the row)");
    let ids: Vec<_> = form.ingredients.iter().map(|i| i.id).collect();
    for id in ids {
        let Some(position) = form.ingredients.iter().position(|i| i.id == id) else {
            continue;
        };
        let name = text("  Name", &form.ingredients[position].name)?;
        if name.trim().is_empty() && form.ingredients.len() > 1 {
            form.remove_ingredient(id);
            continue;
        }
        let ingredient = &mut form.ingredients[position];
        ingredient.name = name;
        ingredient.quantity = number("  Quantity", Some(ingredient.quantity))?.unwrap_or(0.0);
        ingredient.unit = choose_code("  Unit", UNIT_LABELS, &ingredient.unit, false)?;
    }

    while confirm("Add another ingredient?", false)? {
        let draft = form.add_ingredient();
        draft.name = text("  Name", "")?;
        draft.quantity = number("  Quantity", Some(draft.quantity))?.unwrap_or(0.0);
        draft.unit = choose_code("  Unit", UNIT_LABELS, &draft.unit, false)?;
    }
    Ok(())
}

fn prompt_steps(form: &mut RecipeForm) -> Result<()> {
    println!("Steps (leave an instruction empty to remove the step)");
    let ids: Vec<_> = form.steps.iter().map(|s| s.id).collect();
    for id in ids {
        let Some(position) = form.steps.iter().position(|s| s.id == id) else {
            continue;
        };
        let instruction = text("  Instruction", &form.steps[position].instruction)?;
        if instruction.trim().is_empty() && form.steps.len() > 1 {
            form.remove_step(id);
            continue;
        }
        let step = &mut form.steps[position];
        step.instruction = instruction;
        prompt_step_details(step)?;
    }

    while confirm("Add another step?", false)? {
        let step = form.add_step();
        step.instruction = text("  Instruction", "")?;
        prompt_step_details(step)?;
    }
    Ok(())
}

fn prompt_step_details(step: &mut StepDraft) -> Result<()> {
    step.duration = number("  Duration", step.duration)?;
    step.duration_unit = match step.duration {
        Some(_) => {
            let current = step.duration_unit.map(|u| u.as_str()).unwrap_or("min");
            let code = choose_code("  Duration unit", &[("min", "min"), ("sec", "sec")], current, false)?;
            Some(if code == "sec" {
                DurationUnit::Second
            } else {
                DurationUnit::Minute
            })
        }
        None => None,
    };

    step.temperature = number("  Temperature", step.temperature)?;
    step.temperature_unit = match step.temperature {
        Some(_) => {
            let current = step.temperature_unit.map(|u| u.as_str()).unwrap_or("C");
            let code = choose_code("  Temperature unit", &[("C", "°C"), ("F", "°F")], current, false)?;
            Some(if code == "F" {
                TemperatureUnit::Fahrenheit
            } else {
                TemperatureUnit::Celsius
            })
        }
        None => None,
    };

    let note = text("  Note", step.note.as_deref().unwrap_or(""))?;
    step.note = (!note.trim().is_empty()).then_some(note);
    Ok(())
}

fn text(prompt: &str, initial: &str) -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?)
}

fn number(prompt: &str, initial: Option<f64>) -> Result<Option<f64>> {
    let initial = initial.map(|n| n.to_string()).unwrap_or_default();
    let input = Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), &str> {
            match parse_optional_number(input) {
                Ok(_) => Ok(()),
                Err(()) => Err("Enter a number or leave empty"),
            }
        })
        .interact_text()?;
    Ok(parse_optional_number(&input).unwrap_or(None))
}

fn integer(prompt: &str, initial: Option<i64>) -> Result<Option<i64>> {
    let initial = initial.map(|n| n.to_string()).unwrap_or_default();
    let input = Input::<String>::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), &str> {
            match parse_optional_integer(input) {
                Ok(_) => Ok(()),
                Err(()) => Err("Enter a whole number or leave empty"),
            }
        })
        .interact_text()?;
    Ok(parse_optional_integer(&input).unwrap_or(None))
}

fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

fn choose_code(
    prompt: &str,
    table: &[(&str, &str)],
    current: &str,
    optional: bool,
) -> Result<String> {
    let (codes, items) = code_choices(table, optional);
    let default = codes.iter().position(|c| *c == current).unwrap_or(0);
    let selection = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(default)
        .interact()?;
    Ok(codes[selection].to_string())
}

/// Parallel lists of codes and their labels, led by an empty "none" choice
/// when the field may be left unset.
fn code_choices<'a>(table: &[(&'a str, &'a str)], optional: bool) -> (Vec<&'a str>, Vec<&'a str>) {
    let mut codes = Vec::with_capacity(table.len() + 1);
    let mut items = Vec::with_capacity(table.len() + 1);
    if optional {
        codes.push("");
        items.push(NONE_CHOICE);
    }
    for (code, label) in table {
        codes.push(*code);
        items.push(*label);
    }
    (codes, items)
}

/// Empty input means "not given"; anything else must parse as a number.
fn parse_optional_number(input: &str) -> Result<Option<f64>, ()> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    match input.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(()),
    }
}

/// Like [`parse_optional_number`], but fractions are rejected rather than
/// rounded.
fn parse_optional_integer(input: &str) -> Result<Option<i64>, ()> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    input.parse::<i64>().map(Some).map_err(|_| ())
}
