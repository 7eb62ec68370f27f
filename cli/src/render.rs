//! Plain-text views of recipes, with codes replaced by their labels.

use cookbook_core::labels::unit_label;
use cookbook_core::{Recipe, Step};
use std::fmt::Write;

/// Drops a trailing `.0` so whole quantities read naturally.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn format_step(step: &Step) -> String {
    let mut line = format!("{}. {}", step.order, step.instruction);
    let mut extras = Vec::new();
    if let Some(duration) = step.duration {
        let unit = step.duration_unit.map(|u| u.as_str()).unwrap_or("");
        extras.push(format!("{} {}", format_number(duration), unit).trim_end().to_string());
    }
    if let Some(temperature) = step.temperature {
        let unit = step.temperature_unit.map(|u| u.as_str()).unwrap_or("");
        extras.push(format!("{}°{}", format_number(temperature), unit));
    }
    if !extras.is_empty() {
        let _ = write!(line, " ({})", extras.join(", "));
    }
    if let Some(note) = &step.note {
        let _ = write!(line, "\n   Note: {}", note);
    }
    line
}

pub fn recipe_detail(recipe: &Recipe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", recipe.title);
    let _ = writeln!(out, "{}", "=".repeat(recipe.title.chars().count()));
    let _ = writeln!(out, "{}", recipe.description);
    let _ = writeln!(out);

    let mut facts = vec![
        format!("Serves {}", recipe.servings),
        format!("Prep {} min", format_number(recipe.prep_time)),
        format!("Cook {} min", format_number(recipe.cook_time)),
    ];
    if let Some(difficulty) = recipe.difficulty {
        facts.push(difficulty.label().to_string());
    }
    if let Some(category) = recipe.category {
        facts.push(category.label().to_string());
    }
    let _ = writeln!(out, "{}", facts.join(" | "));
    let _ = writeln!(out);

    let _ = writeln!(out, "Ingredients");
    for ingredient in &recipe.ingredients {
        let _ = writeln!(
            out,
            "  - {} {} {}",
            format_number(ingredient.quantity),
            unit_label(&ingredient.unit),
            ingredient.name
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Steps");
    for step in recipe.ordered_steps() {
        let _ = writeln!(out, "  {}", format_step(step));
    }
    out
}

/// One line per recipe: id, title, category label.
pub fn recipe_summaries(recipes: &[Recipe]) -> String {
    if recipes.is_empty() {
        return "No recipes yet.\n".to_string();
    }
    let mut out = String::new();
    for recipe in recipes {
        let category = recipe.category.map(|c| c.label()).unwrap_or("-");
        let _ = writeln!(out, "{}  {}  [{}]", recipe.id, recipe.title, category);
    }
    out
}
