//! Schema.org JSON-LD generation for recipe pages

use crate::catalog::Recipe;
use serde_json::{json, Value};
use url::Url;

/// Extract first number from a string like "30 menit" -> 30
fn extract_number(s: &str) -> Option<u32> {
    let digits: String = s
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Convert a display time to an ISO 8601 duration.
/// Understands Indonesian and English units:
/// "30 menit" -> "PT30M", "1 jam" -> "PT1H", "1 jam 30 menit" -> "PT1H30M"
fn format_iso_duration(time_str: &str) -> Option<String> {
    let lower = time_str.to_lowercase();
    let hour_unit = ["jam", "hour"].into_iter().find(|unit| lower.contains(unit));

    if let Some(unit) = hour_unit {
        let hours = extract_number(&lower)?;
        let rest = lower.split(unit).nth(1).unwrap_or_default();
        if let Some(minutes) = extract_number(rest) {
            return Some(format!("PT{hours}H{minutes}M"));
        }
        return Some(format!("PT{hours}H"));
    }

    // "menit", "min", "minutes", or a bare number
    extract_number(&lower).map(|minutes| format!("PT{minutes}M"))
}

/// Convert a recipe to Schema.org Recipe JSON-LD.
///
/// `page_url` is the absolute URL of the recipe page when known; relative
/// image references are resolved against it.
pub fn recipe_to_schema_json(recipe: &Recipe, page_url: Option<&str>) -> Value {
    let mut schema = json!({
        "@context": "https://schema.org",
        "@type": "Recipe",
        "name": recipe.name,
    });

    if let Some(summary) = recipe.summary() {
        schema["description"] = json!(summary);
    }

    if !recipe.image.is_empty() {
        schema["image"] = json!(absolute_url(&recipe.image, page_url));
    }

    if let Some(url) = page_url {
        schema["url"] = json!(url);
    }

    if let Some(servings) = recipe.servings {
        schema["recipeYield"] = json!(format!("{servings} porsi"));
    }

    if let Some(duration) = recipe.prep_time.as_deref().and_then(format_iso_duration) {
        schema["prepTime"] = json!(duration);
    }
    if let Some(duration) = recipe.cook_time.as_deref().and_then(format_iso_duration) {
        schema["cookTime"] = json!(duration);
    }

    let ingredients = recipe.ingredient_list();
    if !ingredients.is_empty() {
        schema["recipeIngredient"] = json!(ingredients);
    }

    let instructions: Vec<Value> = recipe
        .steps()
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            json!({
                "@type": "HowToStep",
                "name": format!("Langkah {}", i + 1),
                "text": text,
            })
        })
        .collect();
    if !instructions.is_empty() {
        schema["recipeInstructions"] = json!(instructions);
    }

    schema
}

/// Resolve an image reference against the page URL.
/// Absolute references are kept as-is; relative ones are joined onto the
/// page URL, and left untouched when there is no usable base.
fn absolute_url(reference: &str, page_url: Option<&str>) -> String {
    if Url::parse(reference).is_ok() {
        return reference.to_string();
    }

    page_url
        .and_then(|base| Url::parse(base).ok())
        .and_then(|base| base.join(reference).ok())
        .map(String::from)
        .unwrap_or_else(|| reference.to_string())
}
