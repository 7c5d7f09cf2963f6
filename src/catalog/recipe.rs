use serde::{Deserialize, Serialize};

/// A single catalog entry as it appears in the dataset.
///
/// Optional fields stay `None` when the dataset omits them, which is kept
/// distinct from an empty value (`Some(vec![])`, `Some(String::new())`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl Recipe {
    /// First sentence of the instructions, used as the card teaser.
    pub fn summary(&self) -> Option<&str> {
        let instructions = self.instructions.as_deref()?;
        let first = instructions
            .split(". ")
            .next()
            .unwrap_or_default()
            .lines()
            .next()
            .unwrap_or_default()
            .trim();

        if first.is_empty() {
            None
        } else {
            Some(first)
        }
    }

    /// Instruction steps, one per non-blank line.
    pub fn steps(&self) -> Vec<&str> {
        self.instructions
            .as_deref()
            .map(|text| {
                text.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn ingredient_list(&self) -> &[String] {
        self.ingredients.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(instructions: Option<&str>) -> Recipe {
        Recipe {
            id: "1".to_string(),
            name: "Sayur Asem".to_string(),
            image: "/static/images/sayur-asem.svg".to_string(),
            ingredients: None,
            instructions: instructions.map(str::to_string),
            prep_time: None,
            cook_time: None,
            servings: None,
            difficulty: None,
        }
    }

    #[test]
    fn test_deserialize_camel_case_and_missing_fields() {
        let json = r#"{
            "id": "7",
            "name": "Pecel",
            "image": "/static/images/pecel.svg",
            "prepTime": "15 menit",
            "servings": 2
        }"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.prep_time.as_deref(), Some("15 menit"));
        assert_eq!(recipe.servings, Some(2));
        assert!(recipe.ingredients.is_none());
        assert!(recipe.cook_time.is_none());
    }

    #[test]
    fn test_negative_servings_rejected() {
        let json = r#"{"id": "7", "name": "Pecel", "servings": -1}"#;
        assert!(serde_json::from_str::<Recipe>(json).is_err());
    }

    #[test]
    fn test_summary_takes_first_sentence() {
        let r = recipe(Some("Rebus air. Masukkan asam.\nSajikan."));
        assert_eq!(r.summary(), Some("Rebus air"));

        let r = recipe(Some("Tumis bumbu\nMasukkan sayur"));
        assert_eq!(r.summary(), Some("Tumis bumbu"));

        assert_eq!(recipe(None).summary(), None);
        assert_eq!(recipe(Some("")).summary(), None);
    }

    #[test]
    fn test_steps_skip_blank_lines() {
        let r = recipe(Some("Cuci beras\n\n  Masak nasi  \n"));
        assert_eq!(r.steps(), vec!["Cuci beras", "Masak nasi"]);
        assert!(recipe(None).steps().is_empty());
    }
}
