use crate::catalog::{CatalogController, CatalogView, FuzzySearch, LoadReport, RecipeStore};
use crate::{Result, Settings};
use std::path::Path;

/// Search the configured dataset and print one page of results
pub fn search(settings: &Settings, query: &str, page: usize) -> Result<()> {
    let store = RecipeStore::load_or_empty(settings.catalog.dataset_path.as_deref());
    let engine = FuzzySearch::from_config(&settings.search);

    let view = CatalogController::browse(
        &store,
        &engine,
        settings.pagination.page_size,
        query,
        Some(page),
    );

    print_search_results(&view);
    Ok(())
}

/// Validate a dataset file
pub fn validate_dataset(path: &Path) -> Result<()> {
    match RecipeStore::from_file(path) {
        Ok((_, report)) => {
            print_load_report(path, &report);
            Ok(())
        }
        Err(e) => {
            println!("\x1b[31m\u{2717}\x1b[0m Invalid dataset: {}", e);
            Err(e)
        }
    }
}

fn print_search_results(view: &CatalogView<'_>) {
    if view.is_empty() {
        println!("No recipes found");
        return;
    }

    println!("\nFound {} recipes:\n", view.total_results);
    println!("{:<24} {:<36} {:<8}", "ID", "Name", "Score");
    println!("{}", "-".repeat(70));

    for entry in &view.page_items {
        let score = entry
            .field
            .map(|_| format!("{:.2}", 1.0 - entry.distance))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<24} {:<36} {:<8}",
            truncate(&entry.recipe.id, 22),
            truncate(&entry.recipe.name, 34),
            score
        );
    }

    println!("\nPage {} of {}", view.current_page, view.total_pages);
}

fn print_load_report(path: &Path, report: &LoadReport) {
    if report.rejected.is_empty() {
        println!(
            "\x1b[32m\u{2713}\x1b[0m Valid dataset: {} ({} recipes)",
            path.display(),
            report.accepted
        );
        return;
    }

    println!(
        "\x1b[33m!\x1b[0m Dataset {}: {} recipes accepted, {} rejected",
        path.display(),
        report.accepted,
        report.rejected.len()
    );
    for rejected in &report.rejected {
        println!("    - record {}: {}", rejected.position, rejected.reason);
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("Soto Ayam", 20), "Soto Ayam");
        assert_eq!(truncate("Es Teler Kelapa Muda", 10), "Es Tele...");
        assert_eq!(truncate("ééééé", 4), "é...");
    }

    #[test]
    fn test_validate_dataset_reports_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.json");
        std::fs::write(&path, r#"{"not": "an array"}"#).unwrap();

        assert!(validate_dataset(&path).is_err());
    }

    #[test]
    fn test_validate_dataset_accepts_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipes.json");
        std::fs::write(
            &path,
            r#"[{"id": "klepon", "name": "Klepon"}, {"id": "", "name": "Tanpa Id"}]"#,
        )
        .unwrap();

        assert!(validate_dataset(&path).is_ok());
    }
}
