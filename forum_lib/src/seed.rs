//! Default categories created the first time a board starts.
//!
//! The list is embedded at compile time from `seed_data/categories.yml`.

use forum_api::types::Category;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::db::{now, Db, DbError};
use crate::validation::{validate_category_name, validate_description};

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Failed to parse seed YAML: {0}")]
    YamlParse(#[from] serde_yml::Error),
    #[error("Invalid seed category: {0}")]
    Invalid(String),
    #[error(transparent)]
    Db(#[from] DbError),
}

#[derive(Deserialize, Debug, Clone)]
pub struct SeedCategory {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize, Debug)]
struct SeedFile {
    categories: Vec<SeedCategory>,
}

fn parse_seed_categories(yaml_content: &str) -> Result<Vec<SeedCategory>, SeedError> {
    let file: SeedFile = serde_yml::from_str(yaml_content)?;
    let mut validated: Vec<SeedCategory> = Vec::with_capacity(file.categories.len());
    for category in file.categories {
        let name = validate_category_name(&category.name)
            .map_err(|e| SeedError::Invalid(e.to_string()))?;
        if validated
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(&name))
        {
            return Err(SeedError::Invalid(format!("duplicate category '{}'", name)));
        }
        let description = category
            .description
            .as_deref()
            .map(validate_description)
            .transpose()
            .map_err(|e| SeedError::Invalid(e.to_string()))?;
        validated.push(SeedCategory { name, description });
    }
    Ok(validated)
}

pub fn load_seed_categories() -> Result<Vec<SeedCategory>, SeedError> {
    let yaml_content = include_str!("../../seed_data/categories.yml");
    parse_seed_categories(yaml_content)
}

/// Inserts the default categories when the board has no active category.
/// Returns how many were created.
pub fn seed_categories(db: &Db) -> Result<usize, SeedError> {
    if db.count_active_categories()? > 0 {
        return Ok(0);
    }
    let categories = load_seed_categories()?;
    for seed in &categories {
        let at = now();
        db.insert_category(&Category {
            id: Uuid::new_v4(),
            name: seed.name.clone(),
            description: seed.description.clone(),
            created_at: at,
            updated_at: at,
            deleted_at: None,
        })?;
    }
    tracing::info!("Seeded {} default categories", categories.len());
    Ok(categories.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_seed_parses() {
        let categories = load_seed_categories().unwrap();
        assert!(!categories.is_empty());
        assert!(categories.iter().any(|c| c.name == "General"));
    }

    #[test]
    fn duplicate_names_rejected() {
        let yaml = "categories:\n  - name: General\n  - name: general\n";
        assert!(matches!(
            parse_seed_categories(yaml),
            Err(SeedError::Invalid(_))
        ));
    }

    #[test]
    fn malformed_yaml_rejected() {
        assert!(matches!(
            parse_seed_categories("categories: 12"),
            Err(SeedError::YamlParse(_))
        ));
    }

    #[test]
    fn seeds_only_empty_board() {
        let db = Db::open_in_memory().unwrap();
        db.init().unwrap();
        let created = seed_categories(&db).unwrap();
        assert_eq!(created, load_seed_categories().unwrap().len());
        assert_eq!(seed_categories(&db).unwrap(), 0);
        assert_eq!(db.count_active_categories().unwrap() as usize, created);
    }
}
