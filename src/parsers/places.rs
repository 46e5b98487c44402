use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::Place;

/// Load the places dataset (a JSON array of places) used as chatbot context.
pub fn load_places(path: &Path) -> Result<Vec<Place>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read places file: {}", path.display()))?;
    let places: Vec<Place> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse places file: {}", path.display()))?;

    tracing::debug!(count = places.len(), path = %path.display(), "loaded places dataset");
    Ok(places)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_load_places() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"Location":"Jeita Grotto","Category":"Nature","Country":"Lebanon","Rating":4.8}},
                {{"Location":"Baalbek","Category":"History","Country":"Lebanon","Rating":5}}]"#
        )
        .unwrap();

        let places = load_places(file.path()).unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[1].name, "Baalbek");
    }

    #[test]
    fn test_load_places_missing_file() {
        let err = load_places(Path::new("/nonexistent/places.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read places file"));
    }

    #[test]
    fn test_load_places_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = load_places(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse places file"));
    }
}
