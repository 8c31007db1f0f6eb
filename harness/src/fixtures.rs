use crate::{HarnessError, HarnessResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Deployment-specific values the catalog and routing checks depend on.
///
/// Every key is optional in the TOML file; omitted keys keep the values of
/// the stock four-bike catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Fixtures {
    pub catalog_size: usize,
    pub valid_bike_id: u64,
    pub missing_bike_id: u64,
    pub invalid_routes: Vec<String>,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self {
            catalog_size: 4,
            valid_bike_id: 1,
            missing_bike_id: 999,
            invalid_routes: vec![
                "/invalid".to_string(),
                "/bikes/invalid".to_string(),
                "/nonexistent".to_string(),
            ],
        }
    }
}

impl Fixtures {
    pub fn from_toml_str(source: &str) -> HarnessResult<Self> {
        let fixtures: Fixtures = toml::from_str(source).map_err(|e| HarnessError::Fixtures {
            message: e.to_string(),
        })?;
        fixtures.validate()?;
        Ok(fixtures)
    }

    pub fn load(path: &Path) -> HarnessResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| HarnessError::Fixtures {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> HarnessResult<()> {
        if self.valid_bike_id == self.missing_bike_id {
            return Err(HarnessError::Fixtures {
                message: "valid_bike_id and missing_bike_id must differ".to_string(),
            });
        }

        if let Some(route) = self.invalid_routes.iter().find(|r| !r.starts_with('/')) {
            return Err(HarnessError::Fixtures {
                message: format!("invalid route '{}' must start with '/'", route),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_stock_catalog() {
        let fixtures = Fixtures::default();
        assert_eq!(fixtures.catalog_size, 4);
        assert_eq!(fixtures.valid_bike_id, 1);
        assert_eq!(fixtures.missing_bike_id, 999);
        assert_eq!(
            fixtures.invalid_routes,
            vec!["/invalid", "/bikes/invalid", "/nonexistent"]
        );
        assert!(fixtures.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let fixtures = Fixtures::from_toml_str("catalog_size = 6\nmissing_bike_id = 404\n").unwrap();
        assert_eq!(fixtures.catalog_size, 6);
        assert_eq!(fixtures.missing_bike_id, 404);
        assert_eq!(fixtures.valid_bike_id, 1);
        assert_eq!(fixtures.invalid_routes.len(), 3);
    }

    #[test]
    fn test_rejects_bad_fixtures() {
        assert!(matches!(
            Fixtures::from_toml_str("catalog_size = \"four\""),
            Err(HarnessError::Fixtures { .. })
        ));
        assert!(matches!(
            Fixtures::from_toml_str("valid_bike_id = 7\nmissing_bike_id = 7"),
            Err(HarnessError::Fixtures { .. })
        ));
        assert!(matches!(
            Fixtures::from_toml_str("invalid_routes = [\"nope\"]"),
            Err(HarnessError::Fixtures { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "invalid_routes = [\"/missing\"]").unwrap();

        let fixtures = Fixtures::load(file.path()).unwrap();
        assert_eq!(fixtures.invalid_routes, vec!["/missing"]);

        let missing = Fixtures::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(missing, Err(HarnessError::Fixtures { .. })));
    }
}
