use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A region the directory knows about.
///
/// Only [`ClinicDirectory::resolve`] hands these out, so holding a `Region`
/// means the name matched a directory key at validation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Region(String);

impl Region {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One directory entry: a region and its clinics, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicRegion {
    pub name: String,
    pub clinics: Vec<String>,
}

/// Static region → clinic names mapping.
///
/// Loaded once at startup and shared read-only. Region order is preserved
/// because the form lists regions in directory order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicDirectory {
    regions: Vec<ClinicRegion>,
}

impl ClinicDirectory {
    /// Build a directory, rejecting blank or duplicate region names.
    pub fn new(regions: Vec<ClinicRegion>) -> Result<Self, CoreError> {
        let mut seen = HashSet::new();
        for region in &regions {
            let name = region.name.trim();
            if name.is_empty() {
                return Err(CoreError::InvalidDirectory(
                    "region name must not be blank".to_string(),
                ));
            }
            if !seen.insert(name.to_string()) {
                return Err(CoreError::InvalidDirectory(format!(
                    "duplicate region: {name}"
                )));
            }
        }
        Ok(Self { regions })
    }

    /// Parse a directory from its JSON file form:
    /// `{"regions": [{"name": "...", "clinics": ["..."]}]}`.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let raw: ClinicDirectory = serde_json::from_str(json)?;
        let directory = Self::new(raw.regions)?;
        tracing::info!(
            regions = directory.regions.len(),
            "loaded clinic directory"
        );
        Ok(directory)
    }

    /// The built-in UAE directory.
    pub fn uae() -> Self {
        let entry = |name: &str, clinics: [&str; 3]| ClinicRegion {
            name: name.to_string(),
            clinics: clinics.iter().map(|c| c.to_string()).collect(),
        };

        Self {
            regions: vec![
                entry(
                    "Dubai",
                    [
                        "Aster Clinic – Al Nahda",
                        "Mediclinic – Dubai Mall",
                        "NMC Specialty Hospital – Deira",
                    ],
                ),
                entry(
                    "Abu Dhabi",
                    [
                        "Burjeel Hospital",
                        "NMC Royal – Khalifa City",
                        "LLH Hospital – Musaffah",
                    ],
                ),
                entry(
                    "Sharjah",
                    ["Thumbay Hospital", "Zulekha Hospital", "Al Zahra Hospital"],
                ),
            ],
        }
    }

    /// Clinics for `region`, in directory order. Unknown regions yield an
    /// empty slice.
    pub fn lookup(&self, region: &str) -> &[String] {
        self.regions
            .iter()
            .find(|r| r.name == region)
            .map(|r| r.clinics.as_slice())
            .unwrap_or(&[])
    }

    /// Validate a submitted region name against the directory keys.
    pub fn resolve(&self, name: &str) -> Option<Region> {
        let name = name.trim();
        self.regions
            .iter()
            .find(|r| r.name == name)
            .map(|r| Region(r.name.clone()))
    }

    /// Region names in directory order.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|r| r.name.as_str())
    }

    pub fn entries(&self) -> &[ClinicRegion] {
        &self.regions
    }
}

impl Default for ClinicDirectory {
    fn default() -> Self {
        Self::uae()
    }
}
