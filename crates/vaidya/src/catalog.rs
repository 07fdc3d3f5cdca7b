/// Disease catalog loader.
///
/// The source file is a JSON object with a `symptom_disease_mapping` array. Every entry is
/// validated up front: a missing field, an empty list, or an unknown severity tier aborts
/// startup instead of surfacing later during a consultation.
use std::path::Path;

use serde::Deserialize;

use crate::error::AppError;
use crate::model::{DiseaseRecord, Severity};

#[derive(Debug, Deserialize)]
struct CatalogFile {
    symptom_disease_mapping: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    disease: String,
    symptoms: String,
    severity: String,
    treatment: String,
    escalation_criteria: String,
}

/// Read-only set of disease records, in source order.
#[derive(Debug)]
pub struct Catalog {
    records: Vec<DiseaseRecord>,
}

impl Catalog {
    pub fn records(&self) -> &[DiseaseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Case-insensitive lookup by disease name.
    pub fn find(&self, disease: &str) -> Option<&DiseaseRecord> {
        let wanted = disease.trim().to_lowercase();
        self.records
            .iter()
            .find(|r| r.disease.to_lowercase() == wanted)
    }
}

pub fn load_catalog(path: &Path) -> Result<Catalog, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| AppError::Catalog(format!("failed to read {}: {e}", path.display())))?;
    parse_catalog(&content)
}

pub fn parse_catalog(content: &str) -> Result<Catalog, AppError> {
    let file: CatalogFile = serde_json::from_str(content)
        .map_err(|e| AppError::Catalog(format!("malformed catalog: {e}")))?;

    if file.symptom_disease_mapping.is_empty() {
        return Err(AppError::Catalog(
            "catalog contains no disease entries".to_string(),
        ));
    }

    let records = file
        .symptom_disease_mapping
        .into_iter()
        .enumerate()
        .map(|(index, raw)| -> Result<DiseaseRecord, AppError> {
            let severity = raw.severity.parse::<Severity>().map_err(|e| {
                AppError::DataIntegrity {
                    index,
                    disease: raw.disease.clone(),
                    value: e.0,
                }
            })?;
            Ok(DiseaseRecord {
                disease: raw.disease,
                symptoms: raw.symptoms,
                severity,
                treatment: raw.treatment,
                escalation_criteria: raw.escalation_criteria,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Catalog { records })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal() {
        let content = r#"{
            "symptom_disease_mapping": [
                {
                    "disease": "Common Cold",
                    "symptoms": "cough, runny nose, sore throat",
                    "severity": "mild",
                    "treatment": "Rest and fluids",
                    "escalation_criteria": "If fever exceeds 3 days"
                },
                {
                    "disease": "Pneumonia",
                    "symptoms": "cough, fever, difficulty breathing",
                    "severity": "SEVERE",
                    "treatment": "Seek immediate care",
                    "escalation_criteria": "Immediately"
                }
            ]
        }"#;

        let catalog = parse_catalog(content).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.records()[0].disease, "Common Cold");
        assert_eq!(catalog.records()[0].severity, Severity::Mild);
        assert_eq!(catalog.records()[1].severity, Severity::Severe);
        assert_eq!(catalog.find("pneumonia").map(|r| r.treatment.as_str()), Some("Seek immediate care"));
        assert!(catalog.find("Measles").is_none());
    }

    #[test]
    fn unknown_tier_is_a_data_integrity_error() {
        let content = r#"{
            "symptom_disease_mapping": [
                {
                    "disease": "Flu",
                    "symptoms": "fever",
                    "severity": "Mild",
                    "treatment": "Rest",
                    "escalation_criteria": "If worse"
                },
                {
                    "disease": "Mystery",
                    "symptoms": "rash",
                    "severity": "Critical",
                    "treatment": "Unknown",
                    "escalation_criteria": "Always"
                }
            ]
        }"#;

        match parse_catalog(content) {
            Err(AppError::DataIntegrity { index, disease, value }) => {
                assert_eq!(index, 1);
                assert_eq!(disease, "Mystery");
                assert_eq!(value, "Critical");
            }
            other => panic!("expected data integrity error, got {other:?}"),
        }
    }

    #[test]
    fn missing_field_is_rejected() {
        let content = r#"{
            "symptom_disease_mapping": [
                { "disease": "Flu", "symptoms": "fever", "severity": "Mild", "treatment": "Rest" }
            ]
        }"#;
        assert!(matches!(parse_catalog(content), Err(AppError::Catalog(_))));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let content = r#"{ "symptom_disease_mapping": [] }"#;
        assert!(matches!(parse_catalog(content), Err(AppError::Catalog(_))));
    }

    #[test]
    fn missing_file_is_rejected() {
        let result = load_catalog(Path::new("/nonexistent/medical_data.json"));
        assert!(matches!(result, Err(AppError::Catalog(_))));
    }

    #[test]
    fn bundled_catalog_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/medical_data.json");
        let catalog = load_catalog(&path).expect("bundled catalog should load");
        assert!(catalog.len() >= 10, "expected a populated catalog");
        assert!(catalog.find("Pneumonia").is_some());
    }
}
