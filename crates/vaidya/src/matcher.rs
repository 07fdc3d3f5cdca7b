/// Symptom matching: plain case-insensitive substring containment, no tokenization.
///
/// A query is split on commas; each trimmed, non-empty term is looked up in every record's
/// symptom text. Partial words count ("cou" matches "cough").
use crate::catalog::Catalog;
use crate::model::{DiseaseRecord, MatchResult};
use crate::severity;

/// Lower-cased, trimmed, non-empty comma-separated terms of `query`.
pub fn query_terms(query: &str) -> Vec<String> {
    query
        .split(',')
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect()
}

/// Records whose symptom text contains at least one query term, in catalog order.
pub fn match_symptoms<'a>(query: &str, records: &'a [DiseaseRecord]) -> Vec<&'a DiseaseRecord> {
    let terms = query_terms(query);
    if terms.is_empty() {
        return Vec::new();
    }

    records
        .iter()
        .filter(|record| {
            let corpus = record.symptoms.to_lowercase();
            terms.iter().any(|term| corpus.contains(term.as_str()))
        })
        .collect()
}

/// Match `query` against the catalog and resolve the overall severity.
pub fn analyze<'a>(query: &str, catalog: &'a Catalog) -> MatchResult<'a> {
    let matches = match_symptoms(query, catalog.records());
    let (overall_severity, recommendation) = severity::resolve(&matches);
    MatchResult {
        matches,
        overall_severity,
        recommendation,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::catalog::parse_catalog;
    use crate::model::Severity;
    use crate::severity::FALLBACK_RECOMMENDATION;

    pub(crate) fn sample_catalog() -> Catalog {
        parse_catalog(
            r#"{
                "symptom_disease_mapping": [
                    {
                        "disease": "Common Cold",
                        "symptoms": "cough, runny nose, sore throat",
                        "severity": "Mild",
                        "treatment": "Rest and fluids",
                        "escalation_criteria": "If fever exceeds 3 days"
                    },
                    {
                        "disease": "Pneumonia",
                        "symptoms": "cough, fever, difficulty breathing",
                        "severity": "Severe",
                        "treatment": "Seek immediate care",
                        "escalation_criteria": "Immediately"
                    }
                ]
            }"#,
        )
        .expect("sample catalog is valid")
    }

    fn names(matches: &[&DiseaseRecord]) -> Vec<String> {
        matches.iter().map(|r| r.disease.clone()).collect()
    }

    #[test]
    fn terms_are_trimmed_lowercased_and_non_empty() {
        assert_eq!(query_terms(" Cough ,FEVER,, "), vec!["cough", "fever"]);
        assert!(query_terms("").is_empty());
        assert!(query_terms(",, ,").is_empty());
    }

    #[test]
    fn empty_terms_never_match() {
        let catalog = sample_catalog();
        assert!(match_symptoms("", catalog.records()).is_empty());
        assert!(match_symptoms(",, ,", catalog.records()).is_empty());
        assert!(match_symptoms("   ", catalog.records()).is_empty());
    }

    #[test]
    fn any_term_matches_in_catalog_order() {
        let catalog = sample_catalog();
        let matches = match_symptoms("fever, sore throat", catalog.records());
        assert_eq!(names(&matches), vec!["Common Cold", "Pneumonia"]);
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let catalog = sample_catalog();
        assert_eq!(names(&match_symptoms("RUNNY", catalog.records())), vec!["Common Cold"]);
        assert_eq!(names(&match_symptoms("breath", catalog.records())), vec!["Pneumonia"]);
        assert_eq!(
            names(&match_symptoms("cou", catalog.records())),
            vec!["Common Cold", "Pneumonia"]
        );
    }

    #[test]
    fn trailing_comma_does_not_match_everything() {
        let catalog = sample_catalog();
        assert_eq!(names(&match_symptoms("runny nose,", catalog.records())), vec!["Common Cold"]);
    }

    #[test]
    fn every_match_contains_a_query_term() {
        let catalog = sample_catalog();
        for query in ["cough", "fever, headache", "nose,throat", "xyz", "ing"] {
            let terms = query_terms(query);
            for record in match_symptoms(query, catalog.records()) {
                let corpus = record.symptoms.to_lowercase();
                assert!(terms.iter().any(|t| corpus.contains(t.as_str())));
            }
        }
    }

    #[test]
    fn cough_and_fever_resolves_severe() {
        let catalog = sample_catalog();
        let result = analyze("cough, fever", &catalog);
        assert_eq!(names(&result.matches), vec!["Common Cold", "Pneumonia"]);
        assert_eq!(result.overall_severity, Severity::Severe);
        assert_eq!(result.recommendation, "Seek immediate care");
    }

    #[test]
    fn unmatched_query_falls_back() {
        let catalog = sample_catalog();
        let result = analyze("headache", &catalog);
        assert!(result.matches.is_empty());
        assert_eq!(result.overall_severity, Severity::Mild);
        assert_eq!(result.recommendation, FALLBACK_RECOMMENDATION);
    }

    #[test]
    fn analysis_is_idempotent() {
        let catalog = sample_catalog();
        assert_eq!(analyze("cough", &catalog), analyze("cough", &catalog));
        assert_eq!(analyze("", &catalog), analyze("", &catalog));
    }
}
