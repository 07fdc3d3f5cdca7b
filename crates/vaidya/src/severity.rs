use crate::model::{DiseaseRecord, Severity};

pub const FALLBACK_RECOMMENDATION: &str =
    "Please consult a healthcare professional for proper diagnosis.";

/// Overall severity and general recommendation for a set of matches.
///
/// The highest-ranked entry wins; on a tie the first one in match order is kept. With no
/// matches the result is `Mild` with [`FALLBACK_RECOMMENDATION`].
pub fn resolve<'a>(matches: &[&'a DiseaseRecord]) -> (Severity, &'a str) {
    let mut best: Option<&'a DiseaseRecord> = None;
    for &record in matches {
        match best {
            Some(current) if record.severity.rank() <= current.severity.rank() => {}
            _ => best = Some(record),
        }
    }

    match best {
        Some(record) => (record.severity, record.treatment.as_str()),
        None => (Severity::Mild, FALLBACK_RECOMMENDATION),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(disease: &str, severity: Severity, treatment: &str) -> DiseaseRecord {
        DiseaseRecord {
            disease: disease.to_string(),
            symptoms: String::new(),
            severity,
            treatment: treatment.to_string(),
            escalation_criteria: String::new(),
        }
    }

    #[test]
    fn empty_matches_fall_back() {
        assert_eq!(
            resolve(&[]),
            (
                Severity::Mild,
                "Please consult a healthcare professional for proper diagnosis."
            )
        );
    }

    #[test]
    fn highest_rank_wins() {
        let mild = record("Cold", Severity::Mild, "rest");
        let severe = record("Pneumonia", Severity::Severe, "hospital");
        let moderate = record("Flu", Severity::Moderate, "fluids");
        assert_eq!(resolve(&[&mild, &severe, &moderate]), (Severity::Severe, "hospital"));
        assert_eq!(resolve(&[&mild, &moderate]), (Severity::Moderate, "fluids"));
    }

    #[test]
    fn ties_keep_the_first_maximum() {
        let first = record("Dengue", Severity::Severe, "first");
        let second = record("Malaria", Severity::Severe, "second");
        let mild = record("Cold", Severity::Mild, "rest");
        assert_eq!(resolve(&[&mild, &first, &second]), (Severity::Severe, "first"));
        assert_eq!(resolve(&[&second, &first]), (Severity::Severe, "second"));
    }

    #[test]
    fn single_mild_match_uses_its_treatment() {
        let mild = record("Cold", Severity::Mild, "rest");
        assert_eq!(resolve(&[&mild]), (Severity::Mild, "rest"));
    }
}
