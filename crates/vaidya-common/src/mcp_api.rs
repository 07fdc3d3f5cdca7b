use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AnalyzeSymptomsParams {
    /// Comma-separated patient symptoms, e.g. "cough, fever".
    pub symptoms: String,
    /// Display locale: "en" (English) or "hi" (Hindi). Defaults to the server's locale.
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetDiseaseParams {
    /// Disease name as listed by list_diseases (case-insensitive).
    pub disease: String,
    /// Display locale: "en" (English) or "hi" (Hindi). Defaults to the server's locale.
    pub locale: Option<String>,
}

/// Field labels in the display locale.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DisplayLabels {
    pub assessment: String,
    pub disease: String,
    pub severity: String,
    pub treatment: String,
    pub escalation: String,
    pub risk_level: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DiseaseDetail {
    pub disease: String,
    /// Canonical tier: "Mild", "Moderate" or "Severe".
    pub severity: String,
    /// Tier name in the display locale.
    pub severity_label: String,
    pub treatment: String,
    pub escalation_criteria: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Assessment {
    /// Canonical overall tier: "Mild", "Moderate" or "Severe".
    pub risk_level: String,
    pub risk_level_label: String,
    /// "green", "orange" or "red".
    pub risk_color: String,
    pub matches: Vec<DiseaseDetail>,
    pub recommendation: String,
    /// Set when nothing matched.
    pub notice: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzeSymptomsResponse {
    /// False when the submitted symptom text was empty and nothing was analyzed.
    pub analyzed: bool,
    pub locale: String,
    pub labels: DisplayLabels,
    pub assessment: Option<Assessment>,
    /// Set when the consultation could not be saved; the assessment is still valid.
    pub log_warning: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConsultationEntry {
    pub timestamp: String,
    pub symptoms: String,
    /// JSON array of matched diseases, absent when nothing matched.
    pub diagnosis: Option<String>,
    pub risk_level: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConsultationHistoryResponse {
    pub consultations: Vec<ConsultationEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DiseaseSummary {
    pub disease: String,
    pub severity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DiseaseListResponse {
    pub diseases: Vec<DiseaseSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DiseaseDetailResponse {
    pub locale: String,
    pub labels: DisplayLabels,
    pub disease: DiseaseDetail,
}
