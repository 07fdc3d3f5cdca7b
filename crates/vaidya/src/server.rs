use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::consultation_log::{consultation_record, ConsultationLog};
use crate::error::AppError;
use crate::locale::Locale;
use crate::matcher;
use crate::model::{DiseaseRecord, MatchResult};
use crate::translator::TranslationAdapter;
use vaidya_common::mcp_api::{
    AnalyzeSymptomsParams, AnalyzeSymptomsResponse, Assessment, ConsultationEntry,
    ConsultationHistoryResponse, DiseaseDetail, DiseaseDetailResponse, DiseaseListResponse,
    DiseaseSummary, GetDiseaseParams,
};

#[derive(Clone)]
pub struct VaidyaServer {
    catalog: Arc<Catalog>,
    translator: Arc<TranslationAdapter>,
    log: Arc<ConsultationLog>,
    default_locale: Locale,
    tool_router: ToolRouter<VaidyaServer>,
}

impl VaidyaServer {
    pub fn new(
        catalog: Arc<Catalog>,
        translator: Arc<TranslationAdapter>,
        log: Arc<ConsultationLog>,
        default_locale: Locale,
    ) -> Self {
        Self {
            catalog,
            translator,
            log,
            default_locale,
            tool_router: Self::tool_router(),
        }
    }

    fn resolve_locale(&self, requested: Option<&str>) -> Result<Locale, String> {
        match requested.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse::<Locale>().map_err(|e| e.to_string()),
            None => Ok(self.default_locale),
        }
    }

    /// Translate the free-text fields of a result. The overall tier is localized once from
    /// the locale table.
    async fn localize(&self, result: &MatchResult<'_>, locale: Locale) -> Assessment {
        let mut texts: Vec<&str> = Vec::with_capacity(result.matches.len() * 3 + 1);
        for record in &result.matches {
            texts.extend(detail_texts(record));
        }
        if !result.matches.is_empty() {
            texts.push(result.recommendation);
        }

        let translated = self.translator.translate_all(&texts, locale).await;

        let matches: Vec<DiseaseDetail> = result
            .matches
            .iter()
            .zip(translated.chunks(3))
            .map(|(record, fields)| to_detail(record, fields, locale))
            .collect();

        let (recommendation, notice) = if result.matches.is_empty() {
            (
                locale.fallback_recommendation().to_string(),
                Some(locale.no_match_notice().to_string()),
            )
        } else {
            let recommendation = translated
                .last()
                .cloned()
                .unwrap_or_else(|| result.recommendation.to_string());
            (recommendation, None)
        };

        Assessment {
            risk_level: result.overall_severity.to_string(),
            risk_level_label: locale.severity_label(result.overall_severity).to_string(),
            risk_color: result.overall_severity.color().to_string(),
            matches,
            recommendation,
            notice,
        }
    }

    /// Persist the consultation. Failures become a warning for the caller; the analysis has
    /// already succeeded.
    async fn record_consultation(&self, symptoms: &str, result: &MatchResult<'_>) -> Option<String> {
        let saved = match consultation_record(symptoms, result) {
            Ok(row) => {
                let log = Arc::clone(&self.log);
                tokio::task::spawn_blocking(move || log.append(&row))
                    .await
                    .unwrap_or_else(|e| Err(AppError::LogTask(format!("spawn_blocking join error: {e}"))))
            }
            Err(e) => Err(e),
        };
        match saved {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "failed to save consultation");
                Some(format!("consultation could not be saved: {e}"))
            }
        }
    }
}

#[tool_router]
impl VaidyaServer {
    #[tool(description = "Analyze comma-separated patient symptoms against the disease catalog. Returns matching diseases, the overall risk level, and a general recommendation, optionally in Hindi. Every analysis is saved to the consultation log.")]
    async fn analyze_symptoms(
        &self,
        Parameters(params): Parameters<AnalyzeSymptomsParams>,
    ) -> Result<Json<AnalyzeSymptomsResponse>, String> {
        let locale = self.resolve_locale(params.locale.as_deref())?;

        if params.symptoms.trim().is_empty() {
            info!("empty symptom input, nothing analyzed");
            return Ok(Json(AnalyzeSymptomsResponse {
                analyzed: false,
                locale: locale.code().to_string(),
                labels: locale.labels(),
                assessment: None,
                log_warning: None,
            }));
        }

        let result = matcher::analyze(&params.symptoms, &self.catalog);
        info!(
            matches = result.matches.len(),
            risk_level = %result.overall_severity,
            locale = %locale,
            "symptoms analyzed"
        );

        let assessment = self.localize(&result, locale).await;
        let log_warning = self.record_consultation(&params.symptoms, &result).await;

        Ok(Json(AnalyzeSymptomsResponse {
            analyzed: true,
            locale: locale.code().to_string(),
            labels: locale.labels(),
            assessment: Some(assessment),
            log_warning,
        }))
    }

    #[tool(description = "List every saved consultation in the order it was recorded.")]
    async fn consultation_history(&self) -> Result<Json<ConsultationHistoryResponse>, String> {
        let log = Arc::clone(&self.log);
        let records = tokio::task::spawn_blocking(move || log.list_all())
            .await
            .map_err(|e| format!("spawn_blocking join error: {e}"))?
            .map_err(|e| format!("failed to read consultation history: {e}"))?;

        let consultations = records
            .into_iter()
            .map(|r| ConsultationEntry {
                timestamp: r.timestamp,
                symptoms: r.symptoms,
                diagnosis: r.diagnosis,
                risk_level: r.risk_level.to_string(),
                recommendation: r.recommendation,
            })
            .collect();

        Ok(Json(ConsultationHistoryResponse { consultations }))
    }

    #[tool(description = "List all diseases in the catalog with their severity tier.")]
    async fn list_diseases(&self) -> Result<Json<DiseaseListResponse>, String> {
        let diseases = self
            .catalog
            .records()
            .iter()
            .map(|r| DiseaseSummary {
                disease: r.disease.clone(),
                severity: r.severity.to_string(),
            })
            .collect();
        Ok(Json(DiseaseListResponse { diseases }))
    }

    #[tool(description = "Get one catalog disease by name (e.g. 'Pneumonia') with its treatment and escalation criteria, optionally in Hindi.")]
    async fn get_disease(
        &self,
        Parameters(params): Parameters<GetDiseaseParams>,
    ) -> Result<Json<DiseaseDetailResponse>, String> {
        let name = params.disease.trim();
        if name.is_empty() {
            return Err("disease must not be empty".to_string());
        }
        let locale = self.resolve_locale(params.locale.as_deref())?;

        let record = self
            .catalog
            .find(name)
            .ok_or_else(|| format!("disease not found: {name}"))?;

        let fields = self
            .translator
            .translate_all(&detail_texts(record), locale)
            .await;

        Ok(Json(DiseaseDetailResponse {
            locale: locale.code().to_string(),
            labels: locale.labels(),
            disease: to_detail(record, &fields, locale),
        }))
    }
}

/// Translatable fields of a record, in the order `to_detail` consumes them.
fn detail_texts(record: &DiseaseRecord) -> [&str; 3] {
    [
        record.disease.as_str(),
        record.treatment.as_str(),
        record.escalation_criteria.as_str(),
    ]
}

fn to_detail(record: &DiseaseRecord, fields: &[String], locale: Locale) -> DiseaseDetail {
    let field = |i: usize, source: &str| fields.get(i).cloned().unwrap_or_else(|| source.to_string());
    DiseaseDetail {
        disease: field(0, &record.disease),
        severity: record.severity.to_string(),
        severity_label: locale.severity_label(record.severity).to_string(),
        treatment: field(1, &record.treatment),
        escalation_criteria: field(2, &record.escalation_criteria),
    }
}

#[tool_handler]
impl ServerHandler for VaidyaServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "vaidya".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Vaidya symptom triage MCP server for rural healthcare workers. Use \
                 analyze_symptoms with comma-separated symptoms (locale 'en' or 'hi') to get \
                 matching diseases, an overall risk level and a recommendation; results are not \
                 a clinical diagnosis. Use consultation_history to review saved consultations, \
                 and list_diseases/get_disease to browse the catalog."
                    .to_string(),
            ),
        }
    }
}
