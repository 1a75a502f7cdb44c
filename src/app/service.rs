//! Stateless request/response evaluation.
//!
//! Each request gets its own [`Session`]; nothing survives between requests.

use crate::app::export::session_csv;
use crate::app::summary::{final_message_label, interpretation_label};
use crate::config::translations::Catalog;
use crate::core::session::Session;
use crate::domain::model::{Answers, RiskTier};
use crate::utils::error::{Result, SkyluxError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentRequest {
    pub booking_code: String,
    #[serde(default)]
    pub consent: bool,
    pub language: Option<String>,
    #[serde(default)]
    pub answers: Answers,
    /// Omit to stop at the result screen.
    pub wants_to_fly: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentResponse {
    pub session_id: Uuid,
    pub language: String,
    pub score: f64,
    pub tier: RiskTier,
    pub interpretation: String,
    pub final_message: Option<String>,
    pub csv: Option<String>,
}

pub fn evaluate(
    request: AssessmentRequest,
    catalog: &Catalog,
    default_language: &str,
    now: DateTime<Utc>,
) -> Result<AssessmentResponse> {
    let mut session = Session::new(request.language.as_deref().unwrap_or(default_language));
    let session_id = session.id();
    let flow = session.flow_mut();
    let _ = flow.set_booking_code(request.booking_code);
    let _ = flow.set_consent(request.consent);

    if flow.start().is_refused() {
        let reasons: Vec<String> = flow.gate_refusals().iter().map(|r| r.to_string()).collect();
        tracing::warn!(%session_id, "Gate refused: {}", reasons.join(", "));
        return Err(SkyluxError::GateRefused {
            reasons: reasons.join(", "),
        });
    }

    let _ = flow.update_answers(|answers| *answers = request.answers);
    let _ = flow.show_score();
    if let Some(wants_to_fly) = request.wants_to_fly {
        let _ = flow.confirm(wants_to_fly);
    }

    let flow = session.flow();
    let score = flow.score().ok_or_else(|| SkyluxError::NotConfirmed {
        stage: flow.stage().name().to_string(),
    })?;
    let language = catalog.resolve(session.language()).to_string();

    let csv = match flow.wants_to_fly() {
        Some(_) => Some(session_csv(&session, now)?),
        None => None,
    };

    Ok(AssessmentResponse {
        session_id,
        interpretation: catalog
            .text(&language, interpretation_label(score.tier))
            .to_string(),
        final_message: flow
            .wants_to_fly()
            .map(|wants_to_fly| catalog.text(&language, final_message_label(wants_to_fly)).to_string()),
        language,
        score: score.value,
        tier: score.tier,
        csv,
    })
}
