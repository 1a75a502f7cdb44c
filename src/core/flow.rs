//! Linear assessment flow.
//!
//! `Gate → Questionnaire → Result → Confirmed`, with `Result → Questionnaire`
//! as the only way back. The score is computed once on entry into `Result` and
//! carried by the stage itself, so leaving `Result` for the questionnaire drops
//! it and a displayed score always belongs to the displayed answers.

use crate::core::scorer;
use crate::domain::model::{Answers, Score};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stage {
    Gate,
    Questionnaire,
    Result { score: Score },
    Confirmed { score: Score, wants_to_fly: bool },
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Gate => "gate",
            Stage::Questionnaire => "questionnaire",
            Stage::Result { .. } => "result",
            Stage::Confirmed { .. } => "confirmed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Confirmed { .. })
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a request was turned down. The flow stays where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    BookingCodeRequired,
    ConsentRequired,
    /// The action does not exist in the current stage.
    NotAvailable {
        action: &'static str,
        stage: &'static str,
    },
}

impl fmt::Display for Refusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Refusal::BookingCodeRequired => f.write_str("booking code required"),
            Refusal::ConsentRequired => f.write_str("consent required"),
            Refusal::NotAvailable { action, stage } => {
                write!(f, "'{}' is not available in stage '{}'", action, stage)
            }
        }
    }
}

#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The flow moved to another stage.
    Advanced,
    /// Data changed, stage unchanged.
    Updated,
    Refused(Refusal),
}

impl Transition {
    pub fn is_refused(&self) -> bool {
        matches!(self, Transition::Refused(_))
    }

    pub fn refusal(&self) -> Option<Refusal> {
        match self {
            Transition::Refused(refusal) => Some(*refusal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssessmentFlow {
    stage: Stage,
    answers: Answers,
    booking_code: String,
    consent_given: bool,
}

impl Default for AssessmentFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessmentFlow {
    pub fn new() -> Self {
        Self {
            stage: Stage::Gate,
            answers: Answers::default(),
            booking_code: String::new(),
            consent_given: false,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn booking_code(&self) -> &str {
        &self.booking_code
    }

    pub fn consent_given(&self) -> bool {
        self.consent_given
    }

    /// Cached score, present in `Result` and `Confirmed` only.
    pub fn score(&self) -> Option<Score> {
        match self.stage {
            Stage::Result { score } | Stage::Confirmed { score, .. } => Some(score),
            Stage::Gate | Stage::Questionnaire => None,
        }
    }

    pub fn wants_to_fly(&self) -> Option<bool> {
        match self.stage {
            Stage::Confirmed { wants_to_fly, .. } => Some(wants_to_fly),
            _ => None,
        }
    }

    fn not_available(&self, action: &'static str) -> Transition {
        tracing::debug!(action, stage = self.stage.name(), "Flow action refused");
        Transition::Refused(Refusal::NotAvailable {
            action,
            stage: self.stage.name(),
        })
    }

    pub fn set_booking_code(&mut self, code: impl Into<String>) -> Transition {
        if self.stage != Stage::Gate {
            return self.not_available("set booking code");
        }
        self.booking_code = code.into();
        Transition::Updated
    }

    pub fn set_consent(&mut self, consent_given: bool) -> Transition {
        if self.stage != Stage::Gate {
            return self.not_available("set consent");
        }
        self.consent_given = consent_given;
        Transition::Updated
    }

    /// Every unmet gate condition, booking code first.
    pub fn gate_refusals(&self) -> Vec<Refusal> {
        let mut refusals = Vec::new();
        if self.booking_code.trim().is_empty() {
            refusals.push(Refusal::BookingCodeRequired);
        }
        if !self.consent_given {
            refusals.push(Refusal::ConsentRequired);
        }
        refusals
    }

    pub fn can_start(&self) -> bool {
        self.stage == Stage::Gate && self.gate_refusals().is_empty()
    }

    pub fn start(&mut self) -> Transition {
        if self.stage != Stage::Gate {
            return self.not_available("start");
        }
        if let Some(refusal) = self.gate_refusals().into_iter().next() {
            tracing::debug!(%refusal, "Gate closed");
            return Transition::Refused(refusal);
        }

        self.stage = Stage::Questionnaire;
        tracing::info!("Gate passed, questionnaire opened");
        Transition::Advanced
    }

    /// Applies `edit` to the answers; only the questionnaire accepts edits.
    pub fn update_answers<F>(&mut self, edit: F) -> Transition
    where
        F: FnOnce(&mut Answers),
    {
        if self.stage != Stage::Questionnaire {
            return self.not_available("edit answers");
        }
        edit(&mut self.answers);
        Transition::Updated
    }

    pub fn show_score(&mut self) -> Transition {
        if self.stage != Stage::Questionnaire {
            return self.not_available("show score");
        }

        let score = scorer::score(&self.answers);
        self.stage = Stage::Result { score };
        tracing::info!(
            value = score.value,
            tier = score.tier.as_str(),
            "Risk score computed"
        );
        Transition::Advanced
    }

    /// Back to the questionnaire; the cached score is discarded.
    pub fn edit_answers(&mut self) -> Transition {
        if !matches!(self.stage, Stage::Result { .. }) {
            return self.not_available("return to questionnaire");
        }

        self.stage = Stage::Questionnaire;
        tracing::debug!("Score invalidated, questionnaire reopened");
        Transition::Advanced
    }

    pub fn confirm(&mut self, wants_to_fly: bool) -> Transition {
        let Stage::Result { score } = self.stage else {
            return self.not_available("confirm flight decision");
        };

        self.stage = Stage::Confirmed {
            score,
            wants_to_fly,
        };
        tracing::info!(wants_to_fly, "Flight decision confirmed");
        Transition::Advanced
    }
}
