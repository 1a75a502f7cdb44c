use crate::config::translations::{Catalog, Label};
use crate::core::session::Session;
use crate::domain::model::{Flag, RiskTier, Score};
use crate::utils::error::{Result, SkyluxError};
use serde::Serialize;
use std::fmt;

pub fn interpretation_label(tier: RiskTier) -> Label {
    match tier {
        RiskTier::Low => Label::ResultLow,
        RiskTier::Moderate => Label::ResultModerate,
        RiskTier::High => Label::ResultHigh,
    }
}

/// The closing message depends on the flight decision only, never on the score.
pub fn final_message_label(wants_to_fly: bool) -> Label {
    if wants_to_fly {
        Label::FinalYes
    } else {
        Label::FinalNo
    }
}

pub fn score_line(catalog: &Catalog, language: &str, score: &Score) -> String {
    format!(
        "{}: {:.1} / 10",
        catalog.text(language, Label::RiskScore),
        score.value
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub label: String,
    pub value: String,
}

/// Read-only summary shown to the instructor after confirmation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub title: String,
    pub score_line: String,
    pub interpretation: String,
    pub rows: Vec<SummaryRow>,
    pub final_message: String,
    pub note: String,
}

impl Summary {
    pub fn from_session(session: &Session, catalog: &Catalog) -> Result<Self> {
        let flow = session.flow();
        let (Some(score), Some(wants_to_fly)) = (flow.score(), flow.wants_to_fly()) else {
            return Err(SkyluxError::NotConfirmed {
                stage: flow.stage().name().to_string(),
            });
        };

        let language = catalog.resolve(session.language());
        let text = |label: Label| catalog.text(language, label).to_string();
        let answers = flow.answers();

        let mut rows = vec![
            SummaryRow {
                label: text(Label::Age),
                value: answers.age_group.to_string(),
            },
            SummaryRow {
                label: text(Label::Sex),
                value: answers.sex.to_string(),
            },
        ];
        rows.extend(Flag::ALL.into_iter().map(|flag| SummaryRow {
            label: text(Label::for_flag(flag)),
            value: if answers.flag(flag) {
                text(Label::AnswerYes)
            } else {
                text(Label::AnswerNo)
            },
        }));

        Ok(Self {
            title: text(Label::SummaryTitle),
            score_line: score_line(catalog, language, &score),
            interpretation: text(interpretation_label(score.tier)),
            rows,
            final_message: text(final_message_label(wants_to_fly)),
            note: text(Label::SummaryNote),
        })
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count()))?;
        writeln!(f, "{}", self.score_line)?;
        writeln!(f, "{}", self.interpretation)?;
        writeln!(f)?;
        for row in &self.rows {
            writeln!(f, "  • {}: {}", row.label, row.value)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.final_message)?;
        write!(f, "{}", self.note)
    }
}
