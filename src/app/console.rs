//! Line-based terminal renderer for the assessment flow.

use crate::app::summary::{interpretation_label, score_line, Summary};
use crate::config::translations::{Catalog, Label};
use crate::core::flow::{Refusal, Stage, Transition};
use crate::core::session::Session;
use crate::domain::model::{AgeGroup, Answers, Flag, Score, Sex};
use crate::utils::error::{Result, SkyluxError};
use std::io::{BufRead, Write};

const BAR_WIDTH: usize = 20;

/// `[#####---------------]` proportional to the score.
pub fn score_bar(score: &Score) -> String {
    let filled = ((score.value / 10.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

fn parse_age_group(input: &str) -> Option<AgeGroup> {
    if let Ok(index) = input.trim().parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| AgeGroup::ALL.get(i).copied());
    }
    input.parse().ok()
}

pub struct ConsoleRenderer<'c, R: BufRead, W: Write> {
    input: R,
    output: W,
    catalog: &'c Catalog,
}

impl<'c, R: BufRead, W: Write> ConsoleRenderer<'c, R, W> {
    pub fn new(input: R, output: W, catalog: &'c Catalog) -> Self {
        Self {
            input,
            output,
            catalog,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Drives the session until the flight decision is confirmed, then prints the summary.
    pub fn run(&mut self, session: &mut Session) -> Result<Summary> {
        loop {
            match session.flow().stage() {
                Stage::Gate => self.gate(session)?,
                Stage::Questionnaire => self.questionnaire(session)?,
                Stage::Result { score } => self.result(session, score)?,
                Stage::Confirmed { .. } => break,
            }
        }

        let summary = Summary::from_session(session, self.catalog)?;
        writeln!(self.output)?;
        writeln!(self.output, "{}", summary)?;
        Ok(summary)
    }

    /// Reports a finished CSV export in the session language.
    pub fn announce_export(&mut self, session: &Session, path: &str) -> Result<()> {
        writeln!(self.output, "{}: {}", self.text(session, Label::Export), path)?;
        writeln!(self.output, "{}", self.text(session, Label::Saved))?;
        Ok(())
    }

    fn text(&self, session: &Session, label: Label) -> &'c str {
        session.label(self.catalog, label)
    }

    fn prompt(&mut self, question: &str, stage: &str) -> Result<String> {
        write!(self.output, "{} ", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SkyluxError::InputClosed {
                stage: stage.to_string(),
            });
        }
        Ok(line.trim().to_string())
    }

    /// Empty input keeps `current`.
    fn ask_yes_no(&mut self, session: &Session, question: &str, current: bool) -> Result<bool> {
        let current_text = if current {
            self.text(session, Label::AnswerYes)
        } else {
            self.text(session, Label::AnswerNo)
        };
        let question = format!("{} [y/n, {}]", question, current_text);

        loop {
            let answer = self.prompt(&question, "questionnaire")?;
            if answer.is_empty() {
                return Ok(current);
            }
            match parse_yes_no(&answer) {
                Some(value) => return Ok(value),
                None => writeln!(self.output, "  ? y / n")?,
            }
        }
    }

    fn gate(&mut self, session: &mut Session) -> Result<()> {
        let title = self.text(session, Label::Title);
        writeln!(self.output, "{}", title)?;

        let languages: Vec<String> = self
            .catalog
            .languages()
            .map(|(code, name)| format!("{} ({})", code, name))
            .collect();
        writeln!(self.output, "  {}", languages.join(", "))?;
        let question = format!(
            "{} [{}]:",
            self.text(session, Label::Language),
            session.language()
        );
        let language = self.prompt(&question, "language")?;
        if !language.is_empty() {
            session.select_language(language);
        }

        let question = format!("{}:", self.text(session, Label::EnterBooking));
        let booking_code = self.prompt(&question, "booking code")?;
        let _ = session.flow_mut().set_booking_code(booking_code);

        let question = format!("{} [y/n]", self.text(session, Label::Consent));
        let consent = self.prompt(&question, "consent")?;
        let _ = session
            .flow_mut()
            .set_consent(parse_yes_no(&consent).unwrap_or(false));

        let Transition::Refused(_) = session.flow_mut().start() else {
            writeln!(self.output, "→ {}", self.text(session, Label::Start))?;
            return Ok(());
        };
        for refusal in session.flow().gate_refusals() {
            let message = match refusal {
                Refusal::BookingCodeRequired => self.text(session, Label::BookingRequired),
                Refusal::ConsentRequired => self.text(session, Label::ConsentRequired),
                Refusal::NotAvailable { .. } => continue,
            };
            writeln!(self.output, "  ✘ {}", message)?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    fn questionnaire(&mut self, session: &mut Session) -> Result<()> {
        let mut answers: Answers = *session.flow().answers();

        writeln!(self.output)?;
        writeln!(self.output, "{}", self.text(session, Label::Age))?;
        for (index, group) in AgeGroup::ALL.iter().enumerate() {
            writeln!(self.output, "  {}) {}", index + 1, group.option_label())?;
        }
        loop {
            let question = format!("[{}]:", answers.age_group);
            let input = self.prompt(&question, "questionnaire")?;
            if input.is_empty() {
                break;
            }
            if let Some(group) = parse_age_group(&input) {
                answers.age_group = group;
                break;
            }
        }

        loop {
            let question = format!(
                "{} (male/female) [{}]:",
                self.text(session, Label::Sex),
                answers.sex
            );
            let input = self.prompt(&question, "questionnaire")?;
            if input.is_empty() {
                break;
            }
            if let Ok(sex) = input.parse::<Sex>() {
                answers.sex = sex;
                break;
            }
        }

        for flag in Flag::ALL {
            let question = self.text(session, Label::for_flag(flag));
            let value = self.ask_yes_no(session, question, answers.flag(flag))?;
            answers.set_flag(flag, value);
        }

        let _ = session.flow_mut().update_answers(|current| *current = answers);
        writeln!(self.output, "→ {}", self.text(session, Label::ShowScore))?;
        let _ = session.flow_mut().show_score();
        Ok(())
    }

    fn result(&mut self, session: &mut Session, score: Score) -> Result<()> {
        let language = self.catalog.resolve(session.language());
        writeln!(self.output)?;
        writeln!(self.output, "{}", score_line(self.catalog, language, &score))?;
        writeln!(
            self.output,
            "{}",
            self.text(session, interpretation_label(score.tier))
        )?;
        writeln!(self.output, "{}", score_bar(&score))?;
        writeln!(self.output)?;
        writeln!(self.output, "{}", self.text(session, Label::Confirm))?;
        writeln!(self.output, "  y) {}", self.text(session, Label::Yes))?;
        writeln!(self.output, "  n) {}", self.text(session, Label::No))?;
        writeln!(self.output, "  e) {}", self.text(session, Label::EditAnswers))?;

        loop {
            let choice = self.prompt(">", "flight decision")?;
            let transition = match choice.to_ascii_lowercase().as_str() {
                "e" | "edit" => session.flow_mut().edit_answers(),
                other => match parse_yes_no(other) {
                    Some(wants_to_fly) => session.flow_mut().confirm(wants_to_fly),
                    None => continue,
                },
            };
            if !transition.is_refused() {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RiskTier;

    #[test]
    fn test_score_bar() {
        let bar = |value| {
            score_bar(&Score {
                value,
                tier: RiskTier::Low,
            })
        };
        assert_eq!(bar(0.0), format!("[{}]", "-".repeat(20)));
        assert_eq!(bar(2.5), format!("[{}{}]", "#".repeat(5), "-".repeat(15)));
        assert_eq!(bar(10.0), format!("[{}]", "#".repeat(20)));
    }

    #[test]
    fn test_parse_age_group_by_index_or_code() {
        assert_eq!(parse_age_group("1"), Some(AgeGroup::Under16));
        assert_eq!(parse_age_group("5"), Some(AgeGroup::Over35));
        assert_eq!(parse_age_group("0"), None);
        assert_eq!(parse_age_group("6"), None);
        assert_eq!(parse_age_group("30-35"), Some(AgeGroup::From30To35));
    }

    #[test]
    fn test_parse_yes_no() {
        assert_eq!(parse_yes_no("Y"), Some(true));
        assert_eq!(parse_yes_no(" no "), Some(false));
        assert_eq!(parse_yes_no("maybe"), None);
    }

    #[test]
    fn test_gate_announces_start() {
        let catalog = Catalog::builtin();
        let mut session = Session::new("de");
        let input = std::io::Cursor::new("\nBK-1\ny\n");
        let mut renderer = ConsoleRenderer::new(input, Vec::new(), &catalog);

        renderer.gate(&mut session).unwrap();
        let output = String::from_utf8(renderer.into_output()).unwrap();
        assert!(output.contains("→ Starten"));
        assert_eq!(session.flow().stage(), Stage::Questionnaire);
    }

    #[test]
    fn test_refused_gate_does_not_announce_start() {
        let catalog = Catalog::builtin();
        let mut session = Session::new("en");
        let input = std::io::Cursor::new("\n\nn\n");
        let mut renderer = ConsoleRenderer::new(input, Vec::new(), &catalog);

        renderer.gate(&mut session).unwrap();
        let output = String::from_utf8(renderer.into_output()).unwrap();
        assert!(!output.contains("→ Start"));
        assert!(output.contains("✘ A booking number is required."));
        assert_eq!(session.flow().stage(), Stage::Gate);
    }

    #[test]
    fn test_announce_export() {
        let catalog = Catalog::builtin();
        let session = Session::new("en");
        let mut renderer = ConsoleRenderer::new(std::io::Cursor::new(""), Vec::new(), &catalog);

        renderer
            .announce_export(&session, "out/assessment_1.csv")
            .unwrap();
        let output = String::from_utf8(renderer.into_output()).unwrap();
        assert_eq!(
            output,
            "Export Data as CSV: out/assessment_1.csv\n✔ Response saved.\n"
        );
    }

    #[test]
    fn test_closed_input_is_reported() {
        let catalog = Catalog::builtin();
        let mut session = Session::new("en");
        let mut renderer = ConsoleRenderer::new(std::io::Cursor::new(""), Vec::new(), &catalog);

        let result = renderer.run(&mut session);
        assert!(matches!(result, Err(SkyluxError::InputClosed { ref stage }) if stage == "language"));
    }
}
