use crate::core::session::Session;
use crate::domain::model::{AgeGroup, Answers, Score, Sex};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, SkyluxError};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// One flat export row. Field order is the column order.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRecord {
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Age")]
    pub age: AgeGroup,
    #[serde(rename = "Sex")]
    pub sex: Sex,
    #[serde(rename = "ElbowHyperextension")]
    pub elbow_hyperextension: bool,
    #[serde(rename = "ThumbToForearm")]
    pub thumb_to_forearm: bool,
    #[serde(rename = "LittleFinger")]
    pub little_finger: bool,
    #[serde(rename = "PreviousSubluxation")]
    pub previous_subluxation: bool,
    #[serde(rename = "PreviousDislocation")]
    pub previous_dislocation: bool,
    #[serde(rename = "OperativeTreatment")]
    pub operative_treatment: bool,
    #[serde(rename = "ApprehensionTest")]
    pub apprehension_test: bool,
    #[serde(rename = "SkydiveTest")]
    pub skydive_test: bool,
    #[serde(rename = "RiskScore")]
    pub risk_score: String,
}

impl ExportRecord {
    pub fn new(answers: &Answers, score: &Score, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            age: answers.age_group,
            sex: answers.sex,
            elbow_hyperextension: answers.elbow_hyperextension,
            thumb_to_forearm: answers.thumb_to_forearm,
            little_finger: answers.little_finger_over90,
            previous_subluxation: answers.prior_subluxation,
            previous_dislocation: answers.prior_dislocation,
            operative_treatment: answers.operative_treatment,
            apprehension_test: answers.apprehension_test_positive,
            skydive_test: answers.skydive_test_positive,
            risk_score: format!("{:.1}", score.value),
        }
    }
}

/// Header row plus one value row.
pub fn render_csv(answers: &Answers, score: &Score, timestamp: DateTime<Utc>) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.serialize(ExportRecord::new(answers, score, timestamp))?;
    writer.flush()?;

    let data = writer
        .into_inner()
        .map_err(|e| SkyluxError::IoError(std::io::Error::other(e.to_string())))?;
    String::from_utf8(data)
        .map_err(|e| SkyluxError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// CSV of a confirmed session; earlier stages have no frozen answers to export.
pub fn session_csv(session: &Session, timestamp: DateTime<Utc>) -> Result<String> {
    let flow = session.flow();
    match (flow.score(), flow.stage().is_terminal()) {
        (Some(score), true) => render_csv(flow.answers(), &score, timestamp),
        _ => Err(SkyluxError::NotConfirmed {
            stage: flow.stage().name().to_string(),
        }),
    }
}

pub struct CsvExporter<S: Storage> {
    storage: S,
}

impl<S: Storage> CsvExporter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn file_name(session: &Session) -> String {
        format!("assessment_{}.csv", session.id())
    }

    /// Writes the session export and returns where it landed.
    pub fn export(&self, session: &Session, timestamp: DateTime<Utc>) -> Result<String> {
        let csv_output = session_csv(session, timestamp)?;
        let file_name = Self::file_name(session);

        tracing::debug!("Writing CSV export ({} bytes) as {}", csv_output.len(), file_name);
        let path = self.storage.write_file(&file_name, csv_output.as_bytes())?;

        tracing::info!(session_id = %session.id(), "📁 Assessment exported to {}", path);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scorer;
    use chrono::TimeZone;
    use std::cell::RefCell;
    use std::collections::HashMap;

    const HEADER: &str = "Timestamp,Age,Sex,ElbowHyperextension,ThumbToForearm,LittleFinger,PreviousSubluxation,PreviousDislocation,OperativeTreatment,ApprehensionTest,SkydiveTest,RiskScore";

    #[derive(Default)]
    struct MockStorage {
        files: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl Storage for MockStorage {
        fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
            self.files.borrow_mut().insert(path.to_string(), data.to_vec());
            Ok(format!("mock://{}", path))
        }
    }

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap()
    }

    fn confirmed_session(answers: Answers) -> Session {
        let mut session = Session::new("en");
        let flow = session.flow_mut();
        let _ = flow.set_booking_code("#12345");
        let _ = flow.set_consent(true);
        let _ = flow.start();
        let _ = flow.update_answers(|current| *current = answers);
        let _ = flow.show_score();
        let _ = flow.confirm(true);
        session
    }

    #[test]
    fn test_render_csv_default_answers() {
        let answers = Answers::default();
        let csv_output = render_csv(&answers, &scorer::score(&answers), timestamp()).unwrap();

        let lines: Vec<&str> = csv_output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines[1],
            "2024-06-01T09:30:00Z,16-25,male,false,false,false,false,false,false,false,false,2.5"
        );
    }

    #[test]
    fn test_render_csv_keeps_age_symbols() {
        let answers = Answers {
            age_group: AgeGroup::Under16,
            sex: Sex::Female,
            prior_dislocation: true,
            operative_treatment: true,
            ..Answers::default()
        };
        let csv_output = render_csv(&answers, &scorer::score(&answers), timestamp()).unwrap();

        // 0 + 0 + 4 - 2 = 2 -> 1.25 -> 1.3
        assert_eq!(
            csv_output.lines().nth(1),
            Some("2024-06-01T09:30:00Z,<16,female,false,false,false,false,true,true,false,false,1.3")
        );
    }

    #[test]
    fn test_session_csv_requires_confirmation() {
        let session = Session::new("en");
        assert!(matches!(
            session_csv(&session, timestamp()),
            Err(SkyluxError::NotConfirmed { ref stage }) if stage == "gate"
        ));
    }

    #[test]
    fn test_exporter_writes_through_storage() {
        let session = confirmed_session(Answers::default());
        let exporter = CsvExporter::new(MockStorage::default());

        let path = exporter.export(&session, timestamp()).unwrap();
        let file_name = format!("assessment_{}.csv", session.id());
        assert_eq!(path, format!("mock://{}", file_name));

        let files = exporter.storage.files.borrow();
        let content = String::from_utf8(files[&file_name].clone()).unwrap();
        assert!(content.starts_with(HEADER));
    }
}
