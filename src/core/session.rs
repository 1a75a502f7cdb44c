use crate::config::translations::{Catalog, Label};
use crate::core::flow::AssessmentFlow;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One guest's pass through the assessment. Lives only in memory.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    language: String,
    flow: AssessmentFlow,
}

impl Session {
    pub fn new(language: impl Into<String>) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            language: language.into(),
            flow: AssessmentFlow::new(),
        };
        tracing::debug!(session_id = %session.id, language = %session.language, "Session created");
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Selected code, which may be unknown to the catalog.
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn select_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
        tracing::debug!(session_id = %self.id, language = %self.language, "Language selected");
    }

    pub fn flow(&self) -> &AssessmentFlow {
        &self.flow
    }

    pub fn flow_mut(&mut self) -> &mut AssessmentFlow {
        &mut self.flow
    }

    /// Label text in the session language, English for unknown codes.
    pub fn label<'c>(&self, catalog: &'c Catalog, label: Label) -> &'c str {
        catalog.text(catalog.resolve(&self.language), label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sessions_get_distinct_ids() {
        let first = Session::new("en");
        let second = Session::new("en");
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_label_uses_selected_language() {
        let catalog = Catalog::builtin();
        let mut session = Session::new("en");
        assert_eq!(session.label(&catalog, Label::Start), "Start");

        session.select_language("es");
        assert_eq!(session.label(&catalog, Label::Start), "Comenzar");

        session.select_language("xx");
        assert_eq!(session.language(), "xx");
        assert_eq!(session.label(&catalog, Label::Start), "Start");
    }
}
