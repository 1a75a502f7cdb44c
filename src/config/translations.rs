//! Translation catalog.
//!
//! English is the base table. Every other language only stores the labels it
//! overrides and falls through to English for the rest, so `en` overrides from
//! configuration reach every language. Lookups never miss, and an unknown
//! language code resolves to [`FALLBACK_LANGUAGE`].

use crate::domain::model::Flag;
use crate::utils::error::{Result, SkyluxError};
use crate::utils::validation::{validate_language_code, validate_non_empty_string};
use std::collections::{BTreeMap, HashMap};

pub const FALLBACK_LANGUAGE: &str = "en";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Title,
    ShowScore,
    RiskScore,
    Age,
    Sex,
    Export,
    Language,
    Confirm,
    Yes,
    No,
    Saved,
    ResultLow,
    ResultModerate,
    ResultHigh,
    FinalYes,
    FinalNo,
    SummaryTitle,
    SummaryNote,
    EnterBooking,
    Start,
    Consent,
    BookingRequired,
    ConsentRequired,
    EditAnswers,
    AnswerYes,
    AnswerNo,
    Elbow,
    Thumb,
    LittleFinger,
    Sublux,
    Dislocation,
    Operative,
    Apprehension,
    SkydiveTest,
}

impl Label {
    pub const ALL: [Label; 34] = [
        Label::Title,
        Label::ShowScore,
        Label::RiskScore,
        Label::Age,
        Label::Sex,
        Label::Export,
        Label::Language,
        Label::Confirm,
        Label::Yes,
        Label::No,
        Label::Saved,
        Label::ResultLow,
        Label::ResultModerate,
        Label::ResultHigh,
        Label::FinalYes,
        Label::FinalNo,
        Label::SummaryTitle,
        Label::SummaryNote,
        Label::EnterBooking,
        Label::Start,
        Label::Consent,
        Label::BookingRequired,
        Label::ConsentRequired,
        Label::EditAnswers,
        Label::AnswerYes,
        Label::AnswerNo,
        Label::Elbow,
        Label::Thumb,
        Label::LittleFinger,
        Label::Sublux,
        Label::Dislocation,
        Label::Operative,
        Label::Apprehension,
        Label::SkydiveTest,
    ];

    /// Key used in configuration files.
    pub fn key(&self) -> &'static str {
        match self {
            Label::Title => "title",
            Label::ShowScore => "showScore",
            Label::RiskScore => "riskScore",
            Label::Age => "age",
            Label::Sex => "sex",
            Label::Export => "export",
            Label::Language => "language",
            Label::Confirm => "confirm",
            Label::Yes => "yes",
            Label::No => "no",
            Label::Saved => "saved",
            Label::ResultLow => "resultLow",
            Label::ResultModerate => "resultModerate",
            Label::ResultHigh => "resultHigh",
            Label::FinalYes => "finalYes",
            Label::FinalNo => "finalNo",
            Label::SummaryTitle => "summaryTitle",
            Label::SummaryNote => "summaryNote",
            Label::EnterBooking => "enterBooking",
            Label::Start => "start",
            Label::Consent => "consent",
            Label::BookingRequired => "bookingRequired",
            Label::ConsentRequired => "consentRequired",
            Label::EditAnswers => "editAnswers",
            Label::AnswerYes => "answerYes",
            Label::AnswerNo => "answerNo",
            Label::Elbow => "elbow",
            Label::Thumb => "thumb",
            Label::LittleFinger => "littleFinger",
            Label::Sublux => "sublux",
            Label::Dislocation => "dislocation",
            Label::Operative => "operative",
            Label::Apprehension => "apprehension",
            Label::SkydiveTest => "skydiveTest",
        }
    }

    pub fn from_key(key: &str) -> Option<Label> {
        Label::ALL.into_iter().find(|label| label.key() == key)
    }

    pub fn for_flag(flag: Flag) -> Label {
        match flag {
            Flag::ElbowHyperextension => Label::Elbow,
            Flag::ThumbToForearm => Label::Thumb,
            Flag::LittleFingerOver90 => Label::LittleFinger,
            Flag::PriorSubluxation => Label::Sublux,
            Flag::PriorDislocation => Label::Dislocation,
            Flag::OperativeTreatment => Label::Operative,
            Flag::ApprehensionTestPositive => Label::Apprehension,
            Flag::SkydiveTestPositive => Label::SkydiveTest,
        }
    }
}

fn base_table() -> HashMap<Label, String> {
    [
        (Label::Title, "SkyLux: Shoulder Risk Scanner"),
        (Label::ShowScore, "Show My Risk Score"),
        (Label::RiskScore, "Your Risk Score"),
        (Label::Age, "Age Group"),
        (Label::Sex, "Biological Sex"),
        (Label::Export, "Export Data as CSV"),
        (Label::Language, "Language"),
        (Label::Confirm, "Do you still want to fly?"),
        (Label::Yes, "Yes, I want to fly"),
        (Label::No, "No, I prefer not to"),
        (Label::Saved, "✔ Response saved."),
        (Label::ResultLow, "Your risk of shoulder injury is very low."),
        (Label::ResultModerate, "Your risk of shoulder injury is moderate."),
        (Label::ResultHigh, "Your risk of shoulder injury is high."),
        (Label::FinalYes, "Great – have fun flying!"),
        (Label::FinalNo, "Smart choice – enjoy a drink and relax!"),
        (Label::SummaryTitle, "Assessment Summary"),
        (Label::SummaryNote, "Please show this screen to your instructor."),
        (Label::EnterBooking, "Enter your booking number to continue"),
        (Label::Start, "Start"),
        (
            Label::Consent,
            "I confirm that my answers are truthful and agree to this assessment",
        ),
        (Label::BookingRequired, "A booking number is required."),
        (Label::ConsentRequired, "Please confirm the consent statement."),
        (Label::EditAnswers, "Edit my answers"),
        (Label::AnswerYes, "Yes"),
        (Label::AnswerNo, "No"),
        (Label::Elbow, "Elbow Hyperextension >10°"),
        (Label::Thumb, "Thumb to Forearm"),
        (Label::LittleFinger, "Little Finger >90°"),
        (Label::Sublux, "Previous Subluxation"),
        (Label::Dislocation, "Previous Dislocation"),
        (Label::Operative, "Operative Treatment (if dislocation)"),
        (Label::Apprehension, "Positive Apprehension Test"),
        (Label::SkydiveTest, "Positive Functional Skydive Test"),
    ]
    .into_iter()
    .map(|(label, text)| (label, text.to_string()))
    .collect()
}

fn builtin_overrides() -> Vec<(&'static str, &'static str, [(Label, &'static str); 3])> {
    vec![
        (
            "de",
            "Deutsch",
            [
                (Label::Sex, "Biologisches Geschlecht"),
                (Label::EnterBooking, "Buchungsnummer eingeben, um fortzufahren"),
                (Label::Start, "Starten"),
            ],
        ),
        (
            "fr",
            "Français",
            [
                (Label::Sex, "Sexe biologique"),
                (
                    Label::EnterBooking,
                    "Entrez votre numéro de réservation pour continuer",
                ),
                (Label::Start, "Commencer"),
            ],
        ),
        (
            "it",
            "Italiano",
            [
                (Label::Sex, "Sesso biologico"),
                (
                    Label::EnterBooking,
                    "Inserisci il numero di prenotazione per continuare",
                ),
                (Label::Start, "Inizia"),
            ],
        ),
        (
            "nl",
            "Nederlands",
            [
                (Label::Sex, "Biologisch geslacht"),
                (Label::EnterBooking, "Voer je boekingsnummer in om door te gaan"),
                (Label::Start, "Start"),
            ],
        ),
        (
            "es",
            "Español",
            [
                (Label::Sex, "Sexo biológico"),
                (
                    Label::EnterBooking,
                    "Ingrese su número de reserva para continuar",
                ),
                (Label::Start, "Comenzar"),
            ],
        ),
    ]
}

/// Labels a language changes relative to the English table.
#[derive(Debug, Clone)]
struct LanguageTable {
    name: String,
    overrides: HashMap<Label, String>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    base: HashMap<Label, String>,
    languages: BTreeMap<String, LanguageTable>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// English plus the five built-in translations.
    pub fn builtin() -> Self {
        let mut languages = BTreeMap::new();
        languages.insert(
            FALLBACK_LANGUAGE.to_string(),
            LanguageTable {
                name: "English".to_string(),
                overrides: HashMap::new(),
            },
        );

        for (code, name, overrides) in builtin_overrides() {
            languages.insert(
                code.to_string(),
                LanguageTable {
                    name: name.to_string(),
                    overrides: overrides
                        .into_iter()
                        .map(|(label, text)| (label, text.to_string()))
                        .collect(),
                },
            );
        }

        Self {
            base: base_table(),
            languages,
        }
    }

    /// Merges raw `key -> text` overrides for one language.
    ///
    /// `en` overrides change the base table and therefore every language that
    /// does not override the same label itself. Unknown keys, empty texts and
    /// malformed language codes are rejected before anything changes.
    pub fn apply_overrides(&mut self, code: &str, overrides: &HashMap<String, String>) -> Result<()> {
        let field = format!("translations.{}", code);
        validate_language_code(&field, code)?;

        let mut parsed = Vec::with_capacity(overrides.len());
        for (key, text) in overrides {
            let label = Label::from_key(key).ok_or_else(|| SkyluxError::InvalidConfigValueError {
                field: field.clone(),
                value: key.clone(),
                reason: "Unknown translation key".to_string(),
            })?;
            validate_non_empty_string(&format!("{}.{}", field, key), text)?;
            parsed.push((label, text.clone()));
        }

        if code == FALLBACK_LANGUAGE {
            self.base.extend(parsed);
        } else {
            self.languages
                .entry(code.to_string())
                .or_insert_with(|| LanguageTable {
                    name: code.to_string(),
                    overrides: HashMap::new(),
                })
                .overrides
                .extend(parsed);
        }

        tracing::debug!(language = code, overrides = overrides.len(), "Applied translation overrides");
        Ok(())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.languages.contains_key(code)
    }

    /// The code itself when known, otherwise the fallback language.
    pub fn resolve<'a>(&self, code: &'a str) -> &'a str {
        if self.contains(code) {
            code
        } else {
            tracing::debug!(language = code, "Unknown language, falling back to en");
            FALLBACK_LANGUAGE
        }
    }

    pub fn text(&self, code: &str, label: Label) -> &str {
        self.languages
            .get(code)
            .and_then(|table| table.overrides.get(&label))
            .or_else(|| self.base.get(&label))
            .map(String::as_str)
            .unwrap_or_else(|| label.key())
    }

    /// `(code, display name)` pairs in code order.
    pub fn languages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.languages
            .iter()
            .map(|(code, table)| (code.as_str(), table.name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_languages() {
        let catalog = Catalog::builtin();
        let codes: Vec<&str> = catalog.languages().map(|(code, _)| code).collect();
        assert_eq!(codes, vec!["de", "en", "es", "fr", "it", "nl"]);
    }

    #[test]
    fn test_every_language_has_every_label() {
        let catalog = Catalog::builtin();
        for (code, _) in catalog.languages() {
            for label in Label::ALL {
                assert_ne!(catalog.text(code, label), label.key(), "{} {:?}", code, label);
            }
        }
    }

    #[test]
    fn test_overrides_on_top_of_english() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.text("de", Label::Start), "Starten");
        assert_eq!(catalog.text("de", Label::Sex), "Biologisches Geschlecht");
        assert_eq!(catalog.text("de", Label::Title), "SkyLux: Shoulder Risk Scanner");
    }

    #[test]
    fn test_unknown_language_falls_back() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.resolve("pt"), "en");
        assert_eq!(catalog.resolve("fr"), "fr");
        assert_eq!(catalog.text("pt", Label::Start), "Start");
    }

    #[test]
    fn test_label_keys_round_trip() {
        for label in Label::ALL {
            assert_eq!(Label::from_key(label.key()), Some(label));
        }
        assert_eq!(Label::from_key("Start"), None);
    }

    #[test]
    fn test_apply_overrides_adds_language() {
        let mut catalog = Catalog::builtin();
        let overrides = HashMap::from([("start".to_string(), "Começar".to_string())]);
        catalog.apply_overrides("pt-BR", &overrides).unwrap();

        assert!(catalog.contains("pt-BR"));
        assert_eq!(catalog.text("pt-BR", Label::Start), "Começar");
        assert_eq!(catalog.text("pt-BR", Label::Confirm), "Do you still want to fly?");
    }

    #[test]
    fn test_apply_overrides_rejects_unknown_key() {
        let mut catalog = Catalog::builtin();
        let overrides = HashMap::from([
            ("start".to_string(), "Los".to_string()),
            ("takeoff".to_string(), "Abflug".to_string()),
        ]);

        assert!(catalog.apply_overrides("de", &overrides).is_err());
        // 失敗時不可部分套用
        assert_eq!(catalog.text("de", Label::Start), "Starten");
    }

    #[test]
    fn test_english_overrides_reach_every_language() {
        let mut catalog = Catalog::builtin();
        catalog
            .apply_overrides("ar", &HashMap::from([("start".to_string(), "A".to_string())]))
            .unwrap();
        catalog
            .apply_overrides("en", &HashMap::from([("title".to_string(), "SkyLux Pro".to_string())]))
            .unwrap();
        catalog
            .apply_overrides("pt", &HashMap::from([("start".to_string(), "P".to_string())]))
            .unwrap();

        for code in ["en", "de", "ar", "pt"] {
            assert_eq!(catalog.text(code, Label::Title), "SkyLux Pro", "{}", code);
        }
        assert_eq!(catalog.text("de", Label::Start), "Starten");
        assert_eq!(catalog.text("ar", Label::Start), "A");
        assert_eq!(catalog.text("pt", Label::Start), "P");
        assert_eq!(catalog.text("en", Label::Start), "Start");
    }

    #[test]
    fn test_language_override_wins_over_english_override() {
        let mut catalog = Catalog::builtin();
        catalog
            .apply_overrides("en", &HashMap::from([("start".to_string(), "Go".to_string())]))
            .unwrap();

        assert_eq!(catalog.text("de", Label::Start), "Starten");
        assert_eq!(catalog.text("it", Label::Start), "Inizia");
        assert_eq!(catalog.text("en", Label::Start), "Go");
        assert_eq!(catalog.text("xx", Label::Start), "Go");
    }

    #[test]
    fn test_apply_overrides_rejects_bad_code() {
        let mut catalog = Catalog::builtin();
        assert!(catalog.apply_overrides("German", &HashMap::new()).is_err());
    }
}
