use crate::utils::error::SkyluxError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "<16")]
    Under16,
    #[default]
    #[serde(rename = "16-25")]
    From16To25,
    #[serde(rename = "25-30")]
    From25To30,
    #[serde(rename = "30-35")]
    From30To35,
    #[serde(rename = ">35")]
    Over35,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 5] = [
        AgeGroup::Under16,
        AgeGroup::From16To25,
        AgeGroup::From25To30,
        AgeGroup::From30To35,
        AgeGroup::Over35,
    ];

    /// 問卷與匯出使用的代碼
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Under16 => "<16",
            AgeGroup::From16To25 => "16-25",
            AgeGroup::From25To30 => "25-30",
            AgeGroup::From30To35 => "30-35",
            AgeGroup::Over35 => ">35",
        }
    }

    /// 選單上顯示的文字
    pub fn option_label(&self) -> &'static str {
        match self {
            AgeGroup::Under16 => "Under 16",
            AgeGroup::From16To25 => "16–25",
            AgeGroup::From25To30 => "25–30",
            AgeGroup::From30To35 => "30–35",
            AgeGroup::Over35 => "Over 35",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeGroup {
    type Err = SkyluxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgeGroup::ALL
            .into_iter()
            .find(|group| group.as_str() == s.trim())
            .ok_or_else(|| SkyluxError::InvalidAnswer {
                field: "ageGroup".to_string(),
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = SkyluxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            _ => Err(SkyluxError::InvalidAnswer {
                field: "sex".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// The eight yes/no findings of the questionnaire, in the order they are asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    ElbowHyperextension,
    ThumbToForearm,
    LittleFingerOver90,
    PriorSubluxation,
    PriorDislocation,
    OperativeTreatment,
    ApprehensionTestPositive,
    SkydiveTestPositive,
}

impl Flag {
    pub const ALL: [Flag; 8] = [
        Flag::ElbowHyperextension,
        Flag::ThumbToForearm,
        Flag::LittleFingerOver90,
        Flag::PriorSubluxation,
        Flag::PriorDislocation,
        Flag::OperativeTreatment,
        Flag::ApprehensionTestPositive,
        Flag::SkydiveTestPositive,
    ];

    pub fn field_name(&self) -> &'static str {
        match self {
            Flag::ElbowHyperextension => "elbowHyperextension",
            Flag::ThumbToForearm => "thumbToForearm",
            Flag::LittleFingerOver90 => "littleFingerOver90",
            Flag::PriorSubluxation => "priorSubluxation",
            Flag::PriorDislocation => "priorDislocation",
            Flag::OperativeTreatment => "operativeTreatment",
            Flag::ApprehensionTestPositive => "apprehensionTestPositive",
            Flag::SkydiveTestPositive => "skydiveTestPositive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Answers {
    pub age_group: AgeGroup,
    pub sex: Sex,
    pub elbow_hyperextension: bool,
    pub thumb_to_forearm: bool,
    pub little_finger_over90: bool,
    pub prior_subluxation: bool,
    pub prior_dislocation: bool,
    pub operative_treatment: bool,
    pub apprehension_test_positive: bool,
    pub skydive_test_positive: bool,
}

impl Answers {
    pub fn flag(&self, flag: Flag) -> bool {
        match flag {
            Flag::ElbowHyperextension => self.elbow_hyperextension,
            Flag::ThumbToForearm => self.thumb_to_forearm,
            Flag::LittleFingerOver90 => self.little_finger_over90,
            Flag::PriorSubluxation => self.prior_subluxation,
            Flag::PriorDislocation => self.prior_dislocation,
            Flag::OperativeTreatment => self.operative_treatment,
            Flag::ApprehensionTestPositive => self.apprehension_test_positive,
            Flag::SkydiveTestPositive => self.skydive_test_positive,
        }
    }

    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        let slot = match flag {
            Flag::ElbowHyperextension => &mut self.elbow_hyperextension,
            Flag::ThumbToForearm => &mut self.thumb_to_forearm,
            Flag::LittleFingerOver90 => &mut self.little_finger_over90,
            Flag::PriorSubluxation => &mut self.prior_subluxation,
            Flag::PriorDislocation => &mut self.prior_dislocation,
            Flag::OperativeTreatment => &mut self.operative_treatment,
            Flag::ApprehensionTestPositive => &mut self.apprehension_test_positive,
            Flag::SkydiveTestPositive => &mut self.skydive_test_positive,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Moderate => "moderate",
            RiskTier::High => "high",
        }
    }
}

/// Normalized score in `0.0..=10.0` with one decimal, plus its tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub value: f64,
    pub tier: RiskTier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers_defaults() {
        let answers = Answers::default();
        assert_eq!(answers.age_group, AgeGroup::From16To25);
        assert_eq!(answers.sex, Sex::Male);
        assert!(Flag::ALL.iter().all(|flag| !answers.flag(*flag)));
    }

    #[test]
    fn test_set_flag_touches_only_one_field() {
        let mut answers = Answers::default();
        answers.set_flag(Flag::OperativeTreatment, true);
        assert!(answers.operative_treatment);
        assert_eq!(
            Flag::ALL.iter().filter(|flag| answers.flag(**flag)).count(),
            1
        );
    }

    #[test]
    fn test_age_group_parse() {
        assert_eq!("<16".parse::<AgeGroup>().unwrap(), AgeGroup::Under16);
        assert_eq!(" >35 ".parse::<AgeGroup>().unwrap(), AgeGroup::Over35);
        assert!("40".parse::<AgeGroup>().is_err());
    }

    #[test]
    fn test_sex_parse() {
        assert_eq!("Female".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!("m".parse::<Sex>().unwrap(), Sex::Male);
        assert!("other".parse::<Sex>().is_err());
    }

    #[test]
    fn test_answers_deserialize_with_missing_fields() {
        let answers: Answers = serde_json::from_str(
            r#"{"ageGroup": ">35", "priorDislocation": true}"#,
        )
        .unwrap();
        assert_eq!(answers.age_group, AgeGroup::Over35);
        assert_eq!(answers.sex, Sex::Male);
        assert!(answers.prior_dislocation);
        assert!(!answers.operative_treatment);
    }
}
