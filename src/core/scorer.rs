//! Shoulder risk scoring.
//!
//! Points are accumulated from the answers, clamped at zero, scaled against a
//! fixed maximum of 16 raw points and capped at 10. The constants are literal so
//! that scores stay identical to the ones already shown to instructors.

use crate::domain::model::{AgeGroup, Answers, Flag, RiskTier, Score, Sex};

/// Raw points that map to a normalized score of 10.
pub const NORMALIZATION_DIVISOR: f64 = 16.0;
/// Upper bound of the normalized score.
pub const MAX_SCORE: f64 = 10.0;
/// Points removed when a dislocation was treated operatively.
pub const SURGICAL_DISCOUNT: i32 = 2;

pub const MODERATE_THRESHOLD: f64 = 3.0;
pub const HIGH_THRESHOLD: f64 = 6.0;

fn age_points(age_group: AgeGroup) -> i32 {
    match age_group {
        AgeGroup::From16To25 => 3,
        AgeGroup::From25To30 => 2,
        AgeGroup::From30To35 => 1,
        AgeGroup::Under16 | AgeGroup::Over35 => 0,
    }
}

fn flag_points(flag: Flag) -> i32 {
    match flag {
        Flag::ElbowHyperextension | Flag::ThumbToForearm | Flag::LittleFingerOver90 => 1,
        Flag::PriorSubluxation | Flag::SkydiveTestPositive => 3,
        Flag::PriorDislocation | Flag::ApprehensionTestPositive => 4,
        // 只透過手術折抵生效
        Flag::OperativeTreatment => 0,
    }
}

/// Unnormalized point total, never below zero.
pub fn raw_points(answers: &Answers) -> i32 {
    let mut raw = age_points(answers.age_group);

    if answers.sex == Sex::Male {
        raw += 1;
    }

    raw += Flag::ALL
        .iter()
        .filter(|flag| answers.flag(**flag))
        .map(|flag| flag_points(*flag))
        .sum::<i32>();

    if answers.prior_dislocation && answers.operative_treatment {
        raw -= SURGICAL_DISCOUNT;
    }

    raw.max(0)
}

/// Scales raw points to `0.0..=10.0`, rounding half up to one decimal.
pub fn normalize(raw: i32) -> f64 {
    let scaled = (f64::from(raw.max(0)) / NORMALIZATION_DIVISOR) * MAX_SCORE;
    let rounded = (scaled * 10.0).round() / 10.0;
    rounded.min(MAX_SCORE)
}

pub fn classify(value: f64) -> RiskTier {
    if value < MODERATE_THRESHOLD {
        RiskTier::Low
    } else if value < HIGH_THRESHOLD {
        RiskTier::Moderate
    } else {
        RiskTier::High
    }
}

pub fn score(answers: &Answers) -> Score {
    let raw = raw_points(answers);
    let value = normalize(raw);
    let tier = classify(value);

    tracing::debug!(raw, value, tier = tier.as_str(), "Computed shoulder risk score");

    Score { value, tier }
}
