pub mod flow;
pub mod scorer;
pub mod session;

pub use crate::domain::model::{AgeGroup, Answers, Flag, RiskTier, Score, Sex};
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
