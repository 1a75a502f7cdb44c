// Domain layer: answer model, score types and ports. No dependencies beyond serde.

pub mod model;
pub mod ports;
