// Domain layer: core models and ports (interfaces). No external dependencies beyond async-trait.

pub mod model;
pub mod ports;
