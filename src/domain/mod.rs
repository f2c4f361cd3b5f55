// Domain layer: core models and ports (interfaces). No external dependencies
// beyond std/serde where possible.

pub mod model;
pub mod ports;
