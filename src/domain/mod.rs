// Domain layer: core models and ports (interfaces). Artifact formats and storage live in adapters.

pub mod model;
pub mod ports;
