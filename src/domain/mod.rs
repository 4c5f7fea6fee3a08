// Domain layer: core models and ports (interfaces) shared by the catalogue, session and exporters.

pub mod model;
pub mod ports;
