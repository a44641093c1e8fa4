// Domain layer: event/envelope models and ports to the external services.

pub mod model;
pub mod ports;
