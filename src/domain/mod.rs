// Domain layer: registration models and the ports the form talks through.

pub mod model;
pub mod ports;
