// Domain layer: entities and the seeding port. Depends on nothing but std/serde.

pub mod model;
pub mod ports;
