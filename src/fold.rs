pub mod phase;
pub mod plan;
pub mod schedule;
pub mod visual;
