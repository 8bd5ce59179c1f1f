pub mod engine;
pub mod synth;
