pub mod director;
pub mod gallery;
