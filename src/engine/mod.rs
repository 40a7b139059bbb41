#[allow(clippy::module_inception)]
pub mod engine;

pub use engine::Bank;
