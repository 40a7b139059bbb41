#[allow(clippy::module_inception)]
pub mod orchestrator;

pub use orchestrator::run;
