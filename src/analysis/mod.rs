pub mod cloner;
pub mod orchestrator;

pub use cloner::{GitCloner, RepoCloner};
pub use orchestrator::{analyze_basic, AdvancedOutcome, AnalysisOrchestrator, CloneTarget};
