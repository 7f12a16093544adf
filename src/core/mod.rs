pub mod error;
pub mod report;
pub mod suggest;
pub mod vcs;
