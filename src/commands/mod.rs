pub mod check;
pub mod publish;

pub use check::run_check;
pub use publish::run_publish;

/// Conventional marker name used when `--tag` is not given
pub const DEFAULT_TAG: &str = "last-deploy";

/// Conventional primary remote used when `--remote` is not given
pub const DEFAULT_REMOTE: &str = "origin";
