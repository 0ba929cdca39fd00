//! cityvec-test - Regression test support for the cityvec workspace
//!
//! Provides a small regression-test harness supporting three modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison (visual inspection)
//!
//! # Usage
//!
//! ```ignore
//! use cityvec_test::RegParams;
//!
//! let mut rp = RegParams::new("conncomp");
//! rp.compare_values(4452.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Path to the workspace root, computed from this crate's manifest
/// directory (`crates/cityvec-test` -> up two levels).
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    format!("{}/../..", manifest_dir)
}

/// Path to the golden files directory.
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Path to the regout (regression output) directory.
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
