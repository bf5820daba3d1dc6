//! ccl-test - Regression test framework for connected component labeling
//!
//! This crate provides:
//!
//! - [`RegParams`] - Indexed comparisons that collect failures and report
//!   them together at [`RegParams::cleanup`]
//! - Fixtures - ASCII-art grids, the canonical labeling scenarios, and
//!   seeded random binary grids
//! - [`setup_logging`] - Route `log` output from the library to stderr
//!
//! # Usage
//!
//! ```ignore
//! use ccl_test::{RegParams, parse_grid};
//!
//! let mut rp = RegParams::new("onepass");
//! let grid = parse_grid("##.\n..#").unwrap();
//! rp.compare_values(3.0, grid.foreground_count() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use fixtures::{
    all_background, all_foreground, checkerboard, comb, diagonal_pair, hourglass, parse_grid,
    random_grid, serpentine,
};
pub use params::RegParams;

use std::sync::Once;

static LOGGING: Once = Once::new();

/// Install a stderr logger with the given level spec (e.g. `"debug"`).
///
/// Only the first call has an effect. Honors `RUST_LOG` when set.
pub fn setup_logging(level: &str) {
    LOGGING.call_once(|| {
        let spec = std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());
        match flexi_logger::Logger::try_with_str(&spec) {
            Ok(logger) => {
                if let Err(e) = logger.log_to_stderr().start() {
                    eprintln!("Logger initialization failed with {}", e);
                }
            }
            Err(e) => eprintln!("Invalid log spec {:?}: {}", spec, e),
        }
    });
}
