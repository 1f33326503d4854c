//! End-to-end tests.
//!
//! These drive the whole pipeline with real files: the JSON loader reads the
//! shipped data directory, build files are parsed from disk and the exporter
//! fills a generated PDF form.
//!
//! ```bash
//! cargo test -p brancalonia-engine --lib e2e_tests
//! ```

mod e2e_helpers;

pub use e2e_helpers::*;
