//! Integration tests for hourglass.
//!
//! Most tests run the scanner end-to-end over an in-memory lister. Tests that
//! need a live WebHDFS namenode are marked `#[ignore]`.
//!
//! ## Running Live Tests
//!
//! ```bash
//! HG_TEST_NAMENODE=localhost:50070 cargo test -p integration-tests -- --ignored
//! ```

mod common;
mod output_test;
mod scanner_test;
mod webhdfs_test;
