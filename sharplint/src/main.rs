//! Main binary entry point for the `SharpLint` C# linter.
//!
//! This binary simply delegates to the shared `entry_point::run_with_args()` function
//! so that every entry point behaves the same.

use anyhow::Result;

fn main() -> Result<()> {
    let code = sharplint::entry_point::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}
