//! Core library for the `SharpLint` C# linter.
//!
//! This library parses C# sources into immutable, full-fidelity syntax trees,
//! runs syntax-only rules over them and rewrites the trees to fix what the
//! rules report. Two rules ship with it:
//! - `SL-N001`: boolean variables named with a `not` prefix
//! - `SL-S001`: `ToString()` called on a class that never declares it
//!
//! ```
//! use sharplint::cst::parse_source;
//! use sharplint::fix::fix_all;
//! use sharplint::rules::all_rules;
//!
//! let tree = parse_source("class A { void M() { bool notOk = false; if (notOk) { } } }").unwrap();
//! let outcome = fix_all(&tree, &all_rules());
//! assert_eq!(
//!     outcome.tree.text(),
//!     "class A { void M() { bool Ok = false; if (!Ok) { } } }"
//! );
//! ```

// Allow common complexity warnings - these are intentional design choices
#![allow(
    clippy::type_complexity,
    clippy::similar_names,
    clippy::format_push_string,
    clippy::map_unwrap_or,
    clippy::items_after_statements
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module containing the analysis driver.
/// This includes the `SharpLint` struct and its methods for running the analysis.
pub mod analyzer;

/// Module for loading configuration.
pub mod config;

/// Module containing the tree-sitter front end.
pub mod cst;

/// Module containing the syntax tree and its queries.
pub mod syntax;

/// Module containing the implementation of the lint rules.
pub mod rules;

/// Module containing the autofix engine and the tree rewriter.
pub mod fix;

/// Module containing utility functions.
/// This includes helper functions used across the application.
pub mod utils;

/// Module defining the entry point logic shared by the binaries.
pub mod entry_point;

/// Module containing shared constants.
pub mod constants;
/// Module containing the linter logic and visitor.
pub mod linter;

/// Module for rich CLI output formatting with colored text and tables.
pub mod output;

/// Module defining the command-line interface arguments and structs.
pub mod cli;
