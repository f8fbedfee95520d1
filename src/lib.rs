//! # elisp-deps
//!
//! Dependency extraction for collections of Emacs packages.
//!
//! Every immediate subdirectory of the scanned root is treated as one package.
//! Dependencies are read from `Package-Requires:` headers and top-level
//! `(require 'feature)` forms, classified against a metadata table, and
//! reported as text, JSON, or a Graphviz graph.
//!
//! ## Pipeline
//!
//! scanner → extractor → metadata resolver → text / JSON report or DOT graph

pub mod core;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod parsers;
pub mod render;
