//! Visualization generation for progress reports
//!
//! Provides a generator for Mermaid charts (for Markdown); the HTML format
//! renders the same data with plain markup and CSS instead.

pub mod mermaid;

pub use mermaid::MermaidGenerator;
