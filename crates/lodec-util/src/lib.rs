//! lodec-util - Shared infrastructure for the Lode compiler front-end.
//!
//! This crate holds what every phase needs and no phase owns: the
//! diagnostic types. The front-end reports errors by constructing a
//! [`Diagnostic`] and propagating it outward as the `Err` arm of a
//! `Result`; the first error aborts the compile (there is no recovery
//! and no diagnostic batching in this front-end).

pub mod diagnostic;

pub use diagnostic::{Diagnostic, ErrorKind, Level};
