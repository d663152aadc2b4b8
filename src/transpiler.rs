//! Transpiler module.
//!
//! This module provides access to reinhardt-jsx-core: the host parser
//! adapter, fragment boundary detection, code generation, `displayName`
//! annotation and the [`Transpiler`] driver.
//!
//! # Examples
//!
//! ```rust,no_run
//! use reinhardt_jsx::transpiler::{HostParser, OxcHostParser, Transpiler, TranspileSettings};
//! ```

pub use reinhardt_jsx_core::*;
