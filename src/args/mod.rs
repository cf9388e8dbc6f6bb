//! Argument handling for the launcher family.
//!
//! A declarative pipeline over the raw argument vector:
//!
//! ```text
//! Raw args → Classify (against a ParamSpec table) → route to JVM / launchee
//! ```
//!
//! The table is configuration data; classification is a pure function that
//! can be unit-tested independently of any JVM.

mod classifier;
mod registry;

pub use classifier::{classify, Classification, ClassifiedArg, ParamValue};
pub use registry::{
    build_table, Disposition, ParamArity, ParamSpec, UnrecognizedPolicy,
    GANT_PARAMS, GROOVYC_PARAMS, GROOVYSH_PARAMS, GROOVY_PARAMS,
    LAUNCHER_PARAMS,
};
