//! Native launcher family for JVM applications.
//!
//! The binary classifies its command line against a declarative parameter
//! table, assembles the JVM classpath and option vector, embeds a JVM in
//! the launcher process through the JNI invocation API and calls the
//! application's fixed bootstrap entry point. Which application is launched
//! is decided by the name the binary was invoked under.

pub mod args;
pub mod error;
pub mod home;
pub mod jvm;
pub mod logging;
pub mod pipeline;
pub mod profile;
