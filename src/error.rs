//! Error taxonomy and exit-code mapping for the launcher.
//!
//! Every fatal condition maps to exactly one diagnostic line on stderr and a
//! non-zero process exit code. JVM-creation failure codes are propagated as
//! the exit code so shells can distinguish them.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while preparing for or performing a launch.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// A value-following flag appeared as the last argument.
    #[error("illegal use of {flag} (requires a value)")]
    MissingParamValue { flag: String },

    /// Application installation root could not be resolved.
    #[error("could not resolve application home: {reason}")]
    AppHomeNotFound { reason: String },

    /// Gant runs on top of an ant installation; not finding one is fatal.
    #[error("could not locate ant installation (set ANT_HOME)")]
    AntHomeNotFound,

    /// No java home from any allowed source.
    #[error("{0}")]
    JavaHomeNotFound(&'static str),

    /// A resolved java home does not point to an existing directory.
    #[error("java home '{path}' is not an existing directory")]
    JavaHomeInvalid { path: PathBuf },

    /// A configured jar directory is absent. Scanning a missing directory
    /// must fail rather than silently shorten the classpath.
    #[error("could not read directory '{path}' to append jar files from")]
    JarDirMissing { path: PathBuf },

    #[error("failed to read directory '{path}': {source}")]
    JarDirRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Recursive jar-dir scanning is reserved but not implemented.
    #[error("recursive jar scan of '{path}' is not supported")]
    RecursiveScanUnsupported { path: PathBuf },

    /// The bootstrap archive was not found where it must exist.
    #[error("no startup jar matching '{prefix}*.jar' found in '{dir}'")]
    StartupJarNotFound { dir: PathBuf, prefix: String },

    /// Two or more candidate bootstrap archives. Picking one silently would
    /// make the launch depend on directory iteration order.
    #[error("ambiguous startup jar in '{dir}': both '{first}' and '{second}' match")]
    StartupJarAmbiguous {
        dir: PathBuf,
        first: String,
        second: String,
    },

    /// No loadable JVM shared library under the resolved home.
    #[error(
        "could not find {flavor} jvm under '{home}'\n       \
         please check that it is a valid jdk / jre containing the desired type of jvm"
    )]
    JvmLibraryNotFound { home: PathBuf, flavor: &'static str },

    /// The library file exists but the dynamic loader rejected it.
    #[error("jvm shared library '{path}' exists but could not be loaded: {source}")]
    JvmLibraryLoad {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    /// `JNI_CreateJavaVM` is missing from a library that loaded fine. This
    /// indicates a corrupt or incompatible runtime install, not a missing one.
    #[error("jvm creator function not found in '{path}': {source}")]
    CreatorSymbolMissing {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    /// The runtime refused to come up; `code` is the raw JNI return value.
    #[error("jvm creation failed with code {code}: {cause}")]
    JvmCreation { code: i32, cause: &'static str },

    /// A launcher-side string could not cross the JNI boundary.
    #[error("could not convert '{value}' to a java string")]
    StringConversion { value: String },

    #[error("could not find startup class {class}")]
    EntryClassNotFound { class: String },

    #[error("could not find startup method \"{method}\" in class {class}")]
    EntryMethodNotFound { class: String, method: String },

    /// The invoked entry point raised an uncaught exception. Reported and
    /// cleared; the launcher exits non-zero but does not crash.
    #[error("uncaught exception from {class}.{method}")]
    UncaughtException { class: String, method: String },

    /// Any other JNI-level failure, with the underlying error attached.
    #[error("jni error: {0}")]
    Jni(#[from] jni::errors::Error),
}

impl LaunchError {
    /// Process exit code for this error. JVM creation codes pass through;
    /// everything else is a generic failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::JvmCreation { code, .. } => *code,
            _ => 1,
        }
    }
}

/// Human-readable cause for a `JNI_CreateJavaVM` return code.
pub fn creation_failure_cause(code: i32) -> &'static str {
    use jni::sys;
    match code {
        sys::JNI_ERR => "unknown error",
        sys::JNI_EDETACHED => "thread detachment",
        sys::JNI_EVERSION => "JNI version problems",
        sys::JNI_ENOMEM => "not enough memory",
        sys::JNI_EEXIST => "jvm already created",
        sys::JNI_EINVAL => "invalid arguments to jvm creation",
        _ => "unknown exit code",
    }
}
