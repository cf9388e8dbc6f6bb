//! Classpath assembly and startup-jar discovery.
//!
//! The classpath is built as one JVM option string with a fixed prefix. The
//! builder appends in a fixed order: scanned jar directories, explicit jars,
//! the user/global classpath per policy, and optionally `tools.jar` from the
//! runtime home. Missing scan directories are fatal; a scan that matches
//! nothing is not.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::LaunchError;

/// Option prefix for the application classpath. Always emitted, even when
/// the classpath ends up empty.
pub const CLASSPATH_PREFIX: &str = "-Djava.class.path=";

/// Platform separator for classpath entries.
pub fn path_separator() -> &'static str {
    if cfg!(windows) {
        ";"
    } else {
        ":"
    }
}

/// How the `CLASSPATH` environment variable participates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClasspathPolicy {
    /// Never consult the environment.
    IgnoreGlobal,
    /// Use the environment value only when the user gave no `-cp` value.
    GlobalUnlessUserSupplied,
    /// Append the environment value even alongside a user-supplied one.
    AlwaysGlobal,
}

/// A directory whose jar files are appended to the classpath.
#[derive(Debug, Clone)]
pub struct JarDirSpec {
    pub dir: PathBuf,
    /// Reserved; scanning is non-recursive and a `true` here is rejected
    /// rather than silently ignored.
    pub recursive: bool,
    /// Predicate over the bare file name deciding inclusion.
    pub selector: fn(&str) -> bool,
}

impl JarDirSpec {
    pub fn all_jars(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            recursive: false,
            selector: |name| name.ends_with(".jar"),
        }
    }
}

/// Accumulates classpath entries in append order and renders the final
/// `-Djava.class.path=` option.
#[derive(Debug, Default)]
pub struct ClasspathBuilder {
    entries: Vec<String>,
}

impl ClasspathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_entry(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        if !entry.is_empty() {
            self.entries.push(entry);
        }
    }

    /// Append every selected jar from `spec.dir`, sorted by file name so a
    /// rebuild of the same directory yields the same classpath.
    pub fn scan_jar_dir(&mut self, spec: &JarDirSpec) -> Result<(), LaunchError> {
        if spec.recursive {
            return Err(LaunchError::RecursiveScanUnsupported {
                path: spec.dir.clone(),
            });
        }
        if !spec.dir.is_dir() {
            return Err(LaunchError::JarDirMissing {
                path: spec.dir.clone(),
            });
        }
        let mut names: Vec<String> = Vec::new();
        let entries =
            spec.dir
                .read_dir()
                .map_err(|source| LaunchError::JarDirRead {
                    path: spec.dir.clone(),
                    source,
                })?;
        for entry in entries {
            let entry = entry.map_err(|source| LaunchError::JarDirRead {
                path: spec.dir.clone(),
                source,
            })?;
            if let Some(name) = entry.file_name().to_str() {
                if (spec.selector)(name) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        debug!(dir = %spec.dir.display(), count = names.len(), "scanned jar directory");
        for name in names {
            self.entries
                .push(spec.dir.join(name).to_string_lossy().into_owned());
        }
        Ok(())
    }

    /// Render the classpath JVM option. The prefix is present even with no
    /// entries.
    pub fn build(self) -> String {
        let mut option = String::from(CLASSPATH_PREFIX);
        option.push_str(&self.entries.join(path_separator()));
        option
    }
}

/// The user/global classpath contribution under `policy`: the user's `-cp`
/// value, the `CLASSPATH` environment variable, both, or neither.
pub fn resolve_user_classpath(
    policy: ClasspathPolicy,
    user_classpath: Option<&str>,
) -> Option<String> {
    let global = env::var("CLASSPATH").ok().filter(|v| !v.is_empty());
    match policy {
        ClasspathPolicy::IgnoreGlobal => user_classpath.map(str::to_string),
        ClasspathPolicy::GlobalUnlessUserSupplied => {
            user_classpath.map(str::to_string).or(global)
        }
        ClasspathPolicy::AlwaysGlobal => match (user_classpath, global) {
            (Some(user), Some(global)) => {
                Some(format!("{user}{}{global}", path_separator()))
            }
            (Some(user), None) => Some(user.to_string()),
            (None, global) => global,
        },
    }
}

/// How a bootstrap archive is recognized.
#[derive(Debug, Clone, Copy)]
pub struct StartupJarSpec {
    /// A name that wins outright when present, e.g. an unversioned
    /// starter jar.
    pub exact: Option<&'static str>,
    /// Name prefix, used in the not-found diagnostic.
    pub prefix: &'static str,
    /// Predicate over the full file name selecting versioned candidates.
    pub selector: fn(&str) -> bool,
}

/// Locate the bootstrap archive in `dir`.
///
/// The exact name wins outright. Otherwise exactly one selector match is
/// required; two or more abort naming the first two so the launch never
/// depends on directory iteration order.
pub fn find_startup_jar(
    dir: &Path,
    spec: &StartupJarSpec,
    optional: bool,
) -> Result<Option<PathBuf>, LaunchError> {
    if !dir.is_dir() {
        if optional {
            return Ok(None);
        }
        return Err(LaunchError::JarDirMissing {
            path: dir.to_path_buf(),
        });
    }

    let mut candidates: Vec<String> = Vec::new();

    let entries = dir.read_dir().map_err(|source| LaunchError::JarDirRead {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| LaunchError::JarDirRead {
            path: dir.to_path_buf(),
            source,
        })?;
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(_) => continue,
        };
        if spec.exact == Some(name.as_str()) {
            debug!(jar = %name, "found startup jar by exact name");
            return Ok(Some(dir.join(name)));
        }
        if name.ends_with(".jar") && (spec.selector)(&name) {
            candidates.push(name);
        }
    }

    candidates.sort();
    match candidates.len() {
        0 => {
            if optional {
                Ok(None)
            } else {
                Err(LaunchError::StartupJarNotFound {
                    dir: dir.to_path_buf(),
                    prefix: spec.prefix.to_string(),
                })
            }
        }
        1 => {
            debug!(jar = %candidates[0], "found startup jar");
            Ok(Some(dir.join(candidates.remove(0))))
        }
        _ => Err(LaunchError::StartupJarAmbiguous {
            dir: dir.to_path_buf(),
            first: candidates.remove(0),
            second: candidates.remove(0),
        }),
    }
}

/// `tools.jar` under the runtime home, trying the JDK layout before the
/// plain layout. JDK 9+ runtimes have neither; absence is not an error.
pub fn find_tools_jar(java_home: &Path) -> Option<PathBuf> {
    for candidate in [
        java_home.join("lib").join("tools.jar"),
        java_home.join("..").join("lib").join("tools.jar"),
    ] {
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}
