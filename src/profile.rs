//! Application profiles — which tool this binary is launching.
//!
//! One executable serves the whole family; symlinking or copying it as
//! `groovy`, `groovyc`, `groovysh` or `gant` selects the profile. Everything
//! profile-specific (entry class, flag table, suffixes, env vars) hangs off
//! the enum so there is exactly one place to look.

use std::env;

use crate::args::{
    build_table, ParamSpec, UnrecognizedPolicy, GANT_PARAMS, GROOVYC_PARAMS,
    GROOVYSH_PARAMS, GROOVY_PARAMS,
};
use crate::jvm::StartupJarSpec;

/// Bootstrap class shared by the whole Groovy family; the actual application
/// main class is passed to it via `--main`.
pub const STARTER_CLASS: &str = "org/codehaus/groovy/tools/GroovyStarter";
pub const STARTER_METHOD: &str = "main";

/// The groovy bootstrap jar. Also used by the gant profile, which loads a
/// groovy runtime next to its own jar.
pub const GROOVY_STARTUP_JAR: StartupJarSpec = StartupJarSpec {
    exact: Some("groovy-starter.jar"),
    prefix: "groovy-",
    selector: groovy_startup_jar,
};

fn groovy_startup_jar(name: &str) -> bool {
    match name.strip_prefix("groovy-") {
        Some(rest) => {
            rest.starts_with("all-")
                || rest.chars().next().is_some_and(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

fn gant_startup_jar(name: &str) -> bool {
    name.strip_prefix("gant-")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_digit())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppProfile {
    Groovy,
    GroovyCompiler,
    GroovyShell,
    Gant,
}

/// Strip the pieces of an executable name that do not select a profile:
/// directory, extension, Windows `w` launcher variant, case.
fn normalize_exec_name(name: &str) -> String {
    let mut name = name.to_ascii_lowercase();
    if let Some(stripped) = name.strip_suffix(".exe") {
        name = stripped.to_string();
    }
    if cfg!(windows) {
        if let Some(stripped) = name.strip_suffix('w') {
            name = stripped.to_string();
        }
    }
    name
}

impl AppProfile {
    /// Profile for the name the binary was invoked under. Unknown names get
    /// the plain interpreter so a renamed binary still works.
    pub fn for_exec_name(exec_name: &str) -> AppProfile {
        match normalize_exec_name(exec_name).as_str() {
            "groovyc" => AppProfile::GroovyCompiler,
            "groovysh" => AppProfile::GroovyShell,
            "gant" => AppProfile::Gant,
            _ => AppProfile::Groovy,
        }
    }

    /// The application main class handed to the starter via `--main`. For
    /// the shell the legacy implementation is selectable through the
    /// `OLDSHELL` environment toggle, checked at lookup time.
    pub fn launchee_main_class(self) -> &'static str {
        match self {
            AppProfile::Groovy => "groovy.ui.GroovyMain",
            AppProfile::GroovyCompiler => {
                "org.codehaus.groovy.tools.FileSystemCompiler"
            }
            AppProfile::GroovyShell => {
                if env::var("OLDSHELL").is_ok() {
                    "groovy.ui.InteractiveShell"
                } else {
                    "org.codehaus.groovy.tools.shell.Main"
                }
            }
            AppProfile::Gant => "gant.Gant",
        }
    }

    pub fn param_table(self) -> Vec<ParamSpec> {
        build_table(match self {
            AppProfile::Groovy => GROOVY_PARAMS,
            AppProfile::GroovyCompiler => GROOVYC_PARAMS,
            AppProfile::GroovyShell => GROOVYSH_PARAMS,
            AppProfile::Gant => GANT_PARAMS,
        })
    }

    /// File suffixes that mark a bare-looking `-` token as a script path.
    pub fn terminating_suffixes(self) -> &'static [&'static str] {
        match self {
            AppProfile::Groovy => &[".groovy", ".gvy", ".gy", ".gsh"],
            AppProfile::Gant => &[".gant"],
            _ => &[],
        }
    }

    /// Unmatched `-` arguments become JVM options for the whole family, so
    /// `groovy -Xmx512m script.groovy` works without a table entry per
    /// JVM flag.
    pub fn unrecognized_policy(self) -> UnrecognizedPolicy {
        UnrecognizedPolicy::ToJvm
    }

    /// Environment variable naming the application installation root.
    pub fn app_home_env_var(self) -> &'static str {
        match self {
            AppProfile::Gant => "GANT_HOME",
            _ => "GROOVY_HOME",
        }
    }

    /// Environment variable that can override the starter conf file.
    pub fn conf_env_var(self) -> &'static str {
        match self {
            AppProfile::Gant => "GANT_CONF",
            _ => "GROOVY_CONF",
        }
    }

    /// System property name carrying the installation root.
    pub fn home_property(self) -> &'static str {
        match self {
            AppProfile::Gant => "gant.home",
            _ => "groovy.home",
        }
    }

    /// Name of the starter configuration file under `conf/` in the
    /// installation root.
    pub fn conf_file_name(self) -> &'static str {
        match self {
            AppProfile::Gant => "gant-starter.conf",
            _ => "groovy-starter.conf",
        }
    }

    /// How the bootstrap jar in the installation's `lib/` is recognized.
    /// Groovy installations ship either an unversioned `groovy-starter.jar`
    /// or a versioned `groovy-<version>.jar` / `groovy-all-<version>.jar`;
    /// gant ships only versioned `gant-<version>.jar` files.
    pub fn startup_jar(self) -> StartupJarSpec {
        match self {
            AppProfile::Gant => StartupJarSpec {
                exact: None,
                prefix: "gant-",
                selector: gant_startup_jar,
            },
            _ => GROOVY_STARTUP_JAR,
        }
    }

    /// Whether invoking with no arguments should behave like `--help`
    /// (the compiler and gant print usage on their own).
    pub fn help_on_empty_args(self) -> bool {
        matches!(self, AppProfile::Groovy)
    }
}
