//! Parameter tables — the single source of truth for recognized flags.
//!
//! A table is plain configuration data: each entry names the aliases of one
//! flag family, how it consumes tokens and where the match is routed. Table
//! order encodes lookup priority (first match wins).

/// How a flag consumes input tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamArity {
    /// A standalone flag, e.g. `-v`.
    Standalone,
    /// A flag whose value is the following token, e.g. `--encoding UTF-8`.
    ValueFollowing,
    /// A flag with its value attached, e.g. `--color=false`.
    ValueAttached,
}

/// Where a matched argument is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Forwarded to the launched application.
    ToLaunchee,
    /// Forwarded to the launched application, and ends launcher-side
    /// parsing: everything after the match is forwarded verbatim.
    ToLauncheeTerminating,
    /// Forwarded to the embedded JVM as an option.
    ToJvm,
    /// Consumed by the launcher itself (e.g. `-jh`, `-client`); passed on
    /// to neither the JVM nor the launchee.
    Ignore,
}

impl Disposition {
    pub fn is_terminating(self) -> bool {
        matches!(self, Disposition::ToLauncheeTerminating)
    }

    pub fn forwards_to_launchee(self) -> bool {
        matches!(
            self,
            Disposition::ToLaunchee | Disposition::ToLauncheeTerminating
        )
    }
}

/// Where arguments that match no table entry are routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnrecognizedPolicy {
    /// Unmatched `-` arguments become JVM options (e.g. `-Xmx512m`).
    ToJvm,
    /// Unmatched `-` arguments are forwarded to the launchee.
    ToLaunchee,
}

/// A single flag definition. Aliases are interchangeable and share one
/// arity and one disposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub aliases: &'static [&'static str],
    pub arity: ParamArity,
    pub disposition: Disposition,
}

impl ParamSpec {
    /// Exact-match lookup across all aliases.
    pub fn has_alias(&self, arg: &str) -> bool {
        self.aliases.contains(&arg)
    }

    /// For attached-value specs: the alias the argument starts with, if any.
    pub fn matching_prefix(&self, arg: &str) -> Option<&'static str> {
        self.aliases
            .iter()
            .copied()
            .find(|alias| arg.starts_with(alias))
    }
}

// Flags the launcher itself understands, shared by every profile. They are
// consumed here and never reach the JVM or the launchee; the pipeline reads
// their values back out of the classification.
pub const CLASSPATH: ParamSpec = ParamSpec {
    aliases: &["-cp", "-classpath", "--classpath"],
    arity: ParamArity::ValueFollowing,
    disposition: Disposition::Ignore,
};

pub const CONF: ParamSpec = ParamSpec {
    aliases: &["--conf"],
    arity: ParamArity::ValueFollowing,
    disposition: Disposition::Ignore,
};

pub const JAVA_HOME_FLAG: ParamSpec = ParamSpec {
    aliases: &["-jh", "--javahome"],
    arity: ParamArity::ValueFollowing,
    disposition: Disposition::Ignore,
};

pub const CLIENT_VM: ParamSpec = ParamSpec {
    aliases: &["-client"],
    arity: ParamArity::Standalone,
    disposition: Disposition::Ignore,
};

pub const SERVER_VM: ParamSpec = ParamSpec {
    aliases: &["-server"],
    arity: ParamArity::Standalone,
    disposition: Disposition::Ignore,
};

pub const LAUNCHER_PARAMS: &[ParamSpec] =
    &[CLASSPATH, CONF, JAVA_HOME_FLAG, CLIENT_VM, SERVER_VM];

const fn launchee_standalone(aliases: &'static [&'static str]) -> ParamSpec {
    ParamSpec {
        aliases,
        arity: ParamArity::Standalone,
        disposition: Disposition::ToLaunchee,
    }
}

const fn launchee_with_value(aliases: &'static [&'static str]) -> ParamSpec {
    ParamSpec {
        aliases,
        arity: ParamArity::ValueFollowing,
        disposition: Disposition::ToLaunchee,
    }
}

const fn help(aliases: &'static [&'static str]) -> ParamSpec {
    ParamSpec {
        aliases,
        arity: ParamArity::Standalone,
        disposition: Disposition::ToLauncheeTerminating,
    }
}

/// Flags accepted by the `groovy` interpreter.
pub const GROOVY_PARAMS: &[ParamSpec] = &[
    launchee_with_value(&["-c", "--encoding"]),
    help(&["-h", "--help"]),
    launchee_standalone(&["-d", "--debug"]),
    launchee_with_value(&["-e"]),
    launchee_with_value(&["-i"]),
    launchee_with_value(&["-l"]),
    launchee_standalone(&["-n"]),
    launchee_standalone(&["-p"]),
    launchee_standalone(&["-v", "--version"]),
];

/// Flags accepted by the `groovyc` compiler.
pub const GROOVYC_PARAMS: &[ParamSpec] = &[
    launchee_with_value(&["--encoding"]),
    launchee_with_value(&["-F"]),
    launchee_with_value(&["-J"]),
    launchee_with_value(&["-d"]),
    launchee_standalone(&["-e", "--exception"]),
    help(&["-h", "--help"]),
    launchee_standalone(&["-j", "--jointCompilation"]),
    launchee_standalone(&["-v", "--version"]),
];

/// Flags accepted by the `groovysh` interactive shell.
pub const GROOVYSH_PARAMS: &[ParamSpec] = &[
    ParamSpec {
        aliases: &["-C", "--color"],
        arity: ParamArity::ValueAttached,
        disposition: Disposition::ToLaunchee,
    },
    launchee_with_value(&["-D", "--define"]),
    ParamSpec {
        aliases: &["-T", "--terminal"],
        arity: ParamArity::ValueAttached,
        disposition: Disposition::ToLaunchee,
    },
    launchee_standalone(&["-V", "--version"]),
    launchee_standalone(&["-d", "--debug"]),
    help(&["-h", "--help"]),
    launchee_standalone(&["-q", "--quiet"]),
    launchee_standalone(&["-v", "--verbose"]),
];

/// Flags accepted by `gant`.
pub const GANT_PARAMS: &[ParamSpec] = &[
    launchee_standalone(&["-c", "--usecache"]),
    launchee_standalone(&["-n", "--dry-run"]),
    launchee_with_value(&["-D"]),
    launchee_with_value(&["-P"]),
    launchee_with_value(&["-T", "--targets"]),
    launchee_standalone(&["-V", "--version"]),
    launchee_with_value(&["-d", "--cachedir"]),
    launchee_with_value(&["-f", "--gantfile"]),
    help(&["-h", "--help"]),
    launchee_with_value(&["-l", "--gantlib"]),
    launchee_standalone(&["-p", "--projecthelp"]),
    launchee_standalone(&["-q", "--quiet"]),
    launchee_standalone(&["-s", "--silent"]),
    launchee_standalone(&["-v", "--verbose"]),
];

/// A profile's full lookup table: launcher-owned flags first, then the
/// application's own flags.
pub fn build_table(app_params: &[ParamSpec]) -> Vec<ParamSpec> {
    LAUNCHER_PARAMS
        .iter()
        .chain(app_params.iter())
        .copied()
        .collect()
}
