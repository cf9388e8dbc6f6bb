//! Argument classifier — raw args → classified args.
//!
//! Classification walks the argument vector left to right against a
//! `ParamSpec` table. Once a terminating condition is met (a bare token
//! matching no spec, a token carrying a terminating suffix, an empty token,
//! or a flag whose spec is terminating) every remaining token is tail
//! material and is forwarded to the launchee verbatim.

use crate::args::registry::{
    Disposition, ParamArity, ParamSpec, UnrecognizedPolicy,
};
use crate::error::LaunchError;

/// The value carried by a matched flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Standalone flag, no value.
    None,
    /// Value consumed from the following token.
    Following(String),
    /// Value attached to the flag token itself (everything after the alias).
    Attached(String),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::None => None,
            ParamValue::Following(v) | ParamValue::Attached(v) => Some(v),
        }
    }
}

/// One classified input token (a following value is folded into its flag).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedArg<'t> {
    /// Token matched a table entry.
    Matched {
        /// The token as given (not normalized to a canonical alias).
        token: String,
        value: ParamValue,
        spec: &'t ParamSpec,
    },
    /// A `-` token with no table entry. Routing is decided by the profile's
    /// `UnrecognizedPolicy`.
    Unrecognized(String),
    /// A token at or after the terminating condition, forwarded verbatim.
    TerminatingTail(String),
}

/// Result of classifying an argument vector against one table.
#[derive(Debug)]
pub struct Classification<'t> {
    args: Vec<ClassifiedArg<'t>>,
}

/// Classify `args` against `table`. Terminating suffixes (e.g. `.groovy`)
/// mark a token as the start of the tail even though it has no leading `-`.
///
/// Fails without partial results when a value-following flag is the last
/// token.
pub fn classify<'t>(
    args: &[String],
    table: &'t [ParamSpec],
    terminating_suffixes: &[&str],
) -> Result<Classification<'t>, LaunchError> {
    let mut classified = Vec::with_capacity(args.len());
    let mut iter = args.iter().peekable();
    let mut terminated = false;

    while let Some(arg) = iter.next() {
        if terminated {
            classified.push(ClassifiedArg::TerminatingTail(arg.clone()));
            continue;
        }

        if arg.is_empty()
            || terminating_suffixes.iter().any(|s| arg.ends_with(s))
        {
            terminated = true;
            classified.push(ClassifiedArg::TerminatingTail(arg.clone()));
            continue;
        }

        // the table is consulted before the bare-token check, so an alias
        // without a leading dash still matches
        match lookup(arg, table) {
            Some((spec, value_from_prefix)) => {
                let value = match spec.arity {
                    ParamArity::Standalone => ParamValue::None,
                    ParamArity::ValueAttached => {
                        ParamValue::Attached(value_from_prefix.unwrap_or_default())
                    }
                    ParamArity::ValueFollowing => match iter.next() {
                        Some(v) => ParamValue::Following(v.clone()),
                        None => {
                            return Err(LaunchError::MissingParamValue {
                                flag: arg.clone(),
                            })
                        }
                    },
                };
                if spec.disposition.is_terminating() {
                    terminated = true;
                }
                classified.push(ClassifiedArg::Matched {
                    token: arg.clone(),
                    value,
                    spec,
                });
            }
            None if arg.starts_with('-') => {
                classified.push(ClassifiedArg::Unrecognized(arg.clone()))
            }
            None => {
                terminated = true;
                classified.push(ClassifiedArg::TerminatingTail(arg.clone()));
            }
        }
    }

    Ok(Classification { args: classified })
}

/// First match in table order wins. Standalone and value-following specs
/// match exactly; attached-value specs match by alias prefix.
fn lookup<'t>(
    arg: &str,
    table: &'t [ParamSpec],
) -> Option<(&'t ParamSpec, Option<String>)> {
    for spec in table {
        match spec.arity {
            ParamArity::Standalone | ParamArity::ValueFollowing => {
                if spec.has_alias(arg) {
                    return Some((spec, None));
                }
            }
            ParamArity::ValueAttached => {
                if let Some(alias) = spec.matching_prefix(arg) {
                    return Some((spec, Some(arg[alias.len()..].to_string())));
                }
            }
        }
    }
    None
}

impl<'t> Classification<'t> {
    pub fn args(&self) -> &[ClassifiedArg<'t>] {
        &self.args
    }

    /// The value of the flag with the given alias, resolved across all
    /// aliases of the matched spec. A matched standalone flag yields
    /// `Some("")` so presence is distinguishable from absence.
    pub fn value_of(&self, alias: &str) -> Option<&str> {
        self.args.iter().find_map(|arg| match arg {
            ClassifiedArg::Matched { value, spec, .. } if spec.has_alias(alias) => {
                Some(value.as_str().unwrap_or(""))
            }
            _ => None,
        })
    }

    /// Whether a flag with the given alias was present at all.
    pub fn has_flag(&self, alias: &str) -> bool {
        self.value_of(alias).is_some()
    }

    /// Arguments destined for the launchee, in original relative order:
    /// matched forward-to-launchee flags (with their value tokens restored),
    /// unrecognized flags when the policy routes them here, and the whole
    /// terminating tail.
    pub fn launchee_args(&self, policy: UnrecognizedPolicy) -> Vec<String> {
        let mut out = Vec::new();
        for arg in &self.args {
            match arg {
                ClassifiedArg::Matched { token, value, spec }
                    if spec.disposition.forwards_to_launchee() =>
                {
                    out.push(token.clone());
                    if let ParamValue::Following(v) = value {
                        out.push(v.clone());
                    }
                }
                ClassifiedArg::Unrecognized(token)
                    if policy == UnrecognizedPolicy::ToLaunchee =>
                {
                    out.push(token.clone());
                }
                ClassifiedArg::TerminatingTail(token) => out.push(token.clone()),
                _ => {}
            }
        }
        out
    }

    /// Arguments destined for the JVM option vector, in original order.
    pub fn jvm_args(&self, policy: UnrecognizedPolicy) -> Vec<String> {
        let mut out = Vec::new();
        for arg in &self.args {
            match arg {
                ClassifiedArg::Matched { token, value, spec }
                    if spec.disposition == Disposition::ToJvm =>
                {
                    out.push(token.clone());
                    if let ParamValue::Following(v) = value {
                        out.push(v.clone());
                    }
                }
                ClassifiedArg::Unrecognized(token)
                    if policy == UnrecognizedPolicy::ToJvm =>
                {
                    out.push(token.clone());
                }
                _ => {}
            }
        }
        out
    }

    /// First token of the terminating tail, if any. For script launchers
    /// this is the script path.
    pub fn first_tail_token(&self) -> Option<&str> {
        self.args.iter().find_map(|arg| match arg {
            ClassifiedArg::TerminatingTail(token) => Some(token.as_str()),
            _ => None,
        })
    }
}
