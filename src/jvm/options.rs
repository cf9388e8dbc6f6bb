//! Ordered accumulator for JVM option strings.

/// JVM options in the exact order they will be handed to the runtime.
/// Appends only; never reorders or deduplicates, so later options win
/// wherever the JVM applies last-one-wins semantics.
#[derive(Debug, Default, Clone)]
pub struct VmOptions {
    options: Vec<String>,
}

impl VmOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, option: impl Into<String>) {
        self.options.push(option.into());
    }

    /// Append options from a whitespace-separated environment value, the
    /// `JAVA_OPTS` convention. Empty segments are skipped.
    pub fn push_env_options(&mut self, raw: &str) {
        for opt in raw.split_whitespace() {
            self.options.push(opt.to_string());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
