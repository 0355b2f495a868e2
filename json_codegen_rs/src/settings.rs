//! Settings for class generation.

use std::fmt;
use std::str::FromStr;

use crate::error::CodegenError;

/// Output language. The set is closed; see [`Language::from_str`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    /// Python 2 classes with `__future__` imports.
    #[default]
    Python2,
    /// ES module with `export class` declarations.
    JavaScript,
    /// JavaScript annotated with Flow types.
    Flow,
}

impl Language {
    /// Every supported language, in the order they are listed to users.
    pub const ALL: [Self; 3] = [Self::Python2, Self::JavaScript, Self::Flow];

    /// The name accepted on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Python2 => "python2",
            Self::JavaScript => "javascript",
            Self::Flow => "flow",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|language| language.name() == s)
            .ok_or_else(|| CodegenError::UnknownLanguage(s.to_string()))
    }
}

/// Settings that control code generation behavior.
#[derive(Debug, Clone, Default)]
pub struct GenerateSettings {
    /// Renderer to use. **Default: python2.**
    pub language: Language,

    /// Prepended to every generated class name, including the names used in
    /// constructor calls. Resolution never sees it.
    pub prefix: Option<String>,
}

impl GenerateSettings {
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self {
            language,
            prefix: None,
        }
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub(crate) fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or("")
    }
}
