//! Dialect presets
//!
//! Each front-end language drives the scope core with slightly different
//! lexical rules. A dialect picks the defaults; `ScopePolicy` overrides them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source language of the driving front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Yaklang: block scoped, auto-break switch
    Yak,
    /// Go: block scoped, auto-break switch with explicit `fallthrough`
    Go,
    Java,
    /// JavaScript: function scoped `var`, C-style switch
    JavaScript,
    TypeScript,
    /// Python: function scoped, no fallthrough
    Python,
    Php,
    C,
}

impl Dialect {
    pub const ALL: [Dialect; 8] = [
        Dialect::Yak,
        Dialect::Go,
        Dialect::Java,
        Dialect::JavaScript,
        Dialect::TypeScript,
        Dialect::Python,
        Dialect::Php,
        Dialect::C,
    ];

    /// Parse dialect from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "yak" | "yaklang" => Ok(Self::Yak),
            "go" | "golang" => Ok(Self::Go),
            "java" => Ok(Self::Java),
            "javascript" | "js" => Ok(Self::JavaScript),
            "typescript" | "ts" => Ok(Self::TypeScript),
            "python" | "py" => Ok(Self::Python),
            "php" => Ok(Self::Php),
            "c" => Ok(Self::C),
            _ => Err(format!(
                "Unknown preset '{}'. Valid presets: yak, go, java, javascript, typescript, python, php, c",
                s
            )),
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yak => "yak",
            Self::Go => "go",
            Self::Java => "java",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Python => "python",
            Self::Php => "php",
            Self::C => "c",
        }
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Yak => &["yak"],
            Self::Go => &["go"],
            Self::Java => &["java"],
            Self::JavaScript => &["js", "jsx", "mjs"],
            Self::TypeScript => &["ts", "tsx"],
            Self::Python => &["py", "pyi"],
            Self::Php => &["php"],
            Self::C => &["c", "h"],
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|dialect| dialect.extensions().contains(&ext.as_str()))
    }

    pub fn from_file_path(path: &str) -> Option<Self> {
        path.rsplit('.').next().and_then(Self::from_extension)
    }

    /// Writes to undeclared names create bindings that escape their block
    pub fn force_capture(&self) -> bool {
        matches!(
            self,
            Self::Python | Self::JavaScript | Self::TypeScript | Self::Php
        )
    }

    /// Switch cases end with an implicit break
    pub fn switch_auto_break(&self) -> bool {
        matches!(self, Self::Go | Self::Yak | Self::Python)
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::Yak
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
