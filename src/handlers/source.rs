//! Source file handlers
//!
//! Source files are only searched for AWS client construction. The Python
//! and JavaScript handlers share one implementation and differ only in the
//! rule table and file suffixes they carry.

use super::{FileHandler, FileMatcher, HandlerKind};
use crate::discovery::DiscoveryMap;
use crate::error::ScanError;
use crate::rules::{all_matches, KeywordRule, JAVASCRIPT_SOURCE_RULES, PYTHON_SOURCE_RULES};
use std::path::Path;

const PYTHON_MATCHERS: &[FileMatcher] = &[FileMatcher::Suffix(".py")];

const JAVASCRIPT_MATCHERS: &[FileMatcher] = &[
    FileMatcher::Suffix(".js"),
    FileMatcher::Suffix(".mjs"),
    FileMatcher::Suffix(".cjs"),
    FileMatcher::Suffix(".ts"),
];

pub struct SourceHandler {
    kind: HandlerKind,
    matchers: &'static [FileMatcher],
    rules: &'static [KeywordRule],
}

impl SourceHandler {
    pub const fn new(
        kind: HandlerKind,
        matchers: &'static [FileMatcher],
        rules: &'static [KeywordRule],
    ) -> Self {
        Self {
            kind,
            matchers,
            rules,
        }
    }

    /// `boto3.client('<service>')` calls in `.py` files
    pub const fn python() -> Self {
        Self::new(HandlerKind::PythonSource, PYTHON_MATCHERS, PYTHON_SOURCE_RULES)
    }

    /// AWS SDK imports and constructors in JavaScript/TypeScript files
    pub const fn javascript() -> Self {
        Self::new(
            HandlerKind::JavaScriptSource,
            JAVASCRIPT_MATCHERS,
            JAVASCRIPT_SOURCE_RULES,
        )
    }
}

impl FileHandler for SourceHandler {
    fn kind(&self) -> HandlerKind {
        self.kind
    }

    fn matchers(&self) -> &[FileMatcher] {
        self.matchers
    }

    fn parse(&self, _path: &Path, content: &str) -> Result<DiscoveryMap, ScanError> {
        let mut map = DiscoveryMap::new();
        for rule in all_matches(self.rules, content) {
            map.set_label(rule.category, rule.value);
        }
        Ok(map)
    }
}
