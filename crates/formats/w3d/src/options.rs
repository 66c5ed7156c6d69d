use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default ceiling on container nesting. Real files stay well under ten levels.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// What the builder does with a leaf chunk whose tag has no registry entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownChunkPolicy {
    /// Keep the body as [`Payload::Raw`](crate::tree::Payload::Raw) so it is
    /// written back byte for byte.
    #[default]
    Preserve,
    /// Drop the body and keep an empty node. Re-serializing writes the chunk
    /// with a zero length, so the original bytes are lost.
    Discard,
}

impl std::str::FromStr for UnknownChunkPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "preserve" => Ok(Self::Preserve),
            "discard" => Ok(Self::Discard),
            other => Err(format!("unknown chunk policy {other:?} (expected preserve or discard)")),
        }
    }
}

/// Read-path configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReadOptions {
    pub unknown_chunks: UnknownChunkPolicy,
    /// Deepest container nesting accepted before the input is rejected.
    pub max_depth: usize,
    /// Treat size mismatches as errors instead of warnings.
    pub strict_sizes: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            unknown_chunks: UnknownChunkPolicy::Preserve,
            max_depth: DEFAULT_MAX_DEPTH,
            strict_sizes: false,
        }
    }
}

impl ReadOptions {
    /// Load options from a JSON file. Missing keys take their defaults.
    pub fn from_json(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preserves_unknown_chunks() {
        let options = ReadOptions::default();
        assert_eq!(options.unknown_chunks, UnknownChunkPolicy::Preserve);
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
        assert!(!options.strict_sizes);
    }

    #[test]
    fn json_fills_missing_keys_with_defaults() {
        let options = ReadOptions::from_json_str(r#"{ "unknown_chunks": "discard" }"#).unwrap();
        assert_eq!(options.unknown_chunks, UnknownChunkPolicy::Discard);
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn json_rejects_unknown_keys() {
        assert!(ReadOptions::from_json_str(r#"{ "max_dept": 4 }"#).is_err());
    }

    #[test]
    fn policy_parses_from_cli_strings() {
        assert_eq!("discard".parse::<UnknownChunkPolicy>(), Ok(UnknownChunkPolicy::Discard));
        assert_eq!("preserve".parse::<UnknownChunkPolicy>(), Ok(UnknownChunkPolicy::Preserve));
        assert!("keep".parse::<UnknownChunkPolicy>().is_err());
    }
}
