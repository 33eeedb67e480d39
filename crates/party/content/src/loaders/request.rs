//! Recommendation payload loader.

use std::io::Read;
use std::path::Path;

use party_core::RawRequest;

use crate::loaders::{LoadResult, read_file};

/// Loader for JSON recommendation payloads.
pub struct RequestLoader;

impl RequestLoader {
    pub fn load(path: &Path) -> LoadResult<RawRequest> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Reads a payload from a stream such as stdin.
    pub fn from_reader(mut reader: impl Read) -> LoadResult<RawRequest> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|e| anyhow::anyhow!("Failed to read request: {}", e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<RawRequest> {
        serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse request JSON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_payload() {
        let raw = RequestLoader::parse(
            r#"{
                "mode": "boss",
                "owned": ["Nina", "Athena"],
                "required": ["nina"],
                "focus": [],
                "banned": null,
                "enemy_element": "Ice",
                "boss_weakness": "Fire"
            }"#,
        )
        .expect("valid payload");

        assert_eq!(raw.mode.as_deref(), Some("boss"));
        assert_eq!(raw.owned.as_deref().map(<[String]>::len), Some(2));
        assert_eq!(raw.banned, None);
        assert_eq!(raw.boss_weakness.as_deref(), Some("Fire"));
    }

    #[test]
    fn test_from_reader_accepts_empty_object() {
        let raw = RequestLoader::from_reader("{}".as_bytes()).expect("empty payload");
        assert_eq!(raw, RawRequest::default());
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        assert!(RequestLoader::parse(r#"{"owned": "nina"}"#).is_err());
    }
}
