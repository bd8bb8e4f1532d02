use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Settings for one assembly run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsmConfig {
    /// Words of instruction memory in the simulator; the initializer block
    /// zero-fills this many entries.
    pub memory_words: usize,
    /// Name of the memory array in the initializer block.
    pub memory_name: String,
}

impl Default for AsmConfig {
    fn default() -> Self {
        Self {
            memory_words: 256,
            memory_name: "memory".to_string(),
        }
    }
}

impl AsmConfig {
    /// Loads a JSON config; missing keys fall back to the defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: AsmConfig = serde_json::from_str(r#"{ "memory_words": 64 }"#).unwrap();
        assert_eq!(cfg.memory_words, 64);
        assert_eq!(cfg.memory_name, "memory");
    }

    #[test]
    fn loads_from_file() {
        let cwd = std::env::current_dir().unwrap();
        let path = cwd.join("_test_asm_config.json");
        std::fs::write(&path, r#"{ "memory_name": "rom" }"#).unwrap();
        let cfg = AsmConfig::from_json_file(&path).unwrap();
        assert_eq!(cfg.memory_words, 256);
        assert_eq!(cfg.memory_name, "rom");
        let _ = std::fs::remove_file(&path);
    }
}
