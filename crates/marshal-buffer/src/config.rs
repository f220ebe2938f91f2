use serde::Deserialize;

use crate::error::{PoolError, Result};

/// 缓冲池配置。
///
/// ```toml
/// block_size = 4096
/// initial_blocks = 8
/// ```
///
/// 缺省字段取默认值：`block_size = 1024`，`initial_blocks = 0`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolConfig {
    pub block_size: usize,
    pub initial_blocks: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            block_size: 1024,
            initial_blocks: 0,
        }
    }
}

impl PoolConfig {
    /// 从 TOML 文本解析配置并校验取值。
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: PoolConfig =
            toml::from_str(raw).map_err(|err| PoolError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// `block_size` 必须大于 0。
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(PoolError::Config("block_size must be non-zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = PoolConfig::from_toml_str("initial_blocks = 4").expect("解析失败");
        assert_eq!(config.block_size, 1024);
        assert_eq!(config.initial_blocks, 4);
        assert_eq!(PoolConfig::from_toml_str("").unwrap(), PoolConfig::default());
    }

    #[test]
    fn invalid_documents_are_config_errors() {
        for raw in ["block_size = 0", "block_size = \"big\"", "blocks = 3"] {
            let err = PoolConfig::from_toml_str(raw).unwrap_err();
            assert!(matches!(err, PoolError::Config(_)), "{raw} 应当被拒绝");
            assert_eq!(err.code(), crate::codes::POOL_CONFIG);
        }
    }
}
