use serde::Deserialize;

use crate::error::{ConfigError, DecodeError, EncodeError};

/// 编解码配置。
///
/// ```toml
/// max_payload_len = 65536
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// 单帧负载上限（字节），默认 `u32::MAX`，不得超过长度字段的表示范围。
    pub max_payload_len: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_payload_len: u32::MAX as usize,
        }
    }
}

impl CodecConfig {
    /// 从 TOML 文本解析配置并校验取值。
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: CodecConfig =
            toml::from_str(raw).map_err(|err| ConfigError(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 上限不得超过 32 位长度字段可表示的范围。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_payload_len > u32::MAX as usize {
            return Err(ConfigError(format!(
                "max_payload_len {} exceeds the 32-bit length field",
                self.max_payload_len
            )));
        }
        Ok(())
    }

    /// 编码侧：检查负载长度并换算为长度字段值。
    pub(crate) fn length_field(&self, len: usize) -> Result<u32, EncodeError> {
        let limit = self.max_payload_len.min(u32::MAX as usize);
        if len > limit {
            return Err(EncodeError::PayloadTooLarge { len, limit });
        }
        u32::try_from(len).map_err(|_| EncodeError::PayloadTooLarge { len, limit })
    }

    /// 解码侧：声明长度不得超过上限。
    pub(crate) fn check_declared(&self, len: usize) -> Result<(), DecodeError> {
        if len > self.max_payload_len {
            return Err(DecodeError::PayloadTooLarge {
                len,
                limit: self.max_payload_len,
            });
        }
        Ok(())
    }
}
