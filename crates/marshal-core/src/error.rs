//! # error 模块说明
//!
//! ## 角色定位（Why）
//! - 集中定义缓冲与布局层的失败语义，所有越界、字段溢出、类型错配都在此归档；
//! - 上层 crate（缓冲池、帧编解码）通过 `#[from]` 包装本模块错误，保证 `?` 一路传播。
//!
//! ## 设计要求（What）
//! - 这些错误均属于“编程错误”：调用方应在调用前完成参数校验，而不是依赖恢复；
//! - 每个变体都有稳定错误码（见 [`codes`]），便于日志检索与断言。

use thiserror::Error;

use crate::buffer::TextEncoding;
use crate::layout::FieldKind;

/// 本 crate 统一使用的 `Result` 别名。
pub type Result<T, E = MarshalError> = core::result::Result<T, E>;

/// 缓冲与布局层的错误域。
///
/// # 教案式说明
/// - **意图 (Why)**：区分“分配失败”“访问越界”“字段契约违背”三类问题，调用方据此判断是资源不足还是调用参数有误。
/// - **契约 (What)**：
///   - 所有变体均为 `Send + Sync + 'static`，可跨线程传播；
///   - 任何返回错误的写操作都不会修改缓冲内容；
///   - [`MarshalError::code`] 返回的码值在版本间保持稳定。
/// - **设计权衡 (Trade-offs)**：字段名使用 `&'static str`，来自常量布局表，避免在错误路径上分配。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarshalError {
    /// 无法分配指定容量（容量为 0 或分配器拒绝）。
    #[error("cannot allocate a {capacity}-byte buffer: {reason}")]
    Allocation {
        capacity: usize,
        reason: &'static str,
    },

    /// `offset + width` 超出缓冲容量，或偏移计算溢出。
    #[error("access of {width} bytes at offset {offset} exceeds capacity {capacity}")]
    OutOfBounds {
        offset: usize,
        width: usize,
        capacity: usize,
    },

    /// 数组字段的序号不在 `1..=count` 内。
    #[error("ordinal {ordinal} is outside 1..={count} for field `{field}`")]
    IndexOutOfRange {
        field: &'static str,
        ordinal: usize,
        count: usize,
    },

    /// 数组字段只能按序号访问，不能当作单值读写。
    #[error("field `{field}` is an array of {count} elements; access it by ordinal")]
    ArrayNeedsOrdinal { field: &'static str, count: usize },

    /// 写入的文本/字节长度超过字段声明宽度。
    #[error("{len} bytes do not fit into field `{field}` of width {width}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        width: usize,
    },

    /// 访问方式与字段声明类型不一致。
    #[error("field `{field}` is declared as {declared:?}, accessed as {requested:?}")]
    FieldTypeMismatch {
        field: &'static str,
        declared: FieldKind,
        requested: FieldKind,
    },

    /// 字段不属于当前视图的布局表。
    #[error("field `{field}` is not part of layout `{layout}`")]
    UnknownField {
        field: &'static str,
        layout: &'static str,
    },

    /// 布局表内两个字段的字节区间相交。
    #[error("layout `{layout}`: field `{field}` overlaps `{other}`")]
    FieldOverlap {
        layout: &'static str,
        field: &'static str,
        other: &'static str,
    },

    /// 字段为空（`count == 0`）或结束位置越出布局尺寸。
    #[error("layout `{layout}`: field `{field}` spans {offset}..{end}, which is empty or outside the {size}-byte record")]
    FieldOutOfLayout {
        layout: &'static str,
        field: &'static str,
        offset: usize,
        end: usize,
        size: usize,
    },

    /// 字节序列无法按声明编码解码为文本。
    #[error("bytes at offset {offset} are not valid {encoding:?} text")]
    InvalidText {
        offset: usize,
        encoding: TextEncoding,
    },

    /// 运行时整数宽度只能是 1、2、4、8 字节。
    #[error("unsupported integer width {width}; expected 1, 2, 4 or 8")]
    UnsupportedWidth { width: usize },

    /// 文本内含 U+0000；读取时会在该处终止，写入方拒绝以免静默截断。
    #[error("text for field `{field}` contains NUL at char index {position}")]
    InteriorNul {
        field: &'static str,
        position: usize,
    },

    /// 单字节字符字段只接受 ASCII。
    #[error("character {ch:?} is not representable as a single ASCII byte")]
    NotAscii { ch: char },
}

impl MarshalError {
    /// 返回稳定错误码，遵循 `<领域>.<语义>` 命名。
    pub fn code(&self) -> &'static str {
        match self {
            MarshalError::Allocation { .. } => codes::BUFFER_ALLOCATION,
            MarshalError::OutOfBounds { .. } => codes::BUFFER_OUT_OF_BOUNDS,
            MarshalError::IndexOutOfRange { .. } => codes::LAYOUT_INDEX_OUT_OF_RANGE,
            MarshalError::ArrayNeedsOrdinal { .. } => codes::LAYOUT_ARRAY_NEEDS_ORDINAL,
            MarshalError::FieldTooLong { .. } => codes::LAYOUT_FIELD_TOO_LONG,
            MarshalError::FieldTypeMismatch { .. } => codes::LAYOUT_TYPE_MISMATCH,
            MarshalError::UnknownField { .. } => codes::LAYOUT_UNKNOWN_FIELD,
            MarshalError::FieldOverlap { .. } => codes::LAYOUT_FIELD_OVERLAP,
            MarshalError::FieldOutOfLayout { .. } => codes::LAYOUT_FIELD_OUT_OF_LAYOUT,
            MarshalError::UnsupportedWidth { .. } => codes::BUFFER_UNSUPPORTED_WIDTH,
            MarshalError::InvalidText { .. } => codes::TEXT_INVALID,
            MarshalError::InteriorNul { .. } => codes::TEXT_INTERIOR_NUL,
            MarshalError::NotAscii { .. } => codes::TEXT_NOT_ASCII,
        }
    }

    pub(crate) fn out_of_bounds(offset: usize, width: usize, capacity: usize) -> Self {
        MarshalError::OutOfBounds {
            offset,
            width,
            capacity,
        }
    }
}

/// 稳定错误码集合。
///
/// 错误码遵循 `<领域>.<语义>` 约定，方便在跨组件日志中检索与聚合；
/// 新增码值时只追加，不修改既有字符串。
pub mod codes {
    /// 缓冲分配失败。
    pub const BUFFER_ALLOCATION: &str = "buffer.allocation";
    /// 缓冲访问越界。
    pub const BUFFER_OUT_OF_BOUNDS: &str = "buffer.out_of_bounds";
    /// 运行时整数宽度非法。
    pub const BUFFER_UNSUPPORTED_WIDTH: &str = "buffer.unsupported_width";
    /// 数组字段序号越界。
    pub const LAYOUT_INDEX_OUT_OF_RANGE: &str = "layout.index_out_of_range";
    /// 数组字段被当作单值访问。
    pub const LAYOUT_ARRAY_NEEDS_ORDINAL: &str = "layout.array_needs_ordinal";
    /// 字段写入超长。
    pub const LAYOUT_FIELD_TOO_LONG: &str = "layout.field_too_long";
    /// 字段类型错配。
    pub const LAYOUT_TYPE_MISMATCH: &str = "layout.type_mismatch";
    /// 字段不属于布局。
    pub const LAYOUT_UNKNOWN_FIELD: &str = "layout.unknown_field";
    /// 布局字段重叠。
    pub const LAYOUT_FIELD_OVERLAP: &str = "layout.field_overlap";
    /// 布局字段为空或越出记录尺寸。
    pub const LAYOUT_FIELD_OUT_OF_LAYOUT: &str = "layout.field_out_of_layout";
    /// 文本解码失败。
    pub const TEXT_INVALID: &str = "text.invalid";
    /// 文本内含 NUL。
    pub const TEXT_INTERIOR_NUL: &str = "text.interior_nul";
    /// 字符不是 ASCII。
    pub const TEXT_NOT_ASCII: &str = "text.not_ascii";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_domain_dot_reason() {
        let samples = [
            MarshalError::Allocation {
                capacity: 0,
                reason: "zero capacity",
            },
            MarshalError::out_of_bounds(4, 4, 6),
            MarshalError::NotAscii { ch: 'é' },
            MarshalError::InteriorNul {
                field: "name",
                position: 2,
            },
            MarshalError::FieldOutOfLayout {
                layout: "Point",
                field: "y",
                offset: 4,
                end: 12,
                size: 8,
            },
        ];
        for err in samples {
            let code = err.code();
            assert_eq!(code.split('.').count(), 2, "错误码必须为 <领域>.<语义>：{code}");
        }
    }

    #[test]
    fn out_of_bounds_message_carries_context() {
        let err = MarshalError::out_of_bounds(14, 4, 16);
        assert_eq!(
            err.to_string(),
            "access of 4 bytes at offset 14 exceeds capacity 16"
        );
    }
}
