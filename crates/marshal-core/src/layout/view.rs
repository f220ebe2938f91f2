use alloc::{string::String, vec::Vec};
use core::ops::{Deref, DerefMut};

use super::{FieldDef, FieldKind, Layout};
use crate::buffer::{ByteBuffer, Scalar, TextEncoding};
use crate::error::{MarshalError, Result};

/// `StructView` 把缓冲中的一段区域解释为具名记录，不复制任何字节。
///
/// # 设计背景（Why）
/// - 记录布局是显式偏移、无填充的小端字节排列，必须与既有数据逐位兼容；
///   视图只负责“字段常量 -> 偏移 -> 类型化读写”的映射，存储始终属于缓冲本身。
/// - 通过泛型 `B` 同时支持只读借用（`&ByteBuffer`）与可写借用（`&mut ByteBuffer`、池化缓冲），
///   写操作只在 `B: DerefMut` 时可用，借用检查器保证视图不会比缓冲活得更久。
///
/// # 逻辑解析（How）
/// - 构造时校验 `base + layout.size <= capacity`，之后每次访问仍经由 [`ByteBuffer`] 的边界检查；
/// - 访问前确认字段属于本布局、声明类型与请求类型一致；
/// - 数组字段以序号访问，序号从 1 开始，取值 `1..=count`；
/// - 嵌套记录通过 [`StructView::nested`] 以“外层基址 + 字段偏移”派生子视图。
///
/// # 契约说明（What）
/// - 任何返回错误的写操作都不修改缓冲内容；
/// - 派生属性（面积、均值等）由具体记录视图在每次调用时重新计算，不做缓存。
pub struct StructView<B> {
    buffer: B,
    base: usize,
    layout: &'static Layout,
}

impl<B> StructView<B>
where
    B: Deref<Target = ByteBuffer>,
{
    /// 在缓冲起始处应用布局。
    pub fn new(buffer: B, layout: &'static Layout) -> Result<Self> {
        Self::at(buffer, 0, layout)
    }

    /// 在 `base` 偏移处应用布局。
    pub fn at(buffer: B, base: usize, layout: &'static Layout) -> Result<Self> {
        buffer.span(base, layout.size)?;
        Ok(Self {
            buffer,
            base,
            layout,
        })
    }

    /// 当前视图使用的布局。
    pub fn layout(&self) -> &'static Layout {
        self.layout
    }

    /// 记录在缓冲中的起始偏移。
    pub fn base(&self) -> usize {
        self.base
    }

    /// 底层缓冲的只读引用。
    pub fn buffer(&self) -> &ByteBuffer {
        &self.buffer
    }

    /// 归还底层缓冲句柄。
    pub fn into_inner(self) -> B {
        self.buffer
    }

    /// 读取单值字段；数组字段返回 [`MarshalError::ArrayNeedsOrdinal`]，请改用 [`StructView::get_at`]。
    pub fn get<T: Scalar>(&self, field: &FieldDef) -> Result<T> {
        let offset = self.single_offset(field, T::KIND)?;
        self.buffer.read::<T>(offset)
    }

    /// 读取数组字段的第 `ordinal` 个元素（`1..=count`）。
    pub fn get_at<T: Scalar>(&self, field: &FieldDef, ordinal: usize) -> Result<T> {
        let offset = self.element_offset(field, T::KIND, ordinal)?;
        self.buffer.read::<T>(offset)
    }

    /// 按顺序读取数组字段的全部元素。
    pub fn values<T: Scalar>(&self, field: &FieldDef) -> Result<Vec<T>> {
        (1..=field.count)
            .map(|ordinal| self.get_at::<T>(field, ordinal))
            .collect()
    }

    /// 读取定宽文本字段。
    pub fn text(&self, field: &FieldDef) -> Result<String> {
        let encoding = match field.kind {
            FieldKind::Text(encoding) => encoding,
            _ => return Err(self.mismatch(field, FieldKind::Text(TextEncoding::Utf8))),
        };
        self.ensure_member(field)?;
        self.buffer
            .read_text(self.base + field.offset, field.count, encoding)
    }

    /// 读取单字节字符字段。
    pub fn char(&self, field: &FieldDef) -> Result<char> {
        let offset = self.element_offset(field, FieldKind::Char, 1)?;
        Ok(char::from(self.buffer.read::<u8>(offset)?))
    }

    /// 借出定宽字节字段。
    pub fn bytes(&self, field: &FieldDef) -> Result<&[u8]> {
        self.ensure_kind(field, FieldKind::Bytes)?;
        self.buffer.read_bytes(self.base + field.offset, field.count)
    }

    /// 派生嵌套记录的只读视图。
    pub fn nested(&self, field: &FieldDef) -> Result<StructView<&ByteBuffer>> {
        let layout = self.nested_layout(field)?;
        StructView::at(&*self.buffer, self.base + field.offset, layout)
    }

    fn nested_layout(&self, field: &FieldDef) -> Result<&'static Layout> {
        self.ensure_member(field)?;
        match field.kind {
            FieldKind::Record(layout) => Ok(layout),
            _ => Err(self.mismatch(field, FieldKind::Record(&ANY_RECORD))),
        }
    }

    fn element_offset(
        &self,
        field: &FieldDef,
        requested: FieldKind,
        ordinal: usize,
    ) -> Result<usize> {
        self.ensure_kind(field, requested)?;
        if ordinal == 0 || ordinal > field.count {
            return Err(MarshalError::IndexOutOfRange {
                field: field.name,
                ordinal,
                count: field.count,
            });
        }
        Ok(self.base + field.offset + (ordinal - 1) * requested.element_width())
    }

    fn single_offset(&self, field: &FieldDef, requested: FieldKind) -> Result<usize> {
        self.ensure_kind(field, requested)?;
        if field.count > 1 {
            return Err(MarshalError::ArrayNeedsOrdinal {
                field: field.name,
                count: field.count,
            });
        }
        Ok(self.base + field.offset)
    }

    fn ensure_kind(&self, field: &FieldDef, requested: FieldKind) -> Result<()> {
        self.ensure_member(field)?;
        if field.kind != requested {
            return Err(self.mismatch(field, requested));
        }
        Ok(())
    }

    fn ensure_member(&self, field: &FieldDef) -> Result<()> {
        if self.layout.contains(field) {
            Ok(())
        } else {
            Err(MarshalError::UnknownField {
                field: field.name,
                layout: self.layout.name,
            })
        }
    }

    fn mismatch(&self, field: &FieldDef, requested: FieldKind) -> MarshalError {
        MarshalError::FieldTypeMismatch {
            field: field.name,
            declared: field.kind,
            requested,
        }
    }
}

impl<B> StructView<B>
where
    B: DerefMut<Target = ByteBuffer>,
{
    /// 写入单值字段；数组字段返回 [`MarshalError::ArrayNeedsOrdinal`]。
    pub fn set<T: Scalar>(&mut self, field: &FieldDef, value: T) -> Result<()> {
        let offset = self.single_offset(field, T::KIND)?;
        self.buffer.write::<T>(offset, value)
    }

    /// 写入数组字段的第 `ordinal` 个元素（`1..=count`）。
    pub fn set_at<T: Scalar>(&mut self, field: &FieldDef, ordinal: usize, value: T) -> Result<()> {
        let offset = self.element_offset(field, T::KIND, ordinal)?;
        self.buffer.write::<T>(offset, value)
    }

    /// 写入定宽文本字段；编码后超出宽度返回 [`MarshalError::FieldTooLong`]。
    pub fn set_text(&mut self, field: &FieldDef, text: &str) -> Result<()> {
        let encoding = match field.kind {
            FieldKind::Text(encoding) => encoding,
            _ => return Err(self.mismatch(field, FieldKind::Text(TextEncoding::Utf8))),
        };
        self.ensure_member(field)?;
        let offset = self.base + field.offset;
        self.buffer
            .write_text_field(field.name, offset, field.count, encoding, text)
    }

    /// 写入单字节 ASCII 字符字段。
    pub fn set_char(&mut self, field: &FieldDef, ch: char) -> Result<()> {
        let offset = self.element_offset(field, FieldKind::Char, 1)?;
        if !ch.is_ascii() {
            return Err(MarshalError::NotAscii { ch });
        }
        self.buffer.write::<u8>(offset, ch as u8)
    }

    /// 写入定宽字节字段；不足宽度的部分清零，超出宽度返回错误。
    pub fn set_bytes(&mut self, field: &FieldDef, bytes: &[u8]) -> Result<()> {
        self.ensure_kind(field, FieldKind::Bytes)?;
        if bytes.len() > field.count {
            return Err(MarshalError::FieldTooLong {
                field: field.name,
                len: bytes.len(),
                width: field.count,
            });
        }
        let offset = self.base + field.offset;
        self.buffer.write_bytes(offset, bytes)?;
        self.buffer
            .zero(offset + bytes.len(), field.count - bytes.len())
    }

    /// 派生嵌套记录的可写视图。
    pub fn nested_mut(&mut self, field: &FieldDef) -> Result<StructView<&mut ByteBuffer>> {
        let layout = self.nested_layout(field)?;
        let base = self.base + field.offset;
        StructView::at(&mut *self.buffer, base, layout)
    }
}

/// 请求“任意嵌套记录”时用于错误报告的占位布局。
const ANY_RECORD: Layout = Layout {
    name: "<record>",
    size: 0,
    fields: &[],
};
