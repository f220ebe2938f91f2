use crate::buffer::{Scalar, TextEncoding};
use crate::error::{MarshalError, Result};

/// 字段的存储类型。
///
/// 数值类型与 [`Scalar`] 一一对应；`Char` 为单字节 ASCII 字符；`Text`/`Bytes` 为定宽数组，
/// 其 `count` 即字节宽度；`Record` 表示在字段偏移处嵌套一张子布局。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Char,
    Text(TextEncoding),
    Bytes,
    Record(&'static Layout),
}

impl FieldKind {
    /// 单个元素的字节宽度。
    pub const fn element_width(&self) -> usize {
        match self {
            FieldKind::I8 | FieldKind::U8 | FieldKind::Char => 1,
            FieldKind::Text(_) | FieldKind::Bytes => 1,
            FieldKind::I16 | FieldKind::U16 => 2,
            FieldKind::I32 | FieldKind::U32 | FieldKind::F32 => 4,
            FieldKind::I64 | FieldKind::U64 | FieldKind::F64 => 8,
            FieldKind::Record(layout) => layout.size,
        }
    }
}

/// 布局表中的一行：`(name, offset, kind, count)`。
///
/// # 契约说明（What）
/// - `offset` 相对于记录起点，调用方显式给出，不插入任何对齐填充；
/// - `count > 1` 表示同构定长数组，元素紧密排列；
/// - 文本与字节数组的 `count` 为字节宽度。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub offset: usize,
    pub kind: FieldKind,
    pub count: usize,
}

impl FieldDef {
    /// 单值数值字段。
    pub const fn scalar<T: Scalar>(name: &'static str, offset: usize) -> Self {
        Self::array::<T>(name, offset, 1)
    }

    /// 数值数组字段。
    pub const fn array<T: Scalar>(name: &'static str, offset: usize, count: usize) -> Self {
        Self {
            name,
            offset,
            kind: T::KIND,
            count,
        }
    }

    /// 单字节 ASCII 字符字段。
    pub const fn char(name: &'static str, offset: usize) -> Self {
        Self {
            name,
            offset,
            kind: FieldKind::Char,
            count: 1,
        }
    }

    /// 定宽文本字段，`width` 为字节宽度。
    pub const fn text(
        name: &'static str,
        offset: usize,
        width: usize,
        encoding: TextEncoding,
    ) -> Self {
        Self {
            name,
            offset,
            kind: FieldKind::Text(encoding),
            count: width,
        }
    }

    /// 定宽原始字节字段。
    pub const fn bytes(name: &'static str, offset: usize, width: usize) -> Self {
        Self {
            name,
            offset,
            kind: FieldKind::Bytes,
            count: width,
        }
    }

    /// 嵌套记录字段，占用子布局的完整尺寸。
    pub const fn record(name: &'static str, offset: usize, layout: &'static Layout) -> Self {
        Self {
            name,
            offset,
            kind: FieldKind::Record(layout),
            count: 1,
        }
    }

    /// 字段占用的总字节数。
    pub const fn span(&self) -> usize {
        self.kind.element_width() * self.count
    }

    /// 字段结束位置（开区间）。
    pub const fn end(&self) -> usize {
        self.offset + self.span()
    }
}

/// 记录布局：名称、总尺寸与字段表。
///
/// 布局以 `const` 形式定义，访问器通过字段常量而非运行时名称查找定位数据；
/// [`Layout::field`] 仅供展示层按名称枚举字段。
#[derive(Debug, PartialEq, Eq)]
pub struct Layout {
    pub name: &'static str,
    pub size: usize,
    pub fields: &'static [FieldDef],
}

impl Layout {
    /// 按名称查找字段。
    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// 判断字段是否属于本布局。
    pub fn contains(&self, field: &FieldDef) -> bool {
        self.fields.contains(field)
    }

    /// 校验布局表：字段全部落在 `size` 之内且互不重叠，嵌套布局递归校验。
    pub fn validate(&self) -> Result<()> {
        for (idx, field) in self.fields.iter().enumerate() {
            if field.count == 0 || field.end() > self.size {
                return Err(MarshalError::FieldOutOfLayout {
                    layout: self.name,
                    field: field.name,
                    offset: field.offset,
                    end: field.end(),
                    size: self.size,
                });
            }
            for other in &self.fields[idx + 1..] {
                if field.offset < other.end() && other.offset < field.end() {
                    return Err(MarshalError::FieldOverlap {
                        layout: self.name,
                        field: field.name,
                        other: other.name,
                    });
                }
            }
            if let FieldKind::Record(nested) = field.kind {
                nested.validate()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INNER: Layout = Layout {
        name: "Inner",
        size: 4,
        fields: &[FieldDef::scalar::<u16>("a", 0), FieldDef::scalar::<u16>("b", 2)],
    };

    #[test]
    fn nested_record_spans_its_layout() {
        let field = FieldDef::record("inner", 4, &INNER);
        assert_eq!(field.span(), 4);
        assert_eq!(field.end(), 8);
    }

    #[test]
    fn overlapping_fields_are_reported() {
        const BROKEN: Layout = Layout {
            name: "Broken",
            size: 8,
            fields: &[FieldDef::scalar::<u32>("a", 0), FieldDef::scalar::<u16>("b", 2)],
        };
        assert!(matches!(
            BROKEN.validate(),
            Err(MarshalError::FieldOverlap { field: "a", other: "b", .. })
        ));
    }

    #[test]
    fn field_beyond_size_is_reported() {
        const SHORT: Layout = Layout {
            name: "Short",
            size: 3,
            fields: &[FieldDef::scalar::<u32>("a", 0)],
        };
        assert!(matches!(
            SHORT.validate(),
            Err(MarshalError::FieldOutOfLayout { field: "a", end: 4, size: 3, .. })
        ));
        assert!(INNER.validate().is_ok());
    }

    #[test]
    fn empty_field_is_out_of_layout() {
        const EMPTY: Layout = Layout {
            name: "Empty",
            size: 8,
            fields: &[FieldDef::bytes("pad", 0, 0)],
        };
        let err = EMPTY.validate().unwrap_err();
        assert_eq!(err.code(), "layout.field_out_of_layout");
        assert!(err.to_string().contains("`pad`"));
    }
}
