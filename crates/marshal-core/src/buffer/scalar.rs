use core::fmt;

use crate::layout::FieldKind;

mod sealed {
    pub trait Sealed {}
}

/// `Scalar` 描述可按小端序直接读写的定宽数值类型。
///
/// # 设计背景（Why）
/// - 缓冲与布局层需要对 `i8..u64`、`f32`、`f64` 做同一套“偏移 + 宽度”访问，
///   通过 trait 统一宽度与编解码，避免为每种类型复制一遍边界检查。
/// - 声明对应的 [`FieldKind`]，使布局视图能在读写时校验字段声明类型。
///
/// # 契约说明（What）
/// - `WIDTH` 等于类型的字节宽度；
/// - `read_le`/`write_le` 的切片长度至少为 `WIDTH`，调用方（[`ByteBuffer`](super::ByteBuffer)）负责边界检查；
/// - trait 为 sealed，外部 crate 无法扩展，保证布局表的类型集合封闭。
pub trait Scalar: Copy + PartialEq + fmt::Debug + sealed::Sealed {
    /// 字节宽度。
    const WIDTH: usize;
    /// 对应的字段类型标签。
    const KIND: FieldKind;

    /// 从切片前 `WIDTH` 字节按小端序解码。
    fn read_le(bytes: &[u8]) -> Self;

    /// 将值按小端序写入切片前 `WIDTH` 字节。
    fn write_le(self, out: &mut [u8]);
}

macro_rules! impl_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Scalar for $ty {
                const WIDTH: usize = core::mem::size_of::<$ty>();
                const KIND: FieldKind = FieldKind::$kind;

                #[inline]
                fn read_le(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; core::mem::size_of::<$ty>()];
                    raw.copy_from_slice(&bytes[..Self::WIDTH]);
                    <$ty>::from_le_bytes(raw)
                }

                #[inline]
                fn write_le(self, out: &mut [u8]) {
                    out[..Self::WIDTH].copy_from_slice(&self.to_le_bytes());
                }
            }
        )*
    };
}

impl_scalar! {
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_match_primitive_sizes() {
        assert_eq!(<u8 as Scalar>::WIDTH, 1);
        assert_eq!(<i16 as Scalar>::WIDTH, 2);
        assert_eq!(<f32 as Scalar>::WIDTH, 4);
        assert_eq!(<u64 as Scalar>::WIDTH, 8);
    }

    #[test]
    fn encoding_is_little_endian() {
        let mut out = [0u8; 4];
        0x1122_3344u32.write_le(&mut out);
        assert_eq!(out, [0x44, 0x33, 0x22, 0x11]);
        assert_eq!(i16::read_le(&[0xfe, 0xff]), -2);
    }
}
