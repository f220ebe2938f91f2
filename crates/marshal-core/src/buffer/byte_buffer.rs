use alloc::{boxed::Box, string::String, vec::Vec};
use core::{fmt, ops::Range};

use super::{Scalar, TextEncoding};
use crate::error::{MarshalError, Result};

/// `ByteBuffer` 是定长、连续、独占所有权的字节区域。
///
/// # 设计背景（Why）
/// - 布局视图、缓冲池与帧编解码都建立在同一块“可按偏移读写的原始内存”之上，
///   因此把边界检查集中到这里，上层只描述偏移与类型。
/// - 容量在创建时确定，写入永远不会触发扩容，保证布局偏移在整个生命周期内有效。
///
/// # 逻辑解析（How）
/// - 底层存储为 `Box<[u8]>`，分配时先 `try_reserve_exact`，分配器拒绝时返回错误而不是中止进程；
/// - 所有访问先经 [`ByteBuffer::span`] 计算 `offset..offset + width`，加法溢出同样视为越界；
/// - 数值读写委托给 [`Scalar`]，统一小端序。
///
/// # 契约说明（What）
/// - **前置条件**：`offset + width <= size()`；
/// - **失败语义**：越界返回 [`MarshalError::OutOfBounds`]，且缓冲内容保持不变；
/// - **所有权**：不实现 `Clone`，内容复制只能经由显式的 [`ByteBuffer::copy_from`]。
pub struct ByteBuffer {
    data: Box<[u8]>,
}

impl ByteBuffer {
    /// 分配 `capacity` 字节并清零。
    pub fn new(capacity: usize) -> Result<Self> {
        Self::filled(capacity, 0)
    }

    /// 分配 `capacity` 字节并以 `byte` 填充。
    ///
    /// 这是“不清零”创建方式在安全 Rust 中的对应：内容总是确定的，只是不为零。
    pub fn filled(capacity: usize, byte: u8) -> Result<Self> {
        if capacity == 0 {
            return Err(MarshalError::Allocation {
                capacity,
                reason: "capacity must be non-zero",
            });
        }
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| MarshalError::Allocation {
                capacity,
                reason: "allocator refused the request",
            })?;
        data.resize(capacity, byte);
        Ok(Self {
            data: data.into_boxed_slice(),
        })
    }

    /// 以现有字节构造缓冲，容量等于输入长度。
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let mut buffer = Self::new(bytes.len())?;
        buffer.data.copy_from_slice(bytes);
        Ok(buffer)
    }

    /// 返回容量（字节）。
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// 只读访问全部字节。
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// 可写访问全部字节。
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// 计算并校验 `offset..offset + width`。
    #[inline]
    pub fn span(&self, offset: usize, width: usize) -> Result<Range<usize>> {
        let capacity = self.size();
        match offset.checked_add(width) {
            Some(end) if end <= capacity => Ok(offset..end),
            _ => Err(MarshalError::out_of_bounds(offset, width, capacity)),
        }
    }

    /// 读取定宽数值。
    #[inline]
    pub fn read<T: Scalar>(&self, offset: usize) -> Result<T> {
        let range = self.span(offset, T::WIDTH)?;
        Ok(T::read_le(&self.data[range]))
    }

    /// 写入定宽数值。
    #[inline]
    pub fn write<T: Scalar>(&mut self, offset: usize, value: T) -> Result<()> {
        let range = self.span(offset, T::WIDTH)?;
        value.write_le(&mut self.data[range]);
        Ok(())
    }

    /// 按运行时宽度读取整数，`width` 取 1、2、4、8。
    ///
    /// 返回 `i128`，使 `u64` 全值域与 `i64` 负值都能无损表示。
    pub fn read_int(&self, offset: usize, width: usize, signed: bool) -> Result<i128> {
        let value = match (width, signed) {
            (1, true) => i128::from(self.read::<i8>(offset)?),
            (1, false) => i128::from(self.read::<u8>(offset)?),
            (2, true) => i128::from(self.read::<i16>(offset)?),
            (2, false) => i128::from(self.read::<u16>(offset)?),
            (4, true) => i128::from(self.read::<i32>(offset)?),
            (4, false) => i128::from(self.read::<u32>(offset)?),
            (8, true) => i128::from(self.read::<i64>(offset)?),
            (8, false) => i128::from(self.read::<u64>(offset)?),
            _ => return Err(MarshalError::UnsupportedWidth { width }),
        };
        Ok(value)
    }

    /// 借出 `offset..offset + len` 的只读切片。
    pub fn read_bytes(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let range = self.span(offset, len)?;
        Ok(&self.data[range])
    }

    /// 将 `bytes` 写到 `offset` 起始处。
    pub fn write_bytes(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        let range = self.span(offset, bytes.len())?;
        self.data[range].copy_from_slice(bytes);
        Ok(())
    }

    /// 从另一块缓冲复制 `len` 字节。
    ///
    /// 两端区间都先校验，任一越界则不复制任何字节。同一缓冲内部的复制见 [`ByteBuffer::copy_within`]。
    pub fn copy_from(
        &mut self,
        src: &ByteBuffer,
        src_offset: usize,
        dst_offset: usize,
        len: usize,
    ) -> Result<()> {
        let from = src.span(src_offset, len)?;
        let to = self.span(dst_offset, len)?;
        self.data[to].copy_from_slice(&src.data[from]);
        Ok(())
    }

    /// 在同一缓冲内复制 `len` 字节，源与目标区间允许重叠（memmove 语义）。
    pub fn copy_within(&mut self, src_offset: usize, dst_offset: usize, len: usize) -> Result<()> {
        let from = self.span(src_offset, len)?;
        self.span(dst_offset, len)?;
        self.data.copy_within(from, dst_offset);
        Ok(())
    }

    /// 以 `byte` 填充 `offset..offset + len`。
    pub fn fill(&mut self, offset: usize, len: usize, byte: u8) -> Result<()> {
        let range = self.span(offset, len)?;
        self.data[range].fill(byte);
        Ok(())
    }

    /// 将 `offset..offset + len` 清零。
    pub fn zero(&mut self, offset: usize, len: usize) -> Result<()> {
        self.fill(offset, len, 0)
    }

    /// 将整块缓冲清零。
    pub fn zero_all(&mut self) {
        self.data.fill(0);
    }

    /// 读取定宽文本字段。
    pub fn read_text(&self, offset: usize, width: usize, encoding: TextEncoding) -> Result<String> {
        let raw = self.read_bytes(offset, width)?;
        encoding
            .decode(raw)
            .ok_or(MarshalError::InvalidText { offset, encoding })
    }

    /// 写入定宽文本字段，剩余字节清零。
    ///
    /// 编码后超过 `width` 返回 [`MarshalError::FieldTooLong`]，不会截断；
    /// 文本内含 `'\0'` 返回 [`MarshalError::InteriorNul`]，两种情况都不修改缓冲。
    pub fn write_text(
        &mut self,
        offset: usize,
        width: usize,
        encoding: TextEncoding,
        text: &str,
    ) -> Result<()> {
        self.write_text_field("<text>", offset, width, encoding, text)
    }

    pub(crate) fn write_text_field(
        &mut self,
        field: &'static str,
        offset: usize,
        width: usize,
        encoding: TextEncoding,
        text: &str,
    ) -> Result<()> {
        let range = self.span(offset, width)?;
        if let Some(position) = text.chars().position(|ch| ch == '\0') {
            return Err(MarshalError::InteriorNul { field, position });
        }
        let encoded = encoding.encode(text);
        if encoded.len() > width {
            return Err(MarshalError::FieldTooLong {
                field,
                len: encoded.len(),
                width,
            });
        }
        let slot = &mut self.data[range];
        slot[..encoded.len()].copy_from_slice(&encoded);
        slot[encoded.len()..].fill(0);
        Ok(())
    }

    /// 以十六进制（小写、无分隔）导出 `offset..offset + len`，供展示层打印。
    pub fn to_hex(&self, offset: usize, len: usize) -> Result<String> {
        Ok(hex::encode(self.read_bytes(offset, len)?))
    }
}

macro_rules! named_accessors {
    ($($read:ident, $write:ident => $ty:ty;)*) => {
        impl ByteBuffer {
            $(
                #[doc = concat!("读取 `", stringify!($ty), "`（小端序）。")]
                #[inline]
                pub fn $read(&self, offset: usize) -> Result<$ty> {
                    self.read::<$ty>(offset)
                }

                #[doc = concat!("写入 `", stringify!($ty), "`（小端序）。")]
                #[inline]
                pub fn $write(&mut self, offset: usize, value: $ty) -> Result<()> {
                    self.write::<$ty>(offset, value)
                }
            )*
        }
    };
}

named_accessors! {
    read_i8, write_i8 => i8;
    read_u8, write_u8 => u8;
    read_i16, write_i16 => i16;
    read_u16, write_u16 => u16;
    read_i32, write_i32 => i32;
    read_u32, write_u32 => u32;
    read_i64, write_i64 => i64;
    read_u64, write_u64 => u64;
    read_f32, write_f32 => f32;
    read_f64, write_f64 => f64;
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const PREVIEW: usize = 16;
        let shown = self.size().min(PREVIEW);
        f.debug_struct("ByteBuffer")
            .field("capacity", &self.size())
            .field("head", &hex::encode(&self.data[..shown]))
            .finish()
    }
}
