//! 定长字节缓冲与定宽数值/文本编码。
//!
//! - [`ByteBuffer`]：所有上层组件共享的内存底座；
//! - [`Scalar`]：小端序定宽数值的统一读写入口；
//! - [`TextEncoding`]：定宽文本字段的编码声明。

mod byte_buffer;
mod scalar;
mod text;

pub use byte_buffer::ByteBuffer;
pub use scalar::Scalar;
pub use text::TextEncoding;
