//! `marshal-core` 提供定长字节缓冲与显式偏移的结构布局视图。
//!
//! # 模块定位（Why）
//! - 与外部二进制格式（文件、共享内存、Win32 `RECT`/`POINT`）互通时，字段必须落在约定偏移上，
//!   不允许编译器插入对齐填充；本 crate 把这种“偏移 + 类型”的约定表达为常量布局表。
//! - 缓冲池（`marshal-buffer`）与帧编解码（`marshal-codec`）共享同一个 [`ByteBuffer`] 底座，
//!   边界检查只在这里实现一次。
//!
//! # 设计概要（How）
//! - [`buffer`]：`ByteBuffer` 及小端定宽数值、定宽文本的读写；
//! - [`layout`]：`FieldDef`/`Layout` 常量表、通用 [`StructView`] 与 [`layout::records`] 中的具体记录；
//! - [`error`]：统一错误域 [`MarshalError`] 与稳定错误码。
//!
//! # 契约（What）
//! - 所有多字节数值按小端序存放；
//! - 越界、字段溢出、类型错配均返回错误，且不修改缓冲内容；
//! - 缓冲不可隐式复制，视图只借用缓冲。

extern crate alloc;

pub mod buffer;
pub mod error;
pub mod layout;

pub use buffer::{ByteBuffer, Scalar, TextEncoding};
pub use error::{MarshalError, Result, codes};
pub use layout::{FieldDef, FieldKind, Layout, StructView, records};
