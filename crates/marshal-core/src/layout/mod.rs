//! # layout 模块
//!
//! ## 角色定位（Why）
//! - 把“偏移 + 类型 + 数量”的常量表应用到 [`ByteBuffer`](crate::buffer::ByteBuffer) 上，
//!   以类型安全的访问器替代按名称的运行时字段分派；
//! - `records` 子模块给出全部具体记录（点、矩形、人员、商品、圆、彩色矩形、学生、日温度、
//!   Win32 `RECT`/`POINT`）的布局表与视图。
//!
//! ## 契约（What）
//! - 布局显式、紧凑、小端，不插入对齐填充；
//! - 嵌套记录以子布局表达，基址为外层字段偏移，不与无关字段别名。

mod field;
mod view;

pub mod records;

pub use field::{FieldDef, FieldKind, Layout};
pub use view::StructView;
