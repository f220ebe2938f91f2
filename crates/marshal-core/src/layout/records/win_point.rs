//! Win32 `POINT`：`x`、`y` 两个 `i32`，共 8 字节。

use core::ops::Deref;

use crate::buffer::ByteBuffer;
use crate::layout::{FieldDef, Layout};

pub const X: FieldDef = FieldDef::scalar::<i32>("x", 0);
pub const Y: FieldDef = FieldDef::scalar::<i32>("y", 4);

pub const LAYOUT: Layout = Layout {
    name: "WinPoint",
    size: 8,
    fields: &[X, Y],
};

record_view! {
    /// Win32 `POINT` 视图。
    pub struct WinPoint => LAYOUT;
}

impl<B> WinPoint<B>
where
    B: Deref<Target = ByteBuffer>,
{
    scalar_fields! {
        x / set_x: i32 = X;
        y / set_y: i32 = Y;
    }
}
