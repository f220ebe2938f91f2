//! Win32 `RECT`：`left`、`top`、`right`、`bottom` 四个 `i32`，共 16 字节。
//!
//! 与 Win32 约定一致，右边界与下边界不包含在矩形内。

use core::ops::Deref;

use super::WinPoint;
use crate::buffer::ByteBuffer;
use crate::error::Result;
use crate::layout::{FieldDef, Layout};

pub const LEFT: FieldDef = FieldDef::scalar::<i32>("left", 0);
pub const TOP: FieldDef = FieldDef::scalar::<i32>("top", 4);
pub const RIGHT: FieldDef = FieldDef::scalar::<i32>("right", 8);
pub const BOTTOM: FieldDef = FieldDef::scalar::<i32>("bottom", 12);

pub const LAYOUT: Layout = Layout {
    name: "WinRect",
    size: 16,
    fields: &[LEFT, TOP, RIGHT, BOTTOM],
};

record_view! {
    /// Win32 `RECT` 视图。
    pub struct WinRect => LAYOUT;
}

impl<B> WinRect<B>
where
    B: Deref<Target = ByteBuffer>,
{
    scalar_fields! {
        left / set_left: i32 = LEFT;
        top / set_top: i32 = TOP;
        right / set_right: i32 = RIGHT;
        bottom / set_bottom: i32 = BOTTOM;
    }

    /// `right - left`，以 `i64` 计算避免溢出。
    pub fn width(&self) -> Result<i64> {
        Ok(i64::from(self.right()?) - i64::from(self.left()?))
    }

    /// `bottom - top`。
    pub fn height(&self) -> Result<i64> {
        Ok(i64::from(self.bottom()?) - i64::from(self.top()?))
    }

    /// 判断坐标是否落在矩形内（左上闭、右下开）。
    pub fn contains(&self, x: i32, y: i32) -> Result<bool> {
        Ok(self.left()? <= x && x < self.right()? && self.top()? <= y && y < self.bottom()?)
    }

    /// 以 [`WinPoint`] 视图作为参数的 [`WinRect::contains`]。
    pub fn contains_point<P>(&self, point: &WinPoint<P>) -> Result<bool>
    where
        P: Deref<Target = ByteBuffer>,
    {
        self.contains(point.x()?, point.y()?)
    }
}
