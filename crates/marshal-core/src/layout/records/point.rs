//! 二维点：`x`、`y` 两个 `f32`，共 8 字节。

use core::ops::Deref;

use crate::buffer::ByteBuffer;
use crate::error::Result;
use crate::layout::{FieldDef, Layout};

pub const X: FieldDef = FieldDef::scalar::<f32>("x", 0);
pub const Y: FieldDef = FieldDef::scalar::<f32>("y", 4);

pub const LAYOUT: Layout = Layout {
    name: "Point",
    size: 8,
    fields: &[X, Y],
};

record_view! {
    /// 点记录视图。
    pub struct Point => LAYOUT;
}

impl<B> Point<B>
where
    B: Deref<Target = ByteBuffer>,
{
    scalar_fields! {
        /// 横坐标。
        x / set_x: f32 = X;
        /// 纵坐标。
        y / set_y: f32 = Y;
    }

    /// 到原点的欧氏距离。
    pub fn distance_to_origin(&self) -> Result<f64> {
        let x = f64::from(self.x()?);
        let y = f64::from(self.y()?);
        Ok(x.hypot(y))
    }
}
