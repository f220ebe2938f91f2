//! 矩形：`x`、`y`、`width`、`height` 四个 `i32`，共 16 字节。

use core::ops::Deref;

use crate::buffer::ByteBuffer;
use crate::error::Result;
use crate::layout::{FieldDef, Layout};

pub const X: FieldDef = FieldDef::scalar::<i32>("x", 0);
pub const Y: FieldDef = FieldDef::scalar::<i32>("y", 4);
pub const WIDTH: FieldDef = FieldDef::scalar::<i32>("width", 8);
pub const HEIGHT: FieldDef = FieldDef::scalar::<i32>("height", 12);

pub const LAYOUT: Layout = Layout {
    name: "Rectangle",
    size: 16,
    fields: &[X, Y, WIDTH, HEIGHT],
};

record_view! {
    /// 矩形记录视图。
    pub struct Rectangle => LAYOUT;
}

impl<B> Rectangle<B>
where
    B: Deref<Target = ByteBuffer>,
{
    scalar_fields! {
        /// 左上角横坐标。
        x / set_x: i32 = X;
        /// 左上角纵坐标。
        y / set_y: i32 = Y;
        width / set_width: i32 = WIDTH;
        height / set_height: i32 = HEIGHT;
    }

    /// `width * height`，以 `i64` 计算避免溢出。
    pub fn area(&self) -> Result<i64> {
        Ok(i64::from(self.width()?) * i64::from(self.height()?))
    }

    /// `2 * (width + height)`。
    pub fn perimeter(&self) -> Result<i64> {
        Ok(2 * (i64::from(self.width()?) + i64::from(self.height()?)))
    }

    /// 对角线长度。
    pub fn diagonal(&self) -> Result<f64> {
        let width = f64::from(self.width()?);
        let height = f64::from(self.height()?);
        Ok(width.hypot(height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_values_follow_field_writes() {
        let mut buffer = ByteBuffer::new(LAYOUT.size).expect("分配失败");
        let mut rect = Rectangle::new(&mut buffer).expect("视图构造失败");
        rect.set_x(10).unwrap();
        rect.set_y(20).unwrap();
        rect.set_width(30).unwrap();
        rect.set_height(40).unwrap();
        assert_eq!(rect.area().unwrap(), 1200);
        assert_eq!(rect.perimeter().unwrap(), 140);
        assert_eq!(rect.diagonal().unwrap(), 50.0);

        rect.set_width(3).unwrap();
        assert_eq!(rect.area().unwrap(), 120);
        assert_eq!(buffer.read_i32(8).unwrap(), 3);
    }

    #[test]
    fn area_does_not_overflow_i32() {
        let mut buffer = ByteBuffer::new(LAYOUT.size).expect("分配失败");
        let mut rect = Rectangle::new(&mut buffer).expect("视图构造失败");
        rect.set_width(i32::MAX).unwrap();
        rect.set_height(2).unwrap();
        assert_eq!(rect.area().unwrap(), i64::from(i32::MAX) * 2);
    }
}
