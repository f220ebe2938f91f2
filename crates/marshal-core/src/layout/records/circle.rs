//! 圆：圆心 [`Point`]（偏移 0）、半径 `f32`（偏移 8）、RGBA 颜色（偏移 12..16），共 16 字节。

use core::f64::consts::PI;
use core::ops::{Deref, DerefMut};

use super::{Point, Rgba, point};
use crate::buffer::ByteBuffer;
use crate::error::Result;
use crate::layout::{FieldDef, Layout};

pub const CENTER: FieldDef = FieldDef::record("center", 0, &point::LAYOUT);
pub const RADIUS: FieldDef = FieldDef::scalar::<f32>("radius", 8);
pub const RED: FieldDef = FieldDef::scalar::<u8>("r", 12);
pub const GREEN: FieldDef = FieldDef::scalar::<u8>("g", 13);
pub const BLUE: FieldDef = FieldDef::scalar::<u8>("b", 14);
pub const ALPHA: FieldDef = FieldDef::scalar::<u8>("a", 15);

pub const LAYOUT: Layout = Layout {
    name: "Circle",
    size: 16,
    fields: &[CENTER, RADIUS, RED, GREEN, BLUE, ALPHA],
};

record_view! {
    /// 圆记录视图。
    pub struct Circle => LAYOUT;
}

impl<B> Circle<B>
where
    B: Deref<Target = ByteBuffer>,
{
    scalar_fields! {
        radius / set_radius: f32 = RADIUS;
    }

    /// 圆心的只读视图，基址为本记录基址。
    pub fn center(&self) -> Result<Point<&ByteBuffer>> {
        self.view.nested(&CENTER).map(Point::from_view)
    }

    /// 圆心的可写视图。
    pub fn center_mut(&mut self) -> Result<Point<&mut ByteBuffer>>
    where
        B: DerefMut<Target = ByteBuffer>,
    {
        self.view.nested_mut(&CENTER).map(Point::from_view)
    }

    pub fn color(&self) -> Result<Rgba> {
        Ok(Rgba::new(
            self.view.get(&RED)?,
            self.view.get(&GREEN)?,
            self.view.get(&BLUE)?,
            self.view.get(&ALPHA)?,
        ))
    }

    pub fn set_color(&mut self, color: Rgba) -> Result<()>
    where
        B: DerefMut<Target = ByteBuffer>,
    {
        self.view.set(&RED, color.r)?;
        self.view.set(&GREEN, color.g)?;
        self.view.set(&BLUE, color.b)?;
        self.view.set(&ALPHA, color.a)
    }

    /// `π r²`。
    pub fn area(&self) -> Result<f64> {
        let radius = f64::from(self.radius()?);
        Ok(PI * radius * radius)
    }

    /// `2 π r`。
    pub fn circumference(&self) -> Result<f64> {
        Ok(2.0 * PI * f64::from(self.radius()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_center_shares_storage() {
        let mut buffer = ByteBuffer::new(32).expect("分配失败");
        let mut circle = Circle::at(&mut buffer, 16).expect("视图构造失败");
        {
            let mut center = circle.center_mut().unwrap();
            center.set_x(1.5).unwrap();
            center.set_y(-2.0).unwrap();
        }
        circle.set_radius(2.0).unwrap();
        circle.set_color(Rgba::new(255, 128, 0, 255)).unwrap();

        assert_eq!(circle.center().unwrap().x().unwrap(), 1.5);
        assert_eq!(circle.color().unwrap().argb(), 0xFFFF_8000);
        assert!((circle.area().unwrap() - 4.0 * PI).abs() < 1e-9);
        assert!((circle.circumference().unwrap() - 4.0 * PI).abs() < 1e-9);
        assert_eq!(buffer.read_f32(16).unwrap(), 1.5);
        assert_eq!(buffer.read_f32(20).unwrap(), -2.0);
        assert_eq!(buffer.read_u8(28).unwrap(), 255);
    }
}
