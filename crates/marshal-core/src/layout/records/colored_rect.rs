//! 彩色矩形：嵌套 [`Rectangle`]（偏移 0）后跟 RGBA 颜色（偏移 16..20），共 20 字节。

use core::ops::{Deref, DerefMut};

use super::{Rectangle, Rgba, rectangle};
use crate::buffer::ByteBuffer;
use crate::error::Result;
use crate::layout::{FieldDef, Layout};

pub const RECT: FieldDef = FieldDef::record("rect", 0, &rectangle::LAYOUT);
pub const RED: FieldDef = FieldDef::scalar::<u8>("r", 16);
pub const GREEN: FieldDef = FieldDef::scalar::<u8>("g", 17);
pub const BLUE: FieldDef = FieldDef::scalar::<u8>("b", 18);
pub const ALPHA: FieldDef = FieldDef::scalar::<u8>("a", 19);

pub const LAYOUT: Layout = Layout {
    name: "ColoredRect",
    size: 20,
    fields: &[RECT, RED, GREEN, BLUE, ALPHA],
};

record_view! {
    /// 彩色矩形记录视图。
    pub struct ColoredRect => LAYOUT;
}

impl<B> ColoredRect<B>
where
    B: Deref<Target = ByteBuffer>,
{
    pub fn rect(&self) -> Result<Rectangle<&ByteBuffer>> {
        self.view.nested(&RECT).map(Rectangle::from_view)
    }

    pub fn rect_mut(&mut self) -> Result<Rectangle<&mut ByteBuffer>>
    where
        B: DerefMut<Target = ByteBuffer>,
    {
        self.view.nested_mut(&RECT).map(Rectangle::from_view)
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

    /// 内层矩形面积。
    pub fn area(&self) -> Result<i64> {
        self.rect()?.area()
    }

    /// 颜色打包为 `0xAARRGGBB`。
    pub fn color_argb(&self) -> Result<u32> {
        Ok(self.color()?.argb())
    }
}
