//! 人员：UTF-16LE 姓名（32 字节，16 个码元）、年龄 `i32`、身高 `f64`，共 44 字节。

use core::ops::Deref;

use crate::buffer::{ByteBuffer, TextEncoding};
use crate::layout::{FieldDef, Layout};

pub const NAME: FieldDef = FieldDef::text("name", 0, 32, TextEncoding::Utf16Le);
pub const AGE: FieldDef = FieldDef::scalar::<i32>("age", 32);
pub const HEIGHT: FieldDef = FieldDef::scalar::<f64>("height", 36);

pub const LAYOUT: Layout = Layout {
    name: "Person",
    size: 44,
    fields: &[NAME, AGE, HEIGHT],
};

record_view! {
    /// 人员记录视图。
    pub struct Person => LAYOUT;
}

impl<B> Person<B>
where
    B: Deref<Target = ByteBuffer>,
{
    text_fields! {
        /// 姓名，遇到 `0x0000` 码元截止。
        name / set_name = NAME;
    }

    scalar_fields! {
        age / set_age: i32 = AGE;
        /// 身高（米）。
        height / set_height: f64 = HEIGHT;
    }
}
