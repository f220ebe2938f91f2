//! 学生：`id: u32`、UTF-8 姓名（20 字节）、五门成绩 `f32`，共 44 字节。

use core::ops::Deref;

use crate::buffer::{ByteBuffer, TextEncoding};
use crate::error::Result;
use crate::layout::{FieldDef, Layout};

pub const ID: FieldDef = FieldDef::scalar::<u32>("id", 0);
pub const NAME: FieldDef = FieldDef::text("name", 4, 20, TextEncoding::Utf8);
pub const GRADES: FieldDef = FieldDef::array::<f32>("grades", 24, 5);

pub const LAYOUT: Layout = Layout {
    name: "Student",
    size: 44,
    fields: &[ID, NAME, GRADES],
};

record_view! {
    /// 学生记录视图。
    pub struct Student => LAYOUT;
}

impl<B> Student<B>
where
    B: Deref<Target = ByteBuffer>,
{
    scalar_fields! {
        id / set_id: u32 = ID;
    }

    text_fields! {
        name / set_name = NAME;
    }

    array_fields! {
        /// 第 `ordinal` 门成绩（`1..=5`）。
        grade / set_grade / grades: [f32] = GRADES;
    }

    /// 五门成绩的算术平均。
    pub fn average(&self) -> Result<f64> {
        let grades = self.grades()?;
        let sum: f64 = grades.iter().copied().map(f64::from).sum();
        Ok(sum / grades.len() as f64)
    }

    /// 最高分。
    pub fn highest(&self) -> Result<f32> {
        Ok(self.grades()?.into_iter().fold(f32::NEG_INFINITY, f32::max))
    }

    /// 最低分。
    pub fn lowest(&self) -> Result<f32> {
        Ok(self.grades()?.into_iter().fold(f32::INFINITY, f32::min))
    }
}
