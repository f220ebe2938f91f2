//! 具体记录布局与视图。
//!
//! 每个子模块导出三类内容：字段常量（如 `rectangle::WIDTH`）、布局常量 `LAYOUT`、
//! 以及以 [`StructView`](crate::layout::StructView) 为底座的记录视图类型。
//! 访问器由下方宏按字段表生成，派生属性手写在各自模块中。
//!
//! | 记录 | 尺寸 | 模块 |
//! |---|---|---|
//! | 点 | 8 | [`point`] |
//! | 矩形 | 16 | [`rectangle`] |
//! | 人员 | 44 | [`person`] |
//! | 商品 | 16 | [`product`] |
//! | 圆 | 16 | [`circle`] |
//! | 彩色矩形 | 20 | [`colored_rect`] |
//! | 学生 | 44 | [`student`] |
//! | 日温度 | 100 | [`daily_temperature`] |
//! | Win32 `RECT` | 16 | [`win_rect`] |
//! | Win32 `POINT` | 8 | [`win_point`] |

/// 生成记录视图类型及其构造函数。
macro_rules! record_view {
    ($(#[$meta:meta])* pub struct $name:ident => $layout:path;) => {
        $(#[$meta])*
        pub struct $name<B> {
            view: $crate::layout::StructView<B>,
        }

        impl<B> $name<B>
        where
            B: ::core::ops::Deref<Target = $crate::buffer::ByteBuffer>,
        {
            /// 记录布局表。
            pub const LAYOUT: &'static $crate::layout::Layout = &$layout;

            /// 在缓冲起始处解释记录。
            pub fn new(buffer: B) -> $crate::error::Result<Self> {
                Self::at(buffer, 0)
            }

            /// 在 `base` 偏移处解释记录。
            pub fn at(buffer: B, base: usize) -> $crate::error::Result<Self> {
                $crate::layout::StructView::at(buffer, base, &$layout).map(|view| Self { view })
            }

            /// 底层通用视图。
            pub fn view(&self) -> &$crate::layout::StructView<B> {
                &self.view
            }

            /// 归还底层缓冲句柄。
            pub fn into_inner(self) -> B {
                self.view.into_inner()
            }

            #[allow(dead_code)]
            pub(crate) fn from_view(view: $crate::layout::StructView<B>) -> Self {
                debug_assert_eq!(view.layout(), &$layout);
                Self { view }
            }
        }
    };
}

/// 生成单值数值字段的 getter/setter。
macro_rules! scalar_fields {
    ($($(#[$meta:meta])* $get:ident / $set:ident : $ty:ty = $field:path;)*) => {
        $(
            $(#[$meta])*
            pub fn $get(&self) -> $crate::error::Result<$ty> {
                self.view.get::<$ty>(&$field)
            }

            #[doc = concat!("写入 `", stringify!($get), "`。")]
            pub fn $set(&mut self, value: $ty) -> $crate::error::Result<()>
            where
                B: ::core::ops::DerefMut<Target = $crate::buffer::ByteBuffer>,
            {
                self.view.set::<$ty>(&$field, value)
            }
        )*
    };
}

/// 生成定长数组字段的按序号 getter/setter 与整体读取。
macro_rules! array_fields {
    ($($(#[$meta:meta])* $get:ident / $set:ident / $all:ident : [$ty:ty] = $field:path;)*) => {
        $(
            $(#[$meta])*
            pub fn $get(&self, ordinal: usize) -> $crate::error::Result<$ty> {
                self.view.get_at::<$ty>(&$field, ordinal)
            }

            #[doc = concat!("写入 `", stringify!($get), "` 的第 `ordinal` 个元素（`1..=count`）。")]
            pub fn $set(&mut self, ordinal: usize, value: $ty) -> $crate::error::Result<()>
            where
                B: ::core::ops::DerefMut<Target = $crate::buffer::ByteBuffer>,
            {
                self.view.set_at::<$ty>(&$field, ordinal, value)
            }

            #[doc = concat!("按顺序读取 `", stringify!($get), "` 的全部元素。")]
            pub fn $all(&self) -> $crate::error::Result<alloc::vec::Vec<$ty>> {
                self.view.values::<$ty>(&$field)
            }
        )*
    };
}

/// 生成定宽文本字段的 getter/setter。
macro_rules! text_fields {
    ($($(#[$meta:meta])* $get:ident / $set:ident = $field:path;)*) => {
        $(
            $(#[$meta])*
            pub fn $get(&self) -> $crate::error::Result<alloc::string::String> {
                self.view.text(&$field)
            }

            #[doc = concat!("写入 `", stringify!($get), "`；超出字段宽度返回 `FieldTooLong`。")]
            pub fn $set(&mut self, value: &str) -> $crate::error::Result<()>
            where
                B: ::core::ops::DerefMut<Target = $crate::buffer::ByteBuffer>,
            {
                self.view.set_text(&$field, value)
            }
        )*
    };
}

pub mod circle;
pub mod colored_rect;
pub mod daily_temperature;
pub mod person;
pub mod point;
pub mod product;
pub mod rectangle;
pub mod student;
pub mod win_point;
pub mod win_rect;

pub use circle::Circle;
pub use colored_rect::ColoredRect;
pub use daily_temperature::DailyTemperature;
pub use person::Person;
pub use point::Point;
pub use product::Product;
pub use rectangle::Rectangle;
pub use student::Student;
pub use win_point::WinPoint;
pub use win_rect::WinRect;

use super::Layout;

/// 全部内置记录布局，供展示层枚举与一致性测试使用。
pub const ALL_LAYOUTS: [&Layout; 10] = [
    &point::LAYOUT,
    &rectangle::LAYOUT,
    &person::LAYOUT,
    &product::LAYOUT,
    &circle::LAYOUT,
    &colored_rect::LAYOUT,
    &student::LAYOUT,
    &daily_temperature::LAYOUT,
    &win_rect::LAYOUT,
    &win_point::LAYOUT,
];

/// 四字节 RGBA 颜色，按 `r, g, b, a` 顺序连续存放。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// 构造颜色。
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// 打包为 `0xAARRGGBB`。
    pub const fn argb(&self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}
