//! 商品：`id: i32`、`price: f64`、`quantity: u8`、`discount: i8`、`category: i16`，共 16 字节。

use core::ops::Deref;

use crate::buffer::ByteBuffer;
use crate::error::Result;
use crate::layout::{FieldDef, Layout};

pub const ID: FieldDef = FieldDef::scalar::<i32>("id", 0);
pub const PRICE: FieldDef = FieldDef::scalar::<f64>("price", 4);
pub const QUANTITY: FieldDef = FieldDef::scalar::<u8>("quantity", 12);
pub const DISCOUNT: FieldDef = FieldDef::scalar::<i8>("discount", 13);
pub const CATEGORY: FieldDef = FieldDef::scalar::<i16>("category", 14);

pub const LAYOUT: Layout = Layout {
    name: "Product",
    size: 16,
    fields: &[ID, PRICE, QUANTITY, DISCOUNT, CATEGORY],
};

record_view! {
    /// 商品记录视图。
    pub struct Product => LAYOUT;
}

impl<B> Product<B>
where
    B: Deref<Target = ByteBuffer>,
{
    scalar_fields! {
        id / set_id: i32 = ID;
        /// 单价。
        price / set_price: f64 = PRICE;
        quantity / set_quantity: u8 = QUANTITY;
        /// 折扣百分比，负值表示加价。
        discount / set_discount: i8 = DISCOUNT;
        category / set_category: i16 = CATEGORY;
    }

    /// `price * quantity`。
    pub fn total_value(&self) -> Result<f64> {
        Ok(self.price()? * f64::from(self.quantity()?))
    }
}
