//! 日温度：`year: u16`、`month: u8`、`day: u8`、24 个小时读数 `f32`，共 100 字节。

use core::ops::Deref;

use crate::buffer::ByteBuffer;
use crate::error::Result;
use crate::layout::{FieldDef, Layout};

pub const YEAR: FieldDef = FieldDef::scalar::<u16>("year", 0);
pub const MONTH: FieldDef = FieldDef::scalar::<u8>("month", 2);
pub const DAY: FieldDef = FieldDef::scalar::<u8>("day", 3);
pub const HOURLY: FieldDef = FieldDef::array::<f32>("hourly", 4, 24);

pub const LAYOUT: Layout = Layout {
    name: "DailyTemperature",
    size: 100,
    fields: &[YEAR, MONTH, DAY, HOURLY],
};

record_view! {
    /// 日温度记录视图。
    pub struct DailyTemperature => LAYOUT;
}

impl<B> DailyTemperature<B>
where
    B: Deref<Target = ByteBuffer>,
{
    scalar_fields! {
        year / set_year: u16 = YEAR;
        month / set_month: u8 = MONTH;
        day / set_day: u8 = DAY;
    }

    array_fields! {
        /// 第 `hour` 小时读数，`hour` 取 `1..=24`。
        hour / set_hour / hourly: [f32] = HOURLY;
    }

    pub fn average(&self) -> Result<f64> {
        let readings = self.hourly()?;
        let sum: f64 = readings.iter().copied().map(f64::from).sum();
        Ok(sum / readings.len() as f64)
    }

    pub fn min(&self) -> Result<f32> {
        Ok(self.hourly()?.into_iter().fold(f32::INFINITY, f32::min))
    }

    pub fn max(&self) -> Result<f32> {
        Ok(self.hourly()?.into_iter().fold(f32::NEG_INFINITY, f32::max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hourly_statistics() {
        let mut buffer = ByteBuffer::new(LAYOUT.size).expect("分配失败");
        let mut day = DailyTemperature::new(&mut buffer).expect("视图构造失败");
        day.set_year(2024).unwrap();
        day.set_month(7).unwrap();
        day.set_day(15).unwrap();
        for hour in 1..=24 {
            day.set_hour(hour, hour as f32).unwrap();
        }
        assert_eq!(day.average().unwrap(), 12.5);
        assert_eq!(day.min().unwrap(), 1.0);
        assert_eq!(day.max().unwrap(), 24.0);
        assert_eq!(day.hour(24).unwrap(), 24.0);
        assert_eq!(buffer.read_u16(0).unwrap(), 2024);
        assert_eq!(buffer.read_f32(96).unwrap(), 24.0);
    }
}
