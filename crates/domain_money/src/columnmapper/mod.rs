//! Column mappers for currencies and monetary amounts

mod amount;
mod currency;

pub use amount::{BigIntColumnLongMapper, NumericColumnDecimalMapper, NumericColumnMoneyMapper};
pub use currency::{IntegerColumnCurrencyUnitMapper, VarcharColumnCurrencyUnitMapper};
