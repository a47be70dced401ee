//! Currency units in INTEGER or VARCHAR columns

use usertype_core::{ColumnMapper, ColumnValue, SqlType, UserTypeError};

use crate::currency::CurrencyUnit;

/// Maps a `CurrencyUnit` to an INTEGER column holding its ISO 4217 numeric code
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerColumnCurrencyUnitMapper;

impl ColumnMapper for IntegerColumnCurrencyUnitMapper {
    type Value = CurrencyUnit;

    fn sql_type(&self) -> SqlType {
        SqlType::Integer
    }

    fn from_non_null_value(&self, value: ColumnValue) -> Result<CurrencyUnit, UserTypeError> {
        Ok(CurrencyUnit::of_numeric(value.into_integer()?)?)
    }

    fn to_non_null_value(&self, value: &CurrencyUnit) -> Result<ColumnValue, UserTypeError> {
        Ok(ColumnValue::Integer(i32::from(value.numeric_code())))
    }

    fn from_non_null_string(&self, s: &str) -> Result<CurrencyUnit, UserTypeError> {
        Ok(CurrencyUnit::of(s)?)
    }

    fn to_non_null_string(&self, value: &CurrencyUnit) -> String {
        value.code().to_string()
    }
}

/// Maps a `CurrencyUnit` to a VARCHAR column holding its alphabetic code
#[derive(Debug, Clone, Copy, Default)]
pub struct VarcharColumnCurrencyUnitMapper;

impl ColumnMapper for VarcharColumnCurrencyUnitMapper {
    type Value = CurrencyUnit;

    fn sql_type(&self) -> SqlType {
        SqlType::Varchar
    }

    fn from_non_null_value(&self, value: ColumnValue) -> Result<CurrencyUnit, UserTypeError> {
        Ok(CurrencyUnit::of(&value.into_varchar()?)?)
    }

    fn to_non_null_value(&self, value: &CurrencyUnit) -> Result<ColumnValue, UserTypeError> {
        Ok(ColumnValue::Varchar(value.code().to_string()))
    }

    fn from_non_null_string(&self, s: &str) -> Result<CurrencyUnit, UserTypeError> {
        Ok(CurrencyUnit::of(s)?)
    }

    fn to_non_null_string(&self, value: &CurrencyUnit) -> String {
        value.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_code_column() {
        let mapper = IntegerColumnCurrencyUnitMapper;

        let column = mapper.to_non_null_value(&CurrencyUnit::GBP).unwrap();
        assert_eq!(column, ColumnValue::Integer(826));
        assert_eq!(mapper.from_non_null_value(column).unwrap(), CurrencyUnit::GBP);
    }

    #[test]
    fn test_unknown_numeric_code() {
        let mapper = IntegerColumnCurrencyUnitMapper;
        let result = mapper.from_non_null_value(ColumnValue::Integer(999));
        assert!(matches!(result, Err(UserTypeError::Domain(_))));
    }

    #[test]
    fn test_alphabetic_code_column() {
        let mapper = VarcharColumnCurrencyUnitMapper;

        let column = mapper.to_non_null_value(&CurrencyUnit::JPY).unwrap();
        assert_eq!(column, ColumnValue::Varchar("JPY".to_string()));
        assert_eq!(mapper.from_non_null_value(column).unwrap(), CurrencyUnit::JPY);
        assert_eq!(mapper.from_non_null_string(" chf ").unwrap(), CurrencyUnit::CHF);
    }
}
