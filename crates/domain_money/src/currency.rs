//! ISO 4217 currency units

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::money::MoneyError;

macro_rules! currency_units {
    ($($code:ident => $numeric:literal, $places:literal;)*) => {
        /// Currency units following ISO 4217
        ///
        /// Covers the active national and supranational codes. Precious metals,
        /// testing and "no currency" codes have no minor unit and are left out.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "UPPERCASE")]
        pub enum CurrencyUnit {
            $($code,)*
        }

        impl CurrencyUnit {
            /// Every supported currency unit, in code order
            pub const VALUES: &'static [CurrencyUnit] = &[$(CurrencyUnit::$code,)*];

            /// Returns the ISO 4217 numeric code
            pub fn numeric_code(&self) -> u16 {
                match self {
                    $(CurrencyUnit::$code => $numeric,)*
                }
            }

            /// Returns the number of decimal places for this currency
            pub fn decimal_places(&self) -> u32 {
                match self {
                    $(CurrencyUnit::$code => $places,)*
                }
            }

            /// Returns the ISO 4217 code
            pub fn code(&self) -> &'static str {
                match self {
                    $(CurrencyUnit::$code => stringify!($code),)*
                }
            }
        }
    };
}

currency_units! {
    AED => 784, 2;
    AFN => 971, 2;
    ALL => 8, 2;
    AMD => 51, 2;
    ANG => 532, 2;
    AOA => 973, 2;
    ARS => 32, 2;
    AUD => 36, 2;
    AWG => 533, 2;
    AZN => 944, 2;
    BAM => 977, 2;
    BBD => 52, 2;
    BDT => 50, 2;
    BGN => 975, 2;
    BHD => 48, 3;
    BIF => 108, 0;
    BMD => 60, 2;
    BND => 96, 2;
    BOB => 68, 2;
    BOV => 984, 2;
    BRL => 986, 2;
    BSD => 44, 2;
    BTN => 64, 2;
    BWP => 72, 2;
    BYN => 933, 2;
    BZD => 84, 2;
    CAD => 124, 2;
    CDF => 976, 2;
    CHE => 947, 2;
    CHF => 756, 2;
    CHW => 948, 2;
    CLF => 990, 4;
    CLP => 152, 0;
    CNY => 156, 2;
    COP => 170, 2;
    COU => 970, 2;
    CRC => 188, 2;
    CUP => 192, 2;
    CVE => 132, 2;
    CZK => 203, 2;
    DJF => 262, 0;
    DKK => 208, 2;
    DOP => 214, 2;
    DZD => 12, 2;
    EGP => 818, 2;
    ERN => 232, 2;
    ETB => 230, 2;
    EUR => 978, 2;
    FJD => 242, 2;
    FKP => 238, 2;
    GBP => 826, 2;
    GEL => 981, 2;
    GHS => 936, 2;
    GIP => 292, 2;
    GMD => 270, 2;
    GNF => 324, 0;
    GTQ => 320, 2;
    GYD => 328, 2;
    HKD => 344, 2;
    HNL => 340, 2;
    HTG => 332, 2;
    HUF => 348, 2;
    IDR => 360, 2;
    ILS => 376, 2;
    INR => 356, 2;
    IQD => 368, 3;
    IRR => 364, 2;
    ISK => 352, 0;
    JMD => 388, 2;
    JOD => 400, 3;
    JPY => 392, 0;
    KES => 404, 2;
    KGS => 417, 2;
    KHR => 116, 2;
    KMF => 174, 0;
    KPW => 408, 2;
    KRW => 410, 0;
    KWD => 414, 3;
    KYD => 136, 2;
    KZT => 398, 2;
    LAK => 418, 2;
    LBP => 422, 2;
    LKR => 144, 2;
    LRD => 430, 2;
    LSL => 426, 2;
    LYD => 434, 3;
    MAD => 504, 2;
    MDL => 498, 2;
    MGA => 969, 2;
    MKD => 807, 2;
    MMK => 104, 2;
    MNT => 496, 2;
    MOP => 446, 2;
    MRU => 929, 2;
    MUR => 480, 2;
    MVR => 462, 2;
    MWK => 454, 2;
    MXN => 484, 2;
    MXV => 979, 2;
    MYR => 458, 2;
    MZN => 943, 2;
    NAD => 516, 2;
    NGN => 566, 2;
    NIO => 558, 2;
    NOK => 578, 2;
    NPR => 524, 2;
    NZD => 554, 2;
    OMR => 512, 3;
    PAB => 590, 2;
    PEN => 604, 2;
    PGK => 598, 2;
    PHP => 608, 2;
    PKR => 586, 2;
    PLN => 985, 2;
    PYG => 600, 0;
    QAR => 634, 2;
    RON => 946, 2;
    RSD => 941, 2;
    RUB => 643, 2;
    RWF => 646, 0;
    SAR => 682, 2;
    SBD => 90, 2;
    SCR => 690, 2;
    SDG => 938, 2;
    SEK => 752, 2;
    SGD => 702, 2;
    SHP => 654, 2;
    SLE => 925, 2;
    SOS => 706, 2;
    SRD => 968, 2;
    SSP => 728, 2;
    STN => 930, 2;
    SVC => 222, 2;
    SYP => 760, 2;
    SZL => 748, 2;
    THB => 764, 2;
    TJS => 972, 2;
    TMT => 934, 2;
    TND => 788, 3;
    TOP => 776, 2;
    TRY => 949, 2;
    TTD => 780, 2;
    TWD => 901, 2;
    TZS => 834, 2;
    UAH => 980, 2;
    UGX => 800, 0;
    USD => 840, 2;
    USN => 997, 2;
    UYI => 940, 0;
    UYU => 858, 2;
    UYW => 927, 4;
    UZS => 860, 2;
    VED => 926, 2;
    VES => 928, 2;
    VND => 704, 0;
    VUV => 548, 0;
    WST => 882, 2;
    XAF => 950, 0;
    XCD => 951, 2;
    XOF => 952, 0;
    XPF => 953, 0;
    YER => 886, 2;
    ZAR => 710, 2;
    ZMW => 967, 2;
    ZWG => 924, 2;
}

impl CurrencyUnit {
    /// Looks up a currency by its alphabetic code, e.g. `"USD"`
    pub fn of(code: &str) -> Result<Self, MoneyError> {
        let code = code.trim();
        Self::VALUES
            .iter()
            .copied()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| MoneyError::UnknownCurrency(code.to_string()))
    }

    /// Looks up a currency by its numeric code, e.g. `840`
    pub fn of_numeric(numeric_code: i32) -> Result<Self, MoneyError> {
        Self::VALUES
            .iter()
            .copied()
            .find(|c| i32::from(c.numeric_code()) == numeric_code)
            .ok_or_else(|| MoneyError::UnknownCurrency(format!("{:03}", numeric_code)))
    }
}

impl fmt::Display for CurrencyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for CurrencyUnit {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::of(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_code_and_number() {
        assert_eq!(CurrencyUnit::of("usd").unwrap(), CurrencyUnit::USD);
        assert_eq!(CurrencyUnit::of_numeric(978).unwrap(), CurrencyUnit::EUR);
        assert_eq!(CurrencyUnit::of_numeric(36).unwrap(), CurrencyUnit::AUD);
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(
            CurrencyUnit::of("XXX"),
            Err(MoneyError::UnknownCurrency("XXX".to_string()))
        );
        assert_eq!(
            CurrencyUnit::of_numeric(1),
            Err(MoneyError::UnknownCurrency("001".to_string()))
        );
    }

    #[test]
    fn test_codes_are_unique() {
        for (i, a) in CurrencyUnit::VALUES.iter().enumerate() {
            for b in &CurrencyUnit::VALUES[i + 1..] {
                assert_ne!(a.code(), b.code());
                assert_ne!(a.numeric_code(), b.numeric_code());
            }
        }
    }

    #[test]
    fn test_decimal_places() {
        assert_eq!(CurrencyUnit::JPY.decimal_places(), 0);
        assert_eq!(CurrencyUnit::GBP.decimal_places(), 2);
        assert_eq!(CurrencyUnit::KWD.decimal_places(), 3);
        assert_eq!(CurrencyUnit::CLF.decimal_places(), 4);
    }

    #[test]
    fn test_less_common_codes() {
        assert_eq!(CurrencyUnit::of_numeric(985).unwrap(), CurrencyUnit::PLN);
        assert_eq!(CurrencyUnit::of_numeric(764).unwrap(), CurrencyUnit::THB);
        assert_eq!(CurrencyUnit::of("try").unwrap(), CurrencyUnit::TRY);
        assert_eq!(CurrencyUnit::of_numeric(8).unwrap().code(), "ALL");
        assert_eq!(CurrencyUnit::VND.decimal_places(), 0);
    }

    #[test]
    fn test_codes_are_sorted() {
        assert!(CurrencyUnit::VALUES.windows(2).all(|w| w[0].code() < w[1].code()));
        assert!(CurrencyUnit::VALUES.len() > 150);
    }
}
