//! Integral narrowing and floating-point to integral rounding.
//!
//! `narrow*` keep the low bits of their input and reinterpret them with the signedness of
//! the target type (`char` is the only unsigned one). Floating-point inputs first go
//! through the host's 32-bit integer conversion (NaN and infinities become 0, the value is
//! truncated and wrapped modulo 2^32), which is what the host does to a number before any
//! bitwise operation.
//!
//! `round_to_*` implement the source language's floating-point to integral conversion:
//! NaN becomes 0, out-of-range values saturate, everything else truncates toward zero.
//! Conversions to `byte`, `short` and `char` saturate to the `int` range first and then
//! narrow, so `(byte) 257.9 == 1`.

/// An integral or floating-point operand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Int(i64),
    Float(f64),
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Numeric::Int(value)
    }
}

impl From<i32> for Numeric {
    fn from(value: i32) -> Self {
        Numeric::Int(i64::from(value))
    }
}

impl From<i16> for Numeric {
    fn from(value: i16) -> Self {
        Numeric::Int(i64::from(value))
    }
}

impl From<u16> for Numeric {
    fn from(value: u16) -> Self {
        Numeric::Int(i64::from(value))
    }
}

impl From<i8> for Numeric {
    fn from(value: i8) -> Self {
        Numeric::Int(i64::from(value))
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Numeric::Float(value)
    }
}

impl From<f32> for Numeric {
    fn from(value: f32) -> Self {
        Numeric::Float(f64::from(value))
    }
}

/// Integral target types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegralKind {
    Byte,
    Short,
    Char,
    Int,
    Long,
}

impl IntegralKind {
    /// Signed kind of the given bit width.
    pub fn from_width(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(IntegralKind::Byte),
            16 => Some(IntegralKind::Short),
            32 => Some(IntegralKind::Int),
            64 => Some(IntegralKind::Long),
            _ => None,
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            IntegralKind::Byte => 8,
            IntegralKind::Short | IntegralKind::Char => 16,
            IntegralKind::Int => 32,
            IntegralKind::Long => 64,
        }
    }

    pub fn is_signed(self) -> bool {
        !matches!(self, IntegralKind::Char)
    }

    pub fn min_value(self) -> i64 {
        match self {
            IntegralKind::Byte => i64::from(i8::MIN),
            IntegralKind::Short => i64::from(i16::MIN),
            IntegralKind::Char => 0,
            IntegralKind::Int => i64::from(i32::MIN),
            IntegralKind::Long => i64::MIN,
        }
    }

    pub fn max_value(self) -> i64 {
        match self {
            IntegralKind::Byte => i64::from(i8::MAX),
            IntegralKind::Short => i64::from(i16::MAX),
            IntegralKind::Char => i64::from(u16::MAX),
            IntegralKind::Int => i64::from(i32::MAX),
            IntegralKind::Long => i64::MAX,
        }
    }
}

const TWO_POW_32: f64 = 4_294_967_296.0;
const TWO_POW_31: f64 = 2_147_483_648.0;
const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

/// The host's ToInt32: truncate, wrap modulo 2^32, reinterpret as signed.
pub fn to_int32(x: f64) -> i32 {
    if !x.is_finite() {
        return 0;
    }
    let wrapped = x.trunc().rem_euclid(TWO_POW_32);
    let signed = if wrapped >= TWO_POW_31 {
        wrapped - TWO_POW_32
    } else {
        wrapped
    };
    signed as i32
}

fn low_bits(x: Numeric) -> i64 {
    match x {
        Numeric::Int(v) => v,
        Numeric::Float(f) => i64::from(to_int32(f)),
    }
}

pub fn narrow8(x: impl Into<Numeric>) -> i8 {
    low_bits(x.into()) as i8
}

pub fn narrow16(x: impl Into<Numeric>) -> i16 {
    low_bits(x.into()) as i16
}

pub fn narrow_char(x: impl Into<Numeric>) -> u16 {
    low_bits(x.into()) as u16
}

pub fn narrow32(x: impl Into<Numeric>) -> i32 {
    low_bits(x.into()) as i32
}

/// Narrows `x` to `kind`, widened back to `i64` for uniform handling.
///
/// Floating-point inputs to the 8, 16 and 32 bit kinds wrap through [`to_int32`] like the
/// `narrow*` helpers. The host has no 64-bit integer conversion, so a float narrowed to
/// [`IntegralKind::Long`] takes the source-language conversion instead and saturates, as
/// [`round_to_long`] does.
pub fn narrow(x: impl Into<Numeric>, kind: IntegralKind) -> i64 {
    let x = x.into();
    match kind {
        IntegralKind::Byte => i64::from(narrow8(x)),
        IntegralKind::Short => i64::from(narrow16(x)),
        IntegralKind::Char => i64::from(narrow_char(x)),
        IntegralKind::Int => i64::from(narrow32(x)),
        IntegralKind::Long => match x {
            Numeric::Int(v) => v,
            Numeric::Float(f) => round_to_long(f),
        },
    }
}

fn toward_zero(x: f64) -> f64 {
    if x >= 0.0 {
        x.floor()
    } else {
        x.ceil()
    }
}

fn round_to_int_range(x: f64) -> i32 {
    if x.is_nan() {
        return 0;
    }
    if x >= f64::from(i32::MAX) {
        return i32::MAX;
    }
    if x <= f64::from(i32::MIN) {
        return i32::MIN;
    }
    toward_zero(x) as i32
}

/// Floating-point to integral conversion of the given kind.
pub fn round_to_integral(x: f64, kind: IntegralKind) -> i64 {
    match kind {
        IntegralKind::Long => round_to_long(x),
        IntegralKind::Int => i64::from(round_to_int_range(x)),
        narrower => narrow(round_to_int_range(x), narrower),
    }
}

pub fn round_to_byte(x: f64) -> i8 {
    narrow8(round_to_int_range(x))
}

pub fn round_to_short(x: f64) -> i16 {
    narrow16(round_to_int_range(x))
}

pub fn round_to_char(x: f64) -> u16 {
    narrow_char(round_to_int_range(x))
}

pub fn round_to_int(x: f64) -> i32 {
    round_to_int_range(x)
}

pub fn round_to_long(x: f64) -> i64 {
    if x.is_nan() {
        return 0;
    }
    if x >= TWO_POW_63 {
        return i64::MAX;
    }
    if x < -TWO_POW_63 {
        return i64::MIN;
    }
    toward_zero(x) as i64
}
