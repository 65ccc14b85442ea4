//! # Typed Format Arguments
//!
//! `printk` takes its arguments as a slice of [`Arg`].
//! The conversion in the format string decides how an argument is
//! rendered; integer arguments are reinterpreted at the width the length
//! modifier selects.

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Arg<'a> {
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    /// `None` renders as `(null)` under `%s`.
    Str(Option<&'a str>),
    /// Address, as passed for `%p`.
    Ptr(usize),
    /// Single byte, as passed for `%c`.
    Char(u8),
}

impl Arg<'_> {
    /// Integer value as a sign-extended 64-bit pattern; `None` for strings.
    #[must_use]
    pub fn bits(self) -> Option<u64> {
        match self {
            Self::I32(v) => Some(i64::from(v).cast_unsigned()),
            Self::I64(v) => Some(v.cast_unsigned()),
            Self::U32(v) => Some(u64::from(v)),
            Self::U64(v) => Some(v),
            Self::Ptr(v) => Some(v as u64),
            Self::Char(v) => Some(u64::from(v)),
            Self::Str(_) => None,
        }
    }
}

macro_rules! arg_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Arg<'_> {
                #[inline]
                fn from(value: $source) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

arg_from!(I32 as i32: i8, i16, i32);
arg_from!(I64 as i64: i64);
arg_from!(U32 as u32: u16, u32);
arg_from!(U64 as u64: u64);
arg_from!(Char as u8: u8);

impl From<isize> for Arg<'_> {
    #[inline]
    fn from(value: isize) -> Self {
        Self::I64(value as i64)
    }
}

impl From<usize> for Arg<'_> {
    #[inline]
    fn from(value: usize) -> Self {
        Self::U64(value as u64)
    }
}

impl From<char> for Arg<'_> {
    /// Non-ASCII characters become `?`.
    #[inline]
    fn from(value: char) -> Self {
        Self::Char(u8::try_from(value).ok().filter(u8::is_ascii).unwrap_or(b'?'))
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    #[inline]
    fn from(value: &'a str) -> Self {
        Self::Str(Some(value))
    }
}

impl<'a> From<Option<&'a str>> for Arg<'a> {
    #[inline]
    fn from(value: Option<&'a str>) -> Self {
        Self::Str(value)
    }
}

impl<T> From<*const T> for Arg<'_> {
    #[inline]
    fn from(value: *const T) -> Self {
        Self::Ptr(value.addr())
    }
}

impl<T> From<*mut T> for Arg<'_> {
    #[inline]
    fn from(value: *mut T) -> Self {
        Self::Ptr(value.addr())
    }
}
