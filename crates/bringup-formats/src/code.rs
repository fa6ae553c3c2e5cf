//! Closed enumerations decoded from small integer codes
//!
//! Firmware headers store enumerations as raw integers. Each enumeration is
//! declared with [`code_enum!`], which produces a `#[repr(u8)]` enum plus a
//! [`Code`] implementation; [`resolve`] turns a raw code into a variant or a
//! [`FormatError::UnknownVariant`] naming the enumeration and the code.

use crate::error::{FormatError, Result};
use std::fmt;

/// Enumeration a raw code is resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeDomain {
    /// DSP image section type
    SectionType,
    /// DSP image section load kind
    LoadKind,
    /// OEM-info store request operation
    StoreOperation,
}

impl fmt::Display for CodeDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SectionType => "section type",
            Self::LoadKind => "load kind",
            Self::StoreOperation => "store operation",
        })
    }
}

/// A closed enumeration backed by integer codes
pub trait Code: Sized + Copy {
    /// Domain reported when a code does not resolve
    const DOMAIN: CodeDomain;

    /// Look up the variant for `code`
    fn from_code(code: u32) -> Option<Self>;

    /// Raw code of this variant
    fn code(self) -> u32;

    /// Symbolic name used by the firmware headers
    fn name(self) -> &'static str;
}

/// Resolve a raw code into a variant of `T`
pub fn resolve<T: Code>(code: u32) -> Result<T> {
    T::from_code(code).ok_or(FormatError::UnknownVariant {
        domain: T::DOMAIN,
        code,
    })
}

/// Declare a code-backed enumeration
///
/// ```ignore
/// code_enum! {
///     /// Section type
///     pub enum SectionType in SectionType {
///         Code = 0 => "DSP_IMAGE_SEC_TYPE_CODE",
///         Data = 1 => "DSP_IMAGE_SEC_TYPE_DATA",
///     }
/// }
/// ```
macro_rules! code_enum {
    {
        $(#[$meta:meta])*
        $vis:vis enum $name:ident in $domain:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal => $label:literal),+ $(,)?
        }
    } => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        $vis enum $name {
            $($(#[$vmeta])* $variant = $value,)+
        }

        impl $crate::code::Code for $name {
            const DOMAIN: $crate::code::CodeDomain = $crate::code::CodeDomain::$domain;

            fn from_code(code: u32) -> Option<Self> {
                match code {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }

            fn code(self) -> u32 {
                self as u32
            }

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl TryFrom<u8> for $name {
            type Error = $crate::error::FormatError;

            fn try_from(code: u8) -> $crate::error::Result<Self> {
                $crate::code::resolve(u32::from(code))
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                value as u8
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::code::Code::name(*self))
            }
        }
    };
}
pub(crate) use code_enum;
