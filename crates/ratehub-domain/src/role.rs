//! The closed set of platform roles.

use serde::{Deserialize, Serialize};

/// Account role. Exactly one per user, fixed at creation.
///
/// Wire format: the variant name as a string (`"Admin"`, `"NormalUser"`,
/// `"StoreOwner"`); any other value is rejected at deserialization.
/// Storage format: `i16` via [`Role::from_i16`] / [`Role::as_i16`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin = 0,
    NormalUser = 1,
    StoreOwner = 2,
}

impl Role {
    /// Convert from the stored `i16` value. Returns `None` for unknown values.
    pub fn from_i16(v: i16) -> Option<Self> {
        match v {
            0 => Some(Self::Admin),
            1 => Some(Self::NormalUser),
            2 => Some(Self::StoreOwner),
            _ => None,
        }
    }

    /// Convert to the stored `i16` value.
    pub fn as_i16(self) -> i16 {
        self as i16
    }

    /// Parse the wire string form, the same closed set serde accepts.
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s {
            "Admin" => Some(Self::Admin),
            "NormalUser" => Some(Self::NormalUser),
            "StoreOwner" => Some(Self::StoreOwner),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::NormalUser => "NormalUser",
            Self::StoreOwner => "StoreOwner",
        }
    }
}
