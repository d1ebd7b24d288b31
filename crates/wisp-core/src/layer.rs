//! Visibility layer bitmask

use serde::{Deserialize, Serialize};
use std::ops::BitOr;

/// Bitmask naming the visibility layer(s) an object occupies.
///
/// Only two bits carry meaning here: bit `1` separates the two floors, and
/// bit `2` is the "on top" bit an object shares with anything standing on
/// the stairs between them.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layer(pub u8);

impl Layer {
    /// Ground-level sentinel value
    pub const GROUND: Self = Self(1);
    /// Always-on-top bit
    pub const TOP: Self = Self(2);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether the top bit is set
    pub const fn is_top(self) -> bool {
        self.0 & Self::TOP.0 != 0
    }

    /// Layer equivalence: same floor bit, or both on top.
    pub const fn same_layer(self, other: Self) -> bool {
        (self.0 & 1) == (other.0 & 1) || (self.is_top() && other.is_top())
    }
}

impl BitOr for Layer {
    type Output = Self;
    fn bitor(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl From<u8> for Layer {
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}
