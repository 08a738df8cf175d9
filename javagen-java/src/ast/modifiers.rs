//! Java modifiers.

use std::{fmt, ops::BitOr};

/// A set of Java modifiers, rendered in canonical order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JavaModifiers {
    bits: u8,
}

const ORDER: [(JavaModifiers, &str); 7] = [
    (JavaModifiers::PUBLIC, "public"),
    (JavaModifiers::PROTECTED, "protected"),
    (JavaModifiers::PRIVATE, "private"),
    (JavaModifiers::ABSTRACT, "abstract"),
    (JavaModifiers::DEFAULT, "default"),
    (JavaModifiers::STATIC, "static"),
    (JavaModifiers::FINAL, "final"),
];

impl JavaModifiers {
    pub const NONE: Self = Self { bits: 0 };
    pub const PUBLIC: Self = Self { bits: 1 };
    pub const PROTECTED: Self = Self { bits: 1 << 1 };
    pub const PRIVATE: Self = Self { bits: 1 << 2 };
    pub const ABSTRACT: Self = Self { bits: 1 << 3 };
    pub const DEFAULT: Self = Self { bits: 1 << 4 };
    pub const STATIC: Self = Self { bits: 1 << 5 };
    pub const FINAL: Self = Self { bits: 1 << 6 };

    pub const fn with(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    pub const fn contains(self, other: Self) -> bool {
        self.bits & other.bits == other.bits
    }

    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }
}

impl BitOr for JavaModifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.with(rhs)
    }
}

impl fmt::Display for JavaModifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words: Vec<&str> = ORDER
            .iter()
            .filter(|(m, _)| self.contains(*m))
            .map(|(_, word)| *word)
            .collect();
        f.write_str(&words.join(" "))
    }
}
