//! # Amount Module
//!
//! This module defines the quantity carried by an ingredient component:
//! nothing at all, a single value, or a low/high range. Addition broadcasts
//! so that combining parsed lines never loses range information.

use std::ops::Add;

/// A parsed quantity: unspecified, a single value, or a range
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    /// No amount was stated ("bananer")
    Unspecified,
    /// One value ("2,45")
    Single(f64),
    /// Two values ("10-12"), kept in parse order
    Range(f64, f64),
}

impl Amount {
    /// True when no amount was stated
    pub fn is_unspecified(&self) -> bool {
        matches!(self, Amount::Unspecified)
    }

    /// The raw values in parse order (empty for unspecified)
    pub fn values(&self) -> Vec<f64> {
        match *self {
            Amount::Unspecified => Vec::new(),
            Amount::Single(v) => vec![v],
            Amount::Range(low, high) => vec![low, high],
        }
    }

    /// The values sorted ascending, the order display and rule selection use
    pub fn sorted_values(&self) -> Vec<f64> {
        let mut values = self.values();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        values
    }

    /// Largest value, `None` when unspecified
    pub fn max(&self) -> Option<f64> {
        match *self {
            Amount::Unspecified => None,
            Amount::Single(v) => Some(v),
            Amount::Range(low, high) => Some(low.max(high)),
        }
    }

    /// Sum of all values (0 when unspecified)
    pub fn sum(&self) -> f64 {
        self.values().iter().sum()
    }

    /// A copy with every value multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Amount {
        match *self {
            Amount::Unspecified => Amount::Unspecified,
            Amount::Single(v) => Amount::Single(v * factor),
            Amount::Range(low, high) => Amount::Range(low * factor, high * factor),
        }
    }
}

impl Add for Amount {
    type Output = Amount;

    /// Broadcasting addition: unspecified is neutral, a single value applies
    /// to both ends of a range, ranges add elementwise
    fn add(self, rhs: Amount) -> Amount {
        match (self, rhs) {
            (Amount::Unspecified, other) => other,
            (lhs, Amount::Unspecified) => lhs,
            (Amount::Single(a), Amount::Single(b)) => Amount::Single(a + b),
            (Amount::Single(a), Amount::Range(low, high)) => Amount::Range(a + low, a + high),
            (Amount::Range(low, high), Amount::Single(b)) => Amount::Range(low + b, high + b),
            (Amount::Range(a, b), Amount::Range(c, d)) => Amount::Range(a + c, b + d),
        }
    }
}
