//! Classical guards for conditional blocks.
//!
//! A [`Guard`] is an exact bit pattern: a mapping from classical bits to the
//! value each must hold. Multi-bit conditions are expressed directly as one
//! guard instead of a tower of single-bit conditions; nesting guarded blocks
//! is still supported and means the conjunction of all enclosing guards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::qubit::ClbitId;

/// A single `bit == value` requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// The classical bit being tested.
    pub clbit: ClbitId,
    /// Required value of the bit.
    pub value: bool,
}

/// An exact classical bit pattern.
///
/// The empty guard is always satisfied. Deserializing a requirement list
/// that asks for both values of one bit fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Requirement>", try_from = "Vec<Requirement>")]
pub struct Guard {
    bits: BTreeMap<ClbitId, bool>,
}

impl Guard {
    /// A guard with no requirements.
    pub fn always() -> Self {
        Self::default()
    }

    /// A single-bit guard.
    pub fn bit(clbit: ClbitId, value: bool) -> Self {
        Self::always().with(clbit, value)
    }

    /// Build a guard from `(bit, value)` pairs. A bit listed twice keeps its
    /// last value.
    pub fn pattern(pairs: impl IntoIterator<Item = (ClbitId, bool)>) -> Self {
        Self {
            bits: pairs.into_iter().collect(),
        }
    }

    /// Add (or replace) a requirement on `clbit`.
    #[must_use]
    pub fn with(mut self, clbit: ClbitId, value: bool) -> Self {
        self.bits.insert(clbit, value);
        self
    }

    /// Conjunction of two guards.
    ///
    /// Returns `None` when the guards require opposite values of the same
    /// bit, i.e. the conjunction can never hold.
    pub fn and(&self, other: &Guard) -> Option<Guard> {
        let mut bits = self.bits.clone();
        for (&clbit, &value) in &other.bits {
            match bits.insert(clbit, value) {
                Some(prev) if prev != value => return None,
                _ => {}
            }
        }
        Some(Self { bits })
    }

    /// Evaluate the guard against classical-bit values indexed by bit id.
    ///
    /// A required bit outside `values` never matches.
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        self.bits
            .iter()
            .all(|(clbit, &want)| values.get(clbit.0 as usize) == Some(&want))
    }

    /// The required value of `clbit`, if the guard constrains it.
    pub fn requirement(&self, clbit: ClbitId) -> Option<bool> {
        self.bits.get(&clbit).copied()
    }

    /// All requirements in bit order.
    pub fn requirements(&self) -> impl Iterator<Item = Requirement> + '_ {
        self.bits
            .iter()
            .map(|(&clbit, &value)| Requirement { clbit, value })
    }

    /// The bits this guard reads.
    pub fn clbits(&self) -> impl Iterator<Item = ClbitId> + '_ {
        self.bits.keys().copied()
    }

    /// Number of constrained bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if the guard has no requirements.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Check if every requirement asks for 0. Such a guard fires on the
    /// all-zero syndrome.
    pub fn is_all_zero(&self) -> bool {
        self.bits.values().all(|&v| !v)
    }
}

impl From<Guard> for Vec<Requirement> {
    fn from(guard: Guard) -> Self {
        guard.requirements().collect()
    }
}

impl TryFrom<Vec<Requirement>> for Guard {
    type Error = IrError;

    fn try_from(reqs: Vec<Requirement>) -> IrResult<Self> {
        reqs.into_iter().try_fold(Guard::always(), |guard, r| {
            guard
                .and(&Guard::bit(r.clbit, r.value))
                .ok_or(IrError::ConflictingGuard { clbit: r.clbit })
        })
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bits.is_empty() {
            return f.write_str("true");
        }
        for (i, (clbit, value)) in self.bits.iter().enumerate() {
            if i > 0 {
                f.write_str(" && ")?;
            }
            write!(f, "{clbit}=={}", u8::from(*value))?;
        }
        Ok(())
    }
}
