// SPDX-License-Identifier: MIT
//! The term universe and its total order
//!
//! A [Term] is the only value type the rest of the crate ever operates on.
//! Terms are constructed exclusively through [admit], which deep-checks a
//! [RawTerm] coming from the host-runtime boundary and rejects anything
//! outside the admissible variant set. Once admitted, a
//! [Term] is immutable and totally ordered by [Term::cmp].

use num_bigint::BigInt;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::error::Error;


/// A value as it arrives from the host-runtime boundary, before admission
///
/// This is a strict superset of [Term]: it additionally carries the variants
/// the boundary must reject (floats, opaque runtime references, process/port
/// identifiers, function values). [admit] is the only way to turn a
/// `RawTerm` into a [Term].
#[derive(Debug, Clone, PartialEq)]
pub enum RawTerm {
    Integer(BigInt),
    Atom(Arc<str>),
    Bitstring(Vec<u8>),
    Tuple(Vec<RawTerm>),
    List(Vec<RawTerm>),

    /// Floating-point numbers are never admitted
    Float(f64),
    /// Opaque runtime references are never admitted
    Reference,
    /// Process identifiers are never admitted
    Pid,
    /// OS port handles are never admitted
    Port,
    /// Function values are never admitted
    Fun,
}

/// An admitted, immutable term drawn from the closed set of admissible variants
///
/// Terms compare via a fixed, total, inter-type order:
///
/// ```text
/// Integer < Atom < Bitstring < List < Tuple
/// ```
///
/// Within a type, integers compare numerically, atoms lexicographically by
/// name, and bitstrings/lists/tuples compare element-wise with a shorter
/// sequence sorting first on a full prefix tie. [Term] implements [Ord]
/// directly in terms of this rule rather than deriving it, since the
/// cross-type ranking does not match declaration order for every variant
/// layout we might otherwise be tempted to use.
#[derive(Debug, Clone)]
pub enum Term {
    Integer(BigInt),
    Atom(Arc<str>),
    Bitstring(Vec<u8>),
    List(Vec<Term>),
    Tuple(Vec<Term>),
}

impl Term {
    /// Rank used for the cross-type portion of the total order
    fn type_rank(&self) -> u8 {
        match self {
            Term::Integer(_) => 0,
            Term::Atom(_) => 1,
            Term::Bitstring(_) => 2,
            Term::List(_) => 3,
            Term::Tuple(_) => 4,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Integer(i) => write!(fmt, "{i}"),
            Term::Atom(a) => write!(fmt, ":{a}"),
            Term::Bitstring(b) => write!(fmt, "{b:?}"),
            Term::List(items) => {
                write!(fmt, "[")?;
                for (n, item) in items.iter().enumerate() {
                    if n > 0 {
                        write!(fmt, ", ")?;
                    }
                    write!(fmt, "{item}")?;
                }
                write!(fmt, "]")
            }
            Term::Tuple(items) => {
                write!(fmt, "{{")?;
                for (n, item) in items.iter().enumerate() {
                    if n > 0 {
                        write!(fmt, ", ")?;
                    }
                    write!(fmt, "{item}")?;
                }
                write!(fmt, "}}")
            }
        }
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        use Term::*;

        match (self, other) {
            (Integer(a), Integer(b)) => a.cmp(b),
            (Atom(a), Atom(b)) => a.cmp(b),
            (Bitstring(a), Bitstring(b)) => a.cmp(b),
            // Lists and Tuples both compare element-wise, with a full
            // prefix tie broken by length (shorter first). This is exactly
            // `Vec<T>`'s derived lexicographic `Ord`.
            (List(a), List(b)) => a.cmp(b),
            (Tuple(a), Tuple(b)) => a.cmp(b),
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for Term {}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

/// Deep-check and construct a [Term] from a [RawTerm]
///
/// Rejection is deep: a [RawTerm::Tuple] or [RawTerm::List] transitively
/// containing an inadmissible leaf is rejected as a whole, and no partial
/// [Term] is ever produced for it. This function has no side effects; it
/// runs before any mutation of a [crate::set::SortedSet] is attempted.
pub fn admit(raw: RawTerm) -> Result<Term, Error> {
    Ok(match raw {
        RawTerm::Integer(i) => Term::Integer(i),
        RawTerm::Atom(name) => Term::Atom(name),
        RawTerm::Bitstring(bytes) => Term::Bitstring(bytes),
        RawTerm::Tuple(items) => Term::Tuple(admit_all(items)?),
        RawTerm::List(items) => Term::List(admit_all(items)?),
        RawTerm::Float(_)
        | RawTerm::Reference
        | RawTerm::Pid
        | RawTerm::Port
        | RawTerm::Fun => return Err(Error::UnsupportedType),
    })
}

fn admit_all(raw: Vec<RawTerm>) -> Result<Vec<Term>, Error> {
    raw.into_iter().map(admit).collect()
}
