//! Activation costs.
//!
//! An activated ability's cost clause is a conjunction of atomic costs, all of
//! which must be paid. Costs that describe another object ("Banish one of your
//! items", "Choose and discard a song card") keep the printed descriptor so the
//! rules engine can resolve it against live state.

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum CostKind {
    /// Exert the source ({E})
    ExertSelf,
    /// Pay N ink
    PayInk,
    /// Discard cards matching the descriptor
    Discard,
    /// Banish the source
    BanishSelf,
    /// Exert other objects matching the descriptor
    ExertOther,
    /// Banish other objects matching the descriptor
    BanishOther,
    /// Unrecognized cost atom, kept verbatim
    Custom,
}

/// An atomic precondition of an activated ability.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Cost {
    pub kind: CostKind,
    pub amount: Option<u32>,
    pub descriptor: Option<String>,
}

impl Cost {
    pub fn exert_self() -> Self {
        Self {
            kind: CostKind::ExertSelf,
            amount: None,
            descriptor: None,
        }
    }

    pub fn pay_ink(amount: u32) -> Self {
        Self {
            kind: CostKind::PayInk,
            amount: Some(amount),
            descriptor: None,
        }
    }

    pub fn banish_self() -> Self {
        Self {
            kind: CostKind::BanishSelf,
            amount: None,
            descriptor: None,
        }
    }

    pub fn discard(amount: u32, descriptor: impl Into<String>) -> Self {
        Self {
            kind: CostKind::Discard,
            amount: Some(amount),
            descriptor: Some(descriptor.into()),
        }
    }

    pub fn exert_other(amount: u32, descriptor: impl Into<String>) -> Self {
        Self {
            kind: CostKind::ExertOther,
            amount: Some(amount),
            descriptor: Some(descriptor.into()),
        }
    }

    pub fn banish_other(amount: u32, descriptor: impl Into<String>) -> Self {
        Self {
            kind: CostKind::BanishOther,
            amount: Some(amount),
            descriptor: Some(descriptor.into()),
        }
    }

    /// A cost atom the parser could not decompose.
    pub fn custom(text: impl Into<String>) -> Self {
        Self {
            kind: CostKind::Custom,
            amount: None,
            descriptor: Some(text.into()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.kind == CostKind::Custom
    }
}
