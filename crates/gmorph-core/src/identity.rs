#![forbid(unsafe_code)]

//! Node identity: stable token identifiers and access classifiers.
//!
//! A visual node is identified either by a [`TokenId`] tying it to a
//! persistent semantic entity, or, for synthetic grouping nodes, by an
//! [`AccessKind`] classifier. The distinction drives correspondence
//! matching between graph generations: token nodes persist by id,
//! access nodes persist by category.

use std::fmt;
use std::num::NonZeroU64;

/// Stable identifier of a semantic entity.
///
/// Token ids are globally unique and survive graph rebuilds, which is
/// what makes smooth move/resize transitions possible. The zero id is
/// unrepresentable; "node without a token" is `Option<TokenId>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenId(NonZeroU64);

impl TokenId {
    /// Create a token id from a raw value. Returns `None` for zero.
    #[inline]
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    /// The raw id value.
    #[inline]
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Classifier of a synthetic grouping node.
///
/// Access nodes have no semantic identity of their own; two access
/// nodes in corresponding sibling positions are "the same" exactly when
/// their kinds are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AccessKind {
    Public,
    Protected,
    Private,
    Default,
    TemplateParameter,
    TypeParameter,
}

impl AccessKind {
    /// Display label for the grouping header.
    pub fn label(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Default => "default",
            Self::TemplateParameter => "template parameter",
            Self::TypeParameter => "type parameter",
        }
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
