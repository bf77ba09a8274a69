//! Interface naming: the externally visible name of a node's Nth link.

use std::fmt;
use std::num::NonZeroUsize;

use crate::kind::{Kind, NamingRule};

/// 1-based position of a link among the links incident to one node.
///
/// Zero is unrepresentable, so every naming rule is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ordinal(NonZeroUsize);

impl Ordinal {
    /// The first link on a node.
    pub const FIRST: Ordinal = Ordinal(NonZeroUsize::MIN);

    /// `None` for zero.
    pub fn new(n: usize) -> Option<Self> {
        NonZeroUsize::new(n).map(Self)
    }

    /// Ordinal of the next link on a node that already has `count` links.
    pub fn after(count: usize) -> Self {
        Self(NonZeroUsize::MIN.saturating_add(count))
    }

    /// The underlying 1-based value.
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl NamingRule {
    /// Render the interface name for `ordinal`.
    pub fn format(self, ordinal: Ordinal) -> String {
        let n = ordinal.get();
        match self {
            NamingRule::Eth => format!("eth{n}"),
            NamingRule::SlotPort => format!("ethernet-1/{n}"),
            NamingRule::ZeroBasedPort => format!("ge-0/0/{}", n - 1),
            NamingRule::Ether => format!("ether{n}"),
        }
    }
}

/// Interface name for the `ordinal`-th link of a node of `kind`.
pub fn interface_name(kind: &Kind, ordinal: Ordinal) -> String {
    kind.interface_rule().format(ordinal)
}
