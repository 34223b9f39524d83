use std::fmt;

/// Where the surface lifecycle currently stands.
///
/// `Destroyed` is terminal.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum LifecyclePhase {
    #[default]
    Uninitialized,
    Active,
    Suspended,
    Destroyed,
}

impl LifecyclePhase {
    pub fn is_active(self) -> bool {
        self == Self::Active
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Destroyed
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
