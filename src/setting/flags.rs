//! Flags controlling setting comparison and serialization.

use bitflags::bitflags;

bitflags! {
    /// Selects which properties take part in a comparison and how floats match.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CompareFlags: u32 {
        /// Skip identity properties such as UUIDs and timestamps.
        const IGNORE_ID = 0x00000001;
        /// Skip secret properties.
        const IGNORE_SECRETS = 0x00000002;
        /// Compare floats without tolerance.
        const STRICT_NUMERIC = 0x00000004;
        /// Compare only what describes the network.
        const FUZZY = Self::IGNORE_ID.bits() | Self::IGNORE_SECRETS.bits();
    }

    /// Selects which properties are emitted into the generic map.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SerializeFlags: u32 {
        /// Leave out secret properties.
        const NO_SECRETS = 0x00000001;
    }
}

impl CompareFlags {
    /// Every property, floats within the default tolerance.
    pub const EXACT: Self = Self::empty();
}

impl SerializeFlags {
    /// Every non-default property, secrets included.
    pub const ALL: Self = Self::empty();
}
