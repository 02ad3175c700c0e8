bitflags::bitflags! {
    /// The set of groups a particle belongs to.
    ///
    /// Bit 0 is the implicit group every particle is a member of. User-defined
    /// groups use the other bits, see [`GroupMask::group`].
    #[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
    #[repr(C)]
    pub struct GroupMask: u32 {
        const NONE = 0;
        const ALL = 1 << 0;
    }
}

impl GroupMask {
    /// The mask of the `index`-th group.
    ///
    /// Returns `None` if `index` does not fit in the mask.
    pub fn group(index: u32) -> Option<Self> {
        1u32.checked_shl(index).map(Self::from_bits_truncate)
    }
}

impl Default for GroupMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// What kind of entities a group is made of.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(C)]
pub enum GroupKind {
    Particles,
    Nodes,
    All,
}

impl GroupKind {
    pub fn contains_particles(self) -> bool {
        matches!(self, Self::Particles | Self::All)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Particles => "particles",
            Self::Nodes => "nodes",
            Self::All => "all",
        }
    }
}
