use crate::dynamics::{Body, BodyHandle, BodySet, GroupKind, GroupMask};

/// The bodies a group spans.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum BodySelector {
    AllBodies,
    Body(BodyHandle),
}

/// A named subset of the simulation entities.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ParticleGroup {
    pub name: String,
    pub kind: GroupKind,
    pub bodies: BodySelector,
    pub mask: GroupMask,
}

impl ParticleGroup {
    /// The implicit group containing every particle of every body.
    pub fn all() -> Self {
        Self {
            name: "all".to_string(),
            kind: GroupKind::All,
            bodies: BodySelector::AllBodies,
            mask: GroupMask::ALL,
        }
    }

    pub fn particles(name: impl Into<String>, bodies: BodySelector, mask: GroupMask) -> Self {
        Self {
            name: name.into(),
            kind: GroupKind::Particles,
            bodies,
            mask,
        }
    }

    /// Does this group contain a particle with the given memberships?
    pub fn contains(&self, groups: GroupMask) -> bool {
        self.mask.intersects(groups)
    }

    /// Calls `f` on every body spanned by this group.
    pub fn for_each_body(
        &self,
        bodies: &BodySet,
        mut f: impl FnMut(BodyHandle, &Body) -> anyhow::Result<()>,
    ) -> anyhow::Result<()> {
        match self.bodies {
            BodySelector::AllBodies => {
                for (handle, body) in bodies.iter() {
                    f(handle, body)?;
                }
            }
            BodySelector::Body(handle) => {
                let body = bodies.get(handle).ok_or_else(|| {
                    anyhow::anyhow!("group {} refers to a body that doesn't exist", self.name)
                })?;
                f(handle, body)?;
            }
        }

        Ok(())
    }
}
