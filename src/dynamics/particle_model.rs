use crate::dynamics::models::{CoreDamageModel, ElasticProperties};
use rapier::data::{Arena, Index};

pub type ParticleModelHandle = Index;

/// The material shared by all the particles of a body.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ParticleModel {
    pub elastic: ElasticProperties,
    pub damage_model: Option<CoreDamageModel>,
}

impl ParticleModel {
    pub fn new(elastic: ElasticProperties) -> Self {
        Self {
            elastic,
            damage_model: None,
        }
    }

    pub fn with_damage(elastic: ElasticProperties, damage: impl Into<CoreDamageModel>) -> Self {
        Self {
            elastic,
            damage_model: Some(damage.into()),
        }
    }
}

#[derive(Clone, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ParticleModelSet {
    models: Arena<ParticleModel>,
}

impl ParticleModelSet {
    pub fn new() -> Self {
        Self {
            models: Arena::new(),
        }
    }

    pub fn insert(&mut self, model: ParticleModel) -> ParticleModelHandle {
        self.models.insert(model)
    }

    pub fn get(&self, handle: ParticleModelHandle) -> Option<&ParticleModel> {
        self.models.get(handle)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Index, &ParticleModel)> {
        self.models.iter()
    }
}

impl std::ops::Index<ParticleModelHandle> for ParticleModelSet {
    type Output = ParticleModel;

    #[inline]
    fn index(&self, i: ParticleModelHandle) -> &ParticleModel {
        &self.models[i]
    }
}

impl std::ops::IndexMut<ParticleModelHandle> for ParticleModelSet {
    #[inline]
    fn index_mut(&mut self, i: ParticleModelHandle) -> &mut ParticleModel {
        &mut self.models[i]
    }
}
