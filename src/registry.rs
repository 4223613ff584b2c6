use std::collections::BTreeMap;

use crate::{instantiator::BoxedCloneProducer, tag::TagId};

/// Binding table of a container: one producer per tag
#[derive(Default, Clone)]
pub(crate) struct Registry {
    producers: BTreeMap<TagId, BoxedCloneProducer>,
}

impl Registry {
    #[inline]
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self {
            producers: BTreeMap::new(),
        }
    }

    /// Binds the producer to the tag, returning the replaced one
    #[inline]
    pub(crate) fn insert(&mut self, tag_id: TagId, producer: BoxedCloneProducer) -> Option<BoxedCloneProducer> {
        self.producers.insert(tag_id, producer)
    }

    #[inline]
    #[must_use]
    pub(crate) fn get(&self, tag_id: &TagId) -> Option<BoxedCloneProducer> {
        self.producers.get(tag_id).cloned()
    }

    #[inline]
    #[must_use]
    pub(crate) fn contains(&self, tag_id: &TagId) -> bool {
        self.producers.contains_key(tag_id)
    }

    #[inline]
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.producers.len()
    }
}
