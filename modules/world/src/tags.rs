use inlinable_string::InlinableString;

use crate::utils::Component;
use crate::Entity;

/// Human readable names of entities, used for lookups and diagnostics.
pub struct Tags {
    names: Component<InlinableString>,
}

impl Default for Tags {
    fn default() -> Self {
        Tags::new()
    }
}

impl Tags {
    pub fn new() -> Self {
        Tags {
            names: Component::new(),
        }
    }

    #[inline]
    pub fn add<T: Into<InlinableString>>(&mut self, ent: Entity, name: T) {
        self.names.add(ent, name.into());
    }

    #[inline]
    pub fn remove(&mut self, ent: Entity) {
        self.names.remove(ent);
    }

    #[inline]
    pub fn name(&self, ent: Entity) -> Option<&str> {
        self.names.get(ent).map(|v| v.as_ref())
    }
}
