use std::any::{Any, TypeId};
use std::hash::{Hash, Hasher};

/// Marker for values that can be broadcast through a [`Dispatcher`](crate::Dispatcher).
///
/// Events are plain data carriers:
/// - **caller-owned** (the dispatcher only lends them to handlers)
/// - **routed by type**: every value of the same declared type reaches the same
///   handlers, regardless of its contents
///
/// No members are required. `event_type()` exists for diagnostics only.
pub trait Event: Any + Send + Sync {
    /// Human-readable event type name (used in trace output).
    fn event_type(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Registry key for an event type.
///
/// Equality and hashing use the `TypeId` only; the name is carried for logs.
#[derive(Debug, Copy, Clone)]
pub struct EventTypeId {
    id: TypeId,
    name: &'static str,
}

impl EventTypeId {
    pub fn of<E: Event>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: core::any::type_name::<E>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for EventTypeId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EventTypeId {}

impl Hash for EventTypeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl core::fmt::Display for EventTypeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Created;
    impl Event for Created {}

    struct Deleted;
    impl Event for Deleted {}

    #[test]
    fn same_type_maps_to_same_id() {
        assert_eq!(EventTypeId::of::<Created>(), EventTypeId::of::<Created>());
        assert_eq!(EventTypeId::of::<Created>().type_id(), TypeId::of::<Created>());
    }

    #[test]
    fn different_types_map_to_different_ids() {
        assert_ne!(EventTypeId::of::<Created>(), EventTypeId::of::<Deleted>());
        assert_ne!(
            EventTypeId::of::<Created>().type_id(),
            EventTypeId::of::<Deleted>().type_id()
        );
    }

    #[test]
    fn display_uses_type_name() {
        let id = EventTypeId::of::<Created>();
        assert!(id.to_string().ends_with("Created"));
        assert_eq!(Created.event_type(), id.name());
    }
}
