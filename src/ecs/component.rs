//! Component kinds and per-kind pools

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

/// Hard cap on distinct component kinds, matching the signature width.
pub const MAX_COMPONENT_KINDS: usize = 32;

/// Marker for attachable component payloads. Blanket-implemented: any
/// default-constructible value type qualifies, the core imposes nothing else.
pub trait Component: Default + Send + Sync + 'static {}

impl<T: Default + Send + Sync + 'static> Component for T {}

/// Small integer identity of a component kind, assigned on first use and
/// stable for the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentKindId(u8);

impl ComponentKindId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

struct KindTable {
    ids: HashMap<TypeId, ComponentKindId>,
}

fn kind_table() -> &'static Mutex<KindTable> {
    static TABLE: OnceLock<Mutex<KindTable>> = OnceLock::new();
    TABLE.get_or_init(|| {
        Mutex::new(KindTable {
            ids: HashMap::new(),
        })
    })
}

/// Resolve the process-wide id of a component kind, assigning the next free
/// id on first use. Ids are handed out in first-seen order and never reused.
///
/// Panics when a new kind would exceed [`MAX_COMPONENT_KINDS`]; that is a
/// configuration error, not a recoverable condition.
pub fn kind_id<T: Component>() -> ComponentKindId {
    let mut table = kind_table()
        .lock()
        .expect("component kind table poisoned");
    if let Some(id) = table.ids.get(&TypeId::of::<T>()) {
        return *id;
    }
    let next = table.ids.len();
    if next >= MAX_COMPONENT_KINDS {
        panic!(
            "component kind limit of {} exceeded by {}",
            MAX_COMPONENT_KINDS,
            type_name::<T>()
        );
    }
    let id = ComponentKindId(next as u8);
    table.ids.insert(TypeId::of::<T>(), id);
    id
}

/// Type-erased view of a pool, recovered through the kind id that keyed it.
pub(crate) trait ErasedPool: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Dense storage for one component kind, indexed by entity id.
///
/// Slots for entities that never had the component attached hold a default
/// value; presence is tracked by the entity signature, not by the pool.
/// The pool grows to fit and never shrinks on detach.
pub struct Pool<T: Component> {
    data: Vec<T>,
}

impl<T: Component> Pool<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn resize(&mut self, len: usize) {
        self.data.resize_with(len, T::default);
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn push(&mut self, value: T) {
        self.data.push(value);
    }

    /// Overwrite the slot at `index`. The slot must already exist; the
    /// registry grows the pool before calling this.
    pub fn set(&mut self, index: usize, value: T) {
        self.data[index] = value;
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.get_mut(index)
    }
}

impl<T: Component> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Component> ErasedPool for Pool<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
