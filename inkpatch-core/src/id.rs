//! # IDs
//! Layers, documents, and history listeners are all named by an [`InkID<T>`], an ID which is unique
//! within this run of the program and namespaced by the marker type `T`.
//!
//! Get a fresh ID through `InkID::default()`. IDs are never reused, and carry no ordering guarantees.

// Next free ID per namespace. Namespaces are created lazily on first allocation.
static NEXT_IDS: parking_lot::RwLock<
    std::collections::BTreeMap<std::any::TypeId, std::sync::atomic::AtomicU64>,
> = parking_lot::const_rwlock(std::collections::BTreeMap::new());

/// Process-unique ID, namespaced by `T`.
/// IDs from different namespaces may share a numeric value, but can never be compared.
pub struct InkID<T: std::any::Any> {
    id: std::num::NonZeroU64,
    _namespace: std::marker::PhantomData<T>,
}
impl<T: std::any::Any> Clone for InkID<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T: std::any::Any> Copy for InkID<T> {}
impl<T: std::any::Any> PartialEq for InkID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl<T: std::any::Any> Eq for InkID<T> {}

// Safety - no `T` is ever stored, so `T`'s auto traits shouldn't leak onto the ID.
unsafe impl<T: std::any::Any> Send for InkID<T> {}
unsafe impl<T: std::any::Any> Sync for InkID<T> {}

impl<T: std::any::Any> std::hash::Hash for InkID<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T: std::any::Any> InkID<T> {
    /// Raw numeric value. Only meaningful alongside the namespace!
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id.get()
    }
    fn allocate() -> Self {
        let ty = std::any::TypeId::of::<T>();
        let read = NEXT_IDS.upgradable_read();
        let id = if let Some(next) = read.get(&ty) {
            next.fetch_add(1, std::sync::atomic::Ordering::Relaxed)
        } else {
            // First ID of this namespace. Rare, so take the exclusive lock only here.
            let mut write = parking_lot::RwLockUpgradableReadGuard::upgrade(read);
            write.insert(ty, 2.into());
            1
        };

        // Zero is only reachable by wrapping around after u64::MAX allocations.
        let Some(id) = std::num::NonZeroU64::new(id) else {
            #[cfg(not(test))]
            {
                log::error!("{} ID overflow! Aborting!", std::any::type_name::<T>());
                log::logger().flush();
                std::process::abort();
            }
            #[cfg(test)]
            {
                panic!("{} ID overflow! Aborting!", std::any::type_name::<T>())
            }
        };
        Self {
            id,
            _namespace: std::marker::PhantomData,
        }
    }
}
impl<T: std::any::Any> Default for InkID<T> {
    fn default() -> Self {
        Self::allocate()
    }
}
impl<T: std::any::Any> std::fmt::Display for InkID<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // rsplit always yields at least one item.
        let name = std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or_default();
        write!(f, "{name}#{}", self.id)
    }
}
impl<T: std::any::Any> std::fmt::Debug for InkID<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}
