use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use lampshop_core::{Clock, DomainError, DomainResult, Entity, EntityId, SystemClock};
use tracing::debug;

/// Collection of one entity kind with store-assigned identifiers.
///
/// Reads may run concurrently; every write is exclusive against all other
/// operations on the same collection.
pub trait EntityStore<E: Entity>: Send + Sync {
    /// Snapshot of every record, in insertion order.
    fn list_all(&self) -> Vec<E>;

    fn get(&self, id: EntityId) -> DomainResult<E>;

    /// Assign `max(id) + 1` (or 1 when empty), stamp timestamps, append.
    fn create(&self, draft: E::Draft) -> E;

    /// Full replace of the mutable fields of `id`.
    fn update(&self, id: EntityId, draft: E::Draft) -> DomainResult<E>;

    fn delete(&self, id: EntityId) -> DomainResult<()>;

    /// Mutate `id` in place, then refresh its update timestamp.
    fn modify(&self, id: EntityId, f: &mut dyn FnMut(&mut E)) -> DomainResult<E>;
}

impl<E, S> EntityStore<E> for Arc<S>
where
    E: Entity,
    S: EntityStore<E> + ?Sized,
{
    fn list_all(&self) -> Vec<E> {
        (**self).list_all()
    }

    fn get(&self, id: EntityId) -> DomainResult<E> {
        (**self).get(id)
    }

    fn create(&self, draft: E::Draft) -> E {
        (**self).create(draft)
    }

    fn update(&self, id: EntityId, draft: E::Draft) -> DomainResult<E> {
        (**self).update(id, draft)
    }

    fn delete(&self, id: EntityId) -> DomainResult<()> {
        (**self).delete(id)
    }

    fn modify(&self, id: EntityId, f: &mut dyn FnMut(&mut E)) -> DomainResult<E> {
        (**self).modify(id, f)
    }
}

/// In-memory store: an ordered `Vec` behind one reader/writer lock.
///
/// Lookups are linear scans; collections are expected to stay small.
#[derive(Debug)]
pub struct InMemoryEntityStore<E, C = SystemClock> {
    inner: RwLock<Vec<E>>,
    clock: C,
}

impl<E> InMemoryEntityStore<E> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Start from existing records (e.g. demo data). New ids continue after
    /// the largest one present.
    pub fn with_entities(entities: Vec<E>) -> Self {
        Self {
            inner: RwLock::new(entities),
            clock: SystemClock,
        }
    }
}

impl<E> Default for InMemoryEntityStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, C> InMemoryEntityStore<E, C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
            clock,
        }
    }

    // A panic while holding the lock cannot leave the Vec half-written in a
    // way later operations depend on, so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, Vec<E>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<E>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl<E, C> EntityStore<E> for InMemoryEntityStore<E, C>
where
    E: Entity,
    C: Clock,
{
    fn list_all(&self) -> Vec<E> {
        self.read().clone()
    }

    fn get(&self, id: EntityId) -> DomainResult<E> {
        self.read()
            .iter()
            .find(|e| e.id() == id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(E::KIND, id))
    }

    fn create(&self, draft: E::Draft) -> E {
        // The max scan and the push share one write guard so two concurrent
        // creates can never observe the same maximum.
        let mut entities = self.write();
        let id = entities
            .iter()
            .map(|e| e.id())
            .max()
            .map_or(EntityId::FIRST, EntityId::next);

        let entity = E::create(id, draft, self.clock.now());
        entities.push(entity.clone());
        debug!(kind = E::KIND, %id, "created");
        entity
    }

    fn update(&self, id: EntityId, draft: E::Draft) -> DomainResult<E> {
        let mut entities = self.write();
        let entity = entities
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or_else(|| DomainError::not_found(E::KIND, id))?;

        entity.replace(draft, self.clock.now());
        debug!(kind = E::KIND, %id, "updated");
        Ok(entity.clone())
    }

    fn delete(&self, id: EntityId) -> DomainResult<()> {
        let mut entities = self.write();
        let idx = entities
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| DomainError::not_found(E::KIND, id))?;

        entities.remove(idx);
        debug!(kind = E::KIND, %id, "deleted");
        Ok(())
    }

    fn modify(&self, id: EntityId, f: &mut dyn FnMut(&mut E)) -> DomainResult<E> {
        let mut entities = self.write();
        let entity = entities
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or_else(|| DomainError::not_found(E::KIND, id))?;

        f(entity);
        entity.touch(self.clock.now());
        Ok(entity.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::thread;

    use chrono::{Duration, Utc};
    use lampshop_core::ManualClock;
    use lampshop_products::{Product, ProductDraft};
    use proptest::prelude::*;

    fn draft(sku: &str) -> ProductDraft {
        ProductDraft {
            sku: sku.to_string(),
            name: format!("{sku} name"),
            price: 500.0,
            stock_qty: 20,
            ..Default::default()
        }
    }

    fn manual_store() -> (InMemoryEntityStore<Product, Arc<ManualClock>>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        (InMemoryEntityStore::with_clock(clock.clone()), clock)
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let store = InMemoryEntityStore::<Product>::new();
        assert_eq!(store.create(draft("A")).id, EntityId::new(1));
        assert_eq!(store.create(draft("B")).id, EntityId::new(2));
        assert_eq!(store.create(draft("C")).id, EntityId::new(3));
    }

    #[test]
    fn create_then_get_round_trips() {
        let store = InMemoryEntityStore::<Product>::new();
        let created = store.create(draft("BULB-007"));
        let fetched = store.get(created.id).unwrap();

        assert_eq!(fetched, created);
        assert!(fetched.created_at <= fetched.updated_at);
        assert_eq!(fetched.to_draft(), draft("BULB-007"));
    }

    #[test]
    fn list_all_returns_a_detached_copy() {
        let store = InMemoryEntityStore::<Product>::new();
        store.create(draft("A"));

        let mut listed = store.list_all();
        listed[0].name = "mutated".to_string();
        listed.clear();

        assert_eq!(store.list_all().len(), 1);
        assert_eq!(store.list_all()[0].name, "A name");
    }

    #[test]
    fn update_replaces_fields_but_keeps_identity() {
        let (store, clock) = manual_store();
        let created = store.create(draft("A"));

        clock.advance(Duration::seconds(10));
        let updated = store.update(created.id, draft("Z")).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.updated_at, created.created_at + Duration::seconds(10));
        assert_eq!(updated.sku, "Z");
        assert_eq!(store.get(created.id).unwrap(), updated);
    }

    #[test]
    fn missing_ids_fail_without_mutation() {
        let store = InMemoryEntityStore::<Product>::new();
        store.create(draft("A"));
        let before = store.list_all();
        let missing = EntityId::new(42);

        assert!(store.get(missing).unwrap_err().is_not_found());
        assert!(store.update(missing, draft("X")).unwrap_err().is_not_found());
        assert!(store.delete(missing).unwrap_err().is_not_found());
        assert!(store.modify(missing, &mut |p: &mut Product| p.stock_qty = 0).unwrap_err().is_not_found());

        assert_eq!(store.list_all(), before);
    }

    #[test]
    fn delete_scenario_keeps_remaining_product() {
        let store = InMemoryEntityStore::<Product>::new();
        assert_eq!(store.create(draft("BULB-007")).id, EntityId::new(1));
        assert_eq!(store.create(draft("BULB-009")).id, EntityId::new(2));

        store.delete(EntityId::new(1)).unwrap();

        assert!(store.get(EntityId::new(1)).unwrap_err().is_not_found());
        let remaining = store.list_all();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, EntityId::new(2));
    }

    #[test]
    fn deleting_the_max_id_lets_it_be_reassigned() {
        let store = InMemoryEntityStore::<Product>::new();
        store.create(draft("A"));
        let b = store.create(draft("B"));
        store.delete(b.id).unwrap();

        assert_eq!(store.create(draft("C")).id, b.id);
    }

    #[test]
    fn seeded_store_continues_after_largest_id() {
        let seeded = Product::create(EntityId::new(7), draft("SEED"), Utc::now());
        let store = InMemoryEntityStore::with_entities(vec![seeded]);
        assert_eq!(store.create(draft("A")).id, EntityId::new(8));
    }

    #[test]
    fn modify_touches_updated_at() {
        let (store, clock) = manual_store();
        let created = store.create(draft("A"));

        clock.advance(Duration::milliseconds(5));
        let modified = store.modify(created.id, &mut |p: &mut Product| p.stock_qty -= 1).unwrap();

        assert_eq!(modified.stock_qty, 19);
        assert!(modified.updated_at > modified.created_at);
    }

    #[test]
    fn concurrent_creates_get_distinct_contiguous_ids() {
        const THREADS: usize = 16;
        const PER_THREAD: usize = 25;

        let store = Arc::new(InMemoryEntityStore::<Product>::new());
        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let store = store.clone();
                thread::spawn(move || {
                    (0..PER_THREAD)
                        .map(|i| store.create(draft(&format!("T{t}-{i}"))).id.get())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids = Vec::new();
        for h in handles {
            ids.extend(h.join().unwrap());
        }

        let total = (THREADS * PER_THREAD) as i64;
        let unique: BTreeSet<i64> = ids.iter().copied().collect();
        assert_eq!(ids.len() as i64, total);
        assert_eq!(unique, (1..=total).collect::<BTreeSet<_>>());
    }

    #[test]
    fn readers_never_observe_partial_state() {
        let store = Arc::new(InMemoryEntityStore::<Product>::new());

        let writer = {
            let store = store.clone();
            thread::spawn(move || {
                for i in 0..200 {
                    store.create(draft(&format!("SKU-{i}")));
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    let mut last_len = 0;
                    for _ in 0..200 {
                        let snapshot = store.list_all();
                        // Snapshots only grow, and ids are exactly 1..=len.
                        assert!(snapshot.len() >= last_len);
                        for (idx, p) in snapshot.iter().enumerate() {
                            assert_eq!(p.id.get(), idx as i64 + 1);
                            assert_eq!(p.sku, format!("SKU-{idx}"));
                        }
                        last_len = snapshot.len();
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for r in readers {
            r.join().unwrap();
        }
        assert_eq!(store.list_all().len(), 200);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Create,
        Delete(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => Just(Op::Create),
            1 => (0usize..64).prop_map(Op::Delete),
        ]
    }

    proptest! {
        #[test]
        fn live_ids_stay_unique_and_create_returns_max_plus_one(ops in proptest::collection::vec(op(), 1..80)) {
            let store = InMemoryEntityStore::<Product>::new();
            for op in ops {
                let live: Vec<EntityId> = store.list_all().iter().map(|p| p.id).collect();
                match op {
                    Op::Create => {
                        let expected = live.iter().copied().max().map_or(EntityId::FIRST, EntityId::next);
                        prop_assert_eq!(store.create(draft("P")).id, expected);
                    }
                    Op::Delete(pick) => {
                        if !live.is_empty() {
                            store.delete(live[pick % live.len()]).unwrap();
                        }
                    }
                }
                let ids: Vec<EntityId> = store.list_all().iter().map(|p| p.id).collect();
                let unique: BTreeSet<EntityId> = ids.iter().copied().collect();
                prop_assert_eq!(unique.len(), ids.len());
            }
        }
    }
}
