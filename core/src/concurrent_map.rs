//! Sharded map for accumulating values from several threads at once.
//!
//! Keys are spread over a fixed number of shards by `key mod shard_count`.
//! Each shard has its own mutex. An operation locks exactly one shard, so
//! operations are linearizable per shard only. Nothing locks the whole map.
//! Snapshots lock and copy one shard at a time, so a snapshot taken while
//! another thread writes may mix states from different instants across shards.
//! Within a shard it is always consistent.

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use std::collections::BTreeMap;

/// Integer key that selects its shard by modulo.
pub trait ShardKey: Copy + Ord {
    fn shard(&self, shard_count: usize) -> usize;
}

macro_rules! impl_shard_key {
    ($($t:ty),*) => {
        $(impl ShardKey for $t {
            fn shard(&self, shard_count: usize) -> usize {
                (*self as i128).rem_euclid(shard_count as i128) as usize
            }
        })*
    };
}

impl_shard_key!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

pub struct ConcurrentMap<K, V> {
    shards: Vec<Mutex<BTreeMap<K, V>>>,
}

impl<K: ShardKey, V> ConcurrentMap<K, V> {
    /// A zero shard count is raised to one.
    pub fn new(shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1)).map(|_| Mutex::new(BTreeMap::new())).collect();
        Self { shards }
    }

    pub fn shard_count(&self) -> usize { self.shards.len() }

    fn shard(&self, key: K) -> &Mutex<BTreeMap<K, V>> {
        &self.shards[key.shard(self.shards.len())]
    }

    /// Locked access to the value under `key`, inserting `V::default()` if absent.
    /// The shard stays locked until the guard is dropped.
    pub fn access(&self, key: K) -> MappedMutexGuard<'_, V>
    where
        V: Default,
    {
        MutexGuard::map(self.shard(key).lock(), |shard| shard.entry(key).or_default())
    }

    /// Locked access to the value under `key` if present.
    pub fn access_existing(&self, key: K) -> Option<MappedMutexGuard<'_, V>> {
        MutexGuard::try_map(self.shard(key).lock(), |shard| shard.get_mut(&key)).ok()
    }

    pub fn get(&self, key: K) -> Option<V>
    where
        V: Clone,
    {
        self.shard(key).lock().get(&key).cloned()
    }

    pub fn erase(&self, key: K) -> Option<V> {
        self.shard(key).lock().remove(&key)
    }

    /// Copy of the whole map, consistent per shard.
    pub fn build_ordinary_map(&self) -> BTreeMap<K, V>
    where
        V: Clone,
    {
        let mut out = BTreeMap::new();
        for shard in &self.shards {
            let guard = shard.lock();
            out.extend(guard.iter().map(|(k, v)| (*k, v.clone())));
        }
        out
    }

    /// Same as [`Self::build_ordinary_map`] but as (key, value) pairs in shard order.
    pub fn build_pairs(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        let mut out = Vec::new();
        for shard in &self.shards {
            let guard = shard.lock();
            out.extend(guard.iter().map(|(k, v)| (*k, v.clone())));
        }
        out
    }

    /// Merge all shards without copying. Exclusive ownership makes this a single instant.
    pub fn into_ordinary_map(self) -> BTreeMap<K, V> {
        let mut out = BTreeMap::new();
        for shard in self.shards {
            out.append(&mut shard.into_inner());
        }
        out
    }

    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|s| s.lock().is_empty())
    }
}
