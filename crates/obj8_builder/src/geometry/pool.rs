//! Deduplicating vertex pools and the shared index buffer

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::vertex::PoolVertex;

/// Pool of unique vertex records
///
/// [`accumulate`](Self::accumulate) is the only mutator: it returns the index of
/// an identical record if one is already stored, otherwise it appends the record.
/// Indices are stable for the lifetime of the pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<V>", into = "Vec<V>")]
#[serde(bound(serialize = "V: Serialize", deserialize = "V: Deserialize<'de>"))]
pub struct VertexPool<V: PoolVertex> {
    records: Vec<V>,
    lookup: HashMap<V, u32>,
}

impl<V: PoolVertex> VertexPool<V> {
    /// Create an empty pool
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    /// Return the index of `record`, appending it if it is not stored yet
    pub fn accumulate(&mut self, record: V) -> u32 {
        let next = u32::try_from(self.records.len()).unwrap_or(u32::MAX);
        let records = &mut self.records;
        *self.lookup.entry(record).or_insert_with(|| {
            records.push(record);
            next
        })
    }

    /// Look up a stored record
    pub fn get(&self, index: u32) -> Option<&V> {
        self.records.get(index as usize)
    }

    /// All records in index order
    pub fn records(&self) -> &[V] {
        &self.records
    }

    /// Raw bytes of the pool, ready for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.records)
    }

    /// Number of unique records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the pool holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<V: PoolVertex> Default for VertexPool<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: PoolVertex> From<Vec<V>> for VertexPool<V> {
    fn from(records: Vec<V>) -> Self {
        let mut pool = Self::new();
        for record in records {
            pool.accumulate(record);
        }
        pool
    }
}

impl<V: PoolVertex> From<VertexPool<V>> for Vec<V> {
    fn from(pool: VertexPool<V>) -> Self {
        pool.records
    }
}

/// Append-only list of pool indices referenced by draw commands
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexBuffer {
    indices: Vec<u32>,
}

impl IndexBuffer {
    /// Create an empty index buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append indices and return the offset of the first one
    pub fn extend_from_slice(&mut self, indices: &[u32]) -> usize {
        let offset = self.indices.len();
        self.indices.extend_from_slice(indices);
        offset
    }

    /// All indices in order
    pub fn as_slice(&self) -> &[u32] {
        &self.indices
    }

    /// Number of indices
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the buffer holds no indices
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
