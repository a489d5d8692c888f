//! Memoized plane meshes keyed by (resolution, size).

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::ocean::PlaneMesh;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct MeshKey {
    resolution: u32,
    size_bits: u32,
}

impl MeshKey {
    fn new(resolution: u32, size: f32) -> Self {
        Self {
            resolution,
            size_bits: size.to_bits(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

/// Shared geometry for tiles with identical resolution and size.
///
/// Generation happens under the cache lock, so concurrent first requests for
/// one key produce a single mesh.
#[derive(Debug, Default)]
pub struct MeshCache {
    entries: Mutex<HashMap<MeshKey, Arc<PlaneMesh>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl MeshCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_generate(&self, resolution: u32, size: f32) -> Arc<PlaneMesh> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let key = MeshKey::new(resolution, size);

        if let Some(mesh) = entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(mesh);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let mesh = Arc::new(PlaneMesh::generate(resolution, size));
        log::debug!(
            "generated {}x{} plane mesh ({} m, {} vertices)",
            resolution,
            resolution,
            size,
            mesh.vertices.len()
        );
        entries.insert(key, Arc::clone(&mesh));
        mesh
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    /// Release every cached mesh. Tiles still holding a mesh keep it alive.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
