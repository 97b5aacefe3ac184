//! Per-instance material cache.
//!
//! Every live shape owns one instanced material, keyed by the shape's id.
//! Callers go through `acquire`/`release`/`update_color`; the pool is never
//! mutated directly.

use std::collections::HashMap;

use log::debug;
use peniko::Color;

use crate::shapes::{ShapeId, ShapeKind};

/// Handle to an instanced material.
#[derive(Debug, Clone)]
pub struct MaterialHandle {
    pub kind: ShapeKind,
    pub color: Color,
}

/// Pool of per-owner instanced materials.
#[derive(Debug, Default)]
pub struct MaterialCache {
    materials: HashMap<ShapeId, MaterialHandle>,
}

impl MaterialCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get (or create) the material for `owner`.
    ///
    /// Idempotent per owner: repeated calls return the same handle.
    pub fn acquire(&mut self, kind: ShapeKind, owner: ShapeId) -> &MaterialHandle {
        self.materials.entry(owner).or_insert_with(|| {
            debug!("material cache: new instance for {owner} ({kind:?})");
            MaterialHandle {
                kind,
                color: Color::from_rgba8(255, 255, 255, 255),
            }
        })
    }

    /// Release the material owned by `owner`. Unknown owners are a no-op.
    pub fn release(&mut self, owner: ShapeId) {
        if self.materials.remove(&owner).is_some() {
            debug!("material cache: released instance for {owner}");
        }
    }

    /// Re-tint the material owned by `owner`. Unknown owners are a no-op.
    pub fn update_color(&mut self, owner: ShapeId, color: Color) {
        if let Some(handle) = self.materials.get_mut(&owner) {
            handle.color = color;
        }
    }

    /// Look up the material for `owner` without creating one.
    pub fn get(&self, owner: ShapeId) -> Option<&MaterialHandle> {
        self.materials.get(&owner)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
