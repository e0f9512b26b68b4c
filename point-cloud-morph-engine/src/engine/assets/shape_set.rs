use std::collections::HashMap;
use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::errors::MorphError;

/// Identifier of a target shape the cloud can morph into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeId {
    Cube,
    Sphere,
    Torus,
}

impl ShapeId {
    /// Round-robin order used by the auto-cycle policy.
    pub const ALL: [ShapeId; 3] = [ShapeId::Cube, ShapeId::Sphere, ShapeId::Torus];

    /// Convert string identifier to shape id for manifest and RPC compatibility.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cube" | "box" => Some(Self::Cube),
            "sphere" => Some(Self::Sphere),
            "torus" => Some(Self::Torus),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cube => "cube",
            Self::Sphere => "sphere",
            Self::Torus => "torus",
        }
    }

    /// Position in the round-robin order.
    pub fn order(&self) -> usize {
        match self {
            Self::Cube => 0,
            Self::Sphere => 1,
            Self::Torus => 2,
        }
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target vertex sequences keyed by shape. Sequences are immutable once stored.
#[derive(Debug, Clone, Default)]
pub struct ShapeSet {
    shapes: HashMap<ShapeId, Box<[Vec3]>>,
}

impl ShapeSet {
    /// Store the target sequence for `shape`.
    ///
    /// Returns `Ok(true)` when an earlier sequence for the same shape was
    /// replaced. Empty sequences are refused so every stored shape has at
    /// least one target vertex.
    pub fn insert(&mut self, shape: ShapeId, positions: Vec<Vec3>) -> Result<bool, MorphError> {
        if positions.is_empty() {
            return Err(MorphError::EmptyShape(shape));
        }
        Ok(self
            .shapes
            .insert(shape, positions.into_boxed_slice())
            .is_some())
    }

    pub fn get(&self, shape: ShapeId) -> Option<&[Vec3]> {
        self.shapes.get(&shape).map(|positions| &positions[..])
    }

    pub fn contains(&self, shape: ShapeId) -> bool {
        self.shapes.contains_key(&shape)
    }

    /// Registered shapes in round-robin order.
    pub fn ids(&self) -> Vec<ShapeId> {
        ShapeId::ALL
            .into_iter()
            .filter(|shape| self.contains(*shape))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_ids_parse_case_insensitively() {
        assert_eq!(ShapeId::from_string("Sphere"), Some(ShapeId::Sphere));
        assert_eq!(ShapeId::from_string(" torus "), Some(ShapeId::Torus));
        assert_eq!(ShapeId::from_string("box"), Some(ShapeId::Cube));
        assert_eq!(ShapeId::from_string("pyramid"), None);
    }

    #[test]
    fn shape_ids_serialise_lowercase() {
        let json = serde_json::to_string(&ShapeId::Torus).unwrap();
        assert_eq!(json, "\"torus\"");
        let parsed: ShapeId = serde_json::from_str("\"cube\"").unwrap();
        assert_eq!(parsed, ShapeId::Cube);
    }

    #[test]
    fn empty_sequences_are_refused() {
        let mut set = ShapeSet::default();
        assert_eq!(
            set.insert(ShapeId::Cube, Vec::new()),
            Err(MorphError::EmptyShape(ShapeId::Cube))
        );
        assert!(!set.contains(ShapeId::Cube));
    }

    #[test]
    fn second_insert_replaces_and_reports_it() {
        let mut set = ShapeSet::default();
        assert_eq!(set.insert(ShapeId::Sphere, vec![Vec3::X]), Ok(false));
        assert_eq!(set.insert(ShapeId::Sphere, vec![Vec3::Y, Vec3::Z]), Ok(true));
        assert_eq!(set.get(ShapeId::Sphere), Some(&[Vec3::Y, Vec3::Z][..]));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn ids_follow_round_robin_order() {
        let mut set = ShapeSet::default();
        set.insert(ShapeId::Torus, vec![Vec3::ONE]).unwrap();
        set.insert(ShapeId::Cube, vec![Vec3::ONE]).unwrap();
        assert_eq!(set.ids(), vec![ShapeId::Cube, ShapeId::Torus]);
    }
}
