//! Level definitions and live level containers
//!
//! A [`LevelSet`] is the ordered, finite list of level definitions loaded
//! from JSON. A [`LevelInstance`] is the spawned container that owns the
//! bricks of one level; it is cleared when its child count reaches zero.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Brick, BrickHit};
use crate::error::{GameError, Result};

/// Built-in level set shipped with the game
const BUILTIN_LEVELS: &str = include_str!("../../assets/levels.json");

fn default_hits() -> u8 {
    1
}

fn default_points() -> u32 {
    10
}

/// Brick placement inside a level definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickDef {
    pub pos: Vec2,
    #[serde(default = "default_hits")]
    pub hits: u8,
    #[serde(default = "default_points")]
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    pub bricks: Vec<BrickDef>,
}

/// Ordered level definitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelSet {
    levels: Vec<LevelDefinition>,
}

impl LevelSet {
    pub fn new(levels: Vec<LevelDefinition>) -> Result<Self> {
        let set = Self { levels };
        set.validate()?;
        Ok(set)
    }

    /// Parse a JSON array of level definitions
    pub fn from_json(json: &str) -> Result<Self> {
        let levels: Vec<LevelDefinition> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_LEVELS)
    }

    fn validate(&self) -> Result<()> {
        if self.levels.is_empty() {
            return Err(GameError::NoLevels);
        }
        for (index, level) in self.levels.iter().enumerate() {
            if level.bricks.is_empty() {
                return Err(GameError::EmptyLevel {
                    index,
                    name: level.name.clone(),
                });
            }
            if let Some(brick) = level.bricks.iter().position(|b| b.hits == 0) {
                return Err(GameError::InvalidBrick { index, brick });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LevelDefinition> {
        self.levels.get(index)
    }
}

/// A spawned level owning its bricks
#[derive(Debug, Clone)]
pub struct LevelInstance {
    /// Index into the level set this was spawned from
    pub index: u32,
    pub name: String,
    bricks: Vec<Brick>,
}

impl LevelInstance {
    /// Instantiate `definition`, drawing brick ids from `next_id`
    pub fn spawn(index: u32, definition: &LevelDefinition, mut next_id: impl FnMut() -> u32) -> Self {
        let bricks = definition
            .bricks
            .iter()
            .map(|def| Brick {
                id: next_id(),
                pos: def.pos,
                hits: def.hits,
                points: def.points,
            })
            .collect();
        Self {
            index,
            name: definition.name.clone(),
            bricks,
        }
    }

    /// Live bricks still attached to the container
    pub fn child_count(&self) -> usize {
        self.bricks.len()
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    /// Apply a hit to brick `id`. A destroyed brick is detached immediately.
    /// Returns None if no such brick is live.
    pub fn hit_brick(&mut self, id: u32) -> Option<BrickHit> {
        let pos = self.bricks.iter().position(|b| b.id == id)?;
        let hit = self.bricks[pos].hit();
        if matches!(hit, BrickHit::Destroyed { .. }) {
            self.bricks.remove(pos);
        }
        Some(hit)
    }
}
