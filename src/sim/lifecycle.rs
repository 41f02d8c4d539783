//! Round-scoped entity ownership
//!
//! The session owns at most one player paddle, one level container and one
//! ball. Despawning an absent entity is a no-op.

use super::level::{LevelDefinition, LevelInstance};
use super::state::{Ball, Paddle};

#[derive(Debug)]
pub struct RoundEntities {
    player: Option<Paddle>,
    level: Option<LevelInstance>,
    ball: Option<Ball>,
    /// Next entity ID
    next_id: u32,
}

impl Default for RoundEntities {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundEntities {
    pub fn new() -> Self {
        Self {
            player: None,
            level: None,
            ball: None,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn the player paddle, replacing any existing one
    pub fn spawn_player(&mut self) -> u32 {
        let id = self.next_entity_id();
        if let Some(old) = self.player.replace(Paddle::new(id)) {
            log::debug!("Player {} replaced by {}", old.id, id);
        }
        id
    }

    pub fn despawn_player(&mut self) -> bool {
        self.player.take().is_some()
    }

    /// Instantiate the level definition at `index`, replacing any live level
    pub fn spawn_level(&mut self, index: u32, definition: &LevelDefinition) {
        let mut next_id = self.next_id;
        let level = LevelInstance::spawn(index, definition, || {
            let id = next_id;
            next_id += 1;
            id
        });
        self.next_id = next_id;
        log::info!(
            "Level {} '{}' spawned with {} bricks",
            index + 1,
            level.name,
            level.child_count()
        );
        self.level = Some(level);
    }

    pub fn despawn_level(&mut self) -> bool {
        self.level.take().is_some()
    }

    /// Spawn a ball if none is live. Returns the live ball's id.
    pub fn spawn_ball(&mut self) -> u32 {
        if let Some(ball) = &self.ball {
            return ball.id;
        }
        let id = self.next_entity_id();
        self.ball = Some(Ball::new(id));
        id
    }

    pub fn despawn_ball(&mut self) -> bool {
        self.ball.take().is_some()
    }

    /// Destroy every round-scoped entity
    pub fn despawn_all(&mut self) {
        self.despawn_ball();
        self.despawn_level();
        self.despawn_player();
    }

    pub fn player(&self) -> Option<&Paddle> {
        self.player.as_ref()
    }

    pub fn level(&self) -> Option<&LevelInstance> {
        self.level.as_ref()
    }

    pub fn level_mut(&mut self) -> Option<&mut LevelInstance> {
        self.level.as_mut()
    }

    pub fn ball(&self) -> Option<&Ball> {
        self.ball.as_ref()
    }

    pub fn has_ball(&self) -> bool {
        self.ball.is_some()
    }

    /// A live level with no children left. Polled once per frame, so a
    /// clear is observed up to one frame after the last brick goes.
    pub fn level_cleared(&self) -> bool {
        self.level.as_ref().is_some_and(|l| l.child_count() == 0)
    }
}
