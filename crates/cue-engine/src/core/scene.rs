use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::ball::Ball;
use crate::components::entity::Entity;

/// Simple entity storage using a flat Vec.
/// A table holds a handful of objects, so linear lookups are fine.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(32),
        }
    }

    /// Create a scene with a specific entity capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove an entity by ID. Returns the removed entity if found.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.swap_remove(idx))
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// The ball behind `id`, if the entity exists, is active and is a ball.
    pub fn ball(&self, id: EntityId) -> Option<&Ball> {
        self.get(id).filter(|e| e.active).and_then(Entity::ball)
    }

    pub fn ball_mut(&mut self, id: EntityId) -> Option<&mut Ball> {
        self.get_mut(id).filter(|e| e.active).and_then(Entity::ball_mut)
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Iterate over all entities mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Iterate over active balls with their IDs.
    pub fn balls(&self) -> impl Iterator<Item = (EntityId, &Ball)> {
        self.entities
            .iter()
            .filter(|e| e.active)
            .filter_map(|e| e.ball().map(|b| (e.id, b)))
    }

    /// Iterate over active balls mutably.
    pub fn balls_mut(&mut self) -> impl Iterator<Item = &mut Ball> {
        self.entities
            .iter_mut()
            .filter(|e| e.active)
            .filter_map(Entity::ball_mut)
    }

    /// First active ball whose centre is within `radius + threshold` of `pos`.
    pub fn find_ball_near(&self, pos: Vec2, threshold: f32) -> Option<EntityId> {
        self.balls()
            .find(|(_, ball)| ball.is_near(pos, threshold))
            .map(|(id, _)| id)
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    /// Number of active balls.
    pub fn ball_count(&self) -> usize {
        self.balls().count()
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Clear all entities.
    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Spot;

    fn ball_at(x: f32, y: f32, radius: f32) -> Ball {
        Ball::new(Vec2::new(x, y), radius, 1.0)
    }

    #[test]
    fn spawn_and_get_ball() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id, ball_at(10.0, 20.0, 5.0)));
        let ball = scene.ball(id).unwrap();
        assert_eq!(ball.pos, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn spot_is_not_a_ball() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1), Spot::new(Vec2::ZERO, 4.0)));
        assert!(scene.ball(EntityId(1)).is_none());
        assert_eq!(scene.ball_count(), 0);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn despawn_removes_entity() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id, ball_at(0.0, 0.0, 5.0)));
        assert!(scene.despawn(id).is_some());
        assert!(scene.is_empty());
        assert!(scene.despawn(id).is_none());
    }

    #[test]
    fn find_ball_near_uses_radius_plus_threshold() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1), Spot::new(Vec2::new(100.0, 100.0), 10.0)));
        scene.spawn(Entity::new(EntityId(2), ball_at(100.0, 100.0, 16.0)));

        assert_eq!(scene.find_ball_near(Vec2::new(130.0, 100.0), 20.0), Some(EntityId(2)));
        assert_eq!(scene.find_ball_near(Vec2::new(140.0, 100.0), 20.0), None);
    }

    #[test]
    fn inactive_balls_are_invisible_to_lookups() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1), ball_at(0.0, 0.0, 5.0)).with_active(false));
        assert!(scene.ball(EntityId(1)).is_none());
        assert_eq!(scene.find_ball_near(Vec2::ZERO, 1.0), None);
    }

    #[test]
    fn find_by_tag() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1), ball_at(0.0, 0.0, 5.0)).with_tag("cue"));
        scene.spawn(Entity::new(EntityId(2), Spot::new(Vec2::ZERO, 2.0)).with_tag("spot"));
        assert_eq!(scene.find_by_tag("spot").unwrap().id, EntityId(2));
    }
}
