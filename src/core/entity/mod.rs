//=========================================================================
// Entity System
//=========================================================================
//
// Base game object plus attachable behavior strategies.
//
// Architecture:
//   Entity
//     ├─ state: EntityState        (plain data, shared with behaviors)
//     ├─ graphics: Option<Box<dyn GraphicsComponent>>
//     ├─ physics:  Option<Box<dyn PhysicsComponent>>
//     └─ input:    Option<Box<dyn InputComponent>>
//
// Behaviors receive the shared context and the entity's data each
// frame; entities with partial capability sets (a drifting block has no
// input, a mine has no physics) simply leave slots empty.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::context::GameData;
use crate::core::math::{Rect, Vec2};
use crate::core::services::Tint;

//=== Module Declarations =================================================

pub mod block;
pub mod components;
pub mod enemy;
pub mod explosion;
pub mod mine;
pub mod pickup;
pub mod projectile;
pub mod ship;

//=== EntityState =========================================================

/// The mutable data every game object carries.
///
/// `frame` selects the current cell of an atlas-backed sprite; input
/// behaviors (turn animation) and timed animations both steer it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityState {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Radians, clockwise from sprite-up.
    pub rotation: f32,
    /// Bounding box dimensions.
    pub size: Vec2,
    pub health: i32,
    pub alive: bool,
    pub tint: Tint,
    /// Current atlas frame for indexed sprites.
    pub frame: u32,
}

impl EntityState {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            size,
            health: 1,
            alive: true,
            tint: Tint::WHITE,
            frame: 0,
        }
    }

    /// Bounding rectangle derived from position and size.
    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }
}

//=== Behavior Traits =====================================================

/// Renders an entity and may advance per-frame animation state.
pub trait GraphicsComponent {
    fn update(&mut self, _data: &mut GameData, _ent: &mut EntityState) {}

    fn draw(&mut self, data: &mut GameData, ent: &EntityState);
}

/// Integrates an entity's motion.
pub trait PhysicsComponent {
    fn update(&mut self, data: &mut GameData, ent: &mut EntityState);
}

/// Reacts to player controls.
pub trait InputComponent {
    fn update(&mut self, data: &mut GameData, ent: &mut EntityState);
}

//=== Entity ==============================================================

/// A simulated game object: data plus optional attached behaviors.
pub struct Entity {
    pub state: EntityState,
    pub graphics: Option<Box<dyn GraphicsComponent>>,
    pub physics: Option<Box<dyn PhysicsComponent>>,
    pub input: Option<Box<dyn InputComponent>>,
}

impl Entity {
    /// Creates an entity with every behavior slot empty.
    pub fn new(state: EntityState) -> Self {
        Self {
            state,
            graphics: None,
            physics: None,
            input: None,
        }
    }

    pub fn with_graphics(mut self, graphics: impl GraphicsComponent + 'static) -> Self {
        self.graphics = Some(Box::new(graphics));
        self
    }

    pub fn with_physics(mut self, physics: impl PhysicsComponent + 'static) -> Self {
        self.physics = Some(Box::new(physics));
        self
    }

    pub fn with_input(mut self, input: impl InputComponent + 'static) -> Self {
        self.input = Some(Box::new(input));
        self
    }

    //--- Frame Processing -------------------------------------------------

    /// Runs the attached behaviors for one frame: input, then physics,
    /// then graphics. Dead entities are skipped entirely.
    pub fn update(&mut self, data: &mut GameData) {
        if !self.state.alive {
            return;
        }

        if let Some(input) = self.input.as_mut() {
            input.update(data, &mut self.state);
        }
        if let Some(physics) = self.physics.as_mut() {
            physics.update(data, &mut self.state);
        }
        if let Some(graphics) = self.graphics.as_mut() {
            graphics.update(data, &mut self.state);
        }
    }

    /// Draws the entity via its graphics behavior. Dead entities are
    /// skipped entirely.
    pub fn draw(&mut self, data: &mut GameData) {
        if !self.state.alive {
            return;
        }

        if let Some(graphics) = self.graphics.as_mut() {
            graphics.draw(data, &self.state);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::test_data;

    struct CountingPhysics {
        calls: std::rc::Rc<std::cell::Cell<u32>>,
    }

    impl PhysicsComponent for CountingPhysics {
        fn update(&mut self, _data: &mut GameData, _ent: &mut EntityState) {
            self.calls.set(self.calls.get() + 1);
        }
    }

    #[test]
    fn dead_entity_is_not_updated() {
        let mut data = test_data();
        let calls = std::rc::Rc::new(std::cell::Cell::new(0));

        let state = EntityState::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let mut entity =
            Entity::new(state).with_physics(CountingPhysics { calls: calls.clone() });

        entity.update(&mut data);
        assert_eq!(calls.get(), 1);

        entity.state.alive = false;
        let before = entity.state;
        entity.update(&mut data);

        assert_eq!(calls.get(), 1, "dead entity must not run behaviors");
        assert_eq!(entity.state, before, "dead entity must not mutate");
    }

    struct ThrustInput;

    impl InputComponent for ThrustInput {
        fn update(&mut self, _data: &mut GameData, ent: &mut EntityState) {
            ent.velocity = Vec2::new(0.0, -3.0);
        }
    }

    struct EulerStep;

    impl PhysicsComponent for EulerStep {
        fn update(&mut self, _data: &mut GameData, ent: &mut EntityState) {
            ent.position = ent.position + ent.velocity;
        }
    }

    #[test]
    fn input_runs_before_physics_within_a_frame() {
        let mut data = test_data();
        let state = EntityState::new(Vec2::new(10.0, 10.0), Vec2::new(4.0, 4.0));
        let mut entity = Entity::new(state)
            .with_input(ThrustInput)
            .with_physics(EulerStep);

        entity.update(&mut data);

        // The velocity set by input is integrated in the same frame.
        assert_eq!(entity.state.position, Vec2::new(10.0, 7.0));
    }

    #[test]
    fn rect_tracks_position_and_size() {
        let state = EntityState::new(Vec2::new(5.0, 7.0), Vec2::new(20.0, 30.0));
        let rect = state.rect();

        assert_eq!(rect, Rect::new(5.0, 7.0, 20.0, 30.0));
        assert_eq!(state.center(), Vec2::new(15.0, 22.0));
    }
}
