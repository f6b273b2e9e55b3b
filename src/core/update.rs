use crate::core::{
    input::InputSource, level::LevelHost, physics::PhysicsWorld, render::Renderer,
};

/// Borrows every collaborator the controller talks to, for the duration of one tick.
pub struct UpdateContext<'a> {
    input: &'a dyn InputSource,
    physics: &'a mut dyn PhysicsWorld,
    level: &'a mut dyn LevelHost,
    renderer: &'a mut dyn Renderer,
}

impl<'a> UpdateContext<'a> {
    pub fn new(
        input: &'a dyn InputSource,
        physics: &'a mut dyn PhysicsWorld,
        level: &'a mut dyn LevelHost,
        renderer: &'a mut dyn Renderer,
    ) -> Self {
        Self {
            input,
            physics,
            level,
            renderer,
        }
    }

    pub fn input(&self) -> &dyn InputSource {
        self.input
    }
    pub fn physics(&mut self) -> &mut dyn PhysicsWorld {
        &mut *self.physics
    }
    pub fn level(&mut self) -> &mut dyn LevelHost {
        &mut *self.level
    }
    pub fn renderer(&mut self) -> &mut dyn Renderer {
        &mut *self.renderer
    }
}
