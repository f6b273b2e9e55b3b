use std::collections::BTreeMap;

use crate::core::prelude::*;

/// A body that does not move on its own: tests set its state directly and read back what the
/// controller did to it.
#[derive(Debug, Default)]
pub(crate) struct FakePhysics {
    pub grounded: bool,
    pub velocity: Vec2,
    pub position: Vec2,
    pub rotation: f32,
    pub forces: Vec<Vec2>,
    pub torques: Vec<f32>,
    pub velocity_writes: usize,
}

impl PhysicsWorld for FakePhysics {
    fn linecast(&self, _from: Vec2, _to: Vec2, mask: LayerMask) -> bool {
        self.grounded && mask.contains_layer(LayerMask::GROUND_LAYER)
    }
    fn velocity(&self) -> Vec2 {
        self.velocity
    }
    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
        self.velocity_writes += 1;
    }
    fn add_force(&mut self, force: Vec2) {
        self.forces.push(force);
    }
    fn add_torque(&mut self, torque: f32) {
        self.torques.push(torque);
    }
    fn position(&self) -> Vec2 {
        self.position
    }
    fn rotation_z(&self) -> f32 {
        self.rotation
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeInput {
    pub axis: f32,
    pub pressed: bool,
    pub held: bool,
}

impl InputSource for FakeInput {
    fn horizontal_axis(&self) -> f32 {
        self.axis
    }
    fn jump_pressed(&self) -> bool {
        self.pressed
    }
    fn jump_held(&self) -> bool {
        self.held
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeLevel {
    pub reloads: usize,
    pub loaded: Vec<String>,
    pub tag_counts: BTreeMap<String, usize>,
    pub flags: BTreeMap<String, i32>,
}

impl LevelHost for FakeLevel {
    fn reload_current_level(&mut self) {
        self.reloads += 1;
    }
    fn load_level(&mut self, name: &str) {
        self.loaded.push(name.to_string());
    }
    fn count_entities_tagged(&self, tag: &str) -> usize {
        self.tag_counts.get(tag).copied().unwrap_or(0)
    }
    fn persistent_flag(&self, key: &str) -> i32 {
        self.flags.get(key).copied().unwrap_or(0)
    }
    fn set_persistent_flag(&mut self, key: &str, value: i32) {
        self.flags.insert(key.to_string(), value);
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeRenderer {
    pub cosmetics: Vec<CosmeticState>,
    pub overlays: Vec<TextOverlay>,
    pub overlay_visible: bool,
}

impl Renderer for FakeRenderer {
    fn show_cosmetic(&mut self, state: CosmeticState) {
        self.cosmetics.push(state);
    }
    fn show_overlay(&mut self, overlay: &TextOverlay) {
        self.overlays.push(overlay.clone());
        self.overlay_visible = true;
    }
    fn hide_overlay(&mut self) {
        self.overlay_visible = false;
    }
}

#[derive(Debug, Default)]
pub(crate) struct Harness {
    pub physics: FakePhysics,
    pub input: FakeInput,
    pub level: FakeLevel,
    pub renderer: FakeRenderer,
}

impl Harness {
    pub fn ctx(&mut self) -> UpdateContext<'_> {
        UpdateContext::new(
            &self.input,
            &mut self.physics,
            &mut self.level,
            &mut self.renderer,
        )
    }
}
