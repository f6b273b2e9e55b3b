/// The scene host: level loading, level queries, and persistent flags.
pub trait LevelHost {
    /// Tears down and reloads the current level. The host drops the current controller and
    /// spawns a fresh one.
    fn reload_current_level(&mut self);
    fn load_level(&mut self, name: &str);

    /// Number of entities in the loaded level carrying `tag`.
    fn count_entities_tagged(&self, tag: &str) -> usize;

    /// Process-wide persistent integer flag. Unset keys read as 0.
    fn persistent_flag(&self, key: &str) -> i32;
    fn set_persistent_flag(&mut self, key: &str, value: i32);
}
