pub mod config;
pub mod coroutine;
pub mod input;
pub mod level;
pub mod physics;
pub mod prelude;
pub mod render;
pub mod update;

#[cfg(test)]
pub(crate) mod testing;
