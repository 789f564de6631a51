//! Demo systems driven by the frame loop
//!
//! Each system owns a [`SystemBase`](crate::ecs::SystemBase) holding its
//! required signature and matched entities. Processing follows the driving
//! loop contract: snapshot the matched list, then read components off the
//! registry.

pub mod movement;
pub mod render;

pub use movement::MovementSystem;
pub use render::RenderSystem;
