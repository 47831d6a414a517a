//! Core engine types and utilities for the ethereal tree scene.
//!
//! This crate provides the foundational types shared by the generator and
//! the scene composer:
//! - Transform and spatial components
//! - Host-clock time tracking
//! - Per-frame callback scheduling
//! - Decorative ECS components

pub mod components;
pub mod frame;
pub mod time;
pub mod transform;

pub use components::*;
pub use frame::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use hecs::{Entity, World};
