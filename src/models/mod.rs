// SPDX-License-Identifier: MIT

//! Data models for the application.
//!
//! All persisted documents and API bodies serialize as camelCase, matching
//! the JSON contract the web client speaks.

pub mod daily_log;
pub mod recipe;
pub mod social;
pub mod user;
pub mod workout;

pub use daily_log::{DailyLog, ImageEntry, ImageKind, MealEntry, MealSlot, WorkoutEntry};
pub use recipe::{Instructions, Recipe, RecipeCandidate};
pub use social::{Comment, Rating};
pub use user::{Height, User};
pub use workout::{Workout, WorkoutCandidate};
