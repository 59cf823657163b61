// SPDX-License-Identifier: MIT

//! Kitchen Hub: AI-assisted cooking and fitness tracking
//!
//! This crate provides the backend API for generating recipe and workout
//! suggestions with Gemini, saving favorites, and logging daily meals,
//! workouts, photos, and journal notes.

pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{CloudinaryClient, GeminiClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub ai: GeminiClient,
    pub images: CloudinaryClient,
}
