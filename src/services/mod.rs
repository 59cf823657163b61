// SPDX-License-Identifier: MIT

//! Services module - gateways and domain helpers.

pub mod cloudinary;
pub mod estimation;
pub mod generation;
pub mod gemini;
pub mod password;

pub use cloudinary::CloudinaryClient;
pub use gemini::GeminiClient;
