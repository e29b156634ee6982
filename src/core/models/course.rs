//! Course model

use serde::{Deserialize, Serialize};

/// Represents a training course in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course id used in store records and CLI arguments (e.g., "nr35")
    pub id: String,

    /// Course title (e.g., "NR-35 Trabalho em Altura")
    pub title: String,

    /// Short description shown in listings
    #[serde(default)]
    pub description: String,

    /// Price in whole reais
    #[serde(default)]
    pub price: u32,

    /// Display duration (e.g., "16 horas")
    #[serde(default)]
    pub duration: String,

    /// Points awarded when the course is completed
    #[serde(default)]
    pub points_reward: u32,

    /// Ordered module titles
    #[serde(default)]
    pub modules: Vec<String>,
}

impl Course {
    /// Create a new course with no modules
    ///
    /// # Arguments
    /// * `id` - Course id
    /// * `title` - Course title
    /// * `points_reward` - Points awarded on completion
    #[must_use]
    pub const fn new(id: String, title: String, points_reward: u32) -> Self {
        Self {
            id,
            title,
            description: String::new(),
            price: 0,
            duration: String::new(),
            points_reward,
            modules: Vec::new(),
        }
    }

    /// Add a module title, keeping the list free of duplicates
    pub fn add_module(&mut self, module: String) {
        if !self.modules.contains(&module) {
            self.modules.push(module);
        }
    }

    /// Number of modules in the course
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }
}
