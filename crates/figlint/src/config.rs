//! Configuration types for figlint runs.
//!
//! This module provides configuration structures that control how figures
//! are checked and how feedback is requested. All types implement
//! [`serde::Deserialize`] and every field has a default, so a configuration
//! file only needs to name the values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`CheckConfig`] - Text metrics backend, tolerances and the figures directory.
//! - [`RulesConfig`] - Which supplementary rules run and their thresholds.
//! - [`FeedbackConfig`] - Model, endpoint and rendering options for feedback requests.
//!
//! # Example
//!
//! ```
//! # use figlint::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.check().overlap_tolerance(), 0.5);
//! assert!(config.rules().marker_segments());
//! assert!(!config.rules().line_spacing());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use figlint_core::{geometry::ContactTolerance, text::MetricsBackend};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Collision check section.
    #[serde(default)]
    check: CheckConfig,

    /// Rule selection section.
    #[serde(default)]
    rules: RulesConfig,

    /// Feedback client section.
    #[serde(default)]
    feedback: FeedbackConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(check: CheckConfig, rules: RulesConfig, feedback: FeedbackConfig) -> Self {
        Self {
            check,
            rules,
            feedback,
        }
    }

    /// Returns the check configuration.
    pub fn check(&self) -> &CheckConfig {
        &self.check
    }

    /// Returns the rule configuration.
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Returns the feedback configuration.
    pub fn feedback(&self) -> &FeedbackConfig {
        &self.feedback
    }
}

/// Geometry tolerances and inputs for collision checks.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Text measurement backend.
    metrics: MetricsBackend,

    /// Penetration depth, in user units, below which boxes do not overlap.
    overlap_tolerance: f32,

    /// Depth of the boundary band used when a line meets a box.
    touch_tolerance: f32,

    /// Distance from a box corner under which a line touches the corner.
    corner_tolerance: f32,

    /// Directory scanned for `*.svg` files when no input is given.
    figures_dir: PathBuf,
}

impl CheckConfig {
    pub fn metrics(&self) -> MetricsBackend {
        self.metrics
    }

    pub fn overlap_tolerance(&self) -> f32 {
        self.overlap_tolerance
    }

    /// Returns the line/box contact tolerances.
    pub fn contact(&self) -> ContactTolerance {
        ContactTolerance::new(self.touch_tolerance, self.corner_tolerance)
    }

    pub fn figures_dir(&self) -> &Path {
        &self.figures_dir
    }

    /// Returns a copy using the given metrics backend.
    pub fn with_metrics(mut self, metrics: MetricsBackend) -> Self {
        self.metrics = metrics;
        self
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        let contact = ContactTolerance::default();
        Self {
            metrics: MetricsBackend::default(),
            overlap_tolerance: 0.5,
            touch_tolerance: contact.touch(),
            corner_tolerance: contact.corner(),
            figures_dir: PathBuf::from("figures"),
        }
    }
}

/// Switches and thresholds for the supplementary rules.
///
/// The pairwise text/box/line rules always run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Flag lines too short to carry their arrowhead.
    marker_segments: bool,

    /// Flag lines that cross another line's arrowhead.
    marker_collisions: bool,

    /// Flag parallel lines drawn too close together.
    line_spacing: bool,

    /// Flag axis-aligned lines running too close to a box edge.
    edge_clearance: bool,

    /// Minimum line length, as a multiple of the marker width.
    marker_ratio: f32,

    /// Minimum clearance, as a multiple of the wider stroke width.
    clearance_factor: f32,
}

impl RulesConfig {
    pub fn marker_segments(&self) -> bool {
        self.marker_segments
    }

    pub fn marker_collisions(&self) -> bool {
        self.marker_collisions
    }

    pub fn line_spacing(&self) -> bool {
        self.line_spacing
    }

    pub fn edge_clearance(&self) -> bool {
        self.edge_clearance
    }

    pub fn marker_ratio(&self) -> f32 {
        self.marker_ratio
    }

    pub fn clearance_factor(&self) -> f32 {
        self.clearance_factor
    }

    /// Enables or disables the parallel line spacing rule.
    pub fn with_line_spacing(mut self, enabled: bool) -> Self {
        self.line_spacing = enabled;
        self
    }

    /// Enables or disables the box edge clearance rule.
    pub fn with_edge_clearance(mut self, enabled: bool) -> Self {
        self.edge_clearance = enabled;
        self
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            marker_segments: true,
            marker_collisions: true,
            line_spacing: false,
            edge_clearance: false,
            marker_ratio: 2.0,
            clearance_factor: 3.0,
        }
    }
}

/// Settings for the feedback client.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Model name used when none is given on the command line.
    model: String,

    /// Environment variable holding the API key.
    api_key_env: String,

    /// Base URL of the model API.
    endpoint: String,

    /// Instruction sent along with the image.
    prompt: String,

    /// Pixels per user unit in the rendered image.
    scale: f32,

    /// Request timeout in seconds.
    timeout_secs: u64,

    /// Keep the rendered PNG next to the input file.
    save_png: bool,
}

impl FeedbackConfig {
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn api_key_env(&self) -> &str {
        &self.api_key_env
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn save_png(&self) -> bool {
        self.save_png
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            model: "gemini-3-pro-preview".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            prompt: "Give me frank feedback on this technical drawing.".to_string(),
            scale: 2.0,
            timeout_secs: 120,
            save_png: true,
        }
    }
}
