//! Tunables of a sketch session, loaded from JSON.
//!
//! Every field has a default, so a partial document only overrides what it names:
//!
//! ```json
//! { "tool": { "size": 0.01 }, "marker": { "color": [1.0, 0.0, 0.0, 1.0] } }
//! ```

use std::fs;
use std::path::Path;

use airsketch::errors::Result;
use airsketch::utils::prelude::Color;
use log::info;
use serde::{Deserialize, Serialize};

use crate::errors::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Initial radius of the brush, which is also the radius of drawn points.
    pub size: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Standoff between the camera and the cursor, along the camera forward axis.
    pub distance_from_camera: f32,
    pub cursor_color: Color,
    pub point_color: Color,
}

impl Default for ToolSettings {
    fn default() -> Self {
        ToolSettings {
            size: 0.005,
            min_size: 0.001,
            max_size: 0.05,
            distance_from_camera: 0.2,
            cursor_color: Color::white(),
            point_color: Color::white(),
        }
    }
}

/// The shape put on the anchor of structures and drag holders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSettings {
    pub radius: f32,
    pub color: Color,
}

impl Default for MarkerSettings {
    fn default() -> Self {
        MarkerSettings {
            radius: 0.03,
            color: Color::blue(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchSettings {
    pub tool: ToolSettings,
    pub marker: MarkerSettings,
}

impl SketchSettings {
    /// Parses and validates settings from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: SketchSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads settings from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let settings = SketchSettings::from_json(&fs::read_to_string(path)?)?;
        info!("[SketchSettings] loads settings from {}.", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> ::std::result::Result<(), Error> {
        let tool = &self.tool;
        let finite = [
            tool.size,
            tool.min_size,
            tool.max_size,
            tool.distance_from_camera,
            self.marker.radius,
        ];

        if finite.iter().any(|v| !v.is_finite()) {
            return Err(invalid("every size and distance must be finite"));
        }

        if tool.min_size <= 0.0 || tool.min_size > tool.max_size {
            return Err(invalid(format!(
                "size range [{}, {}] is empty or not positive",
                tool.min_size, tool.max_size
            )));
        }

        if tool.size < tool.min_size || tool.size > tool.max_size {
            return Err(invalid(format!(
                "size {} is out of [{}, {}]",
                tool.size, tool.min_size, tool.max_size
            )));
        }

        if tool.distance_from_camera < 0.0 {
            return Err(invalid("distance from camera can not be negative"));
        }

        if self.marker.radius <= 0.0 {
            return Err(invalid("marker radius must be positive"));
        }

        Ok(())
    }
}

fn invalid<T: Into<String>>(reason: T) -> Error {
    Error::InvalidSettings(reason.into())
}
