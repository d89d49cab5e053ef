use airsketch::input::SwipeDirection;
use airsketch_world::Entity;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::selection::Selection;
use crate::settings::ToolSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolMode {
    /// Holding draws points.
    Pen,
    /// Taps select structures, and holding moves the selection.
    Manipulator,
}

impl ToolMode {
    /// The other mode.
    #[inline]
    pub fn cycle(self) -> Self {
        match self {
            ToolMode::Pen => ToolMode::Manipulator,
            ToolMode::Manipulator => ToolMode::Pen,
        }
    }
}

/// The user's tool: its mode, the brush size, the cursor node floating in front of
/// the camera and the current selection.
#[derive(Debug)]
pub struct Tool {
    pub mode: ToolMode,
    pub distance_from_camera: f32,
    pub selection: Selection,

    size: f32,
    min_size: f32,
    max_size: f32,
    cursor: Entity,
}

impl Tool {
    pub fn new(cursor: Entity, settings: &ToolSettings) -> Self {
        Tool {
            mode: ToolMode::Pen,
            distance_from_camera: settings.distance_from_camera,
            selection: Selection::new(),
            size: settings.size,
            min_size: settings.min_size,
            max_size: settings.max_size,
            cursor,
        }
    }

    #[inline]
    pub fn cursor(&self) -> Entity {
        self.cursor
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Toggles the selection of `node`. Returns true if it is selected afterwards.
    pub fn update_selection(&mut self, node: Entity) -> bool {
        let selected = self.selection.toggle(node);
        debug!(
            "[Tool] {} {}, {} selected.",
            if selected { "selects" } else { "deselects" },
            node,
            self.selection.len()
        );
        selected
    }

    /// Horizontal swipes cycle the tool mode. Returns true if the mode changed.
    pub fn handle_swipe(&mut self, direction: SwipeDirection) -> bool {
        let mode = match direction {
            SwipeDirection::Left | SwipeDirection::Right => self.mode.cycle(),
            SwipeDirection::Up | SwipeDirection::Down => return false,
        };

        debug!("[Tool] switches from {:?} to {:?}.", self.mode, mode);
        self.mode = mode;
        true
    }

    /// Multiplies the brush size by `factor`, clamped to the configured range.
    pub fn scale_size(&mut self, factor: f32) -> f32 {
        self.size = (self.size * factor).max(self.min_size).min(self.max_size);
        self.size
    }
}
