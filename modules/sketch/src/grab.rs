//! Moves the selected structures as one rigid group.
//!
//! When a move gesture begins, every child of every selected structure is migrated
//! into a single drag holder anchored at the centroid of the selection, and the
//! emptied structures are removed. The holder then follows the cursor each frame.
//! On release the holder is baked into a new permanent structure, which takes its
//! place in the hierarchy and in the selection.

use airsketch::errors::Result;
use airsketch_world::prelude::{Entity, Transform};
use log::{debug, info, warn};
use smallvec::SmallVec;

use crate::kind::NodeKind;
use crate::session::StepContext;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrabState {
    Idle,
    Grouping { holder: Entity },
    /// The gesture began with nothing selected. It is ignored until released.
    Rejected,
}

impl Default for GrabState {
    fn default() -> Self {
        GrabState::Idle
    }
}

#[derive(Debug, Default)]
pub struct SelectionGrouper {
    state: GrabState,
}

impl SelectionGrouper {
    pub fn new() -> Self {
        SelectionGrouper::default()
    }

    #[inline]
    pub fn state(&self) -> GrabState {
        self.state
    }

    /// The drag holder of the ongoing move gesture, if any.
    #[inline]
    pub fn holder(&self) -> Option<Entity> {
        match self.state {
            GrabState::Grouping { holder } => Some(holder),
            _ => None,
        }
    }

    /// Advances the state machine by one frame, `active` being the current state of
    /// the move gesture.
    pub fn update(&mut self, active: bool, ctx: &mut StepContext) -> Result<()> {
        self.state = match (self.state, active) {
            (GrabState::Idle, false) => GrabState::Idle,
            (GrabState::Idle, true) => grab(ctx)?,

            (GrabState::Grouping { holder }, true) => {
                if ctx.scene.contains(holder) {
                    let cursor = ctx.cursor_transform()?;
                    ctx.scene.set_transform(holder, cursor)?;
                    GrabState::Grouping { holder }
                } else {
                    warn!("[SelectionGrouper] {} vanished during the move.", holder);
                    GrabState::Idle
                }
            }

            (GrabState::Grouping { holder }, false) => {
                if ctx.scene.contains(holder) {
                    debug!("[SelectionGrouper] releases {}.", holder);
                    ctx.tasks
                        .defer("release_holder", move |s| s.release_holder(holder));
                } else {
                    warn!("[SelectionGrouper] {} vanished during the move.", holder);
                }

                GrabState::Idle
            }

            (GrabState::Rejected, true) => GrabState::Rejected,
            (GrabState::Rejected, false) => GrabState::Idle,
        };

        Ok(())
    }
}

fn grab(ctx: &mut StepContext) -> Result<GrabState> {
    let structures: SmallVec<[Entity; 8]> = ctx
        .tool
        .selection
        .iter()
        .filter(|&v| ctx.kinds.is(v, NodeKind::Structure) && ctx.scene.contains(v))
        .collect();

    if structures.is_empty() {
        warn!("[SelectionGrouper] move gesture began without any selected structure.");
        return Ok(GrabState::Rejected);
    }

    let centroid = ctx.scene.centroid(&structures)?;
    let cursor = ctx.cursor_transform()?;

    let holder = ctx.spawn("holder", NodeKind::Holder)?;
    ctx.scene
        .set_transform(holder, Transform::new(centroid, cursor.rotation))?;
    ctx.add_marker(holder);

    info!(
        "[SelectionGrouper] grabs {} structures into {}.",
        structures.len(),
        holder
    );

    for structure in structures {
        ctx.tasks.defer("absorb_structure", move |s| {
            s.absorb_structure(structure, holder)
        });
    }

    ctx.tasks
        .defer("select_holder", move |s| s.select_holder(holder));

    Ok(GrabState::Grouping { holder })
}
