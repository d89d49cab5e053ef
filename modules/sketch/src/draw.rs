//! Turns a held draw gesture into a structure of points.
//!
//! While the gesture is held, one point is dropped at the cursor every frame, under a
//! scratch node. On release the points are committed into a new structure anchored at
//! their centroid. The migration of points changes the hierarchy, so it is deferred
//! until the current frame has been traversed.

use airsketch::errors::Result;
use airsketch_world::prelude::{Entity, Shape, ShapeRenderer, Transform};
use log::{debug, info, warn};

use crate::kind::NodeKind;
use crate::session::StepContext;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawState {
    Idle,
    Accumulating {
        scratch: Entity,
        points: Vec<Entity>,
    },
}

impl Default for DrawState {
    fn default() -> Self {
        DrawState::Idle
    }
}

#[derive(Debug, Default)]
pub struct DrawAccumulator {
    state: DrawState,
}

impl DrawAccumulator {
    pub fn new() -> Self {
        DrawAccumulator::default()
    }

    #[inline]
    pub fn state(&self) -> &DrawState {
        &self.state
    }

    /// Advances the state machine by one frame, `active` being the current state of
    /// the draw gesture.
    pub fn update(&mut self, active: bool, ctx: &mut StepContext) -> Result<()> {
        let state = ::std::mem::replace(&mut self.state, DrawState::Idle);

        self.state = match (state, active) {
            (DrawState::Idle, false) => DrawState::Idle,

            (DrawState::Idle, true) => {
                let scratch = ctx.spawn("scratch", NodeKind::Scratch)?;
                debug!("[DrawAccumulator] starts accumulating under {}.", scratch);

                DrawState::Accumulating {
                    scratch,
                    points: Vec::new(),
                }
            }

            (DrawState::Accumulating { scratch, mut points }, true) => {
                if !ctx.scene.contains(scratch) {
                    warn!("[DrawAccumulator] {} vanished, drops the stroke.", scratch);
                    DrawState::Idle
                } else {
                    points.push(sample(ctx, scratch)?);
                    DrawState::Accumulating { scratch, points }
                }
            }

            (DrawState::Accumulating { scratch, points }, false) => {
                release(ctx, scratch, points)?;
                DrawState::Idle
            }
        };

        Ok(())
    }
}

/// Drops a point at the cursor, under `scratch`.
fn sample(ctx: &mut StepContext, scratch: Entity) -> Result<Entity> {
    let cursor = ctx.cursor_transform()?;
    let shape = ShapeRenderer::new(
        Shape::sphere(ctx.tool.size()),
        ctx.settings.tool.point_color,
    );

    let point = ctx.scene.create("point");
    ctx.kinds.insert(point, NodeKind::Point);
    ctx.scene.add_shape(point, shape);
    ctx.scene.set_parent(point, scratch, false)?;
    ctx.scene.set_transform(point, cursor)?;
    Ok(point)
}

fn release(ctx: &mut StepContext, scratch: Entity, points: Vec<Entity>) -> Result<()> {
    if points.is_empty() {
        warn!("[DrawAccumulator] released before any point was drawn, nothing to commit.");
        ctx.tasks
            .defer("discard_scratch", move |s| s.discard(scratch));
        return Ok(());
    }

    let centroid = ctx.scene.centroid(&points)?;
    let cursor = ctx.cursor_transform()?;

    let structure = ctx.spawn("structure", NodeKind::Structure)?;
    ctx.scene
        .set_transform(structure, Transform::new(centroid, cursor.rotation))?;
    ctx.add_marker(structure);

    info!(
        "[DrawAccumulator] commits {} points into {}.",
        points.len(),
        structure
    );

    ctx.tasks.defer("commit_points", move |s| {
        s.commit_points(scratch, structure, points)
    });

    Ok(())
}
