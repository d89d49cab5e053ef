//! The context of one sketch session.
//!
//! `SceneSession` owns the scene, the tool with its selection, the two gesture state
//! machines and the post-frame task queue. A frame is produced in three steps:
//!
//! 1. `update` advances the draw accumulator, then the selection grouper, and finally
//!    moves the cursor in front of the camera. Both state machines therefore observe
//!    the cursor as it was left by the previous frame.
//! 2. `draw` traverses the scene. It only borrows the session, so nothing can change
//!    the hierarchy while the renderer walks it.
//! 3. `flush` runs every hierarchy change deferred by the first step, in order.
//!
//! Gesture callbacks only flip flags or edit the selection; every structural edit they
//! imply is left to the next frame.

use airsketch::errors::Result;
use airsketch::input::{GestureEvent, GestureState, SwipeDirection};
use airsketch::math::prelude::Vector2;
use airsketch::sched::{self, TaskQueue};
use airsketch_world::prelude::{Entity, Renderer, Scene, Shape, ShapeRenderer, Transform};
use log::{debug, info, trace, warn};
use smallvec::SmallVec;

use crate::cursor;
use crate::draw::{DrawAccumulator, DrawState};
use crate::errors::Error;
use crate::grab::{GrabState, SelectionGrouper};
use crate::hit::HitTest;
use crate::kind::{NodeKind, NodeKinds};
use crate::selection::Selection;
use crate::settings::SketchSettings;
use crate::tool::{Tool, ToolMode};

/// What a state machine may touch during `SceneSession::update`.
pub struct StepContext<'a> {
    pub scene: &'a mut Scene,
    pub root: Entity,
    pub tool: &'a Tool,
    pub kinds: &'a mut NodeKinds,
    pub tasks: &'a mut TaskQueue<SceneSession>,
    pub settings: &'a SketchSettings,
}

impl<'a> StepContext<'a> {
    /// The world transform of the cursor, as positioned by the previous frame.
    pub fn cursor_transform(&self) -> Result<Transform> {
        let cursor = self.tool.cursor();
        self.scene
            .transform(cursor)
            .ok_or_else(|| Error::NodeNotFound(cursor).into())
    }

    /// Creates a node of `kind` as the last child of the root.
    pub fn spawn(&mut self, name: &str, kind: NodeKind) -> Result<Entity> {
        let ent = self.scene.create(name);
        self.kinds.insert(ent, kind);
        self.scene.set_parent(ent, self.root, false)?;
        Ok(ent)
    }

    #[inline]
    pub fn add_marker(&mut self, ent: Entity) {
        self.scene.add_shape(ent, marker(self.settings));
    }
}

fn marker(settings: &SketchSettings) -> ShapeRenderer {
    ShapeRenderer::new(
        Shape::sphere(settings.marker.radius),
        settings.marker.color,
    )
}

pub struct SceneSession {
    scene: Scene,
    root: Entity,
    tool: Tool,
    kinds: NodeKinds,

    draw: DrawAccumulator,
    grab: SelectionGrouper,
    draw_active: bool,
    move_active: bool,

    tasks: TaskQueue<SceneSession>,
    settings: SketchSettings,
}

impl SceneSession {
    /// Sets up the root and the cursor. Once this returns, both exist for the whole
    /// lifetime of the session.
    pub fn new(settings: SketchSettings) -> Result<Self> {
        settings.validate()?;

        let mut scene = Scene::new();
        let mut kinds = NodeKinds::new();

        let root = scene.create("root");
        kinds.insert(root, NodeKind::Root);

        let cursor = scene.create("cursor");
        kinds.insert(cursor, NodeKind::Cursor);
        scene.set_parent(cursor, root, false)?;
        scene.add_shape(
            cursor,
            ShapeRenderer::new(
                Shape::sphere(settings.tool.size),
                settings.tool.cursor_color,
            ),
        );

        info!("[SceneSession] setup with {:?}.", settings);

        Ok(SceneSession {
            scene,
            root,
            tool: Tool::new(cursor, &settings.tool),
            kinds,
            draw: DrawAccumulator::new(),
            grab: SelectionGrouper::new(),
            draw_active: false,
            move_active: false,
            tasks: TaskQueue::new(),
            settings,
        })
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn root(&self) -> Entity {
        self.root
    }

    #[inline]
    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    #[inline]
    pub fn tool_mut(&mut self) -> &mut Tool {
        &mut self.tool
    }

    #[inline]
    pub fn cursor(&self) -> Entity {
        self.tool.cursor()
    }

    #[inline]
    pub fn selection(&self) -> &Selection {
        &self.tool.selection
    }

    #[inline]
    pub fn kind(&self, ent: Entity) -> Option<NodeKind> {
        self.kinds.get(ent)
    }

    #[inline]
    pub fn kinds(&self) -> &NodeKinds {
        &self.kinds
    }

    /// Committed structures, in the order of the root's children.
    pub fn structures(&self) -> Vec<Entity> {
        self.scene
            .children(self.root)
            .filter(|&v| self.kinds.is(v, NodeKind::Structure))
            .collect()
    }

    #[inline]
    pub fn draw_state(&self) -> &DrawState {
        self.draw.state()
    }

    #[inline]
    pub fn grab_state(&self) -> GrabState {
        self.grab.state()
    }

    #[inline]
    pub fn is_draw_active(&self) -> bool {
        self.draw_active
    }

    #[inline]
    pub fn is_move_active(&self) -> bool {
        self.move_active
    }

    /// Number of deferred tasks waiting for the next flush.
    #[inline]
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    #[inline]
    pub fn settings(&self) -> &SketchSettings {
        &self.settings
    }
}

impl SceneSession {
    /// Produces one frame: update, traversal, then deferred tasks.
    pub fn on_frame_tick<R: Renderer>(&mut self, camera: Transform, renderer: &mut R) -> Result<()> {
        self.update(camera)?;
        self.draw(renderer);
        self.flush()?;
        Ok(())
    }

    /// Runs the draw accumulator, the selection grouper and the cursor positioner, in
    /// this order.
    pub fn update(&mut self, camera: Transform) -> Result<()> {
        {
            let mut ctx = StepContext {
                scene: &mut self.scene,
                root: self.root,
                tool: &self.tool,
                kinds: &mut self.kinds,
                tasks: &mut self.tasks,
                settings: &self.settings,
            };

            self.draw.update(self.draw_active, &mut ctx)?;
            self.grab.update(self.move_active, &mut ctx)?;
        }

        let distance = self.tool.distance_from_camera;
        cursor::position_cursor(&mut self.scene, self.tool.cursor(), camera, distance)?;

        trace!(
            "[SceneSession] updated with {} deferred tasks.",
            self.tasks.len()
        );

        Ok(())
    }

    /// Traverses the scene.
    #[inline]
    pub fn draw<R: Renderer>(&self, renderer: &mut R) {
        self.scene.draw(renderer);
    }

    /// Runs the deferred tasks. Returns the number of executed tasks.
    #[inline]
    pub fn flush(&mut self) -> Result<usize> {
        sched::flush(self, |s| &mut s.tasks)
    }
}

impl SceneSession {
    pub fn set_draw_active(&mut self, active: bool) {
        if self.draw_active != active {
            debug!("[SceneSession] draw gesture active: {}.", active);
        }

        self.draw_active = active;
    }

    pub fn set_move_active(&mut self, active: bool) {
        if self.move_active != active {
            debug!("[SceneSession] move gesture active: {}.", active);
        }

        self.move_active = active;
    }

    /// Routes a hold gesture to drawing or moving, depending on the tool mode. A
    /// release ends both.
    pub fn on_hold(&mut self, state: GestureState) {
        if !state.is_active() {
            self.set_draw_active(false);
            self.set_move_active(false);
            return;
        }

        match self.tool.mode {
            ToolMode::Pen => self.set_draw_active(true),
            ToolMode::Manipulator => self.set_move_active(true),
        }
    }

    /// Toggles the selection of the structure under `point`. Returns the toggled
    /// structure, if any.
    pub fn on_tap<H>(&mut self, point: Vector2<f32>, hit: &H) -> Option<Entity>
    where
        H: HitTest + ?Sized,
    {
        if self.tool.mode != ToolMode::Manipulator {
            debug!("[SceneSession] ignores tap in {:?} mode.", self.tool.mode);
            return None;
        }

        let ent = hit.hit_test(&self.scene, point)?;
        if ent == self.tool.cursor() {
            return None;
        }

        let target = if self.kinds.is(ent, NodeKind::Structure) {
            ent
        } else {
            match self.scene.parent(ent) {
                Some(parent) if self.kinds.is(parent, NodeKind::Structure) => parent,
                _ => {
                    debug!("[SceneSession] ignores tap on {}.", ent);
                    return None;
                }
            }
        };

        self.tool.update_selection(target);
        Some(target)
    }

    /// Scales the brush in pen mode, or every selected node in manipulator mode.
    pub fn on_pinch(&mut self, scale: f32) {
        if !scale.is_finite() || scale <= 0.0 {
            warn!("[SceneSession] ignores pinch with scale {}.", scale);
            return;
        }

        match self.tool.mode {
            ToolMode::Pen => {
                let size = self.tool.scale_size(scale);
                if let Some(v) = self.scene.shape_mut(self.tool.cursor()) {
                    v.shape = Shape::sphere(size);
                }
            }

            ToolMode::Manipulator => {
                for ent in self.tool.selection.to_vec() {
                    if let Some(v) = self.scene.local_scale(ent) {
                        self.scene.set_local_scale(ent, v * scale);
                    }
                }
            }
        }
    }

    /// Returns true if the tool mode changed.
    #[inline]
    pub fn on_swipe(&mut self, direction: SwipeDirection) -> bool {
        self.tool.handle_swipe(direction)
    }

    pub fn handle_gesture<H>(&mut self, event: GestureEvent, hit: &H)
    where
        H: HitTest + ?Sized,
    {
        match event {
            GestureEvent::Hold(state) => self.on_hold(state),
            GestureEvent::Tap { position } => {
                self.on_tap(position, hit);
            }
            GestureEvent::Swipe(direction) => {
                self.on_swipe(direction);
            }
            GestureEvent::Pinch { scale, state } => {
                if state.is_active() {
                    self.on_pinch(scale);
                }
            }
        }
    }

    /// Removes every selected node from the scene after the current frame, together
    /// with its selection membership.
    pub fn delete_selected(&mut self) {
        if self.tool.selection.is_empty() {
            debug!("[SceneSession] nothing selected to delete.");
            return;
        }

        self.tasks
            .defer("delete_selected", |s| s.delete_selected_now());
    }
}

impl SceneSession {
    pub(crate) fn delete_selected_now(&mut self) -> Result<()> {
        let selected = self.tool.selection.to_vec();
        for &ent in &selected {
            self.tool.update_selection(ent);
            self.discard(ent)?;
        }

        info!("[SceneSession] deletes {} selected nodes.", selected.len());
        Ok(())
    }

    /// Removes `ent` and its subtree, and forgets about every removed node.
    pub(crate) fn discard(&mut self, ent: Entity) -> Result<()> {
        if let Some(removed) = self.scene.delete(ent) {
            for v in removed {
                self.kinds.remove(v);
                self.tool.selection.remove(v);
            }
        }

        Ok(())
    }

    pub(crate) fn commit_points(
        &mut self,
        scratch: Entity,
        structure: Entity,
        points: Vec<Entity>,
    ) -> Result<()> {
        if !self.scene.contains(structure) {
            return Err(Error::NodeNotFound(structure).into());
        }

        for point in points {
            if self.scene.contains(point) {
                self.scene.set_parent(point, structure, true)?;
            }
        }

        self.discard(scratch)
    }

    pub(crate) fn absorb_structure(&mut self, structure: Entity, holder: Entity) -> Result<()> {
        if !self.scene.contains(holder) {
            return Err(Error::NodeNotFound(holder).into());
        }

        if !self.scene.contains(structure) {
            warn!("[SceneSession] {} vanished before being grabbed.", structure);
            self.tool.selection.remove(structure);
            return Ok(());
        }

        let children: SmallVec<[Entity; 16]> = self.scene.children(structure).collect();
        for &child in &children {
            self.scene.set_parent(child, holder, true)?;
        }

        debug!(
            "[SceneSession] moves {} nodes from {} into {}.",
            children.len(),
            structure,
            holder
        );

        self.tool.selection.remove(structure);
        self.discard(structure)
    }

    pub(crate) fn select_holder(&mut self, holder: Entity) -> Result<()> {
        if self.scene.contains(holder) {
            self.tool.selection.insert(holder);
        } else {
            warn!("[SceneSession] {} vanished before being selected.", holder);
        }

        Ok(())
    }

    pub(crate) fn release_holder(&mut self, holder: Entity) -> Result<()> {
        let (world, local) = match (
            self.scene.transform(holder),
            self.scene.local_transform(holder),
        ) {
            (Some(world), Some(local)) => (world, local),
            _ => return Err(Error::NodeNotFound(holder).into()),
        };

        if self.scene.is_leaf(holder) {
            warn!("[SceneSession] {} holds nothing, drops it.", holder);
            self.tool.selection.remove(holder);
            return self.discard(holder);
        }

        let structure = self.scene.create("structure");
        self.kinds.insert(structure, NodeKind::Structure);
        self.scene.set_local_transform(structure, world);

        let children: SmallVec<[Entity; 16]> = self.scene.children(holder).collect();
        for &child in &children {
            self.scene.set_parent(child, structure, true)?;
        }

        self.scene.replace(holder, structure)?;
        self.scene.set_local_transform(structure, local);
        self.scene.add_shape(structure, marker(&self.settings));

        self.tool.selection.remove(holder);
        self.tool.selection.insert(structure);
        self.discard(holder)?;

        info!(
            "[SceneSession] bakes {} nodes into {}.",
            children.len(),
            structure
        );

        Ok(())
    }
}
