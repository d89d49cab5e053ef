#[macro_use]
extern crate approx;

use airsketch::prelude::*;
use airsketch_sketch::cursor::cursor_transform;
use airsketch_sketch::prelude::*;
use airsketch_world::prelude::*;

fn setup() -> (SceneSession, HeadlessRenderer) {
    let _ = env_logger::try_init();
    let session = SceneSession::new(SketchSettings::default()).unwrap();
    (session, HeadlessRenderer::new())
}

fn camera(x: f32, y: f32, z: f32) -> Transform {
    Transform::from_position([x, y, z])
}

fn assert_same_transform(lhs: Transform, rhs: Transform) {
    assert_relative_eq!(lhs.position, rhs.position, epsilon = 1e-5);
    assert_relative_eq!(lhs.scale, rhs.scale, epsilon = 1e-5);
    assert_relative_eq!(lhs.rotation.dot(rhs.rotation).abs(), 1.0, epsilon = 1e-5);
}

/// Draws one point per pose after the first one, then releases. Returns the new
/// structure and the world positions the points were dropped at.
fn stroke(
    session: &mut SceneSession,
    renderer: &mut HeadlessRenderer,
    poses: &[Transform],
) -> (Entity, Vec<Vector3<f32>>) {
    let before = session.structures();
    let cursor = session.cursor();
    let mut points = Vec::new();

    session.set_draw_active(true);
    for (i, &pose) in poses.iter().enumerate() {
        if i > 0 {
            points.push(session.scene().position(cursor).unwrap());
        }

        session.on_frame_tick(pose, renderer).unwrap();
    }

    session.set_draw_active(false);
    session
        .on_frame_tick(*poses.last().unwrap(), renderer)
        .unwrap();

    let created: Vec<_> = session
        .structures()
        .into_iter()
        .filter(|v| !before.contains(v))
        .collect();

    assert_eq!(created.len(), 1);
    (created[0], points)
}

fn select(session: &mut SceneSession, ent: Entity) -> Option<Entity> {
    session.on_tap(Vector2::new(0.0, 0.0), &|_: &Scene, _: Vector2<f32>| Some(ent))
}

fn mean(points: &[Vector3<f32>]) -> Vector3<f32> {
    points.iter().fold(Vector3::zero(), |acc, &v| acc + v) / points.len() as f32
}

#[test]
fn setup_builds_root_and_cursor() {
    let (session, _) = setup();
    let scene = session.scene();

    assert_eq!(scene.len(), 2);
    assert!(scene.is_root(session.root()));
    assert_eq!(scene.parent(session.cursor()), Some(session.root()));
    assert_eq!(session.kind(session.root()), Some(NodeKind::Root));
    assert_eq!(session.kind(session.cursor()), Some(NodeKind::Cursor));
    assert_eq!(session.tool().mode, ToolMode::Pen);
    assert!(session.selection().is_empty());

    let mut settings = SketchSettings::default();
    settings.tool.size = -1.0;
    assert!(SceneSession::new(settings).is_err());
}

#[test]
fn cursor_follows_camera() {
    let (mut session, mut renderer) = setup();
    let pose = Transform::new([1.0, 2.0, 3.0], Euler::new(Deg(0.0), Deg(90.0), Deg(0.0)));

    session.on_frame_tick(pose, &mut renderer).unwrap();

    let cursor = session.scene().transform(session.cursor()).unwrap();
    assert_same_transform(cursor, cursor_transform(pose, 0.2));
    assert_relative_eq!(cursor.position, Vector3::new(1.2, 2.0, 3.0), epsilon = 1e-5);

    // The cursor is rendered.
    assert_eq!(renderer.frames(), 1);
    assert!(renderer.find(session.cursor()).is_some());
}

#[test]
fn end_to_end() {
    let (mut session, mut renderer) = setup();
    session.on_frame_tick(camera(0.0, 0.0, 0.0), &mut renderer).unwrap();

    // Draws three points at P1, P2 and P3.
    let poses = [
        camera(1.0, 0.0, 0.0),
        camera(0.0, 1.0, 0.0),
        camera(0.0, 0.0, 1.0),
        camera(5.0, 5.0, 5.0),
    ];

    let (structure, points) = stroke(&mut session, &mut renderer, &poses);
    assert_relative_eq!(points[0], Vector3::new(1.0, 0.0, 0.2), epsilon = 1e-6);
    assert_relative_eq!(points[1], Vector3::new(0.0, 1.0, 0.2), epsilon = 1e-6);
    assert_relative_eq!(points[2], Vector3::new(0.0, 0.0, 1.2), epsilon = 1e-6);

    let centroid = mean(&points);
    assert_relative_eq!(
        session.scene().position(structure).unwrap(),
        centroid,
        epsilon = 1e-5
    );

    let children: Vec<_> = session.scene().children(structure).collect();
    assert_eq!(children.len(), 3);
    for (&child, &point) in children.iter().zip(points.iter()) {
        assert_relative_eq!(session.scene().position(child).unwrap(), point, epsilon = 1e-5);
    }

    // Taps the structure.
    assert!(session.on_swipe(SwipeDirection::Right));
    assert_eq!(select(&mut session, structure), Some(structure));
    assert_eq!(session.selection().to_vec(), [structure]);

    // Grabs it.
    let grab = Transform::new([0.0, 0.0, -1.0], Euler::new(Deg(0.0), Deg(90.0), Deg(0.0)));
    session.set_move_active(true);
    session.on_frame_tick(grab, &mut renderer).unwrap();

    let holder = match session.grab_state() {
        GrabState::Grouping { holder } => holder,
        other => panic!("unexpected {:?}", other),
    };

    assert!(!session.scene().contains(structure));
    assert_eq!(session.selection().to_vec(), [holder]);
    assert_eq!(session.kind(holder), Some(NodeKind::Holder));
    assert_relative_eq!(session.scene().position(holder).unwrap(), centroid, epsilon = 1e-5);
    assert_eq!(session.scene().children(holder).collect::<Vec<_>>(), children);
    for (&child, &point) in children.iter().zip(points.iter()) {
        assert_relative_eq!(session.scene().position(child).unwrap(), point, epsilon = 1e-5);
    }

    // The holder follows the cursor.
    let target = cursor_transform(grab, 0.2);
    session.on_frame_tick(camera(9.0, 9.0, 9.0), &mut renderer).unwrap();
    assert_same_transform(session.scene().transform(holder).unwrap(), target);

    // Releases.
    session.set_move_active(false);
    session.on_frame_tick(camera(9.0, 9.0, 9.0), &mut renderer).unwrap();

    assert_eq!(session.grab_state(), GrabState::Idle);
    assert!(!session.scene().contains(holder));

    let moved = session.structures();
    assert_eq!(moved.len(), 1);
    let moved = moved[0];
    assert_ne!(moved, structure);
    assert_eq!(session.selection().to_vec(), [moved]);
    assert_same_transform(session.scene().transform(moved).unwrap(), target);
    assert_eq!(session.scene().children(moved).collect::<Vec<_>>(), children);

    for (&child, &point) in children.iter().zip(points.iter()) {
        let expected = target.transform_point(point - centroid);
        assert_relative_eq!(session.scene().position(child).unwrap(), expected, epsilon = 1e-5);
    }

    assert_eq!(session.kinds().count(NodeKind::Holder), 0);
    assert_eq!(session.kinds().count(NodeKind::Structure), 1);
    assert_eq!(session.scene().len(), 6);
}

#[test]
fn draw_commit() {
    let (mut session, mut renderer) = setup();
    let rotation: Quaternion<f32> = Euler::new(Deg(20.0), Deg(-35.0), Deg(0.0)).into();
    let pose = |x: f32| Transform::new([x, 0.0, 0.0], rotation);

    session.on_frame_tick(pose(0.0), &mut renderer).unwrap();
    let (structure, points) = stroke(
        &mut session,
        &mut renderer,
        &[pose(0.0), pose(0.1), pose(0.2), pose(0.3), pose(0.4), pose(0.5)],
    );

    assert_eq!(points.len(), 5);
    let scene = session.scene();
    assert_relative_eq!(scene.position(structure).unwrap(), mean(&points), epsilon = 1e-5);
    assert_relative_eq!(
        scene.rotation(structure).unwrap().dot(rotation).abs(),
        1.0,
        epsilon = 1e-5
    );

    // Points keep their world pose, and are sized by the brush.
    for (child, &point) in scene.children(structure).zip(points.iter()) {
        assert_eq!(session.kind(child), Some(NodeKind::Point));
        assert_relative_eq!(scene.position(child).unwrap(), point, epsilon = 1e-5);
        assert_relative_eq!(
            scene.rotation(child).unwrap().dot(rotation).abs(),
            1.0,
            epsilon = 1e-5
        );
        assert_eq!(scene.shape(child).unwrap().shape, Shape::sphere(0.005));
    }

    // The structure carries the marker, and the scratch node is gone.
    let marker = scene.shape(structure).unwrap();
    assert_eq!(marker.shape, Shape::sphere(0.03));
    assert_eq!(marker.color, Color::blue());
    assert_eq!(session.kinds().count(NodeKind::Scratch), 0);
    assert_eq!(session.draw_state(), &DrawState::Idle);
    assert_eq!(scene.len(), 2 + 1 + 5);
}

#[test]
fn commit_waits_for_traversal() {
    let (mut session, mut renderer) = setup();
    session.on_frame_tick(camera(0.0, 0.0, 0.0), &mut renderer).unwrap();

    session.set_draw_active(true);
    session.on_frame_tick(camera(0.0, 0.0, 0.0), &mut renderer).unwrap();
    session.on_frame_tick(camera(1.0, 0.0, 0.0), &mut renderer).unwrap();
    session.on_frame_tick(camera(2.0, 0.0, 0.0), &mut renderer).unwrap();

    let (scratch, points) = match session.draw_state().clone() {
        DrawState::Accumulating { scratch, points } => (scratch, points),
        other => panic!("unexpected {:?}", other),
    };

    assert_eq!(points.len(), 2);
    assert_eq!(session.scene().children(scratch).collect::<Vec<_>>(), points);

    session.set_draw_active(false);
    session.update(camera(2.0, 0.0, 0.0)).unwrap();

    // The structure exists, but the points are still under the scratch node while
    // the frame is traversed.
    assert_eq!(session.pending_tasks(), 1);
    let structure = session.structures()[0];
    assert!(session.scene().is_leaf(structure));
    assert_eq!(session.scene().children(scratch).collect::<Vec<_>>(), points);

    session.draw(&mut renderer);
    assert!(renderer.find(points[0]).is_some());

    assert_eq!(session.flush().unwrap(), 1);
    assert_eq!(session.pending_tasks(), 0);
    assert!(!session.scene().contains(scratch));
    assert_eq!(session.scene().children(structure).collect::<Vec<_>>(), points);
}

#[test]
fn release_without_points() {
    let (mut session, mut renderer) = setup();

    // Pressed and released between two frames.
    session.set_draw_active(true);
    session.set_draw_active(false);
    session.on_frame_tick(camera(0.0, 0.0, 0.0), &mut renderer).unwrap();
    assert_eq!(session.scene().len(), 2);

    // Pressed for a single frame.
    session.set_draw_active(true);
    session.on_frame_tick(camera(0.0, 0.0, 0.0), &mut renderer).unwrap();
    assert_eq!(session.kinds().count(NodeKind::Scratch), 1);

    session.set_draw_active(false);
    session.on_frame_tick(camera(0.0, 0.0, 0.0), &mut renderer).unwrap();

    assert!(session.structures().is_empty());
    assert_eq!(session.kinds().count(NodeKind::Scratch), 0);
    assert_eq!(session.scene().len(), 2);
    assert_eq!(session.draw_state(), &DrawState::Idle);
}

#[test]
fn move_round_trip() {
    let (mut session, mut renderer) = setup();
    session.on_frame_tick(camera(0.0, 0.0, 0.0), &mut renderer).unwrap();

    let poses = [
        camera(0.0, 0.0, 0.0),
        camera(0.3, 0.1, 0.0),
        camera(0.1, 0.4, 0.2),
    ];

    let (structure, _) = stroke(&mut session, &mut renderer, &poses);
    let before = session.scene().transform(structure).unwrap();
    let children: Vec<_> = session.scene().children(structure).collect();
    let worlds: Vec<_> = children
        .iter()
        .map(|&v| session.scene().transform(v).unwrap())
        .collect();

    session.on_swipe(SwipeDirection::Left);
    select(&mut session, structure);

    session.set_move_active(true);
    session.on_frame_tick(poses[2], &mut renderer).unwrap();
    session.set_move_active(false);
    session.on_frame_tick(poses[2], &mut renderer).unwrap();

    let after = session.structures();
    assert_eq!(after.len(), 1);
    assert_same_transform(session.scene().transform(after[0]).unwrap(), before);
    assert_eq!(session.scene().children(after[0]).collect::<Vec<_>>(), children);

    for (&child, &world) in children.iter().zip(worlds.iter()) {
        assert_same_transform(session.scene().transform(child).unwrap(), world);
    }
}

#[test]
fn move_several_structures() {
    let (mut session, mut renderer) = setup();
    session.on_frame_tick(camera(0.0, 0.0, 0.0), &mut renderer).unwrap();

    let (s1, p1) = stroke(
        &mut session,
        &mut renderer,
        &[camera(0.0, 0.0, 0.0), camera(1.0, 0.0, 0.0), camera(2.0, 0.0, 0.0)],
    );

    let (s2, p2) = stroke(
        &mut session,
        &mut renderer,
        &[camera(0.0, 3.0, 0.0), camera(0.0, 4.0, 0.0)],
    );

    let (s3, _) = stroke(
        &mut session,
        &mut renderer,
        &[camera(0.0, 0.0, 8.0), camera(0.0, 0.0, 9.0)],
    );

    session.on_swipe(SwipeDirection::Right);
    select(&mut session, s1);
    select(&mut session, s2);

    let centroid = {
        let scene = session.scene();
        (scene.position(s1).unwrap() + scene.position(s2).unwrap()) / 2.0
    };

    session.set_move_active(true);
    session.on_frame_tick(camera(0.0, 0.0, 0.0), &mut renderer).unwrap();

    let holder = match session.grab_state() {
        GrabState::Grouping { holder } => holder,
        other => panic!("unexpected {:?}", other),
    };

    assert_relative_eq!(session.scene().position(holder).unwrap(), centroid, epsilon = 1e-5);
    assert_eq!(session.scene().children(holder).count(), p1.len() + p2.len());
    assert_eq!(session.selection().to_vec(), [holder]);
    assert!(!session.scene().contains(s1));
    assert!(!session.scene().contains(s2));

    // Unselected structures are left alone.
    assert!(session.scene().contains(s3));
    assert_eq!(session.structures(), [s3]);

    session.set_move_active(false);
    session.on_frame_tick(camera(0.0, 0.0, 0.0), &mut renderer).unwrap();

    let structures = session.structures();
    assert_eq!(structures.len(), 2);
    assert_eq!(structures[0], s3);
    assert_eq!(session.selection().to_vec(), [structures[1]]);
    assert_eq!(
        session.scene().children(structures[1]).count(),
        p1.len() + p2.len()
    );
}

#[test]
fn move_without_selection() {
    let (mut session, mut renderer) = setup();
    session.on_swipe(SwipeDirection::Left);

    session.on_hold(GestureState::Began);
    assert!(session.is_move_active());
    session.on_frame_tick(camera(0.0, 0.0, 0.0), &mut renderer).unwrap();
    assert_eq!(session.grab_state(), GrabState::Rejected);

    session.on_frame_tick(camera(1.0, 0.0, 0.0), &mut renderer).unwrap();
    assert_eq!(session.grab_state(), GrabState::Rejected);
    assert_eq!(session.scene().len(), 2);
    assert_eq!(session.pending_tasks(), 0);

    session.on_hold(GestureState::Ended);
    session.on_frame_tick(camera(1.0, 0.0, 0.0), &mut renderer).unwrap();
    assert_eq!(session.grab_state(), GrabState::Idle);
    assert!(session.selection().is_empty());
}

#[test]
fn holder_deleted_during_move() {
    let (mut session, mut renderer) = setup();
    session.on_frame_tick(camera(0.0, 0.0, 0.0), &mut renderer).unwrap();
    let (structure, _) = stroke(
        &mut session,
        &mut renderer,
        &[camera(0.0, 0.0, 0.0), camera(1.0, 0.0, 0.0)],
    );

    session.on_swipe(SwipeDirection::Left);
    select(&mut session, structure);

    session.set_move_active(true);
    session.on_frame_tick(camera(0.0, 0.0, 0.0), &mut renderer).unwrap();
    let holder = match session.grab_state() {
        GrabState::Grouping { holder } => holder,
        other => panic!("unexpected {:?}", other),
    };

    session.delete_selected();
    session.on_frame_tick(camera(0.0, 0.0, 0.0), &mut renderer).unwrap();
    assert!(!session.scene().contains(holder));
    assert!(session.selection().is_empty());

    session.on_frame_tick(camera(0.0, 0.0, 0.0), &mut renderer).unwrap();
    assert_eq!(session.grab_state(), GrabState::Idle);

    session.set_move_active(false);
    session.on_frame_tick(camera(0.0, 0.0, 0.0), &mut renderer).unwrap();
    assert!(session.structures().is_empty());
    assert_eq!(session.scene().len(), 2);
}

#[test]
fn delete_before_grab() {
    let (mut session, mut renderer) = setup();
    session.on_frame_tick(camera(0.0, 0.0, 0.0), &mut renderer).unwrap();
    let (structure, _) = stroke(
        &mut session,
        &mut renderer,
        &[camera(0.0, 0.0, 0.0), camera(1.0, 0.0, 0.0)],
    );

    session.on_swipe(SwipeDirection::Left);
    select(&mut session, structure);

    // The delete runs before the grabbed structure is absorbed.
    session.delete_selected();
    session.set_move_active(true);
    session.on_frame_tick(camera(0.0, 0.0, 0.0), &mut renderer).unwrap();

    let holder = match session.grab_state() {
        GrabState::Grouping { holder } => holder,
        other => panic!("unexpected {:?}", other),
    };

    assert!(!session.scene().contains(structure));
    assert!(session.scene().is_leaf(holder));
    assert_eq!(session.selection().to_vec(), [holder]);

    // An empty holder is dropped instead of being baked.
    session.set_move_active(false);
    session.on_frame_tick(camera(0.0, 0.0, 0.0), &mut renderer).unwrap();

    assert_eq!(session.grab_state(), GrabState::Idle);
    assert!(!session.scene().contains(holder));
    assert!(session.selection().is_empty());
    assert!(session.structures().is_empty());
    assert_eq!(session.kinds().count(NodeKind::Structure), 0);
    assert_eq!(session.scene().len(), 2);
}
