#[macro_use]
extern crate approx;

use airsketch::prelude::*;
use airsketch_world::prelude::*;

#[test]
fn transform() {
    let mut e1 = Transform::default();
    let euler = Euler::new(Deg(0.0), Deg(0.0), Deg(90.0));
    e1.scale = 2.0;
    e1.position = [1.0, 0.0, 2.0].into();
    e1.rotation = euler.into();

    let v = [1.0, 0.0, 0.0];
    assert_ulps_eq!(e1.transform_direction(v), [0.0, 1.0, 0.0].into());
    assert_ulps_eq!(e1.transform_vector(v), [0.0, 2.0, 0.0].into());
    assert_ulps_eq!(e1.transform_point(v), [1.0, 2.0, 2.0].into());
}

#[test]
fn concat() {
    let mut e1 = Transform::default();
    e1.position = [0.0, 0.0, 1.0].into();

    let mut e2 = Transform::default();
    let euler = Euler::new(Deg(0.0), Deg(90.0), Deg(0.0));
    e2.rotation = euler.into();

    let e3 = e2 * e1;
    assert_ulps_eq!(e3.position, [1.0, 0.0, 0.0].into());
}

#[test]
fn inverse() {
    let mut e1 = Transform::default();
    e1.position = [0.0, 0.0, 1.0].into();
    let euler = Euler::new(Deg(0.0), Deg(90.0), Deg(0.0));
    e1.rotation = euler.into();

    let v = e1.inverse().unwrap() * e1;
    assert_ulps_eq!(v.position, [0.0, 0.0, 0.0].into());
    assert_ulps_eq!(v.scale, 1.0);
    assert_ulps_eq!(v.rotation, Quaternion::one());

    e1.scale = 0.0;
    assert!(e1.inverse().is_none());
}

#[test]
fn relative_to() {
    let mut parent = Transform::new([2.0, -1.0, 0.5], Euler::new(Deg(15.0), Deg(80.0), Deg(-30.0)));
    parent.scale = 3.0;

    let mut world = Transform::new([0.0, 4.0, -2.0], Euler::new(Deg(-45.0), Deg(10.0), Deg(5.0)));
    world.scale = 1.5;

    let local = world.relative_to(parent).unwrap();
    let v = parent * local;
    assert_relative_eq!(v.position, world.position, epsilon = 1e-5);
    assert_relative_eq!(v.scale, world.scale, epsilon = 1e-5);
    assert_relative_eq!(v.rotation.dot(world.rotation).abs(), 1.0, epsilon = 1e-5);
    assert_relative_eq!(local.scale, 0.5, epsilon = 1e-6);

    // Relative to the identity, the local transform is the world transform.
    let local = world.relative_to(Transform::default()).unwrap();
    assert_relative_eq!(local.position, world.position, epsilon = 1e-6);

    parent.scale = 0.0;
    assert!(world.relative_to(parent).is_none());
}

#[test]
fn directions() {
    let t = Transform::new([5.0, 5.0, 5.0], Euler::new(Deg(0.0), Deg(90.0), Deg(0.0)));
    assert_relative_eq!(t.forward(), [1.0, 0.0, 0.0].into(), epsilon = 1e-6);
    assert_relative_eq!(t.up(), [0.0, 1.0, 0.0].into(), epsilon = 1e-6);
    assert_relative_eq!(t.right(), [0.0, 0.0, -1.0].into(), epsilon = 1e-6);

    let m = t.matrix();
    assert_relative_eq!(m.w, [5.0, 5.0, 5.0, 1.0].into(), epsilon = 1e-6);
}

#[test]
fn serialize() {
    let t = Transform::new([1.0, 2.0, 3.0], Quaternion::one());
    let json = serde_json::to_string(&t).unwrap();
    let v: Transform = serde_json::from_str(&json).unwrap();
    assert_eq!(t, v);
}
