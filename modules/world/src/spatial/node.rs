use crate::Entity;

/// `Node` records the tree relationships of an entity. Siblings form a doubly
/// linked list, so children keep a stable order and can be appended or
/// spliced in place.
///
/// Every access requires going through the arena, which can be cumbersome and comes
/// with some runtime overhead. But it keeps `Node` a plain `Copy` value that can be
/// shared across threads safely.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub parent: Option<Entity>,
    pub next_sib: Option<Entity>,
    pub prev_sib: Option<Entity>,
    pub first_child: Option<Entity>,
    pub last_child: Option<Entity>,
}
