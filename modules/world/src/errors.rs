use failure::Fail;

use crate::Entity;

#[derive(Debug, Fail, Clone, PartialEq)]
pub enum Error {
    #[fail(display = "{} does not have a node component.", _0)]
    NonNodeFound(Entity),
    #[fail(display = "Node can not set self as parent.")]
    CanNotAttachSelfAsParent,
    #[fail(display = "{} can not be attached to its descendant {}.", _0, _1)]
    CanNotAttachToDescendant(Entity, Entity),
    #[fail(display = "The transform of {} can not be inversed.", _0)]
    CanNotInverseTransform(Entity),
    #[fail(display = "Can not compute the centroid of an empty group.")]
    EmptyCentroidGroup,
}

pub type Result<T> = ::std::result::Result<T, Error>;
