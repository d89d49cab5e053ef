use failure::Fail;

use airsketch_world::Entity;

#[derive(Debug, Fail, Clone, PartialEq)]
pub enum Error {
    #[fail(display = "Invalid settings: {}.", _0)]
    InvalidSettings(String),
    #[fail(display = "{} is not alive in the scene.", _0)]
    NodeNotFound(Entity),
}

pub type Result<T> = ::std::result::Result<T, Error>;
