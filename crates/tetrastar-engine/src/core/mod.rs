pub use self::{board::*, piece::*, render::*};

pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod render;
