#![forbid(unsafe_code)]

//! Tree model behind the gitstories animation.
//!
//! A [`Tree`] is an arena of folder and file nodes. Every node carries a circular [`Body`]
//! (center, radius, mass, velocity, color) that the force solver in `gitstories-balancer`
//! moves around. Commits mutate the tree through [`apply::apply_commit`].

pub mod apply;
pub mod color;
pub mod error;
pub mod geom;
pub mod history;
mod rng;
pub mod tree;

pub use apply::{ApplyReport, PathWarning, apply_commit};
pub use color::Color;
pub use error::{Error, Result};
pub use geom::{Point, Vector, point, vector};
pub use history::{Commit, History};
pub use tree::{
    Body, DepthFirst, FileId, FolderId, MAX_NAME_LEN, NamedChildren, Node, NodeId, NodeKind,
    PlacementOptions, Tree, Visit,
};
