#![forbid(unsafe_code)]

//! `gitstories` animates a repository's folder/file tree across its git history.
//!
//! Folders and files are circular bodies; a force solver pulls every node towards its parent
//! while same-kind nodes repel, so the layout re-clusters as commits add and remove files. This
//! crate ties the tree (`gitstories-core`) and the solver (`gitstories-balancer`) into a
//! [`Scene`] driven by a commit [`History`], and renders frames as SVG or a JSON layout.

pub mod config;
pub mod error;
pub mod history;
mod load;
pub mod render;
pub mod scene;

pub use gitstories_balancer as balancer;
pub use gitstories_balancer::{Balancer, BalancerOptions, SettleStats};
pub use gitstories_core::*;

pub use config::SceneConfig;
pub use error::{Error, Result};
pub use history::{load_history, parse_history};
pub use load::Format;
pub use render::{DrawCommand, draw_list, render_svg};
pub use scene::{CommitReport, NodeLayout, PlaySummary, Scene};
