#![forbid(unsafe_code)]

//! Force solver for the gitstories tree.
//!
//! Every frame the [`Balancer`] flattens the tree into slot arrays, accumulates same-kind
//! repulsion and parent springs, then damps and integrates each body except the root. Files and
//! folders never repel each other, and a folder/file spring only moves the file, so folders act
//! as anchors that files settle around.

mod balancer;
pub mod error;
pub mod forces;
mod options;

pub use balancer::{Balancer, Edge, SettleStats};
pub use error::{Error, Result};
pub use options::BalancerOptions;
