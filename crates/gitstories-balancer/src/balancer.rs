use gitstories_core::geom::{self, Point, Vector};
use gitstories_core::{NodeId, Tree};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{Error, Result};
use crate::forces;
use crate::options::BalancerOptions;

/// Parent link collected during trace, as slot indices into the working set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub child: usize,
    pub parent: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SettleStats {
    pub nodes: usize,
    pub edges: usize,
    /// Largest velocity magnitude after integration, root excluded.
    pub max_speed: f64,
}

/// Flat working set rebuilt from the tree every tick.
///
/// Slot `0` is always the root; it is pinned and never integrated. Backing storage grows by
/// doubling and is kept across ticks.
#[derive(Debug)]
pub struct Balancer {
    options: BalancerOptions,
    nodes: Vec<NodeId>,
    is_file: Vec<bool>,
    forces: Vec<Vector>,
    positions: Vec<Point>,
    radii: Vec<f64>,
    edges: Vec<Edge>,
    slot_of: FxHashMap<NodeId, usize>,
}

impl Balancer {
    /// Fails with [`Error::InvalidOptions`] when `options` would keep the layout from settling.
    pub fn new(options: BalancerOptions) -> Result<Self> {
        options.validate()?;
        let cap = options.initial_capacity.max(1);
        let mut balancer = Self {
            options,
            nodes: Vec::new(),
            is_file: Vec::new(),
            forces: Vec::new(),
            positions: Vec::new(),
            radii: Vec::new(),
            edges: Vec::new(),
            slot_of: FxHashMap::default(),
        };
        balancer.nodes.try_reserve_exact(cap)?;
        balancer.is_file.try_reserve_exact(cap)?;
        balancer.forces.try_reserve_exact(cap)?;
        balancer.positions.try_reserve_exact(cap)?;
        balancer.radii.try_reserve_exact(cap)?;
        balancer.edges.try_reserve_exact(cap)?;
        balancer.slot_of.try_reserve(cap)?;
        Ok(balancer)
    }

    pub fn options(&self) -> &BalancerOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Force accumulated for each slot by the last settle pass.
    pub fn forces(&self) -> &[Vector] {
        &self.forces
    }

    pub fn is_file(&self, slot: usize) -> Option<bool> {
        self.is_file.get(slot).copied()
    }

    pub fn slot_of(&self, id: impl Into<NodeId>) -> Option<usize> {
        self.slot_of.get(&id.into()).copied()
    }

    pub fn node_capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Forgets the last trace without releasing storage.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.is_file.clear();
        self.forces.clear();
        self.positions.clear();
        self.radii.clear();
        self.edges.clear();
        self.slot_of.clear();
    }

    /// Appends every live node of `tree` in depth-first order, plus one edge per non-root node.
    pub fn trace(&mut self, tree: &Tree) -> Result<()> {
        for visit in tree.depth_first() {
            let slot = self.nodes.len();
            let body = visit.body();
            grow_if_full(&mut self.nodes)?;
            grow_if_full(&mut self.is_file)?;
            grow_if_full(&mut self.forces)?;
            grow_if_full(&mut self.positions)?;
            grow_if_full(&mut self.radii)?;
            self.nodes.push(visit.id);
            self.is_file.push(visit.is_file());
            self.forces.push(Vector::zero());
            self.positions.push(body.center);
            self.radii.push(body.radius);
            self.slot_of.insert(visit.id, slot);

            if let Some(parent) = visit.parent {
                let parent = self.slot_of(parent).ok_or(Error::StaleHandle)?;
                grow_if_full(&mut self.edges)?;
                self.edges.push(Edge {
                    child: slot,
                    parent,
                });
            }
        }
        Ok(())
    }

    /// Computes forces from the traced snapshot and integrates every non-root body in `tree`.
    pub fn settle(&mut self, tree: &mut Tree) -> Result<SettleStats> {
        self.refresh(tree)?;
        self.accumulate_repulsion();
        self.accumulate_springs();
        let max_speed = self.integrate(tree)?;
        Ok(SettleStats {
            nodes: self.nodes.len(),
            edges: self.edges.len(),
            max_speed,
        })
    }

    /// One frame: clear, trace, settle.
    pub fn tick(&mut self, tree: &mut Tree) -> Result<SettleStats> {
        self.clear();
        self.trace(tree)?;
        self.settle(tree)
    }

    fn refresh(&mut self, tree: &Tree) -> Result<()> {
        for (slot, &id) in self.nodes.iter().enumerate() {
            let body = tree.body(id).map_err(|_| Error::StaleHandle)?;
            self.positions[slot] = body.center;
            self.radii[slot] = body.radius;
            self.forces[slot] = Vector::zero();
        }
        Ok(())
    }

    fn accumulate_repulsion(&mut self) {
        let opts = &self.options;
        let n = self.nodes.len();
        for i in 0..n {
            let q1 = opts.charge(self.is_file[i]);
            let mut total = Vector::zero();
            for j in 0..n {
                // Files and folders never repel each other.
                if i == j || self.is_file[i] != self.is_file[j] {
                    continue;
                }
                let q2 = opts.charge(self.is_file[j]);
                total += forces::repulsion(
                    self.positions[i],
                    self.positions[j],
                    q1,
                    q2,
                    opts.repulsion_scale,
                );
            }
            self.forces[i] += total;
        }
    }

    fn accumulate_springs(&mut self) {
        let opts = &self.options;
        for edge in &self.edges {
            let (a, b) = (edge.child, edge.parent);
            let (a_file, b_file) = (self.is_file[a], self.is_file[b]);
            let (stiffness, slack) = opts.spring(a_file, b_file);
            let rest = self.radii[a] + self.radii[b] + slack;
            let Some(force) = forces::spring(
                self.positions[a],
                self.positions[b],
                stiffness,
                rest,
                opts.spring_scale,
            ) else {
                continue;
            };
            let (to_a, to_b) = forces::spring_targets(a_file, b_file);
            if to_a {
                self.forces[a] += force;
            }
            if to_b {
                self.forces[b] -= force;
            }
        }
    }

    fn integrate(&self, tree: &mut Tree) -> Result<f64> {
        let opts = &self.options;
        let mut max_speed: f64 = 0.0;
        for (slot, &id) in self.nodes.iter().enumerate().skip(1) {
            let body = tree.body_mut(id).map_err(|_| Error::StaleHandle)?;
            let acceleration = self.forces[slot] / body.mass / opts.substeps;
            body.velocity = geom::sum(geom::scale(body.velocity, opts.damping), acceleration);
            body.center += body.velocity / opts.substeps;
            max_speed = max_speed.max(geom::length(body.velocity));
        }
        Ok(max_speed)
    }
}

fn grow_if_full<T>(v: &mut Vec<T>) -> Result<()> {
    if v.len() == v.capacity() {
        v.try_reserve_exact(v.capacity().max(1))?;
        debug!(capacity = v.capacity(), "grew balancer working set");
    }
    Ok(())
}
