use gitstories_balancer::{Balancer, SettleStats};
use gitstories_core::{ApplyReport, Color, History, NodeKind, Point, Tree, apply_commit, point};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::SceneConfig;
use crate::error::Result;
use crate::render::{self, DrawCommand};

/// Outcome of [`Scene::apply_next_commit`].
#[derive(Debug, Clone)]
pub struct CommitReport {
    /// Zero-based position of the commit in the history.
    pub index: usize,
    pub hash: String,
    pub errors: i32,
    pub apply: ApplyReport,
}

/// Serializable snapshot of one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeLayout {
    /// Slash-joined path from the root; empty for the root itself.
    pub path: String,
    pub kind: NodeKind,
    pub depth: usize,
    pub center: Point,
    pub radius: f64,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlaySummary {
    pub commits: usize,
    pub frames: usize,
    pub warnings: usize,
    /// Stats of the last tick, if any tick ran.
    pub last: Option<SettleStats>,
}

/// A tree, its solver and a history cursor: the headless counterpart of an animation window.
#[derive(Debug)]
pub struct Scene {
    config: SceneConfig,
    tree: Tree,
    balancer: Balancer,
    history: History,
    cursor: usize,
    frames: usize,
    current_color: Option<Color>,
    target_color: Option<Color>,
}

impl Scene {
    /// Creates the root folder at the canvas center.
    pub fn new(config: SceneConfig, history: History) -> Result<Self> {
        let center = point(
            f64::from(config.width) / 2.0,
            f64::from(config.height) / 2.0,
        );
        let tree = Tree::with_options("root", center, config.placement.clone())?;
        let balancer = Balancer::new(config.physics.clone())?;
        Ok(Self {
            config,
            tree,
            balancer,
            history,
            cursor: 0,
            frames: 0,
            current_color: None,
            target_color: None,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Number of commits applied so far.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.history.len()
    }

    /// Color that node colors are currently fading towards, once a commit has set one.
    pub fn current_color(&self) -> Option<Color> {
        self.current_color
    }

    /// One animation frame: solver tick, then one color fade step.
    pub fn tick(&mut self) -> Result<SettleStats> {
        let stats = self.balancer.tick(&mut self.tree)?;
        self.frames += 1;

        if let Some(target) = self.target_color {
            let step = self.config.fade_step;
            let current = self
                .current_color
                .map_or(target, |c| c.step_towards(target, step));
            self.current_color = Some(current);
            let root = self.tree.root();
            self.tree.fade_colors(root, current, step)?;
        }
        Ok(stats)
    }

    /// Applies the next commit of the history, or returns `None` once it is exhausted.
    ///
    /// Folders touched by the commit are painted with the highlight color, and the fade target
    /// becomes the commit's error color.
    pub fn apply_next_commit(&mut self) -> Option<CommitReport> {
        let index = self.cursor;
        let commit = self.history.get(index)?;
        self.cursor += 1;

        let apply = apply_commit(&mut self.tree, commit);
        for &folder in &apply.touched_folders {
            if let Err(error) = self.tree.set_general_color(folder, self.config.highlight) {
                warn!(%error, "could not highlight touched folder");
            }
        }
        self.target_color = Some(Color::from_error_score(commit.errors));

        info!(
            index,
            hash = commit.short_hash(),
            nodes = self.tree.len(),
            warnings = apply.warnings.len(),
            "commit"
        );
        Some(CommitReport {
            index,
            hash: commit.hash.clone(),
            errors: commit.errors,
            apply,
        })
    }

    /// Runs the host loop: a commit every `frames_per_commit` ticks until the history is
    /// exhausted, then `settle_frames` more ticks.
    pub fn play(&mut self, settle_frames: usize) -> Result<PlaySummary> {
        let mut summary = PlaySummary::default();
        while let Some(report) = self.apply_next_commit() {
            summary.commits += 1;
            summary.warnings += report.apply.warnings.len();
            for _ in 0..self.config.frames_per_commit {
                summary.last = Some(self.tick()?);
                summary.frames += 1;
            }
        }
        for _ in 0..settle_frames {
            summary.last = Some(self.tick()?);
            summary.frames += 1;
        }
        debug!(?summary, "history played");
        Ok(summary)
    }

    pub fn draw_list(&self) -> Result<Vec<DrawCommand>> {
        render::draw_list(&self.tree, self.config.line_color)
    }

    pub fn layout(&self) -> Result<Vec<NodeLayout>> {
        self.tree
            .depth_first()
            .map(|visit| -> Result<NodeLayout> {
                let body = visit.body();
                Ok(NodeLayout {
                    path: self.tree.path_of(visit.id)?,
                    kind: visit.kind(),
                    depth: visit.depth,
                    center: body.center,
                    radius: body.radius,
                    color: body.color,
                })
            })
            .collect()
    }

    pub fn render_svg(&self) -> Result<String> {
        let commands = self.draw_list()?;
        Ok(render::render_svg(
            &commands,
            self.config.width,
            self.config.height,
            self.config.background,
        ))
    }
}
