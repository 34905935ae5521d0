use crate::collapse::CollapseState;
use crate::hierarchy::HierarchyIndex;
use crate::model::{NodeId, NodeStore};
use crate::visibility::VisibleSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Horizontal distance between two levels
pub const DEFAULT_COLUMN_WIDTH: f64 = 250.0;

/// Vertical distance between two neighbours of the same level
pub const DEFAULT_ROW_SPACING: f64 = 120.0;

/// What a node's vertical rank is counted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RankBasis {
    /// Rank among the visible nodes of the level. Collapsing closes gaps.
    #[default]
    Visible,
    /// Rank among all nodes of the level. Nodes keep their slot while
    /// unrelated subtrees are collapsed.
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    pub column_width: f64,
    pub row_spacing: f64,
    pub rank_basis: RankBasis,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            column_width: DEFAULT_COLUMN_WIDTH,
            row_spacing: DEFAULT_ROW_SPACING,
            rank_basis: RankBasis::default(),
        }
    }
}

/// A visible node, positioned and ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub id: NodeId,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub level: u32,
    /// The node has children, visible or not, and can be toggled.
    pub has_children: bool,
    pub collapsed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

pub struct LayoutEngine {
    settings: LayoutSettings,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutSettings::default())
    }
}

impl LayoutEngine {
    pub fn new(settings: LayoutSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Positions every visible node.
    ///
    /// Columns are levels, rows are ranks within a level. Each level is
    /// centred on `y = 0`. The result is ordered by level, then input order,
    /// and depends on nothing but its arguments.
    pub fn compute_positions(
        &self,
        store: &NodeStore,
        index: &HierarchyIndex,
        visible: &VisibleSet,
        collapse: &CollapseState,
    ) -> Vec<LayoutNode> {
        let mut levels: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
        for (pos, node) in store.nodes().iter().enumerate() {
            if self.settings.rank_basis == RankBasis::All || visible.is_visible(pos) {
                levels.entry(node.level).or_default().push(pos);
            }
        }

        let mut positioned = Vec::with_capacity(visible.len());

        for (level, members) in &levels {
            let x = self.column_x(*level);
            let count = members.len();

            for (rank, &pos) in members.iter().enumerate() {
                if !visible.is_visible(pos) {
                    continue;
                }

                let node = &store.nodes()[pos];
                positioned.push(LayoutNode {
                    id: node.id.clone(),
                    label: node.text.clone(),
                    x,
                    y: self.row_y(rank, count),
                    level: node.level,
                    has_children: index.has_children(pos),
                    collapsed: collapse.contains(&node.id),
                });
            }
        }

        positioned
    }

    fn column_x(&self, level: u32) -> f64 {
        f64::from(level.saturating_sub(1)) * self.settings.column_width
    }

    fn row_y(&self, rank: usize, count: usize) -> f64 {
        let offset = rank as f64 - (count as f64 - 1.0) / 2.0;
        offset * self.settings.row_spacing
    }
}

/// Smallest box holding every node anchor, `None` for an empty layout.
pub fn bounds(nodes: &[LayoutNode]) -> Option<Bounds> {
    let first = nodes.first()?;
    let start = Bounds {
        min_x: first.x,
        min_y: first.y,
        max_x: first.x,
        max_y: first.y,
    };

    Some(nodes.iter().fold(start, |b, node| Bounds {
        min_x: b.min_x.min(node.x),
        min_y: b.min_y.min(node.y),
        max_x: b.max_x.max(node.x),
        max_y: b.max_y.max(node.y),
    }))
}
