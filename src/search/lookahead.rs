use serde::{Deserialize, Serialize};

use crate::board::{Grid, Position};
use crate::rules::legality::{legal_plies, plies, MoveSource, Uncached};
use crate::rules::transition::transition;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Every line, every node.
    #[default]
    Exhaustive,
    /// Root move paired with each leaf; intermediate plies dropped.
    Pruned,
}

/// Where moves that expose the mover's own king are filtered out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SelfCheck {
    #[default]
    Root,
    EveryPly,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub depth: u32,
    pub mode: Mode,
    pub self_check: SelfCheck,
}

impl SearchParams {
    pub fn new(depth: u32, mode: Mode) -> Self { Self { depth, mode, ..Self::default() } }
}

/// One path through the tree. Nodes keep their own turn-relative grids;
/// `views` turns them all to face the side that was to move at the root.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Line {
    origin: u32,
    nodes: Vec<Position>,
}

impl Line {
    pub fn new(root: &Position, nodes: Vec<Position>) -> Self { Self { origin: root.move_count, nodes } }

    pub fn nodes(&self) -> &[Position] { &self.nodes }

    pub fn len(&self) -> usize { self.nodes.len() }

    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    pub fn first(&self) -> Option<&Position> { self.nodes.first() }

    pub fn last(&self) -> Option<&Position> { self.nodes.last() }

    /// Node grids as seen from the root's side of the table.
    pub fn views(&self) -> Vec<Grid> {
        self.nodes
            .iter()
            .map(|n| if n.move_count.wrapping_sub(self.origin) % 2 == 1 { n.grid.swapped() } else { n.grid })
            .collect()
    }
}

/// Successor positions, optionally dropping moves that expose the mover's king.
pub fn children<S: MoveSource + ?Sized>(src: &S, position: &Position, self_check: bool) -> Vec<Position> {
    let moves = if self_check { legal_plies(src, position) } else { plies(src, &position.grid) };
    moves.iter().map(|pm| transition(position, pm)).collect()
}

// Depth-first over the tree below a root, one leaf per call. `stack[i]`
// holds the unvisited children of `path[i - 1]` (of the root for i = 0),
// so `path.len() + 1 == stack.len()` between calls.
struct Walk<S> {
    src: S,
    depth: usize,
    every_ply: bool,
    path: Vec<Position>,
    stack: Vec<std::vec::IntoIter<Position>>,
}

impl<S: MoveSource> Walk<S> {
    fn new(src: S, root: &Position, depth: usize, self_check: SelfCheck) -> Self {
        let stack = vec![children(&src, root, true).into_iter()];
        Self { src, depth, every_ply: self_check == SelfCheck::EveryPly, path: Vec::with_capacity(depth), stack }
    }

    fn empty(src: S) -> Self {
        Self { src, depth: 0, every_ply: false, path: Vec::new(), stack: Vec::new() }
    }

    /// Next leaf: either a node at full depth, or a terminal node reached
    /// early (the caller pads with it).
    fn advance(&mut self) -> Option<Position> {
        loop {
            let top = self.stack.last_mut()?;
            let Some(child) = top.next() else {
                self.stack.pop();
                self.path.pop();
                continue;
            };
            if self.path.len() + 1 == self.depth || child.is_terminal() {
                return Some(child);
            }
            let next = children(&self.src, &child, self.every_ply);
            self.path.push(child);
            self.stack.push(next.into_iter());
        }
    }
}

/// Lazy enumeration of lines below a root. Memory stays proportional to
/// depth times branching, however many lines come out.
pub struct Lookahead<S> {
    walk: Walk<S>,
    root: Position,
    mode: Mode,
    seed: Option<Line>,
}

impl<S: MoveSource> Lookahead<S> {
    pub fn new(src: S, root: &Position, params: SearchParams) -> Self {
        let depth = params.depth as usize;
        let seed = if depth == 0 {
            Some(Line::new(root, vec![*root]))
        } else if root.is_terminal() {
            let n = if params.mode == Mode::Pruned { 2 } else { depth };
            Some(Line::new(root, vec![*root; n]))
        } else {
            None
        };
        let walk = if seed.is_some() { Walk::empty(src) } else { Walk::new(src, root, depth, params.self_check) };
        Self { walk, root: *root, mode: params.mode, seed }
    }
}

impl<S: MoveSource> Iterator for Lookahead<S> {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        if let Some(line) = self.seed.take() { return Some(line); }
        let leaf = self.walk.advance()?;
        let nodes = match self.mode {
            Mode::Exhaustive => {
                let mut nodes = Vec::with_capacity(self.walk.depth);
                nodes.extend_from_slice(&self.walk.path);
                nodes.resize(self.walk.depth, leaf);
                nodes
            }
            Mode::Pruned => vec![self.walk.path.first().copied().unwrap_or(leaf), leaf],
        };
        Some(Line::new(&self.root, nodes))
    }
}

/// Every line of exactly `depth` positions below `position`.
pub fn enumerate_exhaustive(position: &Position, depth: u32) -> Lookahead<Uncached> {
    Lookahead::new(Uncached, position, SearchParams::new(depth, Mode::Exhaustive))
}

/// (root move, leaf) pairs for every path of `depth` plies below `position`.
pub fn enumerate_pruned(position: &Position, depth: u32) -> Lookahead<Uncached> {
    Lookahead::new(Uncached, position, SearchParams::new(depth, Mode::Pruned))
}
