//! Knight-move adjacency between keypad keys.

use std::sync::OnceLock;

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::coord::KNIGHT_DELTAS;
use crate::core::key::{Key, KEY_COUNT};
use crate::error::{KeypadError, Result};
use crate::keypad::layout::KeypadLayout;

const fn k(digit: u8) -> Key {
    Key::from_digit(digit)
}

/// The reference adjacency table, indexed by key.
static KNIGHT_TABLE: [&[Key]; KEY_COUNT] = [
    &[k(4), k(6)],
    &[k(6), k(8)],
    &[k(7), k(9)],
    &[k(4), k(8)],
    &[k(3), k(9), k(0)],
    &[],
    &[k(1), k(7), k(0)],
    &[k(2), k(6)],
    &[k(1), k(3)],
    &[k(2), k(4)],
];

/// Position of a key in keypad reading order: `1..=9` then `0`.
fn reading_rank(key: Key) -> u8 {
    match key.digit() {
        0 => 10,
        d => d,
    }
}

/// Immutable mapping from each key to the ordered list of keys a knight reaches from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveGraph {
    adjacency: Vec<Vec<Key>>,
}

impl MoveGraph {
    /// The process-wide reference graph, built once on first use.
    pub fn standard() -> &'static MoveGraph {
        static STANDARD: OnceLock<MoveGraph> = OnceLock::new();
        STANDARD.get_or_init(|| {
            let graph = MoveGraph {
                adjacency: KNIGHT_TABLE.iter().map(|n| n.to_vec()).collect(),
            };
            graph.log_built("table");
            graph
        })
    }

    /// Build the graph geometrically: step from each key's cell by every knight
    /// delta and keep the steps that land on a key. Neighbors are listed in
    /// keypad reading order.
    pub fn derive(layout: &KeypadLayout) -> MoveGraph {
        let adjacency = Key::ALL
            .iter()
            .map(|&from| {
                let c = layout.cell(from);
                let mut reached: Vec<Key> = KNIGHT_DELTAS
                    .iter()
                    .filter_map(|&d| layout.key_at(c + d))
                    .collect();
                reached.sort_unstable_by_key(|&key| reading_rank(key));
                reached
            })
            .collect();
        let graph = MoveGraph { adjacency };
        graph.log_built("derived");
        graph
    }

    /// Build from an explicit table. Entry `i` holds the neighbors of key `i`.
    ///
    /// The table is taken as given: asymmetric pairs are reported, not repaired.
    pub fn from_adjacency(adjacency: Vec<Vec<Key>>) -> Result<MoveGraph> {
        if adjacency.len() != KEY_COUNT {
            return Err(KeypadError::InvalidArgument {
                name: "adjacency",
                value: adjacency.len() as i64,
                reason: "table must have one entry per key (10)",
            });
        }
        let graph = MoveGraph { adjacency };
        graph.log_built("custom");
        Ok(graph)
    }

    fn log_built(&self, source: &'static str) {
        debug!(
            source,
            edges = self.out_degree_sum(),
            "move graph built"
        );
        for (a, b) in self.asymmetric_pairs() {
            warn!(from = %a, to = %b, "asymmetric edge: reverse move missing");
        }
    }

    /// Neighbors of `key` in table order. Empty for a dead end.
    #[inline]
    pub fn neighbors(&self, key: Key) -> &[Key] {
        &self.adjacency[key.index()]
    }

    /// Like [`MoveGraph::neighbors`], for an unvalidated position.
    pub fn neighbors_of(&self, position: i64) -> Result<&[Key]> {
        Ok(self.neighbors(Key::new(position)?))
    }

    /// Every directed edge, in key order then table order.
    pub fn edges(&self) -> impl Iterator<Item = (Key, Key)> + '_ {
        Key::ALL
            .into_iter()
            .flat_map(move |from| self.neighbors(from).iter().map(move |&to| (from, to)))
    }

    pub fn out_degree_sum(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Directed edges `a -> b` for which `b -> a` is absent.
    pub fn asymmetric_pairs(&self) -> Vec<(Key, Key)> {
        self.edges()
            .filter(|&(a, b)| !self.neighbors(b).contains(&a))
            .collect()
    }
}
