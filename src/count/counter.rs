use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::key::{Key, KEY_COUNT};
use crate::error::{KeypadError, Result};
use crate::keypad::graph::MoveGraph;

/// How sequence counts are computed. All strategies return the same numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Walks every sequence depth-first. Time grows with the count itself.
    Exhaustive,
    /// Depth-first over `(key, remaining)` pairs, each evaluated once.
    Memoized,
    /// One count per key, advanced one step at a time.
    #[default]
    Tabulated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StartCount {
    pub key: Key,
    pub count: u64,
}

/// Result of counting sequences of `moves` moves from every start key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountReport {
    pub moves: u64,
    pub strategy: Strategy,
    pub total: u64,
    pub per_start: Vec<StartCount>,
}

/// Counts knight-move sequences over a borrowed [`MoveGraph`].
#[derive(Debug, Clone, Copy)]
pub struct MoveCounter<'g> {
    graph: &'g MoveGraph,
    strategy: Strategy,
}

impl<'g> MoveCounter<'g> {
    pub fn new(graph: &'g MoveGraph) -> Self {
        Self {
            graph,
            strategy: Strategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sequences of exactly `remaining` moves from `start`.
    ///
    /// Zero moves is one sequence (staying put); a dead end with moves left is zero.
    /// Fails with `Overflow` only when the count for `start` itself exceeds `u64`.
    pub fn count_sequences(&self, start: Key, remaining: u64) -> Result<u64> {
        let overflow = KeypadError::Overflow { moves: remaining };
        let table = tabulate(self.graph, remaining);
        let Some(expected) = table[start.index()] else {
            return Err(overflow);
        };
        match self.strategy {
            Strategy::Tabulated => Ok(expected),
            // The walking strategies only run once the table has shown the
            // result fits, so they never descend into an overflowing tree.
            Strategy::Exhaustive => walk_all(self.graph, start, remaining).ok_or(overflow),
            Strategy::Memoized => memoized(self.graph, start, remaining).ok_or(overflow),
        }
    }

    /// `count_sequences(key, remaining)` for every key, indexed by key.
    pub fn counts_by_start(&self, remaining: u64) -> Result<[u64; KEY_COUNT]> {
        let mut out = [0u64; KEY_COUNT];
        for key in Key::ALL {
            out[key.index()] = self.count_sequences(key, remaining)?;
        }
        Ok(out)
    }

    /// Number of sequences visiting `num_moves` keys in total, summed over all starts.
    ///
    /// Requires `num_moves >= 1`.
    pub fn total_sequences_from_all_starts(&self, num_moves: u64) -> Result<u64> {
        Ok(self.report(num_moves)?.total)
    }

    pub fn report(&self, num_moves: u64) -> Result<CountReport> {
        if num_moves == 0 {
            return Err(KeypadError::InvalidArgument {
                name: "num_moves",
                value: 0,
                reason: "at least one move is required",
            });
        }
        let overflow = KeypadError::Overflow { moves: num_moves };
        let counts = self.counts_by_start(num_moves - 1).map_err(|_| overflow)?;
        let total = counts
            .iter()
            .try_fold(0u64, |acc, &c| acc.checked_add(c))
            .ok_or(KeypadError::Overflow { moves: num_moves })?;

        debug!(num_moves, strategy = ?self.strategy, total, "counted sequences");

        Ok(CountReport {
            moves: num_moves,
            strategy: self.strategy,
            total,
            per_start: Key::ALL
                .iter()
                .map(|&key| StartCount {
                    key,
                    count: counts[key.index()],
                })
                .collect(),
        })
    }
}

/// Count every sequence leaf by leaf, with an explicit stack.
fn walk_all(graph: &MoveGraph, start: Key, remaining: u64) -> Option<u64> {
    let mut stack = vec![(start, remaining)];
    let mut count = 0u64;
    while let Some((pos, r)) = stack.pop() {
        if r == 0 {
            count = count.checked_add(1)?;
            continue;
        }
        stack.extend(graph.neighbors(pos).iter().map(|&n| (n, r - 1)));
    }
    Some(count)
}

/// Post-order evaluation of `(key, remaining)` pairs with a cache and an explicit stack.
fn memoized(graph: &MoveGraph, start: Key, remaining: u64) -> Option<u64> {
    if remaining == 0 {
        return Some(1);
    }
    let mut memo: FxHashMap<(Key, u64), u64> = FxHashMap::default();
    let mut stack = vec![(start, remaining)];
    while let Some(&(pos, r)) = stack.last() {
        if memo.contains_key(&(pos, r)) {
            stack.pop();
            continue;
        }
        let mut total = 0u64;
        let mut pending = false;
        for &next in graph.neighbors(pos) {
            let sub = if r == 1 {
                Some(1)
            } else {
                memo.get(&(next, r - 1)).copied()
            };
            match sub {
                Some(c) => total = total.checked_add(c)?,
                None => {
                    pending = true;
                    stack.push((next, r - 1));
                }
            }
        }
        if !pending {
            memo.insert((pos, r), total);
            stack.pop();
        }
    }
    memo.get(&(start, remaining)).copied()
}

/// After `s` rounds, `ways[k]` is the number of `s`-move sequences starting at `k`,
/// or `None` once that number no longer fits in `u64`.
///
/// `None` only spreads to keys that sum it, so dead ends stay at zero. Stops early
/// once a round leaves the table unchanged.
fn tabulate(graph: &MoveGraph, remaining: u64) -> [Option<u64>; KEY_COUNT] {
    let mut ways = [Some(1u64); KEY_COUNT];
    for _ in 0..remaining {
        let mut next = [Some(0u64); KEY_COUNT];
        for key in Key::ALL {
            next[key.index()] = graph
                .neighbors(key)
                .iter()
                .try_fold(0u64, |acc, n| acc.checked_add(ways[n.index()]?));
        }
        if next == ways {
            break;
        }
        ways = next;
    }
    ways
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STRATEGIES: [Strategy; 3] =
        [Strategy::Exhaustive, Strategy::Memoized, Strategy::Tabulated];

    fn key(n: i64) -> Key {
        Key::new(n).unwrap()
    }

    #[test]
    fn zero_moves_is_one_sequence_everywhere() {
        for s in ALL_STRATEGIES {
            let c = MoveCounter::new(MoveGraph::standard()).with_strategy(s);
            for k in Key::ALL {
                assert_eq!(c.count_sequences(k, 0).unwrap(), 1, "{s:?} {k}");
            }
        }
    }

    #[test]
    fn dead_end_has_no_longer_sequences() {
        for s in ALL_STRATEGIES {
            let c = MoveCounter::new(MoveGraph::standard()).with_strategy(s);
            for n in [1, 7, 53, 54, 60, 1000, 5_000_000_000] {
                assert_eq!(c.count_sequences(key(5), n).unwrap(), 0, "{s:?} {n}");
            }
        }
    }

    #[test]
    fn one_move_counts_are_out_degrees() {
        let c = MoveCounter::new(MoveGraph::standard());
        assert_eq!(c.count_sequences(key(0), 1).unwrap(), 2);
        assert_eq!(c.count_sequences(key(4), 1).unwrap(), 3);
    }

    #[test]
    fn totals_for_small_move_counts() {
        for s in ALL_STRATEGIES {
            let c = MoveCounter::new(MoveGraph::standard()).with_strategy(s);
            assert_eq!(c.total_sequences_from_all_starts(1).unwrap(), 10);
            assert_eq!(c.total_sequences_from_all_starts(2).unwrap(), 20);
            assert_eq!(c.total_sequences_from_all_starts(3).unwrap(), 46);
            assert_eq!(c.total_sequences_from_all_starts(4).unwrap(), 104);
        }
    }

    #[test]
    fn zero_move_total_is_rejected() {
        let c = MoveCounter::new(MoveGraph::standard());
        assert!(matches!(
            c.total_sequences_from_all_starts(0),
            Err(KeypadError::InvalidArgument { name: "num_moves", value: 0, .. })
        ));
    }

    #[test]
    fn overflow_reports_the_requested_move_count() {
        for s in ALL_STRATEGIES {
            let c = MoveCounter::new(MoveGraph::standard()).with_strategy(s);
            assert!(matches!(
                c.count_sequences(key(4), 200),
                Err(KeypadError::Overflow { moves: 200 })
            ));
            assert!(matches!(
                c.total_sequences_from_all_starts(60),
                Err(KeypadError::Overflow { moves: 60 })
            ));
        }
        let c = MoveCounter::new(MoveGraph::standard());
        assert!(c.total_sequences_from_all_starts(40).is_ok());
    }

    #[test]
    fn memoized_handles_very_deep_requests() {
        let c = MoveCounter::new(MoveGraph::standard()).with_strategy(Strategy::Memoized);
        assert!(matches!(
            c.count_sequences(key(0), 2_000_000),
            Err(KeypadError::Overflow { moves: 2_000_000 })
        ));
        assert_eq!(c.count_sequences(key(5), 2_000_000).unwrap(), 0);
    }

    #[test]
    fn memoized_matches_table_just_below_overflow() {
        let g = MoveGraph::standard();
        let tab = MoveCounter::new(g);
        let memo = MoveCounter::new(g).with_strategy(Strategy::Memoized);
        for n in 45..=56 {
            for k in Key::ALL {
                assert_eq!(
                    tab.count_sequences(k, n).ok(),
                    memo.count_sequences(k, n).ok(),
                    "{k} at {n}"
                );
            }
        }
    }

    #[test]
    fn table_keeps_fitting_counts_next_to_overflowed_ones() {
        // A single self-looping key stays at one; its neighbor's count doubles.
        let mut adj: Vec<Vec<Key>> = vec![Vec::new(); KEY_COUNT];
        adj[1] = vec![key(1)];
        adj[2] = vec![key(2), key(2)];
        let g = MoveGraph::from_adjacency(adj).unwrap();
        let table = tabulate(&g, 100);
        assert_eq!(table[1], Some(1));
        assert_eq!(table[2], None);
        assert_eq!(table[3], Some(0));
    }

    #[test]
    fn report_breaks_total_down_by_start() {
        let r = MoveCounter::new(MoveGraph::standard()).report(2).unwrap();
        assert_eq!(r.total, 20);
        assert_eq!(r.per_start.len(), 10);
        assert_eq!(r.per_start[4], StartCount { key: key(4), count: 3 });
        assert_eq!(r.per_start[5].count, 0);
        assert_eq!(r.per_start.iter().map(|s| s.count).sum::<u64>(), r.total);
    }
}
