#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Arc-consistency propagation (AC-3).
//!
//! An arc `(x, y)` is the directive "make `x` consistent with `y`": every
//! candidate of `x` must have at least one supporting candidate in `y` at the
//! shared overlap offsets. [`ac3`] drains a worklist of arcs, revising domains
//! until either a domain empties (contradiction) or the worklist drains with
//! every domain non-empty.
//!
//! Correctness does not depend on processing order, only on exhaustion, so
//! both a FIFO [`ArcQueue`] and a LIFO [`ArcStack`] are provided; the queue is
//! the default. Duplicate pending arcs are harmless, just extra work, so the
//! worklist does not deduplicate.

use crate::csp::domains::DomainStore;
use crate::csp::solver::SearchStats;
use crate::puzzle::crossword::{letter_at, Crossword};
use crate::puzzle::variable::Variable;
use std::collections::VecDeque;

/// An ordered pair of slots: make the first consistent with the second.
pub type Arc = (Variable, Variable);

/// The propagation worklist.
pub trait Worklist: Default {
    fn push(&mut self, arc: Arc);
    fn pop(&mut self) -> Option<Arc>;
}

/// FIFO worklist, the textbook AC-3 queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArcQueue(VecDeque<Arc>);

impl Worklist for ArcQueue {
    fn push(&mut self, arc: Arc) {
        self.0.push_back(arc);
    }

    fn pop(&mut self) -> Option<Arc> {
        self.0.pop_front()
    }
}

/// LIFO worklist. Reaches the same fixpoint as [`ArcQueue`], sometimes with a
/// different amount of intermediate work.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArcStack(Vec<Arc>);

impl Worklist for ArcStack {
    fn push(&mut self, arc: Arc) {
        self.0.push(arc);
    }

    fn pop(&mut self) -> Option<Arc> {
        self.0.pop()
    }
}

/// All ordered pairs of distinct slots: the seed for the initial full pass.
#[must_use]
pub fn all_arcs(crossword: &Crossword) -> Vec<Arc> {
    let variables = crossword.variables();
    let mut arcs = Vec::with_capacity(variables.len() * variables.len().saturating_sub(1));
    for &x in variables {
        for &y in variables {
            if x != y {
                arcs.push((x, y));
            }
        }
    }
    arcs
}

/// The arcs `(neighbor, var)` for every slot crossing `var`: the seed for the
/// restricted pass after a tentative assignment of `var`.
#[must_use]
pub fn neighbor_arcs(crossword: &Crossword, var: Variable) -> Vec<Arc> {
    crossword.neighbors(var).map(|n| (n, var)).collect()
}

/// Makes `x` arc-consistent with `y` by removing unsupported candidates from
/// `x`'s domain. Returns true iff at least one candidate was removed.
///
/// Slots that do not cross never constrain each other, so the revision is a
/// no-op for them. A candidate too short to reach the overlap offset counts
/// as unsupported; node consistency removes such words up front, but the
/// revision stays well-defined without it.
pub fn revise(
    domains: &mut DomainStore,
    crossword: &Crossword,
    x: Variable,
    y: Variable,
    stats: &mut SearchStats,
) -> bool {
    let Some((i, j)) = crossword.overlap(x, y) else {
        return false;
    };

    let unsupported: Vec<String> = domains
        .candidates(x)
        .filter(|wx| {
            let cx = letter_at(wx, i);
            cx.is_none()
                || !domains
                    .candidates(y)
                    .any(|wy| letter_at(wy, j) == cx)
        })
        .map(String::from)
        .collect();

    for word in &unsupported {
        domains.remove(x, word);
        stats.removals += 1;
    }

    !unsupported.is_empty()
}

/// Enforces arc consistency over the domains reachable from `arcs`.
///
/// Returns false as soon as a revision empties a domain; the domains are then
/// partially revised and the caller must treat the branch as dead (the search
/// restores its pre-trial snapshot). Returns true once the worklist drains
/// with every touched domain non-empty. An empty seed trivially returns true
/// and changes nothing.
///
/// Terminates because revisions only ever shrink domains and the neighbor
/// relation is finite.
pub fn ac3<W, I>(
    domains: &mut DomainStore,
    crossword: &Crossword,
    arcs: I,
    stats: &mut SearchStats,
) -> bool
where
    W: Worklist,
    I: IntoIterator<Item = Arc>,
{
    let mut worklist = W::default();
    for arc in arcs {
        worklist.push(arc);
    }

    while let Some((x, y)) = worklist.pop() {
        if revise(domains, crossword, x, y, stats) {
            stats.revisions += 1;
            if domains.is_empty(x) {
                return false;
            }
            for z in crossword.neighbors(x) {
                if z != y {
                    worklist.push((z, x));
                }
            }
        }
    }

    true
}
