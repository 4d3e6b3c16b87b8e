#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The backtracking CSP solver.
//!
//! [`CrosswordSolver::solve`] enforces node consistency, runs one full AC-3
//! pass, then explores partial assignments depth-first. Each tentative
//! assignment is forward-checked with a restricted AC-3 pass seeded from the
//! arcs pointing at the newly assigned slot, and slots whose domains collapse
//! to a single candidate are merged into the assignment as inferences.
//!
//! Domain restoration is exact: the store is snapshotted before every
//! candidate trial and restored in full on failure, so a failed branch leaves
//! no residual shrinkage in sibling branches.

use crate::csp::assignment::Assignment;
use crate::csp::domains::DomainStore;
use crate::csp::heuristics::{
    InputOrder, Lcv, Lexicographic, MrvDegree, ValueOrdering, VariableSelection,
};
use crate::csp::propagation::{ac3, all_arcs, neighbor_arcs, ArcQueue, Worklist};
use crate::puzzle::crossword::Crossword;
use crate::puzzle::variable::Variable;

/// Static configuration of the solver's interchangeable parts.
pub trait SolverConfig {
    /// Worklist discipline for AC-3.
    type Worklist: Worklist;
    /// Variable-selection heuristic.
    type Selector: VariableSelection + Default + std::fmt::Debug;
    /// Value-ordering heuristic.
    type Ordering: ValueOrdering + Default + std::fmt::Debug;
}

/// FIFO propagation, MRV + degree selection, least-constraining-value
/// ordering. What `solve` means unless told otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultConfig;

impl SolverConfig for DefaultConfig {
    type Worklist = ArcQueue;
    type Selector = MrvDegree;
    type Ordering = Lcv;
}

/// Uninformed baseline: positional variable order, lexicographic value order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UninformedConfig;

impl SolverConfig for UninformedConfig {
    type Worklist = ArcQueue;
    type Selector = InputOrder;
    type Ordering = Lexicographic;
}

/// Counters accumulated over one `solve` run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Candidate values tried by the search.
    pub decisions: usize,
    /// AC-3 revisions that removed at least one candidate.
    pub revisions: usize,
    /// Candidate words removed by propagation (node consistency included).
    pub removals: usize,
    /// Singleton-domain assignments merged by forward checking.
    pub inferences: usize,
    /// Candidate trials undone after a dead end.
    pub backtracks: usize,
}

/// A solver over a puzzle model.
pub trait Solver {
    fn new(crossword: Crossword) -> Self;
    fn solve(&mut self) -> Option<Assignment>;
    fn stats(&self) -> SearchStats;
}

/// Backtracking search over one [`Crossword`], with exclusive ownership of
/// the domain store.
#[derive(Debug)]
pub struct CrosswordSolver<C: SolverConfig = DefaultConfig> {
    crossword: Crossword,
    domains: DomainStore,
    selector: C::Selector,
    ordering: C::Ordering,
    stats: SearchStats,
}

impl<C: SolverConfig> CrosswordSolver<C> {
    #[must_use]
    pub fn new(crossword: Crossword) -> Self {
        let domains = DomainStore::new(&crossword);
        Self {
            crossword,
            domains,
            selector: C::Selector::default(),
            ordering: C::Ordering::default(),
            stats: SearchStats::default(),
        }
    }

    /// The puzzle this solver was built over.
    #[must_use]
    pub const fn crossword(&self) -> &Crossword {
        &self.crossword
    }

    /// Counters from the most recent `solve` run.
    #[must_use]
    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Finds a complete consistent assignment, or proves none exists.
    ///
    /// Node consistency first, then one full AC-3 pass; a contradiction there
    /// already proves unsatisfiability. Otherwise backtracking search from
    /// the empty assignment.
    pub fn solve(&mut self) -> Option<Assignment> {
        self.stats = SearchStats::default();
        self.stats.removals += self.domains.enforce_node_consistency();

        let seed = all_arcs(&self.crossword);
        if !ac3::<C::Worklist, _>(&mut self.domains, &self.crossword, seed, &mut self.stats) {
            return None;
        }

        let mut assignment = Assignment::new();
        self.backtrack(&mut assignment)
    }

    /// Depth-first search over partial assignments.
    ///
    /// Returns the first complete consistent assignment reachable under the
    /// configured heuristics, leaving `assignment` as it found it when the
    /// subtree fails.
    fn backtrack(&mut self, assignment: &mut Assignment) -> Option<Assignment> {
        if assignment.is_complete(self.crossword.variables().len()) {
            return Some(assignment.clone());
        }

        let var = self
            .selector
            .select(&self.crossword, &self.domains, assignment)?;

        for word in self
            .ordering
            .order(&self.crossword, &self.domains, assignment, var)
        {
            self.stats.decisions += 1;
            assignment.insert(var, word);

            if !assignment.is_consistent(&self.crossword) {
                assignment.remove(var);
                continue;
            }

            let snapshot = self.domains.snapshot();
            let inferred = self.forward_check(assignment, var);

            if let Some(solution) = self.recurse_if_viable(assignment, inferred.as_deref()) {
                return Some(solution);
            }

            // Dead end: retract the trial, its inferences, and every domain
            // removal the restricted pass performed.
            self.stats.backtracks += 1;
            assignment.remove(var);
            if let Some(vars) = inferred {
                for v in vars {
                    assignment.remove(v);
                }
            }
            self.domains.restore(snapshot);
        }

        None
    }

    /// Runs the restricted AC-3 pass seeded from `var`'s incoming arcs and
    /// merges every forced (singleton-domain) slot into the assignment.
    ///
    /// `None` means propagation starved a domain and the trial is dead;
    /// `Some(inferred)` lists the slots the merge added, for undoing later.
    fn forward_check(
        &mut self,
        assignment: &mut Assignment,
        var: Variable,
    ) -> Option<Vec<Variable>> {
        let seed = neighbor_arcs(&self.crossword, var);
        if !ac3::<C::Worklist, _>(&mut self.domains, &self.crossword, seed, &mut self.stats) {
            return None;
        }

        let mut inferred = Vec::new();
        for &v in self.crossword.variables() {
            if assignment.contains(v) {
                continue;
            }
            if let Some(word) = self.domains.sole_candidate(v) {
                let word = word.to_owned();
                assignment.insert(v, word);
                inferred.push(v);
                self.stats.inferences += 1;
            }
        }
        Some(inferred)
    }

    /// Recurses unless forward checking already killed the trial or the
    /// merged inferences contradict each other (arc consistency does not rule
    /// out two slots being forced onto the same word).
    fn recurse_if_viable(
        &mut self,
        assignment: &mut Assignment,
        inferred: Option<&[Variable]>,
    ) -> Option<Assignment> {
        let inferred = inferred?;
        if !inferred.is_empty() && !assignment.is_consistent(&self.crossword) {
            return None;
        }
        self.backtrack(assignment)
    }
}

impl<C: SolverConfig> Solver for CrosswordSolver<C> {
    fn new(crossword: Crossword) -> Self {
        Self::new(crossword)
    }

    fn solve(&mut self) -> Option<Assignment> {
        self.solve()
    }

    fn stats(&self) -> SearchStats {
        self.stats()
    }
}
