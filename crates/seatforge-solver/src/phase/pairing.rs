//! Pairing phase: weight-maximizing matching over the compatibility graph.
//!
//! 1. Choose forced singles: when the roster is larger than twice the number
//!    of pairs the layout can seat, the student with the lowest best legal
//!    partner score goes alone, one at a time.
//! 2. Greedy matching: legal edges by descending score, committed when both
//!    ends are still free.
//! 3. Joining: while room for pairs remains, two singles pair up, directly
//!    or by splitting an existing pair between them. If that still leaves
//!    fewer pairs than a maximum-cardinality matching of the legal graph
//!    allows, the maximum matching replaces the greedy result.
//! 4. Local improvement: re-pair two pairs or swap a single into a pair, each
//!    on strict gain, followed by another round of joining.
//! 5. Forced pairing: if the layout still cannot hold every single, pair
//!    singles regardless of separation rules and report each such pair.
//!
//! Every tie breaks on ascending student index, which is id order.

use std::cmp::Ordering;
use std::time::Instant;

use petgraph::algo::maximum_matching;
use petgraph::graph::{NodeIndex, UnGraph};
use tracing::{debug, info, trace, warn};

use super::{Phase, IMPROVEMENT_EPSILON};
use crate::diagnostic::Diagnostic;
use crate::indexed::IndexedProblem;
use crate::scope::SolverScope;

const PHASE_NAME: &str = "Pairing";

/// Students grouped into pairs and singles, by index.
///
/// Pairs are stored as `(low, high)` and both lists are kept sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pairing {
    pairs: Vec<(usize, usize)>,
    singles: Vec<usize>,
}

impl Pairing {
    /// Every student alone.
    pub fn all_singles(student_count: usize) -> Self {
        Self {
            pairs: Vec::new(),
            singles: (0..student_count).collect(),
        }
    }

    pub fn new(pairs: Vec<(usize, usize)>, singles: Vec<usize>) -> Self {
        let mut pairing = Self { pairs, singles };
        pairing.normalize();
        pairing
    }

    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    pub fn singles(&self) -> &[usize] {
        &self.singles
    }

    /// Compatibility summed over all pairs.
    pub fn pair_score(&self, problem: &IndexedProblem) -> f64 {
        self.pairs.iter().map(|&(a, b)| problem.compat(a, b)).sum()
    }

    /// Pairs that break a must-separate rule.
    pub fn violation_count(&self, problem: &IndexedProblem) -> usize {
        self.pairs
            .iter()
            .filter(|&&(a, b)| problem.is_forbidden(a, b))
            .count()
    }

    fn normalize(&mut self) {
        for pair in &mut self.pairs {
            if pair.0 > pair.1 {
                *pair = (pair.1, pair.0);
            }
        }
        self.pairs.sort_unstable();
        self.singles.sort_unstable();
    }
}

/// Orders edges by descending score, then ascending `(low, high)` index.
fn by_score_desc(problem: &IndexedProblem, x: (usize, usize), y: (usize, usize)) -> Ordering {
    problem
        .compat(y.0, y.1)
        .total_cmp(&problem.compat(x.0, x.1))
        .then(x.cmp(&y))
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// A join that adds one pair.
#[derive(Debug, Clone, Copy)]
enum JoinMove {
    Direct(usize, usize),
    Through {
        pair: usize,
        s: usize,
        u: usize,
        t: usize,
        v: usize,
    },
}

/// Pairing phase.
///
/// # Example
///
/// ```
/// use seatforge_solver::phase::{Phase, PairingPhase};
///
/// let phase = PairingPhase::new(50);
/// assert_eq!(phase.phase_type_name(), "Pairing");
/// ```
#[derive(Debug, Clone)]
pub struct PairingPhase {
    improvement_pass_limit: u64,
}

impl PairingPhase {
    pub fn new(improvement_pass_limit: u64) -> Self {
        Self {
            improvement_pass_limit,
        }
    }

    /// Number of pairs the layout can seat.
    fn pair_target(problem: &IndexedProblem) -> usize {
        problem.pair_desk_count().min(problem.student_count() / 2)
    }

    /// Picks the students who sit alone before matching starts.
    fn choose_forced_singles(problem: &IndexedProblem, free: &mut [bool], count: usize) -> Vec<usize> {
        let n = problem.student_count();
        let best_available = |free: &[bool], i: usize| {
            (0..n)
                .filter(|&j| free[j] && problem.is_legal(i, j))
                .map(|j| problem.compat(i, j))
                .max_by(f64::total_cmp)
                .unwrap_or(f64::NEG_INFINITY)
        };

        let mut singles = Vec::with_capacity(count);
        for _ in 0..count {
            let pick = (0..n)
                .filter(|&i| free[i])
                .map(|i| (i, best_available(&*free, i)))
                .min_by(|x, y| x.1.total_cmp(&y.1).then(x.0.cmp(&y.0)));
            let Some((student, best)) = pick else {
                break;
            };
            free[student] = false;
            singles.push(student);
            debug!(
                event = "single_chosen",
                student = %problem.student(student),
                best_available = best,
            );
        }
        singles
    }

    /// Commits legal edges among `candidates` by descending score.
    fn greedy_match(
        scope: &mut SolverScope<'_>,
        candidates: &[usize],
        free: &mut [bool],
        pairs: &mut Vec<(usize, usize)>,
        target: usize,
    ) {
        let problem = scope.problem();
        let mut edges = Vec::new();
        for (x, &a) in candidates.iter().enumerate() {
            for &b in &candidates[x + 1..] {
                if problem.is_legal(a, b) {
                    edges.push(ordered(a, b));
                }
            }
        }
        edges.sort_by(|&x, &y| by_score_desc(problem, x, y));

        for (a, b) in edges {
            if pairs.len() >= target {
                break;
            }
            if free[a] && free[b] {
                free[a] = false;
                free[b] = false;
                pairs.push((a, b));
                scope.increment_step_count();
                debug!(
                    event = "pair_committed",
                    first = %problem.student(a),
                    second = %problem.student(b),
                    score = problem.compat(a, b),
                );
            }
        }
    }

    /// One pass of first-improvement local search. Returns true if anything changed.
    fn improvement_pass(scope: &mut SolverScope<'_>, pairing: &mut Pairing, target: usize) -> bool {
        let problem = scope.problem();
        let mut improved = false;

        // Re-pair two pairs.
        for x in 0..pairing.pairs.len() {
            for y in (x + 1)..pairing.pairs.len() {
                let (a, b) = pairing.pairs[x];
                let (c, d) = pairing.pairs[y];
                let current = problem.compat(a, b) + problem.compat(c, d);
                for (p, q) in [((a, c), (b, d)), ((a, d), (b, c))] {
                    if !problem.is_legal(p.0, p.1) || !problem.is_legal(q.0, q.1) {
                        continue;
                    }
                    let gain = problem.compat(p.0, p.1) + problem.compat(q.0, q.1) - current;
                    let accepted = gain > IMPROVEMENT_EPSILON;
                    scope.record_move(accepted);
                    trace!(event = "candidate", kind = "repair", gain = gain, accepted = accepted);
                    if accepted {
                        pairing.pairs[x] = ordered(p.0, p.1);
                        pairing.pairs[y] = ordered(q.0, q.1);
                        improved = true;
                        debug!(
                            event = "move_accepted",
                            kind = "repair",
                            first = %problem.student(p.0),
                            second = %problem.student(p.1),
                            gain = gain,
                        );
                        break;
                    }
                }
            }
        }

        // Swap a single into a pair.
        for s in 0..pairing.singles.len() {
            for x in 0..pairing.pairs.len() {
                let single = pairing.singles[s];
                let (a, b) = pairing.pairs[x];
                let current = problem.compat(a, b);
                for (stay, leave) in [(b, a), (a, b)] {
                    if !problem.is_legal(single, stay) {
                        continue;
                    }
                    let gain = problem.compat(single, stay) - current;
                    let accepted = gain > IMPROVEMENT_EPSILON;
                    scope.record_move(accepted);
                    trace!(event = "candidate", kind = "swap_single", gain = gain, accepted = accepted);
                    if accepted {
                        pairing.pairs[x] = ordered(single, stay);
                        pairing.singles[s] = leave;
                        improved = true;
                        debug!(
                            event = "move_accepted",
                            kind = "swap_single",
                            joined = %problem.student(single),
                            left = %problem.student(leave),
                            gain = gain,
                        );
                        break;
                    }
                }
            }
        }

        if Self::join_singles(scope, pairing, target) {
            improved = true;
        }

        pairing.normalize();
        improved
    }

    /// Joins singles while the layout has room for another pair.
    ///
    /// Two singles pair up directly, or through an existing pair `(a, b)`
    /// that splits into `(s, a)` and `(t, b)`. Either way one more pair
    /// outranks any score change, so the best-scoring legal join is taken
    /// even when its gain is negative. Returns true if any join happened.
    fn join_singles(scope: &mut SolverScope<'_>, pairing: &mut Pairing, target: usize) -> bool {
        let problem = scope.problem();
        let mut joined = false;

        while pairing.pairs.len() < target {
            let mut best: Option<(f64, JoinMove)> = None;
            let mut consider = |gain: f64, join: JoinMove| {
                if best.map_or(true, |(best_gain, _)| gain > best_gain) {
                    best = Some((gain, join));
                }
            };

            for (x, &s) in pairing.singles.iter().enumerate() {
                for &t in &pairing.singles[x + 1..] {
                    if problem.is_legal(s, t) {
                        consider(problem.compat(s, t), JoinMove::Direct(s, t));
                    }
                    for (p, &(a, b)) in pairing.pairs.iter().enumerate() {
                        for (u, v) in [(a, b), (b, a)] {
                            if problem.is_legal(s, u) && problem.is_legal(t, v) {
                                let gain =
                                    problem.compat(s, u) + problem.compat(t, v) - problem.compat(a, b);
                                consider(gain, JoinMove::Through { pair: p, s, u, t, v });
                            }
                        }
                    }
                }
            }

            let Some((gain, join)) = best else {
                break;
            };
            scope.record_move(true);
            match join {
                JoinMove::Direct(s, t) => {
                    pairing.singles.retain(|&x| x != s && x != t);
                    pairing.pairs.push(ordered(s, t));
                }
                JoinMove::Through { pair, s, u, t, v } => {
                    pairing.singles.retain(|&x| x != s && x != t);
                    pairing.pairs[pair] = ordered(s, u);
                    pairing.pairs.push(ordered(t, v));
                }
            }
            pairing.normalize();
            joined = true;
            debug!(event = "move_accepted", kind = "join", gain = gain, pairs = pairing.pairs.len() as u64);
        }

        joined
    }

    /// Largest set of legal pairs, regardless of score, as sorted `(low, high)`.
    fn maximum_legal_matching(problem: &IndexedProblem) -> Vec<(usize, usize)> {
        let n = problem.student_count();
        let mut graph = UnGraph::<(), ()>::with_capacity(n, 0);
        let nodes: Vec<NodeIndex> = (0..n).map(|_| graph.add_node(())).collect();
        for a in 0..n {
            for b in (a + 1)..n {
                if problem.is_legal(a, b) {
                    graph.add_edge(nodes[a], nodes[b], ());
                }
            }
        }

        let matching = maximum_matching(&graph);
        let mut pairs: Vec<(usize, usize)> = matching
            .edges()
            .map(|(a, b)| ordered(a.index(), b.index()))
            .collect();
        pairs.sort_unstable();
        pairs
    }

    /// Replaces `pairing` with a maximum legal matching when the greedy
    /// construction seated fewer legal pairs than one allows.
    ///
    /// Keeps the best-scoring `target` matched pairs. Returns true if the
    /// pairing was replaced.
    fn restart_from_maximum_matching(
        scope: &mut SolverScope<'_>,
        pairing: &mut Pairing,
        target: usize,
    ) -> bool {
        if pairing.pairs.len() >= target {
            return false;
        }
        let problem = scope.problem();
        let mut matched = Self::maximum_legal_matching(problem);
        if matched.len() <= pairing.pairs.len() {
            return false;
        }

        matched.sort_by(|&x, &y| by_score_desc(problem, x, y));
        matched.truncate(target);
        let mut seated = vec![false; problem.student_count()];
        for &(a, b) in &matched {
            seated[a] = true;
            seated[b] = true;
        }
        let singles = (0..problem.student_count()).filter(|&s| !seated[s]).collect();

        debug!(
            event = "matching_restart",
            greedy_pairs = pairing.pairs.len() as u64,
            matched_pairs = matched.len() as u64,
        );
        scope.increment_step_count();
        *pairing = Pairing::new(matched, singles);
        true
    }

    /// Pairs singles, forbidden edges included, until the layout can hold them.
    fn force_pairs(scope: &mut SolverScope<'_>, pairing: &mut Pairing) {
        let problem = scope.problem();
        let room = problem.desk_count().saturating_sub(pairing.pairs.len());
        let needed = pairing.singles.len().saturating_sub(room);
        if needed == 0 {
            return;
        }

        let mut edges = Vec::new();
        for (x, &a) in pairing.singles.iter().enumerate() {
            for &b in &pairing.singles[x + 1..] {
                edges.push(ordered(a, b));
            }
        }
        edges.sort_by(|&x, &y| {
            problem
                .is_forbidden(x.0, x.1)
                .cmp(&problem.is_forbidden(y.0, y.1))
                .then_with(|| by_score_desc(problem, x, y))
        });

        let mut free = vec![false; problem.student_count()];
        for &s in &pairing.singles {
            free[s] = true;
        }

        let mut formed = 0;
        for (a, b) in edges {
            if formed == needed {
                break;
            }
            if !(free[a] && free[b]) {
                continue;
            }
            free[a] = false;
            free[b] = false;
            pairing.pairs.push((a, b));
            formed += 1;
            scope.increment_step_count();

            if problem.is_forbidden(a, b) {
                debug!(
                    event = "forced_pair",
                    first = %problem.student(a),
                    second = %problem.student(b),
                    score = problem.compat(a, b),
                );
                scope.push_diagnostic(Diagnostic::ForcedPairing {
                    first: problem.student(a).clone(),
                    second: problem.student(b).clone(),
                    score: problem.compat(a, b),
                });
            }
        }

        pairing.singles.retain(|&s| free[s]);
        pairing.normalize();
    }
}

impl Phase for PairingPhase {
    fn solve(&mut self, solver_scope: &mut SolverScope<'_>) {
        let start = Instant::now();
        let start_steps = solver_scope.total_step_count();
        let problem = solver_scope.problem();
        let n = problem.student_count();
        let target = Self::pair_target(problem);

        info!(
            event = "phase_start",
            phase = PHASE_NAME,
            phase_index = 0u64,
            students = n as u64,
            pair_target = target as u64,
        );

        // Construction: never interrupted, so the result is always complete.
        let mut free = vec![true; n];
        let mut singles = Self::choose_forced_singles(problem, &mut free, n - 2 * target);
        let mut pairs = Vec::with_capacity(target);
        let candidates: Vec<usize> = (0..n).filter(|&i| free[i]).collect();
        Self::greedy_match(solver_scope, &candidates, &mut free, &mut pairs, target);

        // Students left unmatched join the forced singles, then singles are
        // joined while room for pairs remains. Longer re-pairings come from
        // the maximum matching.
        singles.extend((0..n).filter(|&i| free[i]));
        let mut pairing = Pairing::new(pairs, singles);
        Self::join_singles(solver_scope, &mut pairing, target);
        Self::restart_from_maximum_matching(solver_scope, &mut pairing, target);

        if target > 0 && pairing.pairs.is_empty() {
            warn!(event = "pairing_degraded", students = n as u64);
            solver_scope.push_diagnostic(Diagnostic::PairingDegraded { students: n });
        }

        // Local improvement.
        let mut passes = 0u64;
        loop {
            if solver_scope.check_termination(PHASE_NAME) {
                break;
            }
            if passes >= self.improvement_pass_limit {
                if passes > 0 {
                    solver_scope.push_diagnostic(Diagnostic::IterationBudgetExhausted {
                        phase: PHASE_NAME.to_string(),
                        limit: self.improvement_pass_limit,
                    });
                }
                break;
            }
            let improved = Self::improvement_pass(solver_scope, &mut pairing, target);
            passes += 1;
            solver_scope.increment_step_count();
            if !improved {
                break;
            }
        }

        Self::force_pairs(solver_scope, &mut pairing);
        solver_scope.set_pairing(pairing);

        let score = solver_scope.current_score();
        info!(
            event = "phase_end",
            phase = PHASE_NAME,
            phase_index = 0u64,
            duration_ms = start.elapsed().as_millis() as u64,
            steps = solver_scope.total_step_count() - start_steps,
            passes = passes,
            pairs = solver_scope.pairing().pairs().len() as u64,
            singles = solver_scope.pairing().singles().len() as u64,
            score = %score,
        );
    }

    fn phase_type_name(&self) -> &'static str {
        PHASE_NAME
    }
}
