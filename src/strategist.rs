//! An agent to pick moves by depth-limited minimax

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::{error::SearchError, game::GameState, moves::Move, player::Player, WIN_SCORE};

use std::time::Instant;

/// Bound strictly outside every reachable score
const INFINITY: i32 = WIN_SCORE + 1;

/// A depth-limited minimax agent
///
/// # Notes
/// Positions are scored only by whether they are won or lost (see
/// [`Board::score`](crate::board::Board::score)), and both sides are assumed
/// to play for their own score, so a child's value is the negation of the
/// opponent's. The search uses alpha-beta pruning, but the root keeps every
/// move that reaches the best score and picks between them with `rng`, so
/// the chosen move is drawn uniformly from the same set plain minimax would
/// produce.
#[derive(Clone, Debug)]
pub struct MinimaxStrategist<R = StdRng> {
    depth: u32,
    rng: R,
    parallel: bool,

    /// The number of nodes searched by this `MinimaxStrategist` so far (for diagnostics only)
    pub node_count: usize,
}

impl<R: Rng> MinimaxStrategist<R> {
    /// Creates a strategist looking `depth` plies ahead (at least one)
    pub fn new(depth: u32, rng: R) -> Self {
        Self {
            depth: depth.max(1),
            rng,
            parallel: false,
            node_count: 0,
        }
    }

    /// Evaluate the root moves on the rayon thread pool. The chosen move
    /// does not depend on this setting.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Picks the best move for `player`, whose chip is the next to be placed
    /// in `state`. The returned move carries its minimax score.
    pub fn best_move<const W: usize, const H: usize, const K: usize>(
        &mut self,
        state: &GameState<W, H, K>,
        player: Player,
    ) -> Result<Move, SearchError> {
        let start = Instant::now();

        let best_moves = self.best_moves(state, player)?;
        let chosen = *best_moves
            .choose(&mut self.rng)
            .ok_or(SearchError::NoLegalMoves)?;

        debug!(
            player = %player,
            depth = self.depth,
            column = chosen.column,
            score = chosen.score,
            candidates = best_moves.len(),
            nodes = self.node_count,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search finished"
        );
        Ok(chosen)
    }

    /// Every move reaching the best score for `player`, in ascending column
    /// order, without drawing from the random source
    pub fn best_moves<const W: usize, const H: usize, const K: usize>(
        &mut self,
        state: &GameState<W, H, K>,
        player: Player,
    ) -> Result<Vec<Move>, SearchError> {
        let moves = state.legal_moves();
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        let scored = if self.parallel {
            self.score_root_parallel(state, player, moves)
        } else {
            self.score_root(state, player, moves)
        };

        let best_score = scored
            .iter()
            .map(|mv| mv.score)
            .max()
            .ok_or(SearchError::NoLegalMoves)?;
        Ok(scored
            .into_iter()
            .filter(|mv| mv.score == best_score)
            .collect())
    }

    /// Scores every root move in ascending column order. Each child is
    /// searched with its lower bound one below the best score so far, so
    /// moves tying the best are scored exactly and weaker moves are cut.
    fn score_root<const W: usize, const H: usize, const K: usize>(
        &mut self,
        state: &GameState<W, H, K>,
        player: Player,
        moves: Vec<Move>,
    ) -> Vec<Move> {
        let mut best = -INFINITY;
        let mut scored = Vec::with_capacity(moves.len());

        for mv in moves {
            let mut child = *state;
            child.apply(mv);

            let score = -negamax(
                &child,
                player.opponent(),
                self.depth - 1,
                -INFINITY,
                -(best - 1),
                &mut self.node_count,
            );
            trace!(column = mv.column, score, "root move");

            best = best.max(score);
            scored.push(mv.with_score(score));
        }
        scored
    }

    /// Like [`score_root`](Self::score_root), but the children are searched
    /// concurrently with full windows
    fn score_root_parallel<const W: usize, const H: usize, const K: usize>(
        &mut self,
        state: &GameState<W, H, K>,
        player: Player,
        moves: Vec<Move>,
    ) -> Vec<Move> {
        let depth = self.depth;
        let results: Vec<(Move, usize)> = moves
            .par_iter()
            .map(|&mv| {
                let mut nodes = 0;
                let mut child = *state;
                child.apply(mv);

                let score = -negamax(
                    &child,
                    player.opponent(),
                    depth - 1,
                    -INFINITY,
                    INFINITY,
                    &mut nodes,
                );
                (mv.with_score(score), nodes)
            })
            .collect();

        results
            .into_iter()
            .map(|(mv, nodes)| {
                trace!(column = mv.column, score = mv.score, "root move");
                self.node_count += nodes;
                mv
            })
            .collect()
    }
}

/// Fail-soft alpha-beta negamax
///
/// Returns the value of `state` for `player`, exact when it lies strictly
/// between `alpha` and `beta`, otherwise a bound on the same side.
fn negamax<const W: usize, const H: usize, const K: usize>(
    state: &GameState<W, H, K>,
    player: Player,
    depth: u32,
    mut alpha: i32,
    beta: i32,
    node_count: &mut usize,
) -> i32 {
    *node_count += 1;

    if depth == 0 || state.is_terminal_for(player) {
        return state.score(player);
    }

    let mut value = -INFINITY;
    for mv in state.legal_moves() {
        let mut child = *state;
        child.apply(mv);

        // the search window is flipped for the other player
        let score = -negamax(&child, player.opponent(), depth - 1, -beta, -alpha, node_count);
        value = value.max(score);
        alpha = alpha.max(score);
        // a perfect opponent will not allow this line
        if alpha >= beta {
            break;
        }
    }
    value
}

/// Runs one search for `player` on `state` with a strategist seeded by `rng_seed`,
/// returning the chosen column
pub fn request_ai_move<const W: usize, const H: usize, const K: usize>(
    state: &GameState<W, H, K>,
    player: Player,
    depth: u32,
    rng_seed: u64,
) -> Result<usize, SearchError> {
    let mut strategist = MinimaxStrategist::new(depth, StdRng::seed_from_u64(rng_seed));
    strategist.best_move(state, player).map(|mv| mv.column)
}
