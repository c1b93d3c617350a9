#[cfg(test)]
pub mod test {
    use anyhow::{anyhow, Result};
    use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

    use crate::*;

    /// Plain minimax without pruning, returning every best column and the score
    fn reference_minimax<const W: usize, const H: usize, const K: usize>(
        state: &GameState<W, H, K>,
        player: Player,
        depth: u32,
    ) -> (Vec<usize>, i32) {
        if depth == 0 || state.is_terminal_for(player) {
            return (vec![], state.score(player));
        }
        let mut best_score = i32::MIN;
        let mut best_columns = vec![];
        for mv in state.legal_moves() {
            let mut child = *state;
            child.apply(mv);
            let (_, opponent_score) = reference_minimax(&child, player.opponent(), depth - 1);
            let score = -opponent_score;
            if score > best_score {
                best_score = score;
                best_columns = vec![mv.column];
            } else if score == best_score {
                best_columns.push(mv.column);
            }
        }
        (best_columns, best_score)
    }

    /// Plays up to `length` random legal moves, stopping early if the game ends
    fn random_position<const W: usize, const H: usize, const K: usize>(
        rng: &mut StdRng,
        length: usize,
    ) -> Result<GameState<W, H, K>> {
        let mut state = GameState::new();
        for _ in 0..length {
            let mut next = state;
            let mv = *state
                .legal_moves()
                .choose(rng)
                .ok_or(anyhow!("no legal moves"))?;
            if next.play(mv.column)?.is_over() {
                break;
            }
            state = next;
        }
        Ok(state)
    }

    fn board_with(red: &[(usize, usize)], black: &[(usize, usize)]) -> Board {
        let mut board = Board::new();
        for &(column, row) in red {
            board.set_chip(Chip::Red, column, row);
        }
        for &(column, row) in black {
            board.set_chip(Chip::Black, column, row);
        }
        board
    }

    #[test]
    pub fn full_iff_no_legal_moves() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let mut state = new_game();
            loop {
                assert_eq!(state.board().is_full(), state.legal_moves().is_empty());
                let mv = match state.legal_moves().choose(&mut rng) {
                    Some(&mv) => mv,
                    None => break,
                };
                state.apply(mv);
            }
            assert_eq!(state.board().num_chips(), WIDTH * HEIGHT);
        }
        Ok(())
    }

    #[test]
    pub fn drops_raise_the_column_by_one() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(2);
        let mut state = new_game();
        while let Some(&mv) = state.legal_moves().choose(&mut rng) {
            let before = state
                .board()
                .next_empty_slot_in_column(mv.column)
                .ok_or(anyhow!("legal move into a full column"))?;
            state.apply(mv);
            let after = state.board().next_empty_slot_in_column(mv.column);
            if before == HEIGHT - 1 {
                assert_eq!(after, None);
            } else {
                assert_eq!(after, Some(before + 1));
            }
        }
        Ok(())
    }

    #[test]
    pub fn wins_in_every_orientation() {
        let horizontal = board_with(&[(2, 0), (3, 0), (4, 0), (5, 0)], &[]);
        let vertical = board_with(&[(6, 2), (6, 3), (6, 4), (6, 5)], &[(6, 0), (6, 1)]);
        let diagonal_up = board_with(
            &[(0, 0), (1, 1), (2, 2), (3, 3)],
            &[(1, 0), (2, 0), (2, 1), (3, 0), (3, 1), (3, 2)],
        );
        let diagonal_down = board_with(
            &[(3, 3), (4, 2), (5, 1), (6, 0)],
            &[(3, 0), (3, 1), (3, 2), (4, 0), (4, 1), (5, 0)],
        );

        for board in [horizontal, vertical, diagonal_up, diagonal_down] {
            assert!(board.is_win(Player::Red));
            assert!(!board.is_win(Player::Black));
        }
    }

    #[test]
    pub fn runs_of_three_at_the_edges_do_not_win() {
        let boards = [
            // ending at the last column
            board_with(&[(4, 0), (5, 0), (6, 0)], &[]),
            // ending at the top row
            board_with(&[(6, 3), (6, 4), (6, 5)], &[(6, 0), (6, 1), (6, 2)]),
            // diagonal into the top right corner
            board_with(&[(4, 3), (5, 4), (6, 5)], &[]),
            // diagonal down into the bottom right corner
            board_with(&[(4, 2), (5, 1), (6, 0)], &[]),
        ];
        for board in boards {
            assert!(!board.is_win(Player::Red));
            assert_eq!(board.score(Player::Red), 0);
        }
    }

    #[test]
    pub fn score_is_antisymmetric() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let mut state = new_game();
            while let Some(&mv) = state.legal_moves().choose(&mut rng) {
                state.apply(mv);
                let board = state.board();
                let red = board.score(Player::Red);
                let black = board.score(Player::Black);
                match (board.is_win(Player::Red), board.is_win(Player::Black)) {
                    (false, false) => assert_eq!((red, black), (0, 0)),
                    (true, false) | (false, true) => {
                        assert_eq!(red, -black);
                        assert_eq!(red.abs(), WIN_SCORE);
                    }
                    // both sides can only connect if play continued after a win
                    (true, true) => break,
                }
            }
        }
        Ok(())
    }

    #[test]
    pub fn search_is_deterministic_for_a_seed() -> Result<()> {
        let state: GameState = GameState::from_moves("3324")?;
        let first = request_ai_move(&state, state.current_player(), 5, 99)?;
        for _ in 0..3 {
            assert_eq!(request_ai_move(&state, state.current_player(), 5, 99)?, first);
        }

        let mut a = MinimaxStrategist::new(4, StdRng::seed_from_u64(5));
        let mut b = MinimaxStrategist::new(4, StdRng::seed_from_u64(5));
        let mut state = new_game();
        for _ in 0..6 {
            let player = state.current_player();
            let mv = a.best_move(&state, player)?;
            assert_eq!(b.best_move(&state, player)?, mv);
            state.apply(mv);
        }
        Ok(())
    }

    #[test]
    pub fn ties_are_broken_randomly() -> Result<()> {
        // nothing can be decided within two plies of the empty board
        let state = new_game();
        let mut strategist = MinimaxStrategist::new(2, StdRng::seed_from_u64(0));
        let best = strategist.best_moves(&state, Player::Red)?;
        assert_eq!(best.len(), WIDTH);
        assert!(best.iter().all(|mv| mv.score == 0));

        let mut chosen: Vec<usize> = (0..50)
            .map(|seed| request_ai_move(&state, Player::Red, 2, seed))
            .collect::<Result<_, _>>()?;
        chosen.sort_unstable();
        chosen.dedup();
        assert!(chosen.len() > 1, "every seed picked column {}", chosen[0]);
        Ok(())
    }

    #[test]
    pub fn takes_the_winning_column() -> Result<()> {
        // red has the bottom row from column 0 to 2, red to move
        let state: GameState = GameState::from_moves("051626")?;
        for depth in 1..=4 {
            let mut strategist = MinimaxStrategist::new(depth, StdRng::seed_from_u64(11));
            let best = strategist.best_moves(&state, Player::Red)?;
            assert_eq!(best, vec![Move { column: 3, score: WIN_SCORE }], "depth {}", depth);
            assert_eq!(strategist.best_move(&state, Player::Red)?.column, 3);
        }
        Ok(())
    }

    #[test]
    pub fn blocks_the_opponent() -> Result<()> {
        // black has the bottom row from column 0 to 2, red to move
        let state: GameState = GameState::from_moves("606152")?;
        assert_eq!(state.current_player(), Player::Red);
        for depth in 2..=5 {
            let mut strategist = MinimaxStrategist::new(depth, StdRng::seed_from_u64(12));
            let best = strategist.best_moves(&state, Player::Red)?;
            assert_eq!(
                best.iter().map(|mv| mv.column).collect::<Vec<_>>(),
                vec![3],
                "depth {}",
                depth
            );
            assert!(best[0].score > -WIN_SCORE);
        }
        Ok(())
    }

    #[test]
    pub fn pruned_search_matches_plain_minimax() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(4);
        for length in 0..16 {
            let state: GameState<5, 4, 3> = random_position(&mut rng, length)?;
            let player = state.current_player();
            for depth in 1..=4 {
                let (expected_columns, expected_score) = reference_minimax(&state, player, depth);
                let mut strategist = MinimaxStrategist::new(depth, StdRng::seed_from_u64(0));
                let best = strategist.best_moves(&state, player)?;
                assert_eq!(
                    best.iter().map(|mv| mv.column).collect::<Vec<_>>(),
                    expected_columns,
                    "position {:?}, depth {}",
                    state,
                    depth
                );
                assert!(best.iter().all(|mv| mv.score == expected_score));
            }
        }

        for length in [3, 8, 13, 18] {
            let state: GameState = random_position(&mut rng, length)?;
            let player = state.current_player();
            let (expected_columns, expected_score) = reference_minimax(&state, player, 3);
            let mut strategist = MinimaxStrategist::new(3, StdRng::seed_from_u64(0));
            let best = strategist.best_move(&state, player)?;
            assert!(expected_columns.contains(&best.column));
            assert_eq!(best.score, expected_score);
        }
        Ok(())
    }

    #[test]
    pub fn parallel_root_picks_the_same_move() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(6);
        for length in [0, 5, 10, 15] {
            let state: GameState = random_position(&mut rng, length)?;
            let player = state.current_player();
            let mut sequential = MinimaxStrategist::new(5, StdRng::seed_from_u64(8));
            let mut parallel =
                MinimaxStrategist::new(5, StdRng::seed_from_u64(8)).with_parallel(true);
            assert_eq!(
                sequential.best_move(&state, player)?,
                parallel.best_move(&state, player)?
            );
            assert!(parallel.node_count > 0);
        }
        Ok(())
    }

    #[test]
    pub fn full_board_has_no_move() -> Result<()> {
        let mut state: GameState<2, 2, 4> = GameState::new();
        for column in [0, 1, 0, 1] {
            state.play(column)?;
        }
        let mut strategist = MinimaxStrategist::new(3, StdRng::seed_from_u64(0));
        assert_eq!(
            strategist.best_move(&state, state.current_player()),
            Err(SearchError::NoLegalMoves)
        );
        assert_eq!(
            request_ai_move(&state, Player::Red, 3, 0),
            Err(SearchError::NoLegalMoves)
        );
        Ok(())
    }

    #[test]
    pub fn red_stacks_the_center_column() -> Result<()> {
        let mut state = new_game();
        let moves = [3, 2, 3, 2, 3, 2, 3];
        for (i, &column) in moves.iter().enumerate() {
            let mover = state.current_player();
            apply_human_move(&mut state, column)?;
            let outcome = evaluate_outcome(&state, mover);
            if i + 1 < moves.len() {
                assert_eq!(outcome, Outcome::InProgress, "after move {}", i);
            } else {
                assert_eq!(outcome, Outcome::Win(Player::Red));
            }
        }

        let board = state.board();
        for row in 0..4 {
            assert_eq!(board.chip(3, row), Chip::Red);
        }
        assert_eq!(board.chip(3, 4), Chip::None);
        for row in 0..3 {
            assert_eq!(board.chip(2, row), Chip::Black);
        }
        assert!(!board.is_win(Player::Black));
        Ok(())
    }

    #[test]
    pub fn human_against_engine_runs_to_the_end() -> Result<()> {
        let human = Player::Red;
        let mut strategist = MinimaxStrategist::new(4, StdRng::seed_from_u64(21));
        let mut state = new_game();
        let mut plies = 0;

        let outcome = loop {
            let mover = state.current_player();
            let column = if mover == human {
                // always the leftmost open column
                *legal_moves(&state)
                    .first()
                    .ok_or(anyhow!("human has no move"))?
            } else {
                let column = strategist.best_move(&state, mover)?.column;
                assert!(state.is_legal_move(column));
                column
            };
            apply_human_move(&mut state, column)?;
            plies += 1;

            let outcome = evaluate_outcome(&state, mover);
            if outcome.is_over() {
                break outcome;
            }
        };

        assert!(plies <= WIDTH * HEIGHT);
        assert_eq!(state.board().num_chips(), plies);
        match outcome {
            Outcome::Win(player) => assert!(state.board().is_win(player)),
            Outcome::Draw => assert!(state.board().is_full()),
            Outcome::InProgress => unreachable!(),
        }
        Ok(())
    }
}
