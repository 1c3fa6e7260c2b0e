//! Leaf evaluation: heuristic for cut-off nodes, win/loss split for terminal
//! ones.

use super::config::EvalWeights;
use crate::board::Cell;
use crate::core::{PlayerId, PlayerMap};
use crate::game::GameState;

/// Value the current position for every player.
///
/// `deltas` carries the score credits accumulated by the trial moves leading
/// here, and `to_move` is whoever would act next. `game_over` selects the
/// terminal split instead of the heuristic.
#[must_use]
pub fn evaluate(
    state: &GameState,
    deltas: &PlayerMap<i64>,
    to_move: PlayerId,
    game_over: bool,
    weights: &EvalWeights,
) -> PlayerMap<f64> {
    if game_over {
        terminal_values(state, deltas, weights)
    } else {
        heuristic_values(state, deltas, to_move, weights)
    }
}

/// Non-terminal estimate.
///
/// Per player: banked score + pending deltas, plus the board score scaled up
/// the longer they wait for their next turn (so the player who just moved is
/// not penalized for handing the position over), plus remaining hand
/// potential, plus an ownership-based presence bonus for the outer ring.
/// Finally each value is recentred to `2v − Σv`: a player only gains by
/// outperforming the field.
fn heuristic_values(
    state: &GameState,
    deltas: &PlayerMap<i64>,
    to_move: PlayerId,
    weights: &EvalWeights,
) -> PlayerMap<f64> {
    let num_players = state.player_count();
    let mut values = PlayerMap::with_value(num_players, 0.0);

    let size = state.board().size();
    let center = state.board().center();
    let edges = [0, size - 1];
    let cross = [center - 1, center, center + 1];
    for row in edges {
        for col in edges {
            credit_presence(&mut values, state, row, col, weights.corner_bonus);
        }
        for col in cross {
            credit_presence(&mut values, state, row, col, weights.cross_bonus);
        }
    }
    for col in edges {
        for row in cross {
            credit_presence(&mut values, state, row, col, weights.cross_bonus);
        }
    }

    for (player, seat) in state.players().iter() {
        let wait_turns = (player.index() + num_players - to_move.index()) % num_players;
        let banked = (seat.score() + deltas[player]) as f64;
        let positional =
            state.board().score(seat.suit()) as f64 * (1 + num_players - wait_turns) as f64;
        let potential = seat.hand().potential(state.cards()) as f64;
        values[player] +=
            banked + weights.board_blend * positional + weights.hand_blend * potential;
    }

    let field: f64 = state.players().player_ids().map(|p| values[p]).sum();
    for player in state.players().player_ids() {
        values[player] = 2.0 * values[player] - field;
    }
    values
}

fn credit_presence(
    values: &mut PlayerMap<f64>,
    state: &GameState,
    row: usize,
    col: usize,
    bonus: f64,
) {
    if let Cell::Card(id) = state.board().cell(row, col) {
        let owner = state
            .player_by_suit(id.suit())
            .unwrap_or_else(|| panic!("card {id} belongs to no seat"));
        values[owner] += bonus * id.value() as f64;
    }
}

/// Terminal split: everyone starts at the loss baseline and the top final
/// score (banked + deltas, measured against an initial 0) shares the win
/// bonus evenly among the tied winners.
fn terminal_values(
    state: &GameState,
    deltas: &PlayerMap<i64>,
    weights: &EvalWeights,
) -> PlayerMap<f64> {
    let num_players = state.player_count();
    let mut values = PlayerMap::with_value(num_players, weights.loss_baseline);

    let mut best = 0;
    let mut winners: Vec<PlayerId> = Vec::new();
    for (player, seat) in state.players().iter() {
        let total = seat.score() + deltas[player];
        if total > best {
            best = total;
            winners = vec![player];
        } else if total == best {
            winners.push(player);
        }
    }

    // Scores are never negative, so somebody always reaches the initial 0.
    let share = weights.win_bonus / winners.len() as f64;
    for winner in winners {
        values[winner] += share;
    }
    values
}
