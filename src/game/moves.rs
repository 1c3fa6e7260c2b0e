//! Move enumeration and application.
//!
//! Real moves mutate the game permanently. Trial moves (used by search)
//! mutate only the grid and the card flags, accumulate score deltas into a
//! caller-supplied map, and are exactly reversed by [`GameState::undo_trial`]
//! together with a grid snapshot taken beforehand.

use smallvec::SmallVec;

use super::{CardPolicy, GameState, Ply, PlyRecord};
use crate::board::{Cell, Discard, GridSnapshot};
use crate::cards::CardId;
use crate::core::{PlayerId, PlayerMap};
use crate::error::MoveError;

/// Receipt for a speculative move.
///
/// Holds everything undo needs: the moved card, the displaced cell, and where
/// the turn went. The grid itself is restored from the caller's snapshot.
#[must_use = "a trial move mutates shared board state and must be undone"]
#[derive(Clone, Copy, Debug)]
pub struct TrialMove {
    /// The move that was tried.
    pub ply: Ply,

    /// What it displaced.
    pub discard: Discard,

    /// Whose turn it would be next.
    pub next_turn: PlayerId,

    /// Whether the game would end on this move.
    pub game_over: bool,
}

impl GameState {
    /// Every candidate ply for a player, materialized eagerly.
    ///
    /// Positions are the open setup cells, or all `4 × size` edge slots once
    /// the rotation phase has begun. Cards are the highest unplayed card,
    /// plus the lowest under the [`CardPolicy::HighLow`] policy. Empty when
    /// the player has nothing left to play.
    #[must_use]
    pub fn legal_plies(&self, player: PlayerId) -> Vec<Ply> {
        let seat = &self.players()[player];

        let positions: Vec<(usize, usize)> = if self.board().in_setup_phase() {
            self.board().open_cells()
        } else {
            let n = self.board().size();
            let mut slots = Vec::with_capacity(4 * n);
            slots.extend((1..=n).map(|i| (0, i)));
            slots.extend((1..=n).map(|i| (n + 1, i)));
            slots.extend((1..=n).map(|i| (i, 0)));
            slots.extend((1..=n).map(|i| (i, n + 1)));
            slots
        };

        let mut choices: SmallVec<[CardId; 2]> = SmallVec::new();
        if let Some(highest) = seat.hand().highest_unplayed(self.cards()) {
            choices.push(highest);
            if seat.policy() == CardPolicy::HighLow {
                if let Some(lowest) = seat.hand().lowest_unplayed(self.cards()) {
                    if lowest != highest {
                        choices.push(lowest);
                    }
                }
            }
        }

        choices
            .iter()
            .flat_map(|&card| {
                positions
                    .iter()
                    .map(move |&(row, column)| Ply { card, row, column })
            })
            .collect()
    }

    /// Apply a move for the player to act.
    ///
    /// On success the card leaves the hand, the move is recorded, the turn
    /// advances, and the next player banks their current board score, unless
    /// they have nothing left to play, in which case the game finishes. On
    /// error nothing changes.
    pub fn apply_move(&mut self, ply: Ply) -> Result<Discard, MoveError> {
        let player = self.to_move();
        if self.players()[player].hand().find(ply.card).is_none() {
            return Err(MoveError::CardNotHeld { card: ply.card });
        }

        let discard = self
            .board
            .insert(ply.row, ply.column, Cell::Card(ply.card))?;
        if let Discard::Card(id) = discard {
            self.cards.card_mut(id).discarded = true;
        }
        self.cards.card_mut(ply.card).played = true;
        self.players[player].hand.remove(ply.card);
        self.history.push_back(PlyRecord { ply, discard });
        self.turn = self.next_player(player);
        log::debug!("{} played {ply}", self.players[player]);

        let next = self.turn;
        if self.players[next].hand.has_unplayed(&self.cards) {
            let gained = self.board.score(self.players[next].suit());
            self.credit_score(next, gained);
        } else {
            self.finish();
        }
        Ok(discard)
    }

    /// Apply a move speculatively on behalf of `turn`.
    ///
    /// The hand and permanent scores are untouched: the card is only flagged
    /// played, and score credits accumulate into `deltas`: the next player's
    /// board score, or everyone's when this move ends the game.
    pub fn test_move(
        &mut self,
        ply: Ply,
        turn: PlayerId,
        deltas: &mut PlayerMap<i64>,
    ) -> Result<TrialMove, MoveError> {
        let discard = self
            .board
            .insert(ply.row, ply.column, Cell::Card(ply.card))?;
        if let Discard::Card(id) = discard {
            self.cards.card_mut(id).discarded = true;
        }
        self.cards.card_mut(ply.card).played = true;

        let next = self.next_player(turn);
        let game_over = !self.players[next].hand.has_unplayed(&self.cards);
        if game_over {
            for player in self.players.player_ids() {
                deltas[player] += self.board.score(self.players[player].suit());
            }
        } else {
            deltas[next] += self.board.score(self.players[next].suit());
        }

        Ok(TrialMove {
            ply,
            discard,
            next_turn: next,
            game_over,
        })
    }

    /// Reverse a trial move.
    ///
    /// Resets the moved card's and the discard's flags and restores the grid
    /// from the snapshot taken before the trial. Skipping this corrupts every
    /// sibling branch of a search.
    pub fn undo_trial(&mut self, trial: TrialMove, snapshot: &GridSnapshot) {
        self.cards.card_mut(trial.ply.card).played = false;
        match trial.discard {
            Discard::Card(id) => self.cards.card_mut(id).discarded = false,
            Discard::Blank(id) => self.board.set_blank_discarded(id, false),
            Discard::Neutral => {}
        }
        self.board.restore(snapshot);
    }

    /// End the game: every seat banks the final board score, then scoring is
    /// frozen.
    fn finish(&mut self) {
        self.game_over = true;
        for player in self.players.player_ids() {
            let gained = self.board.score(self.players[player].suit());
            self.credit_score(player, gained);
        }
        self.board.finalize();
        log::info!("{}", self.standings());
    }

    /// Reverse the end-of-game accounting for what-if analysis: unfreeze
    /// scoring and take the final board score back off every seat.
    pub fn reopen(&mut self) {
        self.game_over = false;
        self.board.unfinalize();
        for player in self.players.player_ids() {
            let gained = self.board.score(self.players[player].suit());
            self.credit_score(player, -gained);
        }
    }
}
