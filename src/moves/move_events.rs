//! Move-committed notifications.
//!
//! The board drives a one-way `mpsc` channel per subscriber. Pieces never hold
//! a reference back to the board; anything that has to react to a commit
//! (a renderer removing a captured sprite, a logger) subscribes instead.

use std::sync::mpsc::{channel, Receiver, Sender};

use chrono::{DateTime, Utc};

use crate::game_state::piece::Piece;
use crate::moves::chess_move::Move;

/// Raised exactly once per committed move, after its full effect is applied.
#[derive(Debug, Clone)]
pub struct MoveCommitted {
    pub mv: Move,
    /// Piece removed by the move, including an en-passant victim.
    pub captured: Option<Piece>,
    /// Board revision after the commit.
    pub revision: u64,
    pub committed_at: DateTime<Utc>,
}

/// Subscriber list owned by a board.
///
/// Cloning yields an empty list so simulation copies of a board never notify.
#[derive(Debug, Default)]
pub(crate) struct MoveSubscribers {
    senders: Vec<Sender<MoveCommitted>>,
}

impl Clone for MoveSubscribers {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl MoveSubscribers {
    pub(crate) fn subscribe(&mut self) -> Receiver<MoveCommitted> {
        let (tx, rx) = channel();
        self.senders.push(tx);
        rx
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.senders.len()
    }

    /// Sends to every live subscriber and drops the ones whose receiver is gone.
    pub(crate) fn publish(&mut self, event: MoveCommitted) {
        self.senders.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
