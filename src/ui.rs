//! Score display messages for the host UI
//!
//! The frame loop posts a [`ScoreBoard`] each running tick over a bounded
//! `std::sync::mpsc` channel. The UI side drains it at its own pace; while the
//! queue is full new messages are dropped and the loop never blocks.

use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};

/// Messages queued before posts are dropped
pub const SCOREBOARD_CAPACITY: usize = 64;

/// Text shown by the UI layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBoard {
    pub score_text: String,
    pub time_text: String,
    pub visible: bool,
}

impl ScoreBoard {
    /// Message posted every running tick
    pub fn running(attempts_left: u32, elapsed_secs: u64) -> Self {
        Self {
            score_text: format!("Attempts left: {attempts_left}"),
            time_text: crate::highscores::format_secs(elapsed_secs),
            visible: true,
        }
    }

    /// Message posted once when the last attempt is lost
    pub fn game_over(attempts_left: u32, elapsed_secs: u64) -> Self {
        Self {
            score_text: format!("Attempts left: {attempts_left}"),
            time_text: format!("Time: {elapsed_secs} sec"),
            visible: true,
        }
    }
}

/// Create a sender/receiver pair holding up to [`SCOREBOARD_CAPACITY`] messages
#[must_use]
pub fn channel() -> (ScoreBoardTx, ScoreBoardRx) {
    let (tx, rx) = mpsc::sync_channel(SCOREBOARD_CAPACITY);
    (ScoreBoardTx(tx), ScoreBoardRx(rx))
}

#[derive(Debug, Clone)]
pub struct ScoreBoardTx(SyncSender<ScoreBoard>);

#[derive(Debug)]
pub struct ScoreBoardRx(Receiver<ScoreBoard>);

impl ScoreBoardTx {
    /// Post without blocking. A full queue drops the message; returns false
    /// only if the UI side is gone.
    pub fn post(&self, message: ScoreBoard) -> bool {
        match self.0.try_send(message) {
            Ok(()) | Err(TrySendError::Full(_)) => true,
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

impl ScoreBoardRx {
    /// Non-blocking receive of a single message.
    #[must_use]
    pub fn try_recv(&self) -> Option<ScoreBoard> {
        self.0.try_recv().ok()
    }

    /// Drain all currently queued messages.
    #[must_use]
    pub fn drain(&self) -> Vec<ScoreBoard> {
        self.0.try_iter().collect()
    }

    /// Drain the queue, keeping only the newest message
    #[must_use]
    pub fn latest(&self) -> Option<ScoreBoard> {
        self.0.try_iter().last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_and_drain() {
        let (tx, rx) = channel();
        assert!(tx.post(ScoreBoard::running(10, 0)));
        assert!(tx.post(ScoreBoard::running(9, 4)));
        let drained = rx.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[1].score_text, "Attempts left: 9");
        assert_eq!(drained[1].time_text, "4 sec");
        assert!(rx.try_recv().is_none());
    }

    #[test]
    fn game_over_text() {
        let msg = ScoreBoard::game_over(0, 73);
        assert_eq!(msg.score_text, "Attempts left: 0");
        assert_eq!(msg.time_text, "Time: 73 sec");
        assert!(msg.visible);
    }

    #[test]
    fn undrained_queue_stays_bounded() {
        let (tx, rx) = channel();
        for secs in 0..(SCOREBOARD_CAPACITY as u64 * 3) {
            assert!(tx.post(ScoreBoard::running(10, secs)));
        }
        let drained = rx.drain();
        assert_eq!(drained.len(), SCOREBOARD_CAPACITY);
        assert_eq!(drained[0].time_text, "0 sec");

        // Room again once drained
        assert!(tx.post(ScoreBoard::running(9, 500)));
        assert_eq!(rx.latest().unwrap().time_text, "500 sec");
    }

    #[test]
    fn post_after_receiver_dropped() {
        let (tx, rx) = channel();
        drop(rx);
        assert!(!tx.post(ScoreBoard::running(1, 1)));
    }
}
