// Playback queue model
//
// Pure sequencing over track ids: no audio, no transport. Operations
// return new Queue values instead of mutating shared state, and tracks are
// identified by id only, so two queues never alias.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::library::TrackId;

/// Repeat behavior at the queue edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatMode {
    #[default]
    None,
    All,
    One,
}

impl RepeatMode {
    /// none -> all -> one -> none
    pub fn cycled(self) -> Self {
        match self {
            RepeatMode::None => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::None,
        }
    }
}

/// An owned play queue.
///
/// `entries` is the order tracks actually play in; `original` remembers the
/// pre-shuffle order so shuffle can be undone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Queue {
    entries: Vec<TrackId>,
    original: Vec<TrackId>,
    position: usize,
    repeat: RepeatMode,
}

impl Queue {
    /// Build a queue from a track sequence, starting at `start`.
    pub fn from_tracks(tracks: &[TrackId], start: usize) -> Self {
        Queue {
            entries: tracks.to_vec(),
            original: tracks.to_vec(),
            position: start.min(tracks.len().saturating_sub(1)),
            repeat: RepeatMode::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn current(&self) -> Option<TrackId> {
        self.entries.get(self.position).copied()
    }

    pub fn entries(&self) -> &[TrackId] {
        &self.entries
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    pub fn with_repeat(&self, repeat: RepeatMode) -> Self {
        Queue {
            repeat,
            ..self.clone()
        }
    }

    pub fn cycle_repeat(&self) -> Self {
        self.with_repeat(self.repeat.cycled())
    }

    /// Shuffle: the current track moves to the front, the rest are
    /// reordered randomly. The original order is kept for restore.
    pub fn shuffled<R: Rng>(&self, rng: &mut R) -> Self {
        let current = self.current();
        let mut rest: Vec<TrackId> = self
            .entries
            .iter()
            .copied()
            .filter(|id| Some(*id) != current)
            .collect();
        rest.shuffle(rng);

        let mut entries = Vec::with_capacity(self.entries.len());
        if let Some(id) = current {
            entries.push(id);
        }
        entries.extend(rest);

        Queue {
            entries,
            original: self.original.clone(),
            position: 0,
            repeat: self.repeat,
        }
    }

    /// Undo a shuffle: return to the original order, relocating the current
    /// track by id.
    pub fn restore_order(&self) -> Self {
        let position = match self.current() {
            Some(id) => self.original.iter().position(|&t| t == id).unwrap_or(0),
            None => 0,
        };
        Queue {
            entries: self.original.clone(),
            original: self.original.clone(),
            position,
            repeat: self.repeat,
        }
    }

    /// Step to the next track. At the end of the queue, repeat-all wraps to
    /// the start; otherwise there is nothing further to play.
    pub fn advanced(&self) -> Option<Self> {
        if self.entries.is_empty() {
            return None;
        }
        let next = self.position + 1;
        let position = if next >= self.entries.len() {
            if self.repeat == RepeatMode::All {
                0
            } else {
                return None;
            }
        } else {
            next
        };
        Some(Queue {
            position,
            ..self.clone()
        })
    }

    /// Step to the previous track. At the start, repeat-all wraps to the
    /// end; otherwise the queue stays on the first track.
    pub fn receded(&self) -> Self {
        if self.entries.is_empty() {
            return self.clone();
        }
        let position = if self.position == 0 {
            if self.repeat == RepeatMode::All {
                self.entries.len() - 1
            } else {
                0
            }
        } else {
            self.position - 1
        };
        Queue {
            position,
            ..self.clone()
        }
    }

    /// What follows when the current track finishes on its own: repeat-one
    /// replays it, anything else advances.
    pub fn after_track_ends(&self) -> Option<Self> {
        if self.repeat == RepeatMode::One {
            return Some(self.clone());
        }
        self.advanced()
    }
}
