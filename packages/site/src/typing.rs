//! Typing animation that cycles through localized role phrases.
//!
//! The rotator is a plain state machine: every call that advances it returns
//! the next [`Timer`] to arm (or `None` when it is idle) and the driver owns
//! the actual sleeping. Restarting invalidates the pending timer, so a tick
//! that was already scheduled for the previous phrase set is ignored.

use std::ops::RangeInclusive;
use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::dictionary::{Dictionary, Entry};
use crate::timer::{Timer, TimerId, TimerSlot};

pub const KEY_ATTR: &str = "data-typing-key";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    Visible,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Full,
    /// The user asked for reduced motion: render statically.
    Reduced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Typing,
    Deleting,
}

/// Output port: the text slot and the blinking cursor next to it.
pub trait TypingSlot {
    fn set_text(&mut self, text: &str);
    fn set_cursor(&mut self, cursor: CursorState);
}

/// Random delay ranges in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingTiming {
    pub type_ms: RangeInclusive<u64>,
    pub delete_ms: RangeInclusive<u64>,
    pub pause_after_typed_ms: RangeInclusive<u64>,
    pub pause_after_deleted_ms: RangeInclusive<u64>,
}

impl Default for TypingTiming {
    fn default() -> Self {
        Self {
            type_ms: 34..=58,
            delete_ms: 20..=34,
            pause_after_typed_ms: 820..=1050,
            pause_after_deleted_ms: 240..=360,
        }
    }
}

/// Ordered, non-empty phrases for one rotator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseSet(Vec<String>);

impl PhraseSet {
    pub fn new<I, T>(phrases: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Self(
            phrases
                .into_iter()
                .map(|p| p.as_ref().trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
        )
    }

    /// Parse a `|`-delimited role string.
    pub fn split(value: &str) -> Self {
        Self::new(value.split('|'))
    }

    pub fn from_dictionary(dict: Option<&Dictionary>, key: &str) -> Self {
        match dict.and_then(|d| d.lookup(key)) {
            Some(Entry::Text(text)) => Self::split(text),
            Some(Entry::List(items)) => Self::new(items),
            None => Self::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }
}

pub struct TypingRotator<S> {
    key: String,
    slot: S,
    timing: TypingTiming,
    phrases: PhraseSet,
    index: usize,
    mode: Mode,
    /// Number of characters of the active phrase currently shown.
    visible: usize,
    timer: TimerSlot,
}

impl<S: TypingSlot> TypingRotator<S> {
    pub fn new(key: impl Into<String>, slot: S) -> Self {
        Self::with_timing(key, slot, TypingTiming::default())
    }

    pub fn with_timing(key: impl Into<String>, slot: S, timing: TypingTiming) -> Self {
        Self {
            key: key.into(),
            slot,
            timing,
            phrases: PhraseSet::default(),
            index: 0,
            mode: Mode::Typing,
            visible: 0,
            timer: TimerSlot::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_armed()
    }

    /// Text currently shown in the slot.
    pub fn visible_text(&self) -> String {
        self.current().chars().take(self.visible).collect()
    }

    /// Replace the phrases and restart from the first one.
    pub fn start<R: Rng>(&mut self, phrases: PhraseSet, motion: Motion, rng: &mut R) -> Option<Timer> {
        self.stop();
        self.phrases = phrases;
        self.index = 0;
        self.mode = Mode::Typing;
        self.visible = 0;

        let Some(first) = self.phrases.get(0) else {
            self.slot.set_text("");
            return None;
        };

        if motion == Motion::Reduced {
            self.visible = first.chars().count();
            let first = first.to_string();
            self.slot.set_text(&first);
            self.slot.set_cursor(CursorState::Hidden);
            debug!("typing.start[{}]: reduced motion, static phrase", self.key);
            return None;
        }

        self.slot.set_cursor(CursorState::Visible);
        self.slot.set_text("");
        debug!("typing.start[{}]: {} phrases", self.key, self.phrases.len());
        Some(self.arm(rng, Delay::Type))
    }

    /// Advance one tick. Ids other than the pending one are ignored.
    pub fn fire<R: Rng>(&mut self, id: TimerId, rng: &mut R) -> Option<Timer> {
        if !self.timer.take(id) || self.phrases.is_empty() {
            return None;
        }

        let len = self.current().chars().count();
        match self.mode {
            Mode::Typing if self.visible < len => {
                self.visible += 1;
                self.render();
                Some(self.arm(rng, Delay::Type))
            }
            Mode::Typing => {
                // Full phrase shown: hold it, then start deleting.
                self.render();
                self.mode = Mode::Deleting;
                Some(self.arm(rng, Delay::AfterTyped))
            }
            Mode::Deleting => {
                self.visible = self.visible.saturating_sub(1);
                self.render();
                if self.visible > 0 {
                    return Some(self.arm(rng, Delay::Delete));
                }
                self.index = (self.index + 1) % self.phrases.len();
                self.mode = Mode::Typing;
                Some(self.arm(rng, Delay::AfterDeleted))
            }
        }
    }

    pub fn stop(&mut self) {
        self.timer.cancel();
    }

    fn current(&self) -> &str {
        self.phrases.get(self.index).unwrap_or_default()
    }

    fn render(&mut self) {
        let text = self.visible_text();
        self.slot.set_text(&text);
    }

    fn arm<R: Rng>(&mut self, rng: &mut R, delay: Delay) -> Timer {
        let range = match delay {
            Delay::Type => &self.timing.type_ms,
            Delay::Delete => &self.timing.delete_ms,
            Delay::AfterTyped => &self.timing.pause_after_typed_ms,
            Delay::AfterDeleted => &self.timing.pause_after_deleted_ms,
        };
        let millis = rng.gen_range(range.clone());
        self.timer.arm(Duration::from_millis(millis))
    }
}

#[derive(Clone, Copy)]
enum Delay {
    Type,
    Delete,
    AfterTyped,
    AfterDeleted,
}
