//! A single-slot rendezvous handoff between a producer and a parser running
//! on different threads (spec §4.4, component C4).
//!
//! This is a strict rendezvous, not a one-slot buffer: `put` doesn't return
//! once it has stored the chunk, it returns only once a consumer (`get` or
//! `acquire`) has picked the chunk back up. `get` blocks until a new chunk
//! has arrived. `acquire`/`commit` split the take into two steps for a
//! consumer that needs to hold the slot open (inspect a chunk, decide
//! whether to keep it) before letting the producer reuse it. The channel has
//! no capacity beyond the single slot — exactly a [`std::sync::Mutex`]
//! guarding one slot plus a [`std::sync::Condvar`] per side, the same
//! primitives [`crate::feeder::BufReaderJsonFeeder`] (single-threaded,
//! polled) trades away for throughput. A `-1`-sentinel "wait forever"
//! timeout convention has no idiomatic place in Rust; every wait here takes
//! an `Option<Duration>` instead, with `None` meaning unbounded.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::feeder::JsonFeeder;
use crate::unicode::TranscodeError;

/// Why a [`Rendezvous`] operation gave up before completing (spec §4.4
/// "Timeout reason codes").
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimeoutReason {
    /// `put` timed out waiting for the previous slot to be taken, so it
    /// never got to deliver its own chunk.
    NotDelivered,
    /// `put` delivered its chunk into the slot, but no consumer picked it
    /// up within the deadline.
    NotPicked,
    /// `get`/`acquire` timed out waiting for a producer to put something.
    NothingOffered,
}

#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
#[error("rendezvous operation timed out: {0:?}")]
pub struct TimeoutError(pub TimeoutReason);

struct Slot<Chunk> {
    value: Option<Chunk>,
    closed: bool,
    /// Set while a chunk has been taken via [`Rendezvous::acquire`] but not
    /// yet released with [`Rendezvous::commit`] — the slot stays "occupied"
    /// from `put`'s point of view during that window, even though `value` is
    /// already `None`.
    acquired: bool,
}

/// A single-slot, zero-capacity rendezvous channel. `Chunk` is whatever
/// unit the producer hands off — [`StreamBufferFeeder`] uses `Arc<[u8]>`.
pub struct Rendezvous<Chunk> {
    slot: Mutex<Slot<Chunk>>,
    not_empty: Condvar,
    not_full: Condvar,
}

impl<Chunk> Rendezvous<Chunk> {
    pub fn new() -> Self {
        Rendezvous {
            slot: Mutex::new(Slot {
                value: None,
                closed: false,
                acquired: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    /// Hand `chunk` to the next `get`/`acquire`. Blocks until the slot is
    /// free, then blocks again until a consumer has picked the chunk back
    /// up — a strict rendezvous, not a one-slot buffer: the producer never
    /// runs ahead of the consumer. `timeout` bounds the whole wait (both
    /// phases share the one deadline); `None` waits indefinitely.
    pub fn put(&self, chunk: Chunk, timeout: Option<Duration>) -> Result<(), TimeoutError> {
        let mut slot = self.slot.lock().unwrap();
        let deadline = timeout.map(|d| Instant::now() + d);
        while slot.value.is_some() || slot.acquired {
            slot = wait(&self.not_full, slot, deadline, TimeoutReason::NotDelivered)?;
        }
        slot.value = Some(chunk);
        self.not_empty.notify_one();
        while slot.value.is_some() {
            slot = wait(&self.not_full, slot, deadline, TimeoutReason::NotPicked)?;
        }
        Ok(())
    }

    /// Take the next chunk a producer puts, blocking until one arrives or
    /// the channel is closed. Returns `Ok(None)` once [`Self::close`] has
    /// been called and no chunk is pending — this is the end-of-stream
    /// signal, distinct from a timeout.
    pub fn get(&self, timeout: Option<Duration>) -> Result<Option<Chunk>, TimeoutError> {
        let mut slot = self.slot.lock().unwrap();
        let deadline = timeout.map(|d| Instant::now() + d);
        while slot.value.is_none() && !slot.closed {
            slot = wait(&self.not_empty, slot, deadline, TimeoutReason::NothingOffered)?;
        }
        let chunk = slot.value.take();
        if chunk.is_some() {
            self.not_full.notify_one();
        }
        Ok(chunk)
    }

    /// Like [`Self::get`], but the slot stays logically occupied (`put`
    /// keeps blocking) until the caller releases it with [`Self::commit`].
    /// This is the two-phase form of the handoff: a consumer that needs to
    /// inspect or partially consume a chunk before deciding whether the
    /// producer may reuse the slot calls `acquire` then `commit`, instead of
    /// `get`'s one-shot take.
    pub fn acquire(&self, timeout: Option<Duration>) -> Result<Option<Chunk>, TimeoutError> {
        let mut slot = self.slot.lock().unwrap();
        let deadline = timeout.map(|d| Instant::now() + d);
        while slot.value.is_none() && !slot.closed {
            slot = wait(&self.not_empty, slot, deadline, TimeoutReason::NothingOffered)?;
        }
        let chunk = slot.value.take();
        if chunk.is_some() {
            slot.acquired = true;
            self.not_full.notify_one();
        }
        Ok(chunk)
    }

    /// Release the slot an earlier [`Self::acquire`] took, unblocking any
    /// producer waiting in [`Self::put`]. A no-op if nothing is currently
    /// acquired.
    pub fn commit(&self) {
        let mut slot = self.slot.lock().unwrap();
        if slot.acquired {
            slot.acquired = false;
            self.not_full.notify_one();
        }
    }

    /// Signal that no more chunks will be put. A pending or future `get`
    /// returns `Ok(None)` once the slot is empty.
    pub fn close(&self) {
        let mut slot = self.slot.lock().unwrap();
        slot.closed = true;
        self.not_empty.notify_all();
    }
}

impl<Chunk> Default for Rendezvous<Chunk> {
    fn default() -> Self {
        Self::new()
    }
}

fn wait<'a, T>(
    cv: &Condvar,
    guard: std::sync::MutexGuard<'a, T>,
    deadline: Option<Instant>,
    reason: TimeoutReason,
) -> Result<std::sync::MutexGuard<'a, T>, TimeoutError> {
    match deadline {
        None => Ok(cv.wait(guard).unwrap()),
        Some(deadline) => {
            let now = Instant::now();
            if now >= deadline {
                return Err(TimeoutError(reason));
            }
            let (guard, result) = cv.wait_timeout(guard, deadline - now).unwrap();
            if result.timed_out() {
                Err(TimeoutError(reason))
            } else {
                Ok(guard)
            }
        }
    }
}

/// A [`JsonFeeder`] that pulls byte chunks from a [`Rendezvous`] fed by a
/// producer on another thread (spec §4.4 "Parser-side adapter").
///
/// Chunks are `Arc<[u8]>` rather than an owned `Vec<u8>` per chunk, so the
/// producer can hand off a buffer it already built (e.g. a network read)
/// without a copy; a standalone `bytes` crate dependency isn't needed for
/// that since `Arc<[u8]>` already gives cheap, shared, immutable ownership.
pub struct StreamBufferFeeder {
    channel: Arc<Rendezvous<Arc<[u8]>>>,
    timeout: Option<Duration>,
    current: VecDeque<u8>,
    done: bool,
    error: Option<TranscodeError>,
}

impl StreamBufferFeeder {
    /// Create a feeder that reads chunks off `channel`, waiting up to
    /// `timeout` for each one (`None` waits indefinitely).
    pub fn new(channel: Arc<Rendezvous<Arc<[u8]>>>, timeout: Option<Duration>) -> Self {
        StreamBufferFeeder {
            channel,
            timeout,
            current: VecDeque::new(),
            done: false,
            error: None,
        }
    }

    fn pull(&mut self) {
        if self.done {
            return;
        }
        match self.channel.get(self.timeout) {
            Ok(Some(chunk)) => self.current.extend(chunk.iter().copied()),
            Ok(None) => self.done = true,
            Err(_timeout) => {
                // No chunk within the deadline: report nothing available
                // yet without declaring end-of-stream, so the caller can
                // retry.
            }
        }
    }
}

impl JsonFeeder for StreamBufferFeeder {
    fn has_input(&self) -> bool {
        !self.current.is_empty()
    }

    fn is_done(&self) -> bool {
        self.done && self.current.is_empty()
    }

    fn next_input(&mut self) -> Option<u8> {
        if self.current.is_empty() {
            self.pull();
        }
        self.current.pop_front()
    }

    fn take_error(&mut self) -> Option<TranscodeError> {
        self.error.take()
    }
}
