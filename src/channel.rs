//! Bounded command/event channels for `no_std` tasks.
//!
//! Built on `critical-section` and `heapless::Deque`, so a channel can be
//! shared between tasks and interrupt handlers. Senders and receivers are
//! plain copyable references to the channel, which itself is `const`-
//! constructible and can live in a `static`.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// Error returned when sending to a full channel; carries the rejected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelFull<T>(pub T);

/// A bounded, thread- and interrupt-safe FIFO channel.
pub struct Channel<T, const CAPACITY: usize> {
    queue: Mutex<RefCell<Deque<T, CAPACITY>>>,
}

impl<T, const CAPACITY: usize> Channel<T, CAPACITY> {
    /// Create a new empty channel.
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Get a sender handle for this channel.
    pub const fn sender(&self) -> Sender<'_, T, CAPACITY> {
        Sender { channel: self }
    }

    /// Get a receiver handle for this channel.
    pub const fn receiver(&self) -> Receiver<'_, T, CAPACITY> {
        Receiver { channel: self }
    }

    /// Try to push a value; fails with [`ChannelFull`] when at capacity.
    pub fn try_send(&self, value: T) -> Result<(), ChannelFull<T>> {
        critical_section::with(|cs| {
            self.queue
                .borrow(cs)
                .borrow_mut()
                .push_back(value)
                .map_err(ChannelFull)
        })
    }

    /// Pop the oldest value, or `None` when the channel is empty.
    pub fn try_receive(&self) -> Option<T> {
        critical_section::with(|cs| self.queue.borrow(cs).borrow_mut().pop_front())
    }

    /// Number of queued values.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.queue.borrow(cs).borrow().len())
    }

    /// Whether the channel holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, const CAPACITY: usize> Default for Channel<T, CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

/// A sender handle for a [`Channel`].
#[derive(Clone, Copy)]
pub struct Sender<'a, T, const CAPACITY: usize> {
    channel: &'a Channel<T, CAPACITY>,
}

impl<T, const CAPACITY: usize> Sender<'_, T, CAPACITY> {
    /// Try to push a value; fails with [`ChannelFull`] when at capacity.
    pub fn try_send(&self, value: T) -> Result<(), ChannelFull<T>> {
        self.channel.try_send(value)
    }
}

/// A receiver handle for a [`Channel`].
#[derive(Clone, Copy)]
pub struct Receiver<'a, T, const CAPACITY: usize> {
    channel: &'a Channel<T, CAPACITY>,
}

impl<T, const CAPACITY: usize> Receiver<'_, T, CAPACITY> {
    /// Pop the oldest value, or `None` when the channel is empty.
    pub fn try_receive(&self) -> Option<T> {
        self.channel.try_receive()
    }
}
