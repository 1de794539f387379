//! `MessageBus<M>` — the kernel's publish/dispatch mechanism.
//!
//! Grounded on `Worker.cpp`'s `messaging::MessageBus::{RegisterThread,
//! RegisterHandler, ThreadDispatchMessages, UnRegisterHandler,
//! UnRegisterThread}` call sites, and `HandlerBase.hpp`'s `Handler::handle`.
//! Where the original dispatches eagerly from whichever thread posts (with
//! internal locking to stay safe), `SPEC_FULL.md` §4.5 narrows delivery to a
//! single call site — `distribute_messages`, invoked by the master thread
//! once per tick between the flip and aura-rebuild phases — so handler
//! callbacks never race `frame_tick`.
//!
//! The payload type `M` is a crate-level type parameter rather than a
//! `Box<dyn Any>`: callers define their own message enum and get a bus
//! specialized to it, trading the original's single untyped bus for a
//! statically checked one.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use dt_core::HandlerId;

use crate::error::{MessageError, MessageResult};

/// Implemented by anything that wants to receive messages through a
/// [`MessageBus`]. Entities that want to be addressable hold an
/// `Arc<Mutex<impl MessageHandler<M>>>` and register a clone with the bus,
/// mirroring the Aura-Manager cell-sharing pattern used for `Buffered<T>`.
pub trait MessageHandler<M>: Send {
    fn handle_message(&mut self, msg: M);
}

struct Inbox<M> {
    handler: Arc<Mutex<dyn MessageHandler<M>>>,
    pending: Vec<M>,
}

/// Per-recipient mailbox plus registration table, keyed by [`HandlerId`].
pub struct MessageBus<M> {
    inboxes: Mutex<HashMap<HandlerId, Inbox<M>>>,
    active_threads: AtomicUsize,
}

impl<M> Default for MessageBus<M> {
    fn default() -> Self {
        Self {
            inboxes: Mutex::new(HashMap::new()),
            active_threads: AtomicUsize::new(0),
        }
    }
}

impl<M> MessageBus<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once by each worker thread (and the master) at startup.
    /// Purely a bookkeeping counter — `SPEC_FULL.md` §4.5 keeps actual
    /// delivery single-threaded, so this exists for parity with the
    /// original's per-thread registration and for assertions in
    /// `dt-workgroup` that every participant has checked in.
    pub fn register_thread(&self) {
        self.active_threads.fetch_add(1, Ordering::Relaxed);
    }

    /// Called once by each worker thread (and the master) at shutdown.
    pub fn unregister_thread(&self) {
        self.active_threads.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn active_thread_count(&self) -> usize {
        self.active_threads.load(Ordering::Relaxed)
    }

    /// Registers a handler under `id`. Fails if `id` is already registered
    /// (the caller should unregister the stale handler first, or pick a
    /// fresh id — see `dt-dispatch::EntityIdAllocator`).
    pub fn register_handler(
        &self,
        id: HandlerId,
        handler: Arc<Mutex<dyn MessageHandler<M>>>,
    ) -> MessageResult<()> {
        let mut inboxes = self.inboxes.lock().expect("message bus mutex poisoned");
        if inboxes.contains_key(&id) {
            return Err(MessageError::AlreadyRegistered(id));
        }
        inboxes.insert(
            id,
            Inbox {
                handler,
                pending: Vec::new(),
            },
        );
        Ok(())
    }

    /// Unregisters `id`. Any messages still pending for it are discarded.
    /// Idempotent: unregistering an id that was never (or no longer)
    /// registered is a no-op.
    pub fn unregister_handler(&self, id: HandlerId) {
        self.inboxes
            .lock()
            .expect("message bus mutex poisoned")
            .remove(&id);
    }

    pub fn is_registered(&self, id: HandlerId) -> bool {
        self.inboxes
            .lock()
            .expect("message bus mutex poisoned")
            .contains_key(&id)
    }

    /// Buffers `msg` for delivery to `recipient` on the next
    /// `distribute_messages`. Messages addressed to an id with no
    /// registered handler (e.g. an entity already removed) are dropped
    /// silently, per `SPEC_FULL.md` §4.5.
    pub fn post_message(&self, recipient: HandlerId, msg: M) {
        let mut inboxes = self.inboxes.lock().expect("message bus mutex poisoned");
        if let Some(inbox) = inboxes.get_mut(&recipient) {
            inbox.pending.push(msg);
        }
    }

    /// Delivers every pending message to its handler, in post order, then
    /// clears the pending queues. Intended to be called exactly once per
    /// tick, by the master thread only, between the flip and aura-rebuild
    /// phases.
    pub fn distribute_messages(&self) {
        let mut inboxes = self.inboxes.lock().expect("message bus mutex poisoned");
        for inbox in inboxes.values_mut() {
            if inbox.pending.is_empty() {
                continue;
            }
            let msgs = std::mem::take(&mut inbox.pending);
            let mut handler = inbox.handler.lock().expect("handler mutex poisoned");
            for msg in msgs {
                handler.handle_message(msg);
            }
        }
    }
}
