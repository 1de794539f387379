//! Unit tests for the message bus.

use std::sync::{Arc, Mutex};

use dt_core::HandlerId;

use crate::{MessageBus, MessageError, MessageHandler};

#[derive(Default)]
struct Recorder {
    received: Vec<i32>,
}

impl MessageHandler<i32> for Recorder {
    fn handle_message(&mut self, msg: i32) {
        self.received.push(msg);
    }
}

#[test]
fn undelivered_until_distribute_is_called() {
    let bus: MessageBus<i32> = MessageBus::new();
    let recorder = Arc::new(Mutex::new(Recorder::default()));
    bus.register_handler(HandlerId(1), recorder.clone()).unwrap();

    bus.post_message(HandlerId(1), 42);
    assert!(recorder.lock().unwrap().received.is_empty());

    bus.distribute_messages();
    assert_eq!(recorder.lock().unwrap().received, vec![42]);
}

#[test]
fn messages_deliver_in_post_order() {
    let bus: MessageBus<i32> = MessageBus::new();
    let recorder = Arc::new(Mutex::new(Recorder::default()));
    bus.register_handler(HandlerId(1), recorder.clone()).unwrap();

    bus.post_message(HandlerId(1), 1);
    bus.post_message(HandlerId(1), 2);
    bus.post_message(HandlerId(1), 3);
    bus.distribute_messages();

    assert_eq!(recorder.lock().unwrap().received, vec![1, 2, 3]);
}

#[test]
fn message_to_unregistered_handler_is_dropped_silently() {
    let bus: MessageBus<i32> = MessageBus::new();
    bus.post_message(HandlerId(99), 7);
    bus.distribute_messages();
    // No handler registered at all; nothing to assert beyond "did not panic".
}

#[test]
fn message_to_removed_handler_is_dropped_silently() {
    let bus: MessageBus<i32> = MessageBus::new();
    let recorder = Arc::new(Mutex::new(Recorder::default()));
    bus.register_handler(HandlerId(1), recorder.clone()).unwrap();
    bus.unregister_handler(HandlerId(1));

    bus.post_message(HandlerId(1), 42);
    bus.distribute_messages();

    assert!(recorder.lock().unwrap().received.is_empty());
}

#[test]
fn duplicate_registration_is_rejected() {
    let bus: MessageBus<i32> = MessageBus::new();
    let a = Arc::new(Mutex::new(Recorder::default()));
    let b = Arc::new(Mutex::new(Recorder::default()));
    bus.register_handler(HandlerId(1), a).unwrap();
    let err = bus.register_handler(HandlerId(1), b).unwrap_err();
    assert!(matches!(err, MessageError::AlreadyRegistered(id) if id == HandlerId(1)));
}

#[test]
fn register_unregister_round_trip_leaves_no_trace() {
    let bus: MessageBus<i32> = MessageBus::new();
    let recorder = Arc::new(Mutex::new(Recorder::default()));
    bus.register_handler(HandlerId(5), recorder).unwrap();
    assert!(bus.is_registered(HandlerId(5)));

    bus.unregister_handler(HandlerId(5));
    assert!(!bus.is_registered(HandlerId(5)));

    // A second registration under the same id should now succeed.
    let recorder2 = Arc::new(Mutex::new(Recorder::default()));
    bus.register_handler(HandlerId(5), recorder2).unwrap();
}

#[test]
fn thread_registration_counter_tracks_enter_and_exit() {
    let bus: MessageBus<i32> = MessageBus::new();
    assert_eq!(bus.active_thread_count(), 0);
    bus.register_thread();
    bus.register_thread();
    assert_eq!(bus.active_thread_count(), 2);
    bus.unregister_thread();
    assert_eq!(bus.active_thread_count(), 1);
}
