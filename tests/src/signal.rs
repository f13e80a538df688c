//! Input routing into the interactivity signal.

use std::thread;

use lapse_lib::{Clock, TickClock};
use lapse_sched::{EventClass, INTERACTIVE_INPUT_NS, InputEvent, InputRouter, InteractiveSignal};

#[test]
fn input_events_drive_the_boost_window() {
    let clock = TickClock::new();
    let signal = InteractiveSignal::new(&clock);
    let router = InputRouter::new();
    signal.attach(&router).expect("slot available");

    clock.advance_ns(2 * INTERACTIVE_INPUT_NS);
    assert!(!signal.should_boost());

    router.dispatch(&InputEvent::key(28, true, clock.now_ns()));
    assert!(signal.should_boost());

    clock.advance_ns(INTERACTIVE_INPUT_NS - 1);
    assert!(signal.should_boost());
    clock.advance_ns(1);
    assert!(!signal.should_boost());
}

#[test]
fn unmatched_events_do_not_rearm() {
    let clock = TickClock::new();
    let signal = InteractiveSignal::new(&clock);
    let router = InputRouter::new();
    signal.attach(&router).expect("slot available");

    clock.advance_ns(2 * INTERACTIVE_INPUT_NS);
    assert!(!signal.should_boost());

    // Plain absolute motion matches neither touchscreen, touchpad nor
    // keypad rules.
    let bare = InputEvent {
        classes: EventClass::ABS,
        code: 0,
        value: 1,
        timestamp_ns: clock.now_ns(),
    };
    router.dispatch(&bare);
    assert!(!signal.should_boost());

    router.dispatch(&InputEvent::touch_contact(true, clock.now_ns()));
    assert!(signal.should_boost());
}

#[test]
fn concurrent_dispatch_storm_keeps_the_boost_armed() {
    let clock = TickClock::new();
    let signal = InteractiveSignal::new(&clock);
    let router = InputRouter::new();
    signal.attach(&router).expect("slot available");

    clock.advance_ns(2 * INTERACTIVE_INPUT_NS);
    assert!(!signal.should_boost());

    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for i in 0..500u16 {
                    router.dispatch(&InputEvent::key(i, i % 2 == 0, clock.now_ns()));
                }
            });
        }
    });

    assert!(signal.should_boost());
    assert_eq!(router.listener_count(), 1);
}
