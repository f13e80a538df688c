//! Both subsystems sharing one time base end to end.

use core::sync::atomic::{AtomicU32, Ordering};

use lapse_lib::{Clock, NSEC_PER_MSEC, TickClock};
use lapse_sched::{InputEvent, InputRouter, InteractiveSignal};
use lapse_video::{DitherConfig, FlickerFree, PUSH_WINDOW_NS, PanelBackend, PanelError, PccConfig};

#[derive(Default)]
struct CountingBackend {
    pushes: AtomicU32,
}

impl PanelBackend for CountingBackend {
    fn push_dither(&self, _config: &DitherConfig) -> Result<(), PanelError> {
        Ok(())
    }

    fn push_pcc(&self, _config: &PccConfig) -> Result<(), PanelError> {
        self.pushes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[test]
fn one_tick_clock_drives_boost_and_display_windows() {
    let clock = TickClock::new();
    let signal = InteractiveSignal::new(&clock);
    let router = InputRouter::new();
    let backend = CountingBackend::default();
    let display = FlickerFree::new(&clock, &backend);

    signal.attach(&router).expect("slot available");
    assert!(display.set_enabled(true));

    // User touches the screen; dim backlight gets compensated.
    router.dispatch(&InputEvent::touch_contact(true, clock.now_ns()));
    assert!(signal.should_boost());
    assert_eq!(display.calc_backlight(12), display.threshold());
    assert_eq!(backend.pushes.load(Ordering::Relaxed), 1);

    // Dim level repeats within the push window: suppressed, boost holds.
    clock.advance_ns(PUSH_WINDOW_NS / 2);
    assert_eq!(display.calc_backlight(12), display.threshold());
    assert_eq!(backend.pushes.load(Ordering::Relaxed), 1);
    assert!(signal.should_boost());

    // Past the push window the same configuration is pushed again; the
    // interactivity window is far longer and still armed.
    clock.advance_ns(PUSH_WINDOW_NS);
    assert_eq!(display.calc_backlight(12), display.threshold());
    assert_eq!(backend.pushes.load(Ordering::Relaxed), 2);
    assert!(signal.should_boost());

    // Five idle seconds later the boost is withdrawn; the display keeps
    // compensating regardless.
    clock.advance_ns(5_000 * NSEC_PER_MSEC);
    assert!(!signal.should_boost());
    assert_eq!(display.calc_backlight(12), display.threshold());
}
