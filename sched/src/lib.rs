#![cfg_attr(not(test), no_std)]

pub mod input;
pub mod interactive;

pub use input::{
    DeviceMatch, EventClass, InputEvent, InputListener, InputRouter, ListenerId, RouterError,
};
pub use interactive::{INTERACTIVE_DEVICE_MATCHES, INTERACTIVE_INPUT_NS, InteractiveSignal};
