//! Gesture listeners
//!
//! [`Interception`] bundles the body scroll lock with the window-level wheel
//! and touch listeners. It is acquired as one unit while the sequence holds
//! the page and released as one unit by dropping it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Event, TouchEvent, WheelEvent};

use super::scroll_lock::ScrollLock;
use crate::sequencer::{GestureResponse, Sequencer, TOUCH_RELEASE_EVENTS};

/// Receiver of raw gestures
pub trait GestureSink {
    fn wheel(&mut self, delta_y: f64, now_ms: f64) -> GestureResponse;
    fn touch_start(&mut self, client_y: f64);
    fn touch_move(&mut self, client_y: f64, now_ms: f64) -> GestureResponse;
    fn touch_end(&mut self);
}

impl GestureSink for Sequencer {
    fn wheel(&mut self, delta_y: f64, now_ms: f64) -> GestureResponse {
        Sequencer::wheel(self, delta_y, now_ms)
    }

    fn touch_start(&mut self, client_y: f64) {
        Sequencer::touch_start(self, client_y)
    }

    fn touch_move(&mut self, client_y: f64, now_ms: f64) -> GestureResponse {
        Sequencer::touch_move(self, client_y, now_ms)
    }

    fn touch_end(&mut self) {
        Sequencer::touch_end(self)
    }
}

pub struct Interception {
    // Listeners go first so no handler runs against a released lock
    _listeners: Vec<EventListener>,
    _lock: Option<ScrollLock>,
}

impl Interception {
    /// Lock body scroll and start routing gestures to `sink`.
    ///
    /// Handlers only hold a weak reference, so the sink is not kept alive
    /// by its own listeners.
    pub fn engage<S: GestureSink + 'static>(sink: &Rc<RefCell<S>>) -> Option<Self> {
        let window = web_sys::window()?;
        let lock = ScrollLock::acquire();
        let active = EventListenerOptions::enable_prevent_default();

        let mut listeners = Vec::with_capacity(4);

        // Wheel
        {
            let sink = Rc::downgrade(sink);
            listeners.push(EventListener::new_with_options(
                &window,
                "wheel",
                active,
                move |event: &Event| {
                    let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                        return;
                    };
                    let response = with_sink(&sink, |s| s.wheel(wheel.delta_y(), event.time_stamp()));
                    apply(event, response);
                },
            ));
        }

        // Touch start
        {
            let sink = Rc::downgrade(sink);
            listeners.push(EventListener::new(&window, "touchstart", move |event: &Event| {
                let Some(y) = first_touch_y(event) else {
                    return;
                };
                with_sink(&sink, |s| {
                    s.touch_start(y);
                    GestureResponse::IGNORED
                });
            }));
        }

        // Touch move
        {
            let sink = Rc::downgrade(sink);
            listeners.push(EventListener::new_with_options(
                &window,
                "touchmove",
                active,
                move |event: &Event| {
                    let Some(y) = first_touch_y(event) else {
                        return;
                    };
                    let response = with_sink(&sink, |s| s.touch_move(y, event.time_stamp()));
                    apply(event, response);
                },
            ));
        }

        // Touch end / cancel
        for name in TOUCH_RELEASE_EVENTS {
            let sink = Rc::downgrade(sink);
            listeners.push(EventListener::new(&window, name, move |_event: &Event| {
                with_sink(&sink, |s| {
                    s.touch_end();
                    GestureResponse::IGNORED
                });
            }));
        }

        log::info!("Gesture interception engaged");
        Some(Self {
            _listeners: listeners,
            _lock: lock,
        })
    }
}

impl Drop for Interception {
    fn drop(&mut self) {
        log::info!("Gesture interception released");
    }
}

fn with_sink<S: GestureSink>(
    sink: &Weak<RefCell<S>>,
    f: impl FnOnce(&mut S) -> GestureResponse,
) -> GestureResponse {
    let Some(sink) = sink.upgrade() else {
        return GestureResponse::IGNORED;
    };
    // Re-entrant dispatch is dropped
    let Ok(mut s) = sink.try_borrow_mut() else {
        return GestureResponse::IGNORED;
    };
    f(&mut s)
}

fn apply(event: &Event, response: GestureResponse) {
    if response.prevent_default {
        event.prevent_default();
    }
}

fn first_touch_y(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some(touch.client_y() as f64)
}
