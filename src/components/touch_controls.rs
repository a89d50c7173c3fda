use std::cell::RefCell;

use gloo_events::EventListener;
use wasm_bindgen::prelude::wasm_bindgen;
use yew::prelude::*;

use crate::platform::{self, KeyboardSink};
use crate::state::input::{ControlId, HAPTIC_PULSE_MS, InputBridge, InputEvent, InputSink};
use crate::util::log_err;

thread_local! {
    // Set while the touch controls are mounted.
    static ACTION_READY: RefCell<Option<Callback<bool>>> = const { RefCell::new(None) };
}

/// Called by the game loop whenever the action cooldown changes.
#[wasm_bindgen(js_name = setActionReady)]
pub fn set_action_ready(ready: bool) {
    let cb = ACTION_READY.with(|slot| slot.borrow().clone());
    if let Some(cb) = cb {
        cb.emit(ready);
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct TouchControlsProps {
    pub visible: bool,
}

fn emit_all(events: impl IntoIterator<Item = InputEvent>) {
    for ev in events {
        KeyboardSink.emit(ev);
    }
}

#[function_component(TouchControls)]
pub fn touch_controls(props: &TouchControlsProps) -> Html {
    let bridge = use_mut_ref(InputBridge::new);
    let redraw = use_force_update();

    // Readiness hook for the game loop, plus blur: a key held while the page
    // loses focus would otherwise never see its release.
    {
        let bridge = bridge.clone();
        let redraw = redraw.clone();
        use_effect_with((), move |_| {
            let ready_cb = {
                let bridge = bridge.clone();
                let redraw = redraw.clone();
                Callback::from(move |ready: bool| {
                    bridge.borrow_mut().set_action_ready(ready);
                    redraw.force_update();
                })
            };
            ACTION_READY.with(|slot| *slot.borrow_mut() = Some(ready_cb));
            let blur = web_sys::window().map(|w| {
                let bridge = bridge.clone();
                let redraw = redraw.clone();
                EventListener::new(&w, "blur", move |_| {
                    let released = bridge.borrow_mut().release_all();
                    if !released.is_empty() {
                        emit_all(released);
                        redraw.force_update();
                    }
                })
            });
            move || {
                ACTION_READY.with(|slot| slot.borrow_mut().take());
                drop(blur);
                emit_all(bridge.borrow_mut().release_all());
            }
        });
    }
    // Hiding the pad mid-press must not leave a key down.
    {
        let bridge = bridge.clone();
        use_effect_with(props.visible, move |visible| {
            if !*visible {
                emit_all(bridge.borrow_mut().release_all());
            }
            || ()
        });
    }

    if !props.visible {
        return html! {};
    }

    let control = |id: ControlId, label: &'static str| {
        let press = {
            let bridge = bridge.clone();
            let redraw = redraw.clone();
            Callback::from(move |e: PointerEvent| {
                e.prevent_default();
                let ev = bridge.borrow_mut().on_press_start(id);
                if let Some(ev) = ev {
                    KeyboardSink.emit(ev);
                    if let Err(e) = platform::vibrate(HAPTIC_PULSE_MS) {
                        log_err("haptics", &e);
                    }
                    redraw.force_update();
                }
            })
        };
        let release = {
            let bridge = bridge.clone();
            let redraw = redraw.clone();
            Callback::from(move |e: PointerEvent| {
                e.prevent_default();
                let ev = bridge.borrow_mut().on_press_end(id);
                if let Some(ev) = ev {
                    KeyboardSink.emit(ev);
                    redraw.force_update();
                }
            })
        };
        let cancel = {
            let bridge = bridge.clone();
            let redraw = redraw.clone();
            Callback::from(move |_: PointerEvent| {
                let ev = bridge.borrow_mut().on_press_cancel(id);
                if let Some(ev) = ev {
                    KeyboardSink.emit(ev);
                    redraw.force_update();
                }
            })
        };
        let b = bridge.borrow();
        let class = classes!(
            "touch-btn",
            format!("touch-{}", id.css_name()),
            b.is_pressed(id).then_some("pressed"),
            (id == ControlId::Action && b.action_ready()).then_some("ready"),
        );
        html! {
            <button
                {class}
                onpointerdown={press}
                onpointerup={release}
                onpointercancel={cancel.clone()}
                onpointerleave={cancel}
                oncontextmenu={Callback::from(|e: MouseEvent| e.prevent_default())}
            >
                { label }
            </button>
        }
    };

    html! {<div class="touch-controls">
        <div class="dpad">
            { control(ControlId::Up, "▲") }
            { control(ControlId::Left, "◀") }
            { control(ControlId::Right, "▶") }
            { control(ControlId::Down, "▼") }
        </div>
        { control(ControlId::Action, "★") }
    </div>}
}
