//! Thin wrappers over browser APIs. Everything optional (fullscreen,
//! orientation lock, vibration) reports `CapabilityUnavailable` and callers
//! drop it after logging.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, CustomEventInit, Document, Element, KeyboardEvent, KeyboardEventInit};

use crate::error::UiError;
use crate::state::input::{InputEvent, InputSink, KeyPhase};
use crate::state::overlay::{HostInfo, Rect, Viewport};
use crate::state::viewport::DeviceProfile;
use crate::util::{clog, log_err};

/// Element the overlays are portalled into.
pub const OVERLAY_HOST_ID: &str = "overlay-root";
/// Broadcast on the document when the tutorial finishes hiding.
pub const TUTORIAL_CLOSED_EVENT: &str = "tutorialClosed";
/// Page the game loop lives on.
pub const GAME_PAGE: &str = "game.html";

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn viewport() -> Viewport {
    let (width, height) = web_sys::window()
        .map(|w| {
            let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
            let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
            (width, height)
        })
        .unwrap_or((800.0, 600.0));
    Viewport { width, height }
}

pub fn overlay_host() -> Result<Element, UiError> {
    document()
        .and_then(|d| d.get_element_by_id(OVERLAY_HOST_ID))
        .ok_or_else(|| UiError::HostNotReady {
            host: OVERLAY_HOST_ID.to_string(),
        })
}

/// `None` tells the sequencer the attachment point is missing.
pub fn host_info() -> Option<HostInfo> {
    overlay_host().ok().map(|_| HostInfo {
        viewport: viewport(),
    })
}

pub fn element_rect(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect {
        left: r.left(),
        top: r.top(),
        width: r.width(),
        height: r.height(),
    }
}

pub fn device_profile() -> DeviceProfile {
    let vp = viewport();
    let (touch_events, max_touch_points, user_agent) = web_sys::window()
        .map(|w| {
            let nav = w.navigator();
            let touch_events = js_sys::Reflect::has(&w, &JsValue::from_str("ontouchstart"))
                .unwrap_or(false);
            (
                touch_events,
                nav.max_touch_points(),
                nav.user_agent().unwrap_or_default(),
            )
        })
        .unwrap_or_default();
    DeviceProfile {
        touch_events,
        max_touch_points,
        width: vp.width,
        height: vp.height,
        user_agent,
    }
}

fn unavailable(capability: &'static str, reason: impl Into<String>) -> UiError {
    UiError::CapabilityUnavailable {
        capability,
        reason: reason.into(),
    }
}

pub fn request_fullscreen() -> Result<(), UiError> {
    let doc = document().ok_or_else(|| unavailable("fullscreen", "no document"))?;
    if doc.fullscreen_element().is_some() {
        return Ok(());
    }
    let root = doc
        .document_element()
        .ok_or_else(|| unavailable("fullscreen", "no document element"))?;
    root.request_fullscreen()
        .map_err(|e| unavailable("fullscreen", format!("{e:?}")))
}

/// `screen.orientation.lock` is missing from most desktop browsers and from
/// iOS, so it is looked up reflectively.
pub fn lock_landscape() -> Result<(), UiError> {
    let window = web_sys::window().ok_or_else(|| unavailable("orientation lock", "no window"))?;
    let screen = window
        .screen()
        .map_err(|e| unavailable("orientation lock", format!("{e:?}")))?;
    let orientation = js_sys::Reflect::get(&screen, &JsValue::from_str("orientation"))
        .ok()
        .filter(|v| v.is_object())
        .ok_or_else(|| unavailable("orientation lock", "screen.orientation missing"))?;
    let lock = js_sys::Reflect::get(&orientation, &JsValue::from_str("lock"))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
        .ok_or_else(|| unavailable("orientation lock", "lock() missing"))?;
    let result = lock
        .call1(&orientation, &JsValue::from_str("landscape"))
        .map_err(|e| unavailable("orientation lock", format!("{e:?}")))?;
    // The promise rejects outside fullscreen; swallow it so it is not reported
    // as unhandled.
    if let Ok(promise) = result.dyn_into::<js_sys::Promise>() {
        let on_reject = Closure::once(move |e: JsValue| {
            log_err("orientation lock", &unavailable("orientation lock", format!("{e:?}")));
        });
        let _ = promise.catch(&on_reject);
        on_reject.forget();
    }
    Ok(())
}

/// Fullscreen then landscape lock; failures are logged and dropped.
pub fn enter_immersive() {
    if let Err(e) = request_fullscreen() {
        log_err("immersive", &e);
    }
    if let Err(e) = lock_landscape() {
        log_err("immersive", &e);
    }
}

pub fn vibrate(ms: u32) -> Result<(), UiError> {
    let window = web_sys::window().ok_or_else(|| unavailable("haptics", "no window"))?;
    if window.navigator().vibrate_with_duration(ms) {
        Ok(())
    } else {
        Err(unavailable("haptics", "vibrate() refused"))
    }
}

pub fn broadcast_tutorial_closed() {
    let Some(doc) = document() else {
        return;
    };
    let init = CustomEventInit::new();
    init.set_bubbles(true);
    match CustomEvent::new_with_event_init_dict(TUTORIAL_CLOSED_EVENT, &init) {
        Ok(ev) => {
            let _ = doc.dispatch_event(&ev);
            clog("tutorial closed");
        }
        Err(e) => log_err(
            "tutorial signal",
            &unavailable("custom events", format!("{e:?}")),
        ),
    }
}

/// Leaves the page. Nothing after this runs meaningfully.
pub fn navigate_to_game() {
    if let Some(win) = web_sys::window() {
        if let Err(e) = win.location().set_href(GAME_PAGE) {
            log_err("navigation", &unavailable("navigation", format!("{e:?}")));
        }
    }
}

/// Replays bridge events as `keydown`/`keyup` on the document so the game
/// loop can't tell them from a physical keyboard.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KeyboardSink;

impl InputSink for KeyboardSink {
    fn emit(&self, event: InputEvent) {
        let Some(doc) = document() else {
            return;
        };
        let kind = match event.phase {
            KeyPhase::Pressed => "keydown",
            KeyPhase::Released => "keyup",
        };
        let init = KeyboardEventInit::new();
        init.set_key(event.key.dom_key());
        init.set_code(event.key.dom_code());
        init.set_bubbles(true);
        init.set_cancelable(true);
        match KeyboardEvent::new_with_keyboard_event_init_dict(kind, &init) {
            Ok(ev) => {
                let _ = doc.dispatch_event(&ev);
            }
            Err(e) => log_err("input", &unavailable("keyboard events", format!("{e:?}"))),
        }
    }
}
