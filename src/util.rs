// Console logging helpers shared by components and platform glue

#[cfg(target_arch = "wasm32")]
pub fn clog(msg: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(msg));
}

#[cfg(target_arch = "wasm32")]
pub fn cwarn(msg: &str) {
    web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(msg));
}

// Native builds (tests) have no console binding
#[cfg(not(target_arch = "wasm32"))]
pub fn clog(msg: &str) {
    eprintln!("[info] {msg}");
}

#[cfg(not(target_arch = "wasm32"))]
pub fn cwarn(msg: &str) {
    eprintln!("[warn] {msg}");
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
}

/// Missing platform capabilities are routine and only get info level.
pub fn level_for(err: &crate::error::UiError) -> LogLevel {
    if err.is_capability() {
        LogLevel::Info
    } else {
        LogLevel::Warn
    }
}

/// Logs a swallowed error, prefixed with where it happened.
pub fn log_err(context: &str, err: &crate::error::UiError) {
    let msg = format!("{context}: {err}");
    match level_for(err) {
        LogLevel::Info => clog(&msg),
        LogLevel::Warn => cwarn(&msg),
    }
}
