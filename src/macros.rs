//! Small crate-wide logging macros.
//!
//! In the browser every line goes to `console.log` / `console.error`.  Native
//! builds (the unit tests) have no JS console, so lines are written to stderr
//! instead.

/// Log an informational line.
///
/// ```rust,ignore
/// debug_log!("Loaded {} inbound messages", list.len());
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::macros::emit(false, &format!($($arg)*))
    };
}

/// Log an error line.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        $crate::macros::emit(true, &format!($($arg)*))
    };
}

#[doc(hidden)]
pub fn emit(is_error: bool, line: &str) {
    #[cfg(test)]
    CAPTURED.with(|captured| captured.borrow_mut().push(line.to_string()));

    #[cfg(target_arch = "wasm32")]
    {
        let value = wasm_bindgen::JsValue::from_str(line);
        if is_error {
            web_sys::console::error_1(&value);
        } else {
            web_sys::console::log_1(&value);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let level = if is_error { "ERROR" } else { "DEBUG" };
        eprintln!("[{}] {}", level, line);
    }
}

#[cfg(test)]
thread_local! {
    static CAPTURED: std::cell::RefCell<Vec<String>> = std::cell::RefCell::new(Vec::new());
}

/// Drain every line logged on the current thread so far.
#[cfg(test)]
pub(crate) fn take_captured() -> Vec<String> {
    CAPTURED.with(|captured| std::mem::take(&mut *captured.borrow_mut()))
}
