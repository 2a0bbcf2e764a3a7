//! Platform abstraction layer
//!
//! Turns what the browser can tell us about the device into a `DeviceTier`.
//! Classification is pure; only `probe_device` touches the DOM.

use crate::sim::DeviceTier;

/// Viewports narrower than this count as mobile
pub const MOBILE_MAX_WIDTH: f32 = 768.0;
/// Mobile viewports narrower than this count as low-end
pub const LOW_END_MAX_WIDTH: f32 = 375.0;
/// JS heap limit under which a mobile device counts as low-end
pub const LOW_END_HEAP_LIMIT: f64 = 200_000_000.0;

const MOBILE_AGENTS: [&str; 8] = [
    "Android",
    "webOS",
    "iPhone",
    "iPad",
    "iPod",
    "BlackBerry",
    "IEMobile",
    "Opera Mini",
];

const OLD_MOBILE_AGENTS: [&str; 5] = [
    "Android 4.",
    "Android 5.0",
    "iPhone OS 7_",
    "iPhone OS 8_",
    "iPhone OS 9_",
];

/// What the host could learn about the device
#[derive(Debug, Clone, Default)]
pub struct DeviceInfo {
    pub viewport_width: f32,
    pub user_agent: String,
    /// `performance.memory.jsHeapSizeLimit` where the browser exposes it
    pub heap_limit_bytes: Option<f64>,
}

pub fn is_mobile(info: &DeviceInfo) -> bool {
    info.viewport_width < MOBILE_MAX_WIDTH
        || MOBILE_AGENTS.iter().any(|a| info.user_agent.contains(a))
}

/// Classify a device. Low-end is a subset of mobile.
pub fn classify(info: &DeviceInfo) -> DeviceTier {
    if !is_mobile(info) {
        return DeviceTier::Desktop;
    }
    let old_agent = OLD_MOBILE_AGENTS.iter().any(|a| info.user_agent.contains(a));
    let tiny = info.viewport_width < LOW_END_MAX_WIDTH;
    let small_heap = info.heap_limit_bytes.is_some_and(|b| b < LOW_END_HEAP_LIMIT);
    if old_agent || tiny || small_heap {
        DeviceTier::LowEnd
    } else {
        DeviceTier::Mobile
    }
}

/// Read viewport and user agent from the browser
#[cfg(target_arch = "wasm32")]
pub fn probe_device() -> DeviceInfo {
    use wasm_bindgen::JsValue;

    let Some(window) = web_sys::window() else {
        return DeviceInfo::default();
    };
    let viewport_width = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0) as f32;
    let user_agent = window.navigator().user_agent().unwrap_or_default();
    // performance.memory is Chrome-only and not in web-sys
    let heap_limit_bytes = window.performance().and_then(|perf| {
        let memory = js_sys::Reflect::get(&perf, &JsValue::from_str("memory")).ok()?;
        js_sys::Reflect::get(&memory, &JsValue::from_str("jsHeapSizeLimit"))
            .ok()?
            .as_f64()
    });

    DeviceInfo {
        viewport_width,
        user_agent,
        heap_limit_bytes,
    }
}
