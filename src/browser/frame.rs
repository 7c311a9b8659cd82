use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Runs `f` once on the next animation frame. Nothing cancels it; the page
/// lives as long as the callbacks do.
pub fn next_frame<F>(f: F)
where
    F: FnOnce() + 'static,
{
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(f);
    if window.request_animation_frame(callback.unchecked_ref()).is_err() {
        debug!("requestAnimationFrame rejected the callback");
    }
}
