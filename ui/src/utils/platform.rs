//! Browser navigation helpers

use crate::console_warn;
use web_sys::window;

/// Navigate the whole page to `path`.
pub fn redirect_to(path: &str) {
    match window() {
        Some(window) => {
            if let Err(e) = window.location().set_href(path) {
                console_warn!("Failed to navigate to {}: {:?}", path, e);
            }
        }
        None => console_warn!("No window object; cannot navigate to {}", path),
    }
}

/// Wait `delay_ms`, then navigate to `path`.
pub async fn redirect_after(path: &str, delay_ms: u32) {
    gloo_timers::future::TimeoutFuture::new(delay_ms).await;
    redirect_to(path);
}
