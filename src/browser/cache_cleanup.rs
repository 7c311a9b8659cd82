//! One-time removal of a service worker left behind by an earlier version of
//! the site. A stale worker keeps serving cached files after deploys.

use log::{debug, info};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{js_sys, Navigator, ServiceWorkerRegistration, Window};

use crate::config::SW_CLEANUP_FLAG;

fn has_property(target: &JsValue, name: &str) -> bool {
    js_sys::Reflect::has(target, &JsValue::from_str(name)).unwrap_or(false)
}

/// Best effort: every failure is swallowed and the page carries on.
pub fn run_once() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let storage = window.local_storage().ok().flatten();
    if let Some(storage) = &storage {
        if let Ok(Some(_)) = storage.get_item(SW_CLEANUP_FLAG) {
            return;
        }
    }

    let navigator = window.navigator();
    if !has_property(&navigator, "serviceWorker") {
        return;
    }

    spawn_local(async move {
        let removed = unregister_workers(&navigator).await;
        let cleared = if has_property(&window, "caches") {
            clear_caches(&window).await
        } else {
            0
        };
        if let Some(storage) = storage {
            let _ = storage.set_item(SW_CLEANUP_FLAG, "1");
        }
        info!("Service worker cleanup: {} registrations, {} caches", removed, cleared);
    });
}

async fn unregister_workers(navigator: &Navigator) -> usize {
    let registrations = match JsFuture::from(navigator.service_worker().get_registrations()).await {
        Ok(list) => js_sys::Array::from(&list),
        Err(_) => {
            debug!("Could not list service worker registrations");
            return 0;
        }
    };

    let mut removed = 0;
    for registration in registrations.iter() {
        let Ok(registration) = registration.dyn_into::<ServiceWorkerRegistration>() else {
            continue;
        };
        if let Ok(promise) = registration.unregister() {
            if JsFuture::from(promise).await.is_ok() {
                removed += 1;
            }
        }
    }
    removed
}

async fn clear_caches(window: &Window) -> usize {
    let Ok(caches) = window.caches() else {
        return 0;
    };
    let keys = match JsFuture::from(caches.keys()).await {
        Ok(keys) => js_sys::Array::from(&keys),
        Err(_) => return 0,
    };

    let mut cleared = 0;
    for key in keys.iter() {
        let Some(name) = key.as_string() else {
            continue;
        };
        if JsFuture::from(caches.delete(&name)).await.is_ok() {
            cleared += 1;
        }
    }
    cleared
}
