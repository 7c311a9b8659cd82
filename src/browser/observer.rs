use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{js_sys, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// One intersection report for an observed element.
pub struct Sighting {
    pub target: Element,
    pub intersecting: bool,
    pub ratio: f64,
}

impl Sighting {
    /// Reads the `data-step` index the step triggers carry.
    pub fn step_index(&self) -> Option<usize> {
        self.target
            .get_attribute("data-step")
            .and_then(|raw| raw.parse().ok())
    }
}

pub fn supported() -> bool {
    web_sys::window()
        .map(|window| js_sys::Reflect::has(&window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false))
        .unwrap_or(false)
}

/// Owns an `IntersectionObserver` together with the closure it calls.
/// Dropping the watch disconnects the observer.
pub struct ViewportWatch {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl ViewportWatch {
    pub fn new<F>(thresholds: &[f64], root_margin: Option<&str>, mut on_change: F) -> Result<Self, JsValue>
    where
        F: FnMut(&[Sighting], &IntersectionObserver) + 'static,
    {
        let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
            let sightings: Vec<Sighting> = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| Sighting {
                    target: entry.target(),
                    intersecting: entry.is_intersecting(),
                    ratio: entry.intersection_ratio(),
                })
                .collect();
            on_change(&sightings, &observer);
        }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        let threshold: js_sys::Array = thresholds.iter().map(|t| JsValue::from_f64(*t)).collect();
        init.set_threshold(&threshold);
        if let Some(margin) = root_margin {
            init.set_root_margin(margin);
        }

        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, target: &Element) {
        self.observer.observe(target);
    }
}

impl Drop for ViewportWatch {
    fn drop(&mut self) {
        debug!("Disconnecting viewport watch");
        self.observer.disconnect();
    }
}
