use std::rc::Rc;

use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Element;
use yew::prelude::*;

use crate::browser::observer::{self, ViewportWatch};
use crate::components::pointer_glow::PointerGlow;
use crate::components::reveal::Reveal;
use crate::components::site_header::SiteHeader;
use crate::components::step_rail::StepRail;
use crate::config;
use crate::content;
use crate::interaction::header_cta::HeaderCtaState;
use crate::interaction::step_rail::StepRailConfig;

pub enum CtaSignal {
    Hero(bool),
    Bottom(bool),
    ScrollFallback(f64),
}

impl Reducible for HeaderCtaState {
    type Action = CtaSignal;

    fn reduce(self: Rc<Self>, action: CtaSignal) -> Rc<Self> {
        let next = match action {
            CtaSignal::Hero(visible) => self.with_hero(visible),
            CtaSignal::Bottom(visible) => self.with_bottom(visible),
            CtaSignal::ScrollFallback(y) => {
                HeaderCtaState::from_scroll_fallback(y, config::SCROLL_FALLBACK_OFFSET_PX)
            }
        };
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

fn watch_cta<F>(target: &NodeRef, threshold: f64, signal: F) -> Option<ViewportWatch>
where
    F: Fn(bool) + 'static,
{
    let element = target.cast::<Element>()?;
    let watch = ViewportWatch::new(&[threshold], None, move |sightings, _| {
        // Only the latest report for the single target matters
        if let Some(last) = sightings.last() {
            signal(last.intersecting);
        }
    })
    .ok()?;
    watch.observe(&element);
    Some(watch)
}

const SERVICES: [(&str, &str); 3] = [
    ("Operations setup", "Tools, trackers and a weekly rhythm your team actually follows."),
    ("Execution support", "Hands-on operators who ship the work, not just plan it."),
    ("Reporting", "Clean weekly numbers so you always know where things stand."),
];

#[function_component(Home)]
pub fn home() -> Html {
    let cta = use_reducer_eq(HeaderCtaState::default);
    let hero_cta_ref = use_node_ref();
    let final_cta_ref = use_node_ref();
    let steps = use_memo(|_| content::steps(), ());

    {
        let dispatcher = cta.dispatcher();
        let hero_cta_ref = hero_cta_ref.clone();
        let final_cta_ref = final_cta_ref.clone();
        use_effect_with_deps(move |_| {
            let mut watches = Vec::new();
            let mut fallback: Option<Closure<dyn FnMut()>> = None;
            let window = web_sys::window();

            if observer::supported() {
                let hero = {
                    let dispatcher = dispatcher.clone();
                    watch_cta(&hero_cta_ref, config::HERO_CTA_THRESHOLD, move |v| dispatcher.dispatch(CtaSignal::Hero(v)))
                };
                let bottom = {
                    let dispatcher = dispatcher.clone();
                    watch_cta(&final_cta_ref, config::FINAL_CTA_THRESHOLD, move |v| dispatcher.dispatch(CtaSignal::Bottom(v)))
                };
                watches.extend(hero);
                watches.extend(bottom);
            } else if let Some(window) = &window {
                warn!("IntersectionObserver unavailable, header CTA follows scroll offset");
                let scroll_callback = Closure::wrap(Box::new({
                    let dispatcher = dispatcher.clone();
                    move || {
                        if let Some(y) = web_sys::window().and_then(|w| w.scroll_y().ok()) {
                            dispatcher.dispatch(CtaSignal::ScrollFallback(y));
                        }
                    }
                }) as Box<dyn FnMut()>);
                let _ = window.add_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref());
                fallback = Some(scroll_callback);
            }

            move || {
                drop(watches);
                if let (Some(window), Some(callback)) = (window, fallback) {
                    let _ = window.remove_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref());
                }
            }
        }, ());
    }

    html! {
        <>
            <SiteHeader cta={*cta} />
            <main id="top" class="landing-page">
                <section class="hero">
                    <Reveal class="hero-content">
                        <h1>{"Operations that run without you pushing"}</h1>
                        <p class="hero-subtitle">
                            {"We set up, run and hand off the operational work that keeps a small company moving."}
                        </p>
                        <div id="heroCtaWrap" class="hero-cta-wrap" ref={hero_cta_ref}>
                            <PointerGlow class="cta-glow">
                                <a class="hero-cta" href={config::book_url()} target="_blank" rel="noopener noreferrer">
                                    {"Book a 20 min call"}
                                </a>
                            </PointerGlow>
                        </div>
                    </Reveal>
                </section>

                <section id="services" class="services">
                    <Reveal>
                        <h2>{"What we take off your plate"}</h2>
                    </Reveal>
                    <div class="services-grid">
                        { for SERVICES.iter().map(|(title, body)| html! {
                            <Reveal>
                                <PointerGlow class="service-card">
                                    <h3>{*title}</h3>
                                    <p>{*body}</p>
                                </PointerGlow>
                            </Reveal>
                        }) }
                    </div>
                </section>

                <section id="how" class="how-we-work">
                    <Reveal>
                        <h2>{"How we work"}</h2>
                        <p>{"Four steps from first call to a team that runs on its own."}</p>
                    </Reveal>
                    <StepRail steps={(*steps).clone()} config={StepRailConfig::default()} />
                </section>

                <section id="cta" class="final-cta" ref={final_cta_ref}>
                    <Reveal>
                        <h2>{"Ready to hand off the busywork?"}</h2>
                        <PointerGlow class="cta-glow">
                            <a class="hero-cta" href={config::book_url()} target="_blank" rel="noopener noreferrer">
                                {"Book a call"}
                            </a>
                        </PointerGlow>
                    </Reveal>
                </section>
            </main>
        </>
    }
}
