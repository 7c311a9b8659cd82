use std::rc::Rc;

use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, KeyboardEvent, Node};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::config;
use crate::interaction::header_cta::HeaderCtaState;
use crate::interaction::nav::{NavEvent, NavState};

impl Reducible for NavState {
    type Action = NavEvent;

    fn reduce(self: Rc<Self>, action: NavEvent) -> Rc<Self> {
        let next = (*self).apply(action);
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

fn scroll_y() -> f64 {
    web_sys::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

fn contains(node_ref: &NodeRef, target: Option<&Node>) -> bool {
    node_ref
        .get()
        .map(|node| node.contains(target))
        .unwrap_or(false)
}

#[derive(Properties, PartialEq)]
pub struct SiteHeaderProps {
    pub cta: HeaderCtaState,
}

#[function_component(SiteHeader)]
pub fn site_header(props: &SiteHeaderProps) -> Html {
    let nav = use_reducer_eq(|| NavState::new(scroll_y()));
    let toggle_ref = use_node_ref();
    let menu_ref = use_node_ref();

    // Close on outside click
    {
        let dispatcher = nav.dispatcher();
        let toggle_ref = toggle_ref.clone();
        let menu_ref = menu_ref.clone();
        use_effect_with_deps(move |_| {
            let document = web_sys::window().and_then(|w| w.document());
            let click_callback = Closure::wrap(Box::new(move |e: Event| {
                let target = e.target().and_then(|t| t.dyn_into::<Node>().ok());
                let inside = contains(&toggle_ref, target.as_ref()) || contains(&menu_ref, target.as_ref());
                if !inside {
                    dispatcher.dispatch(NavEvent::OutsideClick);
                }
            }) as Box<dyn FnMut(Event)>);

            if let Some(document) = &document {
                let _ = document.add_event_listener_with_callback("click", click_callback.as_ref().unchecked_ref());
            }

            move || {
                if let Some(document) = document {
                    let _ = document.remove_event_listener_with_callback("click", click_callback.as_ref().unchecked_ref());
                }
            }
        }, ());
    }

    {
        let dispatcher = nav.dispatcher();
        use_event_with_window("scroll", move |_: Event| {
            dispatcher.dispatch(NavEvent::Scroll(scroll_y()));
        });
    }

    {
        let dispatcher = nav.dispatcher();
        use_event_with_window("keydown", move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                dispatcher.dispatch(NavEvent::Escape);
            }
        });
    }

    let toggle_menu = {
        let dispatcher = nav.dispatcher();
        Callback::from(move |_: MouseEvent| {
            debug!("Toggling mobile menu");
            dispatcher.dispatch(NavEvent::Toggle);
        })
    };

    let on_menu_click = {
        let dispatcher = nav.dispatcher();
        Callback::from(move |e: MouseEvent| {
            let is_link = e
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .map(|el| el.class_list().contains("nav-link"))
                .unwrap_or(false);
            if is_link {
                dispatcher.dispatch(NavEvent::LinkClick);
            }
        })
    };

    let cta = props.cta;

    html! {
        <header
            id="siteHeader"
            class={classes!(
                "site-header",
                cta.header_hidden().then(|| "is-hidden"),
                cta.show_cta().then(|| "show-cta"),
            )}
        >
            <div class="nav-content">
                <a class="nav-logo" href="#top">{"Operator"}</a>
                <button
                    id="navToggle"
                    class="nav-toggle"
                    aria-controls="navMenu"
                    aria-expanded={nav.aria_expanded()}
                    aria-label="Menu"
                    ref={toggle_ref}
                    onclick={toggle_menu}
                >
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <nav id="navMenu" class={nav.menu_class()} ref={menu_ref} onclick={on_menu_click}>
                    <a class="nav-link" href="#services">{"Services"}</a>
                    <a class="nav-link" href="#how">{"How we work"}</a>
                    <a class="nav-link" href="#cta">{"Contact"}</a>
                </nav>
                <a
                    id="headerCta"
                    class="header-cta"
                    href={config::book_url()}
                    target="_blank"
                    rel="noopener noreferrer"
                    tabindex={if cta.show_cta() { "0" } else { "-1" }}
                    aria-hidden={if cta.show_cta() { "false" } else { "true" }}
                >
                    {"Book a call"}
                </a>
            </div>
        </header>
    }
}
