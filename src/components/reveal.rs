use log::warn;
use yew::prelude::*;

use crate::browser::{media, observer};
use crate::browser::observer::ViewportWatch;
use crate::config::REVEAL_THRESHOLD;
use crate::interaction::reveal::{starts_visible, RevealAction, RevealState};

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    #[prop_or_default]
    pub class: Classes,
    pub children: Children,
}

/// Fades its children in the first time they scroll into view.
#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let node_ref = use_node_ref();
    let immediate = *use_memo(|_| starts_visible(media::prefers_reduced_motion(), observer::supported()), ());
    let visible = use_state(|| immediate);
    let tracker = use_mut_ref(RevealState::default);

    {
        let node_ref = node_ref.clone();
        let visible = visible.clone();
        use_effect_with_deps(move |_| {
            let mut watch = None;
            if immediate {
                tracker.borrow_mut().reveal_now();
            } else if let Some(element) = node_ref.cast::<web_sys::Element>() {
                let on_change = {
                    let visible = visible.clone();
                    move |sightings: &[observer::Sighting], io: &web_sys::IntersectionObserver| {
                        for sighting in sightings {
                            let action = tracker
                                .borrow_mut()
                                .observe(sighting.intersecting, sighting.ratio, REVEAL_THRESHOLD);
                            if action == RevealAction::Reveal {
                                io.unobserve(&sighting.target);
                                visible.set(tracker.borrow().is_visible());
                            }
                        }
                    }
                };
                match ViewportWatch::new(&[0.0, REVEAL_THRESHOLD], None, on_change) {
                    Ok(w) => {
                        w.observe(&element);
                        watch = Some(w);
                    }
                    Err(_) => {
                        warn!("Reveal observer unavailable, showing content");
                        visible.set(true);
                    }
                }
            }
            move || drop(watch)
        }, ());
    }

    html! {
        <div
            ref={node_ref}
            class={classes!("reveal", props.class.clone(), (*visible).then(|| "is-visible"))}
        >
            { for props.children.iter() }
        </div>
    }
}
