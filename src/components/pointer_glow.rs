use log::debug;
use yew::prelude::*;
use web_sys::HtmlElement;

use crate::browser::frame::next_frame;
use crate::browser::media;
use crate::interaction::glow::{glow_allowed, pointer_percent, FrameThrottle, Rect};

#[derive(Properties, PartialEq)]
pub struct PointerGlowProps {
    #[prop_or_default]
    pub class: Classes,
    pub children: Children,
}

fn paint(element: &HtmlElement, client_x: f64, client_y: f64) {
    let bounds = element.get_bounding_client_rect();
    let rect = Rect {
        left: bounds.left(),
        top: bounds.top(),
        width: bounds.width(),
        height: bounds.height(),
    };
    if let Some((x, y)) = pointer_percent(client_x, client_y, rect) {
        let style = element.style();
        let _ = style.set_property("--mx", &format!("{:.2}%", x));
        let _ = style.set_property("--my", &format!("{:.2}%", y));
    }
}

/// Card whose CSS radial highlight follows a mouse pointer.
#[function_component(PointerGlow)]
pub fn pointer_glow(props: &PointerGlowProps) -> Html {
    let node_ref = use_node_ref();
    let throttle = use_mut_ref(FrameThrottle::default);
    let enabled = use_memo(
        |_| {
            let allowed = glow_allowed(media::prefers_reduced_motion(), media::fine_pointer());
            debug!("Pointer glow enabled: {}", allowed);
            allowed
        },
        (),
    );

    let onmousemove = (*enabled).then(|| {
        let node_ref = node_ref.clone();
        Callback::from(move |e: MouseEvent| {
            let scheduled = throttle
                .borrow_mut()
                .push(e.client_x() as f64, e.client_y() as f64);
            if !scheduled {
                return;
            }
            let throttle = throttle.clone();
            let node_ref = node_ref.clone();
            next_frame(move || {
                let latest = throttle.borrow_mut().take();
                if let (Some((x, y)), Some(element)) = (latest, node_ref.cast::<HtmlElement>()) {
                    paint(&element, x, y);
                }
            });
        })
    });

    html! {
        <div ref={node_ref} class={classes!("magic", props.class.clone())} {onmousemove}>
            { for props.children.iter() }
        </div>
    }
}
