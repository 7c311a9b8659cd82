use gloo_timers::callback::Timeout;
use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};
use yew::prelude::*;

use crate::browser::frame::next_frame;
use crate::browser::observer::{self, ViewportWatch};
use crate::browser::media;
use crate::config::{
    DETAIL_SWAP_DELAY_MS, FONT_SETTLE_MS, RAIL_TRANSITION, STEP_SCROLL_ROOT_MARGIN, STEP_SCROLL_THRESHOLDS,
};
use crate::content::StepDetail;
use crate::interaction::rail_geometry::{RailGeometry, TriggerBox};
use crate::interaction::step_rail::{GeometryMode, ScrollRatios, StepEvent, StepRailConfig, StepRailState};

#[derive(Properties, PartialEq)]
pub struct StepRailProps {
    pub steps: Vec<StepDetail>,
    #[prop_or_default]
    pub config: StepRailConfig,
}

pub enum StepRailMsg {
    Step(StepEvent),
    /// Rebuild geometry from layout. `instant` skips the fill transition.
    Measure { instant: bool },
    RestoreTransition,
    ScrollSeen(Vec<(usize, Option<f64>)>),
    SectionLeft,
    SwapContent,
    SwapSettled,
    /// (Re)attach the step and section observers to the mounted triggers.
    Observe,
}

/// Whether new props invalidate the step state and the mounted triggers.
fn needs_reset(old: &StepRailProps, new: &StepRailProps) -> bool {
    old.steps.len() != new.steps.len() || old.config != new.config
}

pub struct StepRail {
    state: StepRailState,
    ratios: ScrollRatios,
    geometry: Option<RailGeometry>,
    dot_height: f64,
    /// Step whose details the card currently shows.
    shown: Option<usize>,
    swapping: bool,
    instant_fill: bool,
    reduced_motion: bool,
    rail_ref: NodeRef,
    section_ref: NodeRef,
    trigger_refs: Vec<NodeRef>,
    dot_refs: Vec<NodeRef>,
    watches: Vec<ViewportWatch>,
    resize_listener: Option<Closure<dyn FnMut()>>,
    swap_timeout: Option<Timeout>,
    settle_timeout: Option<Timeout>,
}

impl StepRail {
    fn reset_for(&mut self, props: &StepRailProps) {
        let count = props.steps.len();
        self.state = StepRailState::new(count, props.config);
        self.ratios = ScrollRatios::new(count);
        self.trigger_refs = (0..count).map(|_| NodeRef::default()).collect();
        self.dot_refs = (0..count).map(|_| NodeRef::default()).collect();
        self.geometry = None;
        self.shown = self.state.active();
        self.swapping = false;
        self.swap_timeout = None;
    }

    fn measure(&mut self) {
        let Some(rail) = self.rail_ref.cast::<Element>() else {
            debug!("Rail not mounted, skipping measurement");
            return;
        };
        let rail_rect = rail.get_bounding_client_rect();
        let triggers: Vec<TriggerBox> = self
            .trigger_refs
            .iter()
            .filter_map(|r| r.cast::<Element>())
            .map(|el| {
                let rect = el.get_bounding_client_rect();
                TriggerBox {
                    top: rect.top(),
                    height: rect.height(),
                }
            })
            .collect();
        if triggers.len() != self.trigger_refs.len() {
            return;
        }
        self.dot_height = self
            .dot_refs
            .first()
            .and_then(|r| r.cast::<HtmlElement>())
            .map(|dot| dot.offset_height() as f64)
            .unwrap_or(0.0);
        self.geometry = RailGeometry::measure(rail_rect.top(), rail_rect.height(), &triggers);
    }

    fn on_active_changed(&mut self, ctx: &Context<Self>) {
        let active = self.state.active();
        debug!("Active step is now {:?}", active);

        if self.state.config().geometry == GeometryMode::PerActivation {
            let link = ctx.link().clone();
            next_frame(move || link.send_message(StepRailMsg::Measure { instant: false }));
        }

        match (self.shown, active) {
            (_, None) => {
                self.shown = None;
                self.swapping = false;
                self.swap_timeout = None;
            }
            (None, Some(_)) => self.shown = active,
            (Some(_), Some(_)) if self.reduced_motion => self.shown = active,
            (Some(_), Some(_)) => {
                self.swapping = true;
                let link = ctx.link().clone();
                self.swap_timeout = Some(Timeout::new(DETAIL_SWAP_DELAY_MS, move || {
                    link.send_message(StepRailMsg::SwapContent);
                }));
            }
        }
    }

    fn start_observing(&mut self, ctx: &Context<Self>) {
        if !observer::supported() {
            warn!("IntersectionObserver unavailable, step rail is click/hover only");
            return;
        }

        let config = *self.state.config();
        if config.scroll_select {
            let link = ctx.link().clone();
            let watch = ViewportWatch::new(
                &STEP_SCROLL_THRESHOLDS,
                Some(STEP_SCROLL_ROOT_MARGIN),
                move |sightings, _| {
                    let seen = sightings
                        .iter()
                        .filter_map(|s| s.step_index().map(|i| (i, s.intersecting.then(|| s.ratio))))
                        .collect();
                    link.send_message(StepRailMsg::ScrollSeen(seen));
                },
            );
            match watch {
                Ok(watch) => {
                    for trigger in self.trigger_refs.iter().filter_map(|r| r.cast::<Element>()) {
                        watch.observe(&trigger);
                    }
                    self.watches.push(watch);
                }
                Err(_) => warn!("Could not observe step triggers"),
            }
        }

        if config.close_on_leave {
            let link = ctx.link().clone();
            let watch = ViewportWatch::new(&[0.0], None, move |sightings, _| {
                if sightings.iter().any(|s| !s.intersecting) {
                    link.send_message(StepRailMsg::SectionLeft);
                }
            });
            match (watch, self.section_ref.cast::<Element>()) {
                (Ok(watch), Some(section)) => {
                    watch.observe(&section);
                    self.watches.push(watch);
                }
                _ => warn!("Could not observe step section"),
            }
        }
    }

    fn listen_for_resize(&mut self, ctx: &Context<Self>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let link = ctx.link().clone();
        let resize_callback = Closure::wrap(Box::new(move || {
            let link = link.clone();
            next_frame(move || link.send_message(StepRailMsg::Measure { instant: true }));
        }) as Box<dyn FnMut()>);
        if window
            .add_event_listener_with_callback("resize", resize_callback.as_ref().unchecked_ref())
            .is_ok()
        {
            self.resize_listener = Some(resize_callback);
        }
    }

    fn rail_style(&self) -> String {
        match &self.geometry {
            Some(geometry) => format!("min-height: {}px;", geometry.min_rail_height()),
            None => String::new(),
        }
    }

    fn track_style(&self) -> String {
        match &self.geometry {
            Some(g) => format!("top: {}px; height: {}px;", g.start(), (g.end() - g.start()).max(0.0)),
            None => "display: none;".to_string(),
        }
    }

    fn fill_style(&self) -> String {
        let transition = if self.instant_fill || self.reduced_motion {
            "none"
        } else {
            RAIL_TRANSITION
        };
        match &self.geometry {
            Some(g) => format!(
                "top: {}px; height: {}px; transition: {};",
                g.start(),
                g.fill_px(self.state.active()),
                transition
            ),
            None => "height: 0px;".to_string(),
        }
    }

    fn dot_style(&self, index: usize) -> String {
        self.geometry
            .as_ref()
            .and_then(|g| g.dot_offset(index, self.dot_height))
            .map(|top| format!("top: {}px;", top))
            .unwrap_or_default()
    }

    fn view_detail(&self, steps: &[StepDetail]) -> Html {
        let detail = self.shown.and_then(|i| steps.get(i));
        html! {
            <div
                id="detailCard"
                class={classes!(
                    "detail-card",
                    self.swapping.then(|| "is-swapping"),
                    detail.is_none().then(|| "is-empty"),
                )}
                aria-hidden={if detail.is_none() { "true" } else { "false" }}
                aria-live="polite"
            >
                {
                    match detail {
                        Some(d) => html! {
                            <>
                                <p id="detailKicker" class="detail-kicker">{&d.kicker}</p>
                                <h3 id="detailTitle" class="detail-title">{&d.title}</h3>
                                <ul id="detailBullets" class="detail-bullets">
                                    { for d.bullets.iter().map(|b| html! { <li>{b}</li> }) }
                                </ul>
                            </>
                        },
                        None => html! {},
                    }
                }
            </div>
        }
    }
}

impl Component for StepRail {
    type Message = StepRailMsg;
    type Properties = StepRailProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut rail = Self {
            state: StepRailState::new(0, ctx.props().config),
            ratios: ScrollRatios::default(),
            geometry: None,
            dot_height: 0.0,
            shown: None,
            swapping: false,
            instant_fill: true,
            reduced_motion: media::prefers_reduced_motion(),
            rail_ref: NodeRef::default(),
            section_ref: NodeRef::default(),
            trigger_refs: Vec::new(),
            dot_refs: Vec::new(),
            watches: Vec::new(),
            resize_listener: None,
            swap_timeout: None,
            settle_timeout: None,
        };
        rail.reset_for(ctx.props());
        rail
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            StepRailMsg::Step(event) => {
                if !self.state.apply(event) {
                    return false;
                }
                self.on_active_changed(ctx);
                true
            }
            StepRailMsg::Measure { instant } => {
                self.measure();
                if instant && !self.reduced_motion {
                    self.instant_fill = true;
                    let link = ctx.link().clone();
                    next_frame(move || link.send_message(StepRailMsg::RestoreTransition));
                }
                true
            }
            StepRailMsg::RestoreTransition => {
                self.instant_fill = false;
                true
            }
            StepRailMsg::ScrollSeen(seen) => {
                for (index, ratio) in seen {
                    self.ratios.record(index, ratio);
                }
                let selected = self.ratios.most_visible();
                if !self.state.apply(StepEvent::ScrollInto(selected)) {
                    return false;
                }
                self.on_active_changed(ctx);
                true
            }
            StepRailMsg::SectionLeft => {
                self.ratios.clear();
                if !self.state.apply(StepEvent::LeaveSection) {
                    return false;
                }
                self.on_active_changed(ctx);
                true
            }
            StepRailMsg::SwapContent => {
                self.shown = self.state.active();
                self.swap_timeout = None;
                let link = ctx.link().clone();
                next_frame(move || link.send_message(StepRailMsg::SwapSettled));
                true
            }
            StepRailMsg::Observe => {
                self.watches.clear();
                self.start_observing(ctx);
                false
            }
            StepRailMsg::SwapSettled => {
                let was_swapping = self.swapping;
                self.swapping = false;
                was_swapping
            }
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if needs_reset(old_props, ctx.props()) {
            self.reset_for(ctx.props());
            // Old observers watch triggers that are about to be replaced
            self.watches.clear();
            let link = ctx.link().clone();
            next_frame(move || {
                link.send_message(StepRailMsg::Observe);
                link.send_message(StepRailMsg::Measure { instant: true });
            });
        }
        true
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render {
            return;
        }
        info!("Step rail mounted with {} steps", self.state.count());
        self.start_observing(ctx);
        self.listen_for_resize(ctx);

        let link = ctx.link().clone();
        next_frame(move || link.send_message(StepRailMsg::Measure { instant: true }));

        let link = ctx.link().clone();
        self.settle_timeout = Some(Timeout::new(FONT_SETTLE_MS, move || {
            link.send_message(StepRailMsg::Measure { instant: true });
        }));
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let (Some(window), Some(callback)) = (web_sys::window(), self.resize_listener.take()) {
            let _ = window.remove_event_listener_with_callback("resize", callback.as_ref().unchecked_ref());
        }
        self.watches.clear();
        // Dropping a Timeout cancels it
        drop(self.swap_timeout.take());
        drop(self.settle_timeout.take());
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let steps = &ctx.props().steps;
        let link = ctx.link();

        html! {
            <div class="how-grid" ref={self.section_ref.clone()}>
                <div class="rail" ref={self.rail_ref.clone()} style={self.rail_style()} aria-hidden="true">
                    <div class="rail-track" style={self.track_style()}></div>
                    <div id="railFill" class="rail-fill" style={self.fill_style()}></div>
                    { for (0..steps.len()).map(|i| html! {
                        <span
                            ref={self.dot_refs.get(i).cloned().unwrap_or_default()}
                            class={classes!(
                                "rail-dot",
                                self.state.is_active(i).then(|| "is-active"),
                                self.state.is_done(i).then(|| "is-done"),
                            )}
                            style={self.dot_style(i)}
                        ></span>
                    }) }
                </div>
                <div id="steps" class="steps">
                    { for steps.iter().enumerate().map(|(i, step)| {
                        let active = self.state.is_active(i);
                        html! {
                            <button
                                type="button"
                                ref={self.trigger_refs.get(i).cloned().unwrap_or_default()}
                                class={classes!(
                                    "step-card",
                                    active.then(|| "is-active"),
                                    self.state.is_done(i).then(|| "is-done"),
                                )}
                                data-step={i.to_string()}
                                aria-expanded={if active { "true" } else { "false" }}
                                aria-controls="detailCard"
                                onclick={link.callback(move |_: MouseEvent| StepRailMsg::Step(StepEvent::Click(i)))}
                                onmouseenter={link.callback(move |_: MouseEvent| StepRailMsg::Step(StepEvent::HoverEnter(i)))}
                                onmouseleave={link.callback(|_: MouseEvent| StepRailMsg::Step(StepEvent::HoverLeave))}
                                onfocus={link.callback(move |_: FocusEvent| StepRailMsg::Step(StepEvent::Focus(i)))}
                                onblur={link.callback(|_: FocusEvent| StepRailMsg::Step(StepEvent::Blur))}
                            >
                                <span class="step-kicker">{&step.kicker}</span>
                                <span class="step-title">{&step.title}</span>
                            </button>
                        }
                    }) }
                </div>
                { self.view_detail(steps) }
            </div>
        }
    }
}
