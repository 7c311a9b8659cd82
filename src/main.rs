use yew::prelude::*;
use yew_router::prelude::*;
use log::info;

mod config;
mod content;
mod interaction {
    pub mod step_rail;
    pub mod rail_geometry;
    pub mod nav;
    pub mod header_cta;
    pub mod glow;
    pub mod reveal;
}
mod browser {
    pub mod observer;
    pub mod frame;
    pub mod media;
    pub mod cache_cleanup;
}
mod components {
    pub mod site_header;
    pub mod step_rail;
    pub mod pointer_glow;
    pub mod reveal;
}
mod pages {
    pub mod home;
}

use pages::home::Home;


#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}


fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        },
        Route::NotFound => {
            info!("Unknown path, redirecting home");
            html! { <Redirect<Route> to={Route::Home} /> }
        },
    }
}


#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}


fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting application");
    browser::cache_cleanup::run_once();
    yew::Renderer::<App>::new().render();
}
