use crate::app::App;

mod app;
mod components;
mod config;
mod platform;
mod session;
mod workflow;

fn main() {
    platform::console_logger::init(config::LOG_LEVEL);
    yew::Renderer::<App>::new().render();
}
