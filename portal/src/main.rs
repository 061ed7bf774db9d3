mod api;
mod app;
mod components;
mod config;
mod display;
mod forms;
mod hooks;
mod pages;
mod router;
mod session;

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Starting portal, api_url={}", config::API_URL);
    yew::Renderer::<app::App>::new().render();
}
