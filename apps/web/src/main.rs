mod analyze;
mod cards;
mod config;
mod console;
mod dom;
mod error;
mod pipeline;
mod radar;
mod score;
mod search;

use config::PageConfig;
use error::PageError;

fn main() {
    if let Err(error) = start() {
        console::error(&format!("page script failed to start: {error}"));
    }
}

fn start() -> Result<(), PageError> {
    let window = web_sys::window().ok_or(PageError::NoWindow)?;
    let document = window.document().ok_or(PageError::NoDocument)?;
    let config = PageConfig::from_window(&window);

    let target = document.clone();
    dom::on_ready(&target, move || {
        // Each behaviour stands alone; one failing must not stop the others.
        match dom::wire_search_form(&window, &document, &config) {
            Ok(true) => {}
            Ok(false) => console::info("no search form on this page"),
            Err(error) => console::error(&format!("search form not wired: {error}")),
        }

        if let Err(error) = dom::render_radar(&document, &config) {
            console::error(&format!("radar not rendered: {error}"));
        }

        match dom::decorate_fact_cards(&document, &config) {
            Ok(count) if count > 0 => console::info(&format!("{count} score badges set")),
            Ok(_) => {}
            Err(error) => console::error(&format!("score badges not set: {error}")),
        }
    })
}
