//! Browser implementations of the page seams, plus the page-load wiring.

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlInputElement, NodeList, Request, RequestInit,
    RequestMode, Response, Window,
};

use crate::analyze::{AnalyzeRequest, Reply};
use crate::cards::{decorate_cards, ScoreCard};
use crate::config::PageConfig;
use crate::console;
use crate::error::PageError;
use crate::pipeline::{Step, StepState};
use crate::radar::{
    draw_radar, points_attribute, ChartCanvas, Point, RadarGeometry, RadarValues, Stroke,
    LABEL_FILL, LABEL_FONT_SIZE,
};
use crate::search::{AnalyzeClient, Scheduler, SearchFlow, SearchPage, Submission};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
/// `fetch`'s own default, so a configured cross-origin endpoint still works.
const FETCH_MODE: RequestMode = RequestMode::Cors;

fn elements(list: &NodeList) -> impl Iterator<Item = Element> + '_ {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
}

fn report(context: &str, result: Result<(), JsValue>) {
    if let Err(error) = result {
        console::warn(&format!("{context}: {}", PageError::from(error)));
    }
}

/// Runs `init` once the document is parsed.
pub fn on_ready(document: &Document, init: impl FnOnce() + 'static) -> Result<(), PageError> {
    if document.ready_state() != "loading" {
        init();
        return Ok(());
    }

    let mut init = Some(init);
    let listener = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        if let Some(init) = init.take() {
            init();
        }
    });
    document
        .add_event_listener_with_callback("DOMContentLoaded", listener.as_ref().unchecked_ref())?;
    listener.forget();
    Ok(())
}

pub struct ModalPage {
    window: Window,
    modal: Option<Element>,
    steps: Vec<Element>,
    hint: Option<Element>,
    hidden_class: String,
    active_class: String,
}

impl ModalPage {
    pub fn new(window: Window, document: &Document, config: &PageConfig) -> Self {
        let modal = document.get_element_by_id(&config.modal_id);
        let steps = modal
            .as_ref()
            .and_then(|modal| modal.query_selector_all(&config.step_selector).ok())
            .map(|list| elements(&list).collect())
            .unwrap_or_default();
        let hint = modal
            .as_ref()
            .and_then(|modal| modal.query_selector(&config.hint_selector).ok().flatten());

        Self {
            window,
            modal,
            steps,
            hint,
            hidden_class: config.hidden_class.clone(),
            active_class: config.active_class.clone(),
        }
    }

    pub const fn has_modal(&self) -> bool {
        self.modal.is_some()
    }

    fn step_node(&self, step: Step) -> Option<&Element> {
        self.steps.iter().find(|node| {
            node.get_attribute("data-step")
                .and_then(|key| Step::parse(&key))
                == Some(step)
        })
    }
}

impl SearchPage for ModalPage {
    fn show_modal(&self) {
        if let Some(modal) = &self.modal {
            report("show modal", modal.class_list().remove_1(&self.hidden_class));
        }
    }

    fn hide_modal(&self) {
        if let Some(modal) = &self.modal {
            report("hide modal", modal.class_list().add_1(&self.hidden_class));
        }
    }

    fn set_step_state(&self, step: Step, state: StepState) {
        if let Some(node) = self.step_node(step) {
            report("step state", node.set_attribute("data-state", state.as_str()));
        }
    }

    fn step_count(&self) -> usize {
        self.steps.len()
    }

    fn highlight_step(&self, index: usize) {
        for (position, node) in self.steps.iter().enumerate() {
            report(
                "highlight step",
                node.class_list()
                    .toggle_with_force(&self.active_class, position == index)
                    .map(|_| ()),
            );
        }
    }

    fn set_hint(&self, text: &str) {
        if let Some(hint) = &self.hint {
            hint.set_text_content(Some(text));
        }
    }

    fn alert(&self, message: &str) {
        report("alert", self.window.alert_with_message(message));
    }

    fn navigate(&self, path: &str) {
        report("navigate", self.window.location().assign(path));
    }
}

pub struct FetchClient {
    window: Window,
    endpoint: String,
}

impl FetchClient {
    pub fn new(window: Window, endpoint: &str) -> Self {
        Self {
            window,
            endpoint: endpoint.to_string(),
        }
    }

    async fn post(&self, request: &AnalyzeRequest) -> Result<Reply, PageError> {
        let payload = serde_json::to_string(request)?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(FETCH_MODE);
        opts.set_body(&JsValue::from_str(&payload));

        let request = Request::new_with_str_and_init(&self.endpoint, &opts)?;
        request.headers().set("Content-Type", "application/json")?;

        let response_value = JsFuture::from(self.window.fetch_with_request(&request)).await?;
        let response = response_value
            .dyn_into::<Response>()
            .map_err(|_| PageError::NotAResponse)?;

        let body = JsFuture::from(response.text()?)
            .await?
            .as_string()
            .unwrap_or_default();

        Ok(Reply {
            status: response.status(),
            body,
        })
    }
}

impl AnalyzeClient for FetchClient {
    fn analyze<'a>(
        &'a self,
        request: &'a AnalyzeRequest,
    ) -> LocalBoxFuture<'a, Result<Reply, PageError>> {
        self.post(request).boxed_local()
    }
}

pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Repeating = Interval;

    fn after(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, task).forget();
    }

    fn every(&self, period_ms: u32, task: Box<dyn FnMut()>) -> Interval {
        Interval::new(period_ms, task)
    }
}

pub type BrowserSearchFlow = SearchFlow<ModalPage, FetchClient, BrowserScheduler>;

/// Resets the modal and hooks the search form. Returns `false` when the page
/// has no search form.
pub fn wire_search_form(
    window: &Window,
    document: &Document,
    config: &PageConfig,
) -> Result<bool, PageError> {
    let page = Rc::new(ModalPage::new(window.clone(), document, config));
    let has_modal = page.has_modal();
    let client = FetchClient::new(window.clone(), &config.endpoint);
    let flow: Rc<BrowserSearchFlow> = Rc::new(SearchFlow::new(page, client, BrowserScheduler, config));

    if has_modal {
        flow.reset();
    }

    let Some(form) = document.get_element_by_id(&config.form_id) else {
        return Ok(false);
    };
    let input = document
        .get_element_by_id(&config.input_id)
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok());
    if input.is_none() {
        console::warn(&format!("search input #{} not found", config.input_id));
    }

    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        let name = input.as_ref().map(HtmlInputElement::value).unwrap_or_default();
        let flow = Rc::clone(&flow);
        spawn_local(async move {
            log_submission(&flow.submit(&name).await);
        });
    });
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();

    Ok(true)
}

fn log_submission(submission: &Submission) {
    match submission {
        Submission::Ignored => {}
        Submission::Busy => console::info("analysis already running, submit ignored"),
        Submission::Redirected(path) => console::info(&format!("analysis ready, opening {path}")),
        Submission::Failed(message) => console::warn(&format!("analysis failed: {message}")),
    }
}

pub struct SvgCanvas {
    document: Document,
    svg: Element,
}

impl SvgCanvas {
    pub const fn new(document: Document, svg: Element) -> Self {
        Self { document, svg }
    }

    fn append(&self, tag: &str, attributes: &[(&str, &str)]) -> Result<Element, PageError> {
        let element = self.document.create_element_ns(Some(SVG_NS), tag)?;
        for (name, value) in attributes {
            element.set_attribute(name, value)?;
        }
        self.svg.append_child(&element)?;
        Ok(element)
    }
}

impl ChartCanvas for SvgCanvas {
    type Error = PageError;

    fn clear(&mut self) -> Result<(), PageError> {
        while let Some(child) = self.svg.first_child() {
            self.svg.remove_child(&child)?;
        }
        Ok(())
    }

    fn polygon(&mut self, points: &[Point], style: Stroke) -> Result<(), PageError> {
        self.append(
            "polygon",
            &[
                ("fill", style.fill),
                ("stroke", style.stroke),
                ("stroke-width", &style.width.to_string()),
                ("points", &points_attribute(points)),
            ],
        )?;
        Ok(())
    }

    fn line(&mut self, from: Point, to: Point, style: Stroke) -> Result<(), PageError> {
        self.append(
            "line",
            &[
                ("x1", &from.x.to_string()),
                ("y1", &from.y.to_string()),
                ("x2", &to.x.to_string()),
                ("y2", &to.y.to_string()),
                ("stroke", style.stroke),
                ("stroke-width", &style.width.to_string()),
            ],
        )?;
        Ok(())
    }

    fn text(&mut self, at: Point, content: &str) -> Result<(), PageError> {
        let text = self.append(
            "text",
            &[
                ("x", &at.x.to_string()),
                ("y", &at.y.to_string()),
                ("text-anchor", "middle"),
                ("dominant-baseline", "middle"),
                ("font-size", &LABEL_FONT_SIZE.to_string()),
                ("fill", LABEL_FILL),
            ],
        )?;
        text.set_text_content(Some(content));
        Ok(())
    }
}

/// Draws the radar into the configured `<svg>`. Returns `false` when the page
/// has no chart.
pub fn render_radar(document: &Document, config: &PageConfig) -> Result<bool, PageError> {
    let Some(svg) = document.get_element_by_id(&config.radar_id) else {
        return Ok(false);
    };

    let values = RadarValues::from_attributes(|key| svg.get_attribute(&format!("data-{key}")));
    let mut canvas = SvgCanvas::new(document.clone(), svg);
    draw_radar(&mut canvas, &RadarGeometry::default(), &values)?;
    Ok(true)
}

struct FactCard<'a> {
    card: Element,
    badge_selector: &'a str,
    progress_selector: &'a str,
}

impl FactCard<'_> {
    fn find(&self, selector: &str) -> Option<Element> {
        self.card.query_selector(selector).ok().flatten()
    }
}

impl ScoreCard for FactCard<'_> {
    fn score_attribute(&self) -> Option<String> {
        self.card.get_attribute("data-score")
    }

    fn set_badge(&self, text: &str) {
        if let Some(badge) = self.find(self.badge_selector) {
            badge.set_text_content(Some(text));
        }
    }

    fn set_progress_width(&self, percent: f64) -> bool {
        let Some(bar) = self
            .find(self.progress_selector)
            .and_then(|bar| bar.dyn_into::<HtmlElement>().ok())
        else {
            return false;
        };
        bar.style()
            .set_property("width", &format!("{percent}%"))
            .is_ok()
    }
}

/// Writes score badges into every card. Returns the number of cards seen.
pub fn decorate_fact_cards(document: &Document, config: &PageConfig) -> Result<usize, PageError> {
    let nodes = document.query_selector_all(&config.card_selector)?;
    Ok(decorate_cards(elements(&nodes).map(|card| FactCard {
        card,
        badge_selector: &config.badge_selector,
        progress_selector: &config.progress_selector,
    })))
}
