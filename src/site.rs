//! Wires the page behaviours into the document: navbar scroll state, the
//! mobile menu, fade-up reveals, the multi-step quote form and smooth
//! anchor scrolling. Each behaviour is skipped when its elements are not on
//! the page.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::closure::WasmClosure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlButtonElement, HtmlElement, HtmlFormElement,
    HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, NodeList, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

use crate::anchor::scroll_target;
use crate::form::{validate_fields, FieldKind, FormField, StepFlow, ERROR_CLASS};
use crate::menu::MobileMenu;
use crate::navbar::NavbarState;
use crate::reveal::{RevealTracker, REVEAL_CLASS, REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD};
use crate::submit::{submit_form, SENDING_LABEL, SUBMIT_ENDPOINT};

const REVEAL_INDEX_ATTR: &str = "data-reveal-index";

#[wasm_bindgen]
pub fn start_site() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no global window")?;
    let document = window.document().ok_or("window has no document")?;
    wire_navbar(&window, &document)?;
    wire_menu(&document)?;
    wire_reveal(&document)?;
    wire_form(&window, &document)?;
    wire_anchors(&document)?;
    info!("site behaviours started");
    Ok(())
}

fn listen<T>(target: &EventTarget, event: &str, closure: Closure<T>) -> Result<(), JsValue>
where
    T: ?Sized + WasmClosure,
{
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn collect(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(err) = element.class_list().toggle_with_force(class, on) {
        warn!("could not set class {}: {:?}", class, err);
    }
}

fn data_number(element: &Element, attr: &str) -> Option<u32> {
    element.get_attribute(attr)?.trim().parse().ok()
}

fn wire_navbar(window: &Window, document: &Document) -> Result<(), JsValue> {
    let navbar = match document.get_element_by_id("navbar") {
        Some(navbar) => navbar,
        None => return Ok(()),
    };
    let state = RefCell::new(NavbarState::default());
    let scroll_window = window.clone();
    let on_scroll = Closure::wrap(Box::new(move || {
        let scroll_y = scroll_window.scroll_y().unwrap_or(0.0);
        if let Some(scrolled) = state.borrow_mut().on_scroll(scroll_y) {
            set_class(&navbar, "scrolled", scrolled);
        }
    }) as Box<dyn FnMut()>);
    listen(window, "scroll", on_scroll)?;
    debug!("navbar wired");
    Ok(())
}

fn wire_menu(document: &Document) -> Result<(), JsValue> {
    let (toggle, links) = match (
        document.get_element_by_id("menuToggle"),
        document.get_element_by_id("navLinks"),
    ) {
        (Some(toggle), Some(links)) => (toggle, links),
        _ => return Ok(()),
    };
    let menu = Rc::new(RefCell::new(MobileMenu::default()));
    let show: Rc<dyn Fn(bool)> = {
        let toggle = toggle.clone();
        let links = links.clone();
        Rc::new(move |open: bool| {
            set_class(&toggle, "active", open);
            set_class(&links, "open", open);
        })
    };

    let on_toggle = {
        let menu = menu.clone();
        let show = show.clone();
        Closure::wrap(Box::new(move || {
            let open = menu.borrow_mut().toggle();
            show(open);
        }) as Box<dyn FnMut()>)
    };
    listen(&toggle, "click", on_toggle)?;

    for link in collect(links.query_selector_all("a")?) {
        let menu = menu.clone();
        let show = show.clone();
        let on_click = Closure::wrap(Box::new(move || {
            menu.borrow_mut().close();
            show(false);
        }) as Box<dyn FnMut()>);
        listen(&link, "click", on_click)?;
    }

    let on_key = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        if menu.borrow_mut().on_key(&event.key()) {
            show(false);
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);
    listen(document, "keydown", on_key)?;
    debug!("mobile menu wired");
    Ok(())
}

fn wire_reveal(document: &Document) -> Result<(), JsValue> {
    let targets = collect(document.query_selector_all(".fade-up")?);
    if targets.is_empty() {
        return Ok(());
    }
    for (index, target) in targets.iter().enumerate() {
        target.set_attribute(REVEAL_INDEX_ATTR, &index.to_string())?;
    }
    let mut tracker = RevealTracker::new(targets.len());
    let on_intersect = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
        let seen: Vec<(usize, bool, Element)> = entries
            .iter()
            .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
            .filter_map(|entry| {
                let target = entry.target();
                let index = data_number(&target, REVEAL_INDEX_ATTR)? as usize;
                Some((index, entry.is_intersecting(), target))
            })
            .collect();
        let revealed = tracker.observe(seen.iter().map(|(index, intersecting, _)| (*index, *intersecting)));
        for (index, _, target) in &seen {
            if revealed.contains(index) {
                set_class(target, REVEAL_CLASS, true);
                observer.unobserve(target);
            }
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let mut options = IntersectionObserverInit::new();
    options.threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.root_margin(REVEAL_ROOT_MARGIN);
    let observer = IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options)?;
    on_intersect.forget();
    for target in &targets {
        observer.observe(target);
    }
    debug!("observing {} fade-up elements", targets.len());
    Ok(())
}

struct QuoteForm {
    window: Window,
    document: Document,
    form: HtmlFormElement,
    steps: Vec<Element>,
    indicators: Vec<Element>,
    flow: RefCell<StepFlow>,
}

impl QuoteForm {
    fn show_current(&self) {
        let flow = self.flow.borrow();
        for step in &self.steps {
            let active = data_number(step, "data-step") == Some(flow.current());
            set_class(step, "active", active);
        }
        for indicator in &self.indicators {
            let state = match data_number(indicator, "data-step") {
                Some(n) => flow.indicator(n),
                None => continue,
            };
            set_class(indicator, "active", false);
            set_class(indicator, "completed", false);
            if let Some(class) = state.class() {
                set_class(indicator, class, true);
            }
        }
    }

    /// Validates the required fields of the current step and marks the
    /// failing ones.
    fn validate_current(&self) -> bool {
        let current = self.flow.borrow().current();
        let step = self
            .steps
            .iter()
            .find(|step| data_number(step, "data-step") == Some(current));
        let elements = match step.map(|step| step.query_selector_all("[required]")) {
            Some(Ok(list)) => collect(list),
            _ => return true,
        };
        let fields: Vec<FormField> = elements.iter().map(read_field).collect();
        let errors = validate_fields(&fields);
        for element in &elements {
            set_class(element, ERROR_CLASS, false);
        }
        for error in &errors {
            set_class(&elements[error.index], ERROR_CLASS, true);
        }
        if !errors.is_empty() {
            debug!("step {} has {} invalid fields", current, errors.len());
        }
        errors.is_empty()
    }

    fn submit_button(&self) -> Option<HtmlButtonElement> {
        self.form
            .query_selector("button[type=\"submit\"]")
            .ok()
            .flatten()
            .and_then(|button| button.dyn_into::<HtmlButtonElement>().ok())
    }

    fn finish(&self) {
        hide(&self.form);
        if let Ok(Some(indicator)) = self.document.query_selector(".form-steps-indicator") {
            if let Some(indicator) = indicator.dyn_ref::<HtmlElement>() {
                hide(indicator);
            }
        }
        if let Some(message) = self.document.get_element_by_id("successMessage") {
            set_class(&message, "active", true);
        }
    }
}

/// Name/value pairs the form would post, in document order. Disabled
/// controls and unchecked checkboxes or radios are left out, as `FormData`
/// does.
fn form_pairs(form: &HtmlFormElement) -> Vec<(String, String)> {
    let elements = match form.query_selector_all("input[name], select[name], textarea[name]") {
        Ok(list) => collect(list),
        Err(_) => return Vec::new(),
    };
    elements
        .iter()
        .filter(|element| !element.matches(":disabled").unwrap_or(false))
        .filter(|element| match element.dyn_ref::<HtmlInputElement>() {
            Some(input) if matches!(input.type_().as_str(), "checkbox" | "radio") => input.checked(),
            _ => true,
        })
        .map(read_field)
        .map(|field| (field.name, field.value))
        .collect()
}

/// Shows the sending label and disables the button. Returns the label to
/// restore on failure.
fn mark_sending(button: &HtmlButtonElement) -> String {
    let label = button.inner_html();
    button.set_inner_html(SENDING_LABEL);
    button.set_disabled(true);
    label
}

fn restore_button(button: &HtmlButtonElement, label: &str) {
    button.set_inner_html(label);
    button.set_disabled(false);
}

fn hide(element: &HtmlElement) {
    if let Err(err) = element.style().set_property("display", "none") {
        warn!("could not hide element: {:?}", err);
    }
}

fn read_field(element: &Element) -> FormField {
    let name = element.get_attribute("name").unwrap_or_default();
    let required = element.has_attribute("required");
    let (kind, value) = if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        (FieldKind::from_input_type(&input.type_()), input.value())
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        (FieldKind::Other, select.value())
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        (FieldKind::Text, area.value())
    } else {
        (FieldKind::Other, String::new())
    };
    FormField {
        name,
        kind,
        required,
        value,
    }
}

fn wire_form(window: &Window, document: &Document) -> Result<(), JsValue> {
    let form = match document
        .get_element_by_id("devisForm")
        .and_then(|form| form.dyn_into::<HtmlFormElement>().ok())
    {
        Some(form) => form,
        None => return Ok(()),
    };
    let steps = collect(form.query_selector_all(".form-step")?);
    let indicators = collect(document.query_selector_all(".step-indicator")?);
    let quote = Rc::new(QuoteForm {
        window: window.clone(),
        document: document.clone(),
        form: form.clone(),
        flow: RefCell::new(StepFlow::new(steps.len() as u32)),
        steps,
        indicators,
    });

    for button in collect(form.query_selector_all(".btn-next")?) {
        let target = match data_number(&button, "data-next") {
            Some(target) => target,
            None => continue,
        };
        let quote = quote.clone();
        let on_next = Closure::wrap(Box::new(move || {
            let valid = quote.validate_current();
            let moved = quote.flow.borrow_mut().advance(target, valid);
            if moved {
                quote.show_current();
            }
        }) as Box<dyn FnMut()>);
        listen(&button, "click", on_next)?;
    }

    for button in collect(form.query_selector_all(".btn-prev")?) {
        let target = match data_number(&button, "data-prev") {
            Some(target) => target,
            None => continue,
        };
        let quote = quote.clone();
        let on_prev = Closure::wrap(Box::new(move || {
            quote.flow.borrow_mut().back(target);
            quote.show_current();
        }) as Box<dyn FnMut()>);
        listen(&button, "click", on_prev)?;
    }

    for field in collect(form.query_selector_all("input, select, textarea")?) {
        let target = field.clone();
        let on_input = Closure::wrap(Box::new(move || {
            set_class(&target, ERROR_CLASS, false);
        }) as Box<dyn FnMut()>);
        listen(&field, "input", on_input)?;
    }

    let on_submit = {
        let quote = quote.clone();
        Closure::wrap(Box::new(move |event: Event| {
            event.prevent_default();
            if !quote.validate_current() {
                return;
            }
            let button = quote.submit_button();
            let label = button.as_ref().map(mark_sending).unwrap_or_default();
            let pairs = form_pairs(&quote.form);
            let quote = quote.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match submit_form(SUBMIT_ENDPOINT, &pairs).await {
                    Ok(()) => {
                        info!("quote request sent");
                        quote.finish();
                    }
                    Err(err) => {
                        warn!("quote request failed: {}", err);
                        if let Some(button) = &button {
                            restore_button(button, &label);
                        }
                        if let Err(alert) = quote.window.alert_with_message(err.user_message()) {
                            warn!("could not show alert: {:?}", alert);
                        }
                    }
                }
            });
        }) as Box<dyn FnMut(Event)>)
    };
    listen(&form, "submit", on_submit)?;
    debug!("quote form wired with {} steps", quote.flow.borrow().steps());
    Ok(())
}

fn wire_anchors(document: &Document) -> Result<(), JsValue> {
    let anchors = collect(document.query_selector_all("a[href^=\"#\"]")?);
    for anchor in &anchors {
        let link = anchor.clone();
        let document = document.clone();
        let on_click = Closure::wrap(Box::new(move |event: Event| {
            let href = match link.get_attribute("href") {
                Some(href) => href,
                None => return,
            };
            let target = match scroll_target(&href).map(|selector| document.query_selector(selector)) {
                Some(Ok(Some(target))) => target,
                _ => return,
            };
            event.prevent_default();
            let mut options = ScrollIntoViewOptions::new();
            options.behavior(ScrollBehavior::Smooth);
            options.block(ScrollLogicalPosition::Start);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        }) as Box<dyn FnMut(Event)>);
        listen(anchor, "click", on_click)?;
    }
    debug!("{} anchor links wired", anchors.len());
    Ok(())
}
