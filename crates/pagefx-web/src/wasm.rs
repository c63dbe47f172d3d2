#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the page controller.
//!
//! This module wraps [`super::runner_core::PageRunner`] with DOM wiring. Only
//! compiled on `wasm32` targets. Every element is looked up once during
//! construction; a missing element disables its feature without an error.
//! Listener closures are leaked and live for the page lifetime.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function, Reflect};
use pagefx_core::page::menu::{
    HAMBURGER_ACTIVE_CLASS, MENU_OPEN_CLASS, MenuEvent, MenuTransition,
};
use pagefx_core::page::reveal::{REVEAL_ROOT_MARGIN, REVEAL_SELECTOR, RevealStyle};
use pagefx_core::page::ripple::{
    RIPPLE_KEYFRAMES, RIPPLE_LIFETIME_MS, RIPPLE_STYLES, Rect, Ripple,
};
use pagefx_core::page::scroll::{BACK_TO_TOP_SHOW_CLASS, ScrollMetrics, anchor_target};
use pagefx_core::page::{BODY_FADE_DELAY_MS, BODY_FADE_TRANSITION};
use pagefx_core::{DisplayTarget, IntersectionSample};
use wasm_bindgen::JsCast;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlInputElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, MouseEvent, Node,
    ScrollBehavior, ScrollToOptions, Window,
};

use super::runner_core::{LOADED_BANNER, PageRunner, duration_from_ms, host_config};

type SharedRunner = Rc<RefCell<PageRunner<ElementText>>>;

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

/// Stat element whose text content is read once and rewritten per frame.
#[derive(Debug)]
struct ElementText(Element);

impl DisplayTarget for ElementText {
    fn text(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn set_text(&mut self, text: &str) {
        self.0.set_text_content(Some(text));
    }
}

// ---------------------------------------------------------------------------
// DOM helpers
// ---------------------------------------------------------------------------

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

fn now_ms(window: &Window) -> f64 {
    window.performance().map_or(0.0, |p| p.now())
}

/// Elements matching `selector`, in document order. Invalid selectors yield
/// an empty list.
fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|idx| list.item(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn query_one(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(el) = element.dyn_ref::<HtmlElement>() {
        let _ = el.style().set_property(property, value);
    }
}

fn apply_reveal_style(element: &Element, style: RevealStyle) {
    set_style(element, "opacity", style.opacity);
    set_style(element, "transform", style.transform);
    if let Some(transition) = style.transition {
        set_style(element, "transition", transition);
    }
}

fn listen<E>(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn set_timeout(window: &Window, delay_ms: i32, f: impl FnOnce() + 'static) -> Result<(), JsValue> {
    let closure = Closure::once(f);
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        delay_ms,
    )?;
    closure.forget();
    Ok(())
}

fn smooth_scroll_to(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

fn new_observer(
    callback: impl FnMut(Array, IntersectionObserver) + 'static,
    threshold: f64,
    root_margin: Option<&str>,
) -> Result<IntersectionObserver, JsValue> {
    let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut(Array, IntersectionObserver)>);
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        init.set_root_margin(margin);
    }
    let observer = IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init)?;
    closure.forget();
    Ok(observer)
}

// ---------------------------------------------------------------------------
// Stats counter
// ---------------------------------------------------------------------------

/// Drive the counter from `requestAnimationFrame` until it reports done.
fn start_counter_loop(window: &Window, runner: SharedRunner) -> Result<(), JsValue> {
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let win = window.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        let again = runner
            .borrow_mut()
            .animation_frame(duration_from_ms(timestamp));
        if !again {
            return;
        }
        if let Some(callback) = f.borrow().as_ref()
            && let Err(err) = win.request_animation_frame(callback.as_ref().unchecked_ref())
        {
            console_error(&format!("requestAnimationFrame failed: {err:?}"));
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(callback) = g.borrow().as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }
    Ok(())
}

fn wire_stats(window: &Window, document: &Document, runner: &SharedRunner) -> Result<(), JsValue> {
    let Some(section) = query_one(document, &runner.borrow().config().stats_section) else {
        return Ok(());
    };
    let threshold = runner.borrow().config().stats_threshold;

    let runner = runner.clone();
    let win = window.clone();
    let observer = new_observer(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let sample = IntersectionSample {
                    is_intersecting: entry.is_intersecting(),
                    ratio: entry.intersection_ratio(),
                };
                let now = duration_from_ms(now_ms(&win));
                let (start_loop, armed) = {
                    let mut r = runner.borrow_mut();
                    let start = r.on_stats_visibility(sample, now);
                    (start, r.wants_stats_visibility())
                };
                if !armed {
                    observer.unobserve(&entry.target());
                }
                if start_loop && let Err(err) = start_counter_loop(&win, runner.clone()) {
                    console_error(&format!("counter loop failed to start: {err:?}"));
                }
            }
        },
        threshold,
        None,
    )?;
    observer.observe(&section);
    Ok(())
}

// ---------------------------------------------------------------------------
// Chrome
// ---------------------------------------------------------------------------

fn apply_menu(hamburger: &Element, menu: &Element, transition: MenuTransition) {
    if !transition.changed {
        return;
    }
    let _ = hamburger
        .class_list()
        .toggle_with_force(HAMBURGER_ACTIVE_CLASS, transition.open);
    let _ = menu
        .class_list()
        .toggle_with_force(MENU_OPEN_CLASS, transition.open);
}

fn wire_menu(document: &Document, runner: &SharedRunner) -> Result<(), JsValue> {
    let (Some(hamburger), Some(menu)) = (
        document.get_element_by_id("hamburger"),
        document.get_element_by_id("mobileMenu"),
    ) else {
        return Ok(());
    };

    let dispatch = {
        let runner = runner.clone();
        let hamburger = hamburger.clone();
        let menu = menu.clone();
        move |event: MenuEvent| {
            let transition = runner.borrow_mut().on_menu_event(&event);
            apply_menu(&hamburger, &menu, transition);
        }
    };

    {
        let dispatch = dispatch.clone();
        listen(&hamburger, "click", move |_: Event| dispatch(MenuEvent::ToggleClick))?;
    }
    for item in query_all(document, ".menu-item") {
        let dispatch = dispatch.clone();
        listen(&item, "click", move |_: Event| dispatch(MenuEvent::ItemClick))?;
    }
    {
        let dispatch = dispatch.clone();
        let hamburger = hamburger.clone();
        let menu = menu.clone();
        listen(document, "click", move |event: Event| {
            let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
            let inside = hamburger.contains(target.as_ref()) || menu.contains(target.as_ref());
            if !inside {
                dispatch(MenuEvent::OutsideClick);
            }
        })?;
    }
    listen(document, "keydown", move |event: KeyboardEvent| {
        dispatch(MenuEvent::Key(event.key()));
    })?;
    Ok(())
}

fn wire_anchors(window: &Window, document: &Document, runner: &SharedRunner) -> Result<(), JsValue> {
    for anchor in query_all(document, r##"a[href^="#"]"##) {
        let runner = runner.clone();
        let win = window.clone();
        let doc = document.clone();
        let link = anchor.clone();
        listen(&anchor, "click", move |event: Event| {
            event.prevent_default();
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            let Some(target) = anchor_target(&href).and_then(|sel| query_one(&doc, sel)) else {
                return;
            };
            let element_top = target.get_bounding_client_rect().top();
            let page_offset = win.page_y_offset().unwrap_or(0.0);
            let top = runner.borrow().anchor_scroll_top(element_top, page_offset);
            smooth_scroll_to(&win, top);
        })?;
    }
    Ok(())
}

fn wire_scroll(window: &Window, document: &Document, runner: &SharedRunner) -> Result<(), JsValue> {
    let header = query_one(document, ".header");
    let back_to_top = query_one(document, ".back-to-top");

    if let Some(button) = back_to_top.clone() {
        let win = window.clone();
        listen(&button, "click", move |event: Event| {
            event.prevent_default();
            smooth_scroll_to(&win, 0.0);
        })?;
    }

    let runner = runner.clone();
    let win = window.clone();
    let doc = document.clone();
    listen(window, "scroll", move |_: Event| {
        let metrics = ScrollMetrics {
            scroll_y: win.scroll_y().unwrap_or(0.0),
            scroll_height: doc
                .document_element()
                .map_or(0.0, |el| f64::from(el.scroll_height())),
            inner_height: win
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0),
        };
        let effects = runner.borrow_mut().on_scroll(metrics);
        if let (Some(shadow), Some(header)) = (effects.header_shadow, header.as_ref()) {
            set_style(header, "box-shadow", shadow);
        }
        if let (Some(show), Some(button)) = (effects.back_to_top, back_to_top.as_ref()) {
            let _ = button
                .class_list()
                .toggle_with_force(BACK_TO_TOP_SHOW_CLASS, show);
        }
    })?;
    Ok(())
}

fn wire_email(document: &Document, runner: &SharedRunner) -> Result<(), JsValue> {
    let Some(input) = document
        .get_element_by_id("emailInput")
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    else {
        return Ok(());
    };

    {
        let runner = runner.clone();
        let field = input.clone();
        listen(&input, "blur", move |_: Event| {
            let tone = runner.borrow_mut().email_blur(&field.value());
            let _ = field.style().set_property("border-color", tone.border_color());
        })?;
    }
    let runner = runner.clone();
    let field = input.clone();
    listen(&input, "focus", move |_: Event| {
        let tone = runner.borrow_mut().email_focus();
        let _ = field.style().set_property("border-color", tone.border_color());
    })
}

fn wire_ripples(window: &Window, document: &Document) -> Result<(), JsValue> {
    if let Some(head) = document.head() {
        let style = document.create_element("style")?;
        style.set_text_content(Some(RIPPLE_KEYFRAMES));
        head.append_child(&style)?;
    }

    for button in query_all(document, ".btn") {
        let win = window.clone();
        let doc = document.clone();
        let host = button.clone();
        listen(&button, "click", move |event: MouseEvent| {
            let bounds = host.get_bounding_client_rect();
            let rect = Rect {
                left: bounds.left(),
                top: bounds.top(),
                width: bounds.width(),
                height: bounds.height(),
            };
            let ripple = Ripple::from_click(
                rect,
                f64::from(event.client_x()),
                f64::from(event.client_y()),
            );
            let Ok(span) = doc.create_element("span") else {
                return;
            };
            for (property, value) in ripple.placement_styles() {
                set_style(&span, property, &value);
            }
            for (property, value) in RIPPLE_STYLES {
                set_style(&span, property, value);
            }
            set_style(&host, "position", "relative");
            set_style(&host, "overflow", "hidden");
            if host.append_child(&span).is_err() {
                return;
            }
            let _ = set_timeout(&win, RIPPLE_LIFETIME_MS, move || span.remove());
        })?;
    }
    Ok(())
}

fn wire_reveal(document: &Document, runner: &SharedRunner) -> Result<(), JsValue> {
    let cards = query_all(document, REVEAL_SELECTOR);
    if cards.is_empty() {
        return Ok(());
    }
    let hidden = runner.borrow_mut().register_cards(cards.len());
    let threshold = runner.borrow().config().reveal_threshold;

    let runner = runner.clone();
    let lookup = cards.clone();
    let observer = new_observer(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some(index) = lookup.iter().position(|card| *card == target) else {
                    continue;
                };
                let style = runner
                    .borrow_mut()
                    .on_card_intersection(index, entry.is_intersecting());
                if let Some(style) = style {
                    apply_reveal_style(&target, style);
                    observer.unobserve(&target);
                }
            }
        },
        threshold,
        Some(REVEAL_ROOT_MARGIN),
    )?;

    for card in &cards {
        apply_reveal_style(card, hidden);
        observer.observe(card);
    }
    Ok(())
}

fn wire_forms(document: &Document, runner: &SharedRunner) -> Result<(), JsValue> {
    for form in query_all(document, "form") {
        let runner = runner.clone();
        listen(&form, "submit", move |event: Event| {
            event.prevent_default();
            runner.borrow_mut().on_form_submit();
            web_sys::console::log_1(&"Form submitted (demo mode)".into());
        })?;
    }
    Ok(())
}

fn wire_body_fade(window: &Window, document: &Document) -> Result<(), JsValue> {
    let win = window.clone();
    let doc = document.clone();
    listen(window, "load", move |_: Event| {
        let Some(body) = doc.body() else {
            return;
        };
        let _ = body.style().set_property("opacity", "0");
        let _ = body.style().set_property("transition", BODY_FADE_TRANSITION);
        let _ = set_timeout(&win, BODY_FADE_DELAY_MS, move || {
            let _ = body.style().set_property("opacity", "1");
        });
    })
}

// ---------------------------------------------------------------------------
// Exported controller
// ---------------------------------------------------------------------------

/// Landing page controller.
///
/// Construct once after the DOM is ready. Listeners and observers are
/// installed immediately; the counter runs from the browser's own
/// `requestAnimationFrame` loop.
#[wasm_bindgen]
pub struct PageController {
    runner: SharedRunner,
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

#[wasm_bindgen]
impl PageController {
    /// Create the controller. `options` is an optional JSON config object;
    /// an unusable one is logged and replaced by the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<String>) -> Result<PageController, JsValue> {
        install_panic_hook();

        let config = host_config(options.as_deref());

        let window = window()?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let has_section = query_one(&document, &config.stats_section).is_some();
        let targets = query_all(&document, &config.stat_value)
            .into_iter()
            .map(ElementText)
            .collect();
        let language = window.navigator().language();
        let runner = Rc::new(RefCell::new(PageRunner::new(
            config,
            targets,
            has_section,
            language.as_deref(),
        )));

        wire_menu(&document, &runner)?;
        wire_anchors(&window, &document, &runner)?;
        wire_reveal(&document, &runner)?;
        wire_email(&document, &runner)?;
        wire_scroll(&window, &document, &runner)?;
        wire_ripples(&window, &document)?;
        wire_forms(&document, &runner)?;
        wire_body_fade(&window, &document)?;
        wire_stats(&window, &document, &runner)?;

        web_sys::console::log_1(&LOADED_BANNER.into());
        runner.borrow_mut().log(LOADED_BANNER.to_owned());

        Ok(Self { runner })
    }

    /// Whether the stats counter is animating.
    #[wasm_bindgen(js_name = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.runner.borrow().is_animating()
    }

    /// Stop the stats counter where it is.
    #[wasm_bindgen(js_name = cancelCounter)]
    pub fn cancel_counter(&self) {
        self.runner.borrow_mut().cancel_counter();
    }

    /// Whether the mobile menu is open.
    #[wasm_bindgen(js_name = menuOpen)]
    pub fn menu_open(&self) -> bool {
        self.runner.borrow().menu_open()
    }

    /// Drain accumulated log lines. Returns `Array<string>`.
    #[wasm_bindgen(js_name = takeLogs)]
    pub fn take_logs(&self) -> Array {
        let logs = self.runner.borrow_mut().take_logs();
        let arr = Array::new();
        for log in logs {
            arr.push(&JsValue::from_str(&log));
        }
        arr
    }
}
