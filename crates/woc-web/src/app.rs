//! Browser entry point: controller construction, listeners and the global
//! `changeLang` export.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use gloo::events::EventListener;
use gloo::utils::{document, window};
use tracing::{error, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Node};
use woc_i18n::{LocaleLoader, LocaleTag, Page, SwitchController};
use woc_telemetry::{LoggingConfig, init_logging};

use crate::dom::DomPage;
use crate::fetch::HttpFetcher;
use crate::hooks::SITE_HOOKS;
use crate::overrides::site_config_from;

type SiteController = SwitchController<HttpFetcher, DomPage>;

thread_local! {
    static CONTROLLER: RefCell<Option<Rc<SiteController>>> = const { RefCell::new(None) };
}

/// Module entry point invoked by the wasm loader.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = init_logging(&LoggingConfig::default()) {
        gloo::console::warn!(err.to_string());
    }
    run();
}

/// Build the controller, expose it to `changeLang` and start activation.
pub fn run() {
    let document = document();
    let raw_config = document
        .get_element_by_id(SITE_HOOKS.config_script)
        .and_then(|script| script.text_content());
    let config = site_config_from(raw_config.as_deref());

    let hostname = window().location().hostname().unwrap_or_default();
    let locator = config.locator_for_host(&hostname);
    let loader = LocaleLoader::new(HttpFetcher, locator, config.default_locale.clone());
    let page = DomPage::new(document.clone(), SITE_HOOKS);
    let controller = Rc::new(SwitchController::new(loader, page, config));

    CONTROLLER.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&controller)));

    spawn_local(async move {
        let ready = {
            let controller = Rc::clone(&controller);
            async move {
                dom_ready(&document).await;
                install_listeners(&controller);
                // selectors parsed after attach have no styling yet
                controller.restyle_selectors();
            }
        };
        if let Err(err) = controller.run(ready).await {
            error!(error = %err, "language controller failed to activate");
        }
    });
}

/// Switch the page language; callable from any script as `changeLang(tag)`.
#[wasm_bindgen(js_name = changeLang)]
pub fn change_lang(tag: String) {
    let controller = CONTROLLER.with(|slot| slot.borrow().clone());
    let Some(controller) = controller else {
        warn!(locale = %tag, "changeLang called before the controller started");
        return;
    };
    spawn_local(async move {
        // failures are logged by the controller and leave the page untouched
        let _ = controller.request_switch(LocaleTag::from(tag)).await;
    });
}

async fn dom_ready(document: &Document) {
    if document.ready_state() != "loading" {
        return;
    }
    let (sender, receiver) = oneshot::channel::<()>();
    let _listener = EventListener::once(document, "DOMContentLoaded", move |_| {
        let _ = sender.send(());
    });
    let _ = receiver.await;
}

fn install_listeners(controller: &Rc<SiteController>) {
    let page = controller.page();
    let fab = page.fab_button();
    let menu = page.menu();

    if let Some(button) = &fab {
        let controller = Rc::clone(controller);
        EventListener::new(button, "click", move |_| {
            controller.toggle_menu();
        })
        .forget();
    } else {
        warn!(selector = page.hooks().fab_button, "language button not found");
    }

    {
        let controller = Rc::clone(controller);
        EventListener::new(&document(), "click", move |event| {
            let target = event
                .target()
                .and_then(|target| target.dyn_into::<Node>().ok());
            let inside = target.as_ref().is_some_and(|node| {
                contains(fab.as_ref(), node) || contains(menu.as_ref(), node)
            });
            controller.dismiss_menu(inside);
        })
        .forget();
    }

    for selector in page.selectors() {
        let controller = Rc::clone(controller);
        let element = selector.clone();
        EventListener::new(&selector, "click", move |event| {
            event.prevent_default();
            on_selector_click(&controller, &element);
        })
        .forget();
    }
}

fn on_selector_click(controller: &Rc<SiteController>, element: &Element) {
    let hooks = *controller.page().hooks();
    let Some(tag) = element.get_attribute(hooks.lang_attribute) else {
        warn!("language selector without a locale tag");
        return;
    };
    let locale = LocaleTag::from(tag);

    if !controller.config().locales.contains(&locale) {
        let flag = element.get_attribute(hooks.flag_attribute).unwrap_or_default();
        let label = element
            .query_selector(hooks.button_label)
            .ok()
            .flatten()
            .and_then(|label| label.text_content())
            .unwrap_or_else(|| locale.to_string());
        controller
            .page()
            .set_language_summary(format!("{flag} {label}").trim());
    }

    let controller = Rc::clone(controller);
    spawn_local(async move {
        let _ = controller.select_from_menu(locale).await;
    });
}

fn contains(container: Option<&Element>, node: &Node) -> bool {
    container.is_some_and(|element| element.contains(Some(node)))
}
