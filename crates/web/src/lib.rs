//! Browser entry point: resolves the page, then wires the chat popup, the
//! float map, the location search and the glass effect.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use shared::{
    detect_glass_style, ocean_floats, EffectSettings, GlassEffect, MapViewConfig, PanelBox,
    SetupError,
};
use wasm_bindgen::prelude::*;

mod chat;
mod glass;
mod handles;
mod leaflet;
mod search;

use chat::ChatWidget;
use glass::{BrowserProbe, GlassSurface};
use handles::PageHandles;
use leaflet::LeafletMap;
use search::SearchWidget;

thread_local! {
    /// Widgets stay alive for the lifetime of the page
    static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
}

struct Mounted {
    _chat: Rc<RefCell<ChatWidget>>,
    _search: Rc<RefCell<SearchWidget>>,
}

/// Initialize WASM module with panic hook and logging, then mount the widgets
/// once the document is parsed.
#[wasm_bindgen(start)]
pub fn init() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| setup_error(SetupError::NoGlobal("document")))?;

    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| {
            if let Err(err) = mount() {
                tracing::error!(?err, "FloatChat failed to start");
            }
        })
        .forget();
        Ok(())
    } else {
        mount()
    }
}

/// Displacement map for a panel of the given size, as a `data:` URI.
///
/// Uses the default effect settings; handy for inspecting the generated image.
#[wasm_bindgen]
pub fn displacement_map(width: f64, height: f64) -> String {
    GlassEffect::default().generate_displacement_map(PanelBox::new(width, height))
}

fn mount() -> Result<(), JsValue> {
    // Everything is resolved before the first listener is attached
    let page = PageHandles::resolve().map_err(setup_error)?;
    leaflet::ensure_loaded().map_err(setup_error)?;

    let glass = Rc::new(GlassSurface::new(
        page.glass_container.clone(),
        page.filter,
        GlassEffect::new(EffectSettings::default()),
    ));
    glass.apply_filter_settings();
    let style = detect_glass_style(&BrowserProbe {
        window: &page.window,
        document: &page.document,
    });
    glass.apply_style(style);
    glass.observe_resizes()?;

    let map = LeafletMap::create(&page.map_container.id(), &MapViewConfig::default())?;
    map.plot_points(ocean_floats())?;
    let map = Rc::new(RefCell::new(map));

    let chat = ChatWidget::new(
        page.document.clone(),
        page.chat,
        page.glass_container,
        Rc::clone(&glass),
    )
    .install();
    let search = SearchWidget::new(page.document, page.search, map, ocean_floats()).install();
    MOUNTED.with(|mounted| {
        *mounted.borrow_mut() = Some(Mounted {
            _chat: chat,
            _search: search,
        });
    });

    tracing::info!("FloatChat widgets mounted");
    Ok(())
}

fn setup_error(err: SetupError) -> JsValue {
    tracing::error!("{err}");
    JsError::new(&err.to_string()).into()
}
