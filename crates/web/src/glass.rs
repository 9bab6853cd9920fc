//! Glass surface: SVG filter wiring, displacement-map refresh, capability probe.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use shared::capability::CapabilityProbe;
use shared::effect::FilterChannel;
use shared::{GlassEffect, GlassStyle, PanelBox, RefreshDebounce};
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, ResizeObserver, Window};

use crate::handles::FilterHandles;

pub struct GlassSurface {
    container: HtmlElement,
    filter: FilterHandles,
    effect: GlassEffect,
    debounce: RefCell<RefreshDebounce>,
    observer: RefCell<Option<ResizeObserver>>,
}

impl GlassSurface {
    pub fn new(container: HtmlElement, filter: FilterHandles, effect: GlassEffect) -> Self {
        Self {
            container,
            filter,
            effect,
            debounce: RefCell::new(RefreshDebounce::default()),
            observer: RefCell::new(None),
        }
    }

    /// Current rendered size of the panel
    pub fn measure(&self) -> PanelBox {
        let rect = self.container.get_bounding_client_rect();
        PanelBox::new(rect.width(), rect.height())
    }

    /// Push channel scales, selectors and blur into the filter graph.
    pub fn apply_filter_settings(&self) {
        let FilterHandles {
            red: Some(red),
            green: Some(green),
            blue: Some(blue),
            blur: Some(blur),
            ..
        } = &self.filter
        else {
            tracing::debug!("filter graph incomplete, keeping its markup defaults");
            return;
        };

        let settings = self.effect.filter_settings();
        for displacement in &settings.channels {
            let element = match displacement.channel {
                FilterChannel::Red => red,
                FilterChannel::Green => green,
                FilterChannel::Blue => blue,
            };
            let _ = element.set_attribute("scale", &displacement.scale.to_string());
            let _ = element.set_attribute(
                "xChannelSelector",
                displacement.x_channel_selector.as_attr(),
            );
            let _ = element.set_attribute(
                "yChannelSelector",
                displacement.y_channel_selector.as_attr(),
            );
        }
        let _ = blur.set_attribute("stdDeviation", &settings.blur_std_deviation.to_string());
    }

    /// Regenerate the displacement map for the current panel size.
    pub fn update_displacement_map(&self) {
        let Some(image) = &self.filter.image else {
            return;
        };
        let panel = self.measure();
        let uri = self.effect.generate_displacement_map(panel);
        if let Err(err) = image.set_attribute("href", &uri) {
            tracing::warn!(?err, "failed to update displacement map");
            return;
        }
        tracing::trace!(width = panel.width, height = panel.height, "displacement map refreshed");
    }

    pub fn apply_style(&self, style: GlassStyle) {
        let _ = self.container.class_list().add_1(style.class_name());
    }

    /// Refresh the displacement map whenever the panel is resized.
    ///
    /// Notifications are deferred to the next tick and a burst of them
    /// results in a single refresh.
    pub fn observe_resizes(self: &Rc<Self>) -> Result<(), JsValue> {
        let weak = Rc::downgrade(self);
        let on_resize = Closure::<dyn FnMut(js_sys::Array, ResizeObserver)>::new(
            move |_entries: js_sys::Array, _observer: ResizeObserver| {
                let Some(glass) = weak.upgrade() else {
                    return;
                };
                if !glass.debounce.borrow_mut().request() {
                    return;
                }
                Timeout::new(0, move || {
                    if glass.debounce.borrow_mut().take() {
                        glass.update_displacement_map();
                    }
                })
                .forget();
            },
        );

        let observer = ResizeObserver::new(on_resize.as_ref().unchecked_ref())?;
        observer.observe(&self.container);
        on_resize.forget();
        *self.observer.borrow_mut() = Some(observer);
        Ok(())
    }
}

/// Capability probe backed by the live browser
pub struct BrowserProbe<'a> {
    pub window: &'a Window,
    pub document: &'a Document,
}

impl CapabilityProbe for BrowserProbe<'_> {
    fn user_agent(&self) -> Option<String> {
        self.window.navigator().user_agent().ok()
    }

    fn backdrop_filter_round_trips(&self, value: &str) -> bool {
        let Some(scratch) = self
            .document
            .create_element("div")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return false;
        };
        let style = scratch.style();
        if style.set_property("backdrop-filter", value).is_err() {
            return false;
        }
        style
            .get_property_value("backdrop-filter")
            .map(|read_back| !read_back.is_empty())
            .unwrap_or(false)
    }
}
