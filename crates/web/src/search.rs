//! Location search box with a clickable suggestion list.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use shared::{Autocomplete, PointOfInterest};
use wasm_bindgen::JsCast;
use web_sys::{Document, Node};

use crate::handles::SearchHandles;
use crate::leaflet::{LeafletMap, SearchMarker};

pub struct SearchWidget {
    document: Document,
    handles: SearchHandles,
    map: Rc<RefCell<LeafletMap>>,
    autocomplete: Autocomplete<SearchMarker>,
    /// Click handlers of the rendered suggestions, dropped on re-render
    item_listeners: Vec<EventListener>,
}

impl SearchWidget {
    pub fn new(
        document: Document,
        handles: SearchHandles,
        map: Rc<RefCell<LeafletMap>>,
        points: &'static [PointOfInterest],
    ) -> Self {
        Self {
            document,
            handles,
            map,
            autocomplete: Autocomplete::new(points),
            item_listeners: Vec::new(),
        }
    }

    pub fn install(self) -> Rc<RefCell<Self>> {
        let search = Rc::new(RefCell::new(self));
        let widget = search.borrow();

        let weak = Rc::downgrade(&search);
        EventListener::new(&widget.handles.input, "input", move |_| {
            if let Some(search) = weak.upgrade() {
                {
                    let mut widget = search.borrow_mut();
                    let query = widget.handles.input.value();
                    widget.autocomplete.input_changed(&query);
                }
                Self::render(&search);
            }
        })
        .forget();

        // Dismiss the list on any click outside the input and the list
        let weak = Rc::downgrade(&search);
        EventListener::new(&widget.document, "click", move |event| {
            let Some(search) = weak.upgrade() else {
                return;
            };
            let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
            let mut widget = search.borrow_mut();
            let inside_input = widget.handles.input.contains(target.as_ref());
            let inside_list = widget.handles.suggestions.contains(target.as_ref());
            widget.autocomplete.document_clicked(inside_input, inside_list);
            widget.sync_visibility();
        })
        .forget();

        drop(widget);
        search
    }

    /// Rebuild the list entries from the current suggestions.
    fn render(search: &Rc<RefCell<Self>>) {
        let mut listeners = Vec::new();
        {
            let widget = search.borrow();
            let list = &widget.handles.suggestions;
            list.set_inner_html("");

            for (index, point) in widget.autocomplete.suggestions().iter().enumerate() {
                let item = match widget.document.create_element("li") {
                    Ok(item) => item,
                    Err(err) => {
                        tracing::warn!(?err, "failed to create suggestion entry");
                        continue;
                    }
                };
                item.set_text_content(Some(point.name));

                let weak = Rc::downgrade(search);
                listeners.push(EventListener::new(&item, "click", move |_| {
                    if let Some(search) = weak.upgrade() {
                        search.borrow_mut().select(index);
                    }
                }));
                let _ = list.append_child(&item);
            }
        }

        let mut widget = search.borrow_mut();
        widget.item_listeners = listeners;
        widget.sync_visibility();
    }

    fn select(&mut self, index: usize) {
        let mut map = self.map.borrow_mut();
        if let Some(point) = self.autocomplete.select(index, &mut *map) {
            self.handles.input.set_value(point.name);
        }
        drop(map);
        self.sync_visibility();
    }

    fn sync_visibility(&self) {
        let display = if self.autocomplete.is_visible() {
            "block"
        } else {
            "none"
        };
        let _ = self
            .handles
            .suggestions
            .style()
            .set_property("display", display);
    }
}
