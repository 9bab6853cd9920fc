//! Search box with substring suggestions over the points of interest.

use crate::map::{MapBackend, FOCUS_ZOOM};
use crate::poi::{self, PointOfInterest};

/// Autocomplete state. `M` is the marker handle type of the map backend the
/// selections are applied to.
///
/// At most one search marker exists at any time: selecting a point removes
/// the previous marker before adding the new one.
pub struct Autocomplete<M> {
    points: &'static [PointOfInterest],
    input: String,
    suggestions: Vec<&'static PointOfInterest>,
    visible: bool,
    active_marker: Option<M>,
}

impl<M> Autocomplete<M> {
    pub fn new(points: &'static [PointOfInterest]) -> Self {
        Self {
            points,
            input: String::new(),
            suggestions: Vec::new(),
            visible: false,
            active_marker: None,
        }
    }

    /// Text currently displayed in the search input
    pub fn input_text(&self) -> &str {
        &self.input
    }

    pub fn suggestions(&self) -> &[&'static PointOfInterest] {
        &self.suggestions
    }

    /// Whether the suggestion list is shown
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn active_marker(&self) -> Option<&M> {
        self.active_marker.as_ref()
    }

    /// The input text changed to `text`; recompute the suggestions.
    pub fn input_changed(&mut self, text: &str) {
        self.input = text.to_string();
        self.suggestions = poi::matching(self.points, text);
        self.visible = !self.suggestions.is_empty();
    }

    /// Select the suggestion at `index`. Out-of-range indices are ignored.
    pub fn select<B>(&mut self, index: usize, map: &mut B) -> Option<&'static PointOfInterest>
    where
        B: MapBackend<Marker = M>,
    {
        let point = *self.suggestions.get(index)?;
        self.select_point(point, map);
        Some(point)
    }

    /// Focus the map on `point` and make it the single search marker.
    pub fn select_point<B>(&mut self, point: &'static PointOfInterest, map: &mut B)
    where
        B: MapBackend<Marker = M>,
    {
        map.fly_to(point.coords, FOCUS_ZOOM);
        if let Some(previous) = self.active_marker.take() {
            map.remove_search_marker(previous);
        }
        self.active_marker = Some(map.add_search_marker(point));
        self.visible = false;
        self.input = point.name.to_string();
        tracing::debug!(point = point.name, "search suggestion selected");
    }

    /// A click landed somewhere on the page. Clicks outside both the input and
    /// the suggestion list dismiss the list.
    pub fn document_clicked(&mut self, inside_input: bool, inside_list: bool) {
        if !inside_input && !inside_list {
            self.visible = false;
        }
    }
}
