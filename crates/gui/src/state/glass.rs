//! Glass effect state for the native window.

use shared::{
    detect_glass_style, CapabilityProbe, GlassEffect, GlassStyle, PanelBox, RefreshDebounce,
};

/// The native painter has no style engine and no SVG filters, so the probe
/// always reports the capability as absent.
pub struct NativeProbe;

impl CapabilityProbe for NativeProbe {
    fn user_agent(&self) -> Option<String> {
        None
    }

    fn backdrop_filter_round_trips(&self, _value: &str) -> bool {
        false
    }
}

/// A generated displacement map and the box it was generated for
#[derive(Debug, Clone, PartialEq)]
pub struct DisplacementRecord {
    pub panel: PanelBox,
    pub uri: String,
}

pub struct GlassState {
    effect: GlassEffect,
    style: GlassStyle,
    panel: PanelBox,
    debounce: RefreshDebounce,
    last_map: Option<DisplacementRecord>,
    refresh_count: usize,
}

impl GlassState {
    pub fn new(effect: GlassEffect, probe: &impl CapabilityProbe) -> Self {
        Self {
            effect,
            style: detect_glass_style(probe),
            panel: PanelBox::default(),
            debounce: RefreshDebounce::default(),
            last_map: None,
            refresh_count: 0,
        }
    }

    pub fn effect(&self) -> &GlassEffect {
        &self.effect
    }

    pub fn style(&self) -> GlassStyle {
        self.style
    }

    /// Last measured panel box
    pub fn panel(&self) -> PanelBox {
        self.panel
    }

    pub fn last_map(&self) -> Option<&DisplacementRecord> {
        self.last_map.as_ref()
    }

    /// Number of displacement maps generated so far
    pub fn refresh_count(&self) -> usize {
        self.refresh_count
    }

    /// Record the panel's rendered size. A change schedules a refresh for the
    /// next tick; several changes before that tick share one refresh.
    pub fn observe_size(&mut self, panel: PanelBox) {
        if panel == self.panel {
            return;
        }
        self.panel = panel;
        self.debounce.request();
    }

    /// A resize refresh waits for the next tick
    pub fn resize_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Run the deferred resize refresh, if one is pending
    pub fn flush_resize(&mut self) {
        if self.debounce.take() {
            self.refresh();
        }
    }

    /// Regenerate the displacement map for the current panel box. Any
    /// pending resize refresh is satisfied by this one.
    pub fn refresh(&mut self) {
        self.debounce.take();
        let uri = self.effect.generate_displacement_map(self.panel);
        self.last_map = Some(DisplacementRecord {
            panel: self.panel,
            uri,
        });
        self.refresh_count += 1;
        tracing::trace!(
            width = self.panel.width,
            height = self.panel.height,
            "displacement map refreshed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_surface_falls_back() {
        let glass = GlassState::new(GlassEffect::default(), &NativeProbe);
        assert_eq!(glass.style(), GlassStyle::Fallback);
    }

    #[test]
    fn test_resize_burst_refreshes_once() {
        let mut glass = GlassState::new(GlassEffect::default(), &NativeProbe);
        glass.observe_size(PanelBox::new(300.0, 200.0));
        glass.observe_size(PanelBox::new(310.0, 200.0));
        glass.observe_size(PanelBox::new(320.0, 210.0));
        assert_eq!(glass.refresh_count(), 0);

        glass.flush_resize();
        glass.flush_resize();
        assert_eq!(glass.refresh_count(), 1);
        assert_eq!(glass.last_map().unwrap().panel, PanelBox::new(320.0, 210.0));
    }

    #[test]
    fn test_unchanged_size_does_not_refresh() {
        let mut glass = GlassState::new(GlassEffect::default(), &NativeProbe);
        glass.observe_size(PanelBox::new(300.0, 200.0));
        glass.flush_resize();
        glass.observe_size(PanelBox::new(300.0, 200.0));
        glass.flush_resize();
        assert_eq!(glass.refresh_count(), 1);
    }

    #[test]
    fn test_explicit_refresh_satisfies_pending_resize() {
        let mut glass = GlassState::new(GlassEffect::default(), &NativeProbe);
        glass.observe_size(PanelBox::new(300.0, 200.0));
        glass.refresh();
        glass.flush_resize();
        assert_eq!(glass.refresh_count(), 1);
    }

    #[test]
    fn test_refresh_matches_pure_generator() {
        let mut glass = GlassState::new(GlassEffect::default(), &NativeProbe);
        glass.observe_size(PanelBox::new(300.0, 200.0));
        glass.refresh();
        let expected = GlassEffect::default().generate_displacement_map(PanelBox::new(300.0, 200.0));
        assert_eq!(glass.last_map().unwrap().uri, expected);
    }
}
