//! Glass distortion effect: displacement-map generation and filter settings.
//!
//! The panel backdrop is pushed through an SVG filter graph: one
//! `feDisplacementMap` per colour channel reads offsets from an `feImage`
//! whose content is generated here. The generated image is a vector document
//! sized to the panel box:
//!
//! - a black background,
//! - a red ramp along x and a blue ramp along y, combined with a blend mode,
//! - a blurred flat-grey rounded rect inset from the edges.
//!
//! The flat centre leaves the backdrop untouched while the ramps near the
//! edges bend it, which reads as a glass rim.

use serde::{Deserialize, Serialize};

/// CSS `mix-blend-mode` used to combine the two gradient ramps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    Normal,
    Multiply,
    #[default]
    Screen,
    Overlay,
    Darken,
    Lighten,
    Difference,
    Exclusion,
}

impl BlendMode {
    pub fn as_css(self) -> &'static str {
        match self {
            BlendMode::Normal => "normal",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
            BlendMode::Overlay => "overlay",
            BlendMode::Darken => "darken",
            BlendMode::Lighten => "lighten",
            BlendMode::Difference => "difference",
            BlendMode::Exclusion => "exclusion",
        }
    }
}

/// Channel selector value of `feDisplacementMap`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorChannel {
    R,
    G,
    B,
    A,
}

impl ColorChannel {
    pub fn as_attr(self) -> &'static str {
        match self {
            ColorChannel::R => "R",
            ColorChannel::G => "G",
            ColorChannel::B => "B",
            ColorChannel::A => "A",
        }
    }
}

/// Effect configuration. Read-only once the effect is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSettings {
    /// Corner radius of the generated rects, in pixels
    pub border_radius: f64,
    /// Rim thickness as a fraction of the shorter panel side
    pub border_width: f64,
    /// Lightness of the flat centre, in percent
    pub brightness: f64,
    /// Alpha of the flat centre
    pub opacity: f64,
    /// Blur applied to the flat centre, in pixels
    pub blur: f64,
    /// Standard deviation of the output blur
    pub displace: f64,
    /// Base displacement scale shared by all channels
    pub distortion_scale: f64,
    pub red_offset: f64,
    pub green_offset: f64,
    pub blue_offset: f64,
    pub mix_blend_mode: BlendMode,
    pub x_channel: ColorChannel,
    pub y_channel: ColorChannel,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            border_radius: 20.0,
            border_width: 0.07,
            brightness: 50.0,
            opacity: 0.93,
            blur: 11.0,
            displace: 15.0,
            distortion_scale: -150.0,
            red_offset: 5.0,
            green_offset: 15.0,
            blue_offset: 25.0,
            mix_blend_mode: BlendMode::Screen,
            x_channel: ColorChannel::R,
            y_channel: ColorChannel::G,
        }
    }
}

/// Rendered size of the panel, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanelBox {
    pub width: f64,
    pub height: f64,
}

impl PanelBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Which `feDisplacementMap` element a [`ChannelDisplacement`] targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChannel {
    Red,
    Green,
    Blue,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelDisplacement {
    pub channel: FilterChannel,
    pub scale: f64,
    pub x_channel_selector: ColorChannel,
    pub y_channel_selector: ColorChannel,
}

/// Attribute values for the filter graph, applied once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSettings {
    pub channels: [ChannelDisplacement; 3],
    pub blur_std_deviation: f64,
}

impl EffectSettings {
    /// Thickness of the distorting rim for a panel of the given size
    pub fn edge_inset(&self, panel: PanelBox) -> f64 {
        panel.width.min(panel.height) * (self.border_width * 0.5)
    }

    pub fn filter_settings(&self) -> FilterSettings {
        let displacement = |channel, offset: f64| ChannelDisplacement {
            channel,
            scale: self.distortion_scale + offset,
            x_channel_selector: self.x_channel,
            y_channel_selector: self.y_channel,
        };
        FilterSettings {
            channels: [
                displacement(FilterChannel::Red, self.red_offset),
                displacement(FilterChannel::Green, self.green_offset),
                displacement(FilterChannel::Blue, self.blue_offset),
            ],
            blur_std_deviation: self.displace,
        }
    }
}

/// Generates displacement maps from a fixed set of [`EffectSettings`]
#[derive(Debug, Clone, Default)]
pub struct GlassEffect {
    settings: EffectSettings,
}

impl GlassEffect {
    pub fn new(settings: EffectSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EffectSettings {
        &self.settings
    }

    pub fn filter_settings(&self) -> FilterSettings {
        self.settings.filter_settings()
    }

    /// SVG document of the displacement map for `panel`
    pub fn displacement_map_svg(&self, panel: PanelBox) -> String {
        let s = &self.settings;
        let (w, h) = (panel.width, panel.height);
        let edge = s.edge_inset(panel);
        let radius = s.border_radius;

        let mut svg = String::with_capacity(1024);
        svg.push_str(&format!(
            r#"<svg viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">"#
        ));
        svg.push_str(concat!(
            "<defs>",
            r#"<linearGradient id="red-grad-dynamic" x1="100%" y1="0%" x2="0%" y2="0%">"#,
            r##"<stop offset="0%" stop-color="#0000"/><stop offset="100%" stop-color="red"/>"##,
            "</linearGradient>",
            r#"<linearGradient id="blue-grad-dynamic" x1="0%" y1="0%" x2="0%" y2="100%">"#,
            r##"<stop offset="0%" stop-color="#0000"/><stop offset="100%" stop-color="blue"/>"##,
            "</linearGradient>",
            "</defs>",
        ));
        svg.push_str(&format!(
            r#"<rect x="0" y="0" width="{w}" height="{h}" fill="black"></rect>"#
        ));
        svg.push_str(&format!(
            r#"<rect x="0" y="0" width="{w}" height="{h}" rx="{radius}" fill="url(#red-grad-dynamic)" />"#
        ));
        svg.push_str(&format!(
            r#"<rect x="0" y="0" width="{w}" height="{h}" rx="{radius}" fill="url(#blue-grad-dynamic)" style="mix-blend-mode: {}" />"#,
            s.mix_blend_mode.as_css()
        ));
        svg.push_str(&format!(
            r#"<rect x="{edge}" y="{edge}" width="{}" height="{}" rx="{radius}" fill="hsl(0 0% {}% / {})" style="filter:blur({}px)" />"#,
            w - edge * 2.0,
            h - edge * 2.0,
            s.brightness,
            s.opacity,
            s.blur
        ));
        svg.push_str("</svg>");
        svg
    }

    /// Displacement map for `panel` as an embeddable `data:` URI
    pub fn generate_displacement_map(&self, panel: PanelBox) -> String {
        let svg = self.displacement_map_svg(panel);
        format!("data:image/svg+xml,{}", urlencoding::encode(&svg))
    }
}

/// Coalesces bursts of resize notifications into one deferred refresh.
///
/// `request` returns `true` only for the first notification of a burst; the
/// host then schedules a single refresh and calls `take` when it runs.
#[derive(Debug, Default)]
pub struct RefreshDebounce {
    pending: bool,
}

impl RefreshDebounce {
    pub fn request(&mut self) -> bool {
        !std::mem::replace(&mut self.pending, true)
    }

    /// Clears the pending flag; returns whether a refresh was requested
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_inset_for_300x200() {
        let s = EffectSettings::default();
        let inset = s.edge_inset(PanelBox::new(300.0, 200.0));
        assert!((inset - 7.0).abs() < 1e-9, "inset = {inset}");
    }

    #[test]
    fn test_edge_inset_uses_shorter_side() {
        let s = EffectSettings::default();
        for (w, h) in [(100.0, 400.0), (400.0, 100.0), (250.0, 250.0), (0.0, 80.0)] {
            let inset = s.edge_inset(PanelBox::new(w, h));
            let expected = f64::min(w, h) * 0.035;
            assert!((inset - expected).abs() < 1e-9, "{w}x{h}: {inset}");
        }
    }

    #[test]
    fn test_svg_structure() {
        let effect = GlassEffect::default();
        let svg = effect.displacement_map_svg(PanelBox::new(300.0, 200.0));

        assert!(svg.starts_with(r#"<svg viewBox="0 0 300 200""#));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"id="red-grad-dynamic" x1="100%" y1="0%" x2="0%" y2="0%""#));
        assert!(svg.contains(r#"id="blue-grad-dynamic" x1="0%" y1="0%" x2="0%" y2="100%""#));
        assert!(svg.contains(r#"stop-color="red""#));
        assert!(svg.contains(r#"stop-color="blue""#));
        assert!(svg.contains(r#"fill="black""#));
        assert!(svg.contains("mix-blend-mode: screen"));
        assert!(svg.contains("hsl(0 0% 50% / 0.93)"));
        assert!(svg.contains("filter:blur(11px)"));
        assert_eq!(svg.matches("<rect ").count(), 4);
        assert_eq!(svg.matches(r#"rx="20""#).count(), 3);
    }

    #[test]
    fn test_inner_rect_is_inset_by_edge() {
        let effect = GlassEffect::default();
        // 400 x 400 keeps the arithmetic exact: 400 * 0.035 = 14
        let svg = effect.displacement_map_svg(PanelBox::new(400.0, 400.0));
        let inner = svg.split("<rect ").last().unwrap();
        let edge = EffectSettings::default().edge_inset(PanelBox::new(400.0, 400.0));
        assert!(inner.contains(&format!(r#"x="{edge}" y="{edge}""#)));
        assert!(inner.contains(&format!(r#"width="{}""#, 400.0 - edge * 2.0)));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let effect = GlassEffect::default();
        let b = PanelBox::new(320.5, 480.25);
        assert_eq!(
            effect.generate_displacement_map(b),
            effect.generate_displacement_map(b)
        );
    }

    #[test]
    fn test_different_boxes_differ() {
        let effect = GlassEffect::default();
        assert_ne!(
            effect.generate_displacement_map(PanelBox::new(300.0, 200.0)),
            effect.generate_displacement_map(PanelBox::new(301.0, 200.0))
        );
    }

    #[test]
    fn test_data_uri_is_percent_encoded() {
        let effect = GlassEffect::default();
        let uri = effect.generate_displacement_map(PanelBox::new(300.0, 200.0));
        let payload = uri.strip_prefix("data:image/svg+xml,").unwrap();

        assert!(!payload.contains('<'));
        assert!(!payload.contains('"'));
        assert!(!payload.contains(' '));
        assert!(!payload.contains('#'));
        let decoded = urlencoding::decode(payload).unwrap();
        assert_eq!(decoded, effect.displacement_map_svg(PanelBox::new(300.0, 200.0)));
    }

    #[test]
    fn test_blend_mode_setting_flows_into_svg() {
        let effect = GlassEffect::new(EffectSettings {
            mix_blend_mode: BlendMode::Difference,
            ..Default::default()
        });
        let svg = effect.displacement_map_svg(PanelBox::new(10.0, 10.0));
        assert!(svg.contains("mix-blend-mode: difference"));
    }

    #[test]
    fn test_filter_settings_channel_scales() {
        let fs = EffectSettings::default().filter_settings();
        let scales: Vec<f64> = fs.channels.iter().map(|c| c.scale).collect();
        assert_eq!(scales, vec![-145.0, -135.0, -125.0]);
        assert_eq!(fs.channels[0].channel, FilterChannel::Red);
        assert_eq!(fs.channels[2].channel, FilterChannel::Blue);
        for c in &fs.channels {
            assert_eq!(c.x_channel_selector, ColorChannel::R);
            assert_eq!(c.y_channel_selector, ColorChannel::G);
        }
        assert_eq!(fs.blur_std_deviation, 15.0);
    }

    #[test]
    fn test_settings_json_partial_override() {
        let s: EffectSettings =
            serde_json::from_str(r#"{"border_radius": 8, "mix_blend_mode": "overlay"}"#).unwrap();
        assert_eq!(s.border_radius, 8.0);
        assert_eq!(s.mix_blend_mode, BlendMode::Overlay);
        assert_eq!(s.border_width, 0.07);
        assert_eq!(s.distortion_scale, -150.0);
    }

    #[test]
    fn test_refresh_debounce_coalesces_burst() {
        let mut d = RefreshDebounce::default();
        assert!(d.request());
        assert!(!d.request());
        assert!(!d.request());
        assert!(d.is_pending());

        assert!(d.take());
        assert!(!d.take());

        // The next burst schedules again
        assert!(d.request());
    }
}
