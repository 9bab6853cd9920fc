//! Startup capability gate for the SVG backdrop filter.

/// Class applied when the backdrop can reference the SVG filter
pub const SVG_FILTER_CLASS: &str = "glass-surface--svg";
/// Class applied when it cannot
pub const FALLBACK_CLASS: &str = "glass-surface--fallback";
/// `backdrop-filter` value used by the glass style
pub const GLASS_FILTER_REF: &str = "url(#glass-filter)";

/// Visual treatment chosen for the glass panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlassStyle {
    SvgFilter,
    Fallback,
}

impl GlassStyle {
    pub fn class_name(self) -> &'static str {
        match self {
            GlassStyle::SvgFilter => SVG_FILTER_CLASS,
            GlassStyle::Fallback => FALLBACK_CLASS,
        }
    }
}

/// Everything the gate needs to know about the rendering surface.
///
/// Each platform provides one implementation. Browsers answer both
/// questions; surfaces without a user agent or a style engine answer `None`
/// and `false`.
pub trait CapabilityProbe {
    /// User-agent string, when the surface has one
    fn user_agent(&self) -> Option<String>;

    /// Set `backdrop-filter: value` on a scratch element and report whether it
    /// reads back non-empty
    fn backdrop_filter_round_trips(&self, value: &str) -> bool;

    /// Engines that accept the style but render it incorrectly.
    ///
    /// User-agent sniffing is not portable; it lives here so a platform can
    /// override it.
    fn known_unsupported_engine(&self) -> bool {
        self.user_agent()
            .is_some_and(|ua| is_known_unsupported_user_agent(&ua))
    }
}

/// WebKit without Chrome (Safari) and Gecko (Firefox)
pub fn is_known_unsupported_user_agent(ua: &str) -> bool {
    let webkit_only = ua.contains("Safari") && !ua.contains("Chrome");
    webkit_only || ua.contains("Firefox")
}

/// Decide the glass style once, at startup
pub fn detect_glass_style(probe: &impl CapabilityProbe) -> GlassStyle {
    let style = if probe.known_unsupported_engine() {
        GlassStyle::Fallback
    } else if probe.backdrop_filter_round_trips(GLASS_FILTER_REF) {
        GlassStyle::SvgFilter
    } else {
        GlassStyle::Fallback
    };
    tracing::info!(class = style.class_name(), "glass style selected");
    style
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";
    const SAFARI: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_5) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Safari/605.1.15";
    const FIREFOX: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:127.0) Gecko/20100101 Firefox/127.0";

    struct FakeProbe {
        ua: Option<&'static str>,
        round_trips: bool,
    }

    impl CapabilityProbe for FakeProbe {
        fn user_agent(&self) -> Option<String> {
            self.ua.map(str::to_string)
        }

        fn backdrop_filter_round_trips(&self, value: &str) -> bool {
            assert_eq!(value, GLASS_FILTER_REF);
            self.round_trips
        }
    }

    #[test]
    fn test_user_agent_heuristic() {
        assert!(!is_known_unsupported_user_agent(CHROME));
        assert!(is_known_unsupported_user_agent(SAFARI));
        assert!(is_known_unsupported_user_agent(FIREFOX));
    }

    #[test]
    fn test_chrome_with_working_probe_gets_svg_filter() {
        let probe = FakeProbe {
            ua: Some(CHROME),
            round_trips: true,
        };
        assert_eq!(detect_glass_style(&probe), GlassStyle::SvgFilter);
    }

    #[test]
    fn test_chrome_with_failing_probe_falls_back() {
        let probe = FakeProbe {
            ua: Some(CHROME),
            round_trips: false,
        };
        assert_eq!(detect_glass_style(&probe), GlassStyle::Fallback);
    }

    #[test]
    fn test_safari_and_firefox_fall_back_even_if_probe_passes() {
        for ua in [SAFARI, FIREFOX] {
            let probe = FakeProbe {
                ua: Some(ua),
                round_trips: true,
            };
            assert_eq!(detect_glass_style(&probe), GlassStyle::Fallback, "{ua}");
        }
    }

    #[test]
    fn test_surface_without_user_agent_relies_on_probe() {
        let probe = FakeProbe {
            ua: None,
            round_trips: true,
        };
        assert_eq!(detect_glass_style(&probe), GlassStyle::SvgFilter);
    }

    #[test]
    fn test_class_names() {
        assert_eq!(GlassStyle::SvgFilter.class_name(), "glass-surface--svg");
        assert_eq!(GlassStyle::Fallback.class_name(), "glass-surface--fallback");
    }
}
