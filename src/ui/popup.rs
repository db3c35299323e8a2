use crate::{core::config::TimeZoneMode, data::earthquake::Earthquake};

/// HTML content shown when a marker is clicked
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    content: String,
}

impl Popup {
    /// Wraps trusted HTML; callers escape any untrusted parts first
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Location, magnitude, depth and date of one earthquake.
    ///
    /// A missing place reads `unknown`; numbers use the shortest float form.
    pub fn for_earthquake(quake: &Earthquake, time_zone: TimeZoneMode) -> Self {
        let place = quake
            .place
            .as_deref()
            .map(escape_html)
            .unwrap_or_else(|| "unknown".to_string());

        Self::new(format!(
            concat!(
                "<h3><span style=\"text-decoration: underline;\">Location</span>: {}</h3><hr>",
                "<p><span style=\"text-decoration: underline;\">Magnitude</span>: {}</p>",
                "<p><span style=\"text-decoration: underline;\">Depth</span>: {} km</p>",
                "<p><span style=\"text-decoration: underline;\">Date & Time</span>: {}</p>",
            ),
            place,
            quake.magnitude,
            quake.depth_km,
            quake.formatted_time(time_zone),
        ))
    }
}

/// Escapes text for use in HTML content and double-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;

    fn quake(place: Option<&str>) -> Earthquake {
        Earthquake {
            id: None,
            place: place.map(str::to_string),
            magnitude: 4.5,
            depth_km: 33.0,
            time_ms: Some(1_700_000_000_000),
            position: LatLng::new(0.0, 0.0),
        }
    }

    #[test]
    fn test_earthquake_popup_template() {
        let popup = Popup::for_earthquake(&quake(Some("10km ENE of X")), TimeZoneMode::Utc);
        let html = popup.content();

        assert!(html.starts_with(
            "<h3><span style=\"text-decoration: underline;\">Location</span>: 10km ENE of X</h3><hr>"
        ));
        assert!(html.contains("Magnitude</span>: 4.5</p>"));
        assert!(html.contains("Depth</span>: 33 km</p>"));
        assert!(html.contains("Date & Time</span>: Tue Nov 14 2023 22:13:20 GMT+0000</p>"));
    }

    #[test]
    fn test_place_is_escaped() {
        let popup = Popup::for_earthquake(&quake(Some("<b>A & B</b>")), TimeZoneMode::Utc);
        assert!(popup.content().contains("&lt;b&gt;A &amp; B&lt;/b&gt;"));
    }

    #[test]
    fn test_missing_fields() {
        let mut q = quake(None);
        q.magnitude = f64::NAN;
        q.time_ms = None;
        let popup = Popup::for_earthquake(&q, TimeZoneMode::Utc);
        assert!(popup.content().contains("Location</span>: unknown</h3>"));
        assert!(popup.content().contains("Magnitude</span>: NaN</p>"));
        assert!(popup.content().contains("Invalid Date"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a\"b'c"), "a&quot;b&#39;c");
        assert_eq!(escape_html("plain"), "plain");
    }
}
