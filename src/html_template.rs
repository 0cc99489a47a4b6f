use crate::config::{PhotoSource, ViewerConfig};
use crate::gallery::resolve_photo;
use crate::itinerary::Itinerary;

/// Fill the page template with the trip header and theme.
///
/// The template is plain HTML with `{{NAME}}` placeholders; everything dynamic
/// after load comes from `/api/state` and the event stream.
pub fn render_index(template: &str, itinerary: &Itinerary, config: &ViewerConfig) -> String {
    let hero_url = itinerary
        .hero
        .as_ref()
        .and_then(|h| resolve_photo(h, config.photo_source))
        .unwrap_or_default();

    let source_note = match config.photo_source {
        PhotoSource::Remote => "Automáticas desde Unsplash",
        PhotoSource::Local => "Fotos propias",
    };

    template
        .replace("{{THEME}}", &config.theme.to_string())
        .replace("{{MAP_STRATEGY}}", &config.map_strategy.to_string())
        .replace("{{TITLE}}", &escape_html(&itinerary.title))
        .replace("{{TAGLINE}}", &escape_html(&itinerary.tagline))
        .replace("{{SUMMARY}}", &escape_html(&itinerary.summary))
        .replace("{{CREDITS}}", &escape_html(&itinerary.credits))
        .replace("{{HERO_URL}}", &escape_html(&hero_url))
        .replace("{{PHOTO_SOURCE_NOTE}}", source_note)
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
