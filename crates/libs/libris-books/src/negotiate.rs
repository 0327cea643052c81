//! Accept-header negotiation between the supported renderings.

/// Renderings the books endpoint can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookFormat {
    Json,
    Csv,
}

impl BookFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            BookFormat::Json => "application/json;charset=utf-8",
            BookFormat::Csv => "text/csv;charset=utf-8",
        }
    }
}

/// Offered media types, in order of preference on ties.
const OFFERS: [(&str, BookFormat); 3] = [
    ("application/json", BookFormat::Json),
    ("text/csv", BookFormat::Csv),
    ("application/csv", BookFormat::Csv),
];

struct MediaRange<'a> {
    kind: &'a str,
    subtype: &'a str,
    quality: f32,
}

impl<'a> MediaRange<'a> {
    fn parse(raw: &'a str) -> Option<Self> {
        let mut parts = raw.split(';');
        let (kind, subtype) = parts.next()?.trim().split_once('/')?;

        let quality = parts
            .filter_map(|param| param.trim().split_once('='))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
            .and_then(|(_, value)| value.trim().parse::<f32>().ok())
            .unwrap_or(1.0);

        Some(Self {
            kind: kind.trim(),
            subtype: subtype.trim(),
            quality,
        })
    }

    /// 2 for an exact match, 1 for `type/*`, 0 for `*/*`.
    fn specificity(&self, offer: &str) -> Option<u8> {
        let (kind, subtype) = offer.split_once('/')?;

        if self.kind == "*" && self.subtype == "*" {
            Some(0)
        } else if self.kind.eq_ignore_ascii_case(kind) && self.subtype == "*" {
            Some(1)
        } else if self.kind.eq_ignore_ascii_case(kind) && self.subtype.eq_ignore_ascii_case(subtype)
        {
            Some(2)
        } else {
            None
        }
    }
}

/// Picks a rendering for an `Accept` header value.
///
/// Each offer is weighed by the most specific media range that matches it;
/// the highest weight wins and ties go to the earlier offer. JSON is the
/// answer when the header is missing or nothing acceptable is offered.
pub fn negotiate(accept: Option<&str>) -> BookFormat {
    let Some(accept) = accept.filter(|value| !value.trim().is_empty()) else {
        return BookFormat::Json;
    };

    let ranges: Vec<MediaRange<'_>> = accept.split(',').filter_map(MediaRange::parse).collect();

    let mut best: Option<(f32, BookFormat)> = None;
    for (offer, format) in OFFERS {
        let quality = ranges
            .iter()
            .filter_map(|range| range.specificity(offer).map(|s| (s, range.quality)))
            .max_by_key(|(specificity, _)| *specificity)
            .map(|(_, quality)| quality)
            .unwrap_or(0.0);

        if quality > 0.0 && best.is_none_or(|(q, _)| quality > q) {
            best = Some((quality, format));
        }
    }

    best.map(|(_, format)| format).unwrap_or(BookFormat::Json)
}
