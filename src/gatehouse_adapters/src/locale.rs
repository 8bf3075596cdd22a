use gatehouse_core::Locale;

/// Resolves a request's locale from its `Accept-Language` header.
#[derive(Debug, Clone)]
pub struct LocaleNegotiator {
    available: Vec<Locale>,
    default: Locale,
}

impl LocaleNegotiator {
    pub fn new(available: Vec<Locale>, default: Locale) -> Self {
        Self { available, default }
    }

    /// Best available match for `accept_language`, or the default locale.
    ///
    /// Tags are tried in order of their `q` weight. An exact match wins; otherwise
    /// `pt-BR` falls back to an available `pt`.
    pub fn negotiate(&self, accept_language: Option<&str>) -> Locale {
        let Some(header) = accept_language else {
            return self.default.clone();
        };

        let mut ranges: Vec<(&str, f32)> = header
            .split(',')
            .filter_map(parse_range)
            .filter(|(_, q)| *q > 0.0)
            .collect();
        // Stable sort keeps header order among equal weights.
        ranges.sort_by(|a, b| b.1.total_cmp(&a.1));

        ranges
            .into_iter()
            .find_map(|(tag, _)| self.matching(tag))
            .unwrap_or_else(|| self.default.clone())
    }

    fn matching(&self, tag: &str) -> Option<Locale> {
        let language = tag.split('-').next()?;
        [tag, language]
            .into_iter()
            .find_map(|wanted| {
                self.available
                    .iter()
                    .find(|locale| locale.as_str().eq_ignore_ascii_case(wanted))
            })
            .cloned()
    }
}

fn parse_range(range: &str) -> Option<(&str, f32)> {
    let mut parts = range.split(';').map(str::trim);
    let tag = parts.next().filter(|tag| !tag.is_empty())?;
    let q = parts
        .find_map(|param| param.strip_prefix("q="))
        .map_or(Some(1.0), |q| q.parse::<f32>().ok())?;
    Some((tag, q))
}
