//! Locale-aware formatting for the dashboard: date formatters for axis
//! labels and tooltips, a fixed-precision number formatter, and the textual
//! labels the date/number APIs do not cover.
//!
//! Formatters are constructed once per language and memoized; there is no
//! global mutable singleton.

use chrono::{DateTime, FixedOffset, Locale};
use moka::sync::Cache;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    Cs,
    En,
}

impl Lang {
    /// Match a BCP-47-ish tag by its primary subtag (`cs-CZ` -> `Cs`).
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or(tag)
            .to_lowercase();
        match primary.as_str() {
            "cs" => Some(Self::Cs),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    fn chrono_locale(self) -> Locale {
        match self {
            Self::Cs => Locale::cs_CZ,
            Self::En => Locale::en_US,
        }
    }
}

/// Hard-coded label mapping for the texts locale APIs do not cover.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Labels {
    pub height: &'static str,
    pub chart: &'static str,
    pub times: &'static str,
    pub maximum: &'static str,
    pub median: &'static str,
    pub date_range: &'static str,
    pub today: &'static str,
    pub loading: &'static str,
    pub error: &'static str,
    pub placeholder: &'static str,
    pub unit: &'static str,
}

const CS_LABELS: Labels = Labels {
    height: "Hladina",
    chart: "Hladina (cm)",
    times: "Čas(y)",
    maximum: "Maximum",
    median: "Medián",
    date_range: "Časové rozmezí:",
    today: "Dnes",
    loading: "Načítání...",
    error: "Chyba",
    placeholder: "N/A",
    unit: "cm",
};

const EN_LABELS: Labels = Labels {
    height: "Height",
    chart: "Height (cm)",
    times: "Time(s)",
    maximum: "Maximum",
    median: "Median",
    date_range: "Date Range:",
    today: "Today",
    loading: "Loading...",
    error: "Error",
    placeholder: "N/A",
    unit: "cm",
};

/// Formatting bundle for one language.
#[derive(Debug)]
pub struct Formatters {
    lang: Lang,
    labels: Labels,
}

impl Formatters {
    fn new(lang: Lang) -> Self {
        let labels = match lang {
            Lang::Cs => CS_LABELS,
            Lang::En => EN_LABELS,
        };
        Self { lang, labels }
    }

    #[must_use]
    pub fn lang(&self) -> Lang {
        self.lang
    }

    #[must_use]
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Short axis label: month, day, hour, minute.
    #[must_use]
    pub fn axis_label(&self, timestamp: &DateTime<FixedOffset>) -> String {
        let pattern = match self.lang {
            Lang::Cs => "%-d. %-m. %H:%M",
            Lang::En => "%-m/%-d, %-I:%M %p",
        };
        timestamp
            .format_localized(pattern, self.lang.chrono_locale())
            .to_string()
    }

    /// Full tooltip/table date: weekday, full date, seconds.
    #[must_use]
    pub fn tooltip(&self, timestamp: &DateTime<FixedOffset>) -> String {
        let pattern = match self.lang {
            Lang::Cs => "%a %-d. %B %Y %H:%M:%S",
            Lang::En => "%a, %B %-d, %Y, %-I:%M:%S %p",
        };
        timestamp
            .format_localized(pattern, self.lang.chrono_locale())
            .to_string()
    }

    /// Fixed-precision number: exactly one decimal place, locale decimal
    /// separator.
    #[must_use]
    pub fn number(&self, value: f64) -> String {
        let formatted = format!("{value:.1}");
        match self.lang {
            Lang::Cs => formatted.replace('.', ","),
            Lang::En => formatted,
        }
    }
}

/// Per-language formatter cache. Construction is cheap but happens once per
/// language rather than once per request.
#[derive(Clone)]
pub struct FormatterCache {
    cache: Cache<Lang, Arc<Formatters>>,
    default_lang: Lang,
}

impl FormatterCache {
    #[must_use]
    pub fn new(default_locale: &str) -> Self {
        Self {
            cache: Cache::new(8),
            default_lang: Lang::from_tag(default_locale).unwrap_or(Lang::En),
        }
    }

    /// Resolve the request language: explicit `locale` query parameter first,
    /// then the `Accept-Language` header, then the configured default.
    #[must_use]
    pub fn resolve(
        &self,
        explicit: Option<&str>,
        accept_language: Option<&str>,
    ) -> Arc<Formatters> {
        let lang = explicit
            .and_then(Lang::from_tag)
            .or_else(|| accept_language.and_then(parse_accept_language))
            .unwrap_or(self.default_lang);
        self.get(lang)
    }

    #[must_use]
    pub fn get(&self, lang: Lang) -> Arc<Formatters> {
        self.cache
            .get_with(lang, || Arc::new(Formatters::new(lang)))
    }
}

/// First recognized language in an `Accept-Language` header wins; quality
/// weights are not honored beyond list order.
fn parse_accept_language(header: &str) -> Option<Lang> {
    header.split(',').find_map(|part| {
        let tag = part.split(';').next()?.trim();
        Lang::from_tag(tag)
    })
}
