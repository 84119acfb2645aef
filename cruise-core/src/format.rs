use chrono::Datelike;
use serde::Serialize;

use crate::models::parse_calendar_date;

/// Stops rendered inline before the itinerary collapses into "+N more".
pub const MAX_INLINE_STOPS: usize = 4;

const MONTHS: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

/// Compact sailing range such as `Mar 2-9, 2025`, using the calendar days as
/// written. Empty when either date fails to parse.
pub fn format_date_range(departure_date: &str, return_date: &str) -> String {
    let (Some(departure), Some(ret)) = (parse_calendar_date(departure_date), parse_calendar_date(return_date)) else {
        return String::new();
    };

    let dep_month = MONTHS[departure.month0() as usize];
    let ret_month = MONTHS[ret.month0() as usize];

    if departure.year() == ret.year() {
        if departure.month() == ret.month() {
            format!("{} {}-{}, {}", dep_month, departure.day(), ret.day(), departure.year())
        } else {
            format!("{} {}-{} {}, {}", dep_month, departure.day(), ret_month, ret.day(), departure.year())
        }
    } else {
        format!(
            "{} {}, {}-{} {}, {}",
            dep_month,
            departure.day(),
            departure.year(),
            ret_month,
            ret.day(),
            ret.year()
        )
    }
}

/// Itinerary as shown on a card. Long itineraries keep the first stops inline
/// and the rest behind a "+N more" hint; `all` backs the tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryPreview {
    pub inline: Vec<String>,
    pub hidden_count: usize,
    pub all: Vec<String>,
}

impl ItineraryPreview {
    pub fn new(itinerary: &[String]) -> Self {
        let inline = if itinerary.len() <= MAX_INLINE_STOPS {
            itinerary.to_vec()
        } else {
            itinerary[..MAX_INLINE_STOPS - 1].to_vec()
        };

        Self {
            hidden_count: itinerary.len() - inline.len(),
            inline,
            all: itinerary.to_vec(),
        }
    }

    pub fn more_label(&self) -> Option<String> {
        (self.hidden_count > 0).then(|| format!("+{} more", self.hidden_count))
    }
}

pub fn format_rating(rating: f64) -> String {
    format!("{:.1}", rating)
}

/// Whole amounts print without decimals, e.g. `$899`.
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("${:.0}", price)
    } else {
        format!("${:.2}", price)
    }
}

/// `1234567` -> `1,234,567`.
pub fn format_count(count: usize) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}
