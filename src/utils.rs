use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;

const SPARK_TICKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
pub const EMPTY_VALUE: &str = "-";

// Normalize user input into a CoinGecko coin id.
// At most 58 characters so `retry_{id}` stays within Telegram's 64-byte callback data.
pub fn normalize_coin_id(input: &str) -> Option<String> {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^[a-z0-9][a-z0-9._-]{0,57}$").unwrap();
    }

    let id = input.trim().to_lowercase();
    RE.is_match(&id).then_some(id)
}

fn currency_symbol(vs_currency: &str) -> Option<&'static str> {
    match vs_currency.to_lowercase().as_str() {
        "krw" => Some("₩"),
        "usd" => Some("$"),
        "eur" => Some("€"),
        "jpy" => Some("¥"),
        _ => None,
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// Format a plain number with thousands separators and precision by magnitude
pub fn format_number(value: f64) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    let body = if abs >= 1000.0 {
        group_thousands(&format!("{:.0}", abs))
    } else if abs >= 1.0 {
        format!("{:.2}", abs)
    } else if abs == 0.0 {
        "0".to_string()
    } else {
        let text = format!("{:.8}", abs);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    };

    format!("{}{}", sign, body)
}

// Format an amount of money in the quote currency, "-" when unknown
pub fn format_money(value: Option<f64>, vs_currency: &str) -> String {
    match value {
        Some(value) => match currency_symbol(vs_currency) {
            Some(symbol) if value < 0.0 => format!("-{}{}", symbol, format_number(-value)),
            Some(symbol) => format!("{}{}", symbol, format_number(value)),
            None => format!("{} {}", format_number(value), vs_currency.to_uppercase()),
        },
        None => EMPTY_VALUE.to_string(),
    }
}

pub fn format_percentage(value: Option<f64>) -> String {
    match value {
        Some(value) if value > 0.0 => format!("+{:.2}%", value),
        Some(value) => format!("{:.2}%", value),
        None => EMPTY_VALUE.to_string(),
    }
}

// Date shown next to ATH/ATL values
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%y년 %-m월 %-d일").to_string()
}

pub fn format_updated_at(date: &DateTime<Utc>) -> String {
    date.format("%-m/%-d %H:%M:%S 업데이트").to_string()
}

// Render price samples as a one-line chart of at most `width` ticks
pub fn sparkline(samples: &[f64], width: usize) -> String {
    if samples.is_empty() || width == 0 {
        return String::new();
    }

    let bucket = samples.len().div_ceil(width);
    let points: Vec<f64> = samples
        .chunks(bucket)
        .map(|chunk| chunk.iter().sum::<f64>() / chunk.len() as f64)
        .collect();

    let min = points.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = points.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    points
        .iter()
        .map(|point| {
            if range <= f64::EPSILON {
                SPARK_TICKS[SPARK_TICKS.len() / 2]
            } else {
                let level = ((point - min) / range * (SPARK_TICKS.len() - 1) as f64).round();
                SPARK_TICKS[level as usize]
            }
        })
        .collect()
}
