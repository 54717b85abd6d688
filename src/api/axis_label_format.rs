use super::AxisLabelLocale;

/// Tick labels never show more than this many fraction digits.
pub const MAX_TICK_FRACTION_DIGITS: usize = 2;

/// Formats a tick or value label with thousands grouping and at most two
/// fraction digits (trailing zeros trimmed).
#[must_use]
pub fn format_tick_label(value: f64, locale: AxisLabelLocale) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }

    let precision = MAX_TICK_FRACTION_DIGITS;
    let text = format!("{:.precision$}", value.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part.trim_end_matches('0')),
        None => (text.as_str(), ""),
    };

    let (group_separator, decimal_separator) = match locale {
        AxisLabelLocale::EnUs => (',', '.'),
        AxisLabelLocale::EsEs => ('.', ','),
    };

    let mut out = String::with_capacity(text.len() + int_part.len() / 3 + 1);
    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    push_grouped(&mut out, int_part, group_separator);
    if !frac_part.is_empty() {
        out.push(decimal_separator);
        out.push_str(frac_part);
    }
    out
}

fn push_grouped(out: &mut String, digits: &str, separator: char) {
    let len = digits.len();
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push(separator);
        }
        out.push(digit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn en_us_groups_and_trims() {
        assert_eq!(format_tick_label(1234.5, AxisLabelLocale::EnUs), "1,234.5");
        assert_eq!(format_tick_label(20.0, AxisLabelLocale::EnUs), "20");
        assert_eq!(format_tick_label(0.126, AxisLabelLocale::EnUs), "0.13");
        assert_eq!(format_tick_label(-1_000_000.0, AxisLabelLocale::EnUs), "-1,000,000");
    }

    #[test]
    fn es_es_swaps_separators() {
        assert_eq!(format_tick_label(1234.5, AxisLabelLocale::EsEs), "1.234,5");
        assert_eq!(format_tick_label(0.25, AxisLabelLocale::EsEs), "0,25");
    }

    #[test]
    fn tiny_negatives_do_not_render_minus_zero() {
        assert_eq!(format_tick_label(-0.0001, AxisLabelLocale::EnUs), "0");
        assert_eq!(format_tick_label(-0.0, AxisLabelLocale::EnUs), "0");
    }
}
