// src/format.rs
// Presentation formatting for offers: pt-BR currency, discount percentage,
// and the star rating string. Pure functions, no state.

/// Formats a price the way the feed's audience reads it: `R$` prefix,
/// `.` thousands grouping, `,` decimal separator, two decimals.
/// Non-finite input renders as zero rather than leaking `NaN` into the UI.
pub fn format_brl(value: f64) -> String {
    if !value.is_finite() {
        return "R$ 0,00".to_string();
    }
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let sign = if negative { "-" } else { "" };
    format!("R$ {}{},{:02}", sign, whole, cents % 100)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let len = digits.len();
    let mut result = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push('.');
        }
        result.push(c);
    }
    result
}

/// Rounded discount of the offered price against the full price. A zero or
/// non-finite full price yields 0 instead of dividing by zero.
pub fn discount_percent(full_price: f64, offered_price: f64) -> i64 {
    if full_price == 0.0 || !full_price.is_finite() || !offered_price.is_finite() {
        return 0;
    }
    ((1.0 - offered_price / full_price) * 100.0).round() as i64
}

/// Star string for a rating: one `★` per whole point, one `½` for a
/// fractional remainder, never more than five symbols. Ratings at or below
/// zero (or NaN) render empty.
pub fn stars(rating: f64) -> String {
    if !rating.is_finite() || rating <= 0.0 {
        return String::new();
    }
    let full = rating.floor().min(5.0) as usize;
    let mut out = "★".repeat(full);
    if rating.fract() > 0.0 && full < 5 {
        out.push('½');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_brl_with_pt_br_separators() {
        assert_eq!(format_brl(1234.56), "R$ 1.234,56");
        assert_eq!(format_brl(700.0), "R$ 700,00");
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(1_000_000.5), "R$ 1.000.000,50");
    }

    #[test]
    fn brl_rounds_to_cents() {
        assert_eq!(format_brl(99.999), "R$ 100,00");
        assert_eq!(format_brl(0.005), "R$ 0,01");
    }

    #[test]
    fn brl_handles_negative_and_non_finite_input() {
        assert_eq!(format_brl(-1234.5), "R$ -1.234,50");
        assert_eq!(format_brl(f64::NAN), "R$ 0,00");
        assert_eq!(format_brl(f64::INFINITY), "R$ 0,00");
    }

    #[test]
    fn discount_matches_the_card_formula() {
        assert_eq!(discount_percent(1000.0, 450.0), 55);
        assert_eq!(discount_percent(100.0, 100.0), 0);
        assert_eq!(discount_percent(60.0, 50.0), 17);
    }

    #[test]
    fn discount_with_zero_full_price_is_zero() {
        assert_eq!(discount_percent(0.0, 0.0), 0);
        assert_eq!(discount_percent(0.0, 100.0), 0);
        assert_eq!(discount_percent(f64::NAN, 10.0), 0);
    }

    #[test]
    fn stars_render_whole_and_half_points() {
        assert_eq!(stars(3.0), "★★★");
        assert_eq!(stars(4.5), "★★★★½");
        assert_eq!(stars(0.5), "½");
    }

    #[test]
    fn stars_clamp_to_five_symbols() {
        assert_eq!(stars(5.0), "★★★★★");
        assert_eq!(stars(5.5), "★★★★★");
        assert_eq!(stars(9.0), "★★★★★");
    }

    #[test]
    fn stars_for_invalid_ratings_are_empty() {
        assert_eq!(stars(0.0), "");
        assert_eq!(stars(-1.0), "");
        assert_eq!(stars(f64::NAN), "");
    }
}
