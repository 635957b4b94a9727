// src/domain/logic.rs

/// Reads the longest decimal number at the start of `s`, ignoring leading
/// whitespace and anything after the number.
///
/// This is how attribute values coming out of the listing markup are read:
/// `"28.61N"` gives `28.61`, `"abc"` and `""` give `None`. An exponent is
/// only consumed when at least one digit follows it. A signed or unsigned
/// `Infinity` prefix reads as the matching infinity.
pub fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    if s[end..].starts_with("Infinity") {
        return Some(if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        // A lone trailing dot ("5.") still belongs to the number.
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Coerces a locale-formatted price (`"₹5,00,000"`, `"$1,250.50"`) to a number
/// by stripping everything except digits, `.` and `-`.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    parse_leading_float(&cleaned)
}

/// A coordinate is only usable when it parses to a finite number.
pub fn parse_coordinate(raw: &str) -> Option<f64> {
    parse_leading_float(raw).filter(|v| v.is_finite())
}
