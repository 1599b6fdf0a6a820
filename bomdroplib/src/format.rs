//! Number formatting for display text.
//!
//! Quantities are shown with thousands separators, costs with a dollar sign
//! and at most three decimal places, and the reference total in millions
//! shorthand ("$96.5M").

/// Insert a comma every three digits: `1234567` → `"1,234,567"`.
pub fn thousands(value: u64) -> String {
    group_digits(&value.to_string())
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format an amount with grouped digits and up to three decimals, trailing
/// zeros trimmed: `1234.5` → `"1,234.5"`, `350000.0` → `"350,000"`.
pub fn amount(value: f64) -> String {
    let rounded = format!("{:.3}", value.abs());
    let (whole, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac = frac.trim_end_matches('0');
    let nonzero = rounded.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if value < 0.0 && nonzero { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{}", group_digits(whole))
    } else {
        format!("{sign}{}.{frac}", group_digits(whole))
    }
}

/// `amount` with a leading dollar sign.
pub fn dollars(value: f64) -> String {
    format!("${}", amount(value))
}

/// Millions shorthand with one decimal, trimmed: `96_500_000.0` → `"$96.5M"`.
pub fn millions(value: f64) -> String {
    let m = format!("{:.1}", value / 1_000_000.0);
    let m = m.strip_suffix(".0").unwrap_or(&m);
    format!("${m}M")
}

/// Plain number text for machine-readable exports: `1200.0` → `"1200"`.
pub fn plain(value: f64) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(21_444_444), "21,444,444");
        assert_eq!(thousands(100_000), "100,000");
    }

    #[test]
    fn test_amount() {
        assert_eq!(amount(350_000.0), "350,000");
        assert_eq!(amount(4.5), "4.5");
        assert_eq!(amount(1234.5678), "1,234.568");
        assert_eq!(amount(26.666_666), "26.667");
        assert_eq!(amount(0.0), "0");
        assert_eq!(amount(-1500.25), "-1,500.25");
    }

    #[test]
    fn test_dollars() {
        assert_eq!(dollars(5.2), "$5.2");
        assert_eq!(dollars(105_000.0), "$105,000");
    }

    #[test]
    fn test_millions() {
        assert_eq!(millions(96_500_000.0), "$96.5M");
        assert_eq!(millions(2_000_000.0), "$2M");
        assert_eq!(millions(1_240_000.0), "$1.2M");
    }

    #[test]
    fn test_plain() {
        assert_eq!(plain(1200.0), "1200");
        assert_eq!(plain(4.5), "4.5");
    }
}
