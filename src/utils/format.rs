/// Renders a dollar amount with thousands separators and two decimals.
///
/// Mirrors Python's `f"${value:,.2f}"`, so negatives come out as `$-1,234.50`
/// and non-finite values as `$nan` / `$inf` / `$-inf`.
pub fn format_currency(value: f64) -> String {
    if value.is_nan() {
        return "$nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "$inf" } else { "$-inf" }.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value.is_sign_negative() { "-" } else { "" };

    format!("${}{}.{}", sign, group_thousands(int_part), frac_part)
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
