/// Format an amount the way `es-ES` renders euros: `"1234,50 €"`, `"12.345,00 €"`.
///
/// Spanish locale only groups thousands once the integer part has five or more digits.
pub fn format_eur(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let grouped = if whole.len() >= 5 {
        group_thousands(&whole)
    } else {
        whole
    };

    format!(
        "{}{},{:02}\u{a0}€",
        if negative { "-" } else { "" },
        grouped,
        fraction
    )
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
