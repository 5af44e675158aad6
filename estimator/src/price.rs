use std::{
    fmt::{self, Display},
    iter,
};

/// A house price in rupiah.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    pub fn from_rupiah(rupiah: f64) -> Self {
        Self(rupiah)
    }

    pub fn rupiah(self) -> f64 {
        self.0
    }

    /// Formats the price for the `id_ID` locale, e.g. `Rp1.234.567,89`.
    pub fn format_idr(self) -> String {
        format_idr(self.0)
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_idr())
    }
}

/// Renders `amount` as Indonesian rupiah: `Rp`, `.` between thousands, `,`
/// before two decimals.
///
/// The shortest decimal form of `amount` is rounded to cents with ties to
/// even, so `1.015` gives `Rp1,02` and `2.125` gives `Rp2,12`.
pub fn format_idr(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("Rp{amount}");
    }

    let sign = if amount.is_sign_negative() { "-" } else { "" };
    let (whole, cents) = round_cents(amount.abs());
    format!("{sign}Rp{},{cents}", group_thousands(&whole))
}

/// Rounds the decimal text of a non-negative `amount` to two places, ties to even.
///
/// # Returns
/// (integer digits, the two fraction digits)
fn round_cents(amount: f64) -> (String, String) {
    let text = amount.to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(iter::repeat(b'0')).take(2))
        .collect();
    let rest = frac_part.as_bytes().get(2..).unwrap_or(&[]);

    let last_is_odd = digits.last().is_some_and(|d| (d - b'0') % 2 == 1);
    let round_up = match rest.split_first() {
        Some((&first, tail)) => {
            first > b'5'
                || (first == b'5' && (tail.iter().any(|&d| d != b'0') || last_is_odd))
        }
        None => false,
    };

    if round_up {
        increment(&mut digits);
    }

    let (whole, cents) = digits.split_at(digits.len() - 2);
    let to_string = |ds: &[u8]| ds.iter().map(|&d| d as char).collect::<String>();
    (to_string(whole), to_string(cents))
}

/// Adds one to a string of decimal digits.
fn increment(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, d) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(d);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_dots() {
        assert_eq!(format_idr(1_234_567.891), "Rp1.234.567,89");
        assert_eq!(format_idr(1_000_000_000.0), "Rp1.000.000.000,00");
        assert_eq!(format_idr(999.0), "Rp999,00");
        assert_eq!(format_idr(1099.98), "Rp1.099,98");
    }

    #[test]
    fn small_amounts() {
        assert_eq!(format_idr(0.0), "Rp0,00");
        assert_eq!(format_idr(0.5), "Rp0,50");
        assert_eq!(format_idr(12.0), "Rp12,00");
    }

    #[test]
    fn rounds_ties_to_even_on_the_decimal_form() {
        assert_eq!(format_idr(2.125), "Rp2,12");
        assert_eq!(format_idr(2.135), "Rp2,14");
        assert_eq!(format_idr(1.015), "Rp1,02");
        assert_eq!(format_idr(1_234_567.125), "Rp1.234.567,12");
        assert_eq!(format_idr(0.0051), "Rp0,01");
    }

    #[test]
    fn rounding_carries_into_the_whole_part() {
        assert_eq!(format_idr(999.999), "Rp1.000,00");
        assert_eq!(format_idr(99_999.995), "Rp100.000,00");
    }

    #[test]
    fn negatives_carry_a_leading_sign() {
        assert_eq!(format_idr(-1000.0), "-Rp1.000,00");
        assert_eq!(format_idr(-0.001), "-Rp0,00");
    }

    #[test]
    fn display_uses_locale_format() {
        let price = Price::from_rupiah(1_147_250_000.0);
        assert_eq!(price.to_string(), "Rp1.147.250.000,00");
    }
}
