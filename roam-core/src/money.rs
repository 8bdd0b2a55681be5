use chrono::Utc;

/// Group a rupee amount with Indian digit grouping: the last three digits,
/// then pairs. Paise show only when non-zero.
pub fn group_inr(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let negative = amount < 0.0;
    let abs = amount.abs();
    let mut rupees = abs.trunc() as u64;
    let mut paise = (abs.fract() * 100.0).round() as u64;
    if paise >= 100 {
        rupees += 1;
        paise = 0;
    }

    let grouped = group_digits(rupees);
    let sign = if negative { "-" } else { "" };
    if paise > 0 {
        format!("{sign}{grouped}.{paise:02}")
    } else {
        format!("{sign}{grouped}")
    }
}

fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (lead, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = lead;
    }
    groups.push(rest);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Transaction ids for bookings that arrive without one.
pub fn synthesize_txn_id() -> String {
    format!("TXN{}", Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_amounts_are_ungrouped() {
        assert_eq!(group_inr(0.0), "0");
        assert_eq!(group_inr(999.0), "999");
    }

    #[test]
    fn indian_grouping_pairs_after_thousands() {
        assert_eq!(group_inr(1000.0), "1,000");
        assert_eq!(group_inr(123456.0), "1,23,456");
        assert_eq!(group_inr(12345678.0), "1,23,45,678");
    }

    #[test]
    fn paise_render_when_present() {
        assert_eq!(group_inr(1234567.5), "12,34,567.50");
        assert_eq!(group_inr(999.999), "1,000");
    }

    #[test]
    fn negative_amounts_keep_the_sign() {
        assert_eq!(group_inr(-1500.0), "-1,500");
    }

    #[test]
    fn txn_ids_are_timestamp_prefixed() {
        let id = synthesize_txn_id();
        assert!(id.starts_with("TXN"));
        assert!(id[3..].chars().all(|c| c.is_ascii_digit()));
    }
}
