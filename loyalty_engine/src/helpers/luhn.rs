/// Checks that `number` is a non-empty string of ASCII digits with a valid Luhn check digit.
///
/// A lone `0` is rejected. It passes the checksum but is never issued as an order number.
pub fn is_valid_luhn(number: &str) -> bool {
    if number.is_empty() || number == "0" || !number.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let sum: u32 = number
        .bytes()
        .rev()
        .map(|b| u32::from(b - b'0'))
        .enumerate()
        .map(|(i, d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}
