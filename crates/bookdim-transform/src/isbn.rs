//! ISBN cleaning and checksum validation.

/// Check an ISBN-10 string (digits only, optional trailing `X`).
///
/// The first nine characters must be ASCII digits. With
/// `total = Σ d[i]·(10−i)`, a total divisible by 11 requires check
/// character `0`; otherwise the check value is `11 − total mod 11`, written
/// as `X` when it is 10.
pub fn is_valid_isbn10(isbn: &str) -> bool {
    let bytes = isbn.as_bytes();
    if bytes.len() != 10 || !bytes[..9].iter().all(u8::is_ascii_digit) {
        return false;
    }
    let check = bytes[9].to_ascii_uppercase();
    if !(check.is_ascii_digit() || check == b'X') {
        return false;
    }

    let total: u32 = bytes[..9]
        .iter()
        .enumerate()
        .map(|(i, b)| u32::from(b - b'0') * (10 - i as u32))
        .sum();

    let remainder = total % 11;
    if remainder == 0 {
        return check == b'0';
    }
    match 11 - remainder {
        10 => check == b'X',
        value => check == b'0' + value as u8,
    }
}

/// Check an ISBN-13 string (exactly 13 ASCII digits).
///
/// Weights alternate 1 and 3 over the first twelve digits; the check digit is
/// `(10 − total mod 10) mod 10`.
pub fn is_valid_isbn13(isbn: &str) -> bool {
    let bytes = isbn.as_bytes();
    if bytes.len() != 13 || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let total: u32 = bytes[..12]
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let digit = u32::from(b - b'0');
            if i % 2 == 0 { digit } else { digit * 3 }
        })
        .sum();
    let expected = (10 - total % 10) % 10;
    u32::from(bytes[12] - b'0') == expected
}

/// Uppercase and strip everything except digits and `X`.
pub fn clean_isbn(isbn: Option<&str>) -> Option<String> {
    let isbn = isbn?;
    Some(
        isbn.chars()
            .flat_map(char::to_uppercase)
            .filter(|ch| ch.is_ascii_digit() || *ch == 'X')
            .collect(),
    )
}

/// Clean and validate an ISBN-10, returning the cleaned form when valid.
pub fn format_isbn10(isbn: Option<&str>) -> Option<String> {
    clean_isbn(isbn).filter(|cleaned| !cleaned.is_empty() && is_valid_isbn10(cleaned))
}

/// Clean and validate an ISBN-13, returning the cleaned form when valid.
pub fn format_isbn13(isbn: Option<&str>) -> Option<String> {
    clean_isbn(isbn).filter(|cleaned| !cleaned.is_empty() && is_valid_isbn13(cleaned))
}
