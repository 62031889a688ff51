use crate::error::{MSG_EMPTY_ZIP, MSG_INVALID_ZIP, Result, WeatherError};

/// Drop everything that is not an ASCII digit, as the input field does while typing.
pub fn sanitize_zip_input(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Accept exactly five ASCII digits (surrounding whitespace ignored).
pub fn validate_zip(raw: &str) -> Result<&str> {
    let zip = raw.trim();
    if zip.is_empty() {
        return Err(WeatherError::validation(MSG_EMPTY_ZIP));
    }
    if zip.len() != 5 || !zip.chars().all(|c| c.is_ascii_digit()) {
        return Err(WeatherError::validation(MSG_INVALID_ZIP));
    }
    Ok(zip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn sanitize_strips_non_digits() {
        assert_eq!(sanitize_zip_input("78-15a5 "), "78155");
        assert_eq!(sanitize_zip_input("abc"), "");
    }

    #[test]
    fn validate_accepts_five_digits() {
        assert_eq!(validate_zip(" 78155 ").expect("valid"), "78155");
    }

    #[test]
    fn validate_rejects_empty_and_malformed() {
        let empty = validate_zip("   ").unwrap_err();
        assert_eq!(empty.kind(), ErrorKind::Validation);
        assert_eq!(empty.message(), MSG_EMPTY_ZIP);

        for bad in ["1234", "123456", "12a45", "١٢٣٤٥"] {
            let err = validate_zip(bad).unwrap_err();
            assert_eq!(err.message(), MSG_INVALID_ZIP, "input {bad:?}");
        }
    }
}
