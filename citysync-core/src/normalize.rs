//! City-name normalization for the messaging platform.

/// Convert a free-text city name into a platform-safe group name.
///
/// ASCII-lowercases, replaces each space with an underscore, and removes
/// periods. Total (never fails) and idempotent; all other characters pass
/// through unchanged.
pub fn channel_name(city: &str) -> String {
    let mut name = String::with_capacity(city.len());
    for ch in city.chars() {
        match ch {
            ' ' => name.push('_'),
            '.' => {}
            other => name.push(other.to_ascii_lowercase()),
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_joins_words() {
        assert_eq!(channel_name("New York"), "new_york");
    }

    #[test]
    fn strips_periods() {
        assert_eq!(channel_name("St. Louis"), "st_louis");
        assert_eq!(channel_name("Washington D.C."), "washington_dc");
    }

    #[test]
    fn idempotent() {
        for city in ["New York", "St. Louis", "austin", "Kansas City"] {
            let once = channel_name(city);
            assert_eq!(channel_name(&once), once);
        }
    }

    #[test]
    fn empty_input() {
        assert_eq!(channel_name(""), "");
    }
}
