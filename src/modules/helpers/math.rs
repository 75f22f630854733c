use crate::errors::{CustomResult, Error};

pub struct Math {}
impl Math {
    /// # parse a number and drop the fraction
    /// the api sends grid positions and points as text, sometimes with a fraction (`"0.5"`).
    /// the fraction is truncated like an integer cast would.
    ///
    /// ## Arguments
    /// * `field` - name of the field, used in the error
    /// * `value` - the text to parse
    ///
    /// ## Returns
    /// * `i32` - the whole number, never negative
    pub fn parse_whole_number(field: &'static str, value: &str) -> CustomResult<i32> {
        let invalid = || Error::InvalidField { field, value: value.to_string() };

        let number: f64 = value.trim().parse().map_err(|_| invalid())?;
        if !number.is_finite() || number < 0.0 || number > i32::MAX as f64 {
            return Err(invalid());
        }

        Ok(number.trunc() as i32)
    }

    /// # parse a lap time to milliseconds
    /// accepts `m:ss.fff` as well as plain seconds (`ss.fff`)
    pub fn parse_lap_time_ms(value: &str) -> CustomResult<u64> {
        let invalid = || Error::InvalidField { field: "lap_time", value: value.to_string() };

        let (minutes, seconds) = match value.trim().split_once(':') {
            Some((m, s)) => (m.parse::<u64>().map_err(|_| invalid())?, s),
            None => (0, value.trim()),
        };
        let seconds: f64 = seconds.parse().map_err(|_| invalid())?;
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(invalid());
        }

        minutes
            .checked_mul(60_000)
            .and_then(|ms| ms.checked_add((seconds * 1000.0).round() as u64))
            .ok_or_else(invalid)
    }

    pub fn format_lap_time(ms: u64) -> String {
        let minutes = ms / 60_000;
        let seconds = (ms % 60_000) / 1000;
        let millis = ms % 1000;
        format!("{minutes}:{seconds:02}.{millis:03}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_are_truncated() {
        assert_eq!(Math::parse_whole_number("points", "25").unwrap(), 25);
        assert_eq!(Math::parse_whole_number("points", "0.5").unwrap(), 0);
        assert_eq!(Math::parse_whole_number("points", "12.0").unwrap(), 12);
        assert_eq!(Math::parse_whole_number("grid", "0").unwrap(), 0);
    }

    #[test]
    fn invalid_whole_numbers_are_rejected() {
        assert!(Math::parse_whole_number("points", "-1").is_err());
        assert!(Math::parse_whole_number("points", "").is_err());
        assert!(Math::parse_whole_number("grid", "P1").is_err());
        assert!(Math::parse_whole_number("grid", "NaN").is_err());
    }

    #[test]
    fn lap_times() {
        assert_eq!(Math::parse_lap_time_ms("1:22.167").unwrap(), 82_167);
        assert_eq!(Math::parse_lap_time_ms("59.001").unwrap(), 59_001);
        assert!(Math::parse_lap_time_ms("1:xx").is_err());
        assert!(Math::parse_lap_time_ms("18446744073709551615:01.000").is_err());
        assert_eq!(Math::format_lap_time(82_167), "1:22.167");
        assert_eq!(Math::format_lap_time(59_001), "0:59.001");
    }
}
