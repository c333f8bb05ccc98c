use crate::{DateKey, ParseError};

/// Source of the real-world current date the calendar is anchored to.
pub trait Clock {
    /// # Errors
    /// Returns `ParseError` if the current date is not representable.
    fn today(&self) -> Result<DateKey, ParseError>;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Result<DateKey, ParseError> {
        DateKey::try_from(chrono::Local::now().date_naive())
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateKey);

impl Clock for FixedClock {
    fn today(&self) -> Result<DateKey, ParseError> {
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(date(2024, 4, 20));
        assert_eq!(clock.today().unwrap(), date(2024, 4, 20));
    }

    #[test]
    fn test_system_clock_matches_chrono() {
        let before = chrono::Local::now().date_naive();
        let today = SystemClock.today().unwrap();
        let after = chrono::Local::now().date_naive();

        let key = |d: chrono::NaiveDate| DateKey::try_from(d).unwrap();
        assert!(key(before) <= today && today <= key(after));
    }
}
