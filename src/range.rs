use crate::DateKey;

/// An inclusive range between two dates.
/// The start date is always less than or equal to the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateRange {
    start: DateKey,
    end:   DateKey,
}

impl DateRange {
    /// Creates a range from two dates in either order, swapping them if needed
    pub fn ordered(a: DateKey, b: DateKey) -> Self {
        if b < a {
            Self { start: b, end: a }
        } else {
            Self { start: a, end: b }
        }
    }

    pub const fn start(&self) -> DateKey {
        self.start
    }

    pub const fn end(&self) -> DateKey {
        self.end
    }

    /// Open interval: endpoints are excluded
    pub fn strictly_contains(&self, date: &DateKey) -> bool {
        self.start < *date && *date < self.end
    }
}

/// The range picker's selection: nothing, a start day, or a full range.
///
/// Every day click goes through [`Selection::select`]:
/// - nothing selected: the click becomes the start
/// - start only: the click becomes the other end, swapped if it is earlier
/// - full range: the click starts over as a new start
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    #[default]
    Empty,
    Start(DateKey),
    Range(DateRange),
}

impl Selection {
    #[must_use]
    pub fn select(self, date: DateKey) -> Self {
        match self {
            Self::Empty | Self::Range(_) => Self::Start(date),
            Self::Start(start) => Self::Range(DateRange::ordered(start, date)),
        }
    }

    pub const fn start(&self) -> Option<DateKey> {
        match self {
            Self::Empty => None,
            Self::Start(start) => Some(*start),
            Self::Range(range) => Some(range.start()),
        }
    }

    pub const fn end(&self) -> Option<DateKey> {
        match self {
            Self::Empty | Self::Start(_) => None,
            Self::Range(range) => Some(range.end()),
        }
    }

    /// How the cell for `date` should be marked.
    /// When start and end are the same day only the start mark applies.
    pub fn mark_for(&self, date: DateKey) -> DayMark {
        match self {
            Self::Empty => DayMark::None,
            Self::Start(start) if *start == date => DayMark::RangeStart,
            Self::Start(_) => DayMark::None,
            Self::Range(range) => {
                if range.start() == date {
                    DayMark::RangeStart
                } else if range.end() == date {
                    DayMark::RangeEnd
                } else if range.strictly_contains(&date) {
                    DayMark::InRange
                } else {
                    DayMark::None
                }
            }
        }
    }

    /// Text for the bound input: empty, one short date, or both joined by `separator`
    pub fn input_value(&self, separator: &str) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Start(start) => start.short_label(),
            Self::Range(range) => format!(
                "{}{separator}{}",
                range.start().short_label(),
                range.end().short_label()
            ),
        }
    }
}

/// Visual state of a single day cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DayMark {
    #[default]
    None,
    RangeStart,
    RangeEnd,
    InRange,
}

impl DayMark {
    /// Class added to the cell, if any
    pub const fn class_name(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::RangeStart => Some("range-start"),
            Self::RangeEnd => Some("range-end"),
            Self::InRange => Some("in-range"),
        }
    }

    /// `aria-pressed`: only the endpoints count as pressed
    pub const fn is_pressed(self) -> bool {
        matches!(self, Self::RangeStart | Self::RangeEnd)
    }
}
