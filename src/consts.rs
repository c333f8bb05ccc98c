/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Long US English month names (index 0 is unused)
pub const MONTH_NAMES: [&str; 13] = [
    "",
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Weekday header row, Sunday first
pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Number of columns in a month grid
pub const DAYS_PER_WEEK: u8 = 7;

/// Number of consecutive months the range calendar shows
pub const VISIBLE_MONTHS: i32 = 2;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';

/// Joins start and end in the bound text input
pub const VALUE_SEPARATOR: &str = " \u{2013} ";
/// Joins the two month labels in the range label
pub const LABEL_SEPARATOR: &str = " \u{2014} ";

/// Width marker present in gallery thumbnail URLs
pub const THUMBNAIL_MARKER: &str = "w=600";
/// Width marker substituted for the full-resolution lightbox image
pub const FULL_RESOLUTION_MARKER: &str = "w=1400";

/// Class toggled on the lightbox overlay while it is open
pub const OPEN_CLASS: &str = "open";
