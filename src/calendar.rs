//! Two-month date-range picker.
//!
//! The calendar keeps a month offset relative to the month it was created in
//! and the current [`Selection`]. Every operation rebuilds the whole view; the
//! grids are small and updates are user-paced, so nothing is patched in place.

use tracing::{debug, trace, warn};

use crate::{
    CalendarConfig, DateKey, DayMark, ParseError, Selection, VISIBLE_MONTHS, WEEKDAY_NAMES, YearMonth,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalendarState {
    /// Months away from the month the calendar was created in
    pub month_offset: i32,
    pub selection:    Selection,
}

/// An interactive day in a month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date:    DateKey,
    /// Day number as shown
    pub label:   String,
    pub mark:    DayMark,
    /// `aria-pressed`
    pub pressed: bool,
}

impl DayCell {
    fn new(date: DateKey, selection: &Selection) -> Self {
        let mark = selection.mark_for(date);
        Self {
            date,
            label: date.day().to_string(),
            mark,
            pressed: mark.is_pressed(),
        }
    }

    /// `YYYY-MM-DD` key stored on the cell and handed back on click
    pub fn data_date(&self) -> String {
        self.date.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCell {
    /// Padding before the first of the month
    Blank,
    Day(DayCell),
}

/// One rendered month: header label, weekday row and cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month:    YearMonth,
    /// e.g. "April 2024"
    pub label:    String,
    pub weekdays: [&'static str; 7],
    /// Leading blanks followed by one cell per day
    pub cells:    Vec<GridCell>,
}

impl MonthGrid {
    pub fn build(month: YearMonth, selection: &Selection) -> Self {
        let blanks = usize::from(month.first_weekday().index());
        let first = DateKey::first_of(month);

        let days = (1..=month.days()).filter_map(|day| {
            DateKey::new(first.year_typed(), first.month_typed(), day.try_into().ok()?).ok()
        });

        let cells = std::iter::repeat_n(GridCell::Blank, blanks)
            .chain(days.map(|date| GridCell::Day(DayCell::new(date, selection))))
            .collect();

        Self {
            month,
            label: month.label(),
            weekdays: WEEKDAY_NAMES,
            cells,
        }
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells
            .iter()
            .take_while(|cell| matches!(cell, GridCell::Blank))
            .count()
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(|cell| match cell {
            GridCell::Day(day) => Some(day),
            GridCell::Blank => None,
        })
    }

    pub fn day(&self, day: u8) -> Option<&DayCell> {
        self.days().find(|cell| cell.date.day() == day)
    }
}

/// Everything the page needs to redraw the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    pub months:      Vec<MonthGrid>,
    /// Value for the bound text input
    pub input_value: String,
    /// "First month — second month", when the page has a label element
    pub range_label: Option<String>,
}

impl CalendarView {
    /// Finds the visible cell for `date`, if it is on screen
    pub fn cell(&self, date: DateKey) -> Option<&DayCell> {
        self.months
            .iter()
            .filter(|grid| grid.month == date.year_month())
            .find_map(|grid| grid.day(date.day()))
    }
}

#[derive(Debug, Clone)]
pub struct RangeCalendar {
    anchor:           YearMonth,
    state:            CalendarState,
    config:           CalendarConfig,
    show_range_label: bool,
}

impl RangeCalendar {
    /// Anchors the view at the month containing `today`.
    ///
    /// Near the end of year 9999 the anchor moves back so that every visible
    /// month still exists.
    pub fn new(today: DateKey, config: CalendarConfig) -> Self {
        let current = today.year_month();
        let anchor = if current.offset(VISIBLE_MONTHS - 1).is_some() {
            current
        } else {
            let anchor = current.offset(1 - VISIBLE_MONTHS).unwrap_or(current);
            debug!(%current, %anchor, "calendar anchored before the last supported month");
            anchor
        };
        Self {
            anchor,
            state: CalendarState::default(),
            config,
            show_range_label: true,
        }
    }

    /// Whether views carry a range label; off when the page has no label element.
    #[must_use]
    pub const fn with_range_label(mut self, enabled: bool) -> Self {
        self.show_range_label = enabled;
        self
    }

    pub const fn state(&self) -> CalendarState {
        self.state
    }

    pub const fn month_offset(&self) -> i32 {
        self.state.month_offset
    }

    pub const fn selection(&self) -> Selection {
        self.state.selection
    }

    /// The consecutive months currently on screen
    pub fn visible_months(&self) -> Vec<YearMonth> {
        (0..VISIBLE_MONTHS)
            .filter_map(|i| self.anchor.offset(self.state.month_offset.checked_add(i)?))
            .collect()
    }

    pub fn render(&self) -> CalendarView {
        let selection = self.state.selection;
        let months: Vec<MonthGrid> = self
            .visible_months()
            .into_iter()
            .map(|month| MonthGrid::build(month, &selection))
            .collect();

        trace!(offset = self.state.month_offset, months = months.len(), "calendar rendered");

        CalendarView {
            months,
            input_value: self.input_value(),
            range_label: self.range_label(),
        }
    }

    /// Applies a day click to the selection and rebuilds the view.
    pub fn select(&mut self, date: DateKey) -> CalendarView {
        self.state.selection = self.state.selection.select(date);
        debug!(
            %date,
            start = ?self.state.selection.start(),
            end = ?self.state.selection.end(),
            "calendar selection changed"
        );
        self.render()
    }

    /// Handles a click on a cell carrying `data_date` metadata.
    ///
    /// # Errors
    /// Returns `ParseError` if the metadata is not a valid `YYYY-MM-DD` key;
    /// the selection is left untouched.
    pub fn click_day(&mut self, data_date: &str) -> Result<CalendarView, ParseError> {
        let date = data_date.parse::<DateKey>()?;
        Ok(self.select(date))
    }

    /// Pages forward one month. The selection is kept.
    pub fn next_month(&mut self) -> CalendarView {
        self.shift(1)
    }

    /// Pages back one month. The selection is kept.
    pub fn prev_month(&mut self) -> CalendarView {
        self.shift(-1)
    }

    pub fn input_value(&self) -> String {
        self.state.selection.input_value(&self.config.value_separator)
    }

    pub fn range_label(&self) -> Option<String> {
        if !self.show_range_label {
            return None;
        }
        match self.visible_months().as_slice() {
            [first, second] => Some(format!(
                "{}{}{}",
                first.label(),
                self.config.label_separator,
                second.label()
            )),
            _ => None,
        }
    }

    fn shift(&mut self, delta: i32) -> CalendarView {
        let Some(offset) = self.state.month_offset.checked_add(delta) else {
            warn!(offset = self.state.month_offset, delta, "month offset overflow, navigation ignored");
            return self.render();
        };

        // Both visible months must stay representable
        let fits = offset
            .checked_add(VISIBLE_MONTHS - 1)
            .is_some_and(|end| self.anchor.offset(offset).is_some() && self.anchor.offset(end).is_some());

        if fits {
            self.state.month_offset = offset;
            debug!(offset, "calendar month changed");
        } else {
            warn!(offset = self.state.month_offset, delta, "calendar cannot page past supported years");
        }
        self.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    fn calendar() -> RangeCalendar {
        RangeCalendar::new(date(2024, 3, 15), CalendarConfig::default())
    }

    fn ym(year: u16, month: u8) -> YearMonth {
        YearMonth::from_numbers(year, month).unwrap()
    }

    #[test]
    fn test_initial_render_shows_current_and_next_month() {
        let view = calendar().render();

        assert_eq!(view.months.len(), 2);
        assert_eq!(view.months[0].label, "March 2024");
        assert_eq!(view.months[1].label, "April 2024");
        assert_eq!(view.range_label.as_deref(), Some("March 2024 \u{2014} April 2024"));
        assert_eq!(view.input_value, "");
    }

    #[test]
    fn test_month_grid_shape() {
        struct TestCase {
            month:  YearMonth,
            blanks: usize,
            days:   usize,
        }

        let cases = [
            // 30 days starting on a Wednesday
            TestCase {
                month:  ym(2023, 11),
                blanks: 3,
                days:   30,
            },
            // Starts on a Sunday
            TestCase {
                month:  ym(2024, 9),
                blanks: 0,
                days:   30,
            },
            // Leap February starting on a Thursday
            TestCase {
                month:  ym(2024, 2),
                blanks: 4,
                days:   29,
            },
            // Starts on a Saturday
            TestCase {
                month:  ym(2025, 3),
                blanks: 6,
                days:   31,
            },
        ];

        for case in &cases {
            let grid = MonthGrid::build(case.month, &Selection::Empty);
            assert_eq!(grid.leading_blanks(), case.blanks, "{}", case.month);
            assert_eq!(grid.days().count(), case.days, "{}", case.month);
            assert_eq!(grid.cells.len(), case.blanks + case.days, "{}", case.month);
        }
    }

    #[test]
    fn test_month_grid_headers_and_cells() {
        let grid = MonthGrid::build(ym(2023, 11), &Selection::Empty);

        assert_eq!(grid.label, "November 2023");
        assert_eq!(grid.weekdays, ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]);

        let first = grid.day(1).unwrap();
        assert_eq!(first.label, "1");
        assert_eq!(first.data_date(), "2023-11-01");
        assert_eq!(first.mark, DayMark::None);
        assert!(!first.pressed);
        assert!(matches!(grid.cells[3], GridCell::Day(_)));
        assert!(matches!(grid.cells[2], GridCell::Blank));
    }

    #[test]
    fn test_first_click_sets_start_and_input() {
        let mut calendar = calendar();
        let view = calendar.select(date(2024, 4, 20));

        assert_eq!(calendar.selection().start(), Some(date(2024, 4, 20)));
        assert_eq!(calendar.selection().end(), None);
        assert_eq!(view.input_value, "Apr 20, 2024");

        let cell = view.cell(date(2024, 4, 20)).unwrap();
        assert_eq!(cell.mark, DayMark::RangeStart);
        assert!(cell.pressed);
    }

    #[test]
    fn test_second_click_before_start_swaps() {
        let mut calendar = calendar();
        calendar.select(date(2024, 3, 10));
        let view = calendar.select(date(2024, 3, 5));

        assert_eq!(calendar.selection().start(), Some(date(2024, 3, 5)));
        assert_eq!(calendar.selection().end(), Some(date(2024, 3, 10)));
        assert_eq!(view.input_value, "Mar 5, 2024 \u{2013} Mar 10, 2024");
    }

    #[test]
    fn test_third_click_restarts_range() {
        let mut calendar = calendar();
        calendar.select(date(2024, 3, 5));
        calendar.select(date(2024, 3, 9));
        let view = calendar.select(date(2024, 3, 20));

        assert_eq!(calendar.selection(), Selection::Start(date(2024, 3, 20)));
        assert_eq!(view.input_value, "Mar 20, 2024");
        assert_eq!(view.cell(date(2024, 3, 9)).unwrap().mark, DayMark::None);
    }

    #[test]
    fn test_in_range_marking() {
        let mut calendar = calendar();
        calendar.select(date(2024, 3, 5));
        let view = calendar.select(date(2024, 3, 9));

        let mark = |day| view.cell(date(2024, 3, day)).unwrap().mark;
        assert_eq!(mark(5), DayMark::RangeStart);
        assert_eq!(mark(7), DayMark::InRange);
        assert_eq!(mark(9), DayMark::RangeEnd);
        assert_eq!(mark(10), DayMark::None);
        assert_eq!(mark(4), DayMark::None);

        let pressed: Vec<_> = view
            .months
            .iter()
            .flat_map(MonthGrid::days)
            .filter(|cell| cell.pressed)
            .map(|cell| cell.date)
            .collect();
        assert_eq!(pressed, vec![date(2024, 3, 5), date(2024, 3, 9)]);
    }

    #[test]
    fn test_range_spans_both_months() {
        let mut calendar = calendar();
        calendar.select(date(2024, 4, 2));
        let view = calendar.select(date(2024, 3, 30));

        assert_eq!(view.cell(date(2024, 3, 30)).unwrap().mark, DayMark::RangeStart);
        assert_eq!(view.cell(date(2024, 3, 31)).unwrap().mark, DayMark::InRange);
        assert_eq!(view.cell(date(2024, 4, 1)).unwrap().mark, DayMark::InRange);
        assert_eq!(view.cell(date(2024, 4, 2)).unwrap().mark, DayMark::RangeEnd);
    }

    #[test]
    fn test_click_day_parses_cell_metadata() {
        let mut calendar = calendar();
        let view = calendar.click_day("2024-04-20").unwrap();
        assert_eq!(view.input_value, "Apr 20, 2024");

        assert!(calendar.click_day("April 20").is_err());
        assert_eq!(calendar.selection(), Selection::Start(date(2024, 4, 20)));
    }

    #[test]
    fn test_navigation_round_trip_keeps_selection() {
        let mut calendar = calendar();
        calendar.select(date(2024, 3, 5));
        calendar.select(date(2024, 3, 9));
        let selection = calendar.selection();
        let original = calendar.render();

        for _ in 0..3 {
            calendar.next_month();
            assert_eq!(calendar.selection(), selection);
        }
        assert_eq!(calendar.month_offset(), 3);
        assert_eq!(calendar.render().months[0].label, "June 2024");

        for _ in 0..3 {
            calendar.prev_month();
            assert_eq!(calendar.selection(), selection);
        }
        assert_eq!(calendar.month_offset(), 0);
        assert_eq!(calendar.render(), original);
    }

    #[test]
    fn test_navigation_across_year_boundary() {
        let mut calendar = RangeCalendar::new(date(2024, 12, 1), CalendarConfig::default());
        let view = calendar.render();
        assert_eq!(view.range_label.as_deref(), Some("December 2024 \u{2014} January 2025"));

        let view = calendar.prev_month();
        assert_eq!(view.range_label.as_deref(), Some("November 2024 \u{2014} December 2024"));
        assert_eq!(calendar.month_offset(), -1);
    }

    #[test]
    fn test_selection_scrolled_out_of_view_persists() {
        let mut calendar = calendar();
        calendar.select(date(2024, 3, 5));
        let view = calendar.next_month();

        assert_eq!(view.cell(date(2024, 3, 5)), None);
        assert_eq!(view.input_value, "Mar 5, 2024");

        let view = calendar.select(date(2024, 5, 1));
        assert_eq!(view.input_value, "Mar 5, 2024 \u{2013} May 1, 2024");
        assert_eq!(view.cell(date(2024, 4, 15)).unwrap().mark, DayMark::InRange);
    }

    #[test]
    fn test_range_label_disabled() {
        let calendar = calendar().with_range_label(false);
        assert_eq!(calendar.render().range_label, None);
        assert_eq!(calendar.range_label(), None);
    }

    #[test]
    fn test_navigation_stops_at_supported_years() {
        let mut calendar = RangeCalendar::new(date(9999, 11, 3), CalendarConfig::default());
        calendar.next_month();
        assert_eq!(calendar.month_offset(), 0);
        assert_eq!(calendar.range_label().as_deref(), Some("November 9999 \u{2014} December 9999"));

        let mut calendar = RangeCalendar::new(date(1, 1, 3), CalendarConfig::default());
        calendar.prev_month();
        assert_eq!(calendar.month_offset(), 0);
    }

    #[test]
    fn test_last_supported_month_shows_two_months() {
        struct TestCase {
            today:       DateKey,
            first:       YearMonth,
            label:       &'static str,
            description: &'static str,
        }

        let cases = [
            TestCase {
                today:       date(9999, 12, 3),
                first:       ym(9999, 11),
                label:       "November 9999 \u{2014} December 9999",
                description: "December 9999 is shown as the second month",
            },
            TestCase {
                today:       date(9999, 11, 30),
                first:       ym(9999, 11),
                label:       "November 9999 \u{2014} December 9999",
                description: "November 9999 is unchanged",
            },
            TestCase {
                today:       date(1, 1, 1),
                first:       ym(1, 1),
                label:       "January 1 \u{2014} February 1",
                description: "earliest month is unchanged",
            },
        ];

        for case in &cases {
            let mut calendar = RangeCalendar::new(case.today, CalendarConfig::default());
            let view = calendar.render();
            assert_eq!(view.months.len(), 2, "{}", case.description);
            assert_eq!(view.months[0].month, case.first, "{}", case.description);
            assert_eq!(view.range_label.as_deref(), Some(case.label), "{}", case.description);

            // The current day is still selectable
            let view = calendar.select(case.today);
            assert_eq!(view.cell(case.today).map(|cell| cell.mark), Some(DayMark::RangeStart), "{}", case.description);
        }
    }

    #[test]
    fn test_custom_separators() {
        let config = CalendarConfig {
            value_separator: " to ".to_owned(),
            label_separator: " / ".to_owned(),
        };
        let mut calendar = RangeCalendar::new(date(2024, 3, 15), config);
        calendar.select(date(2024, 3, 1));
        let view = calendar.select(date(2024, 3, 2));

        assert_eq!(view.input_value, "Mar 1, 2024 to Mar 2, 2024");
        assert_eq!(view.range_label.as_deref(), Some("March 2024 / April 2024"));
    }
}
