//! Wires both widgets to the elements a page actually has.
//!
//! A widget whose required elements are missing is simply not created, and
//! events aimed at absent controls are dropped.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    CalendarView, Clock, Control, ImageList, Key, Lightbox, LightboxView, RangeCalendar, WidgetConfig,
};

/// Which optional collaborators exist on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageElements {
    pub lightbox:          bool,
    pub lightbox_image:    bool,
    pub lightbox_caption:  bool,
    pub lightbox_close:    bool,
    pub lightbox_backdrop: bool,
    pub lightbox_prev:     bool,
    pub lightbox_next:     bool,
    pub calendar_root:     bool,
    pub dates_input:       bool,
    pub calendar_prev:     bool,
    pub calendar_next:     bool,
    pub range_label:       bool,
}

impl PageElements {
    /// A page with every element present
    pub const fn complete() -> Self {
        Self {
            lightbox:          true,
            lightbox_image:    true,
            lightbox_caption:  true,
            lightbox_close:    true,
            lightbox_backdrop: true,
            lightbox_prev:     true,
            lightbox_next:     true,
            calendar_root:     true,
            dates_input:       true,
            calendar_prev:     true,
            calendar_next:     true,
            range_label:       true,
        }
    }

    const fn has_lightbox(&self) -> bool {
        self.lightbox && self.lightbox_image && self.lightbox_caption
    }

    const fn has_calendar(&self) -> bool {
        self.calendar_root && self.dates_input
    }
}

/// Element an event was dispatched on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    GalleryImage(usize),
    LightboxClose,
    LightboxBackdrop,
    LightboxPrev,
    LightboxNext,
    CalendarPrev,
    CalendarNext,
    /// A day cell, carrying its `YYYY-MM-DD` metadata
    CalendarDay(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Click(Target),
    /// Document-wide key press
    KeyDown(Key),
}

/// Presentation change resulting from an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    Lightbox(LightboxView),
    Calendar(CalendarView),
}

#[derive(Debug, Clone)]
pub struct Page {
    elements: PageElements,
    lightbox: Option<Lightbox>,
    calendar: Option<RangeCalendar>,
}

impl Page {
    /// Builds whichever widgets the page can support.
    pub fn init(elements: PageElements, images: ImageList, clock: &impl Clock, config: WidgetConfig) -> Self {
        let lightbox = if elements.has_lightbox() {
            Lightbox::new(images, config.lightbox)
        } else {
            debug!("lightbox elements missing, lightbox disabled");
            None
        };

        let calendar = if elements.has_calendar() {
            match clock.today() {
                Ok(today) => Some(RangeCalendar::new(today, config.calendar).with_range_label(elements.range_label)),
                Err(err) => {
                    warn!(%err, "current date unavailable, calendar disabled");
                    None
                }
            }
        } else {
            debug!("calendar elements missing, calendar disabled");
            None
        };

        info!(
            lightbox = lightbox.is_some(),
            calendar = calendar.is_some(),
            "page widgets initialized"
        );

        Self {
            elements,
            lightbox,
            calendar,
        }
    }

    pub const fn lightbox(&self) -> Option<&Lightbox> {
        self.lightbox.as_ref()
    }

    pub const fn calendar(&self) -> Option<&RangeCalendar> {
        self.calendar.as_ref()
    }

    /// First render of the calendar, done once the page is ready
    pub fn initial_calendar_view(&self) -> Option<CalendarView> {
        self.calendar.as_ref().map(RangeCalendar::render)
    }

    /// Routes an event to its widget. `None` means nothing to redraw.
    pub fn dispatch(&mut self, event: Event) -> Option<Update> {
        match event {
            Event::KeyDown(key) => self.lightbox.as_mut()?.handle_key(key).map(Update::Lightbox),
            Event::Click(target) => self.click(target),
        }
    }

    fn click(&mut self, target: Target) -> Option<Update> {
        let elements = self.elements;
        let control = match target {
            Target::GalleryImage(index) => Control::Image(index),
            Target::LightboxClose if elements.lightbox_close => Control::Close,
            Target::LightboxBackdrop if elements.lightbox_backdrop => Control::Backdrop,
            Target::LightboxPrev if elements.lightbox_prev => Control::Prev,
            Target::LightboxNext if elements.lightbox_next => Control::Next,
            Target::CalendarPrev if elements.calendar_prev => {
                return self.calendar.as_mut().map(|c| Update::Calendar(c.prev_month()));
            }
            Target::CalendarNext if elements.calendar_next => {
                return self.calendar.as_mut().map(|c| Update::Calendar(c.next_month()));
            }
            Target::CalendarDay(data_date) => {
                let calendar = self.calendar.as_mut()?;
                return match calendar.click_day(&data_date) {
                    Ok(view) => Some(Update::Calendar(view)),
                    Err(err) => {
                        warn!(%err, data_date = %data_date, "day cell carries an invalid date");
                        None
                    }
                };
            }
            other => {
                debug!(?other, "click on absent control ignored");
                return None;
            }
        };
        self.lightbox.as_mut()?.handle_click(control).map(Update::Lightbox)
    }
}
