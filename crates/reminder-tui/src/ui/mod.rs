//! Terminal screens for Today's Reminders.

pub mod app;
pub mod footer;
pub mod header;
pub mod reminder_list;
pub mod time_picker;
pub mod toast;
