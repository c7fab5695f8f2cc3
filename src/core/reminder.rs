//! # Next-Session Reminder
//!
//! The confirmed "next session" date-time and the reschedule dialog that edits
//! a tentative copy of it.
//!
//! ```text
//! open()    confirmed ──snapshot──▶ tentative
//! pick_*()                          tentative' (hour/minute kept on date change)
//! confirm() confirmed ◀─────────── tentative   (only if tentative is set)
//! cancel()                          tentative dropped
//! ```

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Slots per hour in the time catalog.
const SLOTS_PER_HOUR: u32 = 4;
const SLOT_MINUTES: u32 = 60 / SLOTS_PER_HOUR;

/// Hour used when a date is picked and no time was chosen yet.
const DEFAULT_HOUR: u32 = 9;

/// Days ahead of today for the initial reminder.
const DEFAULT_LEAD_DAYS: u64 = 7;

/// A discrete time-of-day choice from the 15-minute catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeSlot {
    pub hour: u32,
    pub minute: u32,
}

impl TimeSlot {
    pub fn time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }

    /// `"HH:MM"`, as listed in the selector.
    pub fn label(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }

    /// Position of this slot in [`time_slots`], if it is on the grid.
    pub fn index(&self) -> Option<usize> {
        (self.hour < 24 && self.minute % SLOT_MINUTES == 0 && self.minute < 60)
            .then(|| (self.hour * SLOTS_PER_HOUR + self.minute / SLOT_MINUTES) as usize)
    }

    /// The slot for a date-time, if its time lies on the 15-minute grid.
    pub fn of(dt: &NaiveDateTime) -> Option<TimeSlot> {
        let slot = TimeSlot {
            hour: dt.hour(),
            minute: dt.minute(),
        };
        (dt.second() == 0 && slot.index().is_some()).then_some(slot)
    }
}

/// All 96 selectable times: 00:00, 00:15, … 23:45.
pub fn time_slots() -> Vec<TimeSlot> {
    (0..24 * SLOTS_PER_HOUR)
        .map(|i| TimeSlot {
            hour: i / SLOTS_PER_HOUR,
            minute: (i % SLOTS_PER_HOUR) * SLOT_MINUTES,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledReminder {
    pub date: NaiveDateTime,
}

impl ScheduledReminder {
    /// One week from `today`, at 09:00.
    pub fn default_from(today: NaiveDate) -> Self {
        let day = today
            .checked_add_days(Days::new(DEFAULT_LEAD_DAYS))
            .unwrap_or(today);
        Self {
            date: day.and_time(default_time()),
        }
    }

    /// `"Oct 23, 2026 at 9:00 AM"`
    pub fn display(&self) -> String {
        self.date.format("%b %-d, %Y at %-I:%M %p").to_string()
    }
}

fn default_time() -> NaiveTime {
    NaiveTime::from_hms_opt(DEFAULT_HOUR, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Editing state while the reschedule dialog is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RescheduleDialog {
    pub tentative: Option<NaiveDateTime>,
}

impl RescheduleDialog {
    pub fn can_confirm(&self) -> bool {
        self.tentative.is_some()
    }

    /// Move to `date`, keeping the tentative hour and minute.
    pub fn pick_date(&mut self, date: NaiveDate) {
        let time = self
            .tentative
            .map(|dt| dt.time())
            .unwrap_or_else(default_time);
        self.tentative = Some(date.and_time(time));
    }

    /// Set the time of day. Without a tentative date, `today` is used.
    pub fn pick_time(&mut self, slot: TimeSlot, today: NaiveDate) {
        let date = self.tentative.map(|dt| dt.date()).unwrap_or(today);
        self.tentative = Some(date.and_time(slot.time()));
    }

    pub fn clear(&mut self) {
        self.tentative = None;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub confirmed: ScheduledReminder,
    pub dialog: Option<RescheduleDialog>,
}

impl Reminder {
    pub fn new(confirmed: ScheduledReminder) -> Self {
        Self {
            confirmed,
            dialog: None,
        }
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog.is_some()
    }

    /// Open the dialog with a snapshot of the confirmed value.
    pub fn open(&mut self) {
        self.dialog = Some(RescheduleDialog {
            tentative: Some(self.confirmed.date),
        });
    }

    pub fn pick_date(&mut self, date: NaiveDate) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.pick_date(date);
        }
    }

    pub fn pick_time(&mut self, slot: TimeSlot, today: NaiveDate) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.pick_time(slot, today);
        }
    }

    pub fn clear_tentative(&mut self) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.clear();
        }
    }

    /// Commit the tentative value and close. A no-op (dialog stays open)
    /// when nothing is selected. Returns whether the reminder changed hands.
    pub fn confirm(&mut self) -> bool {
        match self.dialog.and_then(|d| d.tentative) {
            Some(date) => {
                self.confirmed = ScheduledReminder { date };
                self.dialog = None;
                true
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.dialog = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reminder() -> Reminder {
        Reminder::new(ScheduledReminder::default_from(day(2026, 10, 16)))
    }

    #[test]
    fn test_default_is_one_week_at_nine() {
        let r = ScheduledReminder::default_from(day(2026, 10, 16));
        assert_eq!(r.date, day(2026, 10, 23).and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(r.display(), "Oct 23, 2026 at 9:00 AM");
    }

    #[test]
    fn test_open_then_cancel_keeps_confirmed() {
        let mut r = reminder();
        let before = r.confirmed;
        r.open();
        r.pick_date(day(2026, 12, 1));
        r.cancel();
        assert!(!r.is_dialog_open());
        assert_eq!(r.confirmed, before);
    }

    #[test]
    fn test_open_snapshots_confirmed() {
        let mut r = reminder();
        r.open();
        assert_eq!(r.dialog.unwrap().tentative, Some(r.confirmed.date));
    }

    #[test]
    fn test_pick_and_confirm_updates_exactly() {
        let mut r = reminder();
        r.open();
        r.pick_date(day(2026, 11, 2));
        r.pick_time(TimeSlot { hour: 14, minute: 45 }, day(2026, 10, 16));
        assert!(r.confirm());
        assert!(!r.is_dialog_open());
        assert_eq!(r.confirmed.date, day(2026, 11, 2).and_hms_opt(14, 45, 0).unwrap());
    }

    #[test]
    fn test_pick_date_preserves_time() {
        let mut r = reminder();
        r.open();
        r.pick_time(TimeSlot { hour: 17, minute: 30 }, day(2026, 10, 16));
        r.pick_date(day(2027, 1, 4));
        assert_eq!(
            r.dialog.unwrap().tentative,
            Some(day(2027, 1, 4).and_hms_opt(17, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_midnight_is_preserved_on_date_change() {
        let mut r = reminder();
        r.open();
        r.pick_time(TimeSlot { hour: 0, minute: 0 }, day(2026, 10, 16));
        r.pick_date(day(2026, 10, 30));
        assert_eq!(
            r.dialog.unwrap().tentative,
            Some(day(2026, 10, 30).and_hms_opt(0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_confirm_without_tentative_is_noop() {
        let mut r = reminder();
        let before = r.confirmed;
        r.open();
        r.clear_tentative();
        assert!(!r.dialog.unwrap().can_confirm());
        assert!(!r.confirm());
        assert!(r.is_dialog_open());
        assert_eq!(r.confirmed, before);
    }

    #[test]
    fn test_pick_date_after_clear_defaults_to_nine() {
        let mut r = reminder();
        r.open();
        r.clear_tentative();
        r.pick_date(day(2026, 10, 20));
        assert_eq!(
            r.dialog.unwrap().tentative,
            Some(day(2026, 10, 20).and_hms_opt(9, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_pick_time_after_clear_uses_today() {
        let mut r = reminder();
        r.open();
        r.clear_tentative();
        r.pick_time(TimeSlot { hour: 8, minute: 15 }, day(2026, 10, 16));
        assert_eq!(
            r.dialog.unwrap().tentative,
            Some(day(2026, 10, 16).and_hms_opt(8, 15, 0).unwrap())
        );
    }

    #[test]
    fn test_picks_ignored_when_closed() {
        let mut r = reminder();
        r.pick_date(day(2030, 1, 1));
        assert!(!r.confirm());
        assert!(!r.is_dialog_open());
    }

    #[test]
    fn test_time_catalog() {
        let slots = time_slots();
        assert_eq!(slots.len(), 96);
        assert_eq!(slots[0].label(), "00:00");
        assert_eq!(slots[1].label(), "00:15");
        assert_eq!(slots[95].label(), "23:45");
        for (i, slot) in slots.iter().enumerate() {
            assert_eq!(slot.index(), Some(i));
        }
        assert_eq!(TimeSlot { hour: 9, minute: 10 }.index(), None);
    }

    #[test]
    fn test_slot_of_datetime() {
        let dt = day(2026, 1, 1).and_hms_opt(13, 15, 0).unwrap();
        assert_eq!(TimeSlot::of(&dt), Some(TimeSlot { hour: 13, minute: 15 }));
        let off_grid = day(2026, 1, 1).and_hms_opt(13, 16, 0).unwrap();
        assert_eq!(TimeSlot::of(&off_grid), None);
    }
}
