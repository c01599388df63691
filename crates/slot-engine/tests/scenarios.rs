//! End-to-end operator flows: generate, edit, clear.

use chrono::{NaiveDate, TimeZone, Utc};
use slot_engine::date_range::cycle_end_str;
use slot_engine::time_grid::add_minutes;
use slot_engine::{
    BatchSchedule, GenerateRequest, ScheduleConfig, ScheduleState, SlotStatus, TimeOfDay,
};

fn default_schedule() -> BatchSchedule {
    let mut schedule = BatchSchedule::new();
    schedule
        .generate(&GenerateRequest {
            count: 4,
            duration_minutes: 120,
            seat_capacity: 50,
            open_time: TimeOfDay::parse("06:00").unwrap(),
            cycle_start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            price: 1000,
        })
        .unwrap();
    schedule
}

fn spans(schedule: &BatchSchedule) -> Vec<String> {
    schedule
        .slots()
        .iter()
        .map(|s| format!("{}-{}", s.start_time, s.end_time))
        .collect()
}

#[test]
fn generates_four_two_hour_batches() {
    let schedule = default_schedule();
    assert_eq!(
        spans(&schedule),
        ["06:00-08:00", "08:00-10:00", "10:00-12:00", "12:00-14:00"]
    );
    for slot in schedule.slots() {
        assert_eq!(slot.cycle_end_date.to_string(), "2024-01-31");
    }
}

#[test]
fn midnight_wraparound_and_leap_cycle() {
    assert_eq!(add_minutes("23:30", 60).unwrap(), "00:30");
    assert_eq!(cycle_end_str("2024-01-01").unwrap(), "2024-01-31");
    assert_eq!(cycle_end_str("2024-02-01").unwrap(), "2024-02-29");
}

#[test]
fn start_edit_rounding_up_to_predecessor_end_is_valid() {
    let mut schedule = default_schedule();
    assert_eq!(schedule.edit_start(1, "07:45").unwrap(), SlotStatus::Valid);
    assert_eq!(schedule.slot(1).unwrap().start_time.to_string(), "08:00");
    assert!(schedule.flag(1).is_none());
}

#[test]
fn start_edit_before_predecessor_end_is_clamped_and_flagged() {
    let mut schedule = default_schedule();
    assert_eq!(schedule.edit_start(2, "09:00").unwrap(), SlotStatus::Flagged);
    assert_eq!(schedule.slot(2).unwrap().start_time.to_string(), "10:00");
    assert_eq!(
        schedule.flag(2).unwrap().to_string(),
        "start time cannot precede previous slot's end time"
    );
}

#[test]
fn invalid_price_is_ignored() {
    let mut schedule = default_schedule();
    assert!(schedule.edit_price(0, "abc").is_err());
    assert_eq!(schedule.slot(0).unwrap().price, 1000);
}

#[test]
fn operator_session_from_form() {
    let now = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();

    let mut config = ScheduleConfig::default();
    config.set_total_batches("3").unwrap();
    config.set_duration_hours("1").unwrap();
    assert!(config.set_seats_per_batch("lots").is_err());
    config.set_facility_open_time("17:40").unwrap();
    assert_eq!(config.cycle_end_preview(now).unwrap().to_string(), "2024-02-29");

    let mut schedule = BatchSchedule::new();
    assert_eq!(schedule.state(), ScheduleState::Empty);
    schedule.generate_from_config(&config, now).unwrap();
    assert_eq!(schedule.state(), ScheduleState::Populated);
    assert_eq!(spans(&schedule), ["17:30-18:30", "18:30-19:30", "19:30-20:30"]);
    assert!(schedule.slots().iter().all(|s| s.seat_capacity == 50));

    schedule.edit_start(1, "18:00").unwrap();
    schedule.edit_end(2, "21:10").unwrap();
    schedule.edit_price(2, "1200").unwrap();
    assert_eq!(spans(&schedule), ["17:30-18:30", "18:30-19:30", "19:30-21:00"]);
    assert_eq!(
        schedule.flags().map(|(i, _)| i).collect::<Vec<_>>(),
        vec![1]
    );
    assert_eq!(schedule.slot(2).unwrap().price, 1200);

    // regenerating wipes edits and flags
    schedule.generate_from_config(&config, now).unwrap();
    assert_eq!(schedule.flags().count(), 0);
    assert_eq!(schedule.slot(2).unwrap().price, 1000);

    schedule.clear();
    assert_eq!(schedule.state(), ScheduleState::Empty);
}
