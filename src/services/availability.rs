//! Slot availability computation.
//!
//! Everything here derives ephemeral [`Slot`] values from an employee's
//! configured working hours, existing bookings, blocks and a service
//! duration. The resolver itself is a pure function over explicitly passed
//! data; only [`AvailabilityService`] touches storage.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::{
    config::BookingConfig,
    error::{AppError, AppResult},
    models::{
        booking::BookingWindow,
        slot::{Slot, SlotQuery},
        working_hours::{Weekday, WorkingHours},
    },
    repository::Repository,
};

/// Lazy sequence of consecutive fixed-size windows inside `[start, end)`.
///
/// Windows are contiguous and exactly `step` long; a final partial window is
/// never emitted. A non-positive step or an empty range yields nothing.
#[derive(Debug, Clone)]
pub struct SubIntervals {
    cursor: NaiveDateTime,
    end: NaiveDateTime,
    step: Duration,
}

impl Iterator for SubIntervals {
    type Item = (NaiveDateTime, NaiveDateTime);

    fn next(&mut self) -> Option<Self::Item> {
        if self.step <= Duration::zero() {
            return None;
        }
        let next_end = self.cursor + self.step;
        if next_end > self.end {
            return None;
        }
        let window = (self.cursor, next_end);
        self.cursor = next_end;
        Some(window)
    }
}

/// Sub-intervals of exactly `step` length within `[start, end)`
pub fn subintervals(start: NaiveDateTime, end: NaiveDateTime, step: Duration) -> SubIntervals {
    SubIntervals {
        cursor: start,
        end,
        step,
    }
}

/// How many atomic steps a service spans (`ceil(duration / step)`).
///
/// Informational only; the overlap tests below always use exact timestamps.
pub fn steps_spanned(duration: Duration, step: Duration) -> i64 {
    let step_minutes = step.num_minutes();
    if step_minutes <= 0 {
        return 0;
    }
    let duration_minutes = duration.num_minutes();
    (duration_minutes + step_minutes - 1) / step_minutes
}

/// Strict interval overlap: `[a_start, a_end)` intersects `[b_start, b_end)`
fn overlaps(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// An employee's working window for one concrete date
#[derive(Debug, Clone, Copy)]
pub struct DaySchedule {
    pub work_start: NaiveDateTime,
    pub work_end: NaiveDateTime,
    /// Lunch break carved out of the working window, if configured
    pub lunch: Option<(NaiveDateTime, NaiveDateTime)>,
}

impl DaySchedule {
    /// Combine configured weekday hours with a concrete date
    pub fn from_working_hours(hours: &WorkingHours, date: NaiveDate) -> Self {
        let lunch = match (hours.lunch_start, hours.lunch_end) {
            (Some(start), Some(end)) => Some((date.and_time(start), date.and_time(end))),
            _ => None,
        };
        Self {
            work_start: date.and_time(hours.start_time),
            work_end: date.and_time(hours.end_time),
            lunch,
        }
    }

    /// The windows base slots are generated in: the whole working window,
    /// or the two disjoint pieces around lunch
    fn generation_windows(&self) -> Vec<(NaiveDateTime, NaiveDateTime)> {
        match self.lunch {
            Some((lunch_start, lunch_end)) => vec![
                (self.work_start, lunch_start),
                (lunch_end, self.work_end),
            ],
            None => vec![(self.work_start, self.work_end)],
        }
    }
}

/// Compute the ordered list of free service windows for one day.
///
/// Base slot starts are generated at `step` granularity inside each
/// generation window; every start is then tested as a candidate
/// `[s, s + duration)`. A candidate survives when it ends inside its
/// generation window (so it neither runs past closing nor into lunch) and
/// intersects no active block and no active booking. Against bookings the
/// end boundary is inclusive: a candidate ending exactly when a booking
/// starts is taken, leaving no back-to-back handover into an appointment.
/// Lunch and closing boundaries stay exclusive. Candidate ends are exact,
/// never rounded up to a step boundary.
pub fn resolve_slots(
    schedule: &DaySchedule,
    bookings: &[BookingWindow],
    blocks: &[(NaiveDateTime, NaiveDateTime)],
    duration: Duration,
    step: Duration,
) -> Vec<Slot> {
    if duration <= Duration::zero() {
        return Vec::new();
    }

    let mut available = Vec::new();
    for (window_start, window_end) in schedule.generation_windows() {
        for (base_start, _base_end) in subintervals(window_start, window_end, step) {
            let candidate_end = base_start + duration;
            if candidate_end > window_end {
                continue;
            }

            let blocked = blocks
                .iter()
                .any(|&(b_start, b_end)| overlaps(base_start, candidate_end, b_start, b_end));
            if blocked {
                continue;
            }

            let booked = bookings.iter().any(|b| {
                let b_end = b.start_time + Duration::minutes(b.duration_minutes as i64);
                base_start < b_end && candidate_end >= b.start_time
            });
            if booked {
                continue;
            }

            available.push(Slot {
                start: base_start,
                end: candidate_end,
            });
        }
    }
    available
}

/// Read-only slot queries against the configured schedule data
#[derive(Clone)]
pub struct AvailabilityService {
    repository: Repository,
    config: BookingConfig,
}

impl AvailabilityService {
    pub fn new(repository: Repository, config: BookingConfig) -> Self {
        Self { repository, config }
    }

    /// List bookable windows for an employee on one date.
    ///
    /// With `service_id` the employee's working hours and the service
    /// duration drive the computation; with explicit `work_start`/`work_end`
    /// the configured hours and lunch are bypassed and the step doubles as
    /// the candidate duration. Both shapes share the booking/block filter.
    pub async fn list_available_slots(&self, query: &SlotQuery) -> AppResult<Vec<Slot>> {
        let date = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d")
            .map_err(|_| AppError::Validation("Invalid date (use YYYY-MM-DD)".to_string()))?;

        match query.service_id {
            Some(service_id) => {
                self.resolve_for_service(query.employee_id, date, service_id)
                    .await
            }
            None => self.resolve_ad_hoc(query, date).await,
        }
    }

    async fn resolve_for_service(
        &self,
        employee_id: i32,
        date: NaiveDate,
        service_id: i32,
    ) -> AppResult<Vec<Slot>> {
        let weekday = Weekday::from_date(date);

        // Independent reads, no ordering dependency between them
        let (hours, service, bookings, blocks) = tokio::try_join!(
            self.repository.working_hours.get(employee_id, weekday),
            self.repository.catalog.find_active(service_id),
            self.repository.bookings.windows_for_date(employee_id, date),
            self.repository.blocks.windows_for_date(employee_id, date),
        )?;

        // Day off: not an error, just nothing to offer
        let Some(hours) = hours else {
            return Ok(Vec::new());
        };
        // Unknown or soft-deleted service resolves to empty as well; the
        // boundary layer decides how to report it
        let Some(service) = service else {
            return Ok(Vec::new());
        };

        let schedule = DaySchedule::from_working_hours(&hours, date);
        let duration = Duration::minutes(service.duration_minutes as i64);
        let step = Duration::minutes(self.config.slot_step_minutes);

        tracing::debug!(
            employee_id,
            service_id,
            %weekday,
            steps = steps_spanned(duration, step),
            "resolving availability"
        );

        Ok(resolve_slots(&schedule, &bookings, &blocks, duration, step))
    }

    async fn resolve_ad_hoc(&self, query: &SlotQuery, date: NaiveDate) -> AppResult<Vec<Slot>> {
        let (Some(work_start), Some(work_end)) =
            (query.work_start.as_deref(), query.work_end.as_deref())
        else {
            return Err(AppError::BadRequest(
                "Either service_id or work_start/work_end is required".to_string(),
            ));
        };

        let work_start = NaiveTime::parse_from_str(work_start, "%H:%M")
            .map_err(|_| AppError::Validation("Invalid work_start (use HH:MM)".to_string()))?;
        let work_end = NaiveTime::parse_from_str(work_end, "%H:%M")
            .map_err(|_| AppError::Validation("Invalid work_end (use HH:MM)".to_string()))?;

        let step_minutes = query.slot_minutes.unwrap_or(self.config.slot_step_minutes);
        if step_minutes <= 0 {
            return Err(AppError::Validation(
                "slot_minutes must be positive".to_string(),
            ));
        }

        let schedule = DaySchedule {
            work_start: date.and_time(work_start),
            work_end: date.and_time(work_end),
            lunch: None,
        };

        let (bookings, blocks) = tokio::try_join!(
            self.repository
                .bookings
                .windows_for_date(query.employee_id, date),
            self.repository
                .blocks
                .windows_for_date(query.employee_id, date),
        )?;

        let step = Duration::minutes(step_minutes);
        Ok(resolve_slots(&schedule, &bookings, &blocks, step, step))
    }

    /// The dates the bot offers for scheduling, horizon-driven
    pub fn available_days(&self, today: NaiveDate) -> Vec<NaiveDate> {
        let first = if self.config.include_today {
            today
        } else {
            today + Duration::days(1)
        };
        (0..self.config.horizon_days as i64)
            .map(|offset| first + Duration::days(offset))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 10).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        date().and_hms_opt(h, m, 0).unwrap()
    }

    fn schedule(start: (u32, u32), end: (u32, u32)) -> DaySchedule {
        DaySchedule {
            work_start: at(start.0, start.1),
            work_end: at(end.0, end.1),
            lunch: None,
        }
    }

    fn minutes(m: i64) -> Duration {
        Duration::minutes(m)
    }

    #[test]
    fn test_subintervals_exact_fit() {
        let windows: Vec<_> = subintervals(at(9, 0), at(10, 0), minutes(20)).collect();
        assert_eq!(
            windows,
            vec![
                (at(9, 0), at(9, 20)),
                (at(9, 20), at(9, 40)),
                (at(9, 40), at(10, 0)),
            ]
        );
    }

    #[test]
    fn test_subintervals_never_pads_partial_window() {
        let windows: Vec<_> = subintervals(at(9, 0), at(9, 50), minutes(20)).collect();
        assert_eq!(windows.len(), 2);
        assert_eq!(windows.last().unwrap().1, at(9, 40));
    }

    #[test]
    fn test_subintervals_contiguous_and_counted() {
        let windows: Vec<_> = subintervals(at(8, 0), at(18, 0), minutes(20)).collect();
        // floor((18:00 - 8:00) / 20min) = 30
        assert_eq!(windows.len(), 30);
        for pair in windows.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
            assert_eq!(pair[0].1 - pair[0].0, minutes(20));
        }
    }

    #[test]
    fn test_subintervals_empty_range() {
        assert_eq!(subintervals(at(9, 0), at(9, 0), minutes(20)).count(), 0);
        assert_eq!(subintervals(at(10, 0), at(9, 0), minutes(20)).count(), 0);
    }

    #[test]
    fn test_subintervals_nonpositive_step() {
        assert_eq!(subintervals(at(9, 0), at(12, 0), minutes(0)).count(), 0);
        assert_eq!(subintervals(at(9, 0), at(12, 0), minutes(-5)).count(), 0);
    }

    #[test]
    fn test_subintervals_restartable() {
        let seq = subintervals(at(9, 0), at(10, 0), minutes(20));
        let first: Vec<_> = seq.clone().collect();
        let second: Vec<_> = seq.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_steps_spanned() {
        assert_eq!(steps_spanned(minutes(20), minutes(20)), 1);
        assert_eq!(steps_spanned(minutes(30), minutes(20)), 2);
        assert_eq!(steps_spanned(minutes(40), minutes(20)), 2);
        assert_eq!(steps_spanned(minutes(45), minutes(20)), 3);
        assert_eq!(steps_spanned(minutes(45), minutes(0)), 0);
    }

    #[test]
    fn test_scenario_morning_no_lunch() {
        // 09:00-12:00, step 20m, duration 20m, nothing booked
        let slots = resolve_slots(&schedule((9, 0), (12, 0)), &[], &[], minutes(20), minutes(20));
        assert_eq!(slots.len(), 9);
        assert_eq!(slots[0].start, at(9, 0));
        assert_eq!(slots[8].start, at(11, 40));
        assert_eq!(slots[8].end, at(12, 0));
    }

    #[test]
    fn test_scenario_lunch_carve_out() {
        // 08:00-18:00, lunch 12:00-13:00, step 20m, duration 40m
        let day = DaySchedule {
            work_start: at(8, 0),
            work_end: at(18, 0),
            lunch: Some((at(12, 0), at(13, 0))),
        };
        let slots = resolve_slots(&day, &[], &[], minutes(40), minutes(20));

        let starts: Vec<_> = slots.iter().map(|s| s.start).collect();
        // 11:20 + 40m lands exactly on lunch start and fits
        assert!(starts.contains(&at(11, 20)));
        // 11:40 + 40m would run into lunch
        assert!(!starts.contains(&at(11, 40)));
        // resumes at lunch end
        assert!(starts.contains(&at(13, 0)));
        // no slot inside the lunch window
        for slot in &slots {
            assert!(slot.end <= at(12, 0) || slot.start >= at(13, 0));
        }
        // last candidate must still close by 18:00
        assert_eq!(slots.last().unwrap().start, at(17, 20));
    }

    #[test]
    fn test_scenario_existing_booking_conflicts() {
        // A 30-minute booking at 10:00 blocks the 09:40, 10:00 and 10:20
        // candidates (20m duration): 09:40 ends exactly at the booking
        // start and is taken too. 09:20 ends before 10:00 and survives,
        // as does 10:40.
        let bookings = [BookingWindow {
            start_time: at(10, 0),
            duration_minutes: 30,
        }];
        let slots = resolve_slots(
            &schedule((9, 0), (12, 0)),
            &bookings,
            &[],
            minutes(20),
            minutes(20),
        );
        let starts: Vec<_> = slots.iter().map(|s| s.start).collect();
        assert!(starts.contains(&at(9, 20)));
        assert!(!starts.contains(&at(9, 40)));
        assert!(!starts.contains(&at(10, 0)));
        assert!(!starts.contains(&at(10, 20)));
        assert!(starts.contains(&at(10, 40)));
    }

    #[test]
    fn test_booking_boundaries() {
        // End-at-start is conflicting for bookings, start-at-end is not
        let bookings = [BookingWindow {
            start_time: at(10, 0),
            duration_minutes: 20,
        }];
        let slots = resolve_slots(
            &schedule((9, 0), (12, 0)),
            &bookings,
            &[],
            minutes(20),
            minutes(20),
        );
        let starts: Vec<_> = slots.iter().map(|s| s.start).collect();
        assert!(!starts.contains(&at(9, 40)));
        assert!(starts.contains(&at(10, 20)));
    }

    #[test]
    fn test_block_conflicts() {
        let blocks = [(at(14, 0), at(15, 0))];
        let slots = resolve_slots(
            &schedule((13, 0), (17, 0)),
            &[],
            &blocks,
            minutes(20),
            minutes(20),
        );
        for slot in &slots {
            assert!(slot.end <= at(14, 0) || slot.start >= at(15, 0));
        }
        // boundary slots on either side survive
        let starts: Vec<_> = slots.iter().map(|s| s.start).collect();
        assert!(starts.contains(&at(13, 40)));
        assert!(starts.contains(&at(15, 0)));
    }

    #[test]
    fn test_duration_not_multiple_of_step() {
        // A 30-minute service on a 20-minute grid: ends are exact, not
        // rounded up to the next step boundary.
        let slots = resolve_slots(&schedule((9, 0), (10, 0)), &[], &[], minutes(30), minutes(20));
        let pairs: Vec<_> = slots.iter().map(|s| (s.start, s.end)).collect();
        assert_eq!(pairs, vec![(at(9, 0), at(9, 30)), (at(9, 20), at(9, 50))]);
    }

    #[test]
    fn test_slots_have_exact_duration_and_stay_in_window() {
        let day = DaySchedule {
            work_start: at(8, 0),
            work_end: at(18, 0),
            lunch: Some((at(12, 0), at(13, 0))),
        };
        let slots = resolve_slots(&day, &[], &[], minutes(45), minutes(20));
        assert!(!slots.is_empty());
        for slot in &slots {
            assert_eq!(slot.end - slot.start, minutes(45));
            assert!(slot.start >= day.work_start);
            assert!(slot.end <= day.work_end);
        }
    }

    #[test]
    fn test_resolver_is_idempotent() {
        let bookings = [BookingWindow {
            start_time: at(9, 40),
            duration_minutes: 20,
        }];
        let blocks = [(at(11, 0), at(11, 30))];
        let day = schedule((9, 0), (12, 0));
        let first = resolve_slots(&day, &bookings, &blocks, minutes(20), minutes(20));
        let second = resolve_slots(&day, &bookings, &blocks, minutes(20), minutes(20));
        assert_eq!(first, second);
    }

    #[test]
    fn test_chronological_order() {
        let day = DaySchedule {
            work_start: at(8, 0),
            work_end: at(18, 0),
            lunch: Some((at(12, 0), at(13, 0))),
        };
        let slots = resolve_slots(&day, &[], &[], minutes(20), minutes(20));
        for pair in slots.windows(2) {
            assert!(pair[0].start < pair[1].start);
        }
    }

    #[test]
    fn test_nonpositive_duration_yields_nothing() {
        let slots = resolve_slots(&schedule((9, 0), (12, 0)), &[], &[], minutes(0), minutes(20));
        assert!(slots.is_empty());
    }

    #[test]
    fn test_weekday_from_date() {
        // 2025-07-10 is a Thursday
        assert_eq!(Weekday::from_date(date()), Weekday::Thursday);
        assert_eq!(
            Weekday::from_date(NaiveDate::from_ymd_opt(2025, 7, 13).unwrap()),
            Weekday::Sunday
        );
    }
}
