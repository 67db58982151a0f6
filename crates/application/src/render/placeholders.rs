//! Placeholder value computation
//!
//! Builds the closed name→value set consumed by [`super::Template`]. All
//! date math derives from the weather observation timestamp threaded in
//! through [`RenderInputs`], never from the system clock.

use std::fmt::Write as _;

use chrono::Datelike;
use domain::{CalendarEvent, Forecast, MonthCell, MonthGrid, TargetDate};

use super::icons::icon_data_uri;

/// Forecast lookahead shown on the dashboard (offsets 1..=5)
const LOOKAHEAD_DAYS: usize = 5;

/// Everything the renderer needs for one document
#[derive(Debug, Clone, Copy)]
pub struct RenderInputs<'a> {
    /// Normalized forecast; its observation time is the cycle's "now"
    pub forecast: &'a Forecast,
    /// Already-selected upcoming events, display order
    pub events: &'a [CalendarEvent],
    /// Month grid for the render date
    pub grid: &'a MonthGrid,
    /// Countdown target
    pub target: TargetDate,
}

/// Compute the full placeholder set for one render
#[must_use]
pub fn placeholder_values(inputs: &RenderInputs<'_>) -> Vec<(String, String)> {
    let now = inputs.forecast.current.observed_at;
    let current = &inputs.forecast.current;
    let mut values = Vec::with_capacity(70);

    values.push(("day".to_string(), now.format("%A").to_string()));
    values.push((
        "date".to_string(),
        format!("{} {}", now.format("%B"), now.day()),
    ));
    values.push((
        "countdown".to_string(),
        inputs.target.days_until(now).to_string(),
    ));
    values.push((
        "target_date".to_string(),
        inputs
            .target
            .next_occurrence(now.date())
            .format("%B %-d")
            .to_string(),
    ));

    values.push(("temp".to_string(), round(current.temperature)));
    values.push(("weather".to_string(), current.condition.label().to_string()));
    if let Some(today) = inputs.forecast.today() {
        values.push((
            "weather_details".to_string(),
            format!(
                "High: {}°F<br>Low: {}°F<br>Humidity: {}%",
                round(today.temperature_max),
                round(today.temperature_min),
                current.humidity
            ),
        ));
    }

    for offset in 1..=LOOKAHEAD_DAYS {
        let Some(day) = inputs.forecast.daily.get(offset) else {
            break;
        };
        values.push((format!("day+{offset}"), day.date.format("%A").to_string()));
        values.push((format!("low+{offset}"), round(day.temperature_min)));
        values.push((format!("high+{offset}"), round(day.temperature_max)));
        values.push((
            format!("icon{offset}"),
            icon_data_uri(day.condition).to_string(),
        ));
    }

    values.push((
        "month_label".to_string(),
        format!("{} {}", now.format("%B"), now.year()),
    ));
    for (index, cell) in inputs.grid.cells().iter().enumerate() {
        values.push((index.to_string(), cell_markup(cell)));
    }

    values.push(("upcoming_events".to_string(), events_markup(inputs.events)));

    values
}

/// Round a temperature to the nearest whole degree for display
#[allow(clippy::cast_possible_truncation)]
fn round(temperature: f64) -> String {
    format!("{}", temperature.round() as i64)
}

/// Markup for one grid cell
///
/// Today and has-event compose by nesting: the event marker wraps
/// whatever the cell would otherwise show.
fn cell_markup(cell: &MonthCell) -> String {
    match cell {
        MonthCell::PrevMonth { day } => format!("<span class=\"prev-month\">{day}</span>"),
        MonthCell::NextMonth { day } => format!("<span class=\"next-month\">{day}</span>"),
        MonthCell::CurrentMonth {
            day,
            is_today,
            has_event,
        } => {
            let inner = if *is_today {
                format!("<span class=\"today\">{day}</span>")
            } else {
                day.to_string()
            };
            if *has_event {
                format!("<span class=\"has-event\">{inner}</span>")
            } else {
                inner
            }
        }
    }
}

/// Markup for the upcoming-events block
fn events_markup(events: &[CalendarEvent]) -> String {
    if events.is_empty() {
        return "<p>No events</p>".to_string();
    }

    let mut list = String::from("<ul>");
    for event in events {
        let _ = write!(
            list,
            "<li>({short_date}) {weekday}<br> {title}<br>{start} - {end}</li>",
            short_date = event.start.format("%-m/%-d"),
            weekday = event.start.format("%A"),
            title = event.title,
            start = event.start.format("%-I:%M %p"),
            end = event.end.format("%-I:%M %p"),
        );
    }
    list.push_str("</ul>");
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use domain::{DailyForecast, WeatherCondition, WeatherSnapshot, upcoming_events};
    use std::collections::HashMap;

    fn observed(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .expect("valid date")
            .and_hms_opt(h, m, 0)
            .expect("valid time")
    }

    fn forecast() -> Forecast {
        let daily = (0..7)
            .map(|offset| DailyForecast {
                date: NaiveDate::from_ymd_opt(2024, 3, 15 + offset).expect("valid date"),
                temperature_min: 40.4 + f64::from(offset),
                temperature_max: 55.5 + f64::from(offset),
                weather_code: if offset == 1 { 71 } else { 0 },
                condition: if offset == 1 {
                    WeatherCondition::LightSnow
                } else {
                    WeatherCondition::Clear
                },
            })
            .collect();
        Forecast {
            current: WeatherSnapshot {
                temperature: 48.6,
                humidity: 72,
                weather_code: 3,
                condition: WeatherCondition::Overcast,
                observed_at: observed(9, 30),
            },
            daily,
        }
    }

    fn value_map(inputs: &RenderInputs<'_>) -> HashMap<String, String> {
        placeholder_values(inputs).into_iter().collect()
    }

    #[test]
    fn date_placeholders_derive_from_observation_time() {
        let forecast = forecast();
        let grid = MonthGrid::build(forecast.current.observed_at.date(), &[]);
        let inputs = RenderInputs {
            forecast: &forecast,
            events: &[],
            grid: &grid,
            target: TargetDate::parse("2024-07-04").expect("valid target"),
        };

        let map = value_map(&inputs);
        assert_eq!(map["day"], "Friday");
        assert_eq!(map["date"], "March 15");
        assert_eq!(map["month_label"], "March 2024");
        assert_eq!(map["target_date"], "July 4");
        // 2024-03-15 09:30 -> 2024-07-04 00:00 is 110.6 days
        assert_eq!(map["countdown"], "111");
    }

    #[test]
    fn weather_placeholders_round_for_display() {
        let forecast = forecast();
        let grid = MonthGrid::build(forecast.current.observed_at.date(), &[]);
        let inputs = RenderInputs {
            forecast: &forecast,
            events: &[],
            grid: &grid,
            target: TargetDate::parse("2024-07-04").expect("valid target"),
        };

        let map = value_map(&inputs);
        assert_eq!(map["temp"], "49");
        assert_eq!(map["weather"], "Overcast");
        assert_eq!(map["weather_details"], "High: 56°F<br>Low: 40°F<br>Humidity: 72%");
    }

    #[test]
    fn lookahead_placeholders_cover_offsets_one_through_five() {
        let forecast = forecast();
        let grid = MonthGrid::build(forecast.current.observed_at.date(), &[]);
        let inputs = RenderInputs {
            forecast: &forecast,
            events: &[],
            grid: &grid,
            target: TargetDate::parse("2024-07-04").expect("valid target"),
        };

        let map = value_map(&inputs);
        assert_eq!(map["day+1"], "Saturday");
        assert_eq!(map["low+1"], "41");
        assert_eq!(map["high+1"], "57");
        assert!(map["icon1"].starts_with("data:image/jpeg;base64,"));
        assert_eq!(map["day+5"], "Wednesday");
        assert!(!map.contains_key("day+6"));
    }

    #[test]
    fn grid_placeholders_are_numbered_zero_to_41() {
        let forecast = forecast();
        let grid = MonthGrid::build(forecast.current.observed_at.date(), &[]);
        let inputs = RenderInputs {
            forecast: &forecast,
            events: &[],
            grid: &grid,
            target: TargetDate::parse("2024-07-04").expect("valid target"),
        };

        let map = value_map(&inputs);
        for i in 0..42 {
            assert!(map.contains_key(&i.to_string()), "missing cell {i}");
        }
        assert!(!map.contains_key("42"));
    }

    #[test]
    fn cell_markup_variants() {
        assert_eq!(
            cell_markup(&MonthCell::PrevMonth { day: 28 }),
            "<span class=\"prev-month\">28</span>"
        );
        assert_eq!(
            cell_markup(&MonthCell::NextMonth { day: 3 }),
            "<span class=\"next-month\">3</span>"
        );
        assert_eq!(
            cell_markup(&MonthCell::CurrentMonth {
                day: 12,
                is_today: false,
                has_event: false
            }),
            "12"
        );
        assert_eq!(
            cell_markup(&MonthCell::CurrentMonth {
                day: 12,
                is_today: true,
                has_event: false
            }),
            "<span class=\"today\">12</span>"
        );
        assert_eq!(
            cell_markup(&MonthCell::CurrentMonth {
                day: 12,
                is_today: false,
                has_event: true
            }),
            "<span class=\"has-event\">12</span>"
        );
        assert_eq!(
            cell_markup(&MonthCell::CurrentMonth {
                day: 12,
                is_today: true,
                has_event: true
            }),
            "<span class=\"has-event\"><span class=\"today\">12</span></span>"
        );
    }

    #[test]
    fn events_markup_lists_each_event() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 20)
            .expect("valid date")
            .and_hms_opt(10, 0, 0)
            .expect("valid time");
        let end = start + chrono::Duration::minutes(90);
        let events = vec![CalendarEvent::new("Dentist", start, end)];

        assert_eq!(
            events_markup(&events),
            "<ul><li>(3/20) Wednesday<br> Dentist<br>10:00 AM - 11:30 AM</li></ul>"
        );
    }

    #[test]
    fn events_markup_uses_twelve_hour_clock() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 20)
            .expect("valid date")
            .and_hms_opt(13, 5, 0)
            .expect("valid time");
        let end = start + chrono::Duration::hours(1);
        let events = vec![CalendarEvent::new("Standup", start, end)];

        let markup = events_markup(&events);
        assert!(markup.contains("1:05 PM - 2:05 PM"), "{markup}");
    }

    #[test]
    fn events_markup_empty_is_no_events_paragraph() {
        assert_eq!(events_markup(&[]), "<p>No events</p>");
    }

    #[test]
    fn selected_events_flow_into_grid_and_list() {
        let forecast = forecast();
        let now = forecast.current.observed_at;
        let start = NaiveDate::from_ymd_opt(2024, 3, 20)
            .expect("valid date")
            .and_hms_opt(10, 0, 0)
            .expect("valid time");
        let all = vec![CalendarEvent::new(
            "Dentist",
            start,
            start + chrono::Duration::hours(1),
        )];
        let selected = upcoming_events(&all, now, 5);
        let grid = MonthGrid::build(now.date(), &selected);
        let inputs = RenderInputs {
            forecast: &forecast,
            events: &selected,
            grid: &grid,
            target: TargetDate::parse("2024-07-04").expect("valid target"),
        };

        let map = value_map(&inputs);
        assert!(map["upcoming_events"].contains("Dentist"));
        // March 2024 starts on a Friday: 5 leading cells, day 20 sits at index 24
        assert_eq!(map["24"], "<span class=\"has-event\">20</span>");
    }
}
