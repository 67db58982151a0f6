//! Dashboard rendering
//!
//! Pure transformation from normalized weather, events, and the month grid
//! into the final HTML document. Rendering is deterministic: identical
//! inputs always produce byte-identical output.

mod icons;
mod placeholders;
mod template;

pub use icons::icon_data_uri;
pub use placeholders::{RenderInputs, placeholder_values};
pub use template::Template;

/// Render the dashboard document
///
/// Every recognized placeholder is replaced with its computed value;
/// unrecognized `{{...}}` spans pass through verbatim.
#[must_use]
pub fn render_dashboard(template: &Template, inputs: &RenderInputs<'_>) -> String {
    template.substitute(&placeholder_values(inputs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain::{
        CalendarEvent, DailyForecast, Forecast, MonthGrid, TargetDate, WeatherCondition,
        WeatherSnapshot, upcoming_events,
    };

    fn forecast() -> Forecast {
        let observed_at = NaiveDate::from_ymd_opt(2024, 3, 15)
            .expect("valid date")
            .and_hms_opt(9, 30, 0)
            .expect("valid time");
        let daily = (0..7)
            .map(|offset| DailyForecast {
                date: NaiveDate::from_ymd_opt(2024, 3, 15 + offset).expect("valid date"),
                temperature_min: 40.0 + f64::from(offset),
                temperature_max: 55.0 + f64::from(offset),
                weather_code: 61,
                condition: WeatherCondition::LightRain,
            })
            .collect();
        Forecast {
            current: WeatherSnapshot {
                temperature: 48.6,
                humidity: 72,
                weather_code: 3,
                condition: WeatherCondition::Overcast,
                observed_at,
            },
            daily,
        }
    }

    fn events() -> Vec<CalendarEvent> {
        let start = NaiveDate::from_ymd_opt(2024, 3, 20)
            .expect("valid date")
            .and_hms_opt(10, 0, 0)
            .expect("valid time");
        vec![CalendarEvent::new(
            "Dentist",
            start,
            start + chrono::Duration::hours(1),
        )]
    }

    fn inputs_with<'a>(
        forecast: &'a Forecast,
        selected: &'a [CalendarEvent],
        grid: &'a MonthGrid,
    ) -> RenderInputs<'a> {
        RenderInputs {
            forecast,
            events: selected,
            grid,
            target: TargetDate::parse("2024-07-04").expect("valid target"),
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let forecast = forecast();
        let all = events();
        let selected = upcoming_events(&all, forecast.current.observed_at, 5);
        let grid = MonthGrid::build(forecast.current.observed_at.date(), &selected);
        let template = Template::new(
            "<h1>{{day}} {{date}}</h1><p>{{temp}} {{weather}}</p>{{upcoming_events}}",
        );

        let inputs = inputs_with(&forecast, &selected, &grid);
        let first = render_dashboard(&template, &inputs);
        let second = render_dashboard(&template, &inputs);
        assert_eq!(first, second);
    }

    #[test]
    fn full_placeholder_set_resolves() {
        let forecast = forecast();
        let all = events();
        let selected = upcoming_events(&all, forecast.current.observed_at, 5);
        let grid = MonthGrid::build(forecast.current.observed_at.date(), &selected);

        let mut text = String::from(
            "{{day}}|{{date}}|{{countdown}}|{{target_date}}|{{temp}}|{{weather}}|\
             {{weather_details}}|{{month_label}}|{{upcoming_events}}|",
        );
        for i in 1..=5 {
            text.push_str(&format!("{{{{day+{i}}}}}|{{{{low+{i}}}}}|{{{{high+{i}}}}}|{{{{icon{i}}}}}|"));
        }
        for i in 0..42 {
            text.push_str(&format!("{{{{{i}}}}}|"));
        }
        let template = Template::new(text);

        let inputs = inputs_with(&forecast, &selected, &grid);
        let html = render_dashboard(&template, &inputs);
        assert!(!html.contains("{{"), "unresolved placeholder in: {html}");
    }

    #[test]
    fn unrecognized_placeholders_pass_through() {
        let forecast = forecast();
        let selected: Vec<CalendarEvent> = vec![];
        let grid = MonthGrid::build(forecast.current.observed_at.date(), &selected);
        let template = Template::new("{{day}} and {{mystery_token}}");

        let inputs = inputs_with(&forecast, &selected, &grid);
        let html = render_dashboard(&template, &inputs);
        assert_eq!(html, "Friday and {{mystery_token}}");
    }

    #[test]
    fn empty_events_render_no_events_markup() {
        let forecast = forecast();
        let selected: Vec<CalendarEvent> = vec![];
        let grid = MonthGrid::build(forecast.current.observed_at.date(), &selected);
        let template = Template::new("{{upcoming_events}}");

        let inputs = inputs_with(&forecast, &selected, &grid);
        assert_eq!(render_dashboard(&template, &inputs), "<p>No events</p>");
    }
}
