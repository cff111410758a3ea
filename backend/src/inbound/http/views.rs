//! Server-rendered HTML pages.
//!
//! Every interpolated value passes through [`escape_html`]; user ids,
//! nicknames, and provider text are all untrusted.

use crate::domain::ports::{Dashboard, WeatherOutcome};
use crate::domain::{Location, UnitSystem, User, WeatherReading};

use super::flash::Flash;

/// Escape text for use in HTML element content and quoted attributes.
///
/// ```
/// use weatherdesk::inbound::http::views::escape_html;
///
/// assert_eq!(escape_html("<b>\"Tom\" & 'Jerry'</b>"),
///     "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
/// ```
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn layout(title: &str, flashes: &[Flash], body: &str) -> String {
    let notices = if flashes.is_empty() {
        String::new()
    } else {
        let items: String = flashes
            .iter()
            .map(|flash| {
                format!(
                    "<li class=\"flash {}\">{}</li>",
                    flash.level.as_str(),
                    escape_html(&flash.message)
                )
            })
            .collect();
        format!("<ul class=\"flashes\">{items}</ul>")
    };
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n{notices}\n{body}\n</body>\n</html>\n",
        title = escape_html(title),
    )
}

fn units_options(selected: UnitSystem) -> String {
    [UnitSystem::Metric, UnitSystem::Imperial]
        .into_iter()
        .map(|units| {
            let marker = if units == selected { " selected" } else { "" };
            format!(
                "<option value=\"{value}\"{marker}>{value}</option>",
                value = units.as_str()
            )
        })
        .collect()
}

/// Landing page with the sign-in form.
pub fn login_page(flashes: &[Flash]) -> String {
    let body = format!(
        "<h1>Weather desk</h1>\n\
         <form method=\"post\" action=\"/\">\n\
         <label>User ID <input name=\"user_id\" required></label>\n\
         <label>Name (new users) <input name=\"name\"></label>\n\
         <label>Units <select name=\"default_units\">{options}</select></label>\n\
         <button type=\"submit\">Continue</button>\n\
         </form>",
        options = units_options(UnitSystem::default()),
    );
    layout("Weather desk", flashes, &body)
}

fn format_temperature(value: Option<f64>, units: UnitSystem) -> String {
    value.map_or_else(
        || "n/a".to_owned(),
        |temp| format!("{temp:.1}{}", units.temperature_suffix()),
    )
}

fn weather_panel(reading: &WeatherReading) -> String {
    let place = match (&reading.city, &reading.country) {
        (Some(city), Some(country)) => format!("{city}, {country}"),
        (Some(city), None) => city.clone(),
        (None, Some(country)) => country.clone(),
        (None, None) => "Unknown location".to_owned(),
    };
    format!(
        "<section class=\"weather\">\n<h2>{place}</h2>\n<dl>\n\
         <dt>Temperature</dt><dd>{temp}</dd>\n\
         <dt>Feels like</dt><dd>{feels}</dd>\n\
         <dt>Conditions</dt><dd>{description}</dd>\n</dl>\n\
         <p class=\"fetched\">Fetched {fetched} UTC</p>\n</section>",
        place = escape_html(&place),
        temp = format_temperature(reading.temperature, reading.units),
        feels = format_temperature(reading.feels_like, reading.units),
        description = escape_html(reading.description.as_deref().unwrap_or("n/a")),
        fetched = reading.fetched_at.format("%Y-%m-%d %H:%M"),
    )
}

fn location_item(location: &Location) -> String {
    let id = escape_html(location.id.as_ref());
    format!(
        "<li><a href=\"/dashboard?loc={id}\">{nickname}</a> ({city}, {country})\n\
         <form method=\"post\" action=\"/delete_location/{id}\" class=\"inline\">\
         <button type=\"submit\">Delete</button></form></li>",
        nickname = escape_html(&location.nickname),
        city = escape_html(&location.city),
        country = escape_html(&location.country_code),
    )
}

/// Signed-in dashboard.
pub fn dashboard_page(user: &User, dashboard: &Dashboard, flashes: &[Flash]) -> String {
    let mut body = format!(
        "<h1>Hello, {name}</h1>\n<p>Signed in as <code>{id}</code>. <a href=\"/logout\">Log out</a></p>\n\
         <form method=\"post\" action=\"/set_units\">\n\
         <label>Default units <select name=\"default_units\">{options}</select></label>\n\
         <button type=\"submit\">Save</button>\n</form>\n",
        name = escape_html(user.display_name.as_ref()),
        id = escape_html(user.id.as_ref()),
        options = units_options(user.default_units),
    );

    body.push_str("<h2>Locations</h2>\n");
    if dashboard.locations.is_empty() {
        body.push_str("<p>No saved locations yet.</p>\n");
    } else {
        body.push_str("<ul class=\"locations\">\n");
        for location in &dashboard.locations {
            body.push_str(&location_item(location));
            body.push('\n');
        }
        body.push_str("</ul>\n");
    }

    body.push_str(
        "<form method=\"post\" action=\"/add_location\">\n\
         <label>City <input name=\"city\" required></label>\n\
         <label>Country code <input name=\"country_code\" required></label>\n\
         <label>Nickname <input name=\"nickname\" required></label>\n\
         <button type=\"submit\">Add location</button>\n</form>\n",
    );

    if let Some(WeatherOutcome::Reading(reading)) = &dashboard.weather {
        body.push_str(&weather_panel(reading));
    }

    layout("Dashboard", flashes, &body)
}

/// Minimal page for errors surfaced by [`ResponseError`](actix_web::ResponseError).
pub fn error_page(status: u16, message: &str, trace_id: Option<&str>) -> String {
    let mut body = format!(
        "<h1>Error {status}</h1>\n<p>{}</p>\n",
        escape_html(message)
    );
    if let Some(id) = trace_id {
        body.push_str(&format!(
            "<p class=\"trace\">Reference: <code>{}</code></p>\n",
            escape_html(id)
        ));
    }
    body.push_str("<p><a href=\"/\">Back to start</a></p>");
    layout("Error", &[], &body)
}
