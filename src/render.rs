//! HTML rendering of the dashboard page

use std::fmt::Write;

use crate::dashboard::{DashboardRequest, DashboardView};
use crate::models::{ResultTable, SortKey};
use crate::weather::CityFailure;

pub const PAGE_TITLE: &str = "Weather Forecast for Multiple Cities";

const STYLE: &str = "body{font-family:sans-serif;margin:0;display:flex}\
aside{width:18rem;padding:1rem;background:#f0f2f6;min-height:100vh}\
main{padding:1rem 2rem;flex:1}\
label{display:block;margin-top:.75rem}\
textarea,input,select{width:100%;box-sizing:border-box}\
table{border-collapse:collapse}\
th,td{border:1px solid #ddd;padding:.3rem .8rem;text-align:left}\
.failure{color:#b00}";

/// Render the full page: sidebar form plus either the table or the placeholder
#[must_use]
pub fn render_page(request: &DashboardRequest, view: &DashboardView) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{PAGE_TITLE}</title>");
    let _ = writeln!(html, "<style>{STYLE}</style>");
    html.push_str("</head>\n<body>\n");

    render_form(&mut html, request);

    html.push_str("<main>\n");
    let _ = writeln!(html, "<h1>{PAGE_TITLE}</h1>");
    match view {
        DashboardView::AwaitingInput { message } => {
            let _ = writeln!(html, "<p class=\"placeholder\">{}</p>", escape_html(message));
        }
        DashboardView::Displaying {
            table,
            failures,
            fetched_at,
        } => {
            render_failures(&mut html, failures);
            render_table(&mut html, table);
            let _ = writeln!(
                html,
                "<p><small>Updated {}</small></p>",
                fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }
    }
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_form(html: &mut String, request: &DashboardRequest) {
    html.push_str("<aside>\n<form method=\"get\" action=\"/\">\n");
    let _ = writeln!(
        html,
        "<label for=\"cities\">Enter cities separated by commas (e.g., Sahiwal, Lahore, Karachi)</label>\n\
         <textarea id=\"cities\" name=\"cities\" rows=\"4\">{}</textarea>",
        escape_html(&request.cities)
    );
    html.push_str("<h2>Filter Options</h2>\n");
    let _ = writeln!(
        html,
        "<label for=\"search\">Search by City</label>\n\
         <input id=\"search\" name=\"search\" type=\"text\" value=\"{}\">",
        escape_html(&request.search)
    );
    html.push_str("<label for=\"sort\">Sort by</label>\n<select id=\"sort\" name=\"sort\">\n");
    for key in SortKey::ALL {
        let selected = if key == request.sort { " selected" } else { "" };
        let _ = writeln!(
            html,
            "<option value=\"{}\"{selected}>{}</option>",
            key.value(),
            key.label()
        );
    }
    html.push_str("</select>\n<p><button type=\"submit\">Show weather</button></p>\n</form>\n</aside>\n");
}

fn render_failures(html: &mut String, failures: &[CityFailure]) {
    if failures.is_empty() {
        return;
    }
    html.push_str("<ul class=\"failures\">\n");
    for failure in failures {
        let _ = writeln!(
            html,
            "<li class=\"failure\" title=\"{}\">{}</li>",
            escape_html(&failure.reason),
            escape_html(&failure.message())
        );
    }
    html.push_str("</ul>\n");
}

fn render_table(html: &mut String, table: &ResultTable) {
    html.push_str("<table>\n<thead><tr>");
    for column in ResultTable::COLUMNS {
        let _ = write!(html, "<th>{column}</th>");
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for record in table.iter() {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&record.city),
            escape_html(&record.format_temperature()),
            escape_html(&record.format_condition())
        );
    }
    html.push_str("</tbody>\n</table>\n");
}

/// Escape text for use in element content and quoted attributes
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
