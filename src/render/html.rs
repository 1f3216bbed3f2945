//! Server-rendered pages. Presentation is deliberately thin: a login form,
//! and the scorecard page with company select, score table, bar list, and
//! an optional detail panel.

use crate::types::scoring::{ChartSeries, Company, ScoreDetail, ScoreEntry};

const PAGE_STYLE: &str = "body{font-family:sans-serif;max-width:60em;margin:2em auto}\
table{border-collapse:collapse}td,th{border:1px solid #ccc;padding:0.3em 0.6em;text-align:left}\
.bar{background:#4878a8;height:1em;display:inline-block}.error{color:#b00020}";

pub fn login_page(error: Option<&str>) -> String {
    let message = error.map_or(String::new(), |text| {
        format!("<p class=\"error\">{}</p>\n", escape(text))
    });
    format!(
        "<!DOCTYPE html>\n<html><head><title>Leadership Scorecard</title>\
<style>{PAGE_STYLE}</style></head>\n<body>\n\
<h1>Leadership Scorecard Dashboard</h1>\n\
<h3>Enter Password</h3>\n{message}\
<form method=\"post\" action=\"/login\">\n\
<input type=\"password\" name=\"password\" autofocus>\n\
<button type=\"submit\">Login</button>\n</form>\n</body></html>\n"
    )
}

pub fn scorecard_page(
    company: &str,
    companies: &[Company],
    rows: &[&ScoreEntry],
    series: &ChartSeries,
    detail: Option<&ScoreDetail>,
) -> String {
    let mut page = String::with_capacity(4096);
    page.push_str(&format!(
        "<!DOCTYPE html>\n<html><head><title>Leadership Scorecard</title>\
<style>{PAGE_STYLE}</style></head>\n<body>\n\
<h1>Leadership Scorecard Dashboard</h1>\n\
<p><a href=\"/logout\">Logout</a></p>\n"
    ));

    page.push_str("<form method=\"get\" action=\"/\">\n<select name=\"company\">\n");
    for entry in companies {
        let selected = if entry.name == company { " selected" } else { "" };
        page.push_str(&format!(
            "<option value=\"{0}\"{selected}>{0}</option>\n",
            escape(&entry.name)
        ));
    }
    page.push_str("</select>\n<button type=\"submit\">Show</button>\n</form>\n");

    page.push_str(
        "<table>\n<tr><th>Category</th><th>Score</th><th>Weight</th>\
<th>Weighted Score</th></tr>\n",
    );
    for row in rows {
        page.push_str(&format!(
            "<tr><td><a href=\"/?company={}&category={}\">{}</a></td>\
<td>{}</td><td>{}</td><td>{}</td></tr>\n",
            urlencode(company),
            urlencode(&row.category),
            escape(&row.category),
            row.score,
            row.weight,
            row.weighted_score
        ));
    }
    page.push_str("</table>\n");

    page.push_str(&format!(
        "<h3>{} Leadership Scores</h3>\n",
        escape(company)
    ));
    for (label, value) in series
        .category_labels
        .iter()
        .zip(series.score_values.iter())
    {
        // Raw scores run 1..=10; scale to a 0..300px bar.
        page.push_str(&format!(
            "<div>{}: <span class=\"bar\" style=\"width:{}px\"></span> {}</div>\n",
            escape(label),
            u32::from(*value) * 30,
            value
        ));
    }

    page.push_str("<h3>Click a Score for More Details</h3>\n");
    match detail {
        Some(detail) => page.push_str(&detail_panel(detail)),
        None => page.push_str("<p>Click on a score to view details.</p>\n"),
    }

    page.push_str("</body></html>\n");
    page
}

fn detail_panel(detail: &ScoreDetail) -> String {
    format!(
        "<div>\n<h4>{}</h4>\n<p>Definition: {}</p>\n<p>Score Assigned: {}</p>\n\
<p>Weight Applied: {}%</p>\n<p>Rationale: {}</p>\n</div>\n",
        escape(&detail.category),
        escape(&detail.description),
        detail.score,
        detail.weight_percent,
        escape(&detail.rationale)
    )
}

pub fn not_found_page(message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html><head><title>Leadership Scorecard</title>\
<style>{PAGE_STYLE}</style></head>\n<body>\n\
<h1>Leadership Scorecard Dashboard</h1>\n\
<p class=\"error\">{}</p>\n<p><a href=\"/\">Back to the scorecard</a></p>\n</body></html>\n",
        escape(message)
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn urlencode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push_str("%20"),
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}
