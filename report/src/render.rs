use crate::models::Report;
use chrono::{DateTime, Utc};

/// Renders the summary page: one section per record, in report order.
pub fn render_html(report: &Report, generated_at: DateTime<Utc>) -> String {
    let mut page = String::with_capacity(1024 + report.len() * 512);

    page.push_str(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Summary Report</title>\n\
         <style>\n\
         body { font-family: sans-serif; margin: 2em; }\n\
         section { margin-bottom: 2em; }\n\
         table { border-collapse: collapse; }\n\
         td { padding: 2px 12px; border-bottom: 1px solid #ddd; }\n\
         td.value { text-align: right; font-family: monospace; }\n\
         </style>\n</head>\n<body>\n",
    );
    page.push_str(&format!(
        "<h1>Summary Report</h1>\n<p class=\"generated\">Generated {}</p>\n",
        generated_at.format("%a %b %e %H:%M:%S UTC %Y")
    ));

    if report.is_empty() {
        page.push_str("<p class=\"empty\">No channel records available.</p>\n");
    }

    for record in &report.records {
        page.push_str(&format!(
            "<section>\n<h2>{}</h2>\n<table>\n",
            escape(&record.title)
        ));
        for (key, value) in record.metrics.iter() {
            page.push_str(&format!(
                "<tr><td>{}</td><td class=\"value\">{}</td></tr>\n",
                escape(&label(key)),
                value
            ));
        }
        page.push_str("</table>\n</section>\n");
    }

    page.push_str("</body>\n</html>\n");
    page
}

// Words printed in capitals instead of title case.
const ACRONYMS: &[&str] = &["pdp"];

/// `add_to_cart` -> `Add To Cart`, `visit_pdp` -> `Visit PDP`
pub fn label(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            if ACRONYMS.contains(&word.to_ascii_lowercase().as_str()) {
                return word.to_uppercase();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
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
