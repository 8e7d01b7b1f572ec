//! Minimal HTML rendering helpers
//!
//! The demo pages are small enough that hand-formatted markup keeps the
//! rendering in one place, the same way ruststack formats its XML error
//! bodies. Everything user-supplied goes through [`escape`].

use crate::notice::Notice;

/// Escape the five HTML metacharacters
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap a page body in the shared document shell
pub fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>
        body {{ font-family: sans-serif; max-width: 52rem; margin: 2rem auto; padding: 0 1rem; }}
        table {{ border-collapse: collapse; width: 100%; }}
        th, td {{ border: 1px solid #ccc; padding: 0.4rem 0.6rem; text-align: left; }}
        .notice.success {{ color: #155724; background: #d4edda; padding: 0.5rem; }}
        .notice.error {{ color: #721c24; background: #f8d7da; padding: 0.5rem; }}
        textarea {{ width: 100%; }}
        code {{ word-break: break-all; }}
    </style>
</head>
<body>
{body}</body>
</html>
"#,
        title = escape(title),
        body = body
    )
}

/// Render a notice block, or nothing when there is no notice
pub fn notice_html(notice: Option<&Notice>) -> String {
    match notice {
        Some(n) => format!(
            "<p class=\"notice {}\">{}</p>\n",
            n.level.css_class(),
            escape(&n.text)
        ),
        None => String::new(),
    }
}
