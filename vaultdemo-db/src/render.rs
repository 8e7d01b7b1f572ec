//! Page rendering for the database demo

use vaultdemo_core::html::{escape, notice_html, page};
use vaultdemo_core::Notice;

use crate::query::SecretRow;

/// Render the whole page: fetch form, optional notice, leased username,
/// and the query results (or a placeholder before the first fetch)
pub fn page_view(rows: &[SecretRow], username: Option<&str>, notice: Option<&Notice>) -> String {
    let mut body = String::new();
    body.push_str("<h1>Vault dynamic database credentials</h1>\n");
    body.push_str(&notice_html(notice));
    body.push_str(
        "<form method=\"post\">\n\
         <button type=\"submit\">Fetch secrets with a fresh credential</button>\n\
         </form>\n",
    );

    if let Some(username) = username {
        body.push_str(&format!(
            "<p>Connected as leased user <code>{}</code></p>\n",
            escape(username)
        ));
    }

    if rows.is_empty() {
        body.push_str("<p>No results yet. Submit the form to run the query.</p>\n");
    } else {
        body.push_str("<table>\n<tr><th>id</th><th>secret_value</th><th>created_at</th></tr>\n");
        for row in rows {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                row.id,
                escape(&row.secret_value),
                row.created_at.to_rfc3339()
            ));
        }
        body.push_str("</table>\n");
    }

    page("Vault database demo", &body)
}
