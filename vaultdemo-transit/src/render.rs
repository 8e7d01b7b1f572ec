//! Page rendering for the transit demo

use vaultdemo_core::html::{escape, notice_html, page};
use vaultdemo_core::Notice;

use crate::store::EncryptedRecord;

/// Everything the page needs for one render
#[derive(Debug)]
pub struct TransitView<'a> {
    pub records: &'a [EncryptedRecord],
    /// Recovered plaintext from a decrypt action, shown once
    pub decrypted: Option<&'a str>,
    pub selected_record_id: Option<&'a str>,
    /// Plaintext draft echoed back after a failed encrypt
    pub draft: &'a str,
    pub notice: Option<&'a Notice>,
}

pub fn page_view(view: &TransitView<'_>) -> String {
    let mut body = String::new();
    body.push_str("<h1>Vault transit encryption</h1>\n");
    body.push_str(&notice_html(view.notice));

    body.push_str(&format!(
        "<h2>Encrypt</h2>\n\
         <form method=\"post\">\n\
         <input type=\"hidden\" name=\"action\" value=\"encrypt\">\n\
         <textarea name=\"plaintext\" rows=\"4\" placeholder=\"Text to encrypt\">{}</textarea>\n\
         <button type=\"submit\">Encrypt and store</button>\n\
         </form>\n",
        escape(view.draft)
    ));

    if let Some(plaintext) = view.decrypted {
        body.push_str(&format!(
            "<h2>Decrypted output</h2>\n<pre>{}</pre>\n",
            escape(plaintext)
        ));
    }

    body.push_str("<h2>Stored records</h2>\n");
    if view.records.is_empty() {
        body.push_str("<p>No encrypted records yet.</p>\n");
    } else {
        body.push_str(
            "<form method=\"post\">\n\
             <input type=\"hidden\" name=\"action\" value=\"decrypt\">\n\
             <table>\n<tr><th></th><th>id</th><th>ciphertext</th><th>created_at</th></tr>\n",
        );
        for record in view.records {
            let checked = if view.selected_record_id == Some(record.id.as_str()) {
                " checked"
            } else {
                ""
            };
            body.push_str(&format!(
                "<tr><td><input type=\"radio\" name=\"record_id\" value=\"{id}\"{checked}></td>\
                 <td><code>{id}</code></td><td><code>{ct}</code></td><td>{ts}</td></tr>\n",
                id = escape(&record.id),
                checked = checked,
                ct = escape(&record.ciphertext),
                ts = escape(&record.created_at),
            ));
        }
        body.push_str(
            "</table>\n\
             <button type=\"submit\">Decrypt selected</button>\n\
             </form>\n",
        );
    }

    page("Vault transit demo", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, ciphertext: &str) -> EncryptedRecord {
        EncryptedRecord {
            id: id.to_string(),
            ciphertext: ciphertext.to_string(),
            created_at: "2024-05-01T12:00:00.000000Z".to_string(),
        }
    }

    #[test]
    fn test_empty_store_shows_placeholder() {
        let html = page_view(&TransitView {
            records: &[],
            decrypted: None,
            selected_record_id: None,
            draft: "",
            notice: None,
        });
        assert!(html.contains("No encrypted records yet."));
        assert!(!html.contains("Decrypt selected"));
    }

    #[test]
    fn test_records_render_with_selection() {
        let records = vec![record("id-1", "vault:v1:aaaa"), record("id-2", "vault:v1:bbbb")];
        let html = page_view(&TransitView {
            records: &records,
            decrypted: None,
            selected_record_id: Some("id-2"),
            draft: "",
            notice: None,
        });
        assert!(html.contains("value=\"id-1\">"));
        assert!(html.contains("value=\"id-2\" checked>"));
        assert!(html.contains("vault:v1:aaaa"));
    }

    #[test]
    fn test_decrypted_output_is_escaped() {
        let html = page_view(&TransitView {
            records: &[],
            decrypted: Some("<script>alert(1)</script>"),
            selected_record_id: None,
            draft: "",
            notice: None,
        });
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert"));
    }

    #[test]
    fn test_failed_encrypt_echoes_draft() {
        let html = page_view(&TransitView {
            records: &[],
            decrypted: None,
            selected_record_id: None,
            draft: "still here",
            notice: Some(&Notice::error("Plaintext cannot be empty")),
        });
        assert!(html.contains(">still here</textarea>"));
        assert!(html.contains("notice error"));
    }
}
