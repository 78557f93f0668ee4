//! English `.ts` template of an addon.

use std::fmt::Write;

use crate::{strings::StringTable, xliff::escape_xml};

/// Render the strings as an id-based Qt `.ts` file for `language`.
///
/// Units are keyed by the id the client looks them up with. The source text
/// doubles as the translation, so the template compiles into a complete
/// English `.qm`.
pub fn render_template(table: &StringTable, language: &str) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n");
    let _ = writeln!(out, "<TS version=\"2.1\" language=\"{}\">", escape_xml(language));
    out.push_str("<context>\n    <name></name>\n");

    for unit in table.iter() {
        let text = escape_xml(&unit.text());
        let _ = writeln!(out, "    <message id=\"{}\">", escape_xml(unit.client_id()));
        let _ = writeln!(out, "        <source>{}</source>", text);
        if !unit.comments.is_empty() {
            let _ = writeln!(
                out,
                "        <extracomment>{}</extracomment>",
                escape_xml(&unit.comments.join(" "))
            );
        }
        let _ = writeln!(out, "        <translation>{}</translation>", text);
        out.push_str("    </message>\n");
    }

    out.push_str("</context>\n</TS>\n");
    out
}
