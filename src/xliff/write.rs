use std::fmt::Write;

use super::{XLIFF_NS, XliffDocument};

/// Escape text for use in XML element content and attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl XliffDocument {
    /// Serialize the document as XLIFF 1.2.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version='1.0' encoding='utf-8'?>\n");
        let _ = writeln!(out, "<xliff xmlns=\"{}\" version=\"1.2\">", XLIFF_NS);

        for file in &self.files {
            let _ = write!(
                out,
                "  <file original=\"{}\" datatype=\"plaintext\"",
                escape_xml(&file.original)
            );
            if let Some(lang) = &file.source_language {
                let _ = write!(out, " source-language=\"{}\"", escape_xml(lang));
            }
            if let Some(lang) = &file.target_language {
                let _ = write!(out, " target-language=\"{}\"", escape_xml(lang));
            }
            out.push_str(">\n    <body>\n");

            for unit in &file.units {
                let _ = writeln!(
                    out,
                    "      <trans-unit id=\"{}\">",
                    escape_xml(&unit.id)
                );
                let _ = writeln!(out, "        <source>{}</source>", escape_xml(&unit.source));
                if let Some(target) = &unit.target {
                    let _ = writeln!(out, "        <target>{}</target>", escape_xml(target));
                }
                for note in &unit.notes {
                    let _ = writeln!(out, "        <note>{}</note>", escape_xml(note));
                }
                out.push_str("      </trans-unit>\n");
            }

            out.push_str("    </body>\n  </file>\n");
        }

        out.push_str("</xliff>\n");
        out
    }
}
