use std::path::Path;

use roxmltree::{Document, Node};

use super::{TransUnit, XLIFF_NS, XliffDocument, XliffError, XliffFile};

/// Parse XLIFF content. `path` is only used for error reporting.
pub fn parse_str(content: &str, path: &Path) -> Result<XliffDocument, XliffError> {
    let document = Document::parse(content).map_err(|source| XliffError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for file in document
        .root_element()
        .descendants()
        .filter(|n| is_xliff_element(n, "file"))
    {
        files.push(parse_file(file, path)?);
    }

    Ok(XliffDocument { files })
}

fn parse_file(file: Node<'_, '_>, path: &Path) -> Result<XliffFile, XliffError> {
    let mut units = Vec::new();
    for unit in file
        .descendants()
        .filter(|n| is_xliff_element(n, "trans-unit"))
    {
        let id = unit
            .attribute("id")
            .ok_or_else(|| XliffError::MissingUnitId {
                path: path.to_path_buf(),
            })?;

        let mut trans_unit = TransUnit {
            id: id.to_string(),
            ..Default::default()
        };
        for child in unit.children().filter(Node::is_element) {
            match child.tag_name().name() {
                "source" => trans_unit.source = text_content(child),
                "target" => trans_unit.target = Some(text_content(child)),
                "note" | "extracomment" => trans_unit.notes.push(text_content(child)),
                _ => {}
            }
        }
        units.push(trans_unit);
    }

    Ok(XliffFile {
        original: file.attribute("original").unwrap_or_default().to_string(),
        source_language: file.attribute("source-language").map(str::to_string),
        target_language: file.attribute("target-language").map(str::to_string),
        units,
    })
}

fn is_xliff_element(node: &Node<'_, '_>, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(XLIFF_NS)
}

/// Concatenated text of an element, including text inside inline markup.
fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff xmlns="urn:oasis:names:tc:xliff:document:1.2" version="1.2">
  <file original="mozillavpn.ts" source-language="en" target-language="de" datatype="plaintext">
    <body>
      <trans-unit id="vpn.main.title">
        <source>Hello</source>
        <target>Hallo</target>
        <note>Main title</note>
      </trans-unit>
      <trans-unit id="vpn.main.empty">
        <source>Empty</source>
        <target></target>
      </trans-unit>
      <trans-unit id="vpn.main.missing">
        <source>Missing <x id="1"/>target</source>
      </trans-unit>
    </body>
  </file>
</xliff>
"#;

    #[test]
    fn test_parse_units() {
        let doc = parse_str(SAMPLE, Path::new("de.xliff")).unwrap();
        assert_eq!(doc.files.len(), 1);

        let file = &doc.files[0];
        assert_eq!(file.original, "mozillavpn.ts");
        assert_eq!(file.source_language.as_deref(), Some("en"));
        assert_eq!(file.target_language.as_deref(), Some("de"));

        let ids: Vec<&str> = file.units.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["vpn.main.title", "vpn.main.empty", "vpn.main.missing"]
        );
        assert_eq!(file.units[0].target.as_deref(), Some("Hallo"));
        assert_eq!(file.units[0].notes, vec!["Main title".to_string()]);
        assert_eq!(file.units[1].target.as_deref(), Some(""));
        assert_eq!(file.units[2].target, None);
        assert_eq!(file.units[2].source, "Missing target");
    }

    #[test]
    fn test_ignores_foreign_namespace() {
        let content = r#"<xliff xmlns="urn:example:other"><file><body>
            <trans-unit id="a"><source>A</source></trans-unit>
        </body></file></xliff>"#;
        let doc = parse_str(content, Path::new("other.xliff")).unwrap();
        assert!(doc.files.is_empty());
    }

    #[test]
    fn test_malformed_xml_is_error() {
        let result = parse_str("<xliff><file>", Path::new("broken.xliff"));
        assert!(matches!(result, Err(XliffError::Parse { .. })));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("broken.xliff"), "{message}");
    }

    #[test]
    fn test_missing_unit_id_is_error() {
        let content = r#"<xliff xmlns="urn:oasis:names:tc:xliff:document:1.2"><file><body>
            <trans-unit><source>A</source></trans-unit>
        </body></file></xliff>"#;
        let result = parse_str(content, Path::new("noid.xliff"));
        assert!(matches!(result, Err(XliffError::MissingUnitId { .. })));
    }
}
