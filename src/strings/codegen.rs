//! C++ string tables for the Qt application.
//!
//! `l18nstrings.h` declares one enum value per string; `l18nstrings_p.cpp`
//! embeds the literal source text and comments next to `QT_TRID_NOOP` ids so
//! `lupdate` can extract them.

use std::{fmt::Write, fs, io, path::Path};

use super::StringTable;

pub const HEADER_FILE_NAME: &str = "l18nstrings.h";
pub const TABLE_FILE_NAME: &str = "l18nstrings_p.cpp";

const LICENSE: &str = "/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

// AUTOGENERATED! DO NOT EDIT!!
";

pub fn render_header(table: &StringTable) -> String {
    let mut out = String::from(LICENSE);
    out.push_str(
        "
#ifndef L18NSTRINGS_H
#define L18NSTRINGS_H

#include <QQmlPropertyMap>

class L18nStrings final : public QQmlPropertyMap {
  Q_OBJECT
  Q_DISABLE_COPY_MOVE(L18nStrings)

 public:
  enum String {
    Empty,
",
    );

    for unit in table.iter() {
        let _ = writeln!(out, "    {},", unit.enum_id);
    }

    out.push_str(
        "    __Last,
  };

  static L18nStrings* instance();

  explicit L18nStrings(QObject* parent);
  ~L18nStrings();

  void retranslate();

  QString t(String) const;

 private:
  static const char* const _ids[];
};

#endif  // L18NSTRINGS_H
",
    );
    out
}

pub fn render_table(table: &StringTable) -> String {
    let mut out = String::from(LICENSE);
    out.push_str(
        "
#include \"l18nstrings.h\"

// static
const char* const L18nStrings::_ids[] = {
    // The first ID is for the empty string.
    \"\",

",
    );

    for unit in table.iter() {
        let _ = writeln!(out, "    //% \"{}\"", serialize_value(&unit.value));
        for comment in &unit.comments {
            let _ = writeln!(out, "    //: {}", comment);
        }
        let _ = writeln!(out, "    QT_TRID_NOOP(\"{}\"),\n", unit.string_id);
    }

    // MSVC rejects an empty initializer list.
    if table.is_empty() {
        out.push_str("    \"vpn.dummy.ignore\",\n\n");
    }

    out.push_str("\n};\n\nvoid L18nStrings::retranslate() {\n");
    for unit in table.iter() {
        let _ = writeln!(
            out,
            "    insert(\"{0}\", qtTrId(_ids[{0}]));",
            unit.enum_id
        );
    }
    out.push('}');
    out
}

/// Join value segments with a literal `\n` and escape quotes.
fn serialize_value(value: &[String]) -> String {
    value.join("\\n").replace('"', "\\\"")
}

/// Write `content` unless the file already holds exactly that.
///
/// Returns whether the file was written.
pub fn write_if_changed(path: &Path, content: &str) -> io::Result<bool> {
    if fs::read_to_string(path).is_ok_and(|existing| existing == content) {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(true)
}
