//! HTML escaping for values interpolated into the info page.

use std::fmt;

/// Display adapter that writes its contents with HTML-significant
/// characters replaced by entities. Safe in element text and quoted
/// attribute values.
#[derive(Debug, Clone, Copy)]
pub struct Escaped<'a>(pub &'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut last = 0;
        for (idx, byte) in self.0.bytes().enumerate() {
            let entity = match byte {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                b'\'' => "&#x27;",
                _ => continue,
            };
            f.write_str(&self.0[last..idx])?;
            f.write_str(entity)?;
            last = idx + 1;
        }
        f.write_str(&self.0[last..])
    }
}
