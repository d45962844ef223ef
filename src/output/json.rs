//! JSON output.

use serde::Serialize;
use std::error::Error;
use std::io::Write;

/// Write items as one JSON array without collecting them first.
///
/// Returns the number of elements written.
pub fn write_json_array<W, I, T>(out: &mut W, items: I) -> Result<usize, Box<dyn Error>>
where
    W: Write,
    I: IntoIterator<Item = T>,
    T: Serialize,
{
    let mut count = 0;
    out.write_all(b"[")?;
    for item in items {
        if count > 0 {
            out.write_all(b",")?;
        }
        serde_json::to_writer(&mut *out, &item).map_err(|e| format!("Error serializing JSON: {e}"))?;
        count += 1;
    }
    out.write_all(b"]\n")?;
    Ok(count)
}
