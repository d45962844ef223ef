//! Plain text output.

use std::fmt::Display;
use std::io::{self, Write};

/// Write each item on its own line. Returns the number of lines written.
pub fn write_lines<W, I, T>(out: &mut W, items: I) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = T>,
    T: Display,
{
    let mut count = 0;
    for item in items {
        writeln!(out, "{item}")?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_lines() {
        let mut out = Vec::new();
        let count = write_lines(&mut out, ["10.0.0.0/24", "::/0"]).unwrap();
        assert_eq!(count, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "10.0.0.0/24\n::/0\n");
    }

    #[test]
    fn test_write_lines_empty() {
        let mut out = Vec::new();
        assert_eq!(write_lines(&mut out, Vec::<String>::new()).unwrap(), 0);
        assert!(out.is_empty());
    }
}
