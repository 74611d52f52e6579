use std::path::Path;

use crate::core::Sample;
use crate::error::{PlotError, PlotResult};

/// Turns raw dataset text into ordered samples.
///
/// Host applications can plug in their own format; the engine only relies on
/// the returned `(time, value)` sequence.
pub trait SampleParser {
    fn parse(&self, raw_text: &str) -> PlotResult<Vec<Sample>>;
}

/// Line-oriented `time value` parser.
///
/// Each non-empty line holds two numbers separated by whitespace, a comma or
/// a semicolon. Lines starting with `#` are comments. A first line that does
/// not parse as numbers is treated as a header when `allow_header` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSampleParser {
    pub allow_header: bool,
}

impl Default for TextSampleParser {
    fn default() -> Self {
        Self { allow_header: true }
    }
}

impl SampleParser for TextSampleParser {
    fn parse(&self, raw_text: &str) -> PlotResult<Vec<Sample>> {
        let mut samples = Vec::new();
        let mut seen_content = false;

        for (line_index, line) in raw_text.lines().enumerate() {
            let line_number = line_index + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let is_first = !seen_content;
            seen_content = true;
            match parse_pair(trimmed) {
                Ok(sample) => samples.push(sample),
                Err(_) if is_first && self.allow_header => continue,
                Err(message) => {
                    return Err(PlotError::Parse {
                        line: line_number,
                        message,
                    });
                }
            }
        }

        Ok(samples)
    }
}

fn parse_pair(line: &str) -> Result<Sample, String> {
    let mut fields = line
        .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|field| !field.is_empty());

    let (Some(time), Some(value)) = (fields.next(), fields.next()) else {
        return Err(format!("expected `time value`, got `{line}`"));
    };
    if let Some(extra) = fields.next() {
        return Err(format!("unexpected trailing field `{extra}`"));
    }

    let time = parse_number(time, "time")?;
    let value = parse_number(value, "value")?;
    Ok(Sample::new(time, value))
}

fn parse_number(field: &str, name: &str) -> Result<f64, String> {
    let parsed: f64 = field
        .parse()
        .map_err(|_| format!("{name} `{field}` is not a number"))?;
    if !parsed.is_finite() {
        return Err(format!("{name} `{field}` must be finite"));
    }
    Ok(parsed)
}

/// Series name for a dataset file: its file name without the `.txt` suffix.
///
/// Both `/` and `\` count as separators, so Windows-style paths give the
/// bare file name on every platform.
#[must_use]
pub fn series_name_from_path(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let file_name = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    file_name
        .strip_suffix(".txt")
        .unwrap_or(file_name)
        .to_owned()
}
