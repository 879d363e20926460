//! Best-effort WebVTT to SubRip conversion
//!
//! The model emits WebVTT; SubRip output is produced by re-rendering the
//! same cue sequence. No timestamp validation happens here: malformed
//! timing values pass through with only the textual delimiter swap, and
//! unrecognized lines (cue identifiers, stray markup) are dropped rather
//! than failing the whole document. The conversion is one-way.

const TIMING_SEPARATOR: &str = "-->";

/// Convert a WebVTT document to SubRip text
///
/// Cues are renumbered sequentially from 1 regardless of any identifier
/// lines in the source, and cue-settings tokens after the end timestamp
/// are discarded.
pub fn vtt_to_srt(vtt: &str) -> String {
    let mut output = String::with_capacity(vtt.len());
    let mut lines = vtt.lines();

    // The header block runs to the first blank line; any blank lines
    // directly after it are swallowed by the blank handling below.
    for line in lines.by_ref() {
        if line.trim().is_empty() {
            break;
        }
    }

    let mut cue_index = 0u32;
    let mut in_cue = false;

    for line in lines {
        if line.trim().is_empty() {
            if in_cue {
                output.push('\n');
                in_cue = false;
            }
            continue;
        }

        if line.contains(TIMING_SEPARATOR) {
            cue_index += 1;
            output.push_str(&cue_index.to_string());
            output.push('\n');
            output.push_str(&convert_timing_line(line));
            output.push('\n');
            in_cue = true;
        } else if in_cue {
            output.push_str(line);
            output.push('\n');
        }
        // anything else is an identifier or unrecognized markup: skip
    }

    if in_cue {
        output.push('\n');
    }

    output
}

/// Rebuild a timing line in SubRip form
///
/// Takes the first whitespace token on each side of the separator and
/// swaps the fractional-seconds delimiter from `.` to `,`.
fn convert_timing_line(line: &str) -> String {
    let (raw_start, raw_end) = line.split_once(TIMING_SEPARATOR).unwrap_or((line, ""));

    let start = raw_start.split_whitespace().next().unwrap_or("").replace('.', ",");
    let end = raw_end.split_whitespace().next().unwrap_or("").replace('.', ",");

    format!("{start} {TIMING_SEPARATOR} {end}")
}
