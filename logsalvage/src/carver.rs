//! Carves printable-text runs out of raw table-file bytes. The table format
//! itself is never parsed; any sequence of printable ASCII long enough to be
//! interesting is a candidate.

/// Minimum run length worth keeping when the caller does not override it.
pub const DEFAULT_MIN_LENGTH: usize = 3;

/// Printable ASCII plus the whitespace controls that show up inside stored text.
fn is_printable(byte: u8) -> bool {
    (32..=126).contains(&byte) || byte == b'\t' || byte == b'\n' || byte == b'\r'
}

/// Extracts every run of consecutive printable bytes of length >= `min_length`.
///
/// Single left-to-right pass, no backtracking. Runs are bounded by
/// non-printable bytes or the buffer edges; a run that ends exactly at the end
/// of the buffer is still emitted. Byte offsets are not retained.
pub fn carve(buffer: &[u8], min_length: usize) -> Vec<String> {
    let mut candidates = Vec::new();
    let mut run: Vec<u8> = Vec::new();

    for &byte in buffer {
        if is_printable(byte) {
            run.push(byte);
        } else {
            if run.len() >= min_length {
                // Runs contain only ASCII, so the lossy conversion never substitutes.
                candidates.push(String::from_utf8_lossy(&run).into_owned());
            }
            run.clear();
        }
    }
    if run.len() >= min_length {
        candidates.push(String::from_utf8_lossy(&run).into_owned());
    }

    candidates
}
