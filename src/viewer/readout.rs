//! Pure text rendering for the time readout and seconds indicator.
//!
//! No I/O. Small font sizes render the time as a plain one-row string;
//! larger sizes use a five-row seven-segment banner. `letter_spacing`
//! maps to whole columns of gap between glyphs.

/// Font sizes at or above this render as the five-row banner.
const BANNER_THRESHOLD: f64 = 24.0;

const GLYPH_ROWS: usize = 5;

const SEG_A: u8 = 0x40;
const SEG_B: u8 = 0x20;
const SEG_C: u8 = 0x10;
const SEG_D: u8 = 0x08;
const SEG_E: u8 = 0x04;
const SEG_F: u8 = 0x02;
const SEG_G: u8 = 0x01;

/// Seven-segment masks for '0'..'9' (bits: a=0x40 .. g=0x01).
const SEGMENTS: [u8; 10] = [
    0x7E, // 0
    0x30, // 1
    0x6D, // 2
    0x79, // 3
    0x33, // 4
    0x5B, // 5
    0x5F, // 6
    0x70, // 7
    0x7F, // 8
    0x7B, // 9
];

/// Render a time string (digits and ':') as display rows.
pub(super) fn render_readout(time: &str, font_size: f64, letter_spacing: f64) -> Vec<String> {
    let gap = " ".repeat(letter_gap(letter_spacing));
    if font_size < BANNER_THRESHOLD {
        let glyphs: Vec<String> = time.chars().map(String::from).collect();
        vec![glyphs.join(&gap)]
    } else {
        banner(time, &gap)
    }
}

/// Columns of gap between glyphs: one column per 5 units of spacing.
pub(super) fn letter_gap(letter_spacing: f64) -> usize {
    (letter_spacing / 5.0).round() as usize
}

/// Seconds progress bar: `second` (0..60, fractional) over `cols` columns.
pub(super) fn seconds_bar(cols: usize, second: f64) -> String {
    let filled = ((second / 60.0) * cols as f64).round() as usize;
    let filled = filled.min(cols);
    format!("{}{}", "━".repeat(filled), "╌".repeat(cols - filled))
}

/// Rows the seconds indicator occupies: 0 disables, otherwise the
/// configured line width (0..=10) maps to 1..=3 rows.
pub(super) fn indicator_rows(line_width: f64) -> usize {
    if line_width <= 0.0 {
        0
    } else {
        ((line_width / 4.0).ceil() as usize).clamp(1, 3)
    }
}

fn banner(time: &str, gap: &str) -> Vec<String> {
    let mut rows = vec![String::new(); GLYPH_ROWS];
    for (i, c) in time.chars().enumerate() {
        let glyph = glyph(c);
        for (row, line) in rows.iter_mut().enumerate() {
            if i > 0 {
                line.push_str(gap);
            }
            line.push_str(&glyph[row]);
        }
    }
    rows
}

fn glyph(c: char) -> [String; GLYPH_ROWS] {
    match c {
        '0'..='9' => seven_segment(SEGMENTS[c as usize - '0' as usize]),
        ':' => ["   ", " █ ", "   ", " █ ", "   "].map(String::from),
        _ => ["   "; GLYPH_ROWS].map(String::from),
    }
}

fn seven_segment(mask: u8) -> [String; GLYPH_ROWS] {
    let on = |bit: u8| mask & bit != 0;
    let horiz = |bit: u8| if on(bit) { "███" } else { "   " }.to_string();
    let vert = |left: u8, right: u8| {
        format!(
            "{} {}",
            if on(left) { '█' } else { ' ' },
            if on(right) { '█' } else { ' ' }
        )
    };
    [
        horiz(SEG_A),
        vert(SEG_F, SEG_B),
        horiz(SEG_G),
        vert(SEG_E, SEG_C),
        horiz(SEG_D),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_font_is_single_row() {
        let rows = render_readout("12:34:56", 10.0, 0.0);
        assert_eq!(rows, vec!["12:34:56".to_string()]);
    }

    #[test]
    fn letter_spacing_inserts_gaps() {
        let rows = render_readout("1:2", 10.0, 5.0);
        assert_eq!(rows, vec!["1 : 2".to_string()]);
        let rows = render_readout("1:2", 10.0, 10.0);
        assert_eq!(rows, vec!["1  :  2".to_string()]);
    }

    #[test]
    fn zero_spacing_has_no_gap() {
        assert_eq!(letter_gap(0.0), 0);
        assert_eq!(letter_gap(2.0), 0);
        assert_eq!(letter_gap(3.0), 1);
        assert_eq!(letter_gap(20.0), 4);
    }

    #[test]
    fn banner_has_five_equal_rows() {
        let rows = render_readout("09:41:00", 30.0, 5.0);
        assert_eq!(rows.len(), 5);
        let width = rows[0].chars().count();
        for row in &rows {
            assert_eq!(row.chars().count(), width);
        }
    }

    #[test]
    fn eight_lights_every_segment() {
        let glyph = seven_segment(SEGMENTS[8]);
        assert_eq!(glyph[0], "███");
        assert_eq!(glyph[1], "█ █");
        assert_eq!(glyph[2], "███");
        assert_eq!(glyph[3], "█ █");
        assert_eq!(glyph[4], "███");
    }

    #[test]
    fn one_is_right_bars_only() {
        let glyph = seven_segment(SEGMENTS[1]);
        assert_eq!(glyph[0], "   ");
        assert_eq!(glyph[1], "  █");
        assert_eq!(glyph[2], "   ");
        assert_eq!(glyph[3], "  █");
        assert_eq!(glyph[4], "   ");
    }

    #[test]
    fn colon_is_two_dots() {
        let rows = render_readout(":", 30.0, 0.0);
        assert_eq!(rows[1], " █ ");
        assert_eq!(rows[3], " █ ");
        assert_eq!(rows[0], "   ");
    }

    #[test]
    fn seconds_bar_bounds() {
        assert_eq!(seconds_bar(10, 0.0), "╌".repeat(10));
        assert_eq!(seconds_bar(10, 60.0), "━".repeat(10));
        let half = seconds_bar(10, 30.0);
        assert_eq!(half, format!("{}{}", "━".repeat(5), "╌".repeat(5)));
    }

    #[test]
    fn seconds_bar_width_is_constant() {
        for s in 0..60 {
            assert_eq!(seconds_bar(37, s as f64).chars().count(), 37);
        }
    }

    #[test]
    fn indicator_rows_mapping() {
        assert_eq!(indicator_rows(0.0), 0);
        assert_eq!(indicator_rows(1.0), 1);
        assert_eq!(indicator_rows(4.0), 1);
        assert_eq!(indicator_rows(5.0), 2);
        assert_eq!(indicator_rows(10.0), 3);
    }
}
