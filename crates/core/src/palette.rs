//! Color palette for tabs and categories
//!
//! Color assignment is a pure function of the palette and an index so that
//! creation is deterministic in tests.

/// Colors used when the caller does not supply one.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#3B82F6", "#8B5CF6", "#EC4899", "#06B6D4", "#10B981", "#F59E0B", "#EF4444", "#6366F1",
];

/// Pick a color from the palette, wrapping around on overflow.
pub fn pick(palette: &[&'static str], index: usize) -> &'static str {
    if palette.is_empty() {
        return DEFAULT_PALETTE[0];
    }
    palette[index % palette.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_wraps_around() {
        assert_eq!(pick(&DEFAULT_PALETTE, 0), "#3B82F6");
        assert_eq!(pick(&DEFAULT_PALETTE, 8), "#3B82F6");
        assert_eq!(pick(&DEFAULT_PALETTE, 9), "#8B5CF6");
    }

    #[test]
    fn test_pick_empty_palette_falls_back() {
        assert_eq!(pick(&[], 3), "#3B82F6");
    }
}
