//! Default annotation colors

/// Face outline (red)
pub const OUTLINE: [u8; 3] = [255, 0, 0];

/// Label panel fill (white)
pub const PANEL: [u8; 3] = [255, 255, 255];

/// Label text (black)
pub const TEXT: [u8; 3] = [0, 0, 0];
