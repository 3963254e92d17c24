//! Common test fixtures for obstruction map tests.

/// The 2x2 reference grid: unobstructed, obstructed, no data, half way.
pub fn reference_grid() -> Vec<Vec<f64>> {
    vec![vec![1.0, 0.0], vec![-1.0, 0.5]]
}

/// Expected colors for [`reference_grid`] under the default endpoints.
pub mod reference_colors {
    /// Cell (0, 0), fully unobstructed
    pub const UNOBSTRUCTED: (u8, u8, u8, u8) = (62, 128, 224, 255);
    /// Cell (0, 1), fully obstructed
    pub const OBSTRUCTED: (u8, u8, u8, u8) = (237, 82, 74, 255);
    /// Cell (1, 0), no data
    pub const NO_DATA: (u8, u8, u8, u8) = (0, 0, 0, 0);
    /// Cell (1, 1), 50% blend rounded half up
    pub const MIDPOINT: (u8, u8, u8, u8) = (150, 105, 149, 255);
}

/// Color strings used across configuration tests.
pub mod colors {
    pub const OPAQUE_WHITE: &str = "FFFFFFFF";
    pub const OPAQUE_BLACK: &str = "FF000000";
    pub const HALF_RED: &str = "80FF0000";
    pub const LOWERCASE_BLUE: &str = "ff0000ff";

    /// Strings that must be rejected as color endpoints.
    pub const INVALID: &[&str] = &[
        "",
        "FFF",
        "ED524A",
        "FFED524A00",
        "GGED524A",
        "red",
        "##FFED524A",
        "#####00000000",
        " FFED524A\n",
    ];
}
