use serde::{Deserialize, Serialize};

pub type PlatformId = i64;

///
/// Platform
///
/// A named sensor-carrying vehicle or mooring. `color` is a 6-hex-digit
/// display color used by UI consumers (no leading `#`).
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Platform {
    pub id: PlatformId,
    pub name: String,
    pub color: String,
}

impl Platform {
    /// Display color as an `rgba(r, g, b, 0.4)` string for bar-chart fills.
    ///
    /// Returns `None` when the stored color is not 6 hex digits.
    #[must_use]
    pub fn rgba(&self) -> Option<String> {
        if self.color.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&self.color[..2], 16).ok()?;
        let g = u8::from_str_radix(&self.color[2..4], 16).ok()?;
        let b = u8::from_str_radix(&self.color[4..], 16).ok()?;

        Some(format!("rgba({r}, {g}, {b}, 0.4)"))
    }
}
