use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// An opaque RGB color as used for table fills and text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    /// Components scaled to the 0.0..=1.0 range PDF color operators expect.
    pub fn to_unit_rgb(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Parse a hex color string (#RGB or #RRGGBB format)
    fn parse_hex(s: &str) -> Result<Color, String> {
        let s = s.trim();
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| format!("Color must start with #, got: {}", s))?;

        let component = |digits: &str, name: &str| {
            u8::from_str_radix(digits, 16).map_err(|e| format!("Invalid {} component: {}", name, e))
        };

        match hex.len() {
            3 => Ok(Color::rgb(
                component(&hex[0..1].repeat(2), "red")?,
                component(&hex[1..2].repeat(2), "green")?,
                component(&hex[2..3].repeat(2), "blue")?,
            )),
            6 => Ok(Color::rgb(
                component(&hex[0..2], "red")?,
                component(&hex[2..4], "green")?,
                component(&hex[4..6], "blue")?,
            )),
            _ => Err(format!(
                "Invalid hex color length: expected 3 or 6, got {}",
                hex.len()
            )),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.r, self.g, self.b].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ColorDef {
            Hex(String),
            Triple([u8; 3]),
            Map { r: u8, g: u8, b: u8 },
        }

        match ColorDef::deserialize(deserializer)? {
            ColorDef::Hex(s) => Self::parse_hex(&s).map_err(de::Error::custom),
            ColorDef::Triple([r, g, b]) | ColorDef::Map { r, g, b } => Ok(Color::rgb(r, g, b)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_all_notations() {
        let hex: Color = serde_json::from_str("\"#294BA0\"").unwrap();
        let short: Color = serde_json::from_str("\"#fff\"").unwrap();
        let triple: Color = serde_json::from_str("[41, 75, 160]").unwrap();
        let map: Color = serde_json::from_str(r#"{"r": 41, "g": 75, "b": 160}"#).unwrap();

        assert_eq!(hex, Color::rgb(41, 75, 160));
        assert_eq!(short, Color::WHITE);
        assert_eq!(triple, hex);
        assert_eq!(map, hex);
    }

    #[test]
    fn rejects_bad_hex() {
        assert!(serde_json::from_str::<Color>("\"294BA0\"").is_err());
        assert!(serde_json::from_str::<Color>("\"#12345\"").is_err());
    }

    #[test]
    fn serializes_as_triple() {
        let json = serde_json::to_string(&Color::rgb(255, 240, 100)).unwrap();
        assert_eq!(json, "[255,240,100]");
    }

    #[test]
    fn unit_rgb_scales_components() {
        assert_eq!(Color::WHITE.to_unit_rgb(), [1.0, 1.0, 1.0]);
        assert_eq!(Color::BLACK.to_unit_rgb(), [0.0, 0.0, 0.0]);
    }
}
