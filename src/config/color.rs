use serde::{Deserialize, Serialize};

/// A straight-alpha color with normalized `0..1` channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorDef {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
    /// Alpha; `0` is fully transparent.
    pub a: f64,
}

/// Tableau palette, which is also the `C0`..`C9` property cycle.
const TABLEAU: [(&str, u32); 10] = [
    ("blue", 0x1f77b4),
    ("orange", 0xff7f0e),
    ("green", 0x2ca02c),
    ("red", 0xd62728),
    ("purple", 0x9467bd),
    ("brown", 0x8c564b),
    ("pink", 0xe377c2),
    ("gray", 0x7f7f7f),
    ("olive", 0xbcbd22),
    ("cyan", 0x17becf),
];

impl ColorDef {
    /// Fully transparent black, written `none` in configuration.
    pub const NONE: ColorDef = ColorDef {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Opaque white.
    pub const WHITE: ColorDef = ColorDef {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Build a color from normalized channels.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a textual color the way plotting configurations write them.
    ///
    /// Accepts `#rgb`, `#rgba`, `#rrggbb` and `#rrggbbaa` hex, every CSS4/X11 name, the
    /// one-letter base colors (`k`, `w`, `r`, ...), `tab:<name>`, the `C0`..`C9` cycle,
    /// grey levels such as `"0.5"`, CSS functional forms (`rgb(...)`, `hsl(...)`) and `none`.
    pub fn parse(s: &str) -> Result<Self, String> {
        let text = s.trim();
        if text.is_empty() {
            return Err("empty color".to_owned());
        }
        let lower = text.to_ascii_lowercase();

        if let Some(c) = plot_color(&lower)? {
            return Ok(c);
        }
        // Bare hex digits are not a color name; only `#`-prefixed hex is.
        if !lower.starts_with('#') && lower.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("unknown color name \"{text}\""));
        }
        match csscolorparser::parse(&lower) {
            Ok(c) => Ok(Self::rgba(
                f64::from(c.r),
                f64::from(c.g),
                f64::from(c.b),
                f64::from(c.a),
            )),
            Err(e) if lower.starts_with('#') => Err(format!("invalid hex color \"{text}\": {e}")),
            Err(_) => Err(format!("unknown color name \"{text}\"")),
        }
    }

    /// Return `true` when nothing would be painted with this color.
    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }

    /// SVG paint value and opacity, with `alpha` multiplied into the color's own alpha.
    pub fn svg_paint(self, alpha: f64) -> (String, f64) {
        let [r, g, b, _] = self.to_rgba8();
        (format!("#{r:02x}{g:02x}{b:02x}"), (self.a * alpha).clamp(0.0, 1.0))
    }

    /// Convert into straight-alpha RGBA8.
    pub fn to_rgba8(self) -> [u8; 4] {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a)]
    }

    fn from_rgb24(rgb: u32) -> Self {
        let channel = |shift: u32| f64::from((rgb >> shift) & 0xff) / 255.0;
        Self::rgba(channel(16), channel(8), channel(0), 1.0)
    }
}

/// Plot-specific spellings that CSS does not know. `Ok(None)` means "not one of these".
fn plot_color(lower: &str) -> Result<Option<ColorDef>, String> {
    let base = |r: f64, g: f64, b: f64| Some(ColorDef::rgba(r, g, b, 1.0));
    let c = match lower {
        "none" | "transparent" => Some(ColorDef::NONE),
        "b" => base(0.0, 0.0, 1.0),
        "g" => base(0.0, 0.5, 0.0),
        "r" => base(1.0, 0.0, 0.0),
        "c" => base(0.0, 0.75, 0.75),
        "m" => base(0.75, 0.0, 0.75),
        "y" => base(0.75, 0.75, 0.0),
        "k" => base(0.0, 0.0, 0.0),
        "w" => base(1.0, 1.0, 1.0),
        _ => None,
    };
    if c.is_some() {
        return Ok(c);
    }

    if let Some(name) = lower.strip_prefix("tab:") {
        let name = if name == "grey" { "gray" } else { name };
        return TABLEAU
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, rgb)| Some(ColorDef::from_rgb24(*rgb)))
            .ok_or_else(|| format!("unknown tableau color \"tab:{name}\""));
    }

    if let Some(idx) = lower.strip_prefix('c')
        && idx.len() == 1
        && let Some(i) = idx.chars().next().and_then(|d| d.to_digit(10))
    {
        return Ok(Some(ColorDef::from_rgb24(TABLEAU[i as usize].1)));
    }

    if lower.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        && let Ok(level) = lower.parse::<f64>()
    {
        if !(0.0..=1.0).contains(&level) {
            return Err(format!("grey level \"{lower}\" must be within [0, 1]"));
        }
        return Ok(Some(ColorDef::rgba(level, level, level, 1.0)));
    }

    Ok(None)
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Channels(Vec<f64>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => Self::parse(&s).map_err(serde::de::Error::custom),
            Repr::Channels(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::rgba(*r, *g, *b, 1.0)),
                [r, g, b, a] => Ok(Self::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(format!(
                    "color channel list needs 3 or 4 values, got {}",
                    v.len()
                ))),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/color.rs"]
mod tests;
