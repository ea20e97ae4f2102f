//! Fixed swatch palette offered when choosing a category color
//!
//! The 24 PCCS hues plus three grays. A swatch already assigned to another
//! category is not offered again.

use crate::models::HexColor;

/// A named color choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub name: &'static str,
    pub color: HexColor,
}

const PCCS_HUES: [(&str, &str); 24] = [
    ("pR 紫みの赤", "#d7003a"),
    ("R 赤", "#e60012"),
    ("yR 黄みの赤", "#f3581f"),
    ("rO 赤みのだいだい", "#f8981d"),
    ("O だいだい", "#fca500"),
    ("yO 黄みのだいだい", "#fdb813"),
    ("rY 赤みの黄", "#fdd000"),
    ("Y 黄", "#fde800"),
    ("gY 緑みの黄", "#d9e021"),
    ("YG 黄緑", "#a3d638"),
    ("yG 黄みの緑", "#69c04b"),
    ("G 緑", "#00a95f"),
    ("bG 青みの緑", "#009e73"),
    ("BG 青緑", "#009b95"),
    ("gB 緑みの青", "#008eab"),
    ("B 青", "#007d9f"),
    ("pB 紫みの青", "#006aa8"),
    ("V 青紫", "#0f59a4"),
    ("bP 青みの紫", "#645da9"),
    ("P 紫", "#884897"),
    ("rP 赤みの紫", "#a94395"),
    ("RP 赤紫", "#c5398a"),
    ("pRP 紫みの赤紫", "#d6327b"),
    ("R-P 赤紫（赤寄り）", "#d50065"),
];

const GRAYS: [(&str, &str); 3] = [
    ("ライトグレー", "#cccccc"),
    ("グレー", "#9e9e9e"),
    ("ダークグレー", "#7f7f7f"),
];

/// Every swatch, hues first
pub fn all_swatches() -> Vec<Swatch> {
    PCCS_HUES
        .iter()
        .chain(GRAYS.iter())
        .map(|&(name, hex)| Swatch {
            name,
            color: HexColor::from_static(hex),
        })
        .collect()
}

/// Swatches not already in `used`
pub fn available_swatches(used: &[HexColor]) -> Vec<Swatch> {
    all_swatches()
        .into_iter()
        .filter(|swatch| !used.contains(&swatch.color))
        .collect()
}
