//! Display metadata for the 18 Pokemon types.
//!
//! The registry is static: a type tag maps to a three-stop gradient, an icon,
//! a two-stop accent and a solid color. Unknown tags render with the `normal`
//! entry.

use ratatui::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeStyle {
    pub tag: &'static str,
    pub gradient: [Color; 3],
    /// Icon name, as used by icon fonts.
    pub icon: &'static str,
    /// Single-cell glyph used in the terminal.
    pub glyph: &'static str,
    pub accent: [Color; 2],
    pub color: Color,
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(r, g, b)
}

const NORMAL: usize = 10;

static TYPE_STYLES: [TypeStyle; 18] = [
    TypeStyle {
        tag: "fire",
        gradient: [rgb(249, 115, 22), rgb(239, 68, 68), rgb(245, 158, 11)],
        icon: "flame",
        glyph: "♨",
        accent: [rgb(251, 146, 60), rgb(239, 68, 68)],
        color: rgb(249, 115, 22),
    },
    TypeStyle {
        tag: "water",
        gradient: [rgb(59, 130, 246), rgb(6, 182, 212), rgb(14, 165, 233)],
        icon: "droplets",
        glyph: "≈",
        accent: [rgb(96, 165, 250), rgb(6, 182, 212)],
        color: rgb(59, 130, 246),
    },
    TypeStyle {
        tag: "grass",
        gradient: [rgb(34, 197, 94), rgb(16, 185, 129), rgb(132, 204, 22)],
        icon: "leaf",
        glyph: "♣",
        accent: [rgb(74, 222, 128), rgb(16, 185, 129)],
        color: rgb(34, 197, 94),
    },
    TypeStyle {
        tag: "electric",
        gradient: [rgb(250, 204, 21), rgb(245, 158, 11), rgb(251, 146, 60)],
        icon: "zap",
        glyph: "ϟ",
        accent: [rgb(253, 224, 71), rgb(251, 191, 36)],
        color: rgb(234, 179, 8),
    },
    TypeStyle {
        tag: "psychic",
        gradient: [rgb(168, 85, 247), rgb(236, 72, 153), rgb(244, 63, 94)],
        icon: "sparkles",
        glyph: "✦",
        accent: [rgb(192, 132, 252), rgb(236, 72, 153)],
        color: rgb(168, 85, 247),
    },
    TypeStyle {
        tag: "ice",
        gradient: [rgb(103, 232, 249), rgb(147, 197, 253), rgb(56, 189, 248)],
        icon: "snowflake",
        glyph: "❄",
        accent: [rgb(165, 243, 252), rgb(147, 197, 253)],
        color: rgb(6, 182, 212),
    },
    TypeStyle {
        tag: "dragon",
        gradient: [rgb(99, 102, 241), rgb(168, 85, 247), rgb(124, 58, 237)],
        icon: "paw-print",
        glyph: "♞",
        accent: [rgb(129, 140, 248), rgb(168, 85, 247)],
        color: rgb(99, 102, 241),
    },
    TypeStyle {
        tag: "dark",
        gradient: [rgb(55, 65, 81), rgb(31, 41, 55), rgb(0, 0, 0)],
        icon: "moon",
        glyph: "☾",
        accent: [rgb(75, 85, 99), rgb(31, 41, 55)],
        color: rgb(55, 65, 81),
    },
    TypeStyle {
        tag: "fairy",
        gradient: [rgb(249, 168, 212), rgb(251, 113, 133), rgb(236, 72, 153)],
        icon: "wand",
        glyph: "✧",
        accent: [rgb(251, 207, 232), rgb(251, 113, 133)],
        color: rgb(236, 72, 153),
    },
    TypeStyle {
        tag: "bug",
        gradient: [rgb(163, 230, 53), rgb(34, 197, 94), rgb(16, 185, 129)],
        icon: "bug",
        glyph: "✱",
        accent: [rgb(190, 242, 100), rgb(74, 222, 128)],
        color: rgb(132, 204, 22),
    },
    TypeStyle {
        tag: "normal",
        gradient: [rgb(209, 213, 219), rgb(156, 163, 175), rgb(107, 114, 128)],
        icon: "star",
        glyph: "★",
        accent: [rgb(229, 231, 235), rgb(156, 163, 175)],
        color: rgb(107, 114, 128),
    },
    TypeStyle {
        tag: "rock",
        gradient: [rgb(202, 138, 4), rgb(180, 83, 9), rgb(133, 77, 14)],
        icon: "mountain",
        glyph: "▲",
        accent: [rgb(234, 179, 8), rgb(217, 119, 6)],
        color: rgb(180, 83, 9),
    },
    TypeStyle {
        tag: "ground",
        gradient: [rgb(253, 186, 116), rgb(202, 138, 4), rgb(217, 119, 6)],
        icon: "land-plot",
        glyph: "▤",
        accent: [rgb(254, 215, 170), rgb(234, 179, 8)],
        color: rgb(234, 88, 12),
    },
    TypeStyle {
        tag: "ghost",
        gradient: [rgb(126, 34, 206), rgb(79, 70, 229), rgb(107, 33, 168)],
        icon: "ghost",
        glyph: "◌",
        accent: [rgb(147, 51, 234), rgb(99, 102, 241)],
        color: rgb(126, 34, 206),
    },
    TypeStyle {
        tag: "steel",
        gradient: [rgb(156, 163, 175), rgb(107, 114, 128), rgb(75, 85, 99)],
        icon: "cog",
        glyph: "⚙",
        accent: [rgb(209, 213, 219), rgb(107, 114, 128)],
        color: rgb(75, 85, 99),
    },
    TypeStyle {
        tag: "poison",
        gradient: [rgb(192, 132, 252), rgb(139, 92, 246), rgb(147, 51, 234)],
        icon: "skull",
        glyph: "☠",
        accent: [rgb(216, 180, 254), rgb(167, 139, 250)],
        color: rgb(147, 51, 234),
    },
    TypeStyle {
        tag: "fighting",
        gradient: [rgb(239, 68, 68), rgb(220, 38, 38), rgb(185, 28, 28)],
        icon: "sword",
        glyph: "⚔",
        accent: [rgb(248, 113, 113), rgb(220, 38, 38)],
        color: rgb(220, 38, 38),
    },
    TypeStyle {
        tag: "flying",
        gradient: [rgb(125, 211, 252), rgb(56, 189, 248), rgb(96, 165, 250)],
        icon: "wind",
        glyph: "≋",
        accent: [rgb(186, 230, 253), rgb(147, 197, 253)],
        color: rgb(14, 165, 233),
    },
];

/// Every registered style, in filter-bar order.
pub fn all() -> &'static [TypeStyle] {
    &TYPE_STYLES
}

pub fn lookup(tag: &str) -> Option<&'static TypeStyle> {
    TYPE_STYLES.iter().find(|style| style.tag == tag)
}

pub fn style_for(tag: &str) -> &'static TypeStyle {
    lookup(tag).unwrap_or(&TYPE_STYLES[NORMAL])
}

pub fn is_known(tag: &str) -> bool {
    lookup(tag).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn registry_has_eighteen_unique_tags() {
        let tags: HashSet<&str> = all().iter().map(|style| style.tag).collect();
        assert_eq!(all().len(), 18);
        assert_eq!(tags.len(), 18);
    }

    #[test]
    fn lookup_finds_known_tags() {
        assert_eq!(lookup("fire").map(|style| style.icon), Some("flame"));
        assert_eq!(lookup("flying").map(|style| style.icon), Some("wind"));
        assert!(lookup("shadow").is_none());
        assert!(is_known("dragon"));
        assert!(!is_known("shadow"));
    }

    #[test]
    fn unknown_tags_fall_back_to_normal() {
        assert_eq!(style_for("stellar").tag, "normal");
        assert_eq!(style_for("").tag, "normal");
        assert_eq!(style_for("ghost").tag, "ghost");
    }
}
