use std::collections::HashMap;

use pdf_writer::{Name, Pdf, Ref};

/// Typeface variants used by the webmail rendering. All three are base-14
/// fonts, so no font data is embedded; the widths tables below drive layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Regular,
    Bold,
    Oblique,
}

impl Face {
    fn base_font(self) -> &'static str {
        match self {
            Face::Regular => "Helvetica",
            Face::Bold => "Helvetica-Bold",
            Face::Oblique => "Helvetica-Oblique",
        }
    }
}

pub struct FontEntry {
    pub pdf_name: String,
    pub font_ref: Ref,
    /// Advance widths at 1000 units/em for WinAnsi bytes 32..=255.
    pub widths_1000: Vec<f32>,
}

impl FontEntry {
    pub fn char_width_1000(&self, ch: char) -> f32 {
        let byte = char_to_winansi(ch);
        if byte >= 32 {
            self.widths_1000[(byte - 32) as usize]
        } else {
            0.0
        }
    }

    pub fn word_width(&self, word: &str, font_size: f32) -> f32 {
        word.chars()
            .map(|ch| self.char_width_1000(ch) * font_size / 1000.0)
            .sum()
    }

    pub fn space_width(&self, font_size: f32) -> f32 {
        self.char_width_1000(' ') * font_size / 1000.0
    }
}

pub type FontSet = HashMap<Face, FontEntry>;

/// Register the three Helvetica variants as Type1 base fonts with WinAnsi
/// encoding. Returns the set keyed by face for layout and rendering.
pub fn register_fonts(pdf: &mut Pdf, alloc: &mut impl FnMut() -> Ref) -> FontSet {
    let mut set = FontSet::new();
    for (i, face) in [Face::Regular, Face::Bold, Face::Oblique].into_iter().enumerate() {
        let font_ref = alloc();
        let pdf_name = format!("F{}", i + 1);
        pdf.type1_font(font_ref)
            .base_font(Name(face.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        set.insert(
            face,
            FontEntry {
                pdf_name,
                font_ref,
                widths_1000: helvetica_widths(face),
            },
        );
    }
    set
}

/// Map a single Unicode char to its WinAnsi (Windows-1252) byte, or 0 if
/// unmappable. Bytes 0x80-0x9F carry the usual remapped punctuation.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007F => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// Convert a UTF-8 string to WinAnsi bytes for PDF Str encoding.
/// Unmappable characters are dropped.
pub fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(char_to_winansi)
        .filter(|&b| b != 0)
        .collect()
}

/// Approximate Helvetica advance widths at 1000 units/em for WinAnsi chars
/// 32..=255, per face. Close enough for wrapping and right-alignment; the
/// viewer substitutes the real base-14 metrics at draw time.
fn helvetica_widths(face: Face) -> Vec<f32> {
    let bold = face == Face::Bold;
    (32u8..=255u8)
        .map(|b| match b {
            32 => 278.0,                          // space
            33..=47 => 333.0,                     // punctuation
            48..=57 => 556.0,                     // digits
            58..=64 => 333.0,                     // more punctuation
            73 | 74 => 278.0,                     // I J (narrow uppercase)
            77 => {
                if bold { 889.0 } else { 833.0 }  // M (wide)
            }
            65..=90 => {
                if bold { 722.0 } else { 667.0 }  // uppercase A-Z (average)
            }
            91..=96 => 333.0,                     // brackets etc.
            102 | 105 | 106 | 108 | 116 => {
                if bold { 333.0 } else { 278.0 }  // narrow lowercase: f i j l t
            }
            109 | 119 => {
                if bold { 889.0 } else { 833.0 }  // m w (wide)
            }
            97..=122 => {
                if bold { 611.0 } else { 556.0 }  // lowercase a-z (average)
            }
            _ => {
                if bold { 611.0 } else { 556.0 }
            }
        })
        .collect()
}
