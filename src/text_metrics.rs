use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

/// Width of one character, in ems, when no font can be found.
const FALLBACK_EM_WIDTH: f32 = 0.56;

static TEXT_MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

/// Measures `text` with the first installed font of `font_family`, falling
/// back to a fixed per-character estimate.
pub fn measure_text_width(text: &str, font_size: f32, font_family: &str) -> f32 {
    if text.is_empty() || font_size <= 0.0 {
        return 0.0;
    }
    let measured = TEXT_MEASURER
        .lock()
        .ok()
        .and_then(|mut measurer| measurer.measure(text, font_size, font_family));
    measured.unwrap_or_else(|| estimate_text_width(text, font_size))
}

pub fn estimate_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().filter(|ch| *ch != '\n').count() as f32 * font_size * FALLBACK_EM_WIDTH
}

struct TextMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    cache: HashMap<String, Option<Advances>>,
}

/// Horizontal advances copied out of a face, so no font data has to outlive
/// the database callback.
struct Advances {
    face_id: fontdb::ID,
    units_per_em: f32,
    ascii: [u16; 128],
    other: HashMap<char, u16>,
}

impl Advances {
    fn from_face(face_id: fontdb::ID, face: &Face<'_>) -> Self {
        let mut ascii = [0u16; 128];
        for byte in 0u8..=127 {
            if let Some(glyph) = face.glyph_index(byte as char) {
                ascii[byte as usize] = face.glyph_hor_advance(glyph).unwrap_or(0);
            }
        }
        Self {
            face_id,
            units_per_em: f32::from(face.units_per_em().max(1)),
            ascii,
            other: HashMap::new(),
        }
    }

    fn width(&self, text: &str, font_size: f32) -> f32 {
        let scale = font_size / self.units_per_em;
        let fallback = font_size * FALLBACK_EM_WIDTH;
        text.chars()
            .filter(|ch| *ch != '\n')
            .map(|ch| {
                let advance = if ch.is_ascii() {
                    self.ascii[ch as usize]
                } else {
                    self.other.get(&ch).copied().unwrap_or(0)
                };
                if advance == 0 {
                    fallback
                } else {
                    f32::from(advance) * scale
                }
            })
            .sum()
    }
}

impl TextMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            cache: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f32, font_family: &str) -> Option<f32> {
        let key = normalize_family_key(font_family);
        if !self.cache.contains_key(&key) {
            let advances = self.load_advances(font_family);
            if advances.is_none() {
                tracing::warn!(font_family = %key, "no installed font matches; estimating text widths");
            }
            self.cache.insert(key.clone(), advances);
        }
        let advances = self.cache.get_mut(&key)?.as_mut()?;

        let missing: Vec<char> = text
            .chars()
            .filter(|ch| !ch.is_ascii() && !advances.other.contains_key(ch))
            .collect();
        if !missing.is_empty() {
            let found = self
                .db
                .with_face_data(advances.face_id, |data, index| {
                    let face = Face::parse(data, index).ok()?;
                    let pairs: Vec<(char, u16)> = missing
                        .iter()
                        .map(|ch| {
                            let advance = face
                                .glyph_index(*ch)
                                .and_then(|glyph| face.glyph_hor_advance(glyph))
                                .unwrap_or(0);
                            (*ch, advance)
                        })
                        .collect();
                    Some(pairs)
                })
                .flatten()
                .unwrap_or_default();
            advances.other.extend(found);
        }

        Some(advances.width(&text.replace('\t', "    "), font_size))
    }

    fn load_advances(&mut self, font_family: &str) -> Option<Advances> {
        let names: Vec<String> = font_family
            .split(',')
            .map(|part| part.trim().trim_matches('"').trim_matches('\'').to_string())
            .filter(|part| !part.is_empty())
            .collect();
        let mut families: Vec<Family<'_>> = names.iter().map(|name| family_for(name)).collect();
        if families.is_empty() {
            families.push(Family::SansSerif);
        }

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        self.db
            .with_face_data(id, |data, index| {
                let face = Face::parse(data, index).ok()?;
                Some(Advances::from_face(id, &face))
            })
            .flatten()
    }
}

fn family_for(name: &str) -> Family<'_> {
    match name.to_ascii_lowercase().as_str() {
        "serif" => Family::Serif,
        "sans-serif" | "system-ui" | "-apple-system" | "ui-sans-serif" => Family::SansSerif,
        "monospace" | "ui-monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        _ => Family::Name(name),
    }
}

fn normalize_family_key(font_family: &str) -> String {
    let trimmed = font_family.trim();
    if trimmed.is_empty() {
        "sans-serif".to_string()
    } else {
        trimmed.to_string()
    }
}
