use std::fs;
use std::path::Path;
use std::sync::Arc;

use ab_glyph::FontVec;
use once_cell::sync::{Lazy, OnceCell};

use super::dirs::{resolve_font_dirs, system_font_dirs};
use crate::{Error, FontId, Result};

type Slot = OnceCell<std::result::Result<Arc<FontVec>, String>>;

static FIRA: Slot = OnceCell::new();
static JETBRAINS: Slot = OnceCell::new();
static CASCADIA: Slot = OnceCell::new();
static DEJAVU: Slot = OnceCell::new();
static UBUNTU: Slot = OnceCell::new();
static HACK: Slot = OnceCell::new();

static FONT_DB: Lazy<fontdb::Database> = Lazy::new(|| {
    let mut db = fontdb::Database::new();
    for dir in resolve_font_dirs() {
        if dir.is_dir() {
            db.load_fonts_dir(&dir);
        }
    }
    db.load_system_fonts();
    log::debug!("font database: {} faces", db.len());
    db
});

fn slot(id: FontId) -> Option<&'static Slot> {
    match id {
        FontId::Fira => Some(&FIRA),
        FontId::Jetbrains => Some(&JETBRAINS),
        FontId::Cascadia => Some(&CASCADIA),
        FontId::Dejavu => Some(&DEJAVU),
        FontId::Ubuntu => Some(&UBUNTU),
        FontId::Hack => Some(&HACK),
        FontId::Builtin => None,
    }
}

/// Returns the outline font for `id`, loading it on first use. Failures are
/// cached as well so a missing font is looked up once per process.
pub(crate) fn outline_font(id: FontId) -> Result<Arc<FontVec>> {
    let slot = slot(id).ok_or_else(|| {
        Error::FontLoadFailed(format!("{} has no outline face", id.as_str()))
    })?;
    slot.get_or_init(|| load_outline(id))
        .clone()
        .map_err(Error::FontLoadFailed)
}

fn load_outline(id: FontId) -> std::result::Result<Arc<FontVec>, String> {
    let mut dirs = resolve_font_dirs();
    dirs.extend(system_font_dirs());
    for dir in &dirs {
        for name in id.file_names() {
            let path = dir.join(name);
            if path.is_file() {
                match load_file(&path) {
                    Ok(font) => {
                        log::debug!("loaded {} from {}", id.as_str(), path.display());
                        return Ok(Arc::new(font));
                    }
                    Err(err) => log::debug!("{err}"),
                }
            }
        }
    }
    query_database(id)
        .map(Arc::new)
        .ok_or_else(|| format!("{} not found", id.as_str()))
}

fn load_file(path: &Path) -> std::result::Result<FontVec, String> {
    let data = fs::read(path).map_err(|err| format!("read {}: {err}", path.display()))?;
    FontVec::try_from_vec(data).map_err(|err| format!("parse {}: {err}", path.display()))
}

fn query_database(id: FontId) -> Option<FontVec> {
    let db = &*FONT_DB;
    id.families().iter().find_map(|family| {
        let families = [fontdb::Family::Name(family)];
        let query = fontdb::Query {
            families: &families,
            weight: fontdb::Weight::NORMAL,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };
        let face = db.query(&query)?;
        db.with_face_data(face, |data, index| {
            FontVec::try_from_vec_and_index(data.to_vec(), index).ok()
        })
        .flatten()
    })
}
