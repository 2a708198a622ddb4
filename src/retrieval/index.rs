use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::contour::{decode_to_pitches, trigrams};
use crate::error::{Error, Result};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawContour {
    Symbols(String),
    Pitches(Vec<i32>),
}

#[derive(Deserialize)]
struct RawIndex {
    contours: HashMap<String, RawContour>,
    #[serde(default)]
    tunes: Option<serde_json::Value>,
    #[serde(default)]
    aliases: Option<serde_json::Value>,
}

/// A loaded tune index: per-setting MIDI-pitch contours plus their
/// precomputed trigram sets, ready for querying. `tunes` and `aliases` are
/// carried opaquely and never interpreted here.
pub struct Index {
    pub contours: HashMap<String, Vec<i32>>,
    pub trigrams: HashMap<String, HashSet<(i32, i32, i32)>>,
    pub tunes: Option<serde_json::Value>,
    pub aliases: Option<serde_json::Value>,
}

impl Index {
    pub fn from_json(data: &str) -> Result<Index> {
        let raw: RawIndex =
            serde_json::from_str(data).map_err(|e| Error::Index(format!("malformed index: {e}")))?;

        if raw.contours.is_empty() {
            return Err(Error::Index("index has no contours".to_string()));
        }

        let mut contours = HashMap::with_capacity(raw.contours.len());
        let mut trigram_sets = HashMap::with_capacity(raw.contours.len());

        for (id, raw_contour) in raw.contours {
            let pitches = match raw_contour {
                RawContour::Symbols(s) => decode_to_pitches(&s)
                    .map_err(|e| Error::Index(format!("setting '{id}': {e}")))?,
                RawContour::Pitches(p) => {
                    if p.is_empty() {
                        return Err(Error::Index(format!("setting '{id}' has an empty contour")));
                    }
                    p
                }
            };

            trigram_sets.insert(id.clone(), trigrams(&pitches));
            contours.insert(id, pitches);
        }

        Ok(Index {
            contours,
            trigrams: trigram_sets,
            tunes: raw.tunes,
            aliases: raw.aliases,
        })
    }

    pub fn load_from_path(path: &Path) -> Result<Index> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| Error::Index(format!("cannot read index file {path:?}: {e}")))?;
        Index::from_json(&data)
    }
}
