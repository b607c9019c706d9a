use wasm_bindgen::prelude::*;

use inlinemark::{EmphasisExtras, Extension};

fn extras_from(names: Option<String>) -> EmphasisExtras {
    match names {
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .filter_map(|name| name.parse::<Extension>().ok())
            .collect(),
        None => EmphasisExtras::DEFAULT,
    }
}

/// Outline of every paragraph in `input`, one per line. `extensions` is a
/// comma separated list; `None` enables all of them and unknown names are
/// ignored.
#[wasm_bindgen]
pub fn outline_inlines(input: &str, extensions: Option<String>) -> String {
    inlinemark::outline_document(input, extras_from(extensions))
}

#[wasm_bindgen]
pub fn cst_debug(input: &str, extensions: Option<String>) -> String {
    let tree = inlinemark::parse(input, extras_from(extensions));
    format!("{tree:#?}")
}
