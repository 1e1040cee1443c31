use sha2::{Digest, Sha256};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

const BASE_STYLESHEET: &str = "styles.css";

fn main() {
    let Ok(manifest) = env::var("CARGO_MANIFEST_DIR") else {
        return;
    };
    let templates = Path::new(&manifest).join("src/templates");
    // Written into the source tree so `--ui-dir ./static` works without
    // copying anything out of target/
    let output = Path::new(&manifest).join("static");

    if !templates.exists() {
        return;
    }

    let sheets = stylesheets(&templates);
    println!("cargo:rerun-if-changed={}", templates.display());
    for sheet in &sheets {
        println!("cargo:rerun-if-changed={}", sheet.display());
    }

    let css = bundle(&templates, &sheets);
    if css.is_empty() {
        return;
    }

    let _ = fs::create_dir_all(&output);
    let minified = minify_css(&css);
    let short = write_hashed(&output, "styles", "min.css", &minified);
    println!(
        "cargo:warning=Built styles.min.css as styles.{}.min.css ({} -> {} bytes)",
        short,
        css.len(),
        minified.len()
    );
}

/// Every stylesheet under `templates`, the base sheet first and the
/// per-template ones after it in path order.
fn stylesheets(templates: &Path) -> Vec<PathBuf> {
    let base = templates.join(BASE_STYLESHEET);
    let mut sheets: Vec<PathBuf> = WalkDir::new(templates)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|e| e == "css"))
        .collect();
    sheets.sort_by_key(|p| (*p != base, p.clone()));
    sheets
}

/// Concatenates non-empty sheets, each under a header naming its source.
fn bundle(templates: &Path, sheets: &[PathBuf]) -> String {
    sheets
        .iter()
        .filter_map(|sheet| {
            let content = fs::read_to_string(sheet).ok()?;
            let content = content.trim();
            if content.is_empty() {
                return None;
            }
            let rel = sheet.strip_prefix(templates).unwrap_or(sheet);
            Some(format!("/* {} */\n{}\n", rel.display(), content))
        })
        .collect()
}

/// Drops comments, then joins tokens with single spaces except where CSS
/// punctuation makes the space redundant.
fn minify_css(css: &str) -> String {
    let mut text = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        text.push_str(&rest[..start]);
        text.push(' ');
        rest = match rest[start + 2..].find("*/") {
            Some(end) => &rest[start + 2 + end + 2..],
            None => "",
        };
    }
    text.push_str(rest);

    let mut out = String::with_capacity(text.len());
    for token in text.split_whitespace() {
        let glued = out.ends_with(['{', '}', ';', ':', ','])
            || token.starts_with(['{', '}', ';', ',']);
        if !out.is_empty() && !glued {
            out.push(' ');
        }
        out.push_str(token);
    }
    out.replace(";}", "}")
}

/// Writes `{stem}.{ext}` and a content-addressed `{stem}.{hash}.{ext}`
/// next to it, dropping stale hashed copies. Returns the short hash.
fn write_hashed(output: &Path, stem: &str, ext: &str, contents: &str) -> String {
    let hash = hex::encode(Sha256::digest(contents.as_bytes()));
    let short = hash[..8].to_string();

    let prefix = format!("{}.", stem);
    let suffix = format!(".{}", ext);
    if let Ok(entries) = fs::read_dir(output) {
        for entry in entries.filter_map(|e| e.ok()) {
            let name = entry.file_name();
            let stale = name
                .to_str()
                .and_then(|n| n.strip_prefix(&prefix))
                .and_then(|n| n.strip_suffix(&suffix))
                .is_some_and(|h| {
                    h.len() == 8 && h.chars().all(|c| c.is_ascii_hexdigit()) && h != short
                });
            if stale {
                let _ = fs::remove_file(entry.path());
            }
        }
    }

    let _ = fs::write(output.join(format!("{}.{}.{}", stem, short, ext)), contents);
    let _ = fs::write(output.join(format!("{}.{}", stem, ext)), contents);
    short
}
