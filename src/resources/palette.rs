//! Pywal palette loading and stylesheet rewriting.
//!
//! Pywal writes its generated palette to `~/.cache/wal/colors.json`. The
//! values are injected into stylesheets by rewriting CSS custom property
//! declarations in place (`--color0` through `--color15`, plus
//! `--background`, `--foreground` and `--cursor`), leaving the rest of the
//! stylesheet untouched.
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::Deserialize;

/// The parts of a pywal `colors.json` this tool consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct Palette {
    /// `color0` through `color15` hex values.
    pub colors: HashMap<String, String>,
    /// Background, foreground and cursor hex values.
    pub special: SpecialColors,
    /// Wallpaper the palette was generated from, if recorded.
    #[serde(default)]
    pub wallpaper: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpecialColors {
    pub background: String,
    pub foreground: String,
    pub cursor: String,
}

impl Palette {
    /// CSS custom properties derived from this palette, in declaration
    /// order: `--color0` .. `--color15`, then the special colors.
    #[must_use]
    pub fn css_variables(&self) -> Vec<(String, String)> {
        let mut vars = Vec::with_capacity(19);
        for i in 0..16 {
            let key = format!("color{i}");
            if let Some(hex) = self.colors.get(&key) {
                vars.push((format!("--{key}"), hex.clone()));
            }
        }
        vars.push(("--background".to_string(), self.special.background.clone()));
        vars.push(("--foreground".to_string(), self.special.foreground.clone()));
        vars.push(("--cursor".to_string(), self.special.cursor.clone()));
        vars
    }
}

/// Default pywal palette location under the user's home directory.
#[must_use]
pub fn default_palette_path(home: &Path) -> PathBuf {
    home.join(".cache").join("wal").join("colors.json")
}

/// Load and parse a pywal palette file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid pywal JSON.
pub fn load_palette(path: &Path) -> Result<Palette> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading palette {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing palette {}", path.display()))
}

/// Rewrite custom property declarations in `css` with the given variables.
///
/// Returns the rewritten stylesheet and the number of declarations changed.
/// Only `name: value` declarations are touched; *uses* of a variable
/// (`var(--color0)`) and unrelated properties are left as-is.
#[must_use]
pub fn apply_to_css(css: &str, vars: &[(String, String)]) -> (String, usize) {
    let mut out = css.to_string();
    let mut total = 0;
    for (name, value) in vars {
        let (rewritten, count) = rewrite_declarations(&out, name, value);
        out = rewritten;
        total += count;
    }
    (out, total)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Replace the value of every `name: old;` declaration with `value`.
///
/// Token boundaries are respected so `--color1` never matches inside
/// `--color10`. The declaration terminator (`;`, `}` or end of line) is
/// preserved.
fn rewrite_declarations(css: &str, name: &str, value: &str) -> (String, usize) {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    let mut count = 0;

    while let Some(pos) = rest.find(name) {
        let prefix = &rest[..pos];
        let tail = &rest[pos + name.len()..];
        let prev = if prefix.is_empty() {
            out.chars().next_back()
        } else {
            prefix.chars().next_back()
        };
        out.push_str(prefix);
        out.push_str(name);

        let ws_len = tail.len() - tail.trim_start_matches([' ', '\t']).len();
        let after_ws = &tail[ws_len..];
        let starts_declaration = !prev.is_some_and(is_ident_char)
            && !tail.starts_with(is_ident_char)
            && after_ws.starts_with(':');

        if starts_declaration {
            let old_value = &after_ws[1..];
            let end = old_value
                .find([';', '}', '\n'])
                .unwrap_or(old_value.len());
            out.push_str(&tail[..ws_len]);
            out.push_str(": ");
            out.push_str(value);
            rest = &old_value[end..];
            count += 1;
        } else {
            rest = tail;
        }
    }
    out.push_str(rest);
    (out, count)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn sample_palette() -> Palette {
        let json = r##"{
            "wallpaper": "C:\\walls\\night.png",
            "special": {
                "background": "#0d0e11",
                "foreground": "#c5c8c9",
                "cursor": "#c5c8c9"
            },
            "colors": {
                "color0": "#0d0e11",
                "color1": "#3a4d5e",
                "color10": "#aabbcc",
                "color15": "#c5c8c9"
            }
        }"##;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn load_palette_parses_pywal_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colors.json");
        std::fs::write(
            &path,
            r##"{"special":{"background":"#000000","foreground":"#ffffff","cursor":"#ffffff"},"colors":{"color0":"#000000"}}"##,
        )
        .unwrap();

        let palette = load_palette(&path).unwrap();
        assert_eq!(palette.special.background, "#000000");
        assert_eq!(palette.colors.get("color0").unwrap(), "#000000");
        assert!(palette.wallpaper.is_none());
    }

    #[test]
    fn load_palette_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_palette(&dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn css_variables_in_numeric_order() {
        let vars = sample_palette().css_variables();
        let names: Vec<&str> = vars.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "--color0",
                "--color1",
                "--color10",
                "--color15",
                "--background",
                "--foreground",
                "--cursor"
            ]
        );
    }

    #[test]
    fn rewrites_declaration_values() {
        let css = ":root {\n    --color0: #ffffff;\n    --background: #ffffff;\n}\n";
        let vars = sample_palette().css_variables();
        let (out, count) = apply_to_css(css, &vars);
        assert_eq!(count, 2);
        assert!(out.contains("--color0: #0d0e11;"));
        assert!(out.contains("--background: #0d0e11;"));
    }

    #[test]
    fn color1_does_not_match_color10() {
        let css = "--color1: #111111;\n--color10: #101010;\n";
        let vars = sample_palette().css_variables();
        let (out, count) = apply_to_css(css, &vars);
        assert_eq!(count, 2);
        assert!(out.contains("--color1: #3a4d5e;"));
        assert!(out.contains("--color10: #aabbcc;"));
    }

    #[test]
    fn variable_uses_are_left_alone() {
        let css = ".bar { color: var(--color0); }\n";
        let vars = sample_palette().css_variables();
        let (out, count) = apply_to_css(css, &vars);
        assert_eq!(count, 0);
        assert_eq!(out, css);
    }

    #[test]
    fn unrelated_properties_untouched() {
        let css = "--colorful: red;\n--color0: #fff;\n";
        let vars = sample_palette().css_variables();
        let (out, count) = apply_to_css(css, &vars);
        assert_eq!(count, 1);
        assert!(out.contains("--colorful: red;"));
        assert!(out.contains("--color0: #0d0e11;"));
    }

    #[test]
    fn preserves_indentation_and_terminator() {
        let css = "\t--color15: #000\n";
        let vars = sample_palette().css_variables();
        let (out, _) = apply_to_css(css, &vars);
        assert_eq!(out, "\t--color15: #c5c8c9\n");
    }
}
