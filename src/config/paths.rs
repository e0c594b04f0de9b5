//! Path template expansion against an injected environment map.
//!
//! Deployment targets are written as templates like
//! `$HOME/.config/yasb/styles.css` or `%LOCALAPPDATA%/wezterm/wezterm.lua`.
//! Expansion takes an explicit key-value map rather than reading the process
//! environment so tests can inject synthetic paths.

use std::collections::HashMap;

/// Capture the current process environment as an expansion map.
#[must_use]
pub fn env_map() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// Expand `$VAR`, `${VAR}` and `%VAR%` placeholders in `template`.
///
/// Unknown variables are left untouched so the failure surfaces at the
/// filesystem operation with the literal placeholder visible in the path.
#[must_use]
pub fn expand_env(template: &str, vars: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut i = 0;
    let bytes = template.as_bytes();

    while i < bytes.len() {
        match bytes[i] {
            b'$' if i + 1 < bytes.len() && bytes[i + 1] == b'{' => {
                if let Some(off) = template[i + 2..].find('}') {
                    let name = &template[i + 2..i + 2 + off];
                    match vars.get(name) {
                        Some(value) => out.push_str(value),
                        None => out.push_str(&template[i..=i + 2 + off]),
                    }
                    i += off + 3;
                } else {
                    out.push('$');
                    i += 1;
                }
            }
            b'$' => {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && is_var_byte(bytes[end]) {
                    end += 1;
                }
                if end > start {
                    let name = &template[start..end];
                    match vars.get(name) {
                        Some(value) => out.push_str(value),
                        None => out.push_str(&template[i..end]),
                    }
                    i = end;
                } else {
                    out.push('$');
                    i += 1;
                }
            }
            b'%' => {
                let expanded = template[i + 1..].find('%').and_then(|off| {
                    let name = &template[i + 1..i + 1 + off];
                    if name.is_empty() || !name.bytes().all(is_var_byte) {
                        return None;
                    }
                    Some((off, vars.get(name)))
                });
                match expanded {
                    Some((off, Some(value))) => {
                        out.push_str(value);
                        i += off + 2;
                    }
                    Some((off, None)) => {
                        out.push_str(&template[i..=i + 1 + off]);
                        i += off + 2;
                    }
                    None => {
                        out.push('%');
                        i += 1;
                    }
                }
            }
            _ => {
                if let Some(c) = template[i..].chars().next() {
                    out.push(c);
                    i += c.len_utf8();
                } else {
                    break;
                }
            }
        }
    }

    out
}

const fn is_var_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
