//! # XYZ 格式解析器
//!
//! 解析分子结构的 XYZ 文件（笛卡尔坐标，Å）。
//!
//! ## .xyz 格式说明
//! ```text
//! 3                      # 原子数
//! water                  # 注释行（结构名称）
//! O   0.0000  0.0000  0.1173
//! H   0.0000  0.7572 -0.4692
//! H   0.0000 -0.7572 -0.4692
//! ```
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs`, `step/source.rs` 使用
//! - 使用 `models/molecule.rs`

use crate::error::{AmoGridError, Result};
use crate::models::{Atom, Molecule};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// 解析 .xyz 文件
pub fn parse_xyz_file(path: &Path) -> Result<Molecule> {
    let content = fs::read_to_string(path).map_err(|e| AmoGridError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_xyz_content(
        &content,
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown"),
    )
}

/// 从字符串内容解析 XYZ 格式
pub fn parse_xyz_content(content: &str, default_name: &str) -> Result<Molecule> {
    let parse_error = |reason: String| AmoGridError::ParseError {
        format: "xyz".to_string(),
        path: default_name.to_string(),
        reason,
    };

    let mut lines = content.lines();

    // Line 0: 原子数
    let count_line = lines
        .next()
        .ok_or_else(|| parse_error("File is empty".to_string()))?;
    let n_atoms: usize = count_line
        .trim()
        .parse()
        .map_err(|_| parse_error(format!("Invalid atom count '{}'", count_line.trim())))?;

    // Line 1: 注释/名称
    let comment = lines.next().unwrap_or("").trim();
    let name = if comment.is_empty() {
        default_name
    } else {
        comment
    };

    let mut atoms = Vec::with_capacity(n_atoms);
    for (i, line) in lines.enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if atoms.len() == n_atoms {
            break;
        }

        let line_no = i + 3;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(parse_error(format!(
                "Expected 'element x y z' at line {}",
                line_no
            )));
        }

        let element = parts[0];
        if !element_pattern().is_match(element) {
            return Err(parse_error(format!(
                "Invalid element symbol '{}' at line {}",
                element, line_no
            )));
        }

        let mut position = [0.0; 3];
        for k in 0..3 {
            position[k] = parts[k + 1].parse().map_err(|_| {
                parse_error(format!(
                    "Invalid coordinate '{}' at line {}",
                    parts[k + 1],
                    line_no
                ))
            })?;
        }

        atoms.push(Atom::new(normalize_element(element), position));
    }

    if atoms.len() != n_atoms {
        return Err(parse_error(format!(
            "Header declares {} atoms but {} were found",
            n_atoms,
            atoms.len()
        )));
    }

    Ok(Molecule::new(name, atoms))
}

/// 元素符号，允许带数字标签（如 C1、H12）
fn element_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z]{1,2}[0-9]*$").expect("valid element regex"))
}

/// 去掉数字标签并规范大小写 (cl1 -> Cl)
fn normalize_element(symbol: &str) -> String {
    let letters: String = symbol.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
    let mut chars = letters.chars();
    match chars.next() {
        Some(first) => {
            first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
        }
        None => String::new(),
    }
}

/// 将分子写成 XYZ 格式字符串
pub fn to_xyz_string(molecule: &Molecule) -> String {
    let mut result = format!("{}\n{}\n", molecule.len(), molecule.name);
    for atom in &molecule.atoms {
        result.push_str(&format!(
            "{:<4} {:14.8} {:14.8} {:14.8}\n",
            atom.element, atom.position[0], atom.position[1], atom.position[2]
        ));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATER: &str = "3
water
O   0.0000  0.0000  0.1173
H   0.0000  0.7572 -0.4692
H   0.0000 -0.7572 -0.4692
";

    #[test]
    fn test_parse_xyz() {
        let m = parse_xyz_content(WATER, "default").unwrap();
        assert_eq!(m.name, "water");
        assert_eq!(m.len(), 3);
        assert_eq!(m.atoms[0].element, "O");
        assert!((m.atoms[1].position[1] - 0.7572).abs() < 1e-12);
        assert!((m.atoms[2].position[2] + 0.4692).abs() < 1e-12);
    }

    #[test]
    fn test_blank_comment_uses_default_name() {
        let content = "1\n\nHe 0 0 0\n";
        let m = parse_xyz_content(content, "helium").unwrap();
        assert_eq!(m.name, "helium");
    }

    #[test]
    fn test_element_labels_are_normalized() {
        let content = "2\nlabels\ncl1 0 0 0\nNA12 1 0 0\n";
        let m = parse_xyz_content(content, "x").unwrap();
        assert_eq!(m.atoms[0].element, "Cl");
        assert_eq!(m.atoms[1].element, "Na");
    }

    #[test]
    fn test_atom_count_mismatch() {
        let content = "4\nshort\nH 0 0 0\nH 0 0 0.74\n";
        let err = parse_xyz_content(content, "short").unwrap_err();
        assert!(matches!(err, AmoGridError::ParseError { .. }));
    }

    #[test]
    fn test_bad_coordinate() {
        let content = "1\nbad\nH 0 zero 0\n";
        assert!(parse_xyz_content(content, "bad").is_err());
    }

    #[test]
    fn test_bad_element() {
        let content = "1\nbad\n12 0 0 0\n";
        assert!(parse_xyz_content(content, "bad").is_err());
    }

    #[test]
    fn test_empty_file() {
        assert!(parse_xyz_content("", "empty").is_err());
    }

    #[test]
    fn test_xyz_round_trip() {
        let m = parse_xyz_content(WATER, "default").unwrap();
        let text = to_xyz_string(&m);
        let parsed = parse_xyz_content(&text, "round_trip").unwrap();
        assert_eq!(parsed.name, "water");
        assert_eq!(parsed.len(), 3);
        assert!((parsed.atoms[0].position[2] - 0.1173).abs() < 1e-8);
    }
}
