//! # 结构来源
//!
//! 为网格步骤提供分子结构。没有结构时返回 `MissingStructure`。
//!
//! ## 依赖关系
//! - 被 `step/mod.rs`, `commands/` 使用
//! - 使用 `parsers/` 读取结构文件

use crate::error::{AmoGridError, Result};
use crate::models::Molecule;
use crate::parsers;
use std::path::PathBuf;

/// 分子结构的提供者
pub trait StructureSource {
    /// 当前结构；没有可用结构时返回 [`AmoGridError::MissingStructure`]
    fn molecule(&self) -> Result<Molecule>;
}

impl StructureSource for Molecule {
    fn molecule(&self) -> Result<Molecule> {
        Ok(self.clone())
    }
}

impl StructureSource for Option<Molecule> {
    fn molecule(&self) -> Result<Molecule> {
        self.clone().ok_or(AmoGridError::MissingStructure)
    }
}

/// 从结构文件读取（按扩展名识别格式）
#[derive(Debug, Clone)]
pub struct StructureFile {
    path: PathBuf,
}

impl StructureFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StructureSource for StructureFile {
    fn molecule(&self) -> Result<Molecule> {
        if !self.path.exists() {
            return Err(AmoGridError::MissingStructure);
        }
        parsers::parse_structure_file(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Atom;

    #[test]
    fn test_option_source() {
        let none: Option<Molecule> = None;
        assert!(matches!(none.molecule(), Err(AmoGridError::MissingStructure)));

        let some = Some(Molecule::new("he", vec![Atom::new("He", [0.0; 3])]));
        assert_eq!(some.molecule().unwrap().len(), 1);
    }

    #[test]
    fn test_structure_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("h2.xyz");
        std::fs::write(&path, "2\nh2\nH 0 0 0\nH 0 0 0.74\n").unwrap();

        let m = StructureFile::new(&path).molecule().unwrap();
        assert_eq!(m.name, "h2");

        let missing = StructureFile::new(dir.path().join("none.xyz"));
        assert!(matches!(
            missing.molecule(),
            Err(AmoGridError::MissingStructure)
        ));
    }
}
