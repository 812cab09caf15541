//! # 分子结构数据模型
//!
//! 原子符号 + 笛卡尔坐标 (Å) 的有序列表。网格以分子质心为原点。
//!
//! ## 依赖关系
//! - 被 `parsers/xyz.rs` 构造
//! - 被 `formatters/grid_input.rs`, `step/` 使用

use serde::{Deserialize, Serialize};

/// 原子
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    /// 元素符号
    pub element: String,

    /// 笛卡尔坐标 [x, y, z]
    pub position: [f64; 3],
}

impl Atom {
    pub fn new(element: impl Into<String>, position: [f64; 3]) -> Self {
        Atom {
            element: element.into(),
            position,
        }
    }
}

/// 分子
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Molecule {
    /// 结构名称
    pub name: String,

    /// 原子列表
    pub atoms: Vec<Atom>,
}

impl Molecule {
    pub fn new(name: impl Into<String>, atoms: Vec<Atom>) -> Self {
        Molecule {
            name: name.into(),
            atoms,
        }
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// 几何中心（各原子坐标的算术平均）；空分子返回 `None`
    pub fn centroid(&self) -> Option<[f64; 3]> {
        if self.atoms.is_empty() {
            return None;
        }

        let n = self.atoms.len() as f64;
        let mut c = [0.0; 3];
        for atom in &self.atoms {
            for k in 0..3 {
                c[k] += atom.position[k];
            }
        }
        Some([c[0] / n, c[1] / n, c[2] / n])
    }

    /// 以质心为原点的坐标
    pub fn centered_positions(&self) -> Vec<[f64; 3]> {
        let Some(c) = self.centroid() else {
            return Vec::new();
        };

        self.atoms
            .iter()
            .map(|a| {
                [
                    a.position[0] - c[0],
                    a.position[1] - c[1],
                    a.position[2] - c[2],
                ]
            })
            .collect()
    }

    /// 计算化学式
    pub fn formula(&self) -> String {
        use std::collections::BTreeMap;
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

        for atom in &self.atoms {
            *counts.entry(atom.element.as_str()).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .map(|(el, count)| {
                if count == 1 {
                    el.to_string()
                } else {
                    format!("{}{}", el, count)
                }
            })
            .collect::<Vec<_>>()
            .join("")
    }
}
