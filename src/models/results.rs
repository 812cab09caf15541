//! # 网格程序结果数据模型
//!
//! 五个固定结果（中心网格大小、原子网格大小、三项积分测试误差）
//! 以及结果属性说明和保存请求。
//!
//! ## 依赖关系
//! - 被 `parsers/grid_output.rs` 填充
//! - 被 `step/sink.rs`, `commands/` 使用

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 结果名称（声明顺序即输出顺序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ResultName {
    CentralGridSize,
    AtomicGridSize,
    SphereTest,
    YukawaTest,
    GaussianTest,
}

impl ResultName {
    pub const ALL: [ResultName; 5] = [
        ResultName::CentralGridSize,
        ResultName::AtomicGridSize,
        ResultName::SphereTest,
        ResultName::YukawaTest,
        ResultName::GaussianTest,
    ];

    /// 积分测试的填充顺序
    pub const TESTS: [ResultName; 3] = [
        ResultName::SphereTest,
        ResultName::YukawaTest,
        ResultName::GaussianTest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResultName::CentralGridSize => "Central grid size",
            ResultName::AtomicGridSize => "Atomic grid size",
            ResultName::SphereTest => "Sphere test",
            ResultName::YukawaTest => "Yukawa test",
            ResultName::GaussianTest => "Gaussian test",
        }
    }
}

impl std::fmt::Display for ResultName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResultName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResultName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown result '{}'. Known results: {}",
                    s,
                    ResultName::ALL
                        .iter()
                        .map(|n| n.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

impl TryFrom<String> for ResultName {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ResultName> for String {
    fn from(name: ResultName) -> String {
        name.as_str().to_string()
    }
}

/// 结果数值
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultValue {
    Integer(i64),
    Float(f64),
}

impl ResultValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            ResultValue::Integer(_) => ValueType::Integer,
            ResultValue::Float(_) => ValueType::Float,
        }
    }
}

impl std::fmt::Display for ResultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultValue::Integer(v) => write!(f, "{}", v),
            ResultValue::Float(v) => write!(f, "{}", v),
        }
    }
}

/// 结果的数据类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Integer,
    Float,
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::Integer => write!(f, "integer"),
            ValueType::Float => write!(f, "float"),
        }
    }
}

/// 结果属性说明
#[derive(Debug, Clone)]
pub struct PropertySpec {
    pub name: ResultName,
    pub description: &'static str,
    pub dimensionality: &'static str,
    pub value_type: ValueType,
}

/// 本步骤可产生的全部结果属性
pub fn properties() -> Vec<PropertySpec> {
    let spec = |name, description, value_type| PropertySpec {
        name,
        description,
        dimensionality: "scalar",
        value_type,
    };

    vec![
        spec(
            ResultName::CentralGridSize,
            "Number of points in the central grid",
            ValueType::Integer,
        ),
        spec(
            ResultName::AtomicGridSize,
            "Number of points in each atomic grid",
            ValueType::Integer,
        ),
        spec(
            ResultName::SphereTest,
            "Percent error for integral over sphere",
            ValueType::Float,
        ),
        spec(
            ResultName::YukawaTest,
            "Percent error for integral of Yukawa function",
            ValueType::Float,
        ),
        spec(
            ResultName::GaussianTest,
            "Percent error for integral over Gaussian",
            ValueType::Float,
        ),
    ]
}

/// 单个结果的保存请求：存入变量和/或表格的某一列
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResultRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    /// 表格列名，缺省为结果名称
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

/// 一次网格程序运行的结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultRecord {
    pub central_grid_size: Option<i64>,
    pub atomic_grid_size: Option<i64>,
    pub sphere_test: Option<f64>,
    pub yukawa_test: Option<f64>,
    pub gaussian_test: Option<f64>,

    /// 第四个及以后的 "percent diff:" 数值，没有对应的测试项
    pub unassigned_tests: Vec<f64>,
}

impl ResultRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取单个结果
    pub fn get(&self, name: ResultName) -> Option<ResultValue> {
        match name {
            ResultName::CentralGridSize => self.central_grid_size.map(ResultValue::Integer),
            ResultName::AtomicGridSize => self.atomic_grid_size.map(ResultValue::Integer),
            ResultName::SphereTest => self.sphere_test.map(ResultValue::Float),
            ResultName::YukawaTest => self.yukawa_test.map(ResultValue::Float),
            ResultName::GaussianTest => self.gaussian_test.map(ResultValue::Float),
        }
    }

    fn test_slot(&mut self, name: ResultName) -> Option<&mut Option<f64>> {
        match name {
            ResultName::SphereTest => Some(&mut self.sphere_test),
            ResultName::YukawaTest => Some(&mut self.yukawa_test),
            ResultName::GaussianTest => Some(&mut self.gaussian_test),
            _ => None,
        }
    }

    /// 按 Sphere → Yukawa → Gaussian 顺序填入下一个空缺的测试项，
    /// 全部填满时返回 `None` 并记入 `unassigned_tests`
    pub fn push_test(&mut self, value: f64) -> Option<ResultName> {
        for name in ResultName::TESTS {
            if let Some(slot) = self.test_slot(name) {
                if slot.is_none() {
                    *slot = Some(value);
                    return Some(name);
                }
            }
        }
        self.unassigned_tests.push(value);
        None
    }

    /// 已解析到的结果（名称 -> 数值）
    pub fn data(&self) -> BTreeMap<ResultName, ResultValue> {
        ResultName::ALL
            .iter()
            .filter_map(|&name| self.get(name).map(|v| (name, v)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.data().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_name_round_trip_through_strings() {
        for name in ResultName::ALL {
            assert_eq!(name.as_str().parse::<ResultName>().unwrap(), name);
        }
        assert_eq!(
            "sphere TEST".parse::<ResultName>().unwrap(),
            ResultName::SphereTest
        );
        assert!("Cube test".parse::<ResultName>().is_err());
    }

    #[test]
    fn test_push_test_fills_slots_in_order() {
        let mut record = ResultRecord::new();
        assert_eq!(record.push_test(0.5), Some(ResultName::SphereTest));
        assert_eq!(record.push_test(1.2), Some(ResultName::YukawaTest));
        assert_eq!(record.push_test(2.9), Some(ResultName::GaussianTest));
        assert_eq!(record.push_test(7.0), None);

        assert_eq!(record.sphere_test, Some(0.5));
        assert_eq!(record.yukawa_test, Some(1.2));
        assert_eq!(record.gaussian_test, Some(2.9));
        assert_eq!(record.unassigned_tests, vec![7.0]);
    }

    #[test]
    fn test_data_contains_only_present_keys() {
        let mut record = ResultRecord::new();
        assert!(record.is_empty());

        record.central_grid_size = Some(300);
        record.push_test(0.25);
        let data = record.data();

        assert_eq!(data.len(), 2);
        assert_eq!(
            data[&ResultName::CentralGridSize],
            ResultValue::Integer(300)
        );
        assert_eq!(data[&ResultName::SphereTest], ResultValue::Float(0.25));
        assert!(!data.contains_key(&ResultName::AtomicGridSize));
    }

    #[test]
    fn test_properties_cover_every_result() {
        let props = properties();
        assert_eq!(props.len(), ResultName::ALL.len());
        for name in ResultName::ALL {
            assert!(props.iter().any(|p| p.name == name));
        }
    }
}
