//! # 网格控制参数
//!
//! 中心网格与原子网格的全部控制参数，带默认值、枚举选项与参数说明表。
//!
//! ## 参数文件格式 (TOML)
//! ```text
//! create-tables = true
//!
//! [central]
//! lmax = 40
//! angular-quadrature = "mixed"
//! region-points = [100, 50]
//! region-outer-limits = [20.0, 30.0]
//!
//! [atomic]
//! region-points = 20          # 标量自动转换为单元素列表
//!
//! [results."Central grid size"]
//! variable = "n_central"
//! table = "grids"
//! ```
//!
//! ## 依赖关系
//! - 被 `formatters/`, `step/`, `commands/` 使用
//! - 使用 `models/results.rs` (结果请求)

use crate::error::{AmoGridError, Result};
use crate::models::results::{ResultName, ResultRequest};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// 定义大小写不敏感的枚举选项，序列化时使用规范拼写
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// 全部可选值（规范拼写）
            pub const CHOICES: &'static [&'static str] = &[$($text),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                $(
                    if s.trim().eq_ignore_ascii_case($text) {
                        return Ok($name::$variant);
                    }
                )+
                Err(format!(
                    "'{}' is not one of: {}",
                    s,
                    Self::CHOICES.join(", ")
                ))
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.as_str().to_string()
            }
        }
    };
}

choice_enum! {
    /// 角向积分方法
    AngularQuadrature {
        Lebedev => "Lebedev",
        Gauss => "Gauss",
        Mixed => "mixed",
    }
}

choice_enum! {
    /// 径向积分方法
    RadialQuadrature {
        Legendre => "Legendre",
        Gauss => "Gauss",
    }
}

choice_enum! {
    /// phi 方向积分方法
    PhiQuadrature {
        Trapezoidal => "trapezoidal",
    }
}

choice_enum! {
    /// theta 方向积分方法
    ThetaQuadrature {
        Legendre => "Legendre",
    }
}

/// 单个网格（中心或原子）的参数
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct GridSettings {
    /// 角向网格的最大角动量
    pub lmax: u32,
    pub angular_quadrature: AngularQuadrature,
    pub lebedev_rule: u32,
    pub phi_quadrature: PhiQuadrature,
    pub phi_points: u32,
    pub theta_quadrature: ThetaQuadrature,
    pub theta_points: u32,
    pub radial_quadrature: RadialQuadrature,
    /// 每个径向区间的点数
    pub region_points: Vec<u32>,
    /// 每个径向区间的外边界 (Å)
    pub region_outer_limits: Vec<f64>,
}

impl GridSettings {
    /// 中心网格默认值
    pub fn central() -> Self {
        GridSettings {
            lmax: 40,
            angular_quadrature: AngularQuadrature::Mixed,
            lebedev_rule: 35,
            phi_quadrature: PhiQuadrature::Trapezoidal,
            phi_points: 3,
            theta_quadrature: ThetaQuadrature::Legendre,
            theta_points: 50,
            radial_quadrature: RadialQuadrature::Legendre,
            region_points: vec![100, 50],
            region_outer_limits: vec![20.0, 30.0],
        }
    }

    /// 原子网格默认值
    pub fn atomic() -> Self {
        GridSettings {
            lmax: 3,
            angular_quadrature: AngularQuadrature::Mixed,
            lebedev_rule: 17,
            phi_quadrature: PhiQuadrature::Trapezoidal,
            phi_points: 3,
            theta_quadrature: ThetaQuadrature::Legendre,
            theta_points: 10,
            radial_quadrature: RadialQuadrature::Legendre,
            region_points: vec![20],
            region_outer_limits: vec![5.0],
        }
    }

    /// 径向区间数
    pub fn region_count(&self) -> usize {
        self.region_points.len()
    }

    fn apply(&mut self, partial: PartialGridSettings) {
        if let Some(v) = partial.lmax {
            self.lmax = v;
        }
        if let Some(v) = partial.angular_quadrature {
            self.angular_quadrature = v;
        }
        if let Some(v) = partial.lebedev_rule {
            self.lebedev_rule = v;
        }
        if let Some(v) = partial.phi_quadrature {
            self.phi_quadrature = v;
        }
        if let Some(v) = partial.phi_points {
            self.phi_points = v;
        }
        if let Some(v) = partial.theta_quadrature {
            self.theta_quadrature = v;
        }
        if let Some(v) = partial.theta_points {
            self.theta_points = v;
        }
        if let Some(v) = partial.radial_quadrature {
            self.radial_quadrature = v;
        }
        if let Some(v) = partial.region_points {
            self.region_points = v.into_vec();
        }
        if let Some(v) = partial.region_outer_limits {
            self.region_outer_limits = v.into_vec();
        }
    }

    fn validate(&self, family: &str) -> Result<()> {
        let invalid = |field: &str, reason: String| AmoGridError::InvalidParameter {
            name: format!("{} grid {}", family, field),
            reason,
        };

        if self.region_points.is_empty() {
            return Err(invalid(
                "region n-points",
                "at least one radial region is required".to_string(),
            ));
        }
        if self.region_points.len() != self.region_outer_limits.len() {
            return Err(invalid(
                "region outer limit",
                format!(
                    "{} outer limits given for {} regions",
                    self.region_outer_limits.len(),
                    self.region_points.len()
                ),
            ));
        }
        if let Some(n) = self.region_points.iter().find(|&&n| n == 0) {
            return Err(invalid(
                "region n-points",
                format!("a region must have at least one point, got {}", n),
            ));
        }

        let mut previous = 0.0;
        for &limit in &self.region_outer_limits {
            if !limit.is_finite() || limit <= previous {
                return Err(invalid(
                    "region outer limit",
                    format!(
                        "outer limits must be finite and increasing from 0.0, got {}",
                        limit
                    ),
                ));
            }
            previous = limit;
        }

        Ok(())
    }
}

/// AMO 网格步骤的全部参数
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct GridParameters {
    /// 保存结果时是否按需创建表格
    pub create_tables: bool,
    pub central: GridSettings,
    pub atomic: GridSettings,
    /// 需要保存到变量或表格中的结果
    pub results: BTreeMap<ResultName, ResultRequest>,
}

impl Default for GridParameters {
    fn default() -> Self {
        GridParameters {
            create_tables: true,
            central: GridSettings::central(),
            atomic: GridSettings::atomic(),
            results: BTreeMap::new(),
        }
    }
}

impl GridParameters {
    /// 从 TOML 文件读取参数（未给出的参数使用默认值）
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| AmoGridError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// 从 TOML 字符串读取参数
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let partial: PartialGridParameters = toml::from_str(content)?;

        let mut params = GridParameters::default();
        if let Some(v) = partial.create_tables {
            params.create_tables = v;
        }
        if let Some(central) = partial.central {
            params.central.apply(central);
        }
        if let Some(atomic) = partial.atomic {
            params.atomic.apply(atomic);
        }
        for (key, request) in partial.results {
            let name: ResultName =
                key.parse()
                    .map_err(|reason| AmoGridError::InvalidParameter {
                        name: "results".to_string(),
                        reason,
                    })?;
            params.results.insert(name, request);
        }

        params.validate()?;
        Ok(params)
    }

    /// 可选参数文件：未指定时使用默认值
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    /// 检查参数的一致性
    pub fn validate(&self) -> Result<()> {
        self.central.validate("central")?;
        self.atomic.validate("atomic")?;
        Ok(())
    }

    /// 以 TOML 格式输出全部参数
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| AmoGridError::Other(e.to_string()))
    }

    /// 参数说明表，带当前取值
    pub fn schema(&self) -> Vec<ParameterInfo> {
        let mut rows = Vec::new();
        for (family, grid) in [("central", &self.central), ("atomic", &self.atomic)] {
            rows.extend(grid_schema(family, grid));
        }
        rows.push(ParameterInfo {
            key: "create tables".to_string(),
            kind: "boolean",
            value: if self.create_tables { "yes" } else { "no" }.to_string(),
            units: "",
            choices: "yes, no".to_string(),
            description: "Whether to create tables as needed for results being saved into tables.",
        });
        rows.push(ParameterInfo {
            key: "results".to_string(),
            kind: "dictionary",
            value: format!("{} requested", self.results.len()),
            units: "",
            choices: String::new(),
            description: "The results to save to variables or in tables.",
        });
        rows
    }
}

/// 参数说明条目
#[derive(Debug, Clone)]
pub struct ParameterInfo {
    pub key: String,
    pub kind: &'static str,
    pub value: String,
    pub units: &'static str,
    pub choices: String,
    pub description: &'static str,
}

fn grid_schema(family: &str, grid: &GridSettings) -> Vec<ParameterInfo> {
    let entry = |name: &str,
                 kind: &'static str,
                 value: String,
                 units: &'static str,
                 choices: &[&str],
                 description: &'static str| ParameterInfo {
        key: format!("{} grid {}", family, name),
        kind,
        value,
        units,
        choices: choices.join(", "),
        description,
    };

    vec![
        entry(
            "lmax",
            "integer",
            grid.lmax.to_string(),
            "",
            &[],
            "The maximum L values for the angular grid.",
        ),
        entry(
            "angular quadrature",
            "enumeration",
            grid.angular_quadrature.to_string(),
            "",
            AngularQuadrature::CHOICES,
            "The quadrature method for the angular grid.",
        ),
        entry(
            "Lebedev rule",
            "integer",
            grid.lebedev_rule.to_string(),
            "",
            &[],
            "The number of the Lebedev rule to use in the angular grid.",
        ),
        entry(
            "phi quadrature",
            "enumeration",
            grid.phi_quadrature.to_string(),
            "",
            PhiQuadrature::CHOICES,
            "The quadrature method for the phi part of the angular grid.",
        ),
        entry(
            "phi n-points",
            "integer",
            grid.phi_points.to_string(),
            "",
            &[],
            "The number of points to use in the phi part of the angular grid.",
        ),
        entry(
            "theta quadrature",
            "enumeration",
            grid.theta_quadrature.to_string(),
            "",
            ThetaQuadrature::CHOICES,
            "The quadrature method for the theta part of the angular grid.",
        ),
        entry(
            "theta n-points",
            "integer",
            grid.theta_points.to_string(),
            "",
            &[],
            "The number of points to use in the theta part of the angular grid.",
        ),
        entry(
            "radial quadrature",
            "enumeration",
            grid.radial_quadrature.to_string(),
            "",
            RadialQuadrature::CHOICES,
            "The quadrature method for the radial grid.",
        ),
        entry(
            "region n-points",
            "list",
            format!("{:?}", grid.region_points),
            "",
            &[],
            "The number of points in this region of the radial grid.",
        ),
        entry(
            "region outer limit",
            "list",
            format!("{:?}", grid.region_outer_limits),
            "Å",
            &[],
            "The outer edge of this region of the radial grid.",
        ),
    ]
}

// ─────────────────────────────────────────────────────────────
// 参数文件的部分配置（缺省字段取默认值）
// ─────────────────────────────────────────────────────────────

/// 标量或列表
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(v) => vec![v],
            OneOrMany::Many(v) => v,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialGridSettings {
    lmax: Option<u32>,
    angular_quadrature: Option<AngularQuadrature>,
    lebedev_rule: Option<u32>,
    phi_quadrature: Option<PhiQuadrature>,
    phi_points: Option<u32>,
    theta_quadrature: Option<ThetaQuadrature>,
    theta_points: Option<u32>,
    radial_quadrature: Option<RadialQuadrature>,
    region_points: Option<OneOrMany<u32>>,
    region_outer_limits: Option<OneOrMany<f64>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct PartialGridParameters {
    create_tables: Option<bool>,
    central: Option<PartialGridSettings>,
    atomic: Option<PartialGridSettings>,
    #[serde(default)]
    results: BTreeMap<String, ResultRequest>,
}
