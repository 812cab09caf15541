//! # 数据模型模块
//!
//! 定义分子结构、网格参数与运行结果的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `formatters/`, `step/` 和 `commands/` 使用
//! - 子模块: molecule, parameters, results

pub mod molecule;
pub mod parameters;
pub mod results;

pub use molecule::{Atom, Molecule};
pub use parameters::{
    AngularQuadrature, GridParameters, GridSettings, ParameterInfo, PhiQuadrature,
    RadialQuadrature, ThetaQuadrature,
};
pub use results::{
    properties, PropertySpec, ResultName, ResultRecord, ResultRequest, ResultValue, ValueType,
};
