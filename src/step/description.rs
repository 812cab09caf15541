//! # 步骤说明文本
//!
//! 根据当前参数生成“本步骤将做什么”的文字描述。
//!
//! ## 依赖关系
//! - 被 `step/mod.rs`, `commands/describe.rs` 使用
//! - 使用 `models/parameters.rs`

use crate::formatters::grid_input::format_float;
use crate::models::{AngularQuadrature, GridParameters, GridSettings};

/// 生成步骤说明（中心网格一段，原子网格一段）
pub fn description_text(params: &GridParameters) -> String {
    let central = &params.central;
    let atomic = &params.atomic;

    let mut text = format!(
        "Generate a grid for a scattering calculation. The central grid has an l-max of {} \
         using a {} quadrature for the angular portion, with {}",
        central.lmax,
        central.angular_quadrature,
        angular_details(central)
    );
    text.push_str(&format!(
        " The radial portion of the grid uses a {} quadrature, divided into {} regions.",
        central.radial_quadrature,
        central.region_count()
    ));

    text.push_str("\n\n");
    text.push_str(&format!(
        "The grid on each atom has an l-max of {} using a {} for the angular portion, with {}",
        atomic.lmax,
        atomic.angular_quadrature,
        angular_details(atomic)
    ));

    let n = atomic.region_points.first().copied().unwrap_or(0);
    let r = atomic
        .region_outer_limits
        .first()
        .map(|&r| format_float(r))
        .unwrap_or_default();
    text.push_str(&format!(
        " The radial portion of the grid uses a {} quadrature with {} points extending to {} from the atom.",
        atomic.radial_quadrature, n, r
    ));

    text
}

fn angular_details(grid: &GridSettings) -> String {
    match grid.angular_quadrature {
        AngularQuadrature::Lebedev => format!("Lebedev rule {}.", grid.lebedev_rule),
        AngularQuadrature::Gauss | AngularQuadrature::Mixed => format!(
            "a {} quadrature for phi using {} points and a {} quadrature for theta using {} points.",
            grid.phi_quadrature, grid.phi_points, grid.theta_quadrature, grid.theta_points
        ),
    }
}
