//! # 网格程序输入文件生成
//!
//! 将网格参数与分子结构写成 amo_grid 读取的分段 key = value 文本。
//!
//! ## 输入文件格式
//! ```text
//! [DEFAULTS]
//!       number_of_atoms = 3
//!     r_type_quadrature = legendre
//!     angular_quad_type = mixed
//!
//! ## central grid ##
//!
//! [center]
//!            region_num = 2
//!        r_origin_fixed = 0
//!         r_endpt_fixed = 1
//!           r_intervals = 0.0, 20.0, 30.0
//!       r_num_shell_pts = 100, 50
//! ...
//! [atom_1]
//!           atom_center = 0.0, 0.0, 0.0
//! ...
//! ```
//! 段落与键的顺序对外部程序有意义，不可调整。
//!
//! ## 依赖关系
//! - 被 `step/mod.rs`, `commands/input.rs` 使用
//! - 使用 `models/parameters.rs`, `models/molecule.rs`

use crate::error::{AmoGridError, Result};
use crate::models::{AngularQuadrature, GridParameters, GridSettings, Molecule};

/// 键名右对齐宽度
const LABEL_WIDTH: usize = 21;

/// 生成网格程序的输入文本（各行以 `\n` 连接，末尾无换行）
pub fn format_input(params: &GridParameters, molecule: &Molecule) -> Result<String> {
    if molecule.is_empty() {
        return Err(AmoGridError::MissingStructure);
    }
    // 参数结构体字段公开，调用方可能绕过文件加载时的检查
    params.validate()?;

    let central = &params.central;
    let atomic = &params.atomic;
    let mut lines: Vec<String> = Vec::new();

    lines.push("[DEFAULTS]".to_string());
    lines.push(field("number_of_atoms", molecule.len()));
    lines.push(field(
        "r_type_quadrature",
        central.radial_quadrature.as_str().to_lowercase(),
    ));
    lines.push(field(
        "angular_quad_type",
        central.angular_quadrature.as_str().to_lowercase(),
    ));
    lines.push(String::new());
    lines.push("## central grid ##".to_string());
    lines.push(String::new());

    lines.push("[center]".to_string());
    push_regions(&mut lines, central);
    lines.push(String::new());
    lines.push(field("cent_lmax", central.lmax));
    push_angular(&mut lines, central, central.angular_quadrature);

    lines.push(String::new());
    lines.push("## Atom-centered grids ##".to_string());

    for (i, (atom, center)) in molecule
        .atoms
        .iter()
        .zip(molecule.centered_positions())
        .enumerate()
    {
        let n = i + 1;
        lines.push(String::new());
        lines.push(format!("## atom {}: {} ##", n, atom.element));
        lines.push(format!("[atom_{}]", n));
        lines.push(field(
            "atom_center",
            format!(
                "{}, {}, {}",
                format_float(center[0]),
                format_float(center[1]),
                format_float(center[2])
            ),
        ));
        lines.push(field(
            "r_type_quadrature",
            atomic.radial_quadrature.as_str().to_lowercase(),
        ));
        push_regions(&mut lines, atomic);
        lines.push(String::new());
        lines.push(field("lmax", atomic.lmax));
        lines.push(field("angular_quad_type", atomic.angular_quadrature));
        // 原子网格的角向字段由中心网格的角向方法决定
        push_angular(&mut lines, atomic, central.angular_quadrature);
    }

    Ok(lines.join("\n"))
}

/// `label = value`，键名右对齐
fn field(label: &str, value: impl std::fmt::Display) -> String {
    format!("{:>width$} = {}", label, value, width = LABEL_WIDTH)
}

/// 径向区间：区间数、端点约束、区间边界与每区间点数
fn push_regions(lines: &mut Vec<String>, grid: &GridSettings) {
    lines.push(field("region_num", grid.region_count()));
    lines.push(field("r_origin_fixed", 0));
    lines.push(field("r_endpt_fixed", 1));

    let intervals = std::iter::once("0.0".to_string())
        .chain(grid.region_outer_limits.iter().map(|&r| format_float(r)))
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(field("r_intervals", intervals));

    let points = grid
        .region_points
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(field("r_num_shell_pts", points));
}

/// 角向字段：Lebedev 只写规则编号，否则写 phi/theta 积分方法与点数
fn push_angular(lines: &mut Vec<String>, grid: &GridSettings, method: AngularQuadrature) {
    if method == AngularQuadrature::Lebedev {
        lines.push(field("lebedev_rule", grid.lebedev_rule));
    } else {
        lines.push(field("phi_type_quadrature", grid.phi_quadrature));
        lines.push(field("phi_quadrature_size", grid.phi_points));
        lines.push(field(
            "theta_type_quadrature",
            grid.theta_quadrature.as_str().to_lowercase(),
        ));
        lines.push(field("theta_quadrature_size", grid.theta_points));
    }
}

/// 浮点数的最短精确表示，整数值保留一位小数 (20 -> "20.0")
///
/// 指数形式带符号且至少两位 (1e-05, 1.5e+16)，与网格程序读取的写法一致。
pub fn format_float(value: f64) -> String {
    if value == 0.0 {
        // -0.0 也写成 0.0
        return "0.0".to_string();
    }

    let text = format!("{:?}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Atom;

    fn water() -> Molecule {
        Molecule::new(
            "water",
            vec![
                Atom::new("O", [0.0, 0.0, 0.1173]),
                Atom::new("H", [0.0, 0.7572, -0.4692]),
                Atom::new("H", [0.0, -0.7572, -0.4692]),
            ],
        )
    }

    fn value_of<'a>(line: &'a str) -> &'a str {
        line.split_once(" = ").map(|(_, v)| v).unwrap_or("")
    }

    fn lines_with<'a>(text: &'a str, key: &str) -> Vec<&'a str> {
        text.lines()
            .filter(|l| l.split_once(" = ").map(|(k, _)| k.trim()) == Some(key))
            .collect()
    }

    #[test]
    fn test_default_input_header_and_center() {
        let text = format_input(&GridParameters::default(), &water()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "[DEFAULTS]");
        assert_eq!(lines[1], "      number_of_atoms = 3");
        assert_eq!(lines[2], "    r_type_quadrature = legendre");
        assert_eq!(lines[3], "    angular_quad_type = mixed");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "## central grid ##");
        assert_eq!(lines[6], "");
        assert_eq!(lines[7], "[center]");
        assert_eq!(lines[8], "           region_num = 2");
        assert_eq!(lines[9], "       r_origin_fixed = 0");
        assert_eq!(lines[10], "        r_endpt_fixed = 1");
        assert_eq!(lines[11], "          r_intervals = 0.0, 20.0, 30.0");
        assert_eq!(lines[12], "      r_num_shell_pts = 100, 50");
        assert_eq!(lines[13], "");
        assert_eq!(lines[14], "            cent_lmax = 40");
        assert_eq!(lines[15], "  phi_type_quadrature = trapezoidal");
        assert_eq!(lines[16], "  phi_quadrature_size = 3");
        assert_eq!(lines[17], "theta_type_quadrature = legendre");
        assert_eq!(lines[18], "theta_quadrature_size = 50");
        assert_eq!(lines[19], "");
        assert_eq!(lines[20], "## Atom-centered grids ##");
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_atom_section_layout() {
        let molecule = Molecule::new(
            "h2",
            vec![
                Atom::new("H", [0.0, 0.0, -0.5]),
                Atom::new("H", [0.0, 0.0, 0.5]),
            ],
        );
        let text = format_input(&GridParameters::default(), &molecule).unwrap();
        let tail: Vec<&str> = text
            .lines()
            .skip_while(|l| *l != "## atom 1: H ##")
            .take(15)
            .collect();

        assert_eq!(
            tail,
            vec![
                "## atom 1: H ##",
                "[atom_1]",
                "          atom_center = 0.0, 0.0, -0.5",
                "    r_type_quadrature = legendre",
                "           region_num = 1",
                "       r_origin_fixed = 0",
                "        r_endpt_fixed = 1",
                "          r_intervals = 0.0, 5.0",
                "      r_num_shell_pts = 20",
                "",
                "                 lmax = 3",
                "    angular_quad_type = mixed",
                "  phi_type_quadrature = trapezoidal",
                "  phi_quadrature_size = 3",
                "theta_type_quadrature = legendre",
            ]
        );
    }

    #[test]
    fn test_one_section_per_atom_in_order() {
        let text = format_input(&GridParameters::default(), &water()).unwrap();
        let sections: Vec<&str> = text
            .lines()
            .filter(|l| l.starts_with("[atom_"))
            .collect();
        assert_eq!(sections, vec!["[atom_1]", "[atom_2]", "[atom_3]"]);
        assert!(text.contains("## atom 1: O ##"));
        assert!(text.contains("## atom 3: H ##"));
    }

    #[test]
    fn test_atom_centers_average_to_origin() {
        let text = format_input(&GridParameters::default(), &water()).unwrap();
        let centers: Vec<Vec<f64>> = lines_with(&text, "atom_center")
            .iter()
            .map(|l| {
                value_of(l)
                    .split(',')
                    .map(|v| v.trim().parse::<f64>().unwrap())
                    .collect()
            })
            .collect();

        assert_eq!(centers.len(), 3);
        for k in 0..3 {
            let mean: f64 = centers.iter().map(|c| c[k]).sum::<f64>() / 3.0;
            assert!(mean.abs() < 1e-12, "axis {} mean {}", k, mean);
        }
    }

    #[test]
    fn test_region_lists_are_consistent() {
        let mut params = GridParameters::default();
        params.central.region_points = vec![10, 20, 30];
        params.central.region_outer_limits = vec![1.5, 2.5, 7.25];

        let text = format_input(&params, &water()).unwrap();
        let intervals = lines_with(&text, "r_intervals");
        let points = lines_with(&text, "r_num_shell_pts");

        assert_eq!(value_of(intervals[0]), "0.0, 1.5, 2.5, 7.25");
        assert_eq!(value_of(points[0]), "10, 20, 30");
        assert_eq!(value_of(lines_with(&text, "region_num")[0]), "3");

        for (line, expected) in intervals.iter().zip([4, 2, 2, 2]) {
            assert_eq!(value_of(line).split(',').count(), expected);
        }
        for (line, expected) in points.iter().zip([3, 1, 1, 1]) {
            assert_eq!(value_of(line).split(',').count(), expected);
        }
    }

    #[test]
    fn test_lebedev_branch() {
        let mut params = GridParameters::default();
        params.central.angular_quadrature = AngularQuadrature::Lebedev;

        let text = format_input(&params, &water()).unwrap();
        assert!(text.contains("angular_quad_type = lebedev"));
        assert!(!text.contains("phi_type_quadrature"));
        assert!(!text.contains("theta_quadrature_size"));

        let rules: Vec<&str> = lines_with(&text, "lebedev_rule")
            .into_iter()
            .map(value_of)
            .collect();
        // 中心网格一次，每个原子一次
        assert_eq!(rules, vec!["35", "17", "17", "17"]);
    }

    #[test]
    fn test_gauss_and_mixed_branches() {
        for method in [AngularQuadrature::Gauss, AngularQuadrature::Mixed] {
            let mut params = GridParameters::default();
            params.central.angular_quadrature = method;

            let text = format_input(&params, &water()).unwrap();
            assert!(!text.contains("lebedev_rule"));
            assert_eq!(lines_with(&text, "phi_type_quadrature").len(), 4);
            assert_eq!(lines_with(&text, "theta_type_quadrature").len(), 4);
        }
    }

    #[test]
    fn test_atomic_branch_follows_central_method() {
        let mut params = GridParameters::default();
        params.central.angular_quadrature = AngularQuadrature::Gauss;
        params.atomic.angular_quadrature = AngularQuadrature::Lebedev;

        let text = format_input(&params, &water()).unwrap();
        assert!(text.contains("    angular_quad_type = Lebedev"));
        assert!(!text.contains("lebedev_rule"));
        assert_eq!(lines_with(&text, "phi_type_quadrature").len(), 4);

        params.central.angular_quadrature = AngularQuadrature::Lebedev;
        params.atomic.angular_quadrature = AngularQuadrature::Gauss;

        let text = format_input(&params, &water()).unwrap();
        assert!(!text.contains("phi_type_quadrature"));
        assert_eq!(lines_with(&text, "lebedev_rule").len(), 4);
    }

    #[test]
    fn test_empty_molecule_is_missing_structure() {
        let err = format_input(&GridParameters::default(), &Molecule::default()).unwrap_err();
        assert!(matches!(err, AmoGridError::MissingStructure));
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(20.0), "20.0");
        assert_eq!(format_float(-0.0), "0.0");
        assert_eq!(format_float(-0.5), "-0.5");
        assert_eq!(format_float(7.25), "7.25");
        assert_eq!(format_float(0.1), "0.1");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(1e-5), "1e-05");
        assert_eq!(format_float(-2.5e-7), "-2.5e-07");
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(1.5e100), "1.5e+100");
        assert_eq!(format_float(1e15), "1000000000000000.0");
    }

    #[test]
    fn test_mismatched_region_lists_are_rejected() {
        let mut params = GridParameters::default();
        params.central.region_points = vec![10, 20];
        params.central.region_outer_limits = vec![5.0];

        match format_input(&params, &water()).unwrap_err() {
            AmoGridError::InvalidParameter { name, .. } => assert!(name.starts_with("central")),
            other => panic!("unexpected error: {}", other),
        }

        let mut params = GridParameters::default();
        params.atomic.region_points.clear();
        params.atomic.region_outer_limits.clear();
        assert!(matches!(
            format_input(&params, &water()),
            Err(AmoGridError::InvalidParameter { .. })
        ));
    }
}
