//! # 结果存储
//!
//! 按照结果请求把解析出的数值存入命名变量和/或表格。
//!
//! ## 存储格式
//! - 变量: `<dir>/variables.csv`，列 `name,value`
//! - 表格: `<dir>/<table>.csv`，每次运行追加一行
//!
//! ## 依赖关系
//! - 被 `step/mod.rs`, `commands/` 使用
//! - 使用 `models/results.rs`
//! - 使用 `csv` 读写表格

use crate::error::{AmoGridError, Result};
use crate::models::{PropertySpec, ResultName, ResultRequest, ResultValue};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// 变量文件名
pub const VARIABLES_FILE: &str = "variables.csv";

/// 结果存储
pub trait ResultSink {
    /// 保存 `requests` 中请求、且 `data` 中存在的结果
    fn store_results(
        &mut self,
        data: &BTreeMap<ResultName, ResultValue>,
        properties: &[PropertySpec],
        requests: &BTreeMap<ResultName, ResultRequest>,
        create_tables: bool,
    ) -> Result<()>;
}

/// 简单表格：列名 + 按行存储的文本
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultTable {
    fn column_index(&mut self, column: &str) -> usize {
        match self.columns.iter().position(|c| c == column) {
            Some(i) => i,
            None => {
                self.columns.push(column.to_string());
                for row in &mut self.rows {
                    row.push(String::new());
                }
                self.columns.len() - 1
            }
        }
    }

    /// 追加一行（未给出的列为空）
    pub fn append_row(&mut self, values: &[(String, ResultValue)]) {
        let mut row = vec![String::new(); self.columns.len()];
        for (column, value) in values {
            let idx = self.column_index(column);
            if row.len() < self.columns.len() {
                row.resize(self.columns.len(), String::new());
            }
            row[idx] = value.to_string();
        }
        self.rows.push(row);
    }

    /// 读取 CSV 表格
    pub fn read_csv(path: &Path) -> Result<Self> {
        let mut rdr = csv::Reader::from_path(path)?;
        let columns = rdr.headers()?.iter().map(|s| s.to_string()).collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        Ok(ResultTable { columns, rows })
    }

    /// 写出 CSV 表格
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush().map_err(|e| AmoGridError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(())
    }
}

/// 以目录为工作区的结果存储：变量与表格保存在内存中，`save` 时写出 CSV
#[derive(Debug, Clone, Default)]
pub struct WorkspaceSink {
    dir: Option<PathBuf>,
    variables: BTreeMap<String, ResultValue>,
    tables: BTreeMap<String, ResultTable>,
}

impl WorkspaceSink {
    /// 仅保存在内存中
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// 以 `dir` 为工作区，已有的表格在使用时读入
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        WorkspaceSink {
            dir: Some(dir.into()),
            ..Self::default()
        }
    }

    pub fn variables(&self) -> &BTreeMap<String, ResultValue> {
        &self.variables
    }

    pub fn variable(&self, name: &str) -> Option<ResultValue> {
        self.variables.get(name).copied()
    }

    pub fn table(&self, name: &str) -> Option<&ResultTable> {
        self.tables.get(name)
    }

    fn table_path(&self, name: &str) -> Option<PathBuf> {
        self.dir.as_ref().map(|d| d.join(format!("{}.csv", name)))
    }

    /// 读取或新建尚未在内存中的表格（不修改 `self`）
    fn load_table(&self, name: &str, create: bool) -> Result<ResultTable> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "variables" {
            return Err(AmoGridError::InvalidArgument(format!(
                "Invalid table name '{}'",
                name
            )));
        }

        match self.table_path(name) {
            Some(path) if path.exists() => ResultTable::read_csv(&path),
            _ if create => Ok(ResultTable::default()),
            _ => Err(AmoGridError::InvalidArgument(format!(
                "Table '{}' does not exist and table creation is disabled",
                name
            ))),
        }
    }

    /// 将变量和表格写入工作区目录
    pub fn save(&self) -> Result<Vec<PathBuf>> {
        let Some(dir) = &self.dir else {
            return Ok(Vec::new());
        };

        fs::create_dir_all(dir).map_err(|e| AmoGridError::FileWriteError {
            path: dir.display().to_string(),
            source: e,
        })?;

        let mut written = Vec::new();

        if !self.variables.is_empty() {
            let path = dir.join(VARIABLES_FILE);
            let mut vars: BTreeMap<String, String> = if path.exists() {
                let table = ResultTable::read_csv(&path)?;
                table
                    .rows
                    .into_iter()
                    .filter_map(|r| match r.as_slice() {
                        [name, value, ..] => Some((name.clone(), value.clone())),
                        _ => None,
                    })
                    .collect()
            } else {
                BTreeMap::new()
            };
            for (name, value) in &self.variables {
                vars.insert(name.clone(), value.to_string());
            }

            let table = ResultTable {
                columns: vec!["name".to_string(), "value".to_string()],
                rows: vars.into_iter().map(|(k, v)| vec![k, v]).collect(),
            };
            table.write_csv(&path)?;
            written.push(path);
        }

        for (name, table) in &self.tables {
            let path = dir.join(format!("{}.csv", name));
            table.write_csv(&path)?;
            written.push(path);
        }

        Ok(written)
    }
}

impl ResultSink for WorkspaceSink {
    fn store_results(
        &mut self,
        data: &BTreeMap<ResultName, ResultValue>,
        properties: &[PropertySpec],
        requests: &BTreeMap<ResultName, ResultRequest>,
        create_tables: bool,
    ) -> Result<()> {
        // 先检查全部请求并取得表格，出错时不改动已保存的内容
        let mut variables: Vec<(String, ResultValue)> = Vec::new();
        let mut table_rows: BTreeMap<String, Vec<(String, ResultValue)>> = BTreeMap::new();

        for (name, request) in requests {
            let Some(value) = data.get(name) else {
                continue;
            };

            let property = properties.iter().find(|p| p.name == *name).ok_or_else(|| {
                AmoGridError::InvalidArgument(format!("'{}' is not a known result", name))
            })?;
            if property.value_type != value.value_type() {
                return Err(AmoGridError::InvalidArgument(format!(
                    "'{}' should be {} but got {}",
                    name,
                    property.value_type,
                    value.value_type()
                )));
            }

            if let Some(variable) = &request.variable {
                variables.push((variable.clone(), *value));
            }

            if let Some(table) = &request.table {
                let column = request
                    .column
                    .clone()
                    .unwrap_or_else(|| name.as_str().to_string());
                table_rows
                    .entry(table.clone())
                    .or_default()
                    .push((column, *value));
            }
        }

        let mut loaded = Vec::new();
        for table in table_rows.keys() {
            if !self.tables.contains_key(table) {
                loaded.push((table.clone(), self.load_table(table, create_tables)?));
            }
        }

        self.tables.extend(loaded);
        self.variables.extend(variables);
        for (table, values) in table_rows {
            if let Some(t) = self.tables.get_mut(&table) {
                t.append_row(&values);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::properties;

    fn sample_data() -> BTreeMap<ResultName, ResultValue> {
        let mut data = BTreeMap::new();
        data.insert(ResultName::CentralGridSize, ResultValue::Integer(300));
        data.insert(ResultName::SphereTest, ResultValue::Float(0.5));
        data
    }

    fn request(variable: Option<&str>, table: Option<&str>, column: Option<&str>) -> ResultRequest {
        ResultRequest {
            variable: variable.map(String::from),
            table: table.map(String::from),
            column: column.map(String::from),
        }
    }

    #[test]
    fn test_store_into_variables() {
        let mut requests = BTreeMap::new();
        requests.insert(ResultName::CentralGridSize, request(Some("n"), None, None));
        // 没有解析到的结果直接跳过
        requests.insert(ResultName::GaussianTest, request(Some("g"), None, None));

        let mut sink = WorkspaceSink::in_memory();
        sink.store_results(&sample_data(), &properties(), &requests, true)
            .unwrap();

        assert_eq!(sink.variable("n"), Some(ResultValue::Integer(300)));
        assert_eq!(sink.variable("g"), None);
        assert_eq!(sink.variables().len(), 1);
    }

    #[test]
    fn test_store_into_tables() {
        let mut requests = BTreeMap::new();
        requests.insert(
            ResultName::CentralGridSize,
            request(None, Some("grids"), Some("central")),
        );
        requests.insert(ResultName::SphereTest, request(None, Some("grids"), None));

        let mut sink = WorkspaceSink::in_memory();
        let props = properties();
        sink.store_results(&sample_data(), &props, &requests, true)
            .unwrap();
        sink.store_results(&sample_data(), &props, &requests, true)
            .unwrap();

        let table = sink.table("grids").unwrap();
        assert_eq!(table.columns, vec!["central", "Sphere test"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0], vec!["300", "0.5"]);
    }

    #[test]
    fn test_missing_table_without_creation_fails() {
        let mut requests = BTreeMap::new();
        requests.insert(ResultName::SphereTest, request(None, Some("tests"), None));

        let mut sink = WorkspaceSink::in_memory();
        let err = sink
            .store_results(&sample_data(), &properties(), &requests, false)
            .unwrap_err();
        assert!(matches!(err, AmoGridError::InvalidArgument(_)));
    }

    #[test]
    fn test_failed_store_leaves_sink_unchanged() {
        let mut requests = BTreeMap::new();
        requests.insert(ResultName::CentralGridSize, request(Some("n"), None, None));
        requests.insert(
            ResultName::SphereTest,
            request(Some("s"), Some("missing"), None),
        );

        let mut sink = WorkspaceSink::in_memory();
        assert!(sink
            .store_results(&sample_data(), &properties(), &requests, false)
            .is_err());
        assert!(sink.variables().is_empty());
        assert!(sink.table("missing").is_none());

        // 第二个表格名非法时，第一个新表格也不应留下
        let mut requests = BTreeMap::new();
        requests.insert(
            ResultName::CentralGridSize,
            request(Some("n"), Some("a_grids"), None),
        );
        requests.insert(ResultName::SphereTest, request(None, Some("b/c"), None));
        assert!(sink
            .store_results(&sample_data(), &properties(), &requests, true)
            .is_err());
        assert!(sink.variables().is_empty());
        assert!(sink.table("a_grids").is_none());
    }

    #[test]
    fn test_unknown_property_is_rejected() {
        let mut requests = BTreeMap::new();
        requests.insert(ResultName::SphereTest, request(Some("s"), None, None));

        let mut sink = WorkspaceSink::in_memory();
        let props: Vec<PropertySpec> = properties()
            .into_iter()
            .filter(|p| p.name != ResultName::SphereTest)
            .collect();
        assert!(sink
            .store_results(&sample_data(), &props, &requests, true)
            .is_err());
    }

    #[test]
    fn test_save_and_reload_existing_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut requests = BTreeMap::new();
        requests.insert(
            ResultName::CentralGridSize,
            request(Some("n_central"), Some("grids"), None),
        );

        let mut sink = WorkspaceSink::new(dir.path());
        sink.store_results(&sample_data(), &properties(), &requests, true)
            .unwrap();
        let written = sink.save().unwrap();
        assert_eq!(written.len(), 2);

        // 已存在的表格即使禁止创建也可以追加
        let mut sink = WorkspaceSink::new(dir.path());
        sink.store_results(&sample_data(), &properties(), &requests, false)
            .unwrap();
        sink.save().unwrap();

        let table = ResultTable::read_csv(&dir.path().join("grids.csv")).unwrap();
        assert_eq!(table.columns, vec!["Central grid size"]);
        assert_eq!(table.rows.len(), 2);

        let vars = ResultTable::read_csv(&dir.path().join(VARIABLES_FILE)).unwrap();
        assert_eq!(vars.rows, vec![vec!["n_central", "300"]]);
    }

    #[test]
    fn test_append_row_adds_new_columns() {
        let mut table = ResultTable::default();
        table.append_row(&[("a".to_string(), ResultValue::Integer(1))]);
        table.append_row(&[("b".to_string(), ResultValue::Float(2.5))]);

        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(table.rows[0], vec!["1", ""]);
        assert_eq!(table.rows[1], vec!["", "2.5"]);
    }
}
