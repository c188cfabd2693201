// harmonia-core/src/infrastructure/adapters/datafusion.rs

// Table port backed by a DataFusion DataFrame. Every operation is a
// projection built from `ident`, which never normalizes identifiers, so mixed
// case source columns ("FirstName", "lastName") are addressed exactly.

use datafusion::arrow::datatypes::{DataType, Field, Schema};
use datafusion::arrow::record_batch::RecordBatch;
use datafusion::prelude::*;
use datafusion::scalar::ScalarValue;
use std::path::Path;
use std::sync::Arc;

use crate::error::HarmoniaError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::table::Table;

#[derive(Debug, Clone)]
pub struct DataFusionTable {
    df: DataFrame,
}

impl DataFusionTable {
    /// Session used for harmonization: one partition so that the union keeps
    /// the append order of its inputs.
    pub fn session() -> SessionContext {
        SessionContext::new_with_config(SessionConfig::new().with_target_partitions(1))
    }

    /// Empty accumulator with one nullable text column per canonical field.
    pub fn canonical(ctx: &SessionContext, fields: &[String]) -> Result<Self, InfrastructureError> {
        let schema = text_schema(fields);
        let df = ctx.read_batch(RecordBatch::new_empty(Arc::new(schema)))?;
        Ok(Self { df })
    }

    /// Reads a CSV file with a header row. Every column is declared `Utf8` up
    /// front, so cells reach the harmonizer exactly as written ("00742" stays
    /// "00742"). Only the header is read here; rows are read on `collect`.
    pub async fn read_csv(ctx: &SessionContext, path: &Path) -> Result<Self, InfrastructureError> {
        let path_str = path.to_str().ok_or_else(|| {
            InfrastructureError::ConfigError(format!("Invalid path for source: {:?}", path))
        })?;

        // Header only: zero records sampled for inference
        let header = ctx
            .read_csv(
                path_str,
                CsvReadOptions::new()
                    .has_header(true)
                    .schema_infer_max_records(0),
            )
            .await?;
        let schema = text_schema(&column_names(&header));

        let df = ctx
            .read_csv(path_str, CsvReadOptions::new().has_header(true).schema(&schema))
            .await?;
        Ok(Self { df })
    }

    pub fn into_dataframe(self) -> DataFrame {
        self.df
    }

    /// Executes the plan. Batches come back partition by partition, which is
    /// the order the tables were unioned in.
    pub async fn collect(self) -> Result<Vec<RecordBatch>, InfrastructureError> {
        let partitions = self.df.collect_partitioned().await?;
        Ok(partitions.into_iter().flatten().collect())
    }

    fn project(self, exprs: Vec<Expr>) -> Result<Self, HarmoniaError> {
        Ok(Self {
            df: self.df.select(exprs)?,
        })
    }

    fn require(&self, column: &str) -> Result<(), HarmoniaError> {
        if column_names(&self.df).iter().any(|c| c == column) {
            Ok(())
        } else {
            Err(InfrastructureError::ColumnNotFound(column.to_string()).into())
        }
    }
}

fn column_names(df: &DataFrame) -> Vec<String> {
    df.schema()
        .fields()
        .iter()
        .map(|field| field.name().clone())
        .collect()
}

fn text_schema(names: &[String]) -> Schema {
    Schema::new(
        names
            .iter()
            .map(|name| Field::new(name, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    )
}

fn null_text() -> Expr {
    lit(ScalarValue::Utf8(None))
}

impl Table for DataFusionTable {
    fn columns(&self) -> Vec<String> {
        column_names(&self.df)
    }

    fn with_column_renamed(self, old: &str, new: &str) -> Result<Self, HarmoniaError> {
        self.require(old)?;
        let exprs = self
            .columns()
            .iter()
            .map(|c| {
                if c == old {
                    ident(c).alias(new)
                } else {
                    ident(c)
                }
            })
            .collect();
        self.project(exprs)
    }

    fn with_null_column(self, name: &str) -> Result<Self, HarmoniaError> {
        let columns = self.columns();
        let mut exprs: Vec<Expr> = columns
            .iter()
            .map(|c| {
                if c == name {
                    null_text().alias(name)
                } else {
                    ident(c)
                }
            })
            .collect();
        if !columns.iter().any(|c| c == name) {
            exprs.push(null_text().alias(name));
        }
        self.project(exprs)
    }

    fn select(self, columns: &[String]) -> Result<Self, HarmoniaError> {
        for column in columns {
            self.require(column)?;
        }
        let exprs = columns.iter().map(ident).collect();
        self.project(exprs)
    }

    fn union(self, other: Self) -> Result<Self, HarmoniaError> {
        Ok(Self {
            df: self.df.union(other.df)?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use datafusion::arrow::array::{Array, StringArray};
    use datafusion::arrow::compute::cast as cast_array;
    use std::fs;

    fn text_column(batches: &[RecordBatch], index: usize) -> Result<Vec<Option<String>>> {
        let mut values = Vec::new();
        for batch in batches {
            let array = cast_array(batch.column(index), &DataType::Utf8)?;
            let strings = array
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| anyhow::anyhow!("not a string column"))?;
            for i in 0..strings.len() {
                values.push(if strings.is_null(i) {
                    None
                } else {
                    Some(strings.value(i).to_string())
                });
            }
        }
        Ok(values)
    }

    async fn csv_table(ctx: &SessionContext, content: &str) -> Result<(tempfile::TempDir, DataFusionTable)> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("source.csv");
        fs::write(&path, content)?;
        let table = DataFusionTable::read_csv(ctx, &path).await?;
        Ok((dir, table))
    }

    #[tokio::test]
    async fn test_csv_columns_keep_their_case() -> Result<()> {
        let ctx = DataFusionTable::session();
        let (_dir, table) = csv_table(&ctx, "FirstName,lastName,DOB\nJohn,Doe,1990-01-01\n").await?;

        assert_eq!(table.columns(), vec!["FirstName", "lastName", "DOB"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_rename_null_and_select() -> Result<()> {
        let ctx = DataFusionTable::session();
        let (_dir, table) = csv_table(&ctx, "FirstName,extra\nJohn,1\nJane,2\n").await?;

        let table = table
            .with_column_renamed("FirstName", "First_Name")?
            .with_null_column("Last_Name")?
            .select(&["First_Name".to_string(), "Last_Name".to_string()])?;
        assert_eq!(table.columns(), vec!["First_Name", "Last_Name"]);

        let batches = table.collect().await?;
        assert_eq!(
            text_column(&batches, 0)?,
            vec![Some("John".to_string()), Some("Jane".to_string())]
        );
        assert_eq!(text_column(&batches, 1)?, vec![None, None]);
        Ok(())
    }

    #[tokio::test]
    async fn test_dates_stay_text() -> Result<()> {
        let ctx = DataFusionTable::session();
        let (_dir, table) = csv_table(&ctx, "DOB\n1990-01-01\n").await?;

        let df = table.into_dataframe();
        assert_eq!(df.schema().field(0).data_type(), &DataType::Utf8);
        Ok(())
    }

    #[tokio::test]
    async fn test_cells_are_kept_verbatim() -> Result<()> {
        let ctx = DataFusionTable::session();
        let (_dir, table) = csv_table(&ctx, "zip,amount,flag\n00742,1.50,TRUE\n").await?;

        let table = table
            .with_column_renamed("zip", "Zip")?
            .select(&["Zip".to_string(), "amount".to_string(), "flag".to_string()])?;
        let batches = table.collect().await?;

        assert_eq!(text_column(&batches, 0)?, vec![Some("00742".to_string())]);
        assert_eq!(text_column(&batches, 1)?, vec![Some("1.50".to_string())]);
        assert_eq!(text_column(&batches, 2)?, vec![Some("TRUE".to_string())]);
        Ok(())
    }

    #[tokio::test]
    async fn test_read_touches_header_only() -> Result<()> {
        let ctx = DataFusionTable::session();
        // Ragged rows would break row sampling; the header alone is fine
        let (_dir, table) = csv_table(&ctx, "a,b,c\n1,2\n3,4,5,6\n").await?;

        assert_eq!(table.columns(), vec!["a", "b", "c"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_column_is_reported() -> Result<()> {
        let ctx = DataFusionTable::session();
        let (_dir, table) = csv_table(&ctx, "a\n1\n").await?;

        let err = table.with_column_renamed("A", "b").unwrap_err();
        assert!(err.to_string().contains("Column 'A' not found"));
        Ok(())
    }

    #[tokio::test]
    async fn test_union_appends_after_canonical() -> Result<()> {
        let ctx = DataFusionTable::session();
        let fields = vec!["First_Name".to_string()];
        let canonical = DataFusionTable::canonical(&ctx, &fields)?;
        let (_d1, one) = csv_table(&ctx, "First_Name\nJohn\nJane\n").await?;
        let (_d2, two) = csv_table(&ctx, "First_Name\nPeter\n").await?;

        let batches = canonical
            .union(one.select(&fields)?)?
            .union(two.select(&fields)?)?
            .collect()
            .await?;

        assert_eq!(
            text_column(&batches, 0)?,
            vec![
                Some("John".to_string()),
                Some("Jane".to_string()),
                Some("Peter".to_string())
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_union_with_different_arity_fails() -> Result<()> {
        let ctx = DataFusionTable::session();
        let canonical = DataFusionTable::canonical(&ctx, &["A".to_string(), "B".to_string()])?;
        let (_dir, table) = csv_table(&ctx, "A\n1\n").await?;

        assert!(canonical.union(table).is_err());
        Ok(())
    }
}
