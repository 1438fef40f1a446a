//! Table configuration

use std::num::NonZeroUsize;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::column::Column;
use crate::error::ConfigError;
use crate::model::Record;
use crate::page::PageSizePolicy;
use crate::remote::CacheConfig;
use crate::selection::RowIdentity;

const DENSE_ROW_HEIGHT: u32 = 33;
const REGULAR_ROW_HEIGHT: u32 = 53;

/// One column of a [`Record`] table, as written in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Record field read by the column. Also the column id.
    pub field: String,
    /// Display label. Defaults to the field name.
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default = "default_true")]
    pub sortable: bool,
}

fn default_true() -> bool {
    true
}

impl ColumnDef {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            header: None,
            visible: true,
            sortable: true,
        }
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Build the column.
    pub fn to_column(&self) -> Column<Record> {
        let header = self.header.clone().unwrap_or_else(|| self.field.clone());
        let column = Column::field(self.field.clone(), header).visible(self.visible);
        if self.sortable {
            column
        } else {
            column.unsortable()
        }
    }
}

/// Configuration for a table.
///
/// Loaded from TOML or built in code. Every field has a default.
///
/// # Example
///
/// ```
/// use datagrid_lib::TableConfig;
///
/// let config = TableConfig::from_toml_str(r#"
///     title = "Class/Event"
///     page_size = 10
///     id_fields = ["firstName", "lastName"]
///
///     [[columns]]
///     field = "firstName"
///     header = "First Name"
///
///     [[columns]]
///     field = "age"
/// "#).unwrap();
///
/// assert_eq!(config.page_size, 10);
/// assert_eq!(config.record_columns().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Table title, also used to name exports.
    ///
    /// Default: "Table"
    pub title: String,

    /// Rows per page. Must be greater than zero.
    ///
    /// Default: 5
    pub page_size: usize,

    /// Dense rows are shorter, which changes the padding height.
    ///
    /// Default: true
    pub dense: bool,

    /// How the page index follows a page size change.
    pub page_size_policy: PageSizePolicy,

    /// Remote page cache settings.
    pub cache: CacheConfig,

    /// Record fields whose values identify a row.
    pub id_fields: Vec<String>,

    /// Column schema for [`Record`] tables.
    pub columns: Vec<ColumnDef>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            title: "Table".to_string(),
            page_size: 5,
            dense: true,
            page_size_policy: PageSizePolicy::default(),
            cache: CacheConfig::default(),
            id_fields: Vec::new(),
            columns: Vec::new(),
        }
    }
}

impl TableConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&input)
    }

    /// Check the values that the type system does not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.page_size()?;
        Ok(())
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets dense rows.
    pub fn with_dense(mut self, dense: bool) -> Self {
        self.dense = dense;
        self
    }

    /// Sets the page size policy.
    pub fn with_page_size_policy(mut self, policy: PageSizePolicy) -> Self {
        self.page_size_policy = policy;
        self
    }

    /// Sets the cache settings.
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Sets the row identity fields.
    pub fn with_id_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.id_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the column schema.
    pub fn with_columns(mut self, columns: Vec<ColumnDef>) -> Self {
        self.columns = columns;
        self
    }

    /// The page size as a validated non-zero value.
    pub fn page_size(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.page_size).ok_or(ConfigError::InvalidPageSize(self.page_size))
    }

    /// Height of one rendered row, in pixels.
    pub fn row_height(&self) -> u32 {
        if self.dense {
            DENSE_ROW_HEIGHT
        } else {
            REGULAR_ROW_HEIGHT
        }
    }

    /// Height of the filler that keeps a short page at full height.
    pub fn padding_height(&self, padding_rows: usize) -> u32 {
        self.row_height() * padding_rows as u32
    }

    /// Columns described by [`columns`](Self::columns).
    pub fn record_columns(&self) -> Vec<Column<Record>> {
        self.columns.iter().map(ColumnDef::to_column).collect()
    }

    /// Row identity from [`id_fields`](Self::id_fields), if any are set.
    pub fn row_identity(&self) -> Option<RowIdentity<Record>> {
        match self.id_fields.as_slice() {
            [] => None,
            [field] => Some(RowIdentity::field(field.clone())),
            fields => Some(RowIdentity::fields(fields.iter().cloned())),
        }
    }
}
