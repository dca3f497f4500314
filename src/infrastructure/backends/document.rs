//! Read-only backend over a parsed hierarchical document.
//!
//! Parsing is delegated to the `config` crate file formats; the resulting
//! value tree is converted once into a [`Node`].

use config::{File, FileFormat, Map, Source, Value, ValueKind};
use tracing::debug;

use crate::domain::{validate_key, Branch, Leaf, Node, Path};
use crate::infrastructure::traits::Backend;
use crate::infrastructure::{InfraError, InfraResult};

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Ini,
    Json,
    Toml,
    Yaml,
}

impl DocumentFormat {
    /// Format for a file extension (without the dot).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "ini" => Some(Self::Ini),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Format forced by a URI scheme such as `json:`.
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme {
            "ini" => Some(Self::Ini),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            "yaml" => Some(Self::Yaml),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Ini => "ini",
            Self::Json => "json",
            Self::Toml => "toml",
            Self::Yaml => "yaml",
        }
    }

    fn file_format(self) -> FileFormat {
        match self {
            Self::Ini => FileFormat::Ini,
            Self::Json => FileFormat::Json,
            Self::Toml => FileFormat::Toml,
            Self::Yaml => FileFormat::Yaml,
        }
    }
}

/// Backend holding a fully parsed document. Writes are rejected.
#[derive(Debug, Clone)]
pub struct DocumentBackend {
    origin: String,
    root: Node,
}

impl DocumentBackend {
    /// Read and parse `path`.
    pub fn from_file(path: &std::path::Path, format: DocumentFormat) -> InfraResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| InfraError::io(format!("read {}", path.display()), e))?;
        Self::parse(&content, format, &path.display().to_string())
    }

    /// Parse document text; `origin` names it in errors.
    pub fn parse(content: &str, format: DocumentFormat, origin: &str) -> InfraResult<Self> {
        let table = File::from_str(content, format.file_format())
            .collect()
            .map_err(|e| InfraError::Document {
                origin: origin.to_string(),
                message: e.to_string(),
            })?;

        let root = convert_table(table, &Path::root(), origin)?;
        debug!(
            "document: parsed {} as {}, {} top-level keys",
            origin,
            format.name(),
            root.len()
        );
        Ok(Self {
            origin: origin.to_string(),
            root: Node::Branch(root),
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn root(&self) -> &Node {
        &self.root
    }
}

fn convert_table(table: Map<String, Value>, path: &Path, origin: &str) -> InfraResult<Branch> {
    let mut branch = Branch::new();
    for (key, value) in table {
        validate_key(&key)?;
        let child_path = path.child(&key);
        let node = convert_value(value, &child_path, origin)?;
        branch.insert(key, node);
    }
    Ok(branch)
}

fn convert_value(value: Value, path: &Path, origin: &str) -> InfraResult<Node> {
    let unsupported = |what: &str| InfraError::Document {
        origin: origin.to_string(),
        message: format!("{what} are not supported (at {path})"),
    };

    let leaf = match value.kind {
        ValueKind::Table(table) => return Ok(Node::Branch(convert_table(table, path, origin)?)),
        ValueKind::Array(_) => return Err(unsupported("arrays")),
        ValueKind::Nil => return Err(unsupported("null values")),
        ValueKind::Boolean(v) => Leaf::Bool(v),
        ValueKind::I64(v) => Leaf::Int(v),
        ValueKind::Float(v) => Leaf::Double(v),
        ValueKind::String(v) => Leaf::String(v),
        // Wide integers: keep them when they fit in i64.
        wide => Value::new(None, wide)
            .into_int()
            .map(Leaf::Int)
            .map_err(|e| InfraError::Document {
                origin: origin.to_string(),
                message: format!("{e} (at {path})"),
            })?,
    };
    Ok(Node::Leaf(leaf))
}

impl Backend for DocumentBackend {
    fn name(&self) -> &'static str {
        "document"
    }

    fn get(&self, path: &Path) -> InfraResult<Option<Leaf>> {
        Ok(self.root.find(path).and_then(Node::as_leaf).cloned())
    }

    fn put(&mut self, _path: &Path, _value: &Leaf) -> InfraResult<()> {
        Err(InfraError::NotSupported {
            backend: "document",
            operation: "put",
        })
    }

    fn get_recursive(&self, path: &Path) -> InfraResult<Node> {
        Ok(self.root.subtree(path)?.clone())
    }
}
