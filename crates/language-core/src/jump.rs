//! Per-file jump contexts and the jump decision.
//!
//! A [`JumpContext`] summarizes one parse of a file: what it exports, which
//! local names come from imports, where literal module paths are written,
//! and how to find the references at an offset. [`build_jump`] turns a
//! click into a [`Jump`] that the navigator later resolves on disk.

use crate::error::{AnalysisError, AnalysisResult, ContextError};
use crate::locator::Locator;
use crate::types::{ByteRange, Occurrence, Position};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Export name used for default exports and for "the module itself".
pub const DEFAULT_EXPORT: &str = "default";

/// Export name used for namespace imports (`import * as ns`).
pub const NAMESPACE_IMPORT: &str = "*";

/// A local binding that originates from another module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalModule {
    /// Local name of the binding
    pub local: String,
    /// Module specifier as written
    pub module_name: String,
    /// Name exported by the module (`default`, a named export or `*`)
    pub imported: String,
    /// Range of the local binding identifier
    pub range: ByteRange,
}

/// A span that navigates to a module when clicked: the literal module path
/// of an import, or an imported name inside an import statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPath {
    /// Module specifier as written
    pub module_name: String,
    /// Export looked up in the target module
    pub imported: String,
    /// Clickable range
    pub range: ByteRange,
}

/// Exports, imports and module paths of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JumpInfo {
    /// Exported name to the range of its binding
    pub exports: BTreeMap<String, ByteRange>,
    /// Imported local bindings
    pub external_modules: Vec<ExternalModule>,
    /// Clickable module paths
    pub paths: Vec<ImportPath>,
}

impl JumpInfo {
    pub fn add_export(&mut self, name: impl Into<String>, range: ByteRange) {
        self.exports.insert(name.into(), range);
    }

    pub fn add_module(
        &mut self,
        local: impl Into<String>,
        module_name: impl Into<String>,
        imported: impl Into<String>,
        range: ByteRange,
    ) {
        self.external_modules.push(ExternalModule {
            local: local.into(),
            module_name: module_name.into(),
            imported: imported.into(),
            range,
        });
    }

    pub fn add_path(
        &mut self,
        module_name: impl Into<String>,
        imported: impl Into<String>,
        range: ByteRange,
    ) {
        self.paths.push(ImportPath {
            module_name: module_name.into(),
            imported: imported.into(),
            range,
        });
    }

    /// Append everything from `other`; exports of `other` win on conflicts.
    pub fn merge(&mut self, other: JumpInfo) {
        self.exports.extend(other.exports);
        self.external_modules.extend(other.external_modules);
        self.paths.extend(other.paths);
    }

    /// Rewrite every range through `map`, dropping entries it rejects.
    pub fn map_ranges(self, map: impl Fn(ByteRange) -> Option<ByteRange>) -> JumpInfo {
        JumpInfo {
            exports: self
                .exports
                .into_iter()
                .filter_map(|(name, range)| map(range).map(|range| (name, range)))
                .collect(),
            external_modules: self
                .external_modules
                .into_iter()
                .filter_map(|m| map(m.range).map(|range| ExternalModule { range, ..m }))
                .collect(),
            paths: self
                .paths
                .into_iter()
                .filter_map(|p| map(p.range).map(|range| ImportPath { range, ..p }))
                .collect(),
        }
    }
}

/// Finds the occurrences of the binding at an offset of an already parsed
/// document.
pub trait ReferenceLookup: Send + Sync {
    fn find_references_at(&self, offset: u32) -> Vec<Occurrence>;
}

impl<F> ReferenceLookup for F
where
    F: Fn(u32) -> Vec<Occurrence> + Send + Sync,
{
    fn find_references_at(&self, offset: u32) -> Vec<Occurrence> {
        self(offset)
    }
}

/// Everything cross-file navigation needs to know about one file.
pub struct JumpContext {
    info: JumpInfo,
    source: String,
    locator: Locator,
    lookup: Box<dyn ReferenceLookup>,
}

/// A jump context, or the reason there is none.
pub type JumpContextResult = Result<JumpContext, ContextError>;

impl JumpContext {
    pub fn new(source: &str, mut info: JumpInfo, lookup: Box<dyn ReferenceLookup>) -> Self {
        info.paths.sort_by_key(|p| (p.range.start, p.range.end));
        Self {
            info,
            source: source.to_string(),
            locator: Locator::new(source),
            lookup,
        }
    }

    pub fn info(&self) -> &JumpInfo {
        &self.info
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Occurrences of the binding at `offset`.
    pub fn find_references_at(&self, offset: u32) -> Vec<Occurrence> {
        self.lookup.find_references_at(offset)
    }

    /// Position of the binding exported as `name`.
    pub fn export_position(&self, name: &str) -> Option<Position> {
        let range = self.info.exports.get(name)?;
        self.locator.point_of(range.start).ok()
    }

    /// Decide what a click at `point` navigates to.
    ///
    /// Returns `Ok(None)` when there is nothing to jump to, including a click
    /// on a declaration that is not an import (jumping to oneself).
    pub fn build_jump(&self, point: Position, options: JumpOptions) -> AnalysisResult<Option<Jump>> {
        let pos = self.locator.offset_of(point)?;

        for path in &self.info.paths {
            if path.range.start > pos {
                break;
            }
            if path.range.contains(pos) {
                let jump = if path.imported != DEFAULT_EXPORT {
                    Jump::FromImport {
                        module_name: path.module_name.clone(),
                        imported: path.imported.clone(),
                        binding: path.range,
                    }
                } else {
                    Jump::Path {
                        module_name: path.module_name.clone(),
                        imported: path.imported.clone(),
                        range: path.range,
                    }
                };
                log::debug!("jump from module path at {}: {}", point, jump);
                return Ok(Some(jump));
            }
        }

        let references = self.find_references_at(pos);
        let Some(declaration) = references.iter().find(|o| o.kind.is_declaration()) else {
            return Ok(None);
        };

        let clicked_declaration = declaration.range.contains(pos);

        if clicked_declaration || !options.jump_to_import {
            let name = declaration.range.slice(&self.source).unwrap_or_default();
            let target = self
                .info
                .external_modules
                .iter()
                .find(|m| m.local == name && m.range.start == declaration.range.start);
            if let Some(target) = target {
                return Ok(Some(Jump::FromImport {
                    module_name: target.module_name.clone(),
                    imported: target.imported.clone(),
                    binding: declaration.range,
                }));
            }
        }

        if clicked_declaration {
            return Ok(None);
        }

        let mut destination = self.locator.point_of(declaration.range.start)?;
        if let Some(origin) = references.iter().find(|o| o.range.contains(pos)) {
            destination.column += pos - origin.range.start;
        }
        Ok(Some(Jump::Binding { destination }))
    }
}

impl fmt::Debug for JumpContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JumpContext")
            .field("info", &self.info)
            .field("len", &self.locator.len())
            .finish()
    }
}

/// Options of the jump decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JumpOptions {
    /// Stop at the import statement instead of crossing into the module
    pub jump_to_import: bool,
}

/// A navigation intent derived from a click, before any path resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum Jump {
    /// A literal module path was clicked
    Path {
        module_name: String,
        imported: String,
        range: ByteRange,
    },
    /// An identifier bound to an import was clicked
    FromImport {
        module_name: String,
        imported: String,
        binding: ByteRange,
    },
    /// Same-file declaration
    Binding { destination: Position },
}

impl Jump {
    /// Module specifier of a cross-file jump.
    pub fn module_name(&self) -> Option<&str> {
        match self {
            Jump::Path { module_name, .. } | Jump::FromImport { module_name, .. } => {
                Some(module_name)
            }
            Jump::Binding { .. } => None,
        }
    }

    /// Export looked up in the target module.
    pub fn imported(&self) -> Option<&str> {
        match self {
            Jump::Path { imported, .. } | Jump::FromImport { imported, .. } => Some(imported),
            Jump::Binding { .. } => None,
        }
    }
}

impl fmt::Display for Jump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Jump::Path { module_name, .. } => write!(f, "path '{module_name}'"),
            Jump::FromImport {
                module_name,
                imported,
                ..
            } => write!(f, "{imported} from '{module_name}'"),
            Jump::Binding { destination } => write!(f, "binding at {destination}"),
        }
    }
}

/// Decide the jump for a context that may have failed to build.
///
/// Unsupported scopes are "nothing to do"; a parse error is reported.
pub fn build_jump(
    context: &JumpContextResult,
    point: Position,
    options: JumpOptions,
) -> AnalysisResult<Option<Jump>> {
    match context {
        Ok(context) => context.build_jump(point, options),
        Err(ContextError::UnsupportedScope(scope)) => {
            log::debug!("no jump: unsupported scope {scope}");
            Ok(None)
        }
        Err(ContextError::Parse(error)) => Err(AnalysisError::Syntax(error.clone())),
    }
}
