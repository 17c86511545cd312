//! Go-to-definition across files.
//!
//! A click is first turned into a [`Jump`] by the jump context of the
//! clicked file. Cross-file jumps are then resolved hop by hop: resolve the
//! module specifier, open the target's jump context, find the export and,
//! when the export is itself an import or re-export, keep going until a
//! declaration is reached or the hop budget of a [`JumpSession`] runs out.

use crate::cache::JumpContextCache;
use crate::config::NavigationConfig;
use crate::registry::scope_for_path;
use crate::resolver::{ModuleResolver, NodeModuleResolver, Resolution, SimpleModuleResolver};
use crate::workspace::Workspace;
use language_core::filesystem::{FileSystem, StdFileSystem, VfsFileSystem};
use language_core::{
    build_jump, AnalysisError, AnalysisResult, ContextError, Jump, JumpContext, JumpContextResult,
    Position,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use vfs::VfsPath;

/// Automatic hops allowed while following one click.
pub const MAX_JUMPS: u32 = 10;

const WARNING_TITLE: &str = "refs";

/// Hop budget of one navigation. Every click starts a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpSession {
    remaining_hops: u32,
}

impl JumpSession {
    pub fn new() -> Self {
        Self {
            remaining_hops: MAX_JUMPS,
        }
    }

    pub fn remaining_hops(&self) -> u32 {
        self.remaining_hops
    }

    /// Spend one hop, failing once the budget is exhausted.
    pub fn take_hop(&mut self) -> AnalysisResult<()> {
        if self.remaining_hops == 0 {
            return Err(AnalysisError::TooManyJumps { limit: MAX_JUMPS });
        }
        self.remaining_hops -= 1;
        Ok(())
    }
}

impl Default for JumpSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Where navigation ends: a file, and the position to reveal in it when
/// one is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub filename: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Position>,
}

impl Destination {
    pub fn file(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            destination: None,
        }
    }

    pub fn at(filename: impl Into<PathBuf>, destination: Position) -> Self {
        Self {
            filename: filename.into(),
            destination: Some(destination),
        }
    }
}

/// Outcome of resolving one jump.
#[derive(Debug)]
enum Step {
    Done(Destination),
    Next { filename: PathBuf, jump: Jump },
    Stop,
}

/// Follows jumps from file to file.
pub struct Navigator {
    config: NavigationConfig,
    resolver: Arc<dyn ModuleResolver>,
    fs: Arc<dyn FileSystem>,
    workspace: Arc<dyn Workspace>,
    cache: Arc<JumpContextCache>,
}

impl Navigator {
    pub fn new(
        config: NavigationConfig,
        resolver: Arc<dyn ModuleResolver>,
        fs: Arc<dyn FileSystem>,
        workspace: Arc<dyn Workspace>,
    ) -> Self {
        Self {
            config,
            resolver,
            fs,
            workspace,
            cache: Arc::new(JumpContextCache::new()),
        }
    }

    /// Navigator over the real disk, with `oxc_resolver` for JavaScript
    /// specifiers.
    pub fn on_disk(config: NavigationConfig, workspace: Arc<dyn Workspace>) -> Self {
        let resolver = NodeModuleResolver::new(config.extensions.clone());
        Self::new(config, Arc::new(resolver), Arc::new(StdFileSystem), workspace)
    }

    /// Navigator over a `vfs` tree; absolute paths are relative to `root`.
    pub fn on_vfs(config: NavigationConfig, root: VfsPath, workspace: Arc<dyn Workspace>) -> Self {
        let fs: Arc<dyn FileSystem> = Arc::new(VfsFileSystem::new(root));
        let resolver = SimpleModuleResolver::new(Arc::clone(&fs), config.extensions.clone());
        Self::new(config, Arc::new(resolver), fs, workspace)
    }

    /// Share a cache with other navigators or with reference lookups.
    pub fn with_cache(mut self, cache: Arc<JumpContextCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<JumpContextCache> {
        &self.cache
    }

    /// Where a click at `point` in `path` leads, with the scope taken from
    /// the file extension.
    pub fn definition(
        &self,
        path: &Path,
        content: &str,
        point: Position,
    ) -> AnalysisResult<Option<Destination>> {
        self.definition_in_scope(path, content, scope_for_path(path), point)
    }

    /// Where a click at `point` in `path` leads.
    ///
    /// `Ok(None)` means there is nothing to navigate to, or navigation was
    /// abandoned after a warning.
    pub fn definition_in_scope(
        &self,
        path: &Path,
        content: &str,
        scope: &str,
        point: Position,
    ) -> AnalysisResult<Option<Destination>> {
        let context = self.cache.get_or_create(path, content, scope);
        let jump = match build_jump(&context, point, self.config.jump_options()) {
            Ok(jump) => jump,
            Err(AnalysisError::Syntax(source)) => {
                return Err(AnalysisError::Parse {
                    path: path.to_path_buf(),
                    source,
                })
            }
            Err(err) => return Err(err),
        };
        let Some(jump) = jump else {
            return Ok(None);
        };
        log::debug!("jump from {}: {jump}", path.display());
        Ok(self.resolve_final_destination(path, &jump))
    }

    /// Follow `jump`, made in `from_path`, to its final destination.
    pub fn resolve_final_destination(&self, from_path: &Path, jump: &Jump) -> Option<Destination> {
        let mut session = JumpSession::new();
        let mut filename = from_path.to_path_buf();
        let mut jump = jump.clone();
        loop {
            match self.resolve_next_jump(&filename, &jump, &mut session) {
                Step::Done(destination) => return Some(destination),
                Step::Next {
                    filename: next_file,
                    jump: next_jump,
                } => {
                    log::debug!("following {next_jump} in {}", next_file.display());
                    filename = next_file;
                    jump = next_jump;
                }
                Step::Stop => return None,
            }
        }
    }

    fn resolve_next_jump(&self, from_file: &Path, jump: &Jump, session: &mut JumpSession) -> Step {
        let (module_name, imported) = match jump {
            Jump::Binding { destination } => return Step::Done(Destination::at(from_file, *destination)),
            Jump::Path {
                module_name,
                imported,
                ..
            }
            | Jump::FromImport {
                module_name,
                imported,
                ..
            } => (module_name.as_str(), imported.as_str()),
        };

        let filename = match self.resolver.resolve(from_file, module_name) {
            Resolution::Url { url } => {
                self.workspace.open_external(&url);
                return Step::Stop;
            }
            Resolution::File { filename: None } => {
                self.warn(&module_not_found(module_name, from_file));
                return Step::Stop;
            }
            Resolution::File {
                filename: Some(filename),
            } => filename,
        };

        if !self.fs.exists(&filename) || self.fs.is_dir(&filename) {
            if matches!(jump, Jump::Path { .. }) && self.config.create_not_found {
                self.workspace.offer_create_file(&filename);
            } else {
                self.warn(&module_not_found(module_name, from_file));
            }
            return Step::Stop;
        }
        let filename = self.fs.real_path(&filename).unwrap_or(filename);

        let Some(context) = self.context_for(&filename) else {
            return Step::Stop;
        };
        let context = match context.as_ref() {
            Ok(context) => context,
            Err(ContextError::Parse(err)) => {
                self.warn(&format!(
                    "Unable to find origin: parse error in {}: {err}",
                    filename.display()
                ));
                return Step::Done(Destination::file(filename));
            }
            Err(ContextError::UnsupportedScope(_)) => return Step::Done(Destination::file(filename)),
        };

        let Some(position) = context.export_position(imported) else {
            return Step::Done(Destination::file(filename));
        };

        match self.auto_jump(context, position, session) {
            Ok(Some(Jump::Binding { destination })) => {
                Step::Done(Destination::at(filename, destination))
            }
            Ok(Some(next)) => Step::Next {
                filename,
                jump: next,
            },
            Ok(None) => Step::Done(Destination::at(filename, position)),
            Err(err) => {
                self.warn(&err.to_string());
                Step::Stop
            }
        }
    }

    /// The jump to take from an export reached in another file, when the
    /// export is only an intermediate step.
    fn auto_jump(
        &self,
        context: &JumpContext,
        point: Position,
        session: &mut JumpSession,
    ) -> AnalysisResult<Option<Jump>> {
        if !self.config.skip_intermediate {
            return Ok(None);
        }
        session.take_hop()?;
        match context.build_jump(point, self.config.jump_options())? {
            Some(Jump::FromImport { .. }) if self.config.jump_to_import => Ok(None),
            next => Ok(next),
        }
    }

    fn context_for(&self, path: &Path) -> Option<Arc<JumpContextResult>> {
        match self.fs.read_to_string(path) {
            Ok(content) => Some(self.cache.get_or_create(path, &content, scope_for_path(path))),
            Err(err) => {
                self.warn(&format!("Unable to read {}: {err}", path.display()));
                None
            }
        }
    }

    fn warn(&self, detail: &str) {
        log::warn!("{detail}");
        self.workspace.notify_warning(WARNING_TITLE, detail);
    }
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("config", &self.config)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

fn module_not_found(specifier: &str, from_path: &Path) -> String {
    AnalysisError::ModuleNotFound {
        specifier: specifier.to_string(),
        from_path: from_path.to_path_buf(),
    }
    .to_string()
}
