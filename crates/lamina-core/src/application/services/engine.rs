//! Engine - the view-rendering orchestrator.
//!
//! This service coordinates the whole render workflow:
//! 1. Resolve the requested name (extension strip, layout decision)
//! 2. Fetch-or-compile the template bundle through the cache
//! 3. Execute the bundle against the data, writing to the caller's sink
//!
//! It implements the driving port ([`ViewRenderer`]) and uses driven ports
//! ([`TemplateRoot`], [`TemplateCompiler`]).

use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex, RwLock};

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CompiledTemplate, TemplateCompiler, TemplateRoot, TemplateUnit},
        view::{ViewContext, ViewRenderer},
    },
    domain::{self, EngineConfig, LoadMode, ResolvedName},
    error::LaminaResult,
};

/// Layout-aware template engine.
///
/// Owns the template root, the compiler, and a name → bundle cache. Entries,
/// once compiled, are never invalidated or recompiled; the engine is built
/// once at startup and shared (`Arc<Engine>`) across request handlers.
pub struct Engine {
    root: Box<dyn TemplateRoot>,
    compiler: Box<dyn TemplateCompiler>,
    config: EngineConfig,
    cache: RwLock<HashMap<String, Arc<dyn CompiledTemplate>>>,
    // Eager bookkeeping: flips to true once the first-render walk completes.
    loaded: Mutex<bool>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Create a new engine with the given adapters.
    ///
    /// The cache starts empty in both load modes; an eager engine performs
    /// its root walk on the first render call.
    pub fn new(
        root: Box<dyn TemplateRoot>,
        compiler: Box<dyn TemplateCompiler>,
        config: EngineConfig,
    ) -> Self {
        Self {
            root,
            compiler,
            config,
            cache: RwLock::new(HashMap::new()),
            loaded: Mutex::new(false),
        }
    }

    /// Render the named template with `data` into `out`.
    ///
    /// A name carrying the configured extension is rendered standalone (the
    /// layout is bypassed for that call); otherwise the configured layout, if
    /// any, wraps the content.
    pub fn render<T: Serialize>(
        &self,
        out: &mut dyn Write,
        name: &str,
        data: &T,
    ) -> LaminaResult<()> {
        let value =
            serde_json::to_value(data).map_err(|e| ApplicationError::DataSerialization {
                reason: e.to_string(),
            })?;
        self.render_value(out, name, &value)
    }

    /// Render with data already in JSON-value form.
    #[instrument(skip_all, fields(template = %name))]
    pub fn render_value(
        &self,
        out: &mut dyn Write,
        name: &str,
        data: &serde_json::Value,
    ) -> LaminaResult<()> {
        let resolved = domain::resolve(name, self.config.extension())?;

        // The layout is only ever an entry point, never a render target: a
        // layout-keyed bundle would register the layout source as its own
        // `content` partial and recurse through the insertion point. The
        // eager walk already skips the layout file, so a miss here keeps the
        // two modes consistent.
        if Some(resolved.key.as_str()) == self.config.layout() {
            return Err(ApplicationError::TemplateNotFound {
                name: resolved.key,
            }
            .into());
        }

        if self.config.mode() == LoadMode::Eager {
            self.ensure_loaded()?;
        }

        let compiled = match self.lookup(&resolved.key)? {
            Some(compiled) => compiled,
            None if self.config.mode() == LoadMode::Eager => {
                return Err(ApplicationError::TemplateNotFound {
                    name: resolved.key,
                }
                .into());
            }
            None => self.compile_locked(&resolved.key)?,
        };

        compiled.execute(self.entry_point(&resolved), data, out)
    }

    /// Number of compiled bundles currently cached.
    pub fn compiled_count(&self) -> usize {
        self.cache.read().map(|c| c.len()).unwrap_or(0)
    }

    /// Whether an eager engine has completed its first-render walk.
    pub fn is_loaded(&self) -> bool {
        self.loaded.lock().map(|l| *l).unwrap_or(false)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Entry point to execute: the layout when it applies, else the content.
    fn entry_point<'a>(&'a self, resolved: &'a ResolvedName) -> &'a str {
        match self.config.layout() {
            Some(layout) if !resolved.standalone => layout,
            _ => &resolved.key,
        }
    }

    fn lookup(&self, key: &str) -> LaminaResult<Option<Arc<dyn CompiledTemplate>>> {
        let cache = self.cache.read().map_err(|_| ApplicationError::CacheLock)?;
        Ok(cache.get(key).cloned())
    }

    /// Compile and insert under the write lock, re-checking first.
    ///
    /// The re-check makes check-and-set atomic: concurrent first requests for
    /// one key serialize here and exactly one of them compiles.
    fn compile_locked(&self, key: &str) -> LaminaResult<Arc<dyn CompiledTemplate>> {
        let mut cache = self
            .cache
            .write()
            .map_err(|_| ApplicationError::CacheLock)?;

        if let Some(existing) = cache.get(key) {
            return Ok(existing.clone());
        }

        let compiled = self.compile_bundle(key)?;
        debug!(template = key, "compiled template bundle");
        cache.insert(key.to_string(), compiled.clone());
        Ok(compiled)
    }

    /// Build one executable bundle for `key`.
    ///
    /// When a layout is configured it is always co-compiled, with the content
    /// aliased under the reserved `content` partial the layout inserts. The
    /// alias is registered after the key itself so a parse error names the
    /// requested template, not the alias.
    fn compile_bundle(&self, key: &str) -> LaminaResult<Arc<dyn CompiledTemplate>> {
        let mut units = Vec::with_capacity(3);

        if let Some(layout) = self.config.layout() {
            units.push(TemplateUnit::new(layout, self.load(layout)?));
        }
        let content = self.load(key)?;
        units.push(TemplateUnit::new(key, content.clone()));
        if self.config.layout().is_some() {
            units.push(TemplateUnit::new(domain::CONTENT_PARTIAL, content));
        }

        Ok(Arc::from(self.compiler.compile(&units)?))
    }

    /// Read one template's source, wrapping failures with its name.
    fn load(&self, name: &str) -> LaminaResult<String> {
        let path = domain::name::file_for(name, self.config.extension());
        self.root
            .read(&path)
            .map_err(|e| ApplicationError::LoadFailed {
                name: name.to_string(),
                reason: e.to_string(),
            }
            .into())
    }

    /// Eager first-render walk: compile every matching file under the root.
    ///
    /// The whole walk runs inside one critical section with the flag
    /// re-checked after acquisition, so concurrent first renders serialize
    /// and only one performs the walk. A file that fails to read or parse is
    /// logged and skipped; the engine stays usable for every valid template.
    /// A failed walk leaves the flag false so a later render can retry.
    fn ensure_loaded(&self) -> LaminaResult<()> {
        let mut loaded = self.loaded.lock().map_err(|_| ApplicationError::CacheLock)?;
        if *loaded {
            return Ok(());
        }

        let layout = self.config.layout();
        for path in self.root.walk()? {
            let Some(key) = domain::key_for_path(&path, self.config.extension()) else {
                continue;
            };
            if Some(key.as_str()) == layout {
                continue;
            }
            if let Err(e) = self.compile_locked(&key) {
                warn!(template = %key, error = %e, "skipping template during eager load");
            }
        }

        *loaded = true;
        debug!(compiled = self.compiled_count(), "eager load complete");
        Ok(())
    }
}

impl ViewRenderer for Engine {
    fn render(
        &self,
        out: &mut dyn Write,
        name: &str,
        data: &serde_json::Value,
        ctx: &ViewContext,
    ) -> LaminaResult<()> {
        // The host's request context carries no behavior here.
        let _ = ctx;
        self.render_value(out, name, data)
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::LaminaError;

    /// Root over a fixed file map, counting reads through a shared handle.
    struct StubRoot {
        files: Vec<(PathBuf, String)>,
        reads: std::sync::Arc<AtomicUsize>,
    }

    impl StubRoot {
        fn new(files: &[(&str, &str)]) -> Self {
            Self::counted(files, std::sync::Arc::new(AtomicUsize::new(0)))
        }

        fn counted(files: &[(&str, &str)], reads: std::sync::Arc<AtomicUsize>) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(p, c)| (PathBuf::from(p), c.to_string()))
                    .collect(),
                reads,
            }
        }
    }

    impl TemplateRoot for StubRoot {
        fn read(&self, path: &Path) -> LaminaResult<String> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.files
                .iter()
                .find(|(p, _)| p == path)
                .map(|(_, c)| c.clone())
                .ok_or_else(|| {
                    ApplicationError::RootIo {
                        path: path.to_path_buf(),
                        reason: "no such file".into(),
                    }
                    .into()
                })
        }

        fn walk(&self) -> LaminaResult<Vec<PathBuf>> {
            Ok(self.files.iter().map(|(p, _)| p.clone()).collect())
        }

        fn narrow(&self, dir: &Path) -> LaminaResult<Box<dyn TemplateRoot>> {
            Err(ApplicationError::RootNarrowing {
                dir: dir.to_path_buf(),
            }
            .into())
        }
    }

    /// Root whose walk fails a set number of times before succeeding.
    struct FlakyWalkRoot {
        inner: StubRoot,
        walk_failures: AtomicUsize,
    }

    impl FlakyWalkRoot {
        fn new(files: &[(&str, &str)], walk_failures: usize) -> Self {
            Self {
                inner: StubRoot::new(files),
                walk_failures: AtomicUsize::new(walk_failures),
            }
        }
    }

    impl TemplateRoot for FlakyWalkRoot {
        fn read(&self, path: &Path) -> LaminaResult<String> {
            self.inner.read(path)
        }

        fn walk(&self) -> LaminaResult<Vec<PathBuf>> {
            if self.walk_failures.load(Ordering::SeqCst) > 0 {
                self.walk_failures.fetch_sub(1, Ordering::SeqCst);
                return Err(ApplicationError::RootIo {
                    path: PathBuf::new(),
                    reason: "root temporarily unreadable".into(),
                }
                .into());
            }
            self.inner.walk()
        }

        fn narrow(&self, dir: &Path) -> LaminaResult<Box<dyn TemplateRoot>> {
            self.inner.narrow(dir)
        }
    }

    /// Compiler whose bundles echo the entry point and unit names.
    /// A unit source containing "BOOM" fails the compile.
    struct StubCompiler;

    impl StubCompiler {
        fn new() -> Self {
            Self
        }
    }

    struct StubCompiled {
        names: Vec<String>,
    }

    impl TemplateCompiler for StubCompiler {
        fn compile(&self, units: &[TemplateUnit]) -> LaminaResult<Box<dyn CompiledTemplate>> {
            if let Some(bad) = units.iter().find(|u| u.source.contains("BOOM")) {
                return Err(ApplicationError::ParseFailed {
                    name: bad.name.clone(),
                    reason: "boom".into(),
                }
                .into());
            }
            Ok(Box::new(StubCompiled {
                names: units.iter().map(|u| u.name.clone()).collect(),
            }))
        }
    }

    impl CompiledTemplate for StubCompiled {
        fn execute(
            &self,
            entry: &str,
            _data: &serde_json::Value,
            out: &mut dyn Write,
        ) -> LaminaResult<()> {
            write!(out, "{entry}[{}]", self.names.join(",")).map_err(|e| {
                LaminaError::from(ApplicationError::ExecutionFailed {
                    reason: e.to_string(),
                })
            })
        }
    }

    fn lazy_engine(files: &[(&str, &str)], layout: Option<&str>) -> Engine {
        Engine::new(
            Box::new(StubRoot::new(files)),
            Box::new(StubCompiler::new()),
            EngineConfig::new(".html", layout, LoadMode::Lazy).unwrap(),
        )
    }

    #[test]
    fn layout_entry_point_applies_to_plain_names() {
        let engine = lazy_engine(
            &[("main.html", "layout"), ("index.html", "page")],
            Some("main"),
        );

        let mut out = Vec::new();
        engine
            .render(&mut out, "index", &serde_json::json!({}))
            .unwrap();
        // Entry is the layout; bundle holds layout, content, and the alias.
        assert_eq!(String::from_utf8(out).unwrap(), "main[main,index,content]");
    }

    #[test]
    fn extension_suffix_bypasses_layout_entry() {
        let engine = lazy_engine(
            &[("main.html", "layout"), ("partial.html", "page")],
            Some("main"),
        );

        let mut out = Vec::new();
        engine
            .render(&mut out, "partial.html", &serde_json::json!({}))
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "partial[main,partial,content]"
        );
    }

    #[test]
    fn second_render_hits_cache_without_rereading() {
        let reads = std::sync::Arc::new(AtomicUsize::new(0));
        let engine = Engine::new(
            Box::new(StubRoot::counted(&[("index.html", "page")], reads.clone())),
            Box::new(StubCompiler::new()),
            EngineConfig::new(".html", None, LoadMode::Lazy).unwrap(),
        );

        let mut out = Vec::new();
        engine
            .render(&mut out, "index", &serde_json::json!({}))
            .unwrap();
        engine
            .render(&mut out, "index", &serde_json::json!({}))
            .unwrap();

        assert_eq!(engine.compiled_count(), 1);
        assert_eq!(reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_template_is_a_load_error_when_lazy() {
        let engine = lazy_engine(&[], None);

        let mut out = Vec::new();
        let err = engine
            .render(&mut out, "ghost", &serde_json::json!({}))
            .unwrap_err();
        assert!(matches!(
            err,
            LaminaError::Application(ApplicationError::LoadFailed { .. })
        ));
    }

    #[test]
    fn eager_miss_is_not_found_and_bad_files_are_skipped() {
        let engine = Engine::new(
            Box::new(StubRoot::new(&[
                ("good.html", "fine"),
                ("bad.html", "BOOM"),
                ("notes.txt", "ignored"),
            ])),
            Box::new(StubCompiler::new()),
            EngineConfig::new(".html", None, LoadMode::Eager).unwrap(),
        );

        let mut out = Vec::new();
        engine
            .render(&mut out, "good", &serde_json::json!({}))
            .unwrap();
        assert!(engine.is_loaded());
        assert_eq!(engine.compiled_count(), 1);

        let err = engine
            .render(&mut out, "bad", &serde_json::json!({}))
            .unwrap_err();
        assert!(matches!(
            err,
            LaminaError::Application(ApplicationError::TemplateNotFound { .. })
        ));
    }

    #[test]
    fn eager_walk_skips_the_layout_file() {
        let engine = Engine::new(
            Box::new(StubRoot::new(&[
                ("layout/main.html", "layout"),
                ("index.html", "page"),
            ])),
            Box::new(StubCompiler::new()),
            EngineConfig::new(".html", Some("layout/main"), LoadMode::Eager).unwrap(),
        );

        let mut out = Vec::new();
        engine
            .render(&mut out, "index", &serde_json::json!({}))
            .unwrap();
        // Only "index" is cached; the layout rides inside its bundle.
        assert_eq!(engine.compiled_count(), 1);
    }

    #[test]
    fn failed_eager_walk_is_retried_on_the_next_render() {
        let engine = Engine::new(
            Box::new(FlakyWalkRoot::new(&[("index.html", "page")], 1)),
            Box::new(StubCompiler::new()),
            EngineConfig::new(".html", None, LoadMode::Eager).unwrap(),
        );

        let mut out = Vec::new();
        let err = engine
            .render(&mut out, "index", &serde_json::json!({}))
            .unwrap_err();
        assert!(matches!(
            err,
            LaminaError::Application(ApplicationError::RootIo { .. })
        ));
        // The flag stays down, so the next render walks again.
        assert!(!engine.is_loaded());
        assert_eq!(engine.compiled_count(), 0);

        engine
            .render(&mut out, "index", &serde_json::json!({}))
            .unwrap();
        assert!(engine.is_loaded());
        assert_eq!(String::from_utf8(out).unwrap(), "index[index]");
    }

    #[test]
    fn layout_key_is_not_a_render_target() {
        let engine = lazy_engine(
            &[("main.html", "layout"), ("index.html", "page")],
            Some("main"),
        );

        let mut out = Vec::new();
        for name in ["main", "main.html"] {
            let err = engine
                .render(&mut out, name, &serde_json::json!({}))
                .unwrap_err();
            assert!(matches!(
                err,
                LaminaError::Application(ApplicationError::TemplateNotFound { .. })
            ));
        }
        assert_eq!(engine.compiled_count(), 0);
    }

    #[test]
    fn view_renderer_contract_ignores_the_context() {
        let engine = lazy_engine(&[("index.html", "page")], None);
        let mut ctx = ViewContext::new();
        ctx.insert("request_id", "abc-123");

        let mut out = Vec::new();
        ViewRenderer::render(&engine, &mut out, "index", &serde_json::json!({}), &ctx).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "index[index]");
    }
}
